use crate::cli::arbitrary_values;
use crate::cli::to_args::ToArgs;
use crate::geometry::Dimensions;
use crate::resample_filter::ResampleFilter;
use crate::sync::SyncOptions;
use crate::sync::sync_tree;
use crate::thumbnail::ThumbnailSettings;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Args, Arbitrary, Clone, PartialEq, Debug)]
pub struct ThumbnailArgs {
    /// Directory tree of .jpg images to thumbnail
    #[arbitrary(with = arbitrary_values::path)]
    pub source_dir: PathBuf,

    /// Existing directory receiving the mirrored thumbnails
    #[arbitrary(with = arbitrary_values::path)]
    pub dest_dir: PathBuf,

    /// Thumbnail width in pixels
    #[clap(value_parser = clap::value_parser!(u32).range(1..))]
    #[arbitrary(with = arbitrary_values::dimension)]
    pub width: u32,

    /// Thumbnail height in pixels
    #[clap(value_parser = clap::value_parser!(u32).range(1..))]
    #[arbitrary(with = arbitrary_values::dimension)]
    pub height: u32,

    /// Resampling filter used when shrinking
    #[clap(long, value_enum, default_value_t = ResampleFilter::default())]
    pub filter: ResampleFilter,

    /// JPEG quality of written thumbnails
    #[clap(long, default_value_t = ThumbnailSettings::DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    #[arbitrary(with = arbitrary_values::quality)]
    pub quality: u8,

    /// Show what would be generated without writing anything
    #[clap(long)]
    pub dry_run: bool,
}

impl ThumbnailArgs {
    #[must_use]
    pub fn settings(&self) -> ThumbnailSettings {
        ThumbnailSettings {
            filter: self.filter,
            quality: self.quality,
            ..ThumbnailSettings::new(Dimensions::new(self.width, self.height))
        }
    }

    /// # Errors
    ///
    /// Returns an error if the source and destination directories cannot be used together.
    pub fn invoke(self) -> eyre::Result<()> {
        let options = SyncOptions {
            settings: self.settings(),
            dry_run: self.dry_run,
        };
        let report = sync_tree(&self.source_dir, &self.dest_dir, &options)?;
        if self.dry_run {
            println!(
                "\nWould generate {} thumbnails ({} up to date)",
                report.generated_count(),
                report.up_to_date
            );
        }
        Ok(())
    }
}

impl ToArgs for ThumbnailArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if self.filter != ResampleFilter::default() {
            args.push("--filter".into());
            args.push(self.filter.to_string().into());
        }
        if self.quality != ThumbnailSettings::DEFAULT_QUALITY {
            args.push("--quality".into());
            args.push(self.quality.to_string().into());
        }
        if self.dry_run {
            args.push("--dry-run".into());
        }
        // positionals are never mistaken for flags after this
        args.push("--".into());
        args.push(self.source_dir.clone().into());
        args.push(self.dest_dir.clone().into());
        args.push(self.width.to_string().into());
        args.push(self.height.to_string().into());
        args
    }
}
