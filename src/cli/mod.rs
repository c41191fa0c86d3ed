pub mod arbitrary_values;
pub mod global_args;
pub mod json_log_behaviour;
pub mod thumbnail_args;
pub mod to_args;

use crate::cli::global_args::GlobalArgs;
use crate::cli::thumbnail_args::ThumbnailArgs;
use arbitrary::Arbitrary;
use clap::Parser;
use std::ffi::OsString;
use to_args::ToArgs;

#[derive(Parser, Arbitrary, PartialEq, Debug)]
#[clap(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_REVISION"), ")"),
    about
)]
pub struct Cli {
    #[clap(flatten)]
    pub global_args: GlobalArgs,

    #[clap(flatten)]
    pub thumbnail_args: ThumbnailArgs,
}

impl Cli {
    /// # Errors
    ///
    /// Returns an error if the thumbnail run cannot start.
    pub fn invoke(self) -> eyre::Result<()> {
        self.thumbnail_args.invoke()
    }
}

impl ToArgs for Cli {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        args.extend(self.global_args.to_args());
        args.extend(self.thumbnail_args.to_args());
        args
    }
}
