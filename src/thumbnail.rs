//! Rendering letterboxed thumbnails and writing them to disk

use crate::error::SaveError;
use crate::error::UnreadableImageError;
use crate::geometry::Dimensions;
use crate::geometry::compute_paste_offset;
use crate::geometry::compute_scaled_size;
use crate::metadata::ImageMetadata;
use crate::resample_filter::ResampleFilter;
use image::ImageError;
use image::ImageReader;
use image::Rgb;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use image::metadata::Orientation;
use image::imageops;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// File name suffix (compared case-insensitively) of images that get thumbnails
pub const IMAGE_EXTENSION: &str = ".jpg";

/// Whether a file name qualifies for thumbnailing
#[must_use]
pub fn is_qualifying_name(name: &str) -> bool {
    name.to_lowercase().ends_with(IMAGE_EXTENSION)
}

/// Everything that controls how a thumbnail looks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThumbnailSettings {
    /// Exact size of every produced thumbnail
    pub target: Dimensions,
    /// Filter used when shrinking
    pub filter: ResampleFilter,
    /// Letterbox colour
    pub background: Rgb<u8>,
    /// JPEG quality, 1-100
    pub quality: u8,
}

impl ThumbnailSettings {
    pub const DEFAULT_QUALITY: u8 = 75;
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[must_use]
    pub fn new(target: Dimensions) -> Self {
        Self {
            target,
            filter: ResampleFilter::default(),
            background: Self::BLACK,
            quality: Self::DEFAULT_QUALITY,
        }
    }
}

/// An in-memory thumbnail, ready to be saved
#[derive(Clone, Debug)]
pub struct RenderedThumbnail {
    /// Canvas of exactly the target size
    pub image: RgbImage,
    /// Blocks to embed on save, `None` if the source had none
    pub metadata: Option<ImageMetadata>,
    pub source_size: Dimensions,
    pub scaled_size: Dimensions,
}

/// Load `source_path`, shrink it to fit `settings.target` and paste it centered on
/// a background canvas of exactly that size.
///
/// A non-upright EXIF orientation is applied to the pixels first and the carried
/// tag is reset to 1, so `source_size` is the upright size.
///
/// # Errors
///
/// Returns [`UnreadableImageError`] if the file cannot be read or decoded.
pub fn render_thumbnail(
    source_path: &Path,
    settings: &ThumbnailSettings,
) -> Result<RenderedThumbnail, UnreadableImageError> {
    let unreadable = |source: ImageError| UnreadableImageError {
        path: source_path.to_path_buf(),
        source,
    };

    let bytes = fs::read(source_path).map_err(|e| unreadable(ImageError::IoError(e)))?;
    let mut source = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| unreadable(ImageError::IoError(e)))?
        .decode()
        .map_err(unreadable)?;

    // bake the EXIF orientation into the pixels so the letterbox is laid out upright
    let mut metadata = ImageMetadata::from_jpeg_bytes(&bytes);
    let orientation = metadata.as_ref().and_then(ImageMetadata::orientation);
    if let Some(rotation) = orientation
        .and_then(|o| u8::try_from(o).ok())
        .and_then(Orientation::from_exif)
        && rotation != Orientation::NoTransforms
    {
        source.apply_orientation(rotation);
        metadata = metadata.map(|m| m.with_orientation_reset());
    }

    let source_size = Dimensions::new(source.width(), source.height());
    let scaled_size = compute_scaled_size(source_size, settings.target);
    let resized = if scaled_size == source_size {
        source.to_rgb8()
    } else {
        source
            .resize_exact(scaled_size.width, scaled_size.height, settings.filter.into())
            .to_rgb8()
    };

    let mut canvas = RgbImage::from_pixel(
        settings.target.width,
        settings.target.height,
        settings.background,
    );
    let (left, top) = compute_paste_offset(scaled_size, settings.target);
    imageops::replace(&mut canvas, &resized, i64::from(left), i64::from(top));

    debug!(
        path = %source_path.display(),
        %source_size,
        %scaled_size,
        left,
        top,
        has_metadata = metadata.is_some(),
        ?orientation,
        "Rendered thumbnail"
    );

    Ok(RenderedThumbnail {
        image: canvas,
        metadata,
        source_size,
        scaled_size,
    })
}

/// Encode `thumbnail` as JPEG (embedding its metadata when present) and write it
/// to `dest_path`.
///
/// The bytes go to a hidden sibling file first and are renamed into place, so
/// `dest_path` is either the previous file or the complete new one.
///
/// # Errors
///
/// Returns an error if encoding, embedding metadata, or writing fails.
pub fn save_thumbnail(
    thumbnail: &RenderedThumbnail,
    dest_path: &Path,
    settings: &ThumbnailSettings,
) -> Result<(), SaveError> {
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, settings.quality).encode_image(&thumbnail.image)?;

    let bytes = match &thumbnail.metadata {
        Some(metadata) => metadata.embed_into_jpeg(encoded)?,
        None => encoded,
    };

    write_atomically(dest_path, &bytes)
}

fn write_atomically(dest_path: &Path, bytes: &[u8]) -> Result<(), SaveError> {
    let io_error = |source: std::io::Error| SaveError::Io {
        path: dest_path.to_path_buf(),
        source,
    };

    let file_name = dest_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let partial = dest_path.with_file_name(format!(".{file_name}.partial"));

    let written = fs::write(&partial, bytes).and_then(|()| fs::rename(&partial, dest_path));
    if let Err(e) = written {
        let _ = fs::remove_file(&partial);
        return Err(io_error(e));
    }
    Ok(())
}
