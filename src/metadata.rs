//! EXIF and ICC blocks carried from a source JPEG onto its thumbnail

use crate::error::MetadataError;
use exif::In;
use exif::Tag;
use img_parts::Bytes;
use img_parts::ImageEXIF;
use img_parts::ImageICC;
use img_parts::jpeg::Jpeg;

/// Metadata blocks lifted verbatim from a source JPEG.
///
/// A value only exists when at least one block is present, so
/// `Option<ImageMetadata>` is `None` exactly when there is nothing to carry over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Raw TIFF-structured EXIF payload (without the `Exif\0\0` marker)
    pub exif: Option<Bytes>,
    /// Embedded ICC colour profile
    pub icc_profile: Option<Bytes>,
}

impl ImageMetadata {
    /// Extract metadata from encoded JPEG bytes.
    ///
    /// Returns `None` if the bytes are not a JPEG container or carry no EXIF/ICC blocks.
    #[must_use]
    pub fn from_jpeg_bytes(bytes: &[u8]) -> Option<ImageMetadata> {
        let jpeg = Jpeg::from_bytes(Bytes::copy_from_slice(bytes)).ok()?;
        let exif = jpeg.exif();
        let icc_profile = jpeg.icc_profile();
        if exif.is_none() && icc_profile.is_none() {
            return None;
        }
        Some(ImageMetadata { exif, icc_profile })
    }

    /// Rewrite an encoded JPEG so it contains these blocks
    ///
    /// # Errors
    ///
    /// Returns an error if `encoded` is not a well-formed JPEG stream.
    pub fn embed_into_jpeg(&self, encoded: Vec<u8>) -> Result<Vec<u8>, MetadataError> {
        let mut jpeg = Jpeg::from_bytes(Bytes::from(encoded))?;
        if let Some(exif) = &self.exif {
            jpeg.set_exif(Some(exif.clone()));
        }
        if let Some(icc) = &self.icc_profile {
            jpeg.set_icc_profile(Some(icc.clone()));
        }

        let mut out = Vec::new();
        jpeg.encoder().write_to(&mut out)?;
        Ok(out)
    }

    /// The EXIF orientation tag (1-8), if the EXIF block parses and has one
    #[must_use]
    pub fn orientation(&self) -> Option<u32> {
        let raw = self.exif.as_ref()?;
        let exif = exif::Reader::new().read_raw(raw.to_vec()).ok()?;
        exif.get_field(Tag::Orientation, In::PRIMARY)?
            .value
            .get_uint(0)
    }

    /// A copy whose EXIF orientation tag says the pixels are stored upright.
    ///
    /// Used once the orientation has been baked into the pixels. Returns the
    /// metadata unchanged if there is no orientation entry to rewrite.
    #[must_use]
    pub fn with_orientation_reset(&self) -> ImageMetadata {
        let Some(raw) = &self.exif else {
            return self.clone();
        };
        let mut tiff = raw.to_vec();
        if patch_orientation(&mut tiff, 1).is_none() {
            return self.clone();
        }
        ImageMetadata {
            exif: Some(Bytes::from(tiff)),
            icc_profile: self.icc_profile.clone(),
        }
    }
}

/// Overwrite the SHORT Orientation entry of IFD0 in a TIFF-structured EXIF block
fn patch_orientation(tiff: &mut [u8], value: u16) -> Option<()> {
    const ORIENTATION: u16 = 0x0112;
    const SHORT: u16 = 3;
    const ENTRY_LEN: usize = 12;

    let big_endian = match tiff.get(0..2)? {
        b"MM" => true,
        b"II" => false,
        _ => return None,
    };
    let read_u16 = |buf: &[u8], at: usize| -> Option<u16> {
        let raw: [u8; 2] = buf.get(at..at + 2)?.try_into().ok()?;
        Some(if big_endian { u16::from_be_bytes(raw) } else { u16::from_le_bytes(raw) })
    };
    let read_u32 = |buf: &[u8], at: usize| -> Option<u32> {
        let raw: [u8; 4] = buf.get(at..at + 4)?.try_into().ok()?;
        Some(if big_endian { u32::from_be_bytes(raw) } else { u32::from_le_bytes(raw) })
    };

    let ifd0 = usize::try_from(read_u32(tiff, 4)?).ok()?;
    let entries = usize::from(read_u16(tiff, ifd0)?);
    for index in 0..entries {
        let entry = ifd0 + 2 + index * ENTRY_LEN;
        if read_u16(tiff, entry)? != ORIENTATION {
            continue;
        }
        if read_u16(tiff, entry + 2)? != SHORT {
            return None;
        }
        let encoded = if big_endian { value.to_be_bytes() } else { value.to_le_bytes() };
        tiff.get_mut(entry + 8..entry + 10)?.copy_from_slice(&encoded);
        return Some(());
    }
    None
}
