//! Generators for CLI values that clap will accept back verbatim

use arbitrary::Unstructured;
use std::path::PathBuf;

const PATH_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_-./";

/// A non-empty relative path that does not start with `-`
pub fn path(u: &mut Unstructured<'_>) -> arbitrary::Result<PathBuf> {
    let len = u.int_in_range(1..=24)?;
    let mut s = String::with_capacity(len);
    s.push(char::from(u.int_in_range(b'a'..=b'z')?));
    for _ in 1..len {
        s.push(char::from(*u.choose(PATH_CHARS)?));
    }
    Ok(PathBuf::from(s))
}

pub fn optional_path(u: &mut Unstructured<'_>) -> arbitrary::Result<Option<PathBuf>> {
    if u.arbitrary()? { Ok(Some(path(u)?)) } else { Ok(None) }
}

/// A thumbnail side length
pub fn dimension(u: &mut Unstructured<'_>) -> arbitrary::Result<u32> {
    u.int_in_range(1..=8192)
}

/// A JPEG quality
pub fn quality(u: &mut Unstructured<'_>) -> arbitrary::Result<u8> {
    u.int_in_range(1..=100)
}
