//! Shared utility helpers.

use std::path::Path;

use encoding_rs::WINDOWS_1252;

/// Case-insensitive starts_with check without allocating.
#[inline]
pub fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

/// Case-insensitive keyword prefix: `needle` must not be followed by an
/// identifier character, so `CONSTRAINT` matches `CONSTRAINT fk` but not
/// `constraint_type`.
#[inline]
pub fn starts_with_keyword(haystack: &str, keyword: &str) -> bool {
    starts_with_ci(haystack, keyword)
        && !haystack[keyword.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Read a file as a string, trying UTF-8 first, then Windows-1252 as fallback.
///
/// A leading UTF-8 byte order mark is dropped.
pub fn read_file_with_encoding_fallback(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(err) => {
            // Fall back to Windows-1252 (common for files saved by older Windows editors)
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = WINDOWS_1252.decode(&bytes);
            if had_errors {
                Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "File contains invalid characters",
                ))
            } else {
                Ok(decoded.into_owned())
            }
        }
    }
}
