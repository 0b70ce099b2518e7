use crate::Version;

/// Determine the QR code's canvas size in modules for the given `version`.
/// # Example
/// ```
/// use qrdraw_core::{qrstandard, Version};
/// assert_eq!(qrstandard::canvas_size(Version::V01), 21);
/// assert_eq!(qrstandard::canvas_size(Version::V40), 177);
/// ```
pub fn canvas_size(version: Version) -> usize {
    17 + version.number() as usize * 4
}
