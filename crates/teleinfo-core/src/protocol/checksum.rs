//! Per-field checksum computation.
//!
//! Both modes sum the unsigned bytes of the field segments with 8-bit
//! wraparound, then keep the low six bits and shift the result into the
//! printable ASCII range: `(sum & 0x3F) + 0x20`.
//!
//! Standard mode separates segments with a horizontal tab and also counts the
//! tab that precedes the checksum byte. Historic mode only counts the space
//! between name and value.

use super::layout::{
    CHECKSUM_MASK, CHECKSUM_OFFSET, HISTORIC_ELEMENT_SEPARATOR, STANDARD_ELEMENT_SEPARATOR,
};

fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

fn finish(sum: u8) -> u8 {
    (sum & CHECKSUM_MASK) + CHECKSUM_OFFSET
}

/// Checksum of a standard-mode field.
///
/// An empty `timestamp` selects the two-segment variant.
///
/// # Examples
/// ```
/// use teleinfo_core::protocol::checksum::standard_checksum;
///
/// assert_eq!(standard_checksum(b"VTIC", b"", b"02"), b'J');
/// ```
pub fn standard_checksum(name: &[u8], timestamp: &[u8], value: &[u8]) -> u8 {
    let mut total = sum(name).wrapping_add(STANDARD_ELEMENT_SEPARATOR);
    if !timestamp.is_empty() {
        total = total
            .wrapping_add(sum(timestamp))
            .wrapping_add(STANDARD_ELEMENT_SEPARATOR);
    }
    total = total
        .wrapping_add(sum(value))
        .wrapping_add(STANDARD_ELEMENT_SEPARATOR);
    finish(total)
}

/// Checksum of a historic-mode field.
///
/// # Examples
/// ```
/// use teleinfo_core::protocol::checksum::historic_checksum;
///
/// assert_eq!(historic_checksum(b"ISOUSC", b"15"), b'<');
/// ```
pub fn historic_checksum(name: &[u8], value: &[u8]) -> u8 {
    let total = sum(name)
        .wrapping_add(HISTORIC_ELEMENT_SEPARATOR)
        .wrapping_add(sum(value));
    finish(total)
}
