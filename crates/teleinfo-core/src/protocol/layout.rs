//! Wire-format constants for both Teleinfo modes.

pub const CHECKSUM_LEN: usize = 1;
pub const CHECKSUM_MASK: u8 = 0x3F;
pub const CHECKSUM_OFFSET: u8 = 0x20;

pub const HISTORIC_FIELD_SEPARATOR: &[u8] = b"\r\n";
pub const HISTORIC_ELEMENT_SEPARATOR: u8 = b' ';
pub const HISTORIC_FIELD_PARTS: usize = 3;
pub const HISTORIC_TRIM: &[u8] = b"\r\n";

pub const STANDARD_FIELD_SEPARATOR: u8 = b'\r';
pub const STANDARD_ELEMENT_SEPARATOR: u8 = b'\t';
pub const STANDARD_FIELD_PREFIX: u8 = b'\n';

/// Field whose presence marks a historic frame and whose value is the frame type.
pub const TARIFF_OPTION_FIELD: &str = "OPTARIF";
