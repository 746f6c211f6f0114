use std::collections::BTreeMap;

use super::checksum::standard_checksum;
use super::error::DecodeError;
use super::reader::{FieldReader, FrameReader};
use crate::frame::Frame;

/// Decodes a standard-mode frame (`NAME HT [TIMESTAMP HT] VALUE HT CHECKSUM`,
/// CR separated).
///
/// Only structure and checksums are validated; field names are not checked
/// and timestamps are not kept in the frame.
pub fn decode_standard(payload: &[u8]) -> Result<Frame, DecodeError> {
    let mut fields = BTreeMap::new();

    for raw in FrameReader::new(payload).standard_fields() {
        let Some(field) = FieldReader::new(raw).read_standard()? else {
            continue;
        };
        let expected = standard_checksum(field.name, field.timestamp, field.value);
        if field.checksum != expected {
            return Err(DecodeError::ChecksumMismatch {
                name: field.name.to_vec(),
                value: field.value.to_vec(),
                read: field.checksum,
                expected,
            });
        }
        fields.insert(
            String::from_utf8_lossy(field.name).into_owned(),
            String::from_utf8_lossy(field.value).into_owned(),
        );
    }

    Ok(Frame::from(fields))
}

#[cfg(test)]
mod tests {
    use super::decode_standard;
    use crate::protocol::{ErrorKind, Mode};
    use crate::protocol::error::DecodeError;

    const FRAME: &[u8] = b"\n\
ADSC\t031762120225\t,\r\n\
VTIC\t02\tJ\r\n\
DATE\tE230101120000\t\t(\r\n\
NGTF\tH PLEINE/CREUSE\t<\r\n\
EAST\t001234567\t+\r\n\
SMAXSN\tE230101083000\t01870\t,\r\n\
PREF\t06\tE\r";

    #[test]
    fn decodes_full_frame() {
        let frame = decode_standard(FRAME).unwrap();
        assert_eq!(frame.len(), 7);
        assert_eq!(frame.get_string_field("NGTF"), Some("H PLEINE/CREUSE"));
        assert_eq!(frame.get_string_field("DATE"), Some(""));
        assert_eq!(frame.get_string_field("SMAXSN"), Some("01870"));
        assert_eq!(frame.get_uint_field("EAST"), Some(1234567));
        assert_eq!(frame.mode(), Mode::Standard);
        assert_eq!(frame.frame_type(), "");
    }

    #[test]
    fn empty_payload_is_empty_frame() {
        let frame = decode_standard(b"").unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn unknown_names_are_accepted() {
        let frame = decode_standard(b"VTIC\t02\tJ\r").unwrap();
        assert_eq!(frame.get_string_field("VTIC"), Some("02"));
    }

    #[test]
    fn two_parts_is_invalid_field() {
        let err = decode_standard(b"\nADSC\t031762120225\r").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidField { parts: 2, .. }));
    }

    #[test]
    fn flipped_checksum_with_timestamp() {
        let err = decode_standard(b"\nSMAXSN\tE230101083000\t01870\t-\r").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
        let msg = err.to_string();
        assert!(msg.contains("read: '-'"));
        assert!(msg.contains("expected: ','"));
    }

    #[test]
    fn timestamp_checksum_differs_from_plain() {
        // Same name and value, but the horodate is part of the checksum.
        let err = decode_standard(b"SMAXSN\t01870\t,\r").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
    }

    #[test]
    fn long_checksum_is_length_error() {
        let err = decode_standard(b"VTIC\t02\tJJ\r").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidChecksumLength {
                actual: 2,
                expected: 1
            }
        ));
    }
}
