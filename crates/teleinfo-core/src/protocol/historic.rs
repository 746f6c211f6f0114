use std::collections::BTreeMap;

use super::checksum::historic_checksum;
use super::error::DecodeError;
use super::fields::historic_field;
use super::reader::{FieldReader, FrameReader};
use crate::frame::Frame;
use crate::outcome::Observation;

/// Historic frame together with the projections of its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricFrame {
    pub frame: Frame,
    pub observations: Vec<Observation>,
}

/// Decodes a historic-mode frame (`NAME SP VALUE SP CHECKSUM`, CRLF separated).
///
/// The first invalid field aborts the decode. Every field name must be a
/// known historic field.
pub fn decode_historic(payload: &[u8]) -> Result<HistoricFrame, DecodeError> {
    let mut fields = BTreeMap::new();
    let mut observations = Vec::new();

    for raw in FrameReader::new(payload).historic_fields() {
        let field = FieldReader::new(raw).read_historic()?;
        let expected = historic_checksum(field.name, field.value);
        if field.checksum != expected {
            return Err(DecodeError::ChecksumMismatch {
                name: field.name.to_vec(),
                value: field.value.to_vec(),
                read: field.checksum,
                expected,
            });
        }

        let name = String::from_utf8_lossy(field.name).into_owned();
        let value = String::from_utf8_lossy(field.value).into_owned();
        let descriptor =
            historic_field(field.name).ok_or_else(|| DecodeError::UnknownField {
                name: name.clone(),
                value: value.clone(),
            })?;
        observations.extend(descriptor.project(&value));
        fields.insert(name, value);
    }

    Ok(HistoricFrame {
        frame: Frame::from(fields),
        observations,
    })
}

#[cfg(test)]
mod tests {
    use super::decode_historic;
    use crate::protocol::ErrorKind;
    use crate::protocol::error::DecodeError;

    const FRAME: &[u8] = b"\n\
ADCO 031762120225 6\r\n\
OPTARIF HC.. <\r\n\
ISOUSC 15 <\r\n\
HCHC 000932141 Z\r\n\
HCHP 002663019 .\r\n\
PTEC HP..  \r\n\
IINST 003 Z\r\n\
IMAX1 060 6\r\n\
PAPP 01790 2\r\n\
HHPHC A ,\r\n\
MOTDETAT 000000 B\r";

    #[test]
    fn decodes_full_frame() {
        let decoded = decode_historic(FRAME).unwrap();
        let frame = &decoded.frame;
        assert_eq!(frame.len(), 11);
        assert_eq!(frame.get_string_field("ADCO"), Some("031762120225"));
        assert_eq!(frame.get_string_field("PTEC"), Some("HP.."));
        assert_eq!(frame.get_uint_field("HCHP"), Some(2663019));
        assert_eq!(frame.get_uint_field("PTEC"), None);
        assert_eq!(frame.frame_type(), "HC..");
        // ADCO is recognised but has no projection.
        assert_eq!(decoded.observations.len(), 10);
    }

    #[test]
    fn observations_follow_field_order() {
        let decoded = decode_historic(FRAME).unwrap();
        let metrics: Vec<_> = decoded
            .observations
            .iter()
            .map(|o| o.metric.as_str())
            .collect();
        assert_eq!(metrics[0], "teleinfo_option_tarifaire_choisie");
        assert_eq!(metrics[1], "teleinfo_instensite_souscrite");
        assert_eq!(decoded.observations[1].value, 15.0);
    }

    #[test]
    fn unknown_field_with_valid_checksum() {
        let err = decode_historic(b"FOO 1 U").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownField);
        assert!(err.to_string().contains("FOO"));
    }

    #[test]
    fn checksum_is_checked_before_name() {
        let err = decode_historic(b"FOO 1 V").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
    }

    #[test]
    fn mismatch_reports_read_and_expected() {
        let err = decode_historic(b"PAPP 01790 3").unwrap_err();
        assert_eq!(
            err,
            DecodeError::ChecksumMismatch {
                name: b"PAPP".to_vec(),
                value: b"01790".to_vec(),
                read: b'3',
                expected: b'2',
            }
        );
    }

    #[test]
    fn error_in_later_field_discards_frame() {
        let err = decode_historic(b"ISOUSC 15 <\r\nPAPP 01790").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidField);
    }

    #[test]
    fn empty_payload_is_invalid_field() {
        let err = decode_historic(b"\r\n").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidField { parts: 1, .. }));
    }

    #[test]
    fn non_numeric_projection_does_not_fail() {
        let decoded = decode_historic(b"PAPP abc W").unwrap();
        assert_eq!(decoded.frame.get_string_field("PAPP"), Some("abc"));
        assert_eq!(decoded.observations[0].value, 0.0);
    }

    #[test]
    fn duplicate_field_keeps_last_value() {
        let decoded = decode_historic(b"PAPP 01790 2\r\nPAPP abc W").unwrap();
        assert_eq!(decoded.frame.len(), 1);
        assert_eq!(decoded.frame.get_string_field("PAPP"), Some("abc"));
    }
}
