use super::error::DecodeError;
use super::layout;

/// One field split into its segments, not yet checksum-validated.
///
/// `timestamp` is empty for historic fields and for standard fields sent
/// without a horodate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField<'a> {
    pub name: &'a [u8],
    pub timestamp: &'a [u8],
    pub value: &'a [u8],
    pub checksum: u8,
}

pub struct FrameReader<'a> {
    payload: &'a [u8],
}

impl<'a> FrameReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    /// Candidate historic fields: the frame is trimmed of CR/LF, then split on CRLF.
    pub fn historic_fields(&self) -> Vec<&'a [u8]> {
        let trimmed = trim_bytes(self.payload, layout::HISTORIC_TRIM);
        split_on(trimmed, layout::HISTORIC_FIELD_SEPARATOR)
    }

    /// Candidate standard fields: the frame is split on CR without trimming,
    /// and the residual LF opening each field is dropped.
    pub fn standard_fields(&self) -> Vec<&'a [u8]> {
        self.payload
            .split(|b| *b == layout::STANDARD_FIELD_SEPARATOR)
            .map(|field| {
                field
                    .strip_prefix(&[layout::STANDARD_FIELD_PREFIX])
                    .unwrap_or(field)
            })
            .collect()
    }
}

pub struct FieldReader<'a> {
    field: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub fn new(field: &'a [u8]) -> Self {
        Self { field }
    }

    pub fn read_historic(&self) -> Result<RawField<'a>, DecodeError> {
        let parts: Vec<&'a [u8]> = self
            .field
            .splitn(layout::HISTORIC_FIELD_PARTS, |b| {
                *b == layout::HISTORIC_ELEMENT_SEPARATOR
            })
            .collect();
        match parts.as_slice() {
            [name, value, trail] => Ok(RawField {
                name: *name,
                timestamp: &[],
                value: *value,
                checksum: read_checksum(trail)?,
            }),
            _ => Err(self.invalid_field(parts.len())),
        }
    }

    /// Returns `Ok(None)` for single-element fields, which carry no data.
    pub fn read_standard(&self) -> Result<Option<RawField<'a>>, DecodeError> {
        let parts: Vec<&'a [u8]> = self
            .field
            .split(|b| *b == layout::STANDARD_ELEMENT_SEPARATOR)
            .collect();
        let (name, timestamp, value, trail) = match parts.as_slice() {
            [_] => return Ok(None),
            [name, value, trail] => (*name, &[][..], *value, *trail),
            [name, timestamp, value, trail] => (*name, *timestamp, *value, *trail),
            _ => return Err(self.invalid_field(parts.len())),
        };
        Ok(Some(RawField {
            name,
            timestamp,
            value,
            checksum: read_checksum(trail)?,
        }))
    }

    fn invalid_field(&self, parts: usize) -> DecodeError {
        DecodeError::InvalidField {
            data: self.field.to_vec(),
            parts,
        }
    }
}

fn read_checksum(trail: &[u8]) -> Result<u8, DecodeError> {
    match trail {
        [checksum] => Ok(*checksum),
        _ => Err(DecodeError::InvalidChecksumLength {
            actual: trail.len(),
            expected: layout::CHECKSUM_LEN,
        }),
    }
}

fn trim_bytes<'a>(bytes: &'a [u8], set: &[u8]) -> &'a [u8] {
    let start = bytes
        .iter()
        .position(|b| !set.contains(b))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !set.contains(b))
        .map_or(start, |last| last + 1);
    &bytes[start..end]
}

/// Splits on a multi-byte separator; always yields at least one part.
fn split_on<'a>(bytes: &'a [u8], separator: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut cursor = 0;
    while cursor + separator.len() <= bytes.len() {
        if bytes[cursor..].starts_with(separator) {
            parts.push(&bytes[start..cursor]);
            cursor += separator.len();
            start = cursor;
        } else {
            cursor += 1;
        }
    }
    parts.push(&bytes[start..]);
    parts
}
