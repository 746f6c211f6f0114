use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use crate::protocol::Mode;
use crate::protocol::layout::TARIFF_OPTION_FIELD;

/// Validated field values of one decoded frame.
///
/// Values are stored exactly as transmitted; typed accessors parse on read.
/// Iteration and serialisation follow field-name order.
///
/// # Examples
/// ```
/// use teleinfo_core::{Mode, decode};
///
/// let frame = decode(b"\r\nISOUSC 15 <\r\n", Mode::Historic)?;
/// assert_eq!(frame.get_string_field("ISOUSC"), Some("15"));
/// assert_eq!(frame.get_uint_field("ISOUSC"), Some(15));
/// # Ok::<(), teleinfo_core::DecodeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame {
    fields: BTreeMap<String, String>,
}

impl Frame {
    pub fn get_string_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Parses the field as a base-10 `u32`.
    ///
    /// Signs, whitespace and out-of-range values read as absent.
    pub fn get_uint_field(&self, name: &str) -> Option<u32> {
        let raw = self.fields.get(name)?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok()
    }

    /// Value of the tariff option field, empty when absent.
    pub fn frame_type(&self) -> &str {
        self.get_string_field(TARIFF_OPTION_FIELD).unwrap_or_default()
    }

    pub fn mode(&self) -> Mode {
        if self.fields.contains_key(TARIFF_OPTION_FIELD) {
            Mode::Historic
        } else {
            Mode::Standard
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.fields.iter()
    }
}

impl From<BTreeMap<String, String>> for Frame {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
