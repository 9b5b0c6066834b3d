//! `name="value"` attribute extraction for opening tags.

use std::collections::HashMap;

/// Attributes parsed from the text between a tag name and its `>`.
///
/// Only `name="value"` pairs are recognized. Names are runs of ASCII
/// alphanumerics and `_`; a value ends at the first `"` with no escaping.
/// Anything else is dropped. A repeated name keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    pub fn parse(raw: &str) -> Self {
        let mut values = HashMap::new();
        let bytes = raw.as_bytes();
        // Start of the region not yet claimed by a previous pair
        let mut floor = 0;
        let mut search = 0;

        while let Some(found) = raw[search..].find("=\"") {
            let eq = search + found;

            let mut name_start = eq;
            while name_start > floor && is_name_byte(bytes[name_start - 1]) {
                name_start -= 1;
            }
            if name_start == eq {
                search = eq + 1;
                continue;
            }

            let value_start = eq + 2;
            let Some(len) = raw[value_start..].find('"') else {
                break;
            };
            let value_end = value_start + len;

            values.insert(
                raw[name_start..eq].to_string(),
                raw[value_start..value_end].to_string(),
            );
            floor = value_end + 1;
            search = floor;
        }

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Present and non-empty, owned
    pub fn get_non_empty(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
