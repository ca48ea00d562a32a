//! Search Options
//!
//! Runtime settings shared by the validator, the resolvers and the address
//! codecs. Every field has a default, so an empty JSON object is a valid
//! configuration.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Attribute holding the local name of attribute-map nodes.
pub const DEFAULT_NAME_ATTRIBUTE: &str = "data-local-name";

/// Settings for indexing, searching and address text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    /// Attribute consulted for local names on nodes with an attribute map
    pub name_attribute: String,
    /// Separator between tokens inside one address segment
    pub name_delimiter: char,
    /// Separator between address segments in slash-style text
    pub segment_delimiter: char,
    /// Number of decoded address strings kept by route text codecs
    pub parse_cache_capacity: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            name_attribute: DEFAULT_NAME_ATTRIBUTE.to_string(),
            name_delimiter: '.',
            segment_delimiter: '/',
            parse_cache_capacity: 64,
        }
    }
}

impl SearchOptions {
    /// Parse options from JSON and validate them.
    pub fn from_json(text: &str) -> Result<Self> {
        let options: SearchOptions = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that both delimiters are usable by the byte-level splitter.
    pub fn validate(&self) -> Result<()> {
        ascii_delimiter(self.name_delimiter)?;
        ascii_delimiter(self.segment_delimiter)?;
        if self.name_delimiter == self.segment_delimiter {
            return Err(SearchError::InvalidDelimiter(self.name_delimiter));
        }
        Ok(())
    }

    /// Name delimiter as a byte
    pub fn name_delimiter_byte(&self) -> Result<u8> {
        ascii_delimiter(self.name_delimiter)
    }

    /// Segment delimiter as a byte
    pub fn segment_delimiter_byte(&self) -> Result<u8> {
        ascii_delimiter(self.segment_delimiter)
    }
}

/// Convert a delimiter to its single-byte form.
pub(crate) fn ascii_delimiter(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(SearchError::InvalidDelimiter(delimiter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let options = SearchOptions::from_json("{}").unwrap();
        assert_eq!(options, SearchOptions::default());
        assert_eq!(options.name_attribute, "data-local-name");
    }

    #[test]
    fn test_partial_override() {
        let options =
            SearchOptions::from_json(r#"{"nameAttribute": "data-name", "nameDelimiter": "~"}"#)
                .unwrap();
        assert_eq!(options.name_attribute, "data-name");
        assert_eq!(options.name_delimiter_byte().unwrap(), b'~');
        assert_eq!(options.segment_delimiter, '/');
    }

    #[test]
    fn test_rejects_non_ascii_delimiter() {
        let err = SearchOptions::from_json(r#"{"nameDelimiter": "§"}"#).unwrap_err();
        assert!(matches!(err, SearchError::InvalidDelimiter('§')));
    }

    #[test]
    fn test_rejects_shared_delimiter() {
        let err = SearchOptions::from_json(r#"{"nameDelimiter": "/"}"#).unwrap_err();
        assert!(matches!(err, SearchError::InvalidDelimiter('/')));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SearchOptions::from_json("{nameAttribute").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
