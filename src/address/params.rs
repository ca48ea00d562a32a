//! Parameter Codecs
//!
//! A parameter codec converts between address text and a flat map of named
//! string parameters. `KeyedSegmentsParser` stores parameters positionally
//! in delimiter-separated segments.

use crate::config::ascii_delimiter;
use crate::error::Result;
use indexmap::IndexMap;

/// Named address parameters in insertion order
pub type ParamMap = IndexMap<String, String>;

/// Reversible conversion between text and parameters
pub trait ParamCodec: Send + Sync {
    /// Extract parameters from `source`
    fn parse(&self, source: &str) -> Result<ParamMap>;

    /// Encode `params` as text
    fn stringify(&self, params: &ParamMap) -> String;
}

/// Split `source` on an ASCII delimiter, keeping empty tokens.
pub fn split_tokens(source: &str, delimiter: u8) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for position in memchr::memchr_iter(delimiter, source.as_bytes()) {
        tokens.push(&source[start..position]);
        start = position + 1;
    }
    tokens.push(&source[start..]);
    tokens
}

/// Positional parameters: segment `i` holds the value of `keys[i]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedSegmentsParser {
    keys: Vec<String>,
    delimiter: u8,
}

impl KeyedSegmentsParser {
    pub fn new<I, K>(keys: I, delimiter: char) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Ok(KeyedSegmentsParser {
            keys: keys.into_iter().map(Into::into).collect(),
            delimiter: ascii_delimiter(delimiter)?,
        })
    }

    /// Parameter names in segment order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Segment delimiter
    pub fn delimiter(&self) -> char {
        char::from(self.delimiter)
    }
}

impl Default for KeyedSegmentsParser {
    fn default() -> Self {
        KeyedSegmentsParser {
            keys: ["id", "namePath", "childPath", "contentPath"]
                .into_iter()
                .map(String::from)
                .collect(),
            delimiter: b'/',
        }
    }
}

impl ParamCodec for KeyedSegmentsParser {
    /// Empty segments and segments beyond the last key are dropped.
    fn parse(&self, source: &str) -> Result<ParamMap> {
        let mut params = ParamMap::new();
        for (key, segment) in self.keys.iter().zip(split_tokens(source, self.delimiter)) {
            if !segment.is_empty() {
                params.insert(key.clone(), segment.to_string());
            }
        }
        Ok(params)
    }

    /// Keys after the last present one are omitted; missing keys before it
    /// leave empty segments.
    fn stringify(&self, params: &ParamMap) -> String {
        let Some(last) = self.keys.iter().rposition(|key| params.contains_key(key)) else {
            return String::new();
        };
        let segments: Vec<&str> = self.keys[..=last]
            .iter()
            .map(|key| params.get(key).map(String::as_str).unwrap_or(""))
            .collect();
        let mut buffer = [0; 4];
        let delimiter: &str = char::from(self.delimiter).encode_utf8(&mut buffer);
        segments.join(delimiter)
    }
}
