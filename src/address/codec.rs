//! Address Codec
//!
//! Converts between step sequences and address text. An address is held in
//! four named parameters:
//!
//! | Parameter     | Steps                                   |
//! |---------------|-----------------------------------------|
//! | `id`          | `{id}`                                  |
//! | `namePath`    | one `{localName}` per token             |
//! | `childPath`   | `"children", index` per token           |
//! | `contentPath` | `"content", index` per token            |
//!
//! Tokens are joined with the name delimiter (`.` by default). How the
//! parameters become text is up to the `ParamCodec`.

use super::params::{split_tokens, KeyedSegmentsParser, ParamCodec, ParamMap};
use crate::config::{ascii_delimiter, SearchOptions};
use crate::error::{Result, SearchError};
use crate::search::SearchStep;
use crate::tree::Key;

pub const ID_SEGMENT: &str = "id";
pub const NAME_PATH_SEGMENT: &str = "namePath";
pub const CHILD_PATH_SEGMENT: &str = "childPath";
pub const CONTENT_PATH_SEGMENT: &str = "contentPath";

/// Property holding nested pages
pub const CHILDREN_KEY: &str = "children";
/// Property holding page and element content
pub const CONTENT_KEY: &str = "content";

/// Index accumulator selected by the last axis key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Children,
    Content,
}

/// Reversible conversion between steps and address text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCodec<P: ParamCodec = KeyedSegmentsParser> {
    params: P,
    delimiter: u8,
}

impl AddressCodec<KeyedSegmentsParser> {
    /// Slash-separated segments with `.` between tokens
    pub fn new() -> Self {
        AddressCodec {
            params: KeyedSegmentsParser::default(),
            delimiter: b'.',
        }
    }

    /// Slash-style codec using the delimiters in `options`
    pub fn from_options(options: &SearchOptions) -> Result<Self> {
        options.validate()?;
        let params = KeyedSegmentsParser::new(
            [ID_SEGMENT, NAME_PATH_SEGMENT, CHILD_PATH_SEGMENT, CONTENT_PATH_SEGMENT],
            options.segment_delimiter,
        )?;
        Ok(AddressCodec {
            params,
            delimiter: options.name_delimiter_byte()?,
        })
    }
}

impl Default for AddressCodec<KeyedSegmentsParser> {
    fn default() -> Self {
        AddressCodec::new()
    }
}

impl<P: ParamCodec> AddressCodec<P> {
    /// Codec storing parameters with `params`
    pub fn with_params(params: P) -> Self {
        AddressCodec {
            params,
            delimiter: b'.',
        }
    }

    /// Replace the token delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        self.delimiter = ascii_delimiter(delimiter)?;
        Ok(self)
    }

    /// Parameter codec in use
    pub fn params(&self) -> &P {
        &self.params
    }

    /// Decode address text into steps
    pub fn parse(&self, text: &str) -> Result<Vec<SearchStep>> {
        let params = self.params.parse(text)?;
        let mut steps = Vec::new();
        if let Some(id) = params.get(ID_SEGMENT) {
            steps.push(SearchStep::id(id.as_str()));
        }
        if let Some(names) = params.get(NAME_PATH_SEGMENT) {
            steps.extend(self.tokens(names).map(SearchStep::local_name));
        }
        self.push_indices(&mut steps, &params, CHILD_PATH_SEGMENT, CHILDREN_KEY)?;
        self.push_indices(&mut steps, &params, CONTENT_PATH_SEGMENT, CONTENT_KEY)?;
        Ok(steps)
    }

    /// Encode steps as address text.
    ///
    /// Raw keys are recorded under the axis (`children` or `content`) that
    /// last preceded them; keys before any axis and term steps have no text
    /// form and are dropped.
    pub fn stringify(&self, steps: &[SearchStep]) -> String {
        let mut id = None;
        let mut names = Vec::new();
        let mut children = Vec::new();
        let mut content = Vec::new();
        let mut axis = None;
        for step in steps {
            match step {
                SearchStep::Id { id: value } => id = Some(value.as_str()),
                SearchStep::LocalName { local_name } => names.push(local_name.clone()),
                SearchStep::Key(key) if key.is_name(CHILDREN_KEY) => axis = Some(Axis::Children),
                SearchStep::Key(key) if key.is_name(CONTENT_KEY) => axis = Some(Axis::Content),
                SearchStep::Key(key) => match axis {
                    Some(Axis::Children) => children.push(key.to_string()),
                    Some(Axis::Content) => content.push(key.to_string()),
                    None => tracing::trace!(%key, "dropping key outside children/content"),
                },
                SearchStep::Term(_) => tracing::trace!("dropping term step"),
            }
        }

        let mut params = ParamMap::new();
        if let Some(id) = id {
            params.insert(ID_SEGMENT.to_string(), id.to_string());
        }
        let delimiter = char::from(self.delimiter).to_string();
        for (segment, tokens) in [
            (NAME_PATH_SEGMENT, names),
            (CHILD_PATH_SEGMENT, children),
            (CONTENT_PATH_SEGMENT, content),
        ] {
            if !tokens.is_empty() {
                params.insert(segment.to_string(), tokens.join(delimiter.as_str()));
            }
        }
        self.params.stringify(&params)
    }

    fn tokens<'t>(&self, source: &'t str) -> impl Iterator<Item = &'t str> {
        split_tokens(source, self.delimiter)
            .into_iter()
            .filter(|token| !token.is_empty())
    }

    fn push_indices(
        &self,
        steps: &mut Vec<SearchStep>,
        params: &ParamMap,
        segment: &'static str,
        axis: &str,
    ) -> Result<()> {
        let Some(source) = params.get(segment) else {
            return Ok(());
        };
        for token in self.tokens(source) {
            let index = token.parse::<usize>().map_err(|_| SearchError::InvalidIndex {
                segment,
                token: token.to_string(),
            })?;
            steps.push(SearchStep::Key(Key::from(axis)));
            steps.push(SearchStep::Key(Key::Index(index)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::KeyedUrlValuesParser;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn full_address() -> Vec<SearchStep> {
        serde_json::from_value(json!([
            { "id": "main" },
            { "localName": "terms" },
            { "localName": "apple" },
            "children", 0,
            "children", 1,
            "content", 1,
            "content", 0
        ]))
        .unwrap()
    }

    #[test]
    fn test_parse_segments() {
        let codec = AddressCodec::new();
        assert_eq!(codec.parse("main/terms.apple/0.1/1.0").unwrap(), full_address());
    }

    #[test]
    fn test_stringify_segments() {
        let codec = AddressCodec::new();
        assert_eq!(codec.stringify(&full_address()), "main/terms.apple/0.1/1.0");
    }

    #[test]
    fn test_url_params() {
        let codec = AddressCodec::with_params(KeyedUrlValuesParser::for_addresses("http://my.site", ["view"]).unwrap());
        let text = "http://my.site/view?namePath=terms.apple&childPath=0.1&contentPath=1.0#main";
        assert_eq!(codec.parse(text).unwrap(), full_address());
        assert_eq!(codec.stringify(&full_address()), text);
    }

    #[test]
    fn test_empty_middle_segment() {
        let codec = AddressCodec::new();
        let steps = codec.parse("main/examples.sampleOrder//0").unwrap();
        assert_eq!(
            steps,
            vec![
                SearchStep::id("main"),
                SearchStep::local_name("examples"),
                SearchStep::local_name("sampleOrder"),
                SearchStep::from("content"),
                SearchStep::from(0)
            ]
        );
        assert_eq!(codec.stringify(&steps), "main/examples.sampleOrder//0");
    }

    #[test]
    fn test_invalid_index() {
        let codec = AddressCodec::new();
        let err = codec.parse("main//x").unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidIndex { segment: CHILD_PATH_SEGMENT, ref token } if token == "x"
        ));
    }

    #[test]
    fn test_empty_tokens_skipped() {
        let codec = AddressCodec::new();
        assert_eq!(
            codec.parse("/a..b/.2").unwrap(),
            vec![
                SearchStep::local_name("a"),
                SearchStep::local_name("b"),
                SearchStep::from("children"),
                SearchStep::from(2)
            ]
        );
    }

    #[test]
    fn test_stringify_drops_untextable_steps() {
        let codec = AddressCodec::new();
        let steps: Vec<SearchStep> = serde_json::from_value(json!([
            3,
            { "$use": "value", "value": true },
            { "id": "x" },
            "content",
            2
        ]))
        .unwrap();
        assert_eq!(codec.stringify(&steps), "x///2");
    }

    #[test]
    fn test_from_options() {
        let options = SearchOptions {
            name_delimiter: ',',
            segment_delimiter: '|',
            ..SearchOptions::default()
        };
        let codec = AddressCodec::from_options(&options).unwrap();
        assert_eq!(codec.stringify(&full_address()), "main|terms,apple|0,1|1,0");
        assert_eq!(codec.parse("main|terms,apple|0,1|1,0").unwrap(), full_address());

        let clash = SearchOptions {
            name_delimiter: '/',
            ..SearchOptions::default()
        };
        assert!(matches!(AddressCodec::from_options(&clash), Err(SearchError::InvalidDelimiter('/'))));
    }

    #[test]
    fn test_with_delimiter() {
        let codec = AddressCodec::new().with_delimiter('~').unwrap();
        assert_eq!(codec.parse("/a~b").unwrap(), vec![SearchStep::local_name("a"), SearchStep::local_name("b")]);
        assert!(AddressCodec::new().with_delimiter('·').is_err());
    }
}
