//! URL Parameter Codec
//!
//! Stores address parameters in the query string and fragment of a URL
//! under a fixed origin and path, e.g.
//! `http://my.site/view?namePath=terms.apple&childPath=0.1#main`.

use super::params::{ParamCodec, ParamMap};
use crate::error::{Result, SearchError};
use ::url::Url;

/// Parameters carried by a URL's query and fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedUrlValuesParser {
    origin: Url,
    path: Vec<String>,
    /// Parameter stored in the fragment
    hash: Option<String>,
    /// `(query name, parameter)` pairs in output order
    search: Vec<(String, String)>,
}

impl KeyedUrlValuesParser {
    /// Codec for URLs under `origin` with the given path segments.
    pub fn new<I, S>(origin: &str, path: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(KeyedUrlValuesParser {
            origin: Url::parse(origin)?,
            path: path.into_iter().map(Into::into).collect(),
            hash: None,
            search: Vec::new(),
        })
    }

    /// Keep `key` in the fragment
    pub fn with_hash(mut self, key: impl Into<String>) -> Self {
        self.hash = Some(key.into());
        self
    }

    /// Keep `key` in the query under `name`
    pub fn with_search(mut self, name: impl Into<String>, key: impl Into<String>) -> Self {
        self.search.push((name.into(), key.into()));
        self
    }

    /// Codec for the standard address keys: `id` in the fragment, the
    /// three path segments in the query.
    pub fn for_addresses<I, S>(origin: &str, path: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(KeyedUrlValuesParser::new(origin, path)?
            .with_hash("id")
            .with_search("namePath", "namePath")
            .with_search("childPath", "childPath")
            .with_search("contentPath", "contentPath"))
    }

    fn check_location(&self, url: &Url) -> Result<()> {
        let expected = self.origin.origin().ascii_serialization();
        let found = url.origin().ascii_serialization();
        if expected != found {
            return Err(SearchError::UnexpectedOrigin { expected, found });
        }
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
            .unwrap_or_default();
        if segments != self.path {
            return Err(SearchError::UnexpectedPath {
                expected: format!("/{}", self.path.join("/")),
                found: url.path().to_string(),
            });
        }
        Ok(())
    }
}

impl ParamCodec for KeyedUrlValuesParser {
    fn parse(&self, source: &str) -> Result<ParamMap> {
        let url = Url::parse(source)?;
        self.check_location(&url)?;

        let mut params = ParamMap::new();
        for (name, value) in url.query_pairs() {
            let key = self
                .search
                .iter()
                .find(|(query_name, _)| *query_name == name)
                .map(|(_, key)| key);
            if let Some(key) = key {
                if !value.is_empty() {
                    params.insert(key.clone(), value.into_owned());
                }
            }
        }
        if let (Some(key), Some(fragment)) = (&self.hash, url.fragment()) {
            let value = urlencoding::decode(fragment)
                .map(|text| text.into_owned())
                .unwrap_or_else(|_| fragment.to_string());
            if !value.is_empty() {
                params.insert(key.clone(), value);
            }
        }
        Ok(params)
    }

    fn stringify(&self, params: &ParamMap) -> String {
        let mut url = self.origin.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().extend(&self.path);
        }

        let pairs: Vec<(&str, &str)> = self
            .search
            .iter()
            .filter_map(|(name, key)| params.get(key).map(|value| (name.as_str(), value.as_str())))
            .collect();
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }

        let fragment = self.hash.as_ref().and_then(|key| params.get(key));
        url.set_fragment(fragment.map(String::as_str));
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codec() -> KeyedUrlValuesParser {
        KeyedUrlValuesParser::for_addresses("http://my.site", ["view"]).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> ParamMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_parse_query_and_fragment() {
        let parsed = codec()
            .parse("http://my.site/view?namePath=terms.apple&childPath=0.1&contentPath=1.0#main")
            .unwrap();
        assert_eq!(
            parsed,
            params(&[
                ("namePath", "terms.apple"),
                ("childPath", "0.1"),
                ("contentPath", "1.0"),
                ("id", "main")
            ])
        );
    }

    #[test]
    fn test_stringify_orders_query() {
        let text = codec().stringify(&params(&[
            ("id", "main"),
            ("contentPath", "1.0"),
            ("namePath", "terms.apple"),
            ("childPath", "0.1"),
        ]));
        assert_eq!(
            text,
            "http://my.site/view?namePath=terms.apple&childPath=0.1&contentPath=1.0#main"
        );
    }

    #[test]
    fn test_stringify_without_query() {
        assert_eq!(codec().stringify(&params(&[("id", "intro")])), "http://my.site/view#intro");
        assert_eq!(codec().stringify(&ParamMap::new()), "http://my.site/view");
    }

    #[test]
    fn test_rejects_foreign_urls() {
        assert!(matches!(
            codec().parse("http://other.site/view#main"),
            Err(SearchError::UnexpectedOrigin { .. })
        ));
        assert!(matches!(
            codec().parse("http://my.site/edit#main"),
            Err(SearchError::UnexpectedPath { .. })
        ));
        assert!(matches!(codec().parse("main/terms"), Err(SearchError::Url(_))));
    }

    #[test]
    fn test_unknown_query_names_ignored() {
        let parsed = codec().parse("http://my.site/view?utm=x&namePath=a#").unwrap();
        assert_eq!(parsed, params(&[("namePath", "a")]));
    }

    #[test]
    fn test_encoded_fragment_round_trip() {
        let text = codec().stringify(&params(&[("id", "two words")]));
        assert_eq!(codec().parse(&text).unwrap(), params(&[("id", "two words")]));
    }
}
