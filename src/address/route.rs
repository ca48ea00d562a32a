//! Route Text Codec
//!
//! Converts address text straight to a route and back: text is decoded and
//! resolved against a document, and routes are abbreviated and encoded.
//! Decoded addresses are kept in an LRU cache keyed by their text.

use super::codec::AddressCodec;
use super::params::{KeyedSegmentsParser, ParamCodec};
use crate::config::{SearchOptions, DEFAULT_NAME_ATTRIBUTE};
use crate::error::Result;
use crate::search::{SearchAbbreviator, SearchPathResolver, SearchStep};
use crate::tree::Route;
use lru::LruCache;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// Default number of cached address strings
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Text <-> route conversion for id and local-name addresses
pub struct RouteTextCodec<P: ParamCodec = KeyedSegmentsParser> {
    codec: AddressCodec<P>,
    resolver: SearchPathResolver,
    abbreviator: SearchAbbreviator,
    cache: Option<Mutex<LruCache<String, Vec<SearchStep>>>>,
}

impl RouteTextCodec<KeyedSegmentsParser> {
    /// Slash-style codec with the default name attribute
    pub fn new() -> Self {
        RouteTextCodec::with_codec(AddressCodec::new(), DEFAULT_NAME_ATTRIBUTE)
    }

    /// Slash-style codec configured from `options`
    pub fn from_options(options: &SearchOptions) -> Result<Self> {
        let codec = AddressCodec::from_options(options)?;
        Ok(RouteTextCodec::with_codec(codec, &options.name_attribute)
            .with_cache_capacity(options.parse_cache_capacity))
    }
}

impl Default for RouteTextCodec<KeyedSegmentsParser> {
    fn default() -> Self {
        RouteTextCodec::new()
    }
}

impl<P: ParamCodec> RouteTextCodec<P> {
    /// Codec using `codec` for text and `name_attribute` for local names
    pub fn with_codec(codec: AddressCodec<P>, name_attribute: &str) -> Self {
        RouteTextCodec {
            codec,
            resolver: SearchPathResolver::identified(name_attribute),
            abbreviator: SearchAbbreviator::new(name_attribute),
            cache: new_cache(DEFAULT_CACHE_CAPACITY),
        }
    }

    /// Resize the parse cache; zero disables it
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = new_cache(capacity);
        self
    }

    /// Switch the attribute read for local names
    pub fn set_name_attribute(&mut self, name_attribute: &str) {
        self.resolver = SearchPathResolver::identified(name_attribute);
        self.abbreviator = SearchAbbreviator::new(name_attribute);
    }

    /// Attribute read for local names
    pub fn name_attribute(&self) -> &str {
        self.abbreviator.name_attribute()
    }

    /// Address codec in use
    pub fn codec(&self) -> &AddressCodec<P> {
        &self.codec
    }

    /// Decode `text` into steps, consulting the cache first
    pub fn steps_for(&self, text: &str) -> Result<Vec<SearchStep>> {
        if let Some(steps) = self.cached(text) {
            return Ok(steps);
        }
        let steps = self.codec.parse(text)?;
        if let Some(Ok(mut cache)) = self.cache.as_ref().map(Mutex::lock) {
            cache.put(text.to_string(), steps.clone());
        }
        Ok(steps)
    }

    /// First route `text` resolves to under `root`
    pub fn parse<'a>(&self, root: &'a Value, text: &str) -> Result<Option<Route<'a>>> {
        let steps = self.steps_for(text)?;
        let search = self.resolver.resolve(root, &steps, Some(1));
        Ok(search.first().cloned())
    }

    /// Address text for `route`
    pub fn stringify(&self, route: &Route<'_>) -> String {
        self.codec.stringify(&self.abbreviator.search_for(route))
    }

    fn cached(&self, text: &str) -> Option<Vec<SearchStep>> {
        let mut cache = self.cache.as_ref()?.lock().ok()?;
        cache.get(text).cloned()
    }
}

fn new_cache(capacity: usize) -> Option<Mutex<LruCache<String, Vec<SearchStep>>>> {
    NonZeroUsize::new(capacity).map(|capacity| Mutex::new(LruCache::new(capacity)))
}
