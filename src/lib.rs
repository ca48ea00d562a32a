//! pagetree-search - Identity indexing and address resolution for page trees
//!
//! Content documents are nested arrays of pages and content nodes held as
//! `serde_json::Value`. Nodes are addressed by id, by a local name scoped to
//! the nearest identified or named ancestor, or by raw structural keys.
//!
//! Layers:
//! - `tree`: keys, routes, node shapes and the depth-first walker
//! - `index`: id / local-name index with duplicate reporting
//! - `search`: step compilation, structural search, indexed search and
//!   route abbreviation
//! - `template`: the keyed-value template evaluator behind template steps
//! - `address`: address text codecs (slash segments, URL query + fragment)
//! - `document`: a page document with a cached index
//!
//! ```text
//! PageDocument ──validate──> Validation ──┐
//!                                         ├─> ValidatedSearchResolver ──> Routes
//! "main/terms.apple//0" ──AddressCodec──> [SearchStep]
//! ```

pub mod address;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod search;
pub mod template;
pub mod tree;

pub use address::{AddressCodec, KeyedSegmentsParser, KeyedUrlValuesParser, ParamCodec, RouteTextCodec};
pub use config::SearchOptions;
pub use document::{PageDocument, ValidatedDocument};
pub use error::{Result, SearchError};
pub use index::{AmbiguousSearch, LocalNameValidator, TraversalNode, Validation};
pub use search::{
    SearchAbbreviator, SearchPathResolver, SearchResponse, SearchStep, ValidatedSearchResolver,
};
pub use tree::{Key, KeyPath, Route};
