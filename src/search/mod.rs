//! Search Module - Address resolution over content trees
//!
//! - `step`: the step types an address is made of
//! - `compiler`: rules turning steps into traversal predicates
//! - `resolver`: structural search driven by a rule chain
//! - `abbreviate`: shortest indexed address for a route
//! - `indexed`: index-first resolution with structural fallback
//! - `parallel`: batch resolution

pub mod abbreviate;
pub mod compiler;
pub mod indexed;
pub mod parallel;
pub mod resolver;
pub mod step;

pub use abbreviate::SearchAbbreviator;
pub use compiler::{AttributeValueSearch, SearchTerm, SearchTermCompiler, TemplatedSearch};
pub use indexed::{NamedNodeSearch, ValidatedSearchResolver};
pub use parallel::resolve_all;
pub use resolver::{SearchPathResolver, SearchResponse};
pub use step::{path_shorthand, SearchStep, Selector};
