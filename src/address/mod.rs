//! Address Text Module
//!
//! Text forms of addresses:
//! - `params`: parameter codecs and the slash-segment codec
//! - `url`: query/fragment parameters on a fixed URL
//! - `codec`: steps <-> parameters
//! - `route`: text <-> route, with a parse cache

pub mod codec;
pub mod params;
pub mod route;
pub mod url;

pub use codec::AddressCodec;
pub use params::{split_tokens, KeyedSegmentsParser, ParamCodec, ParamMap};
pub use route::RouteTextCodec;
pub use self::url::KeyedUrlValuesParser;
