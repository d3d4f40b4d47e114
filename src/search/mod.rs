//! Bilingual keyword search
//!
//! [`normalize`] turns English and Ukrainian text into the same Latin token
//! space, [`index`] maps tokens and their prefixes to catalog positions, and
//! [`query`] scores clips by the number of query words they match.

pub mod index;
pub mod normalize;
pub mod query;

pub use index::SearchIndex;
pub use normalize::{normalize, tokenize};
pub use query::{EmptyQuery, QueryHandler, QueryOptions, SearchHit};
