//! Query normalization: raw UI filter state into the canonical [`AllQuery`].
//!
//! [`AllQuery`]: crate::listing::AllQuery

mod normalizer;
mod types;

pub use normalizer::Normalizer;
pub use types::RawQuery;
