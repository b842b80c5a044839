//! Listing data model shared by every stage of the pipeline.
//!
//! Items from the three sources travel as [`AllItem`], a tagged union whose
//! `kind` tag always matches its payload.

mod paged;
mod types;

pub use paged::{Paged, UNKNOWN_TOTAL};
pub use types::*;
