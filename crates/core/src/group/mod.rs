//! Grouping of a fused listing page into titled sections.

mod sectionizer;
mod types;

pub use sectionizer::{group_items, group_key};
pub use types::{GroupKey, GroupMode, Section};
