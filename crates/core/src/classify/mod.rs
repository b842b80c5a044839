//! Best-effort classification of loosely-typed listing fields.
//!
//! Upstream data is not schema-enforced, so classification is a set of
//! ordered `(pattern, label)` rule tables evaluated top to bottom. The first
//! matching rule wins. Unknown input always lands in a defined fallback.

mod rules;
mod types;

pub use rules::{
    category, classify_category, classify_disposition, disposition, professional_category,
};
pub use types::{Category, Disposition, ProCategory};
