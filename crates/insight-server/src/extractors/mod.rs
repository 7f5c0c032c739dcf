//! Request extractors.

pub mod query;

pub use query::{StatusOption, StatusQuery, param_value};
