//! Machine-readable exports of the schema model

mod json;

pub use json::to_json;
