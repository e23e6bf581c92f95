//! Schema model

mod backfill;
mod elements;
mod schema_model;

pub use backfill::backfill_keys;
pub use elements::*;
pub use schema_model::SchemaModel;
