//! DBML generation from the schema model

mod generator;
mod type_mapping;

pub use generator::{generate_dbml, generate_full_dbml, generate_table_groups, DbmlSettings};
pub use type_mapping::{convert_data_type, format_default_value};
