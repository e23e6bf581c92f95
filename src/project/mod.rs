//! DBML project file parsing

mod dbmlproj_parser;

pub use dbmlproj_parser::{parse_dbmlproj, DbmlProject, TableGroup, TableNote, DEFAULT_DATABASE_TYPE};
