//! Relations need to have the following components
//! - Schema (ordered attribute names with their domains)
//! - Row (one typed tuple, checked against the schema once on insert)
//! - KeyType and Index (point lookups over the primary key)
//! - Table (schema, key, rows and index, owned together)
//! - Database (named tables and their snapshots on disk)
//! - FileList (fixed-size records of a table in a random access file)
//!

//  All modules of this lib
mod database;
mod error;
mod file_list;
mod index;
mod key;
mod row;
mod schema;
mod table;

//  External API
pub use database::Database;
pub use error::{Error, PersistenceError, Result};
pub use file_list::FileList;
pub use index::{IndexFactory, IndexKind, TupleIndex};
pub use key::KeyType;
pub use row::{Row, Value};
pub use schema::{Attribute, Domain, Schema};
pub use table::Table;
