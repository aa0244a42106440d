//! A small relational algebra engine.
//!
//! Tables are typed relations with a primary key and a pluggable point-lookup
//! index. The algebra operators (project, select, union, minus and the joins)
//! never touch their inputs; each returns a new table.
//!
//! - [`persistence`]: values, schemas, tables, indexes and the on-disk stores.
//! - [`algebra`]: the operators, implemented on [`persistence::Table`].
//! - [`config`]: settings read from the environment.
//! - [`cli`]: the `relalg` command line front end.

pub mod algebra;
pub mod cli;
pub mod config;
pub mod persistence;
