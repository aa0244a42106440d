//! The relational algebra operators over [`crate::persistence::Table`].
//!
//! Each operator lives in its own file as an `impl Table` block. All of them:
//! - log their invocation as an `RA>` line,
//! - borrow their inputs and never change them,
//! - return a freshly named table with its own index, or an error.
//!
//! | operator       | file          |
//! |----------------|---------------|
//! | project        | `project.rs`  |
//! | select (x3)    | `select.rs`   |
//! | union, minus   | `set_ops.rs`  |
//! | joins (x4)     | `join.rs`     |

mod condition;
mod join;
mod project;
mod select;
mod set_ops;

pub use condition::Comparison;
