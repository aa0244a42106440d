use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::row::{Row, Value};

/// The projection of a row onto the key attributes of its table.
///
/// Equality is component-wise and ordering is lexicographic, which makes a
/// key usable by both the ordered and the hashed index backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyType(Vec<Value>);

impl KeyType {
    pub fn new(values: Vec<Value>) -> KeyType {
        KeyType(values)
    }

    pub fn from_row(row: &Row, positions: &[usize]) -> KeyType {
        //! Extract the values at `positions`, in that order.

        KeyType(positions.iter().map(|&pos| row[pos].clone()).collect())
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for KeyType {
    fn from(values: Vec<Value>) -> Self {
        KeyType(values)
    }
}

impl From<Row> for KeyType {
    fn from(row: Row) -> Self {
        KeyType(row.0)
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key: Vec<String> = self.0.iter().map(|value| value.to_string()).collect();
        write!(f, "({})", key.join(", "))
    }
}
