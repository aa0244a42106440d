use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::str::FromStr;

use indexmap::IndexMap;

use super::error::{Error, Result};
use super::key::KeyType;

/// A point-lookup index from a [`KeyType`] to the position of a row inside
/// its [`super::Table`].
///
/// The index is not a multiset: putting a key that is already present
/// replaces the stored position. Every backend must behave the same way, only
/// lookup cost and iteration order may differ.
pub trait TupleIndex: Debug {
    fn put(&mut self, key: KeyType, position: usize);

    fn get(&self, key: &KeyType) -> Option<usize>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, in the backend's iteration order.
    fn entries(&self) -> Vec<(KeyType, usize)>;

    /// `false` for the no-op backend, which disables indexed operators.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Builds a fresh, empty index for an external backend.
pub type IndexFactory = fn() -> Box<dyn TupleIndex>;

/// The index backend a table is constructed with.
///
/// Tables derived by the algebra operators inherit the kind of their source
/// table.
#[derive(Clone, Copy, Default)]
pub enum IndexKind {
    NoIndex,
    #[default]
    TreeMap,
    HashMap,
    External(IndexFactory),
}

impl IndexKind {
    pub fn build(&self) -> Box<dyn TupleIndex> {
        match self {
            IndexKind::NoIndex => Box::new(NoIndex),
            IndexKind::TreeMap => Box::new(TreeIndex::default()),
            IndexKind::HashMap => Box::new(HashIndex::default()),
            IndexKind::External(factory) => factory(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IndexKind::NoIndex => "none",
            IndexKind::TreeMap => "tree",
            IndexKind::HashMap => "hash",
            IndexKind::External(_) => "external",
        }
    }
}

impl Debug for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IndexKind({})", self.name())
    }
}

impl Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for IndexKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<IndexKind> {
        //! Parse one of the built-in kinds. External backends need a factory
        //! and can only be selected from code.

        match name.trim().to_lowercase().as_str() {
            "none" | "no_map" => Ok(IndexKind::NoIndex),
            "tree" | "tree_map" => Ok(IndexKind::TreeMap),
            "hash" | "hash_map" => Ok(IndexKind::HashMap),
            _ => Err(Error::UnknownIndexKind(name.to_string())),
        }
    }
}

/// Stores nothing. Lookups always miss.
#[derive(Debug)]
pub(crate) struct NoIndex;

impl TupleIndex for NoIndex {
    fn put(&mut self, _key: KeyType, _position: usize) {}

    fn get(&self, _key: &KeyType) -> Option<usize> {
        None
    }

    fn len(&self) -> usize {
        0
    }

    fn entries(&self) -> Vec<(KeyType, usize)> {
        Vec::new()
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Ordered backend; iterates in key order.
#[derive(Debug, Default)]
pub(crate) struct TreeIndex {
    key_index_map: BTreeMap<KeyType, usize>,
}

impl TupleIndex for TreeIndex {
    fn put(&mut self, key: KeyType, position: usize) {
        self.key_index_map.insert(key, position);
    }

    fn get(&self, key: &KeyType) -> Option<usize> {
        self.key_index_map.get(key).copied()
    }

    fn len(&self) -> usize {
        self.key_index_map.len()
    }

    fn entries(&self) -> Vec<(KeyType, usize)> {
        self.key_index_map
            .iter()
            .map(|(key, pos)| (key.clone(), *pos))
            .collect()
    }
}

/// Hashed backend; iterates in first-insertion order of the keys.
#[derive(Debug, Default)]
pub(crate) struct HashIndex {
    key_index_map: IndexMap<KeyType, usize>,
}

impl TupleIndex for HashIndex {
    fn put(&mut self, key: KeyType, position: usize) {
        self.key_index_map.insert(key, position);
    }

    fn get(&self, key: &KeyType) -> Option<usize> {
        self.key_index_map.get(key).copied()
    }

    fn len(&self) -> usize {
        self.key_index_map.len()
    }

    fn entries(&self) -> Vec<(KeyType, usize)> {
        self.key_index_map
            .iter()
            .map(|(key, pos)| (key.clone(), *pos))
            .collect()
    }
}
