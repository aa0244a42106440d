use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info, warn};

use super::error::{Error, Result};
use super::index::{IndexKind, TupleIndex};
use super::key::KeyType;
use super::row::Row;
use super::schema::Schema;

/// Suffix counter for the names of tables produced by the algebra operators.
static TABLE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A relation: schema, primary key, the rows and an index over the key.
///
/// The table exclusively owns its rows and its index. Every algebra operator
/// borrows its inputs and returns a new table with its own freshly built
/// index; [`Table::insert`] is the only method that changes a table.
///
/// The index holds one entry per distinct key. Inserting a row whose key is
/// already present appends the row and repoints the index at it, so the row
/// count and the index size can differ when keys repeat.
#[derive(Debug)]
pub struct Table {
    pub(crate) name: String,
    pub(crate) schema: Schema,
    pub(crate) key: Vec<String>,
    pub(crate) key_positions: Vec<usize>,
    pub(crate) rows: Vec<Row>,
    pub(crate) index: Box<dyn TupleIndex>,
    pub(crate) index_kind: IndexKind,
}

impl Table {
    pub fn new(name: &str, schema: Schema, key: &[&str]) -> Result<Table> {
        //! Create an empty table indexed with the default backend.

        Table::with_index(name, schema, key, IndexKind::default())
    }

    pub fn with_index(name: &str, schema: Schema, key: &[&str], kind: IndexKind) -> Result<Table> {
        //! Create an empty table with the said index backend.
        //!
        //! Every key attribute has to be part of the schema.

        let key: Vec<String> = key.iter().map(|attr| attr.to_string()).collect();
        let key_positions = schema.positions(&key)?;
        let table = Table::build(
            name.to_string(),
            schema,
            key,
            key_positions,
            Vec::new(),
            kind,
        );
        info!(
            "DDL> create table {} ({})",
            table.name,
            table.schema.names().join(", ")
        );
        Ok(table)
    }

    pub fn define(name: &str, attributes: &str, domains: &str, key: &str) -> Result<Table> {
        //! Create an empty table from its textual definition, e.g.
        //! `Table::define("studio", "name address", "String String", "name")`.

        let schema = Schema::parse(attributes, domains)?;
        let key: Vec<&str> = key.split_whitespace().collect();
        Table::new(name, schema, &key)
    }

    pub fn from_rows(
        name: &str,
        schema: Schema,
        key: &[&str],
        rows: Vec<Row>,
        kind: IndexKind,
    ) -> Result<Table> {
        //! Create a table that already holds `rows` and build its index from
        //! scratch.
        //!
        //! All rows are type checked first; nothing is built if one fails.

        for row in rows.iter() {
            schema.type_check(row)?;
        }

        let key: Vec<String> = key.iter().map(|attr| attr.to_string()).collect();
        let key_positions = schema.positions(&key)?;
        Ok(Table::build(
            name.to_string(),
            schema,
            key,
            key_positions,
            rows,
            kind,
        ))
    }

    pub(crate) fn derive(&self, schema: Schema, key: Vec<String>, rows: Vec<Row>) -> Result<Table> {
        //! Wrap the output of an operator into a new table named after this
        //! one, with this table's index kind.

        let key_positions = schema.positions(&key)?;
        Ok(Table::build(
            self.next_name(),
            schema,
            key,
            key_positions,
            rows,
            self.index_kind,
        ))
    }

    pub(crate) fn derive_rows(&self, rows: Vec<Row>) -> Table {
        //! Same as [`Table::derive`] for operators that keep schema and key.

        Table::build(
            self.next_name(),
            self.schema.clone(),
            self.key.clone(),
            self.key_positions.clone(),
            rows,
            self.index_kind,
        )
    }

    fn build(
        name: String,
        schema: Schema,
        key: Vec<String>,
        key_positions: Vec<usize>,
        rows: Vec<Row>,
        kind: IndexKind,
    ) -> Table {
        let mut index = kind.build();
        for (position, row) in rows.iter().enumerate() {
            index.put(KeyType::from_row(row, &key_positions), position);
        }

        Table {
            name,
            schema,
            key,
            key_positions,
            rows,
            index,
            index_kind: kind,
        }
    }

    fn next_name(&self) -> String {
        format!(
            "{}{}",
            self.name,
            TABLE_COUNTER.fetch_add(1, Ordering::Relaxed)
        )
    }

    pub fn insert(&mut self, row: Row) -> Result<()> {
        //! Type check `row`, append it and index it under its key.
        //!
        //! A rejected row leaves both the rows and the index untouched.

        info!("DML> insert into {} values ( {} )", self.name, row);

        if let Err(error) = self.schema.type_check(&row) {
            warn!("insert into {} rejected: {}", self.name, error);
            return Err(error);
        }

        let key = self.key_of(&row);
        self.rows.push(row);
        if self.index.is_enabled() {
            debug!("index {} -> row {}", key, self.rows.len() - 1);
            self.index.put(key, self.rows.len() - 1);
        }

        Ok(())
    }

    pub fn insert_many(&mut self, rows: Vec<Row>) -> Result<usize> {
        //! Insert rows one by one, stopping at the first rejected row.
        //!
        //! Rows inserted before the failure stay in the table.

        let mut n_insertions = 0;
        for row in rows {
            self.insert(row)?;
            n_insertions += 1;
        }

        Ok(n_insertions)
    }

    pub fn compatible(&self, other: &Table) -> bool {
        //! Same arity and the same domain at every position.

        self.check_compatible(other).is_ok()
    }

    pub(crate) fn check_compatible(&self, other: &Table) -> Result<()> {
        self.schema
            .compatible(&other.schema)
            .inspect_err(|error| warn!("compatible ERROR: {}", error))
    }

    pub(crate) fn require_index(&self) -> Result<()> {
        if self.index.is_enabled() {
            Ok(())
        } else {
            Err(Error::IndexUnavailable(self.name.clone()))
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn key(&self) -> &[String] {
        &self.key
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn index_kind(&self) -> IndexKind {
        self.index_kind
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_enabled()
    }

    pub fn col(&self, name: &str) -> Option<usize> {
        //! Column position of `name`, if the attribute exists.

        self.schema.column_index(name)
    }

    pub fn key_of(&self, row: &Row) -> KeyType {
        KeyType::from_row(row, &self.key_positions)
    }

    pub fn get(&self, key: &KeyType) -> Option<&Row> {
        //! Look `key` up in the index. Always `None` without an index.

        self.index.get(key).and_then(|pos| self.rows.get(pos))
    }

    pub fn index_entries(&self) -> Vec<(KeyType, &Row)> {
        //! The index content, in the backend's iteration order.

        self.index
            .entries()
            .into_iter()
            .filter_map(|(key, pos)| self.rows.get(pos).map(|row| (key, row)))
            .collect()
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self.rows.iter().map(|row| format!("{}", row)).collect();

        writeln!(f, "Table {}", self.name)?;
        writeln!(f, "{}", self.schema)?;
        write!(f, "{}", rows.join("\n"))
    }
}
