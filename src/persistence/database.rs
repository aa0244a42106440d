use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::error::{PersistenceError, Result};
use super::file_list::FileList;
use super::index::IndexKind;
use super::row::Row;
use super::schema::Schema;
use super::table::Table;

/// File extension of table snapshots.
const EXT: &str = "dbf";

/// What a snapshot file holds. The index is not stored; it is rebuilt from
/// the rows on load.
#[derive(Serialize, Deserialize)]
struct TableSnapshot {
    name: String,
    saved_at: String,
    schema: Schema,
    key: Vec<String>,
    rows: Vec<Row>,
}

/// The collective of multiple [`Table`] objects, bound to a storage
/// directory.
///
/// A [`Database`] keeps tables by name, in registration order, and is the
/// only place that reads or writes snapshots. Saving is always explicit;
/// nothing is written behind the caller's back.
///
/// Tables loaded from disk are indexed with the database's [`IndexKind`],
/// whatever backend they were built with before saving.
#[derive(Debug)]
pub struct Database {
    name: String,
    store: PathBuf,
    index_kind: IndexKind,
    tables: IndexMap<String, Table>,
}

impl Database {
    pub fn new(name: &str, store: impl Into<PathBuf>) -> Database {
        //! Create a new database with no tables, storing snapshots under
        //! `store`.

        Database {
            name: name.to_string(),
            store: store.into(),
            index_kind: IndexKind::default(),
            tables: IndexMap::new(),
        }
    }

    pub fn with_index_kind(mut self, kind: IndexKind) -> Database {
        self.index_kind = kind;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &Path {
        &self.store
    }

    pub fn index_kind(&self) -> IndexKind {
        self.index_kind
    }

    pub fn register(&mut self, table: Table) -> Option<Table> {
        //! Add `table` under its own name.
        //!
        //! Returns the table previously registered under that name, if any.

        self.tables.insert(table.name().to_string(), table)
    }

    pub fn create_table(
        &mut self,
        name: &str,
        attributes: &str,
        domains: &str,
        key: &str,
    ) -> Result<&mut Table> {
        //! Define an empty table with the database's index kind, register it
        //! and hand it back for inserts.

        let schema = Schema::parse(attributes, domains)?;
        let key: Vec<&str> = key.split_whitespace().collect();
        let table = Table::with_index(name, schema, &key, self.index_kind)?;

        let (index, _) = self.tables.insert_full(name.to_string(), table);
        Ok(&mut self.tables[index])
    }

    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn drop_table(&mut self, name: &str) -> Option<Table> {
        //! Forget a table. Its snapshot on disk, if any, is left alone.

        self.tables.shift_remove(name)
    }

    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.store.join(format!("{}.{}", name, EXT))
    }

    pub fn save(&self, table: &Table) -> Result<PathBuf> {
        //! Write `table`'s schema, key and rows to `<store>/<name>.dbf`.
        //!
        //! The table itself is only read, so a failed save leaves it as it
        //! was.

        fs::create_dir_all(&self.store)?;
        let path = self.snapshot_path(table.name());

        let snapshot = TableSnapshot {
            name: table.name().to_string(),
            saved_at: Utc::now().to_rfc3339(),
            schema: table.schema().clone(),
            key: table.key().to_vec(),
            rows: table.rows().to_vec(),
        };

        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, &snapshot)?;
        writer.flush()?;

        info!(
            "saved table {} ({} rows) to {}",
            table.name(),
            table.len(),
            path.display()
        );
        Ok(path)
    }

    pub fn save_all(&self) -> Result<usize> {
        //! Save every registered table, stopping at the first failure.
        //!
        //! Returns the number of tables written.

        let mut n_saved = 0;
        for table in self.tables.values() {
            self.save(table)?;
            n_saved += 1;
        }

        Ok(n_saved)
    }

    pub fn load(&self, name: &str) -> Result<Table> {
        //! Read the snapshot of table `name` and rebuild its index.
        //!
        //! Fails with [`PersistenceError::NotFound`] when no snapshot exists.

        let path = self.snapshot_path(name);
        if !path.is_file() {
            warn!("load: no snapshot for {} at {}", name, path.display());
            return Err(PersistenceError::NotFound {
                name: name.to_string(),
                path,
            }
            .into());
        }

        let reader = BufReader::new(File::open(&path)?);
        let snapshot: TableSnapshot = serde_json::from_reader(reader)?;

        let key: Vec<&str> = snapshot.key.iter().map(|attr| attr.as_str()).collect();
        let table = Table::from_rows(
            &snapshot.name,
            snapshot.schema,
            &key,
            snapshot.rows,
            self.index_kind,
        )?;

        info!(
            "loaded table {} ({} rows) saved at {}",
            table.name(),
            table.len(),
            snapshot.saved_at
        );
        Ok(table)
    }

    pub fn open(&mut self, name: &str) -> Result<&Table> {
        //! Load the snapshot `<store>/<name>.dbf` and register the table under
        //! the name recorded inside it, replacing any table of that name.

        let table = self.load(name)?;
        let (index, _) = self.tables.insert_full(table.name().to_string(), table);
        Ok(&self.tables[index])
    }

    pub fn spill(&self, table: &Table, string_width: u16) -> Result<FileList> {
        //! Copy every row of `table` into a fixed-record file under the
        //! store directory.

        fs::create_dir_all(&self.store)?;
        let mut file_list = FileList::create(&self.store, table.name(), table.schema(), string_width)?;
        for row in table.rows() {
            file_list.append(row)?;
        }

        info!(
            "spilled {} rows of {} to {}",
            file_list.len(),
            table.name(),
            file_list.path().display()
        );
        Ok(file_list)
    }
}
