use std::collections::HashSet;

use log::info;

use crate::persistence::{KeyType, Result, Row, Table};

impl Table {
    fn identity(&self, row: &Row) -> KeyType {
        //! What union uses to tell rows apart: the key, or the whole row
        //! when the table has no key attributes.

        if self.key_positions.is_empty() {
            KeyType::from(row.clone())
        } else {
            self.key_of(row)
        }
    }

    pub fn union(&self, other: &Table) -> Result<Table> {
        //! All rows of this table, followed by the rows of `other` whose key
        //! is not taken yet.
        //!
        //! Keys of `other`'s rows are read at this table's key positions, so
        //! two compatible tables are compared column by column. Fails when
        //! the tables are not compatible.

        info!("RA> {}.union ({})", self.name, other.name);
        self.check_compatible(other)?;

        let mut seen: HashSet<KeyType> = self.rows.iter().map(|row| self.identity(row)).collect();
        let mut rows = self.rows.clone();
        for row in other.rows.iter() {
            if seen.insert(self.identity(row)) {
                rows.push(row.clone());
            }
        }

        Ok(self.derive_rows(rows))
    }

    pub fn minus(&self, other: &Table) -> Result<Table> {
        //! The rows of this table that are not equal, on every column, to
        //! some row of `other`. Fails when the tables are not compatible.

        info!("RA> {}.minus ({})", self.name, other.name);
        self.check_compatible(other)?;

        let excluded: HashSet<&Row> = other.rows.iter().collect();
        let rows = self
            .rows
            .iter()
            .filter(|row| !excluded.contains(row))
            .cloned()
            .collect();

        Ok(self.derive_rows(rows))
    }
}
