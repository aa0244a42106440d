use log::{info, warn};

use super::condition::compile_selection;
use crate::persistence::{KeyType, Result, Row, Table};

impl Table {
    pub fn select<F>(&self, predicate: F) -> Table
    where
        F: Fn(&Row) -> bool,
    {
        //! Keep the rows for which `predicate` holds, in their current order.

        info!("RA> {}.select (<predicate>)", self.name);

        let rows = self.rows.iter().filter(|&row| predicate(row)).cloned().collect();
        self.derive_rows(rows)
    }

    pub fn select_where(&self, condition: &str) -> Result<Table> {
        //! Keep the rows matching a condition such as `year == 1977` or
        //! `genre != 'drama' AND length >= 100`.
        //!
        //! Supported operators are `==`, `!=`, `<`, `<=`, `>` and `>=`; the
        //! literal is read in the domain of its attribute.

        info!("RA> {}.select ({})", self.name, condition);

        let filter = compile_selection(condition, &self.schema)?;
        let rows = self.rows.iter().filter(|&row| filter(row)).cloned().collect();
        Ok(self.derive_rows(rows))
    }

    pub fn select_key(&self, key: &KeyType) -> Table {
        //! Point lookup through the index.
        //!
        //! The result holds the indexed row for `key`, or nothing when there
        //! is no match or the table has no index.

        info!("RA> {}.select ({})", self.name, key);

        if !self.index.is_enabled() {
            warn!("{} has no index, key select returns no rows", self.name);
        }

        let rows = self.get(key).into_iter().cloned().collect();
        self.derive_rows(rows)
    }
}
