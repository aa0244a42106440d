use log::info;

use crate::persistence::{Error, Result, Row, Table};

impl Table {
    pub fn project(&self, attributes: &[&str]) -> Result<Table> {
        //! Keep only the named columns, in the given order.
        //!
        //! The key survives when every key attribute is projected; otherwise
        //! the projected attributes become the key. Duplicate rows are kept,
        //! so the result has exactly as many rows as this table.

        info!("RA> {}.project ({})", self.name, attributes.join(" "));

        let positions = self.schema.positions(attributes)?;
        for (i, attr) in attributes.iter().enumerate() {
            if attributes[..i].contains(attr) {
                return Err(Error::DuplicateAttribute(attr.to_string()));
            }
        }

        let key_retained = self
            .key
            .iter()
            .all(|key_attr| attributes.contains(&key_attr.as_str()));
        let key = if key_retained {
            self.key.clone()
        } else {
            attributes.iter().map(|attr| attr.to_string()).collect()
        };

        let rows: Vec<Row> = self.rows.iter().map(|row| row.extract(&positions)).collect();

        self.derive(self.schema.project(&positions), key, rows)
    }
}
