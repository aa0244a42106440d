use log::{info, warn};

use super::condition::ThetaCondition;
use crate::persistence::{Error, KeyType, Result, Row, Table, TupleIndex};

impl Table {
    fn join_positions(
        &self,
        attributes1: &[&str],
        attributes2: &[&str],
        other: &Table,
    ) -> Result<(Vec<usize>, Vec<usize>)> {
        if attributes1.len() != attributes2.len() {
            return Err(Error::InvalidJoin(format!(
                "{} attributes on the left, {} on the right",
                attributes1.len(),
                attributes2.len()
            )));
        }
        if attributes1.is_empty() {
            return Err(Error::InvalidJoin("no join attributes given".to_string()));
        }

        Ok((
            self.schema.positions(attributes1)?,
            other.schema.positions(attributes2)?,
        ))
    }

    fn joined(&self, other: &Table, skip: &[usize], rows: Vec<Row>) -> Result<Table> {
        //! Concatenated schema, this table's key.

        let schema = self.schema.concat(&other.schema, skip);
        self.derive(schema, self.key.clone(), rows)
    }

    pub fn equi_join(
        &self,
        attributes1: &[&str],
        attributes2: &[&str],
        other: &Table,
    ) -> Result<Table> {
        //! Nested loop equi-join: pairs whose `attributes1` values equal the
        //! `attributes2` values of `other`, component by component.
        //!
        //! Right-hand attribute names that clash with a left-hand one get a
        //! `2` appended.

        info!(
            "RA> {}.join ({}, {}, {})",
            self.name,
            attributes1.join(" "),
            attributes2.join(" "),
            other.name
        );

        let (left, right) = self.join_positions(attributes1, attributes2, other)?;

        let mut rows = Vec::new();
        for t in self.rows.iter() {
            for u in other.rows.iter() {
                if left.iter().zip(right.iter()).all(|(&l, &r)| t[l] == u[r]) {
                    rows.push(t.concat(u, &[]));
                }
            }
        }

        self.joined(other, &[], rows)
    }

    pub fn theta_join(&self, condition: &str, other: &Table) -> Result<Table> {
        //! Nested loop join on `attr1 op attr2`, with `attr1` from this table,
        //! `attr2` from `other` and `op` one of `==`, `!=`, `<`, `<=`, `>`,
        //! `>=`.

        info!("RA> {}.join ({}, {})", self.name, condition, other.name);

        let theta = ThetaCondition::parse(condition, &self.schema, &other.schema)?;

        let mut rows = Vec::new();
        for t in self.rows.iter() {
            for u in other.rows.iter() {
                if theta.holds(t, u) {
                    rows.push(t.concat(u, &[]));
                }
            }
        }

        self.joined(other, &[], rows)
    }

    pub fn indexed_join(
        &self,
        attributes1: &[&str],
        attributes2: &[&str],
        other: &Table,
    ) -> Result<Table> {
        //! Equi-join that looks up `other`'s index once per row of this table
        //! instead of scanning every pair.
        //!
        //! Both tables must be indexed. When `attributes2` is not `other`'s
        //! key, a temporary index over `attributes2` is built for this call;
        //! like every index it keeps one row per key value.

        info!(
            "RA> {}.i_join ({}, {}, {})",
            self.name,
            attributes1.join(" "),
            attributes2.join(" "),
            other.name
        );

        let (left, right) = self.join_positions(attributes1, attributes2, other)?;
        self.require_index()?;
        other.require_index()?;

        let secondary: Option<Box<dyn TupleIndex>> = if other.key_positions == right {
            None
        } else {
            let mut index = other.index_kind.build();
            for (position, row) in other.rows.iter().enumerate() {
                index.put(KeyType::from_row(row, &right), position);
            }
            Some(index)
        };

        let mut rows = Vec::new();
        for t in self.rows.iter() {
            let key = KeyType::from_row(t, &left);
            let hit = match &secondary {
                Some(index) => index.get(&key).and_then(|pos| other.rows.get(pos)),
                None => other.get(&key),
            };
            if let Some(u) = hit {
                rows.push(t.concat(u, &[]));
            }
        }

        self.joined(other, &[], rows)
    }

    pub fn natural_join(&self, other: &Table) -> Result<Table> {
        //! Join on every attribute name the two tables share, keeping a
        //! single copy of each shared column.

        info!("RA> {}.join ({})", self.name, other.name);

        let common: Vec<(usize, usize)> = self
            .schema
            .attributes()
            .iter()
            .enumerate()
            .filter_map(|(i, attr)| other.col(&attr.name).map(|j| (i, j)))
            .collect();

        if common.is_empty() {
            warn!(
                "join: no common attributes between {} and {}",
                self.name, other.name
            );
            return Err(Error::NoCommonAttributes {
                left: self.name.clone(),
                right: other.name.clone(),
            });
        }

        let skip: Vec<usize> = common.iter().map(|&(_, j)| j).collect();

        let mut rows = Vec::new();
        for t in self.rows.iter() {
            for u in other.rows.iter() {
                if common.iter().all(|&(i, j)| t[i] == u[j]) {
                    rows.push(t.concat(u, &skip));
                }
            }
        }

        self.joined(other, &skip, rows)
    }
}
