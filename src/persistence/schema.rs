use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::row::{Row, Value};

/// The closed set of scalar domains a column can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Character,
    String,
}

impl Domain {
    /// Width in bytes of a field of this domain in the fixed-record tuple
    /// store. Strings have no intrinsic width; the store adds its declared
    /// maximum on top of the two-byte length prefix returned here.
    pub fn width(&self) -> usize {
        match self {
            Domain::Byte => 1,
            Domain::Short => 2,
            Domain::Integer => 4,
            Domain::Long => 8,
            Domain::Float => 4,
            Domain::Double => 8,
            Domain::Character => 4,
            Domain::String => 2,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Domain::Character | Domain::String)
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let domain = match self {
            Domain::Byte => "Byte",
            Domain::Short => "Short",
            Domain::Integer => "Integer",
            Domain::Long => "Long",
            Domain::Float => "Float",
            Domain::Double => "Double",
            Domain::Character => "Character",
            Domain::String => "String",
        };
        write!(f, "{}", domain)
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(name: &str) -> Result<Domain> {
        match name.to_lowercase().as_str() {
            "byte" | "i8" => Ok(Domain::Byte),
            "short" | "i16" => Ok(Domain::Short),
            "integer" | "int" | "i32" => Ok(Domain::Integer),
            "long" | "i64" => Ok(Domain::Long),
            "float" | "f32" => Ok(Domain::Float),
            "double" | "f64" => Ok(Domain::Double),
            "character" | "char" => Ok(Domain::Character),
            "string" | "str" => Ok(Domain::String),
            _ => Err(Error::UnknownDomain(name.to_string())),
        }
    }
}

/// A named column and its domain. The position of an attribute is its index
/// inside the [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub domain: Domain,
}

impl Attribute {
    pub fn new(name: &str, domain: Domain) -> Attribute {
        Attribute {
            name: name.to_string(),
            domain,
        }
    }
}

/// Ordered list of attributes; names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema(Vec<Attribute>);

impl Schema {
    pub fn new(attributes: Vec<Attribute>) -> Result<Schema> {
        //! Create a schema from a vector of attributes, rejecting repeated
        //! names.

        let mut seen = HashSet::new();
        for attribute in attributes.iter() {
            if !seen.insert(attribute.name.as_str()) {
                return Err(Error::DuplicateAttribute(attribute.name.clone()));
            }
        }

        Ok(Schema(attributes))
    }

    pub fn from_parts(names: &[&str], domains: &[Domain]) -> Result<Schema> {
        //! Zip separate name and domain lists into a schema.
        //!
        //! Both lists must have the same length.

        if names.len() != domains.len() {
            return Err(Error::SchemaMismatch(format!(
                "{} attribute names for {} domains",
                names.len(),
                domains.len()
            )));
        }

        Schema::new(
            names
                .iter()
                .zip(domains)
                .map(|(name, domain)| Attribute::new(name, *domain))
                .collect(),
        )
    }

    pub fn parse(attributes: &str, domains: &str) -> Result<Schema> {
        //! Build a schema from its textual form, e.g.
        //! `("title year", "String Integer")`.

        let names: Vec<&str> = attributes.split_whitespace().collect();
        let domains = domains
            .split_whitespace()
            .map(Domain::from_str)
            .collect::<Result<Vec<Domain>>>()?;

        Schema::from_parts(&names, &domains)
    }

    pub fn get(&self, index: usize) -> Option<&Attribute> {
        self.0.get(index)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|attr| attr.name.as_str()).collect()
    }

    pub fn domains(&self) -> Vec<Domain> {
        self.0.iter().map(|attr| attr.domain).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        //! Position of the attribute called `name`, if any.

        self.0.iter().position(|attr| attr.name == name)
    }

    pub fn positions<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>> {
        //! Resolve every name to its column position.
        //!
        //! Fails on the first name that is not part of the schema.

        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.column_index(name)
                    .ok_or_else(|| Error::AttributeNotFound(name.to_string()))
            })
            .collect()
    }

    pub(crate) fn project(&self, positions: &[usize]) -> Schema {
        Schema(positions.iter().map(|&pos| self.0[pos].clone()).collect())
    }

    pub(crate) fn concat(&self, other: &Schema, skip: &[usize]) -> Schema {
        //! Append `other`'s attributes, leaving out the positions in `skip`.
        //!
        //! A right-hand name that already exists gets a `2` appended until it
        //! no longer collides.

        let mut attributes = self.0.clone();
        for (pos, attr) in other.0.iter().enumerate() {
            if skip.contains(&pos) {
                continue;
            }

            let mut name = attr.name.clone();
            while attributes.iter().any(|existing| existing.name == name) {
                name.push('2');
            }
            attributes.push(Attribute {
                name,
                domain: attr.domain,
            });
        }

        Schema(attributes)
    }

    pub fn type_check(&self, row: &Row) -> Result<()> {
        //! Check arity, nullness and the domain of every value.

        if row.len() != self.0.len() {
            return Err(Error::ArityMismatch {
                expected: self.0.len(),
                actual: row.len(),
            });
        }

        for (attr, value) in self.0.iter().zip(row.values()) {
            match value.domain() {
                None => {
                    return Err(Error::NullValue {
                        column: attr.name.clone(),
                    });
                }
                Some(domain) if domain != attr.domain => {
                    return Err(Error::TypeMismatch {
                        column: attr.name.clone(),
                        expected: attr.domain,
                        found: describe(value),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    pub fn compatible(&self, other: &Schema) -> Result<()> {
        //! Same arity and pairwise-equal domains. Names are not compared.

        if self.0.len() != other.0.len() {
            return Err(Error::SchemaMismatch(format!(
                "tables have different arity, {} vs {}",
                self.0.len(),
                other.0.len()
            )));
        }

        for (pos, (left, right)) in self.0.iter().zip(other.0.iter()).enumerate() {
            if left.domain != right.domain {
                return Err(Error::SchemaMismatch(format!(
                    "tables disagree on domain {}, {} vs {}",
                    pos, left.domain, right.domain
                )));
            }
        }

        Ok(())
    }
}

fn describe(value: &Value) -> String {
    match value.domain() {
        Some(domain) => format!("{} {}", domain, value),
        None => "null".to_string(),
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schema: Vec<String> = self
            .0
            .iter()
            .map(|attr| format!("{} ({})", attr.name, attr.domain))
            .collect();
        write!(f, "{}", schema.join(" | "))
    }
}
