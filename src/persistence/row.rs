use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::schema::Domain;

/// A single scalar stored in a [`Row`].
///
/// There is one variant per [`Domain`]. `Null` only exists so that a missing
/// value can be represented and rejected by the type check; no stored row
/// ever contains it.
///
/// Floats compare with [`f64::total_cmp`] and hash by bit pattern, so `Eq`,
/// `Ord` and `Hash` agree and values can be used inside index keys. Finite
/// floats serialize as numbers; infinities and NaNs as the markers `"inf"`,
/// `"-inf"` and `"NaN:0x<bits>"`, so every bit pattern survives a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Null,
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(
        #[serde(
            serialize_with = "float_format::serialize_f32",
            deserialize_with = "float_format::deserialize_f32"
        )]
        f32,
    ),
    Double(
        #[serde(
            serialize_with = "float_format::serialize_f64",
            deserialize_with = "float_format::deserialize_f64"
        )]
        f64,
    ),
    Character(char),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn domain(&self) -> Option<Domain> {
        //! The domain this value is an instance of, `None` for null.

        match self {
            Value::Null => None,
            Value::Byte(_) => Some(Domain::Byte),
            Value::Short(_) => Some(Domain::Short),
            Value::Integer(_) => Some(Domain::Integer),
            Value::Long(_) => Some(Domain::Long),
            Value::Float(_) => Some(Domain::Float),
            Value::Double(_) => Some(Domain::Double),
            Value::Character(_) => Some(Domain::Character),
            Value::String(_) => Some(Domain::String),
        }
    }

    pub fn parse_as(domain: Domain, text: &str) -> Option<Value> {
        //! Read `text` as a value of `domain`, without any cross-domain
        //! widening.
        //!
        //! Returns `None` when the text is not a valid literal of the domain.

        match domain {
            Domain::Byte => text.parse().ok().map(Value::Byte),
            Domain::Short => text.parse().ok().map(Value::Short),
            Domain::Integer => text.parse().ok().map(Value::Integer),
            Domain::Long => text.parse().ok().map(Value::Long),
            Domain::Float => text.parse().ok().map(Value::Float),
            Domain::Double => text.parse().ok().map(Value::Double),
            Domain::Character => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Value::Character(c)),
                    _ => None,
                }
            }
            Domain::String => Some(Value::String(text.to_string())),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Byte(_) => 1,
            Value::Short(_) => 2,
            Value::Integer(_) => 3,
            Value::Long(_) => 4,
            Value::Float(_) => 5,
            Value::Double(_) => 6,
            Value::Character(_) => 7,
            Value::String(_) => 8,
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        // Values of different domains never compare equal; they are ordered
        // by domain so that keys stay totally ordered.
        match (self, other) {
            (Value::Byte(a), Value::Byte(b)) => a.cmp(b),
            (Value::Short(a), Value::Short(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Long(a), Value::Long(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::Character(a), Value::Character(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            Value::Byte(v) => v.hash(state),
            Value::Short(v) => v.hash(state),
            Value::Integer(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::Character(v) => v.hash(state),
            Value::String(v) => v.hash(state),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NIL"),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Character(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Byte(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Short(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Character(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

/// One tuple, positionally aligned with the schema of its table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Row(pub Vec<Value>);

/// Build a [`Row`] from plain Rust literals, e.g.
/// `row!["StarWars", 1977, 124]`.
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::persistence::Row::new(vec![$($crate::persistence::Value::from($value)),*])
    };
}

impl Row {
    pub fn new(values: Vec<Value>) -> Row {
        Row(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub(crate) fn extract(&self, positions: &[usize]) -> Row {
        Row(positions.iter().map(|&pos| self.0[pos].clone()).collect())
    }

    pub(crate) fn concat(&self, other: &Row, skip: &[usize]) -> Row {
        //! Append `other`'s values, except those at the positions in `skip`.

        let mut values = Vec::with_capacity(self.0.len() + other.0.len());
        values.extend(self.0.iter().cloned());
        values.extend(
            other
                .0
                .iter()
                .enumerate()
                .filter(|(pos, _)| !skip.contains(pos))
                .map(|(_, value)| value.clone()),
        );
        Row(values)
    }
}

impl std::ops::Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.0[index]
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row: Vec<String> = self.0.iter().map(|value| value.to_string()).collect();
        write!(f, "{}", row.join(" | "))
    }
}

mod float_format {
    //! Serde glue for float values that JSON numbers cannot carry.

    use std::fmt;

    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserializer, Serializer};

    const INF: &str = "inf";
    const NEG_INF: &str = "-inf";
    const NAN_PREFIX: &str = "NaN:0x";

    enum Repr {
        Number(f64),
        PosInf,
        NegInf,
        NanBits(u64),
    }

    struct ReprVisitor;

    impl<'de> Visitor<'de> for ReprVisitor {
        type Value = Repr;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a number, \"inf\", \"-inf\" or \"NaN:0x<bits>\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Repr, E> {
            Ok(Repr::Number(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Repr, E> {
            Ok(Repr::Number(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Repr, E> {
            Ok(Repr::Number(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Repr, E> {
            match v {
                INF => Ok(Repr::PosInf),
                NEG_INF => Ok(Repr::NegInf),
                _ => v
                    .strip_prefix(NAN_PREFIX)
                    .and_then(|bits| u64::from_str_radix(bits, 16).ok())
                    .map(Repr::NanBits)
                    .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self)),
            }
        }
    }

    fn non_finite(is_nan: bool, positive: bool, bits: u64) -> String {
        if is_nan {
            format!("{}{:x}", NAN_PREFIX, bits)
        } else if positive {
            INF.to_string()
        } else {
            NEG_INF.to_string()
        }
    }

    pub fn serialize_f64<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if v.is_finite() {
            serializer.serialize_f64(*v)
        } else {
            let marker = non_finite(v.is_nan(), v.is_sign_positive(), v.to_bits());
            serializer.serialize_str(&marker)
        }
    }

    pub fn serialize_f32<S: Serializer>(v: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if v.is_finite() {
            serializer.serialize_f32(*v)
        } else {
            let marker = non_finite(v.is_nan(), v.is_sign_positive(), v.to_bits() as u64);
            serializer.serialize_str(&marker)
        }
    }

    pub fn deserialize_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match deserializer.deserialize_any(ReprVisitor)? {
            Repr::Number(v) => v,
            Repr::PosInf => f64::INFINITY,
            Repr::NegInf => f64::NEG_INFINITY,
            Repr::NanBits(bits) => f64::from_bits(bits),
        })
    }

    pub fn deserialize_f32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        Ok(match deserializer.deserialize_any(ReprVisitor)? {
            Repr::Number(v) => v as f32,
            Repr::PosInf => f32::INFINITY,
            Repr::NegInf => f32::NEG_INFINITY,
            Repr::NanBits(bits) => {
                let bits = u32::try_from(bits).map_err(|_| {
                    de::Error::invalid_value(Unexpected::Unsigned(bits), &"32-bit NaN payload")
                })?;
                f32::from_bits(bits)
            }
        })
    }
}
