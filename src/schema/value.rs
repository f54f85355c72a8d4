use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fabricated person name. `full` is always `"{first} {last}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
    pub full: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        let first = first.into();
        let last = last.into();
        let full = format!("{} {}", first, last);
        Self { first, last, full }
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// The seven continents a fabricated location can claim.
pub const CONTINENTS: [&str; 7] = [
    "Europe",
    "Asia",
    "Africa",
    "North America",
    "South America",
    "Australia",
    "Antarctica",
];

/// A fabricated location. The parts are drawn independently, so the city
/// need not lie in the country or on the continent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub continent: String,
    pub address: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {})",
            self.address, self.city, self.country, self.continent
        )
    }
}

/// One generated value in a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Name(PersonName),
    Location(Location),
    Text(String),
    Integer(i64),
    /// Always carries two fraction digits.
    Decimal(f64),
    Date(NaiveDate),
}

impl Value {
    /// Numeric form used by arithmetic placeholders.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// True for values that have no inner structure to select from.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Integer(_) | Self::Decimal(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => name.fmt(f),
            Self::Location(location) => location.fmt(f),
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Decimal(d) => write!(f, "{:.2}", d),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// The ordered values generated for one (type, seed) pair, index-aligned
/// with the type's field list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub type_index: usize,
    pub seed: u64,
    pub values: Vec<Value>,
}

impl Record {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}
