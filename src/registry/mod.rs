//! Breeding records and the repository they are read from
//!
//! The pedigree core never owns records. It reads them one at a time through
//! the [`Repository`] trait, which the hosting application implements over its
//! own store. [`MemoryRepository`] is a ready-made implementation backed by a
//! TOML registry file.

pub mod lint;
mod memory;

pub use memory::{MemoryRepository, RegistryError};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Canonical identifier of an individual
///
/// Every id comparison inside the crate happens on this type. Textual ids are
/// converted once, at the repository boundary, through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualId(pub u64);

impl IndividualId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for IndividualId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A textual id that is not an unsigned decimal integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid individual id '{input}'")]
pub struct IdParseError {
    pub input: String,
}

impl FromStr for IndividualId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || IdParseError {
            input: s.to_string(),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        digits.parse::<u64>().map(IndividualId).map_err(|_| invalid())
    }
}

/// Registry files may write ids as integers or as numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for IndividualId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(IndividualId(n)),
            RawId::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Sex of an individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// The two parent roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentRole {
    Sire,
    Dam,
}

impl ParentRole {
    /// The sex a parent in this role is expected to have
    pub fn expected_sex(self) -> Sex {
        match self {
            ParentRole::Sire => Sex::Male,
            ParentRole::Dam => Sex::Female,
        }
    }
}

impl fmt::Display for ParentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRole::Sire => write!(f, "sire"),
            ParentRole::Dam => write!(f, "dam"),
        }
    }
}

/// A breeding record as read from the repository
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Individual {
    pub id: IndividualId,
    pub name: String,
    /// Ring number or other identifier
    #[serde(default)]
    pub ring: Option<String>,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub color: Option<String>,
    /// Strain or breed
    #[serde(default)]
    pub strain: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub sire: Option<IndividualId>,
    #[serde(default)]
    pub dam: Option<IndividualId>,
}

impl Individual {
    /// Create a record with only an id and a name
    pub fn new(id: impl Into<IndividualId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ring: None,
            sex: None,
            color: None,
            strain: None,
            year: None,
            notes: None,
            sire: None,
            dam: None,
        }
    }

    pub fn with_ring(mut self, ring: impl Into<String>) -> Self {
        self.ring = Some(ring.into());
        self
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_strain(mut self, strain: impl Into<String>) -> Self {
        self.strain = Some(strain.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_sire(mut self, sire: impl Into<IndividualId>) -> Self {
        self.sire = Some(sire.into());
        self
    }

    pub fn with_dam(mut self, dam: impl Into<IndividualId>) -> Self {
        self.dam = Some(dam.into());
        self
    }

    /// Reference to the parent in the given role
    pub fn parent(&self, role: ParentRole) -> Option<IndividualId> {
        match role {
            ParentRole::Sire => self.sire,
            ParentRole::Dam => self.dam,
        }
    }

    /// Name to show for this individual
    ///
    /// Placeholder names of the form `bird 12` fall back to the ring number.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if !name.is_empty() && !is_placeholder_name(name) {
            return name;
        }
        match self.ring.as_deref().map(str::trim) {
            Some(ring) if !ring.is_empty() => ring,
            _ => "Unnamed",
        }
    }

    /// Color and strain joined with " / "
    pub fn details(&self) -> Option<String> {
        let parts: Vec<&str> = [self.color.as_deref(), self.strain.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" / "))
        }
    }
}

fn is_placeholder_name(name: &str) -> bool {
    let mut words = name.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some(word), Some(number), None) => {
            word.eq_ignore_ascii_case("bird") && number.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Reasons a repository lookup can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No record with this id
    #[error("individual {0} not found")]
    NotFound(IndividualId),

    /// The backing store could not answer
    #[error("individual {id} unavailable: {reason}")]
    Unavailable { id: IndividualId, reason: String },
}

impl LookupError {
    pub fn unavailable(id: IndividualId, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            id,
            reason: reason.into(),
        }
    }
}

/// Read-only access to breeding records
pub trait Repository {
    /// Fetch one individual by id
    fn lookup(&self, id: IndividualId) -> Result<Individual, LookupError>;
}

impl<R: Repository + ?Sized> Repository for &R {
    fn lookup(&self, id: IndividualId) -> Result<Individual, LookupError> {
        (**self).lookup(id)
    }
}

impl<R: Repository + ?Sized> Repository for Box<R> {
    fn lookup(&self, id: IndividualId) -> Result<Individual, LookupError> {
        (**self).lookup(id)
    }
}

impl<R: Repository + ?Sized> Repository for Arc<R> {
    fn lookup(&self, id: IndividualId) -> Result<Individual, LookupError> {
        (**self).lookup(id)
    }
}
