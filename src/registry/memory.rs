//! In-memory repository loaded from a TOML registry file

use std::collections::HashMap;
use std::path::Path;

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde::Deserialize;
use thiserror::Error;

use super::{Individual, IndividualId, LookupError, Repository};

/// Errors that can occur when loading a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse registry TOML: {message}")]
    Parse {
        message: String,
        span: Option<std::ops::Range<usize>>,
    },

    #[error("duplicate individual id {id}")]
    DuplicateId { id: IndividualId },

    #[error("ring '{ring}' is used by both {first} and {second}")]
    DuplicateRing {
        ring: String,
        first: IndividualId,
        second: IndividualId,
    },
}

impl From<toml::de::Error> for RegistryError {
    fn from(err: toml::de::Error) -> Self {
        RegistryError::Parse {
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}

impl RegistryError {
    /// Format the error with source context using ariadne
    ///
    /// Errors without a source location fall back to their plain message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let RegistryError::Parse {
            message,
            span: Some(span),
        } = self
        else {
            return self.to_string();
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid registry file")
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match (written, String::from_utf8(buf)) {
            (Ok(()), Ok(report)) => report,
            _ => self.to_string(),
        }
    }
}

/// TOML structure for deserializing registries
#[derive(Deserialize)]
struct TomlRegistry {
    #[serde(default, rename = "individual")]
    individuals: Vec<Individual>,
}

/// A repository holding every record in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    individuals: HashMap<IndividualId, Individual>,
    rings: HashMap<String, IndividualId>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from records, rejecting duplicate ids and rings
    pub fn from_individuals(
        individuals: impl IntoIterator<Item = Individual>,
    ) -> Result<Self, RegistryError> {
        let mut repo = Self::new();
        for individual in individuals {
            repo.insert(individual)?;
        }
        Ok(repo)
    }

    /// Load a registry from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a registry from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let parsed: TomlRegistry = toml::from_str(content)?;
        Self::from_individuals(parsed.individuals)
    }

    /// Add a record
    pub fn insert(&mut self, individual: Individual) -> Result<(), RegistryError> {
        if self.individuals.contains_key(&individual.id) {
            return Err(RegistryError::DuplicateId { id: individual.id });
        }
        if let Some(ring) = individual.ring.as_deref().map(str::trim) {
            if !ring.is_empty() {
                if let Some(&first) = self.rings.get(ring) {
                    return Err(RegistryError::DuplicateRing {
                        ring: ring.to_string(),
                        first,
                        second: individual.id,
                    });
                }
                self.rings.insert(ring.to_string(), individual.id);
            }
        }
        self.individuals.insert(individual.id, individual);
        Ok(())
    }

    /// Get a record by id
    pub fn get(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.get(&id)
    }

    /// Find a record by its ring number
    pub fn find_by_ring(&self, ring: &str) -> Option<&Individual> {
        self.rings
            .get(ring.trim())
            .and_then(|id| self.individuals.get(id))
    }

    /// Resolve user input to a stored id: a known id first, then a ring number
    pub fn resolve(&self, input: &str) -> Option<IndividualId> {
        input
            .parse::<IndividualId>()
            .ok()
            .filter(|id| self.contains(*id))
            .or_else(|| self.find_by_ring(input).map(|i| i.id))
    }

    pub fn contains(&self, id: IndividualId) -> bool {
        self.individuals.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// All records in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        let mut records: Vec<&Individual> = self.individuals.values().collect();
        records.sort_by_key(|i| i.id);
        records.into_iter()
    }
}

impl Repository for MemoryRepository {
    fn lookup(&self, id: IndividualId) -> Result<Individual, LookupError> {
        self.individuals
            .get(&id)
            .cloned()
            .ok_or(LookupError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Sex;

    const SAMPLE: &str = r#"
[[individual]]
id = 1
name = "Blue Lady"
ring = "NL-21-100"
sex = "female"
color = "Blue Bar"
strain = "Janssen"
year = 2021
sire = 2
dam = "3"

[[individual]]
id = 2
name = "Old Red"
sex = "male"

[[individual]]
id = "3"
name = "Bird 3"
ring = "NL-18-7"
"#;

    #[test]
    fn test_parse_registry() {
        let repo = MemoryRepository::from_toml_str(SAMPLE).expect("Should parse");
        assert_eq!(repo.len(), 3);

        let lady = repo.get(IndividualId(1)).unwrap();
        assert_eq!(lady.sex, Some(Sex::Female));
        assert_eq!(lady.year, Some(2021));
        assert_eq!(lady.sire, Some(IndividualId(2)));
        // String ids are normalized to the canonical form
        assert_eq!(lady.dam, Some(IndividualId(3)));
        assert!(repo.contains(IndividualId(3)));
    }

    #[test]
    fn test_lookup() {
        let repo = MemoryRepository::from_toml_str(SAMPLE).unwrap();
        assert_eq!(repo.lookup(IndividualId(2)).unwrap().name, "Old Red");
        assert_eq!(
            repo.lookup(IndividualId(9)),
            Err(LookupError::NotFound(IndividualId(9)))
        );
    }

    #[test]
    fn test_find_by_ring() {
        let repo = MemoryRepository::from_toml_str(SAMPLE).unwrap();
        assert_eq!(repo.find_by_ring(" NL-18-7 ").unwrap().id, IndividualId(3));
        assert!(repo.find_by_ring("BE-00-1").is_none());
    }

    #[test]
    fn test_resolve_id_or_ring() {
        let repo = MemoryRepository::from_individuals(vec![
            Individual::new(1, "a").with_ring("NL-21-100"),
            Individual::new(2, "b").with_ring("4711"),
        ])
        .unwrap();
        assert_eq!(repo.resolve("1"), Some(IndividualId(1)));
        assert_eq!(repo.resolve(" #2 "), Some(IndividualId(2)));
        assert_eq!(repo.resolve("NL-21-100"), Some(IndividualId(1)));
        // Numeric rings are found once no id matches
        assert_eq!(repo.resolve("4711"), Some(IndividualId(2)));
        assert_eq!(repo.resolve("9"), None);
        assert_eq!(repo.resolve("BE-00-1"), None);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = MemoryRepository::from_individuals(vec![
            Individual::new(1, "a"),
            Individual::new(1, "b"),
        ]);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateId { id }) if id == IndividualId(1)
        ));
    }

    #[test]
    fn test_duplicate_ring_rejected() {
        let result = MemoryRepository::from_individuals(vec![
            Individual::new(1, "a").with_ring("X-1"),
            Individual::new(2, "b").with_ring("X-1"),
        ]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("X-1"));
    }

    #[test]
    fn test_invalid_toml_error_has_span() {
        let source = "[[individual]]\nid = 1\nname = \n";
        let err = MemoryRepository::from_toml_str(source).unwrap_err();
        match &err {
            RegistryError::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other}"),
        }
        let report = err.format(source, "birds.toml");
        assert!(report.contains("birds.toml"));
    }

    #[test]
    fn test_bad_string_id_rejected() {
        let source = "[[individual]]\nid = \"abc\"\nname = \"x\"\n";
        assert!(MemoryRepository::from_toml_str(source).is_err());
    }

    #[test]
    fn test_missing_name_rejected() {
        let source = "[[individual]]\nid = 1\nring = \"NL-21-1\"\n";
        let err = MemoryRepository::from_toml_str(source).unwrap_err();
        match &err {
            RegistryError::Parse { message, span } => {
                assert!(message.contains("name"), "{message}");
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_iter_sorted() {
        let repo = MemoryRepository::from_toml_str(SAMPLE).unwrap();
        let ids: Vec<u64> = repo.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
