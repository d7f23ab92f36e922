//! Record checks for breeding data.
//!
//! These never block a pedigree build. They point at records whose parent
//! links the builder will have to work around: self-parentage, parents of the
//! wrong sex, and references to records that do not exist.

use std::fmt;

use super::{IndividualId, MemoryRepository, ParentRole};

/// A warning about a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub individual: IndividualId,
    pub message: String,
}

/// Category of record defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    SelfParent,
    Sex,
    Dangling,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::SelfParent => write!(f, "self-parent"),
            LintCategory::Sex => write!(f, "sex"),
            LintCategory::Dangling => write!(f, "dangling"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Run all record checks, in ascending id order.
pub fn check(repo: &MemoryRepository) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for individual in repo.iter() {
        for role in [ParentRole::Sire, ParentRole::Dam] {
            let Some(parent_id) = individual.parent(role) else {
                continue;
            };
            let name = individual.display_name();

            if parent_id == individual.id {
                warnings.push(LintWarning {
                    category: LintCategory::SelfParent,
                    individual: individual.id,
                    message: format!("{} ({}) is recorded as its own {}", name, individual.id, role),
                });
                continue;
            }

            let Some(parent) = repo.get(parent_id) else {
                warnings.push(LintWarning {
                    category: LintCategory::Dangling,
                    individual: individual.id,
                    message: format!(
                        "{} ({}) has {} {} which is not in the registry",
                        name, individual.id, role, parent_id
                    ),
                });
                continue;
            };

            match parent.sex {
                Some(sex) if sex != role.expected_sex() => {
                    warnings.push(LintWarning {
                        category: LintCategory::Sex,
                        individual: individual.id,
                        message: format!(
                            "{} ({}) has {} {} ({}) recorded as {}",
                            name,
                            individual.id,
                            role,
                            parent.display_name(),
                            parent.id,
                            sex
                        ),
                    });
                }
                _ => {}
            }
        }
    }
    warnings
}
