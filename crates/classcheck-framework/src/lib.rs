//! Competency framework store
//!
//! Loads the hierarchical referential document (domains → competencies →
//! indicators), validates its structure, and indexes every competency by id
//! for O(1) exact lookup. The framework is loaded once per session and is
//! immutable afterwards: `find` never mutates, so a loaded framework can be
//! shared freely across concurrent evaluations.
//!
//! # Source shape
//!
//! The source document is YAML with the referential wire names:
//!
//! ```yaml
//! referentiels:
//!   - nom: "Domaine 1"
//!     competences:
//!       - id: "D1.3"
//!         name: "Résolution de problèmes géométriques"
//!         description: "Appliquer les théorèmes de géométrie plane"
//!         indicateurs:
//!           - "Identifie la configuration adaptée"
//!           - "Applique le théorème de Pythagore"
//! ```
//!
//! Structural validation happens at load time, all-or-nothing: a competency
//! with no indicators or a duplicate id anywhere in the document aborts the
//! load and no partial framework is exposed.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub use classcheck_types::error::{CompetencyNotFound, FrameworkError};

/// One competency of the referential.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Competency {
    /// Unique id across the whole framework (e.g. "D1.3").
    pub id: String,
    /// Short display name.
    pub name: String,
    /// Longer description of what the competency covers.
    pub description: String,
    /// Ordered observable indicators. Display/criteria text only, not
    /// independently addressable.
    #[serde(rename = "indicateurs")]
    pub indicators: Vec<String>,
}

/// One domain of the referential, owning a set of competencies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Domain {
    /// Domain name; some referential documents omit it.
    #[serde(default, rename = "nom")]
    pub name: Option<String>,
    /// Competencies declared under this domain, in document order.
    #[serde(rename = "competences")]
    pub competencies: Vec<Competency>,
}

/// Raw document shape, prior to validation and indexing.
#[derive(Debug, Deserialize)]
struct FrameworkDocument {
    referentiels: Vec<Domain>,
}

/// A validated, indexed competency framework.
///
/// Lookup goes through a flat id → position map built once at load time,
/// replacing any per-call scan through the nested domain collections. The
/// same map drives duplicate-id rejection during the load.
#[derive(Debug, Clone)]
pub struct CompetencyFramework {
    domains: Vec<Domain>,
    index: HashMap<String, (usize, usize)>,
}

impl CompetencyFramework {
    /// Load and validate a framework from a YAML document.
    ///
    /// # Errors
    ///
    /// - [`FrameworkError::Parse`] if the document is not valid YAML in the
    ///   expected shape (including a missing `indicateurs` key).
    /// - [`FrameworkError::MissingIndicators`] if a competency declares an
    ///   empty indicator list.
    /// - [`FrameworkError::DuplicateId`] on the first id seen twice,
    ///   anywhere across domains.
    pub fn load(source: &str) -> Result<Self, FrameworkError> {
        let document: FrameworkDocument = serde_yaml::from_str(source)?;

        let mut index = HashMap::new();
        for (domain_pos, domain) in document.referentiels.iter().enumerate() {
            for (competency_pos, competency) in domain.competencies.iter().enumerate() {
                if competency.indicators.is_empty() {
                    return Err(FrameworkError::MissingIndicators {
                        id: competency.id.clone(),
                    });
                }
                if index
                    .insert(competency.id.clone(), (domain_pos, competency_pos))
                    .is_some()
                {
                    return Err(FrameworkError::DuplicateId {
                        id: competency.id.clone(),
                    });
                }
            }
        }

        info!(
            domains = document.referentiels.len(),
            competencies = index.len(),
            "competency framework loaded"
        );

        Ok(Self {
            domains: document.referentiels,
            index,
        })
    }

    /// Load a framework from a file on disk.
    ///
    /// # Errors
    ///
    /// [`FrameworkError::Io`] if the file cannot be read, otherwise the same
    /// errors as [`CompetencyFramework::load`].
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, FrameworkError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| FrameworkError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load(&source)
    }

    /// Look up a competency by id.
    ///
    /// The match is exact and case-sensitive. Lookups are deterministic and
    /// idempotent: the framework never changes after load.
    ///
    /// # Errors
    ///
    /// [`CompetencyNotFound`] when the id resolves nowhere; no default is
    /// ever substituted.
    pub fn find(&self, id: &str) -> Result<&Competency, CompetencyNotFound> {
        self.index
            .get(id)
            .map(|&(domain_pos, competency_pos)| {
                &self.domains[domain_pos].competencies[competency_pos]
            })
            .ok_or_else(|| CompetencyNotFound::new(id))
    }

    /// Whether the id resolves in this framework.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Domains in document order.
    #[must_use]
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Total number of competencies across all domains.
    #[must_use]
    pub fn competency_count(&self) -> usize {
        self.index.len()
    }

    /// Iterate over every competency, in document order.
    pub fn iter_competencies(&self) -> impl Iterator<Item = &Competency> {
        self.domains
            .iter()
            .flat_map(|domain| domain.competencies.iter())
    }
}
