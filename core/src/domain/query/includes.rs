use std::collections::BTreeSet;

use crate::domain::query::{errors::QueryError, field_map::is_valid_path};

/// Related data a client may ask to be loaded with an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeOptions {
    allowed: BTreeSet<String>,
    max_depth: usize,
    max_includes: usize,
}

impl IncludeOptions {
    pub fn new<I, S>(allowed: I, max_depth: usize, max_includes: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
            max_depth,
            max_includes,
        }
    }

    /// Nothing may be included.
    pub fn none() -> Self {
        Self::new(std::iter::empty::<&str>(), 1, 0)
    }

    /// Parses `"company,parent.company"`. The first offending name is
    /// reported; nothing is dropped silently.
    pub fn parse(&self, text: &str) -> Result<IncludeSet, QueryError> {
        let mut names = BTreeSet::new();

        for raw in text.split(',') {
            let name = raw.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }

            if !is_valid_path(&name) {
                return Err(invalid(&name, "not a valid include path".to_string()));
            }

            let depth = name.split('.').count();
            if depth > self.max_depth {
                return Err(invalid(
                    &name,
                    format!("nesting depth {depth} exceeds maximum {}", self.max_depth),
                ));
            }

            if !self.allowed.contains(&name) {
                return Err(invalid(&name, "include is not allowed".to_string()));
            }

            names.insert(name.clone());
            if names.len() > self.max_includes {
                return Err(invalid(
                    &name,
                    format!("at most {} includes may be requested", self.max_includes),
                ));
            }
        }

        Ok(IncludeSet(names))
    }
}

fn invalid(name: &str, reason: String) -> QueryError {
    QueryError::InvalidInclude {
        include: name.to_string(),
        reason,
    }
}

/// Validated, lowercase include names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSet(BTreeSet<String>);

impl IncludeSet {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
