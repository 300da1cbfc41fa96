//! Resolved kind registry: validated table with per-kind lookups for handlers and routes.

use crate::config::{default_kinds, validate, KindSpec};
use crate::error::{AppError, ConfigError};
use crate::models::Kind;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct KindRegistry {
    specs: Vec<KindSpec>,
    by_kind: HashMap<Kind, usize>,
}

impl KindRegistry {
    pub fn resolve(specs: Vec<KindSpec>) -> Result<Self, ConfigError> {
        validate(&specs)?;
        let by_kind = specs.iter().enumerate().map(|(i, s)| (s.kind, i)).collect();
        Ok(KindRegistry { specs, by_kind })
    }

    /// Registry over the default six-kind table.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::resolve(default_kinds())
    }

    /// Spec for `kind`; an unregistered kind has no routes, so it reads as not found.
    pub fn spec(&self, kind: Kind) -> Result<&KindSpec, AppError> {
        self.by_kind
            .get(&kind)
            .and_then(|&i| self.specs.get(i))
            .ok_or_else(|| AppError::not_found(format!("kind {}", kind)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &KindSpec> {
        self.specs.iter()
    }
}
