//! Kind table validation: referential integrity and route consistency.

use crate::config::KindSpec;
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(specs: &[KindSpec]) -> Result<(), ConfigError> {
    let mut kinds = HashSet::new();
    let mut path_segments = HashSet::new();
    for spec in specs {
        if !kinds.insert(spec.kind) {
            return Err(ConfigError::Validation(format!("kind {} declared twice", spec.kind)));
        }
        if !path_segments.insert(spec.path_segment) {
            return Err(ConfigError::DuplicatePathSegment(spec.path_segment.to_string()));
        }
    }

    for spec in specs {
        let linked = spec
            .parent
            .iter()
            .map(|p| ("parent", p))
            .chain(spec.references.iter().map(|r| ("reference", r)))
            .chain(spec.cascade.iter().map(|c| ("cascade", c)));
        for (role, fk) in linked {
            if !kinds.contains(&fk.kind) {
                return Err(ConfigError::MissingReference {
                    role,
                    id: format!("{} -> {}", spec.kind, fk.kind),
                });
            }
        }
        if let Some(parent) = &spec.parent {
            if spec.required.contains(&parent.field) {
                return Err(ConfigError::Validation(format!(
                    "{}: parent key {} is injected from the path and cannot be required",
                    spec.kind, parent.field
                )));
            }
        }
        for child in spec.cascade {
            let child_parent = specs.iter().find(|s| s.kind == child.kind).and_then(|s| s.parent);
            if child_parent.map(|p| (p.kind, p.field)) != Some((spec.kind, child.field)) {
                return Err(ConfigError::Validation(format!(
                    "{}: cascade to {} must follow the child's parent key",
                    spec.kind, child.kind
                )));
            }
        }
    }

    Ok(())
}
