//! Identifier generation.
//!
//! Ids are `<prefix>-<unix millis>-<random hex>`, redrawn until they do not
//! collide with any id already in use, so an id is never handed out twice
//! within a collection.

use chrono::Utc;
use rand::Rng;

use crate::models::Resource;

/// Prefix for resource ids.
pub const RESOURCE_PREFIX: &str = "r";
/// Prefix for task ids.
pub const TASK_PREFIX: &str = "t";
/// Prefix for project ids.
pub const PROJECT_PREFIX: &str = "p";

/// Generates an id with `prefix` for which `taken` returns false.
pub fn generate_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut rng = rand::rng();
    let millis = Utc::now().timestamp_millis();
    loop {
        let candidate = format!("{prefix}-{millis}-{:06x}", rng.random::<u32>() & 0x00ff_ffff);
        if !taken(&candidate) {
            return candidate;
        }
    }
}

/// A resource id unused in `resources`.
pub fn new_resource_id(resources: &[Resource]) -> String {
    generate_id(RESOURCE_PREFIX, |id| resources.iter().any(|r| r.id == id))
}

/// A task id unused by any task of any resource.
pub fn new_task_id(resources: &[Resource]) -> String {
    generate_id(TASK_PREFIX, |id| {
        resources
            .iter()
            .flat_map(|r| r.tasks.iter())
            .any(|t| t.id == id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_prefix_and_shape() {
        let id = generate_id("t", |_| false);
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "t");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 6);
    }

    #[test]
    fn test_redraws_on_collision() {
        let calls = Cell::new(0);
        let id = generate_id("r", |_| {
            calls.set(calls.get() + 1);
            calls.get() < 3
        });
        assert_eq!(calls.get(), 3);
        assert!(id.starts_with("r-"));
    }

    #[test]
    fn test_unique_against_collection() {
        let resources = vec![crate::models::Resource::new("r1", "A", crate::models::Role::Qa)];
        let id = new_resource_id(&resources);
        assert_ne!(id, "r1");
    }
}
