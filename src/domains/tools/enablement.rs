//! Enablement: which registry tools are active for this run.

use std::collections::BTreeSet;

use super::descriptor::ToolDescriptor;
use super::registry::ToolRegistry;

/// Outcome of resolving an allow-list against the registry.
#[derive(Debug)]
pub struct Enablement<'a> {
    /// Active descriptors, in registry order.
    pub active: Vec<&'a ToolDescriptor>,

    /// Requested ids the registry does not know. They are dropped, not fatal.
    pub unknown: Vec<String>,
}

impl Enablement<'_> {
    /// Ids of the active tools.
    pub fn ids(&self) -> Vec<&'static str> {
        self.active.iter().map(|d| d.id()).collect()
    }
}

/// Resolve the active tool set.
///
/// With a non-empty `requested` set the result is `requested ∩ registry`;
/// otherwise it is every tool marked enabled by default.
pub fn resolve<'a>(requested: &BTreeSet<String>, registry: &'a ToolRegistry) -> Enablement<'a> {
    if requested.is_empty() {
        return Enablement {
            active: registry
                .all()
                .iter()
                .filter(|d| d.enabled_by_default())
                .collect(),
            unknown: Vec::new(),
        };
    }

    let active = registry
        .all()
        .iter()
        .filter(|d| requested.contains(d.id()))
        .collect();
    let unknown = requested
        .iter()
        .filter(|id| registry.get(id).is_none())
        .cloned()
        .collect();

    Enablement { active, unknown }
}

/// Parse a `--tools` value: comma separated, whitespace trimmed, blanks dropped.
pub fn parse_requested(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolDescriptor;
    use crate::domains::tools::testing::{AlphaTool, BetaTool, fake_registry};

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn alpha_beta() -> ToolRegistry {
        ToolRegistry::builder()
            .register(ToolDescriptor::from_handler(AlphaTool))
            .unwrap()
            .register(ToolDescriptor::from_handler(BetaTool))
            .unwrap()
            .build()
    }

    #[test]
    fn test_empty_request_uses_defaults() {
        let registry = alpha_beta();
        let enablement = resolve(&BTreeSet::new(), &registry);
        assert_eq!(enablement.ids(), vec!["alpha"]);
        assert!(enablement.unknown.is_empty());
    }

    #[test]
    fn test_unknown_ids_are_dropped() {
        let registry = alpha_beta();
        let enablement = resolve(&set(&["beta", "z"]), &registry);
        assert_eq!(enablement.ids(), vec!["beta"]);
        assert_eq!(enablement.unknown, vec!["z".to_string()]);
    }

    #[test]
    fn test_all_defaults_off_gives_empty_set() {
        let registry = ToolRegistry::builder()
            .register(ToolDescriptor::from_handler(BetaTool))
            .unwrap()
            .build();
        let enablement = resolve(&BTreeSet::new(), &registry);
        assert!(enablement.active.is_empty());
    }

    #[test]
    fn test_requested_keeps_registry_order() {
        let registry = fake_registry();
        let enablement = resolve(&set(&["gamma", "alpha", "search"]), &registry);
        assert_eq!(enablement.ids(), vec!["alpha", "search", "gamma"]);
    }

    #[test]
    fn test_only_unknown_ids_gives_empty_set() {
        let registry = fake_registry();
        let enablement = resolve(&set(&["nope"]), &registry);
        assert!(enablement.active.is_empty());
        assert_eq!(enablement.unknown, vec!["nope".to_string()]);
    }

    #[test]
    fn test_parse_requested() {
        assert_eq!(
            parse_requested(" web_search_exa, crawling_exa ,,"),
            set(&["web_search_exa", "crawling_exa"])
        );
        assert!(parse_requested("").is_empty());
        assert!(parse_requested(" , ").is_empty());
    }
}
