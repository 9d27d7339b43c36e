//! Permission and domain collaborators
//!
//! The engine does not evaluate ACLs or host configuration itself. Callers
//! inject a [`PermissionOracle`] and a [`DomainContext`] per request.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Answers whether the current user may view a node in a locale
pub trait PermissionOracle: Send + Sync {
    fn can_view(&self, node_id: i64, locale: &str) -> bool;
}

/// Oracle granting view permission on every node
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionOracle for AllowAll {
    fn can_view(&self, _node_id: i64, _locale: &str) -> bool {
        true
    }
}

/// Oracle denying view permission on a fixed set of nodes
#[derive(Debug, Clone, Default)]
pub struct DenyNodes {
    denied: HashSet<i64>,
}

impl DenyNodes {
    pub fn new(denied: impl IntoIterator<Item = i64>) -> Self {
        Self {
            denied: denied.into_iter().collect(),
        }
    }
}

impl PermissionOracle for DenyNodes {
    fn can_view(&self, node_id: i64, _locale: &str) -> bool {
        !self.denied.contains(&node_id)
    }
}

/// Host the admin has switched to in a multi-domain setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchedHost {
    pub id: String,
    pub host: String,
}

/// Request host information used for tag prefixing and chooser roots
pub trait DomainContext: Send + Sync {
    fn is_multi_domain(&self) -> bool;

    fn current_host(&self) -> String;

    fn switched_host(&self) -> Option<SwitchedHost>;

    /// Root node serving `host`, when configured
    fn root_node_id_for_host(&self, host: &str) -> Option<i64>;
}

/// Single-site deployment
#[derive(Debug, Clone, Default)]
pub struct SingleDomain {
    host: String,
}

impl SingleDomain {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl DomainContext for SingleDomain {
    fn is_multi_domain(&self) -> bool {
        false
    }

    fn current_host(&self) -> String {
        self.host.clone()
    }

    fn switched_host(&self) -> Option<SwitchedHost> {
        None
    }

    fn root_node_id_for_host(&self, _host: &str) -> Option<i64> {
        None
    }
}

/// Multi-domain request context with a fixed host map
#[derive(Debug, Clone, Default)]
pub struct MultiDomain {
    current_host: String,
    switched: Option<SwitchedHost>,
    roots: HashMap<String, i64>,
}

impl MultiDomain {
    pub fn new(current_host: impl Into<String>) -> Self {
        Self {
            current_host: current_host.into(),
            ..Self::default()
        }
    }

    pub fn with_switched_host(mut self, id: impl Into<String>, host: impl Into<String>) -> Self {
        self.switched = Some(SwitchedHost {
            id: id.into(),
            host: host.into(),
        });
        self
    }

    pub fn with_root(mut self, host: impl Into<String>, root_node_id: i64) -> Self {
        self.roots.insert(host.into(), root_node_id);
        self
    }
}

impl DomainContext for MultiDomain {
    fn is_multi_domain(&self) -> bool {
        true
    }

    fn current_host(&self) -> String {
        self.current_host.clone()
    }

    fn switched_host(&self) -> Option<SwitchedHost> {
        self.switched.clone()
    }

    fn root_node_id_for_host(&self, host: &str) -> Option<i64> {
        self.roots.get(host).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_nodes() {
        let oracle = DenyNodes::new([2, 3]);
        assert!(oracle.can_view(1, "en"));
        assert!(!oracle.can_view(2, "en"));
        assert!(AllowAll.can_view(2, "en"));
    }

    #[test]
    fn test_multi_domain_roots() {
        let domain = MultiDomain::new("admin.example.com")
            .with_switched_host("shop", "shop.example.com")
            .with_root("shop.example.com", 9);

        assert!(domain.is_multi_domain());
        assert_eq!(domain.root_node_id_for_host("shop.example.com"), Some(9));
        assert_eq!(domain.root_node_id_for_host("blog.example.com"), None);
        assert_eq!(domain.switched_host().unwrap().id, "shop");
        assert!(!SingleDomain::new("example.com").is_multi_domain());
    }
}
