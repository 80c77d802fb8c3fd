//! Host route-table contract: registered mounts and user-defined routes.
//!
//! The host application owns route construction; the engine only reads this
//! table — scanning mounts to pick the active one, and scanning routes to
//! let a hand-written route shadow the generic resourceful dispatch.

use serde::{Deserialize, Serialize};

/// A prefix the engine's route set is mounted at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountPoint {
    pub engine_name: String,
    pub mount_path: String,
}

/// One registered route in the host's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Literal path, with `:id` as the only recognized placeholder.
    pub path: String,
    pub controller: Option<String>,
    pub action: Option<String>,
}

/// Enumerable view of the host's registered mounts and routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    mounts: Vec<MountPoint>,
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mount(&mut self, engine_name: impl Into<String>, mount_path: impl Into<String>) {
        self.mounts.push(MountPoint {
            engine_name: engine_name.into(),
            mount_path: mount_path.into(),
        });
    }

    pub fn add_route(
        &mut self,
        path: impl Into<String>,
        controller: Option<String>,
        action: Option<String>,
    ) {
        self.routes.push(RouteEntry {
            path: path.into(),
            controller,
            action,
        });
    }

    pub fn mounts(&self) -> &[MountPoint] {
        &self.mounts
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn mount_named(&self, engine_name: &str) -> Option<&MountPoint> {
        self.mounts
            .iter()
            .find(|mount| mount.engine_name == engine_name)
    }

    /// The first mount whose path prefixes the request path. A full scan is
    /// unavoidable: several mounts may coexist.
    pub fn match_mount(&self, request_path: &str) -> Option<&MountPoint> {
        self.mounts
            .iter()
            .find(|mount| request_path.starts_with(mount.mount_path.as_str()))
    }

    /// The first user-defined route whose controller+action signature
    /// matches under the given prefix.
    pub fn find_route(&self, controller: &str, action: &str, prefix: &str) -> Option<&RouteEntry> {
        self.routes.iter().find(|route| {
            route.path.starts_with(prefix)
                && route.controller.as_deref() == Some(controller)
                && route.action.as_deref() == Some(action)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_mount_wins() {
        let mut table = RouteTable::new();
        table.add_mount("admin", "/admin");
        table.add_mount("inner", "/admin/inner");

        let mount = table.match_mount("/admin/inner/products").expect("match expected");
        assert_eq!(mount.engine_name, "admin");
        assert!(table.match_mount("/elsewhere").is_none());
    }

    #[test]
    fn test_find_route_by_signature() {
        let mut table = RouteTable::new();
        table.add_route(
            "/admin/audits",
            Some("AuditsController".to_string()),
            Some("index".to_string()),
        );

        assert!(table
            .find_route("AuditsController", "index", "/admin")
            .is_some());
        assert!(table
            .find_route("AuditsController", "index", "/other")
            .is_none());
        assert!(table.find_route("AuditsController", "show", "/admin").is_none());
    }
}
