//! Reverse URL generation.
//!
//! Canonical resourceful actions map to fixed path shapes under the active
//! mount; anything else falls back to scanning the host's route table for a
//! matching controller+action signature, so hand-written routes shadow the
//! generic dispatch transparently.

use crate::constants::actions;
use crate::dispatch::request::{Parameters, RequestContext};
use crate::engine::Engine;
use crate::error::{AdminError, Result};
use crate::naming::converter::to_controller_name;
use crate::registry::ModelClass;
use crate::urls::routes::MountPoint;

/// Canonical path-helper identity for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalAction {
    Root,
    Resources,
    NewResource,
    Resource,
    EditResource,
    ErrorPage,
}

/// The fixed action table. Unknown (custom) actions have no canonical
/// identity and resolve through the route-table fallback.
pub fn canonical_for(action: &str) -> Option<CanonicalAction> {
    match action {
        actions::HOME => Some(CanonicalAction::Root),
        actions::INDEX => Some(CanonicalAction::Resources),
        actions::NEW => Some(CanonicalAction::NewResource),
        actions::SHOW => Some(CanonicalAction::Resource),
        actions::EDIT => Some(CanonicalAction::EditResource),
        action if actions::ERRORS.contains(&action) => Some(CanonicalAction::ErrorPage),
        _ => None,
    }
}

/// Reverse URL generator.
pub struct EngineUrlFor;

impl EngineUrlFor {
    /// Produce a path for `(action, model)` under the active mount.
    ///
    /// `controller_name` scopes mount selection (its configured
    /// `engine_name` wins) and the route-override scan. `with_query` merges
    /// the current request's query parameters under `extra` (explicit wins).
    #[allow(clippy::too_many_arguments)]
    pub fn url_for(
        engine: &Engine,
        request: &RequestContext,
        controller_name: Option<&str>,
        action: &str,
        model: Option<&ModelClass>,
        id: Option<&str>,
        extra: &Parameters,
        with_query: bool,
    ) -> Result<String> {
        let mount = Self::active_mount(engine, request, controller_name);
        let governed = model.map(|model| engine.model_handled(model)).unwrap_or(false);

        let path = match (canonical_for(action), model) {
            (Some(CanonicalAction::Root), _) => mount.mount_path.clone(),
            (Some(CanonicalAction::ErrorPage), _) => join(&mount.mount_path, action),
            (Some(canonical), Some(model)) if governed => {
                let resources = model.resources_name();
                match canonical {
                    CanonicalAction::Resources => join(&mount.mount_path, &resources),
                    CanonicalAction::NewResource => {
                        join(&join(&mount.mount_path, &resources), actions::NEW)
                    }
                    CanonicalAction::Resource => {
                        let id = id.ok_or_else(|| {
                            AdminError::configuration(
                                "EngineUrlFor",
                                format!("an id is required to generate a {action} path"),
                            )
                        })?;
                        join(&join(&mount.mount_path, &resources), id)
                    }
                    CanonicalAction::EditResource => {
                        let id = id.ok_or_else(|| {
                            AdminError::configuration(
                                "EngineUrlFor",
                                format!("an id is required to generate a {action} path"),
                            )
                        })?;
                        join(&join(&join(&mount.mount_path, &resources), id), actions::EDIT)
                    }
                    // Root and ErrorPage handled above
                    _ => mount.mount_path.clone(),
                }
            }
            // Custom action, or a model this engine doesn't govern: let a
            // user-defined route shadow the generic shape
            _ => Self::fallback_path(engine, request, controller_name, action, model, id, &mount),
        };

        let query = if with_query {
            request.query.merged_under(extra)
        } else {
            extra.clone()
        };
        if query.is_empty() {
            Ok(path)
        } else {
            Ok(format!("{path}?{}", query.to_query_string()))
        }
    }

    /// The mount serving this request: the controller's configured engine
    /// name, else the first mount prefixing the request path, else the
    /// request's own script path.
    fn active_mount(
        engine: &Engine,
        request: &RequestContext,
        controller_name: Option<&str>,
    ) -> MountPoint {
        if let Some(controller) = controller_name {
            let configured = engine.with_types(|types| {
                engine.chain().text(
                    types,
                    controller,
                    crate::configuration::ChainAttribute::EngineName,
                )
            });
            if let Some(engine_name) = configured {
                if let Some(mount) = engine.routes(|table| table.mount_named(&engine_name).cloned())
                {
                    return mount;
                }
            }
        }
        if let Some(mount) = engine.routes(|table| table.match_mount(&request.path).cloned()) {
            return mount;
        }
        MountPoint {
            engine_name: engine.config().engine_name,
            mount_path: request.script_path.clone(),
        }
    }

    fn fallback_path(
        engine: &Engine,
        request: &RequestContext,
        controller_name: Option<&str>,
        action: &str,
        model: Option<&ModelClass>,
        id: Option<&str>,
        mount: &MountPoint,
    ) -> String {
        let controller = controller_name.map(str::to_string).unwrap_or_else(|| {
            model
                .map(|model| to_controller_name(&request.script_path, &model.resources_name()))
                .unwrap_or_default()
        });

        if let Some(route) =
            engine.routes(|table| table.find_route(&controller, action, &mount.mount_path).cloned())
        {
            return match id {
                Some(id) => route.path.replace(":id", id),
                None => route.path.clone(),
            };
        }

        // Direct composition as the last resort
        match model {
            Some(model) => join(&join(&mount.mount_path, &model.resources_name()), action),
            None => join(&mount.mount_path, action),
        }
    }
}

fn join(prefix: &str, segment: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table() {
        assert_eq!(canonical_for("home"), Some(CanonicalAction::Root));
        assert_eq!(canonical_for("index"), Some(CanonicalAction::Resources));
        assert_eq!(canonical_for("new"), Some(CanonicalAction::NewResource));
        assert_eq!(canonical_for("show"), Some(CanonicalAction::Resource));
        assert_eq!(canonical_for("edit"), Some(CanonicalAction::EditResource));
        assert_eq!(canonical_for("not_found"), Some(CanonicalAction::ErrorPage));
        assert_eq!(canonical_for("publish"), None);
    }

    #[test]
    fn test_join_normalizes_slashes() {
        assert_eq!(join("/admin", "products"), "/admin/products");
        assert_eq!(join("/admin/", "products"), "/admin/products");
        assert_eq!(join("", "products"), "/products");
    }
}
