//! Request and response shapes exchanged with the host framework.
//!
//! Rendering stays with the host: a [`Response`] describes what happened
//! (status, controller, action, JSON body) and the session carries flash
//! messages for the host's layout to display.

use crate::constants::{defaults, params};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// String request parameters (query or otherwise) with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters(HashMap<String, String>);

impl Parameters {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn page(&self) -> Option<usize> {
        self.get(params::PAGE)?.parse().ok()
    }

    pub fn per(&self) -> Option<usize> {
        self.get(params::PER)?.parse().ok()
    }

    pub fn sort(&self) -> Option<&str> {
        self.get(params::SORT)
    }

    /// Merge ambient parameters under explicit ones; explicit values win.
    pub fn merged_under(&self, explicit: &Parameters) -> Parameters {
        let mut merged = self.0.clone();
        for (key, value) in &explicit.0 {
            merged.insert(key.clone(), value.clone());
        }
        Parameters(merged)
    }

    /// Deterministic `key=value&…` rendering, sorted by key.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&String, &String)> = self.0.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Routing parameters extracted from the matched path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParameters {
    /// Resources name (`order::items`); absent on root/home routes.
    pub resources: Option<String>,
    pub id: Option<String>,
    pub action: Option<String>,
    /// Per-request default-controller override.
    pub resources_controller: Option<String>,
}

/// Flash message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Notice,
    Alert,
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Notice => "notice",
            FlashKind::Alert => "alert",
            FlashKind::Error => "error",
        }
    }
}

/// A single flash message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Notice,
            message: message.into(),
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Alert,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Session state the engine reads and mutates: flash messages with bounded
/// accumulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    flash: Vec<Flash>,
    limit: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::with_limit(defaults::FLASH_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            flash: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Append a flash message, dropping the oldest past the limit.
    pub fn push_flash(&mut self, flash: Flash) {
        self.flash.push(flash);
        while self.flash.len() > self.limit {
            self.flash.remove(0);
        }
    }

    pub fn flash(&self) -> &[Flash] {
        &self.flash
    }

    /// Drain accumulated messages, the way a layout consumes them once.
    pub fn take_flash(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flash)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// One inbound request as the engine sees it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    /// Mount prefix the request came in under (`/admin`).
    pub script_path: String,
    /// Full request path.
    pub path: String,
    pub path_parameters: PathParameters,
    pub query: Parameters,
    /// Submitted form/body attributes.
    pub payload: Value,
    pub session: Session,
}

impl RequestContext {
    pub fn new(script_path: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            script_path: script_path.into(),
            path: path.into(),
            path_parameters: PathParameters::default(),
            query: Parameters::new(),
            payload: Value::Null,
            session: Session::new(),
        }
    }

    pub fn with_resources(mut self, resources: impl Into<String>) -> Self {
        self.path_parameters.resources = Some(resources.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.path_parameters.action = Some(action.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.path_parameters.id = Some(id.into());
        self
    }

    pub fn with_controller_override(mut self, controller: impl Into<String>) -> Self {
        self.path_parameters.resources_controller = Some(controller.into());
        self
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key, value);
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}

/// What a controller action produced. Rendering is the host's concern; the
/// body is structured data describing the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub controller: String,
    pub action: String,
    pub body: Value,
}

impl Response {
    pub fn new(
        status: u16,
        controller: impl Into<String>,
        action: impl Into<String>,
        body: Value,
    ) -> Self {
        Self {
            status,
            controller: controller.into(),
            action: action.into(),
            body,
        }
    }

    pub fn ok(controller: impl Into<String>, action: impl Into<String>, body: Value) -> Self {
        Self::new(200, controller, action, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_typed_accessors() {
        let params = Parameters::from_pairs([("page", "2"), ("per", "10"), ("sort", "name")]);
        assert_eq!(params.page(), Some(2));
        assert_eq!(params.per(), Some(10));
        assert_eq!(params.sort(), Some("name"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_merged_under_explicit_wins() {
        let ambient = Parameters::from_pairs([("page", "2"), ("sort", "name")]);
        let explicit = Parameters::from_pairs([("page", "5")]);
        let merged = ambient.merged_under(&explicit);
        assert_eq!(merged.get("page"), Some("5"));
        assert_eq!(merged.get("sort"), Some("name"));
    }

    #[test]
    fn test_query_string_is_deterministic() {
        let params = Parameters::from_pairs([("b", "2"), ("a", "1")]);
        assert_eq!(params.to_query_string(), "a=1&b=2");
    }

    #[test]
    fn test_session_flash_is_bounded() {
        let mut session = Session::with_limit(2);
        session.push_flash(Flash::notice("one"));
        session.push_flash(Flash::notice("two"));
        session.push_flash(Flash::alert("three"));
        assert_eq!(session.flash().len(), 2);
        assert_eq!(session.flash()[0].message, "two");

        let drained = session.take_flash();
        assert_eq!(drained.len(), 2);
        assert!(session.flash().is_empty());
    }
}
