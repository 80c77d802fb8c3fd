//! # Memory Mode
//!
//! In-process data-source adapter storing records as JSON documents keyed by
//! id. It exists so the engine can be exercised end-to-end without an ORM:
//! integration tests and the demo binary run against it, and it doubles as
//! the reference implementation of the mode contract.

use crate::dispatch::{Parameters, RequestContext};
use crate::error::{AdminError, Result};
use crate::modes::{
    AuthorizationProvider, Mode, ModelFinder, PaginationProvider, ServiceProvider,
};
use crate::registry::ModelClass;
use crate::strategies::paginator::PageInfo;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Shared record storage: model name → (id → record).
pub struct MemoryStore {
    tables: DashMap<String, DashMap<String, Value>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Insert a record, assigning the next id when the payload has none.
    /// Returns the stored record.
    pub fn insert(&self, model: &ModelClass, mut record: Value) -> Value {
        let id = match record.get("id") {
            Some(Value::Null) | None => {
                let next = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
                if let Value::Object(ref mut attrs) = record {
                    attrs.insert("id".to_string(), json!(next));
                }
                next.to_string()
            }
            Some(id) => {
                let id = id_string(id);
                // Keep generated ids ahead of any explicitly seeded ones
                if let Ok(numeric) = id.parse::<u64>() {
                    self.sequence.fetch_max(numeric, Ordering::SeqCst);
                }
                id
            }
        };
        self.table(model).insert(id, record.clone());
        record
    }

    pub fn get(&self, model: &ModelClass, id: &str) -> Option<Value> {
        self.table(model).get(id).map(|record| record.clone())
    }

    pub fn remove(&self, model: &ModelClass, id: &str) -> Option<Value> {
        self.table(model).remove(id).map(|(_, record)| record)
    }

    pub fn all(&self, model: &ModelClass) -> Vec<Value> {
        let mut records: Vec<Value> = self
            .table(model)
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        // Deterministic order for pagination; numeric ids sort numerically
        records.sort_by_key(|record| {
            let id = record.get("id").map(id_string).unwrap_or_default();
            (id.parse::<u64>().unwrap_or(u64::MAX), id)
        });
        records
    }

    pub fn len(&self, model: &ModelClass) -> usize {
        self.table(model).len()
    }

    pub fn is_empty(&self, model: &ModelClass) -> bool {
        self.len(model) == 0
    }

    fn table(&self, model: &ModelClass) -> dashmap::mapref::one::Ref<'_, String, DashMap<String, Value>> {
        self.tables
            .entry(model.name().to_string())
            .or_default()
            .downgrade()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn id_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// In-process mode claiming an explicit list of models.
pub struct MemoryMode {
    models: Arc<RwLock<Vec<ModelClass>>>,
    store: Arc<MemoryStore>,
}

impl MemoryMode {
    pub fn new() -> Self {
        Self {
            models: Arc::new(RwLock::new(Vec::new())),
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Claim a model for this mode.
    pub fn manage(&self, model: ModelClass) {
        let mut models = self.models.write();
        if !models.contains(&model) {
            debug!(model = %model.name(), "Memory mode claiming model");
            models.push(model);
        }
    }

    /// Stop claiming a model.
    pub fn release(&self, model: &ModelClass) {
        self.models.write().retain(|claimed| claimed != model);
    }

    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }

    /// Seed a record directly into storage.
    pub fn seed(&self, model: &ModelClass, record: Value) -> Value {
        self.store.insert(model, record)
    }
}

impl Default for MemoryMode {
    fn default() -> Self {
        Self::new()
    }
}

impl Mode for MemoryMode {
    fn name(&self) -> &str {
        "memory"
    }

    fn model_finder(&self) -> Arc<dyn ModelFinder> {
        Arc::new(MemoryModelFinder {
            models: Arc::clone(&self.models),
        })
    }

    fn model_service_provider(&self, _model: &ModelClass) -> Arc<dyn ServiceProvider> {
        Arc::new(MemoryServiceProvider {
            store: Arc::clone(&self.store),
        })
    }

    fn model_pagination_provider(&self) -> Arc<dyn PaginationProvider> {
        Arc::new(MemoryPaginationProvider)
    }

    fn model_authorization_providers(&self) -> Vec<Arc<dyn AuthorizationProvider>> {
        vec![Arc::new(DefaultAuthorizationProvider)]
    }
}

struct MemoryModelFinder {
    models: Arc<RwLock<Vec<ModelClass>>>,
}

impl ModelFinder for MemoryModelFinder {
    fn all(&self) -> Vec<ModelClass> {
        self.models.read().clone()
    }
}

struct MemoryServiceProvider {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl ServiceProvider for MemoryServiceProvider {
    fn provider_name(&self) -> &str {
        "memory"
    }

    async fn collection(&self, model: &ModelClass, _params: &Parameters) -> Result<Vec<Value>> {
        Ok(self.store.all(model))
    }

    async fn paginate(
        &self,
        model: &ModelClass,
        _params: &Parameters,
        page: &PageInfo,
    ) -> Result<Vec<Value>> {
        Ok(self
            .store
            .all(model)
            .into_iter()
            .skip(page.offset())
            .take(page.page_size)
            .collect())
    }

    async fn new_record(&self, _model: &ModelClass, payload: &Value) -> Result<Value> {
        let mut record = json!({ "id": null });
        if let (Value::Object(ref mut attrs), Value::Object(submitted)) = (&mut record, payload) {
            for (key, value) in submitted {
                attrs.insert(key.clone(), value.clone());
            }
        }
        Ok(record)
    }

    async fn find(&self, model: &ModelClass, id: &str) -> Result<Value> {
        self.store
            .get(model, id)
            .ok_or_else(|| AdminError::resource_not_found(model.name(), id))
    }

    async fn create(&self, model: &ModelClass, payload: Value) -> Result<Value> {
        Ok(self.store.insert(model, payload))
    }

    async fn update(&self, model: &ModelClass, id: &str, payload: Value) -> Result<Value> {
        let mut record = self
            .store
            .get(model, id)
            .ok_or_else(|| AdminError::resource_not_found(model.name(), id))?;
        if let (Value::Object(ref mut attrs), Value::Object(submitted)) = (&mut record, &payload) {
            for (key, value) in submitted {
                if key != "id" {
                    attrs.insert(key.clone(), value.clone());
                }
            }
        }
        self.store.insert(model, record.clone());
        Ok(record)
    }

    async fn destroy(&self, model: &ModelClass, id: &str) -> Result<Value> {
        self.store
            .remove(model, id)
            .ok_or_else(|| AdminError::resource_not_found(model.name(), id))
    }
}

struct MemoryPaginationProvider;

impl PaginationProvider for MemoryPaginationProvider {
    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Allow-everything provider terminating every provider list.
pub struct DefaultAuthorizationProvider;

impl AuthorizationProvider for DefaultAuthorizationProvider {
    fn provider_name(&self) -> &str {
        "default"
    }

    fn available(&self, _request: &RequestContext) -> bool {
        true
    }

    fn authorize(&self, _action: &str, _model: &ModelClass, _subject: Option<&Value>) -> Result<()> {
        Ok(())
    }

    fn authorized(&self, _action: &str, _model: &ModelClass, _subject: Option<&Value>) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ModelClass {
        ModelClass::new("Product")
    }

    #[test]
    fn test_store_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.insert(&model(), json!({"name": "Widget"}));
        let second = store.insert(&model(), json!({"name": "Gadget"}));
        assert_eq!(first["id"], json!(1));
        assert_eq!(second["id"], json!(2));
        assert_eq!(store.len(&model()), 2);
    }

    #[test]
    fn test_store_keeps_explicit_ids() {
        let store = MemoryStore::new();
        store.insert(&model(), json!({"id": 42, "name": "Widget"}));
        assert_eq!(store.get(&model(), "42").map(|r| r["name"].clone()), Some(json!("Widget")));
    }

    #[tokio::test]
    async fn test_provider_crud_round_trip() {
        let mode = MemoryMode::new();
        let model = model();
        mode.manage(model.clone());
        let provider = mode.model_service_provider(&model);

        let created = provider
            .create(&model, json!({"name": "Widget"}))
            .await
            .expect("create failed");
        let id = created["id"].to_string();

        let found = provider.find(&model, &id).await.expect("find failed");
        assert_eq!(found["name"], json!("Widget"));

        let updated = provider
            .update(&model, &id, json!({"name": "Gadget"}))
            .await
            .expect("update failed");
        assert_eq!(updated["name"], json!("Gadget"));

        provider.destroy(&model, &id).await.expect("destroy failed");
        assert!(provider.find(&model, &id).await.is_err());
    }

    #[tokio::test]
    async fn test_paginate_slices_collection() {
        let mode = MemoryMode::new();
        let model = model();
        for i in 1..=5 {
            mode.seed(&model, json!({"id": i, "name": format!("record-{i}")}));
        }
        let provider = mode.model_service_provider(&model);
        let page = PageInfo {
            total: 5,
            page: 2,
            page_size: 2,
            number_of_pages: 3,
        };
        let records = provider
            .paginate(&model, &Parameters::new(), &page)
            .await
            .expect("paginate failed");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], json!(3));
    }

    #[test]
    fn test_default_provider_allows_everything() {
        let provider = DefaultAuthorizationProvider;
        assert!(provider.authorize("destroy", &model(), None).is_ok());
        assert!(provider.authorized("index", &model(), None));
        assert!(provider.permit_params("create", &model()).is_none());
    }
}
