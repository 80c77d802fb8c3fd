//! # Model Paginator
//!
//! Page-window computation for index actions. The paginator strategy turns a
//! collection size plus request parameters into a [`PageInfo`]; slicing the
//! collection itself is the service provider's job.

use crate::dispatch::Parameters;
use crate::modes::PaginationProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Bounds the paginator works within, taken from controller-chain and engine
/// configuration.
#[derive(Debug, Clone, Copy)]
pub struct PaginationDefaults {
    pub page_size: usize,
    pub max_page_size: usize,
}

/// A resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub number_of_pages: usize,
}

impl PageInfo {
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    pub fn has_next(&self) -> bool {
        self.page < self.number_of_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn next_page(&self) -> Option<usize> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn prev_page(&self) -> Option<usize> {
        self.has_prev().then(|| self.page - 1)
    }
}

/// Pagination strategy.
pub trait Paginator: Send + Sync {
    /// Fully-qualified class name of this paginator.
    fn paginator_name(&self) -> &str;

    /// Compute the page window for a collection of `total` records.
    fn page_info(&self, total: usize, params: &Parameters, defaults: PaginationDefaults)
        -> PageInfo;
}

/// Generic paginator delegating the computation to the pagination provider of
/// the model's mode.
pub struct ModelPaginator {
    name: String,
    provider: Arc<dyn PaginationProvider>,
}

impl ModelPaginator {
    pub fn new(name: impl Into<String>, provider: Arc<dyn PaginationProvider>) -> Self {
        Self {
            name: name.into(),
            provider,
        }
    }
}

impl Paginator for ModelPaginator {
    fn paginator_name(&self) -> &str {
        &self.name
    }

    fn page_info(
        &self,
        total: usize,
        params: &Parameters,
        defaults: PaginationDefaults,
    ) -> PageInfo {
        self.provider
            .page_info(total, params, defaults.page_size, defaults.max_page_size)
    }
}
