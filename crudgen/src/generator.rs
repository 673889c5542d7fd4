//! Main generator orchestrating inspection, rendering and publishing

use std::sync::Arc;

use tracing::info;

use crate::codegen::{render_project, RenderedProject};
use crate::error::Result;
use crate::inspector::SchemaInspector;
use crate::request::GenerationRequest;
use crate::store::{ProjectStore, PublishedProject};

/// Turns a [`GenerationRequest`] into a published project
///
/// Cloning is cheap; clones share the inspector and the store.
#[derive(Clone)]
pub struct ProjectGenerator {
    inspector: Arc<dyn SchemaInspector>,
    store: Arc<ProjectStore>,
}

impl ProjectGenerator {
    /// Create a generator from an inspector and a store
    pub fn new(inspector: Arc<dyn SchemaInspector>, store: Arc<ProjectStore>) -> Self {
        Self { inspector, store }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    /// Inspect and render without touching the store
    pub async fn render(&self, request: &GenerationRequest) -> Result<RenderedProject> {
        let columns = self
            .inspector
            .table_columns(&request.connection, &request.table)
            .await?;
        info!(
            "Table {} has {} columns: {}",
            request.table,
            columns.len(),
            columns.join(", ")
        );
        render_project(&request.connection, &request.table, &columns)
    }

    /// Inspect, render and publish one project
    ///
    /// Nothing is written unless inspection and rendering both succeed.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<PublishedProject> {
        let project = self.render(request).await?;
        self.store.publish(project).await
    }
}
