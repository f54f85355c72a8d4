//! Glue between the serving layer and the renderer: crawler detection,
//! identity assignments and page rendering.

pub mod cache;
pub mod identity;
pub mod store;

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::core::renderer::{DocumentRenderer, RenderError};
use self::identity::classify_user_agent;
use self::store::{AssignmentStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// What the serving layer should send back for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A generated page for a crawler.
    Decoy { identity: String, html: String },
    /// Not a crawler; serve the regular site.
    Passthrough,
}

pub struct DocumentService<S> {
    renderer: Arc<DocumentRenderer>,
    store: S,
}

impl<S: AssignmentStore> DocumentService<S> {
    pub fn new(renderer: Arc<DocumentRenderer>, store: S) -> Self {
        Self { renderer, store }
    }

    pub fn renderer(&self) -> &DocumentRenderer {
        &self.renderer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide how to answer a request carrying `user_agent`.
    pub fn respond(&self, user_agent: &str) -> Result<Response, ServiceError> {
        match classify_user_agent(user_agent) {
            Some(identity) => {
                info!(identity = %identity, "crawler detected");
                let html = self.page_for(&identity)?;
                Ok(Response::Decoy { identity, html })
            }
            None => Ok(Response::Passthrough),
        }
    }

    /// The full page assigned to `identity`.
    pub fn page_for(&self, identity: &str) -> Result<String, ServiceError> {
        let assignment = self.store.lookup_or_assign(identity).map_err(|e| {
            error!(identity, error = %e, "assignment lookup failed");
            e
        })?;
        info!(
            identity,
            template = assignment.template,
            seed = assignment.seed,
            "serving template"
        );
        let page = self
            .renderer
            .render_page(assignment.template, assignment.seed)
            .map_err(|e| {
                error!(identity, error = %e, "render failed");
                e
            })?;
        Ok(page)
    }
}
