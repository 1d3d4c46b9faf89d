//! App Core for tabforge.
//!
//! Central struct wiring the database to the builder renderer, the save
//! pipeline and the tab publisher, sharing one anti-forgery token per
//! session between the form and the pipeline that verifies it.

use std::sync::Arc;

use uuid::Uuid;

use crate::database::connection::Database;
use crate::managers::save_pipeline::{SaveOutcome, SavePipeline, SaveRequest};
use crate::managers::tab_store::TabStore;
use crate::services::form_renderer::FormRenderer;
use crate::services::tab_publisher::{PublishedTab, TabPublisher};
use crate::types::errors::StorageError;

/// Central application struct holding the engine's components.
///
/// `TabStore` is created on demand via `db.connection()` because it borrows
/// the connection with a lifetime parameter.
pub struct App {
    pub db: Arc<Database>,
    pub form_renderer: FormRenderer,
    pub save_pipeline: SavePipeline,
    pub publisher: TabPublisher,
    nonce: String,
}

impl App {
    /// Creates a new App backed by a database file, initializing all components.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(db_path)?;
        Self::build(db)
    }

    /// Creates a new App backed by an in-memory database.
    pub fn open_in_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open_in_memory()?;
        Self::build(db)
    }

    fn build(db: Database) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(db);
        let nonce = Uuid::new_v4().simple().to_string();
        let form_renderer = FormRenderer::new(&nonce);
        let save_pipeline = SavePipeline::new(&nonce);
        let publisher =
            TabPublisher::new().map_err(|e| format!("TabPublisher init failed: {}", e))?;

        Ok(Self {
            db,
            form_renderer,
            save_pipeline,
            publisher,
            nonce,
        })
    }

    /// The anti-forgery token shared by the builder form and the save
    /// pipeline for this session.
    pub fn session_nonce(&self) -> &str {
        &self.nonce
    }

    /// Renders the builder form for a product, falling back to a neutral
    /// notice on failure.
    pub fn render_builder(&self, product_id: i64) -> String {
        let store = TabStore::new(self.db.connection());
        self.form_renderer.render_or_notice(&store, product_id)
    }

    /// Handles one posted save request for a product.
    pub fn handle_save(
        &self,
        product_id: i64,
        request: &SaveRequest,
    ) -> Result<SaveOutcome, StorageError> {
        let mut store = TabStore::new(self.db.connection());
        self.save_pipeline.handle(&mut store, product_id, request)
    }

    /// Appends a product's published tabs to the host's collection; the
    /// host's collection comes back unchanged on any failure.
    pub fn product_tabs(
        &self,
        product_id: i64,
        host_tabs: Vec<PublishedTab>,
    ) -> Vec<PublishedTab> {
        let store = TabStore::new(self.db.connection());
        self.publisher.extend(&store, product_id, host_tabs)
    }
}
