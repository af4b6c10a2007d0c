//! Service bundle shared by all handlers.

use std::sync::Arc;

use larder_notify::DigestService;
use larder_store::InventoryStore;

/// Everything a request handler needs: the store and the digest service.
pub struct AppServices {
    store: InventoryStore,
    digest: Arc<DigestService>,
}

impl AppServices {
    pub fn new(store: InventoryStore, digest: Arc<DigestService>) -> Self {
        Self { store, digest }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn digest(&self) -> &DigestService {
        &self.digest
    }
}
