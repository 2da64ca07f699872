use super::mem_backend::MemBackend;
use super::wall_store::WallStore;

/// Wall store over the in-memory backend. For tests and headless fallback.
pub type InMemoryWallStore = WallStore<MemBackend>;

impl Default for InMemoryWallStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryWallStore {
    pub fn new() -> Self {
        WallStore::with_backend(MemBackend::new())
    }
}
