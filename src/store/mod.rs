//! # Storage Layer
//!
//! Two layers, built bottom-up:
//!
//! - [`backend::KvBackend`]: a uniform synchronous interface — read raw text
//!   for a key, write raw text for a key — over whichever persistence
//!   primitive is available at runtime.
//! - [`wall_store::WallStore`]: the wall/item/favorite/hierarchy repository,
//!   built entirely on top of the backend. Owns all serialization, id
//!   generation, and the ordering/uniqueness invariants.
//!
//! ## Backend Selection
//!
//! [`open_default`] probes once, at construction, for a writable
//! platform data directory (via the `directories` crate). When none is
//! available — headless execution, sandboxed test environment, denied
//! permissions — it transparently substitutes a process-scoped
//! [`mem_backend::MemBackend`] with identical read/write semantics. The
//! substitution is invisible to the repository: same interface, same
//! behavior, different durability.
//!
//! ## Key Layout
//!
//! | Key | Value (JSON) |
//! |-----|--------------|
//! | `myWalls` | list of wall ids, newest-first |
//! | `favoriteWalls` | list of wall ids, newest-first |
//! | `wallItems:<id>` | list of items for one wall, newest-first |
//! | `wallMeta` | map of wall id to `{ title? }` |
//! | `wallChildren` | map of parent id to list of child ids |
//!
//! `FsBackend` stores each key as one file under its root; keys are escaped
//! so arbitrary wall ids are always filename-safe.
//!
//! ## Failure Policy
//!
//! A corrupt or incompatible stored payload decodes as the collection's
//! empty value and is silently replaced on the next write. Only backend
//! faults (I/O errors, storage exhaustion) surface as `Err`.

use crate::error::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod wall_store;

use self::backend::KvBackend;
use self::fs_backend::FsBackend;
use self::mem_backend::MemBackend;
use self::wall_store::WallStore;

/// Open a wall store over the default backend for this machine.
///
/// Durable when a platform data directory can be created, in-memory
/// otherwise. Selection happens here, once; it is not re-checked per call.
pub fn open_default() -> WallStore<Box<dyn KvBackend>> {
    let backend: Box<dyn KvBackend> = match durable_root() {
        Some(root) => {
            log::debug!("using durable store at {}", root.display());
            Box::new(FsBackend::new(root))
        }
        None => {
            log::debug!("no writable data directory, falling back to in-memory store");
            Box::new(MemBackend::new())
        }
    };
    WallStore::with_backend(backend)
}

/// Probe for a writable per-user data directory.
fn durable_root() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "wallz")?;
    let root = dirs.data_dir().to_path_buf();
    fs::create_dir_all(&root).ok()?;
    Some(root)
}

/// Open a wall store rooted at an explicit directory. Used by callers that
/// manage their own storage location (and by tests via `tempfile`).
pub fn open_at(root: PathBuf) -> Result<WallStore<FsBackend>> {
    fs::create_dir_all(&root)?;
    Ok(WallStore::with_backend(FsBackend::new(root)))
}
