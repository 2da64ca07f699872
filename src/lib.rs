//! # Wallz Architecture
//!
//! Wallz is a **UI-agnostic wall library**: it durably tracks which walls
//! exist for a user, their titles, their posted items, and their
//! parent/child grouping, on top of an unreliable or absent persistence
//! backend. Screens, navigation and form handling live in whatever client
//! sits on top; nothing in this crate writes to stdout or assumes a
//! terminal.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (not this crate)                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain Repository (store/wall_store.rs)                    │
//! │  - Typed operations: my walls, favorites, items, children   │
//! │  - Owns serialization, id generation, ordering/uniqueness   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backend Adapter (store/backend.rs)                         │
//! │  - Abstract KvBackend trait: read/write raw text per key    │
//! │  - FsBackend (durable), MemBackend (process-lifetime)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is single-threaded and synchronous: every operation reads,
//! decodes, mutates, encodes and writes back before returning. It is
//! best-effort local state — single device, single process, no sync.
//!
//! ## Module Overview
//!
//! - [`store`]: backend adapter and the wall repository
//! - [`model`]: core data types (`WallId`, `WallItem`, `WallMeta`)
//! - [`id`]: collision-resistant item and wall id generation
//! - [`remote`]: blocking client for the external wall-creation service
//! - [`error`]: error types
//!
//! ## Quick Start
//!
//! ```no_run
//! use wallz::model::NewWallItem;
//!
//! let store = wallz::store::open_default();
//! let wall = store.create_wall("Weekend plans", None, None)?;
//! store.add_wall_item(&wall, NewWallItem::new("Hi", "First post"))?;
//! # Ok::<(), wallz::error::WallzError>(())
//! ```

pub mod error;
pub mod id;
pub mod model;
pub mod remote;
pub mod store;
