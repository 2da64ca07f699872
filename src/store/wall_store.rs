use super::backend::KvBackend;
use crate::error::Result;
use crate::id;
use crate::model::{NewWallItem, WallId, WallItem, WallMeta};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

pub(crate) const MY_WALLS_KEY: &str = "myWalls";
pub(crate) const FAVORITE_WALLS_KEY: &str = "favoriteWalls";
pub(crate) const WALL_ITEMS_PREFIX: &str = "wallItems:";
pub(crate) const WALL_META_KEY: &str = "wallMeta";
pub(crate) const WALL_CHILDREN_KEY: &str = "wallChildren";

/// The domain repository for walls, items, favorites and hierarchy.
///
/// Every operation is a whole-collection read-modify-write against one
/// backend key: the backend only offers whole-value get/set, so there is no
/// finer-grained update primitive to rely on. Operations are synchronous and
/// run to completion; two callers racing overlapping read-modify-writes on
/// the same key are not guarded against (last write wins).
pub struct WallStore<B: KvBackend> {
    /// The underlying key-value backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: KvBackend> WallStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Walls the user created/owns, newest-first.
    pub fn my_walls(&self) -> Result<Vec<WallId>> {
        self.read_key(MY_WALLS_KEY)
    }

    /// Add a wall to the owned set. No-op if already present; never reorders.
    pub fn add_my_wall(&self, id: &WallId) -> Result<()> {
        let mut list: Vec<WallId> = self.read_key(MY_WALLS_KEY)?;
        if !list.contains(id) {
            list.insert(0, id.clone());
            self.write_key(MY_WALLS_KEY, &list)?;
        }
        Ok(())
    }

    /// Walls the user bookmarked without owning, newest-first.
    pub fn favorite_walls(&self) -> Result<Vec<WallId>> {
        self.read_key(FAVORITE_WALLS_KEY)
    }

    /// Add a wall to the favorites set. No-op if already present.
    pub fn add_favorite_wall(&self, id: &WallId) -> Result<()> {
        let mut list: Vec<WallId> = self.read_key(FAVORITE_WALLS_KEY)?;
        if !list.contains(id) {
            list.insert(0, id.clone());
            self.write_key(FAVORITE_WALLS_KEY, &list)?;
        }
        Ok(())
    }

    /// Remove a wall from the favorites set. Removing an absent id writes the
    /// list back unchanged.
    pub fn remove_favorite_wall(&self, id: &WallId) -> Result<()> {
        let mut list: Vec<WallId> = self.read_key(FAVORITE_WALLS_KEY)?;
        list.retain(|w| w != id);
        self.write_key(FAVORITE_WALLS_KEY, &list)
    }

    /// True iff the wall appears in the owned set or the favorites set.
    pub fn is_known_wall(&self, id: &WallId) -> Result<bool> {
        Ok(self.my_walls()?.contains(id) || self.favorite_walls()?.contains(id))
    }

    /// Locally stored title for a wall, if one was ever set.
    pub fn wall_title(&self, id: &WallId) -> Result<Option<String>> {
        let meta: HashMap<WallId, WallMeta> = self.read_key(WALL_META_KEY)?;
        Ok(meta.get(id).and_then(|m| m.title.clone()))
    }

    /// Set (or replace) the title for a wall, preserving any other metadata
    /// fields already stored for that id.
    pub fn set_wall_title(&self, id: &WallId, title: &str) -> Result<()> {
        let mut meta: HashMap<WallId, WallMeta> = self.read_key(WALL_META_KEY)?;
        meta.entry(id.clone()).or_default().title = Some(title.to_string());
        self.write_key(WALL_META_KEY, &meta)
    }

    /// Child walls registered under a parent, newest-first. Empty if none.
    ///
    /// The hierarchy is a forest only by convention: nothing here prevents a
    /// cycle or a wall being a child of two parents.
    pub fn child_walls(&self, parent: &WallId) -> Result<Vec<WallId>> {
        let map: HashMap<WallId, Vec<WallId>> = self.read_key(WALL_CHILDREN_KEY)?;
        Ok(map.get(parent).cloned().unwrap_or_default())
    }

    /// Register `child` under `parent`. No-op if already a child of that
    /// parent; else prepend.
    pub fn add_child_wall(&self, parent: &WallId, child: &WallId) -> Result<()> {
        let mut map: HashMap<WallId, Vec<WallId>> = self.read_key(WALL_CHILDREN_KEY)?;
        let list = map.entry(parent.clone()).or_default();
        if !list.contains(child) {
            list.insert(0, child.clone());
            self.write_key(WALL_CHILDREN_KEY, &map)?;
        }
        Ok(())
    }

    /// Items posted to a wall, newest-first. Empty if none.
    pub fn wall_items(&self, id: &WallId) -> Result<Vec<WallItem>> {
        self.read_key(&Self::items_key(id))
    }

    /// Post a new item to a wall: generate a fresh item id, stamp the
    /// creation time, mark it owned by this device, prepend, persist.
    /// Returns the created item.
    pub fn add_wall_item(&self, id: &WallId, new: NewWallItem) -> Result<WallItem> {
        let mut list = self.wall_items(id)?;
        let item = WallItem {
            id: id::item_id(),
            title: new.title,
            message: new.message,
            created_at: Utc::now().timestamp_millis(),
            owned_by_me: true,
        };
        list.insert(0, item.clone());
        self.write_key(&Self::items_key(id), &list)?;
        Ok(item)
    }

    /// Composite creation flow: adopt a remote-issued id when one is
    /// available, else generate a local 13-character id; register the wall as
    /// owned, store its title, and register it under `parent` when given.
    /// Returns the new wall's id.
    pub fn create_wall(
        &self,
        title: &str,
        parent: Option<&WallId>,
        remote_id: Option<WallId>,
    ) -> Result<WallId> {
        let wall_id = remote_id.unwrap_or_else(|| WallId::new(id::local_wall_id()));
        self.add_my_wall(&wall_id)?;
        self.set_wall_title(&wall_id, title)?;
        if let Some(parent) = parent {
            self.add_child_wall(parent, &wall_id)?;
        }
        Ok(wall_id)
    }

    fn items_key(id: &WallId) -> String {
        format!("{}{}", WALL_ITEMS_PREFIX, id)
    }

    /// Decode the collection stored under `key`. An absent key or a corrupt
    /// payload both decode as the type's empty value: availability over
    /// surfacing corruption. Only backend faults propagate.
    fn read_key<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let Some(raw) = self.backend.read(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                log::warn!("discarding corrupt payload under `{}`: {}", key, err);
                Ok(T::default())
            }
        }
    }

    fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.write(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::InMemoryWallStore;

    fn wall(id: &str) -> WallId {
        WallId::new(id)
    }

    #[test]
    fn test_add_my_wall_prepends_newest_first() {
        let store = InMemoryWallStore::new();
        store.add_my_wall(&wall("A")).unwrap();
        store.add_my_wall(&wall("B")).unwrap();
        assert_eq!(store.my_walls().unwrap(), vec![wall("B"), wall("A")]);
    }

    #[test]
    fn test_add_my_wall_is_idempotent_and_keeps_order() {
        let store = InMemoryWallStore::new();
        store.add_my_wall(&wall("A")).unwrap();
        store.add_my_wall(&wall("B")).unwrap();
        store.add_my_wall(&wall("A")).unwrap();
        // Re-adding neither duplicates nor moves "A" to the front
        assert_eq!(store.my_walls().unwrap(), vec![wall("B"), wall("A")]);
    }

    #[test]
    fn test_favorites_are_independent_of_my_walls() {
        let store = InMemoryWallStore::new();
        store.add_my_wall(&wall("mine")).unwrap();
        store.add_favorite_wall(&wall("fav")).unwrap();
        assert_eq!(store.my_walls().unwrap(), vec![wall("mine")]);
        assert_eq!(store.favorite_walls().unwrap(), vec![wall("fav")]);
    }

    #[test]
    fn test_remove_favorite_wall_filters_by_id() {
        let store = InMemoryWallStore::new();
        store.add_favorite_wall(&wall("a")).unwrap();
        store.add_favorite_wall(&wall("b")).unwrap();
        store.remove_favorite_wall(&wall("a")).unwrap();
        assert_eq!(store.favorite_walls().unwrap(), vec![wall("b")]);

        // Removing an id that is not present is harmless
        store.remove_favorite_wall(&wall("zzz")).unwrap();
        assert_eq!(store.favorite_walls().unwrap(), vec![wall("b")]);
    }

    #[test]
    fn test_is_known_wall_is_union_of_both_sets() {
        let store = InMemoryWallStore::new();
        store.add_my_wall(&wall("mine")).unwrap();
        store.add_favorite_wall(&wall("fav")).unwrap();
        assert!(store.is_known_wall(&wall("mine")).unwrap());
        assert!(store.is_known_wall(&wall("fav")).unwrap());
        assert!(!store.is_known_wall(&wall("other")).unwrap());
    }

    #[test]
    fn test_no_normalization_of_ids() {
        // Caller responsibility: an untrimmed id names a distinct wall.
        let store = InMemoryWallStore::new();
        store.add_my_wall(&wall("abc")).unwrap();
        assert!(!store.is_known_wall(&wall(" abc ")).unwrap());
        store.add_my_wall(&wall(" abc ")).unwrap();
        assert_eq!(store.my_walls().unwrap().len(), 2);
    }

    #[test]
    fn test_wall_title_roundtrip_and_absent_default() {
        let store = InMemoryWallStore::new();
        assert_eq!(store.wall_title(&wall("w")).unwrap(), None);
        store.set_wall_title(&wall("w"), "Our Wall").unwrap();
        assert_eq!(
            store.wall_title(&wall("w")).unwrap(),
            Some("Our Wall".to_string())
        );

        // Overwrite replaces, other walls are untouched
        store.set_wall_title(&wall("w"), "Renamed").unwrap();
        store.set_wall_title(&wall("w2"), "Second").unwrap();
        assert_eq!(
            store.wall_title(&wall("w")).unwrap(),
            Some("Renamed".to_string())
        );
        assert_eq!(
            store.wall_title(&wall("w2")).unwrap(),
            Some("Second".to_string())
        );
    }

    #[test]
    fn test_child_walls_unique_and_newest_first() {
        let store = InMemoryWallStore::new();
        assert!(store.child_walls(&wall("p")).unwrap().is_empty());

        store.add_child_wall(&wall("p"), &wall("c1")).unwrap();
        store.add_child_wall(&wall("p"), &wall("c2")).unwrap();
        store.add_child_wall(&wall("p"), &wall("c1")).unwrap();
        assert_eq!(
            store.child_walls(&wall("p")).unwrap(),
            vec![wall("c2"), wall("c1")]
        );

        // Separate parents keep separate child lists
        store.add_child_wall(&wall("q"), &wall("c1")).unwrap();
        assert_eq!(store.child_walls(&wall("q")).unwrap(), vec![wall("c1")]);
    }

    #[test]
    fn test_add_wall_item_returns_and_prepends_created_item() {
        let store = InMemoryWallStore::new();
        let t0 = Utc::now().timestamp_millis();
        let first = store
            .add_wall_item(&wall("w1"), NewWallItem::new("T", "M"))
            .unwrap();
        let t1 = Utc::now().timestamp_millis();

        assert!(!first.id.is_empty());
        assert_eq!(first.title, "T");
        assert_eq!(first.message, "M");
        assert!(first.owned_by_me);
        assert!(first.created_at >= t0 && first.created_at <= t1);

        let second = store
            .add_wall_item(&wall("w1"), NewWallItem::new("T2", "M2"))
            .unwrap();
        assert_ne!(first.id, second.id);

        let items = store.wall_items(&wall("w1")).unwrap();
        assert_eq!(items, vec![second, first]);
    }

    #[test]
    fn test_items_are_kept_per_wall() {
        let store = InMemoryWallStore::new();
        store
            .add_wall_item(&wall("w1"), NewWallItem::new("A", "a"))
            .unwrap();
        store
            .add_wall_item(&wall("w2"), NewWallItem::new("B", "b"))
            .unwrap();
        assert_eq!(store.wall_items(&wall("w1")).unwrap().len(), 1);
        assert_eq!(store.wall_items(&wall("w2")).unwrap().len(), 1);
        assert!(store.wall_items(&wall("w3")).unwrap().is_empty());
    }

    #[test]
    fn test_create_wall_with_local_id() {
        let store = InMemoryWallStore::new();
        let id = store.create_wall("Weekend plans", None, None).unwrap();
        assert_eq!(id.as_str().len(), 13);
        assert_eq!(store.my_walls().unwrap(), vec![id.clone()]);
        assert_eq!(
            store.wall_title(&id).unwrap(),
            Some("Weekend plans".to_string())
        );
    }

    #[test]
    fn test_create_wall_prefers_remote_id_and_links_parent() {
        let store = InMemoryWallStore::new();
        let parent = wall("parent");
        let id = store
            .create_wall("Sub", Some(&parent), Some(wall("srv-42")))
            .unwrap();
        assert_eq!(id, wall("srv-42"));
        assert_eq!(store.child_walls(&parent).unwrap(), vec![wall("srv-42")]);
    }

    #[test]
    fn test_corrupt_payload_reads_as_empty_and_is_overwritten() {
        let backend = MemBackend::new();
        backend.set_raw(WALL_META_KEY, "not json {{{");
        let store = WallStore::with_backend(backend);

        assert_eq!(store.wall_title(&wall("w")).unwrap(), None);

        store.set_wall_title(&wall("w"), "Recovered").unwrap();
        assert_eq!(
            store.wall_title(&wall("w")).unwrap(),
            Some("Recovered".to_string())
        );
    }

    #[test]
    fn test_wrong_shape_payload_reads_as_empty() {
        // Valid JSON of the wrong type counts as corrupt too.
        let backend = MemBackend::new();
        backend.set_raw(MY_WALLS_KEY, "{\"not\":\"a list\"}");
        let store = WallStore::with_backend(backend);
        assert!(store.my_walls().unwrap().is_empty());
    }

    #[test]
    fn test_backend_write_fault_propagates() {
        let store = InMemoryWallStore::new();
        store.backend.set_simulate_write_error(true);
        assert!(store.add_my_wall(&wall("w")).is_err());

        store.backend.set_simulate_write_error(false);
        store.add_my_wall(&wall("w")).unwrap();
        assert_eq!(store.my_walls().unwrap(), vec![wall("w")]);
    }

    #[test]
    fn test_stored_item_wire_shape() {
        let store = InMemoryWallStore::new();
        store
            .add_wall_item(&wall("w"), NewWallItem::new("T", "M"))
            .unwrap();

        let raw = store.backend.read("wallItems:w").unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &parsed[0];
        assert_eq!(first["title"], "T");
        assert_eq!(first["ownedByMe"], true);
        assert!(first["createdAt"].is_i64());
    }
}
