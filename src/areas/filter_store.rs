//! Filter collection persistence
//!
//! Collections are kept in a single JSON document. Loading never fails: a missing or
//! unreadable document yields the default store, which holds the built-in "All files"
//! collection. Saving keeps the previous document next to the new one with an `.old`
//! suffix and writes under an exclusive file lock.
//!
//! [`MemoryFilterStore`] keeps the same records in memory instead.

use crate::artifacts::collection::ALL_FILES_COLLECTION;
use crate::artifacts::collection::collection_scope::CollectionScope;
use crate::artifacts::collection::filter_collection::{CollectionRecord, FilterCollection};
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, warn};

const BACKUP_SUFFIX: &str = ".old";

/// Collections keyed by name
#[derive(Debug, Clone, Default)]
pub struct FilterCollectionStore {
    collections: BTreeMap<String, Arc<FilterCollection>>,
}

impl FilterCollectionStore {
    /// The store used when nothing was persisted yet.
    pub fn with_defaults() -> Self {
        let mut store = Self::default();
        store.ensure_defaults();
        store
    }

    pub fn from_records(records: &[CollectionRecord]) -> Self {
        let mut store = Self::default();
        for record in records {
            if store.collections.contains_key(&record.name) {
                warn!(collection = %record.name, "duplicate filter collection ignored");
                continue;
            }
            store
                .collections
                .insert(record.name.clone(), Arc::new(FilterCollection::from_record(record)));
        }
        store.ensure_defaults();
        store
    }

    pub fn to_records(&self) -> Vec<CollectionRecord> {
        self.collections.values().map(|collection| collection.to_record()).collect()
    }

    fn ensure_defaults(&mut self) {
        self.collections
            .entry(ALL_FILES_COLLECTION.to_string())
            .or_insert_with(|| {
                Arc::new(FilterCollection::new(
                    ALL_FILES_COLLECTION,
                    true,
                    CollectionScope::Global,
                ))
            });
    }

    pub fn get(&self, name: &str) -> Option<Arc<FilterCollection>> {
        self.collections.get(name).cloned()
    }

    pub fn try_get(&self, name: &str) -> anyhow::Result<Arc<FilterCollection>> {
        self.get(name)
            .with_context(|| format!("no filter collection named '{}'", name))
    }

    pub fn insert(
        &mut self,
        collection: FilterCollection,
    ) -> anyhow::Result<Arc<FilterCollection>> {
        if self.collections.contains_key(collection.name()) {
            anyhow::bail!("filter collection '{}' already exists", collection.name());
        }

        let collection = Arc::new(collection);
        self.collections
            .insert(collection.name().to_string(), Arc::clone(&collection));
        Ok(collection)
    }

    /// Remove a user-defined collection; built-in collections cannot be removed.
    pub fn remove(&mut self, name: &str) -> anyhow::Result<Arc<FilterCollection>> {
        let collection = self.try_get(name)?;
        if collection.is_built_in() {
            anyhow::bail!("filter collection '{}' is built in and cannot be deleted", name);
        }

        self.collections.remove(name);
        Ok(collection)
    }

    pub fn collections(&self) -> impl Iterator<Item = &Arc<FilterCollection>> {
        self.collections.values()
    }

    /// Collections scoped to `project` or to every project.
    pub fn applicable_to<'s>(
        &'s self,
        project: &'s str,
    ) -> impl Iterator<Item = &'s Arc<FilterCollection>> {
        self.collections().filter(move |collection| collection.applies_to(project))
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

/// Where collections live between runs
pub trait FilterStore {
    /// Read the persisted collections, falling back to the default store.
    fn load(&self) -> FilterCollectionStore;

    fn save(&self, store: &FilterCollectionStore) -> anyhow::Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    collections: Vec<CollectionRecord>,
}

/// Collections stored as one pretty-printed JSON document
#[derive(Debug, Clone, new)]
pub struct JsonFilterStore {
    path: Box<Path>,
}

impl JsonFilterStore {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut backup = OsString::from(self.path.as_os_str());
        backup.push(BACKUP_SUFFIX);
        PathBuf::from(backup)
    }

    fn read_document(&self) -> anyhow::Result<StoreDocument> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read filter store at {:?}", self.path))?;

        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse filter store at {:?}", self.path))
    }
}

impl FilterStore for JsonFilterStore {
    fn load(&self) -> FilterCollectionStore {
        if !self.path.exists() {
            debug!(path = ?self.path, "no filter store yet, using defaults");
            return FilterCollectionStore::with_defaults();
        }

        match self.read_document() {
            Ok(document) => FilterCollectionStore::from_records(&document.collections),
            Err(error) => {
                warn!("using default filter collections: {:#}", error);
                FilterCollectionStore::with_defaults()
            }
        }
    }

    fn save(&self, store: &FilterCollectionStore) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create parent directories for filter store at {:?}", self.path)
            })?;
        }

        if self.path.exists() {
            std::fs::rename(&self.path, self.backup_path())
                .with_context(|| format!("failed to back up filter store at {:?}", self.path))?;
        }

        let document = StoreDocument {
            collections: store.to_records(),
        };
        let content = serde_json::to_string_pretty(&document)?;

        let mut store_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| format!("failed to open filter store at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut store_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(content.as_bytes())?;

        debug!(path = ?self.path, collections = store.len(), "saved filter store");
        Ok(())
    }
}

/// Collections held in memory; clones share the same records
#[derive(Debug, Clone, Default)]
pub struct MemoryFilterStore {
    records: Rc<RefCell<Vec<CollectionRecord>>>,
}

impl MemoryFilterStore {
    pub fn new(records: Vec<CollectionRecord>) -> Self {
        Self {
            records: Rc::new(RefCell::new(records)),
        }
    }

    /// The records as last saved.
    pub fn records(&self) -> Vec<CollectionRecord> {
        self.records.borrow().clone()
    }
}

impl FilterStore for MemoryFilterStore {
    fn load(&self) -> FilterCollectionStore {
        FilterCollectionStore::from_records(&self.records.borrow())
    }

    fn save(&self, store: &FilterCollectionStore) -> anyhow::Result<()> {
        *self.records.borrow_mut() = store.to_records();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::filter::filter::Filter;
    use crate::artifacts::filter::filter_kind::FilterKind;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    fn json_store(dir: &TempDir) -> JsonFilterStore {
        JsonFilterStore::new(dir.path().join("nested").join("filters.json").into_boxed_path())
    }

    fn names(store: &FilterCollectionStore) -> Vec<String> {
        store.collections().map(|collection| collection.name().to_string()).collect()
    }

    #[rstest]
    fn missing_store_falls_back_to_all_files(store_dir: TempDir) {
        let store = json_store(&store_dir).load();

        assert_eq!(names(&store), vec![ALL_FILES_COLLECTION]);
        let all_files = store.try_get(ALL_FILES_COLLECTION).unwrap();
        assert!(all_files.is_built_in());
        assert_eq!(all_files.filter_count(), 0);
    }

    #[rstest]
    fn corrupt_store_falls_back_to_all_files(store_dir: TempDir) {
        let file = store_dir.child("filters.json");
        file.write_str("{ not json").unwrap();

        let store = JsonFilterStore::new(file.path().into()).load();

        assert_eq!(names(&store), vec![ALL_FILES_COLLECTION]);
    }

    #[rstest]
    fn saves_and_reloads_collections(store_dir: TempDir) {
        let json = json_store(&store_dir);
        let mut store = json.load();
        let java =
            FilterCollection::new("Java", false, CollectionScope::Project("core".to_string()));
        java.add_filter(Filter::new(FilterKind::Extension, "java", true));
        java.add_filter(Filter::new(FilterKind::CheckedInAfter, "2014-01-01T00:00:00Z", false));
        store.insert(java).unwrap();

        json.save(&store).unwrap();
        let reloaded = json.load();

        assert_eq!(reloaded.to_records(), store.to_records());
        assert_eq!(names(&reloaded), vec![ALL_FILES_COLLECTION, "Java"]);
    }

    #[rstest]
    fn second_save_keeps_a_backup(store_dir: TempDir) {
        let json = json_store(&store_dir);
        let mut store = json.load();
        json.save(&store).unwrap();
        store
            .insert(FilterCollection::new("Later", false, CollectionScope::Global))
            .unwrap();

        json.save(&store).unwrap();

        let backup = std::fs::read_to_string(json.backup_path()).unwrap();
        assert!(!backup.contains("Later"));
        assert!(std::fs::read_to_string(json.path()).unwrap().contains("Later"));
    }

    #[test]
    fn built_in_collections_cannot_be_removed() {
        let mut store = FilterCollectionStore::with_defaults();

        assert!(store.remove(ALL_FILES_COLLECTION).is_err());
        assert!(store.remove("Nothing").is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn names_are_unique() {
        let mut store = FilterCollectionStore::with_defaults();

        assert!(
            store
                .insert(FilterCollection::new(ALL_FILES_COLLECTION, false, CollectionScope::Global))
                .is_err()
        );
    }

    #[test]
    fn lists_collections_for_a_project() {
        let mut store = FilterCollectionStore::with_defaults();
        store
            .insert(FilterCollection::new(
                "Core only",
                false,
                CollectionScope::Project("core".to_string()),
            ))
            .unwrap();

        let core: Vec<&str> = store.applicable_to("core").map(|c| c.name()).collect();
        let web: Vec<&str> = store.applicable_to("web").map(|c| c.name()).collect();

        assert_eq!(core, vec![ALL_FILES_COLLECTION, "Core only"]);
        assert_eq!(web, vec![ALL_FILES_COLLECTION]);
    }

    #[test]
    fn memory_store_seeds_from_records_and_keeps_saves() {
        let seeded = CollectionRecord::new(
            "Seeded".to_string(),
            false,
            CollectionScope::Global,
            vec![],
        );
        let memory = MemoryFilterStore::new(vec![seeded]);
        let mut store = memory.load();
        assert_eq!(names(&store), vec![ALL_FILES_COLLECTION, "Seeded"]);

        store.remove("Seeded").unwrap();
        memory.clone().save(&store).unwrap();

        assert_eq!(names(&memory.load()), vec![ALL_FILES_COLLECTION]);
        assert_eq!(memory.records().len(), 1);
    }
}
