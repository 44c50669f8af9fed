use crate::artifacts::collection::collection_scope::CollectionScope;
use crate::artifacts::filter::factory::{FilterFactory, FilterRecord};
use crate::artifacts::filter::filter::Filter;
use crate::artifacts::filter::filter_kind::FilterKind;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// A collection as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct CollectionRecord {
    pub name: String,
    #[serde(default)]
    pub built_in: bool,
    #[serde(default)]
    pub scope: CollectionScope,
    #[serde(default)]
    pub filters: Vec<FilterRecord>,
}

/// A named, ordered set of filters.
///
/// The filter list may be edited while evaluations run against the same collection, so it
/// sits behind a lock and is only ever read through [`FilterCollection::list_filters`].
#[derive(Debug)]
pub struct FilterCollection {
    name: String,
    built_in: bool,
    scope: CollectionScope,
    filters: RwLock<Vec<Filter>>,
}

impl FilterCollection {
    pub fn new(name: impl Into<String>, built_in: bool, scope: CollectionScope) -> Self {
        Self {
            name: name.into(),
            built_in,
            scope,
            filters: RwLock::new(Vec::new()),
        }
    }

    /// A user-defined copy of `source` under a new name; every filter is rebuilt.
    pub fn copy_from(
        name: impl Into<String>,
        scope: CollectionScope,
        source: &FilterCollection,
    ) -> Self {
        let collection = Self::new(name, false, scope);
        *collection.write_filters() = source.rebuilt_filters();
        collection
    }

    pub fn from_record(record: &CollectionRecord) -> Self {
        let collection = Self::new(record.name.clone(), record.built_in, record.scope.clone());
        for filter in record.filters.iter().filter_map(FilterFactory::from_record) {
            collection.add_filter(filter);
        }
        collection
    }

    pub fn to_record(&self) -> CollectionRecord {
        CollectionRecord::new(
            self.name.clone(),
            self.built_in,
            self.scope.clone(),
            self.list_filters().iter().map(FilterRecord::from).collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_built_in(&self) -> bool {
        self.built_in
    }

    pub fn scope(&self) -> &CollectionScope {
        &self.scope
    }

    pub fn applies_to(&self, project: &str) -> bool {
        self.scope.applies_to(project)
    }

    /// Append a filter; `false` when it was dropped as a second `Exclude obsolete files`.
    pub fn add_filter(&self, filter: Filter) -> bool {
        let mut filters = self.write_filters();
        if filter.kind() == FilterKind::ExcludeObsolete
            && filters
                .iter()
                .any(|existing| existing.kind() == FilterKind::ExcludeObsolete)
        {
            debug!(collection = %self.name, "exclude obsolete filter already present");
            return false;
        }

        filters.push(filter);
        true
    }

    /// Remove the first filter equal to `filter`; `false` when there was none.
    pub fn remove_filter(&self, filter: &Filter) -> bool {
        let mut filters = self.write_filters();
        match filters.iter().position(|existing| existing == filter) {
            Some(position) => {
                filters.remove(position);
                true
            }
            None => false,
        }
    }

    /// A snapshot of the filters, in display order.
    pub fn list_filters(&self) -> Vec<Filter> {
        self.read_filters().clone()
    }

    pub fn filter_count(&self) -> usize {
        self.read_filters().len()
    }

    fn rebuilt_filters(&self) -> Vec<Filter> {
        self.list_filters()
            .iter()
            .map(FilterFactory::rebuild)
            .collect()
    }

    fn read_filters(&self) -> RwLockReadGuard<'_, Vec<Filter>> {
        // filters are replaced whole, a panicking writer cannot leave a torn list behind
        self.filters.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_filters(&self) -> RwLockWriteGuard<'_, Vec<Filter>> {
        self.filters.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for FilterCollection {
    fn clone(&self) -> Self {
        let collection = Self::new(self.name.clone(), self.built_in, self.scope.clone());
        *collection.write_filters() = self.rebuilt_filters();
        collection
    }
}

impl std::fmt::Display for FilterCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
