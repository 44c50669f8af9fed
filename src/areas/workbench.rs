use crate::areas::config::Settings;
use crate::areas::evaluator::FilterEvaluator;
use crate::areas::filter_store::{FilterCollectionStore, FilterStore, JsonFilterStore};
use std::cell::{Ref, RefCell, RefMut};
use std::io::Write;

/// Everything a command needs: settings, the loaded collections and somewhere to write
pub struct Workbench {
    settings: Settings,
    store: Box<dyn FilterStore>,
    collections: RefCell<FilterCollectionStore>,
    evaluator: FilterEvaluator,
    writer: RefCell<Box<dyn Write>>,
}

impl Workbench {
    pub fn new(settings: Settings, writer: Box<dyn Write>) -> Self {
        let store = JsonFilterStore::new(settings.store_path().into());
        Self::with_store(settings, Box::new(store), writer)
    }

    pub fn with_store(
        settings: Settings,
        store: Box<dyn FilterStore>,
        writer: Box<dyn Write>,
    ) -> Self {
        let collections = store.load();

        Workbench {
            settings,
            store,
            collections: RefCell::new(collections),
            evaluator: FilterEvaluator,
            writer: RefCell::new(writer),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn collections(&self) -> Ref<'_, FilterCollectionStore> {
        self.collections.borrow()
    }

    pub fn collections_mut(&self) -> RefMut<'_, FilterCollectionStore> {
        self.collections.borrow_mut()
    }

    pub fn evaluator(&self) -> &FilterEvaluator {
        &self.evaluator
    }

    /// Write the current collections back to the store.
    pub fn persist(&self) -> anyhow::Result<()> {
        self.store.save(&self.collections.borrow())
    }
}
