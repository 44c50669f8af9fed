use crate::areas::filter_store::FilterCollectionStore;
use crate::areas::workbench::Workbench;
use crate::artifacts::collection::collection_scope::CollectionScope;
use crate::artifacts::collection::filter_collection::FilterCollection;
use colored::Colorize;

impl Workbench {
    /// List collections, optionally only those that apply to `project`.
    pub fn list(&self, project: Option<&str>) -> anyhow::Result<()> {
        let collections = self.collections();

        for collection in collections.collections() {
            if project.is_some_and(|project| !collection.applies_to(project)) {
                continue;
            }

            let built_in = if collection.is_built_in() {
                " (built-in)"
            } else {
                ""
            };
            writeln!(
                self.writer(),
                "{} [{}] {} filter(s){}",
                collection.name().bold(),
                collection.scope(),
                collection.filter_count(),
                built_in
            )?;
        }

        Ok(())
    }

    pub fn show(&self, name: &str) -> anyhow::Result<()> {
        let collection = self.collections().try_get(name)?;

        writeln!(self.writer(), "{} [{}]", collection.name().bold(), collection.scope())?;
        for (position, filter) in collection.list_filters().iter().enumerate() {
            match filter.error() {
                Some(_) => writeln!(
                    self.writer(),
                    "  {}. {} {}",
                    position + 1,
                    filter,
                    "(invalid)".red()
                )?,
                None => writeln!(self.writer(), "  {}. {}", position + 1, filter)?,
            }
        }

        Ok(())
    }

    pub fn create(&self, name: &str, project: Option<String>) -> anyhow::Result<()> {
        let collection = FilterCollection::new(name, false, CollectionScope::for_project(project));
        self.collections_mut().insert(collection)?;
        self.persist()?;

        writeln!(self.writer(), "Created filter collection '{}'", name)?;
        Ok(())
    }

    /// Copy `source` under a new name; the copy keeps the source's scope unless `project` is
    /// given.
    pub fn copy(
        &self,
        source: &str,
        destination: &str,
        project: Option<String>,
    ) -> anyhow::Result<()> {
        let source = self.collections().try_get(source)?;
        let scope = match project {
            Some(project) => CollectionScope::for_project(Some(project)),
            None => source.scope().clone(),
        };

        let copy = FilterCollection::copy_from(destination, scope, &source);
        self.collections_mut().insert(copy)?;
        self.persist()?;

        writeln!(
            self.writer(),
            "Copied filter collection '{}' to '{}'",
            source.name(),
            destination
        )?;
        Ok(())
    }

    pub fn delete(&self, name: &str) -> anyhow::Result<()> {
        self.collections_mut().remove(name)?;
        self.persist()?;

        writeln!(self.writer(), "Deleted filter collection '{}'", name)?;
        Ok(())
    }

    /// Drop every user-defined collection.
    pub fn reset(&self) -> anyhow::Result<()> {
        *self.collections_mut() = FilterCollectionStore::with_defaults();
        self.persist()?;

        writeln!(self.writer(), "Restored the default filter collections")?;
        Ok(())
    }
}
