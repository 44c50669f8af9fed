use crate::areas::workbench::Workbench;
use crate::artifacts::collection::filter_collection::FilterCollection;
use crate::artifacts::filter::factory::FilterFactory;
use crate::artifacts::filter::filter::Filter;
use crate::artifacts::filter::filter_kind::{Capability, FilterKind};
use colored::Colorize;
use std::sync::Arc;

impl Workbench {
    /// Print every filter kind with its capability and the data it expects.
    pub fn kinds(&self) -> anyhow::Result<()> {
        for kind in FilterKind::ALL {
            let capability = match kind.capability() {
                Capability::Entity => "file",
                Capability::Revision => "revision",
            };
            writeln!(
                self.writer(),
                "{:<50} {:<9} {}",
                kind.tag(),
                capability,
                kind.data_hint()
            )?;
        }

        Ok(())
    }

    pub fn add_filter(
        &self,
        collection: &str,
        kind: &str,
        data: &str,
        is_and_filter: bool,
    ) -> anyhow::Result<()> {
        let collection = self.editable_collection(collection)?;
        let filter = Self::build_filter(kind, data, is_and_filter)?;

        if let Some(error) = filter.error() {
            writeln!(self.writer(), "{} {}", "warning:".yellow(), error)?;
        }

        let description = filter.to_string();
        if !collection.add_filter(filter) {
            writeln!(
                self.writer(),
                "'{}' already has a filter of kind {}",
                collection.name(),
                kind
            )?;
            return Ok(());
        }
        writeln!(self.writer(), "Added {} to '{}'", description, collection.name())?;

        self.persist()
    }

    pub fn remove_filter(&self, collection: &str, kind: &str, data: &str) -> anyhow::Result<()> {
        let collection = self.editable_collection(collection)?;
        let filter = Self::build_filter(kind, data, true)?;

        if !collection.remove_filter(&filter) {
            anyhow::bail!("'{}' has no filter {}: {}", collection.name(), filter.kind(), data);
        }
        writeln!(
            self.writer(),
            "Removed {}: {} from '{}'",
            filter.kind(),
            filter.data(),
            collection.name()
        )?;

        self.persist()
    }

    fn editable_collection(&self, name: &str) -> anyhow::Result<Arc<FilterCollection>> {
        let collection = self.collections().try_get(name)?;
        if collection.is_built_in() {
            anyhow::bail!("filter collection '{}' is built in and cannot be modified", name);
        }

        Ok(collection)
    }

    fn build_filter(kind: &str, data: &str, is_and_filter: bool) -> anyhow::Result<Filter> {
        FilterFactory::build(kind, data, is_and_filter)
            .ok_or_else(|| {
                anyhow::anyhow!("unknown filter kind: {} (see `revfilter kinds`)", kind)
            })
    }
}
