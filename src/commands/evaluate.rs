use crate::areas::workbench::Workbench;
use crate::artifacts::entity::FileEntity;
use crate::artifacts::entity::file_record::FileRecord;
use crate::artifacts::filter::criterion::display_moment;
use crate::artifacts::revision::revision_node::RevisionMap;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct EvalOptions {
    /// List the revisions of every passing file
    pub report: bool,
}

impl Workbench {
    /// Evaluate a collection against the files listed in a JSON document.
    pub fn eval(&self, collection: &str, files: &Path, opts: EvalOptions) -> anyhow::Result<()> {
        let collection = self.collections().try_get(collection)?;
        let content = std::fs::read_to_string(files)
            .with_context(|| format!("failed to read file list at {:?}", files))?;
        let files: Vec<FileRecord> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse file list at {:?}", files))?;

        let mut passed = 0;
        for file in &files {
            if opts.report {
                match self.evaluator().report(file, &collection) {
                    Some(revisions) => {
                        passed += 1;
                        writeln!(self.writer(), "{} {}", "PASS".green(), file.short_name())?;
                        self.show_revisions(&revisions)?;
                    }
                    None => writeln!(self.writer(), "{} {}", "FAIL".red(), file.short_name())?,
                }
            } else if self.evaluator().evaluate(file, &collection).passes {
                passed += 1;
                writeln!(self.writer(), "{} {}", "PASS".green(), file.short_name())?;
            } else {
                writeln!(self.writer(), "{} {}", "FAIL".red(), file.short_name())?;
            }
        }

        writeln!(
            self.writer(),
            "{} of {} file(s) pass '{}'",
            passed,
            files.len(),
            collection.name()
        )?;
        Ok(())
    }

    fn show_revisions(&self, revisions: &RevisionMap) -> anyhow::Result<()> {
        for revision in revisions.values() {
            writeln!(
                self.writer(),
                "    {:<12} {:<10} {}  {}",
                revision.path().to_string().yellow(),
                revision.editor(),
                display_moment(revision.checked_in()),
                revision.description()
            )?;
        }

        Ok(())
    }
}
