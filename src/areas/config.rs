use anyhow::Context;
use derive_new::new;
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};

/// Overrides the filter store location
pub const STORE_ENV: &str = "REVFILTER_STORE";

/// Log filter directives for the command-line front end
pub const LOG_ENV: &str = "REVFILTER_LOG";

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Store location relative to the current directory
pub const DEFAULT_STORE_PATH: &str = ".revfilter/filters.json";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Settings {
    store_path: PathBuf,
    color: bool,
}

impl Settings {
    /// Resolve settings from the environment; `store_path` wins over `REVFILTER_STORE`.
    pub fn from_env(store_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let store_path = store_path.or_else(|| std::env::var_os(STORE_ENV).map(PathBuf::from));
        let store_path = match store_path {
            Some(path) => path,
            None => std::env::current_dir()
                .context("failed to resolve the current directory")?
                .join(DEFAULT_STORE_PATH),
        };
        let color = std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();

        Ok(Self::new(store_path, color))
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn color(&self) -> bool {
        self.color
    }
}
