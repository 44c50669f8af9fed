use serde::{Deserialize, Serialize};

const GLOBAL_SCOPE: &str = "*";

/// Which projects a collection applies to
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CollectionScope {
    #[default]
    Global,
    Project(String),
}

impl CollectionScope {
    /// `None` means every project.
    pub fn for_project(project: Option<String>) -> Self {
        match project {
            Some(project) if project != GLOBAL_SCOPE => CollectionScope::Project(project),
            _ => CollectionScope::Global,
        }
    }

    pub fn applies_to(&self, project: &str) -> bool {
        match self {
            CollectionScope::Global => true,
            CollectionScope::Project(name) => name == project,
        }
    }
}

impl From<String> for CollectionScope {
    fn from(scope: String) -> Self {
        Self::for_project(Some(scope))
    }
}

impl From<CollectionScope> for String {
    fn from(scope: CollectionScope) -> Self {
        match scope {
            CollectionScope::Global => GLOBAL_SCOPE.to_string(),
            CollectionScope::Project(name) => name,
        }
    }
}

impl std::fmt::Display for CollectionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionScope::Global => write!(f, "all projects"),
            CollectionScope::Project(name) => write!(f, "{}", name),
        }
    }
}
