use std::path::PathBuf;

const SQLITE_SCHEME: &str = "sqlite://";
const IN_MEMORY: &str = ":memory:";

/// Where a database URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    InMemory,
    File(PathBuf),
}

impl DatabaseTarget {
    /// Accepts `sqlite://<relative path>`, `sqlite:///<absolute path>`, a bare
    /// filesystem path, or `:memory:` (optionally behind the scheme).
    ///
    /// Returns `None` for an empty path.
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();
        let path = url.strip_prefix(SQLITE_SCHEME).unwrap_or(url);
        match path {
            "" => None,
            IN_MEMORY => Some(DatabaseTarget::InMemory),
            p => Some(DatabaseTarget::File(PathBuf::from(p))),
        }
    }
}
