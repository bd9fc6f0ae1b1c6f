use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::SourceError;

pub const ANIMALS: &str = "animals.json";
pub const CATEGORIES: &str = "categories.json";
pub const HABITATS: &str = "habitats.json";
pub const SENSES: &str = "senses.json";
pub const RECORDS: &str = "records.json";
pub const CONSERVATION: &str = "conservation.json";
pub const HUMAN_RELATIONS: &str = "human-relations.json";
pub const ECOSYSTEM_ROLES: &str = "ecosystem-roles.json";

/// Where catalog documents come from. One `fetch` per document.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    async fn fetch(&self, document: &str) -> Result<String, SourceError>;
}

/// Reads documents from files in a data directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DataSource for DirSource {
    async fn fetch(&self, document: &str) -> Result<String, SourceError> {
        let path = self.root.join(document);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SourceError::Missing {
                document: document.to_string(),
            }),
            Err(source) => Err(SourceError::Io { path, source }),
        }
    }
}

/// Serves documents from memory. Counts fetches so callers can check how
/// much I/O a load performed.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
    fetches: std::sync::atomic::AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, document: &str, text: impl Into<String>) -> Self {
        self.documents.insert(document.to_string(), text.into());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(std::sync::atomic::Ordering::Relaxed)
    }
}

impl DataSource for MemorySource {
    async fn fetch(&self, document: &str) -> Result<String, SourceError> {
        self.fetches.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.documents
            .get(document)
            .cloned()
            .ok_or_else(|| SourceError::Missing {
                document: document.to_string(),
            })
    }
}

