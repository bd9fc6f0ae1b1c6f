pub mod catalog;
pub mod config;
pub mod error;
pub mod quiz;

pub use catalog::{Catalog, CatalogStore};
pub use error::{CatalogError, ConfigError, SourceError};
pub use quiz::session::{QuizSession, QuizState};
