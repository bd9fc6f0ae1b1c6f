use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use super::model::{
    Animal, Category, Conservation, EcosystemRole, Habitat, HumanRelationType, SenseType,
    Superlative,
};
use super::source::{self, DataSource};
use super::{Catalog, Documents};
use crate::error::{CatalogError, SourceError};

/// Owns the data source and the catalog it produces. The catalog is fetched
/// on the first `load` and shared afterwards.
pub struct CatalogStore<S> {
    source: S,
    catalog: OnceCell<Catalog>,
}

impl<S: DataSource> CatalogStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: OnceCell::new(),
        }
    }

    /// Fetches every document on the first call. Later calls return the same
    /// catalog without touching the source. A failed load leaves the store
    /// empty.
    pub async fn load(&self) -> Result<&Catalog, CatalogError> {
        self.catalog
            .get_or_try_init(|| Catalog::load(&self.source))
            .await
    }

    /// The catalog, if a load has completed.
    pub fn get(&self) -> Option<&Catalog> {
        self.catalog.get()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl Catalog {
    /// Fetches all documents concurrently. Only the animal and category
    /// documents are required.
    pub async fn load<S: DataSource>(source: &S) -> Result<Catalog, CatalogError> {
        let (animals, categories, habitats, senses, records, conservation, relations, roles) =
            tokio::join!(
                required::<Vec<Animal>, _>(source, source::ANIMALS),
                required::<Vec<Category>, _>(source, source::CATEGORIES),
                optional::<Vec<Habitat>, _>(source, source::HABITATS),
                optional::<Vec<SenseType>, _>(source, source::SENSES),
                optional::<Vec<Superlative>, _>(source, source::RECORDS),
                optional::<Conservation, _>(source, source::CONSERVATION),
                optional::<Vec<HumanRelationType>, _>(source, source::HUMAN_RELATIONS),
                optional::<Vec<EcosystemRole>, _>(source, source::ECOSYSTEM_ROLES),
            );

        let catalog = Catalog::from_documents(Documents {
            animals: animals?,
            categories: categories?,
            habitats,
            senses,
            records,
            conservation,
            human_relations: relations,
            ecosystem_roles: roles,
        });

        info!(
            "Catalog loaded: {} animals, {} categories",
            catalog.len(),
            catalog.categories().len()
        );
        Ok(catalog)
    }
}

async fn fetch_json<T, S>(source: &S, document: &str) -> Result<T, SourceError>
where
    T: DeserializeOwned,
    S: DataSource,
{
    let text = source.fetch(document).await?;
    serde_json::from_str(&text).map_err(|e| SourceError::Parse {
        document: document.to_string(),
        source: e,
    })
}

async fn required<T, S>(source: &S, document: &'static str) -> Result<T, CatalogError>
where
    T: DeserializeOwned,
    S: DataSource,
{
    fetch_json(source, document)
        .await
        .map_err(|e| CatalogError::FatalInit {
            document,
            source: e,
        })
}

async fn optional<T, S>(source: &S, document: &'static str) -> T
where
    T: DeserializeOwned + Default,
    S: DataSource,
{
    match fetch_json(source, document).await {
        Ok(value) => {
            debug!("Loaded optional document {}", document);
            value
        }
        Err(e) => {
            warn!("Optional data not loaded ({}): {}", document, e);
            T::default()
        }
    }
}
