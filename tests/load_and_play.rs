use std::path::PathBuf;

use wildpedia::catalog::source::{self, DirSource};
use wildpedia::catalog::{CatalogStore, Stat};
use wildpedia::quiz::session::{AnswerOutcome, Phase};
use wildpedia::{CatalogError, QuizSession, SourceError};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn copy_documents(to: &std::path::Path, documents: &[&str]) {
    for document in documents {
        std::fs::copy(data_dir().join(document), to.join(document)).unwrap();
    }
}

#[tokio::test]
async fn loads_the_sample_data_directory() {
    let store = CatalogStore::new(DirSource::new(data_dir()));
    let catalog = store.load().await.unwrap();

    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog.categories().len(), 3);
    assert_eq!(catalog.habitats().len(), 3);
    assert_eq!(catalog.conservation_statuses().len(), 5);
    assert_eq!(catalog.top_by(Stat::Speed, 1)[0].id, "cheetah");
    assert!(catalog.status_view("EX").animals.is_empty());
}

#[tokio::test]
async fn optional_documents_may_be_missing() {
    let dir = tempfile::tempdir().unwrap();
    copy_documents(dir.path(), &[source::ANIMALS, source::CATEGORIES]);

    let store = CatalogStore::new(DirSource::new(dir.path()));
    let catalog = store.load().await.unwrap();
    assert_eq!(catalog.len(), 10);
    assert!(catalog.senses().is_empty());
    assert!(catalog.superlatives().is_empty());
    assert!(catalog.animals_with_sense("echolocation").is_empty());
    // membership filters still work off the animal records themselves
    assert_eq!(catalog.by_special_sense("echolocation").len(), 2);
}

#[tokio::test]
async fn missing_animals_document_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    copy_documents(dir.path(), &[source::CATEGORIES, source::HABITATS]);

    let store = CatalogStore::new(DirSource::new(dir.path()));
    match store.load().await {
        Err(CatalogError::FatalInit { document, source: cause }) => {
            assert_eq!(document, source::ANIMALS);
            assert!(matches!(cause, SourceError::Missing { .. }));
        }
        Ok(_) => panic!("catalog should not load without animals"),
    }
    assert!(store.get().is_none());
}

#[tokio::test]
async fn quiz_over_loaded_catalog() {
    let store = CatalogStore::new(DirSource::new(data_dir()));
    let catalog = store.load().await.unwrap();

    let mut session = QuizSession::seeded(2025);
    session.start(catalog);
    assert_eq!(session.total(), 10);

    while session.phase() == Phase::Active {
        let correct = session.current_question().unwrap().correct_id.clone();
        assert_eq!(session.answer(&correct), AnswerOutcome::Correct);
        assert_eq!(session.answer(&correct), AnswerOutcome::Rejected);
        session.advance();
    }

    let result = session.result().unwrap();
    assert_eq!(result.score, 10);
    assert_eq!(result.percent(), 100);

    session.restart();
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.score(), 0);
}
