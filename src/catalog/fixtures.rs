use serde::de::DeserializeOwned;

use super::{Animal, Catalog, Documents};

fn parse<T: DeserializeOwned>(text: &str) -> T {
    serde_json::from_str(text).expect("fixture document should parse")
}

/// The sample data set under `tests/data`.
pub(crate) fn zoo() -> Catalog {
    Catalog::from_documents(Documents {
        animals: parse(include_str!("../../tests/data/animals.json")),
        categories: parse(include_str!("../../tests/data/categories.json")),
        habitats: parse(include_str!("../../tests/data/habitats.json")),
        senses: parse(include_str!("../../tests/data/senses.json")),
        records: parse(include_str!("../../tests/data/records.json")),
        conservation: parse(include_str!("../../tests/data/conservation.json")),
        human_relations: parse(include_str!("../../tests/data/human-relations.json")),
        ecosystem_roles: parse(include_str!("../../tests/data/ecosystem-roles.json")),
    })
}

pub(crate) fn animal(id: &str, class: &str) -> Animal {
    Animal {
        id: id.to_string(),
        name: id.to_string(),
        class: class.to_string(),
        ..Default::default()
    }
}
