pub mod labels;
pub mod loader;
pub mod model;
pub mod source;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::{HashMap, HashSet};

use log::warn;

pub use loader::CatalogStore;
pub use model::{
    Animal, Category, Conservation, ConservationStatus, EcosystemRole, Habitat,
    HumanRelationProfile, HumanRelationType, SenseKind, SenseType, Senses, Stat, Stats,
    SuccessStory, Superlative, Threat,
};

/// Every parsed document, before indexing.
#[derive(Debug, Clone, Default)]
pub struct Documents {
    pub animals: Vec<Animal>,
    pub categories: Vec<Category>,
    pub habitats: Vec<Habitat>,
    pub senses: Vec<SenseType>,
    pub records: Vec<Superlative>,
    pub conservation: Conservation,
    pub human_relations: Vec<HumanRelationType>,
    pub ecosystem_roles: Vec<EcosystemRole>,
}

/// Filtered listing for one conservation status, as requested by a deep link.
#[derive(Debug, Clone)]
pub struct StatusView<'a> {
    pub status: Option<&'a ConservationStatus>,
    pub animals: Vec<&'a Animal>,
}

/// The loaded, immutable animal catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    animals: Vec<Animal>,
    index: HashMap<String, usize>,
    categories: Vec<Category>,
    habitats: Vec<Habitat>,
    senses: Vec<SenseType>,
    superlatives: Vec<Superlative>,
    conservation: Conservation,
    human_relations: Vec<HumanRelationType>,
    ecosystem_roles: Vec<EcosystemRole>,
}

impl Catalog {
    pub fn from_documents(documents: Documents) -> Self {
        let animals = sanitize(documents.animals);
        let index = animals
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();

        Self {
            animals,
            index,
            categories: documents.categories,
            habitats: documents.habitats,
            senses: documents.senses,
            superlatives: documents.records,
            conservation: documents.conservation,
            human_relations: documents.human_relations,
            ecosystem_roles: documents.ecosystem_roles,
        }
    }

    pub fn from_animals(animals: Vec<Animal>) -> Self {
        Self::from_documents(Documents {
            animals,
            ..Default::default()
        })
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    pub fn animal(&self, id: &str) -> Option<&Animal> {
        self.index.get(id).map(|&i| &self.animals[i])
    }

    /// Resolves ids to animals, silently dropping ids that no longer exist.
    pub fn resolve<'a, I, S>(&'a self, ids: I) -> Vec<&'a Animal>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .filter_map(|id| self.animal(id.as_ref()))
            .collect()
    }

    fn filter<F>(&self, predicate: F) -> Vec<&Animal>
    where
        F: Fn(&Animal) -> bool,
    {
        self.animals.iter().filter(|a| predicate(a)).collect()
    }

    pub fn by_class(&self, class: &str) -> Vec<&Animal> {
        self.filter(|a| a.class == class)
    }

    pub fn by_diet(&self, diet: &str) -> Vec<&Animal> {
        self.filter(|a| a.diet.as_deref() == Some(diet))
    }

    pub fn by_conservation_status(&self, status: &str) -> Vec<&Animal> {
        self.filter(|a| a.conservation_status.as_deref() == Some(status))
    }

    pub fn by_human_relation_type(&self, kind: &str) -> Vec<&Animal> {
        self.filter(|a| a.human_relation_type() == Some(kind))
    }

    pub fn by_ecosystem_role(&self, role: &str) -> Vec<&Animal> {
        self.filter(|a| a.ecosystem_role.as_deref() == Some(role))
    }

    pub fn by_habitat(&self, habitat: &str) -> Vec<&Animal> {
        self.filter(|a| a.lives_in(habitat))
    }

    pub fn by_continent(&self, continent: &str) -> Vec<&Animal> {
        self.filter(|a| a.continent.iter().any(|c| c == continent))
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&Animal> {
        self.filter(|a| a.tags.iter().any(|t| t == tag))
    }

    pub fn by_special_sense(&self, sense: &str) -> Vec<&Animal> {
        self.filter(|a| a.has_special_sense(sense))
    }

    /// Animals whose danger level lies in `min..=max`. Animals without a
    /// known danger level never match.
    pub fn by_danger_level(&self, min: u8, max: u8) -> Vec<&Animal> {
        self.filter(|a| matches!(a.danger_level(), Some(d) if d >= min && d <= max))
    }

    pub fn related_animals(&self, id: &str) -> Vec<&Animal> {
        match self.animal(id) {
            Some(animal) => self.resolve(&animal.related_animals),
            None => Vec::new(),
        }
    }

    /// Every animal with a measured (positive) value for `stat`, highest
    /// first. Ties keep collection order.
    pub fn ranked_by(&self, stat: Stat) -> Vec<&Animal> {
        let mut ranked = self.filter(|a| a.stat(stat) > 0.0);
        ranked.sort_by(|a, b| b.stat(stat).total_cmp(&a.stat(stat)));
        ranked
    }

    pub fn top_by(&self, stat: Stat, limit: usize) -> Vec<&Animal> {
        let mut ranked = self.ranked_by(stat);
        ranked.truncate(limit);
        ranked
    }

    pub fn top_by_speed(&self, limit: usize) -> Vec<&Animal> {
        self.top_by(Stat::Speed, limit)
    }

    pub fn top_by_weight(&self, limit: usize) -> Vec<&Animal> {
        self.top_by(Stat::Weight, limit)
    }

    pub fn top_by_lifespan(&self, limit: usize) -> Vec<&Animal> {
        self.top_by(Stat::Lifespan, limit)
    }

    /// Case-insensitive name search, ordered by name. An empty query lists
    /// every animal.
    pub fn search(&self, query: &str) -> Vec<&Animal> {
        let needle = query.trim().to_lowercase();
        let mut found = self.filter(|a| a.display_name().to_lowercase().contains(&needle));
        found.sort_by_key(|a| a.display_name().to_lowercase());
        found
    }

    /// Map view: both filters apply when given.
    pub fn explore(&self, continent: Option<&str>, habitat: Option<&str>) -> Vec<&Animal> {
        self.filter(|a| {
            continent.map_or(true, |c| a.continent.iter().any(|x| x == c))
                && habitat.map_or(true, |h| a.lives_in(h))
        })
    }

    /// First `limit` animals of a continent by id, so the same animals are
    /// shown on every call.
    pub fn continent_highlights(&self, continent: &str, limit: usize) -> Vec<&Animal> {
        let mut animals = self.by_continent(continent);
        animals.sort_by(|a, b| a.id.cmp(&b.id));
        animals.truncate(limit);
        animals
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn habitats(&self) -> &[Habitat] {
        &self.habitats
    }

    pub fn habitat(&self, id: &str) -> Option<&Habitat> {
        self.habitats.iter().find(|h| h.id == id)
    }

    pub fn senses(&self) -> &[SenseType] {
        &self.senses
    }

    pub fn sense(&self, id: &str) -> Option<&SenseType> {
        self.senses.iter().find(|s| s.id == id)
    }

    pub fn animals_with_sense(&self, sense_id: &str) -> Vec<&Animal> {
        self.sense(sense_id)
            .map(|s| self.resolve(&s.animals))
            .unwrap_or_default()
    }

    pub fn superlatives(&self) -> &[Superlative] {
        &self.superlatives
    }

    pub fn superlative(&self, id: &str) -> Option<&Superlative> {
        self.superlatives.iter().find(|r| r.id == id)
    }

    pub fn superlatives_in(&self, category: &str) -> Vec<&Superlative> {
        self.superlatives
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Distinct superlative categories in first-seen order.
    pub fn superlative_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.superlatives
            .iter()
            .map(|r| r.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Holder and runners-up of a superlative. Either side may be missing if
    /// the ids are stale.
    pub fn superlative_holders(&self, id: &str) -> Option<(Option<&Animal>, Vec<&Animal>)> {
        let record = self.superlative(id)?;
        let holder = record.animal_id.as_deref().and_then(|a| self.animal(a));
        Some((holder, self.resolve(&record.runners_up)))
    }

    pub fn conservation_statuses(&self) -> &[ConservationStatus] {
        &self.conservation.statuses
    }

    pub fn conservation_status(&self, id: &str) -> Option<&ConservationStatus> {
        self.conservation.statuses.iter().find(|s| s.id == id)
    }

    pub fn threats(&self) -> &[Threat] {
        &self.conservation.threats
    }

    pub fn threatened_by(&self, threat_id: &str) -> Vec<&Animal> {
        self.conservation
            .threats
            .iter()
            .find(|t| t.id == threat_id)
            .map(|t| self.resolve(&t.affected_animals))
            .unwrap_or_default()
    }

    pub fn success_stories(&self) -> &[SuccessStory] {
        &self.conservation.success_stories
    }

    /// Deep-link target for a conservation status. Unknown ids and statuses
    /// without animals give an empty listing.
    pub fn status_view(&self, status_id: &str) -> StatusView<'_> {
        StatusView {
            status: self.conservation_status(status_id),
            animals: self.by_conservation_status(status_id),
        }
    }

    pub fn human_relations(&self) -> &[HumanRelationType] {
        &self.human_relations
    }

    pub fn human_relation(&self, id: &str) -> Option<&HumanRelationType> {
        self.human_relations.iter().find(|r| r.id == id)
    }

    pub fn relation_examples(&self, relation_id: &str) -> Vec<&Animal> {
        self.human_relation(relation_id)
            .map(|r| self.resolve(&r.examples))
            .unwrap_or_default()
    }

    pub fn ecosystem_roles(&self) -> &[EcosystemRole] {
        &self.ecosystem_roles
    }

    pub fn ecosystem_role(&self, id: &str) -> Option<&EcosystemRole> {
        self.ecosystem_roles.iter().find(|r| r.id == id)
    }

    pub fn role_examples(&self, role_id: &str) -> Vec<&Animal> {
        self.ecosystem_role(role_id)
            .map(|r| self.resolve(&r.examples))
            .unwrap_or_default()
    }
}

/// Drops duplicate ids and out-of-range values so the rest of the catalog can
/// rely on them.
fn sanitize(animals: Vec<Animal>) -> Vec<Animal> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(animals.len());

    for mut animal in animals {
        if !seen.insert(animal.id.clone()) {
            warn!("Duplicate animal id {:?}, keeping the first entry", animal.id);
            continue;
        }

        for stat in Stat::ALL {
            let slot = animal.stats.slot(stat);
            if matches!(*slot, Some(v) if !(v >= 0.0)) {
                warn!(
                    "{}: invalid {:?} {:?}, treating as unknown",
                    animal.id, stat, slot
                );
                *slot = None;
            }
        }

        if let Some(senses) = animal.senses.as_mut() {
            let max = i64::from(model::MAX_SENSE_RATING);
            for kind in SenseKind::ALL {
                let slot = senses.slot(kind);
                match *slot {
                    Some(v) if v < 0 => {
                        warn!(
                            "{}: negative {:?} rating {}, treating as unknown",
                            animal.id, kind, v
                        );
                        *slot = None;
                    }
                    Some(v) if v > max => {
                        warn!(
                            "{}: {:?} rating {} clamped to {}",
                            animal.id, kind, v, max
                        );
                        *slot = Some(max);
                    }
                    _ => {}
                }
            }
        }

        if let Some(relation) = animal.human_relation.as_mut() {
            if matches!(relation.danger_level, Some(d) if !(1..=5).contains(&d)) {
                warn!(
                    "{}: danger level {:?} out of range, treating as unknown",
                    animal.id, relation.danger_level
                );
                relation.danger_level = None;
            }
        }

        kept.push(animal);
    }

    kept
}
