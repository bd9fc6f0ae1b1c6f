use serde::{Deserialize, Deserializer, Serialize};

/// Numeric stats tracked per animal. Zero and absent both mean "unmeasured".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Speed,
    Weight,
    Lifespan,
    Height,
}

impl Stat {
    pub const ALL: [Stat; 4] = [Stat::Speed, Stat::Weight, Stat::Lifespan, Stat::Height];

    pub fn unit(self) -> &'static str {
        match self {
            Stat::Speed => "km/h",
            Stat::Weight => "kg",
            Stat::Lifespan => "years",
            Stat::Height => "cm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenseKind {
    Vision,
    Hearing,
    Smell,
    Taste,
    Touch,
}

impl SenseKind {
    pub const ALL: [SenseKind; 5] = [
        SenseKind::Vision,
        SenseKind::Hearing,
        SenseKind::Smell,
        SenseKind::Taste,
        SenseKind::Touch,
    ];
}

pub const MAX_SENSE_RATING: u8 = 5;
pub const ECHOLOCATION: &str = "echolocation";

/// Treats an explicit `null` list the same as a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub speed_kmh: Option<f64>,
    pub weight_kg: Option<f64>,
    pub lifespan_years: Option<f64>,
    pub height_cm: Option<f64>,
}

impl Stats {
    pub fn get(&self, stat: Stat) -> Option<f64> {
        match stat {
            Stat::Speed => self.speed_kmh,
            Stat::Weight => self.weight_kg,
            Stat::Lifespan => self.lifespan_years,
            Stat::Height => self.height_cm,
        }
    }

    pub(crate) fn slot(&mut self, stat: Stat) -> &mut Option<f64> {
        match stat {
            Stat::Speed => &mut self.speed_kmh,
            Stat::Weight => &mut self.weight_kg,
            Stat::Lifespan => &mut self.lifespan_years,
            Stat::Height => &mut self.height_cm,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Senses {
    /// Raw 0-5 ratings. Out-of-range values are corrected when the catalog
    /// is built.
    pub vision: Option<i64>,
    pub hearing: Option<i64>,
    pub smell: Option<i64>,
    pub taste: Option<i64>,
    pub touch: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub special: Vec<String>,
}

impl Senses {
    pub fn get(&self, kind: SenseKind) -> Option<u8> {
        let raw = match kind {
            SenseKind::Vision => self.vision,
            SenseKind::Hearing => self.hearing,
            SenseKind::Smell => self.smell,
            SenseKind::Taste => self.taste,
            SenseKind::Touch => self.touch,
        };
        raw.and_then(|v| u8::try_from(v).ok())
    }

    pub(crate) fn slot(&mut self, kind: SenseKind) -> &mut Option<i64> {
        match kind {
            SenseKind::Vision => &mut self.vision,
            SenseKind::Hearing => &mut self.hearing,
            SenseKind::Smell => &mut self.smell,
            SenseKind::Taste => &mut self.taste,
            SenseKind::Touch => &mut self.touch,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanRelationProfile {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// 1 (harmless) to 5 (extreme). Anything else is dropped when the
    /// catalog is built.
    pub danger_level: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub emoji: Option<String>,
    #[serde(default)]
    pub class: String,
    pub diet: Option<String>,
    pub conservation_status: Option<String>,
    pub scientific_name: Option<String>,
    pub ecosystem_role: Option<String>,
    #[serde(default)]
    pub stats: Stats,
    pub senses: Option<Senses>,
    pub human_relation: Option<HumanRelationProfile>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fun_facts: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub habitat: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub continent: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub related_animals: Vec<String>,
}

impl Animal {
    /// Name shown to players, falling back to the id for unnamed entries.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Stat value, 0 when unmeasured.
    pub fn stat(&self, stat: Stat) -> f64 {
        self.stats.get(stat).unwrap_or(0.0)
    }

    /// Sense rating, 0 when unknown.
    pub fn sense(&self, kind: SenseKind) -> u8 {
        self.senses
            .as_ref()
            .and_then(|s| s.get(kind))
            .unwrap_or(0)
    }

    pub fn special_senses(&self) -> &[String] {
        self.senses
            .as_ref()
            .map(|s| s.special.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_special_sense(&self, sense: &str) -> bool {
        self.special_senses().iter().any(|s| s == sense)
    }

    /// Five ratings as a share of the 25-point maximum, plus 10 per special
    /// ability. Not clamped: special abilities can push it past 100.
    pub fn overall_sense_score(&self) -> u32 {
        if self.senses.is_none() {
            return 0;
        }
        let total: u32 = SenseKind::ALL.iter().map(|k| self.sense(*k) as u32).sum();
        let max = (SenseKind::ALL.len() as u32 * MAX_SENSE_RATING as u32) as f64;
        let base = (total as f64 / max) * 100.0;
        let bonus = self.special_senses().len() as f64 * 10.0;
        (base + bonus).round() as u32
    }

    pub fn danger_level(&self) -> Option<u8> {
        self.human_relation
            .as_ref()
            .and_then(|r| r.danger_level)
            .and_then(|d| u8::try_from(d).ok())
    }

    pub fn human_relation_type(&self) -> Option<&str> {
        self.human_relation.as_ref().and_then(|r| r.kind.as_deref())
    }

    pub fn lives_in(&self, habitat: &str) -> bool {
        self.habitat.iter().any(|h| h == habitat)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name_key: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub page: Option<String>,
    pub link_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habitat {
    pub id: String,
    pub name_key: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseType {
    pub id: String,
    pub name_key: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub human_equivalent: Option<String>,
    pub how_it_works_key: Option<String>,
    #[serde(default)]
    pub animals: Vec<String>,
}

/// A superlative such as "fastest diver": one holder plus runners-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Superlative {
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub name_key: Option<String>,
    pub description_key: Option<String>,
    pub animal_id: Option<String>,
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub runners_up: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConservationStatus {
    pub id: String,
    pub name_key: Option<String>,
    pub color: Option<String>,
    pub description_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threat {
    pub id: String,
    pub name_key: Option<String>,
    pub icon: Option<String>,
    pub description_key: Option<String>,
    #[serde(default)]
    pub affected_animals: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessStory {
    pub animal_id: String,
    pub from_status: Option<String>,
    pub to_status: Option<String>,
    pub year: Option<i32>,
    pub description_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conservation {
    #[serde(default)]
    pub statuses: Vec<ConservationStatus>,
    #[serde(default)]
    pub threats: Vec<Threat>,
    #[serde(default)]
    pub success_stories: Vec<SuccessStory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanRelationType {
    pub id: String,
    pub name_key: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description_key: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcosystemRole {
    pub id: String,
    pub name_key: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description_key: Option<String>,
    pub importance_key: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}
