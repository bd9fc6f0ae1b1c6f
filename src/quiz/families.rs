use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::model::ECHOLOCATION;
use crate::catalog::{Animal, Catalog, Stat};
use crate::quiz::{sampling, Answer, Question};

pub const DISTRACTORS: usize = 3;

/// Superlative families skip this many top-ranked animals when picking
/// distractors so near-ties never appear next to the answer.
const RUNNER_UP_GAP: usize = 3;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum QuestionFamily {
    FastestOnLand,
    CriticallyEndangered,
    Echolocation,
    Heaviest,
    MostDangerous,
    LongestLived,
    Mammal,
    Bird,
    OceanDweller,
    FunFact,
}

/// Candidate pools for one family.
struct Pools<'a> {
    correct: Vec<&'a Animal>,
    distractors: Vec<&'a Animal>,
}

impl<'a> Pools<'a> {
    fn membership<C, D>(catalog: &'a Catalog, is_correct: C, is_distractor: D) -> Self
    where
        C: Fn(&Animal) -> bool,
        D: Fn(&Animal) -> bool,
    {
        let animals = catalog.animals();
        Self {
            correct: animals.iter().filter(|a| is_correct(*a)).collect(),
            distractors: animals.iter().filter(|a| is_distractor(*a)).collect(),
        }
    }

    /// The top-ranked animal against those ranked `gap` places or lower.
    fn superlative(catalog: &'a Catalog, stat: Stat, gap: usize) -> Self {
        let ranked = catalog.ranked_by(stat);
        Self {
            correct: ranked.first().copied().into_iter().collect(),
            distractors: ranked.iter().skip(gap.max(1)).copied().collect(),
        }
    }

    /// Distractors left once the answer itself is set aside.
    fn usable_distractors(&self) -> usize {
        let overlap = self
            .correct
            .iter()
            .any(|c| self.distractors.iter().any(|d| d.id == c.id));
        self.distractors.len() - usize::from(overlap)
    }

    fn is_eligible(&self) -> bool {
        !self.correct.is_empty() && self.usable_distractors() >= DISTRACTORS
    }
}

impl QuestionFamily {
    pub const ALL: [QuestionFamily; 10] = [
        QuestionFamily::FastestOnLand,
        QuestionFamily::CriticallyEndangered,
        QuestionFamily::Echolocation,
        QuestionFamily::Heaviest,
        QuestionFamily::MostDangerous,
        QuestionFamily::LongestLived,
        QuestionFamily::Mammal,
        QuestionFamily::Bird,
        QuestionFamily::OceanDweller,
        QuestionFamily::FunFact,
    ];

    fn pools(self, catalog: &Catalog) -> Pools<'_> {
        match self {
            QuestionFamily::FastestOnLand => Pools::superlative(catalog, Stat::Speed, 1),
            QuestionFamily::CriticallyEndangered => Pools::membership(
                catalog,
                |a| a.conservation_status.as_deref() == Some("CR"),
                |a| a.conservation_status.as_deref() == Some("LC"),
            ),
            QuestionFamily::Echolocation => Pools::membership(
                catalog,
                |a| a.has_special_sense(ECHOLOCATION),
                |a| !a.has_special_sense(ECHOLOCATION),
            ),
            QuestionFamily::Heaviest => Pools::superlative(catalog, Stat::Weight, RUNNER_UP_GAP),
            QuestionFamily::MostDangerous => Pools::membership(
                catalog,
                |a| matches!(a.danger_level(), Some(d) if d >= 4),
                |a| matches!(a.danger_level(), Some(d) if d <= 2),
            ),
            QuestionFamily::LongestLived => {
                Pools::superlative(catalog, Stat::Lifespan, RUNNER_UP_GAP)
            }
            QuestionFamily::Mammal => {
                Pools::membership(catalog, |a| a.class == "mammal", |a| a.class != "mammal")
            }
            QuestionFamily::Bird => {
                Pools::membership(catalog, |a| a.class == "bird", |a| a.class != "bird")
            }
            QuestionFamily::OceanDweller => Pools::membership(
                catalog,
                |a| a.lives_in("ocean"),
                |a| !a.habitat.is_empty() && !a.lives_in("ocean"),
            ),
            QuestionFamily::FunFact => Pools::membership(
                catalog,
                |a| !a.fun_facts.is_empty(),
                |a| !a.fun_facts.is_empty(),
            ),
        }
    }

    /// Whether the catalog can support a question of this family.
    pub fn is_eligible(self, catalog: &Catalog) -> bool {
        self.pools(catalog).is_eligible()
    }

    /// A fresh question, or `None` when the family is not eligible.
    pub fn generate<R: Rng + ?Sized>(self, catalog: &Catalog, rng: &mut R) -> Option<Question> {
        let pools = self.pools(catalog);
        if !pools.is_eligible() {
            debug!(
                "{:?} skipped: {} correct, {} distractor candidates",
                self,
                pools.correct.len(),
                pools.distractors.len()
            );
            return None;
        }

        let correct = *pools.correct.choose(rng)?;
        let candidates: Vec<&Animal> = pools
            .distractors
            .into_iter()
            .filter(|a| a.id != correct.id)
            .collect();
        let distractors = sampling::pick(&candidates, DISTRACTORS, rng);

        let mut options = vec![Answer::new(correct, true)];
        options.extend(distractors.into_iter().map(|a| Answer::new(a, false)));
        let answers = sampling::shuffled(options, rng);

        Some(Question::new(
            self,
            self.text(correct),
            answers,
            self.explanation(correct),
        ))
    }

    fn text(self, correct: &Animal) -> String {
        match self {
            QuestionFamily::FastestOnLand => "Which animal is the fastest on land?".to_string(),
            QuestionFamily::CriticallyEndangered => {
                "Which of these animals is Critically Endangered?".to_string()
            }
            QuestionFamily::Echolocation => "Which animal uses echolocation?".to_string(),
            QuestionFamily::Heaviest => "Which animal is the heaviest?".to_string(),
            QuestionFamily::MostDangerous => {
                "Which animal is considered dangerous to humans?".to_string()
            }
            QuestionFamily::LongestLived => "Which animal lives the longest?".to_string(),
            QuestionFamily::Mammal => "Which of these is a mammal?".to_string(),
            QuestionFamily::Bird => "Which of these is a bird?".to_string(),
            QuestionFamily::OceanDweller => "Which animal lives in the ocean?".to_string(),
            QuestionFamily::FunFact => format!(
                "\"{}\" Which animal is this about?",
                correct.fun_facts.first().map(String::as_str).unwrap_or_default()
            ),
        }
    }

    fn explanation(self, correct: &Animal) -> String {
        let name = correct.display_name();
        match self {
            QuestionFamily::FastestOnLand => format!(
                "{} can reach {} km/h!",
                name,
                correct.stat(Stat::Speed)
            ),
            QuestionFamily::CriticallyEndangered => format!(
                "{} is classified as Critically Endangered by the IUCN.",
                name
            ),
            QuestionFamily::Echolocation => format!(
                "{} uses echolocation to navigate and find food.",
                name
            ),
            QuestionFamily::Heaviest => format!(
                "{} weighs up to {} kg!",
                name,
                grouped(correct.stat(Stat::Weight))
            ),
            QuestionFamily::MostDangerous => format!(
                "{} has a danger level of {}/5.",
                name,
                correct.danger_level().unwrap_or_default()
            ),
            QuestionFamily::LongestLived => format!(
                "{} can live up to {} years!",
                name,
                correct.stat(Stat::Lifespan)
            ),
            QuestionFamily::Mammal => format!("{} is a mammal.", name),
            QuestionFamily::Bird => format!("{} belongs to the bird class.", name),
            QuestionFamily::OceanDweller => format!("{} is found in ocean habitats.", name),
            QuestionFamily::FunFact => format!("This fact is about {}.", name),
        }
    }
}

/// Comma-grouped thousands with at most three decimals, e.g. `150,000`.
fn grouped(value: f64) -> String {
    let text = ((value * 1000.0).round() / 1000.0).to_string();
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text.as_str(), None),
    };
    let (sign, digits) = match int.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int),
    };

    let mut out = String::from(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{self, animal};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn with_speed(id: &str, speed: f64) -> Animal {
        let mut a = animal(id, "mammal");
        a.stats.speed_kmh = Some(speed);
        a
    }

    #[test]
    fn fastest_picks_the_top_speed_and_excludes_it_from_distractors() {
        let catalog = Catalog::from_animals(vec![
            with_speed("a", 10.0),
            with_speed("b", 50.0),
            with_speed("c", 30.0),
            with_speed("d", 5.0),
        ]);
        assert!(QuestionFamily::FastestOnLand.is_eligible(&catalog));

        let pools = QuestionFamily::FastestOnLand.pools(&catalog);
        assert_eq!(pools.correct.len(), 1);
        assert_eq!(pools.correct[0].id, "b");
        assert!(pools.distractors.iter().all(|a| a.id != "b"));

        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let q = QuestionFamily::FastestOnLand
                .generate(&catalog, &mut rng)
                .unwrap();
            assert_eq!(q.correct_id, "b");
            let mut ids: Vec<&str> = q.answers.iter().map(|a| a.animal_id.as_str()).collect();
            ids.sort();
            assert_eq!(ids, vec!["a", "b", "c", "d"]);
            assert_eq!(q.explanation, "b can reach 50 km/h!");
        }
    }

    #[test]
    fn speed_ties_go_to_the_earlier_animal() {
        let catalog = Catalog::from_animals(vec![
            with_speed("first", 70.0),
            with_speed("second", 70.0),
            with_speed("c", 1.0),
            with_speed("d", 2.0),
        ]);
        let pools = QuestionFamily::FastestOnLand.pools(&catalog);
        assert_eq!(pools.correct[0].id, "first");
    }

    #[test]
    fn unmeasured_speeds_do_not_count() {
        let catalog = Catalog::from_animals(vec![
            with_speed("a", 10.0),
            with_speed("b", 50.0),
            with_speed("c", 30.0),
            with_speed("zero", 0.0),
            animal("unknown", "mammal"),
        ]);
        assert!(!QuestionFamily::FastestOnLand.is_eligible(&catalog));
        assert!(QuestionFamily::FastestOnLand
            .generate(&catalog, &mut StdRng::seed_from_u64(0))
            .is_none());
    }

    #[test]
    fn no_critically_endangered_animals_disables_the_family() {
        let mut catalog_animals: Vec<Animal> = fixtures::zoo()
            .animals()
            .iter()
            .filter(|a| a.conservation_status.as_deref() != Some("CR"))
            .cloned()
            .collect();
        assert!(!QuestionFamily::CriticallyEndangered
            .is_eligible(&Catalog::from_animals(catalog_animals.clone())));

        catalog_animals.push({
            let mut a = animal("kakapo", "bird");
            a.conservation_status = Some("CR".into());
            a
        });
        assert!(QuestionFamily::CriticallyEndangered
            .is_eligible(&Catalog::from_animals(catalog_animals)));
    }

    #[test]
    fn superlatives_keep_runners_up_out_of_distractors() {
        let catalog = fixtures::zoo();
        let pools = QuestionFamily::Heaviest.pools(&catalog);
        assert_eq!(pools.correct[0].id, "blue_whale");
        let ids: Vec<&str> = pools.distractors.iter().map(|a| a.id.as_str()).collect();
        assert!(!ids.contains(&"crocodile"));
        assert!(!ids.contains(&"tortoise"));
        assert!(ids.contains(&"lion"));

        let pools = QuestionFamily::LongestLived.pools(&catalog);
        assert_eq!(pools.correct[0].id, "tortoise");
    }

    #[test]
    fn membership_families_draw_from_the_right_pools() {
        let catalog = fixtures::zoo();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..30 {
            let q = QuestionFamily::MostDangerous.generate(&catalog, &mut rng).unwrap();
            for answer in &q.answers {
                let danger = catalog.animal(&answer.animal_id).unwrap().danger_level().unwrap();
                assert_eq!(answer.is_correct, danger >= 4);
                assert!(danger >= 4 || danger <= 2);
            }

            let q = QuestionFamily::Echolocation.generate(&catalog, &mut rng).unwrap();
            for answer in &q.answers {
                let a = catalog.animal(&answer.animal_id).unwrap();
                assert_eq!(answer.is_correct, a.has_special_sense(ECHOLOCATION));
            }

            let q = QuestionFamily::OceanDweller.generate(&catalog, &mut rng).unwrap();
            for answer in &q.answers {
                let a = catalog.animal(&answer.animal_id).unwrap();
                assert_eq!(answer.is_correct, a.lives_in("ocean"));
            }
        }
    }

    #[test]
    fn fun_fact_quotes_the_correct_animal() {
        let catalog = fixtures::zoo();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..20 {
            let q = QuestionFamily::FunFact.generate(&catalog, &mut rng).unwrap();
            let correct = catalog.animal(&q.correct_id).unwrap();
            assert!(q.text.contains(&correct.fun_facts[0]));
            assert_eq!(q.answers.len(), 4);
            assert!(q
                .answers
                .iter()
                .all(|a| !catalog.animal(&a.animal_id).unwrap().fun_facts.is_empty()));
        }
    }

    #[test]
    fn fun_fact_needs_four_animals_with_facts() {
        let facts = |id: &str| {
            let mut a = animal(id, "mammal");
            a.fun_facts = vec![format!("{} fact", id)];
            a
        };
        let three = Catalog::from_animals(vec![facts("a"), facts("b"), facts("c")]);
        assert!(!QuestionFamily::FunFact.is_eligible(&three));

        let four = Catalog::from_animals(vec![facts("a"), facts("b"), facts("c"), facts("d")]);
        assert!(QuestionFamily::FunFact.is_eligible(&four));
    }

    #[test]
    fn empty_catalog_has_no_eligible_family() {
        let catalog = Catalog::default();
        assert!(QuestionFamily::ALL.iter().all(|f| !f.is_eligible(&catalog)));
    }

    #[test]
    fn weights_are_shown_with_thousands_separators() {
        assert_eq!(grouped(150000.0), "150,000");
        assert_eq!(grouped(190.0), "190");
        assert_eq!(grouped(1234567.25), "1,234,567.25");
        assert_eq!(grouped(0.5), "0.5");

        let catalog = fixtures::zoo();
        let q = QuestionFamily::Heaviest
            .generate(&catalog, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(q.explanation, "Blue Whale weighs up to 150,000 kg!");
    }
}
