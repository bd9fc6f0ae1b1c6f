use std::path::PathBuf;

use crate::error::ConfigError;
use crate::quiz::SESSION_LENGTH;

const DATA_DIR: &str = "WILDPEDIA_DATA_DIR";
const QUIZ_LENGTH: &str = "WILDPEDIA_QUIZ_LENGTH";
const QUIZ_SEED: &str = "WILDPEDIA_QUIZ_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub quiz_length: usize,
    /// Fixed seed for reproducible quiz sessions. `None` seeds from entropy.
    pub quiz_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            quiz_length: SESSION_LENGTH,
            quiz_seed: None,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment. Call `dotenv()` first if a
    /// `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(dir) = lookup(DATA_DIR) {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(QUIZ_LENGTH) {
            let length = parse_number::<usize>(QUIZ_LENGTH, &raw)?;
            if length == 0 {
                return Err(ConfigError::Zero { key: QUIZ_LENGTH });
            }
            settings.quiz_length = length;
        }
        if let Some(raw) = lookup(QUIZ_SEED) {
            settings.quiz_seed = Some(parse_number::<u64>(QUIZ_SEED, &raw)?);
        }

        Ok(settings)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: raw.to_string(),
    })
}
