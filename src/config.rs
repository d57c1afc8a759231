use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs::File, io::BufReader, path::Path, time::Duration};

use crate::text::{
    default_gender_table, default_person2_table, default_person_table, PersonShift,
    SubstitutionTable,
};
use crate::{Error, InternalResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_max_recursion_depth")]
    pub max_recursion_depth: usize,

    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    #[serde(default = "default_max_duration", with = "duration_ms")]
    pub max_duration: Duration,

    #[serde(default = "default_recursion_fallback")]
    pub recursion_fallback: String,

    #[serde(default)]
    pub fallback_response: String,

    #[serde(default)]
    pub default_predicate_value: String,

    #[serde(default = "default_topic")]
    pub default_topic: String,

    #[serde(default = "default_sentence_splitters")]
    pub sentence_splitters: Vec<String>,

    #[serde(default)]
    pub bot_properties: HashMap<String, String>,

    #[serde(default = "default_true")]
    pub support_deprecated_tags: bool,

    #[serde(default)]
    pub random_seed: Option<u64>,

    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_max_history")]
    pub max_history: usize,

    #[serde(default)]
    pub substitutions: SubstitutionConfig,
}

/// Substitution tables. `input` runs over raw user input before sentence
/// splitting and is empty unless configured. A pronoun table left out falls
/// back to the built-in one.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SubstitutionConfig {
    #[serde(default)]
    pub input: SubstitutionTable,
    #[serde(default)]
    pub person: Option<SubstitutionTable>,
    #[serde(default)]
    pub person2: Option<SubstitutionTable>,
    #[serde(default)]
    pub gender: Option<SubstitutionTable>,
}

impl SubstitutionConfig {
    pub fn person_table(&self, direction: PersonShift) -> &SubstitutionTable {
        match direction {
            PersonShift::FirstThird => self.person.as_ref().unwrap_or(default_person_table()),
            PersonShift::FirstSecond => self.person2.as_ref().unwrap_or(default_person2_table()),
        }
    }

    pub fn gender_table(&self) -> &SubstitutionTable {
        self.gender.as_ref().unwrap_or(default_gender_table())
    }
}

fn default_max_recursion_depth() -> usize {
    16
}

fn default_max_steps() -> usize {
    10_000
}

fn default_max_duration() -> Duration {
    Duration::from_millis(2000)
}

fn default_recursion_fallback() -> String {
    "[recursion limit reached]".to_string()
}

fn default_topic() -> String {
    "*".to_string()
}

fn default_sentence_splitters() -> Vec<String> {
    vec![".".to_string(), "!".to_string(), "?".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    "%B %d, %Y".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_max_history() -> usize {
    32
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: default_max_recursion_depth(),
            max_steps: default_max_steps(),
            max_duration: default_max_duration(),
            recursion_fallback: default_recursion_fallback(),
            fallback_response: String::new(),
            default_predicate_value: String::new(),
            default_topic: default_topic(),
            sentence_splitters: default_sentence_splitters(),
            bot_properties: HashMap::new(),
            support_deprecated_tags: default_true(),
            random_seed: None,
            date_format: default_date_format(),
            version: default_version(),
            max_history: default_max_history(),
            substitutions: SubstitutionConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        from_file(path)
    }

    pub fn with_bot_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.bot_properties.insert(name.into(), value.into());
        self
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)
        .map_err(|e| Error::Internal(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Internal(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Internal(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
