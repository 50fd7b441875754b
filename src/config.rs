use crate::checker::vocabulary::Vocabulary;
use crate::highlight::BoundaryPolicy;
use crate::rules::{defaults, PatternRule};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".dxeditor.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_language")]
    pub language: String,

    /// Highlight rules in evaluation order; empty means the built-in table
    #[serde(default)]
    pub rules: Vec<PatternRule>,

    /// Known words; empty means the built-in list
    #[serde(default)]
    pub vocabulary: Vec<String>,

    /// Extra known words, one per line
    #[serde(default)]
    pub vocabulary_file: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub colors_enabled: bool,

    #[serde(default = "default_true")]
    pub suggestions_enabled: bool,

    #[serde(default = "default_true")]
    pub enforce_word_boundaries: bool,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_min_word_len")]
    pub min_word_len: usize,

    /// Words matching any of these regexes are never analysed
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_language() -> String {
    defaults::DEFAULT_LANGUAGE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_word_len() -> usize {
    2
}

fn default_endpoint() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en/".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            rules: Vec::new(),
            vocabulary: Vec::new(),
            vocabulary_file: None,
            colors_enabled: true,
            suggestions_enabled: true,
            enforce_word_boundaries: true,
            debounce_ms: default_debounce_ms(),
            min_word_len: default_min_word_len(),
            ignore_patterns: vec![
                r"^\d+$".to_string(),       // numbers
                r"^[A-Z0-9_]{2,}$".to_string(), // ALL_CAPS
            ],
            lookup: LookupConfig::default(),
        }
    }
}

/// One configuration file. Only the keys the file actually sets are `Some`,
/// so a later layer never resets what an earlier one chose.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
    pub language: Option<String>,
    pub rules: Option<Vec<PatternRule>>,
    pub vocabulary: Option<Vec<String>>,
    pub vocabulary_file: Option<PathBuf>,
    pub colors_enabled: Option<bool>,
    pub suggestions_enabled: Option<bool>,
    pub enforce_word_boundaries: Option<bool>,
    pub debounce_ms: Option<u64>,
    pub min_word_len: Option<usize>,
    pub ignore_patterns: Option<Vec<String>>,
    #[serde(default)]
    pub lookup: LookupLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupLayer {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl ConfigLayer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Command-line settings that override every file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub offline: bool,
    pub lenient_boundaries: bool,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.apply(ConfigLayer::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config.apply(ConfigLayer::from_file(&local_path)?);
        }

        if let Some(language) = overrides.language {
            config.language = language;
        }
        if overrides.offline {
            config.lookup.enabled = false;
        }
        if overrides.lenient_boundaries {
            config.enforce_word_boundaries = false;
        }

        Ok(config)
    }

    /// Defaults with a single file applied on top.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.apply(ConfigLayer::from_file(path)?);
        Ok(config)
    }

    /// Overwrite the settings `layer` sets, keep everything else.
    pub fn apply(&mut self, layer: ConfigLayer) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut self.language, layer.language);
        set(&mut self.rules, layer.rules);
        set(&mut self.vocabulary, layer.vocabulary);
        if layer.vocabulary_file.is_some() {
            self.vocabulary_file = layer.vocabulary_file;
        }
        set(&mut self.colors_enabled, layer.colors_enabled);
        set(&mut self.suggestions_enabled, layer.suggestions_enabled);
        set(&mut self.enforce_word_boundaries, layer.enforce_word_boundaries);
        set(&mut self.debounce_ms, layer.debounce_ms);
        set(&mut self.min_word_len, layer.min_word_len);
        set(&mut self.ignore_patterns, layer.ignore_patterns);
        set(&mut self.lookup.enabled, layer.lookup.enabled);
        set(&mut self.lookup.endpoint, layer.lookup.endpoint);
        set(&mut self.lookup.timeout_ms, layer.lookup.timeout_ms);
    }

    /// Configured rules, or the built-in table for `language`
    pub fn resolved_rules(&self) -> Result<Vec<PatternRule>> {
        if !self.rules.is_empty() {
            return Ok(self.rules.clone());
        }
        defaults::rules(&self.language)
            .with_context(|| format!("Built-in rules for {} are invalid", self.language))
    }

    /// Configured vocabulary (or the built-in list) plus `vocabulary_file`
    pub fn resolved_vocabulary(&self) -> Result<Vocabulary> {
        let mut vocabulary = if self.vocabulary.is_empty() {
            Vocabulary::new(defaults::vocabulary(&self.language))
        } else {
            Vocabulary::new(&self.vocabulary)
        };

        if let Some(path) = &self.vocabulary_file {
            let extra = Vocabulary::load_from_path(path)?;
            vocabulary.extend(extra.iter());
        }

        Ok(vocabulary)
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        if self.enforce_word_boundaries {
            BoundaryPolicy::Enforce
        } else {
            BoundaryPolicy::Ignore
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dxeditor").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
