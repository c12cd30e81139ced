use crate::core::NodeId;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MIN_LENGTH: usize = 2;
pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_COMMIT_GRACE: Duration = Duration::from_millis(200);
pub const DEFAULT_INSTRUCTIONS: &str = "As you start typing the application might suggest similar search terms. Use up and down arrow keys to select a suggested search string.";

/// How urgently assistive technology should read live region updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Politeness {
    #[default]
    Polite,
    Assertive,
}

impl Politeness {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// Per-field suggestion settings, fixed when the field is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestConfig {
    pub min_length: usize,
    pub max_results: usize,
    pub source: Vec<String>,
    pub instructions: String,
    pub politeness: Politeness,
    /// How long the list survives a blur, so a click on an item can still commit.
    pub commit_grace: Duration,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_results: DEFAULT_MAX_RESULTS,
            source: Vec::new(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            politeness: Politeness::default(),
            commit_grace: DEFAULT_COMMIT_GRACE,
        }
    }
}

impl SuggestConfig {
    pub fn new(source: Vec<String>) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_commit_grace(mut self, commit_grace: Duration) -> Self {
        self.commit_grace = commit_grace;
        self
    }
}

// ---------------------------------------------------------------------------
// Form definitions (YAML / JSON)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormSpec {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub id: NodeId,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub suggest: Option<SuggestSpec>,
}

/// Raw suggestion settings as written in a form definition.
///
/// Lengths are signed so negative values can be clamped instead of failing
/// the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuggestSpec {
    #[serde(default)]
    pub min_length: Option<i64>,
    #[serde(default)]
    pub max_results: Option<i64>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub source: Option<Vec<String>>,
    #[serde(default)]
    pub source_file: Option<PathBuf>,
    #[serde(default)]
    pub politeness: Option<Politeness>,
    #[serde(default)]
    pub commit_grace_ms: Option<u64>,
}

impl FormSpec {
    /// Loads a form definition, picking the parser from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_text(path)?;
        match extension(path).as_deref() {
            Some("yaml" | "yml") => Self::from_yaml(&text).map_err(|source| Error::Yaml {
                path: path.to_path_buf(),
                source,
            }),
            Some("json") => Self::from_json(&text).map_err(|source| Error::Json {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl SuggestSpec {
    /// Resolves these settings into a config. `base_dir` anchors relative source files.
    pub fn resolve(&self, field: &NodeId, base_dir: &Path) -> Result<SuggestConfig> {
        let source = match (&self.source, &self.source_file) {
            (Some(_), Some(_)) => {
                return Err(Error::AmbiguousSource {
                    field: field.to_string(),
                });
            }
            (Some(items), None) => items.clone(),
            (None, Some(file)) => load_source_file(&base_dir.join(file))?,
            (None, None) => Vec::new(),
        };

        let mut config = SuggestConfig::new(source);
        if let Some(min_length) = self.min_length {
            config.min_length = clamp_non_negative(field, "min_length", min_length);
        }
        if let Some(max_results) = self.max_results {
            config.max_results = clamp_non_negative(field, "max_results", max_results);
        }
        if let Some(instructions) = &self.instructions {
            config.instructions = instructions.clone();
        }
        if let Some(politeness) = self.politeness {
            config.politeness = politeness;
        }
        if let Some(ms) = self.commit_grace_ms {
            config.commit_grace = Duration::from_millis(ms);
        }
        Ok(config)
    }
}

/// Reads a newline separated candidate list. Blank lines are skipped and
/// surrounding whitespace is trimmed; order and duplicates are preserved.
pub fn load_source_file(path: &Path) -> Result<Vec<String>> {
    let text = read_text(path)?;
    Ok(parse_source_lines(&text))
}

pub fn parse_source_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn clamp_non_negative(field: &NodeId, key: &str, value: i64) -> usize {
    if value < 0 {
        tracing::warn!(%field, key, value, "negative setting clamped to 0");
        return 0;
    }
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
