use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{LanguageRegistry, LanguageSpec, SpliceMode, language::default_languages};

pub const CONFIG_FILE_NAME: &str = ".transjectrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// URL of the tab-separated catalog export.
    #[serde(default)]
    pub catalog_url: Option<String>,
    /// Local catalog file, used instead of `catalogUrl` when set.
    #[serde(default)]
    pub catalog_file: Option<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub mode: SpliceMode,
    #[serde(default = "default_reference_language")]
    pub reference_language: String,
    #[serde(default = "default_languages")]
    pub languages: Vec<LanguageSpec>,
    /// Command run on every written file, with the file path appended.
    /// `null` disables formatting.
    #[serde(default = "default_formatter")]
    pub formatter: Option<Vec<String>>,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["js".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_reference_language() -> String {
    "en".to_string()
}

fn default_formatter() -> Option<Vec<String>> {
    Some(vec!["prettier".to_string(), "--write".to_string()])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: None,
            catalog_file: None,
            source_root: default_source_root(),
            extensions: default_extensions(),
            ignores: default_ignores(),
            mode: SpliceMode::default(),
            reference_language: default_reference_language(),
            languages: default_languages(),
            formatter: default_formatter(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }

        if self.reference_language.trim().is_empty() {
            bail!("'referenceLanguage' must not be empty");
        }

        let mut seen = HashSet::new();
        for language in &self.languages {
            if language.id.trim().is_empty() {
                bail!("'languages' contains an entry with an empty id");
            }
            if !seen.insert(language.id.as_str()) {
                bail!("Language \"{}\" is listed twice in 'languages'", language.id);
            }
        }

        if let Some(formatter) = &self.formatter
            && formatter.is_empty()
        {
            bail!("'formatter' must be null or a non-empty command");
        }

        Ok(())
    }

    pub fn registry(&self) -> LanguageRegistry {
        LanguageRegistry::new(self.languages.clone())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }

    /// Directory relative config paths are resolved against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {:?}", path))?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
