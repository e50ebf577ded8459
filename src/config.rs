use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::scanner::patterns::PatternTable;

pub const CONFIG_FILE_NAME: &str = ".locsyncrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Target language of the catalog. Mandatory for extraction; may also be
    /// supplied on the command line.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_catalog")]
    pub catalog: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub keep_unused: bool,
    #[serde(default)]
    pub strict: bool,
    /// Marker-function table overriding the built-in defaults. Key order in
    /// the file is the match order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Map<String, Value>>,
}

fn default_catalog() -> String {
    "./translations.json".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_extensions() -> Vec<String> {
    ["js", "mjs", "cjs", "jsx", "ts", "tsx"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            catalog: default_catalog(),
            source_root: default_source_root(),
            includes: Vec::new(),
            ignores: default_ignores(),
            extensions: default_extensions(),
            keep_unused: false,
            strict: false,
            patterns: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are
    /// invalid, or if the pattern table does not compile.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Include patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        self.pattern_table()?;

        Ok(())
    }

    /// The compiled marker table: the config's own, or the defaults.
    pub fn pattern_table(&self) -> Result<PatternTable> {
        match &self.patterns {
            Some(patterns) => PatternTable::from_config(patterns),
            None => Ok(PatternTable::default_table()),
        }
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
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
