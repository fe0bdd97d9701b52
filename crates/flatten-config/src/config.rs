//! Configuration management for flatten-imports

use flatten_foundation::{FlattenError, FlattenResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional configuration file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "flatten.toml";

/// Prefix for environment overrides, e.g. `FLATTEN__ALIAS_PREFIX=~/`
pub const ENV_PREFIX: &str = "FLATTEN__";

/// Barrel directory used when nothing else is configured
pub const DEFAULT_BARREL_DIRECTORY: &str = "src/components";

/// Alias prefix used when nothing else is configured
pub const DEFAULT_ALIAS_PREFIX: &str = "@/";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FlattenConfig {
    /// Directories whose index module is a barrel (e.g. `src/components`)
    pub barrel_directories: Vec<String>,
    /// Prefix prepended to a barrel directory to form its import specifier
    pub alias_prefix: String,
    /// Report changes without writing them
    pub dry_run: bool,
    /// Project root that globs are matched against
    #[serde(skip)]
    pub root: PathBuf,
    /// Source files to process, relative to `root`
    pub include: Vec<String>,
    /// Files to leave alone even if they match `include`
    pub exclude: Vec<String>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            barrel_directories: vec![DEFAULT_BARREL_DIRECTORY.to_string()],
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
            dry_run: false,
            root: PathBuf::from("."),
            include: vec!["src/**/*.{ts,tsx,js,jsx}".to_string()],
            exclude: vec!["**/node_modules/**".to_string(), "**/*.d.ts".to_string()],
            logging: LoggingConfig::default(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// Structured JSON format
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Values supplied on the command line; `None`/empty means "not given"
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Comma-separated barrel directories
    pub paths: Option<String>,
    pub alias: Option<String>,
    pub dry_run: bool,
    pub root: Option<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Explicit configuration file; must exist when given
    pub config_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Split a comma-separated directory list, dropping blank entries
pub fn parse_barrel_directories(paths: &str) -> Vec<String> {
    paths
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// `alias_prefix` -> `aliasPrefix`, for environment variable keys
fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

impl FlattenConfig {
    /// Load configuration
    ///
    /// Priority order: CLI overrides > env vars > config file > defaults.
    /// The result is normalized and validated; any problem is a
    /// [`FlattenError::Config`] and nothing has been touched yet.
    pub fn load(overrides: &ConfigOverrides) -> FlattenResult<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Toml},
            Figment,
        };

        let root = overrides
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let mut figment = Figment::from(Serialized::defaults(FlattenConfig::default()));

        if let Some(path) = Self::config_file(&root, overrides.config_file.as_deref())? {
            tracing::debug!(path = %path.display(), "Loading TOML configuration");
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).map(|key| {
            key.as_str()
                .split("__")
                .map(snake_to_camel)
                .collect::<Vec<_>>()
                .join(".")
                .into()
        }));

        let mut config: FlattenConfig = figment
            .extract()
            .map_err(|e| FlattenError::config(format!("Failed to load configuration: {}", e)))?;

        config.root = root;
        config.apply_overrides(overrides);
        config.normalize();
        config.validate()?;

        tracing::debug!(
            barrel_directories = ?config.barrel_directories,
            alias_prefix = %config.alias_prefix,
            dry_run = config.dry_run,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    fn config_file(root: &Path, explicit: Option<&Path>) -> FlattenResult<Option<PathBuf>> {
        match explicit {
            Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
            Some(path) => Err(FlattenError::config(format!(
                "Configuration file not found: {}",
                path.display()
            ))),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                Ok(candidate.is_file().then_some(candidate))
            }
        }
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(paths) = &overrides.paths {
            self.barrel_directories = parse_barrel_directories(paths);
        }
        if let Some(alias) = &overrides.alias {
            self.alias_prefix = alias.clone();
        }
        if overrides.dry_run {
            self.dry_run = true;
        }
        if !overrides.include.is_empty() {
            self.include = overrides.include.clone();
        }
        if !overrides.exclude.is_empty() {
            self.exclude = overrides.exclude.clone();
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Trim whitespace and trailing slashes from barrel directories
    pub fn normalize(&mut self) {
        for dir in &mut self.barrel_directories {
            *dir = dir.trim().trim_end_matches('/').to_string();
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> FlattenResult<()> {
        if self.barrel_directories.is_empty() {
            return Err(FlattenError::config(
                "At least one barrel directory must be configured",
            ));
        }

        if let Some(idx) = self
            .barrel_directories
            .iter()
            .position(|dir| dir.trim().trim_end_matches('/').is_empty())
        {
            return Err(FlattenError::config(format!(
                "Barrel directory #{} is empty",
                idx + 1
            )));
        }

        if self.include.iter().all(|p| p.trim().is_empty()) {
            return Err(FlattenError::config(
                "At least one include pattern must be configured",
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(FlattenError::config(format!(
                "Invalid log level '{}', must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }
}
