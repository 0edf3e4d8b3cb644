use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;

/// How `run` prints a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Option<OutputFormat> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub iterations: usize,
    pub seed: Option<u64>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub iterations: ValueSource,
    pub seed: ValueSource,
    pub format: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            iterations: ValueSource::Default,
            seed: ValueSource::Default,
            format: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            seed: None,
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `CARDLANG_CONFIG`, then
/// `CARDLANG_*` environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("CARDLANG_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.iterations {
            cfg.iterations = v;
            sources.iterations = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.format {
            cfg.format = v;
            sources.format = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("CARDLANG_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(iterations) = std::env::var("CARDLANG_ITERATIONS")
        && !iterations.is_empty()
    {
        cfg.iterations = iterations
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid iterations".into()))?;
        sources.iterations = ValueSource::Env;
    }
    if let Ok(format) = std::env::var("CARDLANG_FORMAT")
        && !format.is_empty()
    {
        cfg.format = OutputFormat::parse(&format)
            .ok_or_else(|| ConfigError::Invalid("Invalid format".into()))?;
        sources.format = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    iterations: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    format: Option<OutputFormat>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.iterations == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: iterations must be >0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: [&str; 4] = [
        "CARDLANG_CONFIG",
        "CARDLANG_SEED",
        "CARDLANG_ITERATIONS",
        "CARDLANG_FORMAT",
    ];

    fn clear_env() {
        for key in VARS {
            // SAFETY: config tests are #[serial], no other thread reads the environment
            unsafe { std::env::remove_var(key) };
        }
    }

    fn set_env(key: &str, value: &str) {
        // SAFETY: see clear_env
        unsafe { std::env::set_var(key, value) };
    }

    #[test]
    #[serial]
    fn defaults_without_env() {
        clear_env();
        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config, Config::default());
        assert!(matches!(resolved.sources.iterations, ValueSource::Default));
    }

    #[test]
    #[serial]
    fn file_then_env_precedence() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "iterations = 500\nseed = 7\nformat = \"json\"").unwrap();
        set_env("CARDLANG_CONFIG", file.path().to_str().unwrap());
        set_env("CARDLANG_SEED", "99");

        let resolved = load_with_sources().unwrap();
        clear_env();

        assert_eq!(resolved.config.iterations, 500);
        assert_eq!(resolved.config.seed, Some(99));
        assert_eq!(resolved.config.format, OutputFormat::Json);
        assert!(matches!(resolved.sources.iterations, ValueSource::File));
        assert!(matches!(resolved.sources.seed, ValueSource::Env));
        assert!(matches!(resolved.sources.format, ValueSource::File));
    }

    #[test]
    #[serial]
    fn rejects_bad_values() {
        clear_env();
        set_env("CARDLANG_ITERATIONS", "0");
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));

        clear_env();
        set_env("CARDLANG_FORMAT", "yaml");
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));

        clear_env();
        set_env("CARDLANG_SEED", "abc");
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));
        clear_env();
    }
}
