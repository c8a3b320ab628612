use std::fs;
use std::path::{Path, PathBuf};
use std::{env, fmt, io};

use log::LevelFilter;

pub const CONFIG_ENV: &str = "SIMPLESH_CONFIG";
pub const LOG_ENV: &str = "SIMPLESH_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub farewell: String,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    /// Run a bare `cd <dir>` in the interpreter so the change sticks.
    pub persistent_cd: bool,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "shell> ".to_string(),
            farewell: "Exiting the shell.".to_string(),
            log_level: LevelFilter::Warn,
            log_file: None,
            persistent_cd: true,
        }
    }

    /// `$SIMPLESH_CONFIG`, then `~/.simpleshrc`, then the defaults.
    /// `SIMPLESH_LOG` overrides the level in every case. A bad
    /// `SIMPLESH_LOG` is reported and the loaded level kept.
    pub fn load() -> Result<Config, ConfigError> {
        let mut config = match Self::locate() {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default_config(),
        };
        if let Ok(level) = env::var(LOG_ENV) {
            if let Err(e) = Self::override_level(&mut config, &level) {
                eprintln!("simplesh: config: {}", e);
            }
        }
        Ok(config)
    }

    /// Sets the level from an environment value, leaving `config` alone
    /// when the value is not a level name.
    pub fn override_level(config: &mut Config, value: &str) -> Result<(), ConfigError> {
        config.log_level = parse_level(value.trim())
            .ok_or_else(|| ConfigError::Parse(format!("{}: invalid log level: {}", LOG_ENV, value)))?;
        Ok(())
    }

    fn locate() -> Option<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let rc = Path::new(&env::var_os("HOME")?).join(".simpleshrc");
        rc.is_file().then_some(rc)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!("Line {}: No '=' found: {}", lineno + 1, line)));
            };
            // Values are taken verbatim so a prompt can keep its trailing space.
            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "farewell" => config.farewell = value.to_string(),
                "log_level" => {
                    config.log_level = parse_level(value.trim()).ok_or_else(|| {
                        ConfigError::Parse(format!("Line {}: Invalid log level: {}", lineno + 1, value))
                    })?;
                }
                "log_file" => {
                    let value = value.trim();
                    config.log_file = (!value.is_empty()).then(|| PathBuf::from(value));
                }
                "persistent_cd" => {
                    config.persistent_cd = match value.trim() {
                        "true" | "yes" | "1" => true,
                        "false" | "no" | "0" => false,
                        _ => return Err(ConfigError::Parse(format!("Line {}: Invalid bool: {}", lineno + 1, line))),
                    };
                }
                k => return Err(ConfigError::Parse(format!("Line {}: Unknown key: {}", lineno + 1, k))),
            }
        }

        Ok(config)
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    value.parse().ok()
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
