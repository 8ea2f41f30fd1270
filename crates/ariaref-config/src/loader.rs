//! Loading `ariaref.toml`.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::schema::Config;
use crate::validator::ConfigValidator;

/// `${NAME}` or `${NAME:-fallback}`.
static ENV_REFERENCE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").ok()
});

/// Reads TOML config, substitutes environment references and validates the
/// result before handing it out.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `path`; a leading `~` is expanded first.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = Self::resolve_path(path.as_ref());
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound(path.display().to_string()),
            _ => ConfigError::Io(e),
        })?;
        debug!(path = %path.display(), "loading config");
        Self::load_str(&content)
    }

    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(&Self::substitute_env(content)?)?;
        ConfigValidator::ensure_valid(&config)?;
        Ok(config)
    }

    /// Expand shell-style paths (e.g., `~/.config/ariaref.toml`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }

    fn resolve_path(path: &Path) -> PathBuf {
        match path.to_str() {
            Some(raw) if raw.starts_with('~') => PathBuf::from(Self::expand_path(raw)),
            _ => path.to_path_buf(),
        }
    }

    fn substitute_env(content: &str) -> Result<String, ConfigError> {
        let Some(pattern) = ENV_REFERENCE.as_ref() else {
            return Ok(content.to_string());
        };

        let mut out = String::with_capacity(content.len());
        let mut tail = 0;
        for caps in pattern.captures_iter(content) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = match (std::env::var(name.as_str()), caps.get(2)) {
                (Ok(value), _) => value,
                (Err(_), Some(fallback)) => fallback.as_str().to_string(),
                (Err(_), None) => return Err(ConfigError::EnvVarNotSet(name.as_str().to_string())),
            };
            out.push_str(&content[tail..whole.start()]);
            out.push_str(&value);
            tail = whole.end();
        }
        out.push_str(&content[tail..]);
        Ok(out)
    }
}
