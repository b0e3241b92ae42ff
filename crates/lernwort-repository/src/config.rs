//! Source configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lernwort_core::traits::WordRepository;

use crate::file::FileRepository;
use crate::http::HttpRepository;

/// Configuration for a single word-repository source.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Http {
        base_url: String,
        #[serde(default)]
        api_key: Option<String>,
    },
    File {
        path: PathBuf,
    },
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceConfig::Http {
                api_key, base_url, ..
            } => f
                .debug_struct("Http")
                .field("base_url", base_url)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .finish(),
            SourceConfig::File { path } => {
                f.debug_struct("File").field("path", path).finish()
            }
        }
    }
}

/// Top-level lernwort configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LernwortConfig {
    /// Source configurations keyed by name.
    #[serde(default)]
    pub sources: HashMap<String, SourceConfig>,
    /// Default source to use.
    #[serde(default = "default_source")]
    pub default_source: String,
    /// Highest mistake rate still graded as almost valid.
    #[serde(default = "default_almost_threshold")]
    pub almost_threshold: f64,
    /// Output directory for saved session summaries.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_source() -> String {
    "local".to_string()
}
fn default_almost_threshold() -> f64 {
    0.25
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./lernwort-results")
}

impl Default for LernwortConfig {
    fn default() -> Self {
        let mut sources = HashMap::new();
        sources.insert(
            "local".to_string(),
            SourceConfig::File {
                path: PathBuf::from("training-sets"),
            },
        );
        Self {
            sources,
            default_source: default_source(),
            almost_threshold: default_almost_threshold(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a source config.
fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Http { base_url, api_key } => SourceConfig::Http {
            base_url: resolve_env_vars(base_url),
            api_key: api_key.as_ref().map(|k| resolve_env_vars(k)),
        },
        SourceConfig::File { path } => SourceConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `lernwort.toml` in the current directory
/// 2. `~/.config/lernwort/config.toml`
///
/// Environment variable override: `LERNWORT_API_KEY` replaces the API key
/// of every http source.
pub fn load_config() -> Result<LernwortConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LernwortConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lernwort.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LernwortConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LernwortConfig::default(),
    };

    // Apply env var override
    if let Ok(key) = std::env::var("LERNWORT_API_KEY") {
        for source in config.sources.values_mut() {
            if let SourceConfig::Http { api_key, .. } = source {
                *api_key = Some(key.clone());
            }
        }
    }

    // Resolve env vars in all source configs
    let resolved: HashMap<String, SourceConfig> = config
        .sources
        .iter()
        .map(|(k, v)| (k.clone(), resolve_source_config(v)))
        .collect();
    config.sources = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lernwort"))
}

/// Create a repository instance from its configuration.
pub fn create_repository(name: &str, config: &SourceConfig) -> Result<Box<dyn WordRepository>> {
    match config {
        SourceConfig::Http { base_url, api_key } => {
            let _ = name;
            Ok(Box::new(HttpRepository::new(base_url, api_key.clone())))
        }
        SourceConfig::File { path } => Ok(Box::new(
            FileRepository::from_dir(path)
                .with_context(|| format!("failed to load training sets from {}", path.display()))?,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_LERNWORT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_LERNWORT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_LERNWORT_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_LERNWORT_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = LernwortConfig::default();
        assert_eq!(config.default_source, "local");
        assert!((config.almost_threshold - 0.25).abs() < f64::EPSILON);
        assert!(matches!(
            config.sources.get("local"),
            Some(SourceConfig::File { .. })
        ));
    }

    #[test]
    fn parse_source_config() {
        let toml_str = r#"
default_source = "remote"
almost_threshold = 0.2

[sources.remote]
type = "http"
base_url = "https://lunes.example.org/api"
api_key = "secret"

[sources.local]
type = "file"
path = "training-sets"
"#;
        let config: LernwortConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sources.len(), 2);
        assert!(matches!(
            config.sources.get("remote"),
            Some(SourceConfig::Http { .. })
        ));
        assert_eq!(config.default_source, "remote");
        assert!((config.almost_threshold - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn debug_masks_api_key() {
        let config = SourceConfig::Http {
            base_url: "https://example.org".into(),
            api_key: Some("secret".into()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn explicit_missing_config_path_fails() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
