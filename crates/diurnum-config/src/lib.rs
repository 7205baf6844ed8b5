//! Configuration primitives and loader for the diurnum engine.
//!
//! Settings resolve from built-in defaults overridden by an optional
//! `.diurnum.toml` in the working directory (or an explicit override path).
//! Raw TOML is normalised into typed structures so downstream crates never
//! touch it directly.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".diurnum.toml";

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub reference: ReferenceSettings,
    pub build: BuildSettings,
    pub render: RenderSettings,
}

/// Settings governing the reference-marker grammar.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceSettings {
    /// Reserved URL scheme that marks a heading as an orb reference.
    pub scheme: String,
    /// Sentinel host meaning "assign a new unique id".
    pub new_id_host: String,
    /// Orb kind assumed when a marker carries no `type` parameter.
    pub default_kind: String,
}

/// Settings governing the build pass.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildSettings {
    pub prohibit_embeds: bool,
}

/// Settings governing rendered output.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub link_target: LinkTargetStyle,
}

/// How cross-reference targets are derived from an orb id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTargetStyle {
    /// `../<id>/<file_name>`, the default on-disk layout.
    RelativeDir { file_name: String },
    /// `<scheme>://<id>`, targets that survive a re-parse as markers.
    Scheme { scheme: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reference: ReferenceSettings {
                scheme: "diurnum".into(),
                new_id_host: "new".into(),
                default_kind: "plain".into(),
            },
            build: BuildSettings {
                prohibit_embeds: false,
            },
            render: RenderSettings {
                link_target: LinkTargetStyle::RelativeDir {
                    file_name: "orb.md".into(),
                },
            },
        }
    }
}

/// Loader options, typically supplied by the embedding application.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed
    /// settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;

        let config_path = match options.override_path {
            Some(path) => {
                let absolute = make_absolute(&path, &working_dir);
                if !absolute.exists() {
                    return Err(ConfigError::OverrideNotFound { path: absolute });
                }
                Some(absolute)
            }
            None => {
                let local = working_dir.join(CONFIG_FILE_NAME);
                local.exists().then_some(local)
            }
        };

        match config_path {
            Some(path) => {
                let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                Self::from_toml_str(&contents).map_err(|err| match err {
                    ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
                    other => other,
                })
            }
            None => Ok(Config::default()),
        }
    }

    /// Parse a configuration layer from TOML text over the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(CONFIG_FILE_NAME),
            source,
        })?;
        raw.finalize()
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    reference: Option<RawReference>,
    build: Option<RawBuild>,
    render: Option<RawRender>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReference {
    scheme: Option<String>,
    new_id_host: Option<String>,
    default_kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBuild {
    prohibit_embeds: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRender {
    link_style: Option<String>,
    link_file_name: Option<String>,
}

impl RawConfig {
    fn finalize(self) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        if let Some(reference) = self.reference {
            if let Some(scheme) = reference.scheme {
                if scheme.is_empty() || !scheme.chars().all(|ch| ch.is_ascii_alphanumeric()) {
                    return Err(ConfigError::Validation(format!(
                        "invalid reference scheme '{scheme}'"
                    )));
                }
                config.reference.scheme = scheme;
            }
            if let Some(host) = reference.new_id_host {
                if host.is_empty() {
                    return Err(ConfigError::Validation(
                        "reference.new_id_host must not be empty".into(),
                    ));
                }
                config.reference.new_id_host = host;
            }
            if let Some(kind) = reference.default_kind {
                config.reference.default_kind = kind;
            }
        }

        if let Some(build) = self.build {
            if let Some(prohibit) = build.prohibit_embeds {
                config.build.prohibit_embeds = prohibit;
            }
        }

        if let Some(render) = self.render {
            let file_name = render.link_file_name.unwrap_or_else(|| "orb.md".into());
            match render.link_style.as_deref() {
                None | Some("relative-dir") => {
                    config.render.link_target = LinkTargetStyle::RelativeDir { file_name };
                }
                Some("scheme") => {
                    config.render.link_target = LinkTargetStyle::Scheme {
                        scheme: config.reference.scheme.clone(),
                    };
                }
                Some(other) => {
                    return Err(ConfigError::Validation(format!(
                        "unknown render.link_style '{other}'"
                    )));
                }
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_diurnum_protocol() {
        let config = Config::default();
        assert_eq!(config.reference.scheme, "diurnum");
        assert_eq!(config.reference.new_id_host, "new");
        assert_eq!(config.reference.default_kind, "plain");
        assert!(!config.build.prohibit_embeds);
        assert_eq!(
            config.render.link_target,
            LinkTargetStyle::RelativeDir {
                file_name: "orb.md".into()
            }
        );
    }

    #[test]
    fn scheme_style_inherits_reference_scheme() {
        let config = Config::from_toml_str(
            "[reference]\nscheme = \"orbs\"\n\n[render]\nlink_style = \"scheme\"\n",
        )
        .expect("valid config");
        assert_eq!(
            config.render.link_target,
            LinkTargetStyle::Scheme {
                scheme: "orbs".into()
            }
        );
    }

    #[test]
    fn rejects_unknown_link_style() {
        let err = Config::from_toml_str("[render]\nlink_style = \"absolute\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_non_alphanumeric_scheme() {
        let err = Config::from_toml_str("[reference]\nscheme = \"or bs\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
