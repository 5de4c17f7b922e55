//! Deployment policy for certificate proof verification.

use std::{fs, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};

use crate::{errors::ConfigError, strategy::StrategyKind};

/// How the certificate verification key is treated.
///
/// The key is logically part of every verification, but deployments so far
/// run with the check disabled. Which of these is the intended long-term
/// policy is still an open product decision.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VkPolicy {
    /// The key is fetched if a source is configured but never attached to the
    /// context, and its absence fails neither loading nor preconditions.
    #[default]
    Waived,

    /// The key must be obtained at load time, is attached to the context and
    /// is checked by the preconditions.
    Required,
}

/// Where the verification key is read from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VkSource {
    /// No key source configured.
    #[default]
    None,

    /// Key bytes declared in the sidechain creation data.
    Sidechain,

    /// Key bytes stored in a file.
    File { path: PathBuf },
}

impl VkSource {
    /// Short description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::None => "no configured source",
            Self::Sidechain => "sidechain creation data",
            Self::File { .. } => "verification key file",
        }
    }
}

/// Default value for `allow_empty_bt_list` in [`VerifierConfig`].
const DEFAULT_ALLOW_EMPTY_BT_LIST: bool = true;

fn default_allow_empty_bt_list() -> bool {
    DEFAULT_ALLOW_EMPTY_BT_LIST
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Whether a certificate without backward transfers may be verified.
    #[serde(default = "default_allow_empty_bt_list")]
    pub allow_empty_bt_list: bool,

    /// Lowest certificate quality accepted by the preconditions.
    #[serde(default)]
    pub min_quality: u64,

    #[serde(default)]
    pub vk_policy: VkPolicy,

    #[serde(default)]
    pub vk_source: VkSource,

    /// Strategy installed by [`ProofVerifier::from_config`](crate::ProofVerifier::from_config).
    #[serde(default)]
    pub strategy: StrategyKind,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            allow_empty_bt_list: DEFAULT_ALLOW_EMPTY_BT_LIST,
            min_quality: 0,
            vk_policy: VkPolicy::default(),
            vk_source: VkSource::default(),
            strategy: StrategyKind::default(),
        }
    }
}

impl VerifierConfig {
    /// Parses a config from TOML, filling omitted fields with defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}
