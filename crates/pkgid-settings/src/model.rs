use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `pkgid.toml` schema v1.
///
/// This is a *user-facing* config model: modes stay strings here and are
/// validated during resolution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PkgIdConfigV1 {
    /// Optional schema string for tooling (`pkgid.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset profile: `default`, `strict` or `minor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(default)]
    pub requires: CollectionConfig,

    #[serde(default)]
    pub build_requires: CollectionConfig,

    #[serde(default)]
    pub python_requires: CollectionConfig,

    /// Map of dependency-name glob -> mode, applied in key order.
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CollectionConfig {
    /// Override the preset mode, e.g. `semver_mode` or `patch`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}
