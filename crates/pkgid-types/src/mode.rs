//! Package-id modes: how much of a dependency's identity reaches the
//! consumer's package id.
//!
//! Variants are declared from least to most specific; the derived ordering
//! is the projection order used by the renderer.

use crate::error::PkgIdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub enum PackageIdMode {
    Unrelated,
    #[default]
    Semver,
    Major,
    Minor,
    Patch,
    Base,
    FullVersion,
    FullRecipe,
    FullPackage,
    RecipeRevision,
    PackageRevision,
}

impl PackageIdMode {
    pub const ALL: [PackageIdMode; 11] = [
        PackageIdMode::Unrelated,
        PackageIdMode::Semver,
        PackageIdMode::Major,
        PackageIdMode::Minor,
        PackageIdMode::Patch,
        PackageIdMode::Base,
        PackageIdMode::FullVersion,
        PackageIdMode::FullRecipe,
        PackageIdMode::FullPackage,
        PackageIdMode::RecipeRevision,
        PackageIdMode::PackageRevision,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PackageIdMode::Unrelated => "unrelated_mode",
            PackageIdMode::Semver => "semver_mode",
            PackageIdMode::Major => "major_mode",
            PackageIdMode::Minor => "minor_mode",
            PackageIdMode::Patch => "patch_mode",
            PackageIdMode::Base => "base_mode",
            PackageIdMode::FullVersion => "full_version_mode",
            PackageIdMode::FullRecipe => "full_recipe_mode",
            PackageIdMode::FullPackage => "full_package_mode",
            PackageIdMode::RecipeRevision => "recipe_revision_mode",
            PackageIdMode::PackageRevision => "package_revision_mode",
        }
    }
}

/// Accepts the canonical `*_mode` names and the same names without the suffix.
impl FromStr for PackageIdMode {
    type Err = PkgIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stem = s.strip_suffix("_mode").unwrap_or(s);
        PackageIdMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().strip_suffix("_mode") == Some(stem))
            .ok_or_else(|| PkgIdError::UnknownMode(s.to_string()))
    }
}

impl fmt::Display for PackageIdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PackageIdMode> for String {
    fn from(value: PackageIdMode) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<String> for PackageIdMode {
    type Error = PkgIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
