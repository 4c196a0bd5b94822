//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CollectionConfig, PkgIdConfigV1};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `pkgid.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PkgIdConfigV1> {
    let cfg: PkgIdConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the mode policy applied to every info (profile + overrides + per-collection config).
pub fn resolve_config(cfg: PkgIdConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
