use crate::{model::PkgIdConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use pkgid_domain::ModePolicy;
use pkgid_domain::policy::ModeOverride;
use pkgid_types::PackageIdMode;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub requires_mode: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub profile: String,
    pub policy: ModePolicy,
}

pub fn resolve_config(cfg: PkgIdConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "default".to_string());

    let mut policy = presets::preset(&profile);

    if let Some(mode) = overrides.requires_mode.as_deref().or(cfg.requires.mode.as_deref()) {
        policy.requires = parse_mode(mode).context("invalid mode for requires")?;
    }
    if let Some(mode) = cfg.build_requires.mode.as_deref() {
        policy.build_requires = parse_mode(mode).context("invalid mode for build_requires")?;
    }
    if let Some(mode) = cfg.python_requires.mode.as_deref() {
        policy.python_requires = parse_mode(mode).context("invalid mode for python_requires")?;
    }

    for (pattern, mode) in cfg.overrides.iter() {
        Glob::new(pattern).with_context(|| format!("invalid override glob: {pattern}"))?;
        let mode = parse_mode(mode).with_context(|| format!("invalid mode for override {pattern}"))?;
        policy.overrides.push(ModeOverride {
            pattern: pattern.clone(),
            mode,
        });
    }

    Ok(ResolvedConfig { profile, policy })
}

fn parse_mode(v: &str) -> anyhow::Result<PackageIdMode> {
    Ok(v.parse::<PackageIdMode>()?)
}
