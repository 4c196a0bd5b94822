use pkgid_domain::ModePolicy;
use pkgid_types::PackageIdMode;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything finer belongs in `[overrides]`.
pub fn preset(profile: &str) -> ModePolicy {
    match profile {
        "strict" => strict_profile(),
        "minor" => minor_profile(),
        // default
        _ => default_profile(),
    }
}

fn default_profile() -> ModePolicy {
    ModePolicy::default()
}

fn strict_profile() -> ModePolicy {
    ModePolicy {
        requires: PackageIdMode::RecipeRevision,
        build_requires: PackageIdMode::FullVersion,
        python_requires: PackageIdMode::FullVersion,
        overrides: Vec::new(),
    }
}

fn minor_profile() -> ModePolicy {
    ModePolicy {
        requires: PackageIdMode::Minor,
        build_requires: PackageIdMode::Unrelated,
        python_requires: PackageIdMode::Minor,
        overrides: Vec::new(),
    }
}
