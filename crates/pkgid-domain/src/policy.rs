use crate::info::Info;
use crate::requirements::RequirementsInfo;
use globset::{Glob, GlobMatcher};
use pkgid_types::{PackageIdMode, PkgIdError, PkgIdResult};

/// A per-dependency mode keyed by a glob over dependency names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeOverride {
    pub pattern: String,
    pub mode: PackageIdMode,
}

/// Which modes an info applies to each of its requirement collections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModePolicy {
    pub requires: PackageIdMode,
    pub build_requires: PackageIdMode,
    pub python_requires: PackageIdMode,
    /// Applied in order after the bulk modes; the last match wins.
    pub overrides: Vec<ModeOverride>,
}

impl Default for ModePolicy {
    fn default() -> Self {
        Self {
            requires: PackageIdMode::Semver,
            build_requires: PackageIdMode::Unrelated,
            python_requires: PackageIdMode::Unrelated,
            overrides: Vec::new(),
        }
    }
}

impl ModePolicy {
    pub fn apply(&self, info: &mut Info) -> PkgIdResult<()> {
        let matchers = self.matchers()?;

        info.requires.set_mode(self.requires);
        info.build_requires.set_mode(self.build_requires);
        info.python_requires.set_mode(self.python_requires);

        apply_overrides(&mut info.requires, &matchers);
        apply_overrides(&mut info.build_requires, &matchers);
        apply_overrides(&mut info.python_requires, &matchers);
        Ok(())
    }

    fn matchers(&self) -> PkgIdResult<Vec<(GlobMatcher, PackageIdMode)>> {
        self.overrides
            .iter()
            .map(|o| {
                let glob = Glob::new(&o.pattern).map_err(|e| PkgIdError::InvalidValue {
                    key: "overrides".to_string(),
                    value: o.pattern.clone(),
                    allowed: format!("a glob pattern ({e})"),
                })?;
                Ok((glob.compile_matcher(), o.mode))
            })
            .collect()
    }
}

fn apply_overrides(reqs: &mut RequirementsInfo, matchers: &[(GlobMatcher, PackageIdMode)]) {
    if matchers.is_empty() {
        return;
    }
    for item in reqs.iter_mut() {
        let name = item.reference().name.as_str();
        if let Some((_, mode)) = matchers.iter().rev().find(|(m, _)| m.is_match(name)) {
            tracing::debug!(requirement = name, mode = %mode, "mode override matched");
            item.set_mode(*mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::info_with;

    #[test]
    fn default_policy_keeps_build_and_python_requires_out() {
        let mut info = info_with(&["zlib/1.2.11"], &["cmake/3.25.0"], &["pyreq/1.0"]);
        ModePolicy::default().apply(&mut info).expect("apply");
        assert_eq!(info.requires.dumps(), "zlib/1.Y.Z");
        assert_eq!(info.build_requires.dumps(), "");
        assert_eq!(info.python_requires.dumps(), "");
    }

    #[test]
    fn last_matching_override_wins() {
        let mut info = info_with(
            &["zlib/1.2.11", "boost_system/1.80.0", "boost_filesystem/1.80.0"],
            &[],
            &[],
        );
        let policy = ModePolicy {
            overrides: vec![
                ModeOverride {
                    pattern: "boost*".to_string(),
                    mode: PackageIdMode::Minor,
                },
                ModeOverride {
                    pattern: "boost_system".to_string(),
                    mode: PackageIdMode::FullVersion,
                },
            ],
            ..ModePolicy::default()
        };
        policy.apply(&mut info).expect("apply");
        assert_eq!(
            info.requires.dumps(),
            "boost_filesystem/1.80.Z\nboost_system/1.80.0\nzlib/1.Y.Z"
        );
    }

    #[test]
    fn invalid_glob_is_rejected_before_any_change() {
        let mut info = info_with(&["zlib/1.2.11"], &[], &[]);
        info.requires.patch_mode();
        let policy = ModePolicy {
            overrides: vec![ModeOverride {
                pattern: "zlib[".to_string(),
                mode: PackageIdMode::Minor,
            }],
            ..ModePolicy::default()
        };
        assert!(matches!(
            policy.apply(&mut info),
            Err(PkgIdError::InvalidValue { .. })
        ));
        assert_eq!(info.requires.dumps(), "zlib/1.2.11");
    }
}
