//! The info snapshot of one graph node and its text format.
//!
//! ```text
//! [settings]
//!     key=value
//! [requires]
//!     mode-reduced reference per line
//! [options]
//!     key=value
//! [build_requires]          (only when non-empty)
//! [python_requires]         (only when non-empty)
//! [full_settings]
//!     key=value
//! [full_requires]
//!     fully pinned reference per line
//! [env]
//!     key=value
//! ```

use crate::fingerprint;
use crate::options::Options;
use crate::policy::ModePolicy;
use crate::requirements::{PythonRequiresInfo, RequirementsInfo};
use crate::settings::Settings;
use crate::value::{check_entry, split_key_value};
use pkgid_types::{PackageIdMode, PkgIdError, PkgIdResult, Reference};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const INDENT: &str = "    ";

/// Everything that decides a package id, plus the full pins it came from.
///
/// `full_settings` and `full_requires` are snapshots taken when the info is
/// built or loaded; narrowing `settings`/`requires` afterwards leaves them
/// untouched. Dependencies resolved later go through [`Info::add_require`]
/// so both views see them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Info {
    pub settings: Settings,
    pub options: Options,
    pub requires: RequirementsInfo,
    pub build_requires: RequirementsInfo,
    pub python_requires: PythonRequiresInfo,
    pub full_settings: Settings,
    pub full_requires: RequirementsInfo,
    env: BTreeMap<String, String>,
}

/// Minimized snapshot sent as remote metadata. The reduced `[requires]`
/// view is left out: it follows from `full_requires` and a mode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MinInfo {
    pub settings: BTreeMap<String, String>,
    pub options: BTreeMap<String, String>,
    pub full_requires: Vec<String>,
}

impl Info {
    pub fn new(
        settings: Settings,
        options: Options,
        requires: RequirementsInfo,
        build_requires: RequirementsInfo,
        python_requires: PythonRequiresInfo,
    ) -> Self {
        let full_settings = settings.clone();
        let full_requires = RequirementsInfo::from_references(
            requires.references().cloned(),
            PackageIdMode::PackageRevision,
        );
        Info {
            settings,
            options,
            requires,
            build_requires,
            python_requires,
            full_settings,
            full_requires,
            env: BTreeMap::new(),
        }
    }

    /// Add a resolved dependency to `requires` and pin it in `full_requires`.
    pub fn add_require(&mut self, reference: Reference) {
        self.full_requires.add(reference.clone());
        self.requires.add(reference);
    }

    pub fn add_require_str(&mut self, reference: &str) -> PkgIdResult<()> {
        self.add_require(Reference::parse(reference)?);
        Ok(())
    }

    /// Record an environment override; it is carried in `[env]` only.
    pub fn set_env(&mut self, key: &str, value: &str) -> PkgIdResult<()> {
        check_entry("env", key, value)?;
        self.env.insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn apply_policy(&mut self, policy: &ModePolicy) -> PkgIdResult<()> {
        policy.apply(self)
    }

    /// Clear the reduced view; the full snapshots are kept.
    pub fn clear(&mut self) {
        self.settings.clear();
        self.options.clear();
        self.requires.clear();
        self.build_requires.clear();
        self.python_requires.clear();
    }

    pub fn dumps(&self) -> String {
        let mut out = self.reduced_sections();
        out.push(("full_settings", self.full_settings.dumps()));
        out.push(("full_requires", self.full_requires.dumps()));
        out.push(("env", dump_env(&self.env)));
        join_sections(&out)
    }

    /// The package id: a SHA-256 over the reduced sections only.
    pub fn package_id(&self) -> String {
        let id = fingerprint::package_id(&join_sections(&self.reduced_sections()));
        tracing::debug!(package_id = %id, "package id computed");
        id
    }

    fn reduced_sections(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("settings", self.settings.dumps()),
            ("requires", self.requires.dumps()),
            ("options", self.options.dumps()),
        ];
        let build_requires = self.build_requires.dumps();
        if !build_requires.is_empty() {
            out.push(("build_requires", build_requires));
        }
        let python_requires = self.python_requires.dumps();
        if !python_requires.is_empty() {
            out.push(("python_requires", python_requires));
        }
        out
    }

    pub fn serialize_min(&self) -> MinInfo {
        MinInfo {
            settings: self
                .settings
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            options: self
                .options
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            full_requires: self.full_requires.references().map(ToString::to_string).collect(),
        }
    }

    /// Parse the text produced by [`Info::dumps`].
    ///
    /// `[requires]` is derived from `[full_requires]` when that section has
    /// content. Build and python requires are loaded as written and keep
    /// rendering exactly that text. Only mode changes and serialization are
    /// supported on the result.
    pub fn loads(text: &str) -> PkgIdResult<Info> {
        let sections = split_sections(text)?;
        tracing::debug!(
            sections = ?sections.keys().collect::<Vec<_>>(),
            "info text loaded"
        );
        let lines = |name: &str| sections.get(name).into_iter().flatten().copied();

        let settings = Settings::from_lines(lines("settings"))?;
        let options = Options::from_lines(lines("options"))?;
        let full_settings = Settings::from_lines(lines("full_settings"))?;

        let full = references(lines("full_requires"))?;
        let requires = if full.is_empty() {
            RequirementsInfo::from_references(
                references(lines("requires"))?,
                PackageIdMode::PackageRevision,
            )
        } else {
            RequirementsInfo::from_references(full.iter().cloned(), PackageIdMode::default())
        };
        let build_requires = RequirementsInfo::from_references(
            references(lines("build_requires"))?,
            PackageIdMode::PackageRevision,
        );
        let python_requires = PythonRequiresInfo::from_references(
            references(lines("python_requires"))?,
            Some(PackageIdMode::PackageRevision),
        );
        let full_requires = RequirementsInfo::from_references(full, PackageIdMode::PackageRevision);

        let mut env = BTreeMap::new();
        for (line_no, line) in lines("env") {
            let (key, value) = split_key_value(line, line_no)?;
            check_entry("env", key, value)?;
            env.insert(key.to_string(), value.to_string());
        }

        Ok(Info {
            settings,
            options,
            requires,
            build_requires,
            python_requires,
            full_settings,
            full_requires,
            env,
        })
    }
}

/// Parse one reference per line; a name may appear only once per section.
fn references<'a, I>(lines: I) -> PkgIdResult<Vec<Reference>>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut seen = BTreeMap::new();
    let mut out = Vec::new();
    for (line_no, line) in lines {
        let reference = Reference::parse(line)?;
        if let Some(first) = seen.insert(reference.name.clone(), line_no) {
            return Err(PkgIdError::InvalidInfo {
                line: line_no,
                reason: format!(
                    "duplicate requirement '{}' (first seen at line {first})",
                    reference.name
                ),
            });
        }
        out.push(reference);
    }
    Ok(out)
}

const KNOWN_SECTIONS: [&str; 8] = [
    "settings",
    "requires",
    "options",
    "build_requires",
    "python_requires",
    "full_settings",
    "full_requires",
    "env",
];

/// Present in older info files; accepted and dropped.
const IGNORED_SECTIONS: [&str; 2] = ["full_options", "recipe_hash"];

/// Section name to its `(line number, content)` lines, numbered from 1.
fn split_sections(text: &str) -> PkgIdResult<BTreeMap<&str, Vec<(usize, &str)>>> {
    let mut sections: BTreeMap<&str, Vec<(usize, &str)>> = BTreeMap::new();
    let mut current: Option<&str> = None;
    let mut ignoring = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            ignoring = IGNORED_SECTIONS.contains(&name);
            if !ignoring && !KNOWN_SECTIONS.contains(&name) {
                return Err(PkgIdError::InvalidInfo {
                    line: idx + 1,
                    reason: format!("unknown section [{name}]"),
                });
            }
            if sections.contains_key(name) {
                return Err(PkgIdError::InvalidInfo {
                    line: idx + 1,
                    reason: format!("duplicate section [{name}]"),
                });
            }
            if !ignoring {
                sections.insert(name, Vec::new());
            }
            current = Some(name);
            continue;
        }
        match current {
            None => {
                return Err(PkgIdError::InvalidInfo {
                    line: idx + 1,
                    reason: "content before the first section".to_string(),
                });
            }
            Some(_) if ignoring => {}
            Some(name) => sections.entry(name).or_default().push((idx + 1, line)),
        }
    }
    Ok(sections)
}

fn dump_env(env: &BTreeMap<String, String>) -> String {
    env.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|l| format!("{INDENT}{l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_sections(sections: &[(&str, String)]) -> String {
    let mut parts = Vec::with_capacity(sections.len() * 2);
    for (i, (name, content)) in sections.iter().enumerate() {
        if i == 0 {
            parts.push(format!("[{name}]"));
        } else {
            parts.push(format!("\n[{name}]"));
        }
        parts.push(indent(content));
    }
    parts.join("\n") + "\n"
}
