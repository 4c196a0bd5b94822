//! Hierarchical settings addressed by dotted path (`compiler.libcxx`).

use crate::value::{Domain, SettingValue, Value, check_entry, split_key_value};
use pkgid_types::{PkgIdError, PkgIdResult};
use std::collections::BTreeMap;

/// Settings keyed by dotted path, each either defined or unset.
///
/// An open tree (`Settings::new`) accepts any path. A tree built from a
/// definition only accepts declared paths and checks values against each
/// path's domain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, SettingValue>,
    definition: Option<BTreeMap<String, Domain>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definition<I, K>(definition: I) -> Self
    where
        I: IntoIterator<Item = (K, Domain)>,
        K: Into<String>,
    {
        let definition: BTreeMap<String, Domain> = definition
            .into_iter()
            .map(|(k, d)| (k.into(), d))
            .collect();
        let values = definition
            .keys()
            .map(|k| (k.clone(), SettingValue::Unset))
            .collect();
        Settings {
            values,
            definition: Some(definition),
        }
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.values.get(path).and_then(SettingValue::as_value)
    }

    pub fn is_defined(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> PkgIdResult<()> {
        let value = value.into();
        check_entry("settings", path, value.as_str())?;
        if let Some(definition) = &self.definition {
            let domain = definition.get(path).ok_or_else(|| PkgIdError::UndefinedKey {
                kind: "setting",
                key: path.to_string(),
            })?;
            domain.check(&format!("settings.{path}"), &value)?;
        }
        tracing::trace!(setting = path, value = %value, "setting assigned");
        self.values
            .insert(path.to_string(), SettingValue::Defined(value));
        Ok(())
    }

    /// Unset `path` and every setting nested below it.
    pub fn unset(&mut self, path: &str) {
        let prefix = format!("{path}.");
        for (key, slot) in self.values.iter_mut() {
            if key == path || key.starts_with(&prefix) {
                *slot = SettingValue::Unset;
            }
        }
    }

    /// Mark every setting unset.
    pub fn clear(&mut self) {
        for slot in self.values.values_mut() {
            *slot = SettingValue::Unset;
        }
    }

    /// Defined settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .filter_map(|(k, v)| v.as_value().map(|v| (k.as_str(), v)))
    }

    pub fn dumps(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build an open tree from `key=value` lines.
    pub fn loads(text: &str) -> PkgIdResult<Settings> {
        Self::from_lines(text.lines().enumerate().map(|(idx, line)| (idx + 1, line)))
    }

    /// Build an open tree from numbered lines, so errors point into
    /// the enclosing document.
    pub(crate) fn from_lines<'a, I>(lines: I) -> PkgIdResult<Settings>
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut settings = Settings::new();
        for (line_no, line) in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = split_key_value(line, line_no)?;
            settings.set(key, value)?;
        }
        Ok(settings)
    }
}
