//! Flat build options with distinct absent and `False` states.

use crate::value::{Domain, OptionValue, Value, check_entry, split_key_value};
use pkgid_types::{PkgIdError, PkgIdResult};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
struct OptionSlot {
    domain: Domain,
    value: OptionValue,
}

/// Options map. `False` and empty strings are real values and are
/// serialized; only the absent sentinel is omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    slots: BTreeMap<String, OptionSlot>,
    closed: bool,
}

impl Options {
    /// An open map: any option name may be assigned, with any value.
    pub fn new() -> Self {
        Self::default()
    }

    /// A closed map of declared options, all starting absent.
    pub fn with_definition<I, K>(definition: I) -> Self
    where
        I: IntoIterator<Item = (K, Domain)>,
        K: Into<String>,
    {
        let slots = definition
            .into_iter()
            .map(|(name, domain)| {
                (
                    name.into(),
                    OptionSlot {
                        domain,
                        value: OptionValue::Absent,
                    },
                )
            })
            .collect();
        Options {
            slots,
            closed: true,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).and_then(|s| s.value.as_value())
    }

    pub fn value(&self, name: &str) -> Option<&OptionValue> {
        self.slots.get(name).map(|s| &s.value)
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> PkgIdResult<()> {
        let value = value.into();
        check_entry("options", name, value.as_str())?;
        if self.closed {
            let slot = self.slots.get_mut(name).ok_or_else(|| PkgIdError::UndefinedKey {
                kind: "option",
                key: name.to_string(),
            })?;
            slot.domain.check(&format!("options.{name}"), &value)?;
            slot.value = OptionValue::Defined(value);
        } else {
            self.slots.insert(
                name.to_string(),
                OptionSlot {
                    domain: Domain::Any,
                    value: OptionValue::Defined(value),
                },
            );
        }
        tracing::trace!(option = name, "option assigned");
        Ok(())
    }

    /// Drop an option entirely, declaration included.
    pub fn remove(&mut self, name: &str) -> bool {
        self.slots.remove(name).is_some()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Every declared option must hold a value unless its domain admits absence.
    pub fn validate(&self) -> PkgIdResult<()> {
        for (name, slot) in &self.slots {
            if slot.value == OptionValue::Absent && !slot.domain.allows_absent() {
                return Err(PkgIdError::MissingValue {
                    key: format!("options.{name}"),
                });
            }
        }
        Ok(())
    }

    /// Defined options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots
            .iter()
            .filter_map(|(k, s)| s.value.as_value().map(|v| (k.as_str(), v)))
    }

    pub fn dumps(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build an open map from `key=value` lines.
    pub fn loads(text: &str) -> PkgIdResult<Options> {
        Self::from_lines(text.lines().enumerate().map(|(idx, line)| (idx + 1, line)))
    }

    /// Build an open map from numbered lines, so errors point into
    /// the enclosing document.
    pub(crate) fn from_lines<'a, I>(lines: I) -> PkgIdResult<Options>
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut options = Options::new();
        for (line_no, line) in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = split_key_value(line, line_no)?;
            options.set(key, value)?;
        }
        Ok(options)
    }
}
