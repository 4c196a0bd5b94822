//! Scalar values shared by settings and options.

use pkgid_types::{PkgIdError, PkgIdResult};
use std::fmt;

/// A defined scalar, kept in its literal text form.
///
/// Booleans render as `True`/`False`, so `false` is a real value like any other.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value(String);

impl Value {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value(if value { "True" } else { "False" }.to_string())
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value(value.to_string())
            }
        })*
    };
}

value_from_int!(i32, i64, u32, u64, usize);

/// Option slot: a defined value or the absent sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum OptionValue {
    Defined(Value),
    #[default]
    Absent,
}

impl OptionValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            OptionValue::Defined(v) => Some(v),
            OptionValue::Absent => None,
        }
    }
}

/// Setting slot: a defined value or unset.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SettingValue {
    Defined(Value),
    #[default]
    Unset,
}

impl SettingValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            SettingValue::Defined(v) => Some(v),
            SettingValue::Unset => None,
        }
    }
}

/// The legal values of a declared setting or option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Domain {
    Any,
    OneOf { values: Vec<Value>, nullable: bool },
}

impl Domain {
    pub fn of<I, V>(values: I) -> Domain
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Domain::OneOf {
            values: values.into_iter().map(Into::into).collect(),
            nullable: false,
        }
    }

    /// Also admit the absent/unset state.
    pub fn or_absent(self) -> Domain {
        match self {
            Domain::Any => Domain::Any,
            Domain::OneOf { values, .. } => Domain::OneOf {
                values,
                nullable: true,
            },
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        match self {
            Domain::Any => true,
            Domain::OneOf { values, .. } => values.contains(value),
        }
    }

    pub fn allows_absent(&self) -> bool {
        match self {
            Domain::Any => true,
            Domain::OneOf { nullable, .. } => *nullable,
        }
    }

    pub(crate) fn check(&self, key: &str, value: &Value) -> PkgIdResult<()> {
        if self.contains(value) {
            return Ok(());
        }
        Err(PkgIdError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            allowed: self.describe(),
        })
    }

    fn describe(&self) -> String {
        match self {
            Domain::Any => "ANY".to_string(),
            Domain::OneOf { values, nullable } => {
                let mut names: Vec<&str> = Vec::new();
                if *nullable {
                    names.push("None");
                }
                names.extend(values.iter().map(Value::as_str));
                format!("[{}]", names.join(", "))
            }
        }
    }
}

/// Keys and values must survive the `key=value` line format unchanged: a
/// key may not be empty or hold `=`, brackets or whitespace, and a value
/// may not span lines.
pub(crate) fn check_entry(kind: &str, key: &str, value: &str) -> PkgIdResult<()> {
    if key.is_empty()
        || key
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '=' | '[' | ']'))
    {
        return Err(PkgIdError::InvalidValue {
            key: kind.to_string(),
            value: key.to_string(),
            allowed: "a non-empty key without '=', '[', ']' or whitespace".to_string(),
        });
    }
    if value.contains(['\r', '\n']) {
        return Err(PkgIdError::InvalidValue {
            key: format!("{kind}.{key}"),
            value: value.to_string(),
            allowed: "a single-line value".to_string(),
        });
    }
    Ok(())
}

/// Parse one `key=value` content line of an info section.
pub(crate) fn split_key_value(line: &str, line_no: usize) -> PkgIdResult<(&str, &str)> {
    match line.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(PkgIdError::InvalidInfo {
            line: line_no,
            reason: format!("expected key=value, found '{line}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_render_like_declarations() {
        assert_eq!(Value::from(false).as_str(), "False");
        assert_eq!(Value::from(true).as_str(), "True");
        assert_eq!(Value::from(1).as_str(), "1");
    }

    #[test]
    fn domain_rejects_outside_values_with_listing() {
        let domain = Domain::of(["1"]).or_absent();
        assert!(domain.allows_absent());
        let err = domain.check("other", &Value::from("2")).expect_err("outside domain");
        assert_eq!(
            err,
            PkgIdError::InvalidValue {
                key: "other".to_string(),
                value: "2".to_string(),
                allowed: "[None, 1]".to_string(),
            }
        );
        assert!(Domain::Any.check("x", &Value::from("whatever")).is_ok());
    }

    #[test]
    fn entries_must_fit_one_line_of_key_value_text() {
        assert!(check_entry("options", "shared", "").is_ok());
        assert!(check_entry("options", "flags", "-O2 -g=1").is_ok());
        for key in ["", "a=b", "os arch", "[requires]", "x\n"] {
            assert!(
                matches!(
                    check_entry("options", key, "1"),
                    Err(PkgIdError::InvalidValue { ref key, .. }) if key == "options"
                ),
                "{key:?}"
            );
        }
        assert_eq!(
            check_entry("settings", "os", "Linux\r"),
            Err(PkgIdError::InvalidValue {
                key: "settings.os".to_string(),
                value: "Linux\r".to_string(),
                allowed: "a single-line value".to_string(),
            })
        );
    }
}
