use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// The version segment of a reference.
///
/// A version is `Numeric` when its core is one to three dot-separated decimal
/// components, optionally followed by `-prerelease` and `+build_metadata`.
/// Anything else (`develop`, `1.2.3.4`, `1.Y.Z`) is kept as `Raw` text and is
/// never truncated or zero-filled by any mode.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Version {
    Numeric(NumericVersion),
    Raw(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NumericVersion {
    text: String,
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
    prerelease: Option<String>,
    build_metadata: Option<String>,
}

impl Version {
    /// Decompose a version string. Only an empty string is rejected; every
    /// other input is at worst a `Raw` version.
    pub fn parse(text: &str) -> Option<Version> {
        if text.is_empty() {
            return None;
        }
        Some(match NumericVersion::parse(text) {
            Some(v) => Version::Numeric(v),
            None => Version::Raw(text.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Version::Numeric(v) => &v.text,
            Version::Raw(s) => s,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Version::Numeric(_))
    }

    pub fn major(&self) -> Option<u64> {
        self.numeric().map(|v| v.major)
    }

    pub fn minor(&self) -> Option<u64> {
        self.numeric().and_then(|v| v.minor)
    }

    pub fn patch(&self) -> Option<u64> {
        self.numeric().and_then(|v| v.patch)
    }

    pub fn prerelease(&self) -> Option<&str> {
        self.numeric().and_then(|v| v.prerelease.as_deref())
    }

    pub fn build_metadata(&self) -> Option<&str> {
        self.numeric().and_then(|v| v.build_metadata.as_deref())
    }

    fn numeric(&self) -> Option<&NumericVersion> {
        match self {
            Version::Numeric(v) => Some(v),
            Version::Raw(_) => None,
        }
    }

    /// `MAJOR.Y.Z`, except that a `0.x` release keeps its full text.
    pub fn stable(&self) -> Cow<'_, str> {
        match self {
            Version::Numeric(v) if v.major == 0 => Cow::Borrowed(&v.text),
            _ => self.major_form(),
        }
    }

    /// `MAJOR.Y.Z`
    pub fn major_form(&self) -> Cow<'_, str> {
        match self {
            Version::Numeric(v) => Cow::Owned(format!("{}.Y.Z", v.major)),
            Version::Raw(s) => Cow::Borrowed(s),
        }
    }

    /// `MAJOR.MINOR.Z`
    pub fn minor_form(&self) -> Cow<'_, str> {
        match self {
            Version::Numeric(v) => {
                Cow::Owned(format!("{}.{}.Z", v.major, v.minor.unwrap_or(0)))
            }
            Version::Raw(s) => Cow::Borrowed(s),
        }
    }

    /// `MAJOR.MINOR.PATCH`, missing components filled with `0`.
    pub fn patch_form(&self) -> Cow<'_, str> {
        match self {
            Version::Numeric(v) => Cow::Owned(format!(
                "{}.{}.{}",
                v.major,
                v.minor.unwrap_or(0),
                v.patch.unwrap_or(0)
            )),
            Version::Raw(s) => Cow::Borrowed(s),
        }
    }

    /// The version text without build metadata.
    pub fn base(&self) -> &str {
        match self {
            Version::Numeric(v) => match v.text.split_once('+') {
                Some((base, _)) => base,
                None => &v.text,
            },
            Version::Raw(s) => s,
        }
    }
}

impl NumericVersion {
    fn parse(text: &str) -> Option<NumericVersion> {
        let (rest, build_metadata) = match text.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (text, None),
        };
        let (core, prerelease) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };
        if prerelease.is_some_and(str::is_empty) || build_metadata.is_some_and(str::is_empty) {
            return None;
        }

        let mut components = Vec::with_capacity(3);
        for part in core.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            components.push(part.parse::<u64>().ok()?);
        }
        if components.len() > 3 {
            return None;
        }

        Some(NumericVersion {
            text: text.to_string(),
            major: components[0],
            minor: components.get(1).copied(),
            patch: components.get(2).copied(),
            prerelease: prerelease.map(str::to_string),
            build_metadata: build_metadata.map(str::to_string),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        match value {
            Version::Numeric(v) => v.text,
            Version::Raw(s) => s,
        }
    }
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Version::parse(&value).ok_or_else(|| "version must not be empty".to_string())
    }
}
