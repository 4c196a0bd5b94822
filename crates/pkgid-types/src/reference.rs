use crate::error::{PkgIdError, PkgIdResult};
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fully or partially pinned package reference:
///
/// `name/version[@user/channel][#recipe_revision][:package_id][#package_revision]`
///
/// Revisions and the package id are opaque tokens and are never interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Reference {
    pub name: String,
    pub version: Version,
    pub user: Option<String>,
    pub channel: Option<String>,
    pub recipe_revision: Option<String>,
    pub package_id: Option<String>,
    pub package_revision: Option<String>,
}

impl Reference {
    pub fn parse(text: &str) -> PkgIdResult<Reference> {
        let (recipe, package) = match text.split_once(':') {
            Some((recipe, package)) => (recipe, Some(package)),
            None => (text, None),
        };

        let (recipe_body, recipe_revision) = split_token(text, recipe, '#', "recipe_revision")?;
        let (name_version, user_channel) = match recipe_body.split_once('@') {
            Some((nv, uc)) => (nv, Some(uc)),
            None => (recipe_body, None),
        };

        let Some((name, version)) = name_version.split_once('/') else {
            return Err(PkgIdError::reference(
                text,
                "name",
                "must be followed by '/version'",
            ));
        };
        check_token(text, name, "name")?;
        check_token(text, version, "version")?;
        let version = Version::parse(version)
            .ok_or_else(|| PkgIdError::reference(text, "version", "is empty"))?;

        let (user, channel) = match user_channel {
            None => (None, None),
            Some(uc) => {
                let Some((user, channel)) = uc.split_once('/') else {
                    return Err(PkgIdError::reference(
                        text,
                        "user",
                        "must be followed by '/channel'",
                    ));
                };
                check_token(text, user, "user")?;
                check_token(text, channel, "channel")?;
                (Some(user.to_string()), Some(channel.to_string()))
            }
        };

        let (package_id, package_revision) = match package {
            None => (None, None),
            Some(package) => {
                let (id, revision) = split_token(text, package, '#', "package_revision")?;
                check_token(text, id, "package_id")?;
                (Some(id.to_string()), revision)
            }
        };

        Ok(Reference {
            name: name.to_string(),
            version,
            user,
            channel,
            recipe_revision,
            package_id,
            package_revision,
        })
    }
}

/// Split `part` on the first `sep`; the trailing token must be well formed.
fn split_token<'a>(
    text: &str,
    part: &'a str,
    sep: char,
    segment: &'static str,
) -> PkgIdResult<(&'a str, Option<String>)> {
    match part.split_once(sep) {
        None => Ok((part, None)),
        Some((head, token)) => {
            check_token(text, token, segment)?;
            Ok((head, Some(token.to_string())))
        }
    }
}

fn check_token(text: &str, token: &str, segment: &'static str) -> PkgIdResult<()> {
    if token.is_empty() {
        return Err(PkgIdError::reference(text, segment, "is empty"));
    }
    if let Some(c) = token
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '/' | '@' | '#' | ':'))
    {
        return Err(PkgIdError::reference(
            text,
            segment,
            format!("contains unexpected character {c:?}"),
        ));
    }
    Ok(())
}

impl FromStr for Reference {
    type Err = PkgIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reference::parse(s)
    }
}

/// The full pin; every present field, nothing synthesized.
impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)?;
        if let (Some(user), Some(channel)) = (&self.user, &self.channel) {
            write!(f, "@{user}/{channel}")?;
        }
        if let Some(rrev) = &self.recipe_revision {
            write!(f, "#{rrev}")?;
        }
        if let Some(id) = &self.package_id {
            write!(f, ":{id}")?;
        }
        if let Some(prev) = &self.package_revision {
            write!(f, "#{prev}")?;
        }
        Ok(())
    }
}

impl From<Reference> for String {
    fn from(value: Reference) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Reference {
    type Error = PkgIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Reference::parse(&value)
    }
}
