//! Mode engine: the canonical text a dependency contributes to an id.
//!
//! Each mode is a projection of the reference; a more specific mode shows
//! every field a less specific one shows. Fields missing from the reference
//! are omitted, never rendered as placeholders. The only synthesized text is
//! the `Y`/`Z`/`0` filler of the numeric modes, so that `0.3` and `0.3.0`
//! compare equal under them. Raw versions are always rendered verbatim.

use pkgid_types::{PackageIdMode, Reference};

/// Render `reference` under `mode`; `None` when the mode excludes it.
pub fn render(reference: &Reference, mode: PackageIdMode) -> Option<String> {
    let version = &reference.version;
    let version = match mode {
        PackageIdMode::Unrelated => return None,
        PackageIdMode::Semver => version.stable(),
        PackageIdMode::Major => version.major_form(),
        PackageIdMode::Minor => version.minor_form(),
        PackageIdMode::Patch => version.patch_form(),
        PackageIdMode::Base => version.base().into(),
        PackageIdMode::FullVersion
        | PackageIdMode::FullRecipe
        | PackageIdMode::FullPackage
        | PackageIdMode::RecipeRevision
        | PackageIdMode::PackageRevision => version.as_str().into(),
    };

    let mut out = format!("{}/{}", reference.name, version);
    if mode >= PackageIdMode::FullRecipe
        && let (Some(user), Some(channel)) = (&reference.user, &reference.channel)
    {
        out.push('@');
        out.push_str(user);
        out.push('/');
        out.push_str(channel);
    }
    if mode >= PackageIdMode::RecipeRevision
        && let Some(rrev) = &reference.recipe_revision
    {
        out.push('#');
        out.push_str(rrev);
    }
    if mode >= PackageIdMode::FullPackage
        && let Some(id) = &reference.package_id
    {
        out.push(':');
        out.push_str(id);
    }
    if mode >= PackageIdMode::PackageRevision
        && let Some(prev) = &reference.package_revision
    {
        out.push('#');
        out.push_str(prev);
    }
    Some(out)
}
