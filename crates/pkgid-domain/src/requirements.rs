//! Resolved dependency collections and their package-id modes.

use crate::render::render;
use pkgid_types::{PackageIdMode, PkgIdError, PkgIdResult, Reference};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

/// One resolved dependency and the mode currently applied to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequirementItem {
    reference: Reference,
    mode: PackageIdMode,
}

impl RequirementItem {
    pub fn new(reference: Reference, mode: PackageIdMode) -> Self {
        Self { reference, mode }
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn mode(&self) -> PackageIdMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PackageIdMode) {
        self.mode = mode;
    }

    pub fn render(&self) -> Option<String> {
        render(&self.reference, self.mode)
    }
}

/// Dependencies keyed (and therefore ordered) by name.
///
/// The collection mode seeds new items; a bulk mode call reassigns every
/// current item, discarding earlier per-item overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequirementsInfo {
    items: BTreeMap<String, RequirementItem>,
    mode: PackageIdMode,
}

impl RequirementsInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: PackageIdMode) -> Self {
        Self {
            items: BTreeMap::new(),
            mode,
        }
    }

    pub fn from_references<I>(references: I, mode: PackageIdMode) -> Self
    where
        I: IntoIterator<Item = Reference>,
    {
        let mut info = Self::with_mode(mode);
        for reference in references {
            info.add(reference);
        }
        info
    }

    /// Add (or replace) a dependency; it takes the collection's mode.
    pub fn add(&mut self, reference: Reference) {
        let item = RequirementItem::new(reference, self.mode);
        self.items.insert(item.reference.name.clone(), item);
    }

    pub fn add_str(&mut self, reference: &str) -> PkgIdResult<()> {
        self.add(Reference::parse(reference)?);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RequirementItem> {
        self.items.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<RequirementItem> {
        self.items.remove(name)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RequirementItem> {
        self.items.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut RequirementItem> {
        self.items.values_mut()
    }

    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.items.values().map(RequirementItem::reference)
    }

    pub fn mode(&self) -> PackageIdMode {
        self.mode
    }

    /// Apply `mode` to the collection and every current item.
    pub fn set_mode(&mut self, mode: PackageIdMode) {
        tracing::debug!(%mode, items = self.items.len(), "requirements mode set");
        self.mode = mode;
        for item in self.items.values_mut() {
            item.mode = mode;
        }
    }

    pub fn set_mode_by_name(&mut self, name: &str) -> PkgIdResult<()> {
        let mode = name.parse()?;
        self.set_mode(mode);
        Ok(())
    }

    /// Override the mode of a single dependency.
    pub fn set_item_mode(&mut self, name: &str, mode: PackageIdMode) -> PkgIdResult<()> {
        let item = self
            .items
            .get_mut(name)
            .ok_or_else(|| PkgIdError::UndefinedKey {
                kind: "requirement",
                key: name.to_string(),
            })?;
        tracing::debug!(requirement = name, %mode, "requirement mode overridden");
        item.mode = mode;
        Ok(())
    }

    pub fn unrelated_mode(&mut self) {
        self.set_mode(PackageIdMode::Unrelated);
    }

    pub fn semver_mode(&mut self) {
        self.set_mode(PackageIdMode::Semver);
    }

    pub fn major_mode(&mut self) {
        self.set_mode(PackageIdMode::Major);
    }

    pub fn minor_mode(&mut self) {
        self.set_mode(PackageIdMode::Minor);
    }

    pub fn patch_mode(&mut self) {
        self.set_mode(PackageIdMode::Patch);
    }

    pub fn base_mode(&mut self) {
        self.set_mode(PackageIdMode::Base);
    }

    pub fn full_version_mode(&mut self) {
        self.set_mode(PackageIdMode::FullVersion);
    }

    pub fn full_recipe_mode(&mut self) {
        self.set_mode(PackageIdMode::FullRecipe);
    }

    pub fn full_package_mode(&mut self) {
        self.set_mode(PackageIdMode::FullPackage);
    }

    pub fn recipe_revision_mode(&mut self) {
        self.set_mode(PackageIdMode::RecipeRevision);
    }

    pub fn package_revision_mode(&mut self) {
        self.set_mode(PackageIdMode::PackageRevision);
    }

    /// One canonical line per surviving item, by dependency name.
    pub fn dumps(&self) -> String {
        self.items
            .values()
            .filter_map(RequirementItem::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build-time extension requirements. Same shape as [`RequirementsInfo`],
/// but excluded from the id (`unrelated_mode`) unless opted in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PythonRequiresInfo {
    inner: RequirementsInfo,
    default_package_id_mode: PackageIdMode,
}

impl Default for PythonRequiresInfo {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PythonRequiresInfo {
    pub fn new(default_package_id_mode: Option<PackageIdMode>) -> Self {
        let mode = default_package_id_mode.unwrap_or(PackageIdMode::Unrelated);
        Self {
            inner: RequirementsInfo::with_mode(mode),
            default_package_id_mode: mode,
        }
    }

    pub fn from_references<I>(references: I, default_package_id_mode: Option<PackageIdMode>) -> Self
    where
        I: IntoIterator<Item = Reference>,
    {
        let mut info = Self::new(default_package_id_mode);
        for reference in references {
            info.inner.add(reference);
        }
        info
    }

    pub fn default_package_id_mode(&self) -> PackageIdMode {
        self.default_package_id_mode
    }
}

impl Deref for PythonRequiresInfo {
    type Target = RequirementsInfo;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PythonRequiresInfo {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{python_requires, requirements};

    #[test]
    fn dumps_is_sorted_by_name() {
        let reqs = requirements(&["zlib/1.2.11", "bzip2/1.0.8", "poco/2.3.4"]);
        assert_eq!(reqs.dumps(), "bzip2/1.Y.Z\npoco/2.Y.Z\nzlib/1.Y.Z");
    }

    #[test]
    fn bulk_mode_overrides_item_modes() {
        let mut reqs = requirements(&["zlib/1.2.11", "bzip2/1.0.8"]);
        reqs.set_item_mode("zlib", PackageIdMode::Patch).expect("zlib present");
        assert_eq!(reqs.dumps(), "bzip2/1.Y.Z\nzlib/1.2.11");

        reqs.minor_mode();
        assert_eq!(reqs.dumps(), "bzip2/1.0.Z\nzlib/1.2.Z");
        assert!(reqs.iter().all(|i| i.mode() == PackageIdMode::Minor));
    }

    #[test]
    fn new_items_take_the_current_mode() {
        let mut reqs = RequirementsInfo::new();
        reqs.full_version_mode();
        reqs.add_str("openssl/3.0.1+b1").expect("valid");
        assert_eq!(reqs.dumps(), "openssl/3.0.1+b1");
    }

    #[test]
    fn unrelated_and_clear_yield_empty_text() {
        let mut reqs = requirements(&["zlib/1.2.11", "bzip2/1.0.8"]);
        reqs.unrelated_mode();
        assert_eq!(reqs.dumps(), "");
        assert_eq!(reqs.len(), 2);

        reqs.semver_mode();
        reqs.clear();
        assert!(reqs.is_empty());
        assert_eq!(reqs.dumps(), "");
    }

    #[test]
    fn mode_by_name_and_unknown_targets() {
        let mut reqs = requirements(&["zlib/1.2.11"]);
        reqs.set_mode_by_name("patch_mode").expect("known mode");
        assert_eq!(reqs.dumps(), "zlib/1.2.11");
        assert_eq!(
            reqs.set_mode_by_name("nightly_mode"),
            Err(PkgIdError::UnknownMode("nightly_mode".to_string()))
        );
        assert!(matches!(
            reqs.set_item_mode("boost", PackageIdMode::Patch),
            Err(PkgIdError::UndefinedKey { kind: "requirement", .. })
        ));
        assert_eq!(reqs.add_str("broken").map_err(|e| e.is_parse_error()), Err(true));
    }

    #[test]
    fn python_requires_default_to_unrelated() {
        let pyreqs = python_requires(&["pyreq/1.0.0@user/channel"], None);
        assert_eq!(pyreqs.default_package_id_mode(), PackageIdMode::Unrelated);
        assert_eq!(pyreqs.dumps(), "");

        let mut pyreqs = python_requires(&["pyreq/1.2.0@user/channel"], Some(PackageIdMode::Minor));
        assert_eq!(pyreqs.dumps(), "pyreq/1.2.Z");
        pyreqs.full_recipe_mode();
        assert_eq!(pyreqs.dumps(), "pyreq/1.2.0@user/channel");
    }
}
