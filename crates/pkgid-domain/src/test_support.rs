use crate::info::Info;
use crate::options::Options;
use crate::requirements::{PythonRequiresInfo, RequirementsInfo};
use crate::settings::Settings;
use pkgid_types::{PackageIdMode, Reference};

pub fn reference(text: &str) -> Reference {
    Reference::parse(text).expect("test reference must parse")
}

pub fn requirements(refs: &[&str]) -> RequirementsInfo {
    RequirementsInfo::from_references(refs.iter().map(|r| reference(r)), PackageIdMode::Semver)
}

pub fn python_requires(refs: &[&str], mode: Option<PackageIdMode>) -> PythonRequiresInfo {
    PythonRequiresInfo::from_references(refs.iter().map(|r| reference(r)), mode)
}

pub fn info_with(requires: &[&str], build_requires: &[&str], python: &[&str]) -> Info {
    Info::new(
        Settings::new(),
        Options::new(),
        requirements(requires),
        requirements(build_requires),
        python_requires(python, None),
    )
}
