//! Pure package-id computation (no IO).
//!
//! Input: settings, options and resolved dependency references handed in by
//! the graph resolver.
//! Output: the canonical info text and the package id derived from it.

#![forbid(unsafe_code)]

pub mod fingerprint;
pub mod info;
pub mod options;
pub mod policy;
pub mod render;
pub mod requirements;
pub mod settings;
pub mod value;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use info::{Info, MinInfo};
pub use options::Options;
pub use policy::ModePolicy;
pub use render::render;
pub use requirements::{PythonRequiresInfo, RequirementItem, RequirementsInfo};
pub use settings::Settings;
pub use value::{Domain, OptionValue, SettingValue, Value};
