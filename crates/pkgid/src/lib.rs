//! Package-id computation for C/C++ dependency graphs.
//!
//! One [`Info`] is built per graph node from resolved settings, options and
//! references; its modes are narrowed, and [`Info::package_id`] gives the
//! binary cache key.
//!
//! ```
//! use pkgid::{Info, Reference};
//!
//! let mut info = Info::default();
//! info.settings.set("os", "Linux")?;
//! info.options.set("shared", false)?;
//! info.add_require(Reference::parse("zlib/1.2.11@conan/stable:abc")?);
//! info.requires.minor_mode();
//!
//! assert_eq!(info.requires.dumps(), "zlib/1.2.Z");
//! assert!(info.dumps().contains("shared=False"));
//! assert_eq!(info.serialize_min().full_requires, ["zlib/1.2.11@conan/stable:abc"]);
//! assert_eq!(info.package_id().len(), 64);
//! # Ok::<(), pkgid::PkgIdError>(())
//! ```

#![forbid(unsafe_code)]

pub use pkgid_domain::policy::{ModeOverride, ModePolicy};
pub use pkgid_domain::{
    Domain, Info, MinInfo, OptionValue, Options, PythonRequiresInfo, RequirementItem,
    RequirementsInfo, SettingValue, Settings, Value, render,
};
pub use pkgid_types::{PackageIdMode, PkgIdError, PkgIdResult, Reference, Version};
