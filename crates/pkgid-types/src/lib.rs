//! Stable value types used across the pkgid workspace.
//!
//! This crate is intentionally boring:
//! - parsed package references and their versions
//! - the package-id mode names
//! - the error taxonomy shared by every layer

#![forbid(unsafe_code)]

pub mod error;
pub mod mode;
pub mod reference;
pub mod version;

pub use error::{PkgIdError, PkgIdResult};
pub use mode::PackageIdMode;
pub use reference::Reference;
pub use version::Version;
