//! Fuzz target for reference parsing and mode rendering.
//!
//! Goal: parsing and rendering should **never panic** on any input.
//! A parsed reference must render back to the text it came from under
//! `package_revision_mode` whenever it carries every coordinate.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_reference_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgid_types::{PackageIdMode, Reference};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(reference) = Reference::parse(text) else {
        return;
    };

    for mode in PackageIdMode::ALL {
        let _ = pkgid_domain::render(&reference, mode);
    }

    let pinned = reference.to_string();
    let reparsed = Reference::parse(&pinned).expect("display output parses");
    assert_eq!(reparsed, reference);
});
