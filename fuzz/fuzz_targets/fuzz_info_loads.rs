//! Fuzz target for info text loading.
//!
//! Goal: `Info::loads` should **never panic** on any input.
//! It may return errors, but panics are unacceptable. Anything it accepts
//! must dump and hash without panicking too.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_info_loads
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgid_domain::Info;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(mut info) = Info::loads(text)
    {
        let _ = info.dumps();
        let _ = info.package_id();
        let _ = info.serialize_min();
        info.clear();
        let _ = info.dumps();
    }
});
