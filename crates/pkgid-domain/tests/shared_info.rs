use pkgid_domain::{Info, Options, PythonRequiresInfo, RequirementsInfo, Settings};
use pkgid_types::{PackageIdMode, Reference};
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn info_is_send_and_sync() {
    assert_send_sync::<Info>();
}

#[test]
fn frozen_info_serializes_identically_from_many_threads() {
    let mut settings = Settings::new();
    settings.set("os", "Linux").expect("open settings");
    let mut options = Options::new();
    options.set("shared", false).expect("open options");
    let requires = RequirementsInfo::from_references(
        ["zlib/1.2.11", "openssl/3.0.8"]
            .into_iter()
            .map(|r| Reference::parse(r).expect("valid")),
        PackageIdMode::Minor,
    );
    let info = Info::new(
        settings,
        options,
        requires,
        RequirementsInfo::new(),
        PythonRequiresInfo::new(None),
    );

    let expected = (info.dumps(), info.package_id());
    let results: Vec<(String, String)> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| (info.dumps(), info.package_id())))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread completes"))
            .collect()
    });
    assert!(results.iter().all(|r| *r == expected));
}

#[test]
fn independent_infos_are_built_concurrently() {
    let ids: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = ["1.2.11", "1.2.12", "1.3.0"]
            .into_iter()
            .map(|version| {
                s.spawn(move || {
                    let mut info = Info::default();
                    info
                        .add_require_str(&format!("zlib/{version}"))
                        .expect("valid");
                    info.requires.minor_mode();
                    info.package_id()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread completes"))
            .collect()
    });
    assert_eq!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);
}
