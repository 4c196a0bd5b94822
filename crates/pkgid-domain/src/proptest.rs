//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Rendering idempotence across parse/render cycles
//! - Full-pin fidelity and zero-filled numeric modes
//! - Deterministic serialization independent of insertion order

use crate::info::Info;
use crate::options::Options;
use crate::render::render;
use crate::requirements::RequirementsInfo;
use crate::settings::Settings;
use pkgid_types::{PackageIdMode, Reference};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,10}").unwrap()
}

fn arb_token() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-f0-9]{4,12}").unwrap()
}

/// Numeric versions with 1-3 components and optional prerelease/build,
/// plus raw tags.
fn arb_version() -> impl Strategy<Value = String> {
    let numeric = (
        prop::collection::vec(0u32..30, 1..=3),
        prop::option::of("[a-z][a-z0-9]{0,5}"),
        prop::option::of("[a-z0-9]{1,6}"),
    )
        .prop_map(|(parts, pre, build)| {
            let mut v = parts
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(".");
            if let Some(pre) = pre {
                v.push('-');
                v.push_str(&pre);
            }
            if let Some(build) = build {
                v.push('+');
                v.push_str(&build);
            }
            v
        });
    prop_oneof![
        4 => numeric,
        1 => prop::string::string_regex("[a-z]{1,8}").unwrap(),
    ]
}

fn arb_reference() -> impl Strategy<Value = Reference> {
    (
        arb_name(),
        arb_version(),
        prop::option::of((arb_name(), arb_name())),
        prop::option::of(arb_token()),
        prop::option::of((arb_token(), prop::option::of(arb_token()))),
    )
        .prop_map(|(name, version, user_channel, rrev, package)| {
            let mut text = format!("{name}/{version}");
            if let Some((user, channel)) = user_channel {
                text.push_str(&format!("@{user}/{channel}"));
            }
            if let Some(rrev) = rrev {
                text.push_str(&format!("#{rrev}"));
            }
            if let Some((id, prev)) = package {
                text.push_str(&format!(":{id}"));
                if let Some(prev) = prev {
                    text.push_str(&format!("#{prev}"));
                }
            }
            Reference::parse(&text).expect("generated reference must parse")
        })
}

fn arb_related_mode() -> impl Strategy<Value = PackageIdMode> {
    prop::sample::select(PackageIdMode::ALL[1..].to_vec())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn rendering_is_idempotent(reference in arb_reference(), mode in arb_related_mode()) {
        let first = render(&reference, mode).expect("related modes render");
        let reparsed = Reference::parse(&first).expect("rendered text must parse");
        let second = render(&reparsed, mode).expect("related modes render");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn package_revision_mode_reproduces_the_reference(reference in arb_reference()) {
        let text = reference.to_string();
        prop_assert_eq!(
            render(&reference, PackageIdMode::PackageRevision),
            Some(text.clone())
        );
        prop_assert_eq!(Reference::parse(&text).expect("parse"), reference);
    }

    #[test]
    fn more_specific_modes_never_drop_fields(reference in arb_reference()) {
        let rendered: Vec<String> = PackageIdMode::ALL[5..]
            .iter()
            .map(|m| render(&reference, *m).expect("related modes render"))
            .collect();
        for pair in rendered.windows(2) {
            prop_assert!(pair[1].len() >= pair[0].len(), "{:?}", pair);
        }
        let full_recipe = render(&reference, PackageIdMode::FullRecipe).expect("renders");
        if let Some(user) = &reference.user {
            let needle = format!("@{user}/");
            prop_assert!(full_recipe.contains(&needle));
        }
        prop_assert!(!full_recipe.contains(':'));
    }

    #[test]
    fn patch_mode_zero_fills(name in arb_name(), major in 0u32..50, minor in 0u32..50) {
        let short = Reference::parse(&format!("{name}/{major}.{minor}")).expect("parse");
        let long = Reference::parse(&format!("{name}/{major}.{minor}.0")).expect("parse");
        prop_assert_eq!(
            render(&short, PackageIdMode::Patch),
            render(&long, PackageIdMode::Patch)
        );
        prop_assert_eq!(
            render(&short, PackageIdMode::Minor),
            render(&long, PackageIdMode::Minor)
        );
    }

    #[test]
    fn dumps_ignore_insertion_order(
        refs in prop::collection::vec(arb_reference(), 1..8),
        mode in arb_related_mode(),
    ) {
        let mut unique = refs;
        unique.sort_by(|a, b| a.name.cmp(&b.name));
        unique.dedup_by(|a, b| a.name == b.name);

        let forward = RequirementsInfo::from_references(unique.iter().cloned(), mode);
        let backward = RequirementsInfo::from_references(unique.iter().rev().cloned(), mode);
        prop_assert_eq!(forward.dumps(), backward.dumps());
    }

    #[test]
    fn info_dumps_is_a_pure_function_of_state(
        refs in prop::collection::vec(arb_reference(), 0..6),
        keys in prop::collection::btree_map("[a-z]{1,6}(\\.[a-z]{1,6})?", "[A-Za-z0-9_]{0,8}", 0..6),
        mode in arb_related_mode(),
    ) {
        let mut settings = Settings::new();
        let mut options = Options::new();
        for (k, v) in &keys {
            settings.set(k, v.as_str()).expect("open settings");
            options.set(k, v.as_str()).expect("open options");
        }
        let mut info = Info::new(
            settings,
            options,
            RequirementsInfo::from_references(refs, PackageIdMode::Semver),
            RequirementsInfo::new(),
            Default::default(),
        );
        info.requires.set_mode(mode);
        let first = info.dumps();
        prop_assert_eq!(&first, &info.dumps());
        prop_assert_eq!(info.package_id(), info.clone().package_id());
    }
}
