use sha2::{Digest, Sha256};

/// Compute the package id for the reduced info text.
///
/// Identity input is exactly the binary-compatibility view of an info:
/// - `[settings]`
/// - `[requires]` (mode-reduced)
/// - `[options]`
/// - `[build_requires]` / `[python_requires]` when they contribute anything
///
/// `[full_*]` sections and `[env]` never reach the hash.
pub fn package_id(reduced_info: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(reduced_info.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_lowercase_hex_sha256() {
        let id = package_id("[settings]\n\n[requires]\n\n[options]\n");
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(id, package_id("[settings]\n\n[requires]\n\n[options]\n"));
        assert_ne!(id, package_id("[settings]\n    os=Linux\n"));
    }

    #[test]
    fn empty_input_matches_known_digest() {
        assert_eq!(
            package_id(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
