//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Domain byte strings are unique, null-terminated and namespaced
//! 2. `canonical_hash` is SHA-256 over prefix then payload, hex-encoded
//! 3. No raw domain literals in production source outside `proof/hash.rs`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use statespace_kernel::proof::hash::{
    canonical_hash, DOMAIN_OPERATOR_REGISTRY, DOMAIN_RUN_REPORT, DOMAIN_SEARCH_TRACE,
    DOMAIN_STATE,
};

const ALL: [&[u8]; 4] = [
    DOMAIN_STATE,
    DOMAIN_OPERATOR_REGISTRY,
    DOMAIN_SEARCH_TRACE,
    DOMAIN_RUN_REPORT,
];

// ---------------------------------------------------------------------------
// 1. Domain shape
// ---------------------------------------------------------------------------

#[test]
fn domains_are_unique() {
    let unique: BTreeSet<&[u8]> = ALL.into_iter().collect();
    assert_eq!(unique.len(), ALL.len());
}

#[test]
fn domains_follow_naming_convention() {
    for domain in ALL {
        let text = String::from_utf8_lossy(domain);
        assert!(domain.starts_with(b"STATESPACE::"), "{text}");
        assert!(domain.ends_with(b"::V1\0"), "{text}");
        assert_eq!(domain.iter().filter(|&&b| b == 0).count(), 1, "{text}");
    }
}

// ---------------------------------------------------------------------------
// 2. Algorithm lock
// ---------------------------------------------------------------------------

#[test]
fn canonical_hash_matches_independent_sha256() {
    let payload = b"{\"a\":1}";
    for domain in ALL {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        hasher.update(payload);
        let expected = format!("sha256:{}", hex::encode(hasher.finalize()));
        assert_eq!(canonical_hash(domain, payload).as_str(), expected);
    }
}

// ---------------------------------------------------------------------------
// 3. Single authority for domain literals
// ---------------------------------------------------------------------------

#[test]
fn no_raw_domain_literals_outside_authority() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let pattern = concat!("b\"", "STATESPACE::");
    let mut violations = Vec::new();

    for crate_dir in ["kernel", "search", "harness"] {
        for path in rust_files(&root.join(crate_dir).join("src")) {
            if path.ends_with("proof/hash.rs") {
                continue;
            }
            let source = std::fs::read_to_string(&path).unwrap();
            for (n, line) in source.lines().enumerate() {
                if line.contains(pattern) {
                    violations.push(format!("{}:{}", path.display(), n + 1));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "raw domain literals found outside proof/hash.rs:\n{}",
        violations.join("\n")
    );
}

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }
    files
}
