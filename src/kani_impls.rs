//! Kani Arbitrary implementations and proof harnesses for property verification.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::{Path, QueryParams, normalize_rels, normalize_root_path};

/// Segments drawn from a small alphabet that exercises every branch of the
/// normalizers.
const SEGMENTS: [&str; 4] = ["", ".", "..", "a"];

/// Characters that reach every branch of the query splitter
const QUERY_CHARS: &[u8] = b"a=&";

fn arbitrary_segment() -> String {
    let idx: usize = kani::any();
    SEGMENTS[idx % SEGMENTS.len()].to_string()
}

fn arbitrary_segments(max: usize) -> Vec<String> {
    let len: usize = kani::any();
    let len = len % (max + 1);
    (0..len).map(|_| arbitrary_segment()).collect()
}

fn arbitrary_query(max: usize) -> String {
    let len: usize = kani::any();
    let len = len % (max + 1);
    (0..len)
        .map(|_| {
            let idx: usize = kani::any();
            QUERY_CHARS[idx % QUERY_CHARS.len()] as char
        })
        .collect()
}

// ============================================================================
// Kani Proof Harnesses
// ============================================================================

/// Proof: normalizing relative segments twice equals normalizing once
#[kani::proof]
#[kani::unwind(6)]
fn proof_normalize_rels_idempotent() {
    let segments = arbitrary_segments(4);
    let once = normalize_rels(&segments);
    assert_eq!(normalize_rels(&once), once);
}

/// Proof: normalized segments never contain dot segments
#[kani::proof]
#[kani::unwind(6)]
fn proof_normalize_rels_removes_dots() {
    let segments = arbitrary_segments(4);
    let resolved = normalize_rels(&segments);
    assert!(resolved.iter().all(|s| s != "." && s != ".."));
    assert!(resolved.len() <= segments.len());
}

/// Proof: a root-normalized segment list is never empty and never a lone
/// empty segment
#[kani::proof]
#[kani::unwind(6)]
fn proof_root_path_segments_invariant() {
    let segments = arbitrary_segments(4);
    match normalize_root_path(segments) {
        Path::Segments(segments) => {
            assert!(!segments.is_empty());
            assert!(!(segments.len() == 1 && segments[0].is_empty()));
        }
        Path::Empty => {}
        Path::Unset => unreachable!("normalization always yields a path"),
    }
}

/// Proof: parsing a query either fails on a doubled '=' or keeps one entry per key
#[kani::proof]
#[kani::unwind(6)]
fn proof_query_keys_unique() {
    let raw = arbitrary_query(4);
    if let Ok(query) = QueryParams::parse(&raw) {
        let keys: Vec<&str> = query.keys().collect();
        for (i, key) in keys.iter().enumerate() {
            assert!(!keys[i + 1..].contains(key));
        }
    }
}
