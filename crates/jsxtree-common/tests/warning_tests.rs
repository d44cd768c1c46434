//! Tests for the deduplicated warning log.

use jsxtree_common::warning::{clear_warnings, has_warned, warn_once};

#[test]
fn test_warnings_are_recorded_per_component_and_cleared() {
    assert!(!has_warned("Tokenizer", "skipped unrecognized character ':' at 1:4"));

    warn_once("Tokenizer", "skipped unrecognized character ':' at 1:4");
    warn_once("Tokenizer", "skipped unrecognized character ':' at 1:4");
    assert!(has_warned("Tokenizer", "skipped unrecognized character ':' at 1:4"));
    assert!(!has_warned("Parser", "skipped unrecognized character ':' at 1:4"));

    clear_warnings();
    assert!(!has_warned("Tokenizer", "skipped unrecognized character ':' at 1:4"));
}
