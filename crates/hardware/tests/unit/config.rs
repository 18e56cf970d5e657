//! # Configuration Tests
//!
//! JSON parsing, defaults, validation, and file loading for `TagStoreConfig`.

use std::io::Write;

use pretty_assertions::assert_eq;
use rrip_core::common::ConfigError;
use rrip_core::config::{PolicyKind, TagStoreConfig};
use rrip_core::TagStore;
use rstest::rstest;

#[test]
fn defaults_are_64_sets_of_4_ways() {
    let config = TagStoreConfig::default();
    assert_eq!(config.num_sets, 64);
    assert_eq!(config.associativity, 4);
    assert_eq!(config.alloc_assoc, None);
    assert_eq!(config.alloc_ways(), 4);
    assert_eq!(config.block_size, 64);
    assert_eq!(config.policy, PolicyKind::Srrip);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_json_yields_defaults() {
    let config = TagStoreConfig::from_json("{}").unwrap();
    assert_eq!(config, TagStoreConfig::default());
}

#[test]
fn full_json_overrides_every_field() {
    let config = TagStoreConfig::from_json(
        r#"{
            "num_sets": 256,
            "associativity": 16,
            "alloc_assoc": 12,
            "block_size": 128,
            "policy": "LRU"
        }"#,
    )
    .unwrap();

    assert_eq!(
        config,
        TagStoreConfig {
            num_sets: 256,
            associativity: 16,
            alloc_assoc: Some(12),
            block_size: 128,
            policy: PolicyKind::Lru,
        }
    );
}

#[rstest]
#[case("\"SRRIP\"", PolicyKind::Srrip)]
#[case("\"Srrip\"", PolicyKind::Srrip)]
#[case("\"srrip\"", PolicyKind::Srrip)]
#[case("\"LRU\"", PolicyKind::Lru)]
#[case("\"lru\"", PolicyKind::Lru)]
fn policy_names_accept_aliases(#[case] json: &str, #[case] expected: PolicyKind) {
    let config = TagStoreConfig::from_json(&format!("{{\"policy\": {json}}}")).unwrap();
    assert_eq!(config.policy, expected);
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let err = TagStoreConfig::from_json(r#"{"policy": "Random"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_field_is_a_parse_error() {
    let err = TagStoreConfig::from_json(r#"{"rrpv_max": 7}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[rstest]
#[case::zero_ways(64, 0, None, 64)]
#[case::zero_alloc(64, 4, Some(0), 64)]
#[case::alloc_too_big(64, 4, Some(5), 64)]
#[case::zero_sets(0, 4, None, 64)]
#[case::odd_sets(48, 4, None, 64)]
#[case::odd_block(64, 4, None, 48)]
#[case::tiny_block(64, 4, None, 2)]
fn invalid_geometry_is_rejected(
    #[case] num_sets: usize,
    #[case] associativity: usize,
    #[case] alloc_assoc: Option<usize>,
    #[case] block_size: usize,
) {
    let config = TagStoreConfig {
        num_sets,
        associativity,
        alloc_assoc,
        block_size,
        policy: PolicyKind::Srrip,
    };
    assert!(config.validate().is_err());
    assert!(TagStore::new(&config).is_err());
}

#[test]
fn zero_allocatable_ways_fails_at_construction() {
    let config = TagStoreConfig {
        alloc_assoc: Some(0),
        ..TagStoreConfig::default()
    };
    let err = TagStore::new(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroAllocatableWays));
}

#[test]
fn alloc_above_assoc_reports_both_counts() {
    let config = TagStoreConfig {
        associativity: 4,
        alloc_assoc: Some(6),
        ..TagStoreConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::AllocExceedsAssociativity { alloc: 6, assoc: 4 }
    ));
    assert_eq!(
        err.to_string(),
        "allocatable associativity 6 exceeds associativity 4"
    );
}

#[test]
fn single_set_direct_mapped_is_valid() {
    let config = TagStoreConfig {
        num_sets: 1,
        associativity: 1,
        alloc_assoc: None,
        block_size: 4,
        policy: PolicyKind::Srrip,
    };
    assert!(config.validate().is_ok());
}

#[test]
fn load_reads_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"num_sets": 8, "associativity": 2}}"#).unwrap();

    let config = TagStoreConfig::load(file.path()).unwrap();
    assert_eq!(config.num_sets, 8);
    assert_eq!(config.associativity, 2);
    assert_eq!(config.block_size, 64);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = TagStoreConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}
