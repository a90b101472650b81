use strata_types::{DataTypeId, EntityKey, NodeId, TemplateId, UuidFormat, VersionToken};
use std::collections::HashSet;
use std::str::FromStr;

// ── Numeric ids ──────────────────────────────────────────────────

#[test]
fn node_id_wraps_raw_value() {
    let id = NodeId::new(1045);
    assert_eq!(id.get(), 1045);
    assert_eq!(NodeId::from(1045), id);
}

#[test]
fn node_id_root_is_minus_one() {
    assert_eq!(NodeId::ROOT.get(), -1);
}

#[test]
fn numeric_id_display_and_parse() {
    let id = TemplateId::new(7);
    assert_eq!(id.to_string(), "7");
    assert_eq!(TemplateId::from_str("7").unwrap(), id);
    assert_eq!(" 12 ".parse::<DataTypeId>().unwrap(), DataTypeId::new(12));
}

#[test]
fn numeric_id_parse_invalid() {
    let err = NodeId::from_str("abc").unwrap_err();
    assert!(err.to_string().contains("invalid id"));
}

#[test]
fn numeric_id_serializes_transparently() {
    let json = serde_json::to_string(&NodeId::new(42)).unwrap();
    assert_eq!(json, "42");
    let parsed: NodeId = serde_json::from_str("42").unwrap();
    assert_eq!(parsed, NodeId::new(42));
}

#[test]
fn numeric_ids_order_by_value() {
    assert!(NodeId::new(1) < NodeId::new(2));
    assert!(NodeId::ROOT < NodeId::new(0));
}

// ── EntityKey ────────────────────────────────────────────────────

#[test]
fn generated_keys_are_unique() {
    let a = EntityKey::generate(UuidFormat::V4);
    let b = EntityKey::generate(UuidFormat::V4);
    assert_ne!(a, b);
}

#[test]
fn key_format_selects_uuid_version() {
    assert_eq!(EntityKey::generate(UuidFormat::V4).as_uuid().get_version_num(), 4);
    assert_eq!(EntityKey::generate(UuidFormat::V7).as_uuid().get_version_num(), 7);
}

#[test]
fn key_display_and_parse() {
    let key = EntityKey::generate(UuidFormat::V7);
    let parsed = EntityKey::parse(&key.to_string()).unwrap();
    assert_eq!(key, parsed);
    assert_eq!(EntityKey::from_str(&key.to_string()).unwrap(), key);
}

#[test]
fn key_parse_invalid() {
    let err = EntityKey::parse("not-a-uuid").unwrap_err();
    assert!(matches!(err, strata_types::Error::InvalidUuid(_)));
    assert!(matches!(
        VersionToken::from_str("nope"),
        Err(strata_types::Error::InvalidUuid(_))
    ));
}

#[test]
fn key_from_uuid_roundtrip() {
    let uuid = uuid::Uuid::new_v4();
    assert_eq!(EntityKey::from_uuid(uuid).as_uuid(), uuid);
}

#[test]
fn key_hash_and_eq() {
    let key = EntityKey::generate(UuidFormat::V4);
    let mut set = HashSet::new();
    set.insert(key);
    set.insert(key);
    assert_eq!(set.len(), 1);
}

// ── VersionToken ─────────────────────────────────────────────────

#[test]
fn version_tokens_are_unique() {
    let a = VersionToken::generate(UuidFormat::V7);
    let b = VersionToken::generate(UuidFormat::V7);
    assert_ne!(a, b);
}

#[test]
fn version_token_parse_roundtrip() {
    let token = VersionToken::generate(UuidFormat::V4);
    let parsed: VersionToken = token.to_string().parse().unwrap();
    assert_eq!(token, parsed);
}

// ── UuidFormat ───────────────────────────────────────────────────

#[test]
fn uuid_format_default_is_v4() {
    assert_eq!(UuidFormat::default(), UuidFormat::V4);
}

#[test]
fn uuid_format_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&UuidFormat::V7).unwrap(), "\"v7\"");
    let parsed: UuidFormat = serde_json::from_str("\"v4\"").unwrap();
    assert_eq!(parsed, UuidFormat::V4);
}
