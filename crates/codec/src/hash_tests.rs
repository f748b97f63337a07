use super::*;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};
use yare::parameterized;

#[parameterized(
    short_word = { "test", 0x338B_CFAC },
    anothertest = { "anothertest", 0x2643_D57C },
    a_third_test = { "aThirdTest", 0x1952_2193 },
    test_hash_string = { "test_hash_string", 0x107D_0089 },
    mock_event = { "mock_event", 0xC3CE_A198 },
)]
fn memcrc_matches_reference_vectors(input: &str, expected: u32) {
    assert_eq!(memcrc(input), expected);
    assert_eq!(HashedId::new(input).checksum(), expected);
    assert_eq!(HashedId::new(input.to_string()).checksum(), expected);
}

#[test]
fn empty_string_has_defined_checksum() {
    assert_eq!(memcrc(""), 0);
    assert_eq!(HashedId::new("").checksum(), 0);
}

#[test]
fn text_is_kept_for_diagnostics() {
    let id = HashedId::new("test_hash_string");
    assert_eq!(id.text(), "test_hash_string");
    assert_eq!(id.to_string(), "test_hash_string");
}

#[test]
fn static_identity_matches_runtime_identity() {
    static MOCK: HashedId = HashedId::from_static("mock_event");
    assert_eq!(MOCK, HashedId::new("mock_event"));
    assert_eq!(MOCK.text(), "mock_event");
}

#[test]
fn identities_compare_by_checksum() {
    let a = HashedId::new("test_string1");
    let b = HashedId::new("another_hash_string");
    let c = HashedId::new("another_hash_string");

    assert_ne!(a, b);
    assert_eq!(b, c);
    assert_eq!(a < b, a.checksum() < b.checksum());
    assert_eq!(a > b, a.checksum() > b.checksum());
}

#[test]
fn usable_as_container_key() {
    let mut ordered = BTreeMap::new();
    ordered.insert(HashedId::new("test_string1"), 1);
    ordered.insert(HashedId::new("test_string2"), 2);

    let mut hashed = HashMap::new();
    hashed.insert(HashedId::new("test_string1"), 1);

    assert_eq!(ordered.get(&HashedId::new("test_string2")), Some(&2));
    assert_eq!(hashed.get(&HashedId::new("test_string1")), Some(&1));
    assert_eq!(ordered.len(), 2);
}

proptest! {
    #[test]
    fn equality_follows_checksum(s in ".{0,24}", t in ".{0,24}") {
        let (a, b) = (HashedId::new(s.as_str()), HashedId::new(t.as_str()));
        prop_assert_eq!(a == b, memcrc(&s) == memcrc(&t));
        prop_assert_eq!(a.cmp(&b), memcrc(&s).cmp(&memcrc(&t)));
    }
}
