//! Wire format: identity checksum followed by native-order payload fields

use similar_asserts::assert_eq;
use switchboard_codec::{memcrc, ByteBuffer, HashedId};
use switchboard_core::{Event, EventFactory, SimpleEvent};

#[test]
fn identities_hash_to_reference_values() {
    assert_eq!(memcrc("test"), 0x338B_CFAC);
    assert_eq!(HashedId::new("mock_event").checksum(), 0xC3CE_A198);
}

#[test]
fn simple_event_serializes_to_its_checksum() {
    let mut wire = ByteBuffer::new();
    SimpleEvent::new("mock_event", 0, 0).serialize(&mut wire);

    assert_eq!(wire.size(), 4);
    assert_eq!(wire.data(), 0xC3CE_A198u32.to_ne_bytes().as_slice());
}

#[test]
fn factory_rebuilds_events_from_a_stream() {
    let mut wire = ByteBuffer::new();
    for name in ["spawn", "despawn", "spawn"] {
        SimpleEvent::new(name, 0, 0).serialize(&mut wire);
    }

    let mut factory = EventFactory::new();
    factory.register_simple("spawn").register_simple("despawn");

    let mut names = Vec::new();
    while wire.remaining() > 0 {
        let event = factory.decode(&mut wire).unwrap();
        names.push(event.event_type().text().to_string());
    }
    assert_eq!(names, vec!["spawn", "despawn", "spawn"]);
}
