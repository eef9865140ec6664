use tank_core::{BbKey, Blackboard};

const DISTANCE: BbKey<f32> = BbKey::named(1, "targetDistance");
const ON_RIGHT: BbKey<bool> = BbKey::named(2, "targetOnRight");

#[test]
fn values_are_overwritten_and_removed() {
    let mut bb = Blackboard::new();
    assert!(!bb.contains(DISTANCE));
    assert!(bb.is_empty());

    bb.set(DISTANCE, 12.5);
    bb.set(ON_RIGHT, true);
    bb.set(DISTANCE, 3.0);

    assert_eq!(bb.len(), 2);
    assert_eq!(bb.get_copied(DISTANCE), Some(3.0));
    assert_eq!(bb.get_copied(ON_RIGHT), Some(true));

    assert_eq!(bb.remove(ON_RIGHT), Some(true));
    assert_eq!(bb.get(ON_RIGHT), None);

    bb.clear();
    assert!(bb.is_empty());
}

#[test]
fn key_name_is_kept_for_introspection() {
    assert_eq!(DISTANCE.name(), "targetDistance");
    assert_eq!(DISTANCE.id(), 1);
    assert_eq!(BbKey::<u8>::new(9).name(), "");
}

#[test]
#[should_panic(expected = "blackboard type mismatch")]
fn reading_with_the_wrong_type_panics() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<f32>::new(1), 1.0f32);
    let _ = bb.get(BbKey::<bool>::new(1));
}
