use pumukit_model::{BroadcastType, EmbeddedBroadcast, MultimediaObject};
use pumukit_types::MultimediaObjectId;

// ── BroadcastType ────────────────────────────────────────────────

#[test]
fn all_types_in_presentation_order() {
    let all = BroadcastType::all();
    assert_eq!(
        all,
        [
            (BroadcastType::Public, "Public"),
            (BroadcastType::Password, "Password protected"),
            (BroadcastType::Login, "Only logged in Users"),
            (BroadcastType::Groups, "Only Users in Groups"),
        ]
    );
}

#[test]
fn from_code_known_values() {
    assert_eq!(BroadcastType::from_code("public"), BroadcastType::Public);
    assert_eq!(BroadcastType::from_code("password"), BroadcastType::Password);
    assert_eq!(BroadcastType::from_code("login"), BroadcastType::Login);
    assert_eq!(BroadcastType::from_code("groups"), BroadcastType::Groups);
}

#[test]
fn from_code_unknown_falls_back_to_public() {
    assert_eq!(BroadcastType::from_code(""), BroadcastType::Public);
    assert_eq!(BroadcastType::from_code("vip"), BroadcastType::Public);
}

#[test]
fn code_display_roundtrip() {
    for (t, _) in BroadcastType::all() {
        assert_eq!(BroadcastType::from_code(&t.to_string()), t);
    }
}

#[test]
fn serializes_as_snake_case() {
    assert_eq!(serde_json::to_string(&BroadcastType::Login).unwrap(), "\"login\"");
}

// ── EmbeddedBroadcast ────────────────────────────────────────────

#[test]
fn for_type_sets_display_name() {
    let b = EmbeddedBroadcast::for_type(BroadcastType::Password);
    assert_eq!(b.broadcast_type, BroadcastType::Password);
    assert_eq!(b.name, "Password protected");
    assert!(b.password.is_none());
    assert!(b.groups.is_empty());
}

#[test]
fn default_is_public() {
    assert_eq!(EmbeddedBroadcast::default(), EmbeddedBroadcast::public());
    assert_eq!(EmbeddedBroadcast::default().name, "Public");
}

#[test]
fn clone_resource_copies_password_and_groups() {
    let mut original = EmbeddedBroadcast::for_type(BroadcastType::Groups);
    original.password = Some("secret".to_string());
    original.add_group("lecturers");
    original.add_group("students");

    let copy = original.clone_resource();
    assert_eq!(copy, original);
}

#[test]
fn clone_resource_drops_empty_password() {
    let mut original = EmbeddedBroadcast::for_type(BroadcastType::Password);
    original.password = Some(String::new());
    let copy = original.clone_resource();
    assert!(copy.password.is_none());
}

#[test]
fn groups_are_deduplicated() {
    let mut b = EmbeddedBroadcast::for_type(BroadcastType::Groups);
    b.add_group("staff");
    b.add_group("staff");
    assert_eq!(b.groups, vec!["staff".to_string()]);
    assert!(b.contains_group("staff"));
    assert!(b.remove_group("staff"));
    assert!(!b.remove_group("staff"));
    assert!(!b.contains_group("staff"));
}

#[test]
fn serialized_field_is_named_type() {
    let json = serde_json::to_value(EmbeddedBroadcast::public()).unwrap();
    assert_eq!(json["type"], "public");
    assert_eq!(json["name"], "Public");
    assert!(json.get("password").is_none());
}

// ── On the object ────────────────────────────────────────────────

#[test]
fn new_object_is_public() {
    let mm = MultimediaObject::new(MultimediaObjectId::new(), "t");
    assert_eq!(mm.embedded_broadcast().broadcast_type, BroadcastType::Public);
}

#[test]
fn set_broadcast_by_type_replaces_settings() {
    let mut mm = MultimediaObject::new(MultimediaObjectId::new(), "t");
    let mut groups = EmbeddedBroadcast::for_type(BroadcastType::Groups);
    groups.add_group("staff");
    mm.set_embedded_broadcast(groups);

    mm.set_broadcast_by_type(BroadcastType::Login);
    assert_eq!(mm.embedded_broadcast(), &EmbeddedBroadcast::for_type(BroadcastType::Login));
}
