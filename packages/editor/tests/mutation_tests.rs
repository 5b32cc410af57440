//! Reducer tests against the seed document

use pagecraft_editor::{
    edit_section_field, edit_service_field, reorder_section, reorder_service,
    toggle_section_visibility, toggle_service_visibility, DocumentError, Mutation, MutationError,
    PageDocument, SectionKey, ServiceKey,
};

fn service_order(doc: &PageDocument) -> Vec<&str> {
    doc.service_order().iter().map(|k| k.as_str()).collect()
}

#[test]
fn test_drag_services_onto_info() {
    let doc = PageDocument::seed();

    let next = reorder_section(&doc, SectionKey::Services, SectionKey::Info).unwrap();

    assert_eq!(
        next.section_order(),
        &[SectionKey::Services, SectionKey::Info, SectionKey::Banner]
    );
    assert_eq!(
        doc.section_order(),
        &[SectionKey::Info, SectionKey::Banner, SectionKey::Services]
    );
}

#[test]
fn test_drag_down_takes_target_slot() {
    let doc = PageDocument::seed();

    // Dropping onto a later item lands after it, not before it
    let next = reorder_section(&doc, SectionKey::Info, SectionKey::Services).unwrap();

    assert_eq!(
        next.section_order(),
        &[SectionKey::Banner, SectionKey::Services, SectionKey::Info]
    );
}

#[test]
fn test_reorder_onto_self_is_identity() {
    let doc = PageDocument::seed();

    for key in SectionKey::ALL {
        assert_eq!(reorder_section(&doc, key, key).unwrap(), doc);
    }
    for key in doc.service_order() {
        assert_eq!(reorder_service(&doc, key, key).unwrap(), doc);
    }
}

#[test]
fn test_reorder_service_leaves_sections_shared() {
    let doc = PageDocument::seed();

    let next = reorder_service(
        &doc,
        &ServiceKey::from("prescriptions"),
        &ServiceKey::from("appointments"),
    )
    .unwrap();

    assert_eq!(service_order(&next), vec!["prescriptions", "appointments", "voice"]);
    assert!(next.sections().shares_order(doc.sections()));
    assert!(next.sections().shares_entries(doc.sections()));
    assert!(next.services().shares_entries(doc.services()));
}

#[test]
fn test_toggle_voice_hides_it_from_visible_services() {
    let doc = PageDocument::seed();
    let voice = ServiceKey::from("voice");

    let next = toggle_service_visibility(&doc, &voice).unwrap();

    let visible: Vec<&str> = next.visible_services().map(|s| s.key().as_str()).collect();
    assert_eq!(visible, vec!["appointments", "prescriptions"]);
    assert_eq!(service_order(&next), service_order(&doc));
    assert!(next.services().shares_order(doc.services()));
}

#[test]
fn test_toggle_section_changes_only_that_section() {
    let doc = PageDocument::seed();

    let next = toggle_section_visibility(&doc, SectionKey::Banner).unwrap();

    assert!(!next.section(SectionKey::Banner).unwrap().is_visible());
    assert_eq!(next.section_order(), doc.section_order());
    assert!(next.sections().shares_order(doc.sections()));
    assert!(next.sections().shares_entry(doc.sections(), &SectionKey::Info));
    assert!(next.services().shares_order(doc.services()));
    assert!(next.services().shares_entries(doc.services()));
}

#[test]
fn test_edit_banner_text() {
    let doc = PageDocument::seed();

    let next = edit_section_field(&doc, SectionKey::Banner, "text", "Closed for holidays").unwrap();

    assert_eq!(next.banner().unwrap().text, "Closed for holidays");
    assert_eq!(doc.banner().unwrap().text, "");
    assert_eq!(next.info().unwrap(), doc.info().unwrap());
}

#[test]
fn test_edit_info_fields() {
    let mut doc = PageDocument::seed();

    for (field, value) in [
        ("name", "Dr. John Doe"),
        ("phone", "+1 (555) 123-4567"),
        ("email", "john.doe@example.com"),
        ("address", "123 Medical Center Dr, New York, NY"),
    ] {
        doc = edit_section_field(&doc, SectionKey::Info, field, value).unwrap();
    }

    let info = doc.info().unwrap();
    assert_eq!(info.name, "Dr. John Doe");
    assert_eq!(info.email, "john.doe@example.com");
    assert_eq!(info.address, "123 Medical Center Dr, New York, NY");
}

#[test]
fn test_edit_field_of_wrong_shape_fails_cleanly() {
    let doc = PageDocument::seed();

    let result = edit_section_field(&doc, SectionKey::Banner, "email", "x@example.com");

    assert!(matches!(
        result,
        Err(MutationError::Document(DocumentError::UnknownField { .. }))
    ));
}

#[test]
fn test_edit_service_description() {
    let doc = PageDocument::seed();
    let key = ServiceKey::from("appointments");

    let next = edit_service_field(&doc, &key, "description", "Same-day visits").unwrap();

    assert_eq!(next.service(&key).unwrap().description(), "Same-day visits");
    assert_eq!(next.service(&key).unwrap().title(), "Book Appointment");
    assert!(next.services().shares_entry(doc.services(), &ServiceKey::from("voice")));
}

#[test]
fn test_stale_keys_are_key_not_found() {
    let doc = PageDocument::seed();
    let ghost = ServiceKey::from("ghost");

    for mutation in [
        Mutation::ToggleServiceVisibility {
            service: ghost.clone(),
        },
        Mutation::EditServiceField {
            service: ghost.clone(),
            field: "title".to_string(),
            value: "Boo".to_string(),
        },
        Mutation::ReorderService {
            active: ghost.clone(),
            over: ServiceKey::from("voice"),
        },
        Mutation::RemoveService {
            service: ghost.clone(),
        },
    ] {
        let err = mutation.apply(&doc).unwrap_err();
        assert!(err.is_benign(), "{} should be benign", mutation.name());
        assert_eq!(mutation.reduce(&doc), doc);
    }
}

#[test]
fn test_add_and_remove_service() {
    let doc = PageDocument::seed();

    let added = Mutation::AddService {
        service: ServiceKey::from("labs"),
        title: "Lab Results".to_string(),
        description: "View your latest results".to_string(),
    }
    .apply(&doc)
    .unwrap();

    assert_eq!(
        service_order(&added),
        vec!["appointments", "voice", "prescriptions", "labs"]
    );
    assert!(added.sections().shares_entries(doc.sections()));
    added.validate().unwrap();

    let removed = Mutation::RemoveService {
        service: ServiceKey::from("labs"),
    }
    .apply(&added)
    .unwrap();
    assert_eq!(removed, doc);
}

#[test]
fn test_add_duplicate_service_is_rejected() {
    let doc = PageDocument::seed();

    let err = Mutation::AddService {
        service: ServiceKey::from("voice"),
        title: "Voice".to_string(),
        description: String::new(),
    }
    .apply(&doc)
    .unwrap_err();

    assert!(err.is_duplicate_key());
    assert!(!err.is_benign());
}

#[test]
fn test_add_service_outside_service_namespace_is_rejected() {
    let doc = PageDocument::seed();

    for key in ["section-info", "section-banner", ""] {
        let err = Mutation::AddService {
            service: ServiceKey::from(key),
            title: "Sneaky".to_string(),
            description: String::new(),
        }
        .apply(&doc)
        .unwrap_err();

        assert!(matches!(
            err,
            MutationError::Document(DocumentError::InvalidKey(_))
        ));
        assert!(!err.is_benign());
        assert!(!err.is_duplicate_key());
    }
}
