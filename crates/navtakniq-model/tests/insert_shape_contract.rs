// SPDX-License-Identifier: Apache-2.0

use chrono::{TimeZone, Utc};
use navtakniq_model::{
    BlogPost, ContactMessage, InsertShape, NewBlogPost, NewContactMessage,
};
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde::Serialize;
use std::collections::BTreeSet;

fn keys_of<T: Serialize>(value: &T) -> BTreeSet<String> {
    serde_json::to_value(value)
        .expect("encode")
        .as_object()
        .expect("object")
        .keys()
        .cloned()
        .collect()
}

fn declared<S: InsertShape>() -> (BTreeSet<String>, BTreeSet<String>) {
    (
        S::FIELDS.iter().map(|f| f.name.to_string()).collect(),
        S::SYSTEM_FIELDS.iter().map(|f| (*f).to_string()).collect(),
    )
}

#[test]
fn contact_entity_is_insert_shape_plus_system_fields() {
    let record = ContactMessage {
        id: 3,
        fields: NewContactMessage::new("Ada", "ada@example.com", Some("Acme".into()), "hi"),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    };
    let (insert, system) = declared::<NewContactMessage>();
    assert!(insert.is_disjoint(&system));
    assert_eq!(keys_of(&record.fields), insert);
    let entity = keys_of(&record);
    assert_eq!(
        entity.difference(&insert).cloned().collect::<BTreeSet<_>>(),
        system
    );
}

#[test]
fn blog_entity_is_insert_shape_plus_system_fields() {
    let record = BlogPost {
        id: 1,
        fields: NewBlogPost {
            slug: "a".into(),
            title: "A".into(),
            summary: "s".into(),
            content: "# A".into(),
            cover_image: "https://example.com/a.png".into(),
        },
        published_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    };
    let (insert, system) = declared::<NewBlogPost>();
    assert_eq!(keys_of(&record.fields), insert);
    let entity = keys_of(&record);
    assert_eq!(
        entity.difference(&insert).cloned().collect::<BTreeSet<_>>(),
        system
    );
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn any_non_blank_submission_validates_to_itself(
        name in "[A-Za-z][A-Za-z ]{0,30}",
        email in "[a-z]{1,10}@[a-z]{1,10}\\.com",
        company in proptest::option::of("[A-Za-z ]{0,20}"),
        message in "[A-Za-z][A-Za-z0-9 .,!?]{0,200}"
    ) {
        let draft = NewContactMessage::new(name, email, company, message);
        let value = serde_json::to_value(&draft).expect("encode");
        let parsed = NewContactMessage::validate(&value).expect("valid");
        prop_assert_eq!(parsed, draft);
    }
}
