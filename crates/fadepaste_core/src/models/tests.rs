use super::paste::*;
use serde_json::json;

fn new_paste(content: &str) -> NewPaste {
    NewPaste {
        content: content.to_string(),
        ttl_seconds: Some(60),
        max_views: None,
    }
}

#[test]
fn paste_new_starts_unviewed_with_uuid_id() {
    let paste = Paste::new(new_paste("hello"), 1_700_000_000_000);
    assert_eq!(paste.views, 0);
    assert_eq!(paste.created_at, 1_700_000_000_000);
    assert_eq!(paste.ttl_seconds, Some(60));
    assert!(uuid::Uuid::parse_str(&paste.id).is_ok(), "id: {}", paste.id);
}

#[test]
fn paste_bincode_roundtrip_preserves_optional_limits() {
    let mut paste = Paste::new(new_paste("body"), 42);
    paste.max_views = Some(3);
    paste.views = 2;
    let encoded = bincode::serialize(&paste).expect("encode");
    let decoded: Paste = bincode::deserialize(&encoded).expect("decode");
    assert_eq!(decoded, paste);
}

#[test]
fn create_request_keeps_explicit_null_apart_from_missing() {
    let req: CreatePasteRequest =
        serde_json::from_value(json!({ "content": "x", "ttl_seconds": null })).expect("parse");
    assert_eq!(req.content, Some(json!("x")));
    assert_eq!(req.ttl_seconds, Some(serde_json::Value::Null));
    assert!(req.max_views.is_none());

    let empty: CreatePasteRequest = serde_json::from_value(json!({})).expect("parse");
    assert!(empty.content.is_none());
}

#[test]
fn paste_view_serializes_absent_limits_as_null() {
    let view = PasteView {
        content: "hi".to_string(),
        remaining_views: None,
        expires_at: None,
    };
    assert_eq!(
        serde_json::to_value(&view).expect("json"),
        json!({ "content": "hi", "remaining_views": null, "expires_at": null })
    );
}
