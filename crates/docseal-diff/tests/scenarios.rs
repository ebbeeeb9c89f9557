//! End-to-end comparisons: build two versions, diff them, check the
//! change set, summaries, and proofs against the committed roots.

use docseal_commit::{build_json_str, build_xml_str};
use docseal_core::{encode_leaf, value_hash, DocumentKind};
use docseal_diff::{
    collapsed_with_ancestors, diff, key_summary, tag_summary, DiffPayload, EMPTY_ROOT_LITERAL,
};
use docseal_merkle::verify_inclusion;

const ORDER_OLD: &str = r#"<Order xmlns="urn:ex"><Item sku="A"><Qty>2</Qty></Item><Item sku="B"><Qty>1</Qty></Item></Order>"#;
const ORDER_NEW: &str = r#"<Order xmlns="urn:ex"><Item sku="B"><Qty>3</Qty></Item><Item sku="A"><Qty>2</Qty></Item></Order>"#;

#[test]
fn json_reorder_and_change() {
    let old = build_json_str(r#"{"id":1,"tags":["x","y"],"addr":{"pin":411045}}"#).unwrap();
    let new =
        build_json_str(r#"{"tags":["y","x"],"id":1,"addr":{"pin":411046},"extra":42}"#).unwrap();

    let changes = diff(
        Some(&old.path_value_hashes),
        &new.path_value_hashes,
        DocumentKind::Json,
    );

    assert_eq!(changes.changed.len(), 1);
    assert_eq!(changes.changed[0].path, "$.addr.pin");
    assert_eq!(changes.changed[0].old_hash, hex::encode(value_hash("411045")));
    assert_eq!(changes.changed[0].new_hash, hex::encode(value_hash("411046")));
    assert_eq!(changes.added, vec!["$.extra"]);
    assert!(changes.removed.is_empty());

    // The changed value is provable against the new root.
    let proof = new.prove("$.addr.pin").unwrap();
    let payload = encode_leaf("$.addr.pin", &value_hash("411046"));
    assert!(verify_inclusion(&payload, &proof, &new.root));

    let summary = key_summary(&changes);
    assert_eq!(summary["pin"], vec!["CHANGED"]);
    assert_eq!(summary["extra"], vec!["ADDED"]);
}

#[test]
fn json_single_leaf_change_is_isolated() {
    let old = build_json_str(r#"{"id":1,"tags":["x","y"],"addr":{"pin":411045}}"#).unwrap();
    let new = build_json_str(r#"{"id":1,"tags":["x","y"],"addr":{"pin":411046}}"#).unwrap();

    assert_ne!(old.root, new.root);
    let changes = diff(
        Some(&old.path_value_hashes),
        &new.path_value_hashes,
        DocumentKind::Json,
    );
    assert!(changes.added.is_empty());
    assert!(changes.removed.is_empty());
    assert_eq!(changes.changed.len(), 1);
    assert_eq!(changes.changed[0].path, "$.addr.pin");
}

#[test]
fn json_duplicate_array_elements() {
    let old = build_json_str(r#"{"a":[1,1]}"#).unwrap();
    let new = build_json_str(r#"{"a":[1]}"#).unwrap();

    let changes = diff(
        Some(&old.path_value_hashes),
        &new.path_value_hashes,
        DocumentKind::Json,
    );
    assert_eq!(changes.removed, vec!["$.a[#1]"]);
    assert!(changes.added.is_empty());
    assert!(changes.changed.is_empty());
}

#[test]
fn json_structure_appearance_uses_markers_not_changed() {
    let old = build_json_str(r#"{"a":{}}"#).unwrap();
    let new = build_json_str(r#"{"a":{"k":1}}"#).unwrap();

    let changes = diff(
        Some(&old.path_value_hashes),
        &new.path_value_hashes,
        DocumentKind::Json,
    );
    assert_eq!(changes.removed, vec!["$.a.__emptyObject"]);
    assert_eq!(changes.added, vec!["$.a.k"]);
    assert!(changes.changed.is_empty());
}

#[test]
fn xml_sibling_reorder_and_value_change() {
    let old = build_xml_str(ORDER_OLD).unwrap();
    let new = build_xml_str(ORDER_NEW).unwrap();

    let changes = diff(
        Some(&old.path_value_hashes),
        &new.path_value_hashes,
        DocumentKind::Xml,
    );

    assert!(changes.added.is_empty(), "added: {:?}", changes.added);
    assert!(changes.removed.is_empty(), "removed: {:?}", changes.removed);
    assert_eq!(changes.changed.len(), 1, "changed: {:?}", changes.changed);
    assert!(changes.changed[0].path.contains("urn:ex|Qty"));

    let collapsed = collapsed_with_ancestors(DocumentKind::Xml, &changes);
    assert!(collapsed.contains("/urn:ex|Order"));
    assert!(collapsed.contains("/urn:ex|Order/urn:ex|Item"));
    assert!(collapsed.contains("/urn:ex|Order/urn:ex|Item/urn:ex|Qty"));
    for path in &collapsed {
        assert!(!path.contains("#text"), "unexpected text segment in {path}");
        assert!(!path.contains("[#"), "unexpected index in {path}");
    }
}

#[test]
fn xml_pure_reorder_commits_to_same_root() {
    let reordered = r#"<Order xmlns="urn:ex"><Item sku="B"><Qty>1</Qty></Item><Item sku="A"><Qty>2</Qty></Item></Order>"#;
    let old = build_xml_str(ORDER_OLD).unwrap();
    let new = build_xml_str(reordered).unwrap();
    assert_eq!(old.root, new.root);
    assert!(diff(
        Some(&old.path_value_hashes),
        &new.path_value_hashes,
        DocumentKind::Xml
    )
    .is_empty());
}

#[test]
fn xml_empty_baseline() {
    let new = build_xml_str(ORDER_OLD).unwrap();

    let changes = diff(None, &new.path_value_hashes, DocumentKind::Xml);
    let added: Vec<&String> = changes.added.iter().collect();
    let expected: Vec<&String> = new.path_value_hashes.keys().collect();
    assert_eq!(added, expected);
    assert!(changes.removed.is_empty());
    assert!(changes.changed.is_empty());

    let tags = tag_summary(&changes);
    assert!(tags.elements["urn:ex|Order"].contains(&"ADDED".to_string()));
    assert!(tags.elements["urn:ex|Item"].contains(&"ADDED".to_string()));
    assert!(tags.elements["urn:ex|Qty"].contains(&"ADDED".to_string()));
    assert!(tags.attributes["@sku"].contains(&"ADDED".to_string()));
}

#[test]
fn xml_payload_record() {
    let old = build_xml_str(ORDER_OLD).unwrap();
    let new = build_xml_str(ORDER_NEW).unwrap();
    let changes = diff(
        Some(&old.path_value_hashes),
        &new.path_value_hashes,
        DocumentKind::Xml,
    );

    let payload = DiffPayload::assemble(DocumentKind::Xml, Some(old.root), new.root, &changes);
    assert_eq!(payload.root_old, old.root_hex());
    assert_eq!(payload.root_new, new.root_hex());
    assert_eq!(payload.changed.len(), 1);
    assert!(payload.key_summary.is_none());
    assert!(payload.tag_summary_elements.is_some());
    assert_eq!(payload.collapsed_paths, vec!["/urn:ex|Order/urn:ex|Item/urn:ex|Qty"]);
}

#[test]
fn json_payload_record_with_empty_baseline() {
    let new = build_json_str(r#"{"id":1}"#).unwrap();
    let changes = diff(None, &new.path_value_hashes, DocumentKind::Json);
    let payload = DiffPayload::assemble(DocumentKind::Json, None, new.root, &changes);
    assert_eq!(payload.root_old, EMPTY_ROOT_LITERAL);
    assert_eq!(payload.added, vec!["$.id"]);
    assert_eq!(payload.key_summary.unwrap()["id"], vec!["ADDED"]);
}
