use editors_pick_sandbox::{
    Block, BlockKind, NodeTreeEngine, SandboxConfig, SandboxDocument, SchemaEngine,
};
use editors_pick_toolbar::presets::{ids, node_tree, schema};
use editors_pick_toolbar::ToolbarController;
use serde_json::json;

#[test]
fn empty_block_list_gets_a_paragraph_for_the_caret() {
    let doc: SandboxDocument = serde_json::from_value(json!({ "blocks": [] })).unwrap();

    assert_eq!(doc.blocks(), &[Block::paragraph("")]);
    assert_eq!(doc.cursor(), 0);

    let engine = SchemaEngine::with_document(doc, SandboxConfig::default()).unwrap();
    let toolbar = ToolbarController::mount(schema::toolbar().unwrap(), engine);
    assert_eq!(toolbar.state().selected(), ids::PARAGRAPH);
}

#[test]
fn cursor_past_the_end_is_clamped() {
    let doc: SandboxDocument = serde_json::from_value(json!({
        "blocks": [
            { "kind": { "type": "paragraph" }, "text": "one" },
            { "kind": { "type": "quote" }, "text": "two" }
        ],
        "cursor": 5
    }))
    .unwrap();

    assert_eq!(doc.cursor(), 1);
    assert_eq!(doc.focused().kind, BlockKind::Quote);

    let engine = NodeTreeEngine::with_document(doc, SandboxConfig::default()).unwrap();
    let toolbar = ToolbarController::mount(node_tree::toolbar().unwrap(), engine);
    assert_eq!(toolbar.state().selected(), ids::QUOTE);
}

#[test]
fn missing_fields_read_as_an_empty_document() {
    let doc: SandboxDocument = serde_json::from_value(json!({})).unwrap();

    assert_eq!(doc, SandboxDocument::empty());
}

#[test]
fn serialized_documents_read_back_unchanged() {
    let doc = SandboxDocument::lorem();
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(serde_json::from_value::<SandboxDocument>(value).unwrap(), doc);
}
