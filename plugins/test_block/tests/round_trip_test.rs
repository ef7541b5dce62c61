//! Round-trip tests for the test-block paragraph.
//!
//! Saved markup, re-read through the `content` attribute schema, must give
//! back the value that was saved.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use cgb_block_sdk::prelude::*;
use cgb_test_utils::{ReferenceParser, ScriptedWidget, init_tracing};

fn block() -> BlockDefinition {
    init_tracing();
    test_block::definition(&Identity).unwrap()
}

fn round_trip(value: &ContentValue) -> (String, ContentValue) {
    let def = block();
    let markup = def.render_markup(&Attributes::new().with("content", value.clone()));
    let restored = def.attributes_from(&markup, &ReferenceParser).unwrap();
    (markup, restored.content("content"))
}

fn samples() -> Vec<ContentValue> {
    vec![
        ContentValue::from("Hello world"),
        ContentValue::from("Fish & chips <served> \"hot\" 'n' fresh"),
        ContentValue::new(vec![
            InlineNode::text("Some "),
            InlineNode::bold(vec![
                InlineNode::text("bold and "),
                InlineNode::italic(vec![InlineNode::text("italic")]),
            ]),
            InlineNode::text(" text."),
        ]),
        ContentValue::new(vec![
            InlineNode::text("line one"),
            InlineNode::LineBreak,
            InlineNode::text("line two"),
            InlineNode::LineBreak,
        ]),
        ContentValue::new(vec![
            InlineNode::text("See "),
            InlineNode::formatted(
                InlineFormat::Link {
                    href: "https://example.com/?a=1&b=\"2\"".into(),
                    target: Some("_blank".into()),
                },
                vec![InlineNode::formatted(
                    InlineFormat::Code,
                    vec![InlineNode::text("example")],
                )],
            ),
        ]),
        ContentValue::new(vec![
            InlineNode::formatted(InlineFormat::Strikethrough, vec![InlineNode::text("old")]),
            InlineNode::text(" H"),
            InlineNode::formatted(InlineFormat::Subscript, vec![InlineNode::text("2")]),
            InlineNode::text("O x"),
            InlineNode::formatted(InlineFormat::Superscript, vec![InlineNode::text("2")]),
        ]),
        ContentValue::from("  leading and trailing spaces  "),
    ]
}

#[test]
fn round_trip_preserves_content() {
    for value in samples() {
        assert!(value.is_canonical(), "sample not canonical: {value:?}");
        let (markup, restored) = round_trip(&value);
        assert_eq!(restored, value, "markup was {markup}");
    }
}

#[test]
fn save_is_deterministic() {
    let def = block();
    for value in samples() {
        let attrs = Attributes::new().with("content", value);
        assert_eq!(def.render_markup(&attrs), def.render_markup(&attrs));
    }
}

#[test]
fn empty_content_round_trips() {
    let (markup, restored) = round_trip(&ContentValue::empty());
    assert_eq!(markup, "<p></p>");
    assert!(restored.is_empty());
}

#[test]
fn absent_content_saves_as_empty_paragraph() {
    let def = block();
    assert_eq!(def.render_markup(&Attributes::new()), "<p></p>");
}

#[test]
fn hello_world_scenario() {
    let value = ContentValue::from("Hello world");
    let (markup, restored) = round_trip(&value);
    assert_eq!(markup, "<p>Hello world</p>");
    assert_eq!(restored.nodes(), &[InlineNode::text("Hello world")]);
}

#[test]
fn saved_paragraph_has_no_attributes() {
    let def = block();
    let value = ContentValue::new(vec![InlineNode::link("/x", vec![InlineNode::text("x")])]);
    let markup = def.render_markup(&Attributes::new().with("content", value));
    assert!(markup.starts_with("<p><a href=\"/x\">"), "{markup}");
    assert!(markup.ends_with("</a></p>"), "{markup}");
}

#[test]
fn non_canonical_input_round_trips_to_its_canonical_form() {
    let split = ContentValue::new(vec![
        InlineNode::text("Hello"),
        InlineNode::text(""),
        InlineNode::text(" world"),
    ]);
    let (_, restored) = round_trip(&split);
    assert_eq!(restored, split.normalize());
}

#[test]
fn edit_notifies_once_per_change() {
    let def = block();
    let widget = ScriptedWidget::new();
    let seen: Rc<RefCell<Vec<ContentValue>>> = Rc::default();
    let sink = Rc::clone(&seen);

    let v1 = ContentValue::from("Hello");
    let element = def.render_editable(
        v1.clone(),
        Box::new(move |value| sink.borrow_mut().push(value)),
        None,
        &widget,
    );

    // Rendering never notifies.
    assert!(seen.borrow().is_empty());
    assert_eq!(element.element_type, "rich_text");
    assert_eq!(element.tag.as_deref(), Some("p"));
    assert_eq!(element.content.as_ref(), Some(&v1));
    assert_eq!(element.classes(), vec!["wp-block-cgb-block-test-block"]);

    let v2 = ContentValue::new(vec![
        InlineNode::text("Hello "),
        InlineNode::bold(vec![InlineNode::text("world")]),
    ]);
    assert!(widget.edit(v2.clone()));
    assert_eq!(*seen.borrow(), vec![v2.clone()]);

    // Re-entering the same value is not a change.
    assert!(!widget.edit(v2.clone()));
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(widget.current(), Some(v2));
}

#[test]
fn edited_content_saves_and_reloads() {
    let def = block();
    let widget = ScriptedWidget::new();
    let attrs: Rc<RefCell<Attributes>> = Rc::default();
    let sink = Rc::clone(&attrs);

    def.render_editable(
        ContentValue::empty(),
        Box::new(move |value| sink.borrow_mut().set("content", value)),
        Some("custom-class"),
        &widget,
    );
    widget.edit("First draft");
    widget.edit(ContentValue::new(vec![
        InlineNode::text("Final "),
        InlineNode::italic(vec![InlineNode::text("draft")]),
    ]));

    let markup = def.render_markup(&attrs.borrow());
    assert_eq!(markup, "<p>Final <em>draft</em></p>");

    let reloaded = def.attributes_from(&markup, &ReferenceParser).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded, *attrs.borrow());
}

#[test]
fn legacy_formatting_tags_load_as_canonical() {
    let def = block();
    let restored = def
        .attributes_from("<p><b>bold</b> <i>it</i></p>", &ReferenceParser)
        .unwrap()
        .content("content");
    assert_eq!(
        def.render_markup(&Attributes::new().with("content", restored)),
        "<p><strong>bold</strong> <em>it</em></p>"
    );
}

#[test]
fn change_target_can_rerender_through_the_widget() {
    let def = block();
    let widget = Rc::new(ScriptedWidget::new());
    let seen: Rc<RefCell<Vec<ContentValue>>> = Rc::default();

    fn recorder(seen: &Rc<RefCell<Vec<ContentValue>>>) -> ChangeHandler {
        let sink = Rc::clone(seen);
        Box::new(move |value| sink.borrow_mut().push(value))
    }

    // Host flow: the change target stores the value and re-renders the edit
    // view with it.
    let rerender: ChangeHandler = {
        let def = def.clone();
        let widget = Rc::clone(&widget);
        let seen = Rc::clone(&seen);
        Box::new(move |value: ContentValue| {
            seen.borrow_mut().push(value.clone());
            def.render_editable(value, recorder(&seen), None, &*widget);
        })
    };
    def.render_editable(ContentValue::from("a"), rerender, None, &*widget);

    assert!(widget.edit("b"));
    assert_eq!(widget.render_count(), 2);
    assert_eq!(widget.current(), Some(ContentValue::from("b")));

    // The session now belongs to the re-render.
    assert!(!widget.edit("b"));
    assert!(widget.edit("c"));
    assert_eq!(
        *seen.borrow(),
        vec![ContentValue::from("b"), ContentValue::from("c")]
    );
    assert_eq!(widget.render_count(), 2);
}

#[test]
fn change_target_survives_edits_without_rerender() {
    let def = block();
    let widget = ScriptedWidget::new();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);

    def.render_editable(
        ContentValue::empty(),
        Box::new(move |_| *sink.borrow_mut() += 1),
        None,
        &widget,
    );
    assert!(widget.edit("one"));
    assert!(widget.edit("two"));
    assert_eq!(*count.borrow(), 2);
}
