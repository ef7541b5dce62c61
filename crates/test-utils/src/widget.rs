//! Scripted rich-text widget.
//!
//! Renders like the host's editable component and lets a test replay user
//! edits against the last rendered session.

use std::cell::RefCell;

use cgb_block_sdk::block::ChangeHandler;
use cgb_block_sdk::host::{RichTextProps, RichTextWidget};
use cgb_block_sdk::render::{self, RenderElement};
use cgb_block_sdk::types::ContentValue;

struct Session {
    value: ContentValue,
    on_change: ChangeHandler,
}

/// Widget that keeps the most recent render's value and change target.
#[derive(Default)]
pub struct ScriptedWidget {
    session: RefCell<Option<Session>>,
    renders: RefCell<usize>,
}

impl ScriptedWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate one user edit producing `value`.
    ///
    /// Notifies the change target once when the normalized value differs
    /// from the current one, and not at all otherwise. Returns whether a
    /// notification was sent. Edits before the first render are dropped.
    ///
    /// The change target may re-render through this widget; the new render
    /// then replaces the session.
    pub fn edit(&self, value: impl Into<ContentValue>) -> bool {
        let value = value.into().normalize();
        let mut on_change = {
            let mut guard = self.session.borrow_mut();
            let Some(session) = guard.as_mut() else {
                return false;
            };
            if session.value == value {
                return false;
            }
            session.value = value.clone();
            std::mem::replace(&mut session.on_change, Box::new(|_| {}))
        };
        let renders = self.render_count();

        on_change(value);

        if self.render_count() == renders
            && let Some(session) = self.session.borrow_mut().as_mut()
        {
            session.on_change = on_change;
        }
        true
    }

    /// Value currently shown in the editable node.
    pub fn current(&self) -> Option<ContentValue> {
        self.session.borrow().as_ref().map(|s| s.value.clone())
    }

    /// Number of times the widget has been rendered.
    pub fn render_count(&self) -> usize {
        *self.renders.borrow()
    }
}

impl RichTextWidget for ScriptedWidget {
    fn render(&self, props: RichTextProps) -> RenderElement {
        *self.renders.borrow_mut() += 1;
        let element = render::rich_text(props.tag_name, &props.value)
            .class(&props.class_name)
            .attr("contenteditable", "true")
            .build();
        *self.session.borrow_mut() = Some(Session {
            value: props.value.normalize(),
            on_change: props.on_change,
        });
        element
    }
}
