//! Render instructions: the sole output contract of the flow.
//!
//! The transport adapter turns these into platform UI (message text,
//! inline keyboards, photo uploads). The flow never talks to the
//! platform directly.

use crate::flow::event::Action;

/// One tappable button: display label plus the action it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub action: Action,
}

impl MenuButton {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Image bytes to display alongside the text (QR codes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub bytes: Vec<u8>,
    pub caption: String,
}

/// What to show the participant: message text, an ordered grid of
/// menu buttons (empty for no menu), and an optional image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstruction {
    pub text: String,
    pub menu: Vec<Vec<MenuButton>>,
    pub attachment: Option<ImageAttachment>,
}

impl RenderInstruction {
    /// Plain text, no menu.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: Vec::new(),
            attachment: None,
        }
    }

    /// Text with a button grid.
    pub fn with_menu(text: impl Into<String>, menu: Vec<Vec<MenuButton>>) -> Self {
        Self {
            text: text.into(),
            menu,
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: ImageAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}
