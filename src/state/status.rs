use gpui::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

/// Transient banner content. Replaced by the next operation's outcome or
/// cleared by the dismiss button.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }
}

#[derive(Default)]
pub struct StatusState {
    /// True while a gateway call is in flight; drives the loader overlay.
    pub busy: bool,
    pub message: Option<StatusMessage>,
}

impl Global for StatusState {}

impl StatusState {
    pub fn init(cx: &mut App) {
        cx.set_global(StatusState::default());
    }
}
