//! Per-participant conversation flow.
//!
//! `machine` consumes inbound events plus the session store and
//! produces render instructions; `session` holds the per-participant
//! state; `event`/`render` are the two data contracts crossing into
//! the transport.

pub mod event;
pub mod machine;
pub mod render;
pub mod session;

pub use event::{Action, InboundEvent};
pub use machine::{ConversationFlow, FlowState};
pub use render::{ImageAttachment, MenuButton, RenderInstruction};
pub use session::{Session, SessionStore};
