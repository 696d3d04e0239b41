//! Grounded follow-up chat about an analyzed document.

pub mod message;
pub mod session;

pub use message::{ChatMessage, ChatRole, Transcript};
pub use session::ChatSession;
