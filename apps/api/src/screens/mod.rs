// Server-side view-state for the hiring and chat screens.

pub mod chat;
pub mod clipboard;
pub mod hiring;
pub mod handlers;
pub mod templates;

pub use chat::{ChatRejection, ChatRoom};
pub use hiring::{HiringSession, Rejection};
