//! Shared chat types for the Sprig support-chat service.

mod message;

pub use message::{Message, Role, RoleParseError};
