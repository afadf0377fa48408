//! Session state management
//!
//! The schedule store holds exactly one working and one final schedule with
//! no internal locking, so something must serialize mutation. The
//! [`SessionManager`] actor is that something: it owns the store, processes
//! commands one at a time from a channel, and hands out a cloneable handle.

mod manager;
mod messages;

pub use manager::SessionManager;
pub use messages::{AnswerReply, StateCommand, StateError, StateResponse};
