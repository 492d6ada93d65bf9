//! Utility modules for the note publisher.

pub mod alphanum;
pub mod exec;
pub mod log;
pub mod slug;
