//! Collaborator services.
//!
//! - [`traits`]: the seams channels consume (directory, ignore lists,
//!   language check, transport)
//! - [`memory`]: in-memory implementations used by the console and tests

pub mod memory;
pub mod traits;

pub use memory::{
    AsciiLanguageFilter, MemoryDirectory, MemoryServices, MemorySocial, RecordingTransport,
};
pub use traits::{
    Collaborators, LanguageFilter, PlayerDirectory, PlayerInfo, SocialGraph, Transport,
};
