//! Script Types - Core data structures for the event script editor
//!
//! This crate contains the pure data structures shared by the script engine
//! and the editing surface: the nested node form that scripts are serialized
//! and copied in, editor metadata, the command schema, and clipboard payloads.

mod clipboard;
mod command;
mod library;
mod node;
mod registry;

pub use clipboard::*;
pub use command::*;
pub use library::*;
pub use node::*;
pub use registry::*;
