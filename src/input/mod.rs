pub mod handler;

pub use handler::{InputHandler, KeyAction, NameEntry, NameEntryEvent};
