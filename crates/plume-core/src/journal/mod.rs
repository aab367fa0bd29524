//! Interaction journal module.
//!
//! Append-only record of accepted suggestions, bounded to the 50 most
//! recent entries.
//!
//! - `model`: entry types (`JournalEntry`, `ActionKind`, `TextStats`)
//! - `store`: the key-value persistence collaborator interface
//! - `log`: the journal itself (`InteractionJournal`)

mod log;
mod model;
mod store;

pub use log::{InteractionJournal, JOURNAL_CAPACITY};
pub use model::{ActionKind, JournalEntry, NewJournalEntry, TextStats};
pub use store::EntryStore;
