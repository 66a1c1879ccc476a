//! # can_diff
//!
//! Rust utilities for parsing **CAN network descriptions** (`.dbc`) and comparing two versions of them.
//!
//! ## Highlights
//! - **DBC parser**: load CAN databases from `.dbc` into a SlotMap-backed [`Database`].
//!   Tolerant by design of the format: malformed records are skipped one by one, attributes
//!   naming undeclared messages/signals are dropped, and only I/O failures are errors.
//! - **Typed vendor attributes**: `GenMsgCycleTime`, `GenSigStartValue`, `VFrameFormat`, ... land in
//!   typed fields with documented defaults, so "absent" and "explicit default" are the same value.
//! - **Stable keys**: Messages/Signals use SlotMap keys that remain valid for the lifetime of the `Database`.
//! - **Structural diff**: [`diff`] aligns messages by ID and signals by name, classifies them as
//!   new/removed/modified and builds a column-aligned row view for reports.
//!
//! ## Features
//! - `dbc` (default): parser and file entry points.
//! - `diff` (default): the differ.
//!
//! ```
//! let old = can_diff::parse("BO_ 256 Motor_01: 8 Motor\n");
//! let new = can_diff::parse("BO_ 256 Motor_01: 8 Motor\nBO_ 512 Motor_02: 8 Motor\n");
//! let result = can_diff::diff(&old, &new);
//! assert_eq!(result.new_messages[0].id_hex(), "0x200");
//! ```

#[cfg(feature = "dbc")]
mod core;
#[cfg(feature = "diff")]
pub mod diff;
#[cfg(feature = "dbc")]
pub mod parse;
#[doc(hidden)]
pub mod types;

// Top-level re-exports (appear under Crate Items → Structs)
#[doc(inline)]
pub use crate::types::{
    attributes::{AttrType, AttributeValue, DatabaseAttr, MessageAttr, SignalAttr},
    database::{Database, MessageKey, SignalKey},
    errors::DbcParseError,
    message::Message,
    options::{ParseOptions, TextEncoding},
    signal::{Endianness, Signal, Signess},
};

#[cfg(feature = "dbc")]
pub use crate::parse::{from_dbc_file, from_dbc_file_with, parse, parse_bytes};

#[cfg(feature = "diff")]
pub use crate::diff::{
    DiffResult, DiffRow, DiffSummary, ModifiedMessage, ModifiedSignal, SignalEntry, cell::Cell, diff,
};
