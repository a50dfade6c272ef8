//! Readout card IDs
//!
//! Parsing and validation of card slot identifiers such as `"#3"`, plus the
//! batch checking and logging used by the `cardid` tool.

pub mod batch;
pub mod card_id;
pub mod error;
pub mod logger;

pub use card_id::{parse_card_id, parse_card_id_list, CardId, CARD_SLOT_COUNT};
pub use error::{ReadoutError, Result};
pub use logger::{LogEntry, Logger, OutputFormat, OutputMode, VerbosityLevel};
