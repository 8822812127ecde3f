pub mod journal;
pub mod trade;

pub use journal::{JournalEntry, JournalInput};
pub use trade::{AccountType, AttachedFile, Direction, Trade, TradeInput, TradeStatus};
