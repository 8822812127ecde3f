pub mod journal;
pub mod trades;

pub use journal::JournalService;
pub use trades::TradeService;
