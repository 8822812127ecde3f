use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }
}

/// Records predating the status field carry no `status` key; they are
/// treated as closed, which the serde default preserves on deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
}

impl Default for TradeStatus {
    fn default() -> Self {
        TradeStatus::Closed
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "open"),
            TradeStatus::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Live,
    Demo,
    Prop,
    Challenge,
}

impl Default for AccountType {
    fn default() -> Self {
        AccountType::Demo
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Live => write!(f, "Live"),
            AccountType::Demo => write!(f, "Demo"),
            AccountType::Prop => write!(f, "Prop"),
            AccountType::Challenge => write!(f, "Challenge"),
        }
    }
}

/// Media attached to a trade or journal entry. Owned by exactly one parent
/// and deleted with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedFile {
    pub blob_id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// A persisted trade record. Field names serialize as camelCase so
/// historical JSON exports round-trip unchanged.
///
/// `duration_secs`, `risk_amount` and `r_multiple` are derived: they are
/// recomputed by the normalizer on every create and update, never edited
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: Uuid,
    pub symbol: String,
    pub direction: Direction,
    #[serde(default)]
    pub status: TradeStatus,

    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profit: Option<f64>,
    pub quantity: f64,
    #[serde(default)]
    pub commission: f64,

    #[serde(default)]
    pub net_pnl: Option<f64>,

    pub entry_time: DateTime<Utc>,
    #[serde(default)]
    pub exit_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub trade_url: Option<String>,

    #[serde(default)]
    pub duration_secs: i64,
    #[serde(default)]
    pub risk_amount: f64,
    #[serde(rename = "R", default)]
    pub r_multiple: f64,

    #[serde(default)]
    pub files: Vec<AttachedFile>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trade {
    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// Calendar-day key of the exit, `yyyy-MM-dd`. No timezone
    /// normalization: the key comes from the stored UTC instant.
    pub fn exit_day(&self) -> Option<String> {
        self.exit_time.map(|t| t.format("%Y-%m-%d").to_string())
    }
}

/// Client-submitted trade fields, before validation and derived-field
/// computation. Always-required fields are required by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInput {
    pub symbol: String,
    pub direction: Direction,
    #[serde(default)]
    pub status: TradeStatus,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profit: Option<f64>,
    pub quantity: f64,
    #[serde(default)]
    pub commission: f64,
    #[serde(default)]
    pub net_pnl: Option<f64>,
    pub entry_time: DateTime<Utc>,
    #[serde(default)]
    pub exit_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub trade_url: Option<String>,
}
