use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Kind of reading stored in history. Persisted as its upper-case tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FortuneType {
    Bazi,
    Name,
    Daily,
    Zodiac,
}

impl FortuneType {
    pub fn as_str(self) -> &'static str {
        match self {
            FortuneType::Bazi => "BAZI",
            FortuneType::Name => "NAME",
            FortuneType::Daily => "DAILY",
            FortuneType::Zodiac => "ZODIAC",
        }
    }

    /// Display name shown to users and used as the stats key.
    pub fn description(self) -> &'static str {
        match self {
            FortuneType::Bazi => "生辰八字",
            FortuneType::Name => "姓名算命",
            FortuneType::Daily => "每日運勢",
            FortuneType::Zodiac => "生肖運勢",
        }
    }
}

impl fmt::Display for FortuneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FortuneType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BAZI" => Ok(FortuneType::Bazi),
            "NAME" => Ok(FortuneType::Name),
            "DAILY" => Ok(FortuneType::Daily),
            "ZODIAC" => Ok(FortuneType::Zodiac),
            other => Err(format!("unknown fortune type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FortuneHistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fortune_type: String,
    pub input_data: String,
    pub result_data: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

impl FortuneHistoryRow {
    pub fn kind(&self) -> Option<FortuneType> {
        self.fortune_type.parse().ok()
    }
}
