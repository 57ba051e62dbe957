use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::fortune::bazi::Pillar;
use crate::fortune::daily::serialize_display_date;
use crate::fortune::symbols::{Element, LuckTier};

/// A completed BaZi reading as returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct BaZiReading {
    pub year_pillar: Pillar,
    pub month_pillar: Pillar,
    pub day_pillar: Pillar,
    pub hour_pillar: Pillar,
    pub zodiac: &'static str,
    pub elements: BTreeMap<Element, u8>,
    pub analysis: String,
    /// In `[65, 85]`.
    pub score: u32,
    pub birth_time: String,
    pub birth_place: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NameReading {
    pub name: String,
    pub total_strokes: u32,
    pub element: Element,
    pub analysis: String,
    /// In `[60, 90]`.
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyReading {
    pub zodiac: String,
    #[serde(serialize_with = "serialize_display_date")]
    pub date: NaiveDate,
    pub overall_luck: LuckTier,
    pub love_score: u32,
    pub career_score: u32,
    pub wealth_score: u32,
    pub health_score: u32,
    pub suggestion: String,
}

/// Per-user aggregate over the history log.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FortuneStats {
    pub total_count: usize,
    /// Keyed by the fortune type's display description.
    pub type_count: BTreeMap<String, usize>,
    /// Mean score rounded to two decimals; 0 with no history.
    pub average_score: f64,
}
