//! Fixed symbol tables shared by every fortune calculator.
//!
//! Stem/branch indices: 甲(0) 乙(1) 丙(2) 丁(3) 戊(4) 己(5) 庚(6) 辛(7) 壬(8) 癸(9);
//! 子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11).

use serde::{Deserialize, Serialize};

pub const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

pub const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Zodiac animals, aligned index-for-index with `EARTHLY_BRANCHES`.
pub const ZODIAC_ANIMALS: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龍", "蛇", "馬", "羊", "猴", "雞", "狗", "豬",
];

/// The five elements in table order 金 木 水 火 土.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    #[serde(rename = "金")]
    Metal,
    #[serde(rename = "木")]
    Wood,
    #[serde(rename = "水")]
    Water,
    #[serde(rename = "火")]
    Fire,
    #[serde(rename = "土")]
    Earth,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Metal,
        Element::Wood,
        Element::Water,
        Element::Fire,
        Element::Earth,
    ];

    /// Table lookup with wrap-around, e.g. `from_index(total_strokes)`.
    pub fn from_index(index: u32) -> Element {
        Self::ALL[(index % 5) as usize]
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Element::Metal => "金",
            Element::Wood => "木",
            Element::Water => "水",
            Element::Fire => "火",
            Element::Earth => "土",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Overall daily luck, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LuckTier {
    #[serde(rename = "大吉")]
    GreatFortune,
    #[serde(rename = "中吉")]
    ModerateFortune,
    #[serde(rename = "小吉")]
    SmallFortune,
    #[serde(rename = "平")]
    Neutral,
    #[serde(rename = "小凶")]
    SmallMisfortune,
}

impl LuckTier {
    pub const ALL: [LuckTier; 5] = [
        LuckTier::GreatFortune,
        LuckTier::ModerateFortune,
        LuckTier::SmallFortune,
        LuckTier::Neutral,
        LuckTier::SmallMisfortune,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LuckTier::GreatFortune => "大吉",
            LuckTier::ModerateFortune => "中吉",
            LuckTier::SmallFortune => "小吉",
            LuckTier::Neutral => "平",
            LuckTier::SmallMisfortune => "小凶",
        }
    }
}
