//! BaZi pillar calculator.
//!
//! Simplified arithmetic, reproduced exactly:
//! - year:  stem `(year - 4) mod 10`, branch and zodiac `(year - 4) mod 12`
//! - month: `(month - 1)` mod 10 / mod 12 (no solar-term adjustment)
//! - day:   `(day - 1)` mod 10 / mod 12
//! - hour:  `(hour / 2)` mod 10 / mod 12 (two-hour blocks, truncated)
//!
//! Element counts are independent noise in `[1, 3]` per element and are not
//! derived from the pillars.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::errors::AppError;
use crate::fortune::random::RandomSource;
use crate::fortune::symbols::{Element, EARTHLY_BRANCHES, HEAVENLY_STEMS, ZODIAC_ANIMALS};

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";
const BIRTH_TIME_FORMAT: &str = "%H:%M";

/// Calendar input for the pillar computation. Callers supply a valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthMoment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl BirthMoment {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// `YYYY年MM月DD日 HH時`, echoed back on the reading.
    pub fn display(&self) -> String {
        format!(
            "{:04}年{:02}月{:02}日 {:02}時",
            self.year, self.month, self.day, self.hour
        )
    }

    /// ISO-like `YYYY-MM-DDTHH:MM`, used as the stored history input.
    pub fn iso(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

impl From<NaiveDateTime> for BirthMoment {
    fn from(dt: NaiveDateTime) -> Self {
        Self::new(dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute())
    }
}

/// Parses `YYYY-MM-DD` and `HH:MM` into a `BirthMoment`.
pub fn parse_birth_moment(date: &str, time: &str) -> Result<BirthMoment, AppError> {
    let invalid = || {
        AppError::Validation(format!(
            "Invalid birth date/time '{date} {time}': expected YYYY-MM-DD and HH:MM"
        ))
    };

    let date = NaiveDate::parse_from_str(date.trim(), BIRTH_DATE_FORMAT).map_err(|_| invalid())?;
    let time = NaiveTime::parse_from_str(time.trim(), BIRTH_TIME_FORMAT).map_err(|_| invalid())?;

    Ok(BirthMoment::from(date.and_time(time)))
}

/// A heavenly-stem / earthly-branch pair. Serializes as its two symbols, e.g. `庚午`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pillar {
    stem: u8,
    branch: u8,
}

impl Pillar {
    /// Stem and branch from the same cyclic offset.
    pub fn from_offset(offset: i64) -> Self {
        Self {
            stem: offset.rem_euclid(10) as u8,
            branch: offset.rem_euclid(12) as u8,
        }
    }

    /// In `[0, 9]`.
    pub fn stem_index(&self) -> usize {
        self.stem as usize
    }

    /// In `[0, 11]`.
    pub fn branch_index(&self) -> usize {
        self.branch as usize
    }

    pub fn stem(&self) -> &'static str {
        HEAVENLY_STEMS[self.stem_index()]
    }

    pub fn branch(&self) -> &'static str {
        EARTHLY_BRANCHES[self.branch_index()]
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem(), self.branch())
    }
}

impl Serialize for Pillar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Raw facts of a BaZi reading, before narrative and score are attached.
#[derive(Debug, Clone, Serialize)]
pub struct BaZiChart {
    pub year_pillar: Pillar,
    pub month_pillar: Pillar,
    pub day_pillar: Pillar,
    pub hour_pillar: Pillar,
    pub zodiac: &'static str,
    pub elements: BTreeMap<Element, u8>,
}

impl BaZiChart {
    pub fn pillars(&self) -> [Pillar; 4] {
        [
            self.year_pillar,
            self.month_pillar,
            self.day_pillar,
            self.hour_pillar,
        ]
    }
}

pub fn compute_pillars(birth: &BirthMoment, rng: &dyn RandomSource) -> BaZiChart {
    let year_offset = i64::from(birth.year) - 4;
    let year_pillar = Pillar::from_offset(year_offset);

    BaZiChart {
        year_pillar,
        month_pillar: Pillar::from_offset(i64::from(birth.month) - 1),
        day_pillar: Pillar::from_offset(i64::from(birth.day) - 1),
        hour_pillar: Pillar::from_offset(i64::from(birth.hour / 2)),
        zodiac: ZODIAC_ANIMALS[year_pillar.branch_index()],
        elements: element_noise(rng),
    }
}

fn element_noise(rng: &dyn RandomSource) -> BTreeMap<Element, u8> {
    Element::ALL
        .iter()
        .map(|&element| (element, rng.between(1, 3) as u8))
        .collect()
}
