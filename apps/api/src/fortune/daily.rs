//! Daily fortune generator.

use chrono::NaiveDate;

use crate::fortune::narrative::DailyScores;
use crate::fortune::random::RandomSource;
use crate::fortune::symbols::LuckTier;

pub const SUB_SCORE_RANGE: (u32, u32) = (60, 99);

/// Raw facts of a daily reading, before the suggestion text is attached.
#[derive(Debug, Clone)]
pub struct DailyFacts {
    /// Echoed as given; not checked against the zodiac table.
    pub zodiac: String,
    pub date: NaiveDate,
    pub overall_luck: LuckTier,
    pub scores: DailyScores,
}

/// `YYYY年MM月DD日`
pub fn display_date(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}

pub fn serialize_display_date<S: serde::Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&display_date(*date))
}

/// Every call draws a fresh reading; nothing is keyed on the date.
pub fn compute_daily(zodiac: &str, today: NaiveDate, rng: &dyn RandomSource) -> DailyFacts {
    let overall_luck = LuckTier::ALL[rng.below(LuckTier::ALL.len())];
    let (low, high) = SUB_SCORE_RANGE;

    DailyFacts {
        zodiac: zodiac.to_string(),
        date: today,
        overall_luck,
        scores: DailyScores {
            love: rng.between(low, high),
            career: rng.between(low, high),
            wealth: rng.between(low, high),
            health: rng.between(low, high),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortune::random::{SeededRandom, ThreadRandom};
    use serde::Serialize;

    #[derive(Serialize)]
    struct DateProbe {
        #[serde(serialize_with = "serialize_display_date")]
        date: NaiveDate,
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_sub_scores_stay_in_range() {
        let rng = ThreadRandom;
        for _ in 0..1000 {
            let facts = compute_daily("馬", today(), &rng);
            let s = facts.scores;
            for score in [s.love, s.career, s.wealth, s.health] {
                assert!((60..=99).contains(&score), "score was {score}");
            }
        }
    }

    #[test]
    fn test_zodiac_is_echoed_unvalidated() {
        let facts = compute_daily("unicorn", today(), &ThreadRandom);
        assert_eq!(facts.zodiac, "unicorn");
        assert_eq!(facts.date, today());
    }

    #[test]
    fn test_every_luck_tier_is_reachable() {
        let rng = SeededRandom::new(1);
        let mut seen = Vec::new();
        for _ in 0..500 {
            let tier = compute_daily("龍", today(), &rng).overall_luck;
            if !seen.contains(&tier) {
                seen.push(tier);
            }
        }
        assert_eq!(seen.len(), LuckTier::ALL.len());
    }

    #[test]
    fn test_display_date_format() {
        assert_eq!(display_date(today()), "2026年10月19日");
        let json = serde_json::to_string(&DateProbe { date: today() }).unwrap();
        assert_eq!(json, r#"{"date":"2026年10月19日"}"#);
    }
}
