//! Fortune Service: orchestrates each reading end to end.
//!
//! Flow: resolve user → calculator (facts) → narrative → score →
//!       append history record → return reading.
//!
//! All randomness goes through the injected `RandomSource`; all strokes go
//! through the shared `StrokeClient`.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::fortune::bazi::{compute_pillars, BirthMoment};
use crate::fortune::daily::compute_daily;
use crate::fortune::history::{HistoryStore, NewHistoryEntry, UserDirectory};
use crate::fortune::models::{BaZiReading, DailyReading, FortuneStats, NameReading};
use crate::fortune::name::compute_name_reading;
use crate::fortune::narrative::{
    compose_bazi_analysis, compose_daily_suggestion, compose_name_analysis,
};
use crate::fortune::random::RandomSource;
use crate::fortune::scoring::{bazi_score, daily_score, name_score};
use crate::fortune::symbols::ZODIAC_ANIMALS;
use crate::models::fortune::{FortuneHistoryRow, FortuneType};
use crate::models::user::User;
use crate::stroke_client::StrokeClient;

pub struct FortuneService {
    strokes: StrokeClient,
    history: Arc<dyn HistoryStore>,
    users: Arc<dyn UserDirectory>,
    rng: Arc<dyn RandomSource>,
}

impl FortuneService {
    pub fn new(
        strokes: StrokeClient,
        history: Arc<dyn HistoryStore>,
        users: Arc<dyn UserDirectory>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            strokes,
            history,
            users,
            rng,
        }
    }

    pub async fn calculate_bazi(
        &self,
        user_id: Uuid,
        birth: BirthMoment,
        birth_place: &str,
    ) -> Result<BaZiReading, AppError> {
        let user = self.require_user(user_id).await?;
        let rng = self.rng.as_ref();

        let chart = compute_pillars(&birth, rng);
        let analysis = compose_bazi_analysis(&chart, rng);
        let score = bazi_score(rng);

        self.history
            .append(NewHistoryEntry {
                user_id: user.id,
                fortune_type: FortuneType::Bazi,
                input_data: format!("{}|{}", birth.iso(), birth_place),
                result_data: analysis.clone(),
                score: score as i32,
            })
            .await?;

        info!(
            "BaZi reading for user {}: {} {} score={}",
            user.id, chart.year_pillar, chart.zodiac, score
        );

        Ok(BaZiReading {
            year_pillar: chart.year_pillar,
            month_pillar: chart.month_pillar,
            day_pillar: chart.day_pillar,
            hour_pillar: chart.hour_pillar,
            zodiac: chart.zodiac,
            elements: chart.elements,
            analysis,
            score,
            birth_time: birth.display(),
            birth_place: birth_place.to_string(),
        })
    }

    /// Fails with `OracleUnavailable` when the stroke service cannot answer;
    /// nothing is saved in that case.
    pub async fn calculate_name_fortune(
        &self,
        user_id: Uuid,
        full_name: &str,
    ) -> Result<NameReading, AppError> {
        let user = self.require_user(user_id).await?;
        let rng = self.rng.as_ref();

        let facts = compute_name_reading(&self.strokes, full_name).await?;
        let analysis = compose_name_analysis(full_name, facts.total_strokes, facts.element, rng);
        let score = name_score(rng);

        self.history
            .append(NewHistoryEntry {
                user_id: user.id,
                fortune_type: FortuneType::Name,
                input_data: full_name.to_string(),
                result_data: analysis.clone(),
                score: score as i32,
            })
            .await?;

        info!(
            "Name reading for user {}: {} strokes, element {} score={}",
            user.id, facts.total_strokes, facts.element, score
        );

        Ok(NameReading {
            name: full_name.to_string(),
            total_strokes: facts.total_strokes,
            element: facts.element,
            analysis,
            score,
        })
    }

    /// Each call is a fresh draw and a fresh history row, even on the same day.
    pub async fn get_daily_fortune(
        &self,
        user_id: Uuid,
        zodiac: &str,
    ) -> Result<DailyReading, AppError> {
        self.daily_fortune_on(user_id, zodiac, Local::now().date_naive())
            .await
    }

    async fn daily_fortune_on(
        &self,
        user_id: Uuid,
        zodiac: &str,
        today: NaiveDate,
    ) -> Result<DailyReading, AppError> {
        let user = self.require_user(user_id).await?;
        let rng = self.rng.as_ref();

        let facts = compute_daily(zodiac, today, rng);
        let suggestion = compose_daily_suggestion(facts.overall_luck, facts.scores, rng);
        let score = daily_score(&facts.scores);

        self.history
            .append(NewHistoryEntry {
                user_id: user.id,
                fortune_type: FortuneType::Daily,
                input_data: format!("{}|{}", facts.zodiac, facts.date.format("%Y-%m-%d")),
                result_data: suggestion.clone(),
                score: score as i32,
            })
            .await?;

        info!(
            "Daily reading for user {}: {} {:?} score={}",
            user.id, facts.zodiac, facts.overall_luck, score
        );

        Ok(DailyReading {
            zodiac: facts.zodiac,
            date: facts.date,
            overall_luck: facts.overall_luck,
            love_score: facts.scores.love,
            career_score: facts.scores.career,
            wealth_score: facts.scores.wealth,
            health_score: facts.scores.health,
            suggestion,
        })
    }

    /// Most recent first.
    pub async fn get_history_for(&self, user_id: Uuid) -> Result<Vec<FortuneHistoryRow>, AppError> {
        let user = self.require_user(user_id).await?;
        self.history.list_for(user.id).await
    }

    pub async fn get_stats_for(&self, user_id: Uuid) -> Result<FortuneStats, AppError> {
        let histories = self.get_history_for(user_id).await?;
        Ok(summarize(&histories))
    }

    pub fn zodiac_list(&self) -> &'static [&'static str] {
        &ZODIAC_ANIMALS
    }

    async fn require_user(&self, user_id: Uuid) -> Result<User, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound(user_id))?;
        debug!(
            "Resolved user {} ({}, gender {:?})",
            user.id,
            user.username,
            user.gender().map(|g| g.description())
        );
        Ok(user)
    }
}

fn summarize(histories: &[FortuneHistoryRow]) -> FortuneStats {
    let mut type_count: BTreeMap<String, usize> = BTreeMap::new();
    for row in histories {
        let label = row
            .kind()
            .map(|kind| kind.description().to_string())
            .unwrap_or_else(|| row.fortune_type.clone());
        *type_count.entry(label).or_insert(0) += 1;
    }

    let average_score = if histories.is_empty() {
        0.0
    } else {
        let total: i64 = histories.iter().map(|r| i64::from(r.score)).sum();
        let mean = total as f64 / histories.len() as f64;
        (mean * 100.0).round() / 100.0
    };

    FortuneStats {
        total_count: histories.len(),
        type_count,
        average_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortune::history::testing::InMemoryStore;
    use crate::fortune::narrative::{LOVE_TIPS, NAME_MEANING};
    use crate::fortune::random::{SeededRandom, ThreadRandom};
    use crate::fortune::symbols::Element;
    use crate::stroke_client::testing::CountingOracle;

    struct Harness {
        service: FortuneService,
        store: Arc<InMemoryStore>,
        oracle: Arc<CountingOracle>,
        user_id: Uuid,
    }

    fn harness_with(oracle: CountingOracle, rng: Arc<dyn RandomSource>) -> Harness {
        let (store, user_id) = InMemoryStore::with_user("tester");
        let store = Arc::new(store);
        let oracle = Arc::new(oracle);
        let service = FortuneService::new(
            StrokeClient::new(oracle.clone()),
            store.clone(),
            store.clone(),
            rng,
        );
        Harness {
            service,
            store,
            oracle,
            user_id,
        }
    }

    fn harness() -> Harness {
        harness_with(
            CountingOracle::with(&[("王小明", 15)]),
            Arc::new(ThreadRandom),
        )
    }

    #[tokio::test]
    async fn test_bazi_end_to_end_saves_history() {
        let h = harness();
        let reading = h
            .service
            .calculate_bazi(h.user_id, BirthMoment::new(1990, 8, 15, 10, 30), "Taipei")
            .await
            .unwrap();

        assert_eq!(reading.zodiac, "馬");
        assert_eq!(reading.year_pillar.to_string(), "庚午");
        assert_eq!(reading.birth_time, "1990年08月15日 10時");
        assert_eq!(reading.birth_place, "Taipei");
        assert!((65..=85).contains(&reading.score));

        let records = h.store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fortune_type, "BAZI");
        assert_eq!(records[0].input_data, "1990-08-15T10:30|Taipei");
        assert_eq!(records[0].result_data, reading.analysis);
        assert_eq!(records[0].score, reading.score as i32);
    }

    #[tokio::test]
    async fn test_name_end_to_end() {
        let h = harness();
        let reading = h
            .service
            .calculate_name_fortune(h.user_id, "王小明")
            .await
            .unwrap();

        assert_eq!(reading.total_strokes, 15);
        assert_eq!(reading.element, Element::Metal);
        assert!((60..=90).contains(&reading.score));
        let meaning = reading.analysis.lines().nth(4).unwrap();
        assert!(NAME_MEANING.contains(&meaning));

        let records = h.store.records();
        assert_eq!(records[0].fortune_type, "NAME");
        assert_eq!(records[0].input_data, "王小明");
    }

    #[tokio::test]
    async fn test_blank_name_is_zero_strokes_without_oracle() {
        let h = harness();
        let reading = h.service.calculate_name_fortune(h.user_id, "").await.unwrap();
        assert_eq!(reading.total_strokes, 0);
        assert_eq!(reading.element, Element::ALL[0]);
        assert_eq!(h.oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_name_oracle_down_fails_without_saving() {
        let h = harness_with(CountingOracle::unavailable(), Arc::new(ThreadRandom));
        let err = h
            .service
            .calculate_name_fortune(h.user_id, "王小明")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::OracleUnavailable(_)));
        assert!(h.store.records().is_empty());
    }

    #[tokio::test]
    async fn test_daily_saves_truncated_mean() {
        let h = harness();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let reading = h
            .service
            .daily_fortune_on(h.user_id, "馬", today)
            .await
            .unwrap();

        for score in [
            reading.love_score,
            reading.career_score,
            reading.wealth_score,
            reading.health_score,
        ] {
            assert!((60..=99).contains(&score));
        }
        let expected = (reading.love_score
            + reading.career_score
            + reading.wealth_score
            + reading.health_score)
            / 4;

        let records = h.store.records();
        assert_eq!(records[0].fortune_type, "DAILY");
        assert_eq!(records[0].input_data, "馬|2026-10-19");
        assert_eq!(records[0].score, expected as i32);

        let love_tip = reading.suggestion.lines().nth(3).unwrap();
        assert!(LOVE_TIPS.iter().any(|tier| tier.contains(&love_tip)));
    }

    #[tokio::test]
    async fn test_daily_requery_appends_new_row() {
        let h = harness();
        h.service.get_daily_fortune(h.user_id, "龍").await.unwrap();
        h.service.get_daily_fortune(h.user_id, "龍").await.unwrap();
        assert_eq!(h.store.records().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_user_is_rejected_before_compute() {
        let h = harness();
        let stranger = Uuid::new_v4();

        let err = h
            .service
            .calculate_name_fortune(stranger, "王小明")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(id) if id == stranger));
        assert_eq!(h.oracle.calls(), 0);

        assert!(matches!(
            h.service.get_history_for(stranger).await,
            Err(AppError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_history_is_most_recent_first() {
        let h = harness();
        h.service
            .calculate_bazi(h.user_id, BirthMoment::new(1990, 8, 15, 10, 30), "Taipei")
            .await
            .unwrap();
        h.service
            .calculate_name_fortune(h.user_id, "王小明")
            .await
            .unwrap();

        let history = h.service.get_history_for(h.user_id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].fortune_type, "NAME");
        assert_eq!(history[1].fortune_type, "BAZI");
    }

    #[tokio::test]
    async fn test_stats_count_by_description() {
        let h = harness();
        for _ in 0..2 {
            h.service.get_daily_fortune(h.user_id, "鼠").await.unwrap();
        }
        h.service
            .calculate_name_fortune(h.user_id, "王小明")
            .await
            .unwrap();

        let stats = h.service.get_stats_for(h.user_id).await.unwrap();
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.type_count.get("每日運勢"), Some(&2));
        assert_eq!(stats.type_count.get("姓名算命"), Some(&1));

        let records = h.store.records();
        let mean = records.iter().map(|r| r.score as f64).sum::<f64>() / 3.0;
        assert!((stats.average_score - mean).abs() < 0.006);
    }

    #[tokio::test]
    async fn test_stats_empty_history() {
        let h = harness();
        let stats = h.service.get_stats_for(h.user_id).await.unwrap();
        assert_eq!(stats.total_count, 0);
        assert!(stats.type_count.is_empty());
        assert_eq!(stats.average_score, 0.0);
    }

    #[tokio::test]
    async fn test_seeded_source_reproduces_readings() {
        let birth = BirthMoment::new(1988, 2, 2, 23, 0);
        let a = harness_with(CountingOracle::default(), Arc::new(SeededRandom::new(8)));
        let b = harness_with(CountingOracle::default(), Arc::new(SeededRandom::new(8)));

        let ra = a.service.calculate_bazi(a.user_id, birth, "Tainan").await.unwrap();
        let rb = b.service.calculate_bazi(b.user_id, birth, "Tainan").await.unwrap();

        assert_eq!(ra.analysis, rb.analysis);
        assert_eq!(ra.score, rb.score);
        assert_eq!(ra.elements, rb.elements);
    }

    #[test]
    fn test_summarize_rounds_to_two_decimals() {
        let user_id = Uuid::new_v4();
        let row = |kind: FortuneType, score: i32| FortuneHistoryRow {
            id: Uuid::new_v4(),
            user_id,
            fortune_type: kind.as_str().to_string(),
            input_data: String::new(),
            result_data: String::new(),
            score,
            created_at: chrono::Utc::now(),
        };
        let stats = summarize(&[
            row(FortuneType::Bazi, 70),
            row(FortuneType::Bazi, 71),
            row(FortuneType::Zodiac, 71),
        ]);
        // 212 / 3 = 70.666…
        assert_eq!(stats.average_score, 70.67);
        assert_eq!(stats.type_count.get("生辰八字"), Some(&2));
        assert_eq!(stats.type_count.get("生肖運勢"), Some(&1));
    }
}
