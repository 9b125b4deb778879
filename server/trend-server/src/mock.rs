//! Mock weight store for demo/development

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use trend_core::WeightRecord;

/// Random-walk scale: small daily noise around a slowly changing trend
struct MockScale {
    kgs: f64,
    volatility: f64,
    trend: f64,
}

impl MockScale {
    fn new(initial_kgs: f64) -> Self {
        Self {
            kgs: initial_kgs,
            volatility: 0.35,
            trend: 0.0,
        }
    }

    fn tick<R: Rng>(&mut self, rng: &mut R) -> f64 {
        let drift = self.trend * 0.05;
        let random = (rng.r#gen::<f64>() - 0.5) * 2.0 * self.volatility;

        if rng.r#gen::<f64>() < 0.03 {
            self.trend = (rng.r#gen::<f64>() - 0.5) * 2.0;
        }

        self.kgs = (self.kgs + drift + random).clamp(45.0, 160.0);
        (self.kgs * 10.0).round() / 10.0
    }
}

/// Weighings for `days` days ending at `now`: most days one reading,
/// some days two, some days none.
pub fn generate_history<R: Rng>(rng: &mut R, days: u32, now: DateTime<Utc>) -> Vec<WeightRecord> {
    let mut scale = MockScale::new(rng.gen_range(60.0..110.0));
    let mut weights = Vec::with_capacity(days as usize + days as usize / 4);

    for back in (0..i64::from(days)).rev() {
        let kgs = scale.tick(rng);
        if rng.r#gen::<f64>() < 0.15 {
            continue;
        }

        let readings = if rng.r#gen::<f64>() < 0.25 { 2 } else { 1 };
        for _ in 0..readings {
            let minutes = rng.gen_range(6 * 60..22 * 60);
            let date = now - Duration::days(back) - Duration::minutes(minutes);
            weights.push(WeightRecord::new(date, kgs));
        }
    }

    weights.sort_by_key(|w| w.date);
    weights
}

/// In-memory weights per user
#[derive(Debug, Clone, Default)]
pub struct WeightStore {
    users: HashMap<String, Vec<WeightRecord>>,
}

impl WeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a generated history for every user
    pub fn seeded(users: &[String], history_days: u32, now: DateTime<Utc>) -> Self {
        let mut rng = rand::thread_rng();
        Self::seeded_with(&mut rng, users, history_days, now)
    }

    pub fn seeded_with<R: Rng>(
        rng: &mut R,
        users: &[String],
        history_days: u32,
        now: DateTime<Utc>,
    ) -> Self {
        let mut store = Self::new();
        for user in users {
            let weights = generate_history(rng, history_days, now);
            tracing::info!("seeded {} weighings for {:?}", weights.len(), user);
            store.insert(user.clone(), weights);
        }
        store
    }

    pub fn insert(&mut self, user: impl Into<String>, mut weights: Vec<WeightRecord>) {
        weights.sort_by_key(|w| w.date);
        self.users.insert(user.into(), weights);
    }

    pub fn weights(&self, user: &str) -> Option<&[WeightRecord]> {
        self.users.get(user).map(Vec::as_slice)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 23, 0, 0).unwrap()
    }

    #[test]
    fn test_history_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let weights = generate_history(&mut rng, 200, now());

        assert!(!weights.is_empty());
        assert!(weights.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(weights.iter().all(|w| w.date <= now()));
        assert!(weights.iter().all(|w| w.date > now() - Duration::days(200)));
        assert!(weights.iter().all(|w| (45.0..=160.0).contains(&w.kgs)));
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let users = vec!["a".to_string(), "b".to_string()];
        let first = WeightStore::seeded_with(&mut StdRng::seed_from_u64(1), &users, 30, now());
        let second = WeightStore::seeded_with(&mut StdRng::seed_from_u64(1), &users, 30, now());

        assert_eq!(first.user_count(), 2);
        assert_eq!(first.weights("a"), second.weights("a"));
        assert!(first.weights("nobody").is_none());
    }
}
