// Copyright 2026 the recall authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The SM-2-derived scheduling algorithm.

use crate::error::Error;
use crate::error::Fallible;
use crate::types::record::CardRecord;
use crate::types::timestamp::Timestamp;

/// The ease factor assigned to a card on its first review.
pub const DEFAULT_EASE: f64 = 2.5;

/// The floor below which the ease factor never drops.
pub const MIN_EASE: f64 = 1.3;

/// Ease penalty for forgetting a card.
const AGAIN_EASE_PENALTY: f64 = 0.2;

/// Ease penalty for recalling a card with difficulty.
const HARD_EASE_PENALTY: f64 = 0.15;

/// Ease bonus for an effortless recall.
const EASY_EASE_BONUS: f64 = 0.15;

/// Interval growth factor for a difficult recall.
const HARD_INTERVAL_GROWTH: f64 = 1.2;

/// Extra interval growth factor for an effortless recall.
const EASY_INTERVAL_BONUS: f64 = 1.3;

/// How long a forgotten card sleeps before coming back, in seconds.
const RELAPSE_DELAY_SECS: i64 = 60;

/// The floor for success-path intervals, in days.
const MIN_INTERVAL_DAYS: f64 = 1.0;

const SECS_PER_DAY: f64 = 86_400.0;

/// A recall rating, from complete failure to effortless success.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Parse a rating from its lowercase wire form. Anything else is a
    /// caller contract violation.
    pub fn parse(s: &str) -> Fallible<Self> {
        match s {
            "again" => Ok(Rating::Again),
            "hard" => Ok(Rating::Hard),
            "good" => Ok(Rating::Good),
            "easy" => Ok(Rating::Easy),
            _ => Err(Error::InvalidRating(s.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Again => "Again",
            Rating::Hard => "Hard",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        }
    }
}

/// Apply a rating to a card's existing record (or its absence, for a new
/// card) and return the next record.
///
/// Pure and deterministic: identical inputs always yield identical output,
/// and the clock is never read here.
pub fn apply_rating(existing: Option<&CardRecord>, rating: Rating, now: Timestamp) -> CardRecord {
    let (mut ease, mut reps, mut interval) = match existing {
        Some(record) => (record.ease_factor, record.repetitions, record.interval_days),
        None => (DEFAULT_EASE, 0, 0.0),
    };

    let due = match rating {
        Rating::Again => {
            ease = (ease - AGAIN_EASE_PENALTY).max(MIN_EASE);
            reps = 0;
            interval = 0.0;
            now.plus_seconds(RELAPSE_DELAY_SECS)
        }
        Rating::Hard => {
            ease = (ease - HARD_EASE_PENALTY).max(MIN_EASE);
            reps += 1;
            interval = match reps {
                1 => 1.0,
                2 => 3.0,
                _ => (interval * HARD_INTERVAL_GROWTH).max(MIN_INTERVAL_DAYS),
            };
            due_after(now, interval)
        }
        Rating::Good => {
            reps += 1;
            interval = match reps {
                1 => 1.0,
                2 => 6.0,
                _ => (interval * ease).max(MIN_INTERVAL_DAYS),
            };
            due_after(now, interval)
        }
        Rating::Easy => {
            ease += EASY_EASE_BONUS;
            reps += 1;
            interval = match reps {
                1 => 2.0,
                2 => 7.0,
                _ => (interval * ease * EASY_INTERVAL_BONUS).max(MIN_INTERVAL_DAYS),
            };
            due_after(now, interval)
        }
    };

    CardRecord {
        due,
        interval_days: interval,
        ease_factor: ease,
        repetitions: reps,
    }
}

fn due_after(now: Timestamp, interval_days: f64) -> Timestamp {
    now.plus_seconds((interval_days * SECS_PER_DAY).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(due: i64, interval_days: f64, ease_factor: f64, repetitions: u32) -> CardRecord {
        CardRecord {
            due: Timestamp::new(due),
            interval_days,
            ease_factor,
            repetitions,
        }
    }

    #[test]
    fn test_good_on_new_card_is_one_day() {
        let now = Timestamp::new(1000);
        let next = apply_rating(None, Rating::Good, now);
        assert_eq!(next.repetitions, 1);
        assert_eq!(next.interval_days, 1.0);
        assert_eq!(next.ease_factor, DEFAULT_EASE);
        assert_eq!(next.due, Timestamp::new(1000 + 86_400));
    }

    #[test]
    fn test_again_resets_and_comes_back_soon() {
        let now = Timestamp::new(1_700_000_000);
        let prev = record(now.as_secs(), 10.0, 2.5, 5);
        let next = apply_rating(Some(&prev), Rating::Again, now);
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.interval_days, 0.0);
        assert_eq!(next.ease_factor, 2.3);
        assert_eq!(next.due, now.plus_seconds(60));
    }

    #[test]
    fn test_again_on_new_card_uses_baseline_ease() {
        let now = Timestamp::new(1000);
        let next = apply_rating(None, Rating::Again, now);
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.ease_factor, DEFAULT_EASE - 0.2);
        assert_eq!(next.due, now.plus_seconds(60));
    }

    #[test]
    fn test_ease_never_drops_below_minimum() {
        let now = Timestamp::new(1000);
        let mut current = apply_rating(None, Rating::Again, now);
        for _ in 0..20 {
            current = apply_rating(Some(&current), Rating::Again, now);
            assert!(current.ease_factor >= MIN_EASE);
        }
        assert_eq!(current.ease_factor, MIN_EASE);
    }

    #[test]
    fn test_again_never_increases_ease() {
        let now = Timestamp::new(1000);
        for ease in [1.3, 1.5, 2.5, 3.0] {
            let prev = record(1000, 4.0, ease, 2);
            let next = apply_rating(Some(&prev), Rating::Again, now);
            assert!(next.ease_factor <= ease);
        }
    }

    #[test]
    fn test_hard_interval_progression() {
        let now = Timestamp::new(1000);
        let first = apply_rating(None, Rating::Hard, now);
        assert_eq!(first.interval_days, 1.0);
        assert_eq!(first.ease_factor, 2.35);
        let second = apply_rating(Some(&first), Rating::Hard, now);
        assert_eq!(second.interval_days, 3.0);
        let third = apply_rating(Some(&second), Rating::Hard, now);
        assert_eq!(third.interval_days, 3.0 * 1.2);
        assert_eq!(third.repetitions, 3);
    }

    #[test]
    fn test_good_interval_progression() {
        let now = Timestamp::new(1000);
        let first = apply_rating(None, Rating::Good, now);
        let second = apply_rating(Some(&first), Rating::Good, now);
        assert_eq!(second.interval_days, 6.0);
        assert_eq!(second.ease_factor, DEFAULT_EASE);
        let third = apply_rating(Some(&second), Rating::Good, now);
        assert_eq!(third.interval_days, 6.0 * DEFAULT_EASE);
        assert_eq!(third.due, now.plus_seconds((6.0 * DEFAULT_EASE * 86_400.0) as i64));
    }

    #[test]
    fn test_easy_applies_bonus_to_adjusted_ease() {
        let now = Timestamp::new(1000);
        let prev = record(1000, 7.0, 2.5, 2);
        let next = apply_rating(Some(&prev), Rating::Easy, now);
        assert_eq!(next.ease_factor, 2.65);
        assert_eq!(next.interval_days, 7.0 * 2.65 * 1.3);
        assert_eq!(next.repetitions, 3);
    }

    #[test]
    fn test_success_ratings_push_due_into_the_future() {
        let now = Timestamp::new(5000);
        let states = [None, Some(record(0, 3.0, 2.5, 2)), Some(record(0, 1.0, 1.3, 1))];
        for existing in &states {
            for rating in [Rating::Hard, Rating::Good, Rating::Easy] {
                let next = apply_rating(existing.as_ref(), rating, now);
                assert!(next.due > now);
                assert!(next.interval_days >= 1.0);
            }
        }
    }

    #[test]
    fn test_rerating_later_never_moves_due_backwards() {
        let t1 = Timestamp::new(1000);
        let t2 = Timestamp::new(100_000);
        for rating in [Rating::Hard, Rating::Good, Rating::Easy] {
            let first = apply_rating(None, rating, t1);
            let second = apply_rating(Some(&first), rating, t2);
            assert!(second.due >= first.due);
        }
    }

    #[test]
    fn test_is_deterministic() {
        let now = Timestamp::new(42);
        let prev = record(0, 6.0, 2.2, 3);
        let a = apply_rating(Some(&prev), Rating::Good, now);
        let b = apply_rating(Some(&prev), Rating::Good, now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!(Rating::parse("again").unwrap(), Rating::Again);
        assert_eq!(Rating::parse("hard").unwrap(), Rating::Hard);
        assert_eq!(Rating::parse("good").unwrap(), Rating::Good);
        assert_eq!(Rating::parse("easy").unwrap(), Rating::Easy);
        let err = Rating::parse("excellent").unwrap_err();
        assert!(matches!(err, Error::InvalidRating(_)));
    }
}
