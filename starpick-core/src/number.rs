use serde::Serialize;

use starpick_db::models::{Draw, Pool};

use crate::history::{count_in_window, last_seen};

/// Fenêtre « récente » (10 derniers tirages).
pub const RECENT_WINDOW: usize = 10;
/// Fenêtre « intermédiaire » (20 derniers tirages).
pub const MID_WINDOW: usize = 20;

pub const MAX_FREQUENCY_SCORE: u32 = 40;
pub const MAX_HOT_COLD_SCORE: u32 = 30;
pub const MAX_PATTERN_SCORE: u32 = 20;
pub const MAX_OVERDUE_SCORE: u32 = 10;

/// Score composite 0-100 d'un numéro et ses quatre composantes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberProbability {
    pub number: u8,
    pub frequency_score: u32,
    pub hot_cold_score: u32,
    pub pattern_score: u32,
    pub overdue_score: u32,
    pub total_score: u32,
    /// Lecture directe du score total en pourcentage, pas une probabilité calibrée.
    pub win_chance: u32,
}

pub fn score_number(number: u8, draws: &[Draw], pool: Pool) -> NumberProbability {
    let appearances = count_in_window(draws, pool, number, draws.len());
    let recent = count_in_window(draws, pool, number, RECENT_WINDOW);
    let mid = count_in_window(draws, pool, number, MID_WINDOW);

    let frequency_score = frequency_score(appearances, draws.len(), pool);
    let hot_cold_score = hot_cold_score(recent, mid);
    let pattern_score = pattern_score(number, pool);
    let overdue_score = overdue_score(last_seen(draws, pool, number), pool);

    let total_score = frequency_score + hot_cold_score + pattern_score + overdue_score;

    NumberProbability {
        number,
        frequency_score,
        hot_cold_score,
        pattern_score,
        overdue_score,
        total_score,
        win_chance: total_score,
    }
}

/// Tous les numéros du pool, triés par score total décroissant (tri stable : à égalité, ordre croissant).
pub fn all_number_probabilities(draws: &[Draw], pool: Pool) -> Vec<NumberProbability> {
    let mut probs: Vec<NumberProbability> = pool
        .range()
        .map(|n| score_number(n, draws, pool))
        .collect();
    probs.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    probs
}

/// Récompense la proximité du taux attendu plutôt que la seule fréquence.
fn frequency_score(appearances: usize, history_len: usize, pool: Pool) -> u32 {
    if history_len == 0 {
        return 20;
    }
    // ratio × 10 = a / e, comparé sans flottants
    let a = appearances * pool.size() * 10;
    let e = history_len * pool.pick_count();

    if 8 * e <= a && a <= 12 * e {
        40
    } else if 6 * e <= a && a < 8 * e {
        30
    } else if 12 * e < a && a <= 15 * e {
        35
    } else if a > 15 * e {
        25
    } else {
        20
    }
}

fn hot_cold_score(recent: usize, mid: usize) -> u32 {
    // recent/10 > mid/20  <=>  2*recent > mid
    if recent >= 3 && 2 * recent > mid {
        30
    } else if recent >= 2 {
        25
    } else if recent == 1 {
        20
    } else if mid >= 2 {
        22
    } else {
        15
    }
}

fn pattern_score(number: u8, pool: Pool) -> u32 {
    if pool == Pool::Stars {
        return 15;
    }
    let mut score: i32 = 10;
    if (15..=35).contains(&number) {
        score += 5;
    }
    if number % 2 == 1 {
        score += 3;
    }
    if number % 5 == 0 {
        score -= 3;
    }
    score.clamp(0, MAX_PATTERN_SCORE as i32) as u32
}

fn overdue_score(last_seen: Option<usize>, pool: Pool) -> u32 {
    let interval = pool.overdue_interval();
    match last_seen {
        None => 10,
        Some(t) if t > 2 * interval => 10,
        Some(t) if t > interval => 7,
        Some(0) => 2,
        Some(_) => 5,
    }
}
