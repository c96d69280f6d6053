use serde::Serialize;

use starpick_db::models::{Draw, Pool};

use crate::number::{score_number, NumberProbability};
use crate::{round_to, LOW_MAX};

/// Plafond du pourcentage de gain affiché pour une grille.
pub const WIN_CHANCE_CAP: f64 = 15.0;
pub const BALANCE_BONUS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub frequency: f64,
    pub hot_cold: f64,
    pub pattern: f64,
    pub overdue: f64,
    pub balance_bonus: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationScore {
    pub numbers: Vec<u8>,
    pub stars: Vec<u8>,
    pub probability_score: f64,
    pub win_chance: String,
    pub breakdown: ScoreBreakdown,
}

/// Score d'une grille : moyenne des composantes sur les numéros et étoiles confondus,
/// plus un bonus d'équilibre pair/impair et bas/haut.
pub fn score_combination(numbers: &[u8], stars: &[u8], draws: &[Draw]) -> CombinationScore {
    let mut numbers = numbers.to_vec();
    numbers.sort_unstable();
    let mut stars = stars.to_vec();
    stars.sort_unstable();

    let scores: Vec<_> = numbers
        .iter()
        .map(|&n| score_number(n, draws, Pool::Numbers))
        .chain(stars.iter().map(|&s| score_number(s, draws, Pool::Stars)))
        .collect();

    let count = scores.len();
    let average = |component: fn(&NumberProbability) -> u32| -> f64 {
        if count == 0 {
            return 0.0;
        }
        scores.iter().map(|p| component(p) as f64).sum::<f64>() / count as f64
    };

    let frequency = average(|p| p.frequency_score);
    let hot_cold = average(|p| p.hot_cold_score);
    let pattern = average(|p| p.pattern_score);
    let overdue = average(|p| p.overdue_score);
    let balance_bonus = balance_bonus(&numbers);

    let raw = frequency + hot_cold + pattern + overdue + balance_bonus as f64;
    let probability_score = round_to(raw.min(100.0), 1);

    CombinationScore {
        win_chance: win_chance(probability_score),
        numbers,
        stars,
        probability_score,
        breakdown: ScoreBreakdown {
            frequency: round_to(frequency, 1),
            hot_cold: round_to(hot_cold, 1),
            pattern: round_to(pattern, 1),
            overdue: round_to(overdue, 1),
            balance_bonus,
        },
    }
}

fn balance_bonus(numbers: &[u8]) -> u32 {
    let even = numbers.iter().filter(|&&n| n % 2 == 0).count();
    let low = numbers.iter().filter(|&&n| n <= LOW_MAX).count();

    let mut bonus = 0;
    if (2..=3).contains(&even) {
        bonus += BALANCE_BONUS;
    }
    if (2..=3).contains(&low) {
        bonus += BALANCE_BONUS;
    }
    bonus
}

fn win_chance(probability_score: f64) -> String {
    format!("{:.2}%", probability_score / 100.0 * WIN_CHANCE_CAP)
}
