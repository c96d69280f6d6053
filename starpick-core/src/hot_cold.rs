use serde::Serialize;

use starpick_db::models::{Draw, Pool};

use crate::history::{count_in_window, occurrences};
use crate::number::{MID_WINDOW, RECENT_WINDOW};

/// Au-delà de ce nombre de tirages sans sortie, un numéro est « froid ».
const COLD_STREAK: usize = 7;
/// Seuil plus large utilisé par la vue des numéros froids.
const COLD_VIEW_STREAK: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakType {
    Hot,
    Cold,
    Neutral,
}

impl std::fmt::Display for StreakType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreakType::Hot => write!(f, "HOT"),
            StreakType::Cold => write!(f, "COLD"),
            StreakType::Neutral => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Rising => write!(f, "↑"),
            Trend::Falling => write!(f, "↓"),
            Trend::Stable => write!(f, "="),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotColdEntry {
    pub number: u8,
    /// Apparitions sur les 10 derniers tirages.
    pub appearances: usize,
    pub streak_type: StreakType,
    /// Tirages depuis la dernière sortie ; `|historique|` si jamais sorti.
    pub streak: usize,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    pub hot_numbers: Vec<u8>,
    pub overdue_numbers: Vec<u8>,
    pub avoid_numbers: Vec<u8>,
    pub hot_stars: Vec<u8>,
}

/// Classement chaud/froid de chaque numéro du pool, dans l'ordre 1..=taille.
pub fn classify(draws: &[Draw], pool: Pool) -> Vec<HotColdEntry> {
    occurrences(draws, pool)
        .into_iter()
        .zip(pool.range())
        .map(|(occ, number)| {
            let recent = count_in_window(draws, pool, number, RECENT_WINDOW);
            let mid = count_in_window(draws, pool, number, MID_WINDOW);
            let streak = occ.streak(draws.len());

            let streak_type = if recent >= pool.hot_threshold() {
                StreakType::Hot
            } else if streak > COLD_STREAK {
                StreakType::Cold
            } else {
                StreakType::Neutral
            };

            HotColdEntry {
                number,
                appearances: recent,
                streak_type,
                streak,
                trend: trend(recent, mid),
            }
        })
        .collect()
}

fn trend(recent: usize, mid: usize) -> Trend {
    // recent/10 comparé à mid/20 ± 0.1, ramené sur 20
    let recent = 2 * recent;
    if recent > mid + 2 {
        Trend::Rising
    } else if recent + 2 < mid {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

/// Numéros chauds, les plus fréquents récemment en tête.
pub fn hot_numbers(entries: &[HotColdEntry]) -> Vec<HotColdEntry> {
    let mut hot: Vec<HotColdEntry> = entries
        .iter()
        .filter(|e| e.streak_type == StreakType::Hot || e.appearances >= 3)
        .cloned()
        .collect();
    hot.sort_by(|a, b| b.appearances.cmp(&a.appearances));
    hot
}

/// Numéros froids, les plus longues absences en tête.
pub fn cold_numbers(entries: &[HotColdEntry]) -> Vec<HotColdEntry> {
    let mut cold: Vec<HotColdEntry> = entries
        .iter()
        .filter(|e| e.streak_type == StreakType::Cold || e.streak > COLD_VIEW_STREAK)
        .cloned()
        .collect();
    cold.sort_by(|a, b| b.streak.cmp(&a.streak));
    cold
}

/// Numéros en retard au-delà de l'intervalle attendu du pool.
pub fn overdue_numbers(entries: &[HotColdEntry], pool: Pool) -> Vec<HotColdEntry> {
    let mut overdue: Vec<HotColdEntry> = entries
        .iter()
        .filter(|e| e.streak > pool.overdue_interval())
        .cloned()
        .collect();
    overdue.sort_by(|a, b| b.streak.cmp(&a.streak));
    overdue
}

pub fn recommendations(draws: &[Draw]) -> Recommendations {
    let numbers = classify(draws, Pool::Numbers);
    let stars = classify(draws, Pool::Stars);

    let take = |entries: Vec<HotColdEntry>, n: usize| -> Vec<u8> {
        entries.into_iter().take(n).map(|e| e.number).collect()
    };

    Recommendations {
        hot_numbers: take(hot_numbers(&numbers), 5),
        overdue_numbers: take(overdue_numbers(&numbers, Pool::Numbers), 3),
        avoid_numbers: take(cold_numbers(&numbers), 5),
        hot_stars: take(hot_numbers(&stars), 2),
    }
}
