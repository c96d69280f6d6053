use rand::Rng;
use serde::Serialize;

use starpick_db::models::{Draw, Pool};

use crate::history::occurrences;
use crate::number::RECENT_WINDOW;
use crate::LOW_MAX;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberFrequency {
    pub number: u8,
    pub count: usize,
    pub percentage: f64,
    /// Index du dernier tirage contenant le numéro ; `|historique|` si jamais sorti.
    pub last_seen: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentPatterns {
    pub draws_analyzed: usize,
    pub consecutive_numbers: usize,
    pub even_odd_ratio: String,
    pub low_high_ratio: String,
}

/// Tous les numéros du pool (y compris jamais sortis), triés par nombre d'apparitions décroissant.
pub fn frequency_table(draws: &[Draw], pool: Pool) -> Vec<NumberFrequency> {
    let total = draws.len();
    let mut table: Vec<NumberFrequency> = occurrences(draws, pool)
        .into_iter()
        .zip(pool.range())
        .map(|(occ, number)| NumberFrequency {
            number,
            count: occ.count,
            percentage: if total > 0 {
                occ.count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            last_seen: occ.streak(total),
        })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}

/// Suites, pair/impair et bas/haut sur les 10 derniers tirages (numéros uniquement).
pub fn recent_patterns(draws: &[Draw]) -> RecentPatterns {
    let recent = &draws[..draws.len().min(RECENT_WINDOW)];

    let mut consecutive = 0;
    let (mut even, mut odd, mut low, mut high) = (0usize, 0usize, 0usize, 0usize);

    for draw in recent {
        let mut sorted = draw.numbers;
        sorted.sort_unstable();
        consecutive += sorted.windows(2).filter(|w| w[1] == w[0] + 1).count();

        for &n in &sorted {
            if n % 2 == 0 {
                even += 1;
            } else {
                odd += 1;
            }
            if n <= LOW_MAX {
                low += 1;
            } else {
                high += 1;
            }
        }
    }

    RecentPatterns {
        draws_analyzed: recent.len(),
        consecutive_numbers: consecutive,
        even_odd_ratio: format!("{}:{}", even, odd),
        low_high_ratio: format!("{}:{}", low, high),
    }
}

/// Grille construite sur les fréquences : les plus fréquents, puis les numéros « dus »,
/// puis un tirage au sort parmi les plus fréquents pour compléter.
pub fn frequency_based_combination<R: Rng>(draws: &[Draw], rng: &mut R) -> ([u8; 5], [u8; 2]) {
    let numbers = frequency_selection(draws, Pool::Numbers, 3, 5, 20, rng);
    let stars = frequency_selection(draws, Pool::Stars, 1, 3, Pool::Stars.size(), rng);

    let mut numbers_arr = [0u8; 5];
    for (i, &n) in numbers.iter().take(5).enumerate() {
        numbers_arr[i] = n;
    }
    numbers_arr.sort();

    let mut stars_arr = [0u8; 2];
    for (i, &s) in stars.iter().take(2).enumerate() {
        stars_arr[i] = s;
    }
    stars_arr.sort();

    (numbers_arr, stars_arr)
}

fn frequency_selection<R: Rng>(
    draws: &[Draw],
    pool: Pool,
    hot_count: usize,
    due_after: usize,
    filler_size: usize,
    rng: &mut R,
) -> Vec<u8> {
    let table = frequency_table(draws, pool);
    let wanted = pool.pick_count();

    let mut selected: Vec<u8> = table.iter().take(hot_count).map(|f| f.number).collect();

    for f in &table {
        if selected.len() >= wanted {
            break;
        }
        // pas sorti sur les `due_after` derniers tirages
        if f.last_seen >= due_after && !selected.contains(&f.number) {
            selected.push(f.number);
        }
    }

    let mut filler: Vec<u8> = table
        .iter()
        .take(filler_size)
        .map(|f| f.number)
        .filter(|n| !selected.contains(n))
        .collect();

    while selected.len() < wanted && !filler.is_empty() {
        let idx = rng.random_range(0..filler.len());
        selected.push(filler.remove(idx));
    }

    log::debug!("Sélection fréquentielle {pool:?} : {selected:?}");
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{draw, make_test_draws};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_table_covers_pool() {
        let draws = make_test_draws(25);
        let numbers = frequency_table(&draws, Pool::Numbers);
        let stars = frequency_table(&draws, Pool::Stars);
        assert_eq!(numbers.len(), 50);
        assert_eq!(stars.len(), 12);
        assert!(numbers.windows(2).all(|w| w[0].count >= w[1].count));

        let total: usize = numbers.iter().map(|f| f.count).sum();
        assert_eq!(total, 25 * 5);
    }

    #[test]
    fn test_table_values() {
        let draws = vec![
            draw([1, 2, 3, 4, 5], [1, 2]),
            draw([1, 10, 20, 30, 40], [1, 3]),
            draw([6, 11, 21, 31, 41], [4, 5]),
            draw([7, 12, 22, 32, 42], [6, 7]),
        ];
        let table = frequency_table(&draws, Pool::Numbers);
        assert_eq!(table[0].number, 1);
        assert_eq!(table[0].count, 2);
        assert!((table[0].percentage - 50.0).abs() < 1e-10);
        assert_eq!(table[0].last_seen, 0);

        let n40 = table.iter().find(|f| f.number == 40).unwrap();
        assert_eq!(n40.last_seen, 1);
        assert!((n40.percentage - 25.0).abs() < 1e-10);

        let n50 = table.iter().find(|f| f.number == 50).unwrap();
        assert_eq!(n50.count, 0);
        assert_eq!(n50.last_seen, 4);
    }

    #[test]
    fn test_table_empty_history() {
        let table = frequency_table(&[], Pool::Stars);
        assert_eq!(table.len(), 12);
        for f in &table {
            assert_eq!(f.count, 0);
            assert_eq!(f.percentage, 0.0);
            assert_eq!(f.last_seen, 0);
        }
    }

    #[test]
    fn test_recent_patterns() {
        let draws = vec![
            draw([5, 1, 2, 3, 40], [1, 2]),
            draw([10, 11, 30, 31, 50], [1, 2]),
        ];
        let p = recent_patterns(&draws);
        assert_eq!(p.draws_analyzed, 2);
        // 1-2, 2-3 puis 10-11, 30-31
        assert_eq!(p.consecutive_numbers, 4);
        // pairs : 2, 40, 10, 30, 50 ; impairs : 5, 1, 3, 11, 31
        assert_eq!(p.even_odd_ratio, "5:5");
        assert_eq!(p.low_high_ratio, "6:4");
    }

    #[test]
    fn test_recent_patterns_window() {
        let draws = make_test_draws(40);
        assert_eq!(recent_patterns(&draws).draws_analyzed, 10);
        let empty = recent_patterns(&[]);
        assert_eq!(empty.consecutive_numbers, 0);
        assert_eq!(empty.even_odd_ratio, "0:0");
    }

    #[test]
    fn test_frequency_combination_shape() {
        let draws = make_test_draws(30);
        let mut rng = StdRng::seed_from_u64(7);
        let (numbers, stars) = frequency_based_combination(&draws, &mut rng);
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        assert!(numbers.iter().all(|n| (1..=50).contains(n)));
        assert!(stars[0] < stars[1]);
        assert!(stars.iter().all(|s| (1..=12).contains(s)));
    }

    #[test]
    fn test_frequency_combination_prefers_hot_then_due() {
        let mut draws = vec![
            draw([1, 2, 3, 4, 5], [1, 2]),
            draw([1, 2, 3, 6, 7], [1, 3]),
            draw([1, 2, 8, 9, 10], [1, 4]),
            draw([1, 11, 12, 13, 14], [5, 6]),
            draw([15, 16, 17, 18, 19], [7, 8]),
        ];
        // 44 et 45 ne sont plus sortis depuis 5 tirages
        draws.push(draw([44, 45, 46, 47, 48], [9, 10]));
        let mut rng = StdRng::seed_from_u64(1);
        let (numbers, stars) = frequency_based_combination(&draws, &mut rng);
        assert_eq!(numbers, [1, 2, 3, 44, 45]);
        // étoile chaude 1 + première étoile non sortie depuis 3 tirages
        assert_eq!(stars, [1, 5]);
    }

    #[test]
    fn test_frequency_combination_seeded_is_reproducible() {
        let draws: Vec<Draw> = Vec::new();
        let a = frequency_based_combination(&draws, &mut StdRng::seed_from_u64(99));
        let b = frequency_based_combination(&draws, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
        // historique vide : les trois premiers de la table restent retenus
        assert!(a.0.contains(&1) && a.0.contains(&2) && a.0.contains(&3));
    }
}
