use starpick_db::models::{Draw, Pool};

/// Nombre d'apparitions d'un numéro et index du tirage le plus récent qui le contient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occurrence {
    pub count: usize,
    pub last_seen: Option<usize>,
}

impl Occurrence {
    /// Tirages écoulés depuis la dernière sortie, ou `history_len` si jamais sorti.
    pub fn streak(&self, history_len: usize) -> usize {
        self.last_seen.unwrap_or(history_len)
    }
}

/// Une passe sur l'historique ; l'entrée `i` concerne le numéro `i + 1`.
pub fn occurrences(draws: &[Draw], pool: Pool) -> Vec<Occurrence> {
    draws
        .iter()
        .enumerate()
        .fold(vec![Occurrence::default(); pool.size()], |mut acc, (t, draw)| {
            for &n in pool.numbers_from(draw) {
                if let Some(occ) = (n as usize).checked_sub(1).and_then(|i| acc.get_mut(i)) {
                    occ.count += 1;
                    occ.last_seen.get_or_insert(t);
                }
            }
            acc
        })
}

pub fn count_in_window(draws: &[Draw], pool: Pool, number: u8, window: usize) -> usize {
    draws
        .iter()
        .take(window)
        .filter(|d| pool.numbers_from(d).contains(&number))
        .count()
}

pub fn last_seen(draws: &[Draw], pool: Pool, number: u8) -> Option<usize> {
    draws
        .iter()
        .position(|d| pool.numbers_from(d).contains(&number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{draw, make_test_draws};

    #[test]
    fn test_occurrences_counts_and_last_seen() {
        let draws = vec![
            draw([1, 2, 3, 4, 5], [1, 2]),
            draw([1, 10, 20, 30, 40], [1, 3]),
            draw([2, 11, 21, 31, 41], [4, 5]),
        ];
        let occ = occurrences(&draws, Pool::Numbers);
        assert_eq!(occ.len(), 50);
        assert_eq!(occ[0], Occurrence { count: 2, last_seen: Some(0) });
        assert_eq!(occ[9], Occurrence { count: 1, last_seen: Some(1) });
        assert_eq!(occ[49], Occurrence { count: 0, last_seen: None });

        let stars = occurrences(&draws, Pool::Stars);
        assert_eq!(stars.len(), 12);
        assert_eq!(stars[0].count, 2);
        assert_eq!(stars[3].last_seen, Some(2));
    }

    #[test]
    fn test_streak_sentinel() {
        let occ = Occurrence::default();
        assert_eq!(occ.streak(42), 42);
        assert_eq!(Occurrence { count: 1, last_seen: Some(3) }.streak(42), 3);
    }

    #[test]
    fn test_occurrences_empty_history() {
        let occ = occurrences(&[], Pool::Stars);
        assert!(occ.iter().all(|o| o.count == 0 && o.last_seen.is_none()));
    }

    #[test]
    fn test_window_and_last_seen_agree_with_fold() {
        let draws = make_test_draws(30);
        let occ = occurrences(&draws, Pool::Numbers);
        for n in Pool::Numbers.range() {
            let i = (n - 1) as usize;
            assert_eq!(occ[i].count, count_in_window(&draws, Pool::Numbers, n, draws.len()));
            assert_eq!(occ[i].last_seen, last_seen(&draws, Pool::Numbers, n));
        }
        assert_eq!(count_in_window(&draws, Pool::Numbers, 1, 10), 1);
        assert_eq!(last_seen(&draws, Pool::Stars, 12), None);
    }
}
