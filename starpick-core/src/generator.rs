use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use starpick_db::models::{Draw, Pool};

use crate::combination::{score_combination, CombinationScore};
use crate::number::{all_number_probabilities, NumberProbability};
use crate::{Selection, LOW_MAX};

pub const MAX_COMBINATIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCombination {
    #[serde(flatten)]
    pub score: CombinationScore,
    /// Position 1-based après tri par score décroissant.
    pub rank: usize,
    pub confidence: String,
}

/// Stratégie de sélection, déterminée par la position de la grille dans la demande.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Best,
    Balanced,
    PatternBalanced,
    WeightedRandom,
}

impl Strategy {
    pub fn for_slot(slot: usize) -> Self {
        match slot {
            0 => Strategy::Best,
            1 => Strategy::Balanced,
            2 => Strategy::PatternBalanced,
            _ => Strategy::WeightedRandom,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Best => write!(f, "best"),
            Strategy::Balanced => write!(f, "balanced"),
            Strategy::PatternBalanced => write!(f, "pattern-balanced"),
            Strategy::WeightedRandom => write!(f, "weighted-random"),
        }
    }
}

/// Générateur par défaut des positions aléatoires : graine = index de la position.
pub fn slot_rng(slot: usize) -> StdRng {
    StdRng::seed_from_u64(slot as u64)
}

/// Génère `count` grilles (ramené dans 1..=10), classées par score décroissant.
pub fn generate_top_combinations(draws: &[Draw], count: usize) -> Vec<GeneratedCombination> {
    generate_top_combinations_with(draws, count, slot_rng)
}

/// Comme [`generate_top_combinations`], avec un générateur aléatoire fourni par position.
pub fn generate_top_combinations_with<R, F>(
    draws: &[Draw],
    count: usize,
    mut rng_for_slot: F,
) -> Vec<GeneratedCombination>
where
    R: Rng,
    F: FnMut(usize) -> R,
{
    let count = count.clamp(1, MAX_COMBINATIONS);
    let numbers = all_number_probabilities(draws, Pool::Numbers);
    let stars = all_number_probabilities(draws, Pool::Stars);

    let scored = (0..count)
        .map(|slot| {
            let strategy = Strategy::for_slot(slot);
            let selection = match strategy {
                Strategy::Best => best_selection(&numbers, &stars),
                Strategy::Balanced => balanced_selection(&numbers, &stars),
                Strategy::PatternBalanced => pattern_balanced_selection(&numbers, &stars),
                Strategy::WeightedRandom => {
                    weighted_random_selection(&numbers, &stars, &mut rng_for_slot(slot))
                }
            };
            log::debug!("Position {slot} ({strategy}) : {:?} + {:?}", selection.numbers, selection.stars);
            score_combination(&selection.numbers, &selection.stars, draws)
        })
        .collect();

    rank(scored)
}

/// Classe des grilles fournies par l'appelant, sans en générer de nouvelles.
pub fn rank_combinations(selections: &[Selection], draws: &[Draw]) -> Vec<GeneratedCombination> {
    let scored = selections
        .iter()
        .map(|s| score_combination(&s.numbers, &s.stars, draws))
        .collect();
    rank(scored)
}

/// La confiance décroît avec la position, sans descendre sous la moitié du score.
fn confidence(probability_score: f64, slot: usize) -> String {
    let factor = (1.0 - slot as f64 * 0.05).max(0.5);
    format!("{:.2}", probability_score / 100.0 * factor)
}

fn rank(scored: Vec<CombinationScore>) -> Vec<GeneratedCombination> {
    let mut combos: Vec<GeneratedCombination> = scored
        .into_iter()
        .enumerate()
        .map(|(slot, score)| GeneratedCombination {
            confidence: confidence(score.probability_score, slot),
            score,
            rank: 0,
        })
        .collect();

    combos.sort_by(|a, b| {
        b.score
            .probability_score
            .partial_cmp(&a.score.probability_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, combo) in combos.iter_mut().enumerate() {
        combo.rank = i + 1;
    }
    combos
}

/// Complète `selected` avec les candidats suivants non retenus.
fn backfill(selected: &mut Vec<u8>, candidates: impl IntoIterator<Item = u8>, wanted: usize) {
    for n in candidates {
        if selected.len() >= wanted {
            break;
        }
        if !selected.contains(&n) {
            selected.push(n);
        }
    }
}

fn top_stars(stars: &[NumberProbability]) -> Vec<u8> {
    stars.iter().take(2).map(|p| p.number).collect()
}

/// Les meilleurs scores, en évitant les numéros adjacents une fois trois retenus.
fn best_selection(numbers: &[NumberProbability], stars: &[NumberProbability]) -> Selection {
    let mut picked: Vec<u8> = Vec::with_capacity(5);
    for p in numbers.iter().take(15) {
        if picked.len() >= 5 {
            break;
        }
        let adjacent = picked.iter().any(|&q| q.abs_diff(p.number) == 1);
        if picked.len() >= 3 && adjacent {
            continue;
        }
        picked.push(p.number);
    }
    backfill(&mut picked, numbers.iter().map(|p| p.number), 5);

    Selection::new(picked, top_stars(stars))
}

fn sorted_by(probs: &[NumberProbability], key: fn(&NumberProbability) -> u32) -> Vec<NumberProbability> {
    let mut sorted = probs.to_vec();
    sorted.sort_by(|a, b| key(b).cmp(&key(a)));
    sorted
}

/// Trois numéros « chauds », complétés par des numéros en retard.
fn balanced_selection(numbers: &[NumberProbability], stars: &[NumberProbability]) -> Selection {
    let by_hot = sorted_by(numbers, |p| p.hot_cold_score);
    let by_overdue = sorted_by(numbers, |p| p.overdue_score);

    let mut picked: Vec<u8> = by_hot.iter().take(3).map(|p| p.number).collect();
    backfill(&mut picked, by_overdue.iter().take(10).map(|p| p.number), 5);
    backfill(&mut picked, numbers.iter().map(|p| p.number), 5);

    let stars_by_hot = sorted_by(stars, |p| p.hot_cold_score);
    let stars_by_overdue = sorted_by(stars, |p| p.overdue_score);

    let mut picked_stars: Vec<u8> = stars_by_hot.iter().take(1).map(|p| p.number).collect();
    backfill(&mut picked_stars, stars_by_overdue.iter().map(|p| p.number), 2);
    backfill(&mut picked_stars, stars.iter().map(|p| p.number), 2);

    Selection::new(picked, picked_stars)
}

/// Parcourt le top 20 en gardant au plus 3 pairs, 3 impairs, 3 bas et 3 hauts.
fn pattern_balanced_selection(numbers: &[NumberProbability], stars: &[NumberProbability]) -> Selection {
    let mut picked: Vec<u8> = Vec::with_capacity(5);
    for p in numbers.iter().take(20) {
        if picked.len() >= 5 {
            break;
        }
        let n = p.number;
        let is_even = n % 2 == 0;
        let is_low = n <= LOW_MAX;
        let same_parity = picked.iter().filter(|&&q| (q % 2 == 0) == is_even).count();
        let same_half = picked.iter().filter(|&&q| (q <= LOW_MAX) == is_low).count();
        if same_parity >= 3 || same_half >= 3 {
            continue;
        }
        picked.push(n);
    }
    backfill(&mut picked, numbers.iter().take(20).map(|p| p.number), 5);

    Selection::new(picked, best_selection(numbers, stars).stars)
}

/// Tirage pondéré sans remise sur le top 25 des numéros et le top 6 des étoiles.
pub fn weighted_random_selection<R: Rng>(
    numbers: &[NumberProbability],
    stars: &[NumberProbability],
    rng: &mut R,
) -> Selection {
    Selection::new(
        sample_without_replacement(numbers, 25, 5, rng),
        sample_without_replacement(stars, 6, 2, rng),
    )
}

fn sample_without_replacement<R: Rng>(
    ranked: &[NumberProbability],
    top: usize,
    count: usize,
    rng: &mut R,
) -> Vec<u8> {
    let mut available: Vec<(u8, f64)> = ranked
        .iter()
        .take(top)
        .map(|p| (p.number, p.total_score as f64))
        .collect();
    let mut selected = Vec::with_capacity(count);

    while selected.len() < count && !available.is_empty() {
        let weights: Vec<f64> = available.iter().map(|(_, w)| *w).collect();
        // sans tirage possible, on prend le meilleur candidat restant
        let idx = match WeightedIndex::new(&weights) {
            Ok(dist) => dist.sample(rng),
            Err(e) => {
                log::debug!("Tirage pondéré impossible ({e}), repli sur le meilleur candidat");
                0
            }
        };
        let (number, _) = available.remove(idx);
        selected.push(number);
    }
    backfill(&mut selected, ranked.iter().map(|p| p.number), count);

    selected
}
