use serde::Serialize;

use starpick_db::models::{Bet, Draw};

pub const NO_PRIZE: &str = "No prize";

/// Rangs gagnants EuroMillions, indexés par code de correspondance.
pub const PRIZE_TABLE: [(&str, &str); 12] = [
    ("5+2", "🏆 JACKPOT!"),
    ("5+1", "🥈 2nd Prize"),
    ("5+0", "🥉 3rd Prize"),
    ("4+2", "💰 4th Prize"),
    ("4+1", "💰 5th Prize"),
    ("3+2", "💰 6th Prize"),
    ("4+0", "🎉 7th Prize"),
    ("2+2", "🎉 8th Prize"),
    ("3+1", "🎉 9th Prize"),
    ("3+0", "🎫 10th Prize"),
    ("1+2", "🎫 11th Prize"),
    ("2+1", "🎫 12th Prize"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub bet_id: String,
    pub matched_numbers: Vec<u8>,
    pub matched_stars: Vec<u8>,
    pub number_match_count: usize,
    pub star_match_count: usize,
    pub match_code: String,
    pub is_winner: bool,
    pub prize: String,
}

pub fn prize_for(match_code: &str) -> Option<&'static str> {
    PRIZE_TABLE
        .iter()
        .find(|(code, _)| *code == match_code)
        .map(|(_, prize)| *prize)
}

fn intersect(picked: &[u8], drawn: &[u8]) -> Vec<u8> {
    let mut matched: Vec<u8> = picked.iter().copied().filter(|n| drawn.contains(n)).collect();
    matched.sort_unstable();
    matched
}

pub fn check_bet(bet: &Bet, draw: &Draw) -> MatchResult {
    let matched_numbers = intersect(&bet.numbers, &draw.numbers);
    let matched_stars = intersect(&bet.stars, &draw.stars);
    let match_code = format!("{}+{}", matched_numbers.len(), matched_stars.len());
    let prize = prize_for(&match_code);

    MatchResult {
        bet_id: bet.id.clone(),
        number_match_count: matched_numbers.len(),
        star_match_count: matched_stars.len(),
        matched_numbers,
        matched_stars,
        is_winner: prize.is_some(),
        prize: prize.unwrap_or(NO_PRIZE).to_string(),
        match_code,
    }
}

pub fn check_all_bets(bets: &[Bet], draw: &Draw) -> Vec<MatchResult> {
    bets.iter().map(|bet| check_bet(bet, draw)).collect()
}

/// Un numéro compte dix fois plus qu'une étoile.
pub fn closeness(result: &MatchResult) -> usize {
    result.number_match_count * 10 + result.star_match_count
}

/// La grille la plus proche du tirage ; `None` si aucune grille.
pub fn find_closest_bet(bets: &[Bet], draw: &Draw) -> Option<MatchResult> {
    let mut results = check_all_bets(bets, draw);
    results.sort_by(|a, b| closeness(b).cmp(&closeness(a)));
    results.into_iter().next()
}

/// Quasi-gain : 4 numéros, ou 3 numéros et 2 étoiles.
pub fn has_high_potential(result: &MatchResult) -> bool {
    result.number_match_count >= 4
        || (result.number_match_count >= 3 && result.star_match_count >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::draw;

    fn bet(id: &str, numbers: [u8; 5], stars: [u8; 2]) -> Bet {
        Bet { id: id.to_string(), numbers, stars }
    }

    #[test]
    fn test_jackpot() {
        let result = check_bet(&bet("b1", [1, 2, 3, 4, 5], [1, 2]), &draw([1, 2, 3, 4, 5], [1, 2]));
        assert_eq!(result.match_code, "5+2");
        assert_eq!(result.prize, "🏆 JACKPOT!");
        assert!(result.is_winner);
        assert_eq!(result.bet_id, "b1");
    }

    #[test]
    fn test_two_numbers_no_star_is_not_a_prize() {
        let result = check_bet(&bet("b1", [1, 2, 3, 4, 5], [1, 2]), &draw([1, 2, 3, 50, 49], [3, 4]));
        // 1, 2 et 3 : trois numéros communs
        assert_eq!(result.match_code, "3+0");
        assert!(result.is_winner);

        let result = check_bet(&bet("b2", [1, 2, 10, 11, 12], [1, 2]), &draw([1, 2, 3, 50, 49], [3, 4]));
        assert_eq!(result.match_code, "2+0");
        assert_eq!(result.prize, "No prize");
        assert!(!result.is_winner);
        assert_eq!(result.matched_numbers, vec![1, 2]);
        assert!(result.matched_stars.is_empty());
    }

    #[test]
    fn test_prize_table() {
        assert_eq!(PRIZE_TABLE.len(), 12);
        assert_eq!(prize_for("5+2"), Some("🏆 JACKPOT!"));
        assert_eq!(prize_for("2+1"), Some("🎫 12th Prize"));
        assert_eq!(prize_for("2+0"), None);
        assert_eq!(prize_for("0+2"), None);
        assert_eq!(prize_for("nonsense"), None);
    }

    #[test]
    fn test_matched_values_sorted() {
        let result = check_bet(&bet("b", [40, 7, 22, 3, 15], [9, 2]), &draw([3, 7, 15, 22, 40], [2, 9]));
        assert_eq!(result.matched_numbers, vec![3, 7, 15, 22, 40]);
        assert_eq!(result.matched_stars, vec![2, 9]);
    }

    #[test]
    fn test_closest_prefers_numbers() {
        let target = draw([1, 2, 3, 4, 5], [1, 2]);
        let bets = vec![
            bet("three-two", [1, 2, 3, 40, 41], [1, 2]),
            bet("four-zero", [1, 2, 3, 4, 41], [9, 10]),
        ];
        let closest = find_closest_bet(&bets, &target).unwrap();
        assert_eq!(closest.bet_id, "four-zero");
        assert_eq!(closest.match_code, "4+0");
        assert_eq!(closeness(&closest), 40);
    }

    #[test]
    fn test_closest_without_bets() {
        assert_eq!(find_closest_bet(&[], &draw([1, 2, 3, 4, 5], [1, 2])), None);
    }

    #[test]
    fn test_check_all_keeps_order() {
        let target = draw([1, 2, 3, 4, 5], [1, 2]);
        let bets = vec![
            bet("a", [10, 11, 12, 13, 14], [3, 4]),
            bet("b", [1, 2, 3, 4, 5], [1, 2]),
        ];
        let results = check_all_bets(&bets, &target);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].bet_id, "a");
        assert_eq!(results[0].match_code, "0+0");
        assert_eq!(results[1].match_code, "5+2");
    }

    #[test]
    fn test_high_potential() {
        let target = draw([1, 2, 3, 4, 5], [1, 2]);
        let four = check_bet(&bet("a", [1, 2, 3, 4, 50], [11, 12]), &target);
        let three_two = check_bet(&bet("b", [1, 2, 3, 49, 50], [1, 2]), &target);
        let three_one = check_bet(&bet("c", [1, 2, 3, 49, 50], [1, 12]), &target);
        assert!(has_high_potential(&four));
        assert!(has_high_potential(&three_two));
        assert!(!has_high_potential(&three_one));
    }
}
