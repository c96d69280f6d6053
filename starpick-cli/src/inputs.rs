use std::path::Path;

use anyhow::{bail, Context, Result};

use starpick_core::Selection;
use starpick_db::models::{validate_bet, validate_draw, Bet};

/// 7 nombres en ligne de commande : 5 numéros puis 2 étoiles.
pub fn parse_grid(numbers: &[u8]) -> Result<([u8; 5], [u8; 2])> {
    if numbers.len() != 7 {
        bail!("Attendu 7 nombres : 5 numéros + 2 étoiles. Reçu : {}", numbers.len());
    }
    let grid_numbers: [u8; 5] = [numbers[0], numbers[1], numbers[2], numbers[3], numbers[4]];
    let grid_stars: [u8; 2] = [numbers[5], numbers[6]];
    validate_draw(&grid_numbers, &grid_stars)?;
    Ok((grid_numbers, grid_stars))
}

pub fn load_bets(path: &Path) -> Result<Vec<Bet>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    parse_bets(&json)
}

fn parse_bets(json: &str) -> Result<Vec<Bet>> {
    let bets: Vec<Bet> = serde_json::from_str(json).context("Fichier de grilles invalide")?;
    for bet in &bets {
        validate_bet(bet)?;
    }
    Ok(bets)
}

pub fn load_selections(path: &Path) -> Result<Vec<Selection>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    parse_selections(&json)
}

fn parse_selections(json: &str) -> Result<Vec<Selection>> {
    let selections: Vec<Selection> =
        serde_json::from_str(json).context("Fichier de combinaisons invalide")?;
    for (i, s) in selections.iter().enumerate() {
        if s.numbers.len() != 5 || s.stars.len() != 2 {
            bail!("Combinaison {} : attendu 5 numéros et 2 étoiles", i + 1);
        }
        let numbers = [s.numbers[0], s.numbers[1], s.numbers[2], s.numbers[3], s.numbers[4]];
        validate_draw(&numbers, &[s.stars[0], s.stars[1]])
            .with_context(|| format!("Combinaison {} invalide", i + 1))?;
    }
    Ok(selections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grid() {
        let (numbers, stars) = parse_grid(&[5, 12, 23, 34, 45, 3, 9]).unwrap();
        assert_eq!(numbers, [5, 12, 23, 34, 45]);
        assert_eq!(stars, [3, 9]);
    }

    #[test]
    fn test_parse_grid_rejects_bad_input() {
        assert!(parse_grid(&[1, 2, 3, 4, 5, 6]).is_err());
        assert!(parse_grid(&[1, 2, 3, 4, 5, 6, 13]).is_err());
        assert!(parse_grid(&[1, 1, 3, 4, 5, 6, 7]).is_err());
    }

    #[test]
    fn test_parse_bets() {
        let json = r#"[
            {"id": "lundi", "numbers": [1, 2, 3, 4, 5], "stars": [1, 2]},
            {"id": "mardi", "numbers": [10, 20, 30, 40, 50], "stars": [11, 12]}
        ]"#;
        let bets = parse_bets(json).unwrap();
        assert_eq!(bets.len(), 2);
        assert_eq!(bets[1].id, "mardi");
    }

    #[test]
    fn test_parse_bets_validates() {
        let json = r#"[{"id": "x", "numbers": [1, 2, 3, 4, 51], "stars": [1, 2]}]"#;
        assert!(parse_bets(json).is_err());
        assert!(parse_bets("pas du json").is_err());
    }

    #[test]
    fn test_parse_selections() {
        let json = r#"[{"numbers": [7, 14, 21, 28, 35], "stars": [2, 8]}]"#;
        let selections = parse_selections(json).unwrap();
        assert_eq!(selections[0].numbers, vec![7, 14, 21, 28, 35]);

        let short = r#"[{"numbers": [7, 14], "stars": [2, 8]}]"#;
        assert!(parse_selections(short).is_err());
    }
}
