use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Un tirage enregistré. Dans toute séquence d'historique, l'index 0 est le plus récent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub draw_id: String,
    /// Date ISO `YYYY-MM-DD`.
    pub date: String,
    pub numbers: [u8; 5],
    pub stars: [u8; 2],
}

/// Grille jouée par l'utilisateur. Jamais modifiée par le moteur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub id: String,
    pub numbers: [u8; 5],
    pub stars: [u8; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pool {
    Numbers,
    Stars,
}

impl Pool {
    pub fn size(&self) -> usize {
        match self {
            Pool::Numbers => 50,
            Pool::Stars => 12,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Numbers => 5,
            Pool::Stars => 2,
        }
    }

    /// Intervalle de réapparition attendu, en tirages.
    pub fn overdue_interval(&self) -> usize {
        match self {
            Pool::Numbers => 10,
            Pool::Stars => 6,
        }
    }

    /// Apparitions minimales sur les 10 derniers tirages pour être « chaud ».
    pub fn hot_threshold(&self) -> usize {
        match self {
            Pool::Numbers => 3,
            Pool::Stars => 4,
        }
    }

    pub fn range(&self) -> std::ops::RangeInclusive<u8> {
        1..=self.size() as u8
    }

    pub fn numbers_from<'a>(&self, draw: &'a Draw) -> &'a [u8] {
        match self {
            Pool::Numbers => &draw.numbers,
            Pool::Stars => &draw.stars,
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pool::Numbers => write!(f, "Numéros"),
            Pool::Stars => write!(f, "Étoiles"),
        }
    }
}

pub fn validate_draw(numbers: &[u8; 5], stars: &[u8; 2]) -> Result<()> {
    for &n in numbers {
        if !Pool::Numbers.range().contains(&n) {
            bail!("Numéro {} hors limites (1-50)", n);
        }
    }
    for &s in stars {
        if !Pool::Stars.range().contains(&s) {
            bail!("Étoile {} hors limites (1-12)", s);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Numéro en double : {}", numbers[i]);
            }
        }
    }
    if stars[0] == stars[1] {
        bail!("Étoile en double : {}", stars[0]);
    }
    Ok(())
}

pub fn validate_bet(bet: &Bet) -> Result<()> {
    validate_draw(&bet.numbers, &bet.stars)
        .map_err(|e| anyhow::anyhow!("Grille '{}' invalide : {}", bet.id, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_draw_ok() {
        assert!(validate_draw(&[1, 2, 3, 4, 5], &[1, 2]).is_ok());
        assert!(validate_draw(&[50, 49, 48, 47, 46], &[11, 12]).is_ok());
    }

    #[test]
    fn test_validate_draw_number_out_of_range() {
        assert!(validate_draw(&[0, 2, 3, 4, 5], &[1, 2]).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 51], &[1, 2]).is_err());
    }

    #[test]
    fn test_validate_draw_star_out_of_range() {
        assert!(validate_draw(&[1, 2, 3, 4, 5], &[0, 2]).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 5], &[1, 13]).is_err());
    }

    #[test]
    fn test_validate_draw_duplicates() {
        assert!(validate_draw(&[1, 1, 3, 4, 5], &[1, 2]).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 5], &[3, 3]).is_err());
    }

    #[test]
    fn test_validate_bet_names_the_bet() {
        let bet = Bet { id: "ma-grille".into(), numbers: [1, 2, 3, 4, 60], stars: [1, 2] };
        let err = validate_bet(&bet).unwrap_err().to_string();
        assert!(err.contains("ma-grille"), "{err}");
    }

    #[test]
    fn test_pool_descriptor() {
        assert_eq!(Pool::Numbers.size(), 50);
        assert_eq!(Pool::Stars.size(), 12);
        assert_eq!(Pool::Numbers.pick_count(), 5);
        assert_eq!(Pool::Stars.pick_count(), 2);
        assert_eq!(Pool::Numbers.overdue_interval(), 10);
        assert_eq!(Pool::Stars.overdue_interval(), 6);
        assert_eq!(Pool::Stars.range().count(), 12);
    }

    #[test]
    fn test_pool_numbers_from() {
        let draw = Draw {
            draw_id: "001".to_string(),
            date: "2024-01-01".to_string(),
            numbers: [1, 2, 3, 4, 5],
            stars: [6, 7],
        };
        assert_eq!(Pool::Numbers.numbers_from(&draw), &[1, 2, 3, 4, 5]);
        assert_eq!(Pool::Stars.numbers_from(&draw), &[6, 7]);
    }

    #[test]
    fn test_bet_from_json() {
        let json = r#"{"id":"b1","numbers":[7,14,21,28,35],"stars":[3,9]}"#;
        let bet: Bet = serde_json::from_str(json).unwrap();
        assert_eq!(bet.numbers, [7, 14, 21, 28, 35]);
        assert_eq!(bet.stars, [3, 9]);
    }
}
