//! Moteur de scoring EuroMillions : scores par numéro, scores de grilles,
//! génération de grilles diversifiées et vérification des grilles jouées.
//!
//! Toutes les fonctions sont pures : elles reçoivent un historique de tirages
//! (index 0 = tirage le plus récent) et retournent des valeurs fraîches.

pub mod combination;
pub mod frequency;
pub mod generator;
pub mod history;
pub mod hot_cold;
pub mod matcher;
pub mod number;

use serde::{Deserialize, Serialize};

pub use starpick_db::models::{Bet, Draw, Pool};

/// Borne haute des numéros « bas » (1-25) ; au-delà, « haut ».
pub const LOW_MAX: u8 = 25;

/// Numéros et étoiles choisis, avant scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub numbers: Vec<u8>,
    pub stars: Vec<u8>,
}

impl Selection {
    pub fn new(numbers: Vec<u8>, stars: Vec<u8>) -> Self {
        Self { numbers, stars }
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
