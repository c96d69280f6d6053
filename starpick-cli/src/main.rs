mod display;
mod import;
mod inputs;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use starpick_core::combination::score_combination;
use starpick_core::frequency::{frequency_based_combination, frequency_table, recent_patterns};
use starpick_core::generator::{generate_top_combinations, rank_combinations};
use starpick_core::hot_cold::{classify, recommendations};
use starpick_core::matcher::{check_all_bets, find_closest_bet, has_high_potential, MatchResult};
use starpick_core::number::all_number_probabilities;
use starpick_db::db::{count_draws, db_path, fetch_draw, fetch_last_draws, migrate, open_db};
use starpick_db::models::{Draw, Pool};
use starpick_db::rusqlite::Connection;

use crate::display::{
    display_bet_results, display_draws, display_frequencies, display_generated,
    display_hot_cold, display_import_summary, display_patterns, display_probabilities,
    display_recommendations, display_score,
};

#[derive(Parser)]
#[command(name = "starpick", about = "Scores et grilles EuroMillions")]
struct Cli {
    /// Chemin de la base SQLite (défaut : ./data/starpick.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer les tirages depuis un fichier CSV FDJ
    Import {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = "assets/euromillions_202002.csv")]
        file: PathBuf,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Fréquences, retards et motifs récents
    Stats {
        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "100")]
        window: u32,
    },

    /// Numéros chauds, froids et en retard
    HotCold {
        #[arg(short, long, default_value = "100")]
        window: u32,
    },

    /// Score de chaque numéro et de chaque étoile
    Probabilities {
        #[arg(short, long, default_value = "100")]
        window: u32,
    },

    /// Scorer une grille : 5 numéros + 2 étoiles
    Score {
        /// 5 numéros puis 2 étoiles (7 nombres)
        numbers: Vec<u8>,

        #[arg(short, long, default_value = "100")]
        window: u32,
    },

    /// Générer des grilles classées
    Generate {
        /// Nombre de grilles (1-10)
        #[arg(short, long, default_value = "5")]
        count: usize,

        #[arg(short, long, default_value = "100")]
        window: u32,

        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },

    /// Classer des grilles fournies dans un fichier JSON
    Rank {
        /// Fichier JSON : [{"numbers": [..5], "stars": [..2]}, ...]
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "100")]
        window: u32,

        #[arg(long)]
        json: bool,
    },

    /// Grille construite sur les fréquences
    Suggest {
        #[arg(short, long, default_value = "100")]
        window: u32,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Vérifier des grilles jouées contre un tirage
    Check {
        /// Fichier JSON : [{"id": "..", "numbers": [..5], "stars": [..2]}, ...]
        #[arg(short, long)]
        bets: PathBuf,

        /// Identifiant du tirage (défaut : le plus récent)
        #[arg(short, long)]
        draw_id: Option<String>,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let path = cli.db.unwrap_or_else(db_path);
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Stats { window } => cmd_stats(&conn, window),
        Command::HotCold { window } => cmd_hot_cold(&conn, window),
        Command::Probabilities { window } => cmd_probabilities(&conn, window),
        Command::Score { numbers, window } => cmd_score(&conn, &numbers, window),
        Command::Generate { count, window, json } => cmd_generate(&conn, count, window, json),
        Command::Rank { file, window, json } => cmd_rank(&conn, &file, window, json),
        Command::Suggest { window, seed } => cmd_suggest(&conn, window, seed),
        Command::Check { bets, draw_id, json } => cmd_check(&conn, &bets, draw_id.as_deref(), json),
    }
}

/// Historique le plus récent en tête, ou `None` (avec message) si la base est vide.
fn load_history(conn: &Connection, window: u32) -> Result<Option<Vec<Draw>>> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : starpick import");
        return Ok(None);
    }
    let effective_window = window.min(n);
    let draws = fetch_last_draws(conn, effective_window)?;
    log::info!("{} tirages chargés (fenêtre {})", draws.len(), window);
    Ok(Some(draws))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Sérialisation JSON impossible")?;
    println!("{json}");
    Ok(())
}

fn cmd_import(conn: &Connection, file: &Path) -> Result<()> {
    let result = import::import_csv(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &Connection, last: u32) -> Result<()> {
    let Some(draws) = load_history(conn, last)? else {
        return Ok(());
    };
    display_draws(&draws);
    Ok(())
}

fn cmd_stats(conn: &Connection, window: u32) -> Result<()> {
    let Some(draws) = load_history(conn, window)? else {
        return Ok(());
    };
    display_frequencies(
        &frequency_table(&draws, Pool::Numbers),
        &frequency_table(&draws, Pool::Stars),
        draws.len(),
    );
    display_patterns(&recent_patterns(&draws));
    Ok(())
}

fn cmd_hot_cold(conn: &Connection, window: u32) -> Result<()> {
    let Some(draws) = load_history(conn, window)? else {
        return Ok(());
    };
    display_hot_cold(&classify(&draws, Pool::Numbers), Pool::Numbers);
    display_hot_cold(&classify(&draws, Pool::Stars), Pool::Stars);
    display_recommendations(&recommendations(&draws));
    Ok(())
}

fn cmd_probabilities(conn: &Connection, window: u32) -> Result<()> {
    let Some(draws) = load_history(conn, window)? else {
        return Ok(());
    };
    display_probabilities(
        &all_number_probabilities(&draws, Pool::Numbers),
        &all_number_probabilities(&draws, Pool::Stars),
    );
    Ok(())
}

fn cmd_score(conn: &Connection, numbers: &[u8], window: u32) -> Result<()> {
    let (grid_numbers, grid_stars) = inputs::parse_grid(numbers)?;
    let Some(draws) = load_history(conn, window)? else {
        return Ok(());
    };
    display_score(&score_combination(&grid_numbers, &grid_stars, &draws));
    Ok(())
}

fn cmd_generate(conn: &Connection, count: usize, window: u32, json: bool) -> Result<()> {
    let Some(draws) = load_history(conn, window)? else {
        return Ok(());
    };
    let combos = generate_top_combinations(&draws, count);
    if json {
        return print_json(&combos);
    }
    display_generated(&combos);
    Ok(())
}

fn cmd_rank(conn: &Connection, file: &Path, window: u32, json: bool) -> Result<()> {
    let selections = inputs::load_selections(file)?;
    let Some(draws) = load_history(conn, window)? else {
        return Ok(());
    };
    let ranked = rank_combinations(&selections, &draws);
    if json {
        return print_json(&ranked);
    }
    display_generated(&ranked);
    Ok(())
}

fn cmd_suggest(conn: &Connection, window: u32, seed: Option<u64>) -> Result<()> {
    let Some(draws) = load_history(conn, window)? else {
        return Ok(());
    };
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let (numbers, stars) = frequency_based_combination(&draws, &mut rng);
    display_score(&score_combination(&numbers, &stars, &draws));
    Ok(())
}

/// Sortie JSON de `check` : résultats, grille la plus proche et quasi-gains.
#[derive(Serialize)]
struct CheckReport<'a> {
    draw: &'a Draw,
    results: &'a [MatchResult],
    closest: Option<&'a MatchResult>,
    high_potential: Vec<&'a str>,
}

impl<'a> CheckReport<'a> {
    fn new(draw: &'a Draw, results: &'a [MatchResult], closest: Option<&'a MatchResult>) -> Self {
        let high_potential = results
            .iter()
            .filter(|r| has_high_potential(r))
            .map(|r| r.bet_id.as_str())
            .collect();
        Self {
            draw,
            results,
            closest,
            high_potential,
        }
    }
}

fn cmd_check(conn: &Connection, bets_file: &Path, draw_id: Option<&str>, json: bool) -> Result<()> {
    let bets = inputs::load_bets(bets_file)?;

    let draw = match draw_id {
        Some(id) => match fetch_draw(conn, id)? {
            Some(draw) => draw,
            None => bail!("Tirage {} introuvable", id),
        },
        None => {
            let Some(draws) = load_history(conn, 1)? else {
                return Ok(());
            };
            draws.into_iter().next().context("Aucun tirage disponible")?
        }
    };

    let results = check_all_bets(&bets, &draw);
    let closest = find_closest_bet(&bets, &draw);

    if json {
        return print_json(&CheckReport::new(&draw, &results, closest.as_ref()));
    }

    display_bet_results(&draw, &results, closest.as_ref());
    Ok(())
}
