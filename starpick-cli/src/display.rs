use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::import::ImportResult;
use starpick_core::combination::CombinationScore;
use starpick_core::frequency::{NumberFrequency, RecentPatterns};
use starpick_core::generator::GeneratedCombination;
use starpick_core::hot_cold::{HotColdEntry, Recommendations, StreakType};
use starpick_core::matcher::{has_high_potential, MatchResult};
use starpick_core::number::NumberProbability;
use starpick_db::models::{Draw, Pool};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn join_list(numbers: &[u8]) -> String {
    if numbers.is_empty() {
        return "—".to_string();
    }
    numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ")
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table(vec!["Tirage", "Date", "Numéros", "Étoiles"]);
    for draw in draws {
        let mut numbers = draw.numbers;
        numbers.sort();
        let mut stars = draw.stars;
        stars.sort();

        table.add_row(vec![
            draw.draw_id.clone(),
            draw.date.clone(),
            join_numbers(&numbers),
            join_numbers(&stars),
        ]);
    }
    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {} (voir RUST_LOG=warn)", result.errors);
    }
}

pub fn display_frequencies(numbers: &[NumberFrequency], stars: &[NumberFrequency], window: usize) {
    println!("\n📊 Fréquences sur les {} derniers tirages\n", window);

    for (pool, table_rows) in [(Pool::Numbers, numbers), (Pool::Stars, stars)] {
        println!("── {} (1-{}) ──", pool, pool.size());
        let mut table = new_table(vec!["Numéro", "Sorties", "%", "Dernière sortie"]);
        for f in table_rows {
            table.add_row(vec![
                format!("{:2}", f.number),
                f.count.to_string(),
                format!("{:.1}", f.percentage),
                f.last_seen.to_string(),
            ]);
        }
        println!("{table}\n");
    }
}

pub fn display_patterns(patterns: &RecentPatterns) {
    println!("── Motifs sur les {} derniers tirages ──", patterns.draws_analyzed);
    println!("  Numéros consécutifs : {}", patterns.consecutive_numbers);
    println!("  Pairs:impairs       : {}", patterns.even_odd_ratio);
    println!("  Bas:hauts           : {}", patterns.low_high_ratio);
}

pub fn display_hot_cold(entries: &[HotColdEntry], pool: Pool) {
    println!("\n🔥 {} chauds et froids\n", pool);

    let mut table = new_table(vec!["Numéro", "Sorties (10)", "État", "Absence", "Tendance"]);
    for e in entries {
        let color = match e.streak_type {
            StreakType::Hot => Color::Green,
            StreakType::Cold => Color::Blue,
            StreakType::Neutral => Color::White,
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", e.number)),
            Cell::new(e.appearances),
            Cell::new(e.streak_type.to_string()).fg(color),
            Cell::new(e.streak),
            Cell::new(e.trend.to_string()),
        ]);
    }
    println!("{table}");
}

pub fn display_recommendations(rec: &Recommendations) {
    println!("\n💡 Recommandations");
    println!("  Numéros chauds   : {}", join_list(&rec.hot_numbers));
    println!("  Numéros en retard: {}", join_list(&rec.overdue_numbers));
    println!("  À éviter (froids): {}", join_list(&rec.avoid_numbers));
    println!("  Étoiles chaudes  : {}", join_list(&rec.hot_stars));
}

pub fn display_probabilities(numbers: &[NumberProbability], stars: &[NumberProbability]) {
    println!("\n🎯 Scores par numéro\n");

    println!("── Numéros ──");
    display_prob_table(numbers);

    println!("\n── Étoiles ──");
    display_prob_table(stars);
}

fn display_prob_table(probs: &[NumberProbability]) {
    let mut table = new_table(vec!["Numéro", "Fréquence", "Chaud/froid", "Motif", "Retard", "Total"]);
    for p in probs {
        table.add_row(vec![
            format!("{:2}", p.number),
            format!("{}/40", p.frequency_score),
            format!("{}/30", p.hot_cold_score),
            format!("{}/20", p.pattern_score),
            format!("{}/10", p.overdue_score),
            p.total_score.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_score(score: &CombinationScore) {
    println!("\n🎲 Grille {} ★ {}\n", join_numbers(&score.numbers), join_numbers(&score.stars));

    let b = &score.breakdown;
    let mut table = new_table(vec!["Composante", "Valeur"]);
    table.add_row(vec!["Fréquence (moy.)".to_string(), format!("{:.1}", b.frequency)]);
    table.add_row(vec!["Chaud/froid (moy.)".to_string(), format!("{:.1}", b.hot_cold)]);
    table.add_row(vec!["Motif (moy.)".to_string(), format!("{:.1}", b.pattern)]);
    table.add_row(vec!["Retard (moy.)".to_string(), format!("{:.1}", b.overdue)]);
    table.add_row(vec!["Bonus d'équilibre".to_string(), format!("+{}", b.balance_bonus)]);
    table.add_row(vec!["Score".to_string(), format!("{:.1}", score.probability_score)]);
    table.add_row(vec!["Chance affichée".to_string(), score.win_chance.clone()]);
    println!("{table}");
}

pub fn display_generated(combos: &[GeneratedCombination]) {
    println!("\n🎲 Grilles classées\n");

    let mut table = new_table(vec!["#", "Numéros", "Étoiles", "Score", "Chance", "Confiance"]);
    for c in combos {
        table.add_row(vec![
            c.rank.to_string(),
            join_numbers(&c.score.numbers),
            join_numbers(&c.score.stars),
            format!("{:.1}", c.score.probability_score),
            c.score.win_chance.clone(),
            c.confidence.clone(),
        ]);
    }
    println!("{table}");
}

pub fn display_bet_results(draw: &Draw, results: &[MatchResult], closest: Option<&MatchResult>) {
    let mut numbers = draw.numbers;
    numbers.sort();
    let mut stars = draw.stars;
    stars.sort();
    println!(
        "\n🎟  Tirage {} du {} : {} ★ {}\n",
        draw.draw_id,
        draw.date,
        join_numbers(&numbers),
        join_numbers(&stars)
    );

    if results.is_empty() {
        println!("Aucune grille à vérifier.");
        return;
    }

    let mut table = new_table(vec!["Grille", "Numéros", "Étoiles", "Code", "Gain", ""]);
    for r in results {
        let prize = if r.is_winner {
            Cell::new(&r.prize).fg(Color::Green)
        } else {
            Cell::new(&r.prize)
        };
        let flag = if has_high_potential(r) { "presque !" } else { "" };
        table.add_row(vec![
            Cell::new(&r.bet_id),
            Cell::new(join_list(&r.matched_numbers)),
            Cell::new(join_list(&r.matched_stars)),
            Cell::new(&r.match_code),
            prize,
            Cell::new(flag),
        ]);
    }
    println!("{table}");

    if let Some(best) = closest {
        println!("\nGrille la plus proche : {} ({})", best.bet_id, best.match_code);
    }
}
