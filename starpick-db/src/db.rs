use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;

use crate::models::Draw;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    draw_id  TEXT PRIMARY KEY,
    date     TEXT NOT NULL,
    number_1 INTEGER NOT NULL,
    number_2 INTEGER NOT NULL,
    number_3 INTEGER NOT NULL,
    number_4 INTEGER NOT NULL,
    number_5 INTEGER NOT NULL,
    star_1   INTEGER NOT NULL,
    star_2   INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_draws_date ON draws (date);
";

const SELECT_DRAW: &str =
    "SELECT draw_id, date, number_1, number_2, number_3, number_4, number_5, star_1, star_2 FROM draws";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("starpick.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    log::debug!("Base ouverte : {:?}", path);
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO draws (draw_id, date, number_1, number_2, number_3, number_4, number_5, star_1, star_2)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            draw.draw_id,
            draw.date,
            draw.numbers[0],
            draw.numbers[1],
            draw.numbers[2],
            draw.numbers[3],
            draw.numbers[4],
            draw.stars[0],
            draw.stars[1],
        ],
    ).context("Échec de l'insertion")?;
    Ok(changed > 0)
}

fn row_to_draw(row: &Row<'_>) -> rusqlite::Result<Draw> {
    Ok(Draw {
        draw_id: row.get(0)?,
        date: row.get(1)?,
        numbers: [
            row.get::<_, u8>(2)?,
            row.get::<_, u8>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u8>(5)?,
            row.get::<_, u8>(6)?,
        ],
        stars: [
            row.get::<_, u8>(7)?,
            row.get::<_, u8>(8)?,
        ],
    })
}

/// Derniers tirages, le plus récent en tête.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_DRAW} ORDER BY date DESC, draw_id DESC LIMIT ?1"
    ))?;
    let draws = stmt
        .query_map([limit], row_to_draw)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn fetch_draw(conn: &Connection, draw_id: &str) -> Result<Option<Draw>> {
    let mut stmt = conn.prepare(&format!("{SELECT_DRAW} WHERE draw_id = ?1"))?;
    let draw = stmt
        .query_row([draw_id], row_to_draw)
        .optional()
        .with_context(|| format!("Lecture du tirage {draw_id} impossible"))?;
    Ok(draw)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}
