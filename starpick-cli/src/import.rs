use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use starpick_db::db::insert_draw;
use starpick_db::models::{validate_draw, Draw};
use starpick_db::rusqlite::Connection;

// Colonnes de l'export FDJ
const COL_DRAW_ID: usize = 0;
const COL_DATE: usize = 2;
const COL_FIRST_NUMBER: usize = 5;
const COL_FIRST_STAR: usize = 10;

fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let draw_id = get(COL_DRAW_ID)?;
    let date = parse_date(&get(COL_DATE)?)?;

    let numbers: [u8; 5] = [
        get_u8(COL_FIRST_NUMBER)?,
        get_u8(COL_FIRST_NUMBER + 1)?,
        get_u8(COL_FIRST_NUMBER + 2)?,
        get_u8(COL_FIRST_NUMBER + 3)?,
        get_u8(COL_FIRST_NUMBER + 4)?,
    ];
    let stars: [u8; 2] = [get_u8(COL_FIRST_STAR)?, get_u8(COL_FIRST_STAR + 1)?];

    validate_draw(&numbers, &stars)
        .with_context(|| format!("Tirage {} invalide", draw_id))?;

    Ok(Draw {
        draw_id,
        date,
        numbers,
        stars,
    })
}

/// `JJ/MM/AAAA` (export FDJ) ou déjà ISO, vers `AAAA-MM-JJ`.
fn parse_date(raw: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .with_context(|| format!("Format de date invalide: '{}'", raw))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_csv(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    import_records(conn, reader)
}

fn import_records<R: std::io::Read>(conn: &Connection, mut reader: csv::Reader<R>) -> Result<ImportResult> {
    let tx = conn.unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult::default();

    for record_result in reader.records() {
        result.total_records += 1;
        let line = result.total_records;
        let draw = match record_result {
            Ok(record) => parse_record(&record),
            Err(e) => Err(e.into()),
        };
        match draw {
            Ok(draw) => match insert_draw(&tx, &draw) {
                Ok(true) => result.inserted += 1,
                Ok(false) => result.skipped += 1,
                Err(e) => {
                    log::warn!("Erreur insertion ligne {}: {:#}", line, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                log::warn!("Erreur ligne {}: {:#}", line, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    log::info!("Import : {:?}", result);
    Ok(result)
}
