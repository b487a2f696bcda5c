// src/services/kpi.rs

//! KPI document builder.
//!
//! Combines the character weight table (`kpi_data.txt`) and the entity table
//! (`entity_list_combined.csv`) into the document uploaded to `kpi`.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{CharacterKpi, DEFAULT_PRIORITY_KEY, KpiConfig};

/// Game ids indexed by the character column of the weight table.
pub const CHARACTER_GAME_IDS: [&str; 5] = ["NONE", "DRILLER", "ENGINEER", "GUNNER", "SCOUT"];

/// Character subtype addressed by each weight column of the entity table.
pub const ENTITY_WEIGHT_COLUMNS: [(&str, u32); 5] = [
    ("DRILLER", 1),
    ("GUNNER", 1),
    ("ENGINEER", 1),
    ("SCOUT", 1),
    ("SCOUT", 2),
];

fn parse_number<T: std::str::FromStr>(
    source: &str,
    line: usize,
    what: &str,
    value: Option<&str>,
) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let value = value.ok_or_else(|| AppError::parse(source, line, format!("missing {what}")))?;
    value
        .trim()
        .parse()
        .map_err(|e| AppError::parse(source, line, format!("invalid {what} '{value}': {e}")))
}

/// Fill `kpi.character` from the weight table.
///
/// Line format: `<character index> <subtype id> <subtype name> <weight>...`.
/// Blank lines and `#` comments are skipped.
pub fn parse_character_table(source: &str, content: &str, kpi: &mut KpiConfig) -> Result<()> {
    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let character: usize = parse_number(source, line_no, "character index", fields.next())?;
        let game_id = CHARACTER_GAME_IDS.get(character).ok_or_else(|| {
            AppError::parse(
                source,
                line_no,
                format!("unknown character index {character}"),
            )
        })?;
        let subtype_id: u32 = parse_number(source, line_no, "subtype id", fields.next())?;
        let subtype_name = fields
            .next()
            .ok_or_else(|| AppError::parse(source, line_no, "missing subtype name"))?;
        let weight_list = fields
            .map(|w| parse_number(source, line_no, "weight", Some(w)))
            .collect::<Result<Vec<f64>>>()?;

        kpi.character
            .entry(game_id.to_string())
            .or_default()
            .insert(subtype_id, CharacterKpi::new(subtype_name, weight_list));
    }
    Ok(())
}

/// Apply the entity table to the global and per-subtype priority tables.
///
/// Columns: entity id, (unused), priority, then one weight per
/// [`ENTITY_WEIGHT_COLUMNS`] entry. The first row is a header.
pub fn apply_entity_table<R: Read>(source: &str, reader: R, kpi: &mut KpiConfig) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    kpi.priority_table
        .insert(DEFAULT_PRIORITY_KEY.to_string(), 0.0);

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line_no = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);

        let entity_id = record
            .get(0)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::parse(source, line_no, "missing entity id"))?;

        let priority: f64 = parse_number(source, line_no, "priority", record.get(2))?;
        if priority != 0.0 {
            kpi.priority_table.insert(entity_id.to_string(), priority);
        }

        for (column, value) in record.iter().skip(3).enumerate() {
            let weight: f64 = parse_number(source, line_no, "character weight", Some(value))?;
            if weight == 1.0 {
                continue;
            }

            let (game_id, subtype_id) = ENTITY_WEIGHT_COLUMNS.get(column).ok_or_else(|| {
                AppError::parse(
                    source,
                    line_no,
                    format!("unexpected weight column {}", column + 3),
                )
            })?;
            let subtype = kpi.subtype_mut(game_id, *subtype_id).ok_or_else(|| {
                AppError::parse(
                    source,
                    line_no,
                    format!("no character {game_id} subtype {subtype_id} in weight table"),
                )
            })?;
            subtype.priority_table.insert(entity_id.to_string(), weight);
        }
    }
    Ok(())
}

/// Build the KPI document from both input files.
pub fn load_kpi_config(kpi_data: &Path, entity_list: &Path) -> Result<KpiConfig> {
    let mut kpi = KpiConfig::default();

    log::info!("Loading {}...", kpi_data.display());
    let content = fs::read_to_string(kpi_data).map_err(|e| AppError::file(kpi_data, e))?;
    parse_character_table(&kpi_data.display().to_string(), &content, &mut kpi)?;

    log::info!("Loading {}...", entity_list.display());
    let file = fs::File::open(entity_list).map_err(|e| AppError::file(entity_list, e))?;
    apply_entity_table(&entity_list.display().to_string(), file, &mut kpi)?;

    log::debug!(
        "KPI document: {} characters, {} prioritized entities",
        kpi.character.len(),
        kpi.priority_table.len() - 1
    );
    Ok(kpi)
}
