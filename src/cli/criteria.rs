//! Criteria command - list the catalog

use crate::catalog::{self, Criterion};
use crate::models::Pillar;
use anyhow::{bail, Result};
use console::style;
use serde::Serialize;

#[derive(Serialize)]
struct CriterionRow {
    id: &'static str,
    pillar: &'static str,
    level: u8,
    description: &'static str,
}

impl From<&Criterion> for CriterionRow {
    fn from(c: &Criterion) -> Self {
        Self {
            id: c.id,
            pillar: c.pillar.name(),
            level: c.level,
            description: c.description,
        }
    }
}

pub(super) fn run(pillar: Option<&str>, json: bool) -> Result<()> {
    let rows = rows(pillar)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let id_width = rows.iter().map(|r| r.id.len()).max().unwrap_or(0);
    let mut current: Option<&str> = None;
    for row in &rows {
        if current != Some(row.pillar) {
            println!("\n{}", style(row.pillar).bold());
            current = Some(row.pillar);
        }
        println!(
            "  {} {:<width$}  {}",
            style(format!("L{}", row.level)).cyan(),
            row.id,
            style(row.description).dim(),
            width = id_width
        );
    }
    println!("\n{} criteria", rows.len());
    Ok(())
}

fn rows(pillar: Option<&str>) -> Result<Vec<CriterionRow>> {
    match pillar {
        Some(name) => {
            let Some(pillar) = Pillar::from_name(name) else {
                let valid: Vec<&str> = Pillar::ALL.iter().map(|p| p.name()).collect();
                bail!("Unknown pillar '{}'. Valid pillars: {}", name, valid.join(", "));
            };
            Ok(catalog::pillar_criteria(pillar).iter().map(CriterionRow::from).collect())
        }
        None => Ok(catalog::all_criteria().map(CriterionRow::from).collect()),
    }
}
