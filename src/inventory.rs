// 📦 Inventory export - the item extent as CSV

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::cinema::Cinema;
use crate::entities::{Item, ItemKind};

#[derive(Debug, Serialize)]
struct InventoryRow<'a> {
    id: String,
    kind: &'static str,
    name: &'a str,
    price: f64,
    detail: String,
}

impl<'a> From<&'a Item> for InventoryRow<'a> {
    fn from(item: &'a Item) -> Self {
        let detail = match item.kind() {
            ItemKind::Snack { weight_grams } => format!("{}g", weight_grams),
            ItemKind::Glass3d { size } => size.as_str().to_string(),
        };
        InventoryRow {
            id: item.id().to_string(),
            kind: item.kind().as_str(),
            name: item.name(),
            price: item.price(),
            detail,
        }
    }
}

/// Write every item, in extent order, with a header row
pub fn write_inventory_csv<W: Write>(cinema: &Cinema, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for item in cinema.items() {
        wtr.serialize(InventoryRow::from(item))
            .with_context(|| format!("Failed to write inventory row for item {}", item.id()))?;
    }
    wtr.flush().context("Failed to flush inventory CSV")?;
    Ok(())
}

/// Total shelf value of the inventory
pub fn inventory_value(cinema: &Cinema) -> f64 {
    cinema.items().iter().map(|i| i.price()).sum()
}
