// 🍿 Item - sellable inventory (snacks and 3D glasses)
//
// One polymorphic extent; the variant lives in `ItemKind`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cinema::Cinema;
use crate::error::{CinemaError, Result};
use crate::extent::{entity_id, Record};

entity_id!(ItemId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlassSize {
    Child,
    Adult,
}

impl GlassSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlassSize::Child => "child",
            GlassSize::Adult => "adult",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Snack { weight_grams: u32 },
    Glass3d { size: GlassSize },
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Snack { .. } => "snack",
            ItemKind::Glass3d { .. } => "glass3d",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    price: f64,
    kind: ItemKind,
}

impl Item {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn is_snack(&self) -> bool {
        matches!(self.kind, ItemKind::Snack { .. })
    }

    pub fn is_glass3d(&self) -> bool {
        matches!(self.kind, ItemKind::Glass3d { .. })
    }
}

impl Record for Item {
    type Id = ItemId;
    const ENTITY: &'static str = "Item";

    fn id(&self) -> ItemId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        validate_kind(self.kind)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CinemaError::validation(Item::ENTITY, "name", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(CinemaError::validation(
            Item::ENTITY,
            "price",
            format!("must be a non-negative amount, got {}", price),
        ));
    }
    Ok(price)
}

fn validate_kind(kind: ItemKind) -> Result<()> {
    if let ItemKind::Snack { weight_grams: 0 } = kind {
        return Err(CinemaError::validation(Item::ENTITY, "weight_grams", "must be positive"));
    }
    Ok(())
}

impl Cinema {
    fn register_item(&mut self, name: &str, price: f64, kind: ItemKind) -> Result<ItemId> {
        let item = Item {
            id: ItemId::new(),
            name: validate_name(name)?,
            price: validate_price(price)?,
            kind,
        };
        let id = item.id;
        self.items.register(item);
        debug!(item = %id, kind = kind.as_str(), "item created");
        Ok(id)
    }

    pub fn create_snack(&mut self, name: &str, price: f64, weight_grams: u32) -> Result<ItemId> {
        let kind = ItemKind::Snack { weight_grams };
        validate_kind(kind)?;
        self.register_item(name, price, kind)
    }

    pub fn create_glass3d(&mut self, name: &str, price: f64, size: GlassSize) -> Result<ItemId> {
        self.register_item(name, price, ItemKind::Glass3d { size })
    }

    pub fn set_item_name(&mut self, item: ItemId, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        self.items.require_mut(item)?.name = name;
        Ok(())
    }

    pub fn set_item_price(&mut self, item: ItemId, price: f64) -> Result<()> {
        let price = validate_price(price)?;
        self.items.require_mut(item)?.price = price;
        Ok(())
    }

    pub fn delete_item(&mut self, item: ItemId) -> Result<()> {
        self.items.deregister(item)?;
        debug!(%item, "item deleted");
        Ok(())
    }

    pub fn snacks(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_snack())
    }

    pub fn glasses(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_glass3d())
    }
}
