// 🚻 Wc - restroom belonging to exactly one floor
//
// At most two per floor, never two of the same type on one floor.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::cinema::Cinema;
use crate::config::MAX_WCS_PER_FLOOR;
use crate::entities::{AreaRef, CleanableArea, Floor, FloorId};
use crate::error::{CinemaError, Result};
use crate::extent::{entity_id, unlink, Record};

entity_id!(WcId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WcType {
    Men,
    Women,
    Unisex,
}

impl WcType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WcType::Men => "men",
            WcType::Women => "women",
            WcType::Unisex => "unisex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wc {
    id: WcId,
    pub(crate) wc_type: WcType,
    pub(crate) floor: FloorId,
    pub(crate) area: CleanableArea,
}

impl Wc {
    pub fn id(&self) -> WcId {
        self.id
    }

    pub fn wc_type(&self) -> WcType {
        self.wc_type
    }

    pub fn floor(&self) -> FloorId {
        self.floor
    }

    pub fn area(&self) -> &CleanableArea {
        &self.area
    }
}

impl Record for Wc {
    type Id = WcId;
    const ENTITY: &'static str = "Wc";

    fn id(&self) -> WcId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        self.area.validate(Self::ENTITY)
    }
}

impl Cinema {
    pub fn create_wc(
        &mut self,
        floor: FloorId,
        wc_type: WcType,
        description: &str,
        cleaning_period: Duration,
    ) -> Result<WcId> {
        let area = CleanableArea::new(Wc::ENTITY, description, cleaning_period)?;
        let owner = self.floors.require(floor)?;
        self.ensure_wc_slot(owner, wc_type, None)?;

        let wc = Wc {
            id: WcId::new(),
            wc_type,
            floor,
            area,
        };
        let id = wc.id;
        self.wcs.register(wc);
        self.areas.register(AreaRef::Wc(id));
        self.floors.require_mut(floor)?.wcs.push(id);

        debug!(wc = %id, %floor, wc_type = wc_type.as_str(), "wc created");
        Ok(id)
    }

    /// A type collision is reported before the floor's capacity
    fn ensure_wc_slot(&self, floor: &Floor, wc_type: WcType, except: Option<WcId>) -> Result<()> {
        let siblings = floor.wcs.iter().filter(|id| Some(**id) != except);
        let collision = siblings
            .clone()
            .filter_map(|id| self.wcs.get(*id))
            .any(|w| w.wc_type == wc_type);
        if collision {
            return Err(CinemaError::duplicate(
                Wc::ENTITY,
                format!("floor {} already has a {} restroom", floor.number(), wc_type.as_str()),
            ));
        }
        if siblings.count() >= MAX_WCS_PER_FLOOR {
            return Err(CinemaError::capacity(
                Wc::ENTITY,
                format!("floor {}", floor.number()),
                MAX_WCS_PER_FLOOR,
            ));
        }
        Ok(())
    }

    pub fn set_wc_type(&mut self, wc: WcId, wc_type: WcType) -> Result<()> {
        let floor = self.wcs.require(wc)?.floor;
        self.ensure_wc_slot(self.floors.require(floor)?, wc_type, Some(wc))?;
        self.wcs.require_mut(wc)?.wc_type = wc_type;
        debug!(%wc, wc_type = wc_type.as_str(), "wc type changed");
        Ok(())
    }

    /// Detach a restroom from its floor; the restroom is deleted with it
    pub fn remove_wc(&mut self, floor: FloorId, wc: WcId) -> Result<()> {
        if !self.floors.require(floor)?.wcs.contains(&wc) {
            return Err(CinemaError::not_linked(Wc::ENTITY, wc, format!("floor {}", floor)));
        }
        self.delete_wc(wc)
    }

    pub fn delete_wc(&mut self, wc: WcId) -> Result<()> {
        let existing = self.wcs.require(wc)?;
        let floor = existing.floor;
        let assignments = existing.area.assignments.clone();

        for assignment in assignments {
            self.drop_cleaning_assignment(assignment)?;
        }
        if let Ok(owner) = self.floors.require_mut(floor) {
            unlink(&mut owner.wcs, &wc);
        }

        self.wcs.deregister(wc)?;
        self.areas.deregister(AreaRef::Wc(wc))?;
        debug!(%wc, "wc deleted");
        Ok(())
    }
}
