// 🎭 Hall - screening room owning its seats
//
// A hall may stand alone or belong to one floor. Screenings and displayer
// assignments only reference the hall; deleting the hall cancels them.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::cinema::Cinema;
use crate::entities::{AreaRef, CleanableArea, DisplayerAssignmentId, FloorId, ScreeningId, SeatId};
use crate::error::{CinemaError, Result};
use crate::extent::{entity_id, unlink, Record};

entity_id!(HallId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hall {
    id: HallId,
    number: u32,
    pub(crate) area: CleanableArea,
    pub(crate) floor: Option<FloorId>,
    pub(crate) seats: Vec<SeatId>,
    pub(crate) screenings: Vec<ScreeningId>,
    pub(crate) displayer_assignments: Vec<DisplayerAssignmentId>,
}

impl Hall {
    pub fn id(&self) -> HallId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn area(&self) -> &CleanableArea {
        &self.area
    }

    pub fn floor(&self) -> Option<FloorId> {
        self.floor
    }

    pub fn seats(&self) -> &[SeatId] {
        &self.seats
    }

    /// Scheduled screenings in this hall, in scheduling order
    pub fn screenings(&self) -> &[ScreeningId] {
        &self.screenings
    }

    pub fn displayer_assignments(&self) -> &[DisplayerAssignmentId] {
        &self.displayer_assignments
    }
}

impl Record for Hall {
    type Id = HallId;
    const ENTITY: &'static str = "Hall";

    fn id(&self) -> HallId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        validate_hall_number(self.number)?;
        self.area.validate(Self::ENTITY)
    }
}

fn validate_hall_number(number: u32) -> Result<u32> {
    if number == 0 {
        return Err(CinemaError::validation(Hall::ENTITY, "number", "must be positive"));
    }
    Ok(number)
}

impl Cinema {
    /// Create a hall, optionally placing it on a floor right away
    pub fn create_hall(
        &mut self,
        number: u32,
        description: &str,
        cleaning_period: Duration,
        floor: Option<FloorId>,
    ) -> Result<HallId> {
        let number = validate_hall_number(number)?;
        let area = CleanableArea::new(Hall::ENTITY, description, cleaning_period)?;
        if let Some(floor) = floor {
            self.floors.require(floor)?;
            self.ensure_hall_number_free(floor, number, None)?;
        }

        let hall = Hall {
            id: HallId::new(),
            number,
            area,
            floor,
            seats: Vec::new(),
            screenings: Vec::new(),
            displayer_assignments: Vec::new(),
        };
        let id = hall.id;
        self.halls.register(hall);
        self.areas.register(AreaRef::Hall(id));
        if let Some(floor) = floor {
            self.floors.require_mut(floor)?.halls.push(id);
        }

        debug!(hall = %id, number, ?floor, "hall created");
        Ok(id)
    }

    pub fn set_hall_number(&mut self, hall: HallId, number: u32) -> Result<()> {
        let number = validate_hall_number(number)?;
        if let Some(floor) = self.halls.require(hall)?.floor {
            self.ensure_hall_number_free(floor, number, Some(hall))?;
        }
        self.halls.require_mut(hall)?.number = number;
        debug!(%hall, number, "hall renumbered");
        Ok(())
    }

    pub(crate) fn ensure_hall_number_free(&self, floor: FloorId, number: u32, except: Option<HallId>) -> Result<()> {
        let taken = self
            .floors
            .require(floor)?
            .halls
            .iter()
            .filter(|id| Some(**id) != except)
            .filter_map(|id| self.halls.get(*id))
            .any(|h| h.number == number);
        if taken {
            return Err(CinemaError::duplicate(
                Hall::ENTITY,
                format!("floor {} already has a hall number {}", floor, number),
            ));
        }
        Ok(())
    }

    /// Delete a hall: cancel its screenings, drop its seats, leave its floor,
    /// cancel displayer assignments and cleaning history, then deregister
    pub fn delete_hall(&mut self, hall: HallId) -> Result<()> {
        let existing = self.halls.require(hall)?;
        let screenings = existing.screenings.clone();
        let seats = existing.seats.clone();
        let floor = existing.floor;
        let displayer_assignments = existing.displayer_assignments.clone();
        let assignments = existing.area.assignments.clone();

        for screening in screenings {
            self.cancel_screening(screening)?;
        }
        for seat in &seats {
            self.seats.deregister(*seat)?;
        }
        self.halls.require_mut(hall)?.seats.clear();
        if let Some(floor) = floor {
            unlink(&mut self.floors.require_mut(floor)?.halls, &hall);
            self.halls.require_mut(hall)?.floor = None;
        }
        for assignment in displayer_assignments {
            self.cancel_displayer_assignment(assignment)?;
        }
        for assignment in assignments {
            self.drop_cleaning_assignment(assignment)?;
        }

        self.halls.deregister(hall)?;
        self.areas.deregister(AreaRef::Hall(hall))?;
        debug!(%hall, seats = seats.len(), "hall deleted");
        Ok(())
    }
}
