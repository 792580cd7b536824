// 🏢 Floor - owns its halls and up to two restrooms
//
// Floor numbers are unique across the whole cinema. Removing a hall or WC
// from a floor deletes it, since both are compositions.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::cinema::Cinema;
use crate::entities::{AreaRef, CleanableArea, HallId, WcId};
use crate::error::{CinemaError, Result};
use crate::extent::{entity_id, Record};

entity_id!(
    /// Identity of a floor
    FloorId
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    id: FloorId,
    number: u32,
    pub(crate) area: CleanableArea,
    pub(crate) halls: Vec<HallId>,
    pub(crate) wcs: Vec<WcId>,
}

impl Floor {
    pub fn id(&self) -> FloorId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn area(&self) -> &CleanableArea {
        &self.area
    }

    pub fn halls(&self) -> &[HallId] {
        &self.halls
    }

    pub fn wcs(&self) -> &[WcId] {
        &self.wcs
    }
}

impl Record for Floor {
    type Id = FloorId;
    const ENTITY: &'static str = "Floor";

    fn id(&self) -> FloorId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        self.area.validate(Self::ENTITY)
    }
}

impl Cinema {
    pub fn create_floor(&mut self, number: u32, description: &str, cleaning_period: Duration) -> Result<FloorId> {
        let area = CleanableArea::new(Floor::ENTITY, description, cleaning_period)?;
        self.ensure_floor_number_free(number, None)?;

        let floor = Floor {
            id: FloorId::new(),
            number,
            area,
            halls: Vec::new(),
            wcs: Vec::new(),
        };
        let id = floor.id;
        self.floors.register(floor);
        self.areas.register(AreaRef::Floor(id));

        debug!(floor = %id, number, "floor created");
        Ok(id)
    }

    pub fn find_floor(&self, number: u32) -> Option<&Floor> {
        self.floors.iter().find(|f| f.number == number)
    }

    pub fn set_floor_number(&mut self, floor: FloorId, number: u32) -> Result<()> {
        self.floors.require(floor)?;
        self.ensure_floor_number_free(number, Some(floor))?;
        self.floors.require_mut(floor)?.number = number;
        debug!(%floor, number, "floor renumbered");
        Ok(())
    }

    fn ensure_floor_number_free(&self, number: u32, except: Option<FloorId>) -> Result<()> {
        let taken = self
            .floors
            .iter()
            .any(|f| f.number == number && Some(f.id) != except);
        if taken {
            return Err(CinemaError::duplicate(
                Floor::ENTITY,
                format!("floor number {} is already taken", number),
            ));
        }
        Ok(())
    }

    /// Attach an existing, unattached hall to a floor
    pub fn add_hall(&mut self, floor: FloorId, hall: HallId) -> Result<()> {
        self.floors.require(floor)?;
        let existing = self.halls.require(hall)?;
        match existing.floor() {
            Some(owner) if owner == floor => {
                return Err(CinemaError::duplicate(
                    "Hall",
                    format!("hall {} is already on floor {}", hall, floor),
                ));
            }
            Some(owner) => {
                return Err(CinemaError::duplicate(
                    "Hall",
                    format!("hall {} already belongs to floor {}", hall, owner),
                ));
            }
            None => {}
        }
        self.ensure_hall_number_free(floor, existing.number(), None)?;

        self.floors.require_mut(floor)?.halls.push(hall);
        self.halls.require_mut(hall)?.floor = Some(floor);
        debug!(%floor, %hall, "hall added to floor");
        Ok(())
    }

    /// Detach a hall from its floor; the hall is deleted with it
    pub fn remove_hall(&mut self, floor: FloorId, hall: HallId) -> Result<()> {
        if !self.floors.require(floor)?.halls.contains(&hall) {
            return Err(CinemaError::not_linked("Hall", hall, format!("floor {}", floor)));
        }
        self.delete_hall(hall)
    }

    /// Delete a floor with all of its halls, restrooms and cleaning history
    pub fn delete_floor(&mut self, floor: FloorId) -> Result<()> {
        let existing = self.floors.require(floor)?;
        let halls = existing.halls.clone();
        let wcs = existing.wcs.clone();
        let assignments = existing.area.assignments.clone();

        for hall in halls {
            self.delete_hall(hall)?;
        }
        for wc in wcs {
            self.delete_wc(wc)?;
        }
        for assignment in assignments {
            self.drop_cleaning_assignment(assignment)?;
        }

        self.floors.deregister(floor)?;
        self.areas.deregister(AreaRef::Floor(floor))?;
        debug!(%floor, "floor deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::WcType;
    use proptest::prelude::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_create_floor_registers_in_both_extents() {
        let mut cinema = Cinema::new();
        let floor = cinema.create_floor(0, "Ground floor", HOUR).unwrap();

        assert_eq!(cinema.floors().len(), 1);
        assert_eq!(cinema.floors().all()[0].number(), 0);
        assert_eq!(cinema.cleanable_areas().all(), &[AreaRef::Floor(floor)]);
    }

    #[test]
    fn test_duplicate_floor_number_rejected() {
        let mut cinema = Cinema::new();
        cinema.create_floor(1, "First", HOUR).unwrap();

        let result = cinema.create_floor(1, "Also first", HOUR);
        assert!(matches!(result, Err(CinemaError::Duplicate { entity: "Floor", .. })));
        assert_eq!(cinema.floors().len(), 1);
        assert_eq!(cinema.cleanable_areas().len(), 1);
    }

    #[test]
    fn test_renumber_floor() {
        let mut cinema = Cinema::new();
        let first = cinema.create_floor(1, "First", HOUR).unwrap();
        cinema.create_floor(2, "Second", HOUR).unwrap();

        // Keeping its own number is fine
        cinema.set_floor_number(first, 1).unwrap();
        assert!(cinema.set_floor_number(first, 2).is_err());
        cinema.set_floor_number(first, 5).unwrap();

        assert_eq!(cinema.find_floor(5).map(|f| f.id()), Some(first));
        assert!(cinema.find_floor(1).is_none());
    }

    #[test]
    fn test_add_hall_links_both_sides() {
        let mut cinema = Cinema::new();
        let floor = cinema.create_floor(1, "First", HOUR).unwrap();
        let hall = cinema.create_hall(4, "Hall four", HOUR, None).unwrap();

        cinema.add_hall(floor, hall).unwrap();

        assert_eq!(cinema.floors().require(floor).unwrap().halls(), &[hall]);
        assert_eq!(cinema.halls().require(hall).unwrap().floor(), Some(floor));
        cinema.check_integrity().unwrap();
    }

    #[test]
    fn test_add_hall_twice_is_duplicate() {
        let mut cinema = Cinema::new();
        let floor = cinema.create_floor(1, "First", HOUR).unwrap();
        let hall = cinema.create_hall(4, "Hall four", HOUR, Some(floor)).unwrap();

        let result = cinema.add_hall(floor, hall);
        assert!(matches!(result, Err(CinemaError::Duplicate { .. })));
        assert_eq!(cinema.floors().require(floor).unwrap().halls().len(), 1);
    }

    #[test]
    fn test_add_hall_owned_by_other_floor_rejected() {
        let mut cinema = Cinema::new();
        let first = cinema.create_floor(1, "First", HOUR).unwrap();
        let second = cinema.create_floor(2, "Second", HOUR).unwrap();
        let hall = cinema.create_hall(4, "Hall four", HOUR, Some(first)).unwrap();

        assert!(cinema.add_hall(second, hall).is_err());
        assert_eq!(cinema.halls().require(hall).unwrap().floor(), Some(first));
        assert!(cinema.floors().require(second).unwrap().halls().is_empty());
    }

    #[test]
    fn test_add_hall_with_colliding_number_rejected() {
        let mut cinema = Cinema::new();
        let floor = cinema.create_floor(1, "First", HOUR).unwrap();
        cinema.create_hall(4, "Hall four", HOUR, Some(floor)).unwrap();
        let loose = cinema.create_hall(4, "Another four", HOUR, None).unwrap();

        let result = cinema.add_hall(floor, loose);
        assert!(matches!(result, Err(CinemaError::Duplicate { .. })));
        assert_eq!(cinema.halls().require(loose).unwrap().floor(), None);
    }

    #[test]
    fn test_remove_hall_not_on_floor() {
        let mut cinema = Cinema::new();
        let floor = cinema.create_floor(1, "First", HOUR).unwrap();
        let hall = cinema.create_hall(4, "Hall four", HOUR, None).unwrap();

        let result = cinema.remove_hall(floor, hall);
        assert!(matches!(result, Err(CinemaError::NotLinked { .. })));
        assert_eq!(cinema.halls().len(), 1);
    }

    #[test]
    fn test_floor_hall_seat_scenario() {
        let mut cinema = Cinema::new();
        let floor = cinema.create_floor(1, "First", HOUR).unwrap();
        let hall = cinema.create_hall(1, "Hall one", HOUR, Some(floor)).unwrap();
        cinema.create_seat(hall, 5, 'A').unwrap();

        assert_eq!(cinema.seats().len(), 1);
        assert_eq!(cinema.halls().require(hall).unwrap().seats().len(), 1);
        assert_eq!(cinema.floors().require(floor).unwrap().halls().len(), 1);

        cinema.remove_hall(floor, hall).unwrap();

        assert!(cinema.seats().is_empty());
        assert!(cinema.halls().is_empty());
        assert!(cinema.floors().require(floor).unwrap().halls().is_empty());
        cinema.check_integrity().unwrap();
    }

    #[test]
    fn test_delete_floor_cascades() {
        let mut cinema = Cinema::new();
        let cleaner = cinema.create_employee("Ann", "Nowak").unwrap();
        let floor = cinema.create_floor(1, "First", HOUR).unwrap();
        let hall = cinema.create_hall(1, "Hall one", HOUR, Some(floor)).unwrap();
        cinema.create_seat(hall, 1, 'A').unwrap();
        cinema.create_wc(floor, WcType::Men, "Men", HOUR).unwrap();
        cinema.create_wc(floor, WcType::Women, "Women", HOUR).unwrap();
        cinema
            .assign_cleaning(AreaRef::Floor(floor), cleaner, chrono::Utc::now())
            .unwrap();

        cinema.delete_floor(floor).unwrap();

        assert!(cinema.floors().is_empty());
        assert!(cinema.halls().is_empty());
        assert!(cinema.wcs().is_empty());
        assert!(cinema.seats().is_empty());
        assert!(cinema.cleanable_areas().is_empty());
        assert!(cinema.cleaning_assignments().is_empty());
        assert!(cinema
            .employees()
            .require(cleaner)
            .unwrap()
            .cleaning_assignments()
            .is_empty());
    }

    proptest! {
        #[test]
        fn prop_floor_numbers_stay_unique(numbers in proptest::collection::vec(0u32..8, 1..20)) {
            let mut cinema = Cinema::new();
            for number in numbers {
                let _ = cinema.create_floor(number, "Floor", HOUR);
            }

            let mut seen: Vec<u32> = cinema.floors().iter().map(|f| f.number()).collect();
            let total = seen.len();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), total);
            prop_assert!(cinema.check_integrity().is_ok());
        }

        #[test]
        fn prop_hall_floor_links_stay_symmetric(
            ops in proptest::collection::vec((0usize..3, 0usize..5, any::<bool>()), 1..40)
        ) {
            let mut cinema = Cinema::new();
            let floors: Vec<FloorId> = (0..3)
                .map(|n| cinema.create_floor(n, "Floor", HOUR).unwrap())
                .collect();
            let halls: Vec<HallId> = (1..=5)
                .map(|n| cinema.create_hall(n, "Hall", HOUR, None).unwrap())
                .collect();

            for (floor, hall, attach) in ops {
                let _ = if attach {
                    cinema.add_hall(floors[floor], halls[hall])
                } else {
                    cinema.remove_hall(floors[floor], halls[hall])
                };
                prop_assert!(cinema.check_integrity().is_ok());
            }
        }
    }
}
