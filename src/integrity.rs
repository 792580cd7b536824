// 🔗 Integrity - verify every mutual link and multiplicity constraint
//
// The association managers keep these invariants on every mutation; this
// check exists for data that did not go through them (loaded documents) and
// for tests.

use std::collections::HashSet;

use crate::cinema::Cinema;
use crate::config::MAX_WCS_PER_FLOOR;
use crate::entities::{AreaRef, ContractRef, ScreeningStatus};
use crate::error::{PersistenceError, Result};
use crate::extent::Record;

fn broken(message: String) -> crate::error::CinemaError {
    PersistenceError::Inconsistent(message).into()
}

macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err(broken(format!($($arg)+)));
        }
    };
}

/// Every id appears once and every record passes its attribute rules
pub(crate) fn check_records<T: Record>(records: &[T]) -> Result<()> {
    let mut ids = HashSet::new();
    for record in records {
        ensure!(ids.insert(record.id()), "{} {} appears more than once", T::ENTITY, record.id());
        record.validate().map_err(|e| {
            PersistenceError::Invalid(format!("{} {}: {}", T::ENTITY, record.id(), e))
        })?;
    }
    Ok(())
}

impl Cinema {
    /// Check the whole object graph, reporting the first broken link
    pub fn check_integrity(&self) -> Result<()> {
        self.check_extents()?;
        self.check_floors()?;
        self.check_halls()?;
        self.check_areas()?;
        self.check_cleaning()?;
        self.check_staff()?;
        self.check_screenings()?;
        self.check_displayers()?;
        Ok(())
    }

    fn check_extents(&self) -> Result<()> {
        check_records(self.floors.all())?;
        check_records(self.halls.all())?;
        check_records(self.wcs.all())?;
        check_records(self.seats.all())?;
        check_records(self.cleaning_assignments.all())?;
        check_records(self.employees.all())?;
        check_records(self.part_time_contracts.all())?;
        check_records(self.full_time_contracts.all())?;
        check_records(self.screenings.all())?;
        check_records(self.displayers.all())?;
        check_records(self.displayer_assignments.all())?;
        check_records(self.items.all())?;
        Ok(())
    }

    fn check_floors(&self) -> Result<()> {
        let mut numbers = HashSet::new();
        for floor in &self.floors {
            ensure!(numbers.insert(floor.number()), "floor number {} is not unique", floor.number());

            let mut hall_numbers = HashSet::new();
            for hall_id in floor.halls() {
                let hall = self.halls.get(*hall_id);
                ensure!(
                    hall.map(|h| h.floor()) == Some(Some(floor.id())),
                    "floor {} lists hall {} which does not point back",
                    floor.number(),
                    hall_id
                );
                if let Some(hall) = hall {
                    ensure!(
                        hall_numbers.insert(hall.number()),
                        "floor {} has two halls numbered {}",
                        floor.number(),
                        hall.number()
                    );
                }
            }

            ensure!(
                floor.wcs().len() <= MAX_WCS_PER_FLOOR,
                "floor {} has {} restrooms",
                floor.number(),
                floor.wcs().len()
            );
            let mut wc_types = HashSet::new();
            for wc_id in floor.wcs() {
                let wc = self.wcs.get(*wc_id);
                ensure!(
                    wc.map(|w| w.floor()) == Some(floor.id()),
                    "floor {} lists wc {} which does not point back",
                    floor.number(),
                    wc_id
                );
                if let Some(wc) = wc {
                    ensure!(
                        wc_types.insert(wc.wc_type()),
                        "floor {} has two {} restrooms",
                        floor.number(),
                        wc.wc_type().as_str()
                    );
                }
            }
        }

        for hall in &self.halls {
            if let Some(floor) = hall.floor() {
                ensure!(
                    self.floors.get(floor).is_some_and(|f| f.halls().contains(&hall.id())),
                    "hall {} points to floor {} which does not list it",
                    hall.id(),
                    floor
                );
            }
        }
        for wc in &self.wcs {
            ensure!(
                self.floors.get(wc.floor()).is_some_and(|f| f.wcs().contains(&wc.id())),
                "wc {} points to floor {} which does not list it",
                wc.id(),
                wc.floor()
            );
        }
        Ok(())
    }

    fn check_halls(&self) -> Result<()> {
        let limit = self.limits().max_seats_per_hall;
        for hall in &self.halls {
            ensure!(
                hall.seats().len() <= limit,
                "hall {} has {} seats, limit is {}",
                hall.id(),
                hall.seats().len(),
                limit
            );
            let mut positions = HashSet::new();
            for seat_id in hall.seats() {
                let seat = self.seats.get(*seat_id);
                ensure!(
                    seat.map(|s| s.hall()) == Some(hall.id()),
                    "hall {} lists seat {} which does not point back",
                    hall.id(),
                    seat_id
                );
                if let Some(seat) = seat {
                    ensure!(
                        positions.insert(seat.position()),
                        "hall {} has two seats at {:?}",
                        hall.id(),
                        seat.position()
                    );
                }
            }
        }
        for seat in &self.seats {
            ensure!(
                self.halls.get(seat.hall()).is_some_and(|h| h.seats().contains(&seat.id())),
                "seat {} points to hall {} which does not list it",
                seat.id(),
                seat.hall()
            );
        }
        Ok(())
    }

    fn check_areas(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for area in &self.areas {
            ensure!(seen.insert(*area), "{} appears twice in the area extent", area);
            ensure!(self.area(*area).is_ok(), "{} is listed but not registered", area);
        }
        let registered = self
            .floors
            .iter()
            .map(|f| AreaRef::Floor(f.id()))
            .chain(self.halls.iter().map(|h| AreaRef::Hall(h.id())))
            .chain(self.wcs.iter().map(|w| AreaRef::Wc(w.id())));
        for area in registered {
            ensure!(seen.contains(&area), "{} is missing from the area extent", area);
        }
        Ok(())
    }

    fn check_cleaning(&self) -> Result<()> {
        for area in &self.areas {
            if let Ok(cleanable) = self.area(*area) {
                for id in cleanable.assignments() {
                    ensure!(
                        self.cleaning_assignments.get(*id).map(|a| a.area()) == Some(*area),
                        "{} lists cleaning assignment {} which does not point back",
                        area,
                        id
                    );
                }
            }
        }
        for employee in &self.employees {
            for id in employee.cleaning_assignments() {
                ensure!(
                    self.cleaning_assignments.get(*id).map(|a| a.cleaner()) == Some(employee.id()),
                    "employee {} lists cleaning assignment {} which does not point back",
                    employee.id(),
                    id
                );
            }
        }
        for assignment in &self.cleaning_assignments {
            ensure!(
                self.area(assignment.area())
                    .is_ok_and(|a| a.assignments().contains(&assignment.id())),
                "cleaning assignment {} is not listed by {}",
                assignment.id(),
                assignment.area()
            );
            ensure!(
                self.employees
                    .get(assignment.cleaner())
                    .is_some_and(|e| e.cleaning_assignments().contains(&assignment.id())),
                "cleaning assignment {} is not listed by employee {}",
                assignment.id(),
                assignment.cleaner()
            );
        }
        Ok(())
    }

    fn check_staff(&self) -> Result<()> {
        for employee in &self.employees {
            match employee.contract() {
                Some(ContractRef::PartTime(id)) => ensure!(
                    self.part_time_contracts.get(id).map(|c| c.employee()) == Some(employee.id()),
                    "employee {} holds part-time contract {} which does not point back",
                    employee.id(),
                    id
                ),
                Some(ContractRef::FullTime(id)) => ensure!(
                    self.full_time_contracts.get(id).map(|c| c.employee()) == Some(employee.id()),
                    "employee {} holds full-time contract {} which does not point back",
                    employee.id(),
                    id
                ),
                None => {}
            }
        }
        for contract in &self.part_time_contracts {
            ensure!(
                self.employees.get(contract.employee()).and_then(|e| e.contract())
                    == Some(ContractRef::PartTime(contract.id())),
                "part-time contract {} is not held by employee {}",
                contract.id(),
                contract.employee()
            );
        }
        for contract in &self.full_time_contracts {
            ensure!(
                self.employees.get(contract.employee()).and_then(|e| e.contract())
                    == Some(ContractRef::FullTime(contract.id())),
                "full-time contract {} is not held by employee {}",
                contract.id(),
                contract.employee()
            );
        }
        Ok(())
    }

    fn check_screenings(&self) -> Result<()> {
        for hall in &self.halls {
            for id in hall.screenings() {
                ensure!(
                    self.screenings.get(*id).and_then(|s| s.hall()) == Some(hall.id()),
                    "hall {} lists screening {} which does not point back",
                    hall.id(),
                    id
                );
            }
        }
        for screening in &self.screenings {
            match (screening.status(), screening.hall()) {
                (ScreeningStatus::Scheduled, Some(hall)) => ensure!(
                    self.halls.get(hall).is_some_and(|h| h.screenings().contains(&screening.id())),
                    "screening {} is not listed by hall {}",
                    screening.id(),
                    hall
                ),
                (ScreeningStatus::Cancelled, None) => {}
                (status, hall) => ensure!(
                    false,
                    "screening {} has status {:?} with hall {:?}",
                    screening.id(),
                    status,
                    hall
                ),
            }
        }
        Ok(())
    }

    fn check_displayers(&self) -> Result<()> {
        for displayer in &self.displayers {
            for id in displayer.assignments() {
                ensure!(
                    self.displayer_assignments.get(*id).map(|a| a.displayer()) == Some(displayer.id()),
                    "displayer {} lists assignment {} which does not point back",
                    displayer.id(),
                    id
                );
            }
        }
        for hall in &self.halls {
            for id in hall.displayer_assignments() {
                ensure!(
                    self.displayer_assignments.get(*id).map(|a| a.hall()) == Some(hall.id()),
                    "hall {} lists displayer assignment {} which does not point back",
                    hall.id(),
                    id
                );
            }
        }
        for assignment in &self.displayer_assignments {
            ensure!(
                self.displayers
                    .get(assignment.displayer())
                    .is_some_and(|d| d.assignments().contains(&assignment.id())),
                "displayer assignment {} is not listed by its displayer",
                assignment.id()
            );
            ensure!(
                self.halls
                    .get(assignment.hall())
                    .is_some_and(|h| h.displayer_assignments().contains(&assignment.id())),
                "displayer assignment {} is not listed by its hall",
                assignment.id()
            );
        }
        Ok(())
    }
}
