// 🧽 CleaningAssignment - one cleaning of one area by one employee
//
// Owned by the area (deleted with it) and listed on the cleaner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cinema::Cinema;
use crate::entities::{AreaRef, EmployeeId};
use crate::error::{CinemaError, Result};
use crate::extent::{entity_id, unlink, Record};

entity_id!(CleaningAssignmentId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningAssignment {
    id: CleaningAssignmentId,
    area: AreaRef,
    cleaner: EmployeeId,
    time: DateTime<Utc>,
}

impl CleaningAssignment {
    pub fn id(&self) -> CleaningAssignmentId {
        self.id
    }

    pub fn area(&self) -> AreaRef {
        self.area
    }

    pub fn cleaner(&self) -> EmployeeId {
        self.cleaner
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }
}

impl Record for CleaningAssignment {
    type Id = CleaningAssignmentId;
    const ENTITY: &'static str = "CleaningAssignment";

    fn id(&self) -> CleaningAssignmentId {
        self.id
    }
}

impl Cinema {
    pub fn assign_cleaning(
        &mut self,
        area: AreaRef,
        cleaner: EmployeeId,
        time: DateTime<Utc>,
    ) -> Result<CleaningAssignmentId> {
        let target = self.area(area)?;
        self.employees.require(cleaner)?;
        let clash = target
            .assignments
            .iter()
            .filter_map(|id| self.cleaning_assignments.get(*id))
            .any(|a| a.time == time);
        if clash {
            return Err(CinemaError::duplicate(
                CleaningAssignment::ENTITY,
                format!("{} already has a cleaning at {}", area, time.to_rfc3339()),
            ));
        }

        let assignment = CleaningAssignment {
            id: CleaningAssignmentId::new(),
            area,
            cleaner,
            time,
        };
        let id = assignment.id;
        self.area_mut(area)?.assignments.push(id);
        self.employees.require_mut(cleaner)?.cleaning_assignments.push(id);
        self.cleaning_assignments.register(assignment);

        debug!(assignment = %id, %area, %cleaner, "cleaning assigned");
        Ok(id)
    }

    pub fn remove_cleaning_assignment(&mut self, area: AreaRef, assignment: CleaningAssignmentId) -> Result<()> {
        if !self.area(area)?.assignments.contains(&assignment) {
            return Err(CinemaError::not_linked(CleaningAssignment::ENTITY, assignment, area));
        }
        self.drop_cleaning_assignment(assignment)
    }

    /// Unlink from the area and the cleaner, then deregister
    pub(crate) fn drop_cleaning_assignment(&mut self, assignment: CleaningAssignmentId) -> Result<()> {
        let removed = self.cleaning_assignments.deregister(assignment)?;
        if let Ok(area) = self.area_mut(removed.area) {
            unlink(&mut area.assignments, &assignment);
        }
        if let Ok(cleaner) = self.employees.require_mut(removed.cleaner) {
            unlink(&mut cleaner.cleaning_assignments, &assignment);
        }
        debug!(%assignment, "cleaning assignment removed");
        Ok(())
    }
}
