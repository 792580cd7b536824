// 📽️ Displayer - projection equipment assigned to halls

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cinema::Cinema;
use crate::entities::HallId;
use crate::error::{CinemaError, Result};
use crate::extent::{entity_id, unlink, Record};

entity_id!(DisplayerId);
entity_id!(DisplayerAssignmentId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Displayer {
    id: DisplayerId,
    model: String,
    pub(crate) assignments: Vec<DisplayerAssignmentId>,
}

impl Displayer {
    pub fn id(&self) -> DisplayerId {
        self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn assignments(&self) -> &[DisplayerAssignmentId] {
        &self.assignments
    }
}

impl Record for Displayer {
    type Id = DisplayerId;
    const ENTITY: &'static str = "Displayer";

    fn id(&self) -> DisplayerId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        validate_model(&self.model).map(|_| ())
    }
}

fn validate_model(model: &str) -> Result<&str> {
    let model = model.trim();
    if model.is_empty() {
        return Err(CinemaError::validation(Displayer::ENTITY, "model", "must not be empty"));
    }
    Ok(model)
}

/// Association record between a displayer and a hall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayerAssignment {
    id: DisplayerAssignmentId,
    displayer: DisplayerId,
    hall: HallId,
    since: DateTime<Utc>,
}

impl DisplayerAssignment {
    pub fn id(&self) -> DisplayerAssignmentId {
        self.id
    }

    pub fn displayer(&self) -> DisplayerId {
        self.displayer
    }

    pub fn hall(&self) -> HallId {
        self.hall
    }

    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }
}

impl Record for DisplayerAssignment {
    type Id = DisplayerAssignmentId;
    const ENTITY: &'static str = "DisplayerAssignment";

    fn id(&self) -> DisplayerAssignmentId {
        self.id
    }
}

impl Cinema {
    pub fn create_displayer(&mut self, model: &str) -> Result<DisplayerId> {
        let model = validate_model(model)?;
        let displayer = Displayer {
            id: DisplayerId::new(),
            model: model.to_string(),
            assignments: Vec::new(),
        };
        let id = displayer.id;
        self.displayers.register(displayer);
        debug!(displayer = %id, model, "displayer created");
        Ok(id)
    }

    pub fn assign_displayer(
        &mut self,
        displayer: DisplayerId,
        hall: HallId,
        since: DateTime<Utc>,
    ) -> Result<DisplayerAssignmentId> {
        let device = self.displayers.require(displayer)?;
        self.halls.require(hall)?;
        let already = device
            .assignments
            .iter()
            .filter_map(|id| self.displayer_assignments.get(*id))
            .any(|a| a.hall == hall);
        if already {
            return Err(CinemaError::duplicate(
                DisplayerAssignment::ENTITY,
                format!("displayer {} is already assigned to hall {}", displayer, hall),
            ));
        }

        let assignment = DisplayerAssignment {
            id: DisplayerAssignmentId::new(),
            displayer,
            hall,
            since,
        };
        let id = assignment.id;
        self.displayer_assignments.register(assignment);
        self.displayers.require_mut(displayer)?.assignments.push(id);
        self.halls.require_mut(hall)?.displayer_assignments.push(id);

        debug!(assignment = %id, %displayer, %hall, "displayer assigned");
        Ok(id)
    }

    /// Remove the assignment from both the displayer and the hall
    pub fn cancel_displayer_assignment(&mut self, assignment: DisplayerAssignmentId) -> Result<()> {
        let removed = self.displayer_assignments.deregister(assignment)?;
        if let Ok(device) = self.displayers.require_mut(removed.displayer) {
            unlink(&mut device.assignments, &assignment);
        }
        if let Ok(hall) = self.halls.require_mut(removed.hall) {
            unlink(&mut hall.displayer_assignments, &assignment);
        }
        debug!(%assignment, "displayer assignment cancelled");
        Ok(())
    }

    pub fn delete_displayer(&mut self, displayer: DisplayerId) -> Result<()> {
        let assignments = self.displayers.require(displayer)?.assignments.clone();
        for assignment in assignments {
            self.cancel_displayer_assignment(assignment)?;
        }
        self.displayers.deregister(displayer)?;
        debug!(%displayer, "displayer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn setup() -> (Cinema, DisplayerId, HallId) {
        let mut cinema = Cinema::new();
        let hall = cinema.create_hall(1, "Hall", Duration::from_secs(60), None).unwrap();
        let displayer = cinema.create_displayer("Christie CP2320").unwrap();
        (cinema, displayer, hall)
    }

    #[test]
    fn test_assign_links_both_sides() {
        let (mut cinema, displayer, hall) = setup();
        let assignment = cinema.assign_displayer(displayer, hall, Utc::now()).unwrap();

        assert_eq!(cinema.displayers().require(displayer).unwrap().assignments(), &[assignment]);
        assert_eq!(cinema.halls().require(hall).unwrap().displayer_assignments(), &[assignment]);
        cinema.check_integrity().unwrap();
    }

    #[test]
    fn test_assign_twice_rejected() {
        let (mut cinema, displayer, hall) = setup();
        cinema.assign_displayer(displayer, hall, Utc::now()).unwrap();

        assert!(matches!(
            cinema.assign_displayer(displayer, hall, Utc::now()),
            Err(CinemaError::Duplicate { .. })
        ));
        assert_eq!(cinema.displayer_assignments().len(), 1);
    }

    #[test]
    fn test_empty_model_rejected() {
        let mut cinema = Cinema::new();
        assert!(cinema.create_displayer("").is_err());
        assert!(cinema.displayers().is_empty());
    }

    #[test]
    fn test_delete_displayer_cancels_assignments() {
        let (mut cinema, displayer, hall) = setup();
        let second = cinema.create_hall(2, "Second", Duration::from_secs(60), None).unwrap();
        cinema.assign_displayer(displayer, hall, Utc::now()).unwrap();
        cinema.assign_displayer(displayer, second, Utc::now()).unwrap();

        cinema.delete_displayer(displayer).unwrap();

        assert!(cinema.displayers().is_empty());
        assert!(cinema.displayer_assignments().is_empty());
        assert!(cinema.halls().require(hall).unwrap().displayer_assignments().is_empty());
        assert!(cinema.halls().require(second).unwrap().displayer_assignments().is_empty());
    }
}
