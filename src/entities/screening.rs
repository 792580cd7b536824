// 🎞️ Screening - a film showing referenced by its hall
//
// Cancelling keeps the record in the extent but releases the hall.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cinema::Cinema;
use crate::entities::HallId;
use crate::error::{CinemaError, Result};
use crate::extent::{entity_id, unlink, Record};

entity_id!(ScreeningId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningStatus {
    Scheduled,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screening {
    id: ScreeningId,
    title: String,
    starts_at: DateTime<Utc>,
    pub(crate) hall: Option<HallId>,
    pub(crate) status: ScreeningStatus,
}

impl Screening {
    pub fn id(&self) -> ScreeningId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Present while the screening is scheduled
    pub fn hall(&self) -> Option<HallId> {
        self.hall
    }

    pub fn status(&self) -> ScreeningStatus {
        self.status
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ScreeningStatus::Cancelled
    }
}

impl Record for Screening {
    type Id = ScreeningId;
    const ENTITY: &'static str = "Screening";

    fn id(&self) -> ScreeningId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        validate_title(&self.title).map(|_| ())
    }
}

fn validate_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CinemaError::validation(Screening::ENTITY, "title", "must not be empty"));
    }
    Ok(title)
}

impl Cinema {
    pub fn schedule_screening(&mut self, hall: HallId, title: &str, starts_at: DateTime<Utc>) -> Result<ScreeningId> {
        let title = validate_title(title)?;
        let clash = self
            .halls
            .require(hall)?
            .screenings
            .iter()
            .filter_map(|id| self.screenings.get(*id))
            .any(|s| s.starts_at == starts_at);
        if clash {
            return Err(CinemaError::duplicate(
                Screening::ENTITY,
                format!("hall {} already has a screening at {}", hall, starts_at.to_rfc3339()),
            ));
        }

        let screening = Screening {
            id: ScreeningId::new(),
            title: title.to_string(),
            starts_at,
            hall: Some(hall),
            status: ScreeningStatus::Scheduled,
        };
        let id = screening.id;
        self.screenings.register(screening);
        self.halls.require_mut(hall)?.screenings.push(id);

        debug!(screening = %id, %hall, title, "screening scheduled");
        Ok(id)
    }

    /// Cancel a screening; cancelling twice is a no-op
    pub fn cancel_screening(&mut self, screening: ScreeningId) -> Result<()> {
        let existing = self.screenings.require_mut(screening)?;
        if existing.is_cancelled() {
            return Ok(());
        }
        existing.status = ScreeningStatus::Cancelled;
        if let Some(hall) = existing.hall.take() {
            if let Ok(owner) = self.halls.require_mut(hall) {
                unlink(&mut owner.screenings, &screening);
            }
        }
        debug!(%screening, "screening cancelled");
        Ok(())
    }
}
