// 🧹 CleanableArea - attributes shared by Floor, Hall and Wc
//
// Each variant embeds a `CleanableArea`; the polymorphic extent stores an
// `AreaRef` per variant instance so every area can be scanned in creation
// order regardless of its concrete type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::cinema::Cinema;
use crate::entities::{CleaningAssignmentId, FloorId, HallId, WcId};
use crate::error::{CinemaError, Result};
use crate::extent::Record;

/// Upper bound (exclusive) of a cleaning period
pub const MAX_CLEANING_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

// ============================================================================
// AREA REFERENCE
// ============================================================================

/// Tagged reference to one concrete cleanable area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AreaRef {
    Floor(FloorId),
    Hall(HallId),
    Wc(WcId),
}

impl AreaRef {
    pub fn kind(&self) -> &'static str {
        match self {
            AreaRef::Floor(_) => "Floor",
            AreaRef::Hall(_) => "Hall",
            AreaRef::Wc(_) => "Wc",
        }
    }
}

impl fmt::Display for AreaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaRef::Floor(id) => write!(f, "floor {}", id),
            AreaRef::Hall(id) => write!(f, "hall {}", id),
            AreaRef::Wc(id) => write!(f, "wc {}", id),
        }
    }
}

impl Record for AreaRef {
    type Id = AreaRef;
    const ENTITY: &'static str = "CleanableArea";

    fn id(&self) -> AreaRef {
        *self
    }
}

// ============================================================================
// CLEANABLE AREA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanableArea {
    description: String,
    cleaning_period: Duration,
    pub(crate) assignments: Vec<CleaningAssignmentId>,
}

impl CleanableArea {
    pub(crate) fn new(entity: &'static str, description: &str, cleaning_period: Duration) -> Result<Self> {
        Ok(CleanableArea {
            description: validate_description(entity, description)?,
            cleaning_period: validate_cleaning_period(entity, cleaning_period)?,
            assignments: Vec::new(),
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cleaning_period(&self) -> Duration {
        self.cleaning_period
    }

    /// Cleaning assignments of this area, oldest first
    pub fn assignments(&self) -> &[CleaningAssignmentId] {
        &self.assignments
    }

    pub(crate) fn validate(&self, entity: &'static str) -> Result<()> {
        validate_description(entity, &self.description)?;
        validate_cleaning_period(entity, self.cleaning_period)?;
        Ok(())
    }
}

fn validate_description(entity: &'static str, description: &str) -> Result<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(CinemaError::validation(entity, "description", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_cleaning_period(entity: &'static str, period: Duration) -> Result<Duration> {
    if period >= MAX_CLEANING_PERIOD {
        return Err(CinemaError::validation(
            entity,
            "cleaning_period",
            format!("must be shorter than 24h, got {}s", period.as_secs()),
        ));
    }
    Ok(period)
}

/// `true` when never cleaned, or when more than `period` has passed since
/// the latest cleaning
pub fn needs_cleaning(latest: Option<DateTime<Utc>>, period: Duration, now: DateTime<Utc>) -> bool {
    let Some(latest) = latest else {
        return true;
    };
    let Ok(period) = chrono::Duration::from_std(period) else {
        return false;
    };
    now - latest > period
}

// ============================================================================
// CINEMA OPERATIONS
// ============================================================================

impl Cinema {
    pub fn area(&self, area: AreaRef) -> Result<&CleanableArea> {
        match area {
            AreaRef::Floor(id) => self.floors.require(id).map(|f| &f.area),
            AreaRef::Hall(id) => self.halls.require(id).map(|h| &h.area),
            AreaRef::Wc(id) => self.wcs.require(id).map(|w| &w.area),
        }
    }

    pub(crate) fn area_mut(&mut self, area: AreaRef) -> Result<&mut CleanableArea> {
        match area {
            AreaRef::Floor(id) => self.floors.require_mut(id).map(|f| &mut f.area),
            AreaRef::Hall(id) => self.halls.require_mut(id).map(|h| &mut h.area),
            AreaRef::Wc(id) => self.wcs.require_mut(id).map(|w| &mut w.area),
        }
    }

    pub fn set_area_description(&mut self, area: AreaRef, description: &str) -> Result<()> {
        let description = validate_description(area.kind(), description)?;
        self.area_mut(area)?.description = description;
        debug!(%area, "area description updated");
        Ok(())
    }

    pub fn set_cleaning_period(&mut self, area: AreaRef, period: Duration) -> Result<()> {
        let period = validate_cleaning_period(area.kind(), period)?;
        self.area_mut(area)?.cleaning_period = period;
        debug!(%area, secs = period.as_secs(), "cleaning period updated");
        Ok(())
    }

    /// Time of the most recent cleaning assignment, if any
    pub fn latest_cleaning(&self, area: AreaRef) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .area(area)?
            .assignments
            .iter()
            .filter_map(|id| self.cleaning_assignments.get(*id))
            .map(|a| a.time())
            .max())
    }

    pub fn needs_cleaning_at(&self, area: AreaRef, now: DateTime<Utc>) -> Result<bool> {
        let period = self.area(area)?.cleaning_period;
        Ok(needs_cleaning(self.latest_cleaning(area)?, period, now))
    }

    pub fn needs_cleaning(&self, area: AreaRef) -> Result<bool> {
        self.needs_cleaning_at(area, Utc::now())
    }

    /// Areas due for cleaning at `now`, in extent order
    pub fn areas_to_clean_at(&self, now: DateTime<Utc>) -> Vec<AreaRef> {
        self.areas
            .iter()
            .copied()
            .filter(|area| matches!(self.needs_cleaning_at(*area, now), Ok(true)))
            .collect()
    }

    pub fn areas_to_clean(&self) -> Vec<AreaRef> {
        self.areas_to_clean_at(Utc::now())
    }

    /// Short human label, e.g. "Hall 3 (floor 1)"
    pub fn describe_area(&self, area: AreaRef) -> Result<String> {
        let floor_number = |id| self.floors.get(id).map(|f| f.number());
        Ok(match area {
            AreaRef::Floor(id) => format!("Floor {}", self.floors.require(id)?.number()),
            AreaRef::Hall(id) => {
                let hall = self.halls.require(id)?;
                match hall.floor().and_then(floor_number) {
                    Some(n) => format!("Hall {} (floor {})", hall.number(), n),
                    None => format!("Hall {}", hall.number()),
                }
            }
            AreaRef::Wc(id) => {
                let wc = self.wcs.require(id)?;
                match floor_number(wc.floor()) {
                    Some(n) => format!("WC {} (floor {})", wc.wc_type().as_str(), n),
                    None => format!("WC {}", wc.wc_type().as_str()),
                }
            }
        })
    }

    /// Delete any cleanable area through its concrete cascade
    pub fn delete_area(&mut self, area: AreaRef) -> Result<()> {
        match area {
            AreaRef::Floor(id) => self.delete_floor(id),
            AreaRef::Hall(id) => self.delete_hall(id),
            AreaRef::Wc(id) => self.delete_wc(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::WcType;
    use chrono::TimeZone;
    use proptest::prelude::*;

    const HOUR: Duration = Duration::from_secs(3600);

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_area_requires_description() {
        let result = CleanableArea::new("Hall", "   ", HOUR);
        assert!(matches!(
            result,
            Err(CinemaError::Validation { field: "description", .. })
        ));
    }

    #[test]
    fn test_area_rejects_full_day_period() {
        assert!(CleanableArea::new("Hall", "Main", MAX_CLEANING_PERIOD).is_err());
        assert!(CleanableArea::new("Hall", "Main", MAX_CLEANING_PERIOD - Duration::from_secs(1)).is_ok());
        assert!(CleanableArea::new("Hall", "Main", Duration::ZERO).is_ok());
    }

    #[test]
    fn test_description_is_trimmed() {
        let area = CleanableArea::new("Floor", "  Lobby ", HOUR).unwrap();
        assert_eq!(area.description(), "Lobby");
    }

    #[test]
    fn test_never_cleaned_needs_cleaning() {
        assert!(needs_cleaning(None, HOUR, at(10, 0)));
    }

    #[test]
    fn test_needs_cleaning_boundary() {
        let cleaned = at(10, 0);
        assert!(!needs_cleaning(Some(cleaned), HOUR, at(10, 30)));
        assert!(!needs_cleaning(Some(cleaned), HOUR, at(11, 0)));
        assert!(needs_cleaning(Some(cleaned), HOUR, at(11, 1)));
    }

    proptest! {
        #[test]
        fn prop_needs_cleaning_iff_elapsed_exceeds_period(
            period_secs in 0u64..86_400,
            elapsed_secs in 0i64..200_000,
        ) {
            let cleaned = at(0, 0);
            let now = cleaned + chrono::Duration::seconds(elapsed_secs);
            let period = Duration::from_secs(period_secs);
            prop_assert_eq!(
                needs_cleaning(Some(cleaned), period, now),
                elapsed_secs as u64 > period_secs
            );
        }
    }

    #[test]
    fn test_areas_to_clean_follows_extent_order() {
        let mut cinema = Cinema::new();
        let cleaner = cinema.create_employee("Ann", "Nowak").unwrap();
        let floor = cinema.create_floor(1, "First floor", HOUR).unwrap();
        let hall = cinema.create_hall(1, "Hall one", HOUR, Some(floor)).unwrap();
        let wc = cinema
            .create_wc(floor, WcType::Women, "Restroom", 2 * HOUR)
            .unwrap();

        cinema
            .assign_cleaning(AreaRef::Hall(hall), cleaner, at(9, 0))
            .unwrap();
        cinema
            .assign_cleaning(AreaRef::Wc(wc), cleaner, at(9, 0))
            .unwrap();

        // 90 minutes later the hall (1h period) is due, the WC (2h) is not
        let due = cinema.areas_to_clean_at(at(10, 30));
        assert_eq!(due, vec![AreaRef::Floor(floor), AreaRef::Hall(hall)]);
    }

    #[test]
    fn test_latest_assignment_wins() {
        let mut cinema = Cinema::new();
        let cleaner = cinema.create_employee("Ann", "Nowak").unwrap();
        let hall = cinema.create_hall(2, "Hall two", HOUR, None).unwrap();
        let area = AreaRef::Hall(hall);

        cinema.assign_cleaning(area, cleaner, at(12, 0)).unwrap();
        cinema.assign_cleaning(area, cleaner, at(8, 0)).unwrap();

        assert_eq!(cinema.latest_cleaning(area).unwrap(), Some(at(12, 0)));
        assert!(!cinema.needs_cleaning_at(area, at(12, 45)).unwrap());
    }

    #[test]
    fn test_set_cleaning_period_validates() {
        let mut cinema = Cinema::new();
        let floor = cinema.create_floor(0, "Ground", HOUR).unwrap();
        let area = AreaRef::Floor(floor);

        assert!(cinema.set_cleaning_period(area, MAX_CLEANING_PERIOD).is_err());
        assert_eq!(cinema.area(area).unwrap().cleaning_period(), HOUR);

        cinema.set_cleaning_period(area, 3 * HOUR).unwrap();
        assert_eq!(cinema.area(area).unwrap().cleaning_period(), 3 * HOUR);
    }

    #[test]
    fn test_set_area_description_rejects_empty() {
        let mut cinema = Cinema::new();
        let floor = cinema.create_floor(0, "Ground", HOUR).unwrap();
        let area = AreaRef::Floor(floor);

        assert!(cinema.set_area_description(area, "").is_err());
        cinema.set_area_description(area, "Lobby").unwrap();
        assert_eq!(cinema.area(area).unwrap().description(), "Lobby");
    }

    #[test]
    fn test_delete_area_dispatches_to_wc() {
        let mut cinema = Cinema::new();
        let cleaner = cinema.create_employee("Ann", "Nowak").unwrap();
        let floor = cinema.create_floor(1, "First", HOUR).unwrap();
        let wc = cinema.create_wc(floor, WcType::Unisex, "WC", HOUR).unwrap();
        cinema.assign_cleaning(AreaRef::Wc(wc), cleaner, at(9, 0)).unwrap();

        cinema.delete_area(AreaRef::Wc(wc)).unwrap();

        assert!(cinema.wcs().is_empty());
        assert_eq!(cinema.cleanable_areas().all(), &[AreaRef::Floor(floor)]);
        assert!(cinema.floors().require(floor).unwrap().wcs().is_empty());
        assert!(cinema.cleaning_assignments().is_empty());
        assert!(matches!(
            cinema.delete_area(AreaRef::Wc(wc)),
            Err(CinemaError::Missing { entity: "Wc", .. })
        ));
        cinema.check_integrity().unwrap();
    }

    #[test]
    fn test_describe_area() {
        let mut cinema = Cinema::new();
        let floor = cinema.create_floor(1, "First", HOUR).unwrap();
        let hall = cinema.create_hall(3, "Hall", HOUR, Some(floor)).unwrap();
        let wc = cinema.create_wc(floor, WcType::Men, "WC", HOUR).unwrap();

        assert_eq!(cinema.describe_area(AreaRef::Floor(floor)).unwrap(), "Floor 1");
        assert_eq!(cinema.describe_area(AreaRef::Hall(hall)).unwrap(), "Hall 3 (floor 1)");
        assert_eq!(cinema.describe_area(AreaRef::Wc(wc)).unwrap(), "WC men (floor 1)");
    }
}
