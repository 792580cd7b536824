// 💾 Persistence - whole-extent JSON documents
//
// Layout of a data directory:
//   cleanable_areas.json        Floor / Hall / Wc records, polymorphic order
//   seats.json, cleaning_assignments.json, employees.json,
//   part_time_contracts.json, full_time_contracts.json, screenings.json,
//   displayers.json, displayer_assignments.json
//   items.json                  Snack / Glass3D records
//
// Every document carries a SHA-256 checksum of its records text. Links are
// stored as ids on both sides and verified after loading.
//
// Load policy: an absent file is not an error (the extent is cleared and
// `LoadOutcome::NotFound` returned); a present document that is unreadable,
// repeats an id or holds an invalid attribute clears the affected extents and
// returns an error.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use crate::cinema::Cinema;
use crate::entities::{AreaRef, Floor, Hall, Item, Wc};
use crate::error::{CinemaError, PersistenceError, Result};
use crate::extent::Record;
use crate::integrity::check_records;

pub const FORMAT_VERSION: u32 = 1;

pub const AREAS_FILE: &str = "cleanable_areas.json";
pub const SEATS_FILE: &str = "seats.json";
pub const CLEANING_FILE: &str = "cleaning_assignments.json";
pub const EMPLOYEES_FILE: &str = "employees.json";
pub const PART_TIME_FILE: &str = "part_time_contracts.json";
pub const FULL_TIME_FILE: &str = "full_time_contracts.json";
pub const SCREENINGS_FILE: &str = "screenings.json";
pub const DISPLAYERS_FILE: &str = "displayers.json";
pub const DISPLAYER_ASSIGNMENTS_FILE: &str = "displayer_assignments.json";
pub const ITEMS_FILE: &str = "items.json";

// ============================================================================
// DOCUMENT
// ============================================================================

#[derive(Serialize, Deserialize)]
struct Document {
    format_version: u32,
    kind: String,
    saved_at: DateTime<Utc>,
    checksum: String,
    records: Box<RawValue>,
}

/// Result of a load that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Number of records read
    Loaded(usize),
    NotFound,
}

/// One record of the polymorphic CleanableArea document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum AreaRecord {
    Floor(Floor),
    Hall(Hall),
    Wc(Wc),
}

fn checksum(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn malformed(path: &Path, source: serde_json::Error) -> CinemaError {
    PersistenceError::Malformed {
        path: path.to_path_buf(),
        source,
    }
    .into()
}

fn io_error(path: &Path, source: std::io::Error) -> CinemaError {
    PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
    .into()
}

/// Write `records` as one document of the given kind
pub fn write_document<T: Serialize>(path: &Path, kind: &str, records: &[T]) -> Result<()> {
    let text = serde_json::to_string(records).map_err(|e| malformed(path, e))?;
    let document = Document {
        format_version: FORMAT_VERSION,
        kind: kind.to_string(),
        saved_at: Utc::now(),
        checksum: checksum(&text),
        records: RawValue::from_string(text).map_err(|e| malformed(path, e))?,
    };
    let body = serde_json::to_string_pretty(&document).map_err(|e| malformed(path, e))?;
    fs::write(path, body).map_err(|e| io_error(path, e))
}

/// Read a document; `Ok(None)` when the file does not exist
pub fn read_document<T: DeserializeOwned>(path: &Path, kind: &'static str) -> Result<Option<Vec<T>>> {
    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    let document: Document = serde_json::from_str(&body).map_err(|e| malformed(path, e))?;

    if document.format_version != FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            path: path.to_path_buf(),
            version: document.format_version,
        }
        .into());
    }
    if document.kind != kind {
        return Err(PersistenceError::WrongKind {
            path: path.to_path_buf(),
            expected: kind,
            found: document.kind,
        }
        .into());
    }
    if checksum(document.records.get()) != document.checksum {
        return Err(PersistenceError::ChecksumMismatch {
            path: path.to_path_buf(),
        }
        .into());
    }

    let records = serde_json::from_str(document.records.get()).map_err(|e| malformed(path, e))?;
    Ok(Some(records))
}

fn read_or_empty<T: DeserializeOwned>(dir: &Path, file: &str, kind: &'static str) -> Result<Vec<T>> {
    Ok(read_document(&dir.join(file), kind)?.unwrap_or_default())
}

// ============================================================================
// CINEMA SAVE / LOAD
// ============================================================================

impl Cinema {
    /// Save every extent into `dir`, creating it if needed
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

        let areas = self.area_records()?;
        write_document(&dir.join(AREAS_FILE), AreaRef::ENTITY, &areas)?;
        write_document(&dir.join(SEATS_FILE), "Seat", self.seats.all())?;
        write_document(&dir.join(CLEANING_FILE), "CleaningAssignment", self.cleaning_assignments.all())?;
        write_document(&dir.join(EMPLOYEES_FILE), "Employee", self.employees.all())?;
        write_document(&dir.join(PART_TIME_FILE), "PartTimeContract", self.part_time_contracts.all())?;
        write_document(&dir.join(FULL_TIME_FILE), "FullTimeContract", self.full_time_contracts.all())?;
        write_document(&dir.join(SCREENINGS_FILE), "Screening", self.screenings.all())?;
        write_document(&dir.join(DISPLAYERS_FILE), "Displayer", self.displayers.all())?;
        write_document(
            &dir.join(DISPLAYER_ASSIGNMENTS_FILE),
            "DisplayerAssignment",
            self.displayer_assignments.all(),
        )?;
        write_document(&dir.join(ITEMS_FILE), "Item", self.items.all())?;

        info!(dir = %dir.display(), areas = areas.len(), items = self.items.len(), "cinema saved");
        Ok(())
    }

    /// Replace every extent with the contents of `dir`
    ///
    /// On any failure all extents are left empty.
    pub fn load(&mut self, dir: impl AsRef<Path>) -> Result<LoadOutcome> {
        let dir = dir.as_ref();
        self.clear();
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "data directory not found, starting empty");
            return Ok(LoadOutcome::NotFound);
        }

        match self.load_all(dir) {
            Ok(count) => {
                info!(dir = %dir.display(), records = count, "cinema loaded");
                Ok(LoadOutcome::Loaded(count))
            }
            Err(e) => {
                self.clear();
                warn!(dir = %dir.display(), error = %e, "load failed, extents cleared");
                Err(e)
            }
        }
    }

    fn load_all(&mut self, dir: &Path) -> Result<usize> {
        let areas: Vec<AreaRecord> = read_or_empty(dir, AREAS_FILE, AreaRef::ENTITY)?;
        let seats = read_or_empty(dir, SEATS_FILE, "Seat")?;
        let cleaning = read_or_empty(dir, CLEANING_FILE, "CleaningAssignment")?;
        let employees = read_or_empty(dir, EMPLOYEES_FILE, "Employee")?;
        let part_time = read_or_empty(dir, PART_TIME_FILE, "PartTimeContract")?;
        let full_time = read_or_empty(dir, FULL_TIME_FILE, "FullTimeContract")?;
        let screenings = read_or_empty(dir, SCREENINGS_FILE, "Screening")?;
        let displayers = read_or_empty(dir, DISPLAYERS_FILE, "Displayer")?;
        let displayer_assignments = read_or_empty(dir, DISPLAYER_ASSIGNMENTS_FILE, "DisplayerAssignment")?;
        let items = read_or_empty(dir, ITEMS_FILE, "Item")?;

        let count = areas.len()
            + seats.len()
            + cleaning.len()
            + employees.len()
            + part_time.len()
            + full_time.len()
            + screenings.len()
            + displayers.len()
            + displayer_assignments.len()
            + items.len();

        self.restore_areas(areas);
        self.seats.replace(seats);
        self.cleaning_assignments.replace(cleaning);
        self.employees.replace(employees);
        self.part_time_contracts.replace(part_time);
        self.full_time_contracts.replace(full_time);
        self.screenings.replace(screenings);
        self.displayers.replace(displayers);
        self.displayer_assignments.replace(displayer_assignments);
        self.items.replace(items);

        self.check_integrity()?;
        Ok(count)
    }

    fn area_records(&self) -> Result<Vec<AreaRecord>> {
        self.areas
            .iter()
            .map(|area| {
                Ok(match *area {
                    AreaRef::Floor(id) => AreaRecord::Floor(self.floors.require(id)?.clone()),
                    AreaRef::Hall(id) => AreaRecord::Hall(self.halls.require(id)?.clone()),
                    AreaRef::Wc(id) => AreaRecord::Wc(self.wcs.require(id)?.clone()),
                })
            })
            .collect()
    }

    /// Insert each tagged record into its variant extent and the
    /// polymorphic one
    fn restore_areas(&mut self, records: Vec<AreaRecord>) {
        for record in records {
            match record {
                AreaRecord::Floor(floor) => {
                    self.areas.register(AreaRef::Floor(floor.id()));
                    self.floors.register(floor);
                }
                AreaRecord::Hall(hall) => {
                    self.areas.register(AreaRef::Hall(hall.id()));
                    self.halls.register(hall);
                }
                AreaRecord::Wc(wc) => {
                    self.areas.register(AreaRef::Wc(wc.id()));
                    self.wcs.register(wc);
                }
            }
        }
    }

    // ========================================================================
    // PER-TYPE: ITEMS
    // ========================================================================

    pub fn save_items(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_document(path, "Item", self.items.all())?;
        info!(path = %path.display(), items = self.items.len(), "items saved");
        Ok(())
    }

    /// Replace the item extent; other extents are untouched
    pub fn load_items(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let path = path.as_ref();
        let loaded = read_document::<Item>(path, "Item").and_then(|items| {
            if let Some(items) = &items {
                check_records(items)?;
            }
            Ok(items)
        });
        match loaded {
            Ok(Some(items)) => {
                let count = items.len();
                self.items.replace(items);
                info!(path = %path.display(), items = count, "items loaded");
                Ok(LoadOutcome::Loaded(count))
            }
            Ok(None) => {
                self.items.clear();
                warn!(path = %path.display(), "item document not found, extent cleared");
                Ok(LoadOutcome::NotFound)
            }
            Err(e) => {
                self.items.clear();
                warn!(path = %path.display(), error = %e, "item load failed, extent cleared");
                Err(e)
            }
        }
    }
}
