// Cinema Facility - Core Library
// In-memory object model of a cinema: extents, validated attributes,
// bidirectional compositions, and whole-extent persistence.

pub mod cinema;
pub mod config;
pub mod entities;
pub mod error;
pub mod extent;
pub mod integrity;
pub mod inventory;
pub mod persistence;

// Re-export commonly used types
pub use cinema::Cinema;
pub use config::{Config, Limits, DEFAULT_MAX_SEATS_PER_HALL, MAX_WCS_PER_FLOOR};
pub use entities::{
    AreaRef, CleanableArea, CleaningAssignment, CleaningAssignmentId,
    ContractRef, Displayer, DisplayerAssignment, DisplayerAssignmentId, DisplayerId,
    Employee, EmployeeId, Floor, FloorId, FullTimeContract, FullTimeContractId,
    GlassSize, Hall, HallId, Item, ItemId, ItemKind, PartTimeContract, PartTimeContractId,
    Screening, ScreeningId, ScreeningStatus, Seat, SeatId, Wc, WcId, WcType,
};
pub use error::{CinemaError, PersistenceError, Result};
pub use extent::{Extent, Record};
pub use inventory::{inventory_value, write_inventory_csv};
pub use persistence::LoadOutcome;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
