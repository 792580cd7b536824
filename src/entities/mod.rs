// Entity Models
//
// Each entity has:
// - Stable identity (UUID newtype) used for every link
// - Validated attributes, written only through `Cinema` operations
// - An extent on `Cinema` holding every live instance

pub mod area;
pub mod cleaning;
pub mod displayer;
pub mod floor;
pub mod hall;
pub mod item;
pub mod screening;
pub mod seat;
pub mod staff;
pub mod wc;

pub use area::{needs_cleaning, AreaRef, CleanableArea, MAX_CLEANING_PERIOD};
pub use cleaning::{CleaningAssignment, CleaningAssignmentId};
pub use displayer::{Displayer, DisplayerAssignment, DisplayerAssignmentId, DisplayerId};
pub use floor::{Floor, FloorId};
pub use hall::{Hall, HallId};
pub use item::{GlassSize, Item, ItemId, ItemKind};
pub use screening::{Screening, ScreeningId, ScreeningStatus};
pub use seat::{Seat, SeatId};
pub use staff::{
    ContractRef, Employee, EmployeeId, FullTimeContract, FullTimeContractId, PartTimeContract,
    PartTimeContractId, MAX_PART_TIME_HOURS, MIN_PART_TIME_HOURS,
};
pub use wc::{Wc, WcId, WcType};
