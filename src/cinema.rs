// 🎬 Cinema - the repository owning every extent
//
// A `Cinema` is created by the caller and passed by reference; there is no
// process-wide state. Mutation needs `&mut Cinema`, which keeps access
// single-owner. The association managers live next to their entity types as
// `impl Cinema` blocks under `entities/`.

use crate::config::Limits;
use crate::entities::{
    AreaRef, CleaningAssignment, Displayer, DisplayerAssignment, Employee, Floor,
    FullTimeContract, Hall, Item, PartTimeContract, Screening, Seat, Wc,
};
use crate::extent::Extent;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cinema {
    limits: Limits,
    pub(crate) floors: Extent<Floor>,
    pub(crate) halls: Extent<Hall>,
    pub(crate) wcs: Extent<Wc>,
    pub(crate) seats: Extent<Seat>,
    /// Polymorphic extent: every Floor, Hall and Wc in creation order
    pub(crate) areas: Extent<AreaRef>,
    pub(crate) cleaning_assignments: Extent<CleaningAssignment>,
    pub(crate) employees: Extent<Employee>,
    pub(crate) part_time_contracts: Extent<PartTimeContract>,
    pub(crate) full_time_contracts: Extent<FullTimeContract>,
    pub(crate) screenings: Extent<Screening>,
    pub(crate) displayers: Extent<Displayer>,
    pub(crate) displayer_assignments: Extent<DisplayerAssignment>,
    pub(crate) items: Extent<Item>,
}

impl Cinema {
    /// Create an empty cinema with production limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Cinema {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    // ========================================================================
    // READ-ONLY EXTENTS
    // ========================================================================

    pub fn floors(&self) -> &Extent<Floor> {
        &self.floors
    }

    pub fn halls(&self) -> &Extent<Hall> {
        &self.halls
    }

    pub fn wcs(&self) -> &Extent<Wc> {
        &self.wcs
    }

    pub fn seats(&self) -> &Extent<Seat> {
        &self.seats
    }

    pub fn cleanable_areas(&self) -> &Extent<AreaRef> {
        &self.areas
    }

    pub fn cleaning_assignments(&self) -> &Extent<CleaningAssignment> {
        &self.cleaning_assignments
    }

    pub fn employees(&self) -> &Extent<Employee> {
        &self.employees
    }

    pub fn part_time_contracts(&self) -> &Extent<PartTimeContract> {
        &self.part_time_contracts
    }

    pub fn full_time_contracts(&self) -> &Extent<FullTimeContract> {
        &self.full_time_contracts
    }

    pub fn screenings(&self) -> &Extent<Screening> {
        &self.screenings
    }

    pub fn displayers(&self) -> &Extent<Displayer> {
        &self.displayers
    }

    pub fn displayer_assignments(&self) -> &Extent<DisplayerAssignment> {
        &self.displayer_assignments
    }

    pub fn items(&self) -> &Extent<Item> {
        &self.items
    }

    /// Empty every extent; limits are kept
    pub fn clear(&mut self) {
        self.floors.clear();
        self.halls.clear();
        self.wcs.clear();
        self.seats.clear();
        self.areas.clear();
        self.cleaning_assignments.clear();
        self.employees.clear();
        self.part_time_contracts.clear();
        self.full_time_contracts.clear();
        self.screenings.clear();
        self.displayers.clear();
        self.displayer_assignments.clear();
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
            && self.seats.is_empty()
            && self.cleaning_assignments.is_empty()
            && self.employees.is_empty()
            && self.part_time_contracts.is_empty()
            && self.full_time_contracts.is_empty()
            && self.screenings.is_empty()
            && self.displayers.is_empty()
            && self.displayer_assignments.is_empty()
            && self.items.is_empty()
    }
}
