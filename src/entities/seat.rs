// 💺 Seat - identified by (number, row) inside its hall

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cinema::Cinema;
use crate::entities::HallId;
use crate::error::{CinemaError, Result};
use crate::extent::{entity_id, unlink, Record};

entity_id!(SeatId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    id: SeatId,
    number: u32,
    row: char,
    hall: HallId,
}

impl Seat {
    pub fn id(&self) -> SeatId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn row(&self) -> char {
        self.row
    }

    pub fn hall(&self) -> HallId {
        self.hall
    }

    /// Natural key within the owning hall
    pub fn position(&self) -> (u32, char) {
        (self.number, self.row)
    }
}

impl Record for Seat {
    type Id = SeatId;
    const ENTITY: &'static str = "Seat";

    fn id(&self) -> SeatId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        validate_position(self.number, self.row)
    }
}

fn validate_position(number: u32, row: char) -> Result<()> {
    if number == 0 {
        return Err(CinemaError::validation(Seat::ENTITY, "number", "must be positive"));
    }
    if !row.is_ascii_uppercase() {
        return Err(CinemaError::validation(
            Seat::ENTITY,
            "row",
            format!("must be an uppercase letter, got {:?}", row),
        ));
    }
    Ok(())
}

impl Cinema {
    pub fn create_seat(&mut self, hall: HallId, number: u32, row: char) -> Result<SeatId> {
        validate_position(number, row)?;
        let owner = self.halls.require(hall)?;
        let limit = self.limits().max_seats_per_hall;
        if owner.seats.len() >= limit {
            return Err(CinemaError::capacity(Seat::ENTITY, format!("hall {}", owner.number()), limit));
        }
        let taken = owner
            .seats
            .iter()
            .filter_map(|id| self.seats.get(*id))
            .any(|s| s.position() == (number, row));
        if taken {
            return Err(CinemaError::duplicate(
                Seat::ENTITY,
                format!("hall {} already has seat {}{}", owner.number(), row, number),
            ));
        }

        let seat = Seat {
            id: SeatId::new(),
            number,
            row,
            hall,
        };
        let id = seat.id;
        self.seats.register(seat);
        self.halls.require_mut(hall)?.seats.push(id);

        debug!(seat = %id, %hall, number, %row, "seat created");
        Ok(id)
    }

    /// Detach a seat from its hall; the seat is deleted with it
    pub fn remove_seat(&mut self, hall: HallId, seat: SeatId) -> Result<()> {
        if !self.halls.require(hall)?.seats.contains(&seat) {
            return Err(CinemaError::not_linked(Seat::ENTITY, seat, format!("hall {}", hall)));
        }
        self.delete_seat(seat)
    }

    pub fn delete_seat(&mut self, seat: SeatId) -> Result<()> {
        let removed = self.seats.deregister(seat)?;
        if let Ok(owner) = self.halls.require_mut(removed.hall) {
            unlink(&mut owner.seats, &seat);
        }
        debug!(%seat, "seat deleted");
        Ok(())
    }

    /// Seats of a hall in the hall's order
    pub fn seats_of(&self, hall: HallId) -> Result<Vec<&Seat>> {
        Ok(self
            .halls
            .require(hall)?
            .seats
            .iter()
            .filter_map(|id| self.seats.get(*id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;
    use std::time::Duration;

    const HOUR: Duration = Duration::from_secs(3600);

    // Small capacity fixture; production halls use DEFAULT_MAX_SEATS_PER_HALL
    fn small_cinema() -> (Cinema, HallId) {
        let mut cinema = Cinema::with_limits(Limits {
            max_seats_per_hall: 3,
        });
        let hall = cinema.create_hall(1, "Small hall", HOUR, None).unwrap();
        (cinema, hall)
    }

    #[test]
    fn test_create_seat_links_hall() {
        let (mut cinema, hall) = small_cinema();
        let seat = cinema.create_seat(hall, 5, 'A').unwrap();

        assert_eq!(cinema.halls().require(hall).unwrap().seats(), &[seat]);
        assert_eq!(cinema.seats().require(seat).unwrap().hall(), hall);
        assert_eq!(cinema.seats_of(hall).unwrap()[0].position(), (5, 'A'));
    }

    #[test]
    fn test_seat_position_validation() {
        let (mut cinema, hall) = small_cinema();
        assert!(cinema.create_seat(hall, 0, 'A').is_err());
        assert!(cinema.create_seat(hall, 1, 'a').is_err());
        assert!(cinema.create_seat(hall, 1, '1').is_err());
        assert!(cinema.seats().is_empty());
    }

    #[test]
    fn test_duplicate_seat_rejected() {
        let (mut cinema, hall) = small_cinema();
        cinema.create_seat(hall, 5, 'A').unwrap();

        let result = cinema.create_seat(hall, 5, 'A');
        assert!(matches!(result, Err(CinemaError::Duplicate { entity: "Seat", .. })));

        // Same coordinates in another hall are fine
        let other = cinema.create_hall(2, "Other", HOUR, None).unwrap();
        cinema.create_seat(other, 5, 'A').unwrap();
        assert_eq!(cinema.seats().len(), 2);
    }

    #[test]
    fn test_hall_capacity() {
        let (mut cinema, hall) = small_cinema();
        for number in 1..=3 {
            cinema.create_seat(hall, number, 'C').unwrap();
        }

        let result = cinema.create_seat(hall, 4, 'C');
        assert!(matches!(result, Err(CinemaError::Capacity { limit: 3, .. })));
        assert_eq!(cinema.seats().len(), 3);
    }

    #[test]
    fn test_remove_seat() {
        let (mut cinema, hall) = small_cinema();
        let seat = cinema.create_seat(hall, 1, 'A').unwrap();
        let other_hall = cinema.create_hall(2, "Other", HOUR, None).unwrap();

        assert!(matches!(
            cinema.remove_seat(other_hall, seat),
            Err(CinemaError::NotLinked { .. })
        ));

        cinema.remove_seat(hall, seat).unwrap();
        assert!(cinema.seats().is_empty());
        assert!(cinema.halls().require(hall).unwrap().seats().is_empty());
    }
}
