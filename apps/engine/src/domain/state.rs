use serde::{Deserialize, Serialize};

pub type PlayerId = u32;
pub type Seat = u8; // 0..=3

/// Partnership: seats {0,2} are team 0, seats {1,3} are team 1.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Team(pub u8);

impl Team {
    pub const ALL: [Team; 2] = [Team(0), Team(1)];

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn seats(self) -> [Seat; 2] {
        [self.0, self.0 + 2]
    }

    pub fn other(self) -> Team {
        Team(1 - self.0)
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    ((seat as i16 + delta as i16).rem_euclid(4)) as Seat
}

/// Returns the next seat clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// Returns the seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: u8) -> Seat {
    seat_offset(start, n as i8)
}

/// Seat across the table.
#[inline]
pub fn partner_of(seat: Seat) -> Seat {
    seat_offset(seat, 2)
}

#[inline]
pub fn team_of(seat: Seat) -> Team {
    Team(seat % 2)
}

/// The four seats in clockwise order starting at `start`.
pub fn rotation_from(start: Seat) -> [Seat; 4] {
    [0, 1, 2, 3].map(|n| nth_from(start, n))
}
