//! Seats, per-seat storage and viewers.
//!
//! ## Seat
//!
//! A duel has exactly two seats: `Host` (the player who created the game)
//! and `Away`. Every player-scoped record is keyed by seat.
//!
//! ## SeatMap
//!
//! Per-seat data storage with O(1) access, indexable by `Seat`.
//!
//! ## Viewer
//!
//! Who is looking at the game: one of the seats, or a spectator.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    /// The player who created the game.
    Host,
    /// The player who joined it.
    Away,
}

impl Seat {
    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Seat::Host => Seat::Away,
            Seat::Away => Seat::Host,
        }
    }

    /// Both seats, host first.
    ///
    /// ```
    /// use duel_rules::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all().collect();
    /// assert_eq!(seats, vec![Seat::Host, Seat::Away]);
    /// ```
    pub fn all() -> impl Iterator<Item = Seat> {
        [Seat::Host, Seat::Away].into_iter()
    }

    /// Lowercase name, as used in opaque placeholder IDs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Seat::Host => "host",
            Seat::Away => "away",
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-seat data storage.
///
/// ## Example
///
/// ```
/// use duel_rules::core::{Seat, SeatMap};
///
/// let mut life: SeatMap<i32> = SeatMap::with_value(8000);
/// life[Seat::Away] -= 1000;
///
/// assert_eq!(life[Seat::Host], 8000);
/// assert_eq!(life[Seat::Away], 7000);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    host: T,
    away: T,
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(factory: impl Fn(Seat) -> T) -> Self {
        Self {
            host: factory(Seat::Host),
            away: factory(Seat::Away),
        }
    }

    /// Create a new SeatMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        match seat {
            Seat::Host => &self.host,
            Seat::Away => &self.away,
        }
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        match seat {
            Seat::Host => &mut self.host,
            Seat::Away => &mut self.away,
        }
    }

    /// Iterate over (Seat, &T) pairs, host first.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        [(Seat::Host, &self.host), (Seat::Away, &self.away)].into_iter()
    }

    /// Build a new map by transforming each entry.
    pub fn map<U>(&self, mut f: impl FnMut(Seat, &T) -> U) -> SeatMap<U> {
        SeatMap {
            host: f(Seat::Host, &self.host),
            away: f(Seat::Away, &self.away),
        }
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}

/// Who a projected view is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewer {
    /// A participant sees their own hidden zones.
    Seat(Seat),
    /// A spectator sees neither side's hidden zones.
    Spectator,
}

impl Viewer {
    /// Does this viewer own zones belonging to `seat`?
    #[must_use]
    pub fn owns(self, seat: Seat) -> bool {
        matches!(self, Viewer::Seat(s) if s == seat)
    }
}

impl From<Seat> for Viewer {
    fn from(seat: Seat) -> Self {
        Viewer::Seat(seat)
    }
}

impl std::str::FromStr for Viewer {
    type Err = crate::core::RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Viewer::Seat(Seat::Host)),
            "away" => Ok(Viewer::Seat(Seat::Away)),
            "spectator" => Ok(Viewer::Spectator),
            other => Err(crate::core::RulesError::Parse(format!("unknown viewer `{other}`"))),
        }
    }
}
