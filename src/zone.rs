//! Heating zone identity and per-zone storage.

use core::fmt;
use core::ops::{Index, IndexMut};

/// One of the two independently controlled seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Zone {
    Driver = 0,
    Passenger = 1,
}

impl Zone {
    /// Both zones in fixed priority order (driver first).
    pub const ALL: [Zone; 2] = [Zone::Driver, Zone::Passenger];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Driver => "Driver",
            Self::Passenger => "Passenger",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value held once per zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerZone<T> {
    pub driver: T,
    pub passenger: T,
}

impl<T> PerZone<T> {
    pub const fn new(driver: T, passenger: T) -> Self {
        Self { driver, passenger }
    }

    /// Build both entries from a constructor keyed by zone.
    pub fn from_fn(mut f: impl FnMut(Zone) -> T) -> Self {
        Self {
            driver: f(Zone::Driver),
            passenger: f(Zone::Passenger),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Zone, T) -> U) -> PerZone<U> {
        PerZone {
            driver: f(Zone::Driver, self.driver),
            passenger: f(Zone::Passenger, self.passenger),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zone, &T)> {
        [(Zone::Driver, &self.driver), (Zone::Passenger, &self.passenger)].into_iter()
    }
}

impl<T> Index<Zone> for PerZone<T> {
    type Output = T;

    fn index(&self, zone: Zone) -> &T {
        match zone {
            Zone::Driver => &self.driver,
            Zone::Passenger => &self.passenger,
        }
    }
}

impl<T> IndexMut<Zone> for PerZone<T> {
    fn index_mut(&mut self, zone: Zone) -> &mut T {
        match zone {
            Zone::Driver => &mut self.driver,
            Zone::Passenger => &mut self.passenger,
        }
    }
}
