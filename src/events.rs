//! Bits of the shared system event group.
//!
//! Button interrupts and fault handlers produce; input handling and
//! diagnostics consume.
//!
//! ```text
//! ┌─────────────────┐  DriverButton / PassengerButton  ┌──────────────────┐
//! │ Button ISRs     │─────────────────────────────────▶│  Input handling  │
//! └─────────────────┘                                  └──────────────────┘
//! ┌─────────────────┐  {Driver,Passenger}{Over,Under}  ┌──────────────────┐
//! │ Fault handlers  │─────────────────────────────────▶│  Diagnostics     │
//! └─────────────────┘                                  └──────────────────┘
//! ```

use crate::error::OutOfRange;
use crate::zone::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum EventBit {
    DriverButton = 1 << 0,
    PassengerButton = 1 << 1,
    DriverOver = 1 << 2,
    DriverUnder = 1 << 3,
    PassengerOver = 1 << 4,
    PassengerUnder = 1 << 5,
}

impl EventBit {
    /// Return the bitmask for this event.
    pub const fn mask(self) -> u32 {
        self as u32
    }

    pub const fn button(zone: Zone) -> Self {
        match zone {
            Zone::Driver => Self::DriverButton,
            Zone::Passenger => Self::PassengerButton,
        }
    }

    pub const fn fault(zone: Zone, kind: OutOfRange) -> Self {
        match (zone, kind) {
            (Zone::Driver, OutOfRange::Over) => Self::DriverOver,
            (Zone::Driver, OutOfRange::Under) => Self::DriverUnder,
            (Zone::Passenger, OutOfRange::Over) => Self::PassengerOver,
            (Zone::Passenger, OutOfRange::Under) => Self::PassengerUnder,
        }
    }
}

/// Both button bits.
pub const BUTTON_MASK: u32 = EventBit::DriverButton.mask() | EventBit::PassengerButton.mask();

/// The four fault bits watched by diagnostics.
pub const FAULT_MASK: u32 = EventBit::DriverOver.mask()
    | EventBit::DriverUnder.mask()
    | EventBit::PassengerOver.mask()
    | EventBit::PassengerUnder.mask();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_are_disjoint() {
        assert_eq!(BUTTON_MASK & FAULT_MASK, 0);
        assert_eq!(BUTTON_MASK | FAULT_MASK, 0b11_1111);
    }

    #[test]
    fn fault_bit_lookup() {
        assert_eq!(EventBit::fault(Zone::Passenger, OutOfRange::Under).mask(), 1 << 5);
        assert_eq!(EventBit::fault(Zone::Driver, OutOfRange::Over).mask(), 1 << 2);
    }
}
