/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! The cleaner's battery.

use serde::{Deserialize, Serialize};

/// Cleaner charge, always within `0..=Battery::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Battery(u8);

impl Battery {
    /// Full charge.
    pub const MAX: u8 = 100;

    /// Charge added per tick by an adjacent station.
    pub const CHARGE_STEP: u8 = 5;

    /// At or below this level the cleaner reports a dead battery.
    pub const DEAD_THRESHOLD: u8 = 1;

    /// New battery, clamped to `MAX`.
    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX))
    }

    /// Full battery.
    pub fn full() -> Self {
        Self(Self::MAX)
    }

    /// Current charge.
    pub fn level(self) -> u8 {
        self.0
    }

    /// Nothing left.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Too low to do anything but report itself dead.
    pub fn is_dead(self) -> bool {
        self.0 <= Self::DEAD_THRESHOLD
    }

    /// Use `usage` units. Returns `false` (and does nothing) if already empty.
    pub fn drain(&mut self, usage: u8) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 = self.0.saturating_sub(usage);
        true
    }

    /// Add one station charge step. Within one step of full, snap to full.
    pub fn charge(&mut self) {
        if self.0 >= Self::MAX - Self::CHARGE_STEP {
            self.0 = Self::MAX;
        } else {
            self.0 += Self::CHARGE_STEP;
        }
    }
}

impl Default for Battery {
    fn default() -> Self {
        Self::full()
    }
}

impl std::fmt::Display for Battery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_charge_snaps_to_full() {
        let mut battery = Battery::new(96);
        battery.charge();
        assert_eq!(battery.level(), 100);

        let mut battery = Battery::new(95);
        battery.charge();
        assert_eq!(battery.level(), 100);

        let mut battery = Battery::new(94);
        battery.charge();
        assert_eq!(battery.level(), 99);
    }

    #[test]
    fn test_drain_stops_at_zero() {
        let mut battery = Battery::new(1);
        assert!(battery.drain(1));
        assert!(battery.is_empty());
        assert!(!battery.drain(1));
        assert_eq!(battery.level(), 0);
    }

    #[test]
    fn test_dead_threshold() {
        assert!(Battery::new(0).is_dead());
        assert!(Battery::new(1).is_dead());
        assert!(!Battery::new(2).is_dead());
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Battery::new(250).level(), 100);
    }

    proptest! {
        // any interleaving of charges and drains stays within bounds.
        #[test]
        fn test_battery_stays_in_bounds(
            start in 0u8..=255,
            ops in prop::collection::vec(any::<bool>(), 0..500),
        ) {
            let mut battery = Battery::new(start);
            for charge in ops {
                if charge {
                    battery.charge();
                } else {
                    battery.drain(1);
                }
                prop_assert!(battery.level() <= Battery::MAX);
            }
        }
    }
}
