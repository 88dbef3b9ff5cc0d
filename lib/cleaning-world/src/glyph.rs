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

//! Symbols drawn on the grid and the compass directions they encode.

use serde::{Deserialize, Serialize};

/// Compass direction. Also used for agent and station orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Up, towards row 0.
    North,

    /// Right.
    East,

    /// Down.
    South,

    /// Left.
    West,
}

impl Direction {
    /// All four directions in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// (dx, dy) of one step in this direction. Row 0 is the top of the grid.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Lowercase name, as used in fact and conclusion tokens.
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }

    /// Glyph for the cleaner facing this way.
    pub fn cleaner_symbol(self) -> char {
        match self {
            Direction::North => '^',
            Direction::East => '>',
            Direction::South => 'v',
            Direction::West => '<',
        }
    }

    /// Glyph for the charging station facing this way.
    pub fn station_symbol(self) -> char {
        match self {
            Direction::North => 'u',
            Direction::East => 'r',
            Direction::South => 'd',
            Direction::West => 'l',
        }
    }

    /// Reverse of [`Direction::cleaner_symbol`].
    pub fn from_cleaner_symbol(symbol: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.cleaner_symbol() == symbol)
    }

    /// Reverse of [`Direction::station_symbol`].
    pub fn from_station_symbol(symbol: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.station_symbol() == symbol)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Glyph occupying one grid cell, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glyph {
    /// Nothing here, traversable.
    Empty,

    /// Traversed or cleaned before. Holds the digit (0-9) drawn in the cell.
    ///
    /// Only ASCII digits count. Other Unicode digits such as `'²'` or `'٣'`
    /// parse as debris.
    Visited(u8),

    /// The cleaner, facing the given direction.
    Cleaner(Direction),

    /// The charging station, facing the given direction.
    Station(Direction),

    /// Impassable obstacle.
    Wall,

    /// Anything else: traversable but dirty.
    Debris(char),
}

/// Marker left on a cell once the cleaner has left or cleaned it.
pub const VISITED: Glyph = Glyph::Visited(0);

const EMPTY_SYMBOL: char = ' ';
const WALL_SYMBOL: char = 'x';

impl Glyph {
    /// Classify a raw symbol.
    pub fn from_symbol(symbol: char) -> Self {
        if symbol == EMPTY_SYMBOL {
            return Glyph::Empty;
        }
        if symbol == WALL_SYMBOL {
            return Glyph::Wall;
        }
        if let Some(digit) = symbol.to_digit(10) {
            return Glyph::Visited(digit as u8);
        }
        if let Some(direction) = Direction::from_cleaner_symbol(symbol) {
            return Glyph::Cleaner(direction);
        }
        if let Some(direction) = Direction::from_station_symbol(symbol) {
            return Glyph::Station(direction);
        }
        Glyph::Debris(symbol)
    }

    /// The symbol drawn for this glyph.
    pub fn symbol(self) -> char {
        match self {
            Glyph::Empty => EMPTY_SYMBOL,
            Glyph::Visited(digit) => char::from(b'0' + digit.min(9)),
            Glyph::Cleaner(direction) => direction.cleaner_symbol(),
            Glyph::Station(direction) => direction.station_symbol(),
            Glyph::Wall => WALL_SYMBOL,
            Glyph::Debris(symbol) => symbol,
        }
    }

    /// Dirty terrain the cleaner should consume.
    pub fn is_debris(self) -> bool {
        matches!(self, Glyph::Debris(_))
    }

    /// Empty or already visited.
    pub fn is_clear(self) -> bool {
        matches!(self, Glyph::Empty | Glyph::Visited(_))
    }

    /// Stations and walls can never be moved into.
    pub fn is_impassable(self) -> bool {
        matches!(self, Glyph::Station(_) | Glyph::Wall)
    }
}

impl From<char> for Glyph {
    fn from(symbol: char) -> Self {
        Glyph::from_symbol(symbol)
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Whether a raw symbol counts as debris: not one of the control symbols and
/// not a visited digit.
pub fn is_debris(symbol: char) -> bool {
    Glyph::from_symbol(symbol).is_debris()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const CONTROL: [char; 10] = [' ', 'u', 'd', 'l', 'r', 'x', '^', 'v', '<', '>'];

    #[test]
    fn test_cleaner_symbols_roundtrip() {
        for direction in Direction::ALL {
            let symbol = direction.cleaner_symbol();
            assert_eq!(Direction::from_cleaner_symbol(symbol), Some(direction));
            assert_eq!(Glyph::from(symbol), Glyph::Cleaner(direction));
        }
        assert_eq!(Direction::from_cleaner_symbol('u'), None);
    }

    #[test]
    fn test_station_symbols_roundtrip() {
        for direction in Direction::ALL {
            let symbol = direction.station_symbol();
            assert_eq!(Direction::from_station_symbol(symbol), Some(direction));
            assert_eq!(Glyph::from(symbol), Glyph::Station(direction));
        }
        assert_eq!(Direction::from_station_symbol('^'), None);
    }

    #[test]
    fn test_classification() {
        assert_eq!(Glyph::from(' '), Glyph::Empty);
        assert_eq!(Glyph::from('x'), Glyph::Wall);
        assert_eq!(Glyph::from('7'), Glyph::Visited(7));
        assert_eq!(Glyph::from('#'), Glyph::Debris('#'));
        assert_eq!(VISITED.symbol(), '0');

        assert!(Glyph::Empty.is_clear());
        assert!(VISITED.is_clear());
        assert!(Glyph::Wall.is_impassable());
        assert!(Glyph::Station(Direction::West).is_impassable());
        assert!(!Glyph::Cleaner(Direction::West).is_impassable());
        assert!(!Glyph::Debris('.').is_impassable());
    }

    #[test]
    fn test_only_ascii_digits_are_visited() {
        assert_eq!(Glyph::from('\u{b2}'), Glyph::Debris('\u{b2}'));
        assert_eq!(Glyph::from('\u{663}'), Glyph::Debris('\u{663}'));
        assert!(Glyph::from('\u{663}').is_debris());
    }

    #[test]
    fn test_direction_tokens() {
        assert_eq!(Direction::North.to_string(), "north");
        assert_eq!(Direction::West.offset(), (-1, 0));
    }

    proptest! {
        #[test]
        fn test_debris_law(symbol in any::<char>()) {
            let expected = !CONTROL.contains(&symbol) && !symbol.is_ascii_digit();
            prop_assert_eq!(is_debris(symbol), expected);
        }

        #[test]
        fn test_symbol_roundtrip(symbol in any::<char>()) {
            prop_assert_eq!(Glyph::from(symbol).symbol(), symbol);
        }
    }
}
