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

//! The grid the cleaner and the station live on.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::glyph::{Direction, Glyph, VISITED};

/// Errors raised while sensing or mutating the grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A position was read that lies outside the grid. Maps must be bordered by
    /// walls so that this never happens.
    #[error("position out of bounds: {0}")]
    OutOfBounds(Position),
}

/// Errors raised while building a world from a map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The map file could not be read.
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    /// The map has no rows.
    #[error("map is empty")]
    Empty,

    /// No cleaner symbol (`^`, `>`, `v`, `<`) was found.
    #[error("map has no cleaner")]
    MissingCleaner,

    /// No station symbol (`u`, `r`, `d`, `l`) was found.
    #[error("map has no charging station")]
    MissingStation,
}

/// Grid coordinate. Origin is the top-left cell, `x` grows right, `y` grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: i32,

    /// Row.
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent position one step towards `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One grid cell.
///
/// `display` is what is drawn. `terrain` is what lies underneath. They only
/// differ on the cleaner's own cell, where the cleaner's symbol hides the
/// terrain it is standing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Drawn glyph.
    pub display: Glyph,

    /// Glyph underneath any occupant.
    pub terrain: Glyph,
}

impl Cell {
    fn new(glyph: Glyph) -> Self {
        Self {
            display: glyph,
            terrain: glyph,
        }
    }
}

/// What an agent sees: the four orthogonal neighbors plus the terrain it is
/// standing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Glyph to the north.
    pub north: Glyph,

    /// Glyph to the east.
    pub east: Glyph,

    /// Glyph to the south.
    pub south: Glyph,

    /// Glyph to the west.
    pub west: Glyph,

    /// Terrain under the sensing agent.
    pub here: Glyph,
}

impl Neighborhood {
    /// Neighbor glyph in `direction`.
    pub fn toward(&self, direction: Direction) -> Glyph {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

impl std::fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{north: '{}', east: '{}', south: '{}', west: '{}', here: '{}'}}",
            self.north, self.east, self.south, self.west, self.here
        )
    }
}

/// The symbol grid plus where the cleaner and the station are.
///
/// Only the cleaner moves. The station is fixed for the lifetime of the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    rows: Vec<Vec<Cell>>,
    cleaner_position: Position,
    cleaner_orientation: Direction,
    station_position: Position,
    station_orientation: Direction,
}

impl GridWorld {
    /// Read a map file. See [`GridWorld::from_str`] for the format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at `position`, or `None` outside the grid.
    pub fn get(&self, position: Position) -> Option<&Cell> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        self.rows.get(y)?.get(x)
    }

    fn get_mut(&mut self, position: Position) -> Result<&mut Cell, WorldError> {
        let x = usize::try_from(position.x).map_err(|_| WorldError::OutOfBounds(position))?;
        let y = usize::try_from(position.y).map_err(|_| WorldError::OutOfBounds(position))?;
        self.rows
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(WorldError::OutOfBounds(position))
    }

    fn display_at(&self, position: Position) -> Result<Glyph, WorldError> {
        self.get(position)
            .map(|cell| cell.display)
            .ok_or(WorldError::OutOfBounds(position))
    }

    /// Current cleaner position.
    pub fn cleaner_position(&self) -> Position {
        self.cleaner_position
    }

    /// Current cleaner orientation.
    pub fn cleaner_orientation(&self) -> Direction {
        self.cleaner_orientation
    }

    /// Station position.
    pub fn station_position(&self) -> Position {
        self.station_position
    }

    /// Station orientation.
    pub fn station_orientation(&self) -> Direction {
        self.station_orientation
    }

    /// Terrain under the cleaner.
    pub fn occupied_terrain(&self) -> Glyph {
        self.get(self.cleaner_position)
            .map(|cell| cell.terrain)
            .unwrap_or(Glyph::Empty)
    }

    /// Read the four neighbors of `position` and the terrain at `position`.
    pub fn sense(&self, position: Position) -> Result<Neighborhood, WorldError> {
        let here = self
            .get(position)
            .map(|cell| cell.terrain)
            .ok_or(WorldError::OutOfBounds(position))?;
        Ok(Neighborhood {
            north: self.display_at(position.step(Direction::North))?,
            east: self.display_at(position.step(Direction::East))?,
            south: self.display_at(position.step(Direction::South))?,
            west: self.display_at(position.step(Direction::West))?,
            here,
        })
    }

    /// Try to move the cleaner to `destination`, facing `orientation`.
    ///
    /// Moving into a wall or the station is a collision: nothing changes and
    /// the current position is returned. Otherwise the cell left behind becomes
    /// a visited marker (its old terrain is forgotten), the destination's old
    /// glyph becomes the terrain under the cleaner, and the new position is
    /// returned.
    pub fn attempt_move(
        &mut self,
        destination: Position,
        orientation: Direction,
    ) -> Result<Position, WorldError> {
        let target = self.display_at(destination)?;
        if target.is_impassable() {
            trace!(%destination, glyph = %target, "move rejected");
            return Ok(self.cleaner_position);
        }

        let origin = self.cleaner_position;
        *self.get_mut(origin)? = Cell::new(VISITED);
        *self.get_mut(destination)? = Cell {
            display: Glyph::Cleaner(orientation),
            terrain: target,
        };
        self.cleaner_position = destination;
        self.cleaner_orientation = orientation;
        trace!(%origin, %destination, terrain = %target, "cleaner moved");
        Ok(destination)
    }

    /// Consume the debris under the cleaner at `position`.
    ///
    /// Only the terrain changes. The drawn glyph is still the cleaner, so the
    /// debris disappears without the visible grid changing.
    pub fn mark_clean(&mut self, position: Position) -> Result<(), WorldError> {
        self.get_mut(position)?.terrain = VISITED;
        trace!(%position, "cell cleaned");
        Ok(())
    }

    /// Turn the cleaner at `position` to face `orientation`.
    pub fn rotate_in_place(
        &mut self,
        position: Position,
        orientation: Direction,
    ) -> Result<(), WorldError> {
        self.get_mut(position)?.display = Glyph::Cleaner(orientation);
        if position == self.cleaner_position {
            self.cleaner_orientation = orientation;
        }
        Ok(())
    }

    /// Cells whose terrain is still dirty.
    pub fn debris_remaining(&self) -> usize {
        self.cells().filter(|cell| cell.terrain.is_debris()).count()
    }

    /// Cells drawn with a visited marker.
    pub fn visited_cells(&self) -> usize {
        self.cells()
            .filter(|cell| matches!(cell.display, Glyph::Visited(_)))
            .count()
    }

    fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }
}

impl FromStr for GridWorld {
    type Err = MapError;

    /// One line per row, one symbol per cell. Trailing whitespace on each line
    /// is dropped. The first cleaner and the first station found in row-major
    /// order fix the starting positions; later duplicates are kept as plain
    /// glyphs.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<Cell>> = text
            .lines()
            .map(|line| {
                line.trim_end()
                    .chars()
                    .map(|symbol| Cell::new(Glyph::from(symbol)))
                    .collect()
            })
            .collect();
        if rows.is_empty() {
            return Err(MapError::Empty);
        }

        let mut cleaner = None;
        let mut station = None;
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let position = Position::new(x as i32, y as i32);
                match cell.display {
                    Glyph::Cleaner(direction) if cleaner.is_none() => {
                        cleaner = Some((position, direction));
                    }
                    Glyph::Station(direction) if station.is_none() => {
                        station = Some((position, direction));
                    }
                    _ => {}
                }
            }
        }
        let (cleaner_position, cleaner_orientation) = cleaner.ok_or(MapError::MissingCleaner)?;
        let (station_position, station_orientation) = station.ok_or(MapError::MissingStation)?;

        // nothing is known to lie under the cleaner at the start.
        rows[cleaner_position.y as usize][cleaner_position.x as usize].terrain = Glyph::Empty;

        Ok(Self {
            rows,
            cleaner_position,
            cleaner_orientation,
            station_position,
            station_orientation,
        })
    }
}

impl std::fmt::Display for GridWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, row) in self.rows.iter().enumerate() {
            let line: String = row.iter().map(|cell| cell.display.symbol()).collect();
            if index + 1 < self.rows.len() {
                writeln!(f, "{}", line)?;
            } else {
                write!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
