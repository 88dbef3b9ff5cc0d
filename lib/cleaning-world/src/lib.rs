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

//! Sense, decide, act
//!
//! A cleaning robot and its charging station share a symbolic grid. Every tick each of them senses
//! its four neighbors, turns what it sees into facts, lets a production rule engine pick exactly one
//! conclusion, and carries that conclusion out. The robot goes first so the station always sees where
//! the robot ended up.
//!
//! Neither agent knows about the other's rules. They only interact through the grid and the robot's
//! battery, which the station tops up when the robot is adjacent.

#![warn(missing_docs)]

pub mod battery;
pub mod cleaner;
pub mod directions;
pub mod glyph;
pub mod simulation;
pub mod station;
pub mod world;

pub use battery::Battery;
pub use cleaner::{CleanerAction, CleanerAgent, CleanerConclusion, CleanerFact};
pub use directions::{DirectionSource, FixedDirections, RandomDirections};
pub use glyph::{Direction, Glyph};
pub use simulation::{step, EndReason, Episode, EpisodeSummary, TickReport};
pub use station::{StationAction, StationAgent, StationConclusion, StationFact};
pub use world::{Cell, GridWorld, MapError, Neighborhood, Position, WorldError};
