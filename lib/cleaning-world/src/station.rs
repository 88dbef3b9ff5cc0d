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

//! The charging station. It never moves; it charges the cleaner whenever the
//! cleaner is next to it.

use production_rules::RuleEngine;
use serde::Serialize;
use tracing::debug;

use crate::battery::Battery;
use crate::glyph::{Direction, Glyph};
use crate::world::{GridWorld, Neighborhood, Position, WorldError};

/// The cleaner is adjacent in this direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationFact(pub Direction);

impl std::fmt::Display for StationFact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_robot", self.0)
    }
}

/// What the station's rule engine can conclude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationConclusion {
    /// Charge the cleaner sitting in this direction.
    Charge(Direction),

    /// Nothing to do.
    Idle,
}

impl std::fmt::Display for StationConclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationConclusion::Charge(direction) => write!(f, "charge_{}", direction),
            StationConclusion::Idle => write!(f, "idle"),
        }
    }
}

/// What the station did last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationAction {
    /// Nothing.
    Idle,

    /// Charged the cleaner in this direction.
    Charged(Direction),
}

impl std::fmt::Display for StationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationAction::Idle => write!(f, "idle"),
            StationAction::Charged(direction) => {
                write!(f, "Charged Robot : charge_{}", direction)
            }
        }
    }
}

/// The station's rule table. If the cleaner were adjacent on two sides at
/// once only the first listed direction fires.
pub fn station_rules() -> RuleEngine<StationFact, StationConclusion> {
    let mut engine = RuleEngine::new(StationConclusion::Idle);
    for direction in Direction::ALL {
        engine.add_rule([StationFact(direction)], StationConclusion::Charge(direction));
    }
    engine
}

/// Assert one fact per side the cleaner is seen on.
pub fn derive_station_facts(
    engine: &mut RuleEngine<StationFact, StationConclusion>,
    sensed: &Neighborhood,
) {
    for direction in Direction::ALL {
        if matches!(sensed.toward(direction), Glyph::Cleaner(_)) {
            engine.assert_fact(StationFact(direction));
        }
    }
}

/// The charging station.
#[derive(Debug, Clone)]
pub struct StationAgent {
    engine: RuleEngine<StationFact, StationConclusion>,
    position: Position,
    orientation: Direction,
    sensed: Option<Neighborhood>,
    decision: Option<StationConclusion>,
    last_action: Option<StationAction>,
    total_charge: u32,
}

impl StationAgent {
    /// New station at `position`.
    pub fn new(position: Position, orientation: Direction) -> Self {
        Self {
            engine: station_rules(),
            position,
            orientation,
            sensed: None,
            decision: None,
            last_action: None,
            total_charge: 0,
        }
    }

    /// New station wherever `world` put it.
    pub fn from_world(world: &GridWorld) -> Self {
        Self::new(world.station_position(), world.station_orientation())
    }

    /// Fixed cell of the station.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Heading the station was drawn with.
    pub fn orientation(&self) -> Direction {
        self.orientation
    }

    /// Surroundings sensed during the last cycle.
    pub fn last_sensed(&self) -> Option<Neighborhood> {
        self.sensed
    }

    /// Conclusion of the last cycle.
    pub fn last_decision(&self) -> Option<StationConclusion> {
        self.decision
    }

    /// What the last cycle did.
    pub fn last_action(&self) -> Option<StationAction> {
        self.last_action
    }

    /// Battery units delivered so far.
    pub fn total_charge(&self) -> u32 {
        self.total_charge
    }

    /// Rebuild the facts from `sensed` and return the engine's conclusion.
    pub fn decide(&mut self, sensed: &Neighborhood) -> StationConclusion {
        self.engine.reset_facts();
        derive_station_facts(&mut self.engine, sensed);
        let conclusion = self.engine.decide();
        debug!(position = %self.position, %conclusion, "station decided");
        self.decision = Some(conclusion);
        conclusion
    }

    /// One full sense, decide, act cycle. `battery` belongs to the paired
    /// cleaner.
    pub fn act(
        &mut self,
        world: &GridWorld,
        battery: &mut Battery,
    ) -> Result<StationConclusion, WorldError> {
        let sensed = world.sense(self.position)?;
        self.sensed = Some(sensed);
        let conclusion = self.decide(&sensed);

        let action = match conclusion {
            StationConclusion::Charge(direction) => {
                let before = battery.level();
                battery.charge();
                self.total_charge += u32::from(battery.level() - before);
                StationAction::Charged(direction)
            }
            StationConclusion::Idle => StationAction::Idle,
        };
        self.last_action = Some(action);
        Ok(conclusion)
    }
}

impl std::fmt::Display for StationAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let or_none = |value: Option<String>| value.unwrap_or_else(|| "None".to_owned());
        writeln!(f, "        -- ChargeStation Data --")?;
        writeln!(f, "Position                  :   {}", self.position)?;
        writeln!(
            f,
            "Last Sensor Values        :   {}",
            or_none(self.sensed.map(|s| s.to_string()))
        )?;
        writeln!(
            f,
            "Last Decision             :   {}",
            or_none(self.decision.map(|d| d.to_string()))
        )?;
        writeln!(
            f,
            "Last Action               :   {}",
            or_none(self.last_action.map(|a| a.to_string()))
        )?;
        write!(f, "Charge Delivered          :   {}", self.total_charge)
    }
}
