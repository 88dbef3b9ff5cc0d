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

//! The cleaning robot: turns what it senses into facts, asks its rule engine
//! what to do, and carries the conclusion out on the grid.

use production_rules::RuleEngine;
use serde::Serialize;
use tracing::debug;

use crate::battery::Battery;
use crate::directions::DirectionSource;
use crate::glyph::Direction;
use crate::world::{GridWorld, Neighborhood, Position, WorldError};

/// Facts the cleaner can derive in one decision cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CleanerFact {
    /// Standing on debris.
    CurrentCellDirty,

    /// Battery at or below the dead threshold.
    BatteryDead,

    /// Battery above the dead threshold.
    BatteryOk,

    /// The previous action was a random reorientation, so try moving next.
    OnToGlory,

    /// The previous action was anything else, so a random turn is allowed.
    SpinToWin,

    /// Debris directly ahead.
    FrontDirty,

    /// Empty or visited cell directly ahead.
    FrontClear,

    /// Debris in this direction.
    Dirty(Direction),

    /// Wall or station in this direction. Informational.
    Blocked(Direction),

    /// Empty or visited cell in this direction.
    Clear(Direction),

    /// Nothing dirty or clear anywhere around.
    Surrounded,
}

impl std::fmt::Display for CleanerFact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanerFact::CurrentCellDirty => write!(f, "current_cell_dirty"),
            CleanerFact::BatteryDead => write!(f, "battery_dead"),
            CleanerFact::BatteryOk => write!(f, "battery_ok"),
            CleanerFact::OnToGlory => write!(f, "on_to_glory"),
            CleanerFact::SpinToWin => write!(f, "spin_to_win"),
            CleanerFact::FrontDirty => write!(f, "front_dirty"),
            CleanerFact::FrontClear => write!(f, "front_clear"),
            CleanerFact::Dirty(direction) => write!(f, "{}_dirty", direction),
            CleanerFact::Blocked(direction) => write!(f, "{}_blocked", direction),
            CleanerFact::Clear(direction) => write!(f, "{}_clear", direction),
            CleanerFact::Surrounded => write!(f, "surrounded"),
        }
    }
}

/// What the cleaner's rule engine can conclude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanerConclusion {
    /// Consume the debris underfoot.
    Clean,

    /// Battery exhausted. Stop acting.
    BatteryDead,

    /// Step one cell ahead.
    MoveForward,

    /// Turn to face a direction.
    Rotate(Direction),

    /// Turn to a freshly drawn random direction.
    RandomDirection,

    /// Step ahead blindly.
    RandomKeepSwimming,

    /// No rule matched.
    Lost,
}

impl std::fmt::Display for CleanerConclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanerConclusion::Clean => write!(f, "clean"),
            CleanerConclusion::BatteryDead => write!(f, "battery_dead"),
            CleanerConclusion::MoveForward => write!(f, "move_forward"),
            CleanerConclusion::Rotate(direction) => write!(f, "rotate_{}", direction),
            CleanerConclusion::RandomDirection => write!(f, "random_direction"),
            CleanerConclusion::RandomKeepSwimming => write!(f, "random_keep_swimming"),
            CleanerConclusion::Lost => write!(f, "lost"),
        }
    }
}

/// What the cleaner actually did with its last conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanerAction {
    /// Consumed debris.
    Cleaned,

    /// Moved one cell.
    Moved,

    /// Tried to move into a wall or the station.
    Crashed,

    /// Turned towards a chosen direction.
    Rotated,

    /// Turned towards a random direction.
    RandomDirection(Direction),

    /// Stopped for good on a dead battery.
    Halted,

    /// Did nothing because no rule matched.
    Lost,
}

impl std::fmt::Display for CleanerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanerAction::Cleaned => write!(f, "cleaned"),
            CleanerAction::Moved => write!(f, "moved"),
            CleanerAction::Crashed => write!(f, "crashed"),
            CleanerAction::Rotated => write!(f, "rotated"),
            CleanerAction::RandomDirection(direction) => {
                write!(f, "random_direction ({})", direction)
            }
            CleanerAction::Halted => write!(f, "halted"),
            CleanerAction::Lost => write!(f, "lost"),
        }
    }
}

/// The cleaner's fixed rule table, highest priority first.
pub fn cleaner_rules() -> RuleEngine<CleanerFact, CleanerConclusion> {
    use CleanerConclusion as C;
    use CleanerFact as F;

    let mut engine = RuleEngine::new(C::Lost);
    engine.add_rule([F::CurrentCellDirty], C::Clean);
    engine.add_rule([F::BatteryDead], C::BatteryDead);

    // dirt first
    engine.add_rule([F::FrontDirty, F::BatteryOk], C::MoveForward);
    for direction in Direction::ALL {
        engine.add_rule([F::Dirty(direction), F::BatteryOk], C::Rotate(direction));
    }

    // then anywhere clear
    engine.add_rule([F::FrontClear, F::BatteryOk], C::MoveForward);
    for direction in Direction::ALL {
        engine.add_rule([F::Clear(direction), F::BatteryOk], C::Rotate(direction));
    }

    engine.add_rule(
        [F::Surrounded, F::SpinToWin, F::BatteryOk],
        C::RandomDirection,
    );
    engine.add_rule(
        [F::Surrounded, F::OnToGlory, F::BatteryOk],
        C::RandomKeepSwimming,
    );
    engine
}

/// Assert the cleaner's facts for one cycle into `engine`.
///
/// `order` is the tie-break ordering of directions: the first dirty neighbor
/// and the first clear neighbor in this order are the only ones asserted.
pub fn derive_cleaner_facts(
    engine: &mut RuleEngine<CleanerFact, CleanerConclusion>,
    sensed: &Neighborhood,
    orientation: Direction,
    battery: Battery,
    last_action: Option<CleanerAction>,
    order: [Direction; 4],
) {
    if sensed.here.is_debris() {
        engine.assert_fact(CleanerFact::CurrentCellDirty);
    }

    if battery.is_dead() {
        engine.assert_fact(CleanerFact::BatteryDead);
    } else {
        engine.assert_fact(CleanerFact::BatteryOk);
    }

    if matches!(last_action, Some(CleanerAction::RandomDirection(_))) {
        engine.assert_fact(CleanerFact::OnToGlory);
    } else {
        engine.assert_fact(CleanerFact::SpinToWin);
    }

    let mut found_way = false;

    let ahead = sensed.toward(orientation);
    if ahead.is_debris() {
        engine.assert_fact(CleanerFact::FrontDirty);
        found_way = true;
    } else if ahead.is_clear() {
        engine.assert_fact(CleanerFact::FrontClear);
        found_way = true;
    }

    for direction in order {
        let glyph = sensed.toward(direction);
        if glyph.is_debris() {
            engine.assert_fact(CleanerFact::Dirty(direction));
            found_way = true;
            break;
        } else if glyph.is_impassable() {
            engine.assert_fact(CleanerFact::Blocked(direction));
        }
    }

    if let Some(direction) = order
        .into_iter()
        .find(|direction| sensed.toward(*direction).is_clear())
    {
        engine.assert_fact(CleanerFact::Clear(direction));
        found_way = true;
    }

    if !found_way {
        engine.assert_fact(CleanerFact::Surrounded);
    }
}

/// The cleaning robot.
#[derive(Debug, Clone)]
pub struct CleanerAgent {
    engine: RuleEngine<CleanerFact, CleanerConclusion>,
    position: Position,
    orientation: Direction,
    battery: Battery,
    sensed: Option<Neighborhood>,
    current: Option<Neighborhood>,
    decision: Option<CleanerConclusion>,
    last_action: Option<CleanerAction>,
    actions_taken: u32,
    cells_cleaned: u32,
    crashes: u32,
    halted: bool,
}

impl CleanerAgent {
    /// New cleaner at `position` facing `orientation`.
    pub fn new(position: Position, orientation: Direction, battery: Battery) -> Self {
        Self {
            engine: cleaner_rules(),
            position,
            orientation,
            battery,
            sensed: None,
            current: None,
            decision: None,
            last_action: None,
            actions_taken: 0,
            cells_cleaned: 0,
            crashes: 0,
            halted: false,
        }
    }

    /// New cleaner wherever `world` says the cleaner starts.
    pub fn from_world(world: &GridWorld, battery: Battery) -> Self {
        Self::new(world.cleaner_position(), world.cleaner_orientation(), battery)
    }

    /// Current cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current heading.
    pub fn orientation(&self) -> Direction {
        self.orientation
    }

    /// Current charge.
    pub fn battery(&self) -> Battery {
        self.battery
    }

    /// Mutable access for the station to top the battery up.
    pub fn battery_mut(&mut self) -> &mut Battery {
        &mut self.battery
    }

    /// Surroundings sensed at the start of the last cycle.
    pub fn last_sensed(&self) -> Option<Neighborhood> {
        self.sensed
    }

    /// Conclusion of the last cycle.
    pub fn last_decision(&self) -> Option<CleanerConclusion> {
        self.decision
    }

    /// What the last cycle actually did.
    pub fn last_action(&self) -> Option<CleanerAction> {
        self.last_action
    }

    /// Actions completed so far, crashes included.
    pub fn actions_taken(&self) -> u32 {
        self.actions_taken
    }

    /// Debris cells consumed.
    pub fn cells_cleaned(&self) -> u32 {
        self.cells_cleaned
    }

    /// Moves that hit a wall or the station.
    pub fn crashes(&self) -> u32 {
        self.crashes
    }

    /// Concluded on its last cycle that its battery is dead. Cleared as soon as
    /// a charged battery lets it act again.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Still able to act: the battery is not empty.
    pub fn is_operational(&self) -> bool {
        !self.battery.is_empty()
    }

    /// Facts asserted during the last decision.
    pub fn facts(&self) -> Vec<CleanerFact> {
        let mut facts: Vec<CleanerFact> = self.engine.facts().iter().copied().collect();
        facts.sort();
        facts
    }

    /// Read the cleaner's surroundings from `world`.
    pub fn sense(&mut self, world: &GridWorld) -> Result<Neighborhood, WorldError> {
        let sensed = world.sense(self.position)?;
        self.sensed = Some(sensed);
        Ok(sensed)
    }

    /// Rebuild the facts from `sensed` and return the engine's conclusion.
    pub fn decide<S>(&mut self, sensed: &Neighborhood, directions: &mut S) -> CleanerConclusion
    where
        S: DirectionSource + ?Sized,
    {
        self.engine.reset_facts();
        derive_cleaner_facts(
            &mut self.engine,
            sensed,
            self.orientation,
            self.battery,
            self.last_action,
            directions.shuffled(),
        );
        let conclusion = self.engine.decide();
        debug!(
            position = %self.position,
            facts = %join_tokens(&self.facts()),
            rule = ?self.engine.fired_rule(),
            %conclusion,
            "cleaner decided"
        );
        self.decision = Some(conclusion);
        conclusion
    }

    /// One full sense, decide, act cycle.
    ///
    /// Returns `None` without touching anything when the cleaner is no longer
    /// operational. Every completed action drains one unit of battery, crashes
    /// included. The dead-battery conclusion does nothing for the tick: no
    /// drain and no grid change. A station top-up lets the next cycle go on.
    pub fn act<S>(
        &mut self,
        world: &mut GridWorld,
        directions: &mut S,
    ) -> Result<Option<CleanerConclusion>, WorldError>
    where
        S: DirectionSource + ?Sized,
    {
        if !self.is_operational() {
            return Ok(None);
        }

        let sensed = self.sense(world)?;
        self.halted = false;
        let conclusion = self.decide(&sensed, directions);

        let action = match conclusion {
            CleanerConclusion::Clean => {
                world.mark_clean(self.position)?;
                self.cells_cleaned += 1;
                CleanerAction::Cleaned
            }
            CleanerConclusion::BatteryDead => {
                self.halted = true;
                self.current = None;
                self.last_action = Some(CleanerAction::Halted);
                debug!(battery = %self.battery, "cleaner halted");
                return Ok(Some(conclusion));
            }
            CleanerConclusion::MoveForward | CleanerConclusion::RandomKeepSwimming => {
                self.move_forward(world)?
            }
            CleanerConclusion::Rotate(direction) => {
                self.rotate(world, direction)?;
                CleanerAction::Rotated
            }
            CleanerConclusion::RandomDirection => {
                // the conclusion only says "go random"; the heading is drawn here.
                let direction = directions.shuffled()[0];
                self.rotate(world, direction)?;
                CleanerAction::RandomDirection(direction)
            }
            CleanerConclusion::Lost => CleanerAction::Lost,
        };

        self.last_action = Some(action);
        self.actions_taken += 1;
        self.battery.drain(1);
        // a cleaner parked on the edge of an unbordered map has no full view.
        self.current = world.sense(self.position).ok();
        Ok(Some(conclusion))
    }

    fn move_forward(&mut self, world: &mut GridWorld) -> Result<CleanerAction, WorldError> {
        let destination = self.position.step(self.orientation);
        let reached = world.attempt_move(destination, self.orientation)?;
        if reached == destination {
            self.position = reached;
            Ok(CleanerAction::Moved)
        } else {
            self.crashes += 1;
            Ok(CleanerAction::Crashed)
        }
    }

    fn rotate(&mut self, world: &mut GridWorld, direction: Direction) -> Result<(), WorldError> {
        world.rotate_in_place(self.position, direction)?;
        self.orientation = direction;
        Ok(())
    }
}

fn join_tokens<T: std::fmt::Display>(tokens: &[T]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn or_none<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_owned(), |v| v.to_string())
}

// multi-line report, one field per line.
impl std::fmt::Display for CleanerAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "        -- Robot Data --")?;
        writeln!(f, "Position                  :   {}", self.position)?;
        writeln!(f, "Facing                    :   {}", self.orientation)?;
        if self.halted {
            writeln!(f, "Current Sensor Values     :   Connection Lost")?;
        } else {
            writeln!(f, "Current Sensor Values     :   {}", or_none(self.current))?;
        }
        writeln!(f, "Last Sensor Values        :   {}", or_none(self.sensed))?;
        writeln!(f, "Last Facts                :   {}", join_tokens(&self.facts()))?;
        writeln!(f, "Last Decision             :   {}", or_none(self.decision))?;
        writeln!(f, "Last Action               :   {}", or_none(self.last_action))?;
        writeln!(f, "Battery                   :   {}", self.battery)?;
        writeln!(f, "Cells Cleaned             :   {}", self.cells_cleaned)?;
        writeln!(f, "Crashes                   :   {}", self.crashes)?;
        write!(f, "Total Moves               :   {}", self.actions_taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::FixedDirections;
    use crate::glyph::{Glyph, VISITED};
    use crate::glyph::Direction::*;

    fn engine_for(
        sensed: &Neighborhood,
        orientation: Direction,
        battery: u8,
        last_action: Option<CleanerAction>,
        order: [Direction; 4],
    ) -> RuleEngine<CleanerFact, CleanerConclusion> {
        let mut engine = cleaner_rules();
        derive_cleaner_facts(
            &mut engine,
            sensed,
            orientation,
            Battery::new(battery),
            last_action,
            order,
        );
        engine
    }

    fn neighborhood(symbols: [char; 5]) -> Neighborhood {
        Neighborhood {
            north: Glyph::from(symbols[0]),
            east: Glyph::from(symbols[1]),
            south: Glyph::from(symbols[2]),
            west: Glyph::from(symbols[3]),
            here: Glyph::from(symbols[4]),
        }
    }

    #[test]
    fn test_front_dirty_moves_forward() {
        let sensed = neighborhood(['#', ' ', ' ', ' ', ' ']);
        let engine = engine_for(&sensed, North, 100, None, Direction::ALL);
        assert!(engine.is_fact(&CleanerFact::FrontDirty));
        assert!(engine.is_fact(&CleanerFact::BatteryOk));
        assert!(engine.is_fact(&CleanerFact::SpinToWin));
        assert!(engine.is_fact(&CleanerFact::Dirty(North)));
        assert_eq!(engine.decide(), CleanerConclusion::MoveForward);
    }

    #[test]
    fn test_dirty_here_cleans_first() {
        let sensed = neighborhood(['#', ' ', ' ', ' ', '*']);
        let engine = engine_for(&sensed, North, 1, None, Direction::ALL);
        assert!(engine.is_fact(&CleanerFact::CurrentCellDirty));
        assert_eq!(engine.decide(), CleanerConclusion::Clean);
    }

    #[test]
    fn test_dead_battery_beats_movement() {
        let sensed = neighborhood(['#', ' ', ' ', ' ', ' ']);
        let engine = engine_for(&sensed, North, 1, None, Direction::ALL);
        assert!(engine.is_fact(&CleanerFact::BatteryDead));
        assert!(!engine.is_fact(&CleanerFact::BatteryOk));
        assert_eq!(engine.decide(), CleanerConclusion::BatteryDead);
    }

    #[test]
    fn test_dirty_neighbor_beats_clear_front() {
        let sensed = neighborhood([' ', '#', ' ', ' ', '0']);
        let engine = engine_for(&sensed, North, 50, None, Direction::ALL);
        assert!(engine.is_fact(&CleanerFact::FrontClear));
        assert_eq!(engine.decide(), CleanerConclusion::Rotate(East));
    }

    #[test]
    fn test_shuffled_order_breaks_ties() {
        // wall ahead, debris both east and west.
        let sensed = neighborhood(['x', '#', ' ', '%', ' ']);

        let engine = engine_for(&sensed, North, 50, None, [West, North, East, South]);
        assert!(engine.is_fact(&CleanerFact::Dirty(West)));
        assert!(!engine.is_fact(&CleanerFact::Dirty(East)));
        assert_eq!(engine.decide(), CleanerConclusion::Rotate(West));

        let engine = engine_for(&sensed, North, 50, None, [North, East, West, South]);
        assert!(engine.is_fact(&CleanerFact::Blocked(North)));
        assert!(engine.is_fact(&CleanerFact::Dirty(East)));
        assert!(!engine.is_fact(&CleanerFact::Dirty(West)));
        assert_eq!(engine.decide(), CleanerConclusion::Rotate(East));
    }

    #[test]
    fn test_first_clear_direction_only() {
        let sensed = neighborhood(['x', '3', 'u', ' ', ' ']);
        let engine = engine_for(&sensed, North, 50, None, [South, West, East, North]);
        assert!(engine.is_fact(&CleanerFact::Blocked(South)));
        assert!(engine.is_fact(&CleanerFact::Clear(West)));
        assert!(!engine.is_fact(&CleanerFact::Clear(East)));
        assert_eq!(engine.decide(), CleanerConclusion::Rotate(West));
    }

    #[test]
    fn test_surrounded_alternates() {
        let sensed = neighborhood(['x', 'x', 'u', 'x', ' ']);
        let engine = engine_for(&sensed, North, 50, None, Direction::ALL);
        assert!(engine.is_fact(&CleanerFact::Surrounded));
        assert_eq!(engine.decide(), CleanerConclusion::RandomDirection);

        let engine = engine_for(
            &sensed,
            North,
            50,
            Some(CleanerAction::RandomDirection(East)),
            Direction::ALL,
        );
        assert!(engine.is_fact(&CleanerFact::OnToGlory));
        assert_eq!(engine.decide(), CleanerConclusion::RandomKeepSwimming);
    }

    #[test]
    fn test_fact_tokens() {
        assert_eq!(CleanerFact::Dirty(North).to_string(), "north_dirty");
        assert_eq!(CleanerFact::Blocked(West).to_string(), "west_blocked");
        assert_eq!(CleanerConclusion::Rotate(South).to_string(), "rotate_south");
        assert_eq!(CleanerConclusion::Lost.to_string(), "lost");
    }

    const SCENARIO: &str = "\
xxxxx
x # x
x ^ x
x   x
xxxxu
";

    #[test]
    fn test_scenario_move_onto_debris_then_clean() {
        let mut world: GridWorld = SCENARIO.parse().expect("map should parse");
        let mut cleaner = CleanerAgent::from_world(&world, Battery::full());
        let mut directions = FixedDirections::canonical();

        let conclusion = cleaner.act(&mut world, &mut directions).expect("act failed");
        assert_eq!(conclusion, Some(CleanerConclusion::MoveForward));
        assert_eq!(cleaner.last_action(), Some(CleanerAction::Moved));
        assert_eq!(cleaner.position(), Position::new(2, 1));
        assert_eq!(world.cleaner_position(), Position::new(2, 1));
        assert_eq!(world.get(Position::new(2, 2)).map(|c| c.display), Some(VISITED));
        assert_eq!(cleaner.battery().level(), 99);

        let conclusion = cleaner.act(&mut world, &mut directions).expect("act failed");
        assert_eq!(conclusion, Some(CleanerConclusion::Clean));
        assert_eq!(world.occupied_terrain(), VISITED);
        assert_eq!(
            world.get(Position::new(2, 1)).map(|c| c.display),
            Some(Glyph::Cleaner(North))
        );
        assert_eq!(cleaner.cells_cleaned(), 1);
        assert_eq!(cleaner.battery().level(), 98);
    }

    #[test]
    fn test_scenario_walled_in() {
        let mut world: GridWorld = "xxxxx\nxxxxx\nxx>xx\nxxxxx\nxxxxu"
            .parse()
            .expect("map should parse");
        let mut cleaner = CleanerAgent::from_world(&world, Battery::full());
        let start = cleaner.position();
        // fact derivation uses the first order, the random heading the second.
        let mut directions =
            FixedDirections::new(vec![Direction::ALL, [South, North, East, West]]);

        let conclusion = cleaner.act(&mut world, &mut directions).expect("act failed");
        assert_eq!(conclusion, Some(CleanerConclusion::RandomDirection));
        assert!(cleaner.facts().contains(&CleanerFact::Surrounded));
        assert!(cleaner.facts().contains(&CleanerFact::SpinToWin));
        assert_eq!(cleaner.last_action(), Some(CleanerAction::RandomDirection(South)));
        assert_eq!(cleaner.orientation(), South);
        assert_eq!(world.cleaner_orientation(), South);
        assert_eq!(cleaner.position(), start);

        let conclusion = cleaner.act(&mut world, &mut directions).expect("act failed");
        assert_eq!(conclusion, Some(CleanerConclusion::RandomKeepSwimming));
        assert_eq!(cleaner.last_action(), Some(CleanerAction::Crashed));
        assert_eq!(cleaner.position(), start);
        assert_eq!(cleaner.crashes(), 1);
        assert_eq!(cleaner.battery().level(), 98);
    }

    #[test]
    fn test_scenario_dead_battery() {
        let mut world: GridWorld = SCENARIO.parse().expect("map should parse");
        let mut cleaner = CleanerAgent::from_world(&world, Battery::new(1));
        let mut directions = FixedDirections::canonical();
        let before = world.clone();

        let conclusion = cleaner.act(&mut world, &mut directions).expect("act failed");
        assert_eq!(conclusion, Some(CleanerConclusion::BatteryDead));
        assert_eq!(world, before);
        assert_eq!(cleaner.battery().level(), 1);
        assert!(cleaner.is_halted());
        assert!(cleaner.is_operational());
        assert_eq!(cleaner.actions_taken(), 0);
        assert!(cleaner.to_string().contains("Connection Lost"));

        // still dead next cycle, still nothing drained.
        let conclusion = cleaner.act(&mut world, &mut directions).expect("act failed");
        assert_eq!(conclusion, Some(CleanerConclusion::BatteryDead));
        assert_eq!(cleaner.battery().level(), 1);
    }

    #[test]
    fn test_recharged_cleaner_resumes() {
        let mut world: GridWorld = SCENARIO.parse().expect("map should parse");
        let mut cleaner = CleanerAgent::from_world(&world, Battery::new(1));
        let mut directions = FixedDirections::canonical();

        let conclusion = cleaner.act(&mut world, &mut directions).expect("act failed");
        assert_eq!(conclusion, Some(CleanerConclusion::BatteryDead));
        assert!(cleaner.is_halted());

        cleaner.battery_mut().charge();
        let conclusion = cleaner.act(&mut world, &mut directions).expect("act failed");
        assert_eq!(conclusion, Some(CleanerConclusion::MoveForward));
        assert!(!cleaner.is_halted());
        assert_eq!(cleaner.battery().level(), 5);
        assert!(!cleaner.to_string().contains("Connection Lost"));
    }

    #[test]
    fn test_report_shows_current_sensor_values() {
        let mut world: GridWorld = SCENARIO.parse().expect("map should parse");
        let mut cleaner = CleanerAgent::from_world(&world, Battery::full());
        let mut directions = FixedDirections::canonical();
        assert!(cleaner
            .to_string()
            .contains("Current Sensor Values     :   None"));

        cleaner.act(&mut world, &mut directions).expect("act failed");
        let current = world.sense(cleaner.position()).expect("sense failed");
        assert!(cleaner
            .to_string()
            .contains(&format!("Current Sensor Values     :   {}", current)));
    }

    #[test]
    fn test_empty_battery_does_nothing() {
        let mut world: GridWorld = SCENARIO.parse().expect("map should parse");
        let mut cleaner = CleanerAgent::from_world(&world, Battery::new(0));
        let mut directions = FixedDirections::canonical();
        assert_eq!(cleaner.act(&mut world, &mut directions), Ok(None));
        assert_eq!(cleaner.last_decision(), None);
    }

    #[test]
    fn test_report_lists_fields() {
        let cleaner = CleanerAgent::new(Position::new(1, 2), East, Battery::full());
        let report = cleaner.to_string();
        assert!(report.contains("Position                  :   (1, 2)"));
        assert!(report.contains("Facing                    :   east"));
        assert!(report.contains("Battery                   :   100%"));
        assert!(report.contains("Last Decision             :   None"));
    }
}
