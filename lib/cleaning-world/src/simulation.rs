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

//! Ticks and episodes.

use serde::Serialize;
use tracing::info;

use crate::battery::Battery;
use crate::cleaner::{CleanerAction, CleanerAgent, CleanerConclusion};
use crate::directions::DirectionSource;
use crate::station::{StationAction, StationAgent, StationConclusion};
use crate::world::{GridWorld, WorldError};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: u32,

    /// Cleaner's conclusion, `None` if it was no longer operational.
    pub cleaner_decision: Option<CleanerConclusion>,

    /// Cleaner's last action after the tick.
    pub cleaner_action: Option<CleanerAction>,

    /// Station's conclusion.
    pub station_decision: StationConclusion,

    /// Station's last action after the tick.
    pub station_action: Option<StationAction>,

    /// Cleaner battery after both agents acted.
    pub battery: u8,
}

/// Advance the world by one tick.
///
/// The cleaner runs its whole cycle first, then the station. The station
/// therefore always senses the cleaner where it ended up this tick.
pub fn step<S>(
    tick: u32,
    world: &mut GridWorld,
    cleaner: &mut CleanerAgent,
    station: &mut StationAgent,
    directions: &mut S,
) -> Result<TickReport, WorldError>
where
    S: DirectionSource + ?Sized,
{
    let cleaner_decision = cleaner.act(world, directions)?;
    let station_decision = station.act(world, cleaner.battery_mut())?;
    Ok(TickReport {
        tick,
        cleaner_decision,
        cleaner_action: cleaner.last_action(),
        station_decision,
        station_action: station.last_action(),
        battery: cleaner.battery().level(),
    })
}

/// Why an episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The battery reached zero.
    BatteryDepleted,

    /// The cleaner concluded its battery was dead and the station did not
    /// charge it in the same tick.
    Halted,

    /// The tick ceiling was reached.
    TickLimit,
}

/// Totals for one finished episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpisodeSummary {
    /// Ticks run.
    pub ticks: u32,

    /// Why it stopped.
    pub end: EndReason,

    /// Battery left.
    pub battery: u8,

    /// Actions the cleaner completed.
    pub actions_taken: u32,

    /// Cells the cleaner cleaned.
    pub cells_cleaned: u32,

    /// Moves that hit a wall or the station.
    pub crashes: u32,

    /// Debris still on the grid.
    pub debris_remaining: usize,

    /// Cells drawn with a visited marker.
    pub visited_cells: usize,

    /// Battery units the station delivered.
    pub total_charge: u32,
}

/// One run of a cleaner and its station over a world, until the cleaner stops
/// or the tick ceiling is hit.
///
/// The episode owns the world and both agents, so nothing else can touch the
/// grid between the two halves of a tick.
#[derive(Debug, Clone)]
pub struct Episode {
    world: GridWorld,
    cleaner: CleanerAgent,
    station: StationAgent,
    max_ticks: u32,
    ticks: u32,
}

impl Episode {
    /// Fresh episode over `world` with the cleaner starting at `battery`.
    pub fn new(world: GridWorld, battery: Battery, max_ticks: u32) -> Self {
        let cleaner = CleanerAgent::from_world(&world, battery);
        let station = StationAgent::from_world(&world);
        Self {
            world,
            cleaner,
            station,
            max_ticks,
            ticks: 0,
        }
    }

    /// The grid as it stands.
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// The cleaning robot.
    pub fn cleaner(&self) -> &CleanerAgent {
        &self.cleaner
    }

    /// The charging station.
    pub fn station(&self) -> &StationAgent {
        &self.station
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Why the episode is over, or `None` if it can keep going.
    pub fn end_reason(&self) -> Option<EndReason> {
        let recharged = matches!(self.station.last_action(), Some(StationAction::Charged(_)));
        if self.cleaner.is_halted() && !recharged {
            Some(EndReason::Halted)
        } else if self.cleaner.battery().is_empty() {
            Some(EndReason::BatteryDepleted)
        } else if self.ticks >= self.max_ticks {
            Some(EndReason::TickLimit)
        } else {
            None
        }
    }

    /// Run one tick, or return `None` if the episode is already over.
    pub fn step<S>(&mut self, directions: &mut S) -> Result<Option<TickReport>, WorldError>
    where
        S: DirectionSource + ?Sized,
    {
        if self.end_reason().is_some() {
            return Ok(None);
        }
        self.ticks += 1;
        step(
            self.ticks,
            &mut self.world,
            &mut self.cleaner,
            &mut self.station,
            directions,
        )
        .map(Some)
    }

    /// Run until the episode is over. `on_tick` sees the episode after every
    /// tick.
    pub fn run<S, F>(
        &mut self,
        directions: &mut S,
        mut on_tick: F,
    ) -> Result<EpisodeSummary, WorldError>
    where
        S: DirectionSource + ?Sized,
        F: FnMut(&Episode, &TickReport),
    {
        while let Some(report) = self.step(directions)? {
            on_tick(self, &report);
        }
        let summary = self.summary();
        info!(
            ticks = summary.ticks,
            end = ?summary.end,
            battery = summary.battery,
            cells_cleaned = summary.cells_cleaned,
            crashes = summary.crashes,
            debris_remaining = summary.debris_remaining,
            "episode finished"
        );
        Ok(summary)
    }

    /// Totals so far. `end` is `TickLimit` while the episode is still running.
    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            ticks: self.ticks,
            end: self.end_reason().unwrap_or(EndReason::TickLimit),
            battery: self.cleaner.battery().level(),
            actions_taken: self.cleaner.actions_taken(),
            cells_cleaned: self.cleaner.cells_cleaned(),
            crashes: self.cleaner.crashes(),
            debris_remaining: self.world.debris_remaining(),
            visited_cells: self.world.visited_cells(),
            total_charge: self.station.total_charge(),
        }
    }
}

impl std::fmt::Display for Episode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.cleaner)?;
        writeln!(f)?;
        writeln!(f, "{}", self.station)?;
        writeln!(f)?;
        write!(f, "{}", self.world)
    }
}
