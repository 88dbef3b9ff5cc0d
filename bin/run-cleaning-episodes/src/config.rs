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

//! Run configuration. Defaults, then environment variables, then positional
//! arguments `[MAP] [EPISODES] [TICKS]`, later sources winning.

use std::path::PathBuf;
use std::str::FromStr;

/// Errors raised while reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A value could not be parsed.
    #[error("invalid {name} {value:?}: {reason}")]
    Invalid {
        /// Variable or argument name.
        name: String,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// More positional arguments than `[MAP] [EPISODES] [TICKS]`.
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Settings for one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Floorplan to load.
    pub map_path: PathBuf,
    /// Number of episodes to run.
    pub episodes: u32,
    /// Tick ceiling per episode.
    pub max_ticks: u32,
    /// Cleaner charge at the start of every episode.
    pub initial_battery: u8,
    /// Base seed; episode `i` uses `seed + i`. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Print the agents and the grid after every tick.
    pub render: bool,
    /// Run episodes on the rayon pool. Ignored while rendering.
    pub parallel: bool,
}

impl SimulationConfig {
    fn new(
        map_path: PathBuf,
        episodes: u32,
        max_ticks: u32,
        initial_battery: u8,
        seed: Option<u64>,
        render: bool,
        parallel: bool,
    ) -> Self {
        Self {
            map_path,
            episodes,
            max_ticks,
            initial_battery,
            seed,
            render,
            parallel,
        }
    }

    /// Defaults overridden by environment variables.
    ///
    /// - `CLEANER_MAP` -- map file
    /// - `CLEANER_EPISODES` -- number of episodes
    /// - `CLEANER_MAX_TICKS` -- tick ceiling per episode
    /// - `CLEANER_INITIAL_BATTERY` -- starting charge (0-100)
    /// - `CLEANER_SEED` -- base random seed
    /// - `CLEANER_RENDER` -- `true`/`false`
    /// - `CLEANER_PARALLEL` -- `true`/`false`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`SimulationConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = lookup("CLEANER_MAP") {
            config.map_path = PathBuf::from(path);
        }
        if let Some(value) = lookup("CLEANER_EPISODES") {
            config.episodes = parse("CLEANER_EPISODES", &value)?;
        }
        if let Some(value) = lookup("CLEANER_MAX_TICKS") {
            config.max_ticks = parse("CLEANER_MAX_TICKS", &value)?;
        }
        if let Some(value) = lookup("CLEANER_INITIAL_BATTERY") {
            let battery: u8 = parse("CLEANER_INITIAL_BATTERY", &value)?;
            if battery > 100 {
                return Err(ConfigError::Invalid {
                    name: "CLEANER_INITIAL_BATTERY".to_owned(),
                    value,
                    reason: "must be at most 100".to_owned(),
                });
            }
            config.initial_battery = battery;
        }
        if let Some(value) = lookup("CLEANER_SEED") {
            config.seed = Some(parse("CLEANER_SEED", &value)?);
        }
        if let Some(value) = lookup("CLEANER_RENDER") {
            config.render = parse("CLEANER_RENDER", &value)?;
        }
        if let Some(value) = lookup("CLEANER_PARALLEL") {
            config.parallel = parse("CLEANER_PARALLEL", &value)?;
        }
        Ok(config)
    }

    /// Apply positional arguments `[MAP] [EPISODES] [TICKS]`.
    pub fn with_args<I>(mut self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        if let Some(path) = args.next() {
            self.map_path = PathBuf::from(path);
        }
        if let Some(value) = args.next() {
            self.episodes = parse("EPISODES", &value)?;
        }
        if let Some(value) = args.next() {
            self.max_ticks = parse("TICKS", &value)?;
        }
        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }
        Ok(self)
    }

    /// Whether episodes should be spread over threads.
    pub fn runs_in_parallel(&self) -> bool {
        self.parallel && !self.render
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(
            PathBuf::from("floorplans/floorplan_001.txt"),
            100,
            1000,
            100,
            None,
            true,
            false,
        )
    }
}

fn parse<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name: name.to_owned(),
        value: value.to_owned(),
        reason: e.to_string(),
    })
}
