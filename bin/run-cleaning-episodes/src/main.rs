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

//! Run a cleaning robot and its charging station over a floorplan, many times.
//!
//! Usage: `run-cleaning-episodes [MAP] [EPISODES] [TICKS]`. See `config.rs` for the
//! environment variables. One JSON summary line per episode goes to stdout; logs go to stderr.

mod config;

use anyhow::Context;
use cleaning_world::{Battery, Episode, EpisodeSummary, GridWorld, RandomDirections};
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::SimulationConfig;

#[derive(Debug, Serialize)]
struct EpisodeRecord<'a> {
    episode: u32,
    seed: Option<u64>,
    #[serde(flatten)]
    summary: &'a EpisodeSummary,
}

fn episode_seed(config: &SimulationConfig, episode: u32) -> Option<u64> {
    config
        .seed
        .map(|seed| seed.wrapping_add(u64::from(episode)))
}

fn run_episode(
    config: &SimulationConfig,
    layout: &GridWorld,
    episode: u32,
) -> anyhow::Result<EpisodeSummary> {
    let rng = match episode_seed(config, episode) {
        Some(seed) => rand_pcg::Pcg64::seed_from_u64(seed),
        None => rand_pcg::Pcg64::from_entropy(),
    };
    let mut directions = RandomDirections::new(rng);
    let mut simulation = Episode::new(
        layout.clone(),
        Battery::new(config.initial_battery),
        config.max_ticks,
    );

    let render = config.render;
    let summary = simulation
        .run(&mut directions, |state, report| {
            if render {
                println!();
                println!("tick {}", report.tick);
                println!("{}", state);
            }
        })
        .with_context(|| format!("episode {} failed", episode))?;
    Ok(summary)
}

fn print_record(
    config: &SimulationConfig,
    episode: u32,
    summary: &EpisodeSummary,
) -> anyhow::Result<()> {
    let record = EpisodeRecord {
        episode,
        seed: episode_seed(config, episode),
        summary,
    };
    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = SimulationConfig::from_env()?.with_args(std::env::args().skip(1))?;
    info!(
        map = %config.map_path.display(),
        episodes = config.episodes,
        max_ticks = config.max_ticks,
        initial_battery = config.initial_battery,
        seed = ?config.seed,
        render = config.render,
        parallel = config.runs_in_parallel(),
        "configuration loaded"
    );

    let layout = GridWorld::load(&config.map_path)
        .with_context(|| format!("failed to load map {}", config.map_path.display()))?;
    info!(
        width = layout.width(),
        height = layout.height(),
        debris = layout.debris_remaining(),
        "map loaded"
    );

    let summaries: Vec<EpisodeSummary> = if config.runs_in_parallel() {
        let summaries = (0..config.episodes)
            .into_par_iter()
            .map(|episode| run_episode(&config, &layout, episode))
            .collect::<anyhow::Result<Vec<_>>>()?;
        for (episode, summary) in (0..config.episodes).zip(&summaries) {
            print_record(&config, episode, summary)?;
        }
        summaries
    } else {
        let mut summaries = Vec::with_capacity(config.episodes as usize);
        for episode in 0..config.episodes {
            let summary = run_episode(&config, &layout, episode)?;
            print_record(&config, episode, &summary)?;
            summaries.push(summary);
        }
        summaries
    };

    if !summaries.is_empty() {
        let count = summaries.len() as f64;
        let mean = |f: fn(&EpisodeSummary) -> f64| summaries.iter().map(f).sum::<f64>() / count;
        info!(
            episodes = summaries.len(),
            mean_ticks = mean(|s| f64::from(s.ticks)),
            mean_cells_cleaned = mean(|s| f64::from(s.cells_cleaned)),
            mean_crashes = mean(|s| f64::from(s.crashes)),
            mean_debris_remaining = mean(|s| s.debris_remaining as f64),
            "all episodes finished"
        );
    }

    Ok(())
}
