//! Headless match runner
//!
//! Pairs a terrain with two scripted policies and steps it with a fixed `dt`.
//! A new `MatchRunner` is built for every episode, so nothing carries over.

use crate::policy::{Policy, ScriptedPolicy};
use crate::settings::{CommandMode, Settings};
use crate::sim::{MatchEvent, PerTeam, TeamColor, Terrain, TickInput, TickReport, tick};

pub struct MatchRunner {
    pub terrain: Terrain,
    policies: PerTeam<ScriptedPolicy>,
    mode: CommandMode,
    dt: f32,
    ticks: u64,
}

impl MatchRunner {
    /// Fresh Division B terrain and fresh policies for `episode`
    pub fn new(settings: &Settings, episode: u32) -> Self {
        Self::with_terrain(settings, episode, Terrain::division_b())
    }

    pub fn with_terrain(settings: &Settings, episode: u32, terrain: Terrain) -> Self {
        let policies = PerTeam::new(
            settings.blue_policy.build(settings.policy_seed(episode, true)),
            settings.yellow_policy.build(settings.policy_seed(episode, false)),
        );
        log::info!(
            "Episode {}: {} mode, blue={} yellow={}",
            episode,
            settings.mode.as_str(),
            settings.blue_policy.as_str(),
            settings.yellow_policy.as_str()
        );
        Self {
            terrain,
            policies,
            mode: settings.mode,
            dt: settings.delta_time,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Collect both teams' commands, then advance one tick
    pub fn step(&mut self) -> TickReport {
        self.ticks += 1;
        match self.mode {
            CommandMode::Discrete => {
                let input = TickInput::new(
                    self.policies.blue.decide_discrete(&self.terrain, TeamColor::Blue),
                    self.policies.yellow.decide_discrete(&self.terrain, TeamColor::Yellow),
                );
                tick(&mut self.terrain, &input, self.dt)
            }
            CommandMode::Continuous => {
                let input = TickInput::new(
                    self.policies.blue.decide_continuous(&self.terrain, TeamColor::Blue, self.dt),
                    self.policies.yellow.decide_continuous(&self.terrain, TeamColor::Yellow, self.dt),
                );
                tick(&mut self.terrain, &input, self.dt)
            }
        }
    }

    /// Step `ticks` times and return the final scores
    pub fn run(&mut self, ticks: u32) -> PerTeam<u32> {
        for _ in 0..ticks {
            if let Some(MatchEvent::Goal { scorer }) = self.step().event {
                log::debug!("Tick {}: goal for {}", self.ticks, scorer.as_str());
            }
        }
        *self.terrain.scores()
    }
}
