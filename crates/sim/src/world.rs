use std::collections::BTreeMap;

use glam::Vec2;
use gridfile_common::{AgentId, Health, Rect};
use gridfile_index::{GridFile, GridStats};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::agent::Agent;
use crate::config::{SimConfig, SimError};
use crate::history::{Census, History};

/// Simulation state: the agent population and the grid file indexing it.
///
/// All mutations go through explicit operations so the index never drifts
/// from the population. Agents live in a `BTreeMap` keyed by sequential ids,
/// which together with the seeded RNG makes runs reproducible.
#[derive(Debug)]
pub struct World {
    config: SimConfig,
    domain: Rect,
    agents: BTreeMap<AgentId, Agent>,
    grid: GridFile<AgentId>,
    rng: StdRng,
    tick: u64,
    next_id: u32,
    history: History,
}

impl World {
    /// Build a world and scatter `initial_agents` healthy agents, skipping
    /// candidate positions that fall inside an obstacle.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let grid = GridFile::new(config.grid)?;
        let mut world = Self {
            domain: config.domain(),
            rng: StdRng::seed_from_u64(config.seed),
            history: History::new(config.history_len),
            agents: BTreeMap::new(),
            tick: 0,
            next_id: 0,
            grid,
            config,
        };
        for _ in 0..world.config.initial_agents {
            let candidate = Vec2::new(
                world.rng.random_range(0.0..world.domain.max.x),
                world.rng.random_range(0.0..world.domain.max.y),
            );
            if world.config.obstacles.iter().any(|o| o.contains_point(candidate)) {
                continue;
            }
            world.spawn(candidate, Health::Healthy);
        }
        tracing::debug!(agents = world.agents.len(), "world populated");
        Ok(world)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn agents(&self) -> &BTreeMap<AgentId, Agent> {
        &self.agents
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Read access to the index, e.g. for drawing directory lines.
    pub fn grid(&self) -> &GridFile<AgentId> {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Add an agent with a random velocity and index it.
    pub fn spawn(&mut self, position: Vec2, health: Health) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        let speed = self.config.max_speed;
        let velocity = Vec2::new(
            self.rng.random_range(-speed..=speed),
            self.rng.random_range(-speed..=speed),
        );
        self.agents.insert(id, Agent::new(position, velocity, health));
        self.grid.insert(id, position);
        id
    }

    /// Drop a cluster of infected agents around `center`, clamped to the domain.
    pub fn outbreak(&mut self, center: Vec2) -> Vec<AgentId> {
        let spread = self.config.outbreak_spread;
        let mut spawned = Vec::with_capacity(self.config.outbreak_size);
        for _ in 0..self.config.outbreak_size {
            let offset = Vec2::new(
                self.rng.random_range(-spread..=spread),
                self.rng.random_range(-spread..=spread),
            );
            let position = self.domain.clamp_point(center + offset);
            spawned.push(self.spawn(position, Health::Infected));
        }
        tracing::debug!(?center, count = spawned.len(), "outbreak");
        spawned
    }

    /// Remove an agent. It leaves the index before it leaves the population.
    pub fn despawn(&mut self, id: AgentId) -> Option<Agent> {
        self.grid.remove(id);
        self.agents.remove(&id)
    }

    /// Agents whose indexed position lies inside the closed rectangle.
    pub fn query(&self, rect: &Rect) -> Vec<AgentId> {
        self.grid.query_rect(rect)
    }

    pub fn census(&self) -> Census {
        let infected = self
            .agents
            .values()
            .filter(|a| a.health.is_infected())
            .count();
        Census {
            healthy: self.agents.len() - infected,
            infected,
        }
    }

    /// Advance the simulation by one tick: spread infection, move every
    /// agent, then sample the census on history ticks.
    pub fn step(&mut self) {
        let _span = tracing::info_span!("sim_step", tick = self.tick).entered();

        let newly_infected = self.spread_infection();
        self.move_agents();
        if self.tick % self.config.history_interval == 0 {
            let census = self.census();
            self.history.record(census);
        }
        self.tick += 1;

        tracing::trace!(
            newly_infected,
            agents = self.agents.len(),
            buckets = self.grid.stats().distinct_buckets,
            "step complete"
        );
    }

    /// Each agent infected at the start of the step may infect healthy
    /// agents inside the square of half side `infection_radius` around it.
    fn spread_infection(&mut self) -> usize {
        let sources: Vec<Vec2> = self
            .agents
            .values()
            .filter(|a| a.health.is_infected())
            .map(|a| a.position)
            .collect();
        let radius = self.config.infection_radius;
        let probability = self.config.infection_probability;

        let mut newly_infected = 0;
        for source in sources {
            for id in self.grid.query_rect(&Rect::around(source, radius)) {
                let Some(agent) = self.agents.get_mut(&id) else {
                    continue;
                };
                if agent.health == Health::Healthy && self.rng.random::<f64>() < probability {
                    agent.health = Health::Infected;
                    newly_infected += 1;
                }
            }
        }
        newly_infected
    }

    fn move_agents(&mut self) {
        let half = self.config.agent_half_size;
        for (id, agent) in self.agents.iter_mut() {
            let old = agent.position;
            agent.advance(&self.config.obstacles, &self.domain, half);
            self.grid.update(*id, old, agent.position);
        }
    }

    pub fn summary(&self) -> WorldSummary {
        WorldSummary {
            tick: self.tick,
            seed: self.config.seed,
            agents: self.agents.len(),
            census: self.census(),
            peak_infected: self.history.peak_infected(),
            grid: self.grid.stats(),
        }
    }
}

/// Snapshot of a world for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSummary {
    pub tick: u64,
    pub seed: u64,
    pub agents: usize,
    pub census: Census,
    pub peak_infected: usize,
    pub grid: GridStats,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} seed={} agents={} healthy={} infected={} peak_infected={} | grid: {}",
            self.tick,
            self.seed,
            self.agents,
            self.census.healthy,
            self.census.infected,
            self.peak_infected,
            self.grid
        )
    }
}
