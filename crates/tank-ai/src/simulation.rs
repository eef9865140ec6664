//! Fixed-step driver: one brain per tank, ticked against an [`Arena`].

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tank_core::{tick_brains, Brain, TickClock};
use tank_tools::{TraceLog, TRACE_LOG};

use crate::{build_behaviour, Arena, ArenaConfig, BehaviourKind, ConfigError, TankId, Transform};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankReport {
    pub id: TankId,
    pub name: String,
    pub behaviour: String,
    pub position: [f32; 3],
    pub yaw_degrees: f32,
    pub shells_fired: u32,
    pub distance_travelled: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub ticks: u64,
    pub elapsed_seconds: f64,
    pub tanks: Vec<TankReport>,
}

struct Entrant {
    id: TankId,
    name: String,
    behaviour: i32,
}

pub struct Simulation {
    arena: Arena,
    brains: Vec<Brain<Arena>>,
    entrants: Vec<Entrant>,
    clock: TickClock,
    duration_seconds: f64,
}

impl Simulation {
    /// Tanks get ids `1..=n` in spawn-list order.
    pub fn from_config(config: &ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut arena = Arena::new(config.tank);
        let mut brains = Vec::with_capacity(config.tanks.len());
        let mut entrants = Vec::with_capacity(config.tanks.len());

        for (index, spawn) in config.tanks.iter().enumerate() {
            let id = TankId::try_from(index + 1)
                .map_err(|_| ConfigError::Invalid("too many tanks".into()))?;
            let transform = Transform::from_position_yaw(
                Vec3::from_array(spawn.position),
                spawn.yaw_degrees.to_radians(),
            );
            arena.spawn(id, transform);
            brains.push(Brain::new(
                id,
                Box::new(build_behaviour::<Arena>(spawn.behaviour)),
            ));
            entrants.push(Entrant {
                id,
                name: spawn.name.clone().unwrap_or_else(|| format!("tank-{id}")),
                behaviour: spawn.behaviour,
            });
        }

        tracing::debug!(
            tanks = entrants.len(),
            dt = config.dt_seconds,
            seed = config.seed,
            "simulation created"
        );

        Ok(Self {
            arena,
            brains,
            entrants,
            clock: TickClock::new(config.dt_seconds, config.seed),
            duration_seconds: config.duration_seconds,
        })
    }

    /// Record every tank's decision trace in its blackboard.
    pub fn with_trace(mut self) -> Self {
        for brain in &mut self.brains {
            brain.blackboard.set(TRACE_LOG, TraceLog::default());
        }
        self
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    pub fn trace(&self, id: TankId) -> Option<&TraceLog> {
        self.brains
            .iter()
            .find(|brain| brain.agent == id)
            .and_then(|brain| brain.blackboard.get(TRACE_LOG))
    }

    /// Decide for every tank, then integrate the arena by one frame.
    pub fn step(&mut self) {
        let ctx = self.clock.advance();
        tick_brains(&ctx, &mut self.arena, &mut self.brains);
        self.arena.step(ctx.dt_seconds);
    }

    pub fn run(&mut self) -> SimulationReport {
        let dt = f64::from(self.clock.dt_seconds());
        let ticks = (self.duration_seconds / dt).round() as u64;
        tracing::info!(ticks, duration = self.duration_seconds, "running simulation");
        for _ in 0..ticks {
            self.step();
        }
        let report = self.report();
        for tank in &report.tanks {
            tracing::info!(
                tank = %tank.name,
                behaviour = %tank.behaviour,
                shells = tank.shells_fired,
                travelled = tank.distance_travelled,
                "tank finished"
            );
        }
        report
    }

    pub fn report(&self) -> SimulationReport {
        let tanks = self
            .entrants
            .iter()
            .filter_map(|entrant| {
                let state = self.arena.tank(entrant.id)?;
                Some(TankReport {
                    id: entrant.id,
                    name: entrant.name.clone(),
                    behaviour: behaviour_name(entrant.behaviour).to_string(),
                    position: state.transform.translation.to_array(),
                    yaw_degrees: state.transform.yaw().to_degrees(),
                    shells_fired: state.shells_fired,
                    distance_travelled: state.distance_travelled,
                })
            })
            .collect();

        SimulationReport {
            ticks: self.clock.tick(),
            elapsed_seconds: self.clock.elapsed_seconds(),
            tanks,
        }
    }
}

fn behaviour_name(index: i32) -> &'static str {
    BehaviourKind::from_index(index).map_or("Idle", BehaviourKind::name)
}
