//! Game simulation - the main tick loop.
//!
//! Each tick runs the frame update of every character once, then as many
//! fixed physics steps as the accumulated frame time allows. Characters are
//! kept in id order so two simulations fed the same inputs stay identical.

use std::collections::BTreeMap;
use std::sync::Arc;

use glam::Vec3;
use sandstep_physics::{CharacterController, ConfigError, EyeAngles, MovementConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::AnimationRecorder;
use crate::character::{Character, CharacterBuilder, SpawnError, WorldContext};
use crate::input::{IntentSnapshot, PlayerInput};
use crate::level::{Level, SpawnPoint};
use crate::replication::{Authority, CharacterSnapshot, ReplicationError};
use crate::EntityId;

/// A character as the simulation stores it.
pub type SimCharacter = Character<CharacterController, AnimationRecorder>;

/// Errors loading a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum SimulationConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rates must be positive (frame_rate={frame_rate}, fixed_rate={fixed_rate})")]
    InvalidRate { frame_rate: u32, fixed_rate: u32 },

    #[error("invalid movement config: {0}")]
    Movement(#[from] ConfigError),
}

/// Game simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frame updates per second.
    pub frame_rate: u32,

    /// Fixed physics steps per second.
    pub fixed_rate: u32,

    /// Movement physics configuration.
    pub movement: MovementConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            fixed_rate: 60,
            movement: MovementConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SimulationConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimulationConfigError> {
        if self.frame_rate == 0 || self.fixed_rate == 0 {
            return Err(SimulationConfigError::InvalidRate {
                frame_rate: self.frame_rate,
                fixed_rate: self.fixed_rate,
            });
        }
        self.movement.validate()?;
        Ok(())
    }

    /// Seconds per frame update.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Seconds per fixed step.
    pub fn fixed_delta(&self) -> f32 {
        1.0 / self.fixed_rate as f32
    }
}

/// The main game simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Frames ticked so far. Also the sequence number of outgoing snapshots.
    pub frame: u64,

    /// Fixed physics steps run so far.
    pub fixed_steps: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    characters: BTreeMap<EntityId, SimCharacter>,
    intents: BTreeMap<EntityId, IntentSnapshot>,
    fixed_accumulator: f32,
    next_entity_id: EntityId,
}

impl Simulation {
    pub fn new(config: SimulationConfig, level: Level) -> Self {
        Self {
            frame: 0,
            fixed_steps: 0,
            config,
            level,
            characters: BTreeMap::new(),
            intents: BTreeMap::new(),
            fixed_accumulator: 0.0,
            next_entity_id: 1,
        }
    }

    /// Default configuration in the test arena.
    pub fn test() -> Self {
        Self::new(SimulationConfig::default(), Level::test_arena())
    }

    /// World inputs for one fixed step.
    pub fn world_context(&self) -> WorldContext {
        WorldContext {
            gravity: self.config.movement.gravity,
            delta_time: self.config.fixed_delta(),
        }
    }

    /// Spawn a character at the next spawn point.
    ///
    /// Ids are assigned in order from 1, so peers that spawn in the same
    /// order agree on them.
    pub fn spawn(&mut self, authority: Authority) -> Result<EntityId, SpawnError> {
        let spawn = self.level.spawn_point(self.characters.len()).unwrap_or(SpawnPoint {
            position: Vec3::ZERO,
            facing: 0.0,
        });

        let mut controller = CharacterController::new(Arc::clone(&self.level.collision), self.config.movement.clone());
        controller.spawn_at(spawn.position);

        let character = CharacterBuilder::new(authority)
            .collider(controller)
            .animation(AnimationRecorder::default())
            .config(self.config.movement.clone())
            .eye_angles(EyeAngles::new(0.0, spawn.facing, 0.0))
            .build()?;

        let id = self.next_entity_id;
        self.next_entity_id += 1;
        self.characters.insert(id, character);

        log::info!("spawned {:?} character {} at {:?}", authority, id, spawn.position);
        Ok(id)
    }

    /// Remove a character. Returns whether it existed.
    pub fn remove(&mut self, id: EntityId) -> bool {
        self.intents.remove(&id);
        self.characters.remove(&id).is_some()
    }

    pub fn character(&self, id: EntityId) -> Option<&SimCharacter> {
        self.characters.get(&id)
    }

    pub fn character_mut(&mut self, id: EntityId) -> Option<&mut SimCharacter> {
        self.characters.get_mut(&id)
    }

    /// All characters in id order.
    pub fn characters(&self) -> impl Iterator<Item = (EntityId, &SimCharacter)> {
        self.characters.iter().map(|(&id, character)| (id, character))
    }

    /// Advance the simulation by one frame.
    ///
    /// Characters without an entry in `inputs` hold no buttons this frame.
    pub fn tick(&mut self, inputs: &BTreeMap<EntityId, PlayerInput>) {
        let frame_delta = self.config.frame_delta();
        let world = self.world_context();

        for (&id, character) in self.characters.iter_mut() {
            let input = inputs.get(&id).copied().unwrap_or_default();
            let intent = match self.intents.get(&id) {
                Some(previous) => previous.advance(input),
                None => IntentSnapshot::new(input),
            };
            self.intents.insert(id, intent);

            character.frame_update(&intent, frame_delta);
        }

        self.fixed_accumulator += frame_delta;
        while self.fixed_accumulator >= world.delta_time {
            self.fixed_accumulator -= world.delta_time;
            self.fixed_steps += 1;

            for (id, character) in self.characters.iter_mut() {
                let intent = self.intents.get(id).copied().unwrap_or_default();
                character.fixed_update(&intent, &world);
            }
        }

        self.frame += 1;
    }

    /// Outgoing snapshots of every owned character, tagged with the frame.
    pub fn snapshots(&mut self) -> Vec<(EntityId, CharacterSnapshot)> {
        let sequence = self.frame;
        self.characters
            .iter_mut()
            .filter(|(_, character)| !character.state().is_proxy())
            .filter_map(|(&id, character)| character.take_snapshot(sequence).ok().map(|snapshot| (id, snapshot)))
            .collect()
    }

    /// Feed a received snapshot to a proxy.
    pub fn apply_snapshot(&mut self, id: EntityId, snapshot: &CharacterSnapshot) -> Result<bool, ReplicationError> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(ReplicationError::UnknownEntity(id))?;
        character.apply_snapshot(snapshot)
    }
}
