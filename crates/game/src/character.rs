//! A movable character: synced state bound to its collaborators.
//!
//! The collider is required and bound once in [`CharacterBuilder::build`].
//! The animation helper is optional; without one, animation export is skipped.
//!
//! Per frame:
//! 1. Owner only: look, run flag, jump, crouch negotiation, body smoothing
//! 2. Everyone: animation export
//!
//! Per fixed step, owner only: wish velocity, then integrate and move.
//! Proxies take their fields and transform from snapshots instead.

use glam::Vec3;
use sandstep_physics::movement::{locomotion, stance};
use sandstep_physics::{
    build_wish_velocity, integrate_and_move, BodyOrientation, Collider, ConfigError, CrouchTransition,
    EyeAngles, MovementConfig, SpeedTier, Stance,
};
use thiserror::Error;

use crate::animation::{AnimationHelper, AnimationParams, AnimationRecorder};
use crate::input::{move_intent, Button, InputIntent};
use crate::replication::{
    Authority, AuthorityGuard, CharacterSnapshot, Local, ReplicatedFields, ReplicatedState, ReplicationError,
    SnapshotCursor, TransformSnapshot,
};

/// Eye height as a fraction of the standing height, before the eye offset.
const EYE_HEIGHT_FRACTION: f32 = 0.9;

/// Blocked uncrouch ticks before it is worth a log line.
const BLOCKED_LOG_TICKS: u32 = 60;

/// Why a character could not be created.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("character has no collider")]
    MissingCollider,

    #[error("invalid movement config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// World inputs to a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldContext {
    pub gravity: Vec3,
    pub delta_time: f32,
}

/// Movement state owned by one character.
#[derive(Debug, Clone)]
pub struct CharacterState {
    authority: Authority,
    replicated: ReplicatedState,
    body: BodyOrientation,
    blocked_uncrouch_ticks: Local<u32>,
    received: Local<SnapshotCursor>,
}

impl CharacterState {
    pub fn new(authority: Authority) -> Self {
        Self {
            authority,
            replicated: ReplicatedState::default(),
            body: BodyOrientation::default(),
            blocked_uncrouch_ticks: Local::new(0),
            received: Local::new(SnapshotCursor::default()),
        }
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn is_proxy(&self) -> bool {
        self.authority == Authority::Proxy
    }

    pub fn replicated(&self) -> &ReplicatedState {
        &self.replicated
    }

    /// Write access to the synced fields. Fails on proxies.
    pub fn authority_mut(&mut self) -> Result<AuthorityGuard<'_>, ReplicationError> {
        match self.authority {
            Authority::Owner => Ok(AuthorityGuard::new(&mut self.replicated)),
            Authority::Proxy => Err(ReplicationError::NotOwner),
        }
    }

    pub fn stance(&self) -> Stance {
        Stance::from_crouching(self.replicated.is_crouching())
    }

    /// Visual body rotation.
    pub fn body(&self) -> BodyOrientation {
        self.body
    }

    /// Consecutive ticks the character has wanted to stand but could not.
    pub fn blocked_uncrouch_ticks(&self) -> u32 {
        *self.blocked_uncrouch_ticks.get()
    }
}

/// A character with its collider and optional animation helper.
#[derive(Debug)]
pub struct Character<C, A = AnimationRecorder> {
    state: CharacterState,
    collider: C,
    animation: Option<A>,
    config: MovementConfig,
}

impl<C: Collider, A: AnimationHelper> Character<C, A> {
    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CharacterState {
        &mut self.state
    }

    pub fn collider(&self) -> &C {
        &self.collider
    }

    pub fn animation(&self) -> Option<&A> {
        self.animation.as_ref()
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.collider.position()
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.collider.velocity()
    }

    #[inline]
    pub fn is_on_ground(&self) -> bool {
        self.collider.is_on_ground()
    }

    /// Camera position: head height plus the synced eye offset.
    pub fn eye_position(&self) -> Vec3 {
        self.position() + Vec3::Y * (self.config.height * EYE_HEIGHT_FRACTION) + self.state.replicated.eye_offset()
    }

    /// Per-frame update.
    pub fn frame_update<I: InputIntent + ?Sized>(&mut self, input: &I, delta_time: f32) {
        if !self.state.is_proxy() {
            self.apply_look(input);
            AuthorityGuard::new(&mut self.state.replicated).set_running(input.down(Button::Run));

            if input.pressed(Button::Jump) {
                self.perform_jump();
            }

            self.negotiate_crouch(input.down(Button::Duck));
            self.rotate_body(delta_time);
        }

        self.update_animations();
    }

    /// Fixed physics step. Does nothing on proxies.
    pub fn fixed_update<I: InputIntent + ?Sized>(&mut self, input: &I, world: &WorldContext) {
        if self.state.is_proxy() {
            return;
        }

        let replicated = &self.state.replicated;
        let tier = SpeedTier::select(replicated.is_crouching(), replicated.is_running());
        let wish_velocity = build_wish_velocity(replicated.eye_angles(), move_intent(input), tier, &self.config);

        AuthorityGuard::new(&mut self.state.replicated).set_wish_velocity(wish_velocity);
        integrate_and_move(
            &mut self.collider,
            wish_velocity,
            world.gravity,
            world.delta_time,
            &self.config,
        );
    }

    /// Jump if grounded, standing up first when crouched and there is room.
    ///
    /// Crouch is only cleared when the standing capsule fits. Under a low
    /// ceiling the character jumps at crouched height instead of standing up
    /// into the geometry.
    ///
    /// Returns whether the jump happened.
    pub fn jump(&mut self) -> Result<bool, ReplicationError> {
        self.require_owner()?;
        Ok(self.perform_jump())
    }

    /// One tick of crouch negotiation with the duck button in `duck_down`.
    pub fn update_crouch(&mut self, duck_down: bool) -> Result<CrouchTransition, ReplicationError> {
        self.require_owner()?;
        Ok(self.negotiate_crouch(duck_down))
    }

    /// Snapshot of the transform plus any synced fields that changed.
    pub fn take_snapshot(&mut self, sequence: u64) -> Result<CharacterSnapshot, ReplicationError> {
        self.require_owner()?;
        let fields = self.state.replicated.is_dirty().then(|| self.state.replicated.drain());
        Ok(self.snapshot_with(sequence, fields))
    }

    /// Snapshot that always carries the synced fields, for peers joining late.
    pub fn full_snapshot(&mut self, sequence: u64) -> Result<CharacterSnapshot, ReplicationError> {
        self.require_owner()?;
        let fields = Some(self.state.replicated.drain());
        Ok(self.snapshot_with(sequence, fields))
    }

    /// Apply a snapshot from the owner.
    ///
    /// Fields and transform are applied independently, each only when newer
    /// than the last one applied, so snapshots may arrive in any order.
    /// Returns `Ok(false)` when nothing in the snapshot was new.
    pub fn apply_snapshot(&mut self, snapshot: &CharacterSnapshot) -> Result<bool, ReplicationError> {
        if !self.state.is_proxy() {
            log::warn!("snapshot {} pushed into an owned character", snapshot.sequence);
            return Err(ReplicationError::OwnerRejectsSnapshot);
        }

        let accepted = self.state.received.get_mut().accept(snapshot);
        if !accepted.any() {
            log::debug!("dropping stale snapshot {}", snapshot.sequence);
            return Ok(false);
        }

        if let Some(fields) = snapshot.fields.as_ref().filter(|_| accepted.fields) {
            if fields.is_crouching != self.state.replicated.is_crouching() {
                let height = if fields.is_crouching {
                    self.config.height * 0.5
                } else {
                    self.config.height
                };
                self.collider.set_height(height);
            }
            self.state.replicated.receive(fields);
        }

        if accepted.transform {
            let transform = snapshot.transform;
            self.collider.sync_transform(transform.position, transform.velocity);
            self.state.body = BodyOrientation {
                rotation: transform.body_rotation,
            };
        }
        Ok(true)
    }

    fn require_owner(&self) -> Result<(), ReplicationError> {
        if self.state.is_proxy() {
            return Err(ReplicationError::NotOwner);
        }
        Ok(())
    }

    fn snapshot_with(&self, sequence: u64, fields: Option<ReplicatedFields>) -> CharacterSnapshot {
        CharacterSnapshot {
            sequence,
            fields,
            transform: TransformSnapshot {
                position: self.collider.position(),
                velocity: self.collider.velocity(),
                body_rotation: self.state.body.rotation,
            },
        }
    }

    fn apply_look<I: InputIntent + ?Sized>(&mut self, input: &I) {
        let delta = input.look_delta();
        if delta.x == 0.0 && delta.y == 0.0 {
            return;
        }

        let mut eye_angles = self.state.replicated.eye_angles();
        eye_angles.look(delta.x, delta.y);
        AuthorityGuard::new(&mut self.state.replicated).set_eye_angles(eye_angles);
    }

    fn perform_jump(&mut self) -> bool {
        if !self.collider.is_on_ground() {
            return false;
        }

        if self.state.replicated.is_crouching() {
            if stance::try_stand(&mut self.collider) {
                self.set_crouched(false);
            } else {
                log::debug!("jumping crouched: no room to stand");
            }
        }

        let jumped = locomotion::jump(&mut self.collider, &self.config);
        if jumped {
            if let Some(helper) = self.animation.as_mut() {
                helper.trigger_jump();
            }
        }
        jumped
    }

    fn negotiate_crouch(&mut self, duck_down: bool) -> CrouchTransition {
        let transition = stance::negotiate(self.state.stance(), duck_down, &mut self.collider);

        match transition {
            CrouchTransition::Entered => self.set_crouched(true),
            CrouchTransition::Exited => self.set_crouched(false),
            CrouchTransition::None | CrouchTransition::Blocked => {}
        }

        let blocked = self.state.blocked_uncrouch_ticks.get_mut();
        if transition == CrouchTransition::Blocked {
            *blocked += 1;
            if *blocked == BLOCKED_LOG_TICKS {
                log::debug!("uncrouch blocked for {} ticks", BLOCKED_LOG_TICKS);
            }
        } else {
            *blocked = 0;
        }

        transition
    }

    fn set_crouched(&mut self, is_crouching: bool) {
        let eye_offset = if is_crouching {
            -Vec3::Y * (self.config.height * 0.5)
        } else {
            Vec3::ZERO
        };

        let mut guard = AuthorityGuard::new(&mut self.state.replicated);
        guard.set_crouching(is_crouching);
        guard.set_eye_offset(eye_offset);
    }

    fn rotate_body(&mut self, delta_time: f32) {
        let speed = self.collider.velocity().length();
        self.state
            .body
            .update(self.state.replicated.eye_angles(), speed, delta_time, &self.config);
    }

    fn update_animations(&mut self) {
        let Some(helper) = self.animation.as_mut() else {
            return;
        };

        AnimationParams::capture(
            &self.state.replicated,
            self.collider.velocity(),
            self.collider.is_on_ground(),
        )
        .apply(helper);
    }
}

/// Binds a character's collaborators once, at spawn.
#[derive(Debug)]
pub struct CharacterBuilder<C, A = AnimationRecorder> {
    authority: Authority,
    collider: Option<C>,
    animation: Option<A>,
    config: MovementConfig,
    eye_angles: EyeAngles,
}

impl<C: Collider> CharacterBuilder<C, AnimationRecorder> {
    pub fn new(authority: Authority) -> Self {
        Self {
            authority,
            collider: None,
            animation: None,
            config: MovementConfig::default(),
            eye_angles: EyeAngles::default(),
        }
    }
}

impl<C: Collider, A: AnimationHelper> CharacterBuilder<C, A> {
    pub fn collider(mut self, collider: C) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Attach an animation helper, possibly of a different type.
    pub fn animation<B: AnimationHelper>(self, helper: B) -> CharacterBuilder<C, B> {
        CharacterBuilder {
            authority: self.authority,
            collider: self.collider,
            animation: Some(helper),
            config: self.config,
            eye_angles: self.eye_angles,
        }
    }

    pub fn config(mut self, config: MovementConfig) -> Self {
        self.config = config;
        self
    }

    pub fn eye_angles(mut self, eye_angles: EyeAngles) -> Self {
        self.eye_angles = eye_angles;
        self
    }

    pub fn build(self) -> Result<Character<C, A>, SpawnError> {
        self.config.validate()?;
        let mut collider = self.collider.ok_or(SpawnError::MissingCollider)?;
        collider.set_height(self.config.height);

        let mut state = CharacterState::new(self.authority);
        AuthorityGuard::new(&mut state.replicated).set_eye_angles(self.eye_angles);
        state.body = BodyOrientation::facing(self.eye_angles);
        if state.is_proxy() {
            state.replicated.drain();
        }

        log::info!(
            "character built: authority={:?} position={:?} animation={}",
            self.authority,
            collider.position(),
            self.animation.is_some()
        );

        Ok(Character {
            state,
            collider,
            animation: self.animation,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonSet, IntentSnapshot, PlayerInput};
    use sandstep_physics::{CharacterController, CollisionWorld, ContentFlags};
    use std::sync::Arc;

    const DT: f32 = 1.0 / 60.0;

    fn world(ceiling: bool) -> Arc<CollisionWorld> {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec3::new(0.0, -8.0, 0.0),
            Vec3::new(2000.0, 8.0, 2000.0),
            ContentFlags::SOLID,
        );
        if ceiling {
            // Underside at y=48: room to crouch, not to stand
            world.add_box(
                Vec3::new(0.0, 64.0, 0.0),
                Vec3::new(200.0, 16.0, 200.0),
                ContentFlags::SOLID,
            );
        }
        Arc::new(world)
    }

    fn spawn(authority: Authority, world: Arc<CollisionWorld>) -> Character<CharacterController> {
        let config = MovementConfig::default();
        let mut controller = CharacterController::new(world, config.clone());
        controller.spawn_at(Vec3::new(0.0, 1.0, 0.0));

        CharacterBuilder::new(authority)
            .collider(controller)
            .animation(AnimationRecorder::default())
            .config(config)
            .build()
            .unwrap()
    }

    fn context() -> WorldContext {
        WorldContext {
            gravity: MovementConfig::default().gravity,
            delta_time: DT,
        }
    }

    fn held(buttons: &[Button]) -> IntentSnapshot {
        let input = PlayerInput::new(ButtonSet::of(buttons));
        IntentSnapshot::new(input).advance(input)
    }

    /// Crouch in an open area, then slide under the ceiling brush.
    fn crouched_under_ceiling() -> Character<CharacterController> {
        let mut character = spawn(Authority::Owner, world(true));
        // Spawned beside the ceiling so standing height fits
        character.collider.sync_transform(Vec3::new(300.0, 0.5, 0.0), Vec3::ZERO);
        assert_eq!(character.update_crouch(true).unwrap(), CrouchTransition::Entered);
        character.collider.sync_transform(Vec3::new(0.0, 0.5, 0.0), Vec3::ZERO);
        assert!(character.is_on_ground());
        character
    }

    #[test]
    fn test_build_requires_collider() {
        let result = CharacterBuilder::<CharacterController>::new(Authority::Owner).build();
        assert!(matches!(result, Err(SpawnError::MissingCollider)));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = MovementConfig {
            run_speed: 0.0,
            ..Default::default()
        };
        let controller = CharacterController::new(world(false), config.clone());
        let result = CharacterBuilder::new(Authority::Owner)
            .collider(controller)
            .config(config)
            .build();

        assert!(matches!(result, Err(SpawnError::InvalidConfig(_))));
    }

    #[test]
    fn test_build_without_animation_helper() {
        let mut controller = CharacterController::new(world(false), MovementConfig::default());
        controller.spawn_at(Vec3::ZERO);
        let mut character = CharacterBuilder::new(Authority::Owner)
            .collider(controller)
            .build()
            .unwrap();

        character.frame_update(&held(&[Button::Jump]), DT);
        assert!(character.animation().is_none());
    }

    #[test]
    fn test_proxy_cannot_write() {
        let mut character = spawn(Authority::Proxy, world(false));

        assert!(matches!(character.state_mut().authority_mut(), Err(ReplicationError::NotOwner)));
        assert!(matches!(character.jump(), Err(ReplicationError::NotOwner)));
        assert!(matches!(character.update_crouch(true), Err(ReplicationError::NotOwner)));
        assert!(matches!(character.take_snapshot(0), Err(ReplicationError::NotOwner)));
    }

    #[test]
    fn test_owner_rejects_snapshots() {
        let mut owner = spawn(Authority::Owner, world(false));
        let snapshot = owner.full_snapshot(1).unwrap();

        assert!(matches!(
            owner.apply_snapshot(&snapshot),
            Err(ReplicationError::OwnerRejectsSnapshot)
        ));
    }

    #[test]
    fn test_running_forward_builds_run_speed_wish() {
        let mut character = spawn(Authority::Owner, world(false));
        let input = held(&[Button::Forward, Button::Run]);

        character.frame_update(&input, DT);
        character.fixed_update(&input, &context());

        let wish = character.state().replicated().wish_velocity();
        assert!((wish - Vec3::new(290.0, 0.0, 0.0)).length() < 1e-3);
        assert!(character.velocity().x > 1.0 && character.velocity().x < 290.0);
    }

    #[test]
    fn test_crouched_with_no_keys_has_zero_wish() {
        let mut character = spawn(Authority::Owner, world(false));
        let input = held(&[Button::Duck]);

        character.frame_update(&input, DT);
        character.fixed_update(&input, &context());

        assert!(character.state().replicated().is_crouching());
        assert_eq!(character.state().replicated().wish_velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_crouch_sets_eye_offset_and_height() {
        let mut character = spawn(Authority::Owner, world(false));
        let standing_eye = character.eye_position();

        character.frame_update(&held(&[Button::Duck]), DT);

        assert_eq!(character.collider().height(), 32.0);
        assert_eq!(character.state().replicated().eye_offset(), Vec3::new(0.0, -32.0, 0.0));
        assert!((standing_eye.y - character.eye_position().y - 32.0).abs() < 1e-3);

        character.frame_update(&held(&[]), DT);
        assert_eq!(character.collider().height(), 64.0);
        assert_eq!(character.state().replicated().eye_offset(), Vec3::ZERO);
    }

    #[test]
    fn test_jump_adds_impulse_and_signals_animation() {
        let mut character = spawn(Authority::Owner, world(false));
        let before = character.velocity().y;

        assert!(character.jump().unwrap());

        assert_eq!(character.velocity().y, before + 350.0);
        assert_eq!(character.animation().unwrap().jumps, 1);
    }

    #[test]
    fn test_jump_while_airborne_is_noop() {
        let mut character = spawn(Authority::Owner, world(false));
        character.jump().unwrap();
        let velocity = character.velocity();

        assert!(!character.jump().unwrap());
        assert_eq!(character.velocity(), velocity);
        assert_eq!(character.animation().unwrap().jumps, 1);
    }

    #[test]
    fn test_jump_clears_crouch_when_clear() {
        let mut character = spawn(Authority::Owner, world(false));
        character.update_crouch(true).unwrap();

        assert!(character.jump().unwrap());
        assert!(!character.state().replicated().is_crouching());
        assert_eq!(character.collider().height(), 64.0);
    }

    #[test]
    fn test_jump_under_ceiling_stays_crouched() {
        let mut character = crouched_under_ceiling();

        assert!(character.jump().unwrap());
        assert!(character.state().replicated().is_crouching());
        assert_eq!(character.collider().height(), 32.0);
        assert_eq!(character.animation().unwrap().jumps, 1);
    }

    #[test]
    fn test_blocked_uncrouch_counts_ticks() {
        let mut character = crouched_under_ceiling();

        for _ in 0..5 {
            assert_eq!(character.update_crouch(false).unwrap(), CrouchTransition::Blocked);
        }
        assert_eq!(character.state().blocked_uncrouch_ticks(), 5);
        assert!(character.state().replicated().is_crouching());
        assert_eq!(character.collider().height(), 32.0);
    }

    #[test]
    fn test_animation_export_every_frame() {
        let mut character = spawn(Authority::Owner, world(false));

        character.frame_update(&held(&[Button::Duck]), DT);

        let recorder = character.animation().unwrap();
        assert_eq!(recorder.updates, 1);
        assert_eq!(recorder.params.duck_level, 1.0);
        assert!(recorder.params.grounded);
    }

    #[test]
    fn test_proxy_ignores_input_but_exports_animation() {
        let mut proxy = spawn(Authority::Proxy, world(false));
        let start = proxy.position();
        let input = held(&[Button::Forward, Button::Run, Button::Duck, Button::Jump]);

        proxy.frame_update(&input, DT);
        proxy.fixed_update(&input, &context());

        assert_eq!(proxy.position(), start);
        assert!(!proxy.state().replicated().is_crouching());
        assert!(!proxy.state().replicated().is_running());
        assert_eq!(proxy.state().replicated().wish_velocity(), Vec3::ZERO);
        assert_eq!(proxy.collider().height(), 64.0);

        let recorder = proxy.animation().unwrap();
        assert_eq!(recorder.updates, 1);
        assert_eq!(recorder.jumps, 0);
    }

    #[test]
    fn test_snapshot_replicates_to_proxy() {
        let mut owner = spawn(Authority::Owner, world(false));
        let mut proxy = spawn(Authority::Proxy, world(false));
        let input = held(&[Button::Forward, Button::Duck]);

        for _ in 0..10 {
            owner.frame_update(&input, DT);
            owner.fixed_update(&input, &context());
        }
        let snapshot = owner.take_snapshot(10).unwrap();
        assert!(snapshot.fields.is_some());

        assert!(proxy.apply_snapshot(&snapshot).unwrap());
        proxy.frame_update(&held(&[]), DT);

        assert!(proxy.state().replicated().is_crouching());
        assert_eq!(proxy.collider().height(), 32.0);
        assert!((proxy.position() - owner.position()).length() < 0.05);
        assert_eq!(
            proxy.state().replicated().wish_velocity(),
            owner.state().replicated().wish_velocity()
        );
        assert_eq!(proxy.animation().unwrap().params.duck_level, 1.0);
    }

    #[test]
    fn test_unchanged_fields_are_not_resent() {
        let mut owner = spawn(Authority::Owner, world(false));
        let running = held(&[Button::Run]);

        owner.frame_update(&running, DT);
        let first = owner.take_snapshot(1).unwrap();
        assert!(first.fields.unwrap().is_running);

        owner.frame_update(&running, DT);
        let second = owner.take_snapshot(2).unwrap();
        assert!(second.fields.is_none());
    }

    #[test]
    fn test_stale_snapshot_dropped() {
        let mut owner = spawn(Authority::Owner, world(false));
        let mut proxy = spawn(Authority::Proxy, world(false));

        let older = owner.full_snapshot(4).unwrap();
        let newer = owner.full_snapshot(5).unwrap();

        assert!(proxy.apply_snapshot(&newer).unwrap());
        assert!(!proxy.apply_snapshot(&older).unwrap());
    }

    #[test]
    fn test_fields_survive_out_of_order_delivery() {
        let mut owner = spawn(Authority::Owner, world(false));
        let mut proxy = spawn(Authority::Proxy, world(false));
        let ducking = held(&[Button::Duck]);

        owner.frame_update(&ducking, DT);
        let crouched = owner.take_snapshot(5).unwrap();
        assert!(crouched.fields.is_some_and(|fields| fields.is_crouching));

        owner.frame_update(&ducking, DT);
        let transform_only = owner.take_snapshot(6).unwrap();
        assert!(transform_only.fields.is_none());

        assert!(proxy.apply_snapshot(&transform_only).unwrap());
        assert!(proxy.apply_snapshot(&crouched).unwrap());

        assert!(proxy.state().replicated().is_crouching());
        assert_eq!(proxy.collider().height(), 32.0);

        // Nothing left that is newer
        assert!(!proxy.apply_snapshot(&crouched).unwrap());
    }

    #[test]
    fn test_look_delta_turns_eyes_and_body() {
        let mut character = spawn(Authority::Owner, world(false));
        let input = IntentSnapshot::new(PlayerInput::default().looking(0.0, 1.5));

        character.frame_update(&input, DT);

        assert!((character.state().replicated().eye_angles().yaw - 1.5).abs() < 1e-5);
        // 86 degrees off is past the turn threshold
        assert!(character.state().body().angle_to(character.state().replicated().eye_angles()) < 86.0);
    }
}
