//! Replication boundary.
//!
//! One peer is the owner of a character and originates its synced fields.
//! Every other peer holds a proxy and only receives them. Synced fields live
//! in [`Replicated`] wrappers inside [`ReplicatedState`]; the only way to
//! write them is an [`AuthorityGuard`], which proxies cannot obtain.
//!
//! Owner state goes out as a [`CharacterSnapshot`], encoded with bincode.

use glam::{Quat, Vec3};
use sandstep_physics::EyeAngles;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::EntityId;

/// Errors crossing the replication boundary.
#[derive(Debug, Error)]
pub enum ReplicationError {
    #[error("encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("synced fields can only be written by the owner")]
    NotOwner,

    #[error("the owner does not accept snapshots")]
    OwnerRejectsSnapshot,

    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
}

/// Which side of the boundary this peer is on for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authority {
    /// Originates synced fields and runs input and physics.
    Owner,
    /// Receives synced fields; only exports animation.
    Proxy,
}

/// A synced value with a dirty flag.
#[derive(Debug, Clone, Default)]
pub struct Replicated<T> {
    value: T,
    dirty: bool,
}

impl<T: Copy + PartialEq> Replicated<T> {
    pub fn new(value: T) -> Self {
        Self { value, dirty: false }
    }

    #[inline]
    pub fn get(&self) -> T {
        self.value
    }

    /// Whether the value changed since the last snapshot.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Owner write. Marks dirty only when the value actually changes.
    fn set(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.dirty = true;
        }
    }

    /// Proxy write from a received snapshot. Never marks dirty.
    fn receive(&mut self, value: T) {
        self.value = value;
        self.dirty = false;
    }

    fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

/// Per-peer state that is never transmitted.
#[derive(Debug, Clone, Default)]
pub struct Local<T> {
    value: T,
}

impl<T> Local<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

/// The synced movement fields of one character.
#[derive(Debug, Clone, Default)]
pub struct ReplicatedState {
    wish_velocity: Replicated<Vec3>,
    eye_angles: Replicated<EyeAngles>,
    eye_offset: Replicated<Vec3>,
    is_crouching: Replicated<bool>,
    is_running: Replicated<bool>,
}

impl ReplicatedState {
    pub fn wish_velocity(&self) -> Vec3 {
        self.wish_velocity.get()
    }

    pub fn eye_angles(&self) -> EyeAngles {
        self.eye_angles.get()
    }

    pub fn eye_offset(&self) -> Vec3 {
        self.eye_offset.get()
    }

    pub fn is_crouching(&self) -> bool {
        self.is_crouching.get()
    }

    pub fn is_running(&self) -> bool {
        self.is_running.get()
    }

    /// Whether any field changed since the last snapshot.
    pub fn is_dirty(&self) -> bool {
        self.wish_velocity.is_dirty()
            || self.eye_angles.is_dirty()
            || self.eye_offset.is_dirty()
            || self.is_crouching.is_dirty()
            || self.is_running.is_dirty()
    }

    /// Current values, clearing every dirty flag.
    pub(crate) fn drain(&mut self) -> ReplicatedFields {
        self.wish_velocity.clear_dirty();
        self.eye_angles.clear_dirty();
        self.eye_offset.clear_dirty();
        self.is_crouching.clear_dirty();
        self.is_running.clear_dirty();
        self.fields()
    }

    /// Current values, leaving dirty flags alone.
    pub fn fields(&self) -> ReplicatedFields {
        ReplicatedFields {
            wish_velocity: self.wish_velocity(),
            eye_angles: self.eye_angles(),
            eye_offset: self.eye_offset(),
            is_crouching: self.is_crouching(),
            is_running: self.is_running(),
        }
    }

    pub(crate) fn receive(&mut self, fields: &ReplicatedFields) {
        self.wish_velocity.receive(fields.wish_velocity);
        self.eye_angles.receive(fields.eye_angles);
        self.eye_offset.receive(fields.eye_offset);
        self.is_crouching.receive(fields.is_crouching);
        self.is_running.receive(fields.is_running);
    }
}

/// Write access to [`ReplicatedState`], held only by the owner.
#[derive(Debug)]
pub struct AuthorityGuard<'a> {
    state: &'a mut ReplicatedState,
}

impl<'a> AuthorityGuard<'a> {
    pub(crate) fn new(state: &'a mut ReplicatedState) -> Self {
        Self { state }
    }

    pub fn set_wish_velocity(&mut self, wish_velocity: Vec3) {
        self.state.wish_velocity.set(wish_velocity);
    }

    pub fn set_eye_angles(&mut self, eye_angles: EyeAngles) {
        self.state.eye_angles.set(eye_angles);
    }

    pub fn set_eye_offset(&mut self, eye_offset: Vec3) {
        self.state.eye_offset.set(eye_offset);
    }

    pub fn set_crouching(&mut self, is_crouching: bool) {
        self.state.is_crouching.set(is_crouching);
    }

    pub fn set_running(&mut self, is_running: bool) {
        self.state.is_running.set(is_running);
    }

    /// Read back through the guard.
    pub fn state(&self) -> &ReplicatedState {
        self.state
    }
}

/// Plain values of the synced fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplicatedFields {
    pub wish_velocity: Vec3,
    pub eye_angles: EyeAngles,
    pub eye_offset: Vec3,
    pub is_crouching: bool,
    pub is_running: bool,
}

/// Transform of the character, sent every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub body_rotation: Quat,
}

/// One owner -> proxy update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    /// Owner frame the snapshot was taken on.
    pub sequence: u64,

    /// Synced fields, present only when one of them changed.
    pub fields: Option<ReplicatedFields>,

    pub transform: TransformSnapshot,
}

/// Which parts of a snapshot stream a proxy has applied so far.
///
/// Fields and transform are ordered separately: a transform-only snapshot
/// must not shadow an older snapshot that still carries unseen fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotCursor {
    fields: Option<u64>,
    transform: Option<u64>,
}

/// Parts of one snapshot that are newer than what was already applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accepted {
    pub fields: bool,
    pub transform: bool,
}

impl Accepted {
    pub fn any(self) -> bool {
        self.fields || self.transform
    }
}

impl SnapshotCursor {
    /// Record `snapshot` and report which of its parts should be applied.
    pub fn accept(&mut self, snapshot: &CharacterSnapshot) -> Accepted {
        let sequence = snapshot.sequence;
        let newer = |last: Option<u64>| last.map_or(true, |last| sequence > last);

        let fields = snapshot.fields.is_some() && newer(self.fields);
        if fields {
            self.fields = Some(sequence);
        }

        let transform = newer(self.transform);
        if transform {
            self.transform = Some(sequence);
        }

        Accepted { fields, transform }
    }

    /// Sequence of the newest fields applied.
    pub fn fields_sequence(&self) -> Option<u64> {
        self.fields
    }

    /// Sequence of the newest transform applied.
    pub fn transform_sequence(&self) -> Option<u64> {
        self.transform
    }
}

/// Encode a snapshot to bytes.
pub fn encode(snapshot: &CharacterSnapshot) -> Result<Vec<u8>, ReplicationError> {
    Ok(bincode::serde::encode_to_vec(snapshot, bincode::config::standard())?)
}

/// Decode a snapshot from bytes.
pub fn decode(data: &[u8]) -> Result<CharacterSnapshot, ReplicationError> {
    let (snapshot, _) = bincode::serde::decode_from_slice(data, bincode::config::standard())?;
    Ok(snapshot)
}
