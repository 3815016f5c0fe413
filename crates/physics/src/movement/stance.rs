//! Crouch negotiation.
//!
//! Two stances, Standing and Crouching:
//! - Standing -> Crouching: duck held while grounded. Always succeeds and
//!   halves the collider height immediately.
//! - Crouching -> Standing: duck released. Probes upward by the doubled
//!   height first; if anything is hit the character stays crouched and the
//!   probe repeats every tick until there is room.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collider::Collider;

/// Character stance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

impl Stance {
    pub fn from_crouching(is_crouching: bool) -> Self {
        if is_crouching {
            Stance::Crouching
        } else {
            Stance::Standing
        }
    }

    pub fn is_crouching(self) -> bool {
        self == Stance::Crouching
    }
}

/// What a crouch update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrouchTransition {
    /// Nothing to do this tick.
    None,
    /// Started crouching; height halved.
    Entered,
    /// Stood up; height doubled.
    Exited,
    /// Wanted to stand but the probe hit something.
    Blocked,
}

impl CrouchTransition {
    /// The stance after this transition.
    pub fn apply(self, stance: Stance) -> Stance {
        match self {
            CrouchTransition::Entered => Stance::Crouching,
            CrouchTransition::Exited => Stance::Standing,
            CrouchTransition::None | CrouchTransition::Blocked => stance,
        }
    }
}

/// Run one tick of crouch negotiation.
pub fn negotiate<C: Collider + ?Sized>(stance: Stance, duck_down: bool, collider: &mut C) -> CrouchTransition {
    match stance {
        Stance::Standing if duck_down && collider.is_on_ground() => {
            let height = collider.height() * 0.5;
            collider.set_height(height);
            log::debug!("crouch entered: height={}", height);
            CrouchTransition::Entered
        }
        Stance::Crouching if !duck_down => {
            if try_stand(collider) {
                CrouchTransition::Exited
            } else {
                CrouchTransition::Blocked
            }
        }
        _ => CrouchTransition::None,
    }
}

/// Double the collider height if the upward probe is clear.
///
/// Returns whether the height changed. Only call this while crouched.
pub fn try_stand<C: Collider + ?Sized>(collider: &mut C) -> bool {
    let target_height = collider.height() * 2.0;
    let probe = collider.trace_direction(Vec3::Y * target_height);

    if probe.hit_something() {
        log::trace!("uncrouch blocked: target_height={} fraction={}", target_height, probe.fraction);
        return false;
    }

    collider.set_height(target_height);
    log::debug!("crouch exited: height={}", target_height);
    true
}
