//! Crosshair bar offsets.
//!
//! Purely cosmetic. The bars read movement and weapon signals each frame and
//! never write anything back. Shooting kicks the bars out and schedules a
//! restore; a second shot before the restore fires cancels and restarts it.

use serde::{Deserialize, Serialize};

use crate::character::CharacterState;

/// Token identifying one scheduled restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestoreToken(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingRestore {
    token: RestoreToken,
    remaining: f32,
}

/// Tick-driven delayed callback.
///
/// Every `schedule` bumps a generation counter, so only the latest restore
/// can ever fire. Dropping the timer drops whatever was pending.
#[derive(Debug, Clone, Default)]
pub struct RestoreTimer {
    generation: u64,
    pending: Option<PendingRestore>,
}

impl RestoreTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a restore `delay` seconds from now, replacing any pending one.
    pub fn schedule(&mut self, delay: f32) -> RestoreToken {
        self.generation += 1;
        let token = RestoreToken(self.generation);
        self.pending = Some(PendingRestore {
            token,
            remaining: delay.max(0.0),
        });
        token
    }

    /// Cancel whatever is pending.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Cancel only if `token` is still the pending restore.
    ///
    /// Returns whether anything was cancelled.
    pub fn cancel_token(&mut self, token: RestoreToken) -> bool {
        if self.is_current(token) {
            self.cancel();
            return true;
        }
        false
    }

    /// Whether `token` is the restore that will fire next.
    pub fn is_current(&self, token: RestoreToken) -> bool {
        self.pending.is_some_and(|pending| pending.token == token)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Advance by `delta_time`. Returns true exactly once per scheduled restore.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };

        pending.remaining -= delta_time;
        if pending.remaining > 0.0 {
            return false;
        }

        let fired = pending.token == RestoreToken(self.generation);
        self.pending = None;
        fired
    }
}

/// Tunable offsets, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairConfig {
    /// Margin per unit of weapon spread.
    pub spread_offset: f32,
    /// Bar distance while running or reloading.
    pub sprint_offset: f32,
    /// Bar distance right after a shot.
    pub fire_offset: f32,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            spread_offset: 400.0,
            sprint_offset: 100.0,
            fire_offset: 50.0,
        }
    }
}

/// Positions of the four bars relative to the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BarLayout {
    pub const REST: Self = Self {
        left: -16.0,
        right: 5.0,
        top: -16.0,
        bottom: 5.0,
    };

    /// Bars pushed out by `offset`. The right and bottom bars sit 5px closer
    /// to account for their own width.
    pub fn spread(offset: f32) -> Self {
        Self {
            left: -offset,
            right: offset - 5.0,
            top: -offset,
            bottom: offset - 5.0,
        }
    }
}

/// Signals the crosshair reads each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrosshairSignals {
    pub has_weapon: bool,
    /// Current weapon spread, 0..1.
    pub spread: f32,
    pub is_running: bool,
    pub is_reloading: bool,
    pub is_aiming: bool,
    pub first_person: bool,
}

impl CrosshairSignals {
    /// Signals for a first-person character holding a weapon, with the run
    /// flag taken from its synced state.
    pub fn armed(state: &CharacterState) -> Self {
        Self {
            has_weapon: true,
            is_running: state.replicated().is_running(),
            first_person: true,
            ..Default::default()
        }
    }
}

/// Crosshair bar state.
#[derive(Debug, Clone)]
pub struct CrosshairOffsets {
    config: CrosshairConfig,
    pub bars: BarLayout,
    /// Extra margin from weapon spread, added to every bar.
    pub margin: f32,
    pub dot_opacity: f32,
    pub bar_opacity: f32,
    pub dot_hidden: bool,
    pub bars_hidden: bool,
    was_zooming: bool,
    restore: RestoreTimer,
}

impl Default for CrosshairOffsets {
    fn default() -> Self {
        Self::new(CrosshairConfig::default())
    }
}

impl CrosshairOffsets {
    pub fn new(config: CrosshairConfig) -> Self {
        Self {
            config,
            bars: BarLayout::REST,
            margin: 0.0,
            dot_opacity: 1.0,
            bar_opacity: 1.0,
            dot_hidden: false,
            bars_hidden: false,
            was_zooming: false,
            restore: RestoreTimer::new(),
        }
    }

    /// Whether a post-shot restore is waiting to fire.
    pub fn restore_pending(&self) -> bool {
        self.restore.is_pending()
    }

    /// Kick the bars out and restore them after half the fire delay.
    pub fn on_shoot(&mut self, fire_delay: f32) {
        self.bars = BarLayout::spread(self.config.fire_offset);
        self.restore.schedule(fire_delay / 2.0);
    }

    /// Per-frame update.
    pub fn tick(&mut self, signals: &CrosshairSignals, delta_time: f32) {
        if self.restore.tick(delta_time) {
            self.restore_layout();
        }

        self.dot_hidden = !signals.has_weapon;
        self.bars_hidden = !signals.has_weapon;
        if !signals.has_weapon {
            return;
        }

        self.margin = self.config.spread_offset * signals.spread;

        if signals.is_running || signals.is_reloading {
            self.bars = BarLayout::spread(self.config.sprint_offset);
            self.bar_opacity = 0.0;
        } else if signals.is_aiming {
            self.was_zooming = true;
            if signals.first_person {
                self.dot_opacity = 0.0;
                self.bar_opacity = 0.0;
            }
        } else if self.bars.left == -self.config.sprint_offset || self.was_zooming {
            self.was_zooming = false;
            self.restore_layout();
        }
    }

    fn restore_layout(&mut self) {
        self.bars = BarLayout::REST;
        self.dot_opacity = 1.0;
        self.bar_opacity = 1.0;
    }
}
