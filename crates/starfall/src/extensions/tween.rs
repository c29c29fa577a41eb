// extensions/tween.rs
//
// Scalar tweens and a tween table keyed by AsteroidId.
// Decays (particles, debris) own their Tween directly; cosmetic asteroid
// animations live in TweenState so the store stays plain data.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(id, Tween::new(0.0, 1.0, 0.3, Easing::BackOut));
//   tweens.tick(dt, &mut store);  // Advances all tweens, writes asteroid scale

use std::collections::HashMap;

use super::easing::{ease, Easing};
use crate::api::types::AsteroidId;
use crate::core::store::AsteroidStore;

/// Slack when deciding completion, so summed frame deltas that land a hair
/// under the duration still finish on that frame.
const COMPLETE_EPSILON: f32 = 1e-5;

/// What happens when a tween completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop at the end value.
    #[default]
    Once,
    /// Wrap around and start again, keeping the overshoot.
    Loop,
}

/// A single eased transition from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    pub easing: Easing,
    pub loop_mode: TweenLoop,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
        }
    }

    /// A linear 0 → 1 progress clock.
    pub fn clock(duration: f32) -> Self {
        Self::new(0.0, 1.0, duration, Easing::Linear)
    }

    // -- Builder methods --

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        if self.loop_mode == TweenLoop::Loop && self.duration > 0.0 {
            self.elapsed %= self.duration;
        }
        self.value()
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 || self.is_complete() {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Current eased value.
    pub fn value(&self) -> f32 {
        ease(self.from, self.to, self.progress(), self.easing)
    }

    /// Whether the tween has completed (never true for looping tweens).
    pub fn is_complete(&self) -> bool {
        self.loop_mode == TweenLoop::Once && self.elapsed + COMPLETE_EPSILON >= self.duration
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Scale tweens for live asteroids.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<TweenId, (AsteroidId, Tween)>,
    next_id: u32,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scale tween for an asteroid. Returns a handle for later control.
    pub fn add(&mut self, asteroid: AsteroidId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, (asteroid, tween));
        id
    }

    /// Remove all tweens for an asteroid.
    pub fn remove_target(&mut self, asteroid: AsteroidId) {
        self.tweens.retain(|_, (a, _)| *a != asteroid);
    }

    /// Advance all tweens and write the values to asteroid scales.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(&mut self, dt: f32, store: &mut AsteroidStore) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|_, (asteroid, tween)| {
            let value = tween.advance(dt);
            match store.get_mut(*asteroid) {
                Some(a) => {
                    a.scale = value;
                    !tween.is_complete()
                }
                // Target left the store; nothing left to animate.
                None => false,
            }
        });
        before - self.tweens.len()
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
