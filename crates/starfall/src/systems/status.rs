//! Status line text and the impact-message hold timers.

use crate::extensions::Tween;

/// `"Asteroids: <n>"`.
pub fn count_message(live: usize) -> String {
    format!("Asteroids: {live}")
}

/// `"Impact on <body>!"`.
pub fn impact_message(body: &str) -> String {
    format!("Impact on {body}!")
}

/// Tracks how long impact messages stay up before the count returns.
///
/// Every impact starts its own timer. The first timer to run out brings the
/// count back, even if a later impact is still pending; that later timer
/// rewrites the count again when it expires.
#[derive(Debug, Clone)]
pub struct StatusLine {
    hold_duration: f32,
    timers: Vec<Tween>,
    showing_impact: bool,
}

impl StatusLine {
    pub fn new(hold_duration: f32) -> Self {
        Self {
            hold_duration,
            timers: Vec::new(),
            showing_impact: false,
        }
    }

    /// An impact message was just written. Starts a new timer for it.
    pub fn hold(&mut self) {
        self.timers.push(Tween::clock(self.hold_duration));
        self.showing_impact = true;
    }

    /// Advance every timer. Returns true when at least one ran out this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        let before = self.timers.len();
        self.timers.retain_mut(|clock| {
            clock.advance(dt);
            !clock.is_complete()
        });
        let expired = self.timers.len() < before;
        if expired {
            self.showing_impact = false;
        }
        expired
    }

    /// Whether an impact message is on screen and must not be overwritten
    /// by a routine count update.
    pub fn is_holding(&self) -> bool {
        self.showing_impact
    }

    /// Timers still running.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Drop every pending timer without reporting it.
    pub fn cancel(&mut self) {
        self.timers.clear();
        self.showing_impact = false;
    }
}
