// extensions/mod.rs
//
// Animation helpers shared by the effects and the asteroid spawn animation.
// Decoupled from collision and gravity: nothing here changes an outcome.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, ease};
pub use tween::{TweenState, Tween, TweenId, TweenLoop};
