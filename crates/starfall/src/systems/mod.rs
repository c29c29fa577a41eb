pub mod collision;
pub mod effects;
pub mod physics;
pub mod status;
