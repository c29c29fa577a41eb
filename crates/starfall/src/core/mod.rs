pub mod asteroid;
pub mod bodies;
pub mod orbit;
pub mod store;
