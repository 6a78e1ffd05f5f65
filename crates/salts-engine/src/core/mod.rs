pub mod physics;
pub mod rect;
pub mod rng;
pub mod scene;
pub mod time;
