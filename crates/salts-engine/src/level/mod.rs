pub mod builder;
pub mod factory;
pub mod world;

#[cfg(test)]
mod scenarios;

pub use builder::build_level;
pub use world::{Freeze, Level, LevelState};
