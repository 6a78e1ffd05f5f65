pub mod ai;
pub mod collision;
