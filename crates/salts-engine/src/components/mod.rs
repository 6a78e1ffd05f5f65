pub mod animation;
pub mod character;
pub mod entity;
pub mod sprite;
pub mod text;
