pub mod config;
pub mod engine;
pub mod events;
pub mod render;
pub mod sys;
