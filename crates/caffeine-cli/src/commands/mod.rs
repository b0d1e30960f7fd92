pub mod annotate;
pub mod chat;
pub mod common;
pub mod config;
pub mod curve;
pub mod log;
pub mod meter;
