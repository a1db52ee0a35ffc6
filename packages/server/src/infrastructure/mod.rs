//! Infrastructure layer: wire formats and the in-memory registry.

pub mod dto;
pub mod repository;
