//! Domain layer - entities and ports, no I/O

pub mod entities;
pub mod ports;
