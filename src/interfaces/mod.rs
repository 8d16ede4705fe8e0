//! Adapters between the floor engine and the outside world.

pub mod csv;
