//! Application layer containing the floor orchestration.
//!
//! [`floor::FloorController`] is the only entry point callers use. It drives
//! the [`registry::TableRegistry`] and the order store together under a
//! per-table lock so a table and its tab are always updated as a pair.

pub mod command;
pub mod floor;
pub mod registry;
