//! Domain layer: floor entities, money value objects and the storage ports
//! the application layer is written against.

pub mod catalog;
pub mod money;
pub mod order;
pub mod ports;
pub mod settlement;
pub mod table;
