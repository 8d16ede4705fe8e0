//! CSV readers for the command stream and seed data, and the floor report writer.

pub mod command_reader;
pub mod floor_writer;
pub mod seed_reader;
