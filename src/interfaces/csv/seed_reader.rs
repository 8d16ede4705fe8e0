use crate::domain::catalog::MenuItem;
use crate::domain::table::TableSeed;
use crate::error::{FloorError, Result};
use serde::de::DeserializeOwned;
use std::io::Read;

fn read_all<T: DeserializeOwned, R: Read>(source: R) -> Result<Vec<T>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source)
        .into_deserialize()
        .map(|result| result.map_err(FloorError::from))
        .collect()
}

/// Reads the floor plan (`id, name`). Any bad row fails the whole file.
pub fn read_tables<R: Read>(source: R) -> Result<Vec<TableSeed>> {
    read_all(source)
}

/// Reads the menu (`id, name, price`). Prices must be positive.
pub fn read_menu<R: Read>(source: R) -> Result<Vec<MenuItem>> {
    read_all(source)
}
