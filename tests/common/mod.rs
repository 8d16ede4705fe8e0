#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use floorbook::application::floor::FloorController;
use floorbook::domain::catalog::MenuItem;
use floorbook::domain::money::Amount;
use floorbook::domain::ports::Clock;
use floorbook::domain::table::TableSeed;
use floorbook::infrastructure::in_memory::{
    InMemoryCatalog, InMemoryOrderStore, InMemoryTableStore,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use std::io::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const TORTILLA: u32 = 1;
pub const DOSA: u32 = 2;
pub const LASSI: u32 = 3;

pub fn menu() -> Vec<MenuItem> {
    vec![
        item(TORTILLA, "Tortilla", dec!(60)),
        item(DOSA, "Masala Dosa", dec!(85.50)),
        item(LASSI, "Mango Lassi", dec!(45)),
    ]
}

pub fn item(id: u32, name: &str, price: Decimal) -> MenuItem {
    MenuItem::new(id, name, Amount::new(price).unwrap())
}

pub fn seeds(count: u16) -> Vec<TableSeed> {
    (1..=count)
        .map(|id| TableSeed {
            id,
            name: format!("AC-{id}"),
        })
        .collect()
}

/// A clock the test moves by hand.
#[derive(Clone)]
pub struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

impl ManualClock {
    pub fn at(start: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(start)))
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

pub async fn floor_with_clock(tables: u16, clock: ManualClock) -> FloorController {
    FloorController::bootstrap(
        Box::new(InMemoryTableStore::new()),
        Box::new(InMemoryOrderStore::new()),
        Box::new(InMemoryCatalog::new(menu())),
        Box::new(clock),
        seeds(tables),
    )
    .await
    .unwrap()
}

pub async fn floor(tables: u16) -> FloorController {
    floor_with_clock(tables, ManualClock::at(noon())).await
}

pub fn write_csv(path: &Path, header: &[&str], rows: &[&[&str]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(*row)?;
    }

    wtr.flush()?;
    Ok(())
}
