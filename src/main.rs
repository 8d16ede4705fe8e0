use clap::Parser;
use floorbook::application::command::{CommandRejection, RevenuePeriod};
use floorbook::application::floor::FloorController;
use floorbook::domain::ports::{OrderStoreBox, TableStoreBox};
use floorbook::infrastructure::clock::SystemClock;
use floorbook::infrastructure::in_memory::{
    InMemoryCatalog, InMemoryOrderStore, InMemoryTableStore,
};
use floorbook::interfaces::csv::command_reader::CommandReader;
use floorbook::interfaces::csv::floor_writer::FloorWriter;
use floorbook::interfaces::csv::seed_reader::{read_menu, read_tables};
use floorbook::telemetry;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Floor commands CSV file (op, table, items, amount, method)
    input: PathBuf,

    /// Floor plan CSV file (id, name)
    #[arg(long)]
    tables: PathBuf,

    /// Menu CSV file (id, name, price)
    #[arg(long)]
    menu: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Append the all-time revenue line to the report
    #[arg(long)]
    revenue: bool,
}

fn open_stores(db_path: Option<PathBuf>) -> Result<(TableStoreBox, OrderStoreBox)> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(db_path) => {
            let store = floorbook::infrastructure::rocksdb::RocksDBStore::open(db_path)
                .into_diagnostic()?;
            let tables: TableStoreBox = Box::new(store.clone());
            let orders: OrderStoreBox = Box::new(store);
            Ok((tables, orders))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => Err(miette::miette!(
            "--db-path requires a build with the `storage-rocksdb` feature"
        )),
        None => {
            let tables: TableStoreBox = Box::new(InMemoryTableStore::new());
            let orders: OrderStoreBox = Box::new(InMemoryOrderStore::new());
            Ok((tables, orders))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let seeds = read_tables(File::open(&cli.tables).into_diagnostic()?).into_diagnostic()?;
    let menu = read_menu(File::open(&cli.menu).into_diagnostic()?).into_diagnostic()?;
    let (tables, orders) = open_stores(cli.db_path)?;

    let floor = FloorController::bootstrap(
        tables,
        orders,
        Box::new(InMemoryCatalog::new(menu)),
        Box::new(SystemClock),
        seeds,
    )
    .await
    .into_diagnostic()?;

    // Process commands
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for command in reader.commands() {
        match command {
            Ok(command) => {
                let table = command.table_id();
                if let Err(e) = floor.execute(command).await {
                    let rejection = CommandRejection::from(&e);
                    debug!(table, kind = ?rejection.kind, "Command rejected");
                    eprintln!("Error processing command: {}", rejection.message);
                }
            }
            Err(e) => {
                eprintln!("Error reading command: {}", e);
            }
        }
    }

    // Output final floor state
    let snapshots = floor.tables().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = FloorWriter::new(stdout.lock());
    writer.write_tables(&snapshots).into_diagnostic()?;

    if cli.revenue {
        let revenue = floor
            .revenue(RevenuePeriod::all_time())
            .await
            .into_diagnostic()?;
        writer.write_revenue(revenue).into_diagnostic()?;
    }

    Ok(())
}
