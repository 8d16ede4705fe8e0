use crate::application::command::FloorSnapshot;
use crate::domain::money::Balance;
use crate::domain::order::OrderId;
use crate::domain::table::{TableId, TableStatus};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct TableRow<'a> {
    table: TableId,
    name: &'a str,
    status: TableStatus,
    order: Option<OrderId>,
    total: String,
    paid: String,
    due: String,
}

impl<'a> From<&'a FloorSnapshot> for TableRow<'a> {
    fn from(snapshot: &'a FloorSnapshot) -> Self {
        let statement = snapshot.statement().unwrap_or_default();
        Self {
            table: snapshot.table.id,
            name: &snapshot.table.name,
            status: snapshot.table.status,
            order: snapshot.table.current_order,
            total: statement.total.to_string(),
            paid: statement.paid.to_string(),
            due: statement.due.to_string(),
        }
    }
}

/// Writes the floor report as CSV:
/// `table,name,status,order,total,paid,due`, optionally followed by a
/// `revenue,<amount>` line.
pub struct FloorWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> FloorWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new().flexible(true).from_writer(sink);
        Self { writer }
    }

    pub fn write_tables(&mut self, snapshots: &[FloorSnapshot]) -> Result<()> {
        for snapshot in snapshots {
            self.writer.serialize(TableRow::from(snapshot))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_revenue(&mut self, revenue: Balance) -> Result<()> {
        self.writer
            .write_record(["revenue", revenue.to_string().as_str()])?;
        self.writer.flush()?;
        Ok(())
    }
}
