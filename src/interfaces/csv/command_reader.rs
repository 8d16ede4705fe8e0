use crate::application::command::{FloorCommand, LineOp, LineRequest};
use crate::domain::catalog::ItemId;
use crate::domain::order::PaymentMethod;
use crate::domain::table::TableId;
use crate::error::{FloorError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandOp {
    Open,
    Add,
    Decrement,
    Remove,
    Bill,
    Pay,
}

/// One row of the command stream: `op, table, items, amount, method`.
///
/// `items` is a `;`-separated list of `item[:qty]` with the quantity
/// defaulting to 1.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub op: CommandOp,
    pub table: TableId,
    #[serde(default)]
    pub items: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub method: Option<PaymentMethod>,
}

impl TryFrom<CommandRecord> for FloorCommand {
    type Error = FloorError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let table_id = record.table;
        let lines = parse_items(record.items.as_deref().unwrap_or_default())?;

        let command = match record.op {
            CommandOp::Open => FloorCommand::Open { table_id, lines },
            CommandOp::Add => FloorCommand::Modify {
                table_id,
                ops: line_changes(lines, "add")?.into_iter().map(LineOp::Add).collect(),
            },
            CommandOp::Decrement => FloorCommand::Modify {
                table_id,
                ops: line_changes(lines, "decrement")?
                    .into_iter()
                    .map(LineOp::Decrement)
                    .collect(),
            },
            CommandOp::Remove => FloorCommand::Modify {
                table_id,
                ops: line_changes(lines, "remove")?
                    .into_iter()
                    .map(|line| LineOp::Remove(line.item_id))
                    .collect(),
            },
            CommandOp::Bill => FloorCommand::RequestBill { table_id },
            CommandOp::Pay => FloorCommand::Pay {
                table_id,
                amount: record
                    .amount
                    .ok_or_else(|| FloorError::MalformedCommand("pay needs an amount".into()))?,
                method: record
                    .method
                    .ok_or_else(|| FloorError::MalformedCommand("pay needs a method".into()))?,
            },
        };
        Ok(command)
    }
}

fn line_changes(lines: Vec<LineRequest>, op: &str) -> Result<Vec<LineRequest>> {
    if lines.is_empty() {
        return Err(FloorError::MalformedCommand(format!("{op} needs items")));
    }
    if lines.iter().any(|line| line.quantity < 1) {
        return Err(FloorError::InvalidQuantity);
    }
    Ok(lines)
}

fn parse_items(items: &str) -> Result<Vec<LineRequest>> {
    items
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<LineRequest> {
            let (item, quantity) = entry.split_once(':').unwrap_or((entry, "1"));
            let item_id: ItemId = item.trim().parse().map_err(|_| {
                FloorError::MalformedCommand(format!("bad item id in '{entry}'"))
            })?;
            let quantity: u32 = quantity.trim().parse().map_err(|_| {
                FloorError::MalformedCommand(format!("bad quantity in '{entry}'"))
            })?;
            Ok(LineRequest::new(item_id, quantity))
        })
        .collect()
}

/// Reads floor commands from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// so trailing empty columns can be left off.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and converts each row; a bad row yields an error without
    /// ending the stream.
    pub fn commands(self) -> impl Iterator<Item = Result<FloorCommand>> {
        self.reader
            .into_deserialize::<CommandRecord>()
            .map(|result| result.map_err(FloorError::from).and_then(FloorCommand::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn read(data: &str) -> Vec<Result<FloorCommand>> {
        CommandReader::new(data.as_bytes()).commands().collect()
    }

    #[test]
    fn test_reader_valid_stream() {
        let data = "op, table, items, amount, method\n\
                    open, 2, 1:2; 3\n\
                    bill, 2\n\
                    pay, 2, , 100, card";
        let results = read(data);

        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &FloorCommand::Open {
                table_id: 2,
                lines: vec![LineRequest::new(1, 2), LineRequest::new(3, 1)],
            }
        );
        assert_eq!(
            results[1].as_ref().unwrap(),
            &FloorCommand::RequestBill { table_id: 2 }
        );
        assert_eq!(
            results[2].as_ref().unwrap(),
            &FloorCommand::Pay {
                table_id: 2,
                amount: dec!(100),
                method: PaymentMethod::Card,
            }
        );
    }

    #[test]
    fn test_decrement_carries_quantity() {
        let results = read("op, table, items\ndecrement, 1, 4:2\ndecrement, 1, 1:4294967295");
        assert_eq!(
            results[0].as_ref().unwrap(),
            &FloorCommand::Modify {
                table_id: 1,
                ops: vec![LineOp::Decrement(LineRequest::new(4, 2))],
            }
        );
        assert_eq!(
            results[1].as_ref().unwrap(),
            &FloorCommand::Modify {
                table_id: 1,
                ops: vec![LineOp::Decrement(LineRequest::new(1, u32::MAX))],
            }
        );
    }

    #[test]
    fn test_zero_quantity_changes_are_rejected() {
        let data = "op, table, items\n\
                    decrement, 1, 1:0\n\
                    remove, 1, 1:0\n\
                    add, 1, 2; 1:0\n\
                    remove, 1, 1";
        let results = read(data);

        assert_eq!(results.len(), 4);
        assert!(matches!(results[0], Err(FloorError::InvalidQuantity)));
        assert!(matches!(results[1], Err(FloorError::InvalidQuantity)));
        assert!(matches!(results[2], Err(FloorError::InvalidQuantity)));
        assert_eq!(
            results[3].as_ref().unwrap(),
            &FloorCommand::Modify {
                table_id: 1,
                ops: vec![LineOp::Remove(1)],
            }
        );
    }

    #[test]
    fn test_open_without_items_is_left_to_the_floor() {
        let results = read("op, table, items\nopen, 1, ");
        assert_eq!(
            results[0].as_ref().unwrap(),
            &FloorCommand::Open {
                table_id: 1,
                lines: vec![],
            }
        );
    }

    #[test]
    fn test_reader_malformed_rows() {
        let data = "op, table, items, amount, method\n\
                    invalid, 1, 1\n\
                    add, 1, \n\
                    add, 1, x:2\n\
                    pay, 1, , , cash\n\
                    bill, 1";
        let results = read(data);

        assert_eq!(results.len(), 5);
        assert!(matches!(results[0], Err(FloorError::CsvError(_))));
        assert!(matches!(results[1], Err(FloorError::MalformedCommand(_))));
        assert!(matches!(results[2], Err(FloorError::MalformedCommand(_))));
        assert!(matches!(results[3], Err(FloorError::MalformedCommand(_))));
        assert!(results[4].is_ok());
    }
}
