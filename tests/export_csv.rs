mod common;

use std::fs;

use common::{date, temp_base_dir};
use pennywise::core::services::{RecurrenceService, SummaryService};
use pennywise::export::{export_to_path, to_csv_string};
use pennywise::ledger::{Ledger, Transaction, TransactionKind};
use rust_decimal_macros::dec;

#[test]
fn export_round_trips_through_a_csv_reader() {
    let mut ledger = Ledger::new("Export");
    RecurrenceService::add_rule(&mut ledger, "expense", "Rent, flat", "950.50", "monthly", "2024-01-15")
        .expect("add rule");
    RecurrenceService::catch_up_until(&mut ledger, date(2024, 3, 20));

    let path = temp_base_dir().join("pennywise_data.csv");
    let rows = SummaryService::export_transactions(&ledger, &path).expect("export");
    assert_eq!(rows, 3);

    let mut reader = csv::Reader::from_path(&path).expect("open export");
    let header: Vec<String> = reader
        .headers()
        .expect("header row")
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(header, ["date", "type", "category", "amount"]);

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    assert_eq!(records.len(), 3);
    assert_eq!(&records[0][0], "2024-01-15");
    assert_eq!(&records[1][0], "2024-02-15");
    assert_eq!(&records[2][1], "expense");
    assert_eq!(&records[2][2], "Rent, flat");
    assert_eq!(&records[2][3], "950.50");
}

#[test]
fn export_overwrites_previous_file() {
    let path = temp_base_dir().join("transactions.csv");
    fs::write(&path, "stale contents").expect("seed file");

    let txn = Transaction::new(TransactionKind::Income, "Salary", dec!(10), date(2024, 1, 1))
        .expect("valid transaction");
    export_to_path(&path, &[txn]).expect("export");

    let contents = fs::read_to_string(&path).expect("read export");
    assert_eq!(contents, "date,type,category,amount\n2024-01-01,income,Salary,10\n");
}

#[test]
fn empty_ledger_exports_header_only() {
    assert_eq!(
        to_csv_string(Ledger::default().transactions()).expect("render"),
        "date,type,category,amount\n"
    );
}
