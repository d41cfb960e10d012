//! End-to-end tests: CSV files in, validation run, captured log out.

use std::io::Write;
use tempfile::NamedTempFile;

use tradecheck::{CsvSource, MemorySink, QaRunner};

/// Helper to create a temporary CSV file with given content.
fn create_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn users_csv() -> NamedTempFile {
    create_csv(
        "login_hash,server_hash,country_hash,currency,enable\n\
         u1,s1,c1,USD,1\n\
         u2,s1,c2,EUR,0\n\
         u3,s2,c1,GBP,1\n",
    )
}

fn trades_csv() -> NamedTempFile {
    create_csv(
        "login_hash,ticket_hash,server_hash,symbol,digits,cmd,volume,open_time,close_time,open_price,contractsize\n\
         u1,t1,s1,EURUSD,5,0,1.5,2024-01-01 09:00:00,2024-01-01 17:00:00,1.0812,100000\n\
         u2,t2,s1,GBPUSD,5,1,0.7,2024-01-02 10:30:00,2024-01-02 11:45:00,1.2701,100000\n\
         u3,t3,s2,USDJPY,3,0,2.0,2024-01-03 08:15:00,2024-01-03 19:00:00,148.22,100000\n",
    )
}

#[test]
fn test_clean_tables_pass_every_check() {
    let users = users_csv();
    let trades = trades_csv();
    let mut source = CsvSource::new()
        .with_table("users", users.path())
        .with_table("trades", trades.path());
    let sink = MemorySink::new();

    let report = QaRunner::new().run(&mut source, &sink).expect("run failed");

    assert_eq!(report.summary.total, 15);
    assert_eq!(report.summary.failed, 0);
    assert!(sink.contains("Number of duplicates found: 0"));
    assert!(sink.contains("Column 'enable' contains only 0s and 1s: true"));
    assert!(sink.contains("Column 'volume' is of numerical type: true"));
    assert!(sink.contains("Column 'open_time' is of timestamp type: true"));
    assert!(sink.contains("Column 'volume' is always greater than 0: true"));
    assert!(sink.contains(
        "Column 'close_time' is always greater than column 'open_time': true"
    ));
    assert!(sink.contains("All values of columns 'login_hash', 'server_hash' are valid: true"));
}

#[test]
fn test_duplicate_trades_are_counted() {
    let users = users_csv();
    let trades = create_csv(
        "login_hash,ticket_hash,server_hash,symbol,digits,cmd,volume,open_time,close_time,open_price,contractsize\n\
         u1,t1,s1,EURUSD,5,0,1.5,2024-01-01 09:00:00,2024-01-01 17:00:00,1.0812,100000\n\
         u1,t1,s1,EURUSD,5,0,1.5,2024-01-01 09:00:00,2024-01-01 17:00:00,1.0812,100000\n",
    );
    let mut source = CsvSource::new()
        .with_table("users", users.path())
        .with_table("trades", trades.path());
    let sink = MemorySink::new();

    let report = QaRunner::new().run(&mut source, &sink).expect("run failed");

    assert!(sink.contains("Number of duplicates found: 1"));
    assert!(report.summary.failed >= 1);
}

#[test]
fn test_null_currency_fails_mandatory_check() {
    let users = create_csv(
        "login_hash,server_hash,country_hash,currency,enable\n\
         u1,s1,c1,USD,1\n\
         u2,s1,c2,,0\n",
    );
    let trades = trades_csv();
    let mut source = CsvSource::new()
        .with_table("users", users.path())
        .with_table("trades", trades.path());
    let sink = MemorySink::new();

    let report = QaRunner::new().run(&mut source, &sink).expect("run failed");

    assert!(sink.contains("are mandatory: false"));
    assert!(sink.contains("\"currency\": true"));
    let mandatory = report
        .outcomes
        .iter()
        .find(|o| o.description.contains("mandatory") && o.description.contains("currency"))
        .expect("mandatory outcome missing");
    assert!(!mandatory.passed);
}

#[test]
fn test_orphan_trade_key_is_reported() {
    let users = users_csv();
    let trades = create_csv(
        "login_hash,ticket_hash,server_hash,symbol,digits,cmd,volume,open_time,close_time,open_price,contractsize\n\
         u9,t1,s9,EURUSD,5,0,1.5,2024-01-01 09:00:00,2024-01-01 17:00:00,1.0812,100000\n",
    );
    let mut source = CsvSource::new()
        .with_table("users", users.path())
        .with_table("trades", trades.path());
    let sink = MemorySink::new();

    let report = QaRunner::new().run(&mut source, &sink).expect("run failed");

    assert!(sink.contains("All values of columns 'login_hash', 'server_hash' are valid: false"));
    assert!(sink.contains("u9"));
    assert!(!report.outcomes.last().unwrap().passed);
}

#[test]
fn test_negative_volume_and_inverted_times_fail() {
    let users = users_csv();
    let trades = create_csv(
        "login_hash,ticket_hash,server_hash,symbol,digits,cmd,volume,open_time,close_time,open_price,contractsize\n\
         u1,t1,s1,EURUSD,5,0,-1.0,2024-01-01 17:00:00,2024-01-01 09:00:00,1.0812,100000\n",
    );
    let mut source = CsvSource::new()
        .with_table("users", users.path())
        .with_table("trades", trades.path());
    let sink = MemorySink::new();

    QaRunner::new().run(&mut source, &sink).expect("run failed");

    assert!(sink.contains("Column 'volume' is always greater than 0: false"));
    assert!(sink.contains(
        "Column 'close_time' is always greater than column 'open_time': false"
    ));
}

#[test]
fn test_missing_column_aborts_validator() {
    // users table lacking the 'enable' column violates the check contract.
    let users = create_csv("login_hash,server_hash,country_hash,currency\nu1,s1,c1,USD\n");
    let trades = trades_csv();
    let mut source = CsvSource::new()
        .with_table("users", users.path())
        .with_table("trades", trades.path());
    let sink = MemorySink::new();

    let err = QaRunner::new().run(&mut source, &sink).unwrap_err();
    assert!(err.to_string().contains("enable"));
}
