use std::fs;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use kira_timeline::io::table::{parse_table, read_table};
use tempfile::TempDir;

#[test]
fn reads_semicolon_table_and_pads_short_rows() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("clinical.csv");
    fs::write(&path, "patient_id;status;survival_in_days\nP1;1;30\nP2;0\n;;\n").unwrap();

    let table = read_table(&path, b';').unwrap();
    assert_eq!(table.headers, vec!["patient_id", "status", "survival_in_days"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1], vec!["P2", "0", ""]);
}

#[test]
fn reads_gzip_input() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("clinical.csv.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(b"patient_id,status\nP1,1\n").unwrap();
    fs::write(&path, enc.finish().unwrap()).unwrap();

    let table = read_table(&path, b',').unwrap();
    assert_eq!(table.rows, vec![vec!["P1".to_string(), "1".to_string()]]);
}

#[test]
fn header_whitespace_is_trimmed() {
    let table = parse_table(" patient_id , status \nP1,0\n".as_bytes(), b',', "inline").unwrap();
    assert_eq!(table.headers, vec!["patient_id", "status"]);
}

#[test]
fn missing_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    assert!(read_table(&tmp.path().join("absent.csv"), b',').is_err());
}
