//! Tabular record input for bulk prize and participant loads
//!
//! Rows arrive already split into fields. The first row of every table is a
//! header and is skipped by the bulk loaders.

use std::io::Read;

use crate::error::{DrawError, Result};
use crate::model::{Participant, Prize};

/// Field count of a prize row: `no, name, amount, desc`
pub const PRIZE_FIELDS: usize = 4;
/// Field count of a participant row: `id, name`
pub const PARTICIPANT_FIELDS: usize = 2;

fn check_len<S>(row: &[S], expected: usize) -> Result<()> {
    if row.len() != expected {
        return Err(DrawError::MalformedRecord {
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

fn parse_number(field: &'static str, raw: &str) -> Result<i64> {
    raw.trim_matches(' ')
        .parse()
        .map_err(|source| DrawError::InvalidNumber {
            field,
            value: raw.to_string(),
            source,
        })
}

/// Parse a `no, name, amount, desc` row
pub fn parse_prize_row<S: AsRef<str>>(row: &[S]) -> Result<Prize> {
    check_len(row, PRIZE_FIELDS)?;
    let no = parse_number("no", row[0].as_ref())?;
    let amount = parse_number("amount", row[2].as_ref())?;
    Ok(Prize::new(no, row[1].as_ref(), amount, row[3].as_ref()))
}

/// Parse an `id, name` row
pub fn parse_participant_row<S: AsRef<str>>(row: &[S]) -> Result<Participant> {
    check_len(row, PARTICIPANT_FIELDS)?;
    Ok(Participant::new(row[0].as_ref(), row[1].as_ref()))
}

/// Read CSV rows, header included. Blank lines are dropped and every row
/// must have as many fields as the first.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prize_row_trims_numbers() {
        let prize = parse_prize_row(&[" 3 ", "Phone", " 2", "A shiny phone"]).unwrap();
        assert_eq!(prize, Prize::new(3, "Phone", 2, "A shiny phone"));
    }

    #[test]
    fn test_parse_prize_row_wrong_field_count() {
        let err = parse_prize_row(&["1", "Phone", "2"]).unwrap_err();
        assert!(matches!(
            err,
            DrawError::MalformedRecord {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn test_parse_prize_row_bad_number() {
        let err = parse_prize_row(&["1", "Phone", "two", ""]).unwrap_err();
        match err {
            DrawError::InvalidNumber { field, value, .. } => {
                assert_eq!(field, "amount");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_participant_row() {
        let p = parse_participant_row(&["007", "Bond"]).unwrap();
        assert_eq!(p, Participant::new("007", "Bond"));
        assert!(matches!(
            parse_participant_row(&["007"]),
            Err(DrawError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_read_rows_skips_blank_lines() {
        let input = "id,name\r\n1,Alice\n\n2,Bob\n";
        let rows = read_rows(input.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["id".to_string(), "name".to_string()],
                vec!["1".to_string(), "Alice".to_string()],
                vec!["2".to_string(), "Bob".to_string()],
            ]
        );
    }

    #[test]
    fn test_read_rows_quoted_fields() {
        let input = "no,name,amount,desc\n1,Car,1,\"Red, shiny\"\n2,\"Say \"\"cheese\"\"\",3,\n";
        let rows = read_rows(input.as_bytes()).unwrap();
        assert_eq!(rows[1], vec!["1", "Car", "1", "Red, shiny"]);
        assert_eq!(rows[2][1], "Say \"cheese\"");

        let prize = parse_prize_row(&rows[1]).unwrap();
        assert_eq!(prize, Prize::new(1, "Car", 1, "Red, shiny"));
    }

    #[test]
    fn test_read_rows_ragged_input() {
        let input = "id,name\n1,Alice,extra\n";
        assert!(matches!(read_rows(input.as_bytes()), Err(DrawError::Csv(_))));
    }
}
