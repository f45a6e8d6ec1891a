//! CSV dataset reader
//!
//! Resolves the header against the known columns, detects the delimiter from
//! the header line and turns every data record into a `RawRow`. Parsing into
//! typed rows happens in `TableStore::load`.

use super::record::{Field, RawRow};
use super::table::TableStore;
use crate::error::{LoadError, SchemaError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Candidate delimiters in priority order
const DELIMITERS: &[u8] = b",;\t|";

/// Pick the candidate delimiter that occurs most often in the header line.
///
/// Falls back to comma when none appears.
fn detect_delimiter(header_line: &str) -> u8 {
    let mut best = b',';
    let mut best_count = 0usize;
    for &delim in DELIMITERS {
        let count = header_line.bytes().filter(|&b| b == delim).count();
        if count > best_count {
            best_count = count;
            best = delim;
        }
    }
    best
}

/// Read every data record of a CSV input as raw rows.
///
/// Unknown columns are ignored. A required column missing from the header
/// fails before any record is read.
pub fn read_csv<R: Read>(mut input: R) -> Result<Vec<RawRow>, LoadError> {
    let mut content = String::new();
    input.read_to_string(&mut content)?;
    let header_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(header_line);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let columns: Vec<Option<Field>> = reader
        .headers()?
        .iter()
        .map(Field::from_column)
        .collect();

    for field in Field::all() {
        if !columns.contains(&Some(field)) {
            return Err(SchemaError::MissingColumn {
                line: 1,
                column: field.as_str(),
            }
            .into());
        }
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        let mut row = RawRow::new(line);
        for (column, value) in columns.iter().zip(record.iter()) {
            if let Some(field) = column {
                row.set(*field, Some(value.to_string()));
            }
        }
        rows.push(row);
    }

    log::debug!(
        "📄 Parsed {} CSV records (delimiter {:?})",
        rows.len(),
        delimiter as char
    );
    Ok(rows)
}

/// Load a CSV file into the table, returning the number of rows loaded
pub fn load_csv_path(table: &mut TableStore, path: impl AsRef<Path>) -> Result<usize, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let rows = read_csv(BufReader::new(file))?;
    let loaded = table.load(rows)?;
    log::info!("📥 Loaded {} rows from {}", loaded, path.display());
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const HEADER: &str =
        "transactions_id,sale_date,sale_time,customer_id,gender,age,category,quantiy,price_per_unit,cogs,total_sale";

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
        assert_eq!(detect_delimiter("single"), b',');
    }

    #[test]
    fn test_read_csv_with_source_header() {
        let data = format!(
            "{}\n180,2022-11-05,10:47:00,117,Male,41,Clothing,3,300,129,900\n522,2022-07-09,11:00:00,52,Male,46,Beauty,,25,,\n",
            HEADER
        );
        let rows = read_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[0].cell(Field::Quantity).unwrap(), Some("3"));
        assert_eq!(rows[1].cell(Field::Quantity).unwrap(), None);
        assert_eq!(rows[1].cell(Field::TotalSale).unwrap(), None);
    }

    #[test]
    fn test_read_csv_reordered_and_extra_columns() {
        let data = "note,total_sale,cogs,price_per_unit,quantity,category,age,gender,customer_id,sale_time,sale_date,transaction_id\n\
                    x,100,40,50,2,Beauty,22,Female,9,08:15:00,2023-02-01,1\n";
        let mut table = TableStore::new();
        table.load(read_csv(data.as_bytes()).unwrap()).unwrap();
        let sale = table.records().next().unwrap();
        assert_eq!(sale.transaction_id, 1);
        assert_eq!(sale.quantity, 2);
        assert_eq!(sale.total_sale, Some(100.0));
    }

    #[test]
    fn test_missing_column_fails_before_rows() {
        let data = "transactions_id,sale_date,sale_time,customer_id,gender,age,category,price_per_unit,cogs,total_sale\n1,2022-01-01,10:00,1,Male,30,Beauty,10,5,10\n";
        match read_csv(data.as_bytes()) {
            Err(LoadError::Schema(SchemaError::MissingColumn { line, column })) => {
                assert_eq!(line, 1);
                assert_eq!(column, "quantity");
            }
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_semicolon_file_loads_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", HEADER.replace(',', ";")).unwrap();
        writeln!(file, "1;2022-11-05;19:10:00;50;Female;34;Beauty;3;50;16.5;150").unwrap();
        writeln!(file, "2;2022-11-06;09:00:00;51;Male;25;Electronics;1;500;200;500").unwrap();
        drop(file);

        let mut table = TableStore::new();
        assert_eq!(load_csv_path(&mut table, &path).unwrap(), 2);
        assert_eq!(table.count(), 2);
    }

    #[test]
    fn test_unparsable_value_reports_line() {
        let data = format!("{}\n1,2022-11-05,10:00:00,1,Male,30,Beauty,two,10,5,20\n", HEADER);
        let mut table = TableStore::new();
        let err = table.load(read_csv(data.as_bytes()).unwrap()).unwrap_err();
        assert_eq!(err.line(), 2);
        assert!(err.to_string().contains("quantity"));
    }
}
