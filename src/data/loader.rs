use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Column, Observation, ObservationTable, Period, SchemaError};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the survey table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – KOSIS export with a header row (`PRD_DE`, `ITM_ID`, …, `DT`)
/// * `.json`    – `[{ "PRD_DE": "202001", "ITM_ID": "T10", ... }, ...]`
/// * `.parquet` – same column names, text or numeric physical types
///
/// Extra columns are ignored. A missing column or a malformed cell fails the
/// whole load.
pub fn load_file(path: &Path) -> Result<ObservationTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    match table.year_span() {
        Some((first, last)) => log::info!(
            "Loaded {} observations ({first}–{last}) from {}",
            table.len(),
            path.display()
        ),
        None => log::warn!("{} contains no observations", path.display()),
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Cell – a raw value before it is checked against its column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Null => Ok(()),
        }
    }
}

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Turn one row's raw cells into a typed observation.
fn observation_from_cells(
    row: usize,
    mut cell: impl FnMut(Column) -> Cell,
) -> Result<Observation, SchemaError> {
    Ok(Observation {
        period: period(row, cell(Column::Period))?,
        item_id: required_text(row, Column::ItemId, cell(Column::ItemId))?,
        item_name: cell(Column::ItemName).to_string().trim().to_string(),
        sex_code: code(row, Column::SexCode, cell(Column::SexCode))?,
        sex_name: cell(Column::SexName).to_string().trim().to_string(),
        age_code: code(row, Column::AgeCode, cell(Column::AgeCode))?,
        age_name: cell(Column::AgeName).to_string().trim().to_string(),
        value: number(row, Column::Value, cell(Column::Value))?,
    })
}

fn period(row: usize, cell: Cell) -> Result<Period, SchemaError> {
    // Integer-typed columns (pandas, parquet) lose nothing: YYYYMM has no
    // leading zero.
    let code = match cell {
        Cell::Float(f) if f.fract() == 0.0 => format!("{}", f as i64),
        other => other.to_string().trim().to_string(),
    };
    Period::parse(&code).ok_or(SchemaError::MalformedPeriod { row, value: code })
}

fn required_text(row: usize, column: Column, cell: Cell) -> Result<String, SchemaError> {
    if cell.is_blank() {
        return Err(SchemaError::EmptyCell { row, column });
    }
    Ok(cell.to_string().trim().to_string())
}

fn code(row: usize, column: Column, cell: Cell) -> Result<i64, SchemaError> {
    let malformed = |value: String| SchemaError::MalformedCode { row, column, value };
    match cell {
        Cell::Integer(i) => Ok(i),
        Cell::Float(f) if f.fract() == 0.0 => Ok(f as i64),
        Cell::Float(f) => Err(malformed(f.to_string())),
        ref c if c.is_blank() => Err(SchemaError::EmptyCell { row, column }),
        Cell::Text(s) => s.trim().parse().map_err(|_| malformed(s)),
        Cell::Null => Err(SchemaError::EmptyCell { row, column }),
    }
}

fn number(row: usize, column: Column, cell: Cell) -> Result<f64, SchemaError> {
    let malformed = |value: String| SchemaError::MalformedValue { row, column, value };
    let value = match cell {
        Cell::Float(f) => f,
        Cell::Integer(i) => i as f64,
        ref c if c.is_blank() => return Err(SchemaError::EmptyCell { row, column }),
        Cell::Text(s) => s.trim().parse::<f64>().map_err(|_| malformed(s))?,
        Cell::Null => return Err(SchemaError::EmptyCell { row, column }),
    };
    // `f64::from_str` accepts "NaN" and "inf"; neither is a survey value.
    if !value.is_finite() {
        return Err(malformed(value.to_string()));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ObservationTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut positions = [0usize; Column::ALL.len()];
    for column in Column::ALL {
        positions[column as usize] = headers
            .iter()
            .position(|h| h == column.header())
            .ok_or(SchemaError::MissingColumn(column))?;
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV record {}", row_no + 1))?;
        // File line, header included, so quoted multi-line fields still point
        // at the right place.
        let line = record
            .position()
            .map_or(row_no + 2, |pos| pos.line() as usize);
        let observation = observation_from_cells(line, |column| {
            Cell::Text(record.get(positions[column as usize]).unwrap_or("").to_string())
        })?;
        rows.push(observation);
    }

    Ok(ObservationTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "PRD_DE": 202001, "ITM_ID": "T10", "ITM_NM": "15세이상인구 (천명)",
///     "C1": 0, "C1_NM": "계", "C2": 0, "C2_NM": "계", "DT": 44782 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ObservationTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("record {} is not a JSON object", i + 1))?;

        if let Some(column) = Column::ALL.into_iter().find(|c| !obj.contains_key(c.header())) {
            return Err(SchemaError::MissingColumn(column).into());
        }

        let observation = observation_from_cells(i + 1, |column| {
            obj.get(column.header()).map(json_to_cell).unwrap_or(Cell::Null)
        })?;
        rows.push(observation);
    }

    Ok(ObservationTable::from_rows(rows))
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the survey table.
///
/// Works with files written by **Pandas** (`df.to_parquet()`), where
/// `PRD_DE`, `C1` and `C2` usually come out as `Int64`, as well as files that
/// keep every column as text.
fn load_parquet(path: &Path) -> Result<ObservationTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns: Vec<&ArrayRef> = Vec::with_capacity(Column::ALL.len());
        for column in Column::ALL {
            let idx = schema
                .index_of(column.header())
                .map_err(|_| SchemaError::MissingColumn(column))?;
            columns.push(batch.column(idx));
        }

        let offset = rows.len();
        for row in 0..batch.num_rows() {
            let observation = observation_from_cells(offset + row + 1, |column| {
                extract_cell(columns[column as usize], row)
            })?;
            rows.push(observation);
        }
    }

    Ok(ObservationTable::from_rows(rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Utf8View => Cell::Text(col.as_string_view().value(row).to_string()),
        DataType::Int32 => Cell::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Cell::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        other => Cell::Text(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "PRD_DE,ITM_ID,ITM_NM,C1,C1_NM,C2,C2_NM,DT,UNIT_NM";

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn schema_error(err: &anyhow::Error) -> SchemaError {
        err.downcast_ref::<SchemaError>()
            .cloned()
            .unwrap_or_else(|| panic!("not a schema error: {err:#}"))
    }

    #[test]
    fn loads_kosis_csv_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n\
             202002,T10,15세이상인구 (천명),0,계,0,계,62.8,천명\n\
             202001,T10,15세이상인구 (천명),0,계,0,계,63.1,천명\n\
             202001,T30,취업자 (천명),1,남자,15,15 - 19세,7.5,천명\n"
        );
        let table = load_file(&write_file(&dir, "kosis_data.csv", &csv)).unwrap();

        assert_eq!(table.len(), 3);
        let first = &table.rows()[0];
        assert_eq!(first.period.code(), "202002");
        assert_eq!(first.period.month(), 2);
        assert_eq!(first.item_name, "15세이상인구 (천명)");
        assert_eq!(first.value, 62.8);
        let last = &table.rows()[2];
        assert_eq!((last.sex_code, last.age_code), (1, 15));
        assert_eq!(last.age_name, "15 - 19세");
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.csv", "PRD_DE,ITM_ID,ITM_NM,C1,C1_NM,C2,DT\n");
        let err = load_file(&path).unwrap_err();
        assert_eq!(schema_error(&err), SchemaError::MissingColumn(Column::AgeName));
    }

    #[test]
    fn malformed_period_is_reported_with_file_line() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n\
             202001,T10,a,0,계,0,계,1.0,천명\n\
             2020-02,T10,a,0,계,0,계,1.0,천명\n"
        );
        let err = load_file(&write_file(&dir, "bad.csv", &csv)).unwrap_err();
        assert_eq!(
            schema_error(&err),
            SchemaError::MalformedPeriod {
                row: 3,
                value: "2020-02".into()
            }
        );
    }

    #[test]
    fn placeholder_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!("{HEADER}\n202001,T10,a,0,계,0,계,-,천명\n");
        let err = load_file(&write_file(&dir, "bad.csv", &csv)).unwrap_err();
        assert!(matches!(
            schema_error(&err),
            SchemaError::MalformedValue { row: 2, column: Column::Value, .. }
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for (text, shown) in [("NaN", "NaN"), ("inf", "inf"), ("-inf", "-inf")] {
            let csv = format!(
                "{HEADER}\n\
                 202001,T10,a,0,계,0,계,1.0,천명\n\
                 202002,T10,a,0,계,0,계,{text},천명\n"
            );
            let err = load_file(&write_file(&dir, "bad.csv", &csv)).unwrap_err();
            assert_eq!(
                schema_error(&err),
                SchemaError::MalformedValue {
                    row: 3,
                    column: Column::Value,
                    value: shown.into()
                }
            );
        }
    }

    #[test]
    fn non_finite_json_and_parquet_cells_are_rejected() {
        assert_eq!(
            number(1, Column::Value, Cell::Float(f64::NAN)),
            Err(SchemaError::MalformedValue {
                row: 1,
                column: Column::Value,
                value: "NaN".into()
            })
        );
        assert!(number(1, Column::Value, Cell::Float(f64::INFINITY)).is_err());
        assert_eq!(number(1, Column::Value, Cell::Float(62.8)), Ok(62.8));
        assert_eq!(number(1, Column::Value, Cell::Integer(44782)), Ok(44782.0));
    }

    #[test]
    fn json_errors_count_records_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[
            {"PRD_DE": 202001, "ITM_ID": "T10", "ITM_NM": "x",
             "C1": 0, "C1_NM": "계", "C2": 0, "C2_NM": "계", "DT": 1.0},
            {"PRD_DE": 202013, "ITM_ID": "T10", "ITM_NM": "x",
             "C1": 0, "C1_NM": "계", "C2": 0, "C2_NM": "계", "DT": 1.0}
        ]"#;
        let err = load_file(&write_file(&dir, "data.json", json)).unwrap_err();
        assert_eq!(
            schema_error(&err),
            SchemaError::MalformedPeriod {
                row: 2,
                value: "202013".into()
            }
        );
    }

    #[test]
    fn non_integer_code_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!("{HEADER}\n202001,T10,a,male,계,0,계,1.0,천명\n");
        let err = load_file(&write_file(&dir, "bad.csv", &csv)).unwrap_err();
        assert!(matches!(
            schema_error(&err),
            SchemaError::MalformedCode { column: Column::SexCode, .. }
        ));
    }

    #[test]
    fn loads_json_records_with_numeric_period() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[
            {"PRD_DE": 202001, "ITM_ID": "T10", "ITM_NM": "15세이상인구 (천명)",
             "C1": 0, "C1_NM": "계", "C2": 0, "C2_NM": "계", "DT": 44782}
        ]"#;
        let table = load_file(&write_file(&dir, "data.json", json)).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.period.year(), "2020");
        assert_eq!(row.value, 44782.0);
    }

    #[test]
    fn json_without_value_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[{"PRD_DE": "202001", "ITM_ID": "T10", "ITM_NM": "x",
                        "C1": 0, "C1_NM": "계", "C2": 0, "C2_NM": "계"}]"#;
        let err = load_file(&write_file(&dir, "data.json", json)).unwrap_err();
        assert_eq!(schema_error(&err), SchemaError::MissingColumn(Column::Value));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("kosis_data.xlsx")).unwrap_err();
        assert_eq!(
            schema_error(&err),
            SchemaError::UnsupportedExtension("xlsx".into())
        );
    }

    #[test]
    fn cell_conversion_accepts_whole_floats_for_codes() {
        assert_eq!(code(0, Column::AgeCode, Cell::Float(15.0)), Ok(15));
        assert!(code(0, Column::AgeCode, Cell::Float(15.5)).is_err());
        assert_eq!(
            code(4, Column::SexCode, Cell::Text(" ".into())),
            Err(SchemaError::EmptyCell { row: 4, column: Column::SexCode })
        );
        assert_eq!(period(0, Cell::Integer(202012)).unwrap().month(), 12);
    }
}
