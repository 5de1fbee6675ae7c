use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord};

/// Source column names.
pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per row (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field, located by name
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv_reader(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            load_json_str(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Row shape shared by CSV and JSON
// ---------------------------------------------------------------------------

/// One source row, before validation.
/// `class` is read as a float because pandas exports it as `1.0` at times.
#[derive(Debug, Deserialize)]
struct LaunchRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version Category", default)]
    booster_version_category: String,
}

impl LaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord> {
        let class = class_from_f64(self.class).with_context(|| format!("Row {row}"))?;
        LaunchRecord::new(
            self.launch_site,
            self.payload_mass_kg,
            class,
            self.booster_version_category,
        )
        .with_context(|| format!("Row {row}"))
    }
}

fn class_from_f64(v: f64) -> Result<i64> {
    if v.fract() != 0.0 || !v.is_finite() {
        bail!("class must be an integer, got {v}");
    }
    Ok(v as i64)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV from any reader. Columns are matched by header name.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<LaunchRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(row.into_record(row_no)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 1,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
pub fn load_json_str(text: &str) -> Result<LaunchDataset> {
    let rows: Vec<LaunchRow> = serde_json::from_str(text).context("parsing JSON")?;
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| row.into_record(i))
        .collect::<Result<Vec<_>>>()?;
    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Numeric columns may be any of the
/// common integer or float widths.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    read_parquet(file, PARQUET_BATCH_SIZE)
}

/// Rows decoded per record batch.
const PARQUET_BATCH_SIZE: usize = 1024;

fn read_parquet(file: std::fs::File, batch_size: usize) -> Result<LaunchDataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder
        .with_batch_size(batch_size)
        .build()
        .context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();
        records.extend(records_from_batch(&batch, offset)?);
    }

    Ok(LaunchDataset::from_records(records))
}

/// Convert one record batch; `offset` is the global index of its first row.
fn records_from_batch(batch: &RecordBatch, offset: usize) -> Result<Vec<LaunchRecord>> {
    let site_col = column(batch, COL_LAUNCH_SITE)?;
    let payload_col = column(batch, COL_PAYLOAD_MASS)?;
    let class_col = column(batch, COL_CLASS)?;
    let booster_col = column(batch, COL_BOOSTER_CATEGORY)?;

    (0..batch.num_rows())
        .map(|row| {
            let global = offset + row;
            let site = extract_string(site_col, row)
                .with_context(|| format!("Row {global}: '{COL_LAUNCH_SITE}'"))?;
            let payload = extract_f64(payload_col, row)
                .with_context(|| format!("Row {global}: '{COL_PAYLOAD_MASS}'"))?;
            let class = extract_f64(class_col, row)
                .and_then(class_from_f64)
                .with_context(|| format!("Row {global}: '{COL_CLASS}'"))?;
            // A missing category is allowed, as in the CSV and JSON loaders.
            let booster = if booster_col.is_null(row) {
                String::new()
            } else {
                extract_string(booster_col, row)
                    .with_context(|| format!("Row {global}: '{COL_BOOSTER_CATEGORY}'"))?
            };

            LaunchRecord::new(site, payload, class, booster).with_context(|| format!("Row {global}"))
        })
        .collect()
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected string column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        other => bail!("Expected numeric column, got {other:?}"),
    };
    value.context("column type does not match its array")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    const CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
2,3,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,17,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
4,26,VAFB SLC-4E,1,9600.0,F9 B4 B1041.1,B4
";

    #[test]
    fn test_csv_ignores_extra_columns() {
        let ds = load_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.records[3].launch_site, "KSC LC-39A");
        assert_eq!(ds.records[3].payload_mass_kg, 2490.0);
        assert_eq!(ds.records[3].outcome, Outcome::Success);
        assert_eq!(ds.records[4].booster_version_category, "B4");
        assert_eq!(ds.payload_bounds.low(), 0.0);
        assert_eq!(ds.payload_bounds.high(), 9600.0);
    }

    #[test]
    fn test_csv_rejects_bad_class() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nKSC LC-39A,100,3,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("class must be 0 or 1"));
    }

    #[test]
    fn test_csv_missing_column_fails() {
        let csv = "Launch Site,class\nKSC LC-39A,1\n";
        assert!(load_csv_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_json_records() {
        let json = r#"[
            {"Launch Site": "CCAFS SLC-40", "Payload Mass (kg)": 3669.0, "class": 1.0, "Booster Version Category": "FT"},
            {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 500, "class": 0, "Booster Version Category": "v1.1"}
        ]"#;
        let ds = load_json_str(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[1].payload_mass_kg, 500.0);
        assert_eq!(ds.booster_categories.len(), 2);
    }

    #[test]
    fn test_json_rejects_fractional_class() {
        let json = r#"[{"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 1.0, "class": 0.5}]"#;
        let err = load_json_str(json).unwrap_err();
        assert!(format!("{err:#}").contains("Row 0"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    // -- Parquet --

    use arrow::array::{ArrayRef, LargeStringArray};
    use parquet::arrow::ArrowWriter;

    /// Write one record batch to a temporary `.parquet` file.
    fn parquet_file(columns: Vec<(&str, ArrayRef)>) -> tempfile::NamedTempFile {
        let tmp = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let batch = RecordBatch::try_from_iter(columns).unwrap();
        let file = std::fs::File::create(tmp.path()).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        tmp
    }

    fn sites(values: Vec<Option<&str>>) -> ArrayRef {
        Arc::new(StringArray::from(values))
    }

    #[test]
    fn test_parquet_int_payload_float_class() {
        let tmp = parquet_file(vec![
            (COL_LAUNCH_SITE, sites(vec![Some("KSC LC-39A"), Some("VAFB SLC-4E")])),
            (COL_PAYLOAD_MASS, Arc::new(Int32Array::from(vec![2490, 9600])) as ArrayRef),
            (COL_CLASS, Arc::new(Float64Array::from(vec![1.0, 0.0])) as ArrayRef),
            (COL_BOOSTER_CATEGORY, sites(vec![Some("FT"), Some("B4")])),
        ]);
        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].payload_mass_kg, 2490.0);
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
        assert_eq!(ds.records[1].booster_version_category, "B4");
        assert_eq!(ds.payload_bounds.high(), 9600.0);
    }

    #[test]
    fn test_parquet_large_utf8_and_float32() {
        let tmp = parquet_file(vec![
            (COL_LAUNCH_SITE, Arc::new(LargeStringArray::from(vec!["CCAFS SLC-40"])) as ArrayRef),
            (COL_PAYLOAD_MASS, Arc::new(Float32Array::from(vec![3669.5f32])) as ArrayRef),
            (COL_CLASS, Arc::new(Int64Array::from(vec![1i64])) as ArrayRef),
            (COL_BOOSTER_CATEGORY, Arc::new(LargeStringArray::from(vec!["FT"])) as ArrayRef),
        ]);
        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.records[0].launch_site, "CCAFS SLC-40");
        assert_eq!(ds.records[0].payload_mass_kg, 3669.5);
        assert_eq!(ds.records[0].booster_version_category, "FT");
    }

    #[test]
    fn test_parquet_numeric_booster_column_fails() {
        let tmp = parquet_file(vec![
            (COL_LAUNCH_SITE, sites(vec![Some("KSC LC-39A"), Some("KSC LC-39A")])),
            (COL_PAYLOAD_MASS, Arc::new(Float64Array::from(vec![100.0, 200.0])) as ArrayRef),
            (COL_CLASS, Arc::new(Int64Array::from(vec![1i64, 0])) as ArrayRef),
            (COL_BOOSTER_CATEGORY, Arc::new(Int64Array::from(vec![4i64, 5])) as ArrayRef),
        ]);
        let err = load_file(tmp.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 0: 'Booster Version Category'"), "{msg}");
        assert!(msg.contains("Expected string column"), "{msg}");
    }

    #[test]
    fn test_parquet_null_booster_is_empty() {
        let tmp = parquet_file(vec![
            (COL_LAUNCH_SITE, sites(vec![Some("KSC LC-39A"), Some("KSC LC-39A")])),
            (COL_PAYLOAD_MASS, Arc::new(Float64Array::from(vec![100.0, 200.0])) as ArrayRef),
            (COL_CLASS, Arc::new(Int64Array::from(vec![1i64, 0])) as ArrayRef),
            (COL_BOOSTER_CATEGORY, sites(vec![Some("B5"), None])),
        ]);
        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.records[0].booster_version_category, "B5");
        assert_eq!(ds.records[1].booster_version_category, "");
    }

    #[test]
    fn test_parquet_missing_column_fails() {
        let tmp = parquet_file(vec![
            (COL_LAUNCH_SITE, sites(vec![Some("KSC LC-39A")])),
            (COL_PAYLOAD_MASS, Arc::new(Float64Array::from(vec![100.0])) as ArrayRef),
            (COL_BOOSTER_CATEGORY, sites(vec![Some("FT")])),
        ]);
        let err = load_file(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("missing 'class' column"), "{err:#}");
    }

    #[test]
    fn test_parquet_error_row_spans_batches() {
        let tmp = parquet_file(vec![
            (
                COL_LAUNCH_SITE,
                sites(vec![Some("KSC LC-39A"), Some("KSC LC-39A"), Some("VAFB SLC-4E"), None]),
            ),
            (COL_PAYLOAD_MASS, Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0, 4.0])) as ArrayRef),
            (COL_CLASS, Arc::new(Int64Array::from(vec![1i64, 0, 1, 1])) as ArrayRef),
            (COL_BOOSTER_CATEGORY, sites(vec![Some("FT"); 4])),
        ]);

        // Two rows per batch: the null site is row 1 of the second batch.
        let err = read_parquet(tmp.reopen().unwrap(), 2).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 3: 'Launch Site'"), "{msg}");
        assert!(msg.contains("null value"), "{msg}");
    }

    #[test]
    fn test_parquet_batches_keep_order() {
        let tmp = parquet_file(vec![
            (COL_LAUNCH_SITE, sites(vec![Some("A"), Some("B"), Some("C")])),
            (COL_PAYLOAD_MASS, Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])) as ArrayRef),
            (COL_CLASS, Arc::new(Int64Array::from(vec![1i64, 0, 1])) as ArrayRef),
            (COL_BOOSTER_CATEGORY, sites(vec![Some("FT"); 3])),
        ]);
        let ds = read_parquet(tmp.reopen().unwrap(), 2).unwrap();
        let order: Vec<&str> = ds.records.iter().map(|r| r.launch_site.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
    }
}
