use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{
    COL_CATEGORY, COL_EXPERIENCE, COL_SALARY, COL_SKILLS, COL_TITLE, JobDataset, JobRecord,
    REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a job postings dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `TITLE, CATEGORY, SKILLS, EXPERIENCE, SALARY`
/// * `.json`    – `[{ "TITLE": ..., "CATEGORY": ..., ... }, ...]`
/// * `.parquet` – one column per field
///
/// Extra columns are ignored. A missing column or an unparsable cell fails
/// the whole load.
pub fn load_file(path: &Path) -> Result<JobDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

/// Parse an experience cell. Integral floats such as `"3.0"` are accepted.
fn parse_experience(s: &str, row: usize) -> Result<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>() {
        Ok(f) => whole_years(f, row),
        Err(_) => bail!("Row {row}: {COL_EXPERIENCE} '{s}' is not a whole number of years"),
    }
}

/// Convert a numeric experience value to whole years without saturating.
fn whole_years(f: f64, row: usize) -> Result<i64> {
    // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
    let in_range = (i64::MIN as f64..i64::MAX as f64).contains(&f);
    if f.fract() != 0.0 || !in_range {
        bail!("Row {row}: {COL_EXPERIENCE} '{f}' is not a whole number of years");
    }
    Ok(f as i64)
}

fn parse_salary(s: &str, row: usize) -> Result<f64> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(v) => finite_salary(v, row),
        Err(_) => bail!("Row {row}: {COL_SALARY} '{s}' is not a number"),
    }
}

fn finite_salary(v: f64, row: usize) -> Result<f64> {
    if !v.is_finite() {
        bail!("Row {row}: {COL_SALARY} '{v}' is not a number");
    }
    Ok(v)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<JobDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<JobDataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut idx = [0usize; 5];
    for (slot, col) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == col)
            .with_context(|| format!("CSV missing '{col}' column"))?;
    }
    let [title_idx, category_idx, skills_idx, exp_idx, salary_idx] = idx;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |i: usize| record.get(i).unwrap_or("");

        records.push(JobRecord::new(
            cell(title_idx),
            cell(category_idx),
            cell(skills_idx),
            parse_experience(cell(exp_idx), row_no)?,
            parse_salary(cell(salary_idx), row_no)?,
        ));
    }

    Ok(JobDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).
/// Numeric cells may be JSON numbers or numeric strings.
#[derive(Debug, Deserialize)]
struct JsonJob {
    #[serde(rename = "TITLE")]
    title: String,
    #[serde(rename = "CATEGORY")]
    category: String,
    #[serde(rename = "SKILLS")]
    skills: String,
    #[serde(rename = "EXPERIENCE")]
    experience: JsonValue,
    #[serde(rename = "SALARY")]
    salary: JsonValue,
}

fn load_json(path: &Path) -> Result<JobDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<JobDataset> {
    let rows: Vec<JsonJob> = serde_json::from_str(text).context("parsing JSON job records")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let experience = parse_experience(&json_scalar_text(&row.experience), i)?;
        let salary = parse_salary(&json_scalar_text(&row.salary), i)?;
        records.push(JobRecord::new(
            row.title,
            row.category,
            &row.skills,
            experience,
            salary,
        ));
    }

    Ok(JobDataset::from_records(records))
}

fn json_scalar_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`), Polars or the
/// `generate_sample` binary.
///
/// Text columns must be Utf8/LargeUtf8; numeric columns may be Int32, Int64,
/// Float32 or Float64.
fn load_parquet(path: &Path) -> Result<JobDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    // An empty file yields no batches, so check the schema itself.
    let schema = builder.schema();
    for col in REQUIRED_COLUMNS {
        schema
            .index_of(col)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{col}' column"))?;
    }

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let title = column(&batch, COL_TITLE)?;
        let category = column(&batch, COL_CATEGORY)?;
        let skills = column(&batch, COL_SKILLS)?;
        let experience = column(&batch, COL_EXPERIENCE)?;
        let salary = column(&batch, COL_SALARY)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let exp = extract_f64(experience, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_EXPERIENCE}'"))?;
            let salary_value = extract_f64(salary, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_SALARY}'"))?;
            records.push(JobRecord::new(
                extract_string(title, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{COL_TITLE}'"))?,
                extract_string(category, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{COL_CATEGORY}'"))?,
                &extract_string(skills, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{COL_SKILLS}'"))?,
                whole_years(exp, row_no)?,
                finite_salary(salary_value, row_no)?,
            ));
        }
    }

    Ok(JobDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let i = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(i))
}

/// Extract a string cell; nulls read as empty text.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
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
        other => bail!("Expected a text column, got {other:?}"),
    }
}

/// Extract a numeric cell as `f64`; nulls are an error.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    value.context("column array does not match its data type")
}
