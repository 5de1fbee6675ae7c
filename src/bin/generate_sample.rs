use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const CSV_PATH: &str = "spacex_launch_dash.csv";
const PARQUET_PATH: &str = "spacex_launch_dash.parquet";

/// Booster generations in flight order: (category, launches, success rate, max payload kg).
const BOOSTERS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 0.2, 700.0),
    ("v1.1", 15, 0.35, 4500.0),
    ("FT", 24, 0.65, 7000.0),
    ("B4", 10, 0.55, 9600.0),
    ("B5", 2, 1.0, 6000.0),
];

/// Which pads each booster generation flew from.
fn sites_for(category: &str) -> &'static [&'static str] {
    match category {
        "v1.0" => &["CCAFS LC-40"],
        "v1.1" => &["CCAFS LC-40", "VAFB SLC-4E"],
        "FT" => &["KSC LC-39A", "CCAFS SLC-40", "VAFB SLC-4E", "CCAFS LC-40"],
        _ => &["KSC LC-39A", "CCAFS SLC-40", "VAFB SLC-4E"],
    }
}

#[derive(Debug, Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: &'static str,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: &'static str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<LaunchRow> {
    let mut rows = Vec::new();
    for &(category, launches, success_rate, max_payload) in &BOOSTERS {
        for _ in 0..launches {
            // Round to whole kilograms like the published manifest.
            let payload = (rng.next_f64() * max_payload).round();
            let class = i64::from(rng.next_f64() < success_rate);
            let flight_number = rows.len() as i64 + 1;
            rows.push(LaunchRow {
                flight_number,
                launch_site: *rng.pick(sites_for(category)),
                class,
                payload_mass_kg: payload,
                booster_version_category: category,
            });
        }
    }
    rows
}

fn write_csv(rows: &[LaunchRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[LaunchRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.launch_site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version_category),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(PARQUET_PATH).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows)?;
    write_parquet(&rows)?;

    println!("Wrote {} launches to {CSV_PATH} and {PARQUET_PATH}", rows.len());
    Ok(())
}
