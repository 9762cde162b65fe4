use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// (code, name, level, is_rate)
const ITEMS: [(&str, &str, f64, bool); 8] = [
    ("T10", "15세이상인구 (천명)", 44_700.0, false),
    ("T20", "경제활동인구 (천명)", 28_100.0, false),
    ("T30", "취업자 (천명)", 26_900.0, false),
    ("T40", "실업자 (천명)", 1_150.0, false),
    ("T50", "비경제활동인구 (천명)", 16_600.0, false),
    ("T60", "경제활동참가율 (%)", 62.9, true),
    ("T80", "실업률 (%)", 4.1, true),
    ("T90", "고용률 (%)", 60.3, true),
];

/// (code, name, share of counts, factor on rates)
const SEXES: [(i64, &str, f64, f64); 3] = [
    (0, "계", 1.0, 1.0),
    (1, "남자", 0.49, 1.17),
    (2, "여자", 0.51, 0.84),
];

const AGES: [(i64, &str, f64, f64); 7] = [
    (0, "계", 1.0, 1.0),
    (15, "15 - 19세", 0.05, 0.14),
    (20, "20 - 29세", 0.14, 0.99),
    (30, "30 - 39세", 0.16, 1.24),
    (40, "40 - 49세", 0.19, 1.27),
    (50, "50 - 59세", 0.19, 1.22),
    (60, "60세이상", 0.27, 0.69),
];

/// Years and the number of months published for each.
const YEARS: [(i64, u32); 4] = [(2018, 12), (2019, 12), (2020, 12), (2021, 6)];

#[derive(Serialize)]
struct Row {
    #[serde(rename = "PRD_DE")]
    period: i64,
    #[serde(rename = "ITM_ID")]
    item_id: &'static str,
    #[serde(rename = "ITM_NM")]
    item_name: &'static str,
    #[serde(rename = "C1")]
    sex_code: i64,
    #[serde(rename = "C1_NM")]
    sex_name: &'static str,
    #[serde(rename = "C2")]
    age_code: i64,
    #[serde(rename = "C2_NM")]
    age_name: &'static str,
    #[serde(rename = "DT")]
    value: f64,
    #[serde(rename = "UNIT_NM")]
    unit: &'static str,
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Level for one month: yearly drift, a winter dip and a little noise.
fn monthly_value(level: f64, year_index: usize, month: u32, rng: &mut SimpleRng) -> f64 {
    let trend = 1.0 + 0.004 * year_index as f64;
    let season = 1.0 - 0.012 * (2.0 * std::f64::consts::PI * (month as f64 - 7.0) / 12.0).cos();
    let noisy = level * trend * season * (1.0 + rng.gauss(0.0, 0.002));
    (noisy * 10.0).round() / 10.0
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::new();

    // KOSIS exports are grouped by item, then breakdown, then period.
    for &(item_id, item_name, level, is_rate) in &ITEMS {
        for &(sex_code, sex_name, sex_share, sex_factor) in &SEXES {
            for &(age_code, age_name, age_share, age_factor) in &AGES {
                let base = if is_rate {
                    (level * sex_factor * age_factor).min(99.0)
                } else {
                    level * sex_share * age_share
                };
                for (year_index, &(year, months)) in YEARS.iter().enumerate() {
                    for month in 1..=months {
                        rows.push(Row {
                            period: year * 100 + month as i64,
                            item_id,
                            item_name,
                            sex_code,
                            sex_name,
                            age_code,
                            age_name,
                            value: monthly_value(base, year_index, month, &mut rng),
                            unit: if is_rate { "%" } else { "천명" },
                        });
                    }
                }
            }
        }
    }

    // Write CSV
    let csv_path = "kosis_data.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    for row in &rows {
        writer.serialize(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    // Build Arrow arrays
    let schema = Arc::new(Schema::new(vec![
        Field::new("PRD_DE", DataType::Int64, false),
        Field::new("ITM_ID", DataType::Utf8, false),
        Field::new("ITM_NM", DataType::Utf8, false),
        Field::new("C1", DataType::Int64, false),
        Field::new("C1_NM", DataType::Utf8, false),
        Field::new("C2", DataType::Int64, false),
        Field::new("C2_NM", DataType::Utf8, false),
        Field::new("DT", DataType::Float64, false),
        Field::new("UNIT_NM", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.period))) as ArrayRef,
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.item_id))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.item_name))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.sex_code))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.sex_name))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.age_code))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.age_name))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.value))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.unit))),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "kosis_data.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} observations to {csv_path} and {parquet_path}",
        rows.len()
    );
}
