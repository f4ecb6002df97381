use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One output row, headed the way the published census table is.
#[derive(Debug, Clone, Serialize)]
struct Row {
    #[serde(rename = "都道府県コード")]
    code: String,
    #[serde(rename = "都道府県名")]
    prefecture: String,
    #[serde(rename = "元号")]
    era: String,
    #[serde(rename = "和暦（年）")]
    era_year: i64,
    #[serde(rename = "西暦（年）")]
    year: i64,
    #[serde(rename = "年齢5歳階級")]
    age_bracket: String,
    #[serde(rename = "人口（総数）")]
    population: i64,
    #[serde(rename = "人口（男）")]
    male: i64,
    #[serde(rename = "人口（女）")]
    female: i64,
}

const TOTAL: &str = "総数";

/// SplitMix64: deterministic, one word of state.
struct SimpleRng(u64);

impl SimpleRng {
    /// Uniform in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        let unit = (z >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }
}

/// Era label and era-relative year for a census year.
fn era_of(year: i64) -> (&'static str, i64) {
    match year {
        ..=1925 => ("大正", year - 1911),
        1926..=1988 => ("昭和", year - 1925),
        _ => ("平成", year - 1988),
    }
}

fn age_brackets() -> Vec<String> {
    let mut labels: Vec<String> = (0..17)
        .map(|i| format!("{}～{}歳", i * 5, i * 5 + 4))
        .collect();
    labels.push("85歳以上".to_string());
    labels
}

/// Population of one bracket: a pyramid that ages over the century.
fn bracket_population(base: f64, bracket: usize, n_brackets: usize, year: i64, rng: &mut SimpleRng) -> i64 {
    let age_pos = bracket as f64 / (n_brackets - 1) as f64;
    let ageing = (year - 1920) as f64 / 95.0;
    let young_share = (1.0 - age_pos).powf(1.5 - ageing);
    let shape = young_share * (1.0 - ageing * 0.4) + age_pos * ageing * 0.6;
    let noise = rng.uniform(0.95, 1.05);
    (base * shape.max(0.01) * noise).round() as i64
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let prefectures = [
        ("01", "北海道", 140_000.0),
        ("13", "東京都", 220_000.0),
        ("27", "大阪府", 160_000.0),
        ("40", "福岡県", 110_000.0),
        ("47", "沖縄県", 40_000.0),
    ];
    let brackets = age_brackets();
    let mut rows = Vec::new();

    for (code, name, base) in prefectures {
        for year in (1920..=2015).step_by(5) {
            let (era, era_year) = era_of(year);
            let growth = 1.0 + (year - 1920) as f64 / 60.0;

            let mut bracket_rows = Vec::with_capacity(brackets.len());
            for (b, label) in brackets.iter().enumerate() {
                let population = bracket_population(base * growth, b, brackets.len(), year, rng);
                let male = (population as f64 * rng.uniform(0.47, 0.52)).round() as i64;
                bracket_rows.push(Row {
                    code: code.to_string(),
                    prefecture: name.to_string(),
                    era: era.to_string(),
                    era_year,
                    year,
                    age_bracket: label.clone(),
                    population,
                    male,
                    female: population - male,
                });
            }

            // The total row is the exact sum of the brackets.
            let total = Row {
                age_bracket: TOTAL.to_string(),
                population: bracket_rows.iter().map(|r| r.population).sum(),
                male: bracket_rows.iter().map(|r| r.male).sum(),
                female: bracket_rows.iter().map(|r| r.female).sum(),
                ..bracket_rows[0].clone()
            };
            rows.push(total);
            rows.extend(bracket_rows);
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let text = |f: fn(&Row) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&Row) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("都道府県コード", DataType::Utf8, false),
        Field::new("都道府県名", DataType::Utf8, false),
        Field::new("元号", DataType::Utf8, false),
        Field::new("和暦（年）", DataType::Int64, false),
        Field::new("西暦（年）", DataType::Int64, false),
        Field::new("年齢5歳階級", DataType::Utf8, false),
        Field::new("人口（総数）", DataType::Int64, false),
        Field::new("人口（男）", DataType::Int64, false),
        Field::new("人口（女）", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|r| r.code.as_str()),
            text(|r| r.prefecture.as_str()),
            text(|r| r.era.as_str()),
            int(|r| r.era_year),
            int(|r| r.year),
            text(|r| r.age_bracket.as_str()),
            int(|r| r.population),
            int(|r| r.male),
            int(|r| r.female),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_population.csv")?;
    write_parquet(&rows, "sample_population.parquet")?;

    println!(
        "Wrote {} rows to sample_population.csv and sample_population.parquet",
        rows.len()
    );
    Ok(())
}
