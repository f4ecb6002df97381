use std::collections::HashSet;
use std::fmt;

use super::error::DatasetError;

/// Earliest census year offered by the year-range controls.
pub const YEAR_MIN: i32 = 1920;
/// Latest census year offered by the year-range controls.
pub const YEAR_MAX: i32 = 2015;

/// Default value of the age-bracket column that holds the all-ages sum.
pub const DEFAULT_TOTAL_LABEL: &str = "総数";

// ---------------------------------------------------------------------------
// Dimension – the three categorical filter columns
// ---------------------------------------------------------------------------

/// A categorical column the user can filter by set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Prefecture,
    Era,
    AgeBracket,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Prefecture, Dimension::Era, Dimension::AgeBracket];

    /// The record's value in this column.
    pub fn value_of(self, record: &Record) -> &str {
        match self {
            Dimension::Prefecture => &record.prefecture,
            Dimension::Era => &record.era,
            Dimension::AgeBracket => &record.age_bracket,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Dimension::Prefecture => "Prefecture",
            Dimension::Era => "Era",
            Dimension::AgeBracket => "Age bracket",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Key columns
// ---------------------------------------------------------------------------

/// The five columns the pipeline reads, with the header names accepted for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyColumn {
    Prefecture,
    Era,
    AgeBracket,
    Year,
    Population,
}

impl KeyColumn {
    /// Header names recognised for this column: the published dataset's
    /// Japanese header first, then an English alias.
    pub fn header_names(self) -> [&'static str; 2] {
        match self {
            KeyColumn::Prefecture => ["都道府県名", "prefecture"],
            KeyColumn::Era => ["元号", "era"],
            KeyColumn::AgeBracket => ["年齢5歳階級", "age_bracket"],
            KeyColumn::Year => ["西暦（年）", "year"],
            KeyColumn::Population => ["人口（総数）", "population"],
        }
    }
}

/// Positions of the key columns inside a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColumns {
    pub prefecture: usize,
    pub era: usize,
    pub age_bracket: usize,
    pub year: usize,
    pub population: usize,
}

impl KeyColumns {
    /// Locate every key column in `headers`.
    pub fn locate(headers: &[String]) -> Result<Self, DatasetError> {
        let find = |key: KeyColumn| {
            let names = key.header_names();
            headers
                .iter()
                .position(|h| names.iter().any(|n| *n == h.trim()))
                .ok_or(DatasetError::MissingColumn {
                    column: names[0],
                    alias: names[1],
                })
        };
        Ok(KeyColumns {
            prefecture: find(KeyColumn::Prefecture)?,
            era: find(KeyColumn::Era)?,
            age_bracket: find(KeyColumn::AgeBracket)?,
            year: find(KeyColumn::Year)?,
            population: find(KeyColumn::Population)?,
        })
    }
}

// ---------------------------------------------------------------------------
// RawTable – what the loaders produce
// ---------------------------------------------------------------------------

/// An untyped table: header row plus text cells, as read from disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single (prefecture, era, age bracket, year) population row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub prefecture: String,
    pub era: String,
    pub age_bracket: String,
    pub year: i32,
    pub population: f64,
    /// Every original cell in header order, kept for export and the data table.
    pub cells: Vec<String>,
}

// ---------------------------------------------------------------------------
// PopulationDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The parsed dataset. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationDataset {
    /// Original header row, in file order.
    pub headers: Vec<String>,
    /// All records, in file order.
    pub records: Vec<Record>,
    prefectures: Vec<String>,
    eras: Vec<String>,
    age_brackets: Vec<String>,
}

impl PopulationDataset {
    /// Type the key columns of a raw table and index its distinct values.
    pub fn from_table(table: RawTable) -> Result<Self, DatasetError> {
        let RawTable { headers, rows } = table;
        if headers.is_empty() {
            return Err(DatasetError::EmptyHeader);
        }
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        let key_columns = KeyColumns::locate(&headers)?;

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(row, cells)| parse_record(row, cells, &key_columns, headers.len()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_records(headers, records))
    }

    fn from_records(headers: Vec<String>, records: Vec<Record>) -> Self {
        let distinct = |dim: Dimension| {
            let mut seen = HashSet::new();
            records
                .iter()
                .map(|r| dim.value_of(r))
                .filter(|v| seen.insert(*v))
                .map(str::to_string)
                .collect::<Vec<_>>()
        };
        let prefectures = distinct(Dimension::Prefecture);
        let eras = distinct(Dimension::Era);
        let age_brackets = distinct(Dimension::AgeBracket);

        PopulationDataset {
            headers,
            records,
            prefectures,
            eras,
            age_brackets,
        }
    }

    /// Distinct values of a categorical column, in first-appearance order.
    pub fn distinct(&self, dim: Dimension) -> &[String] {
        match dim {
            Dimension::Prefecture => &self.prefectures,
            Dimension::Era => &self.eras,
            Dimension::AgeBracket => &self.age_brackets,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_record(
    row: usize,
    mut cells: Vec<String>,
    keys: &KeyColumns,
    width: usize,
) -> Result<Record, DatasetError> {
    // Short rows (e.g. JSON objects with missing keys) are padded so every
    // record has one cell per header.
    if cells.len() < width {
        cells.resize(width, String::new());
    }
    let cell = |idx: usize| cells[idx].trim();

    let year = parse_year(cell(keys.year)).ok_or_else(|| DatasetError::InvalidYear {
        row,
        value: cell(keys.year).to_string(),
    })?;
    let population =
        parse_population(cell(keys.population)).ok_or_else(|| DatasetError::InvalidPopulation {
            row,
            value: cell(keys.population).to_string(),
        })?;

    Ok(Record {
        prefecture: cell(keys.prefecture).to_string(),
        era: cell(keys.era).to_string(),
        age_bracket: cell(keys.age_bracket).to_string(),
        year,
        population,
        cells,
    })
}

/// Accepts `1920` as well as the `1920.0` float renderings Parquet/JSON produce.
fn parse_year(s: &str) -> Option<i32> {
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    (f.fract() == 0.0 && f.abs() < i32::MAX as f64).then_some(f as i32)
}

fn parse_population(s: &str) -> Option<f64> {
    let v = s.replace(',', "").parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0).then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn locates_japanese_headers_among_extra_columns() {
        let t = table(
            &["都道府県コード", "都道府県名", "元号", "和暦（年）", "西暦（年）", "注", "年齢5歳階級", "人口（総数）", "人口（男）"],
            &[&["01", "北海道", "大正", "9", "1920", "", "総数", "2,359,183", "1244322"]],
        );
        let ds = PopulationDataset::from_table(t).unwrap();
        let r = &ds.records[0];
        assert_eq!(r.prefecture, "北海道");
        assert_eq!(r.era, "大正");
        assert_eq!(r.age_bracket, "総数");
        assert_eq!(r.year, 1920);
        assert_eq!(r.population, 2_359_183.0);
        assert_eq!(r.cells.len(), 9);
        assert_eq!(r.cells[3], "9");
    }

    #[test]
    fn strips_bom_from_first_header() {
        let t = table(
            &["\u{feff}prefecture", "era", "age_bracket", "year", "population"],
            &[&["Tokyo", "Showa", "Total", "1950", "100"]],
        );
        let ds = PopulationDataset::from_table(t).unwrap();
        assert_eq!(ds.headers[0], "prefecture");
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let t = table(&["prefecture", "era", "year", "population"], &[]);
        let err = PopulationDataset::from_table(t).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingColumn { column: "年齢5歳階級", .. }
        ));
    }

    #[test]
    fn rejects_negative_population_and_fractional_year() {
        let headers = ["prefecture", "era", "age_bracket", "year", "population"];
        let neg = table(&headers, &[&["Tokyo", "Showa", "Total", "1950", "-1"]]);
        assert!(matches!(
            PopulationDataset::from_table(neg),
            Err(DatasetError::InvalidPopulation { row: 0, .. })
        ));
        let frac = table(&headers, &[&["Tokyo", "Showa", "Total", "1950.5", "1"]]);
        assert!(matches!(
            PopulationDataset::from_table(frac),
            Err(DatasetError::InvalidYear { row: 0, .. })
        ));
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let headers = ["prefecture", "era", "age_bracket", "year", "population"];
        let t = table(
            &headers,
            &[
                &["Osaka", "Showa", "Total", "1950", "1"],
                &["Tokyo", "Taisho", "0-4", "1920", "1"],
                &["Osaka", "Showa", "0-4", "1950", "1"],
            ],
        );
        let ds = PopulationDataset::from_table(t).unwrap();
        assert_eq!(ds.distinct(Dimension::Prefecture), ["Osaka", "Tokyo"]);
        assert_eq!(ds.distinct(Dimension::Era), ["Showa", "Taisho"]);
        assert_eq!(ds.distinct(Dimension::AgeBracket), ["Total", "0-4"]);
    }
}
