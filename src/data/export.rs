use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::PopulationDataset;

/// File name offered by the save dialog.
pub const DEFAULT_EXPORT_NAME: &str = "my_population_data.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the given rows as CSV: original header, original cells, given order.
///
/// Output is UTF-8 prefixed with a byte-order mark so spreadsheet tools pick
/// the right encoding for Japanese text.
pub fn write_csv<W: Write>(dataset: &PopulationDataset, rows: &[usize], mut out: W) -> Result<()> {
    out.write_all(UTF8_BOM).context("writing byte-order mark")?;

    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(&dataset.headers)
        .context("writing CSV header")?;
    for &i in rows {
        writer
            .write_record(&dataset.records[i].cells)
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

/// Export `rows` to a file at `path`.
pub fn export_file(dataset: &PopulationDataset, rows: &[usize], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(dataset, rows, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter_indices, FilterCriteria, YearRange};
    use crate::data::fixtures::{self, TOTAL};
    use crate::data::loader::load_file;
    use crate::data::model::{PopulationDataset, RawTable};

    #[test]
    fn output_starts_with_bom_and_keeps_all_columns() {
        let ds = fixtures::tokyo();
        let mut buf = Vec::new();
        write_csv(&ds, &[0, 1], &mut buf).unwrap();
        assert!(buf.starts_with(UTF8_BOM));
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("code,prefecture,era,age_bracket,year,population"));
        assert_eq!(lines.next(), Some("01,Tokyo,Taisho,0-4,1920,1000"));
        assert_eq!(lines.next(), Some("01,Tokyo,Taisho,5-9,1920,900"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn exported_view_reloads_identically() {
        let ds = fixtures::build(&["東京都", "大阪府"]);
        let criteria = FilterCriteria {
            prefectures: ["東京都".to_string()].into(),
            eras: ["Showa".to_string()].into(),
            age_brackets: [TOTAL.to_string(), "0-4".to_string()].into(),
            years: YearRange::new(1950, 1970),
        };
        let rows = filter_indices(&ds, &criteria);
        assert!(!rows.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_NAME);
        export_file(&ds, &rows, &path).unwrap();

        let reloaded = load_file(&path).unwrap();
        let expected: Vec<_> = rows.iter().map(|&i| ds.records[i].clone()).collect();
        assert_eq!(reloaded.headers, ds.headers);
        assert_eq!(reloaded.records, expected);
    }

    #[test]
    fn quotes_cells_containing_delimiters() {
        let ds = PopulationDataset::from_table(RawTable {
            headers: ["prefecture", "era", "age_bracket", "year", "population", "note"]
                .map(String::from)
                .to_vec(),
            rows: vec![["Tokyo", "Showa", "Total", "1950", "1,000", "a, \"b\""]
                .map(String::from)
                .to_vec()],
        })
        .unwrap();
        let mut buf = Vec::new();
        write_csv(&ds, &[0], &mut buf).unwrap();
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert!(text.ends_with("Tokyo,Showa,Total,1950,\"1,000\",\"a, \"\"b\"\"\"\n"));
    }
}
