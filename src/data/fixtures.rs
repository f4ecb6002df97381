//! Small in-memory datasets shared by the data-layer tests.

use super::model::{PopulationDataset, RawTable};

pub const TOTAL: &str = "Total";

/// Tokyo, every census year 1920–2015, brackets 0-4 / 5-9 / Total.
/// 1920 and 1925 are Taisho, the rest Showa. Totals equal the bracket sum.
pub fn tokyo() -> PopulationDataset {
    build(&["Tokyo"])
}

/// Same shape as [`tokyo`] for several prefectures.
pub fn build(prefectures: &[&str]) -> PopulationDataset {
    let headers = ["code", "prefecture", "era", "age_bracket", "year", "population"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::new();
    for (p, pref) in prefectures.iter().enumerate() {
        for year in (1920..=2015).step_by(5) {
            let era = if year < 1930 { "Taisho" } else { "Showa" };
            let young = 1000 + (year - 1920) * 10 + p as i32;
            let older = 900 + (year - 1920) * 7;
            for (bracket, pop) in [("0-4", young), ("5-9", older), (TOTAL, young + older)] {
                rows.push(vec![
                    format!("{:02}", p + 1),
                    pref.to_string(),
                    era.to_string(),
                    bracket.to_string(),
                    year.to_string(),
                    pop.to_string(),
                ]);
            }
        }
    }

    PopulationDataset::from_table(RawTable { headers, rows }).expect("fixture is well-formed")
}
