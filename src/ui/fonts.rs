use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

/// Common install locations of fonts with Japanese glyphs.
const SYSTEM_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/takao-gothic/TakaoPGothic.ttf",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

const FONT_NAME: &str = "cjk";

/// egui's bundled fonts have no CJK glyphs; register one as a fallback for
/// both families. Returns the font used, or `None` if none was found.
pub fn install(ctx: &egui::Context, configured: Option<&Path>) -> Result<Option<PathBuf>> {
    let path = match configured {
        Some(p) => p.to_path_buf(),
        None => match SYSTEM_CANDIDATES.iter().map(PathBuf::from).find(|p| p.is_file()) {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    let bytes = std::fs::read(&path).with_context(|| format!("reading font {}", path.display()))?;

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(FONT_NAME.to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);

    Ok(Some(path))
}
