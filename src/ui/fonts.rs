use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

/// Key of the Hangul font in [`FontDefinitions::font_data`].
pub const HANGUL_FONT: &str = "hangul";

/// Usual install locations of a Korean-capable font, tried in order when no
/// font is configured.
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/AppleGothic.ttf",
    "C:\\Windows\\Fonts\\malgun.ttf",
];

/// The configured font if there is one, else the first system font present.
pub fn find_font(configured: Option<&Path>, candidates: &[&str]) -> Option<PathBuf> {
    if let Some(path) = configured {
        return Some(path.to_path_buf());
    }
    candidates
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// TrueType, OpenType or a font collection, judged by the leading tag.
fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00] | b"OTTO" | b"true" | b"ttcf")
    )
}

/// egui's default fonts with `bytes` appended as a fallback to both families,
/// so Latin text keeps its look and Hangul falls through to the new font.
pub fn font_definitions(bytes: Vec<u8>) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(HANGUL_FONT.to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(HANGUL_FONT.to_owned());
    }
    fonts
}

/// Install a Hangul-capable font on `ctx`. Returns the font file used, or
/// `None` when the viewer keeps egui's built-in fonts.
pub fn install_hangul_font(ctx: &egui::Context, configured: Option<&Path>) -> Option<PathBuf> {
    let Some(path) = find_font(configured, SYSTEM_FONT_PATHS) else {
        log::warn!("No Hangul font found; Korean labels will not render (set --font)");
        return None;
    };

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Failed to read font {}: {e}", path.display());
            return None;
        }
    };
    if !looks_like_font(&bytes) {
        log::warn!("{} is not a TrueType/OpenType font", path.display());
        return None;
    }

    ctx.set_fonts(font_definitions(bytes));
    log::info!("Using font {}", path.display());
    Some(path)
}
