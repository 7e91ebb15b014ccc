//! Monospace font selection
//!
//! Walks the configured candidate families in order and uses the first one
//! whose font file can be found, read and parsed. When every candidate fails the
//! built-in egui monospace font stays in place.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui::{Context, FontData, FontDefinitions, FontFamily, FontId};
use tracing::{debug, info, warn};

use crate::config::FontCandidate;
use crate::layout::FontMetrics;

// How deep to descend into font directories
const MAX_SEARCH_DEPTH: usize = 4;

#[cfg(target_os = "linux")]
const SYSTEM_FONT_DIRS: &[&str] = &["/usr/share/fonts", "/usr/local/share/fonts"];
#[cfg(target_os = "macos")]
const SYSTEM_FONT_DIRS: &[&str] = &["/System/Library/Fonts", "/Library/Fonts"];
#[cfg(target_os = "windows")]
const SYSTEM_FONT_DIRS: &[&str] = &["C:\\Windows\\Fonts"];
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const SYSTEM_FONT_DIRS: &[&str] = &["/usr/share/fonts", "/usr/local/share/fonts"];

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("No font file found for {0}")]
    NotFound(String),

    #[error("Failed to read font file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse font file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: ab_glyph::InvalidFont,
    },
}

/// The font chosen at startup.
#[derive(Debug, Clone)]
pub struct LoadedFont {
    /// Family name of the loaded candidate, `None` for the built-in font
    pub family: Option<String>,
    pub definitions: FontDefinitions,
}

/// Directories searched for font files, user directory first.
pub fn font_dirs() -> Vec<PathBuf> {
    dirs::font_dir()
        .into_iter()
        .chain(SYSTEM_FONT_DIRS.iter().map(PathBuf::from))
        .collect()
}

/// Tries each candidate in order and installs the first that loads as the
/// primary monospace font.
pub fn load_font(candidates: &[FontCandidate], dirs: &[PathBuf]) -> LoadedFont {
    let mut definitions = FontDefinitions::default();

    for candidate in candidates {
        match load_candidate(candidate, dirs) {
            Ok(bytes) => {
                info!("Loaded font: {}", candidate.name);
                definitions
                    .font_data
                    .insert(candidate.name.clone(), Arc::new(FontData::from_owned(bytes)));
                definitions
                    .families
                    .entry(FontFamily::Monospace)
                    .or_default()
                    .insert(0, candidate.name.clone());
                return LoadedFont {
                    family: Some(candidate.name.clone()),
                    definitions,
                };
            }
            Err(FontError::NotFound(name)) => debug!("Font not installed: {}", name),
            Err(e) => warn!("Could not load font {}: {}", candidate.name, e),
        }
    }

    info!("Using the built-in monospace font");
    LoadedFont {
        family: None,
        definitions,
    }
}

fn load_candidate(candidate: &FontCandidate, dirs: &[PathBuf]) -> Result<Vec<u8>, FontError> {
    let key = match_key(candidate);
    let path = dirs
        .iter()
        .find_map(|dir| find_font_file(dir, &key, MAX_SEARCH_DEPTH))
        .ok_or_else(|| FontError::NotFound(candidate.name.clone()))?;

    debug!("Found {} at {}", candidate.name, path.display());
    let bytes = fs::read(&path).map_err(|source| FontError::Read {
        path: path.clone(),
        source,
    })?;
    // Same parser the font atlas uses, so anything accepted here loads there
    ab_glyph::FontRef::try_from_slice(&bytes)
        .map_err(|source| FontError::Parse { path, source })?;
    Ok(bytes)
}

// Lowercase alphanumerics only, so "DejaVu Sans Mono" matches DejaVuSansMono.ttf
fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn match_key(candidate: &FontCandidate) -> String {
    let mut key = normalize(&candidate.name);
    if candidate.bold {
        key.push_str("bold");
    }
    key
}

fn find_font_file(dir: &Path, key: &str, depth: usize) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
            continue;
        }
        let is_font = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"));
        let stem_matches = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| normalize(s) == key);
        if is_font && stem_matches {
            return Some(path);
        }
    }

    if depth == 0 {
        return None;
    }
    subdirs.sort();
    subdirs
        .iter()
        .find_map(|sub| find_font_file(sub, key, depth - 1))
}

/// Font metrics measured through an egui context's font atlas.
pub struct EguiMetrics<'a> {
    ctx: &'a Context,
    font_id: FontId,
    line_height: f32,
}

impl<'a> EguiMetrics<'a> {
    /// The context must have finished at least one pass with the fonts installed.
    pub fn new(ctx: &'a Context, font_id: FontId) -> Self {
        let line_height = ctx.fonts(|f| f.row_height(&font_id));
        Self {
            ctx,
            font_id,
            line_height,
        }
    }
}

impl FontMetrics for EguiMetrics<'_> {
    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn text_width(&self, text: &str) -> f32 {
        self.ctx.fonts(|f| {
            f.layout_no_wrap(text.to_owned(), self.font_id.clone(), Default::default())
                .size()
                .x
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::backend::scripted::snapshot;
    use crate::controller::Device;
    use crate::ui::startup_layout;

    const TTF_HEADER: [u8; 8] = [0x00, 0x01, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x80];

    fn candidates() -> Vec<FontCandidate> {
        vec![
            FontCandidate::new("Missing Mono", false),
            FontCandidate::new("Broken Mono", false),
            FontCandidate::new("Courier", true),
        ]
    }

    // A real font file: the monospace face bundled with egui
    fn bundled_font_bytes() -> Vec<u8> {
        FontDefinitions::default().font_data["Hack"].font.to_vec()
    }

    #[test]
    fn test_match_key() {
        assert_eq!(match_key(&FontCandidate::new("DejaVu Sans Mono", false)), "dejavusansmono");
        assert_eq!(match_key(&FontCandidate::new("Courier New", true)), "couriernewbold");
        assert_eq!(normalize("Courier-Bold"), "courierbold");
    }

    #[test]
    fn test_falls_through_to_next_candidate() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("BrokenMono.ttf"), b"not a font").unwrap();
        let nested = dir.path().join("type1").join("courier");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Courier-Bold.otf"), bundled_font_bytes()).unwrap();

        let loaded = load_font(&candidates(), &[dir.path().to_path_buf()]);

        assert_eq!(loaded.family.as_deref(), Some("Courier"));
        assert!(loaded.definitions.font_data.contains_key("Courier"));
        assert_eq!(
            loaded.definitions.families[&FontFamily::Monospace].first().map(String::as_str),
            Some("Courier")
        );
    }

    #[test]
    fn test_header_only_file_falls_back_to_builtin_font() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("DejaVuSansMono.ttf"), TTF_HEADER).unwrap();
        let candidates = [FontCandidate::new("DejaVu Sans Mono", false)];

        let loaded = load_font(&candidates, &[dir.path().to_path_buf()]);
        assert_eq!(loaded.family, None);
        assert!(!loaded.definitions.font_data.contains_key("DejaVu Sans Mono"));

        // Building the font atlas with the result must not fail
        let device = Device::from_snapshot(0, snapshot("Pad", 2, 4));
        let (size, metrics) = startup_layout(&loaded, 20.0, &[device]);
        assert!(size.x > 0.0 && size.y > 0.0);
        assert!(metrics.line_height > 0.0);
    }

    #[test]
    fn test_no_candidates_uses_builtin_font() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_font(&candidates(), &[dir.path().to_path_buf()]);
        assert_eq!(loaded.family, None);

        let loaded = load_font(&[], &font_dirs());
        assert_eq!(loaded.family, None);
        assert_eq!(
            loaded.definitions.families[&FontFamily::Monospace],
            FontDefinitions::default().families[&FontFamily::Monospace]
        );
    }

    #[test]
    fn test_broken_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("brokenmono.TTF"), b"junk").unwrap();
        fs::write(dir.path().join("CourierBold.ttf"), TTF_HEADER).unwrap();
        let dirs = [dir.path().to_path_buf()];

        let err = load_candidate(&FontCandidate::new("Broken Mono", false), &dirs).unwrap_err();
        assert!(matches!(err, FontError::Parse { .. }));
        let err = load_candidate(&FontCandidate::new("Courier", true), &dirs).unwrap_err();
        assert!(matches!(err, FontError::Parse { .. }));
    }

    #[test]
    fn test_egui_metrics_measure_monospace_text() {
        let ctx = Context::default();
        let mut measured = None;
        let _ = ctx.run(Default::default(), |ctx| {
            let metrics = EguiMetrics::new(ctx, FontId::monospace(20.0));
            measured = Some((metrics.line_height(), metrics.text_width("WW"), metrics.text_width("W")));
        });

        let (line_height, two, one) = measured.unwrap();
        assert!(line_height > 0.0);
        assert!((two - 2.0 * one).abs() < 0.01);
    }
}
