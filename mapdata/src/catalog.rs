//! Region catalog: the text file describing which color belongs to which region.
//!
//! ```text
//! ; comment
//! Gaul
//!     Genabum
//!     Aedui
//!     Gallic
//!     10 20 30
//! ```
//!
//! A non-indented line opens a region. Indented lines (tab or four spaces)
//! fill settlement, faction and culture in that order, and a line of three
//! integers commits the region under that color.

use crate::error::{LoadError, ParseError, ParseWarning, WarningKind};
use crate::map::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A named map region, keyed by its exact color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub settlement: Option<String>,
    pub faction: Option<String>,
    pub culture: Option<String>,
    pub color: Color,
}

/// Regions in first-commit order with a color lookup.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
    by_color: HashMap<Color, usize>,
}

impl RegionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a region. A region already holding the same color is replaced
    /// in place and returned.
    pub fn insert(&mut self, region: Region) -> Option<Region> {
        match self.by_color.get(&region.color) {
            Some(&slot) => Some(std::mem::replace(&mut self.regions[slot], region)),
            None => {
                self.by_color.insert(region.color, self.regions.len());
                self.regions.push(region);
                None
            }
        }
    }

    pub fn get(&self, color: Color) -> Option<&Region> {
        self.by_color.get(&color).map(|&slot| &self.regions[slot])
    }

    pub fn contains(&self, color: Color) -> bool {
        self.by_color.contains_key(&color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Result of a successful parse. Warnings were already logged.
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub catalog: RegionCatalog,
    pub warnings: Vec<ParseWarning>,
}

/// Region block being filled in.
struct OpenRegion {
    line: usize,
    name: String,
    fields: Vec<String>,
}

enum Line<'a> {
    Skip,
    TopLevel(&'a str),
    Indented(&'a str),
    Shallow,
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    let body = line.trim();
    if body.is_empty() || body.starts_with(';') {
        return Line::Skip;
    }
    if !line.starts_with(char::is_whitespace) {
        Line::TopLevel(body)
    } else if line.starts_with('\t') || line.starts_with("    ") {
        Line::Indented(body)
    } else {
        Line::Shallow
    }
}

fn warn(warnings: &mut Vec<ParseWarning>, line: usize, kind: WarningKind) {
    let warning = ParseWarning { line, kind };
    log::warn!("{}", warning);
    warnings.push(warning);
}

/// Parses catalog text.
///
/// Fails only when the text has no content at all or when no block ever
/// reached its color line. Everything else is a [`ParseWarning`].
pub fn parse_catalog(text: &str) -> Result<ParseReport, ParseError> {
    let mut catalog = RegionCatalog::new();
    let mut warnings = Vec::new();
    let mut open: Option<OpenRegion> = None;
    let mut saw_content = false;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        match classify(raw) {
            Line::Skip => {}
            Line::Shallow => {
                saw_content = true;
                warn(&mut warnings, line_no, WarningKind::ShallowIndent);
            }
            Line::TopLevel(name) => {
                saw_content = true;
                if let Some(prev) = open.take() {
                    warn(&mut warnings, prev.line, WarningKind::DanglingRegion(prev.name));
                }
                open = Some(OpenRegion {
                    line: line_no,
                    name: name.to_string(),
                    fields: Vec::new(),
                });
            }
            Line::Indented(body) => {
                saw_content = true;
                let Some(region) = open.as_mut() else {
                    warn(&mut warnings, line_no, WarningKind::OrphanIndentedLine);
                    continue;
                };

                let tokens: Vec<&str> = body.split_whitespace().collect();
                let numeric = tokens.iter().all(|t| t.parse::<i64>().is_ok());
                if !numeric {
                    if region.fields.len() < 3 {
                        region.fields.push(body.to_string());
                    } else {
                        warn(&mut warnings, line_no, WarningKind::ExtraField(body.to_string()));
                    }
                    continue;
                }

                let channels: Vec<u8> = tokens.iter().filter_map(|t| t.parse().ok()).collect();
                if tokens.len() != 3 || channels.len() != 3 {
                    warn(&mut warnings, line_no, WarningKind::MalformedColor(body.to_string()));
                    continue;
                }

                let color = Color::new(channels[0], channels[1], channels[2]);
                let Some(OpenRegion { name, fields, .. }) = open.take() else {
                    continue;
                };
                let mut fields = fields.into_iter();
                let region = Region {
                    name,
                    settlement: fields.next(),
                    faction: fields.next(),
                    culture: fields.next(),
                    color,
                };
                let replacement = region.name.clone();
                if let Some(previous) = catalog.insert(region) {
                    warn(
                        &mut warnings,
                        line_no,
                        WarningKind::DuplicateColor {
                            color,
                            previous: previous.name,
                            replacement,
                        },
                    );
                }
            }
        }
    }

    if let Some(prev) = open.take() {
        warn(&mut warnings, prev.line, WarningKind::DanglingRegion(prev.name));
    }

    if !saw_content {
        return Err(ParseError::EmptyInput);
    }
    if catalog.is_empty() {
        return Err(ParseError::NoRegions);
    }
    Ok(ParseReport { catalog, warnings })
}

/// Reads and parses a catalog file.
pub fn load_catalog(path: &Path) -> Result<ParseReport, LoadError> {
    log::info!("Loading region catalog from {:?}", path);
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_catalog(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_region() {
        let report = parse_catalog("Gaul\n\tGenabum\n\tAedui\n\tGallic\n\t10 20 30\n").unwrap();
        assert_eq!(report.catalog.len(), 1);
        assert!(report.warnings.is_empty());

        let gaul = report.catalog.get(Color::new(10, 20, 30)).unwrap();
        assert_eq!(gaul.name, "Gaul");
        assert_eq!(gaul.settlement.as_deref(), Some("Genabum"));
        assert_eq!(gaul.faction.as_deref(), Some("Aedui"));
        assert_eq!(gaul.culture.as_deref(), Some("Gallic"));
    }

    #[test]
    fn test_space_indent_comments_and_crlf() {
        let text = "; header comment\r\n\r\nItalia\r\n    Roma\r\n    ; inline comment\r\n    Romans\r\n    Roman\r\n    200 10 10\r\n";
        let report = parse_catalog(text).unwrap();
        let italia = report.catalog.get(Color::new(200, 10, 10)).unwrap();
        assert_eq!(italia.name, "Italia");
        assert_eq!(italia.settlement.as_deref(), Some("Roma"));
        assert_eq!(italia.culture.as_deref(), Some("Roman"));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_fields_are_none() {
        let report = parse_catalog("Mare\n\t0 0 255\n").unwrap();
        let mare = report.catalog.get(Color::new(0, 0, 255)).unwrap();
        assert_eq!(mare.settlement, None);
        assert_eq!(mare.faction, None);
        assert_eq!(mare.culture, None);
    }

    #[test]
    fn test_dangling_region_is_dropped() {
        let text = "A\n\ta\n\t1 1 1\nB\n\tb\nC\n\t3 3 3\nD\n";
        let report = parse_catalog(text).unwrap();
        assert_eq!(report.catalog.len(), 2);
        let names: Vec<&str> = report.catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);

        let dangling: Vec<_> = report
            .warnings
            .iter()
            .filter_map(|w| match &w.kind {
                WarningKind::DanglingRegion(name) => Some((w.line, name.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(dangling, vec![(4, "B"), (8, "D")]);
    }

    #[test]
    fn test_orphan_indented_line_is_skipped() {
        let report = parse_catalog("\tstray\nA\n\t1 2 3\n").unwrap();
        assert_eq!(report.catalog.len(), 1);
        assert_eq!(
            report.warnings,
            vec![ParseWarning {
                line: 1,
                kind: WarningKind::OrphanIndentedLine
            }]
        );
    }

    #[test]
    fn test_indented_line_after_commit_is_orphan() {
        let report = parse_catalog("A\n\t1 2 3\n\tafter\n").unwrap();
        assert_eq!(report.warnings[0].kind, WarningKind::OrphanIndentedLine);
        assert_eq!(report.warnings[0].line, 3);
    }

    #[test]
    fn test_malformed_color_keeps_block_open() {
        let text = "A\n\t1 2\n\t1 2 256\n\t-1 2 3\n\t4 5 6\n";
        let report = parse_catalog(text).unwrap();
        assert_eq!(report.catalog.len(), 1);
        assert!(report.catalog.contains(Color::new(4, 5, 6)));
        let malformed = report
            .warnings
            .iter()
            .filter(|w| matches!(w.kind, WarningKind::MalformedColor(_)))
            .count();
        assert_eq!(malformed, 3);
    }

    #[test]
    fn test_extra_text_field_is_ignored() {
        let report = parse_catalog("A\n\ts\n\tf\n\tc\n\textra\n\t9 9 9\n").unwrap();
        let a = report.catalog.get(Color::new(9, 9, 9)).unwrap();
        assert_eq!(a.culture.as_deref(), Some("c"));
        assert_eq!(
            report.warnings[0].kind,
            WarningKind::ExtraField("extra".into())
        );
    }

    #[test]
    fn test_shallow_indent_warns() {
        let report = parse_catalog("A\n  two spaces\n\t1 2 3\n").unwrap();
        assert_eq!(report.warnings[0].kind, WarningKind::ShallowIndent);
        assert_eq!(report.catalog.get(Color::new(1, 2, 3)).unwrap().settlement, None);
    }

    #[test]
    fn test_duplicate_color_last_wins() {
        let report = parse_catalog("First\n\t5 5 5\nSecond\n\t5 5 5\nThird\n\t6 6 6\n").unwrap();
        assert_eq!(report.catalog.len(), 2);
        assert_eq!(report.catalog.get(Color::new(5, 5, 5)).unwrap().name, "Second");
        // The replacement keeps the original position.
        let names: Vec<&str> = report.catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "Third"]);
        assert!(matches!(
            &report.warnings[0].kind,
            WarningKind::DuplicateColor { previous, replacement, .. }
                if previous == "First" && replacement == "Second"
        ));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_catalog("").unwrap_err(), ParseError::EmptyInput);
        assert_eq!(
            parse_catalog("\n; only a comment\n   \n").unwrap_err(),
            ParseError::EmptyInput
        );
    }

    #[test]
    fn test_no_complete_region() {
        assert_eq!(
            parse_catalog("Gaul\n\tGenabum\n").unwrap_err(),
            ParseError::NoRegions
        );
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"Gaul\n\t10 20 30\n").unwrap();
        let report = load_catalog(file.path()).unwrap();
        assert_eq!(report.catalog.len(), 1);
    }

    #[test]
    fn test_region_serializes() {
        let report = parse_catalog("Gaul\n\tGenabum\n\t10 20 30\n").unwrap();
        let gaul = report.catalog.get(Color::new(10, 20, 30)).unwrap();
        let json = serde_json::to_value(gaul).unwrap();
        assert_eq!(json["name"], "Gaul");
        assert_eq!(json["settlement"], "Genabum");
        assert_eq!(json["color"]["g"], 20);
    }
}
