use crate::args::{Cli, Strategy};
use crate::state::{AppState, InputEvent, parse_script};
use crate::ui::{UiState, draw_overlay};
use anyhow::Context;
use mapdata::{FillConfig, MapData, Region, Session};
use std::path::Path;

/// Normalize path for display - convert to forward slashes for cleaner logging
fn display_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

/// Loads catalog and bitmap and starts a session with the chosen strategy.
pub fn load_session(
    catalog: &Path,
    bitmap: &Path,
    strategy: Strategy,
    tolerance: u8,
) -> anyhow::Result<Session> {
    log::info!(
        "Loading catalog {} and map {}",
        display_path(catalog),
        display_path(bitmap)
    );
    let map = MapData::load(catalog, bitmap).context("failed to load map data")?;
    let fill = FillConfig {
        tolerance,
        ..FillConfig::default()
    };
    Ok(Session::new(map, strategy.into(), fill))
}

pub fn load_from_cli(cli: &Cli) -> anyhow::Result<Session> {
    load_session(&cli.catalog, &cli.map, cli.strategy, cli.tolerance)
}

/// Catalog as pretty JSON, in catalog order.
pub fn dump_regions(map: &MapData) -> anyhow::Result<String> {
    let regions: Vec<&Region> = map.index().catalog().iter().collect();
    Ok(serde_json::to_string_pretty(&regions)?)
}

pub fn stats(map: &MapData) -> String {
    let index = map.index();
    let (width, height) = index.dimensions();
    let orphans = index.orphans();
    let mut out = format!(
        "map: {}x{}\nregions: {}\non map: {}\norphans: {}\nindexed pixels: {}",
        width,
        height,
        index.catalog().len(),
        index.region_count(),
        orphans.len(),
        index.indexed_pixels()
    );
    for region in orphans {
        out.push_str(&format!("\n  orphan: {} ({})", region.name, region.color));
    }
    out
}

/// Name of the region under `(x, y)`, or `-`.
pub fn locate(session: &mut Session, x: i64, y: i64) -> String {
    match session.locate(x, y) {
        Some(key) => session.display_name(key),
        None => "-".to_string(),
    }
}

/// Feeds `events` through the viewer loop one at a time and returns the
/// sidebar text after every selection change.
pub fn replay(state: &mut AppState, events: &[InputEvent]) -> Vec<String> {
    let mut ui = UiState::new();
    let mut frames = Vec::new();
    let mut redraws = 0;
    for &event in events {
        let effects = state.handle(event);
        ui.apply(effects, state);
        if ui.dirty {
            redraws += 1;
            ui.dirty = false;
        }
        if effects.selection_changed {
            frames.push(ui.sidebar_text());
        }
    }
    log::info!(
        "Replayed {} events ({} redraws, {} selection changes)",
        events.len(),
        redraws,
        frames.len()
    );
    frames
}

pub fn replay_file(session: Session, script: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read script {}", display_path(script)))?;
    let events = parse_script(&text)?;
    let mut state = AppState::new(session);
    Ok(replay(&mut state, &events))
}

/// Clicks each of `select`, hovers `hover`, and writes the overlay.
pub fn render_overlay(
    session: Session,
    select: &[(i64, i64)],
    hover: Option<(i64, i64)>,
    output: &Path,
) -> anyhow::Result<()> {
    let mut state = AppState::new(session);
    for &(x, y) in select {
        if state.handle(InputEvent::ClickAt { x, y }).is_none() {
            log::warn!("No region at ({}, {}), nothing selected", x, y);
        }
    }
    if let Some((x, y)) = hover {
        state.handle(InputEvent::Move { x, y });
    }

    let image = draw_overlay(&state.session);
    image
        .save(output)
        .with_context(|| format!("failed to write {}", display_path(output)))?;
    log::info!(
        "Wrote overlay with {} selected regions to {}",
        state.session.selection().count(),
        display_path(output)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn create_mock_map(dir: &Path) {
        let mut catalog = File::create(dir.join("regions.txt")).unwrap();
        writeln!(catalog, "; Tiny world").unwrap();
        writeln!(catalog, "Gaul").unwrap();
        writeln!(catalog, "\tGenabum").unwrap();
        writeln!(catalog, "\tAedui").unwrap();
        writeln!(catalog, "\tGallic").unwrap();
        writeln!(catalog, "\t200 180 120").unwrap();
        writeln!(catalog, "Hibernia").unwrap();
        writeln!(catalog, "\t0 255 0").unwrap();

        // 3x2: Gaul on the left column, water elsewhere. Hibernia is an orphan.
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([64, 164, 223, 255]));
        img.put_pixel(0, 0, Rgba([200, 180, 120, 255]));
        img.put_pixel(0, 1, Rgba([200, 180, 120, 255]));
        img.save(dir.join("map.png")).unwrap();
    }

    fn session(dir: &Path, strategy: Strategy) -> Session {
        load_session(&dir.join("regions.txt"), &dir.join("map.png"), strategy, 30).unwrap()
    }

    #[test]
    fn test_dump_regions() {
        let dir = tempdir().unwrap();
        create_mock_map(dir.path());
        let session = session(dir.path(), Strategy::Color);

        let json = dump_regions(session.map()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "Gaul");
        assert_eq!(value[0]["settlement"], "Genabum");
        assert_eq!(value[0]["color"]["r"], 200);
        assert_eq!(value[1]["name"], "Hibernia");
        assert!(value[1]["culture"].is_null());
    }

    #[test]
    fn test_stats_reports_orphans() {
        let dir = tempdir().unwrap();
        create_mock_map(dir.path());
        let session = session(dir.path(), Strategy::Color);

        let out = stats(session.map());
        assert!(out.contains("map: 3x2"));
        assert!(out.contains("regions: 2"));
        assert!(out.contains("orphans: 1"));
        assert!(out.contains("indexed pixels: 2"));
        assert!(out.contains("orphan: Hibernia (0,255,0)"));
    }

    #[test]
    fn test_locate_each_strategy() {
        let dir = tempdir().unwrap();
        create_mock_map(dir.path());

        let mut color = session(dir.path(), Strategy::Color);
        assert_eq!(locate(&mut color, 0, 1), "Gaul");
        assert_eq!(locate(&mut color, 2, 0), "-");
        assert_eq!(locate(&mut color, -1, 0), "-");

        let mut rect = session(dir.path(), Strategy::Rect);
        assert_eq!(locate(&mut rect, 0, 0), "Gaul");
        assert_eq!(locate(&mut rect, 1, 0), "-");

        let mut fill = session(dir.path(), Strategy::Fill);
        assert_eq!(locate(&mut fill, 0, 0), "Region #1");
        assert_eq!(locate(&mut fill, 0, 1), "Region #1");
        assert_eq!(locate(&mut fill, 2, 1), "-");
    }

    #[test]
    fn test_replay_prints_after_selection_changes() {
        let dir = tempdir().unwrap();
        create_mock_map(dir.path());
        let script = dir.path().join("events.txt");
        std::fs::write(
            &script,
            "# select Gaul and back out\nmove 0 0\nclick\nmove 2 0\nclick\nclick 0 1\n",
        )
        .unwrap();

        let frames = replay_file(session(dir.path(), Strategy::Color), &script).unwrap();
        assert_eq!(
            frames,
            vec![
                "Selected regions: 1\n  Gaul (Genabum, Aedui, Gallic)".to_string(),
                "Selected regions: 0".to_string(),
            ]
        );
    }

    #[test]
    fn test_replay_rejects_bad_script() {
        let dir = tempdir().unwrap();
        create_mock_map(dir.path());
        let script = dir.path().join("events.txt");
        std::fs::write(&script, "move 0 0\nteleport\n").unwrap();
        let err = replay_file(session(dir.path(), Strategy::Color), &script).unwrap_err();
        assert!(format!("{:#}", err).contains("teleport"));
    }

    #[test]
    fn test_render_overlay_writes_png() {
        let dir = tempdir().unwrap();
        create_mock_map(dir.path());
        let output = dir.path().join("overlay.png");

        render_overlay(
            session(dir.path(), Strategy::Color),
            &[(0, 0), (2, 1)],
            Some((0, 1)),
            &output,
        )
        .unwrap();

        let image = image::open(&output).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (3, 2));
        assert_ne!(*image.get_pixel(0, 0), Rgba([200, 180, 120, 255]));
        assert_eq!(*image.get_pixel(2, 1), Rgba([64, 164, 223, 255]));
    }

    #[test]
    fn test_load_session_missing_map() {
        let dir = tempdir().unwrap();
        create_mock_map(dir.path());
        let Err(err) = load_session(
            &dir.path().join("regions.txt"),
            &dir.path().join("missing.png"),
            Strategy::Color,
            30,
        ) else {
            panic!("expected load failure");
        };
        assert!(format!("{:#}", err).contains("missing.png"));
    }
}
