use anyhow::{Context, bail};
use mapdata::{Color, Effects, FillId, RegionKey, Session};
use std::str::FromStr;

/// One input event for the viewer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer moved to a map pixel.
    Move { x: i64, y: i64 },
    /// Pointer left the map.
    Leave,
    /// Click at the last pointer position.
    Click,
    /// Click at an explicit pixel.
    ClickAt { x: i64, y: i64 },
    /// Remove one region from the selection (the sidebar's remove button).
    Remove(RegionKey),
    /// Clear the whole selection.
    Clear,
}

fn parse_coord(s: Option<&str>, axis: &str) -> anyhow::Result<i64> {
    let s = s.with_context(|| format!("missing {} coordinate", axis))?;
    s.parse()
        .with_context(|| format!("{} coordinate '{}' is not an integer", axis, s))
}

/// Parses a region key as written in scripts: `r,g,b` or `#id`.
pub fn parse_key(s: &str) -> anyhow::Result<RegionKey> {
    if let Some(id) = s.strip_prefix('#') {
        let id = id
            .parse()
            .with_context(|| format!("bad fill region id '{}'", s))?;
        return Ok(RegionKey::Fill(FillId(id)));
    }
    Color::from_str(s)
        .map(RegionKey::Color)
        .map_err(anyhow::Error::msg)
}

impl FromStr for InputEvent {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default();
        let event = match verb {
            "move" => InputEvent::Move {
                x: parse_coord(parts.next(), "x")?,
                y: parse_coord(parts.next(), "y")?,
            },
            "leave" => InputEvent::Leave,
            "click" => match parts.next() {
                None => InputEvent::Click,
                x => InputEvent::ClickAt {
                    x: parse_coord(x, "x")?,
                    y: parse_coord(parts.next(), "y")?,
                },
            },
            "remove" => {
                let key = parts.next().context("remove needs a region key")?;
                InputEvent::Remove(parse_key(key)?)
            }
            "clear" => InputEvent::Clear,
            other => bail!("unknown event '{}'", other),
        };
        if let Some(extra) = parts.next() {
            bail!("unexpected '{}' after {}", extra, verb);
        }
        Ok(event)
    }
}

/// Parses an event script. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> anyhow::Result<Vec<InputEvent>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| line.parse().with_context(|| format!("script line {}", n)))
        .collect()
}

/// Viewer state: the session plus where the pointer currently is.
pub struct AppState {
    pub session: Session,
    /// Last pointer position over the map, if any.
    pub cursor_pos: Option<(i64, i64)>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            cursor_pos: None,
        }
    }

    /// Runs one event to completion.
    pub fn handle(&mut self, event: InputEvent) -> Effects {
        log::debug!("Event: {:?}", event);
        match event {
            InputEvent::Move { x, y } => {
                self.cursor_pos = Some((x, y));
                self.session.pointer_move(x, y)
            }
            InputEvent::Leave => {
                self.cursor_pos = None;
                self.session.pointer_leave()
            }
            InputEvent::Click => match self.cursor_pos {
                Some((x, y)) => self.session.click_at(x, y),
                None => Effects::NONE,
            },
            InputEvent::ClickAt { x, y } => self.session.click_at(x, y),
            InputEvent::Remove(key) => self.session.remove(key),
            InputEvent::Clear => self.session.clear_all(),
        }
    }

    /// Tooltip text for the hovered region.
    pub fn hover_text(&self) -> Option<String> {
        self.session
            .hovered()
            .map(|key| self.session.display_name(key))
    }

    /// One sidebar line for a selected region.
    pub fn region_details(&self, key: RegionKey) -> String {
        let Some(region) = self.session.region(key) else {
            return self.session.display_name(key);
        };
        let extras: Vec<&str> = [&region.settlement, &region.faction, &region.culture]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .collect();
        if extras.is_empty() {
            region.name.clone()
        } else {
            format!("{} ({})", region.name, extras.join(", "))
        }
    }
}
