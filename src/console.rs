//! Line-oriented command console for headless runs
//!
//! The native binary has no window: it reads commands such as `up`,
//! `click 300 200` or `step 30` and drives the same simulation the browser
//! build runs.

use std::io::Write;

use anyhow::{Context, bail};
use glam::Vec2;

use crate::audio::AudioManager;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Key, TickInput, tick};

pub const HELP: &str = "\
commands:
  up | left | right | down | space   queue a key for the player ship
  click X Y                          grow or create a planet at (X, Y)
  step [N]                           advance N frames (default 1)
  pause                              toggle pause on the next frame
  mute                               toggle sound cues
  status                             print ships, planets and missiles
  snapshot                           print the full state as JSON
  restart                            start over with the same settings
  help                               show this text
  quit                               exit";

/// A parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Key(Key),
    Click(Vec2),
    Step(u32),
    Pause,
    Mute,
    Status,
    Snapshot,
    Restart,
    Help,
    Quit,
}

/// Parse one line; blank lines and `#` comments yield `None`
pub fn parse(line: &str) -> anyhow::Result<Option<ConsoleCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    if let Some(key) = Key::from_name(head) {
        return Ok(Some(ConsoleCommand::Key(key)));
    }

    let command = match head.to_lowercase().as_str() {
        "click" => {
            let [x, y] = args.as_slice() else {
                bail!("usage: click X Y");
            };
            let x: f32 = x.parse().with_context(|| format!("bad x coordinate: {x}"))?;
            let y: f32 = y.parse().with_context(|| format!("bad y coordinate: {y}"))?;
            ConsoleCommand::Click(Vec2::new(x, y))
        }
        "step" => {
            let frames: u32 = match args.first() {
                Some(n) => n.parse().with_context(|| format!("bad frame count: {n}"))?,
                None => 1,
            };
            ConsoleCommand::Step(frames)
        }
        "pause" => ConsoleCommand::Pause,
        "mute" => ConsoleCommand::Mute,
        "status" => ConsoleCommand::Status,
        "snapshot" => ConsoleCommand::Snapshot,
        "restart" => ConsoleCommand::Restart,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => bail!("unknown command: {other} (try `help`)"),
    };
    Ok(Some(command))
}

/// Whether the console keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A running simulation plus the input queued for its next frame
pub struct Session {
    settings: Settings,
    pub state: GameState,
    pub input: TickInput,
    audio: AudioManager,
}

impl Session {
    /// Start logging to `log_path`, then load settings (defaults when no
    /// path is given) and open a session
    #[cfg(not(target_arch = "wasm32"))]
    pub fn start(log_path: &std::path::Path, settings_path: Option<&std::path::Path>) -> anyhow::Result<Self> {
        crate::logging::init_file(log_path)?;

        let settings = match settings_path {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        crate::logging::log_session_start(&settings);
        Ok(Self::new(settings))
    }

    pub fn new(settings: Settings) -> Self {
        let state = GameState::new(&settings);
        let audio = AudioManager::new(&settings);
        Self {
            settings,
            state,
            input: TickInput::default(),
            audio,
        }
    }

    /// Run `frames` frames; queued input goes into the first one
    pub fn step(&mut self, frames: u32, out: &mut impl Write) -> anyhow::Result<()> {
        for _ in 0..frames {
            tick(&mut self.state, &self.input);
            self.input.clear();

            let events = self.state.drain_events();
            self.audio.play_events(&events);
            for event in &events {
                writeln!(out, "[frame {}] {}", self.state.frame, describe(event))?;
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: ConsoleCommand, out: &mut impl Write) -> anyhow::Result<Flow> {
        match command {
            ConsoleCommand::Key(key) => {
                if self.settings.human_enabled {
                    self.input.commands.push(key.command());
                } else {
                    writeln!(out, "keyboard control is disabled")?;
                }
            }
            ConsoleCommand::Click(point) => self.input.clicks.push(point),
            ConsoleCommand::Step(frames) => self.step(frames, out)?,
            ConsoleCommand::Pause => self.input.pause = !self.input.pause,
            ConsoleCommand::Mute => {
                let muted = self.audio.toggle_mute();
                writeln!(out, "sound {}", if muted { "muted" } else { "on" })?;
            }
            ConsoleCommand::Status => self.write_status(out)?,
            ConsoleCommand::Snapshot => {
                let json = serde_json::to_string_pretty(&self.state).context("serialize state")?;
                writeln!(out, "{json}")?;
            }
            ConsoleCommand::Restart => {
                log::info!("Simulation restarted");
                self.state = GameState::new(&self.settings);
                self.input.clear();
            }
            ConsoleCommand::Help => writeln!(out, "{HELP}")?,
            ConsoleCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn write_status(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let state = &self.state;
        writeln!(out, "frame {} ({:?})", state.frame, state.phase)?;
        for ship in &state.ships {
            let marker = if state.player_id == Some(ship.id) { "*" } else { " " };
            writeln!(
                out,
                "{marker}ship {:>3} pos ({:7.1}, {:7.1}) vel ({:5.2}, {:5.2}) speed {:5.2} dir {:5.2}",
                ship.id,
                ship.pos.x,
                ship.pos.y,
                ship.vel.x,
                ship.vel.y,
                ship.speed(),
                ship.direction
            )?;
        }
        for planet in &state.planets {
            writeln!(
                out,
                " planet {:>3} pos ({:7.1}, {:7.1}) mass {:.0}",
                planet.id, planet.pos.x, planet.pos.y, planet.mass
            )?;
        }
        writeln!(out, " missiles in flight: {}", state.missiles.len())?;
        Ok(())
    }
}

/// One-line description of an event
pub fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::Laser { ship_id, missile_id } => {
            format!("ship {ship_id} fired missile {missile_id}")
        }
        GameEvent::Explosion {
            ship_id,
            missile_id,
            pos,
        } => format!(
            "ship {ship_id} destroyed by missile {missile_id} at ({:.0}, {:.0})",
            pos.x, pos.y
        ),
        GameEvent::Bump { ship_id, target } => format!("ship {ship_id} bumped into {target:?}"),
        GameEvent::WallBounce { ship_id } => format!("ship {ship_id} bounced off the border"),
        GameEvent::PlanetCreated { planet_id, pos } => {
            format!("planet {planet_id} created at ({:.0}, {:.0})", pos.x, pos.y)
        }
        GameEvent::PlanetGrown { planet_id, mass } => {
            format!("planet {planet_id} grew to mass {mass:.0}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys_and_commands() {
        assert_eq!(parse("UP").unwrap(), Some(ConsoleCommand::Key(Key::Up)));
        assert_eq!(parse("  space ").unwrap(), Some(ConsoleCommand::Key(Key::Space)));
        assert_eq!(
            parse("click 300 200.5").unwrap(),
            Some(ConsoleCommand::Click(Vec2::new(300.0, 200.5)))
        );
        assert_eq!(parse("step").unwrap(), Some(ConsoleCommand::Step(1)));
        assert_eq!(parse("step 30").unwrap(), Some(ConsoleCommand::Step(30)));
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("# comment").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("click 1").is_err());
        assert!(parse("click a b").is_err());
        assert!(parse("step many").is_err());
        assert!(parse("warp").is_err());
    }

    #[test]
    fn test_session_fire_and_step() {
        let mut session = Session::new(Settings::default());
        let mut out = Vec::new();
        session
            .execute(ConsoleCommand::Key(Key::Space), &mut out)
            .unwrap();
        assert!(session.state.missiles.is_empty());
        session.execute(ConsoleCommand::Step(1), &mut out).unwrap();
        assert_eq!(session.state.missiles.len(), 1);
        assert!(session.input.is_empty());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("fired missile"));
    }

    #[test]
    fn test_session_click_and_status() {
        let mut session = Session::new(Settings::default());
        let mut out = Vec::new();
        session
            .execute(ConsoleCommand::Click(Vec2::new(100.0, 100.0)), &mut out)
            .unwrap();
        session.execute(ConsoleCommand::Step(2), &mut out).unwrap();
        session.execute(ConsoleCommand::Status, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("planet"));
        assert!(text.contains("frame 2"));
    }

    #[test]
    fn test_snapshot_is_json() {
        let mut session = Session::new(Settings::default());
        let mut out = Vec::new();
        session.execute(ConsoleCommand::Snapshot, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["ships"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_keys_ignored_without_human() {
        let settings = Settings {
            human_enabled: false,
            ..Default::default()
        };
        let mut session = Session::new(settings);
        let mut out = Vec::new();
        session.execute(ConsoleCommand::Key(Key::Up), &mut out).unwrap();
        assert!(session.input.commands.is_empty());
    }

    #[test]
    fn test_mute_toggles() {
        let mut session = Session::new(Settings::default());
        let mut out = Vec::new();
        assert_eq!(parse("mute").unwrap(), Some(ConsoleCommand::Mute));
        session.execute(ConsoleCommand::Mute, &mut out).unwrap();
        assert_eq!(session.audio.effective_volume(), 0.0);
        session.execute(ConsoleCommand::Mute, &mut out).unwrap();
        assert!(session.audio.effective_volume() > 0.0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("sound muted"));
    }

    #[test]
    fn test_quit_and_restart() {
        let mut session = Session::new(Settings::default());
        let mut out = Vec::new();
        session.execute(ConsoleCommand::Step(5), &mut out).unwrap();
        session.execute(ConsoleCommand::Restart, &mut out).unwrap();
        assert_eq!(session.state.frame, 0);
        assert_eq!(
            session.execute(ConsoleCommand::Quit, &mut out).unwrap(),
            Flow::Quit
        );
    }
}
