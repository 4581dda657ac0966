use glam::Vec2;

use space_skirmish::Settings;
use space_skirmish::renderer::{DrawCmd, build};
use space_skirmish::sim::{GameEvent, GameState, Key, Pilot, TickInput, tick};

fn press(keys: &[Key]) -> TickInput {
    TickInput {
        commands: keys.iter().map(|k| k.command()).collect(),
        ..Default::default()
    }
}

#[test]
fn player_shoots_down_the_other_ship() {
    let mut state = GameState::new(&Settings::default());
    let player_id = state.player_id.expect("human player");
    let target_id = state.ships[1].id;

    // Player sits down-right of the target; six left turns face it
    let mut keys = vec![Key::Left; 6];
    keys.push(Key::Space);
    tick(&mut state, &press(&keys));

    let mut events = state.drain_events();
    for _ in 0..30 {
        tick(&mut state, &TickInput::default());
        events.extend(state.drain_events());
    }

    assert_eq!(state.ships.len(), 1);
    assert_eq!(state.ships[0].id, player_id);
    assert!(state.missiles.is_empty());
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Explosion { ship_id, .. } if *ship_id == target_id
    )));
}

#[test]
fn missile_bends_around_a_planet() {
    let mut straight = GameState::new(&Settings::default());
    let mut bent = GameState::new(&Settings::default());
    bent.spawn_planet(Vec2::new(800.0, 400.0));

    for state in [&mut straight, &mut bent] {
        tick(state, &press(&[Key::Space]));
        for _ in 0..5 {
            tick(state, &TickInput::default());
        }
    }

    let a = straight.missiles[0].pos;
    let b = bent.missiles[0].pos;
    assert!((a.y - 460.0).abs() < 1e-3);
    // Pulled up toward the planet
    assert!(b.y < a.y);
}

#[test]
fn destroyed_player_no_longer_takes_input() {
    let mut state = GameState::new(&Settings::default());
    let player_id = state.player_id.unwrap();
    state.ships.retain(|s| s.id != player_id);

    tick(&mut state, &press(&[Key::Up, Key::Space]));
    assert!(state.missiles.is_empty());
    assert!(state.player().is_none());
}

#[test]
fn autopilot_duel_stays_sane() {
    let settings = Settings {
        human_enabled: false,
        autopilot: true,
        seed: 99,
        ..Default::default()
    };
    let mut state = GameState::new(&settings);
    assert!(state.ships.iter().all(|s| s.pilot == Pilot::Autopilot));

    let mut fired = 0;
    for _ in 0..600 {
        tick(&mut state, &TickInput::default());
        fired += state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Laser { .. }))
            .count();
        for ship in &state.ships {
            assert!(ship.pos.is_finite());
            assert!(ship.speed() <= ship.max_speed + 1e-4);
        }
    }
    assert!(fired > 0);
    assert!(state.ships.len() <= 2);
}

#[test]
fn scene_tracks_entities() {
    let mut state = GameState::new(&Settings::default());
    tick(
        &mut state,
        &TickInput {
            clicks: vec![Vec2::new(120.0, 120.0), Vec2::new(900.0, 150.0)],
            commands: vec![Key::Space.command()],
            ..Default::default()
        },
    );

    let cmds = build(&state, None);
    let circles = cmds
        .iter()
        .filter(|c| matches!(c, DrawCmd::Circle { .. }))
        .count();
    // 2 planets + 1 missile + 2 forcefields
    assert_eq!(circles, 5);
}

#[test]
fn settings_file_round_trip() {
    let path = std::env::temp_dir().join(format!("space-skirmish-settings-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "width": 800, "height": 600, "autopilot": true }"#).unwrap();

    let settings = Settings::load_from(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(settings.width, 800.0);
    assert!(settings.autopilot);
    let state = GameState::new(&settings);
    assert_eq!(state.ships[1].pos, Vec2::new(400.0, 300.0));
}

#[test]
fn missing_settings_file_reports_path() {
    let err = Settings::load_from(std::path::Path::new("/nonexistent/skirmish.json")).unwrap_err();
    assert!(format!("{err:#}").contains("skirmish.json"));
}

#[test]
fn missiles_launch_at_the_ship_speed_limit() {
    let settings = Settings::from_json(r#"{ "ship": { "max_speed": 6 }, "missile": { "mass": 12 } }"#).unwrap();
    let mut state = GameState::new(&settings);
    tick(&mut state, &press(&[Key::Space]));

    let missile = &state.missiles[0];
    assert!((missile.vel.length() - 6.0).abs() < 1e-4);
    assert_eq!(missile.mass, 12.0);
}
