//! Installs the global logger, so it runs in its own test binary

use glam::Vec2;

use space_skirmish::console::Session;

#[test]
fn startup_is_logged_and_bumps_stay_below_info() {
    let dir = std::env::temp_dir();
    let id = std::process::id();
    let log_path = dir.join(format!("space-skirmish-{id}.log"));
    let settings_path = dir.join(format!("space-skirmish-start-{id}.json"));
    std::fs::write(&settings_path, r#"{ "grav_const": 2.0 }"#).unwrap();

    let mut session = Session::start(&log_path, Some(&settings_path)).unwrap();
    // Ships touching every frame would flood an info-level log
    session.state.grav_const = 0.0;
    session.state.ships[0].pos = Vec2::new(300.0, 300.0);
    session.state.ships[1].pos = Vec2::new(350.0, 300.0);
    let mut out = Vec::new();
    session.step(20, &mut out).unwrap();
    log::logger().flush();
    let log = std::fs::read_to_string(&log_path).unwrap();

    std::fs::remove_file(&settings_path).ok();
    std::fs::remove_file(&log_path).ok();

    assert!(String::from_utf8(out).unwrap().contains("bumped into"));
    assert!(log.contains("Loaded settings from"));
    assert!(log.contains("G = 2"));
    assert!(!log.contains("bumped into"));
}
