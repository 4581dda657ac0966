//! Space Skirmish entry point
//!
//! Browser build: canvas front end with keyboard and mouse input.
//! Native build: headless console reading commands from stdin.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use space_skirmish::Settings;
    use space_skirmish::audio::AudioManager;
    use space_skirmish::frame_clock::{FpsCounter, FrameClock};
    use space_skirmish::logging;
    use space_skirmish::renderer::{build, canvas};
    use space_skirmish::sim::{GameState, Key, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        settings: Settings,
        state: GameState,
        ctx: CanvasRenderingContext2d,
        audio: AudioManager,
        clock: FrameClock,
        fps: FpsCounter,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(settings: Settings, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: GameState::new(&settings),
                audio: AudioManager::new(&settings),
                clock: FrameClock::new(settings.frame_rate),
                fps: FpsCounter::new(),
                last_time: 0.0,
                input: TickInput::default(),
                ctx,
                settings,
            }
        }

        fn restart(&mut self) {
            self.state = GameState::new(&self.settings);
            self.input.clear();
            self.clock.reset();
            log::info!("Simulation restarted");
        }

        /// Run simulation frames for `dt` seconds of wall-clock time
        fn update(&mut self, dt: f32, time: f64) {
            let frames = self.clock.advance(dt);
            for _ in 0..frames {
                tick(&mut self.state, &self.input);
                // One-shot inputs only feed the first frame
                self.input.clear();

                let events = self.state.drain_events();
                self.audio.play_events(&events);
            }
            self.fps.record(time);
        }

        /// Render the current frame
        fn render(&self) {
            let fps = self.settings.show_frame_rate.then(|| self.fps.fps());
            let cmds = build(&self.state, fps);
            if let Err(e) = canvas::paint(&self.ctx, &cmds) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        logging::init_web();

        let settings = Settings::load();
        logging::log_session_start(&settings);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("canvas")
            .ok_or("missing #canvas element")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_width(settings.width as u32);
        canvas.set_height(settings.height as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let game = Rc::new(RefCell::new(Game::new(settings, ctx)));
        setup_input_handlers(&canvas, game.clone())?;
        request_animation_frame(game);

        log::info!("Space Skirmish running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard: player ship, pause, restart, mute
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let name = event.key();
                match name.as_str() {
                    "p" | "P" => g.input.pause = !g.input.pause,
                    "r" | "R" => g.restart(),
                    "m" | "M" => {
                        let muted = g.audio.toggle_mute();
                        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
                    }
                    _ => {
                        let Some(key) = Key::from_name(&name) else {
                            return;
                        };
                        event.prevent_default();
                        if g.settings.human_enabled {
                            log::debug!("User input: {}", name);
                            g.input.commands.push(key.command());
                        }
                    }
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse: grow or place a planet
        {
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();

                // Map CSS pixels to canvas pixels
                let rect = target.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                let scale_x = target.width() as f64 / rect.width();
                let scale_y = target.height() as f64 / rect.height();
                let x = (event.client_x() as f64 - rect.left()) * scale_x;
                let y = (event.client_y() as f64 - rect.top()) * scale_y;
                g.input.clicks.push(Vec2::new(x as f32, y as f32));
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::io::{BufRead, Write};
    use std::path::PathBuf;

    use space_skirmish::console::{self, Flow, Session};
    use space_skirmish::logging;

    let log_path = std::env::var_os("SPACE_SKIRMISH_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(logging::DEFAULT_LOG_FILE));
    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);

    let mut session = Session::start(&log_path, settings_path.as_deref())?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    writeln!(stdout, "Space Skirmish (headless) - type `help` for commands")?;
    for line in stdin.lock().lines() {
        let line = line?;
        match console::parse(&line) {
            Ok(Some(command)) => {
                if session.execute(command, &mut stdout)? == Flow::Quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => writeln!(stdout, "error: {e:#}")?,
        }
        stdout.flush()?;
    }

    log::info!("Simulation ended at frame {}", session.state.frame);
    Ok(())
}
