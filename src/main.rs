//! Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//! The web build is playable; the native build runs a headless autopilot game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use dodger::audio::WebAudio;
    use dodger::renderer::{RectBatch, RenderState, TextItem};
    use dodger::shell::scene::to_css;
    use dodger::shell::{FixedStep, KeyState, Shell, ShellStatus, TextAnchor};
    use dodger::sim::{GameSession, TickInput, autopilot};
    use dodger::{GameConfig, Settings};

    /// Game instance holding all state
    struct Game {
        shell: Shell<RectBatch, WebAudio>,
        render_state: Option<RenderState>,
        config: GameConfig,
        clock: FixedStep,
        keys: KeyState,
        last_time: f64,
        /// Throttle for the render loop (ms timestamp of last drawn frame)
        last_frame: f64,
        /// Idle/demo mode - autopilot plays the game
        demo: bool,
        status: ShellStatus,
    }

    impl Game {
        fn new(config: GameConfig, settings: Settings) -> Self {
            let session = GameSession::new(config.clone()).expect("default config is valid");
            let audio = WebAudio::new(&settings);
            Self {
                shell: Shell::new(session, RectBatch::new(), audio, settings),
                render_state: None,
                config,
                clock: FixedStep::default(),
                keys: KeyState::default(),
                last_time: 0.0,
                last_frame: 0.0,
                demo: false,
                status: ShellStatus::Playing,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let ticks = self.clock.advance(dt);
            for _ in 0..ticks {
                let direction = if self.demo {
                    autopilot::steer(&self.shell.session)
                } else {
                    self.keys.direction()
                };
                self.shell.step(&TickInput {
                    direction,
                    elapsed: self.clock.step(),
                });
            }
        }

        /// Render the current frame
        fn render(&mut self, dt: f32, document: &Document) {
            self.shell.renderer.clear();
            self.status = self.shell.draw(dt);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.shell.renderer) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            update_overlay(document, &self.config, self.shell.renderer.texts());

            if let Some(el) = document.get_element_by_id("restart-prompt") {
                let class = if self.status == ShellStatus::Finished { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }

        /// Reset game state for restart
        fn restart(&mut self) {
            let mut config = self.config.clone();
            config.seed = Some(js_sys::Date::now() as u64);
            match self.shell.restart(config) {
                Ok(()) => {
                    self.clock.reset();
                    self.keys.clear();
                    self.status = ShellStatus::Playing;
                    log::info!("Game restarted");
                }
                Err(e) => log::error!("Restart failed: {}", e),
            }
        }
    }

    /// Mirror the batch's text items into absolutely positioned overlay spans
    fn update_overlay(document: &Document, config: &GameConfig, texts: &[TextItem]) {
        let Some(overlay) = document.get_element_by_id("overlay") else {
            return;
        };
        overlay.set_inner_html("");

        for item in texts {
            let Ok(span) = document.create_element("span") else {
                continue;
            };
            // Positions are in game pixels; the overlay shares the canvas box
            let left = item.pos.x / config.width as f32 * 100.0;
            let top = item.pos.y / config.height as f32 * 100.0;
            let transform = match item.anchor {
                TextAnchor::TopLeft => "none",
                TextAnchor::Center => "translate(-50%, -50%)",
            };
            let style = format!(
                "position:absolute;left:{left}%;top:{top}%;transform:{transform};\
                 color:{};font-size:calc({}cqh * 100 / {});white-space:nowrap;",
                to_css(item.color),
                item.font_size,
                config.height,
            );
            let _ = span.set_attribute("style", &style);
            span.set_text_content(Some(&item.text));
            let _ = overlay.append_child(&span);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dodger starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let config = GameConfig {
            seed: Some(js_sys::Date::now() as u64),
            ..Default::default()
        };
        let screen = glam::Vec2::new(config.width as f32, config.height as f32);
        let game = Rc::new(RefCell::new(Game::new(config, Settings::load())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, screen).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Dodger running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.shell.audio.resume();
                let key = event.key();
                if g.keys.key_down(&key) {
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    " " | "Enter" if g.status == ShellStatus::Finished => g.restart(),
                    "i" | "I" => {
                        g.demo = !g.demo;
                        log::info!("Demo mode: {}", g.demo);
                    }
                    "m" | "M" => {
                        let mut settings = g.shell.settings.clone();
                        settings.muted = !settings.muted;
                        settings.save();
                        g.shell.audio.apply_settings(&settings);
                        g.shell.settings = settings;
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            // Releases are lost while unfocused
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                g.clock.step()
            };
            g.last_time = time;

            g.update(dt);

            // Cap presented frames at the configured rate
            let frame_ms = (g.shell.settings.frame_secs() * 1000.0) as f64;
            if time - g.last_frame >= frame_ms * 0.9 {
                let frame_dt = if g.last_frame > 0.0 {
                    ((time - g.last_frame) / 1000.0) as f32
                } else {
                    dt
                };
                g.last_frame = time;
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    g.render(frame_dt, &document);
                }
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Ticks the headless runner simulates when no limit is given (five minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_MAX_TICKS: u64 = 5 * 60 * 60;

/// Headless run: `dodger [config.json] [max_ticks]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;

    use dodger::audio::LogAudio;
    use dodger::consts::SIM_DT;
    use dodger::renderer::RectBatch;
    use dodger::shell::{Shell, ShellStatus};
    use dodger::sim::{GameSession, TickInput, autopilot};
    use dodger::{GameConfig, Settings};

    env_logger::init();
    log::info!("Dodger (native) starting...");
    log::info!("Native mode runs the autopilot headless - run with `trunk serve` to play");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => GameConfig::default(),
    };
    let max_ticks = match args.next() {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("tick limit must be a whole number, got {arg:?}"))?,
        None => DEFAULT_MAX_TICKS,
    };

    let session = GameSession::new(config).context("invalid game configuration")?;
    let mut shell = Shell::new(session, RectBatch::new(), LogAudio::new(), Settings::load());

    for _ in 0..max_ticks {
        let direction = autopilot::steer(&shell.session);
        shell.step(&TickInput {
            direction,
            elapsed: SIM_DT,
        });

        shell.renderer.clear();
        if shell.draw(SIM_DT) != ShellStatus::Playing {
            break;
        }
    }

    let session = &shell.session;
    log::info!(
        "Run finished after {} ticks ({:.1}s simulated), {} cues played",
        session.time_ticks(),
        session.elapsed(),
        shell.audio.played()
    );
    println!(
        "SCORE: {} ({})",
        session.score(),
        if session.is_running() { "survived" } else { "GAME OVER" }
    );

    Ok(())
}
