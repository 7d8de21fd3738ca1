//! Flappy Plane entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_plane::consts::SIM_DT;
    use flappy_plane::renderer::{RenderState, VertexBatch};
    use flappy_plane::{Game, Tuning};

    /// Browser-side wrapper holding the game and its GPU state
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        batch: VertexBatch,
        last_time: f64,
        // Last values written to the DOM
        shown_score: Option<u32>,
        shown_game_over: Option<bool>,
    }

    impl App {
        fn new(game: Game) -> Self {
            Self {
                game,
                render_state: None,
                batch: VertexBatch::new(),
                last_time: 0.0,
                shown_score: None,
                shown_game_over: None,
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.game.render(&mut self.batch);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.batch.vertices()) {
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
        }

        /// Push score and game-over visibility into the DOM when they change
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let score = self.game.score();
            if self.shown_score != Some(score) {
                if let Some(el) = document.get_element_by_id("score") {
                    el.set_text_content(Some(&format!("Score: {}", score)));
                }
                self.shown_score = Some(score);
            }

            let game_over = self.game.is_game_over();
            if self.shown_game_over != Some(game_over) {
                if let Some(el) = document.get_element_by_id("game-over") {
                    let classes = el.class_list();
                    let toggled = if game_over {
                        classes.remove_1("hidden")
                    } else {
                        classes.add_1("hidden")
                    };
                    if let Err(e) = toggled {
                        log::warn!("Game over overlay toggle failed: {:?}", e);
                    }
                }
                self.shown_game_over = Some(game_over);
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flappy Plane starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = Tuning::load(&canvas);
        let canvas_size = glam::Vec2::new(tuning.canvas_width, tuning.canvas_height);

        // Backing store follows the CSS size at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(Game::new(seed, tuning))));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, canvas_size)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Flappy Plane running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse press
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.activate();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start; preventDefault suppresses the emulated mousedown so one tap flaps once
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.activate();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        a.game.activate();
                    }
                    "i" | "I" => {
                        let enabled = !a.game.autopilot();
                        a.game.set_autopilot(enabled);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.game.advance(dt);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::{Context, Result, bail};

    use flappy_plane::renderer::VertexBatch;
    use flappy_plane::{Game, Tuning};

    /// Command line for the native runner
    pub struct Args {
        pub tuning_path: Option<String>,
        pub seed: u64,
        pub frames: u64,
    }

    impl Args {
        pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
            let mut parsed = Args {
                tuning_path: None,
                seed: 1,
                frames: 3600,
            };

            let mut args = args.into_iter();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--seed" => {
                        let value = args.next().context("--seed needs a value")?;
                        parsed.seed = value
                            .parse()
                            .with_context(|| format!("invalid seed {:?}", value))?;
                    }
                    "--frames" => {
                        let value = args.next().context("--frames needs a value")?;
                        parsed.frames = value
                            .parse()
                            .with_context(|| format!("invalid frame count {:?}", value))?;
                    }
                    flag if flag.starts_with("--") => bail!("unknown option {}", flag),
                    path => parsed.tuning_path = Some(path.to_string()),
                }
            }
            Ok(parsed)
        }
    }

    pub fn load_tuning(path: Option<&str>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path))?;
        let tuning = Tuning::from_json(&json).with_context(|| format!("loading {}", path))?;
        log::info!("Loaded tuning from {}", path);
        Ok(tuning)
    }

    /// Let the autopilot fly until it crashes or the frame budget runs out
    pub fn run(args: Args) -> Result<()> {
        let tuning = load_tuning(args.tuning_path.as_deref())?;
        let mut game = Game::new(args.seed, tuning);
        game.set_autopilot(true);

        let mut batch = VertexBatch::new();
        let mut frames = 0;
        while frames < args.frames && !game.is_game_over() {
            game.tick(&mut batch);
            frames += 1;
        }

        if game.is_game_over() {
            log::info!("Crashed after {} frames, score {}", frames, game.score());
        } else {
            log::info!("Survived {} frames, score {}", frames, game.score());
        }
        println!("score: {}", game.score());
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Flappy Plane (native) starting...");
    log::info!("Native mode runs the autopilot headless - run with `trunk serve` for the web version");

    let args = headless::Args::parse(std::env::args().skip(1))?;
    headless::run(args)
}
