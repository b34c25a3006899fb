//! Dead Zone entry point
//!
//! Browser build: wires the DOM, input events and WebGPU to a `Session`.
//! Native build: runs a headless autopilot game on a virtual clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use dead_zone::Settings;
    use dead_zone::platform::{FrameHandle, InputState, Scheduler, TimerHandle};
    use dead_zone::renderer::{RenderState, VertexBatch};
    use dead_zone::sim::{Playfield, Session};
    use dead_zone::ui::Hud;

    /// HUD backed by the page's DOM elements
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    impl Hud for DomHud {
        fn set_score(&mut self, score: u32) {
            self.set_text("score", &score.to_string());
        }

        fn set_health_percent(&mut self, percent: f32) {
            if let Some(el) = self
                .document
                .get_element_by_id("health-fill")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = el
                    .style()
                    .set_property("width", &format!("{}%", percent.clamp(0.0, 100.0)));
            }
        }

        fn show_start_screen(&mut self) {
            self.set_hidden("start-screen", false);
            self.set_hidden("game-over-screen", true);
        }

        fn show_game_over_screen(&mut self, final_score: u32) {
            self.set_text("final-score", &final_score.to_string());
            self.set_hidden("game-over-screen", false);
        }

        fn hide_screens(&mut self) {
            self.set_hidden("start-screen", true);
            self.set_hidden("game-over-screen", true);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputState,
        batch: VertexBatch,
        render_state: Option<RenderState>,
        hud: DomHud,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        fn frame(&mut self, sched: &mut WebScheduler) {
            let Game {
                session,
                input,
                batch,
                render_state,
                hud,
                ..
            } = self;
            session.on_frame(sched, &*input, batch, hud);

            // Game over leaves the last frame on screen
            if !session.is_running() {
                return;
            }
            if let Some(rs) = render_state {
                match rs.render(batch) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::warn!("Surface lost, reconfiguring");
                        rs.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Match the canvas to the window; the playfield follows
        fn resize(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.session.resize(width as f32, height as f32);
            self.batch.resize(width as f32, height as f32);
            if let Some(rs) = self.render_state.as_mut() {
                rs.resize(width, height);
            }
        }
    }

    /// `requestAnimationFrame`/`setInterval` behind the `Scheduler` trait.
    /// Callbacks re-enter through the shared game handle.
    struct WebScheduler {
        game: Rc<RefCell<Game>>,
    }

    impl WebScheduler {
        fn new(game: &Rc<RefCell<Game>>) -> Self {
            Self { game: game.clone() }
        }
    }

    impl Scheduler for WebScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            let game = self.game.clone();
            let closure = Closure::once(move |_time: f64| {
                on_animation_frame(game);
            });
            let id = web_sys::window()
                .and_then(|w| w.request_animation_frame(closure.as_ref().unchecked_ref()).ok())
                .unwrap_or(0);
            closure.forget();
            FrameHandle(id)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle.0);
            }
        }

        fn start_interval(&mut self, period_ms: u32) -> TimerHandle {
            let game = self.game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().session.on_spawn_timer();
            });
            let id = web_sys::window()
                .and_then(|w| {
                    w.set_interval_with_callback_and_timeout_and_arguments_0(
                        closure.as_ref().unchecked_ref(),
                        period_ms as i32,
                    )
                    .ok()
                })
                .unwrap_or(0);
            closure.forget();
            TimerHandle(id)
        }

        fn clear_interval(&mut self, handle: TimerHandle) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle.0);
            }
        }
    }

    fn on_animation_frame(game: Rc<RefCell<Game>>) {
        let mut sched = WebScheduler::new(&game);
        game.borrow_mut().frame(&mut sched);
    }

    fn new_seed() -> u64 {
        js_sys::Date::now() as u64
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dead Zone starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load(&canvas);

        // Canvas pixels are CSS pixels so pointer coordinates map directly
        let width = window_dimension(window.inner_width());
        let height = window_dimension(window.inner_height());
        canvas.set_width(width);
        canvas.set_height(height);

        let bounds = Playfield::new(width as f32, height as f32);
        let mut hud = DomHud {
            document: document.clone(),
        };
        let session = Session::new(settings, bounds, &mut hud);

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

        let render_state = match RenderState::new(surface, &adapter, width, height).await {
            Ok(rs) => Some(rs),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                None
            }
        };

        let game = Rc::new(RefCell::new(Game {
            session,
            input: InputState::new(),
            batch: VertexBatch::new(bounds.width, bounds.height),
            render_state,
            hud,
            canvas: canvas.clone(),
        }));
        game.borrow_mut()
            .input
            .set_pointer(bounds.width / 2.0, bounds.height / 2.0);

        setup_input_handlers(game.clone());
        setup_resize_handler(game.clone());
        setup_screen_buttons(game);

        log::info!("Dead Zone ready");
    }

    fn window_dimension(value: Result<JsValue, JsValue>) -> u32 {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(1.0) as u32)
            .unwrap_or(1)
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Movement keys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_down(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys held while the window loses focus would stick
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Aim
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .input
                    .set_pointer(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Fire
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input
                    .set_pointer(event.client_x() as f32, event.client_y() as f32);
                let Game { session, input, .. } = &mut *g;
                session.fire(&*input);
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window_dimension(window.inner_width());
            let height = window_dimension(window.inner_height());
            log::debug!("Resize to {}x{}", width, height);
            game.borrow_mut().resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_screen_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut sched = WebScheduler::new(&game);
                let mut g = game.borrow_mut();
                let Game { session, hud, .. } = &mut *g;
                session.start(new_seed(), &mut sched, hud);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut sched = WebScheduler::new(&game);
                let mut g = game.borrow_mut();
                let Game { session, hud, .. } = &mut *g;
                session.restart(new_seed(), &mut sched, hud);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;

    use dead_zone::Settings;
    use dead_zone::platform::{Direction, Due, InputState, ManualScheduler};
    use dead_zone::renderer::VertexBatch;
    use dead_zone::sim::{Playfield, RunSummary, Session, World};
    use dead_zone::ui::LogHud;

    /// Ten minutes at 60 fps
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    const FIRE_EVERY_FRAMES: u64 = 12;
    /// Back away from zombies closer than this
    const DANGER_RADIUS: f32 = 120.0;

    pub fn run(settings_path: Option<&std::path::Path>) {
        let settings = Settings::load(settings_path);
        let bounds = Playfield::default();
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        let mut hud = LogHud::default();
        let mut session = Session::new(settings, bounds, &mut hud);
        let mut sched = ManualScheduler::default();
        let mut batch = VertexBatch::new(bounds.width, bounds.height);
        let mut input = InputState::new();

        session.start(seed, &mut sched, &mut hud);

        let mut frames = 0u64;
        while session.is_running() && frames < MAX_FRAMES {
            for due in sched.advance(sched.frame_period_ms()) {
                match due {
                    Due::Frame(_) => {
                        if let Some(world) = session.world() {
                            steer(world, &mut input);
                        }
                        if frames % FIRE_EVERY_FRAMES == 0 {
                            session.fire(&input);
                        }
                        session.on_frame(&mut sched, &input, &mut batch, &mut hud);
                        frames += 1;
                    }
                    Due::Interval(_) => {
                        session.on_spawn_timer();
                    }
                }
            }
        }

        let summary = match (session.last_run(), session.world()) {
            (Some(summary), _) => summary.clone(),
            (None, Some(world)) => {
                log::info!("Frame limit reached, still alive");
                RunSummary {
                    final_score: world.score,
                    kills: world.kills,
                    ticks: world.time_ticks,
                    seed: world.seed,
                }
            }
            (None, None) => return,
        };

        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        }
    }

    /// Aim at the nearest zombie and walk away from it when it gets close
    fn steer(world: &World, input: &mut InputState) {
        input.release_all();
        let player = world.player.pos;
        let nearest = world.zombies.iter().min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .total_cmp(&b.pos.distance_squared(player))
        });
        let Some(zombie) = nearest else {
            input.set_pointer(player.x + 1.0, player.y);
            return;
        };

        input.set_pointer(zombie.pos.x, zombie.pos.y);
        let away: Vec2 = player - zombie.pos;
        if away.length() < DANGER_RADIUS {
            input.set_pressed(Direction::Left, away.x < 0.0);
            input.set_pressed(Direction::Right, away.x > 0.0);
            input.set_pressed(Direction::Up, away.y < 0.0);
            input.set_pressed(Direction::Down, away.y > 0.0);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dead Zone (native) starting headless autopilot...");
    log::info!("Run with `trunk serve` for the playable web version");

    let settings_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    autopilot::run(settings_path.as_deref());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
