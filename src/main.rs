//! Sky Fruits entry point
//!
//! On the web this wires the engine to the page: canvas, HUD, overlays,
//! sound and the pose classifier. Natively it plays a headless round with a
//! simple autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement};

    use sky_fruits::audio::AudioManager;
    use sky_fruits::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use sky_fruits::renderer::CanvasRenderer;
    use sky_fruits::sim::StatusUpdate;
    use sky_fruits::{GameEngine, Prediction, PredictionStabilizer, Settings};

    /// Game instance holding all state
    struct Game {
        engine: GameEngine,
        renderer: Option<CanvasRenderer>,
        stabilizer: PredictionStabilizer,
        audio: Rc<AudioManager>,
        settings: Settings,
        loop_running: bool,
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    fn with_game(f: impl FnOnce(&Rc<RefCell<Game>>)) {
        GAME.with(|slot| {
            if let Some(game) = slot.borrow().as_ref() {
                f(game);
            } else {
                log::warn!("Game not initialized yet");
            }
        });
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let list = el.class_list();
            let _ = if hidden {
                list.add_1("hidden")
            } else {
                list.remove_1("hidden")
            };
        }
    }

    /// Scoreboard hook
    fn update_scoreboard(status: &StatusUpdate) {
        set_text("score", &status.score.to_string());
        set_text("time", &status.time_left.to_string());
        set_text("missed", &format!("{} / {}", status.missed, status.max_misses));

        let color = if status.missed >= 1 { "red" } else { "#2c3e50" };
        if let Some(el) = document()
            .and_then(|d| d.get_element_by_id("missed"))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("color", color);
        }
    }

    /// Game over hook
    fn show_game_over(final_score: u32, reason: &str) {
        set_text("overlay-title", reason);
        set_text("overlay-message", &format!("Final Score: {}", final_score));
        set_hidden("game-overlay", false);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Fruits starting...");

        let document = document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(DEFAULT_WIDTH as u32);
        canvas.set_height(DEFAULT_HEIGHT as u32);

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.set_volume(settings.effective_volume());
        let audio = Rc::new(audio);

        let seed = js_sys::Date::now() as u64;
        let mut engine = GameEngine::new(seed);
        engine.init(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        engine.on_status(update_scoreboard);
        engine.on_game_over(show_game_over);
        {
            let audio = audio.clone();
            engine.on_cue(move |cue| audio.play(cue));
        }

        let mut renderer = CanvasRenderer::new(&canvas);
        if renderer.is_none() {
            log::warn!("2D canvas context unavailable - rendering disabled");
        }
        if let Some(r) = renderer.as_mut() {
            r.set_background_alpha(settings.webcam_alpha);
        }

        let game = Rc::new(RefCell::new(Game {
            engine,
            renderer,
            stabilizer: settings.stabilizer(),
            audio,
            settings,
            loop_running: false,
        }));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        setup_button("start-btn");
        setup_button("restart-btn");

        log::info!("Game initialized with seed: {}", seed);
    }

    fn setup_button(id: &str) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            start_game();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Begin (or restart) a round
    #[wasm_bindgen]
    pub fn start_game() {
        set_hidden("start-overlay", true);
        set_hidden("game-overlay", true);

        with_game(|game| {
            let start_loop = {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.stabilizer.reset();
                g.engine.reseed(js_sys::Date::now() as u64);
                g.engine.start();
                !std::mem::replace(&mut g.loop_running, true)
            };
            if start_loop {
                request_animation_frame(game.clone());
            }
        });
    }

    /// Pose classifier output for one frame
    #[wasm_bindgen]
    pub fn submit_prediction(class_names: Vec<String>, probabilities: Vec<f32>) {
        let predictions: Vec<Prediction> = class_names
            .into_iter()
            .zip(probabilities)
            .map(|(name, p)| Prediction::new(name, p))
            .collect();

        with_game(|game| {
            let mut g = game.borrow_mut();

            if g.settings.show_labels {
                let html: String = predictions
                    .iter()
                    .map(|p| format!("<div>{}: {:.2}</div>", p.class_name, p.probability))
                    .collect();
                if let Some(el) = document().and_then(|d| d.get_element_by_id("label-container")) {
                    el.set_inner_html(&html);
                }
            }

            let Game {
                engine, stabilizer, ..
            } = &mut *g;
            if let Some(label) = stabilizer.stabilize(&predictions) {
                if engine.is_active() {
                    engine.set_player_pose(label);
                }
            }
        });
    }

    /// Canvas the pose model draws the webcam into
    #[wasm_bindgen]
    pub fn set_webcam_canvas(canvas: HtmlCanvasElement) {
        with_game(|game| {
            let mut g = game.borrow_mut();
            let show = g.settings.show_webcam;
            if let Some(renderer) = g.renderer.as_mut() {
                renderer.set_background(show.then_some(canvas));
            }
        });
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
            if g.engine.is_active() {
                g.engine.update(time);
            }
            let frame = g.engine.render_frame();
            if let Some(renderer) = g.renderer.as_ref() {
                renderer.render(&frame);
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Fruits (native) starting...");
    log::info!("Native mode plays a headless round - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    demo::play(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use sky_fruits::GameEngine;
    use sky_fruits::sim::{Cue, GameState, Lane};

    /// Frame length at 60 Hz
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Head for the lowest fruit, unless a bomb is about to land there
    fn pick_lane(state: &GameState) -> Lane {
        let danger = |lane: Lane| {
            state
                .items
                .iter()
                .any(|i| i.kind.is_bomb() && i.lane == lane && i.y > state.playfield.floor() - 120.0)
        };

        let target = state
            .items
            .iter()
            .filter(|i| !i.kind.is_bomb())
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|i| i.lane)
            .unwrap_or(state.player_lane);

        if !danger(target) {
            return target;
        }
        Lane::ALL
            .into_iter()
            .find(|&lane| !danger(lane))
            .unwrap_or(target)
    }

    pub fn play(seed: u64) {
        let mut engine = GameEngine::new(seed);
        let cues = Rc::new(RefCell::new(Vec::new()));
        let result = Rc::new(RefCell::new(None));
        {
            let cues = cues.clone();
            engine.on_cue(move |cue| cues.borrow_mut().push(cue));
        }
        {
            let result = result.clone();
            engine.on_game_over(move |score, reason| {
                *result.borrow_mut() = Some((score, reason.to_string()));
            });
        }

        engine.start();
        let mut now = 0.0;
        while engine.is_active() {
            let lane = pick_lane(engine.state());
            engine.set_player_pose(lane.as_str());
            engine.update(now);
            now += FRAME_MS;
        }

        let cues = cues.borrow();
        let count = |cue: Cue| cues.iter().filter(|&&c| c == cue).count();
        if let Some((score, reason)) = result.borrow().as_ref() {
            println!("{} Final score: {}", reason, score);
        }
        println!(
            "Caught {}, missed {}, bombs {} ({:.1}s played)",
            count(Cue::Caught),
            count(Cue::Missed),
            count(Cue::Bomb),
            now / 1000.0
        );
    }
}
