//! Browser bindings
//!
//! Each game is exported as a class the page drives from its own
//! `requestAnimationFrame` loop and DOM listeners. Events reach the page as
//! JSON strings through a single listener callback; drawing stays in JS.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::breakout::BrickBreaker;
use crate::driver::FrameDriver;
use crate::highscores::BestScore;
use crate::hockey::Hockey;
use crate::input::{HockeyInput, InputEvent, Key};
use crate::platform::{LocalStorage, now_ms};
use crate::settings::Settings;
use crate::sim::{GameEvent, Observer, Playfield, seeded_rng};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Neon Arcade starting...");
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("Failed to encode snapshot: {e}");
        String::from("null")
    })
}

/// Forwards every game event to a JS function as JSON
#[derive(Default)]
struct JsObserver {
    listener: Option<js_sys::Function>,
}

impl Observer for JsObserver {
    fn on_event(&mut self, event: &GameEvent) {
        if let Some(listener) = &self.listener {
            let json = JsValue::from_str(&to_json(event));
            if let Err(e) = listener.call1(&JsValue::NULL, &json) {
                log::warn!("Event listener threw: {:?}", e);
            }
        }
    }
}

fn key_event(name: &str, down: bool) -> Option<InputEvent> {
    let key = Key::from_name(name)?;
    Some(if down { InputEvent::KeyDown(key) } else { InputEvent::KeyUp(key) })
}

#[wasm_bindgen]
pub struct BrickBreakerApp {
    driver: FrameDriver<BrickBreaker>,
    observer: JsObserver,
}

#[wasm_bindgen]
impl BrickBreakerApp {
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f32, viewport_height: f32) -> BrickBreakerApp {
        let store = LocalStorage;
        let settings = Settings::load(&store);
        let best = BestScore::load(&store);
        let field = Playfield::fit_viewport(viewport_width, viewport_height, settings.breakout.max_height);
        let seed = js_sys::Date::now() as u64;
        log::info!("Brick breaker created with seed: {}", seed);

        let game = BrickBreaker::new(field, settings.breakout, seeded_rng(seed)).with_best_score(best);
        Self {
            driver: FrameDriver::new(game, &settings).with_store(Box::new(store)),
            observer: JsObserver::default(),
        }
    }

    /// `listener(eventJson)` is called for every game event
    pub fn set_listener(&mut self, listener: js_sys::Function) {
        self.observer.listener = Some(listener);
    }

    pub fn start(&mut self) {
        self.driver.start(&mut self.observer);
    }

    /// Step with a `requestAnimationFrame` timestamp
    pub fn frame(&mut self, timestamp_ms: f64) -> f32 {
        self.driver.frame(timestamp_ms, &mut self.observer)
    }

    /// Step using the page clock
    pub fn frame_now(&mut self) -> f32 {
        self.driver.frame(now_ms(), &mut self.observer)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.driver
            .handle_input(&InputEvent::PointerMove { x, y }, &mut self.observer);
    }

    /// Returns true when the key is one the game uses
    pub fn key_down(&mut self, key: &str) -> bool {
        match key_event(key, true) {
            Some(event) => {
                self.driver.handle_input(&event, &mut self.observer);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match key_event(key, false) {
            Some(event) => {
                self.driver.handle_input(&event, &mut self.observer);
                true
            }
            None => false,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.driver.toggle_pause(&mut self.observer);
    }

    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.driver.request_resize(viewport_width, viewport_height);
    }

    /// Drawable state as JSON
    pub fn snapshot(&self) -> String {
        to_json(&self.driver.sim().snapshot())
    }

    pub fn best_score(&self) -> u32 {
        self.driver.sim().best.value
    }
}

#[wasm_bindgen]
pub struct HockeyApp {
    driver: FrameDriver<Hockey>,
    observer: JsObserver,
}

#[wasm_bindgen]
impl HockeyApp {
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f32, viewport_height: f32, touch: bool) -> HockeyApp {
        let settings = Settings::load(&LocalStorage);
        let field = Playfield::fit_viewport(viewport_width, viewport_height, settings.hockey.max_height);
        let adapter = if touch { HockeyInput::touch() } else { HockeyInput::default() };

        Self {
            driver: FrameDriver::new(Hockey::new(field, settings.hockey), &settings).with_adapter(adapter),
            observer: JsObserver::default(),
        }
    }

    pub fn set_listener(&mut self, listener: js_sys::Function) {
        self.observer.listener = Some(listener);
    }

    pub fn start(&mut self) {
        self.driver.start(&mut self.observer);
    }

    pub fn frame(&mut self, timestamp_ms: f64) -> f32 {
        self.driver.frame(timestamp_ms, &mut self.observer)
    }

    pub fn frame_now(&mut self) -> f32 {
        self.driver.frame(now_ms(), &mut self.observer)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.driver
            .handle_input(&InputEvent::PointerMove { x, y }, &mut self.observer);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.driver
            .handle_input(&InputEvent::PointerDown { x, y }, &mut self.observer);
    }

    pub fn pointer_up(&mut self) {
        self.driver.handle_input(&InputEvent::PointerUp, &mut self.observer);
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        match key_event(key, true) {
            Some(event) => {
                self.driver.handle_input(&event, &mut self.observer);
                true
            }
            None => false,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.driver.toggle_pause(&mut self.observer);
    }

    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.driver.request_resize(viewport_width, viewport_height);
    }

    pub fn snapshot(&self) -> String {
        to_json(self.driver.sim())
    }
}
