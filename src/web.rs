//! Browser bridge
//!
//! The page passes in a JavaScript object implementing the rendering
//! contract (`cardSelected`, `cardsMatched`, `scoreChanged`, `turnChanged`,
//! `timerChanged`, `boardReset`, `roundLabelChanged`, `announce`) and calls
//! into `WordMatchApp` for clicks, uploads and settings. Timer ticks and
//! deferred transitions run on `setInterval`/`setTimeout`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::controller::GameController;
use crate::error::GameError;
use crate::render::Renderer;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::settings::{GameMode, SettingField, Settings};
use crate::sim::{Card, RoundBoard, Side, Team};
use crate::words::WordPairSource;

type WebController = GameController<JsRenderer, WebScheduler>;

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_json::to_string(value)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL)
}

/// Forwards render deltas to a JS object
pub struct JsRenderer {
    target: JsValue,
}

impl JsRenderer {
    fn call(&self, name: &str, args: &[JsValue]) {
        let Ok(member) = js_sys::Reflect::get(&self.target, &JsValue::from_str(name)) else {
            return;
        };
        let Some(func) = member.dyn_ref::<js_sys::Function>() else {
            log::warn!("Renderer has no {} method", name);
            return;
        };
        let args: js_sys::Array = args.iter().collect();
        if let Err(err) = func.apply(&self.target, &args) {
            log::error!("Renderer.{} threw: {:?}", name, err);
        }
    }
}

impl Renderer for JsRenderer {
    fn card_selected(&mut self, card: Card, selected: bool) {
        self.call("cardSelected", &[to_js(&card), JsValue::from_bool(selected)]);
    }

    fn cards_matched(&mut self, cards: &[Card]) {
        self.call("cardsMatched", &[to_js(&cards)]);
    }

    fn score_changed(&mut self, team: Team, value: u32) {
        self.call("scoreChanged", &[JsValue::from(team.number()), JsValue::from(value)]);
    }

    fn turn_changed(&mut self, team: Team) {
        self.call("turnChanged", &[JsValue::from(team.number())]);
    }

    fn timer_changed(&mut self, seconds_remaining: u32) {
        self.call("timerChanged", &[JsValue::from(seconds_remaining)]);
    }

    fn board_reset(&mut self, board: &RoundBoard) {
        self.call("boardReset", &[to_js(board)]);
    }

    fn round_label_changed(&mut self, text: &str) {
        self.call("roundLabelChanged", &[JsValue::from_str(text)]);
    }

    fn announce(&mut self, message: &str) {
        self.call("announce", &[JsValue::from_str(message)]);
    }
}

/// `setInterval`/`setTimeout` backend delivering fired tasks to the game
pub struct WebScheduler {
    game: Weak<RefCell<WebController>>,
}

impl WebScheduler {
    fn schedule(&mut self, ms: u32, repeating: bool) -> TaskHandle {
        let Some(window) = web_sys::window() else {
            log::error!("No window to schedule on");
            return TaskHandle(-1);
        };

        // The callback learns its own id once the browser assigns it
        let id = Rc::new(Cell::new(-1));
        let game = self.game.clone();
        let own_id = Rc::clone(&id);
        let callback = Closure::<dyn FnMut()>::new(move || {
            let Some(game) = game.upgrade() else { return };
            match game.try_borrow_mut() {
                Ok(mut game) => {
                    game.on_task(TaskHandle(own_id.get()));
                }
                Err(_) => log::warn!("Task {} fired during another update", own_id.get()),
            };
        })
        .into_js_value();

        let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
        let assigned = if repeating {
            window.set_interval_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
        } else {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
        };
        match assigned {
            Ok(handle) => {
                id.set(handle);
                TaskHandle(handle)
            }
            Err(err) => {
                log::error!("Failed to schedule task: {:?}", err);
                TaskHandle(-1)
            }
        }
    }
}

impl Scheduler for WebScheduler {
    fn schedule_repeating(&mut self, period_ms: u32) -> TaskHandle {
        self.schedule(period_ms, true)
    }

    fn schedule_once(&mut self, delay_ms: u32) -> TaskHandle {
        self.schedule(delay_ms, false)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if let Some(window) = web_sys::window() {
            // Timeouts and intervals share one id pool
            window.clear_interval_with_handle(handle.0);
            window.clear_timeout_with_handle(handle.0);
        }
    }
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WordMatchApp {
    game: Rc<RefCell<WebController>>,
}

#[wasm_bindgen]
impl WordMatchApp {
    /// `settings_json` is optional `{"mode": "Team", "rounds_per_game": 2, "timer_duration": 15}`
    #[wasm_bindgen(constructor)]
    pub fn new(renderer: JsValue, settings_json: Option<String>) -> WordMatchApp {
        let settings = settings_json
            .as_deref()
            .and_then(|json| match serde_json::from_str::<Settings>(json) {
                Ok(settings) => Some(settings.clamped()),
                Err(err) => {
                    log::warn!("Ignoring bad settings JSON: {}", err);
                    None
                }
            })
            .unwrap_or_default();

        let game = Rc::new_cyclic(|weak| {
            RefCell::new(GameController::new(
                settings,
                WordPairSource::Sample,
                JsRenderer { target: renderer },
                WebScheduler { game: weak.clone() },
            ))
        });
        log::info!("Word Match ready");
        WordMatchApp { game }
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&self) -> Result<(), JsValue> {
        self.with_game(|game| game.new_game())
    }

    /// Load uploaded CSV text. Throws if no line was usable; the game has
    /// already fallen back to the sample words by then.
    #[wasm_bindgen(js_name = loadCsv)]
    pub fn load_csv(&self, text: &str) -> Result<u32, JsValue> {
        let count = self.with_game(|game| game.load_word_pairs(text))??;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    #[wasm_bindgen(js_name = useSamplePairs)]
    pub fn use_sample_pairs(&self) -> Result<(), JsValue> {
        self.with_game(|game| game.use_sample_pairs())
    }

    /// `side` is `"english"` or `"translation"`. Returns whether anything changed.
    #[wasm_bindgen(js_name = clickCard)]
    pub fn click_card(&self, index: u32, side: &str) -> Result<bool, JsValue> {
        let side = Side::from_str(side).ok_or_else(|| GameError::UnknownSide(side.to_string()))?;
        let card = Card::new(index as usize, side);
        self.with_game(|game| game.on_card_click(card))
    }

    #[wasm_bindgen(js_name = switchTeam)]
    pub fn switch_team(&self) -> Result<bool, JsValue> {
        self.with_game(|game| game.switch_team())
    }

    /// Returns the saved (clamped) settings as JSON
    #[wasm_bindgen(js_name = applySettings)]
    pub fn apply_settings(&self, mode: &str, rounds: u32, timer_secs: u32) -> Result<String, JsValue> {
        let mode = GameMode::from_str(mode).ok_or_else(|| GameError::UnknownMode(mode.to_string()))?;
        let saved = self.with_game(|game| game.apply_settings(mode, rounds, timer_secs))?;
        serde_json::to_string(&saved).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Plus/minus press for `"rounds"` or `"timer"`. Returns the saved
    /// settings as JSON.
    #[wasm_bindgen(js_name = stepSetting)]
    pub fn step_setting(&self, field: &str, up: bool) -> Result<String, JsValue> {
        let field = SettingField::from_str(field).ok_or_else(|| GameError::UnknownSetting(field.to_string()))?;
        let saved = self.with_game(|game| game.step_setting(field, up))?;
        serde_json::to_string(&saved).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Current settings as JSON
    pub fn settings(&self) -> Result<String, JsValue> {
        let settings = self.with_game(|game| *game.settings())?;
        serde_json::to_string(&settings).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Full game state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.with_game(|game| serde_json::to_string(game.state()))?
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}

impl WordMatchApp {
    fn with_game<T>(&self, f: impl FnOnce(&mut WebController) -> T) -> Result<T, JsValue> {
        let mut game = self
            .game
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("game is busy"))?;
        Ok(f(&mut game))
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}
