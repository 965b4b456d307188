//! Game lifecycle orchestration
//!
//! `GameController` owns the game state, the turn timer and the handles of
//! any scheduled work. It is the only place with side effects: every change
//! is pushed to the `Renderer`, and every delay or tick goes through the
//! `Scheduler`.

use log::{debug, info, warn};

use crate::consts::*;
use crate::error::Result;
use crate::render::Renderer;
use crate::scheduler::{ManualScheduler, Scheduler, TaskHandle};
use crate::settings::{GameMode, SettingField, Settings};
use crate::sim::{
    Card, GamePhase, GameState, MatchResult, RoundBoard, Selection, Shuffler, Team, TimerTick,
    TurnTimer, build_board, check_match, select_card,
};
use crate::words::{WordPairSource, sample_pairs};

/// Work waiting on a one-shot task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    AdvanceRound,
    GameOver,
}

pub struct GameController<R: Renderer, S: Scheduler> {
    state: GameState,
    /// Latest saved settings; applied at round boundaries and new games
    settings: Settings,
    source: WordPairSource,
    shuffler: Shuffler,
    timer: TurnTimer,
    /// Repeating one-second task while the timer runs
    tick_task: Option<TaskHandle>,
    /// At most one pending round advance or result announcement
    pending: Option<(TaskHandle, Deferred)>,
    /// Mismatched pair left face up until its one-shot fires
    mismatch: Option<(TaskHandle, [Card; 2])>,
    renderer: R,
    scheduler: S,
}

impl<R: Renderer, S: Scheduler> GameController<R, S> {
    /// Create a controller and start the first game
    pub fn new(settings: Settings, source: WordPairSource, renderer: R, scheduler: S) -> Self {
        Self::with_shuffler(settings, source, renderer, scheduler, Shuffler::from_entropy())
    }

    pub fn with_shuffler(
        settings: Settings,
        source: WordPairSource,
        renderer: R,
        scheduler: S,
        shuffler: Shuffler,
    ) -> Self {
        let settings = settings.clamped();
        let mut controller = Self {
            state: GameState::new(&settings, source.pairs()),
            settings,
            source,
            shuffler,
            timer: TurnTimer::new(settings.timer_duration),
            tick_task: None,
            pending: None,
            mismatch: None,
            renderer,
            scheduler,
        };
        controller.new_game();
        controller
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn board(&self) -> &RoundBoard {
        &self.state.board
    }

    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    pub fn source(&self) -> &WordPairSource {
        &self.source
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// A round advance or result is pending
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Full reset: scores, round, board, timer. Mode and config come from
    /// the current settings.
    pub fn new_game(&mut self) {
        self.cancel_pending();
        self.cancel_ticking();
        self.drop_mismatch();

        self.state = GameState::new(&self.settings, self.source.pairs());
        let board = self.draw_board();
        self.state.reset_board(board);
        self.timer = TurnTimer::new(self.settings.timer_duration);
        self.state.time_remaining = self.timer.remaining();

        info!(
            "New game: {} mode, {} rounds, {}s turns, {} pairs on the board",
            self.state.mode.as_str(),
            self.state.rounds_per_game,
            self.state.timer_duration,
            self.state.board_size()
        );

        self.renderer.board_reset(&self.state.board);
        self.renderer.round_label_changed(&self.state.round_label());
        for team in [Team::One, Team::Two] {
            self.renderer.score_changed(team, 0);
        }
        if self.state.mode.uses_teams() {
            self.renderer.turn_changed(self.state.current_team);
            self.renderer.timer_changed(self.state.time_remaining);
        }
    }

    /// Replace the pool with uploaded `term,translation` text and restart.
    ///
    /// Text without a single usable line falls back to the sample words; the
    /// game still restarts and the parse error is returned for the host.
    pub fn load_word_pairs(&mut self, text: &str) -> Result<usize> {
        let loaded = WordPairSource::from_text(text);
        let result = match loaded {
            Ok(source) => {
                let count = source.pairs().len();
                info!("Loaded {} word pairs", count);
                self.source = source;
                Ok(count)
            }
            Err(err) => {
                warn!("Upload rejected ({}), using sample words", err);
                self.source = WordPairSource::Sample;
                Err(err)
            }
        };
        self.new_game();
        if result.is_err() {
            self.renderer
                .announce("No valid word pairs found in that file. Using the sample words instead.");
        }
        result
    }

    /// Go back to the built-in word set and restart
    pub fn use_sample_pairs(&mut self) {
        self.source = WordPairSource::Sample;
        self.new_game();
    }

    /// Store new settings. Timer and round count apply when the current
    /// board is finished; mode applies at the next new game.
    pub fn apply_settings(&mut self, mode: GameMode, rounds: u32, timer_secs: u32) -> Settings {
        self.settings = Settings::new(mode, rounds, timer_secs);
        info!(
            "Settings saved: {} mode, {} rounds, {}s turns",
            self.settings.mode.as_str(),
            self.settings.rounds_per_game,
            self.settings.timer_duration
        );
        self.settings
    }

    /// One plus/minus press on the settings panel, saved like `apply_settings`
    pub fn step_setting(&mut self, field: SettingField, up: bool) -> Settings {
        let mut settings = self.settings;
        if up {
            settings.increment(field);
        } else {
            settings.decrement(field);
        }
        self.apply_settings(settings.mode, settings.rounds_per_game, settings.timer_duration)
    }

    /// Handle a click on a card. Returns false if nothing changed.
    pub fn on_card_click(&mut self, card: Card) -> bool {
        if !self.state.accepts_clicks() {
            debug!("Click on {:?} ignored while {:?}", card, self.state.phase);
            return false;
        }

        let selection = select_card(&mut self.state, card);
        if !selection.changed() {
            return false;
        }
        if let Selection::Replaced { previous } = selection {
            self.renderer.card_selected(previous, false);
        }
        self.renderer.card_selected(card, true);

        if self.state.mode.uses_teams() && !self.timer.is_running() {
            self.start_timer();
        }

        if let Some(result) = check_match(&mut self.state) {
            self.resolve(result);
        }
        true
    }

    /// Hand the turn to the other team (Team mode only)
    pub fn switch_team(&mut self) -> bool {
        if !self.state.mode.uses_teams() || !self.state.accepts_clicks() {
            return false;
        }
        self.reset_timer();
        self.change_turn();
        info!("{} takes the turn", self.state.current_team.label());
        true
    }

    /// Deliver any fired task
    pub fn on_task(&mut self, handle: TaskHandle) -> bool {
        if self.tick_task == Some(handle) {
            self.on_timer_tick(handle)
        } else if matches!(self.mismatch, Some((pending, _)) if pending == handle) {
            if let Some((_, cards)) = self.mismatch.take() {
                self.turn_down(cards);
            }
            true
        } else {
            self.on_deferred(handle)
        }
    }

    /// One second of the turn timer has passed
    pub fn on_timer_tick(&mut self, handle: TaskHandle) -> bool {
        if self.tick_task != Some(handle) {
            debug!("Dropping stale timer tick {:?}", handle);
            return false;
        }

        match self.timer.tick() {
            TimerTick::Idle => self.cancel_ticking(),
            TimerTick::Counting(remaining) => {
                self.state.time_remaining = remaining;
                self.renderer.timer_changed(remaining);
            }
            TimerTick::Expired => {
                info!("Time's up for {}", self.state.current_team.label());
                self.cancel_ticking();
                self.change_turn();
                self.start_timer();
            }
        }
        true
    }

    /// A one-shot task has fired
    pub fn on_deferred(&mut self, handle: TaskHandle) -> bool {
        let task = match self.pending {
            Some((pending, task)) if pending == handle => task,
            _ => {
                debug!("Dropping stale deferred task {:?}", handle);
                return false;
            }
        };
        self.pending = None;

        match task {
            Deferred::AdvanceRound => self.advance_round(),
            Deferred::GameOver => self.finish_game(),
        }
        true
    }

    fn resolve(&mut self, result: MatchResult) {
        let cards = result.cards();
        match result {
            MatchResult::Match { pair, .. } => {
                debug!("Pair {} matched", pair);
                self.renderer.cards_matched(&cards);
                if self.state.mode.uses_teams() {
                    let team = self.state.current_team;
                    self.renderer.score_changed(team, self.state.score_for(team));
                }
                if self.state.is_board_complete() {
                    self.finish_board();
                }
            }
            MatchResult::Mismatch { .. } => {
                // The turn stays put; only the timer or switch_team moves it
                self.flush_mismatch();
                let handle = self.scheduler.schedule_once(MISMATCH_HIDE_DELAY_MS);
                self.mismatch = Some((handle, cards));
            }
        }
    }

    /// Last pair of the board matched
    fn finish_board(&mut self) {
        self.cancel_ticking();
        self.apply_round_settings();
        self.state.phase = GamePhase::Transition;

        if self.state.is_game_complete() {
            info!("Final board cleared");
            self.schedule_deferred(Deferred::GameOver, GAME_OVER_DELAY_MS);
        } else {
            info!("{} cleared", self.state.round_label());
            self.schedule_deferred(Deferred::AdvanceRound, ROUND_ADVANCE_DELAY_MS);
        }
    }

    fn advance_round(&mut self) {
        self.drop_mismatch();
        let board = self.draw_board();
        self.state.advance_round(board);
        // Settings saved during the delay count for this board
        self.apply_round_settings();
        info!("Starting {}", self.state.round_label());

        self.renderer.board_reset(&self.state.board);
        self.renderer.round_label_changed(&self.state.round_label());

        if self.state.mode.uses_teams() {
            self.change_turn();
            self.reset_timer();
        }
    }

    fn finish_game(&mut self) {
        self.state.phase = GamePhase::GameOver;
        let message = match self.state.mode {
            GameMode::Team => match self.state.leader() {
                Some(team) => format!("Game Over! {} wins!", team.label()),
                None => "Game Over! It's a tie!".to_string(),
            },
            GameMode::Individual => format!(
                "Well done! You matched every pair in {} round{}!",
                self.state.rounds_per_game,
                if self.state.rounds_per_game == 1 { "" } else { "s" }
            ),
        };
        info!(
            "Game over (scores {} - {})",
            self.state.score_for(Team::One),
            self.state.score_for(Team::Two)
        );
        self.renderer.announce(&message);
    }

    /// Round count and turn length from the latest settings
    fn apply_round_settings(&mut self) {
        if self.state.rounds_per_game != self.settings.rounds_per_game
            || self.state.timer_duration != self.settings.timer_duration
        {
            debug!("Applying saved settings at round boundary");
        }
        // Rounds already played still count; a lower limit ends the game here
        self.state.rounds_per_game = self
            .settings
            .rounds_per_game
            .max(self.state.current_round + 1);
        self.state.timer_duration = self.settings.timer_duration;
        self.timer.set_duration(self.settings.timer_duration);
    }

    fn draw_board(&mut self) -> RoundBoard {
        match build_board(&self.state.word_pairs, self.state.words_per_game, &mut self.shuffler) {
            Ok(board) => board,
            Err(err) => {
                warn!("{}, falling back to sample words", err);
                self.source = WordPairSource::Sample;
                self.state.word_pairs = sample_pairs();
                build_board(&self.state.word_pairs, self.state.words_per_game, &mut self.shuffler)
                    .unwrap_or_default()
            }
        }
    }

    /// Put face-up cards back down and pass the turn
    fn change_turn(&mut self) {
        self.flush_mismatch();
        for card in std::mem::take(&mut self.state.selected_cards) {
            self.renderer.card_selected(card, false);
        }
        self.state.current_team = self.state.current_team.other();
        self.renderer.turn_changed(self.state.current_team);
    }

    fn start_timer(&mut self) {
        if !self.timer.start() {
            return;
        }
        if let Some(stale) = self.tick_task.take() {
            self.scheduler.cancel(stale);
        }
        self.tick_task = Some(self.scheduler.schedule_repeating(TICK_MS));
        self.state.time_remaining = self.timer.remaining();
        self.renderer.timer_changed(self.state.time_remaining);
    }

    /// Stop the countdown and cancel its tick task
    fn cancel_ticking(&mut self) {
        if let Some(handle) = self.tick_task.take() {
            self.scheduler.cancel(handle);
        }
        self.timer.stop();
        self.state.time_remaining = self.timer.remaining();
    }

    fn reset_timer(&mut self) {
        self.cancel_ticking();
        self.timer.reset();
        self.state.time_remaining = self.timer.remaining();
        self.renderer.timer_changed(self.state.time_remaining);
    }

    fn schedule_deferred(&mut self, task: Deferred, delay_ms: u32) {
        self.cancel_pending();
        let handle = self.scheduler.schedule_once(delay_ms);
        self.pending = Some((handle, task));
    }

    /// Turn a shown mismatch back down now
    fn flush_mismatch(&mut self) {
        if let Some((handle, cards)) = self.mismatch.take() {
            self.scheduler.cancel(handle);
            self.turn_down(cards);
        }
    }

    /// Forget a shown mismatch; the board is being replaced
    fn drop_mismatch(&mut self) {
        if let Some((handle, _)) = self.mismatch.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Cards picked again or matched since stay up
    fn turn_down(&mut self, cards: [Card; 2]) {
        for card in cards {
            if !self.state.selected_cards.contains(&card) && !self.state.is_matched(card.index) {
                self.renderer.card_selected(card, false);
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some((handle, _)) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<R: Renderer> GameController<R, ManualScheduler> {
    /// Let `ms` milliseconds pass, delivering every task that comes due
    pub fn advance_time(&mut self, ms: u64) {
        let until = self.scheduler.now_ms() + ms;
        while let Some(handle) = self.scheduler.next_due(until) {
            self.on_task(handle);
        }
        self.scheduler.settle(until);
    }
}
