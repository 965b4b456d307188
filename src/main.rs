//! Word Match entry point
//!
//! The game runs in the browser through the wasm bridge (`web` module). The
//! native binary plays a short headless team game against the log, which is
//! handy for checking turn and round flow without a page.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use word_match::render::LogRenderer;
    use word_match::sim::{Card, GamePhase, Side};
    use word_match::{GameController, GameMode, ManualScheduler, Settings, WordPairSource};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Word Match (native demo) starting...");

    let settings = Settings::new(GameMode::Team, 2, 10);
    let mut game = GameController::new(settings, WordPairSource::Sample, LogRenderer, ManualScheduler::new());

    // Each team guesses wrong once per board, then hesitates long enough for
    // the timer to hand the turn over.
    while game.state().phase != GamePhase::GameOver {
        let size = game.state().board_size();
        let round = game.state().current_round;
        // Work down the term column in the order it is laid out
        let column: Vec<Card> = game
            .board()
            .side(Side::Term)
            .iter()
            .map(|slot| slot.card(Side::Term))
            .collect();
        for (i, card) in column.into_iter().enumerate() {
            if game.state().current_round != round || game.is_busy() {
                break;
            }
            if i % 4 == 1 && size > 1 {
                game.on_card_click(card);
                game.on_card_click(Card::translation((card.index + 1) % size));
                game.advance_time(11_000);
            }
            game.on_card_click(card);
            game.advance_time(2_000);
            game.on_card_click(Card::translation(card.index));
        }
        game.advance_time(1_000);
    }

    let state = game.state();
    log::info!(
        "Final scores: Team 1 = {}, Team 2 = {}",
        state.scores[0],
        state.scores[1]
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
