//! Interactive terminal play.
//!
//! DESIGN
//! ======
//! The terminal drives the same `game::Controller` as the browser. Deferred
//! callbacks become plain sleeps in one sequential loop, so a timer ticket is
//! always consumed by the code that armed it.
//!
//! ERROR HANDLING
//! ==============
//! Failures during play are logged, shown once and the prompt repeats with
//! state unchanged. Only a failed game creation or terminal I/O ends the run.

#[cfg(test)]
#[path = "play_test.rs"]
mod play_test;

use std::cell::RefCell;
use std::fmt::Write as _;
use std::io::Write as _;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use game::session::FlipApplied;
use game::timers::{CountdownTick, PAIR_CHECK_DELAY_MS, REVEAL_STAGGER_MS, TICK_MS};
use game::wire::GameSnapshot;
use game::{CardsState, Controller, Difficulty, GameResult, GameType, Operation, Phase, Session, SessionStore, SyncError, Ticket};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};

use crate::CliError;
use crate::transport::ReqwestTransport;

pub(crate) type PlayController = Controller<RefCell<Session>, ReqwestTransport>;
type Input = Lines<BufReader<Stdin>>;

fn now_ms() -> f64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0.0, |d| d.as_secs_f64() * 1000.0)
}

async fn sleep_ms(ms: u32) {
    tokio::time::sleep(Duration::from_millis(u64::from(ms))).await;
}

fn report(op: Operation, err: &SyncError) {
    warn!(error = %err, "{} failed", op.describe());
    eprintln!("{}", err.user_message(op));
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "q" | "quit" | "exit")
}

fn is_pair_retry(line: &str) -> bool {
    matches!(line.trim(), "c" | "check")
}

/// Parse a whitespace or comma separated answer.
pub(crate) fn parse_answer(line: &str) -> Result<Vec<u32>, String> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<u32>().map_err(|_| format!("`{token}` is not a number")))
        .collect()
}

/// Write `numbers` into the answer slots in order, the way slot and number
/// clicks would. Extra numbers are dropped; missing ones leave slots empty.
pub(crate) fn fill_answer(session: &mut Session, numbers: &[u32]) {
    if session.phase != Phase::AnswerEntry {
        return;
    }
    session.sequence.begin_answer();
    for (index, number) in numbers.iter().take(session.sequence.answer.len()).enumerate() {
        if session.select_slot(index) {
            session.select_number(*number);
        }
    }
}

pub(crate) fn render_board(cards: &CardsState) -> String {
    let mut out = String::new();
    for card in &cards.cards {
        let face = if card.is_revealed() { card.value.as_str() } else { "?" };
        let mark = if card.matched { "*" } else { " " };
        // Writing into a String cannot fail.
        let _ = write!(out, "[{:>2}:{face:^3}{mark}] ", card.id);
    }
    let pairs = match cards.total_pairs {
        Some(total) => format!("{}/{total}", cards.pairs_found),
        None => cards.pairs_found.to_string(),
    };
    let _ = write!(out, "\nmoves: {}  pairs: {pairs}", cards.moves);
    out
}

pub(crate) fn describe_snapshot(snapshot: &GameSnapshot) -> String {
    let mut lines = vec![format!("game {}", snapshot.game_id)];
    if let Some(game_type) = &snapshot.game_type {
        lines.push(format!("type: {game_type}"));
    }
    if let Some(difficulty) = &snapshot.difficulty {
        lines.push(format!("difficulty: {difficulty}"));
    }
    if let Some(sequence) = &snapshot.sequence {
        let numbers: Vec<String> = sequence.iter().map(u32::to_string).collect();
        lines.push(format!("sequence: {}", numbers.join(" ")));
    }
    if let Some(cards) = &snapshot.cards {
        let board = CardsState { cards: cards.clone(), moves: snapshot.moves, pairs_found: snapshot.pairs_found, ..CardsState::default() };
        lines.push(render_board(&board));
    }
    lines.push(format!("complete: {}", snapshot.is_complete));
    lines.join("\n")
}

pub(crate) fn elapsed_secs(started_ms: f64, now_ms: f64) -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let secs = ((now_ms - started_ms).max(0.0) / 1000.0).floor() as u64;
    secs
}

fn prompt(text: &str) -> Result<(), CliError> {
    print!("{text} ");
    std::io::stdout().flush()?;
    Ok(())
}

/// Create a game and play it to the end or until the player quits.
pub(crate) async fn run(controller: &PlayController, game_type: GameType, difficulty: Difficulty) -> Result<(), CliError> {
    let start = controller.start_game(game_type, difficulty, now_ms).await?;
    let (game_id, started_ms) = controller.store().read(|s| {
        let game = s.game.as_ref();
        (game.map(|g| g.game_id.clone()).unwrap_or_default(), game.and_then(|g| g.started_at_ms).unwrap_or_default())
    });
    info!(%game_id, %game_type, %difficulty, "game created");
    println!("{} on {} (game {game_id}). Type q to quit.", game_type.label(), difficulty.label());

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let finished = match start.memorization {
        Some(ticket) => play_sequence(controller, ticket, &mut input).await?,
        None => play_cards(controller, &mut input).await?,
    };

    if let Some(result) = finished {
        let total = controller.store().read(|s| s.score_total);
        println!("{}", result.display_text());
        println!("time: {}s  total score: {total}", elapsed_secs(started_ms, now_ms()));
    }
    if let Some(game_id) = controller.reset() {
        if let Err(err) = controller.abandon(&game_id).await {
            warn!(%game_id, error = %err, "abandon failed");
        }
    }
    Ok(())
}

async fn play_sequence(controller: &PlayController, ticket: Ticket, input: &mut Input) -> Result<Option<GameResult>, CliError> {
    let store = controller.store();
    println!("Memorize:");
    while store.write(|s| s.reveal_next(ticket)) {
        let shown: Vec<String> = store.read(|s| s.sequence.visible_numbers().iter().map(u32::to_string).collect());
        print!("\r{}", shown.join(" "));
        std::io::stdout().flush()?;
        sleep_ms(REVEAL_STAGGER_MS).await;
    }
    loop {
        sleep_ms(TICK_MS).await;
        match store.write(|s| s.tick_memorization(ticket)) {
            CountdownTick::Running(remaining) => {
                print!("  ({remaining})");
                std::io::stdout().flush()?;
            }
            CountdownTick::Expired => break,
            CountdownTick::Stale => return Ok(None),
        }
    }
    print!("\r\x1b[2K");
    println!("Time's up.");

    let (slots, max) = store.read(|s| (s.sequence.answer.len(), s.sequence.selector_max()));
    loop {
        prompt(&format!("Enter {slots} numbers (1-{max}):"))?;
        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        if is_quit(&line) {
            return Ok(None);
        }
        let numbers = match parse_answer(&line) {
            Ok(numbers) => numbers,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        store.write(|s| fill_answer(s, &numbers));
        match controller.submit_answer().await {
            Ok(result) => return Ok(result),
            Err(err) => report(Operation::CheckAnswer, &err),
        }
    }
}

async fn play_cards(controller: &PlayController, input: &mut Input) -> Result<Option<GameResult>, CliError> {
    let store = controller.store();
    loop {
        if let Some(result) = store.read(|s| (s.phase == Phase::Result).then(|| s.result.clone()).flatten()) {
            return Ok(Some(result));
        }
        println!("{}", store.read(|s| render_board(&s.cards)));
        let stalled = store.read(Session::pair_check_stalled);
        prompt(if stalled { "Pair still face up, type c to check it:" } else { "Flip card:" })?;
        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        if is_quit(&line) {
            return Ok(None);
        }
        if is_pair_retry(&line) {
            match controller.retry_pair_check().await {
                Ok(Some(_)) => print_status(controller),
                Ok(None) => println!("No pair is waiting to be checked."),
                Err(err) => {
                    report(Operation::CheckPair, &err);
                    resync(controller).await;
                }
            }
            continue;
        }
        let Ok(card_id) = line.trim().parse::<u32>() else {
            eprintln!("`{}` is not a card id", line.trim());
            continue;
        };
        match controller.flip_card(card_id).await {
            Ok(Some(applied)) => settle(controller, applied).await,
            Ok(None) => println!("Card {card_id} can't be flipped right now."),
            Err(err) => {
                report(Operation::FlipCard, &err);
                if err.is_rejection() {
                    resync(controller).await;
                }
            }
        }
    }
}

fn print_status(controller: &PlayController) {
    if let Some(status) = controller.store().read(|s| s.status_line.clone()) {
        println!("{status}");
    }
}

/// Run the pair check a flip armed, after the usual delay. A failed check is
/// reported once and left for the player to retry.
async fn settle(controller: &PlayController, applied: FlipApplied) {
    let Some(ticket) = applied.pair_check else {
        return;
    };
    println!("{}", controller.store().read(|s| render_board(&s.cards)));
    sleep_ms(PAIR_CHECK_DELAY_MS).await;
    match controller.check_pair(ticket).await {
        Ok(Some(_)) => print_status(controller),
        Ok(None) => {}
        Err(err) => {
            report(Operation::CheckPair, &err);
            resync(controller).await;
        }
    }
}

/// Refresh the board from the server. A finished snapshot shows up as the
/// Result phase on the next loop.
async fn resync(controller: &PlayController) {
    if let Err(err) = controller.resync().await {
        report(Operation::Resync, &err);
    }
}
