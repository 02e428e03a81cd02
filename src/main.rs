//! Terminal snake runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the term crate.
//! Logs go to a file since the alternate screen owns stdout.

use std::fs::File;
use std::str::FromStr;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use nugget_snake::core::{Game, GameConfig, GameSnapshot};
use nugget_snake::input::InputHandler;
use nugget_snake::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use nugget_snake::types::{GameEvent, TICK_MS};

const DEFAULT_LOG_PATH: &str = "nugget-snake.log";

fn main() -> Result<()> {
    init_logging()?;
    let config = load_config()?;
    let seed = seed_from_env()?;
    log::info!("starting, seed {seed}");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("exiting with error: {e:#}");
    }
    result
}

fn init_logging() -> Result<()> {
    let path = std::env::var("SNAKE_LOG_PATH").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
    let level = match std::env::var("SNAKE_LOG") {
        Ok(s) => LevelFilter::from_str(&s)
            .map_err(|_| anyhow::anyhow!("bad SNAKE_LOG level {s:?}"))?,
        Err(_) => LevelFilter::Info,
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Debug).build();
    WriteLogger::init(level, config, file).context("installing logger")?;
    Ok(())
}

fn load_config() -> Result<GameConfig> {
    let config = match std::env::var("SNAKE_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            let config: GameConfig = serde_json::from_str(&text)
                .with_context(|| format!("parsing config {path}"))?;
            log::info!("loaded config from {path}");
            config
        }
        Err(_) => GameConfig::default(),
    };
    config.validate().context("invalid game config")?;
    Ok(config)
}

fn seed_from_env() -> Result<u64> {
    if let Ok(s) = std::env::var("SNAKE_SEED") {
        return s
            .parse()
            .with_context(|| format!("bad SNAKE_SEED {s:?}"));
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1);
    Ok(nanos)
}

fn run(term: &mut TerminalRenderer, config: GameConfig, seed: u64) -> Result<()> {
    let mut game = Game::new(config, seed);
    let view = GameView::default();
    let mut input_handler = InputHandler::new();

    let mut snap = GameSnapshot::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => input_handler.handle_key_event(key),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
            if input_handler.quit_requested() {
                log::info!("quit, final score {}", game.score());
                return Ok(());
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let frame = input_handler.take_frame();
            game.update(TICK_MS, &frame);
            for ev in game.drain_events() {
                log_event(ev);
            }
        }
    }
}

/// No audio backend; sound and music requests end up in the log.
fn log_event(ev: GameEvent) {
    match ev {
        GameEvent::NuggetEaten {
            class,
            score,
            cell,
            combo,
        } => log::debug!(
            "ate {} at ({}, {}) for {score}, combo {}",
            class.name(),
            cell.row,
            cell.col,
            combo.map(|c| c.as_str()).unwrap_or("none")
        ),
        GameEvent::GameOver { score } => log::info!("game over, score {score}"),
        GameEvent::Sound(s) => log::trace!("sound {s:?}"),
        GameEvent::MusicStart(m) => log::trace!("music start {m:?}"),
        GameEvent::MusicStop => log::trace!("music stop"),
        GameEvent::SceneChanged(id) => log::debug!("scene changed to {id:?}"),
    }
}
