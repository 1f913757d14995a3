//! Blockfall terminal runner (default binary).
//!
//! Parses the command line, sets up file logging, then drives the engine from
//! a fixed-step loop: crossterm for input and the framebuffer renderer for
//! output.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::{Env, Target};
use log::{info, warn, LevelFilter};

use blockfall::cli::Args;
use blockfall::core::{GameEngine, GameEvent, GameSnapshot};
use blockfall::input::{handle_key_event, should_quit, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.engine_config()?;
    let mut engine = GameEngine::new(config)?;
    info!(
        "starting {}x{} game, drop interval {} ms, seed {}",
        config.width, config.height, config.drop_interval_ms, config.seed
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Send logs to the requested file; without one, logging stays off so the
/// alternate screen is never written to.
fn init_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(LevelFilter::Off);
        }
    }
    builder.try_init()?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, engine: &mut GameEngine) -> Result<()> {
    let view = GameView::default();
    let mut input_handler = InputHandler::new();

    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or_else(|err| {
            warn!("terminal size unavailable ({err}), assuming 80x24");
            (80, 24)
        });
        engine.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if handle_key_event(key).is_some() {
                            if let Some(action) = input_handler.handle_key_press(key.code) {
                                apply(engine, &mut input_handler, action);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; DAS/ARR handles repeats internally.
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);

            for action in input_handler.update(elapsed_ms) {
                apply(engine, &mut input_handler, action);
            }
            engine.tick(elapsed_ms);
            log_event(engine);
        }
    }
}

fn apply(engine: &mut GameEngine, input_handler: &mut InputHandler, action: GameAction) {
    if engine.apply_action(action) && action == GameAction::Restart {
        input_handler.reset();
    }
    log_event(engine);
}

fn log_event(engine: &mut GameEngine) {
    match engine.take_last_event() {
        Some(GameEvent::GameOver { final_score }) => {
            info!("topped out with {final_score} points; press r to play again");
        }
        Some(GameEvent::Locked {
            lines_cleared,
            points,
        }) if lines_cleared > 0 => {
            info!("piece locked: {lines_cleared} row(s) for {points}, score {}", engine.score());
        }
        _ => {}
    }
}
