//! Terminal falling-block game (default binary).
//!
//! Drives the engine on a fixed gravity cadence, maps crossterm key events to
//! engine commands, and renders through the framebuffer-based terminal view.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockdrop::core::{Engine, EngineConfig, PieceSource, SimpleRng, ThreadRngSource};
use blockdrop::input::{handle_key_event, should_quit};
use blockdrop::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockdrop::types::{GameAction, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "blockdrop", version, about = "Falling-block puzzle game for the terminal")]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Gravity interval in milliseconds
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Seed for a reproducible piece sequence
    #[arg(long)]
    seed: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = EngineConfig::new(args.width, args.height)?;
    let source: Box<dyn PieceSource> = match args.seed {
        Some(seed) => Box::new(SimpleRng::new(seed)),
        None => Box::new(ThreadRngSource),
    };
    let mut engine = Engine::new(config, source);
    let tick = Duration::from_millis(args.tick_ms.max(1));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine, tick);

    // Always try to restore terminal state.
    let _ = term.exit();
    let lines = result?;

    println!("Final score: {} ({} lines cleared)", engine.score(), lines);
    Ok(())
}

/// Play until the player quits; returns the lines cleared in the current session.
fn run<S: PieceSource>(
    term: &mut TerminalRenderer,
    engine: &mut Engine<S>,
    tick: Duration,
) -> Result<u32> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = engine.snapshot();
    let mut last_tick = Instant::now();
    let mut dirty = true;
    let mut lines = 0u32;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if should_quit(key) {
                        return Ok(lines);
                    }
                    if let Some(action) = handle_key_event(key) {
                        let applied = engine.apply_action(action);
                        if applied && action == GameAction::Restart {
                            lines = 0;
                        }
                        dirty |= applied;
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            engine.tick();
            if let Some(event) = engine.take_last_event() {
                lines = lines.saturating_add(event.lines_cleared);
            }
            dirty = true;
        }
    }
}
