//! Terminal match-3 runner (default binary).
//!
//! It uses crossterm for input and the framebuffer renderer from the `term`
//! crate. Logs go to a file, never to the terminal.

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, LevelFilter};
use simplelog::{ConfigBuilder, WriteLogger};

use tui_match3::config::{self, CliOverrides, ResolvedConfig};
use tui_match3::core::{GameSnapshot, Session};
use tui_match3::engine::Game;
use tui_match3::input::{handle_key_event, should_quit};
use tui_match3::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_match3::types::TICK_MS;

#[derive(Parser)]
#[command(name = "tui-match3", about = "Swap adjacent tiles to line up three or more")]
struct Args {
    /// Board height
    #[arg(long)]
    rows: Option<usize>,
    /// Board width
    #[arg(long)]
    cols: Option<usize>,
    /// Seed for tiles and hints
    #[arg(long)]
    seed: Option<u32>,
    /// Tile alphabet, one character per tile
    #[arg(long)]
    tiles: Option<String>,
    /// Resolve cascades without the staged animation
    #[arg(long)]
    instant: bool,
    /// Config file to use instead of ~/.tui-match3/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed,
            tiles: self.tiles.clone(),
            instant: self.instant,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => config::load_config()?,
    };
    let resolved = config::resolve(&file_config, &args.overrides())?;
    init_logging(&resolved);

    info!(
        "tui-match3 starting: {}x{} board, seed {}, {:?}",
        resolved.rows, resolved.cols, resolved.seed, resolved.pacing
    );

    let session = Session::new(
        resolved.rows,
        resolved.cols,
        resolved.alphabet.clone(),
        resolved.seed,
    )?;
    let mut game = Game::new(session, resolved.pacing, resolved.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("tui-match3 exiting");
    result
}

fn init_logging(resolved: &ResolvedConfig) {
    let Some(path) = &resolved.log_file else {
        return;
    };
    if resolved.log_level == LevelFilter::Off {
        return;
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(resolved.log_level, log_config, file);
        }
        Err(e) => eprintln!("cannot open log file {}: {e}", path.display()),
    }
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

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
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);
        }
    }
}
