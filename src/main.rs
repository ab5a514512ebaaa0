mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use display::{hud_button_at, HudButton, Viewport};
use orc_siege::compute::{fire, init_state, restart, tick, toggle_pause};
use orc_siege::constants::{
    DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, FLOOR_MARGIN, FRAME_MS, SPRITE_HEIGHT, SPRITE_WIDTH,
};
use orc_siege::entities::{Arena, FrameInput, GameState};

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Command line ──────────────────────────────────────────────────────────────

/// Side-scrolling orc siege in the terminal.
#[derive(Parser, Debug)]
#[command(name = "orc_siege", version, about)]
struct Cli {
    /// Arena width in world pixels
    #[arg(long, default_value_t = DEFAULT_ARENA_WIDTH)]
    width: f32,

    /// Arena height in world pixels
    #[arg(long, default_value_t = DEFAULT_ARENA_HEIGHT)]
    height: f32,

    /// Seed for spawn placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write trace output to this file (filtered by RUST_LOG)
    #[arg(long, env = "ORC_SIEGE_LOG")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn arena(&self) -> anyhow::Result<Arena> {
        ensure!(
            self.width >= SPRITE_WIDTH * 4.0,
            "arena width {} is too narrow (minimum {})",
            self.width,
            SPRITE_WIDTH * 4.0
        );
        ensure!(
            self.height >= FLOOR_MARGIN + SPRITE_HEIGHT * 2.0,
            "arena height {} is too short (minimum {})",
            self.height,
            FLOOR_MARGIN + SPRITE_HEIGHT * 2.0
        );
        Ok(Arena::new(self.width, self.height))
    }
}

/// Install a file-backed subscriber.  The terminal is owned by the renderer,
/// so without a log file nothing is installed and events are dropped.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the movement and jump keys
/// still "fresh" (within `HOLD_WINDOW` frames) become the tick's
/// `FrameInput`, so left/right and jump can be held together.  Pause,
/// restart, quit and mouse clicks are one-shot and act as they arrive.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    clock: Instant,
) -> std::io::Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    let left_keys = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
    let right_keys = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
    let jump_keys = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;
        frame += 1;

        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, state);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                                *state = toggle_pause(state);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                *state = restart(state, now_ms);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => match hud_button_at(cols, column, row) {
                    Some(HudButton::Pause) => *state = toggle_pause(state),
                    Some(HudButton::Restart) => *state = restart(state, now_ms),
                    None => {
                        if let Some((x, y)) = view.to_world(column, row) {
                            *state = fire(state, x, y);
                        }
                    }
                },
                _ => {}
            }
        }

        let input = FrameInput {
            left: any_held(&key_frame, &left_keys, frame),
            right: any_held(&key_frame, &right_keys, frame),
            jump: any_held(&key_frame, &jump_keys, frame),
        };

        *state = tick(state, &input, now_ms, rng);

        display::render(out, state, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let arena = cli.arena()?;
    init_logging(cli.log_file.as_deref())?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        width = arena.width,
        height = arena.height,
        seed = ?cli.seed,
        frame_ms = FRAME_MS,
        "starting"
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let clock = Instant::now();
    let mut state = init_state(arena, 0);
    let result = game_loop(&mut out, &mut state, &rx, &mut rng, clock);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(score = state.score, best_score = state.best_score.max(state.score), "exiting");
    result.context("game loop failed")
}
