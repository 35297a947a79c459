mod display;

use std::ffi::OsStr;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

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
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use volley_shooter::compute::{init_state, reset, step};
use volley_shooter::config::GameConfig;
use volley_shooter::entities::{GameEvent, GameState};
use volley_shooter::input::{Action, KeyHold};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

#[derive(Debug, Parser)]
#[command(version, about = "Terminal arcade shooter with bullets and laser volleys")]
struct Cli {
    /// JSON file with gameplay tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy spawns; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Log destination (the terminal itself is taken by the game)
    #[arg(long, default_value = "volley_shooter.log")]
    log_file: PathBuf,
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// File logger filtered by `RUST_LOG` (default `info`). Keep the guard alive
/// for the whole run or buffered lines are lost.
fn init_logging(path: &Path) -> WorkerGuard {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file = path
        .file_name()
        .unwrap_or(OsStr::new("volley_shooter.log"));

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    guard
}

fn log_events(state: &GameState) {
    for event in &state.events {
        match event {
            GameEvent::PlayerHit => {
                info!(score = state.score, frame = state.frame, "Game over");
            }
            GameEvent::LaserVolley { count } => {
                debug!(count, frame = state.frame, "Laser volley");
            }
            other => debug!(event = ?other, frame = state.frame),
        }
    }
    if state.events.iter().any(|e| e.score_delta() != 0) {
        debug!("{}", state.score_text());
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: key events only feed `keys`; every frame the actions it
/// still considers held form the `InputSet` handed to `step`, so Space, X and
/// the arrows can all be held together.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    keys: &mut KeyHold,
) -> std::io::Result<()> {
    let clock = Instant::now();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut restart = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => restart = true,
                            _ => {}
                        }
                        if let Some(action) = Action::from_key(code) {
                            keys.press(action, frame);
                        }
                    }
                    KeyEventKind::Repeat => {
                        if let Some(action) = Action::from_key(code) {
                            keys.press(action, frame);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = Action::from_key(code) {
                            keys.release(action);
                        }
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    ..
                }) => restart = true,
                _ => {}
            }
        }

        if restart && state.is_over() {
            *state = reset(state);
            info!(frame = state.frame, "Restarted");
        }

        if !state.is_over() {
            let input = keys.held(frame);
            let now_ms = clock.elapsed().as_millis() as u64;
            *state = step(state, &input, now_ms, rng);
            log_events(state);
        }

        display::render(out, state, terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli.log_file);

    let config = GameConfig::load_or_default(cli.config.as_deref());
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(
        seed,
        width = config.width,
        height = config.height,
        "volley_shooter v{}",
        env!("CARGO_PKG_VERSION")
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Writing the flags succeeds on any terminal, so ask the terminal itself
    // whether it will report key release. Must run before the event thread
    // starts reading stdin.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let mut keys = KeyHold::new(keyboard_enhanced);
    info!(
        release_events = keys.reports_release(),
        "Terminal input mode"
    );

    // Blocking event reads live on their own thread so the frame loop never
    // waits on I/O.
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

    let mut state = init_state(config);
    let mut rng = StdRng::seed_from_u64(seed);
    let result = game_loop(&mut out, &mut state, &rx, &mut rng, &mut keys);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    info!(score = state.score, frame = state.frame, "Quit");
    Ok(())
}
