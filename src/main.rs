mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use countdown_shooter::config::GameConfig;
use countdown_shooter::driver::{Controls, Session};
use countdown_shooter::entities::GameStatus;

use display::Viewport;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈130 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

const LEFT_KEYS: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const FIRE_KEYS: &[KeyCode] = &[KeyCode::Char(' '), KeyCode::Up];
const START_KEYS: &[KeyCode] = &[
    KeyCode::Char(' '),
    KeyCode::Enter,
    KeyCode::Char('r'),
    KeyCode::Char('R'),
];

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

/// Forget the start keys once they have begun a round.  Space doubles as
/// fire, and on terminals without release events the tap would otherwise
/// stay "held" for `HOLD_WINDOW` frames and fire a shot.  A key that is
/// really held comes back with its next repeat event.
fn release_start_keys(key_frame: &mut HashMap<KeyCode, u64>) {
    for key in START_KEYS {
        key_frame.remove(key);
    }
}

// ── Logging & config ──────────────────────────────────────────────────────────

/// Log to a file: anything written to stderr would tear the raw-mode screen.
fn init_logging() -> anyhow::Result<PathBuf> {
    let path = std::env::var_os("SHOOTER_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("countdown_shooter.log"));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(path)
}

fn load_config() -> anyhow::Result<GameConfig> {
    match std::env::args_os().nth(1) {
        Some(path) => GameConfig::load(&PathBuf::from(path)),
        None => Ok(GameConfig::default()),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame the live keys are folded into a
/// `Controls` snapshot for the session, which handles cooldowns and the
/// start/restart debounce itself.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let started = Instant::now();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut clicked = false;

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
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(_),
                    ..
                }) => clicked = true,
                _ => {}
            }
        }

        let controls = Controls {
            left: any_held(&key_frame, LEFT_KEYS, frame),
            right: any_held(&key_frame, RIGHT_KEYS, frame),
            fire: any_held(&key_frame, FIRE_KEYS, frame),
            start: any_held(&key_frame, START_KEYS, frame),
            clicked,
        };

        let was_playing = session.state().status == GameStatus::Playing;
        let scene = session.frame(started.elapsed().as_secs_f64(), &controls);
        if !was_playing && scene.status == GameStatus::Playing {
            release_start_keys(&mut key_frame);
        }

        let (cols, rows) = terminal::size()?;
        let view = Viewport {
            cols,
            rows,
            world_w: session.config().viewport_width,
            world_h: session.config().viewport_height,
        };
        display::render(out, &scene, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let log_path = init_logging()?;
    let config = load_config()?;
    log::info!("Countdown Shooter starting (log: {})", log_path.display());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
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
    log::info!("keyboard enhancement: {keyboard_enhanced}");

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
            Err(err) => {
                log::error!("input thread stopped: {err}");
                break;
            }
        }
    });

    let mut session = Session::new(config);
    let result = game_loop(&mut out, &mut session, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Countdown Shooter exiting");
    result.context("game loop failed")
}
