//! Decimal Clock Demo Application
//!
//! Terminal decimal clock:
//! - Dial with hour, unit and subunit hands
//! - Wall clock, decimal time and day progress readouts
//! - UTC offset slider with a mirrored zone list
//! - Manual offset entry with range check
//! - Offset persisted between runs

mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use deci_runtime::{init_logging, open_selector, ClockConfig, FrameLoop, FrameRenderer};
use deci_time::SystemClock;

use ui::{handle_key, KeyAction, TerminalPresenter, UiState};

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Raw mode and alternate screen for the lifetime of the guard
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Read terminal events on a blocking thread until the receiver goes away
fn spawn_input(tx: mpsc::Sender<Event>) -> JoinHandle<io::Result<()>> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            if event::poll(INPUT_POLL)? {
                let ev = event::read()?;
                if tx.blocking_send(ev).is_err() {
                    break;
                }
            }
        }
        Ok(())
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClockConfig::from_env()?;
    if config.log_file.is_none() {
        // Keep log output off the alternate screen
        config.log_file = Some(config.preference_path.with_file_name("deci-clock.log"));
    }
    init_logging(&config)?;

    let selector = open_selector(&config)?;
    let state = Arc::new(Mutex::new(UiState::default()));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (event_tx, mut event_rx) = mpsc::channel::<Event>(64);

    let guard = TerminalGuard::enter()?;
    let input = spawn_input(event_tx);

    // Input handlers are the only writers of the offset
    let handler = {
        let selector = selector.clone();
        let state = state.clone();
        tokio::spawn(async move {
            while let Some(ev) = event_rx.recv().await {
                let Event::Key(key) = ev else {
                    continue;
                };
                // Accepted offsets are written to disk while the selector is
                // held; the presenter only ever waits on the UI state
                let mut ui = state.lock().clone();
                let action = tokio::task::block_in_place(|| {
                    handle_key(&mut ui, &mut selector.lock(), key)
                });
                *state.lock() = ui;
                if action == KeyAction::Quit {
                    let _ = shutdown_tx.send(true);
                    break;
                }
            }
        })
    };

    let mut presenter =
        TerminalPresenter::new((config.canvas_width, config.canvas_height), state)?;
    let renderer = FrameRenderer::from_config(SystemClock::new(), &config);
    let offsets = selector.lock().subscribe();
    let mut frames = FrameLoop::new(renderer, offsets, config.frame_interval);
    let result = frames.run(&mut presenter, shutdown_rx).await;

    handler.abort();
    let input_result = input.await;
    drop(guard);

    let stats = result?;
    if let Ok(Err(e)) = input_result {
        tracing::warn!(error = %e, "terminal input failed");
    }
    tracing::info!(frames = stats.frames, "clock stopped");
    let selector = selector.lock();
    if selector.is_saved() {
        println!("Offset {} saved.", selector.label());
    } else {
        println!("Offset {} could not be saved, see the log.", selector.label());
    }
    Ok(())
}
