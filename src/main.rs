//! Terminal runner (default binary).
//!
//! The game runs inside an engine session on its own runtime; this loop only
//! forwards key presses and draws the latest snapshot.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use voxtris::engine::{
    FileProgressStore, HostConfig, MemoryProgressStore, ProgressStore, SessionRuntime,
};
use voxtris::input::{handle_key_event, is_reset, should_quit, KEY_HELP};
use voxtris::logging::{init_log, parse_level};
use voxtris::term::{FrameBuffer, TerminalRenderer, Viewport, VolumeView};

fn main() -> Result<()> {
    let config = HostConfig::from_env();

    if let Some(path) = config.log_path.as_deref() {
        init_log(parse_level(&config.log_level), path)?;
    }

    let store: Box<dyn ProgressStore> = match config.progress_path.as_ref() {
        Some(path) => Box::new(FileProgressStore::new(path)),
        None => Box::new(MemoryProgressStore::new()),
    };
    let session = SessionRuntime::start(&config, store)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &session, &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let progress = session.shutdown()?;
    log::info!(
        "exiting at level {}, score {}, layers {}",
        progress.level,
        progress.score,
        progress.lines_cleared
    );
    result
}

fn run(term: &mut TerminalRenderer, session: &SessionRuntime, config: &HostConfig) -> Result<()> {
    let view = VolumeView::default().with_help(KEY_HELP);
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(config.frame_ms as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&session.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(frame)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if is_reset(key) {
                    session.reset();
                } else if let Some(command) = handle_key_event(key) {
                    if !session.send(command) {
                        log::debug!("command queue full, dropped {}", command.as_str());
                    }
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
