//! Session runtime - serializes gravity and commands on one task.
//!
//! A single tokio task owns the [`GameState`]. It selects over a frame
//! interval (which drives gravity and the timed effects) and a bounded input
//! queue (player commands and reset), so the two triggers can never interleave
//! inside an operation. After every step the task publishes a snapshot on a
//! `watch` channel when it changed, and emits the progress record on an
//! `mpsc` channel whenever level, score or cleared layers changed.
//!
//! [`SessionRuntime`] wraps all of this behind a synchronous API for hosts
//! that are not async themselves.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::HostConfig;
use crate::core::{GameSnapshot, GameState};
use crate::dispatch::dispatch;
use crate::progress::ProgressStore;
use crate::types::{Command, Progress};

/// Input delivered to the session task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    Command(Command),
    /// Start a new run (valid in any state, including game over)
    Reset,
    /// Stop the session task
    Shutdown,
}

/// Cloneable handle for feeding a running session and reading its snapshots.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    input_tx: mpsc::Sender<SessionInput>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
}

impl SessionHandle {
    pub async fn send(&self, input: SessionInput) -> Result<()> {
        self.input_tx
            .send(input)
            .await
            .map_err(|_| anyhow!("session closed"))
    }

    pub async fn command(&self, command: Command) -> Result<()> {
        self.send(SessionInput::Command(command)).await
    }

    /// Queue without waiting. Returns false if the queue is full or closed.
    pub fn try_send(&self, input: SessionInput) -> bool {
        self.input_tx.try_send(input).is_ok()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// A receiver notified on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }
}

/// Everything returned when a session task is spawned.
pub struct SpawnedSession {
    pub handle: SessionHandle,
    /// Progress records, one per change
    pub progress_rx: mpsc::UnboundedReceiver<Progress>,
    /// Resolves to the final progress when the session stops
    pub task: JoinHandle<Progress>,
}

/// Spawn a session task on the current tokio runtime.
pub fn spawn_session(state: GameState, frame_ms: u32, max_pending: usize) -> SpawnedSession {
    let (input_tx, input_rx) = mpsc::channel::<SessionInput>(max_pending.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
    let (progress_tx, progress_rx) = mpsc::unbounded_channel::<Progress>();

    let task = tokio::spawn(run_session(
        state,
        frame_ms,
        input_rx,
        snapshot_tx,
        progress_tx,
    ));

    SpawnedSession {
        handle: SessionHandle {
            input_tx,
            snapshot_rx,
        },
        progress_rx,
        task,
    }
}

/// The session loop. Returns the final progress once shut down or once
/// every input sender is gone.
pub async fn run_session(
    mut state: GameState,
    frame_ms: u32,
    mut input_rx: mpsc::Receiver<SessionInput>,
    snapshot_tx: watch::Sender<GameSnapshot>,
    progress_tx: mpsc::UnboundedSender<Progress>,
) -> Progress {
    let mut frames = tokio::time::interval(Duration::from_millis(frame_ms.max(1) as u64));
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_frame = Instant::now();

    loop {
        tokio::select! {
            _ = frames.tick() => {
                // Carry sub-millisecond remainders over to the next frame.
                let elapsed_ms = last_frame.elapsed().as_millis().min(u32::MAX as u128) as u32;
                last_frame += Duration::from_millis(elapsed_ms as u64);
                state.advance(elapsed_ms);
            }
            input = input_rx.recv() => match input {
                Some(SessionInput::Command(command)) => {
                    let outcome = dispatch(&mut state, command);
                    log::trace!("{} -> {}", command.as_str(), outcome.as_str());
                }
                Some(SessionInput::Reset) => state.reset(),
                Some(SessionInput::Shutdown) | None => break,
            },
        }

        publish(&state, &snapshot_tx);

        if let Some(progress) = state.take_progress_update() {
            // The host may not care about progress; a closed channel is fine.
            let _ = progress_tx.send(progress);
        }
    }

    log::debug!("session stopped at episode {}", state.episode_id());
    state.progress()
}

fn publish(state: &GameState, snapshot_tx: &watch::Sender<GameSnapshot>) {
    snapshot_tx.send_if_modified(|current| {
        let next = state.snapshot();
        if *current == next {
            return false;
        }
        *current = next;
        true
    });
}

/// A session running on its own tokio runtime, with progress persisted to a
/// store in the background.
pub struct SessionRuntime {
    rt: Runtime,
    handle: SessionHandle,
    task: Option<JoinHandle<Progress>>,
    persister: Option<JoinHandle<()>>,
}

impl SessionRuntime {
    /// Load progress from `store`, start the session and the persister.
    pub fn start(config: &HostConfig, store: Box<dyn ProgressStore>) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("voxtris-session")
            .enable_all()
            .build()
            .context("failed to create tokio runtime")?;

        let progress = store.load();
        log::info!(
            "starting session at level {}, score {}, layers {}",
            progress.level,
            progress.score,
            progress.lines_cleared
        );

        let state = GameState::from_progress(progress);
        let spawned = {
            let _guard = rt.enter();
            spawn_session(state, config.frame_ms, config.max_pending_commands)
        };

        let persister = rt.spawn_blocking(move || persist(store, spawned.progress_rx));

        Ok(Self {
            rt,
            handle: spawned.handle,
            task: Some(spawned.task),
            persister: Some(persister),
        })
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Queue a command. Returns false if the queue is full.
    pub fn send(&self, command: Command) -> bool {
        self.handle.try_send(SessionInput::Command(command))
    }

    pub fn reset(&self) -> bool {
        self.handle.try_send(SessionInput::Reset)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.handle.snapshot()
    }

    /// Stop the session, wait for pending saves and return the final progress.
    pub fn shutdown(mut self) -> Result<Progress> {
        let handle = self.handle.clone();
        let task = self.task.take();
        let persister = self.persister.take();

        self.rt.block_on(async move {
            let _ = handle.send(SessionInput::Shutdown).await;
            drop(handle);

            let progress = match task {
                Some(task) => task.await.context("session task failed")?,
                None => Progress::default(),
            };
            if let Some(persister) = persister {
                persister.await.context("progress writer failed")?;
            }
            Ok::<_, anyhow::Error>(progress)
        })
    }
}

fn persist(mut store: Box<dyn ProgressStore>, mut progress_rx: mpsc::UnboundedReceiver<Progress>) {
    while let Some(progress) = progress_rx.blocking_recv() {
        if let Err(e) = store.save(&progress) {
            log::warn!("Failed to save progress: {:#}", e);
        }
    }
}
