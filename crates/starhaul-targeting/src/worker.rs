//! Background threads for the target and radar scans.
//!
//! Neither worker ever blocks the main thread. If fresh output is not ready
//! this frame the caller keeps using what it already has.
//!
//! - [`TargetingWorker`] takes snapshots through a single-slot channel (a full
//!   slot means the worker is still busy and the producer skips) and
//!   publishes complete [`TargetSuggestions`] through a second channel.
//! - [`RadarWorker`] uses a request/ready flag pair around mutex-guarded
//!   buffers and wakes on a fixed period instead of spinning.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use starhaul_core::types::Vec2;

use crate::radar::scan_radar;
use crate::scoring::scan;
use crate::snapshot::{RadarInput, TargetSuggestions, TargetingSnapshot};

/// Runs [`scan`] on its own thread.
pub struct TargetingWorker {
    input_tx: Option<mpsc::SyncSender<TargetingSnapshot>>,
    output_rx: mpsc::Receiver<TargetSuggestions>,
    handle: Option<JoinHandle<()>>,
}

impl TargetingWorker {
    pub fn spawn() -> io::Result<Self> {
        let (input_tx, input_rx) = mpsc::sync_channel::<TargetingSnapshot>(1);
        let (output_tx, output_rx) = mpsc::channel::<TargetSuggestions>();

        let handle = thread::Builder::new()
            .name("starhaul-targeting".into())
            .spawn(move || {
                // Exits when the sender side is dropped.
                while let Ok(snapshot) = input_rx.recv() {
                    let suggestions = scan(&snapshot);
                    if output_tx.send(suggestions).is_err() {
                        break;
                    }
                }
                tracing::debug!("targeting worker stopped");
            })?;

        Ok(Self {
            input_tx: Some(input_tx),
            output_rx,
            handle: Some(handle),
        })
    }

    /// Hand a snapshot to the worker. Returns false if it is still busy with
    /// the previous one.
    pub fn submit(&self, snapshot: TargetingSnapshot) -> bool {
        let Some(tx) = &self.input_tx else {
            return false;
        };
        match tx.try_send(snapshot) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => false,
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!("targeting worker disconnected");
                false
            }
        }
    }

    /// Newest finished suggestion set, discarding older ones.
    pub fn latest(&self) -> Option<TargetSuggestions> {
        self.output_rx.try_iter().last()
    }
}

impl Drop for TargetingWorker {
    fn drop(&mut self) {
        self.input_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

struct RadarShared {
    request: AtomicBool,
    ready: AtomicBool,
    shutdown: AtomicBool,
    input: Mutex<RadarInput>,
    output: Mutex<Vec<Vec2>>,
}

/// Recomputes the radar contact list on request.
pub struct RadarWorker {
    shared: Arc<RadarShared>,
    handle: Option<JoinHandle<()>>,
}

impl RadarWorker {
    /// Spawn the worker; it checks for requests every `period`.
    pub fn spawn(period: Duration) -> io::Result<Self> {
        let shared = Arc::new(RadarShared {
            request: AtomicBool::new(false),
            ready: AtomicBool::new(false),
            shutdown: AtomicBool::new(false),
            input: Mutex::new(RadarInput::default()),
            output: Mutex::new(Vec::new()),
        });

        let worker_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("starhaul-radar".into())
            .spawn(move || run_radar_loop(&worker_shared, period))?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Publish new input and ask for a pass.
    pub fn request(&self, input: RadarInput) {
        if let Ok(mut lock) = self.shared.input.lock() {
            *lock = input;
        }
        self.shared.request.store(true, Ordering::Release);
    }

    /// Contacts from the most recent finished pass, if one finished since the last call.
    pub fn take_ready(&self) -> Option<Vec<Vec2>> {
        if !self.shared.ready.swap(false, Ordering::AcqRel) {
            return None;
        }
        self.shared
            .output
            .lock()
            .ok()
            .map(|mut lock| std::mem::take(&mut *lock))
    }
}

impl Drop for RadarWorker {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_radar_loop(shared: &RadarShared, period: Duration) {
    while !shared.shutdown.load(Ordering::Acquire) {
        if shared.request.swap(false, Ordering::AcqRel) {
            let input = match shared.input.lock() {
                Ok(lock) => lock.clone(),
                Err(_) => break,
            };
            let contacts = scan_radar(&input);
            if let Ok(mut lock) = shared.output.lock() {
                *lock = contacts;
            }
            shared.ready.store(true, Ordering::Release);
        }
        thread::sleep(period);
    }
    tracing::debug!("radar worker stopped");
}
