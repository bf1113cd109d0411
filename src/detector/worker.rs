//! Dedicated processing thread with latest-frame-wins hand-off.
//!
//! At most one frame waits for the worker. Submitting while a frame is
//! still queued replaces it, so the worker never falls behind the camera.
//! Results are published through a [`SnapshotCell`] that render threads
//! read at their own pace.
use super::params::DetectorParams;
use super::pipeline::FretboardDetector;
use crate::image::FrameBuffer;
use crate::snapshot::SnapshotCell;
use crate::types::FretboardResult;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, warn};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub struct FrameWorker {
    sender: Option<Sender<FrameBuffer>>,
    /// Second receiver handle, used only to evict a stale queued frame.
    evict: Receiver<FrameBuffer>,
    results: Arc<SnapshotCell<FretboardResult>>,
    processed: Arc<AtomicUsize>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

/// Cleared when the worker thread leaves its loop, including by panic.
struct RunningFlag(Arc<AtomicBool>);

impl Drop for RunningFlag {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FrameWorker {
    /// Start the worker thread with its own detector.
    pub fn spawn(params: DetectorParams) -> io::Result<Self> {
        Self::start(move |frames, results, processed| {
            let mut detector = FretboardDetector::new(params);
            for frame in frames.iter() {
                results.publish(detector.process(&frame.as_view()));
                processed.fetch_add(1, Ordering::Release);
            }
            debug!("fretboard worker: channel closed, exiting");
        })
    }

    fn start<F>(body: F) -> io::Result<Self>
    where
        F: FnOnce(Receiver<FrameBuffer>, &SnapshotCell<FretboardResult>, &AtomicUsize)
            + Send
            + 'static,
    {
        let (sender, receiver) = bounded::<FrameBuffer>(1);
        let results = Arc::new(SnapshotCell::default());
        let processed = Arc::new(AtomicUsize::new(0));
        let running = Arc::new(AtomicBool::new(true));

        let handle = {
            let receiver = receiver.clone();
            let results = Arc::clone(&results);
            let processed = Arc::clone(&processed);
            let flag = RunningFlag(Arc::clone(&running));
            thread::Builder::new()
                .name("fretboard-worker".into())
                .spawn(move || {
                    let _flag = flag;
                    body(receiver, &results, &processed);
                })?
        };

        Ok(Self {
            sender: Some(sender),
            evict: receiver,
            results,
            processed,
            running,
            handle: Some(handle),
        })
    }

    /// Queue `frame`, dropping any frame still waiting. Returns `false` if
    /// the worker thread is gone.
    pub fn submit(&self, frame: FrameBuffer) -> bool {
        let Some(sender) = &self.sender else {
            return false;
        };
        let mut frame = frame;
        loop {
            if !self.is_running() {
                warn!("fretboard worker: thread has exited, frame dropped");
                return false;
            }
            match sender.try_send(frame) {
                Ok(()) => return true,
                Err(TrySendError::Full(rejected)) => {
                    if self.evict.try_recv().is_ok() {
                        debug!("fretboard worker: dropped stale frame");
                    }
                    frame = rejected;
                }
                Err(TrySendError::Disconnected(_)) => {
                    warn!("fretboard worker: channel disconnected, frame dropped");
                    return false;
                }
            }
        }
    }

    /// Most recently published result.
    pub fn latest(&self) -> Arc<FretboardResult> {
        self.results.load()
    }

    /// Shared handle for reader threads.
    pub fn results(&self) -> Arc<SnapshotCell<FretboardResult>> {
        Arc::clone(&self.results)
    }

    pub fn processed_frames(&self) -> usize {
        self.processed.load(Ordering::Acquire)
    }

    /// `false` once the worker thread has stopped, e.g. after a panic.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Drop for FrameWorker {
    fn drop(&mut self) {
        self.sender.take();
        while self.evict.try_recv().is_ok() {}
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("fretboard worker: thread panicked");
            }
        }
    }
}
