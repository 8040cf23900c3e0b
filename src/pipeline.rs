//! Frame pipeline: a reader thread decodes detector output and hands frames
//! to the orchestrator one at a time.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use flume::{Receiver, Sender, TrySendError};
use tracing::{debug, error, info};

use crate::config::Backpressure;
use crate::error::PipelineError;
use crate::keys::KeySink;
use crate::orchestrator::GestureOrchestrator;
use crate::source::{Detection, LandmarkReader};

/// How long to wait for the reader after the loop stops. A reader blocked
/// on stdin never returns, so it is left behind.
const READER_GRACE: Duration = Duration::from_millis(100);

/// Push decoded detections into the queue until the source ends, fails or
/// `running` is cleared. `evict` is only needed for drop-oldest: holding a
/// receiver here keeps the queue connected after the classifier is gone.
pub fn run_reader<R: BufRead>(
    reader: LandmarkReader<R>,
    tx: Sender<Detection>,
    evict: Option<Receiver<Detection>>,
    backpressure: Backpressure,
    running: Arc<AtomicBool>,
) -> Result<(), PipelineError> {
    let mut dropped = 0usize;

    for detection in reader {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let detection = detection?;

        let sent = match (backpressure, &evict) {
            (Backpressure::DropOldest, Some(evict)) => match tx.try_send(detection) {
                Ok(()) => true,
                Err(TrySendError::Full(detection)) => {
                    if evict.try_recv().is_ok() {
                        dropped += 1;
                    }
                    tx.send(detection).is_ok()
                }
                Err(TrySendError::Disconnected(_)) => false,
            },
            _ => tx.send(detection).is_ok(),
        };
        if !sent {
            break;
        }
    }

    if dropped > 0 {
        debug!(dropped, "frames dropped while classifier was busy");
    }
    Ok(())
}

/// Classify frames from `reader` until it ends or `running` is cleared.
/// A source failure ends the loop and is returned.
pub fn run<R, S>(
    reader: LandmarkReader<R>,
    orchestrator: &mut GestureOrchestrator<S>,
    backpressure: Backpressure,
    running: Arc<AtomicBool>,
) -> Result<(), PipelineError>
where
    R: BufRead + Send + 'static,
    S: KeySink,
{
    // At most one frame waits while another is being classified
    let (tx, rx) = flume::bounded::<Detection>(1);
    let (done_tx, done_rx) = flume::bounded::<Result<(), PipelineError>>(1);

    let evict = (backpressure == Backpressure::DropOldest).then(|| rx.clone());
    let running_reader = running.clone();
    let reader_handle = thread::spawn(move || {
        let result = run_reader(reader, tx, evict, backpressure, running_reader);
        let _ = done_tx.send(result);
    });

    while running.load(Ordering::SeqCst) {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(detection) => handle(orchestrator, detection),
            Err(flume::RecvTimeoutError::Timeout) => continue,
            Err(flume::RecvTimeoutError::Disconnected) => break,
        }
    }
    // Disconnects a reader waiting in `send`
    drop(rx);

    info!("{}", orchestrator.stats().summary());

    let outcome = if running.load(Ordering::SeqCst) {
        done_rx.recv().ok()
    } else {
        match done_rx.recv_timeout(READER_GRACE) {
            Ok(result) => Some(result),
            Err(flume::RecvTimeoutError::Timeout) => {
                debug!("landmark reader still blocked on input, not waiting for it");
                return Ok(());
            }
            Err(flume::RecvTimeoutError::Disconnected) => None,
        }
    };

    let panicked = reader_handle.join().is_err();
    match outcome {
        Some(Ok(())) if !panicked => Ok(()),
        Some(Err(e)) => {
            error!(error = %e, "landmark source failed");
            Err(e)
        }
        _ => Err(PipelineError::UpstreamDetectorFailure(
            "landmark reader panicked".to_string(),
        )),
    }
}

fn handle<S: KeySink>(orchestrator: &mut GestureOrchestrator<S>, detection: Detection) {
    match detection {
        Detection::Face(frame) => orchestrator.process(Some(&frame)),
        Detection::NoFace => orchestrator.process(None),
        Detection::Invalid(e) => orchestrator.skip(e),
    };
}
