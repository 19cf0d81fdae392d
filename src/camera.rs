//! Camera Module - Frame decoder contract and scan feed
//!
//! The second scan source besides the keyboard: a decoder that watches
//! continuous video frames and yields decoded strings. The crate does not
//! capture video; it defines the decoder seam and a restartable pump that
//! forwards every decoded string to the same scan-handling callback the
//! keystroke interpreter feeds.
//!
//! # Example
//!
//! ```ignore
//! use stockscan::camera::{CameraFeed, FrameDecoder};
//!
//! let mut feed = CameraFeed::new(decoder, |code| {
//!     println!("decoded: {}", code);
//! });
//! feed.start();
//!
//! // Host event loop
//! loop {
//!     feed.poll(); // Forwards at most one decoded string per call
//! }
//! ```

use std::rc::Rc;

use spark_signals::{signal, Signal};

// =============================================================================
// DECODER SEAM
// =============================================================================

/// A lazy, unbounded source of decoded barcode strings.
///
/// `decode_next` returns `None` when the current frame holds no decodable
/// barcode; the sequence never ends, it only goes quiet.
pub trait FrameDecoder {
    fn decode_next(&mut self) -> Option<String>;
}

impl<F> FrameDecoder for F
where
    F: FnMut() -> Option<String>,
{
    fn decode_next(&mut self) -> Option<String> {
        self()
    }
}

// =============================================================================
// CAMERA FEED
// =============================================================================

/// Restartable pump from a [`FrameDecoder`] into a scan callback.
///
/// Cooperative: the host calls [`poll`](Self::poll) from its event loop.
/// While stopped, polling neither pulls from the decoder nor forwards.
pub struct CameraFeed<D: FrameDecoder> {
    decoder: D,
    active: Signal<bool>,
    on_scan: Rc<dyn Fn(&str)>,
}

impl<D: FrameDecoder> CameraFeed<D> {
    /// Create a feed forwarding decoded strings to `on_scan`.
    pub fn new<F>(decoder: D, on_scan: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        Self {
            decoder,
            active: signal(false),
            on_scan: Rc::new(on_scan),
        }
    }

    /// Begin pulling from the decoder. Idempotent.
    pub fn start(&mut self) {
        if !self.active.get() {
            self.active.set(true);
        }
    }

    /// Stop pulling. The decoder keeps its position; a later
    /// [`start`](Self::start) resumes the sequence.
    pub fn stop(&mut self) {
        if self.active.get() {
            self.active.set(false);
        }
    }

    /// Whether the feed is running.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Signal holding the running state.
    pub fn active_signal(&self) -> Signal<bool> {
        self.active.clone()
    }

    /// Pull at most one decoded string and forward it.
    /// Returns the forwarded string, if any.
    pub fn poll(&mut self) -> Option<String> {
        if !self.active.get() {
            return None;
        }
        let code = self.decoder.decode_next()?;
        (self.on_scan)(&code);
        Some(code)
    }
}

// =============================================================================
// TESTS
// =============================================================================
