//! Frame Loop: Dedicated thread driving periodic redraw.
//!
//! Each frame: reconcile the host buffer against the logical minimums,
//! recompute the centering offsets, clear the surface if the geometry
//! moved, blit the logical grid, then sleep to the next frame boundary.
//!
//! Only surface acquisition is fatal, and it happens before this thread
//! exists. Inside the loop every failure is policy-handled at the step
//! boundary: geometry reconciliation errors are logged and swallowed,
//! blit rejections drop the frame, report it, and the loop carries on.

use super::messages::FrameEvent;
use crate::buffer::{PackedCell, ScreenBuffer};
use crate::layout::{Centering, Extent, Rect};
use crate::surface::RenderSurface;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Sleep slice while waiting for the next frame, so shutdown is observed
/// promptly.
const SHUTDOWN_POLL: Duration = Duration::from_millis(1);

/// What the loop is doing right now (trace-level observability).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    ComputingGeometry,
    Blitting,
    Sleeping,
}

/// Cumulative render statistics.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    /// Frames blitted successfully.
    pub frames: u64,
    /// Frames dropped on a host rejection.
    pub dropped: u64,
    /// Last frame's render time in microseconds.
    pub last_render_us: u64,
    /// Smoothed average render time in microseconds.
    pub avg_render_us: u64,
}

impl FrameStats {
    fn record(&mut self, render_us: u64) {
        self.frames += 1;
        self.last_render_us = render_us;
        // Smoothed average
        if self.avg_render_us == 0 {
            self.avg_render_us = render_us;
        } else {
            self.avg_render_us = (self.avg_render_us * 15 + render_us) / 16;
        }
    }
}

/// Frame loop actor driving redraw at a configured rate.
pub struct FrameLoop {
    /// Handle to the render thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for frame events.
    event_rx: Receiver<FrameEvent>,
    /// Shared statistics.
    stats: Arc<Mutex<FrameStats>>,
}

impl FrameLoop {
    /// Spawn the frame loop thread.
    ///
    /// # Arguments
    ///
    /// * `surface` - The host surface; the loop locks it per step, never
    ///   across a sleep.
    /// * `screen` - The shared logical grid; one read guard covers each
    ///   blit so storage and dimensions are observed as a unit.
    /// * `framerate` - Target frames per second (0 is treated as 1).
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the render thread.
    pub fn spawn<S>(
        surface: Arc<Mutex<S>>,
        screen: Arc<RwLock<ScreenBuffer>>,
        framerate: u32,
    ) -> Self
    where
        S: RenderSurface + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let stats = Arc::new(Mutex::new(FrameStats::default()));
        let stats_clone = stats.clone();

        // Bounded channel with a small buffer - a slow consumer drops
        // events rather than stalling the loop.
        let (event_tx, event_rx) = bounded(8);

        let interval = Duration::from_millis(u64::from(1000 / framerate.max(1)).max(1));

        let handle = thread::Builder::new()
            .name("blitgrid-frame".to_string())
            .spawn(move || {
                Self::run_loop(
                    &surface,
                    &screen,
                    &shutdown_clone,
                    &event_tx,
                    &stats_clone,
                    interval,
                );
            })
            .expect("Failed to spawn frame loop thread");

        Self {
            handle: Some(handle),
            shutdown,
            event_rx,
            stats,
        }
    }

    /// Get a reference to the frame event receiver.
    #[inline]
    pub const fn events(&self) -> &Receiver<FrameEvent> {
        &self.event_rx
    }

    /// Snapshot the cumulative render statistics.
    pub fn stats(&self) -> FrameStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Signal the loop to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Signal shutdown and wait for the render thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main frame loop.
    fn run_loop<S: RenderSurface>(
        surface: &Mutex<S>,
        screen: &RwLock<ScreenBuffer>,
        shutdown: &AtomicBool,
        events: &Sender<FrameEvent>,
        stats: &Arc<Mutex<FrameStats>>,
        interval: Duration,
    ) {
        let mut centering = Centering::new();
        let mut needs_clear = true;
        let mut frame = 0u64;
        let mut next_frame = Instant::now();

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now < next_frame {
                trace!(phase = ?Phase::Sleeping, frame);
                thread::sleep((next_frame - now).min(SHUTDOWN_POLL));
                continue;
            }

            Self::run_frame(
                surface,
                screen,
                events,
                stats,
                &mut centering,
                &mut needs_clear,
                frame,
            );

            frame += 1;
            next_frame += interval;

            // Handle case where we're behind (catch up without bursting)
            if next_frame < Instant::now() {
                next_frame = Instant::now() + interval;
            }
        }

        let stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(
            frames = stats.frames,
            dropped = stats.dropped,
            "frame loop stopped"
        );
    }

    /// One frame: reconcile, recompute offsets, clear on change, blit.
    fn run_frame<S: RenderSurface>(
        surface: &Mutex<S>,
        screen: &RwLock<ScreenBuffer>,
        events: &Sender<FrameEvent>,
        stats: &Arc<Mutex<FrameStats>>,
        centering: &mut Centering,
        needs_clear: &mut bool,
        frame: u64,
    ) {
        trace!(phase = ?Phase::Idle, frame);
        let started = Instant::now();

        // Lock order is surface, then screen - same as apply_geometry.
        let mut surface = surface.lock().unwrap_or_else(PoisonError::into_inner);

        trace!(phase = ?Phase::ComputingGeometry, frame);
        let logical = {
            let screen = screen.read().unwrap_or_else(PoisonError::into_inner);
            Extent::new(screen.width(), screen.height())
        };

        // Best-effort: grow the host buffer up to the logical minimums.
        // Transient refusals while the host is mid-resize are expected;
        // skip and retry next frame.
        match surface.buffer_extent() {
            Ok(host) if !logical.fits_within(&host) => {
                let want = Extent::new(
                    host.width.max(logical.width),
                    host.height.max(logical.height),
                );
                if let Err(err) = surface.set_buffer_extent(want) {
                    debug!(%err, "host refused buffer grow");
                }
            }
            Ok(_) => {}
            Err(err) => debug!(%err, "host buffer extent query failed"),
        }

        let window = match surface.window_extent() {
            Ok(window) => window,
            Err(err) => {
                warn!(%err, "window extent query failed, frame dropped");
                stats
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .dropped += 1;
                let _ = events.try_send(FrameEvent::BlitFailed {
                    detail: err.to_string(),
                });
                return;
            }
        };

        let (changed, (x_offset, y_offset)) = centering.recompute(window, logical);

        trace!(phase = ?Phase::Blitting, frame);
        if changed || *needs_clear {
            // Stale content may sit in margins vacated by re-centering;
            // one cleared full-window blit erases it.
            let blank = vec![PackedCell::EMPTY; window.area() as usize];
            match surface.blit(&blank, window, Rect::from_extent(window)) {
                Ok(()) => *needs_clear = false,
                Err(err) => {
                    warn!(%err, "surface clear failed");
                    let _ = events.try_send(FrameEvent::BlitFailed {
                        detail: err.to_string(),
                    });
                }
            }
            let _ = events.try_send(FrameEvent::Recentered { x_offset, y_offset });
        }

        let result = {
            // One read guard for the whole blit: a concurrent resize can
            // never tear the (storage, width, height) triple mid-blit.
            let screen = screen.read().unwrap_or_else(PoisonError::into_inner);
            let source = Extent::new(screen.width(), screen.height());
            let dest = Rect::new(x_offset, y_offset, source.width, source.height);
            surface
                .blit(screen.cells(), source, dest)
                .map(|()| source.area() as usize)
        };

        match result {
            Ok(cells) => {
                let render_us =
                    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
                stats
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .record(render_us);
                let _ = events.try_send(FrameEvent::Rendered {
                    frame,
                    render_us,
                    cells,
                });
            }
            Err(err) => {
                warn!(%err, "blit rejected, frame dropped");
                stats
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .dropped += 1;
                let _ = events.try_send(FrameEvent::BlitFailed {
                    detail: err.to_string(),
                });
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}
