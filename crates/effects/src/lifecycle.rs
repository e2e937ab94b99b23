//! Frame loop with an explicit start/stop lifecycle
//!
//! Each frame ticks the backdrop and then asks the scheduler for the next
//! one, so there is never more than one frame in flight. Cancelling the
//! token ends the loop at the next callback.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::backdrop::Backdrop;
use crate::error::Result;
use crate::paint::Painter;

/// Invoked once with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Source of display frames (`requestAnimationFrame` in the browser)
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<()>;
}

/// Shared stop flag for a running animation
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Handle to a started frame loop
#[derive(Debug, Clone)]
pub struct Animation {
    token: CancellationToken,
}

impl Animation {
    /// Stop the loop; the pending frame callback becomes a no-op
    pub fn stop(&self) {
        if !self.token.is_cancelled() {
            debug!("backdrop animation stopped");
        }
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

struct FrameLoop<R, P: ?Sized> {
    scheduler: Rc<dyn FrameScheduler>,
    backdrop: Rc<RefCell<Backdrop<R>>>,
    painter: Rc<RefCell<P>>,
    token: CancellationToken,
}

impl<R, P> FrameLoop<R, P>
where
    R: Rng + 'static,
    P: Painter + ?Sized + 'static,
{
    fn schedule(self: &Rc<Self>) -> Result<()> {
        let this = Rc::clone(self);
        self.scheduler.request_frame(Box::new(move |now: f64| this.run(now)))
    }

    fn run(self: Rc<Self>, now_ms: f64) {
        if self.token.is_cancelled() {
            trace!("frame skipped, animation cancelled");
            return;
        }

        let stats = self
            .backdrop
            .borrow_mut()
            .tick(now_ms, &mut *self.painter.borrow_mut());
        if stats.spawned_pulse {
            trace!(now_ms, live = stats.live_pulses, "pulse spawned");
        }
        if stats.expired_pulses > 0 {
            trace!(now_ms, expired = stats.expired_pulses, "pulses faded out");
        }

        if let Err(e) = self.schedule() {
            warn!(error = %e, "frame loop halted");
            self.token.cancel();
        }
    }
}

/// Start driving `backdrop` into `painter`, one tick per scheduled frame
pub fn start<R, P>(
    scheduler: Rc<dyn FrameScheduler>,
    backdrop: Rc<RefCell<Backdrop<R>>>,
    painter: Rc<RefCell<P>>,
) -> Result<Animation>
where
    R: Rng + 'static,
    P: Painter + ?Sized + 'static,
{
    let token = CancellationToken::new();
    let frame_loop = Rc::new(FrameLoop {
        scheduler,
        backdrop,
        painter,
        token: token.clone(),
    });
    frame_loop.schedule()?;
    debug!("backdrop animation started");
    Ok(Animation { token })
}

/// Scheduler driven by hand, one frame per `run_frame` call
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<FrameCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run the oldest pending frame at `now_ms`. Returns false if none was queued.
    pub fn run_frame(&self, now_ms: f64) -> bool {
        // Release the queue borrow before the callback re-enters request_frame
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some(callback) => {
                callback(now_ms);
                true
            }
            None => false,
        }
    }

    /// Run one frame per timestamp, stopping early when the queue drains
    pub fn run_frames<I: IntoIterator<Item = f64>>(&self, timestamps: I) -> usize {
        timestamps.into_iter().take_while(|&t| self.run_frame(t)).count()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<()> {
        self.queue.borrow_mut().push_back(callback);
        Ok(())
    }
}
