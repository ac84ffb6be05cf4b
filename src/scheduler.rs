//! Fixed-interval driver for a [`Simulation`].
//!
//! A single tokio task owns the simulation while it runs. Pointer input is
//! queued and drained at the start of every tick, and each tick publishes a
//! fresh [`Frame`] on a watch channel. A tick may still be stepping on another
//! worker when the run is stopped, so publishing checks the run's stop flag
//! under the channel lock and a stopped run never overwrites the empty frame.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::{anyhow, Context};
use glam::Vec2;
use log::{debug, error, trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};

use crate::{
    config::SimConfig,
    frame::Frame,
    framepace::TickClock,
    simulation::{PointerEvent, Simulation},
};

/// Cloneable sender for pointer events of one run.
#[derive(Clone)]
pub struct PointerInput {
    tx: mpsc::UnboundedSender<PointerEvent>,
}

impl PointerInput {
    /// Returns `false` if the run this input belongs to has stopped.
    pub fn moved(&self, position: Vec2) -> bool {
        self.send(PointerEvent::Moved(position))
    }

    pub fn left(&self) -> bool {
        self.send(PointerEvent::Left)
    }

    fn send(&self, event: PointerEvent) -> bool {
        if self.tx.send(event).is_err() {
            trace!("Dropped {:?}, the simulation isn't running", event);
            return false;
        }

        true
    }
}

struct Running {
    task: JoinHandle<()>,
    input: PointerInput,
    stopped: Arc<AtomicBool>,
}

impl Running {
    /// Flags the run as stopped and aborts its task. Anything the task
    /// publishes after this is discarded.
    fn cancel(&self) {
        self.stopped.store(true, Ordering::Release);
        self.task.abort();
    }
}

pub struct TickScheduler {
    config: SimConfig,
    frames: Arc<watch::Sender<Arc<Frame>>>,
    running: Option<Running>,
}

impl TickScheduler {
    pub fn new(config: SimConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let (frames, _) = watch::channel(Arc::new(Frame::default()));
        Ok(Self {
            config,
            frames: Arc::new(frames),
            running: None,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.task.is_finished())
    }

    /// Starts ticking with a generator seeded from the config, or from
    /// entropy if it has no seed.
    pub fn start(&mut self) -> anyhow::Result<()> {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        self.start_with(rng)
    }

    /// Starts ticking a fresh simulation driven by `rng`. Does nothing if
    /// already running. Must be called from within a tokio runtime.
    pub fn start_with<R>(&mut self, rng: R) -> anyhow::Result<()>
    where
        R: Rng + Send + 'static,
    {
        if self.is_running() {
            debug!("Tick scheduler already running");
            return Ok(());
        }

        let runtime = tokio::runtime::Handle::try_current()
            .context("The tick scheduler must be started inside a tokio runtime")?;

        // A previous run whose task died on its own still needs its flag set.
        self.stop();

        let simulation = Simulation::new(&self.config, rng);
        let (tx, rx) = mpsc::unbounded_channel();
        let stopped = Arc::new(AtomicBool::new(false));
        let task = runtime.spawn(run(
            simulation,
            self.config.tick_interval(),
            rx,
            self.frames.clone(),
            stopped.clone(),
        ));

        debug!(
            "Tick scheduler started, {:?} every {}ms",
            self.config.variant, self.config.tick_interval_ms
        );
        self.running = Some(Running {
            task,
            input: PointerInput { tx },
            stopped,
        });
        Ok(())
    }

    /// Cancels the timer and releases the particles. Returns whether it was
    /// running; stopping twice is a no-op.
    pub fn stop(&mut self) -> bool {
        let Some(running) = self.running.take() else {
            return false;
        };

        if running.task.is_finished() {
            warn!("Tick task had already exited before stop");
        }

        running.cancel();
        self.frames.send_replace(Arc::new(Frame::default()));
        debug!("Tick scheduler stopped");
        true
    }

    /// Like [`stop`](Self::stop) but waits for the task to be gone. Fails if
    /// the task had panicked.
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };

        running.cancel();
        self.frames.send_replace(Arc::new(Frame::default()));

        match running.task.await {
            Err(err) if err.is_panic() => {
                error!("Tick task panicked: {}", err);
                Err(anyhow!("Tick task panicked: {}", err))
            }
            _ => {
                debug!("Tick scheduler shut down");
                Ok(())
            }
        }
    }

    /// Input handle of the current run.
    pub fn pointer_input(&self) -> Option<PointerInput> {
        self.running.as_ref().map(|running| running.input.clone())
    }

    pub fn pointer_moved(&self, position: Vec2) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| running.input.moved(position))
    }

    pub fn pointer_left(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| running.input.left())
    }

    /// Latest published frame.
    pub fn snapshot(&self) -> Arc<Frame> {
        self.frames.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Frame>> {
        self.frames.subscribe()
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run<R: Rng>(
    mut simulation: Simulation<R>,
    interval: Duration,
    mut input: mpsc::UnboundedReceiver<PointerEvent>,
    frames: Arc<watch::Sender<Arc<Frame>>>,
    stopped: Arc<AtomicBool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut clock = TickClock::new();

    loop {
        let now = ticker.tick().await;
        clock.begin_tick(now);

        while let Ok(event) = input.try_recv() {
            simulation.pointer(event);
        }

        simulation.step();

        let mut frame = simulation.snapshot();
        frame.tick_rate = clock.tick_rate();

        let mut frame = Some(Arc::new(frame));
        frames.send_if_modified(|current| {
            if stopped.load(Ordering::Acquire) {
                return false;
            }
            if let Some(frame) = frame.take() {
                *current = frame;
            }
            true
        });

        if stopped.load(Ordering::Acquire) {
            return;
        }
    }
}
