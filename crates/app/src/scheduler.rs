//! Scheduler loop — the single task that owns all lighting state.
//!
//! Each iteration applies every queued transport event first, then checks
//! the auto-off deadline, then advances the animation and renders. An event
//! is therefore never half-applied when a frame is written.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::MissedTickBehavior;

use nightglow_domain::time::Millis;

use crate::lighting::{LightPhase, LightingController};
use crate::ports::{Clock, PixelDriver, TransportEvent};
use crate::renderer::ColorRenderer;
use crate::router::EventRouter;

/// Drives the lighting controller from transport events and the clock.
pub struct Scheduler<C, D> {
    controller: LightingController,
    router: EventRouter,
    renderer: ColorRenderer<D>,
    clock: C,
    events: mpsc::Receiver<TransportEvent>,
    tick_interval: Duration,
    last_rendered: Option<i32>,
    last_phase: LightPhase,
}

impl<C: Clock, D: PixelDriver> Scheduler<C, D> {
    /// Assemble a scheduler.
    ///
    /// `tick_interval` is how often the loop wakes up without inbound
    /// events; it should be shorter than the animation step interval.
    pub fn new(
        controller: LightingController,
        router: EventRouter,
        renderer: ColorRenderer<D>,
        clock: C,
        events: mpsc::Receiver<TransportEvent>,
        tick_interval: Duration,
    ) -> Self {
        let last_phase = controller.phase(clock.now_ms());
        Self {
            controller,
            router,
            renderer,
            clock,
            events,
            tick_interval,
            last_rendered: None,
            last_phase,
        }
    }

    /// Apply one transport event.
    pub fn handle(&mut self, event: TransportEvent, now: Millis) {
        match event {
            TransportEvent::Connected => tracing::info!("transport connected"),
            TransportEvent::Disconnected { reason } => {
                tracing::warn!(%reason, "transport disconnected");
            }
            TransportEvent::Message(message) => {
                if let Some(applied) = self.router.route(&message, &mut self.controller, now) {
                    tracing::debug!(?applied, "lighting event applied");
                }
            }
        }
    }

    /// Evaluate the deadline, then advance the animation and render.
    pub fn tick(&mut self, now: Millis) {
        self.controller.tick(now);

        if let Some(brightness) = self.controller.perform_step(now) {
            self.render(brightness);
        } else if self.controller.tween().is_done(now) {
            // The final value may land between two steps; write it once.
            self.render(self.controller.tween().end_value());
        }

        let phase = self.controller.phase(now);
        if phase != self.last_phase {
            tracing::info!(from = %self.last_phase, to = %phase, "light phase changed");
            self.last_phase = phase;
        }
    }

    fn render(&mut self, brightness: i32) {
        if self.last_rendered == Some(brightness) {
            return;
        }
        self.renderer.render(brightness);
        self.last_rendered = Some(brightness);
    }

    /// Apply every event already queued, without waiting.
    ///
    /// Returns `false` once the transport side of the channel is gone.
    fn drain_pending(&mut self) -> bool {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    let now = self.clock.now_ms();
                    self.handle(event, now);
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }

    /// Run the loop until `shutdown` resolves, then hand the scheduler back.
    ///
    /// A closed event channel does not stop the loop: running animations and
    /// the auto-off deadline keep being served until shutdown.
    pub async fn run_until<F>(mut self, shutdown: F) -> Self
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut open = true;
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = interval.tick() => {}
                received = self.events.recv(), if open => match received {
                    Some(event) => {
                        let now = self.clock.now_ms();
                        self.handle(event, now);
                    }
                    None => {
                        open = false;
                        tracing::warn!("transport channel closed, no more inbound events");
                    }
                },
            }

            if open && !self.drain_pending() {
                open = false;
                tracing::warn!("transport channel closed, no more inbound events");
            }
            self.tick(self.clock.now_ms());
        }

        tracing::info!("scheduler stopped");
        self
    }

    #[must_use]
    pub fn controller(&self) -> &LightingController {
        &self.controller
    }

    #[must_use]
    pub fn renderer(&self) -> &ColorRenderer<D> {
        &self.renderer
    }
}
