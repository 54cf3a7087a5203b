//! # nightglowd — nightglow daemon
//!
//! Composition root that wires all adapters together and runs the fixture.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize structured logging
//! - Start the MQTT transport, feeding a bounded channel
//! - Construct the lighting controller, router, renderer and pixel driver
//! - Run the scheduler loop until Ctrl-C, then tear the transport down
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no lighting logic belongs here.

mod config;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use nightglow_adapter_mqtt::MqttTransport;
use nightglow_adapter_virtual::VirtualStrip;
use nightglow_app::clock::MonotonicClock;
use nightglow_app::lighting::LightingController;
use nightglow_app::renderer::ColorRenderer;
use nightglow_app::router::EventRouter;
use nightglow_app::scheduler::Scheduler;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        device_id = %config.lighting.device_id,
        actuator_device_id = %config.lighting.actuator_device_id,
        pixels = config.lighting.pixel_count,
        "nightglowd starting"
    );

    // Transport
    let (events_tx, events_rx) = mpsc::channel(config.scheduler.event_capacity);
    let transport = MqttTransport::start(&config.mqtt, events_tx)?;

    // Lighting core
    let strip = VirtualStrip::new(config.lighting.pixel_count);
    let renderer = ColorRenderer::new(strip, config.lighting.base_color.rgb())
        .with_gamma_correction(config.lighting.gamma_correction);
    let scheduler = Scheduler::new(
        LightingController::new(&config.lighting),
        EventRouter::from_config(&config.lighting),
        renderer,
        MonotonicClock::new(),
        events_rx,
        config.tick_interval(),
    );

    scheduler.run_until(shutdown_signal()).await;

    if let Err(err) = transport.stop() {
        tracing::warn!(%err, "MQTT session ended before disconnect");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
