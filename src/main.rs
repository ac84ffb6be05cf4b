use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use log::info;
use particle_trails::{cli, Frame, PointerInput, SimConfig, TickScheduler};

#[cfg(feature = "capture")]
use particle_trails::capture::CaptureModule;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Collect Arguments
    let args = cli::Args::parse();
    let config = args.sim_config()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(args, config))
}

async fn run(args: cli::Args, config: SimConfig) -> anyhow::Result<()> {
    let mut scheduler = TickScheduler::new(config)?;
    let viewport = scheduler.config().viewport;
    let pointer_interval = scheduler.config().tick_interval() / 2;

    let mut frames = scheduler.subscribe();
    scheduler.start()?;
    let input = scheduler
        .pointer_input()
        .context("Scheduler has no input after starting")?;

    #[cfg(feature = "capture")]
    let mut capture = args.capture.as_ref().map(CaptureModule::new).transpose()?;

    let pointer = tokio::spawn(orbit(input, viewport, pointer_interval));

    let deadline = tokio::time::sleep(Duration::from_secs_f32(args.seconds.max(0.0)));
    tokio::pin!(deadline);
    let mut report = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = report.tick() => log_frame(&scheduler.snapshot()),
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }

                #[cfg(feature = "capture")]
                if let Some(capture) = capture.as_mut() {
                    let frame = frames.borrow_and_update().clone();
                    capture.write_frame(&frame)?;
                }
            }
        }
    }

    pointer.abort();
    scheduler.pointer_left();
    scheduler.shutdown().await?;

    #[cfg(feature = "capture")]
    if let Some(capture) = capture {
        capture.finish()?;
    }

    Ok(())
}

fn log_frame(frame: &Frame) {
    let summary = frame.summary();
    info!(
        "tick {} ({:.1}/s): {} particles, {} links, center of mass ({:.1}, {:.1}), spread {:.0}x{:.0}, avg velocity ({:.2}, {:.2})",
        frame.tick,
        frame.tick_rate,
        summary.count,
        frame.links.len(),
        summary.center_of_mass.x,
        summary.center_of_mass.y,
        summary.extent().x,
        summary.extent().y,
        summary.avg_velocity.x,
        summary.avg_velocity.y,
    );
    if let Some(weather) = frame.weather {
        info!("weather: {:?}", weather);
    }
}

/// Moves a synthetic pointer around the middle of the viewport.
async fn orbit(input: PointerInput, viewport: Vec2, period: Duration) {
    let center = viewport * 0.5;
    let radius = viewport.min_element() * 0.3;
    let mut ticker = tokio::time::interval(period);
    let mut angle = 0.0f32;

    loop {
        ticker.tick().await;
        angle += 0.05;

        let wobble = 1.0 + 0.2 * (angle * 3.0).sin();
        if !input.moved(center + Vec2::from_angle(angle) * radius * wobble) {
            break;
        }
    }
}
