//! Alert Overlay Demo
//!
//! Drives an overlay controller against an in-memory host at 60 fps and
//! prints what gets mounted each step.
//!
//! Features demonstrated:
//! - Success alert dismissed by a backdrop click
//! - Loading overlay that ignores user dismissal until closed in code
//! - Showing a new alert while the previous one animates out
//! - Optional TOML settings file
//!
//! Run with: cargo run -p scrim_overlay --example alert_demo [settings.toml]
//! Set RUST_LOG=scrim_overlay=debug to see lifecycle logs.

use anyhow::{bail, Context, Result};
use scrim_overlay::prelude::*;
use tracing_subscriber::EnvFilter;

const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => OverlaySettings::load(&path)
            .with_context(|| format!("loading overlay settings from {path}"))?,
        None => OverlaySettings::default(),
    };
    let target = settings.portal_target.trim_start_matches('#').to_string();

    let mut host: MemoryHost<OverlayView> = MemoryHost::new();
    host.add_mount(target.clone());

    let overlay = OverlayController::with_settings(settings);
    overlay.subscribe(|snapshot| {
        tracing::info!(
            phase = ?snapshot.phase,
            title = %snapshot.title,
            generation = snapshot.generation,
            "overlay changed"
        );
    });

    let mut demo = Demo {
        overlay,
        host,
        target,
        now_ms: 0,
    };

    // Shown before the host finished its first render
    demo.overlay.show(OverlayConfig::success("Success", "Saved").on_close(|| {
        tracing::info!("success alert closed");
    }));
    if demo.frame() != RenderOutcome::NotReady {
        bail!("overlay rendered before the host was ready");
    }
    demo.host.signal_ready();

    demo.run_until(OverlayPhase::Visible)?;
    demo.print("success alert at rest");

    demo.overlay.handle_backdrop_click();
    demo.run_until(OverlayPhase::Hidden)?;
    demo.print("after backdrop click");

    // Loading overlay: only code can close it
    demo.overlay.show(OverlayConfig::loading("Processing", "Please wait"));
    demo.run_until(OverlayPhase::Visible)?;
    let ignored = !demo.overlay.handle_backdrop_click() && !demo.overlay.handle_escape();
    println!("user dismissal ignored: {ignored}");
    demo.print("loading overlay");

    demo.overlay.close();
    for _ in 0..4 {
        demo.frame();
    }
    demo.print("loading overlay animating out");

    // Interrupt the exit with a new alert; content stays mounted
    demo.overlay.show(OverlayConfig::error("Failed", "Could not reach the server"));
    demo.run_until(OverlayPhase::Visible)?;
    demo.print("error alert replaced loading overlay");
    println!("unmounts so far: {}", demo.host.detach_count());

    demo.overlay.close();
    demo.run_until(OverlayPhase::Hidden)?;
    demo.print("all closed");

    Ok(())
}

struct Demo {
    overlay: OverlayController,
    host: MemoryHost<OverlayView>,
    target: String,
    now_ms: u64,
}

impl Demo {
    fn frame(&mut self) -> RenderOutcome {
        self.overlay.update(self.now_ms);
        self.now_ms += FRAME_MS;
        self.overlay.render(&mut self.host)
    }

    fn run_until(&mut self, phase: OverlayPhase) -> Result<()> {
        for _ in 0..600 {
            if self.frame() == RenderOutcome::NotReady {
                if let Some(err) = self.overlay.portal_error() {
                    bail!("overlay cannot render: {err}");
                }
            }
            if self.overlay.phase() == phase {
                return Ok(());
            }
        }
        bail!("overlay never reached {phase:?}")
    }

    fn print(&self, label: &str) {
        match self.host.content_at(&self.target) {
            Some(view) => println!(
                "[{:>5} ms] {label}: {} / {:?} icon={} close_button={} backdrop={:.2} opacity={:.2}",
                self.now_ms,
                view.panel.title,
                view.panel.variant,
                view.panel.icon,
                view.has_close_button(),
                view.backdrop.opacity,
                view.panel.pose.opacity,
            ),
            None => println!("[{:>5} ms] {label}: nothing mounted", self.now_ms),
        }
    }
}
