//! Marquee demo: concurrent writers against the running frame loop.
//!
//! One thread scrolls a banner, the main thread tails frame events.
//! Resize the terminal while it runs to watch the grid re-center.
//!
//! Run with: `cargo run --example marquee`

use blitgrid::{Color, Console, ConsoleConfig, FrameEvent};
use std::sync::Arc;
use std::time::Duration;

const BANNER: &str = "  blitgrid - bulk blits, no flicker  ";

fn main() -> blitgrid::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let console = Arc::new(Console::acquire(ConsoleConfig { framerate: 30 })?);
    let (width, height) = console.size();
    let row = height / 2;

    let writer = {
        let console = Arc::clone(&console);
        std::thread::spawn(move || {
            for step in 0..300u16 {
                let col = step % width.saturating_sub(BANNER.len() as u16).max(1);
                console.with_screen(|screen| {
                    screen.clear();
                    screen.write_at(BANNER, col, row, Color::Black, Color::Cyan);
                });
                std::thread::sleep(Duration::from_millis(50));
            }
        })
    };

    // Tail loop events until the writer finishes.
    while !writer.is_finished() {
        if let Ok(event) = console.events().recv_timeout(Duration::from_millis(100)) {
            match event {
                FrameEvent::Recentered { x_offset, y_offset } => {
                    tracing::info!(x_offset, y_offset, "recentered");
                }
                FrameEvent::BlitFailed { detail } => {
                    tracing::warn!(detail, "frame dropped");
                }
                FrameEvent::Rendered { .. } => {}
            }
        }
    }
    let _ = writer.join();

    if let Ok(console) = Arc::try_unwrap(console) {
        console.shutdown();
    }
    Ok(())
}
