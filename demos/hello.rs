//! Minimal smoke demo: acquire the terminal, write a line, render.
//!
//! Run with: `cargo run --example hello`

use blitgrid::{Color, Console, ConsoleConfig};
use std::time::Duration;

fn main() -> blitgrid::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let console = Console::acquire(ConsoleConfig::default())?;

    console.write_at("HELLO", 10, 6, Color::Yellow, Color::DarkBlue);
    console.write_at("press nothing, this exits on its own", 10, 8, Color::Gray, Color::Black);

    std::thread::sleep(Duration::from_secs(3));

    let stats = console.stats();
    console.shutdown();
    eprintln!(
        "rendered {} frames ({} dropped), avg {}us",
        stats.frames, stats.dropped, stats.avg_render_us
    );
    Ok(())
}
