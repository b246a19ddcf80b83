//! Rotator demo: a headline cycling through sentences on the terminal.
//!
//! Run with `RUST_LOG=wordwheel=debug` and stderr redirected to a file to
//! watch the plans being dispatched. Press `q`, `Esc` or `Ctrl-C` to quit.

use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wordwheel::{Layout, Mount, Palette, Rect, Rgb, Rotator, RotatorConfig};

fn main() -> wordwheel::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("wordwheel=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (width, height) = crossterm::terminal::size()?;
    let layout = Layout::new(width, height).with_mount(
        Mount::new("headline", Rect::row(2, height / 2, 0))
            .fill()
            .with_content("Loading..."),
    );

    let config = RotatorConfig::default()
        .with_container_id("headline")
        .with_interval(Duration::from_millis(2500))
        .with_speed(Duration::from_millis(300))
        .with_mobile_width(40)
        .with_clear_original_content(false)
        .with_verbose(true);

    let rotator = Rotator::new(
        config,
        [
            "The quick brown fox is very cool, supposedly.",
            "The brown color is very very pretty, no?",
            "We're here (in Wilkes-Barre), finally!",
            "Finally, we're here.",
            "Is the fox here? Very, very cool.",
        ],
        layout,
    )?
    .with_palette(Palette {
        fg: Rgb::from_u32(0x00FF_D787),
        bg: Rgb::new(20, 20, 30),
    });

    // Stop on our own after a minute even if nobody presses a key.
    let handle = rotator.handle();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_secs(60));
        handle.stop();
    });

    rotator.run()?;
    println!();
    Ok(())
}
