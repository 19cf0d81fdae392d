//! Scan Loop Demo - Keyboard and camera scans feeding one handler
//!
//! Wires the event loop together:
//! - crossterm key events are converted, stamped with focus, and routed
//! - the scanner interpreter reassembles scan bursts (type fast + Enter,
//!   or use a real HID scanner)
//! - a scripted "camera" decoder feeds the same handler
//! - Escape quits
//!
//! Run with: cargo run --example scan_loop

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use stockscan::camera::CameraFeed;
use stockscan::state::scanner::Scanner;
use stockscan::{on_key, poll_event, route_event};

fn main() -> std::io::Result<()> {
    crossterm::terminal::enable_raw_mode()?;

    let running = Rc::new(Cell::new(true));
    let running_esc = running.clone();
    let _esc_cleanup = on_key("Escape", move || {
        running_esc.set(false);
        true
    });

    let mut scanner = Scanner::with_callback(|code| {
        println!("scanned: {}\r", code);
    });
    scanner.start_listening();

    // Stand-in for a real frame decoder: one decoded frame, then quiet.
    let mut frames = vec!["6901234567890".to_string()].into_iter();
    let mut camera = CameraFeed::new(
        move || frames.next(),
        |code| println!("camera decoded: {}\r", code),
    );
    camera.start();

    println!("scan something (burst + Enter), Escape to quit\r");

    while running.get() {
        if let Some(event) = poll_event(Duration::from_millis(16))? {
            route_event(event);
        }
        camera.poll();
    }

    scanner.stop_listening();
    camera.stop();
    crossterm::terminal::disable_raw_mode()?;
    Ok(())
}
