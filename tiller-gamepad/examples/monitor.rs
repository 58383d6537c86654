//! Prints bridge events and drives a small focus grid with a real pad.
//!
//! D-pad moves, South activates, East backs out. Ctrl+C quits.

use std::thread;
use std::time::Duration;

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use tiller::{InputMapper, Navigator, Node};
use tiller_gamepad::{Bridge, BridgeError, BridgeEvent};

fn main() -> Result<(), BridgeError> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("Failed to initialize logger");

    let mut nav = Navigator::new();
    let root = nav.root();
    for row in 0..2 {
        let section = nav.register(root, row, Node::row().skip(true));
        for slot in 0..3 {
            nav.register(section, slot, Node::row());
        }
    }
    let first = nav.tree().first_descendant(root).expect("grid is non-empty");
    nav.focus(first);

    let mut bridge = Bridge::new()?;
    for name in bridge.connected_pads() {
        println!("attached: {name}");
    }

    let mut mapper = InputMapper::default();
    loop {
        for event in bridge.poll() {
            match event {
                BridgeEvent::Input(raw) => {
                    if mapper.dispatch(raw, &mut nav).is_some() {
                        println!("focus: {}", nav.focused_path());
                    }
                }
                BridgeEvent::Connection {
                    name,
                    connected,
                    power,
                } => {
                    let state = if connected { "connected" } else { "gone" };
                    println!("{name} {state} ({power:?})");
                }
            }
        }
        thread::sleep(Duration::from_millis(16));
    }
}
