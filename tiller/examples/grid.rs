//! Keyboard-driven focus demo: two rows of labeled cells.
//!
//! wasd or arrows move, Enter/Space activates, Esc/Backspace backs out to
//! the top level (Enter re-enters from there), Ctrl+C quits.

use std::fs::File;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use simplelog::{Config, LevelFilter, WriteLogger};
use tiller::{FocusHandle, InputMapper, Navigator, Node, RawEvent};

struct Cell {
    label: &'static str,
}

impl FocusHandle for Cell {
    fn focus(&self) {
        print!("-> {}\r\n", self.label);
    }

    fn blur(&self) {}

    fn scroll_into_view(&self) {}
}

fn main() -> io::Result<()> {
    let log_file = File::create("grid.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut nav = Navigator::new();
    let root = nav.root();

    let rows = [["home", "search", "settings"], ["films", "series", "music"]];
    for (row, labels) in rows.iter().enumerate() {
        let section = nav.register(root, row as i32, Node::row().skip(true));
        for (slot, label) in labels.iter().copied().enumerate() {
            let cell = Node::row()
                .bind(Cell { label })
                .on_activate(move || print!("activated {label}\r\n"));
            nav.register(section, slot as i32, cell);
        }
    }

    let first = nav.tree().first_descendant(root).expect("grid is non-empty");
    nav.focus(first);
    print!("wasd/arrows move, Enter activates, Esc backs out, Ctrl+C quits\r\n");

    terminal::enable_raw_mode()?;
    let mut mapper = InputMapper::default();
    loop {
        if let Event::Key(key) = event::read()? {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                break;
            }
            if let Some(raw) = RawEvent::from_crossterm(&key) {
                if let Some(action) = mapper.dispatch(raw, &mut nav) {
                    print!("{:?}  path={}\r\n", action, nav.focused_path());
                }
            }
        }
    }
    terminal::disable_raw_mode()?;
    Ok(())
}
