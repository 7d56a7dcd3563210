//! Terminal demo for rich_note.
//!
//! Without arguments, replays a short scripted editing session and prints the
//! note after every change. With a file argument, loads that persisted note
//! (structured or plain text) and prints it.
//!
//! Run with: `RUST_LOG=rich_note=debug cargo run --features tracing --bin note_demo`

use std::process;

use rich_note::prelude::*;
use rich_note::segment::to_ansi;

const HELP_TEXT: &str = "\
note_demo - rich_note formatting engine demo

USAGE:
    note_demo [NOTE_FILE]

Without NOTE_FILE a scripted session is replayed.
";

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => replay_session(),
        [flag] if flag == "-h" || flag == "--help" => print!("{HELP_TEXT}"),
        [path] => {
            if let Err(err) = show_file(path) {
                eprintln!("note_demo: {path}: {err}");
                process::exit(1);
            }
        }
        _ => {
            eprint!("{HELP_TEXT}");
            process::exit(2);
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    tracing::debug!("logging initialised");
}

#[cfg(not(feature = "tracing"))]
fn init_logging() {}

fn show_file(path: &str) -> std::io::Result<()> {
    let blob = std::fs::read_to_string(path)?;
    let editor = Editor::from_blob(&blob);
    println!("{}", to_ansi(&editor.build_segments()));
    println!("{} characters, {} span(s)", editor.document().len(), editor.document().spans().len());
    Ok(())
}

/// Type `text` one character at a time at the caret, as a text field would.
fn type_text(editor: &mut Editor, text: &str) {
    for ch in text.chars() {
        let old = editor.text().to_string();
        let caret = editor.selection().start;
        let mut new: String = old.chars().take(caret).collect();
        new.push(ch);
        new.extend(old.chars().skip(caret));
        editor.on_text_changed(&old, &new);
    }
}

fn select(editor: &mut Editor, needle: &str) {
    if let Some(byte) = editor.text().find(needle) {
        let start = editor.text()[..byte].chars().count();
        editor.set_selection(start, start + needle.chars().count());
    }
}

fn replay_session() {
    let mut editor = Editor::with_options(EditorOptions::new().arm_on_collapsed_toggle(true));
    let mut step = 0usize;
    editor.subscribe(move |document| {
        step += 1;
        println!("{step:>3} | {}", to_ansi(&document.build_segments()));
    });

    type_text(&mut editor, "Groceries\nmilk, eggs, ");
    select(&mut editor, "Groceries");
    editor.toggle_style(StyleType::Header1);

    let end = editor.document().len();
    editor.set_selection(end, end);
    editor.toggle_style(StyleType::Bold);
    type_text(&mut editor, "bread and jam");
    select(&mut editor, " and jam");
    editor.toggle_style(StyleType::Bold);

    select(&mut editor, "eggs");
    editor.toggle_style(StyleType::Italic);
    select(&mut editor, "gs, bre");
    editor.toggle_style(StyleType::Underline);
    select(&mut editor, "milk");
    editor.toggle_style(StyleType::Italic);
    editor.clear_formatting();

    let blob = editor.serialize();
    println!();
    println!("toolbar at \"milk\": {}", editor.current_styles());
    println!("persisted: {blob}");

    let restored = Editor::from_blob(&blob);
    println!(
        "reloaded note matches: {}",
        restored.document() == editor.document()
    );
}
