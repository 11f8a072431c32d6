// gmenu - check, render and click JSON grid menu documents from the terminal

mod exit_codes;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use gridmenu_config::ReaderConfig;
use gridmenu_engine::harness::{Effect, RecordingViewer};
use gridmenu_engine::{CloseReason, InteractionKind, Interface, Rendered};
use gridmenu_reader::{InterfaceReader, ReadError};

use exit_codes::{read_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "gmenu")]
#[command(about = "Compile and exercise JSON grid menu documents")]
#[command(version)]
struct Cli {
    /// Reader config (default: <config dir>/gridmenu/reader.toml, if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a document and summarize the interface
    #[command(after_help = "\
Examples:
  gmenu check shop.json
  gmenu check shop.json --json")]
    Check {
        /// Document to compile
        file: PathBuf,

        /// Print a JSON summary
        #[arg(long)]
        json: bool,
    },

    /// Open the interface for a viewer and print what it shows
    #[command(after_help = "\
Examples:
  gmenu render shop.json
  gmenu render shop.json --viewer Alex --permission shop.buy --json")]
    Render {
        /// Document to compile
        file: PathBuf,

        #[command(flatten)]
        viewer: ViewerArgs,

        /// Print JSON instead of a grid
        #[arg(long)]
        json: bool,
    },

    /// Open, click one slot, close, and print every effect
    #[command(after_help = "\
Examples:
  gmenu click shop.json --slot 12
  gmenu click shop.json --slot 12 --kind shift_left --permission shop.buy
  gmenu click shop.json --slot 3 --kind number_key --aux 2 --reason disconnect")]
    Click {
        /// Document to compile
        file: PathBuf,

        /// Slot to click (0-based, row-major)
        #[arg(long)]
        slot: usize,

        /// Interaction kind, e.g. left, shift_right, number_key
        #[arg(long, default_value = "left")]
        kind: InteractionKind,

        /// Auxiliary index (hotbar slot for number_key)
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        aux: i32,

        #[command(flatten)]
        viewer: ViewerArgs,

        /// Close reason passed to the close hook
        #[arg(long, default_value = "player")]
        reason: CloseReason,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ViewerArgs {
    /// Viewer name, substituted for the player placeholder
    #[arg(long = "viewer", default_value = "console")]
    name: String,

    /// Permission the viewer holds. Repeatable.
    #[arg(long = "permission", value_name = "PERMISSION")]
    permissions: Vec<String>,
}

impl ViewerArgs {
    fn viewer(&self) -> RecordingViewer {
        RecordingViewer::new(self.name.clone()).with_permissions(self.permissions.iter().cloned())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = load_reader(cli.config.as_deref()).and_then(|reader| match cli.command {
        Commands::Check { file, json } => cmd_check(&reader, &file, json),
        Commands::Render { file, viewer, json } => cmd_render(&reader, &file, &viewer, json),
        Commands::Click { file, slot, kind, aux, viewer, reason, json } => {
            cmd_click(&reader, &file, slot, kind, aux, &viewer, reason, json)
        }
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn read(path: &Path, err: ReadError) -> Self {
        let code = read_exit_code(&err);
        let hint = match &err {
            ReadError::Interface(_) => {
                Some("every pattern row must match the grid kind, and every binding must be used".to_string())
            }
            _ => None,
        };
        Self { code, message: format!("{}: {}", path.display(), err), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn load_reader(config: Option<&Path>) -> Result<InterfaceReader, CliError> {
    let loaded = match config {
        Some(path) => ReaderConfig::load(path),
        None => ReaderConfig::load_default(),
    };
    let config = loaded.map_err(|e| {
        CliError::args(e.to_string())
            .with_hint(format!("default config path: {}", ReaderConfig::default_path().display()))
    })?;
    tracing::debug!(builtins = config.builtins, placeholder = %config.placeholders.player, "loaded reader config");
    Ok(InterfaceReader::with_config(config))
}

fn compile(reader: &InterfaceReader, file: &Path) -> Result<Arc<Interface>, CliError> {
    reader
        .read_path(file)
        .map(Arc::new)
        .map_err(|e| CliError::read(file, e))
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CliError::internal(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// ============================================================================
// check
// ============================================================================

fn cmd_check(reader: &InterfaceReader, file: &Path, json: bool) -> Result<(), CliError> {
    let interface = compile(reader, file)?;
    let viewer = RecordingViewer::new("console");

    let dimensions = interface.dimensions();
    let mut masks: Vec<char> = interface.layout().masks().keys().copied().collect();
    masks.sort_unstable();
    let mut slots: Vec<char> = interface.slots().keys().copied().collect();
    slots.sort_unstable();
    let cells = interface.cells().iter().flatten().count();
    let title = interface.title(&viewer);

    if json {
        return print_json(&json!({
            "kind": interface.kind(),
            "rows": dimensions.rows,
            "columns": dimensions.columns,
            "title": title,
            "masks": masks.iter().map(char::to_string).collect::<Vec<_>>(),
            "slots": slots.iter().map(char::to_string).collect::<Vec<_>>(),
            "cells": cells,
            "has_on_open": interface.on_open().is_some(),
            "has_on_close": interface.on_close().is_some(),
        }));
    }

    println!("kind:   {} ({})", interface.kind(), dimensions);
    if let Some(title) = title {
        println!("title:  {}", title);
    }
    println!("masks:  {}", join_chars(&masks));
    println!("slots:  {}", join_chars(&slots));
    println!("cells:  {} of {}", cells, dimensions.slots());
    Ok(())
}

fn join_chars(chars: &[char]) -> String {
    if chars.is_empty() {
        return "-".to_string();
    }
    chars
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// render
// ============================================================================

fn cmd_render(reader: &InterfaceReader, file: &Path, args: &ViewerArgs, json: bool) -> Result<(), CliError> {
    let interface = compile(reader, file)?;
    let viewer = args.viewer();
    let open = interface.open(&viewer);
    let effects = viewer.drain();
    let symbols = slot_symbols(&interface);

    if json {
        let cells: Vec<_> = open
            .rendered()
            .filled()
            .map(|(slot, content)| {
                json!({
                    "slot": slot,
                    "char": symbols.get(slot).map(char::to_string),
                    "item": content.item,
                    "amount": content.amount,
                })
            })
            .collect();
        let errors: Vec<_> = open
            .rendered()
            .errors
            .iter()
            .map(|e| json!({"slot": e.slot, "error": e.error.to_string()}))
            .collect();
        return print_json(&json!({
            "title": open.title(),
            "kind": interface.kind(),
            "viewer": args.name,
            "cells": cells,
            "errors": errors,
            "effects": effects,
        }));
    }

    if let Some(title) = open.title() {
        println!("{}", title);
    }
    println!("{} ({})", interface.kind(), interface.dimensions());
    print!("{}", draw_grid(&interface, open.rendered(), &symbols));

    for (slot, content) in open.rendered().filled() {
        let symbol = symbols.get(slot).copied().unwrap_or(' ');
        println!("  {:>3} {}  {}", slot, symbol, content);
    }
    for error in &open.rendered().errors {
        println!("  {:>3} !  {}", error.slot, error.error);
    }
    for effect in &effects {
        println!("{}", effect);
    }
    Ok(())
}

/// Pattern character per slot, separators removed.
fn slot_symbols(interface: &Interface) -> Vec<char> {
    interface.layout().rows().iter().flat_map(|row| row.chars()).collect()
}

/// One line per grid row: the pattern character where something rendered,
/// `!` where rendering failed, `.` where the slot is empty.
fn draw_grid(interface: &Interface, rendered: &Rendered, symbols: &[char]) -> String {
    let dimensions = interface.dimensions();
    let failed: Vec<usize> = rendered.errors.iter().map(|e| e.slot).collect();
    let mut out = String::new();
    for row in 0..dimensions.rows {
        let line: Vec<String> = (0..dimensions.columns)
            .map(|column| {
                let slot = row * dimensions.columns + column;
                if failed.contains(&slot) {
                    "!".to_string()
                } else if rendered.get(slot).is_some() {
                    symbols.get(slot).copied().unwrap_or('?').to_string()
                } else {
                    ".".to_string()
                }
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

// ============================================================================
// click
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn cmd_click(
    reader: &InterfaceReader,
    file: &Path,
    slot: usize,
    kind: InteractionKind,
    aux: i32,
    args: &ViewerArgs,
    reason: CloseReason,
    json: bool,
) -> Result<(), CliError> {
    let interface = compile(reader, file)?;
    let slots = interface.dimensions().slots();
    if slot >= slots {
        return Err(CliError::args(format!(
            "slot {} is outside the {} grid ({} slots)",
            slot,
            interface.kind(),
            slots
        )));
    }

    let viewer = args.viewer();
    let open = interface.open(&viewer);
    let on_open = viewer.drain();
    let clicked = open.click(slot, kind, aux);
    let on_click = viewer.drain();
    open.close(reason);
    let on_close = viewer.drain();

    tracing::info!(slot, kind = %kind, clicked, "clicked");

    if json {
        return print_json(&json!({
            "slot": slot,
            "kind": kind,
            "clicked": clicked,
            "effects": {
                "open": on_open,
                "click": on_click,
                "close": on_close,
            },
        }));
    }

    if !clicked {
        eprintln!("note: slot {} has no click behavior", slot);
    }
    let all: Vec<&Effect> = on_open.iter().chain(&on_click).chain(&on_close).collect();
    for effect in all {
        println!("{}", effect);
    }
    Ok(())
}
