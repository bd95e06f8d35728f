//! CLI logic for the Astrolabe visualizer.
//!
//! Each subcommand runs one pipeline: the document is loaded, its report is
//! printed to stdout, and the drawing is written to the output path.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::path::Path;

use log::{info, warn};

use astrolabe::{AstrolabeError, Visualizer, draw::Scene, report};

/// Run the Astrolabe CLI application
///
/// A document without anything to draw (no root, no states, no start state)
/// is not an error: its report is printed, followed by an `Error:` line, and
/// no image is written.
///
/// # Errors
///
/// Returns `AstrolabeError` for:
/// - Configuration loading errors
/// - Missing, unreadable or malformed documents
/// - Layout errors
/// - Export and file I/O errors
pub fn run(args: &Args) -> Result<(), AstrolabeError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let visualizer = Visualizer::new(app_config);

    match &args.command {
        Command::Tree { input, output } => run_tree(&visualizer, input, output),
        Command::Dfa { input, output } => run_dfa(&visualizer, input, output),
        Command::All => {
            run_tree(
                &visualizer,
                Path::new(args::DEFAULT_TREE_INPUT),
                Path::new(args::DEFAULT_TREE_OUTPUT),
            )?;
            run_dfa(
                &visualizer,
                Path::new(args::DEFAULT_DFA_INPUT),
                Path::new(args::DEFAULT_DFA_OUTPUT),
            )
        }
    }
}

fn run_tree(visualizer: &Visualizer, input: &Path, output: &Path) -> Result<(), AstrolabeError> {
    info!(input:? = input, output:? = output; "Processing syntax tree");

    let tree = visualizer.load_syntax_tree(input)?;
    println!();
    print!("{}", report::tree_report(&tree));

    let scene = visualizer.tree_scene(&tree);
    write_scene(visualizer, scene, output, "Syntax tree")
}

fn run_dfa(visualizer: &Visualizer, input: &Path, output: &Path) -> Result<(), AstrolabeError> {
    info!(input:? = input, output:? = output; "Processing automaton");

    let automaton = visualizer.load_automaton(input)?;
    println!();
    print!("{}", report::automaton_report(&automaton));

    let scene = visualizer.automaton_scene(&automaton);
    write_scene(visualizer, scene, output, "DFA")
}

/// Writes the scene, or reports a degenerate document and skips the image.
fn write_scene(
    visualizer: &Visualizer,
    scene: Result<Scene, AstrolabeError>,
    output: &Path,
    name: &str,
) -> Result<(), AstrolabeError> {
    let scene = match scene {
        Ok(scene) => scene,
        Err(AstrolabeError::Scene(err)) => {
            warn!(err:err; "Nothing to draw, skipping image");
            println!("Error: {err}");
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    visualizer.write(&scene, output)?;
    println!("{name} visualization saved as '{}'", output.display());
    Ok(())
}
