//! Astrolabe - layout and rendering of regular-expression syntax trees and
//! finite automata.
//!
//! Two pipelines share the same shape: a JSON document is loaded and turned
//! into a validated model, the model is laid out, the layout becomes a
//! [`Scene`](draw::Scene) of draw directives, and the scene is exported as
//! SVG or PNG. Console reports are produced straight from the model.

pub mod config;
pub mod document;
pub mod export;
pub mod layout;
pub mod model;
pub mod report;
pub mod scene;

mod error;

pub use astrolabe_core::{color, draw, geometry, identifier};

pub use error::{AstrolabeError, LoadError, Location};

use std::{fs, path::Path};

use log::{debug, info};

use config::AppConfig;
use document::{AutomatonDocument, Loaded, SyntaxTreeDocument};
use draw::Scene;
use export::{Exporter, Format, raster::Png, svg::Svg};
use model::{Automaton, ModelError, SyntaxTree};
use scene::SceneStyle;

/// Entry point for loading, laying out and rendering documents.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use astrolabe::{Visualizer, config::AppConfig, export::Format};
///
/// let visualizer = Visualizer::new(AppConfig::default());
///
/// let automaton = visualizer
///     .load_automaton(Path::new("dfa.json"))
///     .expect("Failed to load");
/// print!("{}", astrolabe::report::automaton_report(&automaton));
///
/// let scene = visualizer
///     .automaton_scene(&automaton)
///     .expect("Failed to build scene");
/// let svg = visualizer
///     .render(&scene, Format::Svg)
///     .expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct Visualizer {
    config: AppConfig,
}

impl Visualizer {
    /// Create a new visualizer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load and validate a syntax-tree document.
    ///
    /// # Errors
    ///
    /// Returns [`AstrolabeError::Load`] if the document is missing, unreadable,
    /// not valid JSON, or structurally invalid (duplicate ids, values that are
    /// not one character).
    pub fn load_syntax_tree(&self, path: &Path) -> Result<SyntaxTree, AstrolabeError> {
        let Loaded { document, source } = document::load::<SyntaxTreeDocument>(path)?;
        let tree = SyntaxTree::from_document(document)
            .map_err(|err| malformed(path, err, source))?;

        info!(path:? = path, nodes = tree.len(); "Syntax tree loaded");
        Ok(tree)
    }

    /// Load and validate an automaton document.
    ///
    /// # Errors
    ///
    /// Returns [`AstrolabeError::Load`] if the document is missing, unreadable,
    /// not valid JSON, or references undeclared states.
    pub fn load_automaton(&self, path: &Path) -> Result<Automaton, AstrolabeError> {
        let Loaded { document, source } = document::load::<AutomatonDocument>(path)?;
        let automaton = Automaton::from_document(document)
            .map_err(|err| malformed(path, err, source))?;

        info!(
            path:? = path,
            states = automaton.len(),
            transitions = automaton.transitions().len();
            "Automaton loaded"
        );
        Ok(automaton)
    }

    /// Lay out a syntax tree and build its scene.
    ///
    /// # Errors
    ///
    /// Returns [`AstrolabeError::Scene`] for a tree without a root,
    /// [`AstrolabeError::Layout`] for invalid spacing and
    /// [`AstrolabeError::Config`] for invalid style settings.
    pub fn tree_scene(&self, tree: &SyntaxTree) -> Result<Scene, AstrolabeError> {
        let style = self.scene_style()?;
        let layout = layout::tree::layout_tree(tree, self.config.layout().tree())?;
        debug!(width = layout.width(); "Tree laid out");

        Ok(scene::tree_scene(tree, &layout, &style)?)
    }

    /// Lay out an automaton and build its scene.
    ///
    /// Layout never fails; see [`layout::automaton::layout_automaton`].
    ///
    /// # Errors
    ///
    /// Returns [`AstrolabeError::Scene`] for an automaton without states or
    /// without a start state, and [`AstrolabeError::Config`] for invalid style
    /// settings.
    pub fn automaton_scene(&self, automaton: &Automaton) -> Result<Scene, AstrolabeError> {
        let style = self.scene_style()?;
        let positions =
            layout::automaton::layout_automaton(automaton, self.config.layout().automaton());
        debug!(states = positions.len(); "Automaton laid out");

        Ok(scene::automaton_scene(automaton, &positions, &style)?)
    }

    /// Encode a scene in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`AstrolabeError::Export`] if rendering or rasterization fails.
    pub fn render(&self, scene: &Scene, format: Format) -> Result<Vec<u8>, AstrolabeError> {
        let bytes = match format {
            Format::Svg => Svg::new().export_scene(scene)?,
            Format::Png => Png::new(self.config.export().scale()).export_scene(scene)?,
        };
        Ok(bytes)
    }

    /// Encode a scene and write it to `path`, picking the format from the
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns [`AstrolabeError::Export`] if encoding fails and
    /// [`AstrolabeError::Io`] if the file cannot be written.
    pub fn write(&self, scene: &Scene, path: &Path) -> Result<Format, AstrolabeError> {
        let format = Format::from_path(path);
        let bytes = self.render(scene, format)?;
        fs::write(path, &bytes)?;

        info!(path:? = path, format:? = format, bytes = bytes.len(); "Image written");
        Ok(format)
    }

    fn scene_style(&self) -> Result<SceneStyle, AstrolabeError> {
        SceneStyle::from_config(self.config.style()).map_err(AstrolabeError::Config)
    }
}

fn malformed(path: &Path, err: ModelError, src: String) -> LoadError {
    LoadError::Malformed {
        path: path.to_path_buf(),
        message: err.to_string(),
        location: None,
        src,
    }
}
