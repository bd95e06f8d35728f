//! On-disk document formats and loading.
//!
//! Both documents are JSON. Their shapes mirror what the upstream regex
//! toolchain exports; the types here are the raw, unvalidated form. Structural
//! rules (unique ids, resolvable references) are enforced by the
//! [`model`](crate::model) builders.

use std::{fs, io, path::Path};

use log::{debug, info};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use astrolabe_core::identifier::{NodeId, StateId};

use crate::error::{LoadError, Location};

/// A syntax tree as exported upstream.
///
/// Every field is optional: a missing root is reported when drawing, and
/// missing display strings print as `N/A`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyntaxTreeDocument {
    #[serde(default)]
    pub root: Option<RawTreeNode>,
    #[serde(default)]
    pub original_regex: Option<String>,
    #[serde(default)]
    pub regex_with_concat: Option<String>,
    #[serde(default)]
    pub postfix: Option<String>,
}

/// A recursive syntax-tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTreeNode {
    pub id: NodeId,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<RawTreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<RawTreeNode>>,
}

impl RawTreeNode {
    /// Creates a leaf node.
    pub fn leaf(id: u32, value: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            value: value.into(),
            left: None,
            right: None,
        }
    }

    /// Creates an inner node with the given children.
    pub fn branch(
        id: u32,
        value: impl Into<String>,
        left: Option<RawTreeNode>,
        right: Option<RawTreeNode>,
    ) -> Self {
        Self {
            id: NodeId::new(id),
            value: value.into(),
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }
}

/// A finite automaton as exported upstream.
///
/// The same schema carries DFAs, minimized DFAs and NFAs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    #[serde(default)]
    pub states: Vec<RawState>,
    #[serde(default)]
    pub start_state: Option<StateId>,
    #[serde(default)]
    pub transitions: Vec<RawTransition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawState {
    pub id: StateId,
    #[serde(default)]
    pub accepting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransition {
    pub from: StateId,
    pub to: StateId,
    pub symbol: String,
}

impl RawTransition {
    pub fn new(from: u32, symbol: impl Into<String>, to: u32) -> Self {
        Self {
            from: StateId::new(from),
            to: StateId::new(to),
            symbol: symbol.into(),
        }
    }
}

/// A parsed document together with the text it was parsed from.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub document: T,
    pub source: String,
}

/// Reads and parses the JSON document at `path`.
///
/// # Errors
///
/// - [`LoadError::NotFound`] if nothing exists at `path`
/// - [`LoadError::Malformed`] if the file is not UTF-8 or not valid JSON for `T`
/// - [`LoadError::Read`] for any other I/O failure
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>, LoadError> {
    info!(path:? = path; "Loading document");

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                message: "document is not valid UTF-8".to_string(),
                location: None,
                src: String::new(),
            });
        }
        Err(source) => {
            return Err(LoadError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let document = parse(&source).map_err(|(message, location)| LoadError::Malformed {
        path: path.to_path_buf(),
        message,
        location,
        src: source.clone(),
    })?;

    debug!(path:? = path, bytes = source.len(); "Document parsed");
    Ok(Loaded { document, source })
}

/// Parses `source` as `T`, reporting the JSON error position when known.
///
/// Nesting depth is not limited: syntax trees of long concatenations are
/// deep chains, and the stack grows on demand while they are read.
pub fn parse<T: DeserializeOwned>(source: &str) -> Result<T, (String, Option<Location>)> {
    let mut deserializer = serde_json::Deserializer::from_str(source);
    deserializer.disable_recursion_limit();

    let parsed = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .and_then(|value| deserializer.end().map(|()| value));

    parsed.map_err(|err| {
        let location = (err.line() > 0).then(|| Location {
            line: err.line(),
            column: err.column(),
        });
        (err.to_string(), location)
    })
}
