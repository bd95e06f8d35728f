//! Error adapter for converting AstrolabeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Malformed documents that carry a parser location are rendered with the
//! document source and a label under the offending character. Every other
//! error is rendered as a plain diagnostic with a stable code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use astrolabe::{AstrolabeError, LoadError, Location};

/// Adapter for a malformed document with a known parse location.
pub struct MalformedAdapter<'a> {
    err: &'a LoadError,
    message: &'a str,
    location: Location,
    src: &'a str,
}

impl<'a> MalformedAdapter<'a> {
    /// Create an adapter, or `None` when the error is not a located
    /// [`LoadError::Malformed`].
    pub fn new(err: &'a LoadError) -> Option<Self> {
        match err {
            LoadError::Malformed {
                message,
                location: Some(location),
                src,
                ..
            } => Some(Self {
                err,
                message,
                location: *location,
                src,
            }),
            _ => None,
        }
    }

    fn span(&self) -> SourceSpan {
        location_to_span(self.src, self.location)
    }
}

impl fmt::Debug for MalformedAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MalformedAdapter")
            .field("path", self.err.path())
            .field("location", &self.location)
            .finish()
    }
}

impl fmt::Display for MalformedAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for MalformedAdapter<'_> {}

impl MietteDiagnostic for MalformedAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("astrolabe::load::malformed"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(Some(self.message.to_string()), self.span());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`AstrolabeError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a AstrolabeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            AstrolabeError::Io(_) => "astrolabe::io",
            AstrolabeError::Load(LoadError::NotFound { .. }) => "astrolabe::load::not_found",
            AstrolabeError::Load(LoadError::Malformed { .. }) => "astrolabe::load::malformed",
            AstrolabeError::Load(LoadError::Read { .. }) => "astrolabe::load::unreadable",
            AstrolabeError::Config(_) => "astrolabe::config",
            AstrolabeError::Layout(_) => "astrolabe::layout",
            AstrolabeError::Scene(_) => "astrolabe::scene",
            AstrolabeError::Export(_) => "astrolabe::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            AstrolabeError::Load(LoadError::NotFound { .. }) => Some(Box::new(
                "pass the document with -i/--input or run from the directory that contains it",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A malformed document with a labeled source span.
    Malformed(MalformedAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl Reportable<'_> {
    /// Stable diagnostic code of this error.
    pub fn code_string(&self) -> Option<String> {
        self.code().map(|code| code.to_string())
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Malformed(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Malformed(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Malformed(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Malformed(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Malformed(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Malformed(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a 1-based line and column into a one-character [`SourceSpan`].
///
/// Out-of-range locations are clamped to the end of the source, and offsets
/// inside a multi-byte character move back to its first byte.
fn location_to_span(src: &str, location: Location) -> SourceSpan {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(location.line.saturating_sub(1))
        .map(str::len)
        .sum();

    let mut offset = (line_start + location.column.saturating_sub(1)).min(src.len());
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }

    let len = src[offset..].chars().next().map_or(0, char::len_utf8);
    SourceSpan::new(offset.into(), len)
}

/// Convert an [`AstrolabeError`] into a list of reportable errors.
///
/// A located malformed document yields a source-annotated diagnostic; every
/// other error yields a single plain one.
pub fn to_reportables(err: &AstrolabeError) -> Vec<Reportable<'_>> {
    match err {
        AstrolabeError::Load(load_err) => match MalformedAdapter::new(load_err) {
            Some(adapter) => vec![Reportable::Malformed(adapter)],
            None => vec![Reportable::Error(ErrorAdapter(err))],
        },
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use astrolabe::scene::SceneError;

    use super::*;

    fn malformed(src: &str, location: Option<Location>) -> AstrolabeError {
        LoadError::Malformed {
            path: PathBuf::from("dfa.json"),
            message: "expected `,` or `}`".to_string(),
            location,
            src: src.to_string(),
        }
        .into()
    }

    #[test]
    fn test_located_malformed_has_label() {
        let err = malformed(
            "{\n  \"states\": []\n  \"start_state\": 0\n}",
            Some(Location { line: 3, column: 3 }),
        );

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        let reportable = &reportables[0];
        assert!(matches!(reportable, Reportable::Malformed(_)));
        assert_eq!(
            reportable.code_string().as_deref(),
            Some("astrolabe::load::malformed")
        );

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].label(), Some("expected `,` or `}`"));
        // Lines 1 and 2 are 2 and 15 bytes long.
        assert_eq!(labels[0].offset(), 2 + 15 + 2);
        assert_eq!(labels[0].len(), 1);
    }

    #[test]
    fn test_unlocated_malformed_is_plain() {
        let err = malformed("{}", None);
        let reportables = to_reportables(&err);

        assert!(matches!(reportables[0], Reportable::Error(_)));
        assert_eq!(
            reportables[0].code_string().as_deref(),
            Some("astrolabe::load::malformed")
        );
        assert!(reportables[0].labels().is_none());
    }

    #[test]
    fn test_error_codes() {
        let cases: Vec<(AstrolabeError, &str)> = vec![
            (
                LoadError::NotFound {
                    path: PathBuf::from("dfa.json"),
                }
                .into(),
                "astrolabe::load::not_found",
            ),
            (
                AstrolabeError::Config("bad colour".to_string()),
                "astrolabe::config",
            ),
            (SceneError::NoStates.into(), "astrolabe::scene"),
            (
                std::io::Error::other("disk full").into(),
                "astrolabe::io",
            ),
        ];

        for (err, code) in &cases {
            let reportables = to_reportables(err);
            assert_eq!(reportables[0].code_string().as_deref(), Some(*code));
        }
    }

    #[test]
    fn test_not_found_has_help() {
        let err: AstrolabeError = LoadError::NotFound {
            path: PathBuf::from("syntax_tree.json"),
        }
        .into();
        let reportables = to_reportables(&err);

        assert!(reportables[0].help().is_some());
        assert_eq!(
            reportables[0].to_string(),
            "document not found: syntax_tree.json"
        );
    }

    #[test]
    fn test_span_is_clamped_and_char_aligned() {
        let src = "{\"a\": \"é\"";

        let past_end = location_to_span(src, Location { line: 9, column: 1 });
        assert_eq!(past_end.offset(), src.len());
        assert_eq!(past_end.len(), 0);

        // Column 9 is the second byte of 'é'.
        let inside = location_to_span(src, Location { line: 1, column: 9 });
        assert_eq!(inside.offset(), 7);
        assert_eq!(inside.len(), 2);
    }

    #[test]
    fn test_rich_report_renders() {
        let err = malformed("{\n  \"states\": [\n", Some(Location { line: 2, column: 3 }));
        let reporter = miette::GraphicalReportHandler::new();

        for reportable in to_reportables(&err) {
            let mut writer = String::new();
            reporter.render_report(&mut writer, &reportable).unwrap();
            assert!(writer.contains("astrolabe::load::malformed"));
        }
    }
}
