//! Document loading and rendering for jsxtree.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Loading** - read a markup file, tokenize and parse it
//! - **Rendering** - materialize the parsed document into a visual
//!   [`DomTree`], resolving embedded expressions through a caller-supplied
//!   [`ExpressionResolver`]
//!
//! # Not Supported
//!
//! - Network loading
//! - Evaluating expressions (resolvers decide what `{...}` means)
//! - Re-rendering or diffing an existing tree

pub mod renderer;

pub use jsxtree_dom as dom;
pub use jsxtree_parser as parser;

pub use renderer::{RenderIssue, RenderedDocument, render_document};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jsxtree_dom::DomTree;
use jsxtree_parser::{Document, ExpressionResolver, Parser, Token, Tokenizer};
use thiserror::Error;

/// Tokenizer and parser switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on unrecognized characters instead of skipping them.
    pub strict: bool,
    /// Let a closing tag name differ from its opening tag.
    pub lenient_closing_tags: bool,
}

/// A loaded, parsed and rendered document.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Original markup source
    pub source: String,

    /// Source path, empty for documents parsed from a string
    pub source_path: String,

    /// Tokens (for debugging)
    pub tokens: Vec<Token>,

    /// Parsed document
    pub document: Document,

    /// Rendered visual tree
    pub tree: DomTree,

    /// Attributes the renderer could not apply
    pub issues: Vec<RenderIssue>,
}

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the file.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// The path that was read.
        path: PathBuf,
        /// The underlying IO error.
        source: io::Error,
    },

    /// The markup is malformed.
    #[error(transparent)]
    Parse(#[from] jsxtree_parser::Error),
}

impl LoadError {
    /// `"Io"` or the variant name of the tokenize/parse error.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "Io",
            Self::Parse(err) => err.kind(),
        }
    }
}

/// Read the markup source at `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read.
pub fn read_markup(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a document from a file path.
///
/// Reads the file with [`read_markup`], then tokenizes, parses and renders
/// it with [`render_markup`].
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Parse`] if the markup is malformed.
pub fn load_document(
    path: impl AsRef<Path>,
    options: ParseOptions,
    resolver: &dyn ExpressionResolver,
) -> Result<LoadedDocument, LoadError> {
    let path = path.as_ref();
    let source = read_markup(path)?;

    let mut doc = render_markup(&source, options, resolver)?;
    doc.source_path = path.display().to_string();
    Ok(doc)
}

/// Tokenize, parse and render a markup string.
///
/// # Errors
///
/// Returns the first tokenize or parse error.
pub fn render_markup(
    source: &str,
    options: ParseOptions,
    resolver: &dyn ExpressionResolver,
) -> Result<LoadedDocument, jsxtree_parser::Error> {
    let (tokens, document) = parse_markup_with(source, options)?;
    let RenderedDocument { tree, issues } = render_document(&document, resolver);

    Ok(LoadedDocument {
        source: source.to_string(),
        source_path: String::new(),
        tokens,
        document,
        tree,
        issues,
    })
}

/// Tokenize and parse `source` with the given options, keeping the tokens.
///
/// # Errors
///
/// Returns the first tokenize or parse error.
pub fn parse_markup_with(
    source: &str,
    options: ParseOptions,
) -> Result<(Vec<Token>, Document), jsxtree_parser::Error> {
    let mut tokenizer = Tokenizer::new(source);
    if options.strict {
        tokenizer = tokenizer.with_strict_mode();
    }
    tokenizer.run()?;
    let tokens = tokenizer.into_tokens();

    let mut parser = Parser::new(&tokens);
    if options.lenient_closing_tags {
        parser = parser.with_lenient_closing_tags();
    }
    let document = parser.run()?;

    Ok((tokens, document))
}
