//! jsxtree CLI
//!
//! Parses a JSX-style markup file (or string) and prints the resulting tree.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;
use jsxtree_dom::print_tree;
use jsxtree_parser::{Document, LiteralResolver, Token, print_document};
use jsxtree_render::{
    LoadError, LoadedDocument, ParseOptions, load_document, parse_markup_with, read_markup,
    render_markup,
};
use owo_colors::OwoColorize;

/// jsxtree: parse JSX-style markup into a tree
#[derive(Parser, Debug)]
#[command(name = "jsxtree")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of a file
    jsxtree demos/page.jsx

    # Parse inline markup and show the tokens too
    jsxtree -t --html '<ul><li>1</li></ul>'

    # Render the visual tree
    jsxtree -r demos/page.jsx

    # Machine-readable output
    jsxtree -j -t demos/page.jsx
"#)]
struct Cli {
    /// Path to a markup file
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<PathBuf>,

    /// Parse a markup string directly instead of a file
    #[arg(long, value_name = "MARKUP", conflicts_with = "path")]
    html: Option<String>,

    /// Also print the token stream
    #[arg(short, long)]
    tokens: bool,

    /// Print the document (and tokens, with -t) as JSON
    #[arg(short, long)]
    json: bool,

    /// Also render the visual tree and print it
    #[arg(short, long, conflicts_with = "json")]
    render: bool,

    /// Fail on unrecognized characters instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Accept closing tags whose name differs from the opening tag
    #[arg(long)]
    lenient_tags: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err
                .downcast_ref::<LoadError>()
                .map_or("Error", LoadError::kind);
            eprintln!("{} {err}", format!("error[{kind}]:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = ParseOptions {
        strict: cli.strict,
        lenient_closing_tags: cli.lenient_tags,
    };

    if cli.render {
        let doc = match (&cli.html, &cli.path) {
            (Some(markup), _) => {
                render_markup(markup, options, &LiteralResolver).map_err(LoadError::from)?
            }
            (None, Some(path)) => load_document(path, options, &LiteralResolver)?,
            (None, None) => bail!("no input: pass a FILE or --html"),
        };
        print_parsed(cli, &doc.tokens, &doc.document);
        print_rendered(&doc);
        return Ok(());
    }

    let source = match (&cli.html, &cli.path) {
        (Some(markup), _) => markup.clone(),
        (None, Some(path)) => read_markup(path)?,
        (None, None) => bail!("no input: pass a FILE or --html"),
    };
    let (tokens, document) = parse_markup_with(&source, options).map_err(LoadError::from)?;

    if cli.json {
        let output = if cli.tokens {
            serde_json::json!({ "tokens": tokens, "document": document })
        } else {
            serde_json::json!({ "document": document })
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_parsed(cli, &tokens, &document);
    Ok(())
}

fn print_parsed(cli: &Cli, tokens: &[Token], document: &Document) {
    if cli.tokens {
        println!("=== Tokens ===");
        print_tokens(tokens);
        println!();
    }

    println!("=== Tree ===");
    print_document(document);
}

fn print_rendered(doc: &LoadedDocument) {
    println!("\n=== Visual Tree ===");
    print_tree(&doc.tree, doc.tree.root(), 0);

    if !doc.issues.is_empty() {
        println!("\n=== Render Issues ===");
        for issue in &doc.issues {
            println!("  - {issue}");
        }
    }
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        let at = token.position.to_string();
        println!("{at:>6}  {token}");
    }
}
