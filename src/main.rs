//! annodoc: generate a Markdown API document from pre-parsed source
//! elements.
//!
//! - **stdin mode**: `annodoc < elements.json` prints the document
//! - **file mode**: `annodoc -o api.md -p package.json elements/*.json`

use annodoc::input::SourceFile;
use annodoc::{load, logger};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "annodoc",
    about = "Render annotated source comments into a single Markdown API document"
)]
struct Cli {
    /// Element-list JSON files (glob patterns supported). If omitted, reads from stdin.
    inputs: Vec<String>,

    /// Output Markdown file. Prints to stdout when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Package JSON with `exports` and `describe`. Restricts output to the exported API.
    #[arg(short = 'p', long)]
    package: Option<PathBuf>,

    /// Debug logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet);

    let files = read_sources(&cli.inputs)?;
    let package = cli
        .package
        .as_deref()
        .map(load::load_package)
        .transpose()
        .context("failed to load package description")?;

    let document = annodoc::render_document(&files, package.as_ref());
    write_output(cli.output.as_deref(), &document)
}

/// Gather source files from the inputs in order, or from stdin.
fn read_sources(inputs: &[String]) -> Result<Vec<SourceFile>> {
    if inputs.is_empty() {
        let mut json = String::new();
        io::stdin()
            .read_to_string(&mut json)
            .context("failed to read stdin")?;
        return load::parse_source_files(&json).context("invalid element list on stdin");
    }

    let mut files = Vec::new();
    for path in load::expand_inputs(inputs)? {
        files.extend(load::load_source_files(&path)?);
    }
    Ok(files)
}

/// One write of the finished document, to the output file or stdout.
fn write_output(output: Option<&Path>, document: &str) -> Result<()> {
    match output {
        Some(path) => load::write_document(path, document)?,
        None => io::stdout()
            .write_all(document.as_bytes())
            .context("failed to write stdout")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdin_mode_by_default() {
        let cli = Cli::try_parse_from(["annodoc"]).unwrap();
        assert!(cli.inputs.is_empty());
        assert!(cli.output.is_none());
        assert!(cli.package.is_none());
    }

    #[test]
    fn file_mode_args() {
        let cli =
            Cli::try_parse_from(["annodoc", "-o", "api.md", "-p", "package.json", "a.json", "b/*.json"])
                .unwrap();
        assert_eq!(cli.inputs, vec!["a.json", "b/*.json"]);
        assert_eq!(cli.output, Some(PathBuf::from("api.md")));
        assert_eq!(cli.package, Some(PathBuf::from("package.json")));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["annodoc", "-v", "-q"]).is_err());
    }
}
