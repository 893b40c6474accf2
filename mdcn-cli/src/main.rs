// Command-line interface for mdcn
//
// This binary converts Markdown files into Word documents (and optionally
// the intermediate HTML) styled to the mainland-Chinese office convention.
//
// The conversion itself lives in the mdcn-convert crate, which is a pure
// library; everything that touches the shell — reading the source file,
// writing artifacts, printing confirmations, exit codes — happens here.
//
// Usage:
//  mdcn <input.md> [output] [--html] [--only-html] [--config <path>]
//
// With no output path, the artifact lands next to the input with the
// extension swapped (.docx, or .html under --only-html). Defaults for the
// font, margins and page numbering come from the embedded configuration,
// overridable via an mdcn.toml in the working directory or --config.

use clap::{Arg, ArgAction, Command, ValueHint};
use mdcn_config::{Loader, MdcnConfig};
use mdcn_convert::{markdown_to_all, markdown_to_html_with_options, ConversionOptions};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

fn build_cli() -> Command {
    Command::new("mdcn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to mainland-Chinese styled Word documents")
        .long_about(
            "mdcn converts Markdown files into Word documents styled to the\n\
            mainland-Chinese office convention: headings as bold inline text,\n\
            paragraphs as indented blocks, unordered lists renumbered, SimSun\n\
            typography and 1-inch margins.\n\n\
            Examples:\n  \
            mdcn input.md                     # Write input.docx\n  \
            mdcn input.md output.docx         # Choose the output path\n  \
            mdcn input.md --html              # Also write input.html\n  \
            mdcn input.md --only-html         # Write only input.html",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to the Markdown file")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .help("Output file path (defaults to the input name with the target extension)")
                .index(2)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help("Also write the intermediate HTML next to the Word document")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("only-html")
                .long("only-html")
                .help("Write only the HTML artifact (default extension becomes .html)")
                .action(ArgAction::SetTrue)
                .conflicts_with("html"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdcn.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
}

fn main() {
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) if e.kind() == clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            // The usage surface goes to stdout, like the rest of the help.
            print!("{e}");
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let output = matches.get_one::<String>("output").map(|s| s.as_str());
    let emit_html = matches.get_flag("html");
    let only_html = matches.get_flag("only-html");

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    handle_convert_command(input, output, emit_html, only_html, &config);
}

fn handle_convert_command(
    input: &str,
    output: Option<&str>,
    emit_html: bool,
    only_html: bool,
    config: &MdcnConfig,
) {
    let input_path = Path::new(input);
    if !input_path.exists() {
        eprintln!("Error: cannot find file '{input}'");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input_path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let mut options: ConversionOptions = config.into();
    options.base_url = base_url_for(input_path);

    let emit_html = emit_html || config.output.emit_html;
    let extension = if only_html { "html" } else { "docx" };
    let output_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(input_path, extension));

    if only_html {
        let html = markdown_to_html_with_options(&source, &options).unwrap_or_else(|e| {
            eprintln!("Conversion error: {e}");
            std::process::exit(1);
        });
        write_artifact(&output_path, html.as_bytes());
        println!("HTML saved to \"{}\"", output_path.display());
        return;
    }

    let artifacts = markdown_to_all(&source, &options).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });

    if emit_html {
        let html_path = output_path.with_extension("html");
        write_artifact(&html_path, artifacts.html.as_bytes());
        println!("HTML saved to \"{}\"", html_path.display());
    }

    write_artifact(&output_path, &artifacts.docx);
    println!("Word document saved to \"{}\"", output_path.display());
}

/// Default output path: the input path with the target extension.
fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

/// Base URL for resolving relative references during CSS inlining: the
/// directory of the input file, as a file:// URL.
fn base_url_for(input: &Path) -> Option<Url> {
    let dir = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().ok()?,
    };
    let dir = dir.canonicalize().ok()?;
    Url::from_directory_path(dir).ok()
}

fn write_artifact(path: &Path, bytes: &[u8]) {
    fs::write(path, bytes).unwrap_or_else(|e| {
        eprintln!("Error writing file '{}': {e}", path.display());
        std::process::exit(1);
    });
}

fn load_cli_config(explicit_path: Option<&str>) -> MdcnConfig {
    let loader = Loader::new().with_optional_file("mdcn.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
