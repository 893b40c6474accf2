use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the CLI from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdcn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to mainland-Chinese styled Word documents")
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
                .help("Output file path")
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
                .help("Write only the HTML artifact")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdcn.toml configuration file")
                .value_hint(ValueHint::FilePath),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mdcn", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mdcn", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mdcn", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
