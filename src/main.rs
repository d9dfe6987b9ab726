use anyhow::{Context, bail};
use clap::Parser;
use dialoguer::Confirm;
use srclocal::{
    Dictionary, load_dictionary_from_file, localize_source, process_directory,
    validate_file_extensions,
};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    /// Dictionary file (flat JSON object of source word -> target word).
    /// Usage: -t dict.json
    #[arg(short = 't', long = "dictionary")]
    dictionary: PathBuf,

    /// Single input file to localize. Without -o, the result goes to stdout.
    #[arg(short, long, conflicts_with = "directory")]
    input: Option<PathBuf>,

    /// Output path for single-file mode. Usage: -i in.js -o out.js
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// Directory to localize recursively, in place. If neither -i nor -d is
    /// given, the current directory (".") is taken.
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// File extension(s) to include, without a leading dot. If omitted, all
    /// files are included. Usage: -x js -x mjs
    #[arg(short = 'x', long = "extension")]
    file_extensions: Vec<String>,

    /// Directory name(s) to skip entirely while walking.
    /// Usage: --ignore-dir node_modules --ignore-dir .git
    #[arg(long = "ignore-dir")]
    ignored_dirs: Vec<String>,

    /// Dry run: report files that would change without modifying anything
    #[arg(long = "dry")]
    dry_run: bool,

    /// Fall back to case-insensitive dictionary matching, re-applying each
    /// word's capitalization pattern
    #[arg(long)]
    case_insensitive: bool,

    /// Skip the confirmation prompt before rewriting a directory in place
    #[arg(short = 'y', long)]
    yes: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("srclocal=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Arguments::parse();

    if !validate_file_extensions(&args.file_extensions) {
        bail!("file extensions cannot contain '*' and cannot start with '.'");
    }

    let dictionary = load_dictionary_from_file(&args.dictionary)
        .with_context(|| format!("loading dictionary {}", args.dictionary.display()))?
        .with_case_insensitive(args.case_insensitive);
    info!(entries = dictionary.len(), "dictionary loaded");

    match args.input.clone() {
        Some(input) => run_single_file(&args, &input, &dictionary),
        None => run_directory(&args, &dictionary),
    }
}

fn run_single_file(
    args: &Arguments,
    input: &std::path::Path,
    dictionary: &Dictionary,
) -> anyhow::Result<()> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let output = localize_source(&source, dictionary)
        .with_context(|| format!("localizing {}", input.display()))?;

    if args.dry_run {
        println!(
            "dry run: {} would {}",
            input.display(),
            if output == source { "be unchanged" } else { "change" }
        );
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        None => print!("{}", output),
    }
    Ok(())
}

fn run_directory(args: &Arguments, dictionary: &Dictionary) -> anyhow::Result<()> {
    let directory = args
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    if !args.dry_run && !args.yes {
        let prompt = format!(
            "Rewrite files under \"{}\" (extensions: {:?}) in place?",
            directory.display(),
            args.file_extensions
        );
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .wait_for_newline(true)
            .interact()
            .context("confirming user input")?;
        if !confirmed {
            return Ok(());
        }
    }

    let summary = process_directory(
        directory.as_path(),
        &args.file_extensions,
        &args.ignored_dirs,
        dictionary,
        args.dry_run,
    );

    println!("Files scanned:   {}", summary.files_scanned);
    println!("Files changed:   {}", summary.files_changed);
    println!("Files written:   {}", summary.files_written);
    println!("File errors:     {}", summary.files_errored);
    println!("Walk errors:     {}", summary.walk_errors);
    Ok(())
}
