use clap::{Args, Parser, Subcommand};
use json2css_encoder::{EncodeOptions, Encoder};
use json2css_tree::{Decoder, Registry};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "json2css")]
#[command(about = "Encode stylesheet JSON as CSS")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a .json stylesheet to a .css file
    Build {
        /// Input .json file
        path: String,

        /// Output file (defaults to <stem>.css next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        encode: EncodeArgs,
    },

    /// Encode a .json stylesheet and print the CSS to stdout
    Print {
        /// Input .json file
        path: String,

        #[command(flatten)]
        encode: EncodeArgs,
    },

    /// Check a .json stylesheet for errors without writing output
    Check {
        /// Input .json file
        path: String,

        #[command(flatten)]
        encode: EncodeArgs,
    },
}

#[derive(Args)]
struct EncodeArgs {
    /// Reject rulesets that have no selectors
    #[arg(long)]
    strict: bool,

    /// Maximum nesting of :not() and at-rule bodies
    #[arg(long, default_value_t = EncodeOptions::default().max_depth)]
    max_depth: usize,
}

impl EncodeArgs {
    fn options(&self) -> EncodeOptions {
        EncodeOptions {
            require_selectors: self.strict,
            max_depth: self.max_depth,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            path,
            output,
            encode,
        } => cmd_build(&path, output, &encode),
        Command::Print { path, encode } => cmd_print(&path, &encode),
        Command::Check { path, encode } => cmd_check(&path, &encode),
    }
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Decode JSON source and encode it as CSS.
fn compile(source: &str, options: EncodeOptions) -> Result<String, String> {
    let registry = Registry::standard();
    let statements = Decoder::new(&registry)
        .decode_str(source)
        .map_err(|e| format!("Decode error: {e}"))?;
    log::debug!("decoded {} top-level statement(s)", statements.len());

    Encoder::new(registry)
        .with_options(options)
        .encode_to_string(&statements)
        .map_err(|e| format!("Encode error: {e}"))
}

fn compile_or_exit(path: &str, encode: &EncodeArgs) -> String {
    let source = read_source(path);
    match compile(&source, encode.options()) {
        Ok(css) => css,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// `<dir>/<stem>.css` for an input path.
fn default_output(path: &str) -> PathBuf {
    let p = Path::new(path);
    let stem = p.file_stem().map(|s| s.to_os_string()).unwrap_or_else(|| "out".into());
    let dir = p.parent().unwrap_or(Path::new("."));
    dir.join(stem).with_extension("css")
}

fn cmd_build(path: &str, output: Option<PathBuf>, encode: &EncodeArgs) {
    let css = compile_or_exit(path, encode);
    let css_path = output.unwrap_or_else(|| default_output(path));

    if let Err(e) = std::fs::write(&css_path, &css) {
        eprintln!("Error writing {}: {e}", css_path.display());
        std::process::exit(1);
    }

    log::info!("wrote {} byte(s)", css.len());
    eprintln!("Built: {}", css_path.display());
}

fn cmd_print(path: &str, encode: &EncodeArgs) {
    let css = compile_or_exit(path, encode);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(css.as_bytes()).and_then(|()| stdout.flush()) {
        eprintln!("Error writing to stdout: {e}");
        std::process::exit(1);
    }
}

fn cmd_check(path: &str, encode: &EncodeArgs) {
    compile_or_exit(path, encode);
    eprintln!("OK: {path}");
}
