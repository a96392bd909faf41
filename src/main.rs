use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use inline_css::config::{ClassAttribute, Config};
use inline_css::document::{Document, Position, TextSource};
use inline_css::error::{RewriteError, StyleError};
use inline_css::rewrite::{self, Clipboard, Outcome, Prompt, RewriteMode, Rewriter, Selection};
use inline_css::{convert_to_css, tag, Extraction, StyleSource};

#[derive(Parser)]
#[command(name = "inline-css", version)]
#[command(about = "Extract inline HTML/JSX styles into CSS")]
struct Cli {
    /// Log rewrite decisions (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./.inline-css.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the style declared in a file (or stdin) to CSS
    Parse {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Print the property mapping as JSON instead of CSS
        #[arg(long)]
        json: bool,
    },

    /// Move the inline style of the tag at a line out of the document
    Extract {
        /// Markup file to rewrite
        file: PathBuf,

        /// 1-based line inside the tag
        #[arg(long)]
        line: usize,

        /// Last selected line for --mode copy (default: --line)
        #[arg(long)]
        end_line: Option<usize>,

        #[arg(long, value_enum, default_value_t = ModeArg::Remove)]
        mode: ModeArg,

        /// Class name for --mode class (prompts on stdin when omitted)
        #[arg(long = "class")]
        class_name: Option<String>,

        /// Attribute inserted when the tag has no class yet
        #[arg(long, value_enum)]
        attr: Option<AttrArg>,

        /// Write the rewritten document back to FILE
        #[arg(long, conflicts_with = "o")]
        in_place: bool,

        /// Write the rewritten document to this path
        #[arg(short)]
        o: Option<PathBuf>,

        /// Write the CSS here instead of stdout
        #[arg(long)]
        clipboard: Option<PathBuf>,
    },

    /// List the code actions available for the tag at a line
    Actions {
        file: PathBuf,

        /// 1-based line inside the tag
        #[arg(long)]
        line: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Copy the selected lines' styles as CSS, leave the file alone
    Copy,
    /// Remove the style attribute and copy it as an anonymous rule
    Remove,
    /// Replace the style attribute with a class and copy the class rule
    Class,
}

impl From<ModeArg> for RewriteMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Copy => RewriteMode::Copy,
            ModeArg::Remove => RewriteMode::Remove,
            ModeArg::Class => RewriteMode::Class,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AttrArg {
    Class,
    ClassName,
}

/// CSS destination: stdout, or a file standing in for the system clipboard.
enum OutputClipboard {
    Stdout,
    File(PathBuf),
}

impl Clipboard for OutputClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), RewriteError> {
        match self {
            OutputClipboard::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{text}").map_err(|e| RewriteError::Clipboard(e.to_string()))
            }
            OutputClipboard::File(path) => fs::write(&*path, text)
                .map_err(|e| RewriteError::Clipboard(format!("{}: {e}", path.display()))),
        }
    }
}

/// Class name from `--class`, or asked for interactively on stdin.
enum ClassPrompt {
    Fixed(String),
    Stdin,
}

impl Prompt for ClassPrompt {
    fn input(&mut self, message: &str, default: &str) -> Option<String> {
        match self {
            ClassPrompt::Fixed(name) => Some(name.clone()),
            ClassPrompt::Stdin => {
                if default.is_empty() {
                    eprint!("{message}: ");
                } else {
                    eprint!("{message} [{default}]: ");
                }
                let mut line = String::new();
                match io::stdin().lock().read_line(&mut line) {
                    Ok(0) | Err(_) => None,
                    Ok(_) if line.trim().is_empty() => Some(default.to_string()),
                    Ok(_) => Some(line.trim().to_string()),
                }
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // --verbose forces debug, otherwise RUST_LOG or warnings only
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(Path::new("."))?,
    };

    match cli.command {
        Commands::Parse { file, json } => {
            let input = read_input(file.as_deref())?;
            let source = StyleSource::detect(&input);
            let mapping = match source.parse() {
                Extraction::Parsed(mapping) => mapping,
                Extraction::Malformed(e) => {
                    print_warning(&e, source.text());
                    Default::default()
                }
                Extraction::Absent => {
                    eprintln!("warning: no inline style found");
                    Default::default()
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&mapping)?);
            } else {
                let css = convert_to_css(&mapping);
                if !css.is_empty() {
                    println!("{css}");
                }
            }
        }

        Commands::Extract {
            file,
            line,
            end_line,
            mode,
            class_name,
            attr,
            in_place,
            o,
            clipboard,
        } => {
            if let Some(attr) = attr {
                config.class_attribute = match attr {
                    AttrArg::Class => ClassAttribute::Class,
                    AttrArg::ClassName => ClassAttribute::ClassName,
                };
            }

            let text = fs::read_to_string(&file)
                .with_context(|| format!("cannot read '{}'", file.display()))?;
            let mut doc = Document::new(&text);
            let selection = line_selection(&doc, line, end_line.unwrap_or(line))?;

            let mut clipboard = match clipboard {
                Some(path) => OutputClipboard::File(path),
                None => OutputClipboard::Stdout,
            };
            let mut prompt = match class_name {
                Some(name) => ClassPrompt::Fixed(name),
                None => ClassPrompt::Stdin,
            };

            let outcome = Rewriter::new(&config, &mut clipboard, &mut prompt).run(
                mode.into(),
                &mut doc,
                selection,
            )?;

            match outcome {
                Outcome::Copied { .. } => {}
                Outcome::Rewritten { class_name, .. } => {
                    let target = if in_place { Some(file.clone()) } else { o };
                    if let Some(path) = target {
                        fs::write(&path, doc.text())
                            .with_context(|| format!("cannot write '{}'", path.display()))?;
                        eprintln!("wrote {}", path.display());
                    }
                    if let Some(name) = class_name {
                        eprintln!("extracted styles into .{name}");
                    }
                }
                Outcome::Malformed(e) => {
                    eprintln!("warning: inline style could not be parsed: {e}");
                    process::exit(2);
                }
                Outcome::NoSelection => bail!("no text selected"),
                Outcome::NoTag => bail!("no tag found at line {line}"),
                Outcome::NoStyle => {
                    eprintln!("warning: no inline style found in this tag");
                    process::exit(2);
                }
                Outcome::Cancelled => eprintln!("cancelled"),
            }
        }

        Commands::Actions { file, line } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("cannot read '{}'", file.display()))?;
            let doc = Document::new(&text);
            let index = line.checked_sub(1).context("lines are 1-based")?;
            let Some(span) = tag::find_tag_range(&doc, index) else {
                bail!("no tag found at line {line}");
            };
            let tag_text = doc.text_in(span).unwrap_or_default();
            for action in rewrite::available_actions(&tag_text) {
                println!("{}", action.title());
            }
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("cannot read stdin")?;
            Ok(input)
        }
    }
}

/// Select whole lines `first..=last` (1-based), the cursor on `first`.
fn line_selection(doc: &Document, first: usize, last: usize) -> Result<Selection> {
    let count = doc.line_count();
    if first == 0 || last < first || last > count {
        bail!("line range {first}..{last} is outside the document ({count} lines)");
    }
    let end_len = doc.line(last - 1).map_or(0, |l| l.chars().count());
    Ok(Selection {
        anchor: Position::new(last - 1, end_len),
        active: Position::new(first - 1, 0),
    })
}

fn print_warning(e: &StyleError, source: &str) {
    eprintln!("warning: ignoring malformed style object: {e}");

    if let Some(span) = &e.span {
        if span.start <= source.len() {
            let line_num = source[..span.start].chars().filter(|c| *c == '\n').count() + 1;
            let line_start = source[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
            let line_end = source[span.start..]
                .find('\n')
                .map(|i| span.start + i)
                .unwrap_or(source.len());
            let line = &source[line_start..line_end];
            let col = source[line_start..span.start].chars().count();

            eprintln!();
            eprintln!("  {line_num} | {line}");
            eprintln!(
                "  {} | {}^",
                " ".repeat(line_num.to_string().len()),
                " ".repeat(col)
            );
        }
    }
}
