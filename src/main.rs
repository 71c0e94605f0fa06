//! ifs-turtle CLI - derive L-system fractals and write them as SVG or JSON.
//!
//! With a config file argument the rules come from the file; without one they
//! are prompted interactively. Window size and iteration count are always
//! session input (flags or prompts), never part of the file.

use clap::{Parser, ValueEnum};
use ifs_turtle::{
    Bounds, IfsConfig, PathCanvas, RuleSet, TurtleInterpreter, Viewport, derive, load_config,
    write_json, write_svg,
};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

/// Window size used in non-interactive runs when `--size` is absent.
const DEFAULT_WINDOW_SIZE: u32 = 800;

/// Fractal curves from L-system rewriting rules.
///
/// Each round derives the axiom for a requested number of iterations,
/// interprets the final generation as turtle motion and writes the drawing
/// into the output directory. Entering 0 iterations ends the session.
#[derive(Parser)]
#[command(name = "ifs-turtle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file; ".txt" is appended when the bare path does not exist
    config: Option<PathBuf>,

    /// Directory output files are written into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "svg")]
    format: Format,

    /// Window size in pixels (prompted when absent)
    #[arg(short, long)]
    size: Option<u32>,

    /// Render this iteration count once and exit instead of prompting
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Polylines projected through the window bounds
    Svg,
    /// The recorded drawing in world coordinates
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(!cli.no_color)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut rl = DefaultEditor::new()?;

    let (rules, config, stem) = match &cli.config {
        Some(path) => {
            let (rules, config) = match load_config(path) {
                Ok(loaded) => loaded,
                Err(err) => {
                    eprintln!("{err}");
                    process::exit(1);
                }
            };
            info!("Loaded {} rules from {}", rules.len(), path.display());
            (rules, config, file_stem(path))
        }
        None => {
            let Some((rules, config)) = prompt_config(&mut rl)? else {
                return Ok(());
            };
            (rules, config, "lsystem".to_owned())
        }
    };
    debug!(
        "axiom {:?}, angle {}, heading {}, scale {}",
        config.axiom, config.angle, config.alpha, config.scale
    );

    std::fs::create_dir_all(&cli.output)?;

    // One-shot mode: render the requested depth and exit without prompting.
    if let Some(iterations) = cli.iterations {
        if iterations > 0 {
            let size = cli.size.unwrap_or(DEFAULT_WINDOW_SIZE);
            render_round(&rules, &config, iterations, size, cli.format, &cli.output, &stem)?;
        }
        return Ok(());
    }

    let size = match cli.size {
        Some(size) => size,
        None => match prompt_u32(&mut rl, "Enter window size in pixels: ")? {
            Some(size) => size,
            None => return Ok(()),
        },
    };

    let mut prompt = "Enter number of iterations: ";
    loop {
        let Some(iterations) = prompt_u32(&mut rl, prompt)? else {
            break;
        };
        if iterations == 0 {
            break;
        }
        render_round(&rules, &config, iterations, size, cli.format, &cli.output, &stem)?;
        prompt = "Enter number of iterations (0 to end): ";
    }

    Ok(())
}

/// One derive-interpret-write round against a fresh canvas.
fn render_round(
    rules: &RuleSet,
    config: &IfsConfig,
    iterations: u32,
    window_size: u32,
    format: Format,
    output: &Path,
    stem: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let derived = derive(&config.axiom, rules, iterations as usize);
    let symbols = &derived[iterations as usize];
    let step = config.step_length(iterations);
    info!(
        "Derived generation {} with {} symbols, step length {}",
        iterations,
        symbols.len(),
        step
    );

    let mut canvas = PathCanvas::new();
    TurtleInterpreter::new(config.angle, config.alpha).interpret(symbols, step, &mut canvas)?;
    let drawing = canvas.finish();

    let viewport = Viewport::fit(config.bounds, window_size);
    let path = output.join(format!("{stem}-g{iterations}.{}", format.extension()));
    let mut out = BufWriter::new(File::create(&path)?);
    match format {
        Format::Svg => write_svg(&drawing, &viewport, &mut out)?,
        Format::Json => write_json(&drawing, &mut out)?,
    }
    out.flush()?;
    info!(
        "Wrote {} ({} strokes, {} segments)",
        path.display(),
        drawing.len(),
        drawing.segments()
    );
    Ok(())
}

/// File stem for output naming; falls back to the interactive-mode default.
fn file_stem(path: &Path) -> String {
    match path.file_stem() {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => "lsystem".to_owned(),
    }
}

/// Reads one line, returning `None` when the user closes the stream
/// (Ctrl-C / Ctrl-D), which ends the session cleanly.
fn read_line(rl: &mut DefaultEditor, prompt: &str) -> rustyline::Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                let _ = rl.add_history_entry(line.as_str());
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Prompts for the full IFS configuration, re-asking per field on invalid
/// input.
fn prompt_config(rl: &mut DefaultEditor) -> rustyline::Result<Option<(RuleSet, IfsConfig)>> {
    let Some(rules) = prompt_rules(rl)? else {
        return Ok(None);
    };
    let Some(axiom) = prompt_axiom(rl)? else {
        return Ok(None);
    };
    let Some(angle) = prompt_f32(rl, "Enter angle increment in degrees: ")? else {
        return Ok(None);
    };
    let Some(alpha) = prompt_f32(rl, "Enter initial heading: ")? else {
        return Ok(None);
    };
    let Some(scale) = prompt_scale(rl)? else {
        return Ok(None);
    };
    let Some((x_min, x_max)) = prompt_pair(rl, "Enter min x, max x: ")? else {
        return Ok(None);
    };
    let Some((y_min, y_max)) = prompt_pair(rl, "Enter min y, max y: ")? else {
        return Ok(None);
    };
    Ok(Some((
        rules,
        IfsConfig {
            axiom,
            angle,
            alpha,
            scale,
            bounds: Bounds {
                x_min,
                x_max,
                y_min,
                y_max,
            },
        },
    )))
}

/// Rule entries until a lone `0`; a rule must use the `->` notation.
fn prompt_rules(rl: &mut DefaultEditor) -> rustyline::Result<Option<RuleSet>> {
    let mut rules = Vec::new();
    loop {
        let number = rules.len() + 1;
        let Some(line) = read_line(rl, &format!("Enter rule[{number}] (or 0 when done): "))? else {
            return Ok(None);
        };
        let entry: String = line.split_whitespace().collect();
        if entry == "0" {
            return Ok(Some(RuleSet::from_rules(rules)));
        }
        let mut parts = entry.split("->");
        match (parts.next(), parts.next(), parts.next()) {
            (Some(symbol), Some(replacement), None) => {
                let mut chars = symbol.chars();
                if let (Some(symbol), None) = (chars.next(), chars.next()) {
                    rules.push((symbol, replacement.to_owned()));
                } else {
                    println!("   *** Error: the rule symbol must be a single character. ***");
                }
            }
            _ => println!("   *** Error: must use '->' in rule[{number}]. Try again. ***"),
        }
    }
}

fn prompt_axiom(rl: &mut DefaultEditor) -> rustyline::Result<Option<String>> {
    loop {
        let Some(line) = read_line(rl, "Enter axiom: ")? else {
            return Ok(None);
        };
        let axiom: String = line.split_whitespace().collect();
        if axiom.is_empty() {
            println!("   *** Error: the axiom must not be empty. Try again. ***");
        } else {
            return Ok(Some(axiom));
        }
    }
}

fn prompt_f32(rl: &mut DefaultEditor, prompt: &str) -> rustyline::Result<Option<f32>> {
    loop {
        let Some(line) = read_line(rl, prompt)? else {
            return Ok(None);
        };
        match line.trim().parse::<f32>() {
            Ok(number) if number.is_finite() => return Ok(Some(number)),
            _ => println!("   *** Error: enter a finite number. Try again. ***"),
        }
    }
}

fn prompt_scale(rl: &mut DefaultEditor) -> rustyline::Result<Option<f32>> {
    loop {
        let Some(scale) = prompt_f32(rl, "Enter IFS scaling factor: ")? else {
            return Ok(None);
        };
        if scale > 0.0 && scale < 1.0 {
            return Ok(Some(scale));
        }
        println!("   *** Error: IFS scaling factor should be between 0 and 1 ***");
    }
}

fn prompt_pair(rl: &mut DefaultEditor, prompt: &str) -> rustyline::Result<Option<(f32, f32)>> {
    loop {
        let Some(line) = read_line(rl, prompt)? else {
            return Ok(None);
        };
        let value: String = line.split_whitespace().collect();
        let mut parts = value.split(',');
        if let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next())
            && let (Ok(min), Ok(max)) = (a.parse::<f32>(), b.parse::<f32>())
            && min.is_finite()
            && max.is_finite()
        {
            return Ok(Some((min, max)));
        }
        println!("   *** Error: enter two comma-separated numbers. Try again. ***");
    }
}

fn prompt_u32(rl: &mut DefaultEditor, prompt: &str) -> rustyline::Result<Option<u32>> {
    loop {
        let Some(line) = read_line(rl, prompt)? else {
            return Ok(None);
        };
        match line.trim().parse::<u32>() {
            Ok(number) => return Ok(Some(number)),
            Err(_) => println!("   *** Error: enter a non-negative whole number. Try again. ***"),
        }
    }
}
