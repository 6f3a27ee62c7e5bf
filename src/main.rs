// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Context, Result};
use tracing::Level;

use setlist::session::describe_save;
use setlist::ui::App;
use setlist::{parse_order, read_table, save, AppConfig, Session};

fn print_usage() {
    println!("Setlist - Reorder songs stored in a spreadsheet");
    println!();
    println!("Usage: setlist [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <PATH>   Load settings from a YAML file");
    println!("  --file <PATH>     Workbook to edit (default songs.xlsx)");
    println!("  --sheet <NAME>    Sheet holding the songs (default Active)");
    println!("  --list            Print titles and links, then exit");
    println!("  --apply <PATH>    Save the order listed in a text file (one title per line)");
    println!("  --verbose         Debug-level logging");
    println!("  --help            Show this help message");
    println!();
    println!("Without --list or --apply the interactive editor starts.");
}

/// What to do once options are parsed
enum Mode {
    Interactive,
    List,
    Apply(PathBuf),
    Help,
}

struct Options {
    mode: Mode,
    config: Option<PathBuf>,
    file: Option<PathBuf>,
    sheet: Option<String>,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options {
        mode: Mode::Interactive,
        config: None,
        file: None,
        sheet: None,
        verbose: false,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", name))
        };
        match arg.as_str() {
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--file" => options.file = Some(PathBuf::from(value("--file")?)),
            "--sheet" => options.sheet = Some(value("--sheet")?),
            "--apply" => options.mode = Mode::Apply(PathBuf::from(value("--apply")?)),
            "--list" => options.mode = Mode::List,
            "--verbose" | "-v" => options.verbose = true,
            "--help" | "-h" => options.mode = Mode::Help,
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(options)
}

fn build_config(options: &Options) -> Result<AppConfig> {
    let mut config = match &options.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    // Command-line paths are relative to the working directory, not the config file
    if let Some(file) = &options.file {
        config.workbook = env::current_dir()
            .context("Failed to read current directory")?
            .join(file);
    }
    if let Some(sheet) = &options.sheet {
        config.sheet = sheet.clone();
    }
    Ok(config)
}

fn init_logging(level: Level, log_file: Option<PathBuf>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);
    match log_file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory: {:?}", dir))?;
            }
            let file = File::options()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {:?}", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn list_songs(config: &AppConfig) -> Result<()> {
    let records = read_table(config.workbook_path(), &config.layout())?;
    let width = records.len().to_string().len();
    for (i, record) in records.iter().enumerate() {
        if record.link.is_empty() {
            println!("{:>width$}. {}", i + 1, record.title, width = width);
        } else {
            println!("{:>width$}. {}  <{}>", i + 1, record.title, record.link, width = width);
        }
    }
    Ok(())
}

fn apply_order(config: &AppConfig, order_file: &Path) -> Result<()> {
    let contents = fs::read_to_string(order_file)
        .with_context(|| format!("Failed to read order file: {:?}", order_file))?;
    let order = parse_order(&contents);

    let path = config.workbook_path();
    let summary = save(&path, &config.layout(), &order)?;
    println!("{}", describe_save(&path, &summary));
    for title in &summary.unmatched {
        println!("  not found: {}", title);
    }
    for title in &summary.dropped {
        println!("  removed:   {}", title);
    }
    Ok(())
}

fn run_interactive(config: AppConfig) -> Result<()> {
    let mut session = Session::open(config);
    let mut app = App::new().context("Failed to initialize terminal")?;
    app.run(&mut session)?;
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --help for usage information");
            std::process::exit(1);
        }
    };

    if let Mode::Help = options.mode {
        print_usage();
        return Ok(());
    }

    let config = build_config(&options)?;
    let level = if options.verbose { Level::DEBUG } else { Level::INFO };

    match &options.mode {
        Mode::List => {
            init_logging(level, None)?;
            list_songs(&config)
        }
        Mode::Apply(order_file) => {
            init_logging(level, None)?;
            apply_order(&config, order_file)
        }
        Mode::Interactive => {
            // The alternate screen owns stdout and stderr, so only log to a file
            if let Some(path) = config.log_path() {
                init_logging(level, Some(path))?;
            }
            run_interactive(config)
        }
        Mode::Help => Ok(()),
    }
}
