//! # articlenav
//!
//! Terminal reader for blog posts with a table of contents that follows the
//! scroll position.
//!
//! ## Usage
//!
//! Launch the interactive reader:
//! ```sh
//! articlenav post.json
//! ```
//!
//! List headings and their anchors:
//! ```sh
//! articlenav -l draft.md
//! ```

mod cli;

use articlenav::input::{self, InputError};
use articlenav::{Config, parse_markdown};
use clap::Parser as ClapParser;
use cli::Cli;
use color_eyre::{Report, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`RUST_LOG` syntax).
const LOG_ENV: &str = "ARTICLENAV_LOG";

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    init_logging(args.is_cli_mode());

    let source = match input::determine_input_source(args.file.as_deref()) {
        Ok(source) => source,
        Err(InputError::NoInput) => {
            eprintln!("Error: a post file argument is required");
            eprintln!("\nUsage: articlenav [OPTIONS] <FILE>");
            eprintln!("       articlenav [OPTIONS] -");
            eprintln!("       cat post.json | articlenav [OPTIONS]");
            std::process::exit(2);
        }
        Err(err) => return Err(err.into()),
    };
    let post = input::load_post(&source)?;

    // CLI flags take priority over the config file
    let mut config = Config::load();
    if let Some(strategy) = args.strategy {
        config.toc.strategy = strategy.into();
    }
    if let Some(ref base) = args.asset_base {
        config.render.asset_base_url = Some(base.clone());
    }

    if !args.is_cli_mode() {
        let strategy = config.toc.strategy;
        let app = articlenav::App::new(post, source, config, strategy);

        let mut terminal = ratatui::init();
        let result = execute!(io::stdout(), EnableMouseCapture)
            .map_err(Report::from)
            .and_then(|()| articlenav::tui::run(&mut terminal, app));
        let _ = execute!(io::stdout(), DisableMouseCapture);
        ratatui::restore();
        return result;
    }

    let doc = parse_markdown(&post.content);
    let format = args.output;

    let output = if args.count {
        cli::heading_counts(&doc, format)?
    } else if args.info {
        cli::info(&post, &doc, format)?
    } else if args.html {
        cli::html(&post, &config.render_options())
    } else if args.toc {
        cli::table_of_contents(&cli::select_headings(&args, &doc), format)?
    } else if let Some(row) = args.active_at {
        cli::active_at(&post, &doc, row, args.rows, config.toc.strategy, format)?
    } else {
        cli::list_headings(&cli::select_headings(&args, &doc), format)?
    };
    print!("{output}");

    Ok(())
}

/// Log to stderr in CLI mode. The reader owns the terminal, so it logs to a
/// file in the cache directory instead (or nowhere when that fails).
fn init_logging(cli_mode: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    if cli_mode {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let Some(dir) = dirs::cache_dir().map(|d| d.join("articlenav")) else {
        return;
    };
    let file = fs::create_dir_all(&dir).and_then(|_| File::create(dir.join("articlenav.log")));
    if let Ok(file) = file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }
}
