use articlenav::toc::StrategyKind;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "articlenav")]
#[command(version)]
#[command(about = "Blog article reader with a scroll-synchronized table of contents")]
#[command(
    long_about = "articlenav - Read blog posts in the terminal with a live table of contents.\n\n\
    Launch without flags for the interactive reader: an outline sidebar that follows\n\
    your scroll position next to the article. Use flags for CLI mode to list headings,\n\
    print the outline, render HTML or inspect tracking.\n\n\
    Examples:\n  \
    articlenav post.json              # Interactive reader\n  \
    articlenav -l draft.md            # List headings with their anchor ids\n  \
    articlenav --toc draft.md         # Outline as a Markdown link list\n  \
    articlenav --html post.json       # Rendered article body\n  \
    articlenav --active-at 120 a.md   # Active heading after scrolling to row 120"
)]
pub struct Cli {
    /// Post to open: API JSON (.json) or Markdown, or '-' for stdin
    ///
    /// JSON is recognised by its extension or a leading '{'. If no file is
    /// given and stdin is piped, the post is read from stdin.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// List headings with their anchor ids (non-interactive)
    ///
    /// Combine with --filter or --level to narrow results.
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Print the table of contents as a Markdown link list
    #[arg(long = "toc")]
    pub toc: bool,

    /// Render the article body to HTML with heading anchors
    #[arg(long = "html")]
    pub html: bool,

    /// Show post details: title, date, read time, tags and comments
    #[arg(long = "info")]
    pub info: bool,

    /// Count headings by level
    #[arg(long = "count")]
    pub count: bool,

    /// Print the heading that is active once the article is scrolled to ROW
    ///
    /// Lays the article out one source line per row, scrolls to ROW and runs
    /// the table of contents tracker once.
    #[arg(long = "active-at", value_name = "ROW")]
    pub active_at: Option<usize>,

    /// Visible rows of the simulated viewport used by --active-at
    #[arg(long = "rows", value_name = "N", default_value_t = 40, requires = "active_at")]
    pub rows: usize,

    /// Filter headings by text pattern (case-insensitive)
    #[arg(long = "filter", value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Show only headings at a specific level (1-3)
    #[arg(short = 'L', long = "level", value_name = "LEVEL",
          value_parser = clap::value_parser!(u8).range(1..=3))]
    pub level: Option<u8>,

    /// Output format for CLI modes
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Active heading tracking strategy (overrides config)
    #[arg(long = "strategy", value_name = "STRATEGY")]
    pub strategy: Option<StrategyArg>,

    /// Base URL for relative image sources in --html output (overrides config)
    #[arg(long = "asset-base", value_name = "URL")]
    pub asset_base: Option<String>,
}

impl Cli {
    /// Whether any non-interactive mode was requested.
    pub fn is_cli_mode(&self) -> bool {
        self.list
            || self.toc
            || self.html
            || self.info
            || self.count
            || self.active_at.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Last heading above the activation line
    Threshold,
    /// Heading entering the upper observation band
    Intersection,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Threshold => StrategyKind::Threshold,
            StrategyArg::Intersection => StrategyKind::Intersection,
        }
    }
}
