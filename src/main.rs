//! folio: a terminal portfolio viewer with scroll-spy section navigation.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use folio::app_state::{AppState, Control};
use folio::config::Config;
use folio::error::FolioError;
use folio::formats::markdown::MarkdownFormat;
use folio::layout::PageLayout;
use folio::section::Section;
use folio::{input, logging, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Scroll through a portfolio with a navigation bar that follows you", long_about = None)]
struct Args {
    /// Portfolio markdown to show (defaults to the bundled portfolio)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Config file to use instead of ./folio.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print section regions as JSON and exit
    #[arg(long)]
    dump_layout: bool,

    /// Terminal width for --dump-layout
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Viewport rows for --dump-layout
    #[arg(long, default_value_t = 24)]
    height: u16,
}

fn main() -> Result<(), FolioError> {
    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    logging::init(args.log_file.as_deref(), &cfg.log_filter)?;

    let source = input::read_document(args.path.as_deref())?;
    let sections = input::extract_sections(&source, &MarkdownFormat)?;

    if sections.is_empty() {
        eprintln!("No sections found");
        return Ok(());
    }

    if args.dump_layout {
        let layout = PageLayout::new(sections, args.width, args.height, cfg.wrap_width);
        let json = serde_json::to_string_pretty(&layout.summary())?;
        println!("{json}");
        return Ok(());
    }

    run_tui(sections, &cfg)
}

fn run_tui(sections: Vec<Section>, cfg: &Config) -> Result<(), FolioError> {
    let (width, height) = terminal::size()?;
    let mut app = AppState::new(sections, width, ui::page_height(height), cfg);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg);
    app.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(result?)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &Config,
) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(cfg.tick_rate())? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) == Control::Quit {
                    return Ok(());
                }
            }
            Event::Resize(width, height) => app.resize(width, ui::page_height(height)),
            _ => {}
        }
    }
}
