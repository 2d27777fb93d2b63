//! Tabpad - multi-tab terminal text editor
//!
//! Entry point with proper terminal setup and cleanup.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tabpad::{
    core::{AppError, Result},
    events::{Event, EventBus},
    logging,
    state::ViewSettings,
    ui, App,
};
use tabpad_core::{env_config, load_config, sample_config, Session, TabpadConfig};

const USAGE: &str = "Usage: tabpad [OPTIONS] [FILE]...

Options:
  --print-config   Print a sample configuration file and exit
  -V, --version    Print version and exit
  -h, --help       Print this help and exit";

/// Command-line arguments
struct Args {
    /// Files to open, one tab each
    files: Vec<PathBuf>,
    print_config: bool,
    version: bool,
    help: bool,
}

impl Args {
    /// Parse command-line arguments
    fn parse() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Args {
            files: Vec::new(),
            print_config: false,
            version: false,
            help: false,
        };
        let mut only_files = false;

        for arg in args {
            if only_files || !arg.starts_with('-') || arg == "-" {
                parsed.files.push(PathBuf::from(arg));
                continue;
            }
            match arg.as_str() {
                "--" => only_files = true,
                "--print-config" => parsed.print_config = true,
                "--version" | "-V" => parsed.version = true,
                "--help" | "-h" => parsed.help = true,
                other => return Err(AppError::Usage(format!("unknown option '{}'\n\n{}", other, USAGE))),
            }
        }
        Ok(parsed)
    }
}

fn main() -> Result<()> {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }
    if args.version {
        println!("tabpad {}", tabpad_core::version());
        return Ok(());
    }
    if args.print_config {
        print!("{}", sample_config());
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    let loaded = load_config(&cwd).unwrap_or_else(|e| {
        eprintln!("Warning: {}; using default settings", e);
        env_config()
    });
    for problem in &loaded.ignored {
        eprintln!("Warning: {}; ignored", problem);
    }
    let config = loaded.config;
    logging::init(&config.log);
    for problem in &loaded.ignored {
        tracing::warn!(%problem, "config override ignored");
    }

    run_tui(args, &config)
}

/// Run the TUI application
///
/// Sets up the terminal in raw mode, runs the application loop, and
/// ensures the terminal is restored upon exit or panic.
fn run_tui(args: Args, config: &TabpadConfig) -> Result<()> {
    install_panic_hook();

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let result = run_app(&mut term, args, config);

    // Restore terminal (ALWAYS, even on error)
    terminal::disable_raw_mode()?;
    execute!(term.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    term.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "application error");
        eprintln!("Error: {}", e);
    }

    result
}

/// Leave the alternate screen before the default hook prints the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        tracing::error!(panic = %info, "panic");
        default_hook(info);
    }));
}

/// Main application loop
fn run_app<B: Backend>(terminal: &mut Terminal<B>, args: Args, config: &TabpadConfig) -> Result<()> {
    tabpad::clipboard::init();

    let event_bus = EventBus::new(1024);
    let mut app = App::new(Session::with_theme(config.ui.theme), ViewSettings::from(config));

    // Each failure queues its own error dialog
    for path in &args.files {
        app.session.open_file(Some(path.as_path()));
    }
    app.sync_dialog();

    spawn_input_reader(event_bus.sender());

    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        // Process events with timeout (50ms for responsive UI)
        if let Some(event) = event_bus.recv_timeout(Duration::from_millis(50)) {
            app.handle_event(event)?;
        }

        // Drain additional events to prevent lag
        for event in event_bus.drain(50) {
            app.handle_event(event)?;
        }

        if app.should_quit() {
            tracing::info!("exiting");
            break;
        }
    }

    Ok(())
}

/// Spawns a dedicated thread to read input events (keyboard, mouse, resize)
///
/// The thread stops once the main loop drops the receiving end.
fn spawn_input_reader(tx: crossbeam_channel::Sender<Event>) {
    std::thread::spawn(move || loop {
        // Poll with timeout so a closed channel is noticed
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(_) => break,
        }
        match event::read() {
            Ok(raw) => {
                if let Some(event) = Event::from_terminal(raw) {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Err(_) => break,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_files_and_flags() {
        let args = parse(&["a.txt", "--print-config", "b.txt"]).unwrap();
        assert_eq!(args.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert!(args.print_config);
        assert!(!args.help);
    }

    #[test]
    fn test_double_dash_ends_options() {
        let args = parse(&["--", "--help"]).unwrap();
        assert_eq!(args.files, vec![PathBuf::from("--help")]);
        assert!(!args.help);
    }

    #[test]
    fn test_unknown_option() {
        let err = parse(&["--bogus"]).err().unwrap();
        assert!(err.to_string().starts_with("unknown option '--bogus'"));
    }
}
