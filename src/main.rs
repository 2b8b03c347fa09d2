use crossterm::{
    event::{
        Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags, read,
    },
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use log::warn;
use std::time::{Duration, Instant};

use codegenie::app::App;
use codegenie::cli::{self, CliArgs, CliCommand};
use codegenie::clipboard;
use codegenie::config::GenieConfig;
use codegenie::engine::EditorEngine;
use codegenie::mode::Mode;
use codegenie::problem::{self, HttpFetcher, ProblemRequest};
use codegenie::proxy::ProxyServer;
use codegenie::ui::renderer::TuiRenderer;

/// Parse arguments, then either run a headless subcommand (`serve`,
/// `fetch`) or open the terminal editor.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli_args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    // Initialize logger (set RUST_LOG env var to control verbosity)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = GenieConfig::load().unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        GenieConfig::default()
    });

    match &cli_args.command {
        Some(CliCommand::Serve { port }) => {
            let fetcher = HttpFetcher::new(config.user_agent(), config.timeout())?;
            let server = ProxyServer::bind(port.unwrap_or_else(|| config.proxy_port()))?;
            let shutdown = server.shutdown_handle();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    shutdown.shutdown();
                }
            });
            server.serve(fetcher).await?;
            Ok(())
        }
        Some(CliCommand::Fetch { target, platform }) => {
            let fetcher = HttpFetcher::new(config.user_agent(), config.timeout())?;
            let result = match ProblemRequest::resolve(target, platform.as_deref()) {
                Ok(request) => problem::scrape(&fetcher, &request).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(statement) => {
                    println!("{}", statement.to_bundle());
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => run_editor(&cli_args, &config),
    }
}

fn run_editor(cli_args: &CliArgs, config: &GenieConfig) -> Result<(), Box<dyn std::error::Error>> {
    let lang = match cli_args.lang.as_deref().map(str::parse::<Mode>) {
        Some(Ok(mode)) => Some(mode),
        Some(Err(e)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        None => None,
    };

    let mode = lang.or_else(|| config.mode()).unwrap_or_default();
    let engine = EditorEngine::new("", mode).with_clipboard(clipboard::default_writer());
    let mut app = App::new(engine);

    if let Some(path) = &cli_args.file {
        if cli_args.exists() {
            app.open_file(path, lang)?;
        } else {
            app.start_new_file(path, lang);
        }
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;

    // Needed to tell Ctrl+Shift+Z from Ctrl+Z and to see Ctrl+/ as such
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        crossterm::execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    } else {
        app.status_message = Some("This terminal cannot report Ctrl+Shift+Z; use Ctrl+Y to redo".to_string());
    }

    let result = event_loop(&mut app);

    if enhanced {
        crossterm::execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    // Leave alternate screen and disable raw mode
    crossterm::execute!(stdout, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn event_loop(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    let mut renderer = TuiRenderer::new()?;

    // Frame rate limiting constants
    const TARGET_FPS: u64 = 60;
    const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

    let mut last_frame_time = Instant::now();
    let mut needs_redraw = true;

    while !app.should_quit {
        if needs_redraw && last_frame_time.elapsed() >= FRAME_DURATION {
            renderer.draw(app)?;
            last_frame_time = Instant::now();
            needs_redraw = false;
        }

        let event = if last_frame_time.elapsed() < FRAME_DURATION {
            let timeout = FRAME_DURATION.saturating_sub(last_frame_time.elapsed());
            if crossterm::event::poll(timeout)? {
                Some(read()?)
            } else {
                None
            }
        } else {
            Some(read()?)
        };

        match event {
            Some(Event::Key(key_event)) => {
                app.handle_key(key_event);
                needs_redraw = true;
            }
            Some(Event::Resize(cols, rows)) => {
                app.handle_resize(cols, rows);
                needs_redraw = true;
            }
            _ => {}
        }
    }

    Ok(())
}
