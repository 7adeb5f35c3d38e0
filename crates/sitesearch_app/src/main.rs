use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use sitesearch_app::cli::{parse_command, Cli, Command, HELP};
use sitesearch_app::render::render;
use sitesearch_app::{Notification, PresentationController};
use sitesearch_core::SessionState;
use sitesearch_logging::search_info;

const TICK: Duration = Duration::from_millis(75);

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    let settings = cli.client_settings();
    search_info!("Using search backend at {}", settings.base_url);
    let mut controller =
        PresentationController::new(settings).context("failed to start search client")?;

    match cli.one_shot() {
        Some((url, query)) => run_once(&mut controller, url, query),
        None => run_interactive(&mut controller),
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    sitesearch_logging::initialize(&cli.log_destination(), level);
}

fn run_once(
    controller: &mut PresentationController,
    url: &str,
    query: &str,
) -> anyhow::Result<ExitCode> {
    if let Err(err) = controller.submit(url, query) {
        eprintln!("{err}");
        return Ok(ExitCode::from(2));
    }
    print_lines(&render(&controller.view()))?;

    let failed = matches!(
        controller.wait_until_settled(None),
        SessionState::Error { .. }
    );
    print_lines(&render(&controller.view()))?;
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_interactive(controller: &mut PresentationController) -> anyhow::Result<ExitCode> {
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("{HELP}");
    let mut input_closed = false;
    while !input_closed {
        match line_rx.recv_timeout(TICK) {
            Ok(line) => match parse_command(&line) {
                Command::Search { url, query } => {
                    // Rejections show up as a notice in the next render.
                    let _ = controller.submit(&url, &query);
                }
                Command::ToggleHtml(rank) => controller.toggle_html(rank - 1),
                Command::Reset => controller.reset(),
                Command::Help => println!("{HELP}"),
                Command::Quit => input_closed = true,
                Command::Empty => {}
                Command::Unknown(input) => println!("Unknown command `{input}`. Try :help"),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                // Piped input: let the last search finish before exiting.
                controller.wait_until_settled(None);
                input_closed = true;
            }
        }

        controller.process_pending();
        for notification in controller.drain_notifications() {
            if let Notification::ResultsPresented { handle, count } = notification {
                search_info!("Presenting {} results for search {}", count, handle);
            }
        }
        if let Some(view) = controller.take_render() {
            print_lines(&render(&view))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_lines(lines: &[String]) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;
    Ok(())
}
