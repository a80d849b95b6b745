use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use tokio::io::{AsyncBufReadExt, BufReader};

use account_signup::cli::{self, Command, CommandParser};
use account_signup::config::{PlacesConfig, SignupConfig};
use account_signup::places::PlacesClient;
use account_signup::register::{
    HttpAccountApi, Navigation, Navigator, RegistrationFlow, SubmissionOutcome,
};

/// What woke the REPL loop.
enum Input {
    Line(String),
    Resolved(SubmissionOutcome),
}

/// Prints where the flow would navigate.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, navigation: Navigation) {
        println!(
            "\n-> {} (just_registered: {})\n",
            navigation.route, navigation.just_registered
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = SignupConfig::from_env()?;
    let api = HttpAccountApi::new(
        &config.base_url,
        &config.register_path,
        config.request_timeout,
    )?;

    eprintln!("Account signup v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Endpoint: {}", api.endpoint());

    let places = PlacesConfig::from_env().map(|c| PlacesClient::new(&c));
    eprintln!(
        "   Opening hours: {}",
        if places.is_some() { "enabled" } else { "disabled (PLACES_API_KEY not set)" }
    );
    eprintln!("   Type 'help' for commands.\n");

    let mut flow = RegistrationFlow::new(
        config.form_rules(),
        Arc::new(api),
        Arc::new(TerminalNavigator),
    );

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break, // EOF
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    break;
                }
            }
        }
    });
    let mut input = stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|l| (l, rx)) }).boxed();

    println!("{}", cli::render(flow.session()));
    eprint!("> ");

    loop {
        let next = tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received, shutting down...");
                break;
            }
            outcome = flow.next_outcome() => Input::Resolved(outcome),
            line = input.next() => match line {
                Some(line) => Input::Line(line),
                None => break,
            },
        };

        let line = match next {
            Input::Line(line) => line,
            Input::Resolved(outcome) => {
                flow.resolve(outcome);
                println!("\n{}", cli::render(flow.session()));
                if flow.stage().is_terminal() {
                    break;
                }
                eprint!("> ");
                continue;
            }
        };

        if line.trim().is_empty() {
            eprint!("> ");
            continue;
        }

        let command = CommandParser::parse(&line);
        match &command {
            Command::Quit => break,
            Command::Help => println!("{}", cli::HELP),
            Command::Hours => match &places {
                Some(client) => {
                    for day in client.weekday_hours().await {
                        println!("  {day}");
                    }
                }
                None => println!("Opening hours are not configured."),
            },
            Command::Unknown(raw) => println!("Unknown command: {raw} (try 'help')"),
            Command::Status => println!("{}", cli::render(flow.session())),
            _ => {
                if let Some(event) = command.to_event(flow.stage()) {
                    flow.dispatch(event);
                }
                println!("{}", cli::render(flow.session()));
            }
        }

        eprint!("> ");
    }

    Ok(())
}
