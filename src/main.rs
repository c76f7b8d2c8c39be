use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkin_scanner::models::Credentials;
use checkin_scanner::present::BookingDetails;
use checkin_scanner::scan::FlowError;
use checkin_scanner::session::Surface;
use checkin_scanner::{config::Config, AppState};

type Input = Lines<BufReader<Stdin>>;

const LOGOUT_COMMAND: &str = ":logout";
const QUIT_COMMAND: &str = ":quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the operator's screen
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_list(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    info!(version = env!("CARGO_PKG_VERSION"), "checkin-scanner starting");

    let config = Config::load()?;
    info!(
        base_url = %config.api.base_url,
        data_dir = %config.storage.data_dir,
        "Loaded configuration"
    );

    let app = AppState::open(config)?;
    app.session.bootstrap().await;

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    tokio::select! {
        result = run(&app, &mut input) => result?,
        _ = shutdown_signal() => {},
    }

    info!("Shutdown complete");
    Ok(())
}

/// Drive the surfaces until stdin closes or the operator quits
async fn run(app: &AppState, input: &mut Input) -> anyhow::Result<()> {
    loop {
        let keep_going = match app.session.surface().await {
            Surface::Splash => {
                println!("Loading scanner...");
                app.session.bootstrap().await;
                true
            }
            Surface::Login => login_screen(app, input).await?,
            Surface::Scanner => scanner_screen(app, input).await?,
        };

        if !keep_going {
            return Ok(());
        }
    }
}

async fn login_screen(app: &AppState, input: &mut Input) -> anyhow::Result<bool> {
    println!("Admin Login");
    println!("Username:");
    let Some(username) = input.next_line().await? else {
        return Ok(false);
    };
    println!("Password:");
    let Some(password) = input.next_line().await? else {
        return Ok(false);
    };

    match app.session.login(&Credentials::new(username, password)).await {
        Ok(()) => println!("Signed in."),
        Err(e) => println!("{e}"),
    }
    Ok(true)
}

async fn scanner_screen(app: &AppState, input: &mut Input) -> anyhow::Result<bool> {
    println!("QR Check-In: scan a code ({LOGOUT_COMMAND} to sign out, {QUIT_COMMAND} to exit)");
    let Some(line) = input.next_line().await? else {
        return Ok(false);
    };

    match line.trim() {
        QUIT_COMMAND => return Ok(false),
        LOGOUT_COMMAND => {
            app.session.logout().await;
            println!("Signed out.");
            return Ok(true);
        }
        _ => {}
    }

    println!("Validating...");
    match app.scan_flow.submit(&line).await {
        Ok(outcome) => print!("{}", BookingDetails::from_outcome(&outcome)),
        Err(FlowError::Busy) => {}
        Err(e) => println!("{e}"),
    }
    Ok(true)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
