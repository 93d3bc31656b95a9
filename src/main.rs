// src/main.rs
use clap::Parser;
use serde_json::json;
use std::path::Path;
use std::process::ExitCode;

use driftdeck::banner;
use driftdeck::cli::{Cli, Commands};
use driftdeck::client::{DatasetFile, HttpAnalysisClient, RawResponse};
use driftdeck::config::AppConfig;
use driftdeck::errors::{DashError, Result};
use driftdeck::orchestrator::{self, Orchestrator};
use driftdeck::preview::{self, PreviewState, PreviewSurface};
use driftdeck::report::ReportRenderer;
use driftdeck::surface::{RecordingSurface, Surface, TerminalSurface};

#[actix_web::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let dotenv = dotenvy::dotenv();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    if let Err(e) = dotenv {
        log::debug!("no .env loaded: {}", e);
    }

    if !cli.json {
        banner::print_banner();
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the verdict was rendered successfully.
async fn run(cli: Cli) -> Result<bool> {
    let mut config = AppConfig::from_env()?;
    if let Some(path) = &cli.config {
        config.apply_file(path)?;
    }

    match cli.command {
        Commands::Analyze {
            reference,
            current,
            serve,
        } => {
            let reference = reference.as_deref().map(DatasetFile::read).transpose()?;
            let current = current.as_deref().map(DatasetFile::read).transpose()?;
            let client = HttpAnalysisClient::new(&config)?;

            if let Some(bind) = serve {
                let state = PreviewState::new();
                let (server, addrs) =
                    preview::start_server(&bind, state.clone()).map_err(DashError::Server)?;
                let handle = server.handle();
                actix_rt::spawn(server);
                for addr in &addrs {
                    println!("🌐 Preview available at http://{}", addr);
                }

                let ok = if cli.json {
                    let surface = PreviewSurface::new(RecordingSurface::new(), state);
                    let (ok, surface) = analyze(client, surface, &config, reference, current).await;
                    print_json(ok, &surface.into_inner())?;
                    ok
                } else {
                    let surface = PreviewSurface::new(terminal(&config, cli.no_color), state);
                    analyze(client, surface, &config, reference, current).await.0
                };

                println!("Press Ctrl-C to stop the preview.");
                tokio::signal::ctrl_c().await.map_err(DashError::Server)?;
                handle.stop(true).await;
                Ok(ok)
            } else if cli.json {
                let (ok, surface) =
                    analyze(client, RecordingSurface::new(), &config, reference, current).await;
                print_json(ok, &surface)?;
                Ok(ok)
            } else {
                let surface = terminal(&config, cli.no_color);
                Ok(analyze(client, surface, &config, reference, current).await.0)
            }
        }
        Commands::Inspect { response, status } => {
            let renderer = ReportRenderer::default();
            let raw = read_response(&response, status)?;
            if cli.json {
                let mut surface = RecordingSurface::new();
                let result = orchestrator::replay(&raw, &mut surface, &renderer)?;
                print_json(result.is_success(), &surface)?;
                Ok(result.is_success())
            } else {
                let mut surface = terminal(&config, cli.no_color);
                let result = orchestrator::replay(&raw, &mut surface, &renderer)?;
                Ok(result.is_success())
            }
        }
    }
}

async fn analyze<S: Surface>(
    client: HttpAnalysisClient,
    surface: S,
    config: &AppConfig,
    reference: Option<DatasetFile>,
    current: Option<DatasetFile>,
) -> (bool, S) {
    let mut orchestrator = Orchestrator::new(client, surface, config.reveal_pacer());
    let ok = match orchestrator.submit(reference, current).await {
        Ok(result) => result.is_success(),
        Err(e) => {
            log::error!("submission ended with error: {}", e);
            false
        }
    };
    (ok, orchestrator.into_surface())
}

fn terminal(config: &AppConfig, no_color: bool) -> TerminalSurface<std::io::Stdout> {
    let surface = TerminalSurface::new(std::io::stdout(), &config.report_dir);
    if no_color { surface.without_color() } else { surface }
}

fn read_response(path: &Path, status: u16) -> Result<RawResponse> {
    let body = std::fs::read(path)?;
    Ok(RawResponse { status, body })
}

fn print_json(ok: bool, surface: &RecordingSurface) -> Result<()> {
    let out = json!({
        "ok": ok,
        "data": surface.last_dashboard(),
        "alerts": surface.alerts(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
