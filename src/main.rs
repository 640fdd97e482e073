//! rpc-deadline operator CLI.
//!
//! ```text
//! rpc-deadline [--config FILE] resolve  --route R
//! rpc-deadline [--config FILE] simulate --route R --work-ms N [--panic]
//! rpc-deadline [--config FILE] watch
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use rpc_deadline::config::loader::load_config;
use rpc_deadline::config::watcher::ConfigWatcher;
use rpc_deadline::lifecycle::{wait_for_signal, Shutdown};
use rpc_deadline::observability::{logging, metrics};
use rpc_deadline::{
    resolve_timeout, CallContext, CallInfo, InterceptorConfig, Outcome, RelayedFailure,
    TimeoutInterceptor,
};

#[derive(Parser)]
#[command(name = "rpc-deadline")]
#[command(about = "Inspect and exercise per-route RPC timeouts", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective timeout for a route
    Resolve {
        #[arg(short, long)]
        route: String,
    },
    /// Run a synthetic handler through the interceptor
    Simulate {
        #[arg(short, long)]
        route: String,

        /// How long the handler works before answering
        #[arg(short, long, default_value_t = 100)]
        work_ms: u64,

        /// Panic instead of answering
        #[arg(long)]
        panic: bool,
    },
    /// Keep route timeouts in sync with the config file until Ctrl+C
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => InterceptorConfig::default(),
    };

    logging::init_logging(&config.observability.log_filter)?;
    tracing::info!(
        default_timeout_ms = config.default_timeout_ms,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    config.apply_routes();

    match cli.command {
        Commands::Resolve { route } => {
            let timeout = resolve_timeout(None, &route, config.default_timeout());
            println!("{} {}ms", route, timeout.as_millis());
        }
        Commands::Simulate {
            route,
            work_ms,
            panic,
        } => simulate(&config, route, work_ms, panic).await,
        Commands::Watch => {
            let Some(path) = cli.config else {
                return Err("watch requires --config".into());
            };
            watch(path).await?;
        }
    }

    Ok(())
}

async fn simulate(config: &InterceptorConfig, route: String, work_ms: u64, panic: bool) {
    let interceptor = TimeoutInterceptor::new(config.default_timeout());

    // The caller runs on its own task so a re-raised panic is observed here.
    let call = tokio::spawn(async move {
        let info = CallInfo::new(route);
        interceptor
            .intercept(
                &CallContext::background(),
                &info,
                work_ms,
                move |_ctx, work_ms: u64| async move {
                    tokio::time::sleep(Duration::from_millis(work_ms)).await;
                    if panic {
                        panic!("simulated handler panic after {}ms", work_ms);
                    }
                    Ok::<_, String>(format!("completed after {}ms", work_ms))
                },
            )
            .await
    });

    match call.await {
        Ok(result) => match Outcome::from(result) {
            Outcome::Success(body) => println!("success: {}", body),
            Outcome::Failure(err) => println!("failure: {}", err),
            Outcome::DeadlineExceeded => println!("deadline exceeded"),
            Outcome::Canceled => println!("canceled"),
        },
        Err(join_err) if join_err.is_panic() => {
            let failure = RelayedFailure::capture(join_err.into_panic());
            eprintln!("faulted: {}", failure);
        }
        Err(join_err) => eprintln!("caller task failed: {}", join_err),
    }
}

async fn watch(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run()?;

    let shutdown = Shutdown::new();
    let mut stop = shutdown.subscribe();

    let applier = tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(config) = updates.recv() => config.apply_routes(),
                _ = stop.recv() => break,
            }
        }
    });

    wait_for_signal().await?;
    shutdown.trigger();
    applier.await?;

    Ok(())
}
