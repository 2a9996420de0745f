use clap::Parser;
use resolve_domain::{LookupConfig, ResolutionStrategy, DEFAULT_MAX_CONCURRENCY};
use resolve_infrastructure::targets::open_target_source;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing::{debug, info};

mod bootstrap;
mod di;

#[derive(Parser, Debug)]
#[command(name = "resolve")]
#[command(version)]
#[command(about = "Bulk forward and reverse DNS lookups")]
struct Cli {
    /// Comma-separated nameservers, tried in order (empty = system resolver)
    #[arg(short = 's', value_name = "LIST", default_value = "")]
    servers: String,

    /// Include IPv6 addresses in forward lookup results
    #[arg(short = '6')]
    ipv6: bool,

    /// Maximum number of concurrent lookups
    #[arg(short = 'c', value_name = "N", default_value_t = DEFAULT_MAX_CONCURRENCY)]
    concurrency: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// File of targets, or a single hostname / IP address (default: stdin)
    target: Option<String>,
}

impl Cli {
    fn lookup_config(&self) -> Result<LookupConfig, resolve_domain::DomainError> {
        LookupConfig::new(
            ResolutionStrategy::parse(&self.servers),
            self.ipv6,
            self.concurrency,
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return report(anyhow::Error::from(e).context("Failed to start runtime")),
    };

    let result = runtime.block_on(run(cli));
    finish(runtime, result)
}

/// On error the runtime is abandoned instead of dropped, so lookups stuck in
/// the blocking pool (getaddrinfo, getnameinfo) cannot delay the exit.
fn finish(runtime: Runtime, result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            runtime.shutdown_background();
            report(e)
        }
    }
}

fn report(e: anyhow::Error) -> ExitCode {
    eprintln!("Error: {:?}", e);
    ExitCode::FAILURE
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    bootstrap::init_logging(&cli.log_level)?;

    let config = cli.lookup_config()?;
    debug!(config = ?config, "Configuration loaded");

    let use_cases = di::UseCases::new(&config);

    let mut source = open_target_source(cli.target.as_deref()).await?;
    let summary = use_cases.dispatch_targets.execute(source.as_mut()).await?;

    info!(targets = summary.dispatched, "Done");
    Ok(())
}
