//! vigil — operator CLI for the vote-attempt fraud gate.

mod audit;
mod config;

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use config::VigilConfig;
use vigil_fraud::{GateError, RawVoteInputs, VoteGate, VoteRequest};
use vigil_store::AttemptStore;
use vigil_store_lmdb::LmdbEnvironment;
use vigil_telemetry::{ClientProfile, HttpIpResolver, IpResolver, StaticIpResolver, TelemetryError};
use vigil_types::{ScoredAttempt, SystemClock, Timestamp};
use vigil_utils::LogFormat;

/// Exit code of `evaluate` when the attempt is blocked.
const EXIT_BLOCKED: i32 = 2;

/// Exit code of `evaluate` when the gate could not decide (storage failure).
const EXIT_RETRY: i32 = 3;

/// LMDB databases per environment.
const MAX_DBS: u32 = 4;

#[derive(Parser)]
#[command(name = "vigil", about = "Vote-attempt fraud gate")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VIGIL_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of the attempt log.
    #[arg(long, env = "VIGIL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VIGIL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VIGIL_LOG_FORMAT")]
    log_format: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Score and record a vote attempt; exit 0 to proceed, 2 when blocked.
    Evaluate(EvaluateArgs),

    /// Show the most recent vote attempts, newest first.
    Log {
        /// Number of attempts to show.
        #[arg(long, default_value_t = 50)]
        limit: usize,

        /// Only show attempts flagged as suspicious.
        #[arg(long)]
        suspicious_only: bool,
    },

    /// Print the effective configuration as TOML.
    Config,
}

#[derive(clap::Args)]
struct EvaluateArgs {
    /// Voter wallet address.
    #[arg(long)]
    voter: String,

    /// Election identifier.
    #[arg(long)]
    election: Option<u64>,

    /// Identity-provider account id.
    #[arg(long)]
    account: String,

    /// Caller IP address, when already known.
    #[arg(long, conflicts_with_all = ["forwarded_for", "lookup_ip"])]
    ip: Option<IpAddr>,

    /// Raw `X-Forwarded-For` header value; the client entry is used.
    #[arg(long, conflicts_with = "lookup_ip")]
    forwarded_for: Option<String>,

    /// Look up this host's public IP through the configured endpoint.
    #[arg(long)]
    lookup_ip: bool,

    /// Client user agent, for the device fingerprint.
    #[arg(long, default_value = "")]
    user_agent: String,

    /// Client language, for the device fingerprint.
    #[arg(long, default_value = "")]
    language: String,

    /// Client platform, for the device fingerprint.
    #[arg(long, default_value = "")]
    platform: String,
}

/// The IP sources selectable from the command line.
enum CliIpSource {
    Static(StaticIpResolver),
    Http(HttpIpResolver),
}

impl IpResolver for CliIpSource {
    async fn resolve_ip(&self) -> Result<String, TelemetryError> {
        match self {
            Self::Static(resolver) => resolver.resolve_ip().await,
            Self::Http(resolver) => resolver.resolve_ip().await,
        }
    }
}

impl CliIpSource {
    fn from_args(args: &EvaluateArgs, config: &VigilConfig) -> Self {
        if args.lookup_ip {
            Self::Http(HttpIpResolver::with_timeout(
                config.ip_lookup_url.clone(),
                Duration::from_secs(config.ip_lookup_timeout_secs),
            ))
        } else if let Some(header) = &args.forwarded_for {
            Self::Static(StaticIpResolver::from_forwarded_for(header))
        } else {
            Self::Static(StaticIpResolver::new(args.ip))
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<VigilConfig> {
    let mut config = match &cli.config {
        Some(path) => VigilConfig::from_toml_file(path)?,
        None => VigilConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    Ok(config)
}

async fn evaluate(config: &VigilConfig, args: EvaluateArgs) -> anyhow::Result<i32> {
    let env = LmdbEnvironment::open(&config.data_dir, MAX_DBS, config.map_size_bytes())
        .with_context(|| format!("opening attempt log at {}", config.data_dir.display()))?;
    let store = Arc::new(env.attempt_store());
    let gate = VoteGate::new(store, Arc::new(SystemClock), config.fraud.clone())?;

    let ip_source = CliIpSource::from_args(&args, config);
    let profile = ClientProfile::new(args.user_agent, args.language, args.platform);
    let request = VoteRequest {
        voter_address: args.voter,
        election_id: args.election,
        account_id: args.account,
    };
    let inputs = RawVoteInputs::gather(request, &ip_source, &profile).await;

    match gate.evaluate(inputs) {
        Ok(decision) => {
            let output = serde_json::json!({
                "outcome": decision.outcome(),
                "proceed": decision.proceed,
                "score": decision.score.as_f64(),
                "reasons": decision.reasons,
                "message": decision.user_message(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(if decision.proceed { 0 } else { EXIT_BLOCKED })
        }
        Err(e @ GateError::InvalidAttempt(_)) => Err(e.into()),
        Err(e) => {
            tracing::error!(error = %e, "vote attempt could not be evaluated");
            eprintln!("{e}");
            Ok(EXIT_RETRY)
        }
    }
}

fn show_log(config: &VigilConfig, limit: usize, suspicious_only: bool) -> anyhow::Result<()> {
    let env = LmdbEnvironment::open(&config.data_dir, MAX_DBS, config.map_size_bytes())
        .with_context(|| format!("opening attempt log at {}", config.data_dir.display()))?;
    let store = env.attempt_store();

    let records = if suspicious_only {
        store.recent_matching(limit, &|r: &ScoredAttempt| r.is_suspicious())?
    } else {
        store.recent(limit)?
    };

    print!("{}", audit::render_table(&records, Timestamp::now()));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let log_format: LogFormat = config
        .log_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    vigil_utils::init_tracing(log_format, &config.log_level);

    match cli.command {
        Command::Evaluate(args) => {
            let code = evaluate(&config, args).await?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Command::Log {
            limit,
            suspicious_only,
        } => show_log(&config, limit, suspicious_only)?,
        Command::Config => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}
