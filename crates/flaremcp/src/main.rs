use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use flaremcp::CloudflareServer;
use flaremcp::error::ServerError;
use flaremcp_api::{Client, Credentials, TransportConfig};

/// Cloudflare MCP server.
///
/// Exposes zones, DNS records, cache purge, Workers KV, Queues, and
/// Hyperdrive configurations as MCP tools over stdio.
#[derive(Debug, Parser)]
#[command(name = "flaremcp", version, about)]
struct Cli {
    /// Config profile to use.
    #[arg(long, short = 'p')]
    profile: Option<String>,

    /// Cloudflare API token (overrides config profiles).
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Override the API base URL (testing / gateways).
    #[arg(long, hide = true)]
    api_base_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries the MCP transport; logs must go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let (credentials, transport, base_url) = resolve_settings(&cli)?;

    let client = match base_url {
        Some(ref url) => Client::with_base_url(url, &credentials, &transport)?,
        None => Client::new(&credentials, &transport)?,
    };

    let server = CloudflareServer::new(client);

    tracing::info!("serving Cloudflare MCP tools over stdio");
    let service = server
        .serve(stdio())
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))?;
    service
        .waiting()
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))?;

    Ok(())
}

/// Resolve credentials, transport, and base URL from CLI flags, the
/// environment, and the config file -- in that order of precedence.
fn resolve_settings(
    cli: &Cli,
) -> Result<(Credentials, TransportConfig, Option<String>), ServerError> {
    // A token flag (or CLOUDFLARE_API_TOKEN via clap's env fallback)
    // short-circuits profile resolution entirely.
    if let Some(ref token) = cli.api_token {
        return Ok((
            Credentials::ApiToken {
                token: SecretString::from(token.clone()),
            },
            TransportConfig::default(),
            cli.api_base_url.clone(),
        ));
    }

    let cfg = flaremcp_config::load_config_or_default();
    let profile_name = cli
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    let Some(profile) = cfg.profiles.get(&profile_name) else {
        // A named profile that doesn't exist is a config mistake worth
        // surfacing; an absent default just means nothing is set up.
        if cli.profile.is_some() {
            let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(ServerError::ProfileNotFound {
                name: profile_name,
                available: available.join(", "),
            });
        }
        return Err(ServerError::NoCredentials {
            path: flaremcp_config::config_path().display().to_string(),
        });
    };

    let credentials = flaremcp_config::resolve_auth(profile, &profile_name)?;
    let transport = flaremcp_config::profile_transport(profile, &cfg.defaults);
    let base_url = cli.api_base_url.clone().or_else(|| profile.base_url.clone());

    Ok((credentials, transport, base_url))
}
