//! Switch agent daemon entry point.
//!
//! Loads the desired-configuration file, reconciles it into the state
//! tree, and hands the resulting delta to the hardware-sync backend.
//! SIGHUP re-reads the file and reapplies it; a rejected configuration is
//! reported and the running state stays as it was.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};
use tokio::signal::unix::{signal, SignalKind};

use swagent_state::StateManager;
use swagent_types::MacAddress;
use swagentd::applier::apply_config;
use swagentd::config::AgentConfig;
use swagentd::hw::{HwSwitch, LoggingHwSwitch};
use swagentd::platform::{FixedPlatform, Platform};
use swagentd::AgentResult;

/// Switch agent daemon
#[derive(Parser, Debug)]
#[command(name = "swagentd")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Desired-configuration file (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Local switch MAC address used for deterministic defaults
    #[arg(short = 'm', long, default_value = "02:00:00:00:00:01")]
    mac_address: MacAddress,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    info!("starting swagentd");
    info!("config file: {}", args.config.display());
    info!("local MAC: {}", args.mac_address);
    if args.mac_address.is_zero() {
        warn!("local MAC is all-zero; deterministic defaults will be degenerate");
    }

    let platform = FixedPlatform::new(args.mac_address);
    let manager = StateManager::new();
    let hw = LoggingHwSwitch;

    if let Err(err) = reload(&manager, &args.config, &platform, &hw).await {
        error!("initial configuration rejected: {err}");
        return ExitCode::FAILURE;
    }

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(hangup) => hangup,
        Err(err) => {
            error!("failed to install SIGHUP handler: {err}");
            return ExitCode::FAILURE;
        }
    };

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("received SIGINT, shutting down");
                break;
            }
            _ = hangup.recv() => {
                info!("received SIGHUP, reapplying configuration");
                if let Err(err) = reload(&manager, &args.config, &platform, &hw).await {
                    // The previous root stays current; the operator fixes
                    // the file and sends SIGHUP again.
                    error!("reconfiguration rejected: {err}");
                }
            }
        }
    }

    info!("swagentd shutdown complete");
    ExitCode::SUCCESS
}

/// Loads the config file, applies it, and syncs any resulting delta.
async fn reload<P: Platform + ?Sized, H: HwSwitch + ?Sized>(
    manager: &StateManager,
    path: &Path,
    platform: &P,
    hw: &H,
) -> AgentResult<()> {
    let config = AgentConfig::from_json_file(path)?;
    match manager.update(|state| apply_config(state, &config, platform))? {
        Some(delta) => {
            info!("published new configuration generation");
            hw.state_changed(&delta).await;
        }
        None => info!("configuration unchanged; nothing to program"),
    }
    Ok(())
}
