// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crashgate — crash dump upload consent
//
// Entry point. Initialises logging, loads config from the data directory,
// and runs one subcommand against the platform bridge and preference store.

mod data_dir;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use crashgate_bridge::{FilePreferences, NativeNetwork, PlatformBridge};
use crashgate_core::error::Result;
use crashgate_core::labels::display_label;
use crashgate_core::{ConnectivityState, NetworkCapability, UploadDecision, UserUploadPreference};
use crashgate_policy::{FixedNetwork, PrivacyPreferencesManager, evaluate};

#[derive(Parser, Debug)]
#[command(name = "crashgate")]
#[command(version)]
#[command(about = "Inspect and set crash dump upload consent", long_about = None)]
struct Cli {
    /// Data directory holding config.json and the preference file
    /// (default: $XDG_DATA_HOME/crashgate)
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide whether an upload is permitted right now
    Status(StatusArgs),

    /// Evaluate the policy for explicit inputs, ignoring stored state
    Check(CheckArgs),

    /// Store the user's upload preference
    Set {
        #[arg(value_enum)]
        preference: PreferenceArg,
    },

    /// List upload preferences with their stored values and labels
    Labels,
}

#[derive(Args, Debug)]
struct StatusArgs {
    /// Use this connectivity instead of asking the platform
    #[arg(long = "network", value_enum)]
    network: Option<NetworkArg>,

    /// With --network: the device has a cellular radio
    #[arg(long = "mobile-capable", default_value_t = false)]
    mobile_capable: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[arg(long = "preference", value_enum)]
    preference: PreferenceArg,

    /// A network connection exists
    #[arg(long = "connected", default_value_t = false)]
    connected: bool,

    /// The connection is Wi-Fi or Ethernet
    #[arg(long = "wifi", default_value_t = false)]
    wifi: bool,

    /// The device has a cellular radio
    #[arg(long = "mobile-capable", default_value_t = false)]
    mobile_capable: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PreferenceArg {
    Always,
    WifiOnly,
    Never,
}

impl From<PreferenceArg> for UserUploadPreference {
    fn from(arg: PreferenceArg) -> Self {
        match arg {
            PreferenceArg::Always => Self::Always,
            PreferenceArg::WifiOnly => Self::WifiOnly,
            PreferenceArg::Never => Self::Never,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NetworkArg {
    Offline,
    Cellular,
    Wifi,
}

impl From<NetworkArg> for ConnectivityState {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Offline => Self::DISCONNECTED,
            NetworkArg::Cellular => Self::cellular(),
            NetworkArg::Wifi => Self::unmetered(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    exit_code(run(Cli::parse()))
}

/// Exit 2 on any error; otherwise the code the subcommand chose.
fn exit_code(result: Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "crashgate failed");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Check(args) => {
            let capability = NetworkCapability {
                mobile_network_capable: args.mobile_capable,
            };
            let connectivity = ConnectivityState::new(args.connected, args.wifi);
            let decision = evaluate(capability, connectivity, args.preference.into());
            Ok(report(decision))
        }
        Commands::Labels => {
            for pref in UserUploadPreference::ALL {
                println!("{:<28} {}", pref.as_str(), display_label(pref));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Set { preference } => {
            let manager = open_manager(cli.data_dir, Box::new(crashgate_bridge::platform_bridge()))?;
            let preference = UserUploadPreference::from(preference);
            manager.set_upload_preference(preference)?;
            println!("upload preference set to {}", display_label(preference));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Status(args) => {
            let network: Box<dyn NativeNetwork> = match args.network {
                Some(network) => Box::new(FixedNetwork::new(
                    NetworkCapability {
                        mobile_network_capable: args.mobile_capable,
                    },
                    network.into(),
                )),
                None => {
                    let bridge = crashgate_bridge::platform_bridge();
                    tracing::info!(platform = bridge.platform_name(), "probing connectivity");
                    Box::new(bridge)
                }
            };
            let manager = open_manager(cli.data_dir, network)?;
            let preference = manager.upload_preference()?;
            println!("preference: {}", display_label(preference));
            Ok(report(manager.upload_decision()?))
        }
    }
}

/// Manager over `network` and the desktop preference file.
fn open_manager(
    data_dir: Option<PathBuf>,
    network: Box<dyn NativeNetwork>,
) -> Result<PrivacyPreferencesManager<Box<dyn NativeNetwork>, FilePreferences>> {
    let dir = data_dir::data_dir(data_dir)?;
    let config = settings::load_config(&dir)?;
    let prefs = FilePreferences::open(dir.join(&config.preferences_file))?;
    tracing::debug!(path = %prefs.path().display(), "preference store opened");
    Ok(PrivacyPreferencesManager::new(network, prefs, &config))
}

/// Print the decision; exit 0 when permitted, 1 when not.
fn report(decision: UploadDecision) -> ExitCode {
    println!("{decision}");
    if decision.is_permitted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
