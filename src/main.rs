use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fitaccess_sms::metrics::encode_metrics;
use fitaccess_sms::sms::ProviderKind;
use fitaccess_sms::state::AppState;
use fitaccess_sms::template::Variables;

/// Templated SMS notifications for FitAccess members
#[derive(Parser, Debug)]
#[command(name = "fitaccess-sms", version)]
struct Cli {
    /// Additional configuration file, layered over config/default and config/<RUN_MODE>
    #[arg(short, long, global = true, env = "FITACCESS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured provider (twilio, aws-sns, firebase, custom)
    #[arg(short, long, global = true)]
    provider: Option<ProviderKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the registered templates as JSON
    Templates,

    /// Render a template and send it
    Send {
        /// Destination phone number
        #[arg(long)]
        to: String,

        /// Template ID
        #[arg(short, long)]
        template: String,

        /// Substitution as key=value, repeatable
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,
    },

    /// Print send statistics and Prometheus metrics
    Stats,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value pair: no '=' in '{}'", s))?;
    Ok((key.trim().to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let state = AppState::bootstrap(cli.config.as_deref(), cli.provider)
        .context("Failed to start SMS dispatcher")?;

    match cli.command {
        Commands::Templates => {
            let templates = state.dispatcher.list_templates();
            println!("{}", serde_json::to_string_pretty(&templates)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Send { to, template, vars } => {
            let variables: Variables = vars.into_iter().collect();
            let result = state
                .dispatcher
                .render_and_send(&to, &template, variables)
                .await;

            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(if result.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Stats => {
            let stats = state.dispatcher.statistics();
            println!("{}", serde_json::to_string_pretty(&stats)?);
            print!("{}", encode_metrics()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
