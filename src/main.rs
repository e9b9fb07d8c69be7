//! CLI for emitter-analyze
//!
//! Subcommands:
//! - `simple`: emit one batch and print the measured summary
//! - `file`: run a scripted experiment from a JSON config file
//! - `list`, `overview`, `terminate`: inspect and clean up experiments

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Parser};
use emitter_analyze::client::{EmitterApi, EmitterClient};
use emitter_analyze::config::{ConfigFile, Settings, load_settings};
use emitter_analyze::experiment::{
    SimpleExperiment, parse_wait_seconds, run_scripted, run_simple,
};
use emitter_analyze::models::ExperimentId;
use emitter_analyze::utils::{Result, logging};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "emitter-analyze")]
enum Command {
    /// Run a simple test
    Simple {
        /// kafka-http-emitter address
        #[arg(short, long)]
        address: String,
        /// Address of the experiment source brokers
        #[arg(short, long)]
        source_brokers: String,
        /// Address of the experiment destination brokers
        #[arg(short, long)]
        dest_brokers: String,
        /// Name of the consumer group (group.id)
        #[arg(short, long)]
        consumer_group: String,
        #[arg(short, long)]
        number_of_messages: u64,
        /// Message size in the text format (e.g. 10KiB)
        #[arg(short, long)]
        message_size: String,
        /// Name of the topic for the source kafka
        #[arg(short = 't', long)]
        source_topic: String,
        /// Name of the topic for the destination kafka
        #[arg(short = 'T', long)]
        dest_topic: String,
        /// Wait time in seconds after emitting before gathering results
        #[arg(short, long, default_value_t = 10)]
        wait_for_s: u64,
        /// Wait time in seconds before emitting any messages, consumers need to start
        #[arg(short = 'W', long, default_value = "5.0", value_parser = parse_wait_seconds)]
        consumers_wait_for_s: Duration,
        /// How long kafka buffers messages before sending them
        #[arg(short = 'M', long, default_value_t = 5)]
        buffering_ms: u32,
        /// Send messages one by one instead of in a batch
        #[arg(long)]
        blocking: bool,
        #[arg(long, default_value = "10s")]
        message_timeout: String,
        /// Connect to the brokers without TLS
        #[arg(long = "no-ssl", action = ArgAction::SetFalse)]
        use_ssl: bool,
    },
    /// Run a scripted experiment from a JSON file
    File {
        /// Path to the configuration
        #[arg(short, long)]
        file: PathBuf,
    },
    /// List experiments registered on the emitter
    List {
        #[arg(short, long)]
        address: String,
    },
    /// Show message and event counts of an experiment
    Overview {
        #[arg(short, long)]
        address: String,
        #[arg(short, long)]
        experiment: ExperimentId,
    },
    /// Terminate an experiment left behind by an aborted run
    Terminate {
        #[arg(short, long)]
        address: String,
        #[arg(short, long)]
        experiment: ExperimentId,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cmd = Command::parse();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info");
            error!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&settings.logging.level);

    match run(cmd, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cmd: Command, settings: &Settings) -> Result<()> {
    let timeout = settings.http.request_timeout();

    match cmd {
        Command::Simple {
            address,
            source_brokers,
            dest_brokers,
            consumer_group,
            number_of_messages,
            message_size,
            source_topic,
            dest_topic,
            wait_for_s,
            consumers_wait_for_s,
            buffering_ms,
            blocking,
            message_timeout,
            use_ssl,
        } => {
            let client = EmitterClient::with_timeout(address, timeout)?;
            let params = SimpleExperiment {
                source_brokers,
                dest_brokers,
                consumer_group,
                source_topic,
                dest_topic,
                message_timeout,
                ssl: use_ssl,
                messages_number: number_of_messages,
                message_size,
                wait: Duration::from_secs(wait_for_s),
                consumers_wait: consumers_wait_for_s,
                blocking,
                buffering_ms,
            };
            run_simple(&client, &params).await?;
        }
        Command::File { file } => {
            let config = ConfigFile::load(&file)?;
            info!("Loaded experiment {} from {}", config.experiment_name, file.display());
            let client = Arc::new(EmitterClient::with_timeout(config.address.clone(), timeout)?);
            run_scripted(client, &config).await?;
        }
        Command::List { address } => {
            let client = EmitterClient::with_timeout(address, timeout)?;
            for experiment in client.list_experiments().await? {
                println!("{experiment}");
            }
        }
        Command::Overview {
            address,
            experiment,
        } => {
            let client = EmitterClient::with_timeout(address, timeout)?;
            let overview = client.experiment_overview(experiment).await?;
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
        Command::Terminate {
            address,
            experiment,
        } => {
            let client = EmitterClient::with_timeout(address, timeout)?;
            client.terminate_experiment(experiment).await?;
            info!("Terminated experiment {experiment}");
        }
    }
    Ok(())
}
