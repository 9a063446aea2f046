use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::debug;
use mailgun_send::{init_logging, run, Cli, Config, CredentialError, SendError, SendOutcome};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_main(&cli) {
        Ok(outcome) => {
            println!("\n✅  Success!\n\t{outcome}\n");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("{e:?}");
            println!("\n🚨  Error:{}\n", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> anyhow::Result<SendOutcome> {
    let config = match &cli.config_filename {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };
    init_logging(cli.log_level.into(), config.log_file.as_deref())
        .context("Failed to initialize logging")?;
    run(cli, &config)
}

/// Known errors already carry a formatted message, anything else gets its full chain
fn user_message(e: &anyhow::Error) -> String {
    if e.downcast_ref::<SendError>().is_some() || e.downcast_ref::<CredentialError>().is_some() {
        format!("{e}")
    } else {
        format!(" {e:#}")
    }
}
