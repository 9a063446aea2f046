mod cli;
mod config;
mod credentials;
mod error;
mod logging;
mod mailgun;
mod message;
mod send;
mod units;
mod validation;

#[cfg(test)]
mod test_utils;

pub use cli::{Cli, LogLevel};
pub use config::{Config, Region};
pub use credentials::{
    fetch_credentials, CredentialError, Credentials, KeyringStore, Prompter, SecretStore,
    TerminalPrompter,
};
pub use error::SendError;
pub use logging::init_logging;
pub use mailgun::{MailgunClient, MessageSender, ProviderError, ProviderResponse};
pub use message::{compose, MailgunPayload, MessageRequest};
pub use send::{send, SendOutcome};
pub use units::Seconds;
pub use validation::{validate, ValidationErrors};

use log::debug;

/// Sends the message described by `cli` using the stored (or prompted for) credentials
pub fn run(cli: &Cli, config: &Config) -> anyhow::Result<SendOutcome> {
    run_with(
        &cli.message_request(),
        cli.reset,
        &KeyringStore::default(),
        &TerminalPrompter,
        |credentials| MailgunClient::new(credentials, config),
    )
}

/// The request is validated before `store` or `prompter` are touched and
/// `connect` is only called once credentials are resolved.
fn run_with<S: MessageSender>(
    request: &MessageRequest,
    reset: bool,
    store: &dyn SecretStore,
    prompter: &dyn Prompter,
    connect: impl FnOnce(&Credentials) -> anyhow::Result<S>,
) -> anyhow::Result<SendOutcome> {
    validate(request).map_err(SendError::from)?;

    let credentials = fetch_credentials(store, prompter, reset)?;
    debug!("Using credentials for {}", credentials.domain);

    let sender = connect(&credentials)?;
    let outcome = send(request, &credentials, &sender)?;
    Ok(outcome)
}
