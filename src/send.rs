use std::fmt::Display;

use log::{debug, info};

use crate::{
    credentials::Credentials,
    error::SendError,
    mailgun::{MessageSender, ProviderError, ProviderResponse},
    message::{compose, MessageRequest},
    validation::validate,
};

/// Result of a successful send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub recipient: String,
    pub response: ProviderResponse,
    pub verbose: bool,
}

impl Display for SendOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "🚀  ✉️  Email was successfully sent to {}!",
            self.recipient
        )?;
        if self.verbose {
            write!(
                f,
                "\n\tMessage ID: {}\n\tAPI Message: {}",
                self.response.id, self.response.message
            )?;
        }
        Ok(())
    }
}

/// Validates, composes and sends one message
///
/// Nothing reaches `sender` unless the request is valid and the HTML file (if
/// any) could be read.
pub fn send(
    request: &MessageRequest,
    credentials: &Credentials,
    sender: &dyn MessageSender,
) -> Result<SendOutcome, SendError> {
    validate(request)?;
    let payload = compose(request)?;

    debug!("Sending message to {} via {}", payload.to, credentials.domain);
    let response = sender
        .create_message(&credentials.domain, &payload)
        .map_err(|e| {
            debug!("Provider call failed: {e}");
            match e {
                ProviderError::Unauthorized(_) => SendError::Auth,
                ProviderError::Unreachable(_) => SendError::Connectivity,
                ProviderError::Rejected { message } => SendError::Provider(message),
            }
        })?;
    info!("Message accepted with id {}", response.id);

    Ok(SendOutcome {
        recipient: payload.to,
        response,
        verbose: request.verbose,
    })
}
