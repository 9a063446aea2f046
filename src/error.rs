use std::path::PathBuf;

use crate::validation::ValidationErrors;

/// Every way a send can fail once credentials are in hand
///
/// `Display` output is shown to the user as is. `Auth` and `Connectivity`
/// never include provider text.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("\n\t📄  Unable to read HTML file {path:?}: {source}")]
    LocalResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "\n\t🚫  Your Mailgun credentials are incorrect. Check the API key and domain.\n\t🔐  Rerun your command with -R flag to re-enter your credentials."
    )]
    Auth,

    #[error(
        "\n\t‼️ 🌐  Looks like you may not be connected to the internet. Check your network settings and try again."
    )]
    Connectivity,

    #[error("\n\t{0}")]
    Provider(String),
}
