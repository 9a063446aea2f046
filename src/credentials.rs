//! Mailgun credentials kept in the platform's secure credential storage
//!
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - macOS: Keychain
//! - Windows: Credential Manager

use std::{
    fmt::Debug,
    io::{self, BufRead, Write},
};

use keyring::Entry;
use log::{debug, warn};

/// Service name used for keyring entries
pub const SERVICE_NAME: &str = "mailgun-send";

/// Entry name for the Mailgun API key
pub const API_KEY: &str = "apiKey";

/// Entry name for the Mailgun sending domain
pub const DOMAIN: &str = "domain";

const DOMAIN_PROMPT: &str = "Mailgun Domain (e.g. mg.example.com): ";
const API_KEY_PROMPT: &str = "Mailgun API Key (e.g. key-XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX): ";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("\n\t🚨  Domain is required")]
    DomainRequired,

    #[error("\n\t🚨  API Key is required")]
    ApiKeyRequired,

    #[error("\n\t🔑  Keyring error: {0}")]
    Store(#[from] keyring::Error),

    #[error("\n\t⌨️  Failed to read from terminal: {0}")]
    Prompt(#[from] io::Error),
}

pub type CredentialResult<T> = Result<T, CredentialError>;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub domain: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("domain", &self.domain)
            .finish()
    }
}

/// Persistent storage for named secrets
pub trait SecretStore {
    /// Returns `None` if there is no entry with this name
    fn get(&self, name: &str) -> CredentialResult<Option<String>>;
    fn set(&self, name: &str, value: &str) -> CredentialResult<()>;
    /// Deleting a missing entry is not an error
    fn delete(&self, name: &str) -> CredentialResult<()>;
}

/// Asks the user for values on the terminal
pub trait Prompter {
    /// Input is echoed
    fn question(&self, prompt: &str) -> io::Result<String>;
    /// Input is not echoed
    fn secret(&self, prompt: &str) -> io::Result<String>;
}

/// [`SecretStore`] backed by the system keyring
#[derive(Debug)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, name: &str) -> CredentialResult<Entry> {
        Ok(Entry::new(&self.service, name)?)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(SERVICE_NAME)
    }
}

impl SecretStore for KeyringStore {
    fn get(&self, name: &str) -> CredentialResult<Option<String>> {
        match self.entry(name)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => {
                debug!("No {name} found in keyring");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, name: &str, value: &str) -> CredentialResult<()> {
        self.entry(name)?.set_password(value)?;
        debug!("Stored {name} in keyring");
        Ok(())
    }

    fn delete(&self, name: &str) -> CredentialResult<()> {
        match self.entry(name)?.delete_credential() {
            Ok(()) => debug!("Deleted {name} from keyring"),
            Err(keyring::Error::NoEntry) => debug!("No {name} to delete from keyring"),
            Err(e) => {
                warn!("Failed to delete {name} from keyring: {e}");
                return Err(e.into());
            }
        }
        Ok(())
    }
}

/// [`Prompter`] reading from stdin, hidden input via `rpassword`
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn question(&self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn secret(&self, prompt: &str) -> io::Result<String> {
        Ok(rpassword::prompt_password(prompt)?.trim().to_string())
    }
}

/// Loads the Mailgun domain and API key, prompting for and saving any that are missing
///
/// With `reset` both stored values are removed first so the user is asked again.
/// The domain is always resolved before the API key.
pub fn fetch_credentials(
    store: &dyn SecretStore,
    prompter: &dyn Prompter,
    reset: bool,
) -> CredentialResult<Credentials> {
    if reset {
        debug!("Resetting stored credentials");
        store.delete(API_KEY)?;
        store.delete(DOMAIN)?;
    }

    let domain = match stored(store, DOMAIN)? {
        Some(domain) => domain,
        None => {
            let domain = prompter.question(DOMAIN_PROMPT)?;
            if domain.is_empty() {
                return Err(CredentialError::DomainRequired);
            }
            store.set(DOMAIN, &domain)?;
            domain
        }
    };

    let api_key = match stored(store, API_KEY)? {
        Some(api_key) => api_key,
        None => {
            let api_key = prompter.secret(API_KEY_PROMPT)?;
            if api_key.is_empty() {
                return Err(CredentialError::ApiKeyRequired);
            }
            store.set(API_KEY, &api_key)?;
            api_key
        }
    };

    Ok(Credentials { api_key, domain })
}

/// An empty stored value is treated the same as a missing one
fn stored(store: &dyn SecretStore, name: &str) -> CredentialResult<Option<String>> {
    let value = store.get(name)?;
    if value.as_deref() == Some("") {
        debug!("Stored {name} is empty, ignoring it");
        return Ok(None);
    }
    Ok(value)
}
