//! In-memory stand-ins for the keyring, the terminal and Mailgun

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    io,
};

use crate::{
    credentials::{CredentialResult, Prompter, SecretStore, API_KEY, DOMAIN},
    mailgun::{MessageSender, ProviderError, ProviderResponse},
    message::MailgunPayload,
};

#[derive(Default)]
pub struct MemoryStore {
    pub data: RefCell<HashMap<String, String>>,
    pub reads: RefCell<Vec<String>>,
    pub writes: RefCell<Vec<String>>,
    pub deletes: RefCell<Vec<String>>,
}

impl MemoryStore {
    pub fn with(domain: &str, api_key: &str) -> Self {
        let result = Self::default();
        result.data.borrow_mut().insert(DOMAIN.into(), domain.into());
        result.data.borrow_mut().insert(API_KEY.into(), api_key.into());
        result
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.data.borrow().get(name).cloned()
    }

    pub fn untouched(&self) -> bool {
        self.reads.borrow().is_empty()
            && self.writes.borrow().is_empty()
            && self.deletes.borrow().is_empty()
    }
}

impl SecretStore for MemoryStore {
    fn get(&self, name: &str) -> CredentialResult<Option<String>> {
        self.reads.borrow_mut().push(name.to_string());
        Ok(self.value(name))
    }

    fn set(&self, name: &str, value: &str) -> CredentialResult<()> {
        self.writes.borrow_mut().push(name.to_string());
        self.data.borrow_mut().insert(name.into(), value.into());
        Ok(())
    }

    fn delete(&self, name: &str) -> CredentialResult<()> {
        self.deletes.borrow_mut().push(name.to_string());
        self.data.borrow_mut().remove(name);
        Ok(())
    }
}

/// Answers prompts in order and records which kind of prompt was used
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: RefCell<VecDeque<String>>,
    pub asked: RefCell<Vec<(String, bool)>>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|s| s.to_string()).collect()),
            asked: Default::default(),
        }
    }

    fn next(&self, prompt: &str, hidden: bool) -> io::Result<String> {
        self.asked.borrow_mut().push((prompt.to_string(), hidden));
        Ok(self.answers.borrow_mut().pop_front().unwrap_or_default())
    }
}

impl Prompter for ScriptedPrompter {
    fn question(&self, prompt: &str) -> io::Result<String> {
        self.next(prompt, false)
    }

    fn secret(&self, prompt: &str) -> io::Result<String> {
        self.next(prompt, true)
    }
}

/// Records each call and replies with whatever `reply` produces
pub struct FakeSender {
    pub calls: Cell<usize>,
    pub last: RefCell<Option<(String, MailgunPayload)>>,
    reply: fn() -> Result<ProviderResponse, ProviderError>,
}

impl FakeSender {
    pub fn new(reply: fn() -> Result<ProviderResponse, ProviderError>) -> Self {
        Self {
            calls: Cell::new(0),
            last: RefCell::new(None),
            reply,
        }
    }

    pub fn queued() -> Self {
        Self::new(|| {
            Ok(ProviderResponse {
                id: "<msg-1@mg.example.com>".into(),
                message: "Queued. Thank you.".into(),
            })
        })
    }
}

impl MessageSender for FakeSender {
    fn create_message(
        &self,
        domain: &str,
        payload: &MailgunPayload,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        *self.last.borrow_mut() = Some((domain.to_string(), payload.clone()));
        (self.reply)()
    }
}

impl MessageSender for &FakeSender {
    fn create_message(
        &self,
        domain: &str,
        payload: &MailgunPayload,
    ) -> Result<ProviderResponse, ProviderError> {
        (**self).create_message(domain, payload)
    }
}
