//! Unread mail checker
//!
//! Counts unseen messages in the inbox of each configured account. Accounts
//! come from `EMAIL_USER{n}` / `EMAIL_PASS{n}` environment pairs.
use native_tls::TlsConnector;
use tracing::debug;

use crate::error::Result;

pub const DEFAULT_IMAP_SERVER: &str = "imap.gmail.com";
pub const DEFAULT_IMAP_PORT: u16 = 993;

/// Number of `EMAIL_USER{n}` / `EMAIL_PASS{n}` pairs read from the environment
pub const ACCOUNT_SLOTS: usize = 3;

/// Mail account credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: String,
    pub password: String,
}

impl Account {
    /// Read the account stored in slot `slot` (1-based)
    pub fn from_env(slot: usize) -> Option<Self> {
        let email = std::env::var(format!("EMAIL_USER{}", slot)).ok()?;
        let password = std::env::var(format!("EMAIL_PASS{}", slot)).ok()?;

        if email.is_empty() {
            return None;
        }

        Some(Self { email, password })
    }
}

/// Source of unseen message ids for an account
pub trait Mailbox {
    fn unseen_messages(&self, account: &Account) -> Result<Vec<u32>>;
}

/// IMAP over TLS mailbox
pub struct ImapMailbox {
    server: String,
    port: u16,
}

impl ImapMailbox {
    pub fn new(server: impl Into<String>, port: u16) -> Self {
        Self {
            server: server.into(),
            port,
        }
    }
}

impl Mailbox for ImapMailbox {
    fn unseen_messages(&self, account: &Account) -> Result<Vec<u32>> {
        debug!(server = %self.server, port = self.port, email = %account.email, "connecting");

        let tls = TlsConnector::builder().build()?;
        let client = imap::connect((self.server.as_str(), self.port), &self.server, &tls)?;
        let mut session = client
            .login(&account.email, &account.password)
            .map_err(|(e, _)| e)?;

        session.select("INBOX")?;
        let unseen = session.search("UNSEEN")?;

        session.close()?;
        session.logout()?;

        let mut ids: Vec<u32> = unseen.into_iter().collect();
        ids.sort_unstable();
        debug!(email = %account.email, unseen = ids.len(), "searched inbox");
        Ok(ids)
    }
}

/// Report line for one account
pub fn check_account(mailbox: &impl Mailbox, account: &Account) -> String {
    match mailbox.unseen_messages(account) {
        Ok(ids) if ids.is_empty() => format!("{} has no new emails.", account.email),
        Ok(ids) => format!("{} has {} new emails.", account.email, ids.len()),
        Err(e) => format!("Error with {}: {}", account.email, e),
    }
}

/// Report line for a slot with no credentials configured
pub fn missing_account(slot: usize) -> String {
    format!(
        "Error with account {slot}: EMAIL_USER{slot} or EMAIL_PASS{slot} is not set",
        slot = slot
    )
}
