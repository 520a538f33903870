use crate::error::Result;
use crate::mail::{self, Account, ImapMailbox, ACCOUNT_SLOTS};

/// Print the unread count for every configured account
pub fn run(server: String, port: u16) -> Result<()> {
    let mailbox = ImapMailbox::new(server, port);

    for slot in 1..=ACCOUNT_SLOTS {
        let line = match Account::from_env(slot) {
            Some(account) => mail::check_account(&mailbox, &account),
            None => mail::missing_account(slot),
        };
        println!("{}", line);
    }

    Ok(())
}
