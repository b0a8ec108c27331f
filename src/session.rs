//! Interactive member session.
//!
//! A [`Session`] drives the menus over a [`Console`] and applies the user's
//! choices to a [`RecordStore`], saving the member file after every change.
//!
//! ```text
//!            1: register (stays)
//!          +-----------+
//!          v           |
//!     +-----------+ 2: login ok  +-----------+
//!     | Anonymous |------------->| LoggedIn  |--+ 5/6/7: not implemented
//!     +-----------+<-------------+-----------+<-+
//!          |        3: logout /
//!          | 0      4: withdraw
//!          v
//!        Exit
//! ```

mod console;
mod error;

pub use console::{Console, PROMPT};
pub use error::{ConsoleError, SessionError};

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::record::{self, SlotId};
use crate::store::{RecordStore, StoreError};

const EXIT: i64 = 0;
const REGISTER: i64 = 1;
const LOGIN: i64 = 2;
const LOGOUT: i64 = 3;
const WITHDRAW: i64 = 4;
const RESERVE: i64 = 5;
const CANCEL_RESERVATION: i64 = 6;
const LIST_RESERVATIONS: i64 = 7;
const CONFIRM_YES: i64 = 1;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Top menu, nobody logged in.
    Anonymous,
    /// Member menu for the member in this slot.
    LoggedIn(SlotId),
    /// User chose to quit.
    Exit,
}

/// One interactive session over a record store.
pub struct Session<'a, R, W> {
    store: &'a mut RecordStore,
    data_file: PathBuf,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Creates a session that saves to `data_file` after every change.
    pub fn new(store: &'a mut RecordStore, data_file: &Path, console: Console<R, W>) -> Self {
        Self {
            store,
            data_file: data_file.to_path_buf(),
            console,
        }
    }

    /// Consumes the session, returning the console output stream.
    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Runs menus until the user exits.
    ///
    /// # Errors
    ///
    /// Returns an error when the console closes or fails, or when the member
    /// file cannot be saved. Both end the session.
    pub fn run(&mut self) -> Result<(), SessionError> {
        let mut state = State::Anonymous;
        while state != State::Exit {
            state = self.step(state)?;
        }
        Ok(())
    }

    /// Shows the menu for `state`, handles one choice and returns the next
    /// state.
    pub fn step(&mut self, state: State) -> Result<State, SessionError> {
        match state {
            State::Anonymous => self.top_menu(),
            State::LoggedIn(slot) => self.member_menu(slot),
            State::Exit => Ok(State::Exit),
        }
    }

    fn top_menu(&mut self) -> Result<State, SessionError> {
        self.console.say("Select one of the following.")?;
        self.console.say("1: Register, 2: Log in, 0: Exit")?;
        match self.console.read_number()? {
            EXIT => Ok(State::Exit),
            REGISTER => {
                self.register()?;
                Ok(State::Anonymous)
            }
            LOGIN => self.login(),
            _ => Ok(State::Anonymous),
        }
    }

    fn register(&mut self) -> Result<(), SessionError> {
        let slot = match self.store.allocate() {
            Ok(slot) => slot,
            Err(StoreError::Full { .. }) => {
                self.console.say("No more members can be registered.\n")?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.console.say("Enter the name to register.")?;
        let name = loop {
            let name = self.console.read_field(&record::NAME)?;
            if self.store.find_by_name(&name).is_none() {
                break name;
            }
            self.console
                .say("That name is already registered.\nPlease enter another.\n")?;
        };

        self.console.say("Next, enter the password to register.")?;
        let password = self.console.read_field(&record::PASSWORD)?;

        let id = match self.store.commit(slot, &name, &password) {
            Ok(record) => record.id.clone(),
            Err(e) => {
                warn!(%slot, error = %e, "registration rejected");
                self.console.say(&format!("Registration failed: {e}\n"))?;
                return Ok(());
            }
        };
        self.console.say(&format!("Your id is {id}."))?;
        self.store.save_to(&self.data_file)?;
        info!(%slot, %id, "member registered");
        self.console.say("Registration complete.\n")?;
        Ok(())
    }

    fn login(&mut self) -> Result<State, SessionError> {
        self.console.say("Enter your id.")?;
        let id = self.console.read_field(&record::ID)?;
        self.console.say("Enter your password.")?;
        let password = self.console.read_field(&record::PASSWORD)?;

        let found = self.store.find_by_id(&id).filter(|&slot| {
            self.store
                .get(slot)
                .is_some_and(|record| record.password_matches(&password))
        });
        match found {
            Some(slot) => {
                info!(%slot, %id, "member logged in");
                self.console.say("Login succeeded.\n")?;
                Ok(State::LoggedIn(slot))
            }
            None => {
                info!(%id, "login failed");
                self.console.say("Login failed.\n")?;
                Ok(State::Anonymous)
            }
        }
    }

    fn member_menu(&mut self, slot: SlotId) -> Result<State, SessionError> {
        self.console.say("Select one of the following.")?;
        self.console.say(
            "3: Log out, 4: Withdraw, 5: Reserve, 6: Cancel reservation, 7: Check reservations",
        )?;
        match self.console.read_number()? {
            LOGOUT => {
                self.console.say("Logged out.\n")?;
                Ok(State::Anonymous)
            }
            WITHDRAW => self.withdraw(slot),
            RESERVE | CANCEL_RESERVATION | LIST_RESERVATIONS => {
                self.console.say("This feature is not implemented yet.\n")?;
                Ok(State::LoggedIn(slot))
            }
            _ => Ok(State::LoggedIn(slot)),
        }
    }

    fn withdraw(&mut self, slot: SlotId) -> Result<State, SessionError> {
        self.console.say("Do you really want to withdraw?")?;
        self.console.say("1: yes, 2: no")?;
        if self.console.read_number()? != CONFIRM_YES {
            return Ok(State::LoggedIn(slot));
        }

        self.store.soft_delete(slot)?;
        self.store.save_to(&self.data_file)?;
        info!(%slot, "member withdrew");
        self.console.say("You have withdrawn.\n")?;
        Ok(State::Anonymous)
    }
}
