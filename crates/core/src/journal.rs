use serde::{Deserialize, Serialize};

use crate::game::PlayerCommand;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Everything needed to rebuild a session: the seed plus every command in
/// the order it was issued, failed ones included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub commands: Vec<CommandRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub seq: u64,
    pub command: PlayerCommand,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, commands: Vec::new() }
    }

    /// Records `command` and returns its sequence number.
    pub fn append(&mut self, command: PlayerCommand) -> u64 {
        let seq = self.commands.len() as u64;
        self.commands.push(CommandRecord { seq, command });
        seq
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
