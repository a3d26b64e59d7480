//! Re-running a recorded session from its journal.

use crate::config::GameConfig;
use crate::error::ReplayError;
use crate::game::Game;
use crate::journal::{InputJournal, JOURNAL_FORMAT_VERSION};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_snapshot_hash: u64,
    pub final_turn: u64,
    pub commands_applied: u64,
    /// Commands that were rejected during play; they replay as rejections too.
    pub failed_actions: usize,
    pub floor_number: u32,
}

/// Rebuilds the session a journal describes.
pub fn replay_game(config: &GameConfig, journal: &InputJournal) -> Result<Game, ReplayError> {
    run_journal(config, journal).map(|(game, _)| game)
}

pub fn replay_to_end(
    config: &GameConfig,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    let (game, failed_actions) = run_journal(config, journal)?;
    Ok(ReplayResult {
        final_snapshot_hash: game.snapshot_hash(),
        final_turn: game.turn(),
        commands_applied: game.commands_applied(),
        failed_actions,
        floor_number: game.floor().number,
    })
}

fn run_journal(config: &GameConfig, journal: &InputJournal) -> Result<(Game, usize), ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: journal.format_version,
            expected: JOURNAL_FORMAT_VERSION,
        });
    }

    let mut game = Game::new(journal.seed, config.clone());
    let mut failed = 0;
    for (index, record) in journal.commands.iter().enumerate() {
        let expected = index as u64;
        if record.seq != expected {
            return Err(ReplayError::OutOfSequence { index, expected, found: record.seq });
        }
        if game.act(record.command).is_err() {
            failed += 1;
        }
    }
    log::debug!(
        "replayed {} commands for seed {} ({failed} rejected)",
        journal.len(),
        journal.seed
    );
    Ok((game, failed))
}
