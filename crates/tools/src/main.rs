use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use delve_core::doors::DoorAction;
use delve_core::mapgen::DungeonGenerator;
use delve_core::{
    Direction, DungeonRng, Game, GameConfig, InputJournal, PlayerCommand, replay_to_end,
};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the default tuning
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one floor and print it
    Generate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 1)]
        floor: u32,
    },
    /// Play a scripted session and write its journal as JSON
    Record {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short = 'n', long, default_value_t = 200)]
        commands: u32,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Replay a journal and print the final state hash
    Replay {
        #[arg(short, long)]
        journal: PathBuf,
    },
    /// Auto-explore for a while and show what the player knows
    Inspect {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short = 'n', long, default_value_t = 50)]
        commands: u32,
    },
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    GameConfig::from_toml_str(&source)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

fn random_command(rng: &mut ChaCha8Rng) -> PlayerCommand {
    const DOORS: [DoorAction; 3] = [DoorAction::Open, DoorAction::Close, DoorAction::Kick];
    match rng.next_u64() % 16 {
        0..=9 => PlayerCommand::Move(Direction::ALL[(rng.next_u64() % 8) as usize]),
        10 => PlayerCommand::Door(DOORS[(rng.next_u64() % 3) as usize]),
        11 => PlayerCommand::UseStairs,
        12 => PlayerCommand::PickUp,
        13 => PlayerCommand::Wait,
        _ => PlayerCommand::ToggleAutoExplore,
    }
}

/// Follows auto-explore while it runs and improvises otherwise.
fn record_session(config: &GameConfig, seed: u64, commands: u32) -> (Game, InputJournal) {
    let mut game = Game::new(seed, config.clone());
    let mut journal = InputJournal::new(seed);
    let mut script = ChaCha8Rng::seed_from_u64(seed.rotate_left(17));
    for _ in 0..commands {
        let command = if game.auto_exploring() {
            PlayerCommand::ContinueAutoExplore
        } else {
            random_command(&mut script)
        };
        journal.append(command);
        let _ = game.act(command);
    }
    (game, journal)
}

fn generate(config: &GameConfig, seed: u64, floor_number: u32) -> Result<()> {
    if floor_number == 0 {
        bail!("floor numbers start at 1");
    }
    let mut rng = DungeonRng::seed_from_u64(seed);
    let floor = DungeonGenerator::new(config.generation.clone()).generate(floor_number, &mut rng);
    print!("{}", floor.grid.render_ascii());
    println!(
        "floor {floor_number}: {} rooms, {} monsters, {} staircases, fingerprint {:016x}",
        floor.rooms.len(),
        floor.monsters.len(),
        floor.staircases.len(),
        floor.fingerprint()
    );
    Ok(())
}

fn record(config: &GameConfig, seed: u64, commands: u32, out: &Path) -> Result<()> {
    let (game, journal) = record_session(config, seed, commands);
    let text = serde_json::to_string_pretty(&journal).context("Failed to serialize journal")?;
    fs::write(out, text)
        .with_context(|| format!("Failed to write journal file: {}", out.display()))?;
    println!("Recorded {} commands to {}", journal.len(), out.display());
    println!("Snapshot Hash: {}", game.snapshot_hash());
    Ok(())
}

fn replay(config: &GameConfig, path: &Path) -> Result<()> {
    let journal_data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    let journal: InputJournal =
        serde_json::from_str(&journal_data).context("Failed to deserialize journal JSON")?;
    let result = replay_to_end(config, &journal).context("Replay failed")?;

    println!("Replay complete.");
    println!("Final Turn: {}", result.final_turn);
    println!("Commands: {} ({} rejected)", result.commands_applied, result.failed_actions);
    println!("Floor: {}", result.floor_number);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);
    Ok(())
}

fn inspect(config: &GameConfig, seed: u64, commands: u32) {
    let mut game = Game::new(seed, config.clone());
    for _ in 0..commands {
        let command = if game.auto_exploring() {
            PlayerCommand::ContinueAutoExplore
        } else {
            PlayerCommand::ToggleAutoExplore
        };
        if game.act(command).is_err() && !game.auto_exploring() {
            break;
        }
    }

    print!("{}", game.render_view());
    let player = game.player();
    println!(
        "floor {} turn {} | HP {}/{} | level {} ({} xp) | {} items",
        game.floor().number,
        game.turn(),
        player.current_hp,
        player.max_hp,
        player.level,
        player.experience,
        player.inventory.len()
    );
    let log = game.log();
    for event in &log[log.len().saturating_sub(8)..] {
        println!("  {event}");
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Generate { seed, floor } => generate(&config, seed, floor),
        Command::Record { seed, commands, out } => record(&config, seed, commands, &out),
        Command::Replay { journal } => replay(&config, &journal),
        Command::Inspect { seed, commands } => {
            inspect(&config, seed, commands);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_path_means_defaults() {
        assert_eq!(load_config(None).expect("defaults"), GameConfig::default());
    }

    #[test]
    fn config_file_overrides_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("delve.toml");
        fs::write(&path, "fov_radius = 5\n[generation]\nmax_rooms = 4\n").expect("write");
        let config = load_config(Some(&path)).expect("config");
        assert_eq!(config.fov_radius, 5);
        assert_eq!(config.generation.max_rooms, 4);
    }

    #[test]
    fn invalid_config_names_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        fs::write(&path, "fov_radius = 0\n").expect("write");
        let error = load_config(Some(&path)).expect_err("fov 0 is rejected");
        assert!(error.to_string().contains("bad.toml"));
    }

    #[test]
    fn recorded_journal_file_replays_to_the_same_hash() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let config = GameConfig::default();
        record(&config, 7, 120, &path).expect("record");

        let journal: InputJournal =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
        let (game, _) = record_session(&config, 7, 120);
        let result = replay_to_end(&config, &journal).expect("replay");
        assert_eq!(result.final_snapshot_hash, game.snapshot_hash());
    }
}
