use std::collections::BTreeSet;

use anyhow::{Result, ensure};
use clap::Parser;
use delve_core::doors::DoorAction;
use delve_core::{Direction, Game, GameConfig, PlayerCommand, Pos};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    commands: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn next_command(rng: &mut ChaCha8Rng, game: &Game) -> PlayerCommand {
    if game.auto_exploring() && rng.next_u64() % 8 != 0 {
        return PlayerCommand::ContinueAutoExplore;
    }
    match rng.next_u64() % 10 {
        0..=5 => PlayerCommand::Move(choose(rng, &Direction::ALL)),
        6 => PlayerCommand::Door(choose(
            rng,
            &[DoorAction::Open, DoorAction::Close, DoorAction::Kick, DoorAction::Kick],
        )),
        7 => PlayerCommand::UseStairs,
        8 => PlayerCommand::PickUp,
        _ => PlayerCommand::ToggleAutoExplore,
    }
}

/// Invariants that must hold between any two commands.
fn check_invariants(game: &Game, explored_before: &BTreeSet<Pos>) -> Result<()> {
    let floor = game.floor();
    let player = game.player();
    ensure!(player.current_hp > 0, "player left dead after a command");
    ensure!(player.current_hp <= player.max_hp, "player HP above max");
    ensure!(floor.grid.is_walkable(player.pos), "player stands on {:?}", player.pos);
    ensure!(floor.monster_at(player.pos).is_none(), "monster shares the player's cell");

    let mut occupied = BTreeSet::new();
    for monster in floor.monsters.values().filter(|monster| monster.is_alive()) {
        ensure!(monster.current_hp <= monster.max_hp, "{} HP above max", monster.name);
        ensure!(floor.grid.is_walkable(monster.pos), "{} inside a wall", monster.name);
        ensure!(occupied.insert(monster.pos), "two monsters on {:?}", monster.pos);
    }

    for pos in floor.grid.positions() {
        let tile = floor.grid.tile(pos);
        ensure!(!tile.visible || tile.explored, "{pos:?} visible but never explored");
    }
    ensure!(
        explored_before.iter().all(|&pos| floor.grid.is_explored(pos)),
        "explored tiles were forgotten"
    );
    Ok(())
}

fn explored(game: &Game) -> BTreeSet<Pos> {
    let grid = &game.floor().grid;
    grid.positions().filter(|&pos| grid.is_explored(pos)).collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} commands...", args.seed, args.commands);
    let mut game = Game::new(args.seed, GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut failures = 0_u32;
    for step in 0..args.commands {
        let floor_before = game.floor().number;
        let explored_before = explored(&game);

        let command = next_command(&mut rng, &game);
        if game.act(command).is_err() {
            failures += 1;
        }

        let same_floor = game.floor().number == floor_before;
        let remembered = if same_floor { explored_before } else { BTreeSet::new() };
        check_invariants(&game, &remembered)
            .map_err(|error| error.context(format!("after command {step}: {command:?}")))?;
    }

    println!(
        "Fuzzing completed: floor {}, turn {}, {} rejected commands, hash {:016x}",
        game.floor().number,
        game.turn(),
        failures,
        game.snapshot_hash()
    );
    Ok(())
}
