use std::error::Error;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use poker_table::agents::{BotAgent, BotProfile, HumanAgent, PlayerAgent, SharedInput};
use poker_table::config::{ConfigOverrides, TableConfig};
use poker_table::display;
use poker_table::game::Table;
use poker_table::player::Player;
use poker_table::variants::draw::DrawTable;

#[derive(Parser)]
#[command(name = "poker-table", version)]
#[command(about = "Play poker against bots in the terminal")]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// TOML config file (falls back to $POKER_TABLE_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Disable coloured cards
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Texas hold'em with blinds until one player has every chip
    Holdem(TableArgs),
    /// One hand of five-card draw, no betting
    Draw(TableArgs),
}

#[derive(Args)]
struct TableArgs {
    /// Seats at the table, humans included
    #[arg(short, long)]
    players: Option<usize>,
    /// Human seats (0 lets the bots play alone)
    #[arg(long)]
    humans: Option<usize>,
    #[arg(long)]
    starting_stack: Option<u64>,
    #[arg(long)]
    small_blind: Option<u64>,
    #[arg(long)]
    big_blind: Option<u64>,
    /// Seed for shuffles and bots
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many rounds
    #[arg(long)]
    max_rounds: Option<u32>,
    /// Attempts per decision before a default action is applied
    #[arg(long)]
    max_retries: Option<u32>,
}

impl From<&TableArgs> for ConfigOverrides {
    fn from(a: &TableArgs) -> Self {
        ConfigOverrides {
            players: a.players,
            humans: a.humans,
            starting_stack: a.starting_stack,
            small_blind: a.small_blind,
            big_blind: a.big_blind,
            seed: a.seed,
            max_rounds: a.max_rounds,
            max_retries: a.max_retries,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Humans take the first seats, bots the rest. Human seats share one stdin
/// reader.
fn seats(cfg: &TableConfig, color: bool) -> Vec<(String, Box<dyn PlayerAgent>)> {
    let stdin = SharedInput::stdin();
    (0..cfg.players)
        .map(|i| -> (String, Box<dyn PlayerAgent>) {
            if i < cfg.humans {
                let name = if cfg.humans == 1 { "You".to_string() } else { format!("Human {}", i + 1) };
                (name, Box::new(HumanAgent::stdio(&stdin, color)))
            } else {
                let mut profile = BotProfile::cautious();
                if let Some(seed) = cfg.seed {
                    profile = profile.with_seed(seed.wrapping_add(i as u64 + 1));
                }
                (format!("Bot {}", i + 1), Box::new(BotAgent::new(profile)))
            }
        })
        .collect()
}

fn run_holdem(cfg: &TableConfig, color: bool) -> Result<(), Box<dyn Error>> {
    let mut table = Table::from_config(cfg);
    for (name, agent) in seats(cfg, color) {
        table.seat(Player::new(name, cfg.starting_stack), agent)?;
    }
    let outcome = table.play(cfg.max_rounds)?;
    if cfg.humans == 0 {
        println!("after {} rounds:", outcome.rounds);
        for (name, stack) in &outcome.standings {
            println!("  {name:<10} {stack}");
        }
    }
    Ok(())
}

fn run_draw(cfg: &TableConfig, color: bool) -> Result<(), Box<dyn Error>> {
    let mut table = match cfg.seed {
        Some(seed) => DrawTable::with_seed(seed),
        None => DrawTable::new(),
    }
    .with_max_retries(cfg.max_retries);
    for (name, agent) in seats(cfg, color) {
        table.seat(name, agent);
    }
    let outcome = table.play()?;
    for r in &outcome.results {
        println!(
            "{:<10} {} -> {}",
            r.name,
            display::cards(&r.hand, color),
            r.evaluation.category()
        );
    }
    let names: Vec<&str> = outcome
        .results
        .iter()
        .filter(|r| outcome.winners.contains(&r.seat))
        .map(|r| r.name.as_str())
        .collect();
    if outcome.is_split() {
        println!("Split between {}", names.join(" and "));
    } else {
        println!("{} wins!", names.join(""));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let args = match &cli.command {
        Command::Holdem(a) | Command::Draw(a) => a,
    };
    let cfg = TableConfig::load(cli.config.as_deref())?.with_overrides(&args.into());
    cfg.validate()?;
    log::info!("config: {cfg:?}");

    let color = !cli.no_color && io::stdout().is_terminal();
    match cli.command {
        Command::Holdem(_) => run_holdem(&cfg, color),
        Command::Draw(_) => run_draw(&cfg, color),
    }
}
