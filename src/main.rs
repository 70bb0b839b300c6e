mod error;
mod games;
mod logging;
mod words;

use clap::{Args, Parser, Subcommand};
use error::{Result, ScrambleError};
use games::scramble::{self, DEFAULT_AUTO_ADVANCE_MS, ScrambleConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use words::WordList;

#[derive(Parser)]
#[command(name = "kb-scramble", version, about = "Unscramble the word! A terminal word game.")]
struct Cli
{
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command
{
    /// List the built-in word packs
    List,
    /// Play a word pack or a custom word file
    Play(PlayArgs),
}

#[derive(Args)]
struct PlayArgs
{
    /// Built-in word pack to play
    #[arg(long, default_value = "names")]
    pack: String,

    /// Plain-text word file, one word per line (`#` starts a comment)
    #[arg(long, value_name = "FILE", conflicts_with = "pack")]
    words: Option<PathBuf>,

    /// Pause after a correct guess before the next word, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_AUTO_ADVANCE_MS)]
    delay_ms: u64,

    /// Seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,
}

impl PlayArgs
{
    fn config(&self) -> ScrambleConfig
    {
        ScrambleConfig::new(Duration::from_millis(self.delay_ms), self.seed)
    }
}

fn main()
{
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()>
{
    let cli = Cli::parse();
    match cli.command {
        Some(Command::List) => {
            list_packs();
            Ok(())
        }
        Some(Command::Play(args)) => {
            let _log_guard = start_logging();
            play(&args)
        }
        None => {
            let _log_guard = start_logging();
            interactive_menu()
        }
    }
}

fn start_logging() -> Option<WorkerGuard>
{
    match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: {err}. Continuing without a log file.");
            None
        }
    }
}

fn play(args: &PlayArgs) -> Result<()>
{
    match &args.words {
        Some(path) => {
            let words = WordList::from_file(path)?;
            scramble::run(words, &path.display().to_string(), args.config())
        }
        None => {
            let words = games::load_pack(&args.pack)?;
            scramble::run(words, &args.pack.to_ascii_lowercase(), args.config())
        }
    }
}

fn interactive_menu() -> Result<()>
{
    let registry = games::registry();
    println!("KB Games - Word Scramble");
    println!();
    println!("Select a word pack:");
    for (idx, pack) in registry.iter().enumerate() {
        println!("  {}. {} - {} ({} words)", idx + 1, pack.name, pack.description, pack.words.len());
    }
    println!();
    print!("Enter number or name (default 1, q to quit): ");
    std::io::Write::flush(&mut std::io::stdout())?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    match select_pack(input.trim())? {
        Some(name) => {
            let words = games::load_pack(name)?;
            scramble::run(words, name, ScrambleConfig::default())
        }
        None => Ok(()),
    }
}

/// Resolves a menu answer to a pack name. `None` means quit.
fn select_pack(choice: &str) -> Result<Option<&'static str>>
{
    let registry = games::registry();
    if choice.is_empty() {
        return Ok(Some(registry[0].name));
    }
    if choice.eq_ignore_ascii_case("q") {
        return Ok(None);
    }
    if let Ok(index) = choice.parse::<usize>() {
        if index >= 1 && index <= registry.len() {
            return Ok(Some(registry[index - 1].name));
        }
    }

    registry
        .iter()
        .find(|pack| pack.name.eq_ignore_ascii_case(choice))
        .map(|pack| Some(pack.name))
        .ok_or_else(|| ScrambleError::InvalidSelection(choice.to_string()))
}

fn list_packs()
{
    println!("Available word packs:");
    for pack in games::registry() {
        println!("  {:<10} - {} ({} words)", pack.name, pack.description, pack.words.len());
    }
    println!("\nPlay one with `kb-scramble play --pack <name>` or bring your own with `--words <file>`.");
}

#[cfg(test)]
mod tests
{
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid()
    {
        Cli::command().debug_assert();
    }

    #[test]
    fn play_defaults()
    {
        let cli = Cli::try_parse_from(["kb-scramble", "play"]).unwrap();
        match cli.command {
            Some(Command::Play(args)) => {
                assert_eq!(args.pack, "names");
                assert!(args.words.is_none());
                assert_eq!(args.config().auto_advance(), Duration::from_secs(2));
                assert_eq!(args.config().seed(), None);
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn play_accepts_a_word_file_and_seed()
    {
        let cli = Cli::try_parse_from([
            "kb-scramble",
            "play",
            "--words",
            "pets.txt",
            "--seed",
            "9",
            "--delay-ms",
            "500",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Play(args)) => {
                assert_eq!(args.words, Some(PathBuf::from("pets.txt")));
                assert_eq!(args.config().seed(), Some(9));
                assert_eq!(args.config().auto_advance(), Duration::from_millis(500));
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn pack_and_word_file_conflict()
    {
        assert!(Cli::try_parse_from(["kb-scramble", "play", "--pack", "tech", "--words", "a.txt"]).is_err());
    }

    #[test]
    fn list_parses_without_play_options()
    {
        let cli = Cli::try_parse_from(["kb-scramble", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Command::List)));
        assert!(Cli::try_parse_from(["kb-scramble", "list", "--seed", "1"]).is_err());
    }

    #[test]
    fn no_arguments_opens_the_menu()
    {
        let cli = Cli::try_parse_from(["kb-scramble"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn menu_selection()
    {
        assert_eq!(select_pack("").unwrap(), Some("names"));
        assert_eq!(select_pack("2").unwrap(), Some("animals"));
        assert_eq!(select_pack("TECH").unwrap(), Some("tech"));
        assert_eq!(select_pack("q").unwrap(), None);
        assert!(matches!(select_pack("9"), Err(ScrambleError::InvalidSelection(_))));
        assert!(matches!(select_pack("planets"), Err(ScrambleError::InvalidSelection(_))));
    }
}
