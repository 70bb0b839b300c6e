pub mod session;

use crate::error::Result;
use crate::words::{WordList, is_guess_char};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use rand::SeedableRng;
use rand::rngs::StdRng;
use session::{Advance, GuessResult, Phase, Session, Summary};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

pub const DEFAULT_AUTO_ADVANCE_MS: u64 = 2000;
const MIN_AUTO_ADVANCE_MS: u64 = 250;
const MAX_AUTO_ADVANCE_MS: u64 = 10_000;
const TICK_MS: u64 = 33;
const PROGRESS_WIDTH: usize = 30;

/// 24-bit terminal colour.
#[derive(Clone, Copy)]
struct Rgb
{
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb
{
    fn fg(self, text: &str) -> String
    {
        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", self.r, self.g, self.b, text)
    }

    fn bg(self, text: &str) -> String
    {
        format!("\x1b[48;2;{};{};{}m{}\x1b[0m", self.r, self.g, self.b, text)
    }
}

const TILE: Rgb = Rgb { r: 150, g: 120, b: 0 };
const TILE_REVEALED: Rgb = Rgb { r: 0, g: 150, b: 70 };
const INPUT_TILE: Rgb = Rgb { r: 40, g: 40, b: 40 };
const GREEN: Rgb = Rgb { r: 0, g: 200, b: 80 };
const RED: Rgb = Rgb { r: 230, g: 60, b: 60 };
const ORANGE: Rgb = Rgb { r: 255, g: 140, b: 0 };

#[derive(Clone, Copy, Debug)]
pub struct ScrambleConfig
{
    auto_advance: Duration,
    seed: Option<u64>,
}

impl ScrambleConfig
{
    /// The auto-advance delay is clamped to 250ms..=10s.
    pub fn new(auto_advance: Duration, seed: Option<u64>) -> Self
    {
        let millis = (auto_advance.as_millis() as u64).clamp(MIN_AUTO_ADVANCE_MS, MAX_AUTO_ADVANCE_MS);
        Self {
            auto_advance: Duration::from_millis(millis),
            seed,
        }
    }

    pub fn auto_advance(&self) -> Duration
    {
        self.auto_advance
    }

    pub fn seed(&self) -> Option<u64>
    {
        self.seed
    }

    pub fn rng(&self) -> StdRng
    {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for ScrambleConfig
{
    fn default() -> Self
    {
        Self::new(Duration::from_millis(DEFAULT_AUTO_ADVANCE_MS), None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action
{
    Type(char),
    Backspace,
    Enter,
    Reveal,
    Next,
    Skip,
    Reset,
    Reshuffle,
    ClearInput,
    Quit,
}

/// Raw mode plus alternate screen for as long as the game runs.
struct TerminalGuard
{
    stdout: Stdout,
}

impl TerminalGuard
{
    fn enter() -> io::Result<Self>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }

    fn draw(&mut self, lines: &[String]) -> Result<()>
    {
        let output = format!("{}\r\n", lines.join("\r\n"));
        queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        self.stdout.write_all(output.as_bytes())?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub fn run(words: WordList, pack_name: &str, config: ScrambleConfig) -> Result<()>
{
    tracing::info!(
        pack = pack_name,
        seed = ?config.seed(),
        delay_ms = config.auto_advance().as_millis() as u64,
        "starting word scramble"
    );
    let mut term = TerminalGuard::enter()?;
    let mut session = Session::new(words, &config);
    let mut message: Option<String> = None;
    let mut last_draw: Option<Instant> = None;

    loop {
        if handle_input(&mut session, &mut message)? {
            break;
        }

        session.tick(Instant::now());

        if session.is_completed() {
            term.draw(&summary_lines(pack_name, &session.summary()))?;
            if wait_for_choice()? {
                session.reset();
                message = None;
                last_draw = None;
                continue;
            }
            break;
        }

        if last_draw.is_none_or(|at| at.elapsed() >= Duration::from_millis(TICK_MS)) {
            let lines = render_lines(&session, pack_name, Instant::now(), &message);
            term.draw(&lines)?;
            last_draw = Some(Instant::now());
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    Ok(())
}

fn handle_input(session: &mut Session, message: &mut Option<String>) -> Result<bool>
{
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? {
            if kind == KeyEventKind::Release {
                continue;
            }
            if let Some(action) = action_for_key(code, modifiers) {
                if apply_action(session, action, Instant::now(), message) {
                    return Ok(true);
                }
            }
        }
    }

    Ok(false)
}

fn action_for_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Action>
{
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::Next),
            KeyCode::Char('s') => Some(Action::Skip),
            KeyCode::Char('r') => Some(Action::Reset),
            KeyCode::Char('t') => Some(Action::Reshuffle),
            KeyCode::Char('u') => Some(Action::ClearInput),
            _ => None,
        };
    }

    match code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Tab => Some(Action::Reveal),
        KeyCode::Char(ch) if is_guess_char(ch) => Some(Action::Type(ch.to_ascii_uppercase())),
        _ => None,
    }
}

/// Applies one action to the session. Returns true when the player quits.
fn apply_action(
    session: &mut Session,
    action: Action,
    now: Instant,
    message: &mut Option<String>,
) -> bool
{
    *message = None;
    match action {
        Action::Quit => return true,
        Action::Type(ch) => {
            session.push_char(ch);
        }
        Action::Backspace => {
            session.pop_char();
        }
        Action::ClearInput => {
            session.clear_input();
        }
        Action::Enter => match session.phase() {
            Phase::Unanswered => {
                if session.submit_guess(now).is_none() {
                    *message = Some("Type a guess first.".to_string());
                }
            }
            Phase::Incorrect => {
                session.retry();
            }
            Phase::Revealed => {
                log_advance(session.advance());
            }
            Phase::Correct | Phase::Completed => {}
        },
        Action::Reveal => {
            if !session.reveal() {
                *message = Some("Nothing to reveal right now.".to_string());
            }
        }
        Action::Next => {
            if session.can_advance() {
                log_advance(session.advance());
            } else {
                *message = Some("Reveal the answer or skip to move on.".to_string());
            }
        }
        Action::Skip => {
            log_advance(session.skip());
        }
        Action::Reset => {
            session.reset();
            *message = Some("Game reset.".to_string());
        }
        Action::Reshuffle => {
            session.reshuffle();
        }
    }
    false
}

fn log_advance(advance: Advance)
{
    if let Advance::Next(index) = advance {
        tracing::trace!(index, "manual advance");
    }
}

fn render_lines(
    session: &Session,
    pack_name: &str,
    now: Instant,
    message: &Option<String>,
) -> Vec<String>
{
    let (position, total) = session.progress();
    let mut lines = Vec::new();
    lines.push("KB Games - Word Scramble".to_string());
    lines.push(format!("Pack: {}", pack_name));
    lines.push(format!(
        "Word {}/{}  Score: {}  Accuracy: {}% ({}/{})  Guesses: {}",
        position,
        total,
        session.score(),
        session.accuracy(),
        session.correct_count(),
        session.total_attempts(),
        session.attempts()
    ));
    lines.push(String::new());

    let tile = if session.is_revealed() { TILE_REVEALED } else { TILE };
    lines.push(render_tiles(session.display(), tile));
    if session.is_revealed() {
        lines.push(GREEN.fg("Correct answer revealed!"));
    } else {
        lines.push(String::new());
    }
    lines.push(String::new());

    if session.accepts_input() {
        lines.push(render_input(session.input()));
    } else {
        lines.push(String::new());
    }

    lines.push(feedback_line(session, now));
    lines.push(String::new());
    lines.push(render_progress(position, total));
    lines.push(String::new());

    if let Some(msg) = message {
        lines.push(msg.clone());
    } else {
        lines.push(controls_hint(session.phase()).to_string());
    }
    lines.push("Tab reveal  Ctrl+U clear  Ctrl+S skip  Ctrl+T re-shuffle  Ctrl+R reset  Esc quit".to_string());
    lines
}

fn feedback_line(session: &Session, now: Instant) -> String
{
    match session.result() {
        GuessResult::Correct => {
            let wait = session
                .auto_advance_in(now)
                .unwrap_or_default()
                .as_secs_f32();
            GREEN.fg(&format!("Correct! Well done! Moving to next word in {:.1}s", wait))
        }
        GuessResult::Incorrect => RED.fg("Not quite right. Try again!"),
        GuessResult::Unknown => String::new(),
    }
}

fn controls_hint(phase: Phase) -> &'static str
{
    match phase {
        Phase::Unanswered => "Type your guess and press Enter.",
        Phase::Correct => "Get ready for the next word...",
        Phase::Incorrect => "Enter to try again, Tab to show the answer, or keep editing.",
        Phase::Revealed => "Enter or Ctrl+N for the next word.",
        Phase::Completed => "Game complete!",
    }
}

fn render_tiles(text: &str, color: Rgb) -> String
{
    let mut row = String::new();
    for ch in text.chars() {
        if ch == ' ' {
            row.push_str("   ");
        } else {
            row.push_str(&color.bg(&format!(" {} ", ch)));
        }
    }
    row
}

fn render_input(input: &str) -> String
{
    if input.is_empty() {
        return "Guess: (enter your guess)".to_string();
    }
    let mut row = "Guess: ".to_string();
    row.push_str(&INPUT_TILE.bg(input));
    row
}

fn render_progress(position: usize, total: usize) -> String
{
    let total = total.max(1);
    let filled = (position * PROGRESS_WIDTH / total).min(PROGRESS_WIDTH);
    format!(
        "Progress [{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        position,
        total
    )
}

fn summary_lines(pack_name: &str, summary: &Summary) -> Vec<String>
{
    let mut lines = Vec::new();
    lines.push("Game complete!".to_string());
    lines.push(String::new());
    lines.push(format!("Pack: {}", pack_name));
    lines.push(format!("Final score: {}/{}", summary.score, summary.words));
    lines.push(format!(
        "Correct: {}  Attempts: {}",
        summary.correct, summary.total_attempts
    ));
    lines.push(ORANGE.fg(&format!("Accuracy: {}%", summary.accuracy)));
    lines.push(String::new());
    lines.push("Press R to play again, SPACE to exit.".to_string());
    lines
}

/// Blocks on the summary screen. Returns true when the player wants another round.
fn wait_for_choice() -> Result<bool>
{
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? {
                if kind == KeyEventKind::Release {
                    continue;
                }
                if let Some(again) = summary_choice(code, modifiers) {
                    return Ok(again);
                }
            }
        }
    }
}

/// `Some(true)` plays again, `Some(false)` exits.
fn summary_choice(code: KeyCode, modifiers: KeyModifiers) -> Option<bool>
{
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(false),
            _ => None,
        };
    }
    match code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(true),
        KeyCode::Char(' ') | KeyCode::Esc => Some(false),
        _ => None,
    }
}
