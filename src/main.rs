pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use metric_trainer::{
    answer::AnswerInput,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    question::QuestionEngine,
    runtime::{Action, CrosstermEventSource, EventSource, Runner, TrainerEvent},
    selection::CategorySelection,
    session::{Session, Step},
    stats::SessionReport,
    value_generator::DifficultyMode,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, warn};

const TICK_RATE_MS: u64 = 250;

/// drill metric/imperial unit conversions in the terminal
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "Practice converting distances, weights, temperatures and volumes between imperial and metric units. Answers within a few percent of the exact value count as correct."
)]
pub struct Cli {
    /// round generated values to whole numbers
    #[clap(short = 'w', long)]
    whole_numbers: bool,

    /// beginner values: only 1 or multiples of 5 (implies --whole-numbers)
    #[clap(short = 'e', long)]
    easy: bool,

    /// categories to practice, skipping the menu: a) distance b) weight c) temperature d) volume, or "all"
    #[clap(short = 'c', long, value_parser = CategorySelection::parse)]
    categories: Option<CategorySelection>,

    /// end the session after this many questions
    #[clap(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    questions: Option<u32>,

    /// seed the question generator for a reproducible drill
    #[clap(long)]
    seed: Option<u64>,

    /// write logs to this file instead of the state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// store the given difficulty, categories and question count as defaults
    #[clap(long)]
    save_defaults: bool,
}

/// Settings resolved once at startup: CLI flags over stored config over defaults
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    pub mode: DifficultyMode,
    pub categories: Option<CategorySelection>,
    pub question_limit: Option<usize>,
    pub seed: Option<u64>,
}

impl RuntimeSettings {
    pub fn resolve(cli: &Cli, stored: &Config) -> Self {
        let mode = if cli.whole_numbers || cli.easy {
            DifficultyMode::from_flags(cli.whole_numbers, cli.easy)
        } else {
            stored.difficulty
        };

        let categories = cli.categories.or_else(|| {
            stored
                .categories
                .as_deref()
                .and_then(|raw| match CategorySelection::parse(raw) {
                    Ok(selection) => Some(selection),
                    Err(e) => {
                        warn!(raw, error = %e, "ignoring stored categories");
                        None
                    }
                })
        });

        let stored_limit = stored.questions.filter(|&n| {
            if n == 0 {
                warn!("ignoring stored question limit of 0");
            }
            n > 0
        });

        Self {
            mode,
            categories,
            question_limit: cli.questions.map(|n| n as usize).or(stored_limit),
            seed: cli.seed,
        }
    }
}

impl From<&RuntimeSettings> for Config {
    fn from(rs: &RuntimeSettings) -> Self {
        Self {
            difficulty: rs.mode,
            categories: rs.categories.map(|c| c.to_string()),
            questions: rs.question_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    SelectCategories,
    Asking,
    Feedback,
    Summary,
}

#[derive(Debug)]
pub struct App {
    pub settings: RuntimeSettings,
    pub state: AppState,
    /// Line being typed on the current screen
    pub input: String,
    /// One-line message shown under the input (rejections, errors)
    pub notice: Option<String>,
    pub session: Option<Session>,
    pub last_step: Option<Step>,
    pub report: Option<SessionReport>,
}

impl App {
    pub fn new(settings: RuntimeSettings) -> Self {
        let mut app = Self {
            settings,
            state: AppState::SelectCategories,
            input: String::new(),
            notice: None,
            session: None,
            last_step: None,
            report: None,
        };
        if let Some(selection) = app.settings.categories {
            app.start_session(selection);
        }
        app
    }

    fn start_session(&mut self, selection: CategorySelection) {
        let engine = QuestionEngine::new(self.settings.mode, self.settings.seed);
        let mut session = Session::new(selection, engine, self.settings.question_limit);
        self.input.clear();
        self.last_step = None;
        self.report = None;
        match session.start() {
            Ok(_) => {
                self.notice = None;
                self.state = AppState::Asking;
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                self.report = Some(session.report());
                self.state = AppState::Summary;
            }
        }
        self.session = Some(session);
    }

    fn to_summary(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.finish();
            self.report = Some(session.report());
        }
        self.input.clear();
        self.state = AppState::Summary;
    }

    /// Apply one key action; returns `false` when the app should exit
    pub fn handle(&mut self, action: Action) -> bool {
        match self.state {
            AppState::SelectCategories => match action {
                Action::Type(c) => self.input.push(c),
                Action::Backspace => {
                    self.input.pop();
                }
                Action::Submit => {
                    let raw = std::mem::take(&mut self.input);
                    if matches!(AnswerInput::parse(&raw), AnswerInput::Quit) {
                        return false;
                    }
                    match CategorySelection::parse(&raw) {
                        Ok(selection) => self.start_session(selection),
                        Err(e) => {
                            warn!(input = raw.as_str(), error = %e, "rejected category selection");
                            self.notice = Some(e.to_string());
                        }
                    }
                }
                Action::Cancel => return false,
            },
            AppState::Asking => match action {
                Action::Type(c) => self.input.push(c),
                Action::Backspace => {
                    self.input.pop();
                }
                Action::Submit => self.submit_answer(),
                Action::Cancel => self.to_summary(),
            },
            AppState::Feedback => match action {
                Action::Cancel => self.to_summary(),
                Action::Submit | Action::Type(_) => {
                    if self.session.as_ref().is_some_and(|s| s.is_finished()) {
                        self.to_summary();
                    } else {
                        self.state = AppState::Asking;
                    }
                }
                Action::Backspace => {}
            },
            AppState::Summary => match action {
                Action::Type('n') => {
                    self.notice = None;
                    match self.settings.categories {
                        Some(selection) => self.start_session(selection),
                        None => {
                            self.session = None;
                            self.input.clear();
                            self.state = AppState::SelectCategories;
                        }
                    }
                }
                Action::Type('q') | Action::Cancel => return false,
                _ => {}
            },
        }
        true
    }

    fn submit_answer(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.state = AppState::SelectCategories;
            return;
        };
        let input = AnswerInput::parse(&std::mem::take(&mut self.input));

        match session.submit(input) {
            Ok(Step::Rejected) => {
                self.notice = Some("Enter a number, 'skip' or 'quit'".to_string());
            }
            Ok(Step::Finished) => self.to_summary(),
            Ok(step) => {
                self.notice = None;
                self.last_step = Some(step);
                self.state = AppState::Feedback;
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                self.to_summary();
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let _log_guard = cli
        .log_file
        .clone()
        .or_else(logging::default_log_path)
        .and_then(|path| logging::init(&path).ok());

    let store = FileConfigStore::new();
    let settings = RuntimeSettings::resolve(&cli, &store.load());
    info!(?settings, "starting");

    if cli.save_defaults {
        store.save(&Config::from(&settings))?;
        info!(path = %store.path().display(), "saved defaults");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(report) = app.report.as_ref() {
        println!("{report}");
    }

    result
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|f| ui::screen::current_screen(&app.state).render(app, f))?;
            dirty = false;
        }

        match runner.step() {
            TrainerEvent::Tick => {}
            TrainerEvent::Resize => dirty = true,
            TrainerEvent::Key(key) => {
                if let Some(action) = Action::from_key(key) {
                    if !app.handle(action) {
                        break;
                    }
                    dirty = true;
                }
            }
        }
    }

    Ok(())
}
