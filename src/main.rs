use std::fs::File;
use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fsn_terminal::api::ApiClient;
use fsn_terminal::config::Config;
use fsn_terminal::lookups::Lookups;
use fsn_terminal::provider::spawn_provider;
use fsn_terminal::route::Route;
use fsn_terminal::state::{self, AppState, FetchCommand, apply_delta};

mod ui;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<FetchCommand>,
}

impl App {
    fn new(state: AppState, cmd_tx: mpsc::Sender<FetchCommand>) -> Self {
        Self {
            state,
            should_quit: false,
            cmd_tx,
        }
    }

    fn dispatch(&mut self, cmds: Vec<FetchCommand>) {
        for cmd in cmds {
            if self.cmd_tx.send(cmd).is_err() {
                self.state.push_log("[WARN] Fetch worker is gone; request dropped");
                return;
            }
        }
    }

    fn navigate(&mut self, route: Route) {
        let cmds = self.state.navigate(route);
        self.dispatch(cmds);
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.path_input.is_some() {
            self.on_path_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('/') => self.state.begin_path_input(),
            KeyCode::Char('r') => self.navigate(Route::Roster),
            KeyCode::Char('L') => self.navigate(Route::Leaderboards),
            KeyCode::Char('b') | KeyCode::Esc => {
                if self.state.help_overlay {
                    self.state.help_overlay = false;
                } else {
                    let cmds = self.state.go_back();
                    self.dispatch(cmds);
                }
            }
            _ => match self.state.route {
                Route::Roster => self.on_roster_key(key),
                Route::Player { .. } => self.on_player_key(key),
                Route::Leaderboards => self.on_leaderboard_key(key),
                Route::NotFound { .. } => {}
            },
        }
    }

    fn on_path_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let cmds = self.state.submit_path_input();
                self.dispatch(cmds);
            }
            KeyCode::Esc => self.state.cancel_path_input(),
            KeyCode::Backspace => self.state.pop_path_char(),
            KeyCode::Char(ch) => self.state.push_path_char(ch),
            _ => {}
        }
    }

    fn on_roster_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Right => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::Left => self.state.select_prev(),
            KeyCode::Enter => {
                let cmds = self.state.open_selected_player();
                self.dispatch(cmds);
            }
            _ => {}
        }
    }

    fn on_player_key(&mut self, key: KeyEvent) {
        let cmds = match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.state.player_date_older(),
            KeyCode::Char('l') | KeyCode::Right => self.state.player_date_newer(),
            KeyCode::Char('p') => self.state.cycle_player_phase(),
            KeyCode::Char('m') => {
                self.state.toggle_chart_metric();
                Vec::new()
            }
            _ => Vec::new(),
        };
        self.dispatch(cmds);
    }

    fn on_leaderboard_key(&mut self, key: KeyEvent) {
        let cmds = match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.state.leaderboard_date_older(),
            KeyCode::Char('l') | KeyCode::Right => self.state.leaderboard_date_newer(),
            KeyCode::Char('t') => self.state.toggle_board(),
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.scroll_leaderboard_down();
                Vec::new()
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.scroll_leaderboard_up();
                Vec::new()
            }
            _ => Vec::new(),
        };
        self.dispatch(cmds);
    }
}

fn init_tracing(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fsn_terminal=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = Config::from_env().with_start_route_arg(std::env::args().nth(1));
    init_tracing(&config)?;
    info!(api_base = %config.api_base, timeout = ?config.timeout, "starting");

    let api = ApiClient::from_config(&config);
    let lookups = match Lookups::resolve(&api) {
        Ok(lookups) => Arc::new(lookups),
        Err(err) => {
            let message = format!("{err:#}");
            error!(error = %message, "startup lookups failed");
            eprintln!("error: could not load valid dates and phases: {message}");
            std::process::exit(1);
        }
    };

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(api, tx, cmd_rx);

    let mut app = App::new(AppState::new(lookups), cmd_tx);
    app.navigate(Route::parse(&config.start_route));

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "ui loop failed");
        eprintln!("error: {err}");
    }
    info!("exiting");
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui::ui(f, &app.state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
