use std::io::{self, Stdout};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use indexwatch_client::ReqwestApi;
use indexwatch_core::{update, AppState, AppViewModel, Msg};
use indexwatch_logging::{dash_error, dash_info, dash_warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::config::{load_config, AppConfig, API_URL_ENV, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::{logging, ui};

type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

const TICK: Duration = Duration::from_millis(100);

pub fn run_app() -> anyhow::Result<()> {
    let loaded = load_config(Path::new(CONFIG_FILENAME));
    let log_settings = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    logging::initialize(&log_settings);

    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            dash_warn!("{}; using defaults", err);
            AppConfig::default()
        }
    }
    .with_api_override(std::env::var(API_URL_ENV).ok());

    let api = ReqwestApi::new(&config.client_settings())
        .with_context(|| format!("invalid API base url {:?}", config.api_base_url))?;
    dash_info!(
        "starting dashboard against {} (reports -> {:?})",
        api.base_url(),
        config.download_dir
    );
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(Arc::new(api), config.download_dir.clone(), msg_tx)
        .context("starting client runtime")?;

    let mut terminal = setup_terminal().context("initializing terminal")?;
    let result = event_loop(&mut terminal, &runner, &msg_rx);
    runner.shutdown();
    if let Err(err) = restore_terminal(&mut terminal) {
        dash_error!("failed to restore terminal: {}", err);
    }
    result.context("dashboard event loop")
}

fn setup_terminal() -> io::Result<DashboardTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut DashboardTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Owns the dashboard state; `update` only ever runs on this thread.
struct Dashboard<'a> {
    state: AppState,
    runner: &'a EffectRunner,
}

impl Dashboard<'_> {
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        was_dirty
    }
}

fn event_loop(
    terminal: &mut DashboardTerminal,
    runner: &EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> io::Result<()> {
    let mut dashboard = Dashboard {
        state: AppState::new(),
        runner,
    };
    let mut needs_redraw = dashboard.dispatch(Msg::Mounted);

    loop {
        let inbox: Vec<Msg> = runner
            .drain()
            .into_iter()
            .chain(msg_rx.try_iter())
            .collect();
        for msg in inbox {
            needs_redraw |= dashboard.dispatch(msg);
        }

        let view = dashboard.state.view();
        if needs_redraw {
            terminal.draw(|frame| ui::render::render(frame, &view))?;
            needs_redraw = false;
        }

        if !event::poll(TICK)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match map_key(&view, key) {
                KeyAction::Quit => break,
                KeyAction::Send(msg) => needs_redraw |= dashboard.dispatch(msg),
                KeyAction::Ignore => {}
            },
            Event::Resize(_, _) => needs_redraw = true,
            _ => {}
        }
    }

    dash_info!("dashboard closed");
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Send(Msg),
    Quit,
    Ignore,
}

fn map_key(view: &AppViewModel, key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    if let Some(input) = view.upload_prompt.as_deref() {
        return match key.code {
            KeyCode::Esc => KeyAction::Send(Msg::UploadPromptCancelled),
            KeyCode::Enter => KeyAction::Send(Msg::UploadSubmitted),
            KeyCode::Backspace => {
                let mut text = input.to_string();
                text.pop();
                KeyAction::Send(Msg::UploadInputChanged(text))
            }
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut text = input.to_string();
                text.push(ch);
                KeyAction::Send(Msg::UploadInputChanged(text))
            }
            _ => KeyAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char(ch) => match ch {
            ui::constants::KEY_QUIT => KeyAction::Quit,
            ui::constants::KEY_CHECK => KeyAction::Send(Msg::CheckClicked),
            ui::constants::KEY_UPLOAD => KeyAction::Send(Msg::UploadPromptOpened),
            ui::constants::KEY_DOWNLOAD => KeyAction::Send(Msg::DownloadClicked),
            _ => KeyAction::Ignore,
        },
        _ => KeyAction::Ignore,
    }
}
