use anyhow::Context;
use crossterm::{
    event::{Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use draftwise::{
    app::{App, AppState, TaskOutcome},
    assistant::DraftAssistant,
    config::initialize_config,
    event::{next_step, spawn_input_poller, Event, Step},
    key_handlers::{handle_chat_input, handle_quit_confirm_input},
    logging::init_logging,
    ui,
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, time::Duration};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = initialize_config().context("failed to load configuration")?;
    let _logger = init_logging(&config.effective_log_dir(), &config.log_level)
        .context("failed to start logging")?;
    info!("draftwise starting with model {}", config.settings.model.model_id());

    let assistant = match DraftAssistant::from_config() {
        Ok(assistant) => Some(assistant),
        Err(e) => {
            warn!("Assistant disabled: {}", e);
            None
        }
    };
    let (mut app, outcome_rx) = App::new(config.settings.clone(), assistant);
    app.request_key_check();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, outcome_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        eprintln!("{:?}", err);
    }
    info!("draftwise exiting");
    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut outcome_rx: mpsc::UnboundedReceiver<TaskOutcome>,
) -> anyhow::Result<()> {
    let mut events = spawn_input_poller(Duration::from_millis(100));

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        match next_step(&mut events, &mut outcome_rx).await {
            Step::Event(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                match app.state {
                    AppState::Chat => handle_chat_input(key, &mut app),
                    AppState::QuitConfirm => handle_quit_confirm_input(key, &mut app),
                    AppState::Quit => {}
                }
            }
            Step::Event(_) => {}
            Step::Outcome(outcome) => app.apply_outcome(outcome),
            Step::Closed => {
                warn!("Input stream closed; shutting down");
                break;
            }
        }

        if app.state == AppState::Quit {
            break;
        }
    }

    Ok(())
}
