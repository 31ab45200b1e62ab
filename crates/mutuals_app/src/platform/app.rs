use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Result};
use mutuals_core::{update, AppState, Identity, LoadState, Msg, PresentationSink};
use mutuals_logging::{mutuals_debug, mutuals_info};

use super::commands::{parse_command, UserCommand, HELP};
use super::effects::EffectRunner;
use super::ui::{render, terminal::TerminalSink};
use crate::config::AppConfig;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Core(Msg),
    Command(UserCommand),
    InputError(String),
    InputClosed,
}

pub struct RunOptions {
    pub config: AppConfig,
    pub user: Option<String>,
    pub token: Option<String>,
    /// Print the first check's result and exit.
    pub once: bool,
}

pub fn run_app(options: RunOptions) -> Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(options.config.client_settings(), event_tx.clone())?;
    let mut app = App {
        state: AppState::with_timings(options.config.timings()),
        runner,
        sink: TerminalSink::new(io::stdout()),
        token: options.token,
        last_user: options.user.clone(),
    };

    if let Some(user) = options.user {
        app.dispatch(Msg::CheckRequested {
            identity: user,
            credential: app.token.clone(),
        });
    } else {
        app.sink.print_lines(&HELP.iter().map(|l| l.to_string()).collect::<Vec<_>>());
    }

    if options.once {
        return app.wait_for_check(&event_rx);
    }

    spawn_input_reader(event_tx);
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Core(msg) => app.dispatch(msg),
            AppEvent::Command(UserCommand::Quit) | AppEvent::InputClosed => break,
            AppEvent::Command(command) => app.handle_command(command),
            AppEvent::InputError(message) => app.sink.line(&message),
        }
    }
    mutuals_info!("Exiting");
    Ok(())
}

struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    sink: TerminalSink<W>,
    token: Option<String>,
    last_user: Option<String>,
}

impl<W: Write> App<W> {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        mutuals_debug!(
            "Dispatched: load={:?}, {} effect(s)",
            state.store().load_state(),
            effects.len()
        );
        self.state = state;
        let sink: &mut dyn PresentationSink = &mut self.sink;
        self.runner.run(effects, sink);
    }

    fn handle_command(&mut self, command: UserCommand) {
        match command {
            UserCommand::Check(user) => {
                let Some(user) = user.or_else(|| self.last_user.clone()) else {
                    self.sink.line("usage: check <user>");
                    return;
                };
                self.last_user = Some(user.clone());
                self.dispatch(Msg::CheckRequested {
                    identity: user,
                    credential: self.token.clone(),
                });
            }
            UserCommand::Act { login, kind } => {
                self.dispatch(Msg::ActionRequested {
                    identity: Identity::new(login),
                    kind,
                });
            }
            UserCommand::List => {
                let lines = render::view_lines(&self.state.view());
                self.sink.print_lines(&lines);
            }
            UserCommand::Help => {
                self.sink
                    .print_lines(&HELP.iter().map(|l| l.to_string()).collect::<Vec<_>>());
            }
            UserCommand::Quit => {}
        }
    }

    /// Drives the loop until the first check resolves.
    fn wait_for_check(&mut self, events: &mpsc::Receiver<AppEvent>) -> Result<()> {
        loop {
            let view = self.state.view();
            match view.load {
                LoadState::Loaded => return Ok(()),
                LoadState::Empty => match view.last_error {
                    Some(err) => bail!(err),
                    None => bail!("--once needs a user name"),
                },
                LoadState::Loading => {}
            }
            match events.recv() {
                Ok(AppEvent::Core(msg)) => self.dispatch(msg),
                Ok(_) => {}
                Err(_) => bail!("engine stopped before the check finished"),
            }
        }
    }
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let event = match line {
                Ok(line) => match parse_command(&line) {
                    Ok(Some(command)) => AppEvent::Command(command),
                    Ok(None) => continue,
                    Err(message) => AppEvent::InputError(message),
                },
                Err(err) => AppEvent::InputError(format!("failed to read input: {err}")),
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutuals_core::ActionKind;

    fn test_app() -> (App<Vec<u8>>, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let config = AppConfig {
            api_base: "http://127.0.0.1:9".to_string(),
            ..AppConfig::default()
        };
        let runner = EffectRunner::new(config.client_settings(), tx).unwrap();
        let app = App {
            state: AppState::with_timings(config.timings()),
            runner,
            sink: TerminalSink::new(Vec::new()),
            token: None,
            last_user: None,
        };
        (app, rx)
    }

    fn printed(app: App<Vec<u8>>) -> String {
        String::from_utf8(app.sink.into_inner()).unwrap()
    }

    #[test]
    fn check_without_any_user_prints_usage() {
        let (mut app, _rx) = test_app();
        app.handle_command(UserCommand::Check(None));
        assert_eq!(app.state.store().load_state(), LoadState::Empty);
        assert_eq!(printed(app), "usage: check <user>\n");
    }

    #[test]
    fn blank_user_is_rejected_before_any_request() {
        let (mut app, _rx) = test_app();
        app.handle_command(UserCommand::Check(Some("   ".to_string())));
        assert_eq!(app.state.generation(), 0);
        assert_eq!(printed(app), "Error: please enter a user name\n");
    }

    #[test]
    fn second_check_while_loading_says_so() {
        let (mut app, _rx) = test_app();
        app.handle_command(UserCommand::Check(Some("me".to_string())));
        app.handle_command(UserCommand::Check(Some("other".to_string())));
        assert_eq!(app.state.generation(), 1);
        assert_eq!(
            printed(app),
            "Fetching followers and following...\n\
             A check is already in progress; wait for it to finish.\n"
        );
    }

    #[test]
    fn actions_before_a_check_are_ignored() {
        let (mut app, _rx) = test_app();
        app.handle_command(UserCommand::List);
        // Nothing is listed yet, so the action is ignored.
        app.handle_command(UserCommand::Act {
            login: "c".to_string(),
            kind: ActionKind::Unfollow,
        });
        assert_eq!(app.state.actions().pending_count(), 0);
        assert_eq!(printed(app), "Nothing checked yet. Use `check <user>`.\n");
    }
}
