use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.validate_location_id`(...) on the typed id
    SubmitLocation,
    /// Re-fetch the schedule for the active location
    RefreshSchedule,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Enter, Esc, Left};

    // Global quit shortcut; plain `q` stays available for typing on the
    // setup screen
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::Setup => match key.code {
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.location_input.push(character);
                }
            }
            Backspace => {
                app.location_input.pop();
            }
            Enter => {
                action = Action::SubmitLocation;
            }
            Esc => {
                action = Action::Quit;
            }
            _ => {}
        },

        Screen::Schedule => match key.code {
            Char('r') => {
                action = Action::RefreshSchedule;
            }
            Left | Esc | Char('b') => {
                app.back_to_setup();
            }
            Char('q') => {
                action = Action::Quit;
            }
            _ => {}
        },
    }
    action
}
