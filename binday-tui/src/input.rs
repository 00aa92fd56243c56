use binday_core::intent::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, INTENTS, Screen};

#[derive(Debug, Clone)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.respond`(...) for the intent
    Ask(Intent),
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Left, Tab, Up};

    // Global quit shortcuts; plain `q` is text while typing a bin type
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() && app.screen != Screen::BinTypeInput {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::IntentSelect => match key.code {
            Up | Char('k') => {
                if app.intent_list_index > 0 {
                    app.intent_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.intent_list_index + 1 < INTENTS.len() {
                    app.intent_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                if let Some(intent) = app.select_current_intent() {
                    action = Action::Ask(intent);
                }
            }
            _ => {}
        },

        Screen::BinTypeInput => match key.code {
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.bin_type_input.push(character);
                }
            }
            Backspace => {
                app.bin_type_input.pop();
            }
            Tab => {
                // Cycle through the known categories
                let next = app
                    .categories
                    .iter()
                    .position(|category| category.as_str() == app.bin_type_input)
                    .map_or(0, |idx| (idx + 1) % app.categories.len());
                if let Some(category) = app.categories.get(next) {
                    app.bin_type_input = category.as_str().to_owned();
                }
            }
            Enter => {
                action = Action::Ask(app.bin_type_intent());
            }
            Left | Esc => {
                app.screen = Screen::IntentSelect;
            }
            _ => {}
        },

        Screen::AnswerView => match key.code {
            Left | Esc | Char('b') => {
                app.screen = Screen::IntentSelect;
                app.reply = None;
                app.error_message = None;
            }
            _ => {}
        },
    }
    action
}
