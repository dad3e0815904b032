use crate::alarm::AlarmKind;
use crate::model::{Scene, SimState, StatKind};
use crate::sim::PlayerAction;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<KeyCode>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                out.push(k.code);
                if out.len() >= 32 {
                    break;
                }
            }
        }
    }
    Ok(out)
}

pub(crate) fn map_key_to_action(state: &SimState, key: KeyCode) -> Option<PlayerAction> {
    // global keys
    match key {
        KeyCode::Char('h') | KeyCode::Char('H') => return Some(PlayerAction::HelpToggle),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(PlayerAction::Quit),
        KeyCode::Esc => return Some(PlayerAction::Back),
        _ => {}
    }

    match state.scene {
        Scene::Help => None,
        Scene::Main => match key {
            KeyCode::Char('e') | KeyCode::Char('E') => Some(PlayerAction::Eat),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(PlayerAction::Drink),
            KeyCode::Char('x') | KeyCode::Char('X') => Some(PlayerAction::Exercise),
            KeyCode::Char('1') => Some(PlayerAction::TriggerAlarm(AlarmKind::Feed)),
            KeyCode::Char('2') => Some(PlayerAction::TriggerAlarm(AlarmKind::Drink)),
            KeyCode::Char('3') => Some(PlayerAction::TriggerAlarm(AlarmKind::Exercise)),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(PlayerAction::ResetFeedTimer),
            KeyCode::Up => Some(PlayerAction::ConsoleMove(-1)),
            KeyCode::Down => Some(PlayerAction::ConsoleMove(1)),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                Some(PlayerAction::Nudge(selected_stat(state), 5.0))
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                Some(PlayerAction::Nudge(selected_stat(state), -5.0))
            }
            _ => None,
        },
    }
}

fn selected_stat(state: &SimState) -> StatKind {
    StatKind::ALL[state.console_cursor % StatKind::ALL.len()]
}
