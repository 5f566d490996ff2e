use super::{Action, Director, handle_key_event};
use crate::ui_state::{Pane, UiState};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn transport_keys_work_in_every_pane() {
    let mut ui = UiState::new(50);
    for pane in [Pane::SideBar, Pane::TrackList] {
        ui.set_pane(pane);
        let action = |c| handle_key_event(press(KeyCode::Char(c)), &ui);

        assert_eq!(action(' '), Some(Action::TogglePause));
        assert_eq!(action('n'), Some(Action::PlayNext));
        assert_eq!(action('p'), Some(Action::PlayPrev));
        assert_eq!(action('s'), Some(Action::ToggleShuffle));
        assert_eq!(action('+'), Some(Action::VolumeUp));
        assert_eq!(action('-'), Some(Action::VolumeDown));
        assert_eq!(action('l'), Some(Action::SeekForward));
        assert_eq!(action('h'), Some(Action::SeekBack));
        assert_eq!(action('j'), Some(Action::Scroll(Director::Down(1))));
        assert_eq!(action('q'), Some(Action::Quit));
    }
}

#[test]
fn arrows_move_between_panes() {
    let mut ui = UiState::new(50);
    assert_eq!(handle_key_event(press(KeyCode::Right), &ui), Some(Action::Select));

    ui.set_pane(Pane::TrackList);
    assert_eq!(
        handle_key_event(press(KeyCode::Left), &ui),
        Some(Action::ChangePane(Pane::SideBar))
    );
    assert_eq!(handle_key_event(press(KeyCode::Right), &ui), None);
}

#[test]
fn an_open_error_swallows_keys_except_ctrl_c() {
    let mut ui = UiState::new(50);
    ui.set_error(anyhow::anyhow!("boom"));

    assert_eq!(
        handle_key_event(press(KeyCode::Char('n')), &ui),
        Some(Action::DismissError)
    );
    assert_eq!(
        handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &ui
        ),
        Some(Action::Quit)
    );
}
