use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioDevice;
use crate::config;
use crate::playlist::{PlaybackError, PlaylistController};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Cursor position in the playlist, independent of the active track.
    pub selected: usize,
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Message shown in the status line after a failed activation.
    pub last_error: Option<String>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            pending_gg: false,
            last_error: None,
        }
    }
}

/// Main terminal event loop: polls input, drives the controller and redraws.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut PlaylistController<RodioDevice>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::new();

    loop {
        // Auto-advance when the active track played to its end.
        note(controller.advance_if_finished(), &mut state);

        terminal.draw(|f| {
            ui::draw(
                f,
                controller,
                state.selected,
                state.last_error.as_deref(),
                &settings.ui,
                &settings.controls,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, controller, &mut state) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    handle_mouse_event(mouse, area, controller, &mut state);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Record an activation failure for the status line; clear it on success.
/// Failed playback leaves the playlist enabled, so nothing else to do here.
fn note(result: Result<(), PlaybackError>, state: &mut EventLoopState) {
    match result {
        Ok(()) => {}
        Err(err) => state.last_error = Some(err.to_string()),
    }
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut PlaylistController<RodioDevice>,
    state: &mut EventLoopState,
) -> bool {
    let seek = settings.controls.seek_seconds.min(i64::MAX as u64) as i64;
    let volume_step = i64::from(settings.controls.volume_step);
    let total = controller.tracks().len();

    match key.code {
        KeyCode::Char('q') => {
            return true;
        }
        KeyCode::Left => {
            state.pending_gg = false;
            controller.seek_by(-seek);
        }
        KeyCode::Right => {
            state.pending_gg = false;
            controller.seek_by(seek);
        }
        KeyCode::Up => {
            state.pending_gg = false;
            controller.adjust_volume(volume_step);
        }
        KeyCode::Down => {
            state.pending_gg = false;
            controller.adjust_volume(-volume_step);
        }
        KeyCode::PageUp => {
            state.pending_gg = false;
            state.last_error = None;
            note(controller.play_previous(), state);
        }
        KeyCode::PageDown => {
            state.pending_gg = false;
            state.last_error = None;
            note(controller.play_next(), state);
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            state.last_error = None;
            note(controller.activate(state.selected), state);
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            state.pending_gg = false;
            controller.toggle_pause();
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            controller.toggle_random();
        }
        KeyCode::Char('j') => {
            state.pending_gg = false;
            if total > 0 {
                state.selected = (state.selected + 1) % total;
            }
        }
        KeyCode::Char('k') => {
            state.pending_gg = false;
            if total > 0 {
                state.selected = if state.selected == 0 {
                    total - 1
                } else {
                    state.selected - 1
                };
            }
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                state.selected = 0;
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            if total > 0 {
                state.selected = total - 1;
            }
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}

fn handle_mouse_event(
    mouse: MouseEvent,
    area: Rect,
    controller: &mut PlaylistController<RodioDevice>,
    state: &mut EventLoopState,
) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }

    let panes = ui::panes(area);
    let (col, row) = (mouse.column, mouse.row);

    if hit(panes.list, col, row) {
        // Map the clicked row back through the same visible window the
        // renderer used.
        let inner_top = panes.list.y + 1;
        if row < inner_top {
            return;
        }
        let inner_height = panes.list.height.saturating_sub(2) as usize;
        let total = controller.tracks().len();
        let sel_pos = state.selected.min(total.saturating_sub(1));
        let (start, end, _) = ui::visible_window(total, inner_height, sel_pos);

        let index = start + (row - inner_top) as usize;
        if index < end.min(total) {
            state.selected = index;
            state.last_error = None;
            note(controller.activate(index), state);
        }
    } else if hit(panes.progress, col, row) {
        controller.seek_to_fraction(fraction_of(panes.progress, col));
    } else if hit(panes.volume, col, row) {
        let volume = (fraction_of(panes.volume, col) * 100.0).round() as i64;
        controller.set_volume(volume);
    }
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

/// Horizontal click position as a fraction of the pane's interior width.
fn fraction_of(r: Rect, col: u16) -> f64 {
    let inner_x = r.x + 1;
    let inner_width = r.width.saturating_sub(2).max(1);
    (f64::from(col.saturating_sub(inner_x)) / f64::from(inner_width)).clamp(0.0, 1.0)
}
