//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, plus
//! the layout helpers the event loop reuses to hit-test mouse clicks against
//! the same geometry the renderer used.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::config::{ControlsSettings, UiSettings};
use crate::playlist::{PlaybackDevice, PlaybackState, PlaylistController};

/// Screen regions, top to bottom.
pub struct Panes {
    pub header: Rect,
    pub status: Rect,
    pub list: Rect,
    pub progress: Rect,
    pub volume: Rect,
    pub footer: Rect,
}

/// Split `area` into the fixed pane layout.
pub fn panes(area: Rect) -> Panes {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    Panes {
        header: chunks[0],
        status: chunks[1],
        list: chunks[2],
        progress: chunks[3],
        volume: chunks[4],
        footer: chunks[5],
    }
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Window of the track list kept visible, centering the cursor when the list
/// is taller than the pane. Returns `(start, end, cursor position within the
/// window)`.
pub fn visible_window(total: usize, height: usize, sel_pos: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, sel_pos);
    }
    let half = height / 2;
    let mut start = if sel_pos > half { sel_pos - half } else { 0 };
    if start + height > total {
        start = total - height;
    }
    (start, start + height, sel_pos - start)
}

fn controls_text(controls: &ControlsSettings) -> String {
    format!(
        "[j/k] up/down | [enter] play selected | [space/p] play/pause | [pgup/pgdn] prev/next | [←/→] seek -/+{}s | [↑/↓] volume -/+{} | [r] random | [gg/G] top/bottom | [q] quit",
        controls.seek_seconds, controls.volume_step
    )
}

/// Render the entire UI into the provided `frame`.
pub fn draw<D: PlaybackDevice>(
    frame: &mut Frame,
    controller: &PlaylistController<D>,
    selected: usize,
    last_error: Option<&str>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let panes = panes(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadence ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, panes.header);

    // Status line
    let status = {
        let mut parts: Vec<String> = Vec::new();

        let state_text = match controller.state() {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Loading => "Loading",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        };
        parts.push(state_text.to_string());

        if let Some(track) = controller.active_track() {
            parts.push(format!("Song: {}", track.display));
        }

        parts.push(format!(
            "Random: {}",
            if controller.is_random() { "ON" } else { "OFF" }
        ));
        parts.push(format!("Volume: {}%", controller.volume()));

        if let Some(err) = last_error {
            parts.push(format!("Error: {err}"));
        }

        parts.join(" • ")
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, panes.status);

    // Playlist: the icon marks the active entry, the cursor highlight marks
    // the selection.
    {
        let tracks = controller.tracks();
        let total = tracks.len();
        let list_height = panes.list.height.saturating_sub(2) as usize;
        let sel_pos = selected.min(total.saturating_sub(1));
        let (start, end, cursor) = visible_window(total, list_height, sel_pos);

        let items: Vec<ListItem> = tracks[start..end.min(total)]
            .iter()
            .map(|track| {
                let icon = if track.is_active() {
                    match controller.state() {
                        PlaybackState::Playing | PlaybackState::Loading => "⏸ ",
                        PlaybackState::Paused | PlaybackState::Stopped => "▶ ",
                    }
                } else {
                    "  "
                };
                let line = format!("{:>3} {icon}{}", track.index + 1, track.display);
                if track.is_active() {
                    ListItem::new(line).style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ratatui::widgets::ListState::default();
        if total > 0 {
            list_state.select(Some(cursor));
        }
        frame.render_stateful_widget(list, panes.list, &mut list_state);
    }

    // Progress bar with elapsed/total time.
    let (ratio, time_label) = match controller.duration() {
        Some(total) => (
            controller.progress(),
            format!(
                "{} / {}",
                format_mmss(controller.position()),
                format_mmss(total)
            ),
        ),
        None => (0.0, "--:-- / --:--".to_string()),
    };
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(ratio)
        .label(time_label);
    frame.render_widget(progress, panes.progress);

    // Volume bar with percentage text.
    let volume = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" volume "))
        .ratio(f64::from(controller.volume()) / 100.0)
        .label(format!("{}%", controller.volume()));
    frame.render_widget(volume, panes.volume);

    // Footer
    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, panes.footer);
}
