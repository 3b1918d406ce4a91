use std::io::{self, Stdout};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Widget, Wrap,
};

use crate::catalog;
use crate::command::{self, Selection};
use crate::ctl::ScxCtl;
use crate::error::{Error, Result};
use crate::log_sanitize::sanitize_line;
use crate::status::RunningStatus;

const DEFAULT_MODE_LABEL: &str = "Default (no mode flags)";
const ARGS_PLACEHOLDER: &str = "e.g. -m performance -w -C 0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Schedulers,
    Modes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputMode {
    Normal,
    EditArgs { buffer: String },
}

struct App {
    ctl: ScxCtl,

    schedulers: Vec<String>,
    sched_list: ListState,
    // Index 0 is the "no mode" row; catalog modes follow in table order.
    mode_list: ListState,

    // The override textbox. Auto-filled from the selected mode, editable in
    // a modal; non-empty text wins over the mode's flags on confirm.
    args: String,

    pane: Pane,
    input: InputMode,

    status: RunningStatus,
    status_note: Option<String>,
    feedback: String,
    actions_enabled: bool,
}

impl App {
    fn new(ctl: ScxCtl) -> Self {
        let mut app = Self {
            ctl,
            schedulers: Vec::new(),
            sched_list: ListState::default(),
            mode_list: ListState::default(),
            args: String::new(),
            pane: Pane::Schedulers,
            input: InputMode::Normal,
            status: RunningStatus::Unknown,
            status_note: None,
            feedback: String::new(),
            actions_enabled: false,
        };
        app.rescan();
        app.refresh_status();
        app
    }

    fn rescan(&mut self) {
        match self.ctl.list() {
            Ok(schedulers) => {
                self.feedback = format!("{} schedulers detected", schedulers.len());
                self.schedulers = schedulers;
                self.actions_enabled = true;
                self.sched_list.select(Some(0));
                self.mode_list.select(Some(0));
                self.sync_mode_autofill();
            }
            Err(e) => {
                self.schedulers.clear();
                self.actions_enabled = false;
                self.sched_list.select(None);
                self.mode_list.select(None);
                self.args.clear();
                self.feedback = sanitize_line(&e.to_string());
            }
        }
    }

    fn refresh_status(&mut self) {
        match self.ctl.get() {
            Ok(status) => {
                self.status = status;
                self.status_note = None;
            }
            Err(e) => {
                // Query failures leave the session status unknown, which the
                // resolver maps to switch.
                self.status = RunningStatus::Unknown;
                self.status_note = Some(sanitize_line(&e.to_string()));
            }
        }
    }

    fn selected_scheduler(&self) -> Option<&str> {
        let idx = self.sched_list.selected()?;
        self.schedulers.get(idx).map(String::as_str)
    }

    fn mode_count(&self) -> usize {
        match self.selected_scheduler() {
            Some(sched) => 1 + catalog::lookup(sched).modes.len(),
            None => 0,
        }
    }

    fn selected_mode(&self) -> Option<&'static catalog::Mode> {
        let sched = self.selected_scheduler()?;
        let idx = self.mode_list.selected().unwrap_or(0);
        if idx == 0 {
            return None;
        }
        catalog::lookup(sched).modes.get(idx - 1)
    }

    // Mirror the selected mode into the args textbox; Default clears it.
    fn sync_mode_autofill(&mut self) {
        match self.selected_mode() {
            Some(mode) => self.args = mode.flags.to_string(),
            None => self.args.clear(),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        match self.pane {
            Pane::Schedulers => {
                if self.schedulers.is_empty() {
                    return;
                }
                let i = self.sched_list.selected().unwrap_or(0);
                let next = add_signed_saturating(i, delta).min(self.schedulers.len() - 1);
                self.sched_list.select(Some(next));
                self.mode_list.select(Some(0));
                self.sync_mode_autofill();
            }
            Pane::Modes => {
                let count = self.mode_count();
                if count == 0 {
                    return;
                }
                let i = self.mode_list.selected().unwrap_or(0);
                let next = add_signed_saturating(i, delta).min(count - 1);
                self.mode_list.select(Some(next));
                self.sync_mode_autofill();
            }
        }
    }

    fn confirm(&mut self) {
        if !self.actions_enabled {
            self.feedback = "no schedulers available; press 'r' to rescan".into();
            return;
        }
        let Some(sched) = self.selected_scheduler().map(str::to_string) else {
            self.feedback = "select a scheduler first".into();
            return;
        };
        let mode = self.selected_mode().map(|m| m.name);
        let override_args = self.args.trim().to_string();
        let sel = Selection {
            scheduler: &sched,
            mode,
            override_args: &override_args,
        };
        let action = command::select_action(&self.status);
        match self.ctl.apply(&sel, &self.status) {
            Ok(argv) => {
                self.feedback = format!("{} ok: {}", action.verb(), argv.join(" "));
                self.refresh_status();
            }
            Err(e) => self.feedback = sanitize_line(&e.to_string()),
        }
    }

    fn stop(&mut self) {
        match self.ctl.stop() {
            Ok(()) => {
                self.feedback = "scheduler stopped".into();
                self.refresh_status();
            }
            Err(e) => self.feedback = sanitize_line(&e.to_string()),
        }
    }

    // Returns true when the app should exit.
    fn handle_key(&mut self, code: KeyCode, mods: KeyModifiers) -> bool {
        if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
            return true;
        }

        if let InputMode::EditArgs { buffer } = &mut self.input {
            match code {
                KeyCode::Esc => self.input = InputMode::Normal,
                KeyCode::Enter => {
                    self.args = buffer.trim().to_string();
                    self.input = InputMode::Normal;
                }
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => {
                    if c != '\n' && c != '\r' {
                        buffer.push(c);
                    }
                }
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => {
                self.pane = match self.pane {
                    Pane::Schedulers => Pane::Modes,
                    Pane::Modes => Pane::Schedulers,
                };
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Char('e') => {
                self.input = InputMode::EditArgs {
                    buffer: self.args.clone(),
                };
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Char('s') => self.stop(),
            KeyCode::Char('r') => {
                self.rescan();
                self.refresh_status();
            }
            _ => {}
        }
        false
    }

    fn draw(&mut self, f: &mut ratatui::Frame) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_main(f, chunks[1]);
        self.draw_footer(f, chunks[2]);

        self.draw_modal(f);
    }

    fn draw_header(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let now = chrono::Local::now().format("%H:%M:%S").to_string();
        let (status_text, status_color) = match &self.status {
            RunningStatus::Disabled => ("disabled".to_string(), Color::Yellow),
            RunningStatus::Running(id) => (format!("running: {id}"), Color::Green),
            RunningStatus::Unknown => ("status unknown".to_string(), Color::Red),
        };
        let mut spans = vec![
            Span::styled("scxconf", Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(self.ctl.tool().to_string(), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(status_text, Style::default().fg(status_color)),
        ];
        if let Some(note) = &self.status_note {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(note.clone(), Style::default().fg(Color::Red)));
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(now, Style::default().fg(Color::Yellow)));
        let p = Paragraph::new(Text::from(Line::from(spans))).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Plain),
        );
        f.render_widget(p, area);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let hint = match self.input {
            InputMode::Normal => {
                "[Tab] Pane  [j/k] Move  [e] Edit Args  [Enter] Start/Switch  [s] Stop  [r] Refresh  [q] Quit"
            }
            InputMode::EditArgs { .. } => "[Enter] Save  [Esc] Cancel",
        };
        let p = Paragraph::new(hint)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::TOP));
        f.render_widget(p, area);
    }

    fn draw_main(&mut self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);

        self.draw_schedulers(f, cols[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(cols[1]);

        self.draw_modes(f, rows[0]);
        self.draw_description(f, rows[1]);
        self.draw_args(f, rows[2]);
        self.draw_feedback(f, rows[3]);
    }

    fn pane_block(&self, title: &'static str, pane: Pane) -> Block<'static> {
        let border = if self.pane == pane {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
    }

    fn draw_schedulers(&mut self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let items: Vec<ListItem> = if self.schedulers.is_empty() {
            vec![ListItem::new("<none detected>")]
        } else {
            self.schedulers
                .iter()
                .map(|s| ListItem::new(s.clone()))
                .collect()
        };
        let list = List::new(items)
            .block(self.pane_block("Schedulers", Pane::Schedulers))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::LightYellow))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut self.sched_list);
    }

    fn draw_modes(&mut self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let mut items: Vec<ListItem> = Vec::new();
        if let Some(sched) = self.selected_scheduler() {
            items.push(ListItem::new(DEFAULT_MODE_LABEL));
            for mode in catalog::lookup(sched).modes {
                items.push(ListItem::new(mode.name));
            }
            if catalog::lookup(sched).modes.is_empty() {
                items.push(ListItem::new("<no modes for this scheduler>"));
            }
        }
        let list = List::new(items)
            .block(self.pane_block("Mode", Pane::Modes))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::LightYellow))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut self.mode_list);
    }

    fn draw_description(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let lines = match self.selected_mode() {
            Some(mode) => vec![
                Line::from(vec![
                    Span::styled("Flags: ", Style::default().fg(Color::Yellow)),
                    Span::raw(mode.flags),
                ]),
                Line::from(vec![
                    Span::styled("Description: ", Style::default().fg(Color::Yellow)),
                    Span::raw(mode.description),
                ]),
            ],
            None => vec![Line::from(
                "Select a mode above to view its description and flags.",
            )],
        };
        let p = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("Mode Details")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        f.render_widget(p, area);
    }

    fn draw_args(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let line = if self.args.is_empty() {
            Line::from(Span::styled(
                ARGS_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(self.args.clone())
        };
        let p = Paragraph::new(Text::from(line)).block(
            Block::default()
                .title("Custom Arguments (overrides mode)")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        f.render_widget(p, area);
    }

    fn draw_feedback(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let p = Paragraph::new(self.feedback.clone())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Feedback")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
        f.render_widget(p, area);
    }

    fn draw_modal(&self, f: &mut ratatui::Frame) {
        let InputMode::EditArgs { buffer } = &self.input else {
            return;
        };
        let area = centered_rect(70, 25, f.area());
        let shadow = shadow_rect(area, f.area());
        f.render_widget(
            Fill {
                style: Style::default().bg(Color::Black).add_modifier(Modifier::DIM),
            },
            shadow,
        );
        f.render_widget(Clear, area);

        let mut text = Vec::new();
        text.push(Line::from(vec![
            Span::styled("Scheduler: ", Style::default().fg(Color::Yellow)),
            Span::raw(self.selected_scheduler().unwrap_or("<none>").to_string()),
        ]));
        text.push(Line::from("enter=save  esc=cancel"));
        text.push(Line::from(""));
        text.push(Line::from(buffer.clone()));

        let p = Paragraph::new(Text::from(text))
            .style(Style::default().fg(Color::White).bg(Color::DarkGray))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Custom Arguments")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double),
            );
        f.render_widget(p, area);
    }
}

pub fn run_tui(ctl: ScxCtl) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| Error::msg(e.to_string()))?;
    execute!(stdout, EnterAlternateScreen, Hide).map_err(|e| Error::msg(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| Error::msg(e.to_string()))?;
    terminal
        .clear()
        .map_err(|e| Error::msg(format!("tui clear failed: {e}")))?;

    let result = run_loop(&mut terminal, App::new(ctl));

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show).ok();

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    let tick = Duration::from_millis(100);
    loop {
        let mut draw_panicked = false;
        terminal
            .draw(|f| {
                if catch_unwind(AssertUnwindSafe(|| app.draw(f))).is_err() {
                    draw_panicked = true;
                }
            })
            .map_err(|e| Error::msg(format!("tui draw failed: {e}")))?;
        if draw_panicked {
            let _ = terminal.clear();
            continue;
        }

        // One key press handles one action, and every action blocks until
        // its external call returns; there is never a second call in flight.
        if event::poll(tick).map_err(|e| Error::msg(e.to_string()))? {
            match event::read().map_err(|e| Error::msg(e.to_string()))? {
                Event::Key(k) => {
                    if k.kind != KeyEventKind::Press {
                        continue;
                    }
                    if app.handle_key(k.code, k.modifiers) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }
    Ok(())
}

fn add_signed_saturating(base: usize, delta: isize) -> usize {
    if delta >= 0 {
        base.saturating_add(delta as usize)
    } else {
        base.saturating_sub(delta.unsigned_abs())
    }
}

fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    r: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let vertical = popup_layout[1];
    let popup_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical);
    popup_layout[1]
}

fn shadow_rect(
    inner: ratatui::layout::Rect,
    bounds: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    let x = inner.x.saturating_add(1).min(max_x.saturating_sub(1));
    let y = inner.y.saturating_add(1).min(max_y.saturating_sub(1));
    let w = inner.width.min(max_x.saturating_sub(x));
    let h = inner.height.min(max_y.saturating_sub(y));
    ratatui::layout::Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

struct Fill {
    style: Style,
}

impl Widget for Fill {
    fn render(self, area: ratatui::layout::Rect, buf: &mut Buffer) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                buf[(x, y)].set_char(' ').set_style(self.style);
            }
        }
    }
}
