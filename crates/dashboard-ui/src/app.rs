//! Main application state and TUI event loop for the dashboard.
//!
//! [`App`] owns the theme, the selected section, the sidebar logo and the
//! [`DataManager`]. Key presses either switch sections, quit, or become
//! [`FilterCommand`]s for the date picker.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};

use dashboard_core::{DashboardError, Result};
use dashboard_runtime::data_manager::{DataManager, FilterCommand};
use dashboard_runtime::filter::MONTH_STEP_DAYS;

use crate::components::date_picker::{self, DatePicker};
use crate::components::header::Header;
use crate::components::logo::Logo;
use crate::themes::Theme;
use crate::{customers_view, delivery_view, orders_view, products_view, rfm_view};

/// Width of the sidebar holding the logo and the date picker.
const SIDEBAR_WIDTH: u16 = 34;

// ── Section ───────────────────────────────────────────────────────────────────

/// Which dashboard section is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Orders,
    Products,
    Customers,
    Rfm,
    Delivery,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Orders,
        Section::Products,
        Section::Customers,
        Section::Rfm,
        Section::Delivery,
    ];

    /// Parse a `--view` value.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Name used on the command line and in the saved preferences.
    pub fn name(self) -> &'static str {
        match self {
            Section::Orders => "orders",
            Section::Products => "products",
            Section::Customers => "customers",
            Section::Rfm => "rfm",
            Section::Delivery => "delivery",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Orders => "Orders",
            Section::Products => "Products",
            Section::Customers => "Customers",
            Section::Rfm => "RFM",
            Section::Delivery => "Delivery",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── TerminalGuard ─────────────────────────────────────────────────────────────

/// Raw-mode alternate-screen terminal, restored on drop.
///
/// Dropping restores the terminal even when the event loop future is
/// cancelled by the Ctrl+C signal branch in `main`.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().map_err(terminal_error)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(terminal_error)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn terminal_error(e: io::Error) -> DashboardError {
    DashboardError::Terminal(e.to_string())
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub section: Section,
    pub logo: Logo,
    pub manager: DataManager,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, section: Section, logo: Logo, manager: DataManager) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            section,
            logo,
            manager,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Terminal events are polled synchronously with a short timeout; the
    /// loop yields to the runtime between polls so that the Ctrl+C signal
    /// future in `main` gets a chance to run.
    pub async fn run(mut self) -> Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let tick_rate = Duration::from_millis(100);

        tracing::info!(section = self.section.name(), "dashboard started");

        while !self.should_quit {
            guard
                .terminal
                .draw(|frame| self.render(frame))
                .map_err(terminal_error)?;

            if event::poll(tick_rate).map_err(terminal_error)? {
                if let Event::Key(key) = event::read().map_err(terminal_error)? {
                    self.handle_key(key);
                }
            }

            tokio::task::yield_now().await;
        }

        tracing::info!("dashboard closed");
        Ok(())
    }

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let command = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                self.section = Section::ALL[idx];
                return;
            }
            KeyCode::Char(']') => {
                self.section = self.section.next();
                return;
            }
            KeyCode::Char('[') => {
                self.section = self.section.prev();
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => FilterCommand::ToggleFocus,
            KeyCode::Left => FilterCommand::Shift(-1),
            KeyCode::Right => FilterCommand::Shift(1),
            KeyCode::Up => FilterCommand::Shift(MONTH_STEP_DAYS),
            KeyCode::Down => FilterCommand::Shift(-MONTH_STEP_DAYS),
            KeyCode::Home | KeyCode::End => FilterCommand::ResetFocused,
            KeyCode::Char('r') | KeyCode::Char('R') => FilterCommand::ResetAll,
            _ => return,
        };

        if self.manager.apply(command) {
            tracing::debug!(?command, rows = self.manager.filtered_row_count(), "filter changed");
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
            ])
            .split(area);

        let header = Header::new(
            self.manager.range(),
            self.manager.filtered_row_count(),
            &self.theme,
        );
        frame.render_widget(Paragraph::new(header.to_lines()), rows[0]);

        self.render_tabs(frame, rows[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(rows[2]);
        self.render_sidebar(frame, body[0]);
        self.render_section(frame, body[1]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Section::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title())))
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.section.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .divider(Span::styled("│", self.theme.separator))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border)
                    .title(Span::styled(
                        " 1-5 or [ ] switch section · q quit ",
                        self.theme.dim,
                    )),
            );
        frame.render_widget(tabs, area);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let mut lines = self.logo.to_lines(&self.theme);
        lines.push(Line::from(""));

        match (self.manager.range(), self.manager.limits()) {
            (Some(range), Some(limits)) => {
                let picker = DatePicker::new(range, limits, self.manager.focus(), &self.theme);
                lines.extend(picker.to_lines());
            }
            _ => lines.extend(date_picker::no_data_lines(&self.theme)),
        }

        frame.render_widget(
            Paragraph::new(Text::from(lines)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border),
            ),
            area,
        );
    }

    fn render_section(&self, frame: &mut Frame, area: Rect) {
        let views = self.manager.views();
        let summary = self.manager.summary();
        match self.section {
            Section::Orders => {
                orders_view::render_orders_view(frame, area, views, summary, &self.theme)
            }
            Section::Products => products_view::render_products_view(frame, area, views, &self.theme),
            Section::Customers => {
                customers_view::render_customers_view(frame, area, views, &self.theme)
            }
            Section::Rfm => rfm_view::render_rfm_view(frame, area, views, summary, &self.theme),
            Section::Delivery => delivery_view::render_delivery_view(frame, area, views, &self.theme),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
