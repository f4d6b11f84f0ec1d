use ratatui::style::{Color, Modifier, Style};

/// Highlight colour for the leading bar of a ranked chart (`#90CAF9`).
pub const HIGHLIGHT_BLUE: Color = Color::Rgb(144, 202, 249);
/// Fill colour for the remaining bars of a ranked chart (`#D3D3D3`).
pub const MUTED_GREY: Color = Color::Rgb(211, 211, 211);
/// Line colour for the daily orders chart (skyblue).
pub const SKY_BLUE: Color = Color::Rgb(135, 206, 235);

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark, 7–15 light. Missing or unparseable values count as dark.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(background_from_colorfgbg)
        .unwrap_or(BackgroundType::Dark)
}

fn background_from_colorfgbg(value: &str) -> Option<BackgroundType> {
    let bg: u8 = value.split(';').next_back()?.parse().ok()?;
    Some(if bg <= 6 {
        BackgroundType::Dark
    } else {
        BackgroundType::Light
    })
}

/// All styles used by the dashboard widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,
    pub error: Style,

    // ── Tabs ─────────────────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// The first bar of a ranked chart.
    pub bar_highlight: Style,
    /// Every other bar.
    pub bar_muted: Style,
    pub chart_line: Style,
    pub axis: Style,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub border: Style,
    pub tile_value: Style,
    /// The bound currently edited in the date picker.
    pub picker_focus: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default()
                .fg(HIGHLIGHT_BLUE)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::Gray),

            bar_highlight: Style::default().fg(HIGHLIGHT_BLUE),
            bar_muted: Style::default().fg(MUTED_GREY),
            chart_line: Style::default().fg(SKY_BLUE),
            axis: Style::default().fg(Color::Gray),

            border: Style::default().fg(Color::DarkGray),
            tile_value: Style::default()
                .fg(HIGHLIGHT_BLUE)
                .add_modifier(Modifier::BOLD),
            picker_focus: Style::default()
                .fg(Color::Black)
                .bg(HIGHLIGHT_BLUE)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// The muted grey is too faint on a light canvas, so non-leading bars use
    /// dark grey instead.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::DarkGray),

            bar_highlight: Style::default().fg(Color::Blue),
            bar_muted: Style::default().fg(Color::DarkGray),
            chart_line: Style::default().fg(Color::Blue),
            axis: Style::default().fg(Color::DarkGray),

            border: Style::default().fg(Color::Gray),
            tile_value: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            picker_focus: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED),
            tab_inactive: Style::default().fg(Color::White),

            bar_highlight: Style::default().fg(Color::Cyan),
            bar_muted: Style::default().fg(Color::White),
            chart_line: Style::default().fg(Color::Cyan),
            axis: Style::default().fg(Color::White),

            border: Style::default().fg(Color::DarkGray),
            tile_value: Style::default().fg(Color::Cyan),
            picker_focus: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Bar style for the bar at `rank` (0-based) of a ranked chart: the
    /// first bar is highlighted and the rest muted.
    pub fn bar_style(&self, rank: usize) -> Style {
        if rank == 0 {
            self.bar_highlight
        } else {
            self.bar_muted
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
