//! Terminal display surface
//!
//! Full-screen rendering with ratatui in the alternate screen. The
//! dashboard is two rows of blocks: speed on top, throttle/RPM and coolant
//! temperature below.

use crossterm::{
    cursor::Hide,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    prelude::*,
    widgets::{Block, Gauge, Padding, Paragraph},
};
use std::collections::HashMap;
use std::io::{self, Stdout};

use obdhud_core::classify::TemperatureBand;
use obdhud_core::display::{DisplaySurface, SurfaceOptions, TextField};

const BLOCK_HEIGHT: u16 = 3;
const MAX_WIDTH: u16 = 64;
const TEMPERATURE_WIDTH: u16 = 14;
const RPM_WIDTH: u16 = 10;
const SPEED_UNIT: &str = "km/h";
const RPM_UNIT: &str = "RPM";

/// Block positions for a given screen area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DashAreas {
    speed: Rect,
    throttle: Rect,
    temperature: Rect,
}

fn dashboard_areas(area: Rect, options: SurfaceOptions) -> DashAreas {
    let [column] = Layout::horizontal([Constraint::Length(MAX_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(area);

    let flex = if options.bottom_orientation {
        Flex::End
    } else {
        Flex::Center
    };
    let [top, bottom] = Layout::vertical([Constraint::Length(BLOCK_HEIGHT); 2])
        .flex(flex)
        .areas(column);

    let temperature_width = TEMPERATURE_WIDTH.min(bottom.width / 3);
    let [throttle, temperature] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(temperature_width)])
            .areas(bottom);

    DashAreas {
        speed: top,
        throttle,
        temperature,
    }
}

fn band_color(band: TemperatureBand) -> Color {
    let c = band.color();
    Color::Rgb(c.r, c.g, c.b)
}

/// Values captured for one frame
struct Readout {
    speed: String,
    throttle: String,
    rpm: String,
    temperature: String,
    progress: u8,
    band: TemperatureBand,
    options: SurfaceOptions,
}

impl Readout {
    fn block(&self) -> Block<'static> {
        if self.options.debug_layout {
            Block::bordered().border_style(Style::default().fg(Color::DarkGray))
        } else {
            Block::new().padding(Padding::uniform(1))
        }
    }

    fn value_style(color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    fn render(&self, frame: &mut Frame) {
        let areas = dashboard_areas(frame.area(), self.options);

        let speed = Paragraph::new(format!("{} {}", self.speed, SPEED_UNIT))
            .style(Self::value_style(Color::White))
            .alignment(Alignment::Center)
            .block(self.block());
        frame.render_widget(speed, areas.speed);

        let block = self.block();
        let inner = block.inner(areas.throttle);
        frame.render_widget(block, areas.throttle);

        let [bar, rpm] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(RPM_WIDTH)])
                .spacing(1)
                .areas(inner);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::White))
            .use_unicode(true)
            .percent(u16::from(self.progress.min(100)))
            .label(Span::styled(self.throttle.clone(), Self::value_style(Color::White)));
        frame.render_widget(gauge, bar);

        let rpm_text = Paragraph::new(format!("{} {}", self.rpm, RPM_UNIT))
            .style(Self::value_style(Color::White))
            .alignment(Alignment::Right);
        frame.render_widget(rpm_text, rpm);

        let temperature = Paragraph::new(self.temperature.as_str())
            .style(Self::value_style(band_color(self.band)))
            .alignment(Alignment::Center)
            .block(self.block());
        frame.render_widget(temperature, areas.temperature);
    }
}

/// Dashboard rendered into a ratatui terminal
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    options: SurfaceOptions,
    owns_terminal: bool,
    texts: HashMap<TextField, String>,
    progress: u8,
    band: TemperatureBand,
    closed: bool,
}

fn restore_terminal() {
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        tracing::warn!("failed to leave alternate screen: {e}");
    }
    if let Err(e) = disable_raw_mode() {
        tracing::warn!("failed to disable raw mode: {e}");
    }
}

impl TerminalSurface<CrosstermBackend<Stdout>> {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn open(options: SurfaceOptions) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore_terminal();
                return Err(e);
            }
        };
        let mut surface = Self::new(terminal, options);
        surface.owns_terminal = true;
        Ok(surface)
    }
}

impl<B: Backend> TerminalSurface<B> {
    /// Render through any backend without touching terminal modes
    pub fn with_backend(backend: B, options: SurfaceOptions) -> Result<Self, B::Error> {
        Ok(Self::new(Terminal::new(backend)?, options))
    }

    fn new(terminal: Terminal<B>, options: SurfaceOptions) -> Self {
        Self {
            terminal,
            options,
            owns_terminal: false,
            texts: HashMap::new(),
            progress: 0,
            band: TemperatureBand::Normal,
            closed: false,
        }
    }

    /// True once torn down
    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn readout(&self) -> Readout {
        let text = |field: TextField| self.texts.get(&field).cloned().unwrap_or_default();
        Readout {
            speed: text(TextField::Speed),
            throttle: text(TextField::Throttle),
            rpm: text(TextField::Rpm),
            temperature: text(TextField::Temperature),
            progress: self.progress,
            band: self.band,
            options: self.options,
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.owns_terminal {
            if let Err(e) = self.terminal.show_cursor() {
                tracing::warn!("failed to show cursor: {e}");
            }
            restore_terminal();
        }
        tracing::debug!("terminal surface closed");
    }
}

impl<B: Backend> DisplaySurface for TerminalSurface<B> {
    fn set_text(&mut self, field: TextField, value: &str) {
        self.texts.insert(field, value.to_string());
    }

    fn set_progress(&mut self, value: u8) {
        self.progress = value.min(100);
    }

    fn set_classification(&mut self, band: TemperatureBand) {
        self.band = band;
    }

    fn refresh(&mut self) {
        if self.closed {
            return;
        }
        let readout = self.readout();
        if let Err(e) = self.terminal.draw(|frame| readout.render(frame)) {
            tracing::warn!("failed to draw dashboard: {e}");
        }
    }

    fn teardown(&mut self) {
        self.close();
    }
}

impl<B: Backend> Drop for TerminalSurface<B> {
    fn drop(&mut self) {
        self.close();
    }
}
