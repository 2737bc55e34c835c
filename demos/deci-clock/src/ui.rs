//! Demo UI - keyboard handling and terminal presentation

use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::MoveTo;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType};
use parking_lot::Mutex;

use deci_core::{Color, DeciResult, UtcOffset};
use deci_face::{CellCanvas, ReadoutBoard, ReadoutSlot, ReadoutTarget, Surface};
use deci_runtime::{EntryOutcome, Frame, OffsetSelector, PreferenceStore, Presenter};

/// Lines below the dial: slider, readouts, entry/toast, help
pub const STATUS_LINES: u16 = 4;

const TOAST_DURATION: Duration = Duration::from_secs(4);
const MAX_ENTRY_LEN: usize = 16;

/// Transient message under the dial
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub created: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created.elapsed() > TOAST_DURATION
    }
}

/// Input-side state shown by the presenter
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Manual entry line, `Some` while open
    pub entry: Option<String>,
    pub toast: Option<Toast>,
}

impl UiState {
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Current toast text, dropping it once expired
    pub fn toast_text(&mut self) -> Option<&str> {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
        self.toast.as_ref().map(|t| t.message.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Apply one key press to the UI state and the selector
pub fn handle_key<S: PreferenceStore>(
    state: &mut UiState,
    selector: &mut OffsetSelector<S>,
    key: KeyEvent,
) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Continue;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    if let Some(buffer) = state.entry.as_mut() {
        match key.code {
            KeyCode::Enter => {
                let text = std::mem::take(buffer);
                state.entry = None;
                if let EntryOutcome::Rejected { notice, .. } =
                    selector.on_manual_entry(Some(&text))
                {
                    state.show_toast(notice);
                }
            }
            KeyCode::Esc => {
                state.entry = None;
                selector.on_manual_entry(None);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if buffer.len() < MAX_ENTRY_LEN => buffer.push(c),
            _ => {}
        }
        return KeyAction::Continue;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Left | KeyCode::Char('h') => {
            selector.step(false);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            selector.step(true);
        }
        KeyCode::Char('[') => cycle_zone(selector, false),
        KeyCode::Char(']') => cycle_zone(selector, true),
        KeyCode::Char('t') => state.entry = Some(String::new()),
        _ => {}
    }
    KeyAction::Continue
}

fn cycle_zone<S: PreferenceStore>(selector: &mut OffsetSelector<S>, forward: bool) {
    let options = OffsetSelector::<S>::zone_options();
    let current = selector.selected_option();
    let next = if forward {
        (current + 1).min(options.len() - 1)
    } else {
        current.saturating_sub(1)
    };
    if let Err(e) = selector.select_zone(&options[next].value) {
        tracing::warn!(error = %e, "zone selection failed");
    }
}

/// Slider track with the knob at `offset`
pub fn slider_bar(offset: UtcOffset) -> String {
    let knob = (offset.hours() - UtcOffset::MIN_HOURS) as usize;
    let track: String = UtcOffset::all()
        .enumerate()
        .map(|(i, _)| if i == knob { '●' } else { '─' })
        .collect();
    format!("{} {} +{}", UtcOffset::MIN_HOURS, track, UtcOffset::MAX_HOURS)
}

/// Largest dial grid that fits above the status lines, two columns per row
pub fn fit_canvas(term: (u16, u16), surface: (f64, f64)) -> DeciResult<CellCanvas> {
    let aspect = surface.0 / surface.1;
    let avail_rows = term.1.saturating_sub(STATUS_LINES).max(1) as f64;
    let rows = avail_rows.min(term.0 as f64 / (2.0 * aspect)).floor().max(1.0);
    let cols = (rows * 2.0 * aspect).round().max(1.0);
    CellCanvas::new(cols as usize, rows as usize, surface.0, surface.1)
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb8();
    TermColor::Rgb { r, g, b }
}

/// Draws frames into the alternate screen
pub struct TerminalPresenter {
    out: Stdout,
    canvas: CellCanvas,
    board: ReadoutBoard,
    surface_size: (f64, f64),
    term_size: (u16, u16),
    state: Arc<Mutex<UiState>>,
}

impl TerminalPresenter {
    pub fn new(surface_size: (f64, f64), state: Arc<Mutex<UiState>>) -> DeciResult<Self> {
        let term_size = terminal::size()?;
        Ok(Self {
            out: io::stdout(),
            canvas: fit_canvas(term_size, surface_size)?,
            board: ReadoutBoard::full(),
            surface_size,
            term_size,
            state,
        })
    }

    fn draw_canvas(&mut self) -> io::Result<()> {
        let mut last: Option<(Color, Color, bool)> = None;
        for row in 0..self.canvas.rows() {
            queue!(self.out, MoveTo(0, row as u16))?;
            for cell in self.canvas.row(row) {
                let bg = cell.bg.over(&Color::BLACK);
                let fg = cell.fg.over(&bg);
                if last != Some((fg, bg, cell.bold)) {
                    queue!(
                        self.out,
                        SetForegroundColor(term_color(fg)),
                        SetBackgroundColor(term_color(bg)),
                        SetAttribute(if cell.bold {
                            Attribute::Bold
                        } else {
                            Attribute::NormalIntensity
                        })
                    )?;
                    last = Some((fg, bg, cell.bold));
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))
    }

    fn draw_status(&mut self, frame: &Frame) -> io::Result<()> {
        let top = self.canvas.rows() as u16;
        let text = |slot| self.board.text(slot).unwrap_or("").to_string();
        let readouts = format!(
            "Time {}   Decimal {}   Day {}",
            text(ReadoutSlot::WallClock),
            text(ReadoutSlot::Decimal),
            text(ReadoutSlot::Progress),
        );

        let (entry_line, help) = {
            let mut state = self.state.lock();
            match state.entry.clone() {
                Some(buffer) => (
                    format!("Offset: {buffer}_"),
                    "Enter apply  Esc cancel",
                ),
                None => (
                    state.toast_text().unwrap_or("").to_string(),
                    "←/→ offset  [/] zone  t type offset  q quit",
                ),
            }
        };

        let lines = [
            format!("{:<8} {}", frame.offset.to_string(), slider_bar(frame.offset)),
            readouts,
            entry_line,
            help.to_string(),
        ];
        for (i, line) in lines.iter().enumerate() {
            queue!(
                self.out,
                MoveTo(0, top + i as u16),
                Print(line),
                Clear(ClearType::UntilNewLine)
            )?;
        }
        Ok(())
    }
}

impl Presenter for TerminalPresenter {
    fn targets(&mut self) -> (&mut dyn Surface, &mut dyn ReadoutTarget) {
        (&mut self.canvas, &mut self.board)
    }

    fn present(&mut self, frame: &Frame) -> DeciResult<()> {
        let size = terminal::size()?;
        if size != self.term_size {
            // Redrawn at the new size on the next tick
            self.term_size = size;
            self.canvas = fit_canvas(size, self.surface_size)?;
            queue!(self.out, Clear(ClearType::All))?;
            self.out.flush()?;
            return Ok(());
        }

        self.draw_canvas()?;
        self.draw_status(frame)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deci_runtime::{MemoryStore, OFFSET_KEY, REJECTION_NOTICE};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(
        state: &mut UiState,
        selector: &mut OffsetSelector<MemoryStore>,
        text: &str,
    ) {
        handle_key(state, selector, press(KeyCode::Char('t')));
        for c in text.chars() {
            handle_key(state, selector, press(KeyCode::Char(c)));
        }
        handle_key(state, selector, press(KeyCode::Enter));
    }

    fn selector(hours: i64) -> OffsetSelector<MemoryStore> {
        OffsetSelector::init(MemoryStore::new(), OFFSET_KEY, hours)
    }

    #[test]
    fn test_arrows_move_slider_within_range() {
        let mut state = UiState::default();
        let mut sel = selector(13);

        handle_key(&mut state, &mut sel, press(KeyCode::Right));
        handle_key(&mut state, &mut sel, press(KeyCode::Char('l')));
        assert_eq!(sel.offset().hours(), 14);

        handle_key(&mut state, &mut sel, press(KeyCode::Left));
        handle_key(&mut state, &mut sel, press(KeyCode::Char('h')));
        assert_eq!(sel.offset().hours(), 12);
    }

    #[test]
    fn test_zone_list_cycles_and_clamps() {
        let mut state = UiState::default();
        let mut sel = selector(-11);

        handle_key(&mut state, &mut sel, press(KeyCode::Char('[')));
        handle_key(&mut state, &mut sel, press(KeyCode::Char('[')));
        assert_eq!(sel.offset().hours(), -12);
        assert_eq!(sel.selected_option(), 0);

        handle_key(&mut state, &mut sel, press(KeyCode::Char(']')));
        assert_eq!(sel.offset().hours(), -11);
    }

    #[test]
    fn test_manual_entry_accepts_in_range() {
        let mut state = UiState::default();
        let mut sel = selector(0);

        type_text(&mut state, &mut sel, "14");
        assert_eq!(sel.offset().hours(), 14);
        assert!(state.entry.is_none());
        assert!(state.toast_text().is_none());
    }

    #[test]
    fn test_manual_entry_rejection_shows_toast() {
        let mut state = UiState::default();
        let mut sel = selector(3);

        type_text(&mut state, &mut sel, "15");
        assert_eq!(sel.offset().hours(), 3);
        assert_eq!(state.toast_text(), Some(REJECTION_NOTICE));
    }

    #[test]
    fn test_entry_keys_do_not_quit_or_move() {
        let mut state = UiState::default();
        let mut sel = selector(0);

        handle_key(&mut state, &mut sel, press(KeyCode::Char('t')));
        assert_eq!(
            handle_key(&mut state, &mut sel, press(KeyCode::Char('q'))),
            KeyAction::Continue
        );
        handle_key(&mut state, &mut sel, press(KeyCode::Backspace));
        handle_key(&mut state, &mut sel, press(KeyCode::Char('l')));
        assert_eq!(state.entry.as_deref(), Some("l"));

        // Esc cancels the entry only
        assert_eq!(
            handle_key(&mut state, &mut sel, press(KeyCode::Esc)),
            KeyAction::Continue
        );
        assert!(state.entry.is_none());
        assert_eq!(sel.offset().hours(), 0);
        assert!(state.toast_text().is_none());
    }

    #[test]
    fn test_non_numeric_entry_is_ignored() {
        let mut state = UiState::default();
        let mut sel = selector(5);

        type_text(&mut state, &mut sel, "abc");
        assert_eq!(sel.offset().hours(), 5);
        assert!(state.toast_text().is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut state = UiState::default();
        let mut sel = selector(0);

        assert_eq!(handle_key(&mut state, &mut sel, press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handle_key(&mut state, &mut sel, press(KeyCode::Esc)), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut state, &mut sel, ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_slider_bar_knob() {
        let bar = slider_bar(UtcOffset::MIN);
        assert!(bar.starts_with("-12 ●─"));
        assert!(bar.ends_with("─ +14"));
        assert_eq!(slider_bar(UtcOffset::MAX).chars().filter(|&c| c == '●').count(), 1);
        assert!(slider_bar(UtcOffset::MAX).ends_with("● +14"));
    }

    #[test]
    fn test_fit_canvas_leaves_room_for_status() {
        let canvas = fit_canvas((120, 40), (500.0, 500.0)).unwrap();
        assert_eq!(canvas.rows(), 36);
        assert_eq!(canvas.cols(), 72);

        // Narrow terminal: width bound
        let canvas = fit_canvas((40, 40), (500.0, 500.0)).unwrap();
        assert_eq!(canvas.rows(), 20);
        assert_eq!(canvas.cols(), 40);

        // Tiny terminal still gets one cell
        let canvas = fit_canvas((1, 2), (500.0, 500.0)).unwrap();
        assert_eq!((canvas.cols(), canvas.rows()), (2, 1));
    }
}
