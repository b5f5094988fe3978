//! TUI rendering and terminal management (impure shell)

pub mod control;
pub mod option_list;
pub mod placeholder;
pub mod styles;

pub use control::{ControlHit, ControlView, control_hit};
pub use option_list::{OptionList, row_at, scroll_offset_for};
pub use placeholder::{Placeholder, placeholder_text, placeholder_width};
pub use styles::{ColorConfig, ComboboxStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::layout::{
    PopupDirection, WidthPolicy, choose_direction, popup_area, popup_natural_height,
};
use crate::model::{AppError, KeyAction, SelectOption};
use crate::state::{ComboboxController, ControlPhase};
use crossterm::{
    ExecutableCommand,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Position, Rect},
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Rows taken by the control: border, input, border.
pub const CONTROL_HEIGHT: u16 = 3;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(io) => AppError::Terminal(io),
            TuiError::App(app) => app,
        }
    }
}

/// Presentation settings resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    /// Field label drawn in the control's border.
    pub label: String,
    /// Maximum option rows visible in the popup.
    pub max_popup_rows: u16,
    /// Terminal row of the control's top border.
    pub anchor_row: u16,
}

impl ViewSettings {
    /// Settings from a resolved config, placing the control at `anchor_row`.
    pub fn from_config(config: &ResolvedConfig, anchor_row: u16) -> Self {
        Self {
            label: config.label.clone(),
            max_popup_rows: config.max_popup_rows,
            anchor_row,
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            label: "Label".to_string(),
            max_popup_rows: 8,
            anchor_row: 0,
        }
    }
}

/// Where everything went on the last frame.
///
/// Kept for mouse hit-testing between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Control (or placeholder) rectangle.
    pub control: Rect,
    /// Popup rectangle while open.
    pub popup: Option<Rect>,
    /// First visible popup row.
    pub scroll_offset: usize,
    /// Side the popup is on while open.
    pub direction: Option<PopupDirection>,
}

/// Compute the frame layout.
///
/// `direction` is the side chosen when the popup opened; `None` chooses
/// afresh. The popup height always follows the displayed rows.
pub fn compute_layout(
    viewport: Rect,
    controller: &ComboboxController,
    settings: &ViewSettings,
    direction: Option<PopupDirection>,
    scroll: usize,
) -> FrameLayout {
    let state = controller.state();

    let width = state.computed_width().unwrap_or_else(|| {
        placeholder_text(controller.phase())
            .map(|text| placeholder_width(&settings.label, &text))
            .unwrap_or(WidthPolicy::default().min_width)
    });

    let height = CONTROL_HEIGHT.min(viewport.height);
    let max_y = viewport.bottom().saturating_sub(height);
    let control = Rect {
        x: viewport.x,
        y: viewport.y.saturating_add(settings.anchor_row).min(max_y),
        width: width.min(viewport.width),
        height,
    };

    if !state.is_open() {
        return FrameLayout {
            control,
            popup: None,
            scroll_offset: 0,
            direction: None,
        };
    }

    let displayed = controller.displayed_options();
    let natural = popup_natural_height(displayed.len(), settings.max_popup_rows);
    let direction = direction.unwrap_or_else(|| choose_direction(control, viewport, natural));
    let popup = popup_area(control, viewport, natural, direction);
    let visible = usize::from(popup.height.saturating_sub(2));
    let scroll_offset = scroll_offset_for(
        state.focused_index(),
        scroll,
        visible,
        displayed.len(),
        state.last_action(),
    );

    FrameLayout {
        control,
        popup: Some(popup).filter(|area| area.height > 0),
        scroll_offset,
        direction: Some(direction),
    }
}

/// Draw one frame from controller state and a precomputed layout.
pub fn render_frame(
    frame: &mut Frame,
    controller: &ComboboxController,
    settings: &ViewSettings,
    styles: &ComboboxStyles,
    layout: &FrameLayout,
    hovered: bool,
) {
    let phase = controller.phase();
    if let Some(text) = placeholder_text(phase) {
        let widget = Placeholder::new(&settings.label, &text, styles)
            .failed(matches!(phase, ControlPhase::Failed(_)));
        frame.render_widget(widget, layout.control);
        return;
    }

    let state = controller.state();
    frame.render_widget(
        ControlView::new(&settings.label, state.query_text(), styles)
            .focused(state.is_focused())
            .hovered(hovered)
            .open(state.is_open())
            .has_selection(state.selected_value().is_some()),
        layout.control,
    );

    if let Some(popup) = layout.popup {
        frame.render_widget(
            OptionList::new(controller.displayed_options(), styles)
                .focused(state.focused_index())
                .selected(state.selected_value())
                .scroll(layout.scroll_offset),
            popup,
        );
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    controller: ComboboxController,
    key_bindings: KeyBindings,
    settings: ViewSettings,
    styles: ComboboxStyles,
    /// Side chosen when the popup last opened
    popup_direction: Option<PopupDirection>,
    scroll_offset: usize,
    /// Pointer is over the control
    hovered: bool,
    /// Layout of the last rendered frame (for mouse hit-testing)
    last_layout: Option<FrameLayout>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(
        controller: ComboboxController,
        key_bindings: KeyBindings,
        settings: ViewSettings,
        styles: ComboboxStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(
            terminal,
            controller,
            key_bindings,
            settings,
            styles,
        ))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build an app over an existing terminal (e.g. `TestBackend`).
    pub fn with_terminal(
        terminal: Terminal<B>,
        controller: ComboboxController,
        key_bindings: KeyBindings,
        settings: ViewSettings,
        styles: ComboboxStyles,
    ) -> Self {
        Self {
            terminal,
            controller,
            key_bindings,
            settings,
            styles,
            popup_direction: None,
            scroll_offset: 0,
            hovered: false,
            last_layout: None,
        }
    }

    /// Run the main event loop
    ///
    /// Returns the committed option when the user quits. Between input
    /// events the loop polls the option loader and redraws once it lands.
    pub fn run(&mut self) -> Result<Option<SelectOption>, TuiError> {
        const TICK_INTERVAL: Duration = Duration::from_millis(50);

        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => continue,
                }
                self.draw()?;
            } else if self.controller.poll_load() {
                self.draw()?;
            }
        }

        Ok(self.controller.selected_option().cloned())
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        if let Some(action) = self.key_bindings.get(key) {
            if action == KeyAction::Quit {
                return true;
            }
            if let Some(activation) = self.controller.handle_action(action) {
                info!(
                    value = activation.suggestion.value(),
                    index = activation.index,
                    "Option committed from keyboard"
                );
            } else if action.is_navigation() {
                debug!(
                    focused = ?self.controller.state().focused_index(),
                    "Highlight moved"
                );
            }
            return false;
        }

        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.controller.insert_char(ch);
            }
            KeyCode::Backspace => self.controller.backspace(),
            _ => {}
        }

        false
    }

    /// Handle a single mouse event
    ///
    /// Left clicks are hit-tested against the last rendered frame. A click
    /// on a popup row is the row activation followed by the outside click
    /// of the same gesture.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(layout) = self.last_layout else {
            return;
        };
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => {
                self.hovered = layout.control.contains(position);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(&layout, mouse.column, mouse.row);
            }
            MouseEventKind::ScrollDown if layout.popup.is_some_and(|p| p.contains(position)) => {
                self.controller.arrow_down();
            }
            MouseEventKind::ScrollUp if layout.popup.is_some_and(|p| p.contains(position)) => {
                self.controller.arrow_up();
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, layout: &FrameLayout, column: u16, row: u16) {
        if let Some(popup) = layout.popup {
            if popup.contains(Position::new(column, row)) {
                let len = self.controller.displayed_options().len();
                if let Some(index) = row_at(popup, layout.scroll_offset, len, column, row) {
                    if let Some(activation) = self.controller.click_option(index) {
                        info!(
                            value = activation.suggestion.value(),
                            index = activation.index,
                            "Option activated"
                        );
                    }
                }
                self.controller.click_outside();
                return;
            }
        }

        let state = self.controller.state();
        let hit = control_hit(
            layout.control,
            column,
            row,
            state.selected_value().is_some(),
            state.is_open(),
        );
        match hit {
            Some(ControlHit::Clear) => {
                self.controller.click_clear();
            }
            Some(ControlHit::Open) => self.controller.click_open(),
            Some(ControlHit::Collapse) => self.controller.click_collapse(),
            Some(ControlHit::Surface) => self.controller.click_control(),
            None => self.controller.click_outside(),
        }
    }

    /// Handle a terminal resize event
    ///
    /// The popup side is chosen again on the next frame.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "Handling resize");
        self.popup_direction = None;
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let viewport = Rect::new(0, 0, size.width, size.height);
        let layout = compute_layout(
            viewport,
            &self.controller,
            &self.settings,
            self.popup_direction,
            self.scroll_offset,
        );
        self.popup_direction = layout.direction;
        self.scroll_offset = layout.scroll_offset;

        let controller = &self.controller;
        let settings = &self.settings;
        let styles = &self.styles;
        let hovered = self.hovered;
        self.terminal.draw(|frame| {
            render_frame(frame, controller, settings, styles, &layout, hovered);
        })?;

        self.last_layout = Some(layout);
        Ok(())
    }

    /// The controller driving this app.
    pub fn controller(&self) -> &ComboboxController {
        &self.controller
    }

    /// Mutable access for hosts that feed events directly.
    pub fn controller_mut(&mut self) -> &mut ComboboxController {
        &mut self.controller
    }

    /// Layout of the last rendered frame.
    pub fn last_layout(&self) -> Option<FrameLayout> {
        self.last_layout
    }

    /// Whether the pointer is over the control.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// The underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Hand back the controller.
    pub fn into_controller(self) -> ComboboxController {
        self.controller
    }
}

/// Initialize the terminal, run the event loop and restore the terminal.
///
/// Returns the committed option. Logging must be initialized by the caller.
pub fn run_combobox(
    controller: ComboboxController,
    key_bindings: KeyBindings,
    settings: ViewSettings,
    styles: ComboboxStyles,
) -> Result<Option<SelectOption>, TuiError> {
    let mut app = TuiApp::new(controller, key_bindings, settings, styles)?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
