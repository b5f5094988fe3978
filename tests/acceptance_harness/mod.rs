//! Acceptance Test Harness for TUI testing
//!
//! Wraps `TuiApp<TestBackend>` with methods for simulating user interactions
//! the way a person at the terminal would perform them: typing, arrow keys,
//! and clicks at screen coordinates.

#![allow(dead_code)]

use combobox::config::KeyBindings;
use combobox::model::OptionSet;
use combobox::source::OptionSource;
use combobox::state::{ComboboxController, ComboboxProps, ControllerState};
use combobox::view::{ColorConfig, ComboboxStyles, FrameLayout, TuiApp, ViewSettings};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::time::Duration;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Empty trailing lines are removed to keep snapshots clean.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Mount a static option set in a 40x16 terminal.
    pub fn with_options(options: OptionSet) -> Self {
        Self::with_source(options, 40, 16)
    }

    /// Mount any option source in a terminal of the given size.
    pub fn with_source(source: impl Into<OptionSource>, width: u16, height: u16) -> Self {
        Self::with_props(ComboboxProps::new(source), width, height)
    }

    /// Mount fully specified props.
    pub fn with_props(props: ComboboxProps, width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("TestBackend never fails");
        let controller = ComboboxController::mount(props);
        let settings = ViewSettings {
            label: "Label".to_string(),
            ..ViewSettings::default()
        };
        let mut app = TuiApp::with_terminal(
            terminal,
            controller,
            KeyBindings::default(),
            settings,
            ComboboxStyles::with_color_config(ColorConfig::fixed(false)),
        );
        app.draw().expect("Rendering should succeed in test harness");
        Self { app, running: true }
    }

    /// Controller state after the last event.
    pub fn state(&self) -> &ControllerState {
        self.app.controller().state()
    }

    /// The controller itself.
    pub fn controller(&self) -> &ComboboxController {
        self.app.controller()
    }

    /// False once a quit key was sent.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Send a key and redraw, like one turn of the event loop.
    pub fn send_key(&mut self, code: KeyCode) -> bool {
        self.send_key_with_mods(code, KeyModifiers::NONE)
    }

    /// Send a key with modifiers and redraw.
    pub fn send_key_with_mods(&mut self, code: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return false;
        }
        let quit = self.app.handle_key(KeyEvent::new(code, mods));
        if quit {
            self.running = false;
        } else {
            self.redraw();
        }
        quit
    }

    /// Type each character of `text`.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.send_key(KeyCode::Char(ch));
        }
    }

    /// Left click at screen coordinates, then redraw.
    pub fn click_at(&mut self, column: u16, row: u16) {
        if !self.running {
            return;
        }
        self.app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        self.redraw();
    }

    /// Click the control's input area (left of the affordances).
    pub fn click_control(&mut self) {
        let control = self.layout().control;
        self.click_at(control.x + 1, control.y + 1);
    }

    /// Click the displayed option with this label.
    ///
    /// Panics if the popup is closed or the label is not on screen.
    pub fn click_option(&mut self, label: &str) {
        let layout = self.layout();
        let popup = layout.popup.expect("popup should be open");
        let index = self
            .app
            .controller()
            .displayed_options()
            .iter()
            .position(|option| option.label() == label)
            .expect("label should be displayed");
        let row = u16::try_from(index - layout.scroll_offset).expect("row fits");
        self.click_at(popup.x + 2, popup.y + 1 + row);
    }

    /// Click a cell outside both the control and the popup.
    pub fn click_outside(&mut self) {
        let area = self.app.terminal().backend().buffer().area;
        self.click_at(area.right() - 1, area.bottom() - 1);
    }

    /// Block until a lazy fetch lands, then redraw.
    pub fn wait_for_load(&mut self) -> bool {
        let changed = self
            .app
            .controller_mut()
            .wait_for_load(Duration::from_secs(5));
        self.redraw();
        changed
    }

    /// Layout of the last frame.
    pub fn layout(&self) -> FrameLayout {
        self.app.last_layout().expect("harness always draws once")
    }

    /// Render the current frame to a string.
    pub fn render_to_string(&mut self) -> String {
        self.redraw();
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    fn redraw(&mut self) {
        self.app
            .draw()
            .expect("Rendering should succeed in test harness");
    }
}
