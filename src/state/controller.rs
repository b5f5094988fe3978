//! Combobox interaction state machine.
//!
//! `ComboboxController` owns the full option set and one [`ControllerState`].
//! Every event handler runs to completion on the UI thread and leaves the
//! state consistent:
//!
//! - `focused_index` is within the currently displayed list
//! - the popup is never open while the control width is unresolved
//! - a locked selection empties the filtered list and mirrors its label
//!   into the query
//!
//! The displayed list is the full set while the query is empty or a
//! selection is locked, otherwise the filtered subset.
//!
//! # Pointer gestures
//!
//! A click on an option row is followed by an outside click for the same
//! gesture (the popup is not part of the control surface). The row click sets
//! the one-shot `selection_gate`; the outside click consumes it and only
//! closes the popup, so the commit is never clobbered.

use crate::layout::{WidthPolicy, control_width};
use crate::model::{Activation, KeyAction, LoadError, OptionSet, SelectOption};
use crate::source::{LoadCompletion, LoadHandle, MountId, OptionSource};
use crate::state::filter::filter_options;
use crate::state::load::LoadState;
use crate::state::navigation::{next_index, prev_index};
use std::time::Duration;
use tracing::{debug, info, warn};

// ===== ChangeEvent =====

/// Raw text-change event passed to the `on_change` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Query text after the change.
    pub value: String,
    /// Query text before the change.
    pub previous: String,
}

/// Callback invoked whenever the query text changes through input.
pub type ChangeHandler = Box<dyn FnMut(&ChangeEvent)>;

// ===== ComboboxProps =====

/// Inputs supplied by the host when mounting a combobox.
pub struct ComboboxProps {
    /// Pre-selected option value.
    pub value: Option<String>,
    /// Option source, static or lazy.
    pub options: OptionSource,
    /// Text-change callback.
    pub on_change: Option<ChangeHandler>,
    /// Control sizing policy.
    pub width_policy: WidthPolicy,
}

impl ComboboxProps {
    /// Props with the given source and defaults for everything else.
    pub fn new(options: impl Into<OptionSource>) -> Self {
        Self {
            value: None,
            options: options.into(),
            on_change: None,
            width_policy: WidthPolicy::default(),
        }
    }

    /// Pre-select the option carrying `value` once options are available.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Register the text-change callback.
    pub fn on_change(mut self, handler: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Override the sizing policy.
    pub fn width_policy(mut self, policy: WidthPolicy) -> Self {
        self.width_policy = policy;
        self
    }
}

// ===== ControllerState =====

/// All interaction state of one mounted combobox.
///
/// Mutated only by `ComboboxController` handlers; read through accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    query_text: String,
    is_open: bool,
    is_focused: bool,
    focused_index: Option<usize>,
    selected_value: Option<String>,
    filtered_options: OptionSet,
    computed_width: Option<u16>,
    load_state: LoadState,
    /// Set by a pointer activation, consumed by the outside click of the
    /// same gesture.
    selection_gate: bool,
    /// Keyboard action handled by the latest transition, if it was one.
    last_action: Option<KeyAction>,
}

impl ControllerState {
    /// Current text of the input. Empty means no active search.
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Whether the option popup is visible.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether the input has logical focus.
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// Highlighted row in the displayed list.
    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    /// Value of the committed selection.
    pub fn selected_value(&self) -> Option<&str> {
        self.selected_value.as_deref()
    }

    /// Options matching the query; empty without a query or with a selection.
    pub fn filtered_options(&self) -> &OptionSet {
        &self.filtered_options
    }

    /// Control width in cells, `None` while unresolved.
    pub fn computed_width(&self) -> Option<u16> {
        self.computed_width
    }

    /// Fetch lifecycle.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// True between a pointer activation and the outside click that follows.
    pub fn selection_gate(&self) -> bool {
        self.selection_gate
    }

    /// Keyboard action handled by the latest transition.
    pub fn last_action(&self) -> Option<KeyAction> {
        self.last_action
    }
}

// ===== Derived views =====

/// Which derived state the controller is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Popup hidden.
    Closed,
    /// Popup shows the full option set.
    OpenBrowsing,
    /// Popup shows the filtered subset.
    OpenFiltering,
}

/// What the presentation layer should draw in place of the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPhase<'a> {
    /// Fetch in flight.
    Loading,
    /// Fetch failed.
    Failed(&'a LoadError),
    /// Options available but empty; the control cannot open.
    Disabled,
    /// Input and popup can render.
    Ready,
}

// ===== ComboboxController =====

/// Owner of the option set and the interaction state.
pub struct ComboboxController {
    state: ControllerState,
    options: OptionSet,
    mount_id: MountId,
    loader: Option<LoadHandle>,
    initial_value: Option<String>,
    on_change: Option<ChangeHandler>,
    width_policy: WidthPolicy,
}

impl std::fmt::Debug for ComboboxController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboboxController")
            .field("state", &self.state)
            .field("options", &self.options.len())
            .field("mount_id", &self.mount_id)
            .field("loading", &self.loader.is_some())
            .finish_non_exhaustive()
    }
}

impl ComboboxController {
    /// Mount a combobox.
    ///
    /// A static source is ingested immediately. A lazy source starts its
    /// fetch on a loader thread and leaves the state `Loading` until
    /// [`poll_load`](Self::poll_load) picks up the completion.
    pub fn mount(props: ComboboxProps) -> Self {
        let ComboboxProps {
            value,
            options,
            on_change,
            width_policy,
        } = props;

        let mut controller = Self {
            state: ControllerState::default(),
            options: OptionSet::empty(),
            mount_id: MountId::next(),
            loader: None,
            initial_value: value,
            on_change,
            width_policy,
        };

        match options {
            OptionSource::Static(options) => controller.ingest(options),
            OptionSource::Lazy(fetcher) => {
                controller.state.load_state = LoadState::Loading;
                match LoadHandle::spawn(controller.mount_id, fetcher) {
                    Ok(handle) => {
                        debug!(mount_id = controller.mount_id.get(), "Option fetch started");
                        controller.loader = Some(handle);
                    }
                    Err(err) => {
                        warn!(error = %err, "Option fetch could not start");
                        controller.state.load_state = LoadState::Failed(err);
                    }
                }
            }
        }

        controller
    }

    // ----- accessors -----

    /// Current interaction state.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Full option set (empty until loaded).
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Identity of this mount.
    pub fn mount_id(&self) -> MountId {
        self.mount_id
    }

    /// True once the control width is known.
    pub fn is_ready(&self) -> bool {
        self.state.computed_width.is_some()
    }

    /// What should be drawn for the control.
    pub fn phase(&self) -> ControlPhase<'_> {
        match &self.state.load_state {
            LoadState::Loading => ControlPhase::Loading,
            LoadState::Failed(err) => ControlPhase::Failed(err),
            LoadState::Idle | LoadState::Loaded if self.is_ready() => ControlPhase::Ready,
            LoadState::Idle | LoadState::Loaded => ControlPhase::Disabled,
        }
    }

    /// Derived open/filter mode.
    pub fn view_mode(&self) -> ViewMode {
        if !self.state.is_open {
            ViewMode::Closed
        } else if self.shows_full_set() {
            ViewMode::OpenBrowsing
        } else {
            ViewMode::OpenFiltering
        }
    }

    /// The list the popup shows and the keyboard navigates.
    pub fn displayed_options(&self) -> &OptionSet {
        if self.shows_full_set() {
            &self.options
        } else {
            &self.state.filtered_options
        }
    }

    /// The committed option, if any.
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.state
            .selected_value
            .as_deref()
            .and_then(|value| self.options.find_by_value(value))
    }

    /// Filtered list as derived from the current query and selection.
    ///
    /// Empty while a selection is locked or the query is empty.
    pub fn derive_filtered(&self) -> OptionSet {
        if self.state.selected_value.is_some() || self.state.query_text.is_empty() {
            OptionSet::empty()
        } else {
            filter_options(&self.options, &self.state.query_text)
        }
    }

    fn shows_full_set(&self) -> bool {
        self.state.query_text.is_empty() || self.state.selected_value.is_some()
    }

    // ----- async load -----

    /// Apply the fetch completion if it has arrived.
    ///
    /// Returns true when the state changed.
    pub fn poll_load(&mut self) -> bool {
        let completion = match &self.loader {
            Some(handle) => handle.try_take(),
            None => None,
        };
        match completion {
            Some(completion) => self.apply_load(completion),
            None => false,
        }
    }

    /// Block up to `timeout` for the fetch completion and apply it.
    ///
    /// Returns true when the state changed.
    pub fn wait_for_load(&mut self, timeout: Duration) -> bool {
        let completion = match &self.loader {
            Some(handle) => handle.wait(timeout),
            None => None,
        };
        match completion {
            Some(completion) => self.apply_load(completion),
            None => false,
        }
    }

    /// Apply a fetch completion.
    ///
    /// Completions addressed to another mount, or arriving when no fetch is
    /// in flight, are discarded. Returns true when the state changed.
    pub fn apply_load(&mut self, completion: LoadCompletion) -> bool {
        if completion.mount_id != self.mount_id {
            warn!(
                mount_id = self.mount_id.get(),
                completion_mount_id = completion.mount_id.get(),
                "Discarding stale option fetch result"
            );
            return false;
        }
        if !self.state.load_state.is_loading() {
            debug!(
                mount_id = self.mount_id.get(),
                "Ignoring option fetch result outside of loading state"
            );
            return false;
        }

        self.loader = None;
        match completion.result {
            Ok(options) => {
                info!(count = options.len(), "Options loaded");
                self.ingest(options);
                self.state.load_state = LoadState::Loaded;
            }
            Err(err) => {
                warn!(error = %err, "Option fetch failed");
                self.state.load_state = LoadState::Failed(err);
            }
        }
        true
    }

    fn ingest(&mut self, options: OptionSet) {
        self.options = options;
        self.state.computed_width = control_width(&self.options, &self.width_policy).ok();
        self.state.filtered_options = OptionSet::empty();

        if self.state.computed_width.is_none() {
            warn!("Option set is empty, control disabled");
            return;
        }

        if let Some(value) = self.initial_value.take() {
            match self.options.position_of_value(&value) {
                Some(index) => {
                    if let Some(option) = self.options.get(index) {
                        self.state.query_text = option.label().to_string();
                    }
                    self.state.selected_value = Some(value);
                    self.state.focused_index = Some(index);
                }
                None => warn!(value = %value, "Initial value matches no option"),
            }
        }
    }

    // ----- transitions -----

    /// Start a transition: drop any gate left by a gesture that never sent
    /// its outside click, and record the keyboard action.
    fn begin(&mut self, action: Option<KeyAction>) {
        self.state.selection_gate = false;
        self.state.last_action = action;
    }

    fn set_open(&mut self, open: bool) {
        let open = open && self.is_ready();
        if open != self.state.is_open {
            debug!(open, "Popup visibility changed");
            if open {
                if let Some(value) = self.state.selected_value.as_deref() {
                    self.state.focused_index = self.options.position_of_value(value);
                }
            }
        }
        self.state.is_open = open;
    }

    /// Give the input logical focus without opening the popup.
    pub fn focus(&mut self) {
        self.begin(None);
        self.state.is_focused = true;
    }

    /// Click on the control surface: toggle the popup and focus the input.
    pub fn click_control(&mut self) {
        self.begin(None);
        self.state.is_focused = true;
        let open = !self.state.is_open;
        self.set_open(open);
    }

    /// Click on the "open" affordance: force the popup open.
    pub fn click_open(&mut self) {
        self.begin(None);
        self.state.is_focused = true;
        self.set_open(true);
    }

    /// Click on the "collapse" affordance: toggle like the control surface.
    pub fn click_collapse(&mut self) {
        self.click_control();
    }

    /// Click on the "clear" affordance.
    ///
    /// Only acts while a selection is present. Returns true when it did.
    pub fn click_clear(&mut self) -> bool {
        self.begin(None);
        if self.state.selected_value.is_none() {
            return false;
        }

        debug!("Selection cleared");
        self.state.query_text.clear();
        self.state.selected_value = None;
        self.state.filtered_options = OptionSet::empty();
        self.state.focused_index = None;
        self.state.is_focused = true;
        self.set_open(false);
        true
    }

    /// The input's text changed.
    ///
    /// Opens the popup, refilters against the full set and notifies
    /// `on_change`. Editing releases a locked selection.
    pub fn input_changed(&mut self, text: impl Into<String>) {
        self.begin(None);
        if !self.is_ready() {
            return;
        }

        let text = text.into();
        let previous = std::mem::replace(&mut self.state.query_text, text);
        self.state.is_focused = true;

        if self.state.selected_value.take().is_some() {
            debug!("Selection released by edit");
        }
        self.state.filtered_options = self.derive_filtered();
        self.state.focused_index = None;
        self.set_open(true);

        if previous != self.state.query_text {
            let event = ChangeEvent {
                value: self.state.query_text.clone(),
                previous,
            };
            if let Some(handler) = self.on_change.as_mut() {
                handler(&event);
            }
        }
    }

    /// Append a character to the query.
    pub fn insert_char(&mut self, ch: char) {
        let mut text = self.state.query_text.clone();
        text.push(ch);
        self.input_changed(text);
    }

    /// Delete the last character of the query.
    pub fn backspace(&mut self) {
        let mut text = self.state.query_text.clone();
        if text.pop().is_some() {
            self.input_changed(text);
        }
    }

    /// Pointer activation of a displayed row.
    ///
    /// Returns the activation payload, or `None` when no row exists at
    /// `index`. Arms the gate for the outside click that follows.
    pub fn click_option(&mut self, index: usize) -> Option<Activation> {
        self.begin(None);
        let activation = self.commit(index)?;
        self.state.selection_gate = true;
        Some(activation)
    }

    /// Keyboard commit of the highlighted row (Enter).
    pub fn commit_focused(&mut self) -> Option<Activation> {
        self.begin(Some(KeyAction::Commit));
        if !self.state.is_open {
            return None;
        }
        let index = self.state.focused_index?;
        self.commit(index)
    }

    fn commit(&mut self, index: usize) -> Option<Activation> {
        let suggestion = self.displayed_options().get(index)?.clone();

        debug!(value = suggestion.value(), index, "Option selected");
        self.state.query_text = suggestion.label().to_string();
        self.state.selected_value = Some(suggestion.value().to_string());
        // The full set is displayed from now on; highlight the option there.
        self.state.focused_index = self.options.position_of_value(suggestion.value());
        self.state.filtered_options = OptionSet::empty();
        self.set_open(false);

        Some(Activation { suggestion, index })
    }

    /// Arrow-down: move the highlight with wraparound, revealing the popup.
    pub fn arrow_down(&mut self) {
        self.navigate(KeyAction::FocusNext);
    }

    /// Arrow-up: move the highlight with wraparound, revealing the popup.
    pub fn arrow_up(&mut self) {
        self.navigate(KeyAction::FocusPrev);
    }

    fn navigate(&mut self, action: KeyAction) {
        self.begin(Some(action));
        if !self.state.is_focused || !self.is_ready() {
            return;
        }

        self.set_open(true);
        let len = self.displayed_options().len();
        let current = self.state.focused_index;
        self.state.focused_index = match action {
            KeyAction::FocusPrev => prev_index(current, len),
            _ => next_index(current, len),
        };
    }

    /// Escape: close the popup, keeping query and selection.
    pub fn escape(&mut self) {
        self.begin(Some(KeyAction::Close));
        self.set_open(false);
    }

    /// Click outside the control's bounding region.
    ///
    /// Consumes the gate of an in-flight pointer selection (only closing the
    /// popup). Otherwise focus leaves the control: the popup closes and an
    /// unselected query is discarded.
    pub fn click_outside(&mut self) {
        if std::mem::take(&mut self.state.selection_gate) {
            debug!("Outside click belongs to option selection, keeping commit");
            self.state.last_action = None;
            self.set_open(false);
            return;
        }
        self.leave(None);
    }

    /// Keyboard focus left the control (Tab). Same effect as an outside click.
    pub fn blur(&mut self) {
        self.leave(Some(KeyAction::ToggleFocus));
    }

    fn leave(&mut self, action: Option<KeyAction>) {
        self.begin(action);
        if self.state.selected_value.is_none() {
            self.state.query_text.clear();
            self.state.filtered_options = OptionSet::empty();
            self.state.focused_index = None;
        }
        self.state.is_focused = false;
        self.set_open(false);
    }

    /// Dispatch a bound key action.
    ///
    /// Returns the activation when the action committed a row. `Quit` is
    /// the host's concern and is ignored here.
    pub fn handle_action(&mut self, action: KeyAction) -> Option<Activation> {
        match action {
            KeyAction::FocusNext => self.arrow_down(),
            KeyAction::FocusPrev => self.arrow_up(),
            KeyAction::Commit => return self.commit_focused(),
            KeyAction::Close => self.escape(),
            KeyAction::ToggleFocus => {
                if self.state.is_focused {
                    self.blur();
                } else {
                    self.begin(Some(action));
                    self.state.is_focused = true;
                }
            }
            KeyAction::Quit => {}
        }
        None
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
