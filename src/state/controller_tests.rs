//! Tests for the combobox controller.
//!
//! Each test drives the controller through its public handlers and checks the
//! resulting state, the way a host would observe it between renders.

use super::*;
use crate::source::fetch::FetchResponse;
use std::cell::RefCell;
use std::rc::Rc;

// ===== Fixtures =====

fn alpha_beta() -> OptionSet {
    OptionSet::new(vec![
        SelectOption::new("a", "Alpha"),
        SelectOption::new("b", "Beta"),
    ])
}

fn three() -> OptionSet {
    OptionSet::new(vec![
        SelectOption::new("a", "Alpha"),
        SelectOption::new("b", "Beta"),
        SelectOption::new("c", "Charlie"),
    ])
}

fn mounted(options: OptionSet) -> ComboboxController {
    ComboboxController::mount(ComboboxProps::new(options))
}

// ===== Mount =====

#[test]
fn static_mount_resolves_width_and_stays_closed() {
    let controller = mounted(alpha_beta());
    let state = controller.state();

    assert!(state.computed_width().is_some(), "Width should resolve on mount");
    assert!(!state.is_open());
    assert!(!state.is_focused());
    assert_eq!(state.query_text(), "");
    assert_eq!(state.focused_index(), None);
    assert_eq!(state.load_state(), &LoadState::Idle);
    assert_eq!(controller.phase(), ControlPhase::Ready);
}

#[test]
fn empty_static_set_mounts_disabled() {
    let mut controller = mounted(OptionSet::empty());

    assert_eq!(controller.phase(), ControlPhase::Disabled);
    controller.click_control();
    assert!(!controller.state().is_open(), "Disabled control must not open");
    controller.arrow_down();
    assert_eq!(controller.state().focused_index(), None);
}

#[test]
fn initial_value_preselects_matching_option() {
    let controller =
        ComboboxController::mount(ComboboxProps::new(alpha_beta()).value("b"));
    let state = controller.state();

    assert_eq!(state.selected_value(), Some("b"));
    assert_eq!(state.query_text(), "Beta");
    assert_eq!(state.focused_index(), Some(1));
    assert!(state.filtered_options().is_empty());
}

#[test]
fn unknown_initial_value_is_ignored() {
    let controller =
        ComboboxController::mount(ComboboxProps::new(alpha_beta()).value("zzz"));
    assert_eq!(controller.state().selected_value(), None);
    assert_eq!(controller.state().query_text(), "");
}

// ===== Control surface and affordances =====

#[test]
fn control_click_toggles_popup_and_focuses() {
    let mut controller = mounted(alpha_beta());

    controller.click_control();
    assert!(controller.state().is_open());
    assert!(controller.state().is_focused());
    assert_eq!(controller.view_mode(), ViewMode::OpenBrowsing);

    controller.click_control();
    assert!(!controller.state().is_open());
    assert!(controller.state().is_focused(), "Focus stays on the input");
}

#[test]
fn open_affordance_forces_open() {
    let mut controller = mounted(alpha_beta());

    controller.click_open();
    controller.click_open();
    assert!(controller.state().is_open(), "Open is not a toggle");
}

#[test]
fn collapse_affordance_toggles() {
    let mut controller = mounted(alpha_beta());
    controller.click_open();

    controller.click_collapse();
    assert!(!controller.state().is_open());
    controller.click_collapse();
    assert!(controller.state().is_open());
}

#[test]
fn clear_resets_selection_and_closes() {
    let mut controller = mounted(alpha_beta());
    controller.click_open();
    controller.click_option(1);

    assert!(controller.click_clear());
    let state = controller.state();
    assert_eq!(state.query_text(), "");
    assert_eq!(state.selected_value(), None);
    assert_eq!(state.focused_index(), None);
    assert!(!state.is_open());
    assert!(state.is_focused());
}

#[test]
fn clear_without_selection_is_noop() {
    let mut controller = mounted(alpha_beta());
    controller.input_changed("al");

    assert!(!controller.click_clear());
    assert_eq!(controller.state().query_text(), "al");
    assert!(controller.state().is_open());
}

// ===== Text input =====

#[test]
fn typing_filters_and_opens() {
    let mut controller = mounted(alpha_beta());

    controller.input_changed("al");

    let state = controller.state();
    assert!(state.is_open());
    assert!(state.is_focused());
    assert_eq!(state.query_text(), "al");
    assert_eq!(state.filtered_options().len(), 1);
    assert_eq!(state.filtered_options().get(0).unwrap().value(), "a");
    assert_eq!(controller.view_mode(), ViewMode::OpenFiltering);
    assert_eq!(controller.displayed_options().len(), 1);
}

#[test]
fn emptying_query_returns_to_browsing() {
    let mut controller = mounted(alpha_beta());
    controller.input_changed("al");

    controller.input_changed("");

    assert!(controller.state().filtered_options().is_empty());
    assert_eq!(controller.view_mode(), ViewMode::OpenBrowsing);
    assert_eq!(controller.displayed_options().len(), 2);
}

#[test]
fn typing_resets_highlight() {
    let mut controller = mounted(three());
    controller.focus();
    controller.arrow_down();
    controller.arrow_down();

    controller.input_changed("e");

    assert_eq!(controller.state().focused_index(), None);
}

#[test]
fn editing_releases_locked_selection() {
    let mut controller = mounted(three());
    controller.click_open();
    controller.click_option(2);

    controller.backspace();

    let state = controller.state();
    assert_eq!(state.query_text(), "Charli");
    assert_eq!(state.selected_value(), None);
    assert_eq!(state.filtered_options().len(), 1);
    assert_eq!(controller.view_mode(), ViewMode::OpenFiltering);
}

#[test]
fn insert_char_and_backspace_edit_the_query() {
    let mut controller = mounted(alpha_beta());

    controller.insert_char('b');
    controller.insert_char('e');
    assert_eq!(controller.state().query_text(), "be");

    controller.backspace();
    assert_eq!(controller.state().query_text(), "b");
}

#[test]
fn backspace_on_empty_query_does_nothing() {
    let mut controller = mounted(alpha_beta());
    controller.backspace();
    assert!(!controller.state().is_open());
}

#[test]
fn on_change_receives_raw_change_events() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut controller = ComboboxController::mount(
        ComboboxProps::new(alpha_beta())
            .on_change(move |event: &ChangeEvent| sink.borrow_mut().push(event.clone())),
    );

    controller.insert_char('a');
    controller.insert_char('l');
    controller.input_changed("al");

    let events = events.borrow();
    assert_eq!(events.len(), 2, "Unchanged text should not fire");
    assert_eq!(
        events[1],
        ChangeEvent {
            value: "al".to_string(),
            previous: "a".to_string(),
        }
    );
}

#[test]
fn on_change_not_fired_by_selection_or_clear() {
    let count = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&count);
    let mut controller = ComboboxController::mount(
        ComboboxProps::new(alpha_beta()).on_change(move |_: &ChangeEvent| *sink.borrow_mut() += 1),
    );

    controller.click_open();
    controller.click_option(0);
    controller.click_clear();

    assert_eq!(*count.borrow(), 0);
}

// ===== Option activation =====

#[test]
fn clicking_option_commits_selection() {
    let mut controller = mounted(alpha_beta());
    controller.click_open();

    let activation = controller.click_option(1).unwrap();

    assert_eq!(activation.index, 1);
    assert_eq!(activation.suggestion.value(), "b");
    let state = controller.state();
    assert_eq!(state.selected_value(), Some("b"));
    assert_eq!(state.query_text(), "Beta");
    assert_eq!(state.focused_index(), Some(1));
    assert!(state.filtered_options().is_empty());
    assert!(!state.is_open());
    assert!(state.selection_gate());
}

#[test]
fn clicking_missing_row_is_rejected() {
    let mut controller = mounted(alpha_beta());
    controller.click_open();

    assert!(controller.click_option(5).is_none());
    assert_eq!(controller.state().selected_value(), None);
    assert!(!controller.state().selection_gate());
}

#[test]
fn activation_from_filtered_list_highlights_full_set_position() {
    let mut controller = mounted(three());
    controller.input_changed("charl");

    let activation = controller.click_option(0).unwrap();

    assert_eq!(activation.index, 0, "Payload carries the displayed index");
    assert_eq!(controller.state().selected_value(), Some("c"));
    assert_eq!(
        controller.state().focused_index(),
        Some(2),
        "Full set is displayed after selection"
    );
}

#[test]
fn selection_suppresses_filtering() {
    let mut controller = mounted(alpha_beta());
    controller.input_changed("be");
    controller.click_option(0);

    assert!(controller.derive_filtered().is_empty());
    assert_eq!(controller.displayed_options().len(), 2);
}

#[test]
fn enter_commits_highlighted_row() {
    let mut controller = mounted(three());
    controller.focus();
    controller.arrow_down();
    controller.arrow_down();

    let activation = controller.commit_focused().unwrap();

    assert_eq!(activation.suggestion.value(), "b");
    assert_eq!(controller.state().query_text(), "Beta");
    assert!(!controller.state().is_open());
    assert!(
        !controller.state().selection_gate(),
        "Keyboard commit has no outside click to gate"
    );
    assert_eq!(controller.state().last_action(), Some(KeyAction::Commit));
}

#[test]
fn enter_without_highlight_does_nothing() {
    let mut controller = mounted(three());
    controller.click_open();

    assert!(controller.commit_focused().is_none());
    assert!(controller.state().is_open());
}

#[test]
fn enter_with_closed_popup_does_nothing() {
    let mut controller = mounted(three());
    controller.focus();
    controller.arrow_down();
    controller.escape();

    assert!(controller.commit_focused().is_none());
    assert_eq!(controller.state().selected_value(), None);
}

// ===== Keyboard navigation =====

#[test]
fn arrow_down_wraps_on_full_set() {
    let mut controller = mounted(three());
    controller.focus();

    controller.arrow_down();
    controller.arrow_down();
    controller.arrow_down();
    assert_eq!(controller.state().focused_index(), Some(2));

    controller.arrow_down();
    assert_eq!(controller.state().focused_index(), Some(0));
}

#[test]
fn arrow_up_wraps_to_last() {
    let mut controller = mounted(three());
    controller.focus();
    controller.arrow_down();

    controller.arrow_up();
    assert_eq!(controller.state().focused_index(), Some(2));
}

#[test]
fn arrows_reveal_popup() {
    let mut controller = mounted(three());
    controller.focus();

    controller.arrow_up();
    assert!(controller.state().is_open());
    assert_eq!(controller.state().last_action(), Some(KeyAction::FocusPrev));
}

#[test]
fn arrows_wrap_over_filtered_list() {
    let mut controller = mounted(three());
    controller.input_changed("a"); // Alpha, Beta, Charlie all contain 'a'
    controller.input_changed("ha"); // Alpha, Charlie

    controller.arrow_down();
    controller.arrow_down();
    controller.arrow_down();
    assert_eq!(controller.state().focused_index(), Some(0));
}

#[test]
fn arrows_over_empty_filtered_list_are_noop() {
    let mut controller = mounted(three());
    controller.input_changed("xyz");

    controller.arrow_down();
    assert_eq!(controller.state().focused_index(), None);
    controller.arrow_up();
    assert_eq!(controller.state().focused_index(), None);
}

#[test]
fn arrows_ignored_without_focus() {
    let mut controller = mounted(three());

    controller.arrow_down();
    assert_eq!(controller.state().focused_index(), None);
    assert!(!controller.state().is_open());
}

#[test]
fn arrows_navigate_full_set_while_selection_locked() {
    let mut controller = mounted(three());
    controller.click_open();
    controller.click_option(0);
    controller.click_outside();
    controller.focus();

    controller.arrow_up();
    assert_eq!(controller.state().focused_index(), Some(2));
}

#[test]
fn reopening_with_selection_highlights_selected_option() {
    let mut controller = mounted(three());
    controller.click_open();
    controller.click_option(1);
    controller.click_outside();

    controller.click_open();
    controller.arrow_down();
    controller.arrow_down();
    controller.escape();

    controller.click_open();
    assert_eq!(controller.state().focused_index(), Some(1));
}

#[test]
fn escape_closes_and_keeps_query() {
    let mut controller = mounted(three());
    controller.input_changed("al");

    controller.escape();

    assert!(!controller.state().is_open());
    assert_eq!(controller.state().query_text(), "al");
}

// ===== Outside click =====

#[test]
fn outside_click_discards_unselected_query() {
    let mut controller = mounted(alpha_beta());
    controller.input_changed("xyz");

    controller.click_outside();

    let state = controller.state();
    assert_eq!(state.query_text(), "");
    assert!(state.filtered_options().is_empty());
    assert!(!state.is_focused());
    assert!(!state.is_open());
}

#[test]
fn outside_click_keeps_locked_selection() {
    let mut controller = mounted(alpha_beta());
    controller.click_open();
    controller.click_option(1);
    controller.click_outside();

    controller.click_control();
    controller.click_outside();

    let state = controller.state();
    assert_eq!(state.query_text(), "Beta");
    assert_eq!(state.selected_value(), Some("b"));
    assert!(!state.is_focused());
}

#[test]
fn outside_click_of_same_gesture_does_not_clobber_selection() {
    let mut controller = mounted(alpha_beta());
    controller.input_changed("be");

    controller.click_option(0);
    controller.click_outside();

    let state = controller.state();
    assert_eq!(state.query_text(), "Beta");
    assert_eq!(state.selected_value(), Some("b"));
    assert!(!state.is_open());
    assert!(!state.selection_gate(), "Gate is one-shot");
    assert!(state.is_focused(), "Gated outside click does not blur");
}

#[test]
fn stale_gate_is_dropped_by_next_transition() {
    let mut controller = mounted(alpha_beta());
    controller.click_open();
    controller.click_option(0);

    controller.click_clear();
    controller.input_changed("zz");
    controller.click_outside();

    assert_eq!(controller.state().query_text(), "");
    assert!(!controller.state().is_focused());
}

#[test]
fn tab_blurs_like_outside_click() {
    let mut controller = mounted(alpha_beta());
    controller.input_changed("al");

    controller.handle_action(KeyAction::ToggleFocus);
    assert_eq!(controller.state().query_text(), "");
    assert!(!controller.state().is_focused());

    controller.handle_action(KeyAction::ToggleFocus);
    assert!(controller.state().is_focused());
    assert!(!controller.state().is_open());
}

// ===== Async load =====

#[test]
fn lazy_mount_starts_loading_with_unresolved_width() {
    let (_release_tx, release_rx) = std::sync::mpsc::channel::<()>();
    let mut controller = ComboboxController::mount(ComboboxProps::new(OptionSource::Lazy(
        Box::new(move || {
            let _ = release_rx.recv();
            Ok(FetchResponse {
                result: OptionSet::empty(),
            })
        }),
    )));

    assert_eq!(controller.state().load_state(), &LoadState::Loading);
    assert_eq!(controller.phase(), ControlPhase::Loading);
    assert_eq!(controller.state().computed_width(), None);

    controller.click_control();
    controller.input_changed("al");
    assert!(!controller.state().is_open(), "Cannot open before width is known");
    assert_eq!(controller.state().query_text(), "");
}

#[test]
fn lazy_success_ingests_options() {
    let options = alpha_beta();
    let mut controller = ComboboxController::mount(
        ComboboxProps::new(OptionSource::Lazy(Box::new(move || {
            Ok(FetchResponse { result: options })
        })))
        .value("a"),
    );

    assert!(controller.wait_for_load(Duration::from_secs(5)));

    assert_eq!(controller.state().load_state(), &LoadState::Loaded);
    assert_eq!(controller.phase(), ControlPhase::Ready);
    assert_eq!(controller.options().len(), 2);
    assert!(controller.state().computed_width().is_some());
    assert_eq!(controller.state().query_text(), "Alpha");
}

#[test]
fn lazy_failure_is_terminal() {
    let mut controller = ComboboxController::mount(ComboboxProps::new(OptionSource::Lazy(
        Box::new(|| Err(LoadError::Fetch("timeout".to_string()))),
    )));

    assert!(controller.wait_for_load(Duration::from_secs(5)));

    assert_eq!(
        controller.phase(),
        ControlPhase::Failed(&LoadError::Fetch("timeout".to_string()))
    );
    controller.click_control();
    assert!(!controller.state().is_open());
    assert!(!controller.poll_load(), "No retry after failure");
}

#[test]
fn completion_for_another_mount_is_discarded() {
    let (_release_tx, release_rx) = std::sync::mpsc::channel::<()>();
    let mut controller = ComboboxController::mount(ComboboxProps::new(OptionSource::Lazy(
        Box::new(move || {
            let _ = release_rx.recv();
            Err(LoadError::Disconnected)
        }),
    )));

    let stale = LoadCompletion {
        mount_id: MountId::next(),
        result: Ok(alpha_beta()),
    };
    assert!(!controller.apply_load(stale));
    assert_eq!(controller.state().load_state(), &LoadState::Loading);
    assert!(controller.options().is_empty());
}

#[test]
fn completion_after_load_finished_is_ignored() {
    let mut controller = mounted(alpha_beta());
    let late = LoadCompletion {
        mount_id: controller.mount_id(),
        result: Ok(three()),
    };

    assert!(!controller.apply_load(late));
    assert_eq!(controller.options().len(), 2);
}

#[test]
fn lazy_empty_result_disables_control() {
    let mut controller = ComboboxController::mount(ComboboxProps::new(OptionSource::Lazy(
        Box::new(|| {
            Ok(FetchResponse {
                result: OptionSet::empty(),
            })
        }),
    )));

    assert!(controller.wait_for_load(Duration::from_secs(5)));
    assert_eq!(controller.phase(), ControlPhase::Disabled);
}
