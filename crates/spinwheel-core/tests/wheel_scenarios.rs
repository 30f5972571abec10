//! Integration tests for the wheel session: spin lifecycle, list editing,
//! and the guards between them.

use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::rc::Rc;

use spinwheel_core::{
    resolve, Event, FixedSpins, ItemStore, ManualClock, Mode, SpinConfig, SpinEngine, SpinState,
    Wheel, WheelError,
};

fn wheel_with(reward: &[&str], spins: f64) -> (Wheel, ManualClock) {
    let clock = ManualClock::new(1_000);
    let store = ItemStore::from_texts(reward, &["노래부르기", "춤추기"]).unwrap();
    let engine = SpinEngine::with_sources(SpinConfig::default(), clock.clone(), FixedSpins(spins));
    (Wheel::new(store, engine), clock)
}

fn recorder(wheel: &mut Wheel) -> Rc<RefCell<Vec<Event>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    wheel.subscribe(move |e: &Event| sink.borrow_mut().push(e.clone()));
    events
}

#[test]
fn scenario_five_turns_from_rest_lands_on_first_item() {
    let (mut wheel, clock) = wheel_with(&["X", "Y", "Z"], 5.0);
    let events = recorder(&mut wheel);

    wheel.start().unwrap();
    let stopping = wheel.request_stop().unwrap();
    match &stopping {
        Event::SpinStopping {
            preview_index,
            preview_item,
            final_angle,
            ..
        } => {
            assert_eq!(*preview_index, 0);
            assert_eq!(preview_item.as_str(), "X");
            assert_eq!(*final_angle, 1800.0);
        }
        other => panic!("expected SpinStopping, got {other:?}"),
    }

    // Still decelerating: the preview is not a final result.
    assert!(matches!(wheel.engine().state(), SpinState::Decelerating { .. }));
    clock.advance(1_999);
    assert!(wheel.tick().is_none());

    clock.advance(1);
    match wheel.tick() {
        Some(Event::SpinResolved {
            index,
            item,
            rotation,
            mode,
            ..
        }) => {
            assert_eq!(index, 0);
            assert_eq!(item.as_str(), "X");
            assert_eq!(rotation, 0.0);
            assert_eq!(mode, Mode::Reward);
        }
        other => panic!("expected SpinResolved, got {other:?}"),
    }

    let kinds: Vec<_> = events.borrow().iter().map(Event::kind).collect();
    assert_eq!(kinds, ["spin_started", "spin_stopping", "spin_resolved"]);
}

#[test]
fn scenario_quarter_segments_at_one_hundred_degrees() {
    let four = NonZeroUsize::new(4).unwrap();
    assert_eq!(resolve(100.0, four), 2);
}

#[test]
fn scenario_add_item_validation() {
    let mut wheel = Wheel::default();
    assert_eq!(
        wheel.add_item(Mode::Reward, "").unwrap_err(),
        WheelError::EmptyInput
    );
    assert!(matches!(
        wheel.add_item(Mode::Reward, &"a".repeat(21)),
        Err(WheelError::TooLong { .. })
    ));
    assert_eq!(
        wheel.add_item(Mode::Reward, "과자 1개").unwrap_err(),
        WheelError::Duplicate("과자 1개".to_string())
    );
    assert_eq!(wheel.items(Mode::Reward).len(), 3);
}

#[test]
fn scenario_last_item_cannot_be_removed() {
    let (mut wheel, _) = wheel_with(&["only"], 5.0);
    assert_eq!(
        wheel.remove_item(Mode::Reward, 0).unwrap_err(),
        WheelError::MinimumSizeViolation
    );
    assert_eq!(wheel.items(Mode::Reward).len(), 1);
    assert_eq!(wheel.items(Mode::Reward)[0].as_str(), "only");
}

#[test]
fn scenario_mode_switch_refused_while_spinning() {
    let mut wheel = Wheel::default();
    let before: Vec<_> = wheel.items(Mode::Reward).to_vec();
    wheel.start().unwrap();

    assert!(matches!(
        wheel.set_active_mode(Mode::Penalty),
        Err(WheelError::InvalidTransition { .. })
    ));
    assert_eq!(wheel.active_mode(), Mode::Reward);
    assert_eq!(wheel.items(Mode::Reward), before.as_slice());
}

#[test]
fn list_edits_refused_until_resolved() {
    let (mut wheel, clock) = wheel_with(&["X", "Y", "Z"], 5.0);
    wheel.start().unwrap();
    for _ in 0..3 {
        wheel.tick();
    }
    assert!(wheel.add_item(Mode::Reward, "W").is_err());
    assert!(wheel.remove_item(Mode::Reward, 0).is_err());
    // The other list is frozen too.
    assert!(wheel.add_item(Mode::Penalty, "W").is_err());

    wheel.request_stop().unwrap();
    assert!(wheel.add_item(Mode::Reward, "W").is_err());

    clock.advance(2_000);
    wheel.tick().unwrap();
    assert!(wheel.add_item(Mode::Reward, "W").is_ok());
    assert_eq!(wheel.items(Mode::Reward).len(), 4);
}

#[test]
fn start_and_stop_guards() {
    let (mut wheel, clock) = wheel_with(&["X", "Y"], 5.0);
    assert!(wheel.request_stop().is_err());

    wheel.start().unwrap();
    assert!(wheel.start().is_err());
    wheel.request_stop().unwrap();
    assert!(wheel.start().is_err());
    assert!(wheel.request_stop().is_err());

    clock.advance(2_000);
    wheel.on_deadline_elapsed().unwrap();
    assert!(wheel.request_stop().is_err());
    // Resolved behaves like Idle for a new spin.
    assert!(wheel.start().is_ok());
}

#[test]
fn rotation_carries_across_spins() {
    let (mut wheel, clock) = wheel_with(&["A", "B", "C", "D"], 5.0);

    wheel.start().unwrap();
    for _ in 0..6 {
        wheel.tick();
    }
    // 90 degrees + whole turns -> normalized 270 -> segment 3.
    wheel.request_stop().unwrap();
    clock.advance(2_000);
    match wheel.tick() {
        Some(Event::SpinResolved { index, rotation, .. }) => {
            assert_eq!(index, 3);
            assert_eq!(rotation, 90.0);
        }
        other => panic!("expected SpinResolved, got {other:?}"),
    }

    // Next spin starts from 90 degrees.
    wheel.start().unwrap();
    wheel.tick();
    assert_eq!(wheel.engine().current_rotation(), 105.0);
}

#[test]
fn mode_switch_changes_segments_and_announces() {
    let (mut wheel, clock) = wheel_with(&["X", "Y", "Z"], 5.25);
    let events = recorder(&mut wheel);

    let changed = wheel.set_active_mode(Mode::Penalty).unwrap();
    assert!(matches!(changed, Event::ModeChanged { mode: Mode::Penalty, .. }));
    assert_eq!(wheel.store().segment_count().get(), 2);

    wheel.start().unwrap();
    wheel.request_stop().unwrap();
    clock.advance(2_000);
    // 5.25 turns -> 90 degrees -> normalized 270 -> segment 1 of 2.
    match wheel.tick() {
        Some(Event::SpinResolved { item, mode, .. }) => {
            assert_eq!(item.as_str(), "춤추기");
            assert_eq!(mode, Mode::Penalty);
        }
        other => panic!("expected SpinResolved, got {other:?}"),
    }
    assert_eq!(events.borrow().len(), 4);
}

#[test]
fn removal_event_carries_removed_item() {
    let mut wheel = Wheel::default();
    let event = wheel.remove_item(Mode::Penalty, 3).unwrap();
    match event {
        Event::ItemRemoved { mode, index, item, .. } => {
            assert_eq!(mode, Mode::Penalty);
            assert_eq!(index, 3);
            assert_eq!(item.as_str(), "스쿼드 30개");
        }
        other => panic!("expected ItemRemoved, got {other:?}"),
    }
    assert!(matches!(
        wheel.remove_item(Mode::Penalty, 3),
        Err(WheelError::IndexOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn snapshot_reflects_state() {
    let (mut wheel, _) = wheel_with(&["X", "Y", "Z"], 5.0);
    wheel.start().unwrap();
    wheel.tick();
    match wheel.snapshot() {
        Event::StateSnapshot {
            state,
            mode,
            items,
            rotation,
            ..
        } => {
            assert_eq!(state, SpinState::Spinning { segment_count: 3 });
            assert_eq!(mode, Mode::Reward);
            assert_eq!(items.len(), 3);
            assert_eq!(rotation, 15.0);
        }
        other => panic!("expected StateSnapshot, got {other:?}"),
    }
}
