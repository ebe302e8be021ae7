use crate::common::builders::ShellBuilder;
use crate::common::{Clock, advance_to};
use reel_chrome::core::viewmodels::Subregion;
use reel_chrome::ui::pages::player::{
    ControlState, Layer, MediaFailure, PlayerInput, RegionKind, RegionPhase,
};

fn phases(shell: &reel_chrome::PlayerShell) -> (RegionPhase, RegionPhase) {
    let v = shell.visibility();
    (v.header, v.controls)
}

fn both(phase: RegionPhase) -> (RegionPhase, RegionPhase) {
    (phase, phase)
}

#[test]
fn test_idle_from_mount_hides_both_regions() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());
    assert_eq!(phases(&shell), both(RegionPhase::Entering));

    advance_to(&mut shell, clock.at(200));
    assert_eq!(phases(&shell), both(RegionPhase::Visible));

    advance_to(&mut shell, clock.at(2999));
    assert_eq!(phases(&shell), both(RegionPhase::Visible));

    advance_to(&mut shell, clock.at(3000));
    assert_eq!(shell.control_state(), ControlState::Hidden);
    assert_eq!(phases(&shell), both(RegionPhase::Exiting));

    advance_to(&mut shell, clock.at(3200));
    assert_eq!(phases(&shell), both(RegionPhase::Hidden));
    assert_eq!(shell.next_deadline(), None);
}

#[test]
fn test_pointer_move_at_2999_defers_hiding_to_5999() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());

    advance_to(&mut shell, clock.at(2999));
    shell.handle(PlayerInput::PointerMove { x: 12.0, y: 40.0 }, clock.at(2999));

    advance_to(&mut shell, clock.at(3000));
    assert_eq!(phases(&shell), both(RegionPhase::Visible));

    advance_to(&mut shell, clock.at(5998));
    assert_eq!(phases(&shell), both(RegionPhase::Visible));

    advance_to(&mut shell, clock.at(5999));
    assert_eq!(phases(&shell), both(RegionPhase::Exiting));

    advance_to(&mut shell, clock.at(6199));
    assert_eq!(phases(&shell), both(RegionPhase::Hidden));
}

#[test]
fn test_hover_at_100ms_pins_until_leave() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());

    advance_to(&mut shell, clock.at(100));
    shell.handle(PlayerInput::HoverEnter(Subregion::LeftControls), clock.at(100));
    assert_eq!(shell.control_state(), ControlState::Hovering);
    assert_eq!(shell.next_deadline(), Some(clock.at(200)));

    advance_to(&mut shell, clock.at(60_000));
    assert_eq!(phases(&shell), both(RegionPhase::Visible));
    assert_eq!(shell.next_deadline(), None);

    shell.handle(PlayerInput::HoverLeave(Subregion::LeftControls), clock.at(60_000));
    advance_to(&mut shell, clock.at(62_999));
    assert_eq!(phases(&shell), both(RegionPhase::Visible));

    advance_to(&mut shell, clock.at(63_000));
    assert_eq!(phases(&shell), both(RegionPhase::Exiting));
}

#[test]
fn test_hover_survives_pointer_leaving_surface() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());

    shell.handle(PlayerInput::HoverEnter(Subregion::Scrubber), clock.at(300));
    shell.handle(PlayerInput::PointerLeave, clock.at(400));
    advance_to(&mut shell, clock.at(10_000));
    assert_eq!(phases(&shell), both(RegionPhase::Visible));

    shell.handle(PlayerInput::HoverLeave(Subregion::Scrubber), clock.at(10_000));
    shell.handle(PlayerInput::PointerLeave, clock.at(10_010));
    assert_eq!(phases(&shell), both(RegionPhase::Exiting));
}

#[test]
fn test_failure_while_entering_preserves_and_resumes_transition() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new()
        .with_media("Heat", 1995)
        .build(clock.origin());

    advance_to(&mut shell, clock.at(50));
    shell.handle(
        PlayerInput::MediaFailed(MediaFailure::new("stream unavailable")),
        clock.at(50),
    );

    let frame = shell.frame(clock.at(50));
    let error = frame.error().unwrap();
    assert_eq!(error.message, "stream unavailable");
    assert_eq!(error.media.as_ref().unwrap().title, "Heat");
    assert!(frame.control_band().is_none());
    assert!(frame.header().is_none());

    advance_to(&mut shell, clock.at(10_000));
    assert_eq!(phases(&shell), both(RegionPhase::Entering));
    let controls = shell.region(RegionKind::ControlBand);
    assert_eq!(controls.position(clock.at(10_000)), 0.25);

    shell.handle(PlayerInput::DismissError, clock.at(10_000));
    assert!(!shell.has_error());
    assert_eq!(phases(&shell), both(RegionPhase::Entering));

    advance_to(&mut shell, clock.at(10_149));
    assert_eq!(phases(&shell), both(RegionPhase::Entering));
    advance_to(&mut shell, clock.at(10_150));
    assert_eq!(phases(&shell), both(RegionPhase::Visible));

    // The idle deadline moved by the 9950ms the error was up
    advance_to(&mut shell, clock.at(12_949));
    assert_eq!(phases(&shell), both(RegionPhase::Visible));
    advance_to(&mut shell, clock.at(12_950));
    assert_eq!(phases(&shell), both(RegionPhase::Exiting));
}

#[test]
fn test_signal_is_true_immediately_after_activity() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());
    advance_to(&mut shell, clock.at(5000));
    assert!(!shell.visibility().shown);

    for (ms, input) in [
        (5000, PlayerInput::PointerDown),
        (9000, PlayerInput::KeyPress),
        (13_000, PlayerInput::PointerMove { x: 1.0, y: 1.0 }),
    ] {
        advance_to(&mut shell, clock.at(ms));
        assert!(!shell.visibility().shown, "expected hidden before {ms}ms");
        shell.handle(input, clock.at(ms));
        assert!(shell.visibility().shown);
        assert_eq!(phases(&shell), both(RegionPhase::Entering));

        advance_to(&mut shell, clock.at(ms + 2999));
        assert!(shell.visibility().shown);
    }
}

#[test]
fn test_only_visible_regions_are_interactive_at_every_tick() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());
    let events = [
        (1000, PlayerInput::ToggleControlsVisibility),
        (1090, PlayerInput::PointerMove { x: 5.0, y: 5.0 }),
        (4500, PlayerInput::KeyPress),
        (4600, PlayerInput::ToggleControlsVisibility),
    ];

    let mut next_event = 0;
    for ms in (0..8000).step_by(3) {
        let now = clock.at(ms);
        advance_to(&mut shell, now);
        while next_event < events.len() && events[next_event].0 <= ms {
            shell.handle(events[next_event].1.clone(), now);
            next_event += 1;
        }

        let frame = shell.frame(now);
        for kind in [RegionKind::Header, RegionKind::ControlBand] {
            let region = shell.region(kind);
            let presentation = match kind {
                RegionKind::Header => frame.header().map(|h| h.presentation),
                RegionKind::ControlBand => frame.control_band().map(|c| c.presentation),
            };
            assert_eq!(region.is_interactive(), region.phase() == RegionPhase::Visible);
            match presentation {
                Some(p) => {
                    assert!(region.phase().is_displayed());
                    assert_eq!(p.interactive, region.phase() == RegionPhase::Visible, "{ms}ms");
                }
                None => assert_eq!(region.phase(), RegionPhase::Hidden),
            }
        }
        assert_eq!(
            frame.captures_pointer(),
            shell.visibility().controls == RegionPhase::Visible
        );
    }
}

#[test]
fn test_exit_reversal_never_reaches_hidden() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());
    advance_to(&mut shell, clock.at(1000));

    shell.handle(PlayerInput::ToggleControlsVisibility, clock.at(1000));
    assert_eq!(phases(&shell), both(RegionPhase::Exiting));

    shell.handle(PlayerInput::PointerMove { x: 3.0, y: 9.0 }, clock.at(1050));
    assert_eq!(phases(&shell), both(RegionPhase::Entering));

    for ms in 1050..1100 {
        advance_to(&mut shell, clock.at(ms));
        assert_eq!(phases(&shell), both(RegionPhase::Entering), "{ms}ms");
    }
    advance_to(&mut shell, clock.at(1100));
    assert_eq!(phases(&shell), both(RegionPhase::Visible));
}

#[test]
fn test_regions_stay_in_lockstep() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new()
        .with_idle_timeout_ms(700)
        .build(clock.origin());

    let mut visibility = shell.subscribe_visibility();
    for ms in 0..5000 {
        advance_to(&mut shell, clock.at(ms));
        if ms % 450 == 0 {
            shell.handle(PlayerInput::PointerMove { x: ms as f64, y: 0.0 }, clock.at(ms));
        }
        if ms % 1300 == 0 {
            shell.handle(PlayerInput::ToggleControlsVisibility, clock.at(ms));
        }
        let observed = *visibility.borrow_and_update();
        assert_eq!(observed.header, observed.controls, "{ms}ms");
    }
}

#[test]
fn test_repeated_activity_while_visible_starts_no_transition() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());
    advance_to(&mut shell, clock.at(500));

    let mut visibility = shell.subscribe_visibility();
    visibility.borrow_and_update();
    for ms in [600, 700, 800, 900] {
        shell.handle(PlayerInput::KeyPress, clock.at(ms));
        shell.handle(PlayerInput::PointerMove { x: 1.0, y: ms as f64 }, clock.at(ms));
        assert_eq!(shell.region(RegionKind::Header).current_transition(), None);
        assert_eq!(shell.region(RegionKind::ControlBand).current_transition(), None);
    }
    assert!(!visibility.has_changed().unwrap());
    assert_eq!(phases(&shell), both(RegionPhase::Visible));
}

#[test]
fn test_backdrop_dims_while_chrome_is_shown() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());
    assert!(shell.frame(clock.at(0)).layers.contains(&Layer::Backdrop { dimmed: true }));

    advance_to(&mut shell, clock.at(3000));
    assert!(shell.frame(clock.at(3000)).layers.contains(&Layer::Backdrop { dimmed: false }));
}
