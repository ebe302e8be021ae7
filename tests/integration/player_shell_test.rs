use crate::common::builders::ShellBuilder;
use crate::common::{Clock, advance_to};
use reel_chrome::core::viewmodels::Subregion;
use reel_chrome::models::CastTargetId;
use reel_chrome::ui::pages::player::{
    ControlState, Layer, MediaFailure, PlayerInput, PlayerOutput, RegionKind, RegionPhase,
};
use std::time::Duration;

#[test]
fn test_cast_picker_requires_fully_visible_controls() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new()
        .with_cast_target("tv", "Living Room")
        .build(clock.origin());

    // Still entering right after mount
    shell.handle(PlayerInput::OpenCastPicker, clock.at(10));
    assert!(!shell.cast_picker_open());

    advance_to(&mut shell, clock.at(250));
    shell.handle(PlayerInput::OpenCastPicker, clock.at(250));
    assert!(shell.cast_picker_open());
    assert!(shell.store().is_hovered(Subregion::CastPicker));

    // An open picker keeps the chrome up past the idle timeout
    advance_to(&mut shell, clock.at(20_000));
    assert_eq!(shell.visibility().controls, RegionPhase::Visible);

    shell.handle(
        PlayerInput::SelectCastTarget(Some(CastTargetId::new("tv"))),
        clock.at(20_000),
    );
    assert!(!shell.cast_picker_open());
    assert_eq!(shell.store().cast_target(), Some(CastTargetId::new("tv")));

    let frame = shell.frame(clock.at(20_000));
    let band = frame.control_band().unwrap();
    assert!(band.cast_available);
    assert_eq!(band.casting_to, Some(CastTargetId::new("tv")));

    advance_to(&mut shell, clock.at(23_000));
    assert_eq!(shell.visibility().controls, RegionPhase::Exiting);
}

#[test]
fn test_widget_command_counts_as_activity() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());
    advance_to(&mut shell, clock.at(4000));
    assert_eq!(shell.visibility().controls, RegionPhase::Hidden);
    assert!(!shell.frame(clock.at(4000)).contains(&Layer::MiddlePause));

    shell.handle(PlayerInput::PlayPause, clock.at(4000));
    assert!(shell.store().is_paused());
    assert_eq!(shell.visibility().controls, RegionPhase::Entering);
    assert!(shell.frame(clock.at(4000)).contains(&Layer::MiddlePause));
}

#[test]
fn test_loading_indicator_replaces_pause_glyph_while_buffering() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().paused().build(clock.origin());
    assert!(shell.frame(clock.at(0)).contains(&Layer::MiddlePause));

    shell.store().report_buffering(true);
    shell.tick(clock.at(10));
    let frame = shell.frame(clock.at(10));
    assert!(frame.contains(&Layer::Loading));
    assert!(!frame.contains(&Layer::MiddlePause));
}

#[test]
fn test_commands_are_ignored_while_error_is_shown() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());
    shell.handle(
        PlayerInput::MediaFailed(MediaFailure {
            message: "network lost".to_string(),
            code: Some(502),
        }),
        clock.at(100),
    );

    shell.handle(PlayerInput::PlayPause, clock.at(200));
    shell.handle(PlayerInput::VolumeDown, clock.at(200));
    shell.handle(PlayerInput::ToggleControlsVisibility, clock.at(200));
    assert!(!shell.store().is_paused());
    assert_eq!(shell.store().volume(), 1.0);
    assert!(shell.visibility().shown);

    let frame = shell.frame(clock.at(200));
    assert_eq!(frame.error().unwrap().code, Some(502));
    assert!(!frame.contains(&Layer::Backdrop { dimmed: true }));
}

#[test]
fn test_hover_leave_during_error_releases_pin_after_dismiss() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());

    advance_to(&mut shell, clock.at(300));
    shell.handle(PlayerInput::HoverEnter(Subregion::LeftControls), clock.at(300));
    shell.handle(PlayerInput::MediaFailed(MediaFailure::new("stalled")), clock.at(400));
    shell.handle(PlayerInput::HoverLeave(Subregion::LeftControls), clock.at(500));
    assert!(!shell.store().is_hovered(Subregion::LeftControls));

    shell.handle(PlayerInput::DismissError, clock.at(1000));
    assert_eq!(shell.control_state(), ControlState::Visible {
        idle_deadline: clock.at(4000),
    });

    advance_to(&mut shell, clock.at(3999));
    assert_eq!(shell.visibility().controls, RegionPhase::Visible);
    advance_to(&mut shell, clock.at(60_000));
    assert_eq!(shell.visibility().controls, RegionPhase::Hidden);
    assert_eq!(shell.visibility().header, RegionPhase::Hidden);
}

#[test]
fn test_hover_enter_during_error_pins_after_dismiss() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());

    shell.handle(PlayerInput::MediaFailed(MediaFailure::new("stalled")), clock.at(100));
    shell.handle(PlayerInput::HoverEnter(Subregion::Scrubber), clock.at(200));
    shell.handle(PlayerInput::DismissError, clock.at(300));
    assert_eq!(shell.control_state(), ControlState::Hovering);

    advance_to(&mut shell, clock.at(60_000));
    assert_eq!(shell.visibility().controls, RegionPhase::Visible);
}

#[test]
fn test_go_back_affordance_follows_output_receiver() {
    let clock = Clock::new();
    let (mut shell, output) = ShellBuilder::new().build(clock.origin());
    assert!(shell.frame(clock.at(0)).header().unwrap().can_go_back);

    drop(output);
    assert!(!shell.frame(clock.at(0)).header().unwrap().can_go_back);

    shell.handle(PlayerInput::MediaFailed(MediaFailure::new("gone")), clock.at(10));
    assert!(!shell.frame(clock.at(10)).error().unwrap().can_go_back);
}

#[test]
fn test_go_back_from_error_presentation() {
    let clock = Clock::new();
    let (mut shell, mut output) = ShellBuilder::new().build(clock.origin());
    shell.handle(PlayerInput::MediaFailed(MediaFailure::new("gone")), clock.at(10));

    shell.handle(PlayerInput::GoBack, clock.at(20));
    assert_eq!(output.try_recv().unwrap(), PlayerOutput::NavigateBack);
}

#[test]
fn test_escape_leaves_fullscreen_before_navigating_back() {
    let clock = Clock::new();
    let (mut shell, mut output) = ShellBuilder::new().build(clock.origin());

    shell.handle(PlayerInput::ToggleFullscreen, clock.at(10));
    assert!(shell.store().is_fullscreen());

    shell.handle(PlayerInput::EscapePressed, clock.at(20));
    assert!(!shell.store().is_fullscreen());
    assert!(output.try_recv().is_err());

    shell.handle(PlayerInput::EscapePressed, clock.at(30));
    assert_eq!(output.try_recv().unwrap(), PlayerOutput::NavigateBack);
}

#[test]
fn test_children_render_on_top_of_everything() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().with_children().build(clock.origin());
    assert_eq!(shell.frame(clock.at(0)).layers.last(), Some(&Layer::Children));

    shell.handle(PlayerInput::MediaFailed(MediaFailure::new("boom")), clock.at(10));
    let frame = shell.frame(clock.at(10));
    assert_eq!(frame.layers.first(), Some(&Layer::Media));
    assert_eq!(frame.layers.last(), Some(&Layer::Children));
}

#[test]
fn test_renderer_completion_and_stale_reports() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());
    let entering = shell.region(RegionKind::Header).current_transition().unwrap();

    shell.handle(PlayerInput::ToggleControlsVisibility, clock.at(100));
    assert_eq!(shell.visibility().header, RegionPhase::Exiting);

    shell.handle(
        PlayerInput::AnimationFinished {
            region: RegionKind::Header,
            transition: entering,
        },
        clock.at(120),
    );
    assert_eq!(shell.visibility().header, RegionPhase::Exiting);

    let exiting = shell.region(RegionKind::Header).current_transition().unwrap();
    shell.handle(
        PlayerInput::AnimationFinished {
            region: RegionKind::Header,
            transition: exiting,
        },
        clock.at(130),
    );
    assert_eq!(shell.visibility().header, RegionPhase::Hidden);
    assert_eq!(shell.visibility().controls, RegionPhase::Exiting);

    // The control band still finishes on its fallback deadline
    advance_to(&mut shell, clock.at(200));
    assert_eq!(shell.visibility().controls, RegionPhase::Hidden);
}

#[test]
fn test_control_band_reflects_store() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new()
        .with_media("Heat", 1995)
        .with_duration(Duration::from_secs(296))
        .build(clock.origin());

    shell.handle(PlayerInput::Seek(Duration::from_secs(83)), clock.at(10));
    shell.handle(PlayerInput::ToggleMute, clock.at(20));

    let frame = shell.frame(clock.at(20));
    let band = frame.control_band().unwrap();
    assert_eq!(band.time_label, "1:23 / 4:56");
    assert_eq!(band.title.as_deref(), Some("Heat (1995)"));
    assert_eq!(band.volume, 0.0);
    assert_eq!(band.volume_icon, "audio-volume-muted-symbolic");
    assert!(!band.cast_available);
    assert_eq!(frame.header().unwrap().title.as_deref(), Some("Heat (1995)"));

    shell.handle(PlayerInput::SetVolume(0.5), clock.at(30));
    let frame = shell.frame(clock.at(30));
    assert_eq!(frame.control_band().unwrap().volume, 0.5);
    assert!(!shell.store().is_muted());
}

#[test]
fn test_band_slides_from_opposite_edges() {
    let clock = Clock::new();
    let (shell, _output) = ShellBuilder::new().build(clock.origin());

    let frame = shell.frame(clock.at(100));
    let header = frame.header().unwrap().presentation;
    let band = frame.control_band().unwrap().presentation;
    assert_eq!(header.opacity, 0.5);
    assert_eq!(header.offset_px, -8.0);
    assert_eq!(band.offset_px, 8.0);
    assert!(!band.interactive);
}

#[tokio::test]
async fn test_frames_are_published_to_subscribers() {
    let clock = Clock::new();
    let (mut shell, _output) = ShellBuilder::new().build(clock.origin());
    let mut frames = shell.subscribe_frames();
    frames.borrow_and_update();

    advance_to(&mut shell, clock.at(200));
    assert!(frames.has_changed().unwrap());
    let frame = frames.borrow_and_update().clone();
    assert!(frame.control_band().unwrap().presentation.interactive);
}
