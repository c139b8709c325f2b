use super::*;
use crate::{
    descriptor::value::Descriptor,
    foundation::core::{ScaleFactor, Size},
    scene::builder::BuildContext,
    test_support::{FakeMedia, RecordingDelegate},
};
use serde_json::json;

fn load(v: serde_json::Value, delegate: &RecordingDelegate, media: &mut FakeMedia) -> Element {
    let desc = Descriptor::from_value(v).unwrap();
    let mut ctx = BuildContext::new(delegate, media);
    Element::load(&desc, Size::new(100.0, 100.0), ScaleFactor::IDENTITY, &mut ctx)
}

fn video_root(media: &mut FakeMedia) -> Element {
    load(
        json!({"video": "v.mp4", "videoStart": 1, "videoDuration": 10}),
        &RecordingDelegate::default(),
        media,
    )
}

#[test]
fn scrubbing_coalesces_to_latest_offset() {
    let mut media = FakeMedia::default();
    let mut root = video_root(&mut media);
    let log = media.video_log(0);

    root.set_time_offset(0.1, false);
    root.set_time_offset(0.2, false);
    root.set_time_offset(0.3, false);
    root.set_time_offset(0.4, false);
    assert_eq!(log.borrow().seeks.len(), 1);
    let first = log.borrow().seeks[0];
    assert!((first.target_secs - 2.0).abs() < 1e-9);
    assert_eq!(first.tolerance_before_secs, SEEK_TOLERANCE_SECS);
    assert_eq!(root.playback().seek.pending, Some(0.4));

    assert_eq!(root.complete_seek(first.ticket), SeekCompletion::Drained);
    assert_eq!(log.borrow().seeks.len(), 2);
    let second = log.borrow().seeks[1];
    assert!((second.target_secs - 5.0).abs() < 1e-9);
    assert_ne!(second.ticket, first.ticket);

    assert_eq!(root.complete_seek(second.ticket), SeekCompletion::Settled);
    assert_eq!(root.complete_seek(second.ticket), SeekCompletion::Stale);
    assert_eq!(root.playback().seek.in_flight, None);
}

#[test]
fn completion_after_teardown_is_stale() {
    let mut media = FakeMedia::default();
    let delegate = RecordingDelegate::default();
    let mut root = load(json!({"elements": [{"video": "v.mp4"}]}), &delegate, &mut media);
    let log = media.video_log(0);

    root.set_time_offset(0.5, false);
    root.set_time_offset(0.7, false);
    let ticket = log.borrow().seeks[0].ticket;
    root.clear();

    assert_eq!(root.complete_seek(ticket), SeekCompletion::Stale);
    assert_eq!(log.borrow().seeks.len(), 1);
    assert!(delegate.events().is_empty());
    assert!(!root.is_video_element());
}

#[test]
fn clearing_the_video_element_itself_invalidates_tickets() {
    let mut media = FakeMedia::default();
    let mut root = video_root(&mut media);
    root.set_time_offset(0.5, false);
    let ticket = media.video_log(0).borrow().seeks[0].ticket;
    root.clear();
    assert_eq!(root.complete_seek(ticket), SeekCompletion::Stale);
}

#[test]
fn ignored_offsets_issue_no_seeks() {
    let mut media = FakeMedia::default();
    let mut root = video_root(&mut media);
    root.set_time_offset(-0.1, false);
    root.set_time_offset(1.5, false);
    root.set_time_offset(f64::NAN, false);
    root.set_time_offset(0.5, true);
    assert!(media.video_log(0).borrow().seeks.is_empty());
    assert_eq!(root.playback().seek, Default::default());
}

#[test]
fn unready_player_drops_the_offset() {
    let mut media = FakeMedia {
        videos_not_ready: true,
        ..FakeMedia::default()
    };
    let mut root = video_root(&mut media);
    root.set_time_offset(0.5, false);
    assert!(media.video_log(0).borrow().seeks.is_empty());
    assert_eq!(root.playback().seek.in_flight, None);
    assert_eq!(root.playback().seek.pending, None);
}

#[test]
fn sprite_switches_cells_only_on_step_change() {
    let mut media = FakeMedia::default().with_image("s.png", 400, 200, 1);
    let mut root = load(
        json!({"sprite": "s.png", "slice": [4, 2], "slot": [0, 1], "loop": {"style": "sprite"}}),
        &RecordingDelegate::default(),
        &mut media,
    );
    assert_eq!(root.sprite_step(), None);

    root.set_time_offset(0.0, false);
    assert_eq!(root.sprite_step(), Some(0));
    assert_eq!(root.sprite_contents_rect(), Some(Rect::new(0.0, 0.5, 0.25, 1.0)));

    root.set_time_offset(0.1, false);
    assert_eq!(root.sprite_step(), Some(0));

    root.set_time_offset(0.3, false);
    assert_eq!(root.sprite_step(), Some(1));
    assert_eq!(root.sprite_contents_rect(), Some(Rect::new(0.25, 0.5, 0.5, 1.0)));

    root.set_time_offset(1.0, false);
    assert_eq!(root.sprite_step(), Some(0), "a full pass wraps to the first column");
}

#[test]
fn autoplay_lifecycle_notifies_delegate_and_toggles_play_buttons() {
    let mut media = FakeMedia::default();
    let delegate = RecordingDelegate::default();
    let mut root = load(
        json!({"elements": [{"video": "a.mp4"}, {"action": "play"}]}),
        &delegate,
        &mut media,
    );
    let log = media.video_log(0);
    let video_id = root.children()[0].id();
    let button_opacity = |root: &Element| root.children()[1].layers().style.opacity;

    assert!(root.start_autoplay(&delegate));
    assert!(root.is_playing());
    assert_eq!(button_opacity(&root), 0.0);
    assert!(!root.start_autoplay(&delegate), "already playing");

    assert!(root.pause_autoplay(&delegate));
    assert_eq!(button_opacity(&root), 1.0);
    assert!(!root.pause_autoplay(&delegate));

    root.start_autoplay(&delegate);
    assert!(root.video_reached_end(video_id, &delegate));
    assert!(!root.is_playing());
    assert_eq!(button_opacity(&root), 1.0);
    assert!(root.find(video_id).unwrap().video().unwrap().needs_rewind);

    root.start_autoplay(&delegate);
    assert_eq!(log.borrow().rewinds, 1);
    assert_eq!(log.borrow().plays, 3);
    assert_eq!(log.borrow().pauses, 1);

    let id = video_id.0;
    assert_eq!(
        delegate.events(),
        vec![
            format!("started:{id}"),
            format!("finished:{id}:false"),
            format!("started:{id}"),
            format!("finished:{id}:true"),
            format!("started:{id}"),
        ]
    );
}

#[test]
fn repeating_video_loops_without_notifications() {
    let mut media = FakeMedia::default();
    let delegate = RecordingDelegate {
        repeat: true,
        ..RecordingDelegate::default()
    };
    let mut root = load(json!({"video": "a.mp4"}), &delegate, &mut media);
    let id = root.id();
    root.start_autoplay(&delegate);
    assert!(root.video_reached_end(id, &delegate));
    assert!(root.is_playing());
    let log = media.video_log(0);
    assert_eq!(log.borrow().rewinds, 1);
    assert_eq!(log.borrow().plays, 2);
    assert_eq!(delegate.events().len(), 1);

    assert!(!root.video_reached_end(ElementId(99), &delegate));
}

#[test]
fn end_without_autoplay_only_marks_rewind() {
    let mut media = FakeMedia::default();
    let delegate = RecordingDelegate::default();
    let mut root = load(json!({"video": "a.mp4"}), &delegate, &mut media);
    let id = root.id();
    assert!(root.video_reached_end(id, &delegate));
    assert!(delegate.events().is_empty());
    assert!(root.video().unwrap().needs_rewind);
}

#[test]
fn action_elements_respond_to_touches() {
    let mut media = FakeMedia::default();
    let delegate = RecordingDelegate::default();
    let mut button = load(json!({"action": "go"}), &delegate, &mut media);

    assert!(button.touch_down());
    assert_eq!(button.layers().style.opacity, crate::scene::element::PRESSED_OPACITY);
    assert!(button.touch_cancel());
    assert_eq!(button.layers().style.opacity, 1.0);
    assert!(button.press(&delegate));
    assert_eq!(delegate.events(), vec!["action:go".to_owned()]);

    let mut plain = load(json!({}), &delegate, &mut media);
    assert!(!plain.touch_down());
    assert!(!plain.press(&delegate));
    assert_eq!(delegate.events().len(), 1);
}
