//! End-to-end tests for the transcode orchestration, driven by a fake
//! encoder script that replays canned ffmpeg stderr output.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use vidpress_core::{
    EncoderQuality, EventDispatcher, EventHandler, TranscodeEvent, TranscodeParams,
    transcode_with_encoder,
};

struct Recorder(Arc<Mutex<Vec<TranscodeEvent>>>);

impl EventHandler for Recorder {
    fn handle(&self, event: &TranscodeEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

fn recording_dispatcher() -> (EventDispatcher, Arc<Mutex<Vec<TranscodeEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(Arc::new(Recorder(Arc::clone(&events))));
    (dispatcher, events)
}

/// Writes an executable shell script standing in for ffmpeg.
fn fake_encoder(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-ffmpeg");
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn params() -> TranscodeParams {
    TranscodeParams {
        input_path: "clip.mp4".to_string(),
        quality: EncoderQuality(55),
    }
}

#[test]
fn test_progress_then_completion_on_clean_exit() {
    let dir = tempfile::tempdir().unwrap();
    let encoder = fake_encoder(
        dir.path(),
        concat!(
            "printf '  Duration: 00:01:00.00, start: 0.000000, bitrate: 4521 kb/s\\n' >&2\n",
            "printf 'frame=  100 fps= 25 q=28.0 time=00:00:30.00 bitrate=1118kbits/s\\r' >&2\n",
            "printf 'frame=  200 fps= 25 q=28.0 time=00:01:00.00 bitrate=1118kbits/s\\n' >&2\n",
            "exit 0\n",
        ),
    );

    let (dispatcher, events) = recording_dispatcher();
    let handle = transcode_with_encoder(&encoder, &params(), dispatcher).unwrap();
    assert_eq!(handle.output_path(), Path::new("clipq_55.mp4"));
    handle.wait();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            TranscodeEvent::Progress { fraction: 0.5 },
            TranscodeEvent::Progress { fraction: 1.0 },
            TranscodeEvent::Completed,
        ]
    );
}

#[test]
fn test_nonzero_exit_reports_failed_with_code() {
    let dir = tempfile::tempdir().unwrap();
    let encoder = fake_encoder(
        dir.path(),
        concat!(
            "printf '  Duration: 00:01:00.00, start: 0.000000, bitrate: 4521 kb/s\\n' >&2\n",
            "exit 3\n",
        ),
    );

    let (dispatcher, events) = recording_dispatcher();
    let handle = transcode_with_encoder(&encoder, &params(), dispatcher).unwrap();
    handle.wait();

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![TranscodeEvent::Failed {
            message: "encoder exited with status 3".to_string()
        }]
    );
}

#[test]
fn test_frame_line_before_duration_warns_without_progress() {
    let dir = tempfile::tempdir().unwrap();
    let encoder = fake_encoder(
        dir.path(),
        concat!(
            "printf 'frame=  100 fps= 25 q=28.0 time=00:00:30.00 bitrate=1118kbits/s\\n' >&2\n",
            "exit 0\n",
        ),
    );

    let (dispatcher, events) = recording_dispatcher();
    let handle = transcode_with_encoder(&encoder, &params(), dispatcher).unwrap();
    handle.wait();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            TranscodeEvent::Warning {
                message: "No duration found".to_string()
            },
            TranscodeEvent::Completed,
        ]
    );
}

#[test]
fn test_cancel_kills_encoder_and_reports_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    // exec so the kill reaches the process holding the stderr pipe
    let encoder = fake_encoder(dir.path(), "exec sleep 30\n");

    let (dispatcher, events) = recording_dispatcher();
    let handle = transcode_with_encoder(&encoder, &params(), dispatcher).unwrap();
    handle.cancel().unwrap();
    handle.wait();

    assert_eq!(
        *events.lock().unwrap(),
        vec![TranscodeEvent::Failed {
            message: "transcode cancelled".to_string()
        }]
    );
}

#[test]
fn test_spawn_failure_is_an_error_not_an_event() {
    let (dispatcher, events) = recording_dispatcher();
    let result = transcode_with_encoder(
        Path::new("/nonexistent/fake-ffmpeg"),
        &params(),
        dispatcher,
    );

    assert!(result.is_err());
    assert!(events.lock().unwrap().is_empty());
}
