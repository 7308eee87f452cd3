// tests/frame_renderer.rs

use chrono::{Local, TimeZone};

use pwatch::errors::PwatchError;
use pwatch::exec::ExecOutput;
use pwatch::render::{FrameRenderer, format_timestamp};
use pwatch_test_utils::builders::{WatchConfigBuilder, command};
use pwatch_test_utils::fake_display::{BrokenDisplay, DisplayOp, RecordingDisplay};
use pwatch_test_utils::fake_executor::ScriptedExecutor;
use pwatch_test_utils::{fixed_hostname, init_tracing, no_hostname};

fn stamp() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap()
}

#[tokio::test]
async fn titled_frame_has_title_banner_and_body() {
    init_tracing();

    let config = WatchConfigBuilder::new().interval_ms(2000).build();
    let display = RecordingDisplay::new(80);
    let log = display.log();
    let mut renderer = FrameRenderer::new(config, ScriptedExecutor::outputs(&["hi\n"]), display)
        .with_hostname_lookup(fixed_hostname);

    let outcome = renderer.render(stamp(), &command("echo hi")).await.unwrap();

    let banner = format!("testhost: {}", format_timestamp(&stamp()));
    let column = 80 - banner.chars().count() as u16;
    assert_eq!(
        log.ops(),
        vec![
            DisplayOp::Clear,
            DisplayOp::MoveTo(0, 0),
            DisplayOp::Print("Every 2s: echo hi".to_string()),
            DisplayOp::MoveTo(column, 0),
            DisplayOp::Print(banner),
            DisplayOp::MoveTo(0, 2),
            DisplayOp::Write(b"hi\n".to_vec()),
            DisplayOp::Flush,
        ]
    );

    assert!(!outcome.failed);
    assert_eq!(outcome.error, None);
    assert_eq!(outcome.output, b"hi\n");
    assert_eq!(outcome.timestamp, stamp());
}

#[tokio::test]
async fn banner_falls_back_to_timestamp_without_hostname() {
    let config = WatchConfigBuilder::new().interval_ms(500).build();
    let display = RecordingDisplay::new(60);
    let log = display.log();
    let mut renderer = FrameRenderer::new(config, ScriptedExecutor::outputs(&["x"]), display)
        .with_hostname_lookup(no_hostname);

    renderer.render(stamp(), &command("uptime")).await.unwrap();

    let ts = format_timestamp(&stamp());
    let ops = log.ops();
    assert_eq!(ops[2], DisplayOp::Print("Every 0.5s: uptime ".to_string()));
    assert_eq!(ops[3], DisplayOp::MoveTo(60 - ts.chars().count() as u16, 0));
    assert_eq!(ops[4], DisplayOp::Print(ts));
}

#[tokio::test]
async fn hidden_title_leaves_only_the_output() {
    let config = WatchConfigBuilder::new().hide_title(true).build();
    let display = RecordingDisplay::new(80);
    let log = display.log();
    let mut renderer = FrameRenderer::new(config, ScriptedExecutor::outputs(&["body"]), display)
        .with_hostname_lookup(fixed_hostname);

    renderer.render(stamp(), &command("cat f")).await.unwrap();

    assert_eq!(
        log.ops(),
        vec![
            DisplayOp::Clear,
            DisplayOp::MoveTo(0, 0),
            DisplayOp::Write(b"body".to_vec()),
            DisplayOp::Flush,
        ]
    );
}

#[tokio::test]
async fn failed_command_renders_error_and_drops_output() {
    let config = WatchConfigBuilder::new().hide_title(true).build();
    let display = RecordingDisplay::new(80);
    let log = display.log();
    let executor = ScriptedExecutor::new(vec![ExecOutput::failure(
        "partial output",
        "exit status 1",
    )]);
    let mut renderer = FrameRenderer::new(config, executor, display);

    let outcome = renderer.render(stamp(), &command("false")).await.unwrap();

    assert!(outcome.failed);
    assert_eq!(outcome.error.as_deref(), Some("exit status 1"));
    assert!(outcome.output.is_empty());

    assert_eq!(log.flush_count(), 1);
    assert_eq!(log.last_frame_text(), "Error: exit status 1");
}

#[tokio::test]
async fn each_render_is_one_flushed_frame() {
    let config = WatchConfigBuilder::new().build();
    let display = RecordingDisplay::new(80);
    let log = display.log();
    let executor = ScriptedExecutor::outputs(&["one", "two", "three"]);
    let calls = executor.calls();
    let mut renderer =
        FrameRenderer::new(config, executor, display).with_hostname_lookup(no_hostname);

    for _ in 0..3 {
        renderer.render(Local::now(), &command("seq 3")).await.unwrap();
    }

    let frames = log.frames();
    assert_eq!(frames.len(), 3);
    for frame in &frames {
        assert_eq!(frame.first(), Some(&DisplayOp::Clear));
        assert_eq!(frame.last(), Some(&DisplayOp::Flush));
    }
    assert!(log.last_frame_text().ends_with("three"));
    assert_eq!(calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn display_failure_is_an_error() {
    let config = WatchConfigBuilder::new().build();
    let mut renderer = FrameRenderer::new(config, ScriptedExecutor::outputs(&["x"]), BrokenDisplay);

    let err = renderer.render(stamp(), &command("date")).await.unwrap_err();
    assert!(matches!(err, PwatchError::IoError(_)));
    assert_eq!(err.exit_code(), 7);
}
