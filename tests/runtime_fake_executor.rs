// tests/runtime_fake_executor.rs

use std::error::Error;
use std::time::Duration;

use tokio::time::timeout;

use pwatch::config::WatchConfig;
use pwatch::engine::{ExitReason, Runtime, RuntimeEvent, Termination};
use pwatch::exec::ExecOutput;
use pwatch::render::FrameRenderer;
use pwatch_test_utils::builders::{WatchConfigBuilder, command};
use pwatch_test_utils::fake_display::{BrokenDisplay, DisplayLog, RecordingDisplay};
use pwatch_test_utils::fake_executor::{CallLog, ScriptedExecutor, start_gaps};
use pwatch_test_utils::{init_tracing, no_hostname};

type TestResult = Result<(), Box<dyn Error>>;

fn runtime(
    config: WatchConfig,
    executor: ScriptedExecutor,
) -> (Runtime<ScriptedExecutor, RecordingDisplay>, CallLog, DisplayLog) {
    let calls = executor.calls();
    let display = RecordingDisplay::new(100);
    let log = display.log();
    let renderer = FrameRenderer::new(config, executor, display).with_hostname_lookup(no_hostname);
    let runtime = Runtime::with_renderer(config, command("check status"), renderer);
    (runtime, calls, log)
}

/// Run the runtime with an upper bound instead of hanging the test suite.
async fn run_bounded(
    runtime: Runtime<ScriptedExecutor, RecordingDisplay>,
) -> Result<Termination, Box<dyn Error>> {
    match timeout(Duration::from_secs(5), runtime.run()).await {
        Ok(result) => Ok(result?),
        Err(_) => panic!("runtime did not finish within 5 seconds"),
    }
}

/// Send `ShutdownRequested` after `after`.
fn shutdown_after(runtime: &Runtime<ScriptedExecutor, RecordingDisplay>, after: Duration) {
    let tx = runtime.event_sender();
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
    });
}

#[tokio::test]
async fn exits_on_the_third_run_when_output_changes() -> TestResult {
    init_tracing();

    let config = WatchConfigBuilder::new()
        .interval_ms(20)
        .exit_on_change(true)
        .build();
    let (runtime, calls, log) = runtime(config, ScriptedExecutor::outputs(&["A", "A", "B"]));

    let termination = run_bounded(runtime).await?;

    assert_eq!(termination, Termination::Exit(ExitReason::OutputChanged));
    assert_eq!(termination.exit_code(), 2);
    assert_eq!(calls.lock().unwrap().len(), 3);
    assert_eq!(log.flush_count(), 3);
    assert!(log.last_frame_text().ends_with('B'));
    Ok(())
}

#[tokio::test]
async fn unchanged_output_keeps_running_until_shutdown() -> TestResult {
    let config = WatchConfigBuilder::new()
        .interval_ms(20)
        .exit_on_change(true)
        .build();
    let (runtime, calls, _log) = runtime(config, ScriptedExecutor::outputs(&["A"]));
    shutdown_after(&runtime, Duration::from_millis(200));

    let termination = run_bounded(runtime).await?;

    assert_eq!(termination, Termination::Interrupted);
    assert_eq!(termination.exit_code(), 130);
    assert!(calls.lock().unwrap().len() >= 3);
    Ok(())
}

#[tokio::test]
async fn exits_on_failure_when_errexit_is_set() -> TestResult {
    let config = WatchConfigBuilder::new()
        .interval_ms(20)
        .exit_on_error(true)
        .build();
    let executor = ScriptedExecutor::new(vec![ExecOutput::failure("", "exit status 1")]);
    let (runtime, calls, log) = runtime(config, executor);

    let termination = run_bounded(runtime).await?;

    assert_eq!(termination, Termination::Exit(ExitReason::CommandFailed));
    assert_eq!(termination.exit_code(), 1);
    assert_eq!(calls.lock().unwrap().len(), 1);
    // The failing frame is still painted before exiting.
    assert_eq!(log.flush_count(), 1);
    assert!(log.last_frame_text().ends_with("Error: exit status 1"));
    Ok(())
}

#[tokio::test]
async fn failures_are_rendered_and_the_loop_continues_without_errexit() -> TestResult {
    let config = WatchConfigBuilder::new().interval_ms(20).build();
    let executor = ScriptedExecutor::new(vec![
        ExecOutput::failure("", "exit status 1"),
        ExecOutput::success("fine"),
    ]);
    let (runtime, calls, log) = runtime(config, executor);
    shutdown_after(&runtime, Duration::from_millis(150));

    let termination = run_bounded(runtime).await?;

    assert_eq!(termination, Termination::Interrupted);
    assert!(calls.lock().unwrap().len() >= 2);
    let frames = log.frames();
    assert!(pwatch_test_utils::fake_display::frame_text(&frames[0]).ends_with("Error: exit status 1"));
    assert!(log.last_frame_text().ends_with("fine"));
    Ok(())
}

#[tokio::test]
async fn first_run_is_immediate_and_shutdown_is_prompt() -> TestResult {
    let config = WatchConfigBuilder::new().interval_ms(60_000).build();
    let (runtime, calls, log) = runtime(config, ScriptedExecutor::outputs(&["once"]));
    shutdown_after(&runtime, Duration::from_millis(100));

    let termination = run_bounded(runtime).await?;

    assert_eq!(termination, Termination::Interrupted);
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(log.flush_count(), 1);
    Ok(())
}

#[tokio::test]
async fn shutdown_interrupts_a_slow_first_run() -> TestResult {
    let config = WatchConfigBuilder::new().interval_ms(60_000).build();
    let executor = ScriptedExecutor::outputs(&["slow"]).with_delay(Duration::from_secs(30));
    let (runtime, calls, log) = runtime(config, executor);
    shutdown_after(&runtime, Duration::from_millis(50));

    let started = tokio::time::Instant::now();
    let termination = run_bounded(runtime).await?;

    assert_eq!(termination, Termination::Interrupted);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(calls.lock().unwrap().len(), 1);
    // The run never completed, so no frame was flushed.
    assert_eq!(log.flush_count(), 0);
    Ok(())
}

#[tokio::test]
async fn plain_interval_is_measured_from_completion() -> TestResult {
    let interval = Duration::from_millis(50);
    let run_time = Duration::from_millis(20);
    let config = WatchConfigBuilder::new()
        .interval(interval)
        .exit_on_change(true)
        .build();
    let executor = ScriptedExecutor::outputs(&["A", "A", "A", "A", "B"]).with_delay(run_time);
    let (runtime, calls, _log) = runtime(config, executor);

    run_bounded(runtime).await?;

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 5);
    for gap in start_gaps(&calls) {
        assert!(gap >= interval + run_time, "gap {gap:?} shorter than interval + run");
    }
    Ok(())
}

#[tokio::test]
async fn precise_interval_never_fires_early() -> TestResult {
    let interval = Duration::from_millis(50);
    let config = WatchConfigBuilder::new()
        .interval(interval)
        .precise(true)
        .exit_on_change(true)
        .build();
    let executor = ScriptedExecutor::outputs(&["A", "A", "A", "A", "B"])
        .with_delay(Duration::from_millis(20));
    let (runtime, calls, _log) = runtime(config, executor);

    run_bounded(runtime).await?;

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 5);
    // Call timestamps are taken a hair after the loop's own start instant.
    let slack = Duration::from_millis(2);
    for gap in start_gaps(&calls) {
        assert!(gap + slack >= interval, "gap {gap:?} shorter than interval");
    }
    Ok(())
}

#[tokio::test]
async fn broken_display_aborts_with_internal_error() {
    let config = WatchConfigBuilder::new().interval_ms(20).build();
    let renderer = FrameRenderer::new(config, ScriptedExecutor::outputs(&["x"]), BrokenDisplay);
    let runtime = Runtime::with_renderer(config, command("date"), renderer);

    let result = timeout(Duration::from_secs(5), runtime.run())
        .await
        .expect("runtime did not finish within 5 seconds");

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 7);
    assert!(err.to_string().contains("stdout closed"));
}
