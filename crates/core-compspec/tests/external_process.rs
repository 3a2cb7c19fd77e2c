#![cfg(unix)]

use core_compspec::{
    CompleterError, CompletionContext, CompletionSpec, ExternalCompleterRunner, ProcessRunner,
    ReplyFilter, SpecEvaluator,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::time::Duration;

// Scripts are run through `/bin/sh <path>` rather than executed directly so a
// freshly written file is never exec'd.
fn script(dir: &tempfile::TempDir, name: &str, body: &str) -> String {
    let path: PathBuf = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    format!("/bin/sh {}", path.display())
}

fn runner() -> ProcessRunner {
    ProcessRunner::new(Duration::from_secs(5))
}

#[test]
fn positional_args_and_environment_reach_the_child() {
    let dir = tempfile::tempdir().unwrap();
    let prog = script(
        &dir,
        "env.sh",
        "printf '%s|%s|%s\\n' \"$1\" \"$2\" \"$3\"\n\
         printf '%s|%s|%s|%s\\n' \"$COMP_LINE\" \"$COMP_POINT\" \"$COMP_KEY\" \"$COMP_TYPE\"\n\
         printf '%s|%s|%s|%s\\n' \"$BUFFER\" \"$CURSOR\" \"$LBUFFER\" \"${RBUFFER-unset}\"\n",
    );
    let ctx = CompletionContext::from_line("kc get po", 9);
    let out = runner().run(&prog, &ctx).unwrap();
    assert_eq!(
        out,
        "kc|po|get\nkc get po|9|9|9\nkc get po|9|kc get po|unset\n"
    );
}

#[test]
fn output_is_parsed_into_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let prog = script(
        &dir,
        "mixed.sh",
        "echo '{\"Value\":\"pods\",\"Description\":\"Pods\"}'\necho 'svc\tServices'\necho deploy\n",
    );
    let ev = SpecEvaluator::new(Box::new(runner()));
    let spec = CompletionSpec::external("kc", prog);
    let got = ev.evaluate(&spec, &CompletionContext::from_line("kc ", 3), ReplyFilter::Raw);
    let pairs: Vec<(String, Option<String>)> =
        got.into_iter().map(|c| (c.value, c.description)).collect();
    assert_eq!(
        pairs,
        vec![
            ("pods".to_string(), Some("Pods".to_string())),
            ("svc".to_string(), Some("Services".to_string())),
            ("deploy".to_string(), None),
        ]
    );
}

#[test]
fn non_zero_exit_is_an_error_and_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let prog = script(&dir, "fail.sh", "echo partial\nexit 3\n");
    let ctx = CompletionContext::from_line("x ", 2);
    assert!(matches!(
        runner().run(&prog, &ctx),
        Err(CompleterError::NonZeroExit { .. })
    ));
    let ev = SpecEvaluator::new(Box::new(runner()));
    assert!(
        ev.evaluate(&CompletionSpec::external("x", prog), &ctx, ReplyFilter::Raw)
            .is_empty()
    );
}

#[test]
fn missing_program_is_a_spawn_error() {
    let ctx = CompletionContext::from_line("x ", 2);
    let err = runner()
        .run("/definitely/not/a/completer", &ctx)
        .unwrap_err();
    assert!(matches!(err, CompleterError::Spawn { .. }), "{err}");
}

#[test]
fn slow_completer_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let prog = script(&dir, "slow.sh", "sleep 5\necho late\n");
    let fast = ProcessRunner::new(Duration::from_millis(100));
    let started = std::time::Instant::now();
    let err = fast
        .run(&prog, &CompletionContext::from_line("x ", 2))
        .unwrap_err();
    assert!(matches!(err, CompleterError::Timeout { .. }), "{err}");
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sync_run_inside_multi_thread_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let prog = script(&dir, "ok.sh", "echo '[\"a\",\"b\"]'\n");
    let out = runner()
        .run(&prog, &CompletionContext::from_line("x ", 2))
        .unwrap();
    assert_eq!(out.trim(), "[\"a\",\"b\"]");
}

#[tokio::test(flavor = "current_thread")]
async fn sync_run_inside_current_thread_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let prog = script(&dir, "ok.sh", "echo hello\n");
    let out = runner()
        .run(&prog, &CompletionContext::from_line("x ", 2))
        .unwrap();
    assert_eq!(out, "hello\n");
}

#[tokio::test]
async fn async_path_is_usable_directly() {
    let dir = tempfile::tempdir().unwrap();
    let prog = script(&dir, "ok.sh", "echo \"$2\"\n");
    let out = runner()
        .run_async(&prog, &CompletionContext::from_line("x wor", 5))
        .await
        .unwrap();
    assert_eq!(out, "wor\n");
}
