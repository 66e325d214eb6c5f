use std::error::Error;
use std::io;

use gauge_exec::errors::{BuildStepFailure, ExecutionFailure, FAILURE_PREFIX, Interruption};

/// Collect `Display` of every error in the chain, outermost first.
fn chain(err: &(dyn Error + 'static)) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = Some(err);
    while let Some(e) = cur {
        out.push(e.to_string());
        cur = e.source();
    }
    out
}

#[test]
fn build_step_failure_prefixes_message_and_keeps_cause() {
    let wrapped = BuildStepFailure::from(ExecutionFailure::NonZeroExit {
        program: "gauge".to_string(),
        code: Some(2),
    });

    assert_eq!(
        wrapped.to_string(),
        format!("{FAILURE_PREFIX}`gauge` exited with exit code 2")
    );

    let cause = wrapped.source().expect("cause");
    assert!(cause.is::<ExecutionFailure>());
    assert!(cause.source().is_none(), "non-zero exit carries no cause");
}

#[test]
fn spawn_failure_chain_reaches_io_error() {
    let wrapped = BuildStepFailure::from(ExecutionFailure::Spawn {
        program: "gauge".to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "program not found"),
    });

    let io_err = wrapped
        .source()
        .and_then(|e| e.source())
        .and_then(|e| e.downcast_ref::<io::Error>())
        .expect("io error in chain");
    assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn each_message_appears_once_in_the_chain() {
    let wrapped = BuildStepFailure::from(ExecutionFailure::Spawn {
        program: "gauge".to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "program not found"),
    });

    let messages = chain(&wrapped);
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1], "could not start `gauge`");
    assert_eq!(messages[2], "program not found");
    let mentions = messages.iter().filter(|m| m.contains("program not found")).count();
    assert_eq!(mentions, 1);
}

#[test]
fn wait_failure_is_not_repeated_in_interruption_message() {
    let failure = ExecutionFailure::Interrupted {
        program: "gauge".to_string(),
        source: Interruption::Wait(io::Error::other("ECHILD")),
    };

    let messages = chain(&failure);
    assert_eq!(
        messages,
        vec![
            "interrupted while waiting for `gauge`".to_string(),
            "waiting for the process failed".to_string(),
            "ECHILD".to_string(),
        ]
    );
}

#[test]
fn signal_termination_is_described() {
    let failure = ExecutionFailure::NonZeroExit {
        program: "gauge".to_string(),
        code: None,
    };
    assert!(failure.to_string().contains("terminated by signal"));
    assert_eq!(failure.exit_code(), None);
}
