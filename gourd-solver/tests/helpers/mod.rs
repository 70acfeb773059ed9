//! Runs the solver binary on the instances in `tests/cnf` and reads back its answer.

use std::fs::File;
use std::path::Path;
use std::process::Command;
use std::process::Stdio;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use regex::Regex;
use wait_timeout::ChildExt;

const TEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

#[derive(Debug)]
pub(crate) struct SolverOutput {
    pub(crate) status: Status,
    pub(crate) model: Option<Vec<i32>>,
    pub(crate) prime_implicant: Option<Vec<i32>>,
    pub(crate) stdout: String,
}

#[derive(Debug)]
pub(crate) struct RawOutput {
    pub(crate) success: bool,
    pub(crate) stdout: String,
}

pub(crate) fn instance_path(instance_name: &str) -> String {
    format!(
        "{}/tests/cnf/{instance_name}.cnf",
        env!("CARGO_MANIFEST_DIR")
    )
}

/// Runs the solver and parses its answer, panicking when it does not exit successfully.
pub(crate) fn run_solver(instance_path: impl AsRef<Path>, args: &[&str]) -> SolverOutput {
    let output = run_solver_unchecked(instance_path, args);
    assert!(output.success, "error solving instance:\n{}", output.stdout);

    let status_regex = Regex::new(r"(?m)^s (SATISFIABLE|UNSATISFIABLE|UNKNOWN)$").unwrap();
    let status = match status_regex
        .captures(&output.stdout)
        .unwrap_or_else(|| panic!("no status line in:\n{}", output.stdout))
        .get(1)
        .unwrap()
        .as_str()
    {
        "SATISFIABLE" => Status::Satisfiable,
        "UNSATISFIABLE" => Status::Unsatisfiable,
        _ => Status::Unknown,
    };

    let model = literals_after(&output.stdout, r"(?m)^v (.*)$");
    let prime_implicant = literals_after(&output.stdout, r"(?m)^c prime implicant (.*)$");

    SolverOutput {
        status,
        model,
        prime_implicant,
        stdout: output.stdout,
    }
}

pub(crate) fn run_solver_unchecked(instance_path: impl AsRef<Path>, args: &[&str]) -> RawOutput {
    static NUM_RUNS: AtomicUsize = AtomicUsize::new(0);

    let log_file_path = std::env::temp_dir().join(format!(
        "gourd-solver-test-{}-{}.log",
        std::process::id(),
        NUM_RUNS.fetch_add(1, Ordering::Relaxed)
    ));

    let mut command = Command::new(env!("CARGO_BIN_EXE_gourd-solver"));
    for arg in args {
        let _ = command.arg(arg);
    }

    let mut child = command
        .arg(instance_path.as_ref())
        .stdout(File::create(&log_file_path).expect("Failed to create log file."))
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let success = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs())
        }
        Ok(Some(status)) => status.success(),
        Err(e) => panic!("error starting solver: {e}"),
    };

    let stdout = std::fs::read_to_string(&log_file_path).expect("Failed to read log file.");
    let _ = std::fs::remove_file(&log_file_path);

    RawOutput { success, stdout }
}

/// Checks that `model` assigns every variable of the instance and satisfies all its clauses
/// and parity constraints.
pub(crate) fn check_model(instance_path: impl AsRef<Path>, model: &[i32]) {
    let contents = std::fs::read_to_string(instance_path).expect("Failed to read instance.");

    let mut num_variables = 0;
    let mut constraints: Vec<(bool, Vec<i32>)> = vec![];
    let mut is_xor = false;
    let mut buffer = vec![];

    for line in contents.lines() {
        let mut line = line.trim_start();
        if line.starts_with('c') {
            continue;
        }
        if line.starts_with('p') {
            num_variables = line
                .split_whitespace()
                .nth(2)
                .and_then(|n| n.parse::<usize>().ok())
                .expect("valid header");
            continue;
        }
        if buffer.is_empty() {
            if let Some(rest) = line.strip_prefix('x') {
                is_xor = true;
                line = rest;
            }
        }

        for token in line.split_whitespace() {
            let literal = token.parse::<i32>().expect("literal");
            if literal == 0 {
                constraints.push((is_xor, std::mem::take(&mut buffer)));
                is_xor = false;
            } else {
                buffer.push(literal);
            }
        }
    }

    assert_eq!(num_variables, model.len(), "every variable is assigned");
    for variable in 1..=num_variables as i32 {
        assert!(
            model.contains(&variable) ^ model.contains(&-variable),
            "variable {variable} is assigned exactly once"
        );
    }

    for (is_xor, literals) in constraints {
        let num_true = literals
            .iter()
            .filter(|literal| model.contains(literal))
            .count();
        if is_xor {
            assert!(num_true % 2 == 1, "parity constraint {literals:?} is violated");
        } else {
            assert!(num_true > 0, "clause {literals:?} is violated");
        }
    }
}

fn literals_after(stdout: &str, pattern: &str) -> Option<Vec<i32>> {
    let regex = Regex::new(pattern).unwrap();
    let captures = regex.captures(stdout)?;
    let mut literals = captures
        .get(1)
        .unwrap()
        .as_str()
        .split_whitespace()
        .map(|token| token.parse::<i32>().expect("literal"))
        .collect::<Vec<_>>();
    assert_eq!(Some(0), literals.pop(), "literal lines are terminated by 0");
    Some(literals)
}
