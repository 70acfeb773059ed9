#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::check_model;
use helpers::instance_path;
use helpers::run_solver;
use helpers::Status;

macro_rules! test_cnf_instance {
    ($name:ident, $status:ident) => {
        #[test]
        fn $name() {
            run_cnf_test(stringify!($name), Status::$status, &[]);
        }
    };
    ($name:ident, $status:ident, $($arg:literal),+) => {
        #[test]
        fn $name() {
            run_cnf_test(stringify!($name), Status::$status, &[$($arg),+]);
        }
    };
}

test_cnf_instance!(empty, Satisfiable);
test_cnf_instance!(multiline, Satisfiable);
test_cnf_instance!(ph2, Unsatisfiable);
test_cnf_instance!(ph3, Unsatisfiable);
test_cnf_instance!(ph4, Unsatisfiable);
test_cnf_instance!(ph5, Unsatisfiable);
test_cnf_instance!(queens3, Unsatisfiable);
test_cnf_instance!(queens6, Satisfiable);
test_cnf_instance!(trivially_false, Unsatisfiable);
test_cnf_instance!(unit0, Satisfiable);
test_cnf_instance!(xor_sat, Satisfiable);
test_cnf_instance!(xor_unsat, Unsatisfiable);

fn run_cnf_test(instance_name: &str, expected: Status, args: &[&str]) {
    let instance_path = instance_path(instance_name);
    let output = run_solver(&instance_path, args);

    assert_eq!(expected, output.status, "{}", output.stdout);
    if expected == Status::Satisfiable {
        let model = output.model.expect("a satisfiable answer has a model");
        check_model(&instance_path, &model);
    }
}

mod options {
    use super::*;

    #[test]
    fn racing_solvers_agree() {
        for instance in ["ph4", "queens3", "xor_unsat"] {
            let output = run_solver(&instance_path(instance), &["--parallel", "4"]);
            assert_eq!(Status::Unsatisfiable, output.status, "{instance}");
        }

        let instance_path = instance_path("queens6");
        let output = run_solver(&instance_path, &["--parallel", "3", "--random-seed", "7"]);
        assert_eq!(Status::Satisfiable, output.status);
        check_model(&instance_path, &output.model.expect("model"));
    }

    #[test]
    fn every_strategy_solves_the_instances() {
        let configurations: [&[&str]; 6] = [
            &["--restart-strategy", "none"],
            &[
                "--restart-strategy",
                "sequence",
                "--restart-sequence-generator-type",
                "luby",
                "--restart-base-interval",
                "4",
            ],
            &["--deletion-strategy", "activity", "--minimisation", "none"],
            &["--deletion-strategy", "size", "--minimisation", "simple"],
            &["--phase", "random", "--random-seed", "3"],
            &["--phase", "positive", "--restart-min-initial-conflicts", "0"],
        ];
        for args in configurations {
            let output = run_solver(&instance_path("ph4"), args);
            assert_eq!(Status::Unsatisfiable, output.status, "{args:?}");

            let queens = instance_path("queens6");
            let output = run_solver(&queens, args);
            assert_eq!(Status::Satisfiable, output.status, "{args:?}");
            check_model(&queens, &output.model.expect("model"));
        }
    }

    #[test]
    fn conflict_limit_gives_unknown() {
        let output = run_solver(&instance_path("ph5"), &["--conflict-limit", "1"]);
        assert_eq!(Status::Unknown, output.status);
    }

    #[test]
    fn time_and_conflict_limits_are_exclusive() {
        let output = helpers::run_solver_unchecked(
            &instance_path("ph2"),
            &["--conflict-limit", "1", "--time-limit", "1000"],
        );
        assert!(!output.success);
    }

    #[test]
    fn prime_implicant_is_printed() {
        let instance_path = instance_path("unit0");
        let output = run_solver(&instance_path, &["--prime-implicant", "counter-based"]);
        assert_eq!(Status::Satisfiable, output.status);

        let implicant = output
            .prime_implicant
            .expect("the prime implicant is printed");
        let model = output.model.expect("model");
        assert!(implicant.iter().all(|literal| model.contains(literal)));
        // The units are needed and they satisfy the last clause as well.
        assert_eq!(vec![1, -2, 3], implicant);
    }

    #[test]
    fn statistics_are_logged_as_comments() {
        let output = run_solver(&instance_path("ph3"), &["--log-statistics"]);
        assert_eq!(Status::Unsatisfiable, output.status);
        assert!(output
            .stdout
            .lines()
            .any(|line| line.starts_with("c STAT ") && line.contains("num_conflicts=")));
    }

    #[test]
    fn other_file_formats_are_rejected() {
        let output = helpers::run_solver_unchecked(
            &format!("{}/Cargo.toml", env!("CARGO_MANIFEST_DIR")),
            &[],
        );
        assert!(!output.success);
        assert!(output.stdout.contains("is not supported"));
    }
}
