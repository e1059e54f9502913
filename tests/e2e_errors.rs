mod common;

use common::cli::{TsWorkspace, run_tasksheet};
use common::fixtures::{MASTER_HEADER, TASKS_CSV};
use predicates::prelude::*;

#[test]
fn e2e_missing_task_table_is_input_error() {
    let _log = common::test_log("e2e_missing_task_table_is_input_error");
    let workspace = TsWorkspace::new();

    let run = run_tasksheet(
        &workspace,
        ["consolidate", "--tasks", "absent.csv", "--output", "m.csv"],
        "missing_tasks",
    );
    assert_eq!(run.code(), Some(2));
    let err = run.error_json();
    assert_eq!(err["error"]["code"], "INPUT_NOT_FOUND");
    assert_eq!(err["error"]["context"]["path"], "absent.csv");
    assert!(!workspace.exists("m.csv"));
}

#[test]
fn e2e_unterminated_quote_is_parse_error() {
    let _log = common::test_log("e2e_unterminated_quote_is_parse_error");
    let workspace = TsWorkspace::new();
    workspace.write(
        "tasks.csv",
        "Category,Priority,Task,Status\nOps,P1,\"Rotate keys,done\n",
    );

    let run = run_tasksheet(
        &workspace,
        ["consolidate", "--tasks", "tasks.csv", "--output", "m.csv"],
        "unterminated_quote",
    );
    assert_eq!(run.code(), Some(3));
    let err = run.error_json();
    assert_eq!(err["error"]["code"], "CSV_PARSE_ERROR");
    assert_eq!(err["error"]["context"]["line"], 2);
}

#[test]
fn e2e_invalid_date_is_rejected() {
    let _log = common::test_log("e2e_invalid_date_is_rejected");
    let workspace = TsWorkspace::new();
    workspace.write("tasks.csv", TASKS_CSV);

    let run = run_tasksheet(
        &workspace,
        ["consolidate", "--tasks", "tasks.csv", "--date", "15/01/2025"],
        "invalid_date",
    );
    assert_eq!(run.code(), Some(3));
    assert_eq!(run.error_json()["error"]["code"], "INVALID_DATE");
}

#[test]
fn e2e_update_missing_file() {
    let _log = common::test_log("e2e_update_missing_file");
    let workspace = TsWorkspace::new();

    let run = run_tasksheet(&workspace, ["update", "--file", "nope.csv"], "update_missing");
    assert_eq!(run.code(), Some(2));
    assert_eq!(run.error_json()["error"]["code"], "INPUT_NOT_FOUND");
}

#[test]
fn e2e_update_empty_file() {
    let _log = common::test_log("e2e_update_empty_file");
    let workspace = TsWorkspace::new();
    workspace.write("master.csv", "");

    let run = run_tasksheet(&workspace, ["update", "--file", "master.csv"], "update_empty");
    assert_eq!(run.code(), Some(2));
    assert_eq!(run.error_json()["error"]["code"], "EMPTY_TABLE");
    assert_eq!(workspace.read("master.csv"), "", "input is left untouched");
}

#[test]
fn e2e_update_missing_column() {
    let _log = common::test_log("e2e_update_missing_column");
    let workspace = TsWorkspace::new();
    workspace.write("master.csv", "ID,Description\nTASK-001,Something\n");

    let run = run_tasksheet(&workspace, ["update", "--file", "master.csv"], "update_no_column");
    assert_eq!(run.code(), Some(2));
    let err = run.error_json();
    assert_eq!(err["error"]["code"], "MISSING_COLUMN");
    assert_eq!(err["error"]["context"]["column"], "Page / Route");
}

#[test]
fn e2e_update_oversized_id_is_input_error() {
    let _log = common::test_log("e2e_update_oversized_id_is_input_error");
    let workspace = TsWorkspace::new();
    let original = format!(
        "{MASTER_HEADER}\nTASK-003,Ops,,Rotate keys\nTASK-18446744073709551615,Ops,,Hand edited\n"
    );
    workspace.write("master.csv", &original);

    let run = run_tasksheet(&workspace, ["update", "--file", "master.csv"], "update_big_id");
    assert_eq!(run.code(), Some(2));
    let err = run.error_json();
    assert_eq!(err["error"]["code"], "ID_OUT_OF_RANGE");
    assert_eq!(err["error"]["context"]["id"], "TASK-18446744073709551615");
    assert_eq!(workspace.read("master.csv"), original, "input is left untouched");
}

#[test]
fn e2e_update_malformed_roadmap() {
    let _log = common::test_log("e2e_update_malformed_roadmap");
    let workspace = TsWorkspace::new();
    workspace.write("master.csv", &format!("{MASTER_HEADER}\n"));
    workspace.write("roadmap.yaml", "tasks:\n  - feature: No description\n");

    let run = run_tasksheet(
        &workspace,
        ["update", "--file", "master.csv", "--roadmap", "roadmap.yaml"],
        "update_bad_roadmap",
    );
    assert_eq!(run.code(), Some(3));
    assert_eq!(run.error_json()["error"]["code"], "ROADMAP_ERROR");
}

#[test]
fn e2e_missing_explicit_config_is_config_error() {
    let _log = common::test_log("e2e_missing_explicit_config_is_config_error");
    let workspace = TsWorkspace::new();

    let run = run_tasksheet(
        &workspace,
        ["--config", "missing.yaml", "consolidate"],
        "missing_config",
    );
    assert_eq!(run.code(), Some(5));
    assert_eq!(run.error_json()["error"]["code"], "CONFIG_ERROR");
}

#[test]
fn e2e_output_onto_directory_keeps_temp_file() {
    let _log = common::test_log("e2e_output_onto_directory_keeps_temp_file");
    let workspace = TsWorkspace::new();
    workspace.write("tasks.csv", TASKS_CSV);
    workspace.write("out.csv/occupied", "x");

    let run = run_tasksheet(
        &workspace,
        ["consolidate", "--tasks", "tasks.csv", "--output", "out.csv"],
        "output_is_directory",
    );
    assert_eq!(run.code(), Some(4));
    let err = run.error_json();
    assert_eq!(err["error"]["code"], "OUTPUT_NOT_FINALIZED");
    assert!(workspace.exists("out.csv.tmp"));
    let hint = err["error"]["hint"].as_str().unwrap_or_default();
    assert!(predicate::str::contains("out.csv.tmp").eval(hint), "hint: {hint}");
}

#[test]
fn e2e_unknown_subcommand_fails() {
    let _log = common::test_log("e2e_unknown_subcommand_fails");
    let workspace = TsWorkspace::new();
    let run = run_tasksheet(&workspace, ["frobnicate"], "unknown_subcommand");
    assert!(!run.status.success());
    assert!(predicate::str::contains("unrecognized subcommand").eval(&run.stderr));
}
