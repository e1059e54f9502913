use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tempfile::TempDir;

#[derive(Debug)]
pub struct TsRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
    pub duration: Duration,
    pub log_path: PathBuf,
}

impl TsRun {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse the structured error envelope written on stderr.
    pub fn error_json(&self) -> serde_json::Value {
        serde_json::from_str(extract_json_payload(&self.stderr).as_str())
            .unwrap_or_else(|e| panic!("stderr is not JSON ({e}): {}", self.stderr))
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(extract_json_payload(&self.stdout).as_str())
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }
}

/// A throwaway working directory for one CLI scenario.
pub struct TsWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub log_dir: PathBuf,
}

impl TsWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        let log_dir = root.join("logs");
        fs::create_dir_all(&log_dir).expect("log dir");
        Self {
            temp_dir,
            root,
            log_dir,
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir");
        }
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read output")
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }
}

impl Default for TsWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_tasksheet<I, S>(workspace: &TsWorkspace, args: I, label: &str) -> TsRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_tasksheet_with_env(
        workspace,
        args,
        std::iter::empty::<(String, String)>(),
        label,
    )
}

pub fn run_tasksheet_with_env<I, S, E, K, V>(
    workspace: &TsWorkspace,
    args: I,
    env_vars: E,
    label: &str,
) -> TsRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let trace_path = workspace.log_dir.join(format!("{label}.trace.jsonl"));

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tasksheet"));
    cmd.current_dir(&workspace.root);
    for key in [
        "TASKSHEET_TASKS",
        "TASKSHEET_TEST_MATRIX",
        "TASKSHEET_OUTPUT",
        "TASKSHEET_ROADMAP",
        "TASKSHEET_ENVIRONMENT",
        "TASKSHEET_DATE_FORMAT",
        "TASKSHEET_DATE",
    ] {
        cmd.env_remove(key);
    }
    cmd.args(args);
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "tasksheet=debug");
    cmd.env("RUST_BACKTRACE", "1");
    cmd.env("HOME", &workspace.root);
    cmd.env("TASKSHEET_LOG_FILE", &trace_path);
    cmd.envs(env_vars);

    let start = Instant::now();
    let output = cmd.output().expect("run tasksheet");
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let log_path = workspace.log_dir.join(format!("{label}.log"));
    let timestamp = SystemTime::now();
    let log_body = format!(
        "label: {label}\nstarted: {:?}\nduration: {:?}\nstatus: {}\nargs: {:?}\ncwd: {}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        timestamp,
        duration,
        output.status,
        cmd.get_args().collect::<Vec<_>>(),
        workspace.root.display(),
        stdout,
        stderr
    );
    fs::write(&log_path, log_body).expect("write log");

    TsRun {
        stdout,
        stderr,
        status: output.status,
        duration,
        log_path,
    }
}

pub fn extract_json_payload(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            return lines[idx..].join("\n").trim().to_string();
        }
    }
    text.trim().to_string()
}

/// Parse a CSV file written by the binary.
pub fn read_table(path: &Path) -> tasksheet::format::CsvTable {
    tasksheet::format::CsvTable::read(path).expect("parse output table")
}
