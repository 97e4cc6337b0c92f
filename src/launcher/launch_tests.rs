use std::io;
use std::sync::{Arc, Mutex};

use tracing_test::traced_test;

use super::config::LauncherConfig;
use super::core::{CommandRunner, Delivery, Launcher};
use super::error::LaunchError;
use super::request::LaunchRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Invocation {
    Run { program: String, args: Vec<String> },
    Spawn { program: String, args: Vec<String> },
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Succeeds,
    ExitsNonzero,
    FailsToStart,
}

/// Records every invocation and plays back scripted outcomes.
struct FakeRunner {
    remote: Outcome,
    standalone: Outcome,
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeRunner {
    fn new(remote: Outcome, standalone: Outcome) -> (Self, Arc<Mutex<Vec<Invocation>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let runner = FakeRunner {
            remote,
            standalone,
            calls: Arc::clone(&calls),
        };
        (runner, calls)
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<bool> {
        self.calls.lock().unwrap().push(Invocation::Run {
            program: program.to_string(),
            args: args.to_vec(),
        });
        match self.remote {
            Outcome::Succeeds => Ok(true),
            Outcome::ExitsNonzero => Ok(false),
            Outcome::FailsToStart => Err(io::Error::new(io::ErrorKind::NotFound, "no editor")),
        }
    }

    fn spawn(&self, program: &str, args: &[String]) -> io::Result<()> {
        self.calls.lock().unwrap().push(Invocation::Spawn {
            program: program.to_string(),
            args: args.to_vec(),
        });
        match self.standalone {
            Outcome::Succeeds | Outcome::ExitsNonzero => Ok(()),
            Outcome::FailsToStart => Err(io::Error::new(io::ErrorKind::NotFound, "no editor")),
        }
    }
}

fn with_server(server: &str) -> LauncherConfig {
    LauncherConfig::new("nvim", Some(server.to_string()))
}

fn without_server() -> LauncherConfig {
    LauncherConfig::new("nvim", None)
}

fn single_file() -> LaunchRequest {
    LaunchRequest::open_file_at("/a/b.cpp", 42, 7)
}

#[test]
fn test_remote_delivery_skips_spawn() {
    let (runner, calls) = FakeRunner::new(Outcome::Succeeds, Outcome::Succeeds);
    let launcher = Launcher::with_runner(with_server("/tmp/nvim.sock"), runner);

    let delivery = launcher.try_launch(&single_file()).unwrap();
    assert_eq!(delivery, Delivery::Remote);

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![Invocation::Run {
            program: "nvim".to_string(),
            args: vec![
                "--server".to_string(),
                "/tmp/nvim.sock".to_string(),
                "--remote".to_string(),
                "+42:7".to_string(),
                "/a/b.cpp".to_string(),
            ],
        }]
    );
}

#[test]
fn test_remote_attempted_before_spawn() {
    let (runner, calls) = FakeRunner::new(Outcome::ExitsNonzero, Outcome::Succeeds);
    let launcher = Launcher::with_runner(with_server("/tmp/nvim.sock"), runner);

    let delivery = launcher.try_launch(&single_file()).unwrap();
    assert_eq!(delivery, Delivery::Spawned);

    let calls = calls.lock().unwrap();
    assert!(matches!(calls[0], Invocation::Run { .. }));
    assert!(matches!(calls[1], Invocation::Spawn { .. }));
    assert_eq!(calls.len(), 2);
}

#[test]
fn test_unreachable_instance_falls_back_to_spawn() {
    let (runner, calls) = FakeRunner::new(Outcome::FailsToStart, Outcome::Succeeds);
    let launcher = Launcher::with_runner(with_server("127.0.0.1:6666"), runner);

    let delivery = launcher.try_launch(&single_file()).unwrap();
    assert_eq!(delivery, Delivery::Spawned);

    let calls = calls.lock().unwrap();
    assert_eq!(
        calls[1],
        Invocation::Spawn {
            program: "nvim".to_string(),
            args: vec!["+42:7".to_string(), "/a/b.cpp".to_string()],
        }
    );
}

#[test]
fn test_no_remote_attempt_without_server() {
    let (runner, calls) = FakeRunner::new(Outcome::Succeeds, Outcome::Succeeds);
    let launcher = Launcher::with_runner(without_server(), runner);

    let delivery = launcher.try_launch(&single_file()).unwrap();
    assert_eq!(delivery, Delivery::Spawned);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Invocation::Spawn { .. }));
}

#[test]
fn test_directory_spawn_uses_startup_command() {
    let (runner, calls) = FakeRunner::new(Outcome::Succeeds, Outcome::Succeeds);
    let launcher = Launcher::with_runner(without_server(), runner);

    assert!(launcher.open_directory("/proj/src"));

    let calls = calls.lock().unwrap();
    assert_eq!(
        calls[0],
        Invocation::Spawn {
            program: "nvim".to_string(),
            args: vec!["+Ex /proj/src".to_string()],
        }
    );
}

#[test]
fn test_save_all_uses_remote_send() {
    let (runner, calls) = FakeRunner::new(Outcome::Succeeds, Outcome::Succeeds);
    let launcher = Launcher::with_runner(with_server("/tmp/nvim.sock"), runner);

    assert!(launcher.save_all());

    let calls = calls.lock().unwrap();
    assert_eq!(
        calls[0],
        Invocation::Run {
            program: "nvim".to_string(),
            args: vec![
                "--server".to_string(),
                "/tmp/nvim.sock".to_string(),
                "--remote-send".to_string(),
                ":wa<CR>".to_string(),
            ],
        }
    );
}

#[test]
fn test_spawn_failure_is_terminal() {
    let (runner, _calls) = FakeRunner::new(Outcome::FailsToStart, Outcome::FailsToStart);
    let launcher = Launcher::with_runner(with_server("/tmp/nvim.sock"), runner);

    let result = launcher.try_launch(&single_file());
    assert!(matches!(
        result,
        Err(LaunchError::SpawnFailed { ref program, .. }) if program == "nvim"
    ));
}

#[test]
#[traced_test]
fn test_launch_reports_failure_as_false_and_logs() {
    let (runner, _calls) = FakeRunner::new(Outcome::Succeeds, Outcome::FailsToStart);
    let launcher = Launcher::with_runner(without_server(), runner);

    assert!(!launcher.launch(&single_file()));
    assert!(logs_contain("failed to open in Neovim"));
}

#[test]
fn test_empty_request_never_invokes_anything() {
    let (runner, calls) = FakeRunner::new(Outcome::Succeeds, Outcome::Succeeds);
    let launcher = Launcher::with_runner(with_server("/tmp/nvim.sock"), runner);

    let result = launcher.try_launch(&LaunchRequest::OpenFiles { paths: vec![] });
    assert!(matches!(result, Err(LaunchError::EmptyRequest)));
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_directory_exists_check() {
    let (runner, _calls) = FakeRunner::new(Outcome::Succeeds, Outcome::Succeeds);
    let launcher = Launcher::with_runner(without_server(), runner);

    let temp = tempfile::tempdir().unwrap();
    assert!(launcher.directory_exists(temp.path()));
    assert!(!launcher.directory_exists(temp.path().join("missing")));
}

#[test]
fn test_open_files_preserves_order() {
    let (runner, calls) = FakeRunner::new(Outcome::Succeeds, Outcome::Succeeds);
    let launcher = Launcher::with_runner(with_server("/tmp/nvim.sock"), runner);

    assert!(launcher.open_files(["/src/main.rs", "/src/lib.rs"]));

    let calls = calls.lock().unwrap();
    assert_eq!(
        calls[0],
        Invocation::Run {
            program: "nvim".to_string(),
            args: vec![
                "--server".to_string(),
                "/tmp/nvim.sock".to_string(),
                "--remote".to_string(),
                "/src/main.rs".to_string(),
                "/src/lib.rs".to_string(),
            ],
        }
    );
}
