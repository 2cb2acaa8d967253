use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

fn runtime_main() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runtime_main"));
    cmd.env("RUST_LOG", "info");
    cmd.env("NO_COLOR", "1");
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd
}

fn run_to_completion(mut cmd: Command) -> (std::process::ExitStatus, String, String) {
    let mut child = cmd.spawn().expect("Failed to spawn runtime_main process");
    let mut stdout = child.stdout.take().expect("Failed to capture stdout");
    let mut stderr = child.stderr.take().expect("Failed to capture stderr");
    let stdout_handle = thread::spawn(move || {
        let mut s = String::new();
        stdout.read_to_string(&mut s).ok();
        s
    });
    let stderr_handle = thread::spawn(move || {
        let mut s = String::new();
        stderr.read_to_string(&mut s).ok();
        s
    });

    let timeout = Duration::from_secs(30);
    let status = match child.wait_timeout_secs(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            child.kill().expect("Failed to kill timed-out process");
            panic!("runtime_main process timed out after {:?}", timeout);
        }
        Err(e) => panic!("Failed to wait for runtime_main process: {}", e),
    };
    let out = stdout_handle.join().expect("Stdout reader thread panicked");
    let err = stderr_handle.join().expect("Stderr reader thread panicked");
    (status, out, err)
}

#[test]
fn test_runtime_main_runs_requested_episodes() {
    let mut cmd = runtime_main();
    cmd.args(["--episodes", "3", "--envs", "2", "--max-steps", "50", "--seed", "7"]);
    let (status, stdout, stderr) = run_to_completion(cmd);
    eprintln!("--- runtime_main STDOUT ---\n{stdout}\n--- runtime_main STDERR ---\n{stderr}");

    assert!(status.success(), "runtime_main exited with error: {:?}", status.code());
    assert_eq!(stdout.matches("episode finished").count(), 3);
    assert!(stdout.contains("run complete"));
}

#[test]
fn test_runtime_main_rejects_missing_config() {
    let mut cmd = runtime_main();
    cmd.args(["--config", "does/not/exist.json", "--episodes", "1"]);
    let (status, _stdout, stderr) = run_to_completion(cmd);
    assert!(!status.success());
    assert!(stderr.contains("does/not/exist.json"), "stderr: {stderr}");
}

// A helper trait and impl to use wait_timeout_secs (not in std Command on all Rust versions)
trait ChildExt {
    fn wait_timeout_secs(
        &mut self,
        duration: Duration,
    ) -> std::io::Result<Option<std::process::ExitStatus>>;
}

impl ChildExt for std::process::Child {
    fn wait_timeout_secs(
        &mut self,
        duration: Duration,
    ) -> std::io::Result<Option<std::process::ExitStatus>> {
        let start_time = std::time::Instant::now();
        loop {
            match self.try_wait()? {
                Some(status) => return Ok(Some(status)),
                None => {
                    if start_time.elapsed() > duration {
                        return Ok(None);
                    }
                    thread::sleep(Duration::from_millis(50));
                }
            }
        }
    }
}
