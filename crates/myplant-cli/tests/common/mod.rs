use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;

/// An isolated home directory with its own credential file.
pub struct Sandbox {
    pub home: tempfile::TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: tempfile::TempDir::new().unwrap(),
        }
    }

    pub fn credential_file(&self) -> PathBuf {
        self.home.path().join("data").join("credential")
    }

    /// Run the CLI against `base_url` with the keyring disabled.
    pub async fn run(&self, base_url: &str, args: &[&str]) -> Output {
        run_cli_with_env(args, self.home.path(), base_url, &self.credential_file()).await
    }

    /// Run the CLI and expect success, returning stdout.
    pub async fn run_success(&self, base_url: &str, args: &[&str]) -> String {
        let output = self.run(base_url, args).await;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

/// Run the CLI binary with a custom HOME for isolated session storage.
pub async fn run_cli_with_env(
    args: &[&str],
    home: &Path,
    base_url: &str,
    credential_file: &Path,
) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_myplant"));
    cmd.args(args);
    cmd.current_dir(home);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("xdg"));
    cmd.env("MYPLANT_API_URL", base_url);
    cmd.env("MYPLANT_CREDENTIAL_FILE", credential_file);
    cmd.env("MYPLANT_NO_KEYRING", "true");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("MYPLANT_USERNAME");
    cmd.env_remove("MYPLANT_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().await.expect("Failed to execute CLI")
}
