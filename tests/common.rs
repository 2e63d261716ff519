use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

// Shared by several test binaries; each uses a different subset.
#[allow(dead_code)]
pub struct TestContext {
    pub _temp_dir: TempDir,
    pub config_path: PathBuf,
    pub vault_dir: PathBuf,
    pub bin_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config").join("config.json");
        let vault_dir = temp_dir.path().join("vault");
        std::fs::create_dir_all(&vault_dir).expect("Failed to create vault dir");

        let bin_path = PathBuf::from(env!("CARGO_BIN_EXE_vaultknife"));

        Self {
            _temp_dir: temp_dir,
            config_path,
            vault_dir,
            bin_path,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(&self.bin_path);
        cmd.env("VAULTKNIFE_CONFIG", &self.config_path);
        cmd.env("VAULTKNIFE_VAULT", &self.vault_dir);
        cmd.env_remove("VAULTKNIFE_USE_RELAY");
        cmd.env_remove("VAULTKNIFE_CONFIG_FOLDER");
        cmd.env_remove("VAULTKNIFE_CORS_RELAY");
        cmd.env_remove("RUST_LOG");
        cmd.env("HOME", self._temp_dir.path());
        cmd.env("XDG_CONFIG_HOME", self._temp_dir.path().join("config"));
        cmd
    }

    pub fn write_note(&self, name: &str, content: &str) -> PathBuf {
        let path = self.vault_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write note");
        path
    }
}

#[allow(dead_code)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.status.success(),
            "Command unexpectedly succeeded\nstdout: {}\nstderr: {}",
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }
}
