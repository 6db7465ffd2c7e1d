use anyhow::Result;
use log::warn;
use rand::Rng;
use rstest::*;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::LazyLock;

const TEST_DATA_DIR: &str = "generated-test-data";

/* Stand-in for `python3 -m venv <dir>`. It looks at the manifests (any *.txt)
 * next to the environment directory to decide how to behave:
 *   novenv   -> creating the environment fails
 *   nopip    -> the environment has no pip
 *   fail:... -> pip prints the rest of the line to stderr and exits 1
 */
const FAKE_PYTHON: &str = r#"#!/bin/sh
[ "$1" = "-m" ] && [ "$2" = "venv" ] || exit 2
project="$(dirname "$3")"
if cat "$project"/*.txt 2>/dev/null | grep -q '^novenv'; then
    echo "Error: venv creation exploded" >&2
    exit 1
fi
mkdir -p "$3/bin"
echo "$$" > "$3/created-by"
if cat "$project"/*.txt 2>/dev/null | grep -q '^nopip'; then
    exit 0
fi
cat > "$3/bin/pip" <<'PIP'
#!/bin/sh
if grep -q '^fail:' "$3"; then
    sed -n 's/^fail://p' "$3" >&2
    exit 1
fi
echo "Successfully installed"
PIP
chmod +x "$3/bin/pip"
"#;

/* Written once per test binary so that no test forks while the script is
 * still open for writing. */
static FAKE_PYTHON_PATH: LazyLock<String> = LazyLock::new(|| {
    use std::os::unix::fs::PermissionsExt;

    let dir = Path::new(TEST_DATA_DIR)
        .join(format!("interpreter-{}-{}", std::process::id(), rid()));
    std::fs::create_dir_all(&dir).expect("Failed to create interpreter dir");
    let path = dir.join("python");
    std::fs::write(&path, FAKE_PYTHON).expect("Failed to write fake python");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to chmod fake python");
    path.canonicalize()
        .expect("Failed to canonicalize fake python")
        .to_string_lossy()
        .to_string()
});

pub fn rid() -> String {
    let mut rng = rand::rng();
    let rid: String = (0..10)
        .map(|_| rng.sample(rand::distr::Alphanumeric) as char)
        .collect();
    rid
}

pub struct WizardManager {
    pub name: String,
    pub dir: PathBuf,
    pub last_stdout: String,
    pub last_stderr: String,
    pub debug_mode: bool,
    pub wizard_bin: String,
    pub python: String,
    /* When set, --no-config, --python, --retry-delay-ms and --no-spinner are not added */
    pub no_default_options: bool,
    pub cwd: Option<PathBuf>,
}

impl WizardManager {
    pub fn new() -> Self {
        let name = format!("envwizard-test-{}", rid());
        let dir = Path::new(TEST_DATA_DIR).join(&name);

        #[allow(clippy::panic)]
        match std::fs::create_dir_all(&dir) {
            Ok(_) => (),
            Err(e) => {
                panic!("Failed to create {} dir: {}", TEST_DATA_DIR, e);
            }
        }

        Self {
            name,
            dir,
            last_stdout: String::new(),
            last_stderr: String::new(),
            debug_mode: false,
            wizard_bin: env!("CARGO_BIN_EXE_envwizard").to_string(),
            python: FAKE_PYTHON_PATH.clone(),
            no_default_options: false,
            cwd: None,
        }
    }

    /* When debug mode is on, the test data will not be cleaned up when the fixture is dropped */
    #[allow(dead_code)]
    pub fn set_debug_mode(&mut self, debug_mode: bool) {
        self.debug_mode = debug_mode;
    }

    /// Creates a project directory, with a requirements.txt when `manifest`
    /// is given, and returns its absolute path.
    #[allow(dead_code)]
    pub fn project(&self, name: &str, manifest: Option<&str>) -> PathBuf {
        let path = self.dir.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create project");
        if let Some(manifest) = manifest {
            std::fs::write(path.join("requirements.txt"), manifest)
                .expect("Failed to write requirements.txt");
        }
        path.canonicalize().expect("Failed to canonicalize project")
    }

    fn command(&self, args: &[&str], envs: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(&self.wizard_bin);
        if !self.no_default_options {
            let python_arg = format!("--python={}", self.python);
            cmd.args([
                "--no-config",
                "--no-spinner",
                "--retry-delay-ms=0",
                python_arg.as_str(),
            ]);
        }
        cmd.args(args);
        for (key, value) in envs {
            println!("Setting env var: {}={}", key, value);
            cmd.env(key, value);
        }
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        println!(
            "Running command: {} {}",
            cmd.get_program().to_string_lossy(),
            cmd.get_args()
                .map(|c| c.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
        cmd
    }

    fn finish(&mut self, output: Output) -> Result<Output> {
        self.last_stdout = String::from_utf8_lossy(&output.stdout).to_string();
        self.last_stderr = String::from_utf8_lossy(&output.stderr).to_string();

        match output.status.code() {
            Some(0) => Ok(output),
            Some(code) => Err(anyhow::anyhow!(
                "Command returned non-zero exit code: {}\nstdout: {}\nstderr: {}",
                code,
                self.last_stdout,
                self.last_stderr
            )),
            None => Err(anyhow::anyhow!(
                "Command did not return a valid exit code\nstdout: {}\nstderr: {}",
                self.last_stdout,
                self.last_stderr
            )),
        }
    }

    pub fn run(&mut self, args: &[&str]) -> Result<Output> {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(
        &mut self,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> Result<Output> {
        let mut cmd = self.command(args, envs);
        cmd.stdin(Stdio::null());
        let output = cmd
            .output()
            .map_err(|e| anyhow::anyhow!("Command failed: {:?}", e))?;
        self.finish(output)
    }

    #[allow(dead_code)]
    pub fn run_with_stdin(
        &mut self,
        args: &[&str],
        stdin_input: &str,
    ) -> Result<Output> {
        use std::io::Write;

        let mut cmd = self.command(args, &[]);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to spawn command: {:?}", e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(stdin_input.as_bytes()).map_err(|e| {
                anyhow::anyhow!("Failed to write to stdin: {:?}", e)
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            anyhow::anyhow!("Failed to wait for command: {:?}", e)
        })?;
        self.finish(output)
    }

    #[allow(dead_code)]
    pub fn pass(&mut self, args: &[&str]) -> bool {
        if self.run(args).is_ok() {
            return true;
        }
        println!("last_stderr: {}", self.last_stderr);
        println!("last_stdout: {}", self.last_stdout);
        false
    }

    #[allow(dead_code)]
    pub fn xfail(&mut self, args: &[&str]) -> bool {
        if self.run(args).is_err() {
            return true;
        }
        println!("last_stderr: {}", self.last_stderr);
        println!("last_stdout: {}", self.last_stdout);
        false
    }

    #[allow(dead_code)]
    pub fn epass(&mut self, args: &[&str], env_key: &str, env_value: &str) -> bool {
        if self.run_with_env(args, &[(env_key, env_value)]).is_ok() {
            return true;
        }
        println!("last_stderr: {}", self.last_stderr);
        println!("last_stdout: {}", self.last_stdout);
        false
    }

    #[allow(dead_code)]
    pub fn exfail(&mut self, args: &[&str], env_key: &str, env_value: &str) -> bool {
        if self.run_with_env(args, &[(env_key, env_value)]).is_err() {
            return true;
        }
        println!("last_stderr: {}", self.last_stderr);
        println!("last_stdout: {}", self.last_stdout);
        false
    }

    /// Number of failure lines in the last summary.
    #[allow(dead_code)]
    pub fn failure_lines(&self) -> Vec<String> {
        self.last_stdout
            .lines()
            .filter(|line| line.starts_with(" - "))
            .map(String::from)
            .collect()
    }
}

impl Drop for WizardManager {
    fn drop(&mut self) {
        if self.debug_mode {
            warn!("Debug mode is on, *NOT* cleaning up {}", self.dir.display());
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove {} dir: {}", self.dir.display(), e);
            }
        }
    }
}

#[fixture]
pub fn wizard() -> WizardManager {
    WizardManager::new()
}
