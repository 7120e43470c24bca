use super::{ExtractError, Extractor, UsedModules};
use crate::module_name::ModuleName;
use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;
use tracing::trace;
use wait_timeout::ChildExt;

fn report_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The backend reports loads in path form: perl(Foo/Bar.pm)
    RE.get_or_init(|| Regex::new(r"perl\(([^)\s]+)\)").expect("report line regex"))
}

/// The ground-truth strategy: hand the file to the interpreter's own
/// compile-and-report backend in a subprocess and read back what it would
/// load.
///
/// Slower than the light scan, but sees through anything the interpreter
/// itself would resolve. An unanalyzable file (syntax error, missing
/// interpreter, timeout) is a hard error for the whole run.
#[derive(Debug, Clone)]
pub struct HeavyExtractor {
    command: String,
    timeout: Duration,
}

impl HeavyExtractor {
    pub fn new(command: String, timeout_secs: u64) -> Self {
        Self {
            command,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Extractor for HeavyExtractor {
    fn extract(&self, file: &Path) -> Result<UsedModules, ExtractError> {
        let shown = file.display().to_string();
        let contents = std::fs::read_to_string(file).map_err(|source| ExtractError::Read {
            path: shown.clone(),
            source,
        })?;

        let mut command = Command::new(&self.command);
        if let Some(flag) = taint_flag(&contents) {
            command.arg(flag);
        }
        command
            .arg("-MO=PerlReq")
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|source| ExtractError::Spawn {
            command: self.command.clone(),
            path: shown.clone(),
            source,
        })?;

        let stdout_reader = drain_pipe(child.stdout.take());
        let stderr_reader = drain_pipe(child.stderr.take());

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                kill_quietly(&mut child);
                return Err(ExtractError::Timeout {
                    command: self.command.clone(),
                    path: shown,
                    seconds: self.timeout.as_secs(),
                });
            }
            Err(source) => {
                kill_quietly(&mut child);
                return Err(ExtractError::Spawn {
                    command: self.command.clone(),
                    path: shown,
                    source,
                });
            }
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();
        trace!("{}: backend exit {:?}", shown, status.code());

        let mut used = UsedModules::new();
        for cap in report_line_re().captures_iter(&stdout) {
            if let Some(name) = ModuleName::from_path_form(&cap[1]) {
                *used.entry(name).or_insert(0) += 1;
            }
        }

        // A clean run always reports at least the file's own pragmas; an
        // empty module list means the backend never got to compile it.
        if !status.success() || used.is_empty() {
            trace!("{}: backend stderr: {}", shown, stderr.trim());
            return Err(ExtractError::NoOutput { path: shown });
        }

        Ok(used)
    }
}

/// Pull an interpreter taint flag (`-T`/`-t`) out of the shebang line, so a
/// file that opts into taint checking is re-invoked the same way.
fn taint_flag(contents: &str) -> Option<&'static str> {
    let first = contents.lines().next()?;
    let args = first.strip_prefix("#!")?;
    for token in args.split_whitespace() {
        if let Some(flags) = token.strip_prefix('-') {
            if flags.contains('T') {
                return Some("-T");
            }
            if flags.contains('t') {
                return Some("-t");
            }
        }
    }
    None
}

/// Read a child pipe to the end on its own thread, so a chatty subprocess
/// cannot fill the pipe buffer and deadlock the timeout wait.
fn drain_pipe<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut output = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut output);
        }
        output
    })
}

fn kill_quietly(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
