//! Subprocess execution

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Whether the process reported success
    pub success: bool,
    /// Interleaved stdout and stderr
    pub output: Vec<u8>,
}

impl ProcessOutput {
    /// A successful run with the given output
    pub fn success(output: impl Into<Vec<u8>>) -> Self {
        Self {
            code: Some(0),
            success: true,
            output: output.into(),
        }
    }

    /// A failed run with the given exit code and output
    pub fn failure(code: i32, output: impl Into<Vec<u8>>) -> Self {
        Self {
            code: Some(code),
            success: false,
            output: output.into(),
        }
    }

    /// Output as text, replacing invalid UTF-8
    pub fn output_lossy(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

/// Runs an external program to completion
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args`, blocking until it exits
    ///
    /// A non-zero exit is reported through [`ProcessOutput`], not as an error.
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput>;
}

/// Runs real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        let (mut reader, writer) = io::pipe()?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);

        let mut child = command.spawn()?;
        // The command holds the write ends; drop them so the read sees EOF.
        drop(command);

        let mut output = Vec::new();
        reader.read_to_end(&mut output)?;
        let status = child.wait()?;

        Ok(ProcessOutput {
            code: status.code(),
            success: status.success(),
            output,
        })
    }
}

/// Closure-backed runner for tests
pub struct FnRunner<F> {
    run: F,
}

impl<F> FnRunner<F>
where
    F: Fn(&Path, &[String]) -> io::Result<ProcessOutput> + Send + Sync,
{
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<F> ProcessRunner for FnRunner<F>
where
    F: Fn(&Path, &[String]) -> io::Result<ProcessOutput> + Send + Sync,
{
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        (self.run)(program, args)
    }
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        (**self).run(program, args)
    }
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for Box<R> {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        (**self).run(program, args)
    }
}

/// Find an executable on `search_path`, or on `PATH` when none is given
pub fn find_executable(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    match search_path {
        Some(paths) => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            which::which_in(name, Some(paths), cwd).ok()
        }
        None => which::which(name).ok(),
    }
}

/// Render a command line for logs
pub(crate) fn display_command(program: &Path, args: &[String]) -> String {
    let mut parts = vec![program.display().to_string()];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}
