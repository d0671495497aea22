use cookdoc_core::CookdocError;
use std::path::Path;
use std::process::Command;

/// Run `program args...` and return its stdout, lossily decoded.
///
/// `envs` are set on top of the inherited environment.
pub(crate) fn run_capture(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    envs: &[(&str, &str)],
) -> Result<String, CookdocError> {
    let rendered = render_command(program, args);
    let mut command = Command::new(program);
    command.args(args).envs(envs.iter().copied());
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }
    tracing::debug!(command = %rendered, cwd = ?cwd, "running");

    let output = command.output().map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            CookdocError::NotInstalled {
                program: program.to_string(),
            }
        } else {
            CookdocError::CommandFailed {
                command: rendered.clone(),
                message: err.to_string(),
            }
        }
    })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            match output.status.code() {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_string(),
            }
        } else {
            stderr
        };
        Err(CookdocError::CommandFailed {
            command: rendered,
            message,
        })
    }
}

fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
