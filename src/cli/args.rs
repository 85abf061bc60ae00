//! Command-line argument parsing for the rollcall CLI.
//!
//! Passwords are never taken from the command line; the runner prompts
//! for them.

use std::path::PathBuf;

use crate::auth::Role;

pub const USAGE: &str = "\
Usage: rollcall <command> [args]

Commands:
  login <name> <id>                         Log in (prompts for password)
  signup <name> <email> <id> [--teacher]    Create an account
  logout                                    Log out of the current session
  whoami                                    Show the current session
  dashboard                                 List your classes
  history <class-id>                        Class attendance history (teacher)
  my-history <class-id>                     Your attendance in a class
  scan <class-id> <qr-token>                Mark attendance with a scanned code
  create-class <name> <section> [days...]   Create a class (days: Mon Wed or Mon,Wed)
  add-student <class-id> <name> <id>        Add a student to a class
  qr <class-id> [--out <file.png>]          Generate an attendance QR code

Options:
  -V, --version    Print version
  -h, --help       Print this help

Environment:
  ROLLCALL_API_URL        Backend base URL
  ROLLCALL_SESSION_PATH   Session file location
  ROLLCALL_LOG            Log filter (default: warn)";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Version,
    Help,
    Login {
        name: String,
        id: String,
    },
    Signup {
        name: String,
        email: String,
        id: String,
        role: Role,
    },
    Logout,
    WhoAmI,
    Dashboard,
    History {
        class_id: String,
    },
    MyHistory {
        class_id: String,
    },
    Scan {
        class_id: String,
        qr_token: String,
    },
    CreateClass {
        name: String,
        section: String,
        days: Vec<String>,
    },
    AddStudent {
        class_id: String,
        name: String,
        id: String,
    },
    Qr {
        class_id: String,
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Parse command-line arguments (program name first).
///
/// # Examples
///
/// ```
/// use rollcall::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["rollcall".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let args: Vec<String> = args.skip(1).collect();

    if args.iter().any(|a| a == "--version" || a == "-V") {
        return Ok(CliCommand::Version);
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(CliCommand::Help);
    }

    let Some((command, rest)) = args.split_first() else {
        return Ok(CliCommand::Help);
    };

    match command.as_str() {
        "help" => Ok(CliCommand::Help),
        "login" => {
            let [name, id] = exactly(rest, "login", "<name> <id>")?;
            Ok(CliCommand::Login { name, id })
        }
        "signup" => {
            let teacher = rest.iter().any(|a| a == "--teacher");
            let positional: Vec<String> =
                rest.iter().filter(|a| *a != "--teacher").cloned().collect();
            let [name, email, id] = exactly(&positional, "signup", "<name> <email> <id>")?;
            Ok(CliCommand::Signup {
                name,
                email,
                id,
                role: if teacher { Role::Teacher } else { Role::Student },
            })
        }
        "logout" => no_args(rest).map(|_| CliCommand::Logout),
        "whoami" => no_args(rest).map(|_| CliCommand::WhoAmI),
        "dashboard" => no_args(rest).map(|_| CliCommand::Dashboard),
        "history" => {
            let [class_id] = exactly(rest, "history", "<class-id>")?;
            Ok(CliCommand::History { class_id })
        }
        "my-history" => {
            let [class_id] = exactly(rest, "my-history", "<class-id>")?;
            Ok(CliCommand::MyHistory { class_id })
        }
        "scan" => {
            let [class_id, qr_token] = exactly(rest, "scan", "<class-id> <qr-token>")?;
            Ok(CliCommand::Scan { class_id, qr_token })
        }
        "create-class" => {
            if rest.len() < 2 {
                return Err(ArgsError::MissingArgument {
                    command: "create-class",
                    expected: "<name> <section> [days...]",
                });
            }
            let days = rest[2..]
                .iter()
                .flat_map(|d| d.split(','))
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
            Ok(CliCommand::CreateClass {
                name: rest[0].clone(),
                section: rest[1].clone(),
                days,
            })
        }
        "add-student" => {
            let [class_id, name, id] = exactly(rest, "add-student", "<class-id> <name> <id>")?;
            Ok(CliCommand::AddStudent { class_id, name, id })
        }
        "qr" => parse_qr(rest),
        other => Err(ArgsError::UnknownCommand(other.to_string())),
    }
}

fn parse_qr(rest: &[String]) -> Result<CliCommand, ArgsError> {
    let missing = ArgsError::MissingArgument {
        command: "qr",
        expected: "<class-id> [--out <file.png>]",
    };
    let mut class_id = None;
    let mut out = None;
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--out" | "-o" => out = Some(PathBuf::from(iter.next().ok_or(missing.clone())?)),
            _ if class_id.is_none() => class_id = Some(arg.clone()),
            _ => return Err(ArgsError::UnexpectedArgument(arg.clone())),
        }
    }
    Ok(CliCommand::Qr {
        class_id: class_id.ok_or(missing)?,
        out,
    })
}

fn exactly<const N: usize>(
    rest: &[String],
    command: &'static str,
    expected: &'static str,
) -> Result<[String; N], ArgsError> {
    if rest.len() > N {
        return Err(ArgsError::UnexpectedArgument(rest[N].clone()));
    }
    <[String; N]>::try_from(rest.to_vec())
        .map_err(|_| ArgsError::MissingArgument { command, expected })
}

fn no_args(rest: &[String]) -> Result<(), ArgsError> {
    match rest.first() {
        Some(arg) => Err(ArgsError::UnexpectedArgument(arg.clone())),
        None => Ok(()),
    }
}
