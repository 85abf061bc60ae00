//! Command-line front end.
//!
//! `main` parses arguments, handles the local commands through
//! [`run_local_command`], then hands everything else to
//! [`run_cli_command`] together with a connected [`Client`].
//!
//! ```ignore
//! use rollcall::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! let client = Client::connect(ClientConfig::from_env()).await?;
//! run_cli_command(&client, command).await?;
//! ```

pub mod args;
pub mod output;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, USAGE};
pub use version::{version_line, VERSION};

use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;
use std::path::Path;
use tracing::debug;

use crate::client::Client;
use crate::view_state::ViewState;

/// Print the output of a command that needs no backend.
///
/// Returns `false` for every other command.
pub fn run_local_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => println!("{}", version_line()),
        CliCommand::Help => println!("{}", USAGE),
        _ => return false,
    }
    true
}

/// Run one command against the backend.
pub async fn run_cli_command(client: &Client, command: CliCommand) -> Result<()> {
    if run_local_command(&command) {
        return Ok(());
    }
    debug!(?command, "Running command");
    match command {
        CliCommand::Version | CliCommand::Help => {}

        CliCommand::Login { name, id } => {
            let password = prompt_password()?;
            let result = published(client.auth_state().login(&name, &id, &password).await)?;
            println!(
                "{}",
                output::status(
                    output::OK,
                    &format!("Logged in as {} ({})", result.name, result.role)
                )
            );
        }
        CliCommand::Signup {
            name,
            email,
            id,
            role,
        } => {
            let password = prompt_password()?;
            let result = published(
                client
                    .auth_state()
                    .signup(&name, &email, &id, &password, role)
                    .await,
            )?;
            println!(
                "{}",
                output::status(
                    output::OK,
                    &format!("Account created for {} ({})", result.name, result.role)
                )
            );
        }
        CliCommand::Logout => {
            let session = client.session().snapshot();
            let password = prompt_password()?;
            let state = client
                .auth_state()
                .logout(&session.display_name, &session.user_id, &password)
                .await;
            println!("{}", logout_report(state)?);
        }
        CliCommand::WhoAmI => {
            println!("{}", output::session(client.session().read().as_ref()));
        }

        CliCommand::Dashboard => {
            require_login(client)?;
            let classes = published(client.dashboard_state().refresh().await)?;
            println!("{}", output::classes(&classes));
        }
        CliCommand::History { class_id } => {
            require_login(client)?;
            let history =
                published(client.attendance_state().load_class_history(&class_id).await)?;
            println!("{}", output::class_history(&history));
        }
        CliCommand::MyHistory { class_id } => {
            require_login(client)?;
            let history =
                published(client.attendance_state().load_student_history(&class_id).await)?;
            println!("{}", output::student_history(&history));
        }
        CliCommand::Scan { class_id, qr_token } => {
            require_login(client)?;
            let result =
                published(client.attendance_state().submit_scan(&qr_token, &class_id).await)?;
            println!("{}", output::scan(&result));
        }

        CliCommand::CreateClass {
            name,
            section,
            days,
        } => {
            require_login(client)?;
            let class =
                published(client.teacher_state().create_class(&name, &section, &days).await)?;
            println!("{}", output::class_detail("CLASS CREATED", &class));
        }
        CliCommand::AddStudent { class_id, name, id } => {
            require_login(client)?;
            let class =
                published(client.teacher_state().add_student(&class_id, &name, &id).await)?;
            println!("{}", output::class_detail("STUDENT ADDED", &class));
        }
        CliCommand::Qr { class_id, out } => {
            require_login(client)?;
            let qr = published(client.teacher_state().generate_qr(&class_id).await)?;
            let saved_to = match out {
                Some(path) => {
                    write_qr_image(&qr, &path).await?;
                    Some(path.display().to_string())
                }
                None => None,
            };
            println!(
                "{}",
                output::qr(&qr, chrono::Utc::now(), saved_to.as_deref())
            );
        }
    }
    Ok(())
}

/// Turn a published snapshot into the data or a report-ready error.
fn published<T>(state: ViewState<T>) -> Result<T> {
    match (state.data, state.error) {
        (Some(data), _) => Ok(data),
        (None, Some(error)) => Err(eyre!(error)),
        (None, None) => Err(eyre!("no result was published")),
    }
}

/// The local session is gone either way; a rejected remote logout still
/// fails the command.
fn logout_report(state: ViewState<String>) -> Result<String> {
    match state.error {
        Some(error) => Err(eyre!(
            "{} Logged out locally, but the server rejected the logout: {}",
            output::FAIL,
            error
        )),
        None => Ok(output::status(
            output::OK,
            state.data.as_deref().unwrap_or("Logged out"),
        )),
    }
}

fn require_login(client: &Client) -> Result<()> {
    if !client.session().is_authenticated() {
        bail!("Not logged in. Run `rollcall login <name> <id>` first.");
    }
    Ok(())
}

fn prompt_password() -> Result<String> {
    rpassword::prompt_password("Password: ").wrap_err("failed to read password")
}

async fn write_qr_image(qr: &crate::models::QrIssuance, path: &Path) -> Result<()> {
    let bytes = qr
        .decode_image()
        .wrap_err("server sent an undecodable QR image")?;
    tokio::fs::write(path, bytes)
        .await
        .wrap_err_with(|| format!("failed to write {}", path.display()))
}
