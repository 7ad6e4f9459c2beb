//! Contact form command-line driver.
//!
//! # Responsibility
//! - Verify `contact_core` linkage (`version`).
//! - Push one message through the real controller and EmailJS sender (`send`).

use clap::{Parser, Subcommand};
use contact_core::{
    core_version, default_log_level, init_logging, ContactConfig, EmailJsSender, FormField,
    FormSubmissionController, SubmitOutcome,
};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "contact", about = "Landing page contact form driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the core crate version.
    Version,
    /// Validate and send one contact message using CONTACT_EMAILJS_* settings.
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        /// Absolute directory for rolling log files.
        #[arg(long)]
        log_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Version => {
            println!("contact_core version={}", core_version());
            ExitCode::SUCCESS
        }
        Command::Send {
            name,
            email,
            message,
            log_dir,
        } => {
            if let Some(log_dir) = log_dir {
                if let Err(err) = init_logging(default_log_level(), &log_dir) {
                    eprintln!("logging disabled: {err}");
                }
            }
            match send(name, email, message).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("{err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

async fn send(name: String, email: String, message: String) -> Result<(), String> {
    let config = ContactConfig::from_env().map_err(|err| err.to_string())?;
    let sender = EmailJsSender::new(config.emailjs).map_err(|err| err.to_string())?;
    let controller =
        FormSubmissionController::with_display_window(Arc::new(sender), config.success_display);

    controller.update_field(FormField::Name, name);
    controller.update_field(FormField::Email, email);
    controller.update_field(FormField::Message, message);

    let outcome = controller.submit().await;
    let status = controller.status();
    match outcome {
        SubmitOutcome::Sent => {
            if let Some(notice) = status.notice() {
                println!("{}", notice.text);
            }
            Ok(())
        }
        _ => Err(status
            .error_message()
            .unwrap_or("submission did not complete")
            .to_string()),
    }
}
