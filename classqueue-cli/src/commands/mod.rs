//! Command implementations for the classqueue CLI

pub mod guest;
pub mod page;
#[cfg(feature = "server")]
pub mod serve;

use clap::ValueEnum;

use crate::client::ClientError;
use crate::ui;

pub use guest::run_guest;
pub use page::run_page;
#[cfg(feature = "server")]
pub use serve::run_serve;

// ============================================================================
// Output Format (shared)
// ============================================================================

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// IDs only
    Quiet,
}

pub(crate) fn get_output_format(output: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        output
    }
}

/// How a failed API call is announced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureNotice {
    /// 4xx responses show the server's message, anything else the fallback
    ServerMessage,
    /// Always the fallback
    Generic,
}

pub(crate) fn failure_line(err: &ClientError, fallback: &str, notice: FailureNotice) -> String {
    match notice {
        FailureNotice::ServerMessage if err.is_client_error() => {
            format!("Error: {}", err.user_message())
        }
        _ => fallback.to_string(),
    }
}

/// Print the failure notification for an API call and turn it into an error.
pub(crate) fn report_failure(err: ClientError, fallback: &str, notice: FailureNotice) -> anyhow::Error {
    ui::notify_error(failure_line(&err, fallback, notice));
    anyhow::Error::new(err).context(fallback.to_string())
}

/// Tree-style list rendering shared by the human views
pub(crate) fn print_tree<T>(title: &str, empty: &str, items: &[T], mut row: impl FnMut(&T) -> Vec<String>) {
    println!("┌─ {}", title);
    println!("│");

    if items.is_empty() {
        println!("│  ({})", empty);
        return;
    }

    for (i, item) in items.iter().enumerate() {
        let is_last = i == items.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let cont_prefix = if is_last { "   " } else { "│  " };

        for (j, line) in row(item).iter().enumerate() {
            if j == 0 {
                println!("{} {}", prefix, line);
            } else {
                println!("{}{}", cont_prefix, line);
            }
        }

        if !is_last {
            println!("│");
        }
    }
}
