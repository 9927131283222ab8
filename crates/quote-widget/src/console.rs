use quote_core::{OutputFormat, Quote, Severity};
use quote_sync::Notifier;

/// Prints notices for the terminal.
///
/// In JSON mode notices go to stderr so stdout stays machine-readable.
pub(crate) struct ConsoleNotifier {
    format: OutputFormat,
}

impl ConsoleNotifier {
    pub(crate) fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let line = match severity {
            Severity::Info | Severity::Success => message.to_string(),
            Severity::Warning => format!("warning: {message}"),
            Severity::Error => format!("error: {message}"),
        };
        match (&self.format, severity) {
            (OutputFormat::Text, Severity::Info | Severity::Success) => println!("{line}"),
            _ => eprintln!("{line}"),
        }
    }
}

pub(crate) fn print_quotes(quotes: &[&Quote], format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(quotes)?),
        OutputFormat::Text if quotes.is_empty() => {
            println!("No quotes available in this category.")
        }
        OutputFormat::Text => {
            for quote in quotes {
                println!("{quote}");
            }
        }
    }
    Ok(())
}
