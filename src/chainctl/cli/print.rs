use chainctl::api::{CmdMessage, MessageLevel};
use chainctl::error::Result;
use chainctl::presenters::{Renderer, TableRenderer};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

/// Renders `value` to stdout in the chosen format.
pub fn print_rendered<T: TableRenderer + Serialize>(renderer: Renderer, value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    renderer.render(value, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Prints messages to stdout, or to stderr when stdout carries JSON.
pub fn print_messages(messages: &[CmdMessage], renderer: Renderer) {
    for message in messages {
        let line = format_message(message);
        match renderer {
            Renderer::Table => println!("{}", line),
            Renderer::Json => eprintln!("{}", line),
        }
    }
}

fn format_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_survives_styling() {
        colored::control::set_override(false);
        let line = format_message(&CmdMessage::success("Chain devnet deleted"));
        assert_eq!(line, "Chain devnet deleted");
        let line = format_message(&CmdMessage::info("More chains available, use --page 2"));
        assert_eq!(line, "More chains available, use --page 2");
    }
}
