use std::io::{self, Write};

use super::render::{ScreenCommand, Severity};

/// Writes `commands` to `out` and flushes.
pub fn execute(out: &mut impl Write, commands: &[ScreenCommand]) -> io::Result<()> {
    for command in commands {
        match command {
            ScreenCommand::Line(text) => writeln!(out, "{text}")?,
            ScreenCommand::Status { text, severity } => {
                let marker = match severity {
                    Severity::Information => '✓',
                    Severity::Error => '✗',
                };
                writeln!(out, "{marker} {text}")?;
            }
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines_carry_a_marker() {
        let mut out = Vec::new();
        execute(
            &mut out,
            &[
                ScreenCommand::Line("Ready".to_string()),
                ScreenCommand::Status {
                    text: "Copied to clipboard".to_string(),
                    severity: Severity::Information,
                },
                ScreenCommand::Status {
                    text: "network error".to_string(),
                    severity: Severity::Error,
                },
            ],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Ready\n✓ Copied to clipboard\n✗ network error\n"
        );
    }
}
