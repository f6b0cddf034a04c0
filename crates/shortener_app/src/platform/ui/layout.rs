use super::constants::*;
use super::render::ScreenCommand;

#[allow(clippy::vec_init_then_push)]
pub fn initial_commands() -> Vec<ScreenCommand> {
    let mut commands = Vec::new();

    commands.push(ScreenCommand::Line(WINDOW_TITLE.to_string()));
    commands.push(ScreenCommand::Line(WINDOW_SUBTITLE.to_string()));
    commands.push(ScreenCommand::Line(String::new()));
    commands.push(ScreenCommand::Line(INPUT_HINT.to_string()));
    commands.extend(help_commands());

    commands
}

pub fn help_commands() -> Vec<ScreenCommand> {
    let width = COMMANDS.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    COMMANDS
        .iter()
        .map(|(name, help)| ScreenCommand::Line(format!("  {name:<width$}  {help}")))
        .collect()
}
