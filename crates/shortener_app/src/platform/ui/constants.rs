pub const WINDOW_TITLE: &str = "URL Shortener";
pub const WINDOW_SUBTITLE: &str = "Shorten links quickly with is.gd";
pub const INPUT_HINT: &str = "Type or paste a URL and press Enter to shorten it.";
pub const READY_LABEL: &str = "Ready";

pub const CMD_COPY: &str = ":copy";
pub const CMD_MAIL: &str = ":mail";
pub const CMD_OPEN: &str = ":open";
pub const CMD_SHARE: &str = ":share";
pub const CMD_CLEAR: &str = ":clear";
pub const CMD_HELP: &str = ":help";
pub const CMD_QUIT: &str = ":quit";

/// Command keywords and their help text, in display order.
pub const COMMANDS: [(&str, &str); 7] = [
    (CMD_COPY, "Copy the short URL to the clipboard"),
    (CMD_MAIL, "Compose an email containing the short URL"),
    (CMD_OPEN, "Open the short URL in the browser"),
    (CMD_SHARE, "Share the short URL"),
    (CMD_CLEAR, "Clear input, result and status"),
    (CMD_HELP, "Show this help"),
    (CMD_QUIT, "Exit"),
];
