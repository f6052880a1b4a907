/// A chat message interpreted as a bot command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    /// `/name <title words>`; `None` when the argument is missing
    Name(Option<String>),
    /// `/product <ingredient>, <ingredient>, ...`
    Product(Option<String>),
    /// A bare number picking an entry from the last result list
    Select(usize),
    Unknown,
}

impl BotCommand {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
            // Numbers too large for usize cannot name a list entry anyway
            return text
                .parse()
                .map(BotCommand::Select)
                .unwrap_or(BotCommand::Select(usize::MAX));
        }

        let Some(rest) = text.strip_prefix('/') else {
            return BotCommand::Unknown;
        };

        let (command, argument) = match rest.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (rest, ""),
        };
        // Messengers may address a command to a specific bot: /name@cook_bot
        let command = command.split('@').next().unwrap_or_default();
        let argument = (!argument.is_empty()).then(|| argument.to_string());

        match command {
            "start" => BotCommand::Start,
            "help" => BotCommand::Help,
            "name" => BotCommand::Name(argument),
            "product" => BotCommand::Product(argument),
            _ => BotCommand::Unknown,
        }
    }
}
