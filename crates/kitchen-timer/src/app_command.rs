/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// List enabled timers in presentation order.
    List,
    /// Start the stored timer with this name or id, or a quick timer when
    /// nothing matches and the key reads as a duration.
    Start {
        /// Timer name, id or duration (`90`, `5:00`, `1:30:00`).
        key: String,
    },
}

impl AppCommand {
    /// Turn program arguments (without the program name) into commands.
    ///
    /// Every argument starts a timer; no arguments lists.
    pub fn from_args<I>(args: I) -> Vec<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let commands = args
            .into_iter()
            .map(|key| AppCommand::Start { key })
            .collect::<Vec<_>>();

        if commands.is_empty() {
            vec![AppCommand::List]
        } else {
            commands
        }
    }
}
