// File: radiobot-core/src/services/discord/slashcommands/lastplayed.rs

use twilight_model::application::command::CommandType;
use twilight_model::application::interaction::application_command::{CommandData, CommandOptionValue};
use twilight_util::builder::command::{CommandBuilder, IntegerBuilder};

use radiobot_common::traits::api::Responder;
use crate::services::RadioCommands;
use crate::Error;

/// `num` is bounded by the history capacity so Discord rejects values the
/// history could never satisfy.
pub fn create_lastplayed_command(history_capacity: usize) -> CommandBuilder {
    let max = history_capacity.max(1) as i64;
    CommandBuilder::new("lastplayed", "Show the most recently played songs", CommandType::ChatInput).option(
        IntegerBuilder::new("num", format!("Number of songs to show (1-{max})"))
            .min_value(1)
            .max_value(max)
            .required(false),
    )
}

/// Value of the optional `num` option, if the user gave one.
pub fn requested_count(data: &CommandData) -> Option<i64> {
    data.options
        .iter()
        .find(|opt| opt.name == "num")
        .and_then(|opt| match opt.value {
            CommandOptionValue::Integer(n) => Some(n),
            _ => None,
        })
}

pub async fn handle_lastplayed_interaction(
    commands: &RadioCommands,
    data: &CommandData,
    responder: &dyn Responder,
) -> Result<(), Error> {
    commands.handle_lastplayed(requested_count(data), responder).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use twilight_model::application::command::CommandOptionValue as OptionBound;

    #[test]
    fn num_option_follows_history_capacity() {
        let cmd = create_lastplayed_command(20).build();
        let num = &cmd.options[0];
        assert_eq!(num.name, "num");
        assert_eq!(num.description, "Number of songs to show (1-20)");
        assert!(matches!(num.min_value, Some(OptionBound::Integer(1))));
        assert!(matches!(num.max_value, Some(OptionBound::Integer(20))));

        let default = create_lastplayed_command(50).build();
        assert_eq!(default.options[0].description, "Number of songs to show (1-50)");
    }
}
