//! presence.rs
//!
//! Shows the detected title as a "Listening to ..." activity on the bot user.

use async_trait::async_trait;
use tracing::debug;
use twilight_gateway::MessageSender;
use twilight_model::gateway::OpCode;
use twilight_model::gateway::payload::outgoing::update_presence::{UpdatePresence, UpdatePresencePayload};
use twilight_model::gateway::presence::{Activity, ActivityType, MinimalActivity, Status};

use radiobot_common::traits::api::StatusReporter;
use crate::Error;

#[derive(Clone)]
pub struct DiscordPresence {
    sender: MessageSender,
}

impl DiscordPresence {
    pub fn new(sender: MessageSender) -> Self {
        Self { sender }
    }
}

fn presence_payload(text: Option<String>) -> UpdatePresence {
    let activities: Vec<Activity> = text
        .map(|name| {
            Activity::from(MinimalActivity {
                kind: ActivityType::Listening,
                name,
                url: None,
            })
        })
        .into_iter()
        .collect();

    // UpdatePresence::new rejects an empty activity list
    UpdatePresence {
        d: UpdatePresencePayload {
            activities,
            afk: false,
            since: None,
            status: Status::Online,
        },
        op: OpCode::PresenceUpdate,
    }
}

#[async_trait]
impl StatusReporter for DiscordPresence {
    async fn notify_status(&self, text: Option<String>) -> Result<(), Error> {
        debug!("(DiscordPresence) activity => {:?}", text);
        self.sender
            .command(&presence_payload(text))
            .map_err(|e| Error::Platform(format!("Error updating presence: {e}")))
    }
}
