mod commands;
mod config;
mod inat;
mod rank;
mod record;
mod util;

use crate::commands::Data;
use crate::config::Config;
use crate::inat::InatClient;
use log::info;
use poise::serenity_prelude as serenity;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let config = Config::from_env()?;

    let options = poise::FrameworkOptions {
        commands: vec![commands::animal(), commands::taxonhelp(), commands::deer()],
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(config.command_prefix.clone()),
            mention_as_prefix: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .options(options)
        .setup(|_ctx, ready, _framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                Ok(Data {
                    inat: InatClient::new(),
                })
            })
        })
        .build();

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    client.start().await?;

    Ok(())
}
