use crate::inat::InatClient;
use crate::record::Observation;
use crate::util::{capitalize, title_case};
use poise::serenity_prelude as serenity;

/// iNaturalist brand colour, used for every embed.
const EMBED_COLOUR: u32 = 0x74AC00;

pub struct Data {
    pub inat: InatClient,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Sends a random wildlife sighting photo of any animal.
///
/// The embed includes common name, scientific name, location, date,
/// observer, and a link to the original iNaturalist page.
#[poise::command(prefix_command)]
pub async fn animal(
    ctx: Context<'_>,
    #[description = "The animal name to search for"]
    #[rest]
    animal_name: String,
) -> Result<(), Error> {
    ctx.say(format!("🔍 On it! Searching for {animal_name} sightings..."))
        .await?;

    let inat = &ctx.data().inat;
    let prefix = ctx.prefix();

    let Some(taxon_id) = inat.find_best_taxon_id(&animal_name).await else {
        ctx.say(format!(
            "Sorry, couldn't find any animal matching '{animal_name}' in the database. \
             Try {prefix}taxonhelp {animal_name} for suggestions."
        ))
        .await?;
        return Ok(());
    };

    let Some(observation) = inat.random_observation(taxon_id, true).await else {
        ctx.say(format!(
            "Sorry, couldn't find any {animal_name} observations. \
             Check your spelling or try {prefix}taxonhelp {animal_name}."
        ))
        .await?;
        return Ok(());
    };

    let embed = sighting_embed(&observation, &animal_name).footer(
        serenity::CreateEmbedFooter::new(format!(
            "Not the right animal? Try {prefix}taxonhelp {animal_name}"
        )),
    );

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Shows scientific names for a given animal's common name.
#[poise::command(prefix_command)]
pub async fn taxonhelp(
    ctx: Context<'_>,
    #[description = "The animal name to search for"]
    #[rest]
    animal_name: String,
) -> Result<(), Error> {
    ctx.say(format!("🔍 On it! Searching taxonomy for '{animal_name}'..."))
        .await?;

    let results = ctx.data().inat.search_taxa(&animal_name, 10).await;

    if results.is_empty() {
        ctx.say(format!(
            "No taxa found for '{animal_name}'. Try checking your spelling."
        ))
        .await?;
        return Ok(());
    }

    let prefix = ctx.prefix();
    let mut embed = serenity::CreateEmbed::new()
        .title(format!("🔬 Taxonomy Results for '{animal_name}'"))
        .description(
            "Here are the top matches. Try using one of these scientific names \
             for a more accurate search!",
        )
        .colour(EMBED_COLOUR);

    for taxon in &results {
        let common_name = taxon
            .preferred_common_name
            .as_deref()
            .unwrap_or("No common name");

        embed = embed.field(
            format!("{} ({})", common_name, capitalize(&taxon.rank)),
            format!(
                "Scientific: `{}`\nTry: `{}animal {}`",
                taxon.name, prefix, taxon.name
            ),
            false,
        );
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Sends a random deer sighting photo.
#[poise::command(prefix_command)]
pub async fn deer(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("🦌 Searching the forests for a deer...").await?;

    let inat = &ctx.data().inat;

    let Some(taxon_id) = inat.find_best_taxon_id("deer").await else {
        ctx.say("Sorry, I couldn't find any deer in the forest! Please try again later.")
            .await?;
        return Ok(());
    };

    let Some(observation) = inat.random_observation(taxon_id, true).await else {
        ctx.say("Sorry, I think the deer are really good at hiding. Try again later!")
            .await?;
        return Ok(());
    };

    let mut embed = serenity::CreateEmbed::new()
        .title("🦌 BLEAT!")
        .description(format!("Observed on {}", observation.observed_on()))
        .colour(EMBED_COLOUR)
        .url(observation.permalink())
        .field("Location", observation.place(), true)
        .field("Observer", observation.user.login.clone(), true);

    if let Some(photo_url) = observation.medium_photo_url() {
        embed = embed.image(photo_url);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Builds the sighting embed shared by the generic animal command. Falls
/// back to the searched name when the observation carries no taxon.
fn sighting_embed(observation: &Observation, animal_name: &str) -> serenity::CreateEmbed {
    let (species_name, common_name) = match &observation.taxon {
        Some(taxon) => (taxon.name.as_str(), taxon.display_name()),
        None => (animal_name, animal_name),
    };

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("🐾 Random {} Sighting", title_case(common_name)))
        .description(format!(
            "*{}*\nObserved on {}",
            species_name,
            observation.observed_on()
        ))
        .colour(EMBED_COLOUR)
        .url(observation.permalink())
        .field("Location", observation.place(), true)
        .field("Observer", observation.user.login.clone(), true);

    if let Some(photo_url) = observation.medium_photo_url() {
        embed = embed.image(photo_url);
    }

    embed
}
