use serde::Deserialize;

/// A taxon record as returned by the iNaturalist `/v1/taxa` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Taxon {
    pub id: u64,
    pub name: String,
    pub preferred_common_name: Option<String>,
    pub rank: String,
    pub iconic_taxon_name: Option<String>,
}

impl Taxon {
    /// Preferred common name, falling back to the scientific name.
    pub fn display_name(&self) -> &str {
        self.preferred_common_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Observer {
    pub login: String,
}

/// A sighting record as returned by the iNaturalist `/v1/observations` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub id: u64,
    pub taxon: Option<Taxon>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    pub place_guess: Option<String>,
    pub user: Observer,
    pub observed_on_string: Option<String>,
}

impl Observation {
    /// URL of the first photo, swapped from the square thumbnail to the
    /// medium size the embed displays.
    pub fn medium_photo_url(&self) -> Option<String> {
        self.photos
            .first()
            .map(|photo| photo.url.replace("square", "medium"))
    }

    pub fn place(&self) -> &str {
        self.place_guess.as_deref().unwrap_or("Unknown location")
    }

    pub fn observed_on(&self) -> &str {
        self.observed_on_string.as_deref().unwrap_or("Unknown date")
    }

    /// Link back to the original observation page.
    pub fn permalink(&self) -> String {
        format!("https://www.inaturalist.org/observations/{}", self.id)
    }
}

#[derive(Debug, Deserialize)]
pub struct TaxaResponse {
    pub total_results: u64,
    pub results: Vec<Taxon>,
}

#[derive(Debug, Deserialize)]
pub struct ObservationsResponse {
    pub total_results: u64,
    pub results: Vec<Observation>,
}
