use crate::rank;
use crate::record::{Observation, ObservationsResponse, TaxaResponse, Taxon};
use log::{error, warn};
use reqwest::Client;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.inaturalist.org/v1";

/// Iconic groups dropped from taxa searches; anything else (including a
/// missing iconic taxon) counts as an animal result.
const EXCLUDED_ICONIC_TAXA: [&str; 4] = ["Plantae", "Fungi", "Chromista", "Protozoa"];

/// Client for the iNaturalist v1 API. One instance is shared across all
/// command invocations; each call is a single round trip with no retry.
pub struct InatClient {
    client: Client,
    base_url: String,
}

impl InatClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("bleatbot (Discord wildlife sighting bot)")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Searches for taxa matching the given animal name.
    ///
    /// Returns the filtered animal results, or an empty list when nothing
    /// matched or the request failed. Callers cannot tell "no matches"
    /// from a transport failure; the failure is logged here.
    pub async fn search_taxa(&self, animal_name: &str, limit: usize) -> Vec<Taxon> {
        let url = format!("{}/taxa", self.base_url);
        let limit_param = limit.to_string();

        // From https://api.inaturalist.org/v1/docs/
        let params = [
            ("q", animal_name),
            ("per_page", limit_param.as_str()),
            ("is_active", "true"),
            ("iconic_taxa", "Animalia"),
        ];

        let response = match self.client.get(&url).query(&params).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Taxa search failed: {}", e);
                return Vec::new();
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warn!("Taxa search failed: {}", e);
                return Vec::new();
            }
        };

        let data: TaxaResponse = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                warn!("Taxa search returned a malformed body: {}", e);
                return Vec::new();
            }
        };

        if data.total_results == 0 {
            return Vec::new();
        }

        filter_animal_taxa(data.results, limit)
    }

    /// Resolves a free-text animal name to the best-matching taxon id,
    /// or `None` when the search comes back empty.
    pub async fn find_best_taxon_id(&self, animal_name: &str) -> Option<u64> {
        let candidates = self.search_taxa(animal_name, 20).await;
        rank::find_best_match(&candidates, animal_name).map(|taxon| taxon.id)
    }

    /// Gets a random research-grade observation for a given taxon.
    ///
    /// The API returns a randomly ordered page of up to 100 results and
    /// one is picked uniformly from that page. `None` means no qualifying
    /// sighting exists (or the request failed, which is logged).
    pub async fn random_observation(
        &self,
        taxon_id: u64,
        photo_required: bool,
    ) -> Option<Observation> {
        let url = format!("{}/observations", self.base_url);
        let taxon_param = taxon_id.to_string();

        let params = [
            ("taxon_id", taxon_param.as_str()),
            ("photos", if photo_required { "true" } else { "false" }),
            ("quality_grade", "research"),
            ("per_page", "100"),
            ("order_by", "random"),
        ];

        let response = match self.client.get(&url).query(&params).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("API request failed: {}", e);
                return None;
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                error!("API request failed: {}", e);
                return None;
            }
        };

        let data: ObservationsResponse = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                error!("Observations request returned a malformed body: {}", e);
                return None;
            }
        };

        if data.total_results == 0 {
            return None;
        }

        rank::choose_observation(&data.results, &mut rand::rng()).cloned()
    }
}

/// Drops excluded iconic groups and truncates to the requested page size.
/// Truncation guards against the filter ever growing the list.
pub fn filter_animal_taxa(results: Vec<Taxon>, limit: usize) -> Vec<Taxon> {
    let mut animals: Vec<Taxon> = results
        .into_iter()
        .filter(|taxon| {
            let iconic = taxon.iconic_taxon_name.as_deref().unwrap_or("");
            !EXCLUDED_ICONIC_TAXA.contains(&iconic)
        })
        .collect();

    animals.truncate(limit);
    animals
}
