use crate::error::LstError;
use crate::schema::{find_column, REGION_CANDIDATES, REGION_NAME_CANDIDATES};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// A spatial unit (micro-region or municipality) of the boundary layer.
///
/// Only the identifier matters to detection; it is the join key between
/// per-region results and whatever draws the map.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Identifier shared with the readings (e.g. "Sertão do Pajeú")
    pub region_id: String,
    /// Human-readable name, when the boundary table carries one
    pub name: Option<String>,
}

impl Region {
    /// Parse the attribute table of a boundary layer into Regions.
    ///
    /// The id column is the first of [`REGION_CANDIDATES`] (or `id`) present
    /// in the header; the optional name column is the first of
    /// [`REGION_NAME_CANDIDATES`]. Rows with an empty id are skipped and
    /// repeated ids (several municipalities of one micro-region) are kept once.
    pub fn parse_region_csv(csv_object: &str) -> Result<Vec<Region>, LstError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

        let id_candidates: Vec<&str> = REGION_CANDIDATES.iter().copied().chain(["id"]).collect();
        let id_index =
            find_column(&headers, &id_candidates).ok_or_else(|| LstError::MissingColumn {
                region: "boundary table".to_string(),
                field: "region",
                available: headers.clone(),
            })?;
        let name_index = find_column(&headers, REGION_NAME_CANDIDATES);

        let mut region_list: Vec<Region> = Vec::new();
        for row in rdr.records() {
            let record = row?;
            let region_id = record.get(id_index).unwrap_or("").trim();
            if region_id.is_empty() || region_list.iter().any(|r| r.region_id == region_id) {
                continue;
            }
            let name = name_index
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from);
            region_list.push(Region {
                region_id: region_id.to_string(),
                name,
            });
        }
        log::info!("[HW] region: Parsed {} regions", region_list.len());
        Ok(region_list)
    }
}
