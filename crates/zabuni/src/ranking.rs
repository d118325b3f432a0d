use std::fs;
use std::path::PathBuf;

use crate::types::Company;

#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("Failed to read ranking file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse ranking file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the ranked company list comes from.
pub trait RankingSource {
    fn top_companies(&self, count: usize) -> Result<Vec<Company>, RankingError>;
}

// TODO: replace with a live ranking feed once one is licensed; until then
// this table mirrors the NSE large caps by market capitalisation.
const SEED_RANKING: &[(&str, &str)] = &[
    ("Safaricom", "telecommunications"),
    ("Equity Group Holdings", "banking"),
    ("KCB Group", "banking"),
    ("East African Breweries", "beverages"),
    ("Co-operative Bank of Kenya", "banking"),
    ("Absa Bank Kenya", "banking"),
    ("Standard Chartered Kenya", "banking"),
    ("NCBA Group", "banking"),
    ("KenGen", "energy"),
    ("Kenya Power", "energy"),
    ("Britam Holdings", "insurance"),
    ("Jubilee Holdings", "insurance"),
    ("Bamburi Cement", "manufacturing"),
    ("BAT Kenya", "manufacturing"),
    ("Kenya Airways", "aviation"),
    ("Nation Media Group", "media"),
    ("Centum Investment", "investment"),
    ("TotalEnergies Marketing Kenya", "energy"),
    ("Carbacid Investments", "manufacturing"),
    ("Sameer Africa", "manufacturing"),
];

/// Built-in ranking table, used when no seed file is given.
pub struct StaticRanking;

impl RankingSource for StaticRanking {
    fn top_companies(&self, count: usize) -> Result<Vec<Company>, RankingError> {
        Ok(SEED_RANKING
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, (name, sector))| Company {
                rank: (i + 1) as u32,
                name: (*name).to_string(),
                sector: Some((*sector).to_string()),
                website: None,
            })
            .collect())
    }
}

/// Ranking loaded from a JSON file holding an array of companies.
pub struct FileRanking {
    path: PathBuf,
}

impl FileRanking {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RankingSource for FileRanking {
    fn top_companies(&self, count: usize) -> Result<Vec<Company>, RankingError> {
        let raw = fs::read_to_string(&self.path)?;
        let mut companies = parse_ranking(&raw)?;
        companies.truncate(count);
        Ok(companies)
    }
}

fn parse_ranking(raw: &str) -> Result<Vec<Company>, RankingError> {
    let mut companies: Vec<Company> = serde_json::from_str(raw)?;
    companies.sort_by_key(|company| company.rank);
    Ok(companies)
}
