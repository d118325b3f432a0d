use crate::types::{Company, Tender};

#[derive(Debug, thiserror::Error)]
pub enum TenderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Where a company's procurement tenders come from.
#[allow(async_fn_in_trait)]
pub trait TenderSource {
    async fn tenders_for(&self, company: &Company) -> Result<Vec<Tender>, TenderError>;
}

/// Placeholder source until the public procurement portal integration
/// lands. Always returns an empty list.
pub struct NullTenderSource;

impl TenderSource for NullTenderSource {
    async fn tenders_for(&self, _company: &Company) -> Result<Vec<Tender>, TenderError> {
        Ok(Vec::new())
    }
}
