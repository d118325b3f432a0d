use crate::types::{CompanyRecord, ContactChannel};

#[derive(Debug, Default)]
pub struct RecordFilter {
    pub require: Option<ContactChannel>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl RecordFilter {
    pub fn apply(self, mut records: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
        if let Some(channel) = self.require {
            records.retain(|record| {
                record.contacts.as_ref().is_some_and(|contacts| match channel {
                    ContactChannel::Email => !contacts.emails.is_empty(),
                    ContactChannel::Phone => !contacts.phones.is_empty(),
                })
            });
        }
        if let Some(off) = self.offset {
            records = records.into_iter().skip(off).collect();
        }
        if let Some(lim) = self.limit {
            records.truncate(lim);
        }
        records
    }

    pub fn validate(self) -> Result<Self, String> {
        if self.offset.is_some_and(|o| o == 0) {
            return Err("Offset must be greater than 0".to_string());
        }
        if self.limit.is_some_and(|l| l == 0) {
            return Err("Limit must be greater than 0".to_string());
        }
        Ok(self)
    }
}

#[derive(Debug)]
pub struct RecordStats {
    pub with_email: usize,
    pub with_phone: usize,
    pub with_tenders: usize,
    pub total: usize,
}

impl RecordStats {
    pub fn from_records(records: &[CompanyRecord]) -> RecordStats {
        let has = |record: &CompanyRecord, channel: ContactChannel| {
            record.contacts.as_ref().is_some_and(|c| match channel {
                ContactChannel::Email => !c.emails.is_empty(),
                ContactChannel::Phone => !c.phones.is_empty(),
            })
        };
        RecordStats {
            with_email: records
                .iter()
                .filter(|r| has(r, ContactChannel::Email))
                .count(),
            with_phone: records
                .iter()
                .filter(|r| has(r, ContactChannel::Phone))
                .count(),
            with_tenders: records.iter().filter(|r| !r.tenders.is_empty()).count(),
            total: records.len(),
        }
    }
}

impl std::fmt::Display for RecordStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  With email:   {}", self.with_email)?;
        writeln!(f, "  With phone:   {}", self.with_phone)?;
        writeln!(f, "  With tenders: {}", self.with_tenders)?;
        writeln!(f, "  Total:        {}", self.total)
    }
}
