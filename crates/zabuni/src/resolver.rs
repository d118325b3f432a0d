use crate::types::Company;

/// Maps a company to its website when the ranking source does not
/// provide one.
pub trait WebsiteResolver {
    fn resolve(&self, company: &Company) -> Option<String>;
}

// Hand-maintained directory of known corporate domains. A proper
// resolver (registrar lookup, search API) has not been built yet.
const DOMAIN_DIRECTORY: &[(&str, &str)] = &[
    ("Safaricom", "https://www.safaricom.co.ke"),
    ("Equity Group Holdings", "https://equitygroupholdings.com"),
    ("KCB Group", "https://kcbgroup.com"),
    ("East African Breweries", "https://www.eabl.com"),
    ("Co-operative Bank of Kenya", "https://www.co-opbank.co.ke"),
    ("Absa Bank Kenya", "https://www.absabank.co.ke"),
    ("Standard Chartered Kenya", "https://www.sc.com/ke"),
    ("NCBA Group", "https://ke.ncbagroup.com"),
    ("KenGen", "https://www.kengen.co.ke"),
    ("Kenya Power", "https://www.kplc.co.ke"),
    ("Britam Holdings", "https://ke.britam.com"),
    ("Jubilee Holdings", "https://jubileeinsurance.com"),
    ("Bamburi Cement", "https://www.bamburicement.co.ke"),
    ("Kenya Airways", "https://www.kenya-airways.com"),
    ("Nation Media Group", "https://www.nationmedia.com"),
    ("Centum Investment", "https://centum.co.ke"),
];

/// Looks companies up in the built-in domain directory by name.
pub struct DirectoryResolver;

impl WebsiteResolver for DirectoryResolver {
    fn resolve(&self, company: &Company) -> Option<String> {
        DOMAIN_DIRECTORY
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&company.name))
            .map(|(_, website)| (*website).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(name: &str) -> Company {
        Company {
            rank: 1,
            name: name.to_string(),
            sector: None,
            website: None,
        }
    }

    #[test]
    fn test_resolves_known_company_case_insensitively() {
        let resolver = DirectoryResolver;

        assert_eq!(
            resolver.resolve(&company("Safaricom")).as_deref(),
            Some("https://www.safaricom.co.ke")
        );
        assert_eq!(
            resolver.resolve(&company("kcb group")).as_deref(),
            Some("https://kcbgroup.com")
        );
    }

    #[test]
    fn test_unknown_company_resolves_to_none() {
        let resolver = DirectoryResolver;
        assert!(resolver.resolve(&company("Mama Mboga Traders")).is_none());
    }
}
