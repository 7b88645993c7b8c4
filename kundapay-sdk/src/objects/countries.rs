use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// All countries served by KundaPay, as ISO 3166 alpha-2 codes.
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Ga,
    Fr,
    Be,
    De,
    Cn,
    Us,
    Ca,
}

impl Country {
    pub const ALL: [Country; 7] = [
        Country::Ga,
        Country::Fr,
        Country::Be,
        Country::De,
        Country::Cn,
        Country::Us,
        Country::Ca,
    ];

    /// Two-letter code as stored in the fee table.
    pub fn code(self) -> &'static str {
        match self {
            Country::Ga => "GA",
            Country::Fr => "FR",
            Country::Be => "BE",
            Country::De => "DE",
            Country::Cn => "CN",
            Country::Us => "US",
            Country::Ca => "CA",
        }
    }

    /// Name used inside direction tokens such as `FRANCE_TO_GABON`.
    pub fn token_name(self) -> &'static str {
        match self {
            Country::Ga => "GABON",
            Country::Fr => "FRANCE",
            Country::Be => "BELGIUM",
            Country::De => "GERMANY",
            Country::Cn => "CHINA",
            Country::Us => "USA",
            Country::Ca => "CANADA",
        }
    }

    pub fn from_token_name(name: &str) -> Option<Country> {
        Country::ALL.into_iter().find(|c| c.token_name() == name)
    }

    /// Human-readable English name.
    pub fn display_name(self) -> &'static str {
        match self {
            Country::Ga => "Gabon",
            Country::Fr => "France",
            Country::Be => "Belgium",
            Country::De => "Germany",
            Country::Cn => "China",
            Country::Us => "United States",
            Country::Ca => "Canada",
        }
    }

    pub fn currency(self) -> Currency {
        match self {
            Country::Ga => Currency::Xaf,
            Country::Fr | Country::Be | Country::De => Currency::Eur,
            Country::Cn => Currency::Cny,
            Country::Us => Currency::Usd,
            Country::Ca => Currency::Cad,
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Currencies quoted by KundaPay (ISO 4217).
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Xaf,
    Eur,
    Cny,
    Usd,
    Cad,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Xaf => "XAF",
            Currency::Eur => "EUR",
            Currency::Cny => "CNY",
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
        }
    }

    /// Whether amounts in this currency are settled in multiples of 5 units
    /// instead of minor units. Only the CFA franc is.
    pub fn rounds_to_five(self) -> bool {
        matches!(self, Currency::Xaf)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_names_round_trip() {
        for country in Country::ALL {
            assert_eq!(Country::from_token_name(country.token_name()), Some(country));
        }
        assert_eq!(Country::from_token_name("MARS"), None);
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Country::Ga).unwrap(), r#""GA""#);
        assert_eq!(serde_json::to_string(&Currency::Xaf).unwrap(), r#""XAF""#);
        let c: Currency = serde_json::from_str(r#""EUR""#).unwrap();
        assert_eq!(c, Currency::Eur);
    }
}
