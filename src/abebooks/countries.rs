//! Destination countries with their AbeBooks codes and conversion factors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported destination countries for shipping-rate lookups.
///
/// Each country carries the code the ShipRates endpoint expects and a fixed
/// conversion factor from US dollars to the local currency. The factor is a
/// startup-time constant, not a live exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    #[default]
    Hrv,
    Srb,
    Bih,
    Svn,
    Hun,
    Cze,
    Pol,
}

impl Country {
    /// Returns the country code used in the ShipRates query string.
    pub fn code(&self) -> &'static str {
        match self {
            Country::Hrv => "HRV",
            Country::Srb => "SRB",
            Country::Bih => "BIH",
            Country::Svn => "SVN",
            Country::Hun => "HUN",
            Country::Cze => "CZE",
            Country::Pol => "POL",
        }
    }

    /// Returns the display name used in rendered output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Country::Hrv => "Croatia",
            Country::Srb => "Serbia",
            Country::Bih => "Bosnia and Herzegovina",
            Country::Svn => "Slovenia",
            Country::Hun => "Hungary",
            Country::Cze => "Czech Republic",
            Country::Pol => "Poland",
        }
    }

    /// Returns the local currency label appended to converted totals.
    pub fn currency_label(&self) -> &'static str {
        match self {
            Country::Hrv => "KN",
            Country::Srb => "RSD",
            Country::Bih => "KM",
            Country::Svn => "EUR",
            Country::Hun => "Ft",
            Country::Cze => "Kč",
            Country::Pol => "zł",
        }
    }

    /// Returns the fixed US-dollar conversion factor for this country.
    pub fn conversion_factor(&self) -> f64 {
        match self {
            Country::Hrv => 6.68,
            Country::Srb => 101.2,
            Country::Bih => 1.76,
            Country::Svn => 0.92,
            Country::Hun => 281.5,
            Country::Cze => 24.6,
            Country::Pol => 3.77,
        }
    }

    /// Returns all supported countries.
    pub fn all() -> &'static [Country] {
        &[
            Country::Hrv,
            Country::Srb,
            Country::Bih,
            Country::Svn,
            Country::Hun,
            Country::Cze,
            Country::Pol,
        ]
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Country::Hrv => "hrv",
            Country::Srb => "srb",
            Country::Bih => "bih",
            Country::Svn => "svn",
            Country::Hun => "hun",
            Country::Cze => "cze",
            Country::Pol => "pol",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Country {
    type Err = CountryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hrv" | "hr" | "croatia" => Ok(Country::Hrv),
            "srb" | "rs" | "serbia" => Ok(Country::Srb),
            "bih" | "ba" | "bosnia" | "bosnia and herzegovina" => Ok(Country::Bih),
            "svn" | "si" | "slovenia" => Ok(Country::Svn),
            "hun" | "hu" | "hungary" => Ok(Country::Hun),
            "cze" | "cz" | "czech republic" | "czechia" => Ok(Country::Cze),
            "pol" | "pl" | "poland" => Ok(Country::Pol),
            _ => Err(CountryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CountryParseError(String);

impl fmt::Display for CountryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown country '{}'. Valid countries: hrv, srb, bih, svn, hun, cze, pol",
            self.0
        )
    }
}

impl std::error::Error for CountryParseError {}
