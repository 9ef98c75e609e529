use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::Error;

/// Marketplace country, identified by its site code (`MLA`, `MLB`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Site {
    Argentina,
    Brazil,
    Colombia,
    CostaRica,
    Ecuador,
    Chile,
    Mexico,
    Uruguay,
    Venezuela,
    Panama,
    Peru,
    Portugal,
    DominicanRepublic,
}

impl Site {
    pub const ALL: [Site; 13] = [
        Site::Argentina,
        Site::Brazil,
        Site::Colombia,
        Site::CostaRica,
        Site::Ecuador,
        Site::Chile,
        Site::Mexico,
        Site::Uruguay,
        Site::Venezuela,
        Site::Panama,
        Site::Peru,
        Site::Portugal,
        Site::DominicanRepublic,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Site::Argentina => "MLA",
            Site::Brazil => "MLB",
            Site::Colombia => "MCO",
            Site::CostaRica => "MCR",
            Site::Ecuador => "MEC",
            Site::Chile => "MLC",
            Site::Mexico => "MLM",
            Site::Uruguay => "MLU",
            Site::Venezuela => "MLV",
            Site::Panama => "MPA",
            Site::Peru => "MPE",
            Site::Portugal => "MPT",
            Site::DominicanRepublic => "MRD",
        }
    }

    /// Base URL of the site's authorization host, without a trailing slash.
    pub fn auth_url(&self) -> &'static str {
        match self {
            Site::Argentina => "https://auth.mercadolibre.com.ar",
            Site::Brazil => "https://auth.mercadolivre.com.br",
            Site::Colombia => "https://auth.mercadolibre.com.co",
            Site::CostaRica => "https://auth.mercadolibre.com.cr",
            Site::Ecuador => "https://auth.mercadolibre.com.ec",
            Site::Chile => "https://auth.mercadolibre.cl",
            Site::Mexico => "https://auth.mercadolibre.com.mx",
            Site::Uruguay => "https://auth.mercadolibre.com.uy",
            Site::Venezuela => "https://auth.mercadolibre.com.ve",
            Site::Panama => "https://auth.mercadolibre.com.pa",
            Site::Peru => "https://auth.mercadolibre.com.pe",
            Site::Portugal => "https://auth.mercadolivre.pt",
            Site::DominicanRepublic => "https://auth.mercadolibre.com.do",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Site {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Site::ALL
            .into_iter()
            .find(|site| site.code() == code)
            .ok_or_else(|| Error::Config(format!("Unknown site code '{}'", s)))
    }
}

impl TryFrom<String> for Site {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
