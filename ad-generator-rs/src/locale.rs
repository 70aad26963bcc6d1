//! Language, country and brand catalogs offered to the user
//!
//! Ids are Google Ads criterion ids (`languageConstants/{id}`,
//! `geoTargetConstants/{id}`); codes are the `hl`/`gl` search hints.

use std::fmt;

/// A targetable language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    pub name: &'static str,
    /// `hl` code
    pub code: &'static str,
    pub id: u32,
}

/// A targetable country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Country {
    pub name: &'static str,
    /// `gl` code
    pub code: &'static str,
    pub geo_id: u32,
}

pub const LANGUAGES: [Language; 9] = [
    Language { name: "Dutch", code: "nl", id: 1010 },
    Language { name: "French", code: "fr", id: 1002 },
    Language { name: "Italian", code: "it", id: 1004 },
    Language { name: "Spanish", code: "es", id: 1003 },
    Language { name: "German", code: "de", id: 1001 },
    Language { name: "Danish", code: "da", id: 1009 },
    Language { name: "Norwegian", code: "no", id: 1013 },
    Language { name: "Swedish", code: "sv", id: 1015 },
    Language { name: "English", code: "en", id: 1000 },
];

pub const COUNTRIES: [Country; 10] = [
    Country { name: "Belgium", code: "BE", geo_id: 2056 },
    Country { name: "Netherlands", code: "NL", geo_id: 2528 },
    Country { name: "France", code: "FR", geo_id: 2250 },
    Country { name: "Italy", code: "IT", geo_id: 2380 },
    Country { name: "Spain", code: "ES", geo_id: 2724 },
    Country { name: "Germany", code: "DE", geo_id: 2276 },
    Country { name: "Denmark", code: "DK", geo_id: 2208 },
    Country { name: "Norway", code: "NO", geo_id: 2578 },
    Country { name: "Sweden", code: "SE", geo_id: 2752 },
    Country { name: "India", code: "IN", geo_id: 2356 },
];

pub const BRANDS: [&str; 5] = ["Belvilla", "DanCenter", "Danland", "OYO", "CheckMyGuest"];

pub const DEFAULT_LANGUAGE: &str = "Dutch";
pub const DEFAULT_COUNTRY: &str = "Belgium";
pub const DEFAULT_BRAND: &str = "Belvilla";

/// Find a language by name, case-insensitively
pub fn find_language(name: &str) -> Option<Language> {
    let name = name.trim();
    LANGUAGES.iter().copied().find(|l| l.name.eq_ignore_ascii_case(name))
}

/// Find a country by name, case-insensitively
pub fn find_country(name: &str) -> Option<Country> {
    let name = name.trim();
    COUNTRIES.iter().copied().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Canonical spelling of a brand, matched case-insensitively
pub fn find_brand(name: &str) -> Option<&'static str> {
    let name = name.trim();
    BRANDS.iter().copied().find(|b| b.eq_ignore_ascii_case(name))
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.code, self.id)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.code, self.geo_id)
    }
}
