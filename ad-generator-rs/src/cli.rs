//! Command line arguments and the configuration they select

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use log::{debug, info, warn};

use ads_tool_sdk::config::{CompositeConfigProvider, EnvConfigProvider, TomlConfigProvider, ENV_PREFIX};
use ads_tool_sdk::{ConfigProvider, ConfigProviderExt};

use crate::locale::{self, Country, Language, DEFAULT_BRAND, DEFAULT_COUNTRY, DEFAULT_LANGUAGE};
use crate::model::{parse_seed_keywords, RunParams};
use crate::pipeline::KeywordFailurePolicy;

/// Secrets files picked up when `--secrets` is not given
pub const DEFAULT_SECRETS_FILES: [&str; 2] = [".streamlit/secrets.toml", "secrets.toml"];

/// Generate Google Ads copy from keyword research and search results
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Seed keywords, comma-separated
    #[arg(short, long, default_value = "vakantiehuis")]
    pub keywords: String,

    /// Target language
    #[arg(short, long, default_value = DEFAULT_LANGUAGE, value_parser = parse_language)]
    pub language: Language,

    /// Target country
    #[arg(short, long, default_value = DEFAULT_COUNTRY, value_parser = parse_country)]
    pub country: Country,

    /// Brand to feature in the copy
    #[arg(short, long, default_value = DEFAULT_BRAND, value_parser = parse_brand)]
    pub brand: String,

    /// Number of headlines to generate
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(5..=25))]
    pub headlines: u32,

    /// Number of descriptions to generate
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(2..=10))]
    pub descriptions: u32,

    /// Google Ads customer id (defaults to the `customer_id` or `login_customer_id` secret)
    #[arg(long)]
    pub customer_id: Option<String>,

    /// TOML secrets file
    #[arg(long, env = "ADGEN_SECRETS")]
    pub secrets: Option<PathBuf>,

    /// Stop when keyword research is rejected instead of continuing without keywords
    #[arg(long, default_value_t = false)]
    pub abort_on_keyword_error: bool,

    /// List the available languages, countries and brands
    #[arg(long, default_value_t = false)]
    pub list_options: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn parse_language(value: &str) -> Result<Language, String> {
    locale::find_language(value).ok_or_else(|| {
        let names: Vec<&str> = locale::LANGUAGES.iter().map(|l| l.name).collect();
        format!("unknown language {:?}, expected one of: {}", value, names.join(", "))
    })
}

fn parse_country(value: &str) -> Result<Country, String> {
    locale::find_country(value).ok_or_else(|| {
        let names: Vec<&str> = locale::COUNTRIES.iter().map(|c| c.name).collect();
        format!("unknown country {:?}, expected one of: {}", value, names.join(", "))
    })
}

fn parse_brand(value: &str) -> Result<String, String> {
    locale::find_brand(value)
        .map(str::to_string)
        .ok_or_else(|| format!("unknown brand {:?}, expected one of: {}", value, locale::BRANDS.join(", ")))
}

impl Args {
    pub fn keyword_failure_policy(&self) -> KeywordFailurePolicy {
        if self.abort_on_keyword_error {
            KeywordFailurePolicy::Abort
        } else {
            KeywordFailurePolicy::Continue
        }
    }

    /// Secrets file to load: the explicit one, else the first default that exists
    pub fn secrets_file(&self) -> Option<PathBuf> {
        self.secrets.clone().or_else(|| {
            DEFAULT_SECRETS_FILES
                .iter()
                .map(PathBuf::from)
                .find(|p| p.is_file())
        })
    }

    /// Secrets file first, then `ADGEN_*` environment variables
    pub fn config_provider(&self) -> anyhow::Result<CompositeConfigProvider> {
        build_provider(self.secrets_file().as_deref())
    }

    /// Validated run parameters
    pub fn run_params(&self, provider: &dyn ConfigProvider) -> anyhow::Result<RunParams> {
        let seed_keywords = parse_seed_keywords(&self.keywords);
        if seed_keywords.is_empty() {
            bail!("at least one seed keyword is required");
        }

        Ok(RunParams {
            seed_keywords,
            language: self.language,
            country: self.country,
            brand: self.brand.clone(),
            headline_count: self.headlines,
            description_count: self.descriptions,
            customer_id: resolve_customer_id(self.customer_id.as_deref(), provider).unwrap_or_else(|| {
                warn!("No Google Ads customer id configured, keyword research will fail");
                String::new()
            }),
        })
    }
}

pub fn build_provider(secrets_file: Option<&Path>) -> anyhow::Result<CompositeConfigProvider> {
    let mut provider = CompositeConfigProvider::new();

    if let Some(path) = secrets_file {
        let secrets = TomlConfigProvider::from_file(path)
            .with_context(|| format!("failed to load secrets from {}", path.display()))?;
        info!("Loaded {} secrets from {}", secrets.len(), path.display());
        provider.add_provider(secrets);
    } else {
        debug!("No secrets file, using environment variables only");
    }

    provider.add_provider(EnvConfigProvider::new().with_prefix(ENV_PREFIX));
    Ok(provider)
}

/// Customer id from the flag, else the `customer_id` key, else `login_customer_id`
pub fn resolve_customer_id(flag: Option<&str>, provider: &dyn ConfigProvider) -> Option<String> {
    flag.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| provider.get_optional("customer_id"))
        .or_else(|| provider.get_optional("login_customer_id"))
}
