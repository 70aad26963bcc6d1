//! Terminal presentation of a run

use std::io::Write;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::locale::{BRANDS, COUNTRIES, LANGUAGES};
use crate::model::{AdCopyResult, KeywordIdea, SearchResult};
use crate::report::RunReporter;

pub const KEYWORDS_HEADING: &str = "Top Keywords";
pub const SNIPPETS_HEADING: &str = "Google Search Results";
pub const AD_COPY_HEADING: &str = "Generated Ads";

fn header(columns: &[&str]) -> Vec<Cell> {
    columns
        .iter()
        .map(|c| Cell::new(c).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header(columns));
    table
}

pub fn keyword_table(keywords: &[KeywordIdea]) -> Table {
    let mut table = new_table(&["Keyword", "Avg Monthly Searches", "Competition"]);

    for keyword in keywords {
        table.add_row(vec![
            Cell::new(&keyword.text),
            Cell::new(keyword.avg_monthly_searches).set_alignment(CellAlignment::Right),
            Cell::new(keyword.competition),
        ]);
    }

    table
}

pub fn snippet_table(snippets: &[SearchResult]) -> Table {
    let mut table = new_table(&["Title", "Description"]);

    for snippet in snippets {
        table.add_row(vec![&snippet.title, &snippet.snippet]);
    }

    table
}

/// Catalog listing shown by `--list-options`
pub fn catalog_listing() -> String {
    let mut languages = new_table(&["Language", "hl", "Id"]);
    for language in LANGUAGES.iter() {
        languages.add_row(vec![language.name.to_string(), language.code.to_string(), language.id.to_string()]);
    }

    let mut countries = new_table(&["Country", "gl", "Geo Id"]);
    for country in COUNTRIES.iter() {
        countries.add_row(vec![country.name.to_string(), country.code.to_string(), country.geo_id.to_string()]);
    }

    let mut brands = new_table(&["Brand"]);
    for brand in BRANDS.iter() {
        brands.add_row(vec![*brand]);
    }

    format!("{languages}\n\n{countries}\n\n{brands}\n")
}

fn section(heading: &str, body: &str) -> String {
    format!("\n{}\n{}\n{}\n", heading, "=".repeat(heading.chars().count()), body)
}

/// Prints each section to stdout and errors to stderr
#[derive(Debug, Default)]
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    fn print(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
            log::warn!("Failed to write to stdout: {}", e);
        }
    }
}

impl RunReporter for TerminalReporter {
    fn top_keywords(&self, keywords: &[KeywordIdea]) {
        let body = if keywords.is_empty() {
            "No keyword ideas found.".to_string()
        } else {
            keyword_table(keywords).to_string()
        };
        self.print(&section(KEYWORDS_HEADING, &body));
    }

    fn snippets(&self, snippets: &[SearchResult]) {
        let body = if snippets.is_empty() {
            "No search results found.".to_string()
        } else {
            snippet_table(snippets).to_string()
        };
        self.print(&section(SNIPPETS_HEADING, &body));
    }

    fn ad_copy(&self, ad_copy: &AdCopyResult) {
        self.print(&section(AD_COPY_HEADING, &ad_copy.text));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", message);
    }
}
