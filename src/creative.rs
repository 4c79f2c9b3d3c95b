//! Creative-message suggestions for low-CTR campaigns
//!
//! Headlines are assembled from the most frequent words of a campaign's
//! existing messages. All randomness comes from one seeded `StdRng`, so two
//! runs with the same seed and dataset produce identical suggestions.

use crate::dataset::{Dataset, Value};
use crate::schema::field;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_SUGGESTIONS: usize = 5;
const TOP_PHRASES: usize = 20;
const HEADLINE_POOL: usize = 10;
const HEADLINE_WORDS: usize = 3;
const SOURCE_EXAMPLES: usize = 5;
const FALLBACK_HEADLINE: &str = "Discover Comfort Today";
const CTAS: [&str; 5] = ["Shop Now", "Buy Today", "Limited Offer", "Get Yours", "Explore"];
const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Try a benefit-first headline.",
    "Add clear CTA such as 'Shop Now'.",
    "Highlight discount or free shipping.",
];
const PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ':', ';'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignCreatives {
    pub suggestions: Vec<String>,
    pub source_examples: Vec<String>,
}

/// Campaign name to its suggestions
pub type Creatives = BTreeMap<String, CampaignCreatives>;

/// Most frequent lower-cased words of `texts`, at most `top_k`
///
/// Surrounding `.,!?:;` is stripped and words of two characters or fewer are
/// dropped. Ties keep first-occurrence order.
pub fn extract_phrases<S: AsRef<str>>(texts: &[S], top_k: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut seen = 0usize;
    for text in texts {
        for word in text.as_ref().to_lowercase().split_whitespace() {
            let clean = word.trim_matches(&PUNCTUATION[..]);
            if clean.chars().count() <= 2 {
                continue;
            }
            let entry = counts.entry(clean.to_string()).or_insert((0, seen));
            entry.0 += 1;
            seen += 1;
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(top_k).map(|(w, _, _)| w).collect()
}

/// Upper-case the first letter of each alphabetic run, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

pub struct CreativeGenerator<'a> {
    dataset: &'a Dataset,
    rng: StdRng,
}

impl<'a> CreativeGenerator<'a> {
    pub fn new(dataset: &'a Dataset, seed: u64) -> Self {
        Self {
            dataset,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-empty creative messages of one campaign, in row order
    fn messages_for(&self, campaign: &str) -> Vec<String> {
        self.dataset
            .records()
            .filter(|record| record.get(field::CAMPAIGN_NAME) == Some(Value::Text(campaign)))
            .filter_map(|record| match record.get(field::CREATIVE_MESSAGE) {
                Some(Value::Text(message)) if !message.is_empty() => Some(message.to_string()),
                _ => None,
            })
            .collect()
    }

    fn headline(&mut self, phrases: &[String]) -> String {
        if phrases.len() < HEADLINE_WORDS {
            return FALLBACK_HEADLINE.to_string();
        }
        let pool = &phrases[..phrases.len().min(HEADLINE_POOL)];
        let words: Vec<&str> = pool
            .choose_multiple(&mut self.rng, HEADLINE_WORDS)
            .map(String::as_str)
            .collect();
        title_case(&words.join(" "))
    }

    fn cta(&mut self) -> &'static str {
        CTAS.choose(&mut self.rng).copied().unwrap_or(CTAS[0])
    }

    pub fn generate(&mut self, campaign: &str, n: usize) -> CampaignCreatives {
        let messages = self.messages_for(campaign);
        if messages.is_empty() {
            tracing::debug!("No creative messages for {}, using fallback", campaign);
            return CampaignCreatives {
                suggestions: FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
                source_examples: Vec::new(),
            };
        }

        let phrases = extract_phrases(&messages, TOP_PHRASES);
        let suggestions = (0..n)
            .map(|_| {
                let headline = self.headline(&phrases);
                let cta = self.cta();
                format!(
                    "{}. {}. Highlight key benefits like comfort, material, or value.",
                    headline, cta
                )
            })
            .collect();

        CampaignCreatives {
            suggestions,
            source_examples: messages.into_iter().take(SOURCE_EXAMPLES).collect(),
        }
    }

    pub fn generate_for_campaigns(&mut self, campaigns: &[String], n: usize) -> Creatives {
        let mut output = Creatives::new();
        for campaign in campaigns {
            if output.contains_key(campaign) {
                continue;
            }
            let creatives = self.generate(campaign, n);
            output.insert(campaign.clone(), creatives);
        }
        tracing::info!("Generated creatives for {} campaigns", output.len());
        output
    }
}
