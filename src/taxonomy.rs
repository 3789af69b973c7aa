//! Keyword taxonomy and geographic marker lists.
//!
//! The taxonomy is plain data: one keyword list per [`Category`], plus the
//! marker lists the scorer and categorizer use to decide whether an article is
//! about Austria at all. It is built once (from defaults or from config) and
//! then shared read-only by the scorer and the categorizer.
//!
//! Keywords match as lowercase substrings. Exclusion tokens in [`GeoMarkers`]
//! match as whole words ([`contains_word`]) and their rescue markers must start
//! a word ([`starts_any_word`]).

use crate::models::Category;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn lowercase_all(words: &mut [String]) {
    for w in words.iter_mut() {
        *w = w.trim().to_lowercase();
    }
}

/// Keyword lists per category.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeywordTaxonomy {
    pub healthcare: Vec<String>,
    pub retirement: Vec<String>,
    pub expat: Vec<String>,
    pub outdoor: Vec<String>,
    pub cultural: Vec<String>,
    pub vorarlberg: Vec<String>,
    pub geo: GeoMarkers,
}

impl Default for KeywordTaxonomy {
    fn default() -> Self {
        Self {
            healthcare: owned(&[
                "healthcare", "health insurance", "krankenversicherung", "doctor", "arzt",
                "hospital", "krankenhaus", "medical", "medizinisch", "prescription", "rezept",
                "pharmacy", "apotheke", "senior health", "elderly care", "health services",
                "health benefits", "medicare abroad", "health coverage", "specialist",
                "facharzt", "emergency care", "preventive care",
            ]),
            retirement: owned(&[
                "retirement", "pension", "rente", "social security", "retirement visa",
                "retirement benefits", "retirement planning", "retirement community",
                "senior living", "retirement income", "401k abroad", "ira international",
                "expat retirement", "retirement tax", "pension tax", "retirement healthcare",
                "senior activities", "senior services", "aging abroad",
            ]),
            expat: owned(&[
                "expat", "american abroad", "american expat", "us citizen abroad", "expatriate",
                "foreign resident", "residency permit", "aufenthaltstitel", "visa", "embassy",
                "consulate", "american community", "english speaking", "international community",
                "expat services", "expat tax", "fatca", "fbar", "dual citizenship",
                "passport renewal", "consular services",
            ]),
            outdoor: owned(&[
                "hiking", "wandern", "skiing", "skifahren", "ski resort", "mountain biking",
                "mountainbike", "cycling", "radfahren", "fishing", "angeln", "golf", "swimming",
                "schwimmen", "outdoor activities", "nature", "natur", "trail", "wanderweg",
                "lake", "see", "mountain", "berg", "alps", "alpen", "national park",
                "nationalpark", "forest", "wald", "river", "fluss",
            ]),
            cultural: owned(&[
                "festival", "concert", "konzert", "exhibition", "ausstellung", "museum",
                "gallery", "galerie", "theater", "theatre", "opera", "oper", "cinema", "kino",
                "music", "musik", "art", "kunst", "performance", "cultural event",
                "kulturveranstaltung", "traditional", "folk", "volksfest", "local customs",
                "local traditions", "heritage", "history", "geschichte",
            ]),
            vorarlberg: owned(&[
                "vorarlberg", "bregenz", "dornbirn", "feldkirch", "bludenz", "hohenems",
                "lustenau", "rankweil", "götzis", "hard", "lauterach", "wolfurt", "höchst",
                "altach", "lochau", "bregenzerwald", "montafon", "bodensee", "lake constance",
                "rheintal", "rhine valley", "arlberg", "silvretta", "brandnertal", "klostertal",
                "großes walsertal", "kleinwalsertal", "walgau", "leiblachtal", "laternsertal",
                "bodensee-vorarlberg", "alpenrhein", "ill river", "bregenzer festspiele",
                "bregenz festival", "schubertiade", "poolbar festival", "bezau", "mellau",
                "damüls", "schröcken", "warth", "lech", "zürs", "stuben", "schruns",
                "tschagguns", "gaschurn", "st. gallenkirch", "bartholomäberg", "vandans",
                "nenzing", "frastanz", "satteins",
            ]),
            geo: GeoMarkers::default(),
        }
    }
}

impl KeywordTaxonomy {
    /// Lowercase and trim every entry. Config overrides go through this once at load time.
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.healthcare,
            &mut self.retirement,
            &mut self.expat,
            &mut self.outdoor,
            &mut self.cultural,
            &mut self.vorarlberg,
        ] {
            lowercase_all(list);
        }
        self.geo = self.geo.normalized();
        self
    }

    pub fn keywords(&self, category: Category) -> &[String] {
        match category {
            Category::Vorarlberg => &self.vorarlberg,
            Category::AmericanExpat => &self.expat,
            Category::Healthcare => &self.healthcare,
            Category::Retirement => &self.retirement,
            Category::OutdoorActivities => &self.outdoor,
            Category::CulturalEvents => &self.cultural,
        }
    }

    /// Every keyword of every category, duplicates removed.
    pub fn all_keywords(&self) -> impl Iterator<Item = &str> + '_ {
        Category::PRIORITY
            .into_iter()
            .flat_map(|c| self.keywords(c).iter().map(String::as_str))
            .unique()
    }

    /// True when `host` is an allowlisted Austrian regional news domain or a subdomain of one.
    pub fn is_austrian_domain(&self, host: Option<&str>) -> bool {
        host.is_some_and(|h| host_matches(h, &self.geo.austrian_domains))
    }
}

/// Marker lists for live-content and geographic decisions.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoMarkers {
    /// Title phrases that mark live blogs and running coverage.
    pub live_title: Vec<String>,
    /// URL fragments that mark live blogs.
    pub live_url: Vec<String>,
    /// Regions that are never interesting unless the title or URL ties back to Austria or the EU.
    pub non_relevant_regions: Vec<String>,
    /// Rescue tokens for `non_relevant_regions`.
    pub region_rescue: Vec<String>,
    /// Broader country list, EU and US included, checked against title and description lead.
    pub excluded_countries: Vec<String>,
    /// Rescue tokens for `excluded_countries`.
    pub country_rescue: Vec<String>,
    /// Austria connection required for outdoor keywords to score.
    pub outdoor_connection: Vec<String>,
    /// Austria connection required for cultural keywords to score.
    pub cultural_connection: Vec<String>,
    /// Title tokens that lower the categorization threshold.
    pub austria_title: Vec<String>,
    /// Broad Austria connection used by the categorizer's geographic gate.
    pub austria_connection: Vec<String>,
    /// Austrian regional news domains.
    pub austrian_domains: Vec<String>,
    /// Domains flagged as Austrian sources during enrichment.
    pub enrichment_domains: Vec<String>,
}

impl Default for GeoMarkers {
    fn default() -> Self {
        let austrian_domains = owned(&["vol.at", "vienna.at", "vorarlberg.at", "orf.at", "vn.at"]);
        let mut enrichment_domains = austrian_domains.clone();
        enrichment_domains.push("derstandard.at".to_string());
        let outdoor_connection = owned(&[
            "austria", "austrian", "vorarlberg", "tyrol", "tirol", "alps", "alpen",
        ]);
        let mut cultural_connection = outdoor_connection.clone();
        cultural_connection.extend(owned(&["vienna", "wien", "salzburg"]));

        Self {
            live_title: owned(&[
                "as it happened", "live updates", "live blog", "live coverage",
                "minute by minute", "breaking news", "latest updates", "live: ", "live – ",
                "live - ", "happening now", "developing story", "updates: ", "follow live",
                "live report", "live reaction", "live news", "live stream", "live feed",
            ]),
            live_url: owned(&["/live/", "-live-", "/liveblog/", "-liveblog-"]),
            non_relevant_regions: owned(&[
                "africa", "african", "malawi", "philippines", "duterte", "hong kong", "china",
                "chinese", "india", "indian", "pakistan", "middle east", "brazil", "brazilian",
                "mexico", "mexican", "australia", "australian", "new zealand", "japan",
                "japanese", "russia", "russian", "indonesia", "malaysia", "thailand", "vietnam",
                "korea", "bangladesh", "nigeria", "egypt", "kenya", "argentina", "colombia",
                "peru", "chile", "venezuela",
            ]),
            region_rescue: owned(&["austria", "austrian", "vorarlberg", "eu", "europe", "european union"]),
            excluded_countries: owned(&[
                "china", "india", "japan", "russia", "brazil", "mexico", "australia",
                "new zealand", "africa", "south africa", "philippines", "indonesia", "malaysia",
                "thailand", "vietnam", "korea", "pakistan", "bangladesh", "nigeria", "egypt",
                "kenya", "argentina", "colombia", "peru", "chile", "venezuela", "uk", "britain",
                "england", "scotland", "wales", "france", "italy", "spain", "germany", "us",
                "usa", "america", "canada",
                // demonyms; "american" stays out so expat stories survive
                "indian", "japanese", "russian", "brazilian", "australian", "african", "korean",
                "indonesian", "malaysian", "nigerian", "kenyan", "colombian", "venezuelan",
            ]),
            country_rescue: owned(&[
                "austria", "austrian", "vorarlberg", "vienna", "wien", "salzburg", "tyrol", "tirol",
            ]),
            outdoor_connection,
            cultural_connection,
            austria_title: owned(&["austria", "austrian", "vorarlberg", "vienna", "wien"]),
            austria_connection: owned(&[
                "austria", "austrian", "vorarlberg", "tyrol", "tirol", "vienna", "wien",
                "salzburg", "innsbruck", "graz", "linz",
            ]),
            austrian_domains,
            enrichment_domains,
        }
    }
}

impl GeoMarkers {
    fn normalized(mut self) -> Self {
        for list in [
            &mut self.live_title,
            &mut self.live_url,
            &mut self.non_relevant_regions,
            &mut self.region_rescue,
            &mut self.excluded_countries,
            &mut self.country_rescue,
            &mut self.outdoor_connection,
            &mut self.cultural_connection,
            &mut self.austria_title,
            &mut self.austria_connection,
            &mut self.austrian_domains,
            &mut self.enrichment_domains,
        ] {
            // live markers carry meaningful trailing spaces ("live: ")
            for w in list.iter_mut() {
                *w = w.to_lowercase();
            }
            list.retain(|w| !w.trim().is_empty());
        }
        self
    }
}

/// True when any entry of `needles` is a substring of the already-lowercased `haystack`.
pub fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

/// First entry of `words` that occurs in `haystack` as a whole word or phrase.
pub fn find_word<'a>(haystack: &str, words: &'a [String]) -> Option<&'a str> {
    words
        .iter()
        .map(String::as_str)
        .find(|w| contains_word(haystack, w))
}

/// Whole-word containment: `word` must not be glued to letters or digits on either side,
/// so "us" matches "us troops" but not "business".
pub fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// True when any entry of `words` occurs in `haystack` starting at a word boundary.
/// Rescue markers use this so "austrian" and "vorarlberger" count for "austria" and "vorarlberg".
pub fn starts_any_word(haystack: &str, words: &[String]) -> bool {
    words.iter().any(|w| {
        !w.is_empty()
            && haystack.match_indices(w.as_str()).any(|(start, _)| {
                !haystack[..start]
                    .chars()
                    .next_back()
                    .is_some_and(char::is_alphanumeric)
            })
    })
}

/// True when `host` equals one of `domains` or is a subdomain of one.
pub fn host_matches(host: &str, domains: &[String]) -> bool {
    let host = host.trim_end_matches('.');
    domains.iter().any(|d| {
        host == d.as_str()
            || host
                .strip_suffix(d.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_is_lowercase() {
        let taxonomy = KeywordTaxonomy::default();
        for keyword in taxonomy.all_keywords() {
            assert_eq!(keyword, keyword.to_lowercase(), "keyword {keyword} not lowercase");
        }
        assert_eq!(taxonomy.clone().normalized(), taxonomy);
    }

    #[test]
    fn test_normalized_lowercases_overrides() {
        let taxonomy = KeywordTaxonomy {
            expat: vec!["  FATCA ".to_string(), "Visa".to_string()],
            ..Default::default()
        }
        .normalized();
        assert_eq!(taxonomy.expat, vec!["fatca", "visa"]);
    }

    #[test]
    fn test_all_keywords_deduplicates() {
        let taxonomy = KeywordTaxonomy {
            healthcare: vec!["shared".to_string()],
            retirement: vec!["shared".to_string()],
            expat: vec![],
            outdoor: vec![],
            cultural: vec![],
            vorarlberg: vec!["bregenz".to_string()],
            geo: GeoMarkers::default(),
        };
        let all: Vec<_> = taxonomy.all_keywords().collect();
        assert_eq!(all, vec!["bregenz", "shared"]);
    }

    #[test]
    fn test_contains_word_respects_boundaries() {
        assert!(contains_word("us troops leave", "us"));
        assert!(contains_word("news from the us.", "us"));
        assert!(!contains_word("business as usual", "us"));
        assert!(contains_word("trade with hong kong grows", "hong kong"));
        assert!(!contains_word("indiana jones", "india"));
        assert!(!contains_word("anything", ""));
    }

    #[test]
    fn test_find_word_returns_first_hit() {
        let words = owned(&["france", "italy"]);
        assert_eq!(find_word("rome, italy and paris, france", &words), Some("france"));
        assert_eq!(find_word("vienna", &words), None);
    }

    #[test]
    fn test_starts_any_word_allows_suffixes() {
        let markers = owned(&["vorarlberg", "eu"]);
        assert!(starts_any_word("vorarlberger nachrichten", &markers));
        assert!(starts_any_word("the european union", &markers));
        assert!(!starts_any_word("reuters reports", &markers));
        assert!(!starts_any_word("", &markers));
    }

    #[test]
    fn test_host_matches_subdomains_only() {
        let domains = owned(&["vol.at", "vn.at"]);
        assert!(host_matches("vol.at", &domains));
        assert!(host_matches("www.vol.at", &domains));
        assert!(host_matches("epaper.vn.at", &domains));
        assert!(!host_matches("revol.at", &domains));
        assert!(!host_matches("vol.at.example.com", &domains));
    }

    #[test]
    fn test_is_austrian_domain() {
        let taxonomy = KeywordTaxonomy::default();
        assert!(taxonomy.is_austrian_domain(Some("www.orf.at")));
        assert!(!taxonomy.is_austrian_domain(Some("www.theguardian.com")));
        assert!(!taxonomy.is_austrian_domain(None));
    }
}
