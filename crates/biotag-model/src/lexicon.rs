//! Lexicon-based entity tagger.
//!
//! Handles:
//! - Dictionary matching of chemical and disease terms (BC5CDR-flavored)
//! - Alias expansion (tylenol→acetaminophen, flu→influenza)
//! - Fuzzy single-token matching for near-miss spellings (Jaro-Winkler)
//!
//! The tagger stands in for the pretrained model: same contract, no model
//! files to load. Matching is case-insensitive, longest-match-first, and
//! scans left to right, so the produced spans are ordered and
//! non-overlapping by construction.

use std::collections::HashMap;
use std::sync::OnceLock;

use strsim::jaro_winkler;

use biotag_core::model::{EntityModel, ModelResult};
use biotag_core::models::{AnnotatedDocument, EntityLabel, EntitySpan};

/// Minimum Jaro-Winkler similarity for a fuzzy token match.
const FUZZY_MATCH_THRESHOLD: f64 = 0.94;

/// Tokens shorter than this are never matched fuzzily.
const MIN_FUZZY_TOKEN_LEN: usize = 5;

static SHARED: OnceLock<LexiconTagger> = OnceLock::new();

/// Dictionary tagger for chemical and disease mentions.
pub struct LexiconTagger {
    /// Canonical term → label. Multi-word keys use single spaces.
    terms: HashMap<String, EntityLabel>,
    /// Alias → canonical term.
    aliases: HashMap<String, String>,
    /// Longest term/alias length in tokens, bounds the match window.
    max_term_tokens: usize,
    /// Fuzzy matching toggle.
    fuzzy: bool,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    /// Create a tagger with the built-in lexicon.
    pub fn new() -> Self {
        let mut tagger = Self {
            terms: HashMap::new(),
            aliases: HashMap::new(),
            max_term_tokens: 1,
            fuzzy: true,
        };
        for term in Self::default_chemicals() {
            tagger.add_term(term, EntityLabel::Chemical);
        }
        for term in Self::default_diseases() {
            tagger.add_term(term, EntityLabel::Disease);
        }
        for (alias, canonical) in Self::default_aliases() {
            tagger.add_alias(alias, canonical);
        }
        tagger
    }

    /// The process-wide shared instance, built once on first use.
    ///
    /// Immutable after construction, so concurrent read-only inference
    /// through it is safe.
    pub fn shared() -> &'static LexiconTagger {
        SHARED.get_or_init(LexiconTagger::new)
    }

    /// Add a canonical term with its label.
    pub fn add_term(&mut self, term: &str, label: EntityLabel) {
        let key = normalize_key(term);
        self.max_term_tokens = self.max_term_tokens.max(key.split(' ').count());
        self.terms.insert(key, label);
    }

    /// Add an alias for an existing canonical term.
    pub fn add_alias(&mut self, alias: &str, canonical: &str) {
        let key = normalize_key(alias);
        self.max_term_tokens = self.max_term_tokens.max(key.split(' ').count());
        self.aliases.insert(key, normalize_key(canonical));
    }

    /// Enable or disable fuzzy token matching.
    pub fn set_fuzzy(&mut self, enabled: bool) {
        self.fuzzy = enabled;
    }

    /// Look up a normalized phrase, expanding aliases first.
    fn lookup(&self, phrase: &str) -> Option<EntityLabel> {
        if let Some(canonical) = self.aliases.get(phrase) {
            return self.terms.get(canonical).cloned();
        }
        self.terms.get(phrase).cloned()
    }

    /// Fuzzy-match a single token against single-word canonical terms.
    fn lookup_fuzzy(&self, token: &str) -> Option<EntityLabel> {
        if token.len() < MIN_FUZZY_TOKEN_LEN || token.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let mut best: Option<(f64, &EntityLabel)> = None;
        for (term, label) in &self.terms {
            if term.contains(' ') || term.len() < MIN_FUZZY_TOKEN_LEN {
                continue;
            }
            let score = jaro_winkler(token, term);
            if score >= FUZZY_MATCH_THRESHOLD
                && best.map(|(b, _)| score > b).unwrap_or(true)
            {
                best = Some((score, label));
            }
        }
        best.map(|(_, label)| label.clone())
    }

    /// Tag all entity mentions in `text`, in document order.
    pub fn tag(&self, text: &str) -> Vec<EntitySpan> {
        let tokens = tokenize(text);
        let mut spans = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let window = self.max_term_tokens.min(tokens.len() - i);
            let mut matched = None;

            // Longest phrase first so "breast cancer" beats "cancer"
            for n in (1..=window).rev() {
                let phrase = join_tokens(text, &tokens[i..i + n]);
                if let Some(label) = self.lookup(&phrase) {
                    matched = Some((n, label));
                    break;
                }
            }

            if matched.is_none() && self.fuzzy {
                let token = text[tokens[i].0..tokens[i].1].to_lowercase();
                if let Some(label) = self.lookup_fuzzy(&token) {
                    matched = Some((1, label));
                }
            }

            match matched {
                Some((n, label)) => {
                    let start = tokens[i].0;
                    let end = tokens[i + n - 1].1;
                    spans.push(EntitySpan::new(start, end, &text[start..end], label));
                    i += n;
                }
                None => i += 1,
            }
        }
        spans
    }

    /// Built-in chemical terms.
    fn default_chemicals() -> Vec<&'static str> {
        vec![
            // Analgesics / NSAIDs
            "aspirin",
            "acetylsalicylic acid",
            "ibuprofen",
            "acetaminophen",
            "paracetamol",
            "naproxen",
            "morphine",
            "codeine",
            "tramadol",
            // Cardiovascular
            "warfarin",
            "heparin",
            "digoxin",
            "furosemide",
            "propranolol",
            "metoprolol",
            "amiodarone",
            "atorvastatin",
            "simvastatin",
            "enalapril",
            "lisinopril",
            // Endocrine
            "insulin",
            "metformin",
            "levothyroxine",
            "prednisone",
            "dexamethasone",
            // Antimicrobials
            "penicillin",
            "amoxicillin",
            "vancomycin",
            "gentamicin",
            "ciprofloxacin",
            "doxycycline",
            "isoniazid",
            "rifampicin",
            // Oncology
            "doxorubicin",
            "cisplatin",
            "methotrexate",
            "cyclophosphamide",
            "tamoxifen",
            // Neurology / psychiatry
            "levodopa",
            "carbamazepine",
            "phenytoin",
            "valproic acid",
            "lithium",
            "haloperidol",
            "fluoxetine",
            "diazepam",
            // GI
            "omeprazole",
            "ranitidine",
            "ondansetron",
            // Misc
            "caffeine",
            "nicotine",
            "dopamine",
            "epinephrine",
        ]
    }

    /// Built-in disease terms.
    fn default_diseases() -> Vec<&'static str> {
        vec![
            // Symptoms
            "fever",
            "headache",
            "migraine",
            "nausea",
            "vomiting",
            "diarrhea",
            "rash",
            "chest pain",
            "seizure",
            // Cardiovascular
            "hypertension",
            "hypotension",
            "tachycardia",
            "bradycardia",
            "arrhythmia",
            "myocardial infarction",
            "heart failure",
            "stroke",
            // Metabolic
            "diabetes mellitus",
            "diabetes",
            "hypoglycemia",
            "hyperglycemia",
            "obesity",
            "osteoporosis",
            // Respiratory / infectious
            "asthma",
            "pneumonia",
            "tuberculosis",
            "influenza",
            "hepatitis",
            "sepsis",
            // Oncology
            "cancer",
            "breast cancer",
            "lung cancer",
            "leukemia",
            "lymphoma",
            "melanoma",
            "carcinoma",
            // Neurology / psychiatry
            "epilepsy",
            "parkinson disease",
            "alzheimer disease",
            "depression",
            "anxiety",
            "schizophrenia",
            // Hematology / toxicity
            "anemia",
            "thrombocytopenia",
            "neutropenia",
            "nephrotoxicity",
            "hepatotoxicity",
            "cardiotoxicity",
            // Rheumatology / renal
            "arthritis",
            "rheumatoid arthritis",
            "renal failure",
            "kidney failure",
            "cirrhosis",
        ]
    }

    /// Built-in alias mappings.
    fn default_aliases() -> HashMap<&'static str, &'static str> {
        let mut map = HashMap::new();

        // Brand → generic
        map.insert("tylenol", "acetaminophen");
        map.insert("advil", "ibuprofen");
        map.insert("motrin", "ibuprofen");
        map.insert("aleve", "naproxen");
        map.insert("coumadin", "warfarin");
        map.insert("lasix", "furosemide");
        map.insert("glucophage", "metformin");
        map.insert("prilosec", "omeprazole");
        map.insert("zantac", "ranitidine");
        map.insert("prozac", "fluoxetine");
        map.insert("valium", "diazepam");
        map.insert("lipitor", "atorvastatin");
        map.insert("asa", "aspirin");

        // Lay names → disease terms
        map.insert("flu", "influenza");
        map.insert("heart attack", "myocardial infarction");
        map.insert("high blood pressure", "hypertension");
        map.insert("tb", "tuberculosis");

        map
    }
}

impl EntityModel for LexiconTagger {
    fn annotate(&self, text: &str) -> ModelResult<AnnotatedDocument> {
        let spans = self.tag(text);
        Ok(AnnotatedDocument::new(text.to_string(), spans)?)
    }
}

/// Lowercase and collapse whitespace to single spaces.
fn normalize_key(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Token byte ranges: maximal runs of alphanumerics and hyphens.
fn tokenize(text: &str) -> Vec<(usize, usize)> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (idx, c) in text.char_indices() {
        if c.is_alphanumeric() || c == '-' {
            if start.is_none() {
                start = Some(idx);
            }
        } else if let Some(s) = start.take() {
            tokens.push((s, idx));
        }
    }
    if let Some(s) = start {
        tokens.push((s, text.len()));
    }
    tokens
}

/// Lowercased lookup key for a run of tokens.
fn join_tokens(text: &str, tokens: &[(usize, usize)]) -> String {
    tokens
        .iter()
        .map(|&(s, e)| text[s..e].to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("a bc  d"), vec![(0, 1), (2, 4), (6, 7)]);
        assert_eq!(tokenize("non-small cell"), vec![(0, 9), (10, 14)]);
        assert_eq!(tokenize(""), Vec::<(usize, usize)>::new());
        assert_eq!(tokenize("end."), vec![(0, 3)]);
    }

    #[test]
    fn test_tags_chemical_and_disease() {
        let tagger = LexiconTagger::new();
        let spans = tagger.tag("Aspirin is used to treat fever.");

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Aspirin");
        assert_eq!(spans[0].label, EntityLabel::Chemical);
        assert_eq!((spans[0].start, spans[0].end), (0, 7));
        assert_eq!(spans[1].text, "fever");
        assert_eq!(spans[1].label, EntityLabel::Disease);
    }

    #[test]
    fn test_case_insensitive() {
        let tagger = LexiconTagger::new();
        let spans = tagger.tag("ASPIRIN and Ibuprofen");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "ASPIRIN");
        assert_eq!(spans[1].text, "Ibuprofen");
    }

    #[test]
    fn test_longest_match_wins() {
        let tagger = LexiconTagger::new();
        let spans = tagger.tag("diagnosed with breast cancer last year");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "breast cancer");
        assert_eq!(spans[0].label, EntityLabel::Disease);
    }

    #[test]
    fn test_alias_expansion() {
        let tagger = LexiconTagger::new();

        let spans = tagger.tag("took some Tylenol for the flu");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Tylenol");
        assert_eq!(spans[0].label, EntityLabel::Chemical);
        assert_eq!(spans[1].text, "flu");
        assert_eq!(spans[1].label, EntityLabel::Disease);

        let spans = tagger.tag("suffered a heart attack");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "heart attack");
        assert_eq!(spans[0].label, EntityLabel::Disease);
    }

    #[test]
    fn test_fuzzy_near_miss() {
        let tagger = LexiconTagger::new();
        // One dropped letter, prefix intact
        let spans = tagger.tag("prescribed metformn daily");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "metformn");
        assert_eq!(spans[0].label, EntityLabel::Chemical);
    }

    #[test]
    fn test_fuzzy_can_be_disabled() {
        let mut tagger = LexiconTagger::new();
        tagger.set_fuzzy(false);
        assert!(tagger.tag("prescribed metformn daily").is_empty());
    }

    #[test]
    fn test_short_tokens_never_fuzzy() {
        let tagger = LexiconTagger::new();
        assert!(tagger.tag("the cat sat").is_empty());
    }

    #[test]
    fn test_custom_term() {
        let mut tagger = LexiconTagger::new();
        tagger.add_term("remdesivir", EntityLabel::Chemical);
        tagger.add_alias("veklury", "remdesivir");

        let spans = tagger.tag("Veklury is remdesivir");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].label, EntityLabel::Chemical);
        assert_eq!(spans[1].label, EntityLabel::Chemical);
    }

    #[test]
    fn test_spans_ordered_and_in_bounds() {
        let tagger = LexiconTagger::new();
        let text = "fever, nausea, aspirin, hypertension and warfarin";
        let spans = tagger.tag(text);

        assert_eq!(spans.len(), 5);
        let mut prev = 0;
        for span in &spans {
            assert!(span.start >= prev);
            assert!(span.end <= text.len());
            assert_eq!(&text[span.start..span.end], span.text);
            prev = span.start;
        }
    }

    #[test]
    fn test_annotate_builds_valid_document() {
        let tagger = LexiconTagger::new();
        let doc = tagger.annotate("Cisplatin can cause nephrotoxicity.").unwrap();
        assert_eq!(doc.entities().len(), 2);
        assert_eq!(doc.entities()[0].label, EntityLabel::Chemical);
        assert_eq!(doc.entities()[1].label, EntityLabel::Disease);
    }

    #[test]
    fn test_shared_instance_is_stable() {
        let a = LexiconTagger::shared() as *const LexiconTagger;
        let b = LexiconTagger::shared() as *const LexiconTagger;
        assert_eq!(a, b);
    }

    proptest::proptest! {
        #[test]
        fn prop_annotate_always_yields_valid_documents(text in "[ -~]{0,80}") {
            let doc = LexiconTagger::shared().annotate(&text).unwrap();
            let mut prev = 0usize;
            for span in doc.entities() {
                proptest::prop_assert!(span.start >= prev);
                proptest::prop_assert!(span.end <= text.len());
                proptest::prop_assert_eq!(&text[span.start..span.end], span.text.as_str());
                prev = span.start;
            }
        }
    }
}
