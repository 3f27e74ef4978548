//! In-memory quote collection with write-through persistence.
//!
//! The `QuoteStore` owns the collection; `append`, `append_many` and
//! `replace_all` are the only write paths, and each one persists the full
//! collection before returning. Selection helpers are pure functions over a
//! slice.

use crate::db::Db;
use quote_board_types::Quote;
use rand::Rng;
use std::sync::Arc;

/// Synthetic filter entry meaning "no category filter".
pub const ALL_CATEGORY: &str = "all";

pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote {
            text: "Success is not final.".to_string(),
            category: "Motivation".to_string(),
        },
        Quote {
            text: "Talk is cheap. Show me the code.".to_string(),
            category: "Programming".to_string(),
        },
    ]
}

pub struct QuoteStore {
    quotes: Vec<Quote>,
    db: Arc<Db>,
}

impl QuoteStore {
    /// Load the saved collection, seeding the defaults when nothing has been
    /// saved yet. A corrupted entry is surfaced as `Err` so the caller can
    /// log it and fall back to [`QuoteStore::seeded`].
    pub fn load(db: Arc<Db>) -> Result<Self, String> {
        let quotes = match db.load_quotes()? {
            Some(quotes) => quotes,
            None => default_quotes(),
        };
        Ok(Self { quotes, db })
    }

    /// A store holding only the default seeds. Nothing is persisted until
    /// the first mutation.
    pub fn seeded(db: Arc<Db>) -> Self {
        Self {
            quotes: default_quotes(),
            db,
        }
    }

    /// Append one quote from the add path. An empty `text` or `category`
    /// is rejected as a silent no-op: `Ok(false)`, no error surfaced.
    pub fn append(&mut self, quote: Quote) -> Result<bool, String> {
        if quote.text.is_empty() || quote.category.is_empty() {
            return Ok(false);
        }
        self.quotes.push(quote);
        self.db.save_quotes(&self.quotes)?;
        Ok(true)
    }

    /// Bulk insert for the import path. Records are trusted verbatim, the
    /// empty-field guard does not apply. Returns the number appended.
    pub fn append_many(&mut self, quotes: Vec<Quote>) -> Result<usize, String> {
        let count = quotes.len();
        self.quotes.extend(quotes);
        self.db.save_quotes(&self.quotes)?;
        Ok(count)
    }

    /// Sync path only: unconditionally discard the current collection and
    /// substitute the server batch. Last write wins; local additions made
    /// since the previous sync are gone.
    pub fn replace_all(&mut self, quotes: Vec<Quote>) -> Result<(), String> {
        self.quotes = quotes;
        self.db.save_quotes(&self.quotes)
    }

    pub fn all(&self) -> &[Quote] {
        &self.quotes
    }
}

/// `["all", ...]` plus each distinct category in first-seen order.
pub fn categories(quotes: &[Quote]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORY.to_string()];
    for quote in quotes {
        if !out.iter().any(|c| c == &quote.category) {
            out.push(quote.category.clone());
        }
    }
    out
}

/// Exact-match filter; `"all"` passes everything through.
pub fn filter_by_category<'a>(quotes: &'a [Quote], category: &str) -> Vec<&'a Quote> {
    if category == ALL_CATEGORY {
        return quotes.iter().collect();
    }
    quotes
        .iter()
        .filter(|quote| quote.category == category)
        .collect()
}

/// Uniformly random pick. `None` on an empty subset; callers keep their
/// previous display.
pub fn pick_quote<'a, R: Rng>(quotes: &[&'a Quote], rng: &mut R) -> Option<&'a Quote> {
    if quotes.is_empty() {
        return None;
    }
    Some(quotes[rng.gen_range(0..quotes.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn quote(text: &str, category: &str) -> Quote {
        Quote {
            text: text.to_string(),
            category: category.to_string(),
        }
    }

    fn seeded_store() -> QuoteStore {
        let db = Arc::new(Db::open(":memory:").unwrap());
        QuoteStore::seeded(db)
    }

    #[test]
    fn test_append_valid_quote_grows_by_one() {
        let mut store = seeded_store();
        let before = store.all().len();

        let added = store.append(quote("Stay hungry.", "Motivation")).unwrap();

        assert!(added);
        assert_eq!(store.all().len(), before + 1);
        assert_eq!(
            store.all().last().unwrap(),
            &quote("Stay hungry.", "Motivation")
        );
    }

    #[test]
    fn test_append_empty_field_is_silent_noop() {
        let mut store = seeded_store();
        let before = store.all().to_vec();

        assert!(!store.append(quote("", "Motivation")).unwrap());
        assert!(!store.append(quote("No category.", "")).unwrap());

        assert_eq!(store.all(), &before[..]);
    }

    #[test]
    fn test_append_many_trusts_records_verbatim() {
        // Imported records bypass the empty-field guard.
        let mut store = seeded_store();
        let count = store.append_many(vec![quote("", "")]).unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.all().len(), 3);
    }

    #[test]
    fn test_replace_all_discards_local_additions() {
        let mut store = seeded_store();
        store.append(quote("Added locally.", "Local")).unwrap();

        let server_batch = vec![quote("server one", "Server"), quote("server two", "Server")];
        store.replace_all(server_batch.clone()).unwrap();

        assert_eq!(store.all(), &server_batch[..]);
    }

    #[test]
    fn test_export_import_roundtrip_doubles_collection() {
        let mut store = seeded_store();
        let original = store.all().to_vec();

        let exported = serde_json::to_string(store.all()).unwrap();
        let imported: Vec<Quote> = serde_json::from_str(&exported).unwrap();
        store.append_many(imported).unwrap();

        assert_eq!(store.all().len(), original.len() * 2);
        assert_eq!(&store.all()[..original.len()], &original[..]);
        assert_eq!(&store.all()[original.len()..], &original[..]);
    }

    #[test]
    fn test_append_persists_through_reload() {
        let db = Arc::new(Db::open(":memory:").unwrap());
        let mut store = QuoteStore::load(db.clone()).unwrap();
        store.append(quote("Persisted.", "Test")).unwrap();

        let reloaded = QuoteStore::load(db).unwrap();
        assert_eq!(reloaded.all(), store.all());
    }

    #[test]
    fn test_load_seeds_defaults_when_nothing_saved() {
        let db = Arc::new(Db::open(":memory:").unwrap());
        let store = QuoteStore::load(db).unwrap();
        assert_eq!(store.all(), &default_quotes()[..]);
    }

    #[test]
    fn test_categories_start_with_all_in_first_seen_order() {
        let quotes = vec![
            quote("a", "Motivation"),
            quote("b", "Programming"),
            quote("c", "Motivation"),
            quote("d", "Server"),
        ];
        assert_eq!(
            categories(&quotes),
            vec!["all", "Motivation", "Programming", "Server"]
        );
    }

    #[test]
    fn test_categories_of_empty_collection() {
        assert_eq!(categories(&[]), vec!["all"]);
    }

    #[test]
    fn test_pick_quote_with_fixed_rng_returns_first_seed() {
        let quotes = default_quotes();
        let subset = filter_by_category(&quotes, ALL_CATEGORY);

        let mut rng = StepRng::new(0, 0);
        let picked = pick_quote(&subset, &mut rng).unwrap();

        assert_eq!(picked.to_string(), "\"Success is not final.\" - Motivation");
    }

    #[test]
    fn test_filtered_pick_with_single_match_ignores_draw() {
        let quotes = default_quotes();
        let subset = filter_by_category(&quotes, "Programming");
        assert_eq!(subset.len(), 1);

        for seed in [0, u64::MAX / 2, u64::MAX] {
            let mut rng = StepRng::new(seed, 1);
            let picked = pick_quote(&subset, &mut rng).unwrap();
            assert_eq!(picked.text, "Talk is cheap. Show me the code.");
        }
    }

    #[test]
    fn test_pick_quote_empty_subset_is_none() {
        let quotes = default_quotes();
        let subset = filter_by_category(&quotes, "Philosophy");
        assert!(pick_quote(&subset, &mut StepRng::new(0, 0)).is_none());
    }
}
