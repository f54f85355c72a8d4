//! Seeded record generation with name-based field classification.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::core::lexicon::Lexicon;
use crate::schema::catalog::TypeCatalog;
use crate::schema::value::{Record, Value};

/// Largest seed handed out when a fresh one is drawn.
pub const MAX_SEED: u64 = (1 << 31) - 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("type index {index} is out of range (catalog has {len} types)")]
    InvalidTypeIndex { index: usize, len: usize },
}

/// The generator chosen for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    PersonName,
    Company,
    Product,
    Date,
    Location,
    Email,
    Phone,
    Integer,
    Decimal,
    CreativeWork,
    Handle,
    Occupation,
    Prize,
    Journal,
    University,
    Faction,
    Word,
}

/// One classification rule: the field name must contain one of `any` and
/// none of `none`.
struct FieldRule {
    any: &'static [&'static str],
    none: &'static [&'static str],
    kind: FieldKind,
}

impl FieldRule {
    fn matches(&self, name: &str) -> bool {
        self.any.iter().any(|s| name.contains(s)) && !self.none.iter().any(|s| name.contains(s))
    }
}

/// Evaluated top to bottom; the first match wins. Several names satisfy
/// more than one rule ("phone number", "price number 1", "nickname").
const FIELD_RULES: &[FieldRule] = &[
    FieldRule { any: &["name"], none: &["company", "product"], kind: FieldKind::PersonName },
    FieldRule { any: &["company", "brand"], none: &[], kind: FieldKind::Company },
    FieldRule { any: &["product"], none: &[], kind: FieldKind::Product },
    FieldRule { any: &["year", "date"], none: &[], kind: FieldKind::Date },
    FieldRule {
        any: &["location", "country", "city", "continent"],
        none: &[],
        kind: FieldKind::Location,
    },
    FieldRule { any: &["email"], none: &[], kind: FieldKind::Email },
    FieldRule { any: &["phone"], none: &[], kind: FieldKind::Phone },
    FieldRule { any: &["number", "count"], none: &[], kind: FieldKind::Integer },
    FieldRule { any: &["dollars", "price"], none: &[], kind: FieldKind::Decimal },
    FieldRule { any: &["song", "concert", "collab"], none: &[], kind: FieldKind::CreativeWork },
    FieldRule { any: &["nickname"], none: &[], kind: FieldKind::Handle },
    FieldRule { any: &["science field"], none: &[], kind: FieldKind::Occupation },
    FieldRule { any: &["prize"], none: &[], kind: FieldKind::Prize },
    FieldRule { any: &["journal"], none: &[], kind: FieldKind::Journal },
    FieldRule { any: &["university"], none: &[], kind: FieldKind::University },
    FieldRule { any: &["faction"], none: &[], kind: FieldKind::Faction },
];

impl FieldKind {
    /// Classify a field name (case-insensitive).
    pub fn classify(field_name: &str) -> FieldKind {
        let name = field_name.to_lowercase();
        FIELD_RULES
            .iter()
            .find(|rule| rule.matches(&name))
            .map(|rule| rule.kind)
            .unwrap_or(FieldKind::Word)
    }

    fn generate<R: Rng>(&self, lexicon: &Lexicon, rng: &mut R) -> Value {
        match self {
            Self::PersonName => Value::Name(lexicon.person_name(rng)),
            Self::Company => Value::Text(lexicon.company(rng)),
            Self::Product | Self::CreativeWork | Self::Word => Value::Text(lexicon.word(rng)),
            Self::Date => Value::Date(lexicon.date(rng)),
            Self::Location => Value::Location(lexicon.location(rng)),
            Self::Email => Value::Text(lexicon.email(rng)),
            Self::Phone => Value::Text(lexicon.phone(rng)),
            Self::Integer => Value::Integer(rng.gen_range(1..=10_000)),
            // Five integer digits, two fraction digits, never zero.
            Self::Decimal => Value::Decimal(rng.gen_range(1..=9_999_999u32) as f64 / 100.0),
            Self::Handle => Value::Text(lexicon.user_name(rng)),
            Self::Occupation => Value::Text(lexicon.occupation(rng)),
            Self::Prize => Value::Text(format!("{} Prize", lexicon.word(rng))),
            Self::Journal => Value::Text(format!("{} Journal", lexicon.capitalized_word(rng))),
            Self::University => Value::Text(format!("{} University", lexicon.company(rng))),
            Self::Faction => Value::Text(format!("{} Faction", lexicon.capitalized_word(rng))),
        }
    }
}

/// Draw a seed in [1, 2^31 - 1].
pub fn fresh_seed() -> u64 {
    rand::thread_rng().gen_range(1..=MAX_SEED)
}

/// `seed` itself, or a fresh one when it is 0.
pub fn resolve_seed(seed: u64) -> u64 {
    if seed == 0 {
        fresh_seed()
    } else {
        seed
    }
}

/// Produces records from a catalog. Every call builds its own generator
/// from the seed, so concurrent calls never share random state.
#[derive(Debug, Clone)]
pub struct RecordGenerator<'a> {
    catalog: &'a TypeCatalog,
    lexicon: &'a Lexicon,
}

impl<'a> RecordGenerator<'a> {
    pub fn new(catalog: &'a TypeCatalog, lexicon: &'a Lexicon) -> Self {
        Self { catalog, lexicon }
    }

    /// Generate the record of type `type_index` for `seed` (0 draws a
    /// fresh seed, reported back in `Record::seed`).
    pub fn generate(&self, type_index: usize, seed: u64) -> Result<Record, RecordError> {
        let doc_type = self
            .catalog
            .get(type_index)
            .ok_or(RecordError::InvalidTypeIndex {
                index: type_index,
                len: self.catalog.len(),
            })?;
        let seed = resolve_seed(seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let values = doc_type
            .fields
            .iter()
            .map(|field| FieldKind::classify(field).generate(self.lexicon, &mut rng))
            .collect();

        Ok(Record {
            type_index,
            seed,
            values,
        })
    }
}
