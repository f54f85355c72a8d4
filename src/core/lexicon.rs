//! Word pools and the small fabricators built on top of them.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::value::{Location, PersonName, CONTINENTS};

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("lexicon pool '{0}' is empty")]
    EmptyPool(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

const BUILTIN_LEXICON: &str = include_str!("../../data/lexicon.ron");

/// Days from 1970-01-01 (day 719_163 of the common era) to 2025-12-31.
const DATE_EPOCH_CE: i32 = 719_163;
const DATE_SPAN_DAYS: i32 = 20_453;

const PHONE_LAYOUTS: [&str; 4] = [
    "(###) ###-####",
    "###-###-####",
    "###.###.####",
    "+1-###-###-####",
];

/// Pools of raw words from which every synthetic value is assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub cities: Vec<String>,
    pub countries: Vec<String>,
    pub street_names: Vec<String>,
    pub street_suffixes: Vec<String>,
    pub words: Vec<String>,
    pub company_suffixes: Vec<String>,
    pub occupations: Vec<String>,
    pub email_domains: Vec<String>,
}

impl Lexicon {
    /// The lexicon shipped inside the binary.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::parse_ron(BUILTIN_LEXICON)
    }

    pub fn load_from_ron(path: &Path) -> Result<Self, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Self, LexiconError> {
        let lexicon: Lexicon = ron::from_str(input)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    fn validate(&self) -> Result<(), LexiconError> {
        let pools: [(&'static str, &Vec<String>); 10] = [
            ("first_names", &self.first_names),
            ("last_names", &self.last_names),
            ("cities", &self.cities),
            ("countries", &self.countries),
            ("street_names", &self.street_names),
            ("street_suffixes", &self.street_suffixes),
            ("words", &self.words),
            ("company_suffixes", &self.company_suffixes),
            ("occupations", &self.occupations),
            ("email_domains", &self.email_domains),
        ];
        for (name, pool) in pools {
            if pool.is_empty() {
                return Err(LexiconError::EmptyPool(name));
            }
        }
        Ok(())
    }

    pub fn person_name<R: Rng>(&self, rng: &mut R) -> PersonName {
        let first = pick(rng, &self.first_names);
        let last = pick(rng, &self.last_names);
        PersonName::new(first, last)
    }

    pub fn word<R: Rng>(&self, rng: &mut R) -> String {
        pick(rng, &self.words).to_string()
    }

    pub fn capitalized_word<R: Rng>(&self, rng: &mut R) -> String {
        capitalize(pick(rng, &self.words))
    }

    pub fn company<R: Rng>(&self, rng: &mut R) -> String {
        match rng.gen_range(0..3) {
            0 => format!(
                "{} {}",
                pick(rng, &self.last_names),
                pick(rng, &self.company_suffixes)
            ),
            1 => format!(
                "{}-{}",
                pick(rng, &self.last_names),
                pick(rng, &self.last_names)
            ),
            _ => format!(
                "{}, {} and {}",
                pick(rng, &self.last_names),
                pick(rng, &self.last_names),
                pick(rng, &self.last_names)
            ),
        }
    }

    pub fn occupation<R: Rng>(&self, rng: &mut R) -> String {
        pick(rng, &self.occupations).to_string()
    }

    pub fn location<R: Rng>(&self, rng: &mut R) -> Location {
        let city = pick(rng, &self.cities).to_string();
        let country = pick(rng, &self.countries).to_string();
        let continent = CONTINENTS[rng.gen_range(0..CONTINENTS.len())].to_string();
        let address = format!(
            "{} {} {}, {} {:05}",
            rng.gen_range(1..=9999),
            pick(rng, &self.street_names),
            pick(rng, &self.street_suffixes),
            pick(rng, &self.cities),
            rng.gen_range(1000..=99999),
        );
        Location {
            city,
            country,
            continent,
            address,
        }
    }

    /// Lower-case handle such as `mira.okafor` or `rafe_lowell42`.
    pub fn user_name<R: Rng>(&self, rng: &mut R) -> String {
        let first = pick(rng, &self.first_names).to_lowercase();
        let last = pick(rng, &self.last_names).to_lowercase();
        match rng.gen_range(0..3) {
            0 => format!("{}.{}", first, last),
            1 => format!("{}_{}{}", first, last, rng.gen_range(1..100)),
            _ => format!("{}{}", first.chars().next().unwrap_or('x'), last),
        }
    }

    pub fn email<R: Rng>(&self, rng: &mut R) -> String {
        let handle = self.user_name(rng);
        format!("{}@{}", handle, pick(rng, &self.email_domains))
    }

    pub fn phone<R: Rng>(&self, rng: &mut R) -> String {
        let layout = PHONE_LAYOUTS[rng.gen_range(0..PHONE_LAYOUTS.len())];
        layout
            .chars()
            .map(|c| match c {
                '#' => char::from(b'0' + rng.gen_range(0..10u8)),
                other => other,
            })
            .collect()
    }

    pub fn date<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        let offset = rng.gen_range(0..=DATE_SPAN_DAYS);
        NaiveDate::from_num_days_from_ce_opt(DATE_EPOCH_CE + offset).unwrap_or_default()
    }
}

/// Uniform choice from a pool that `validate` has proven non-empty.
fn pick<'a, R: Rng>(rng: &mut R, pool: &'a [String]) -> &'a str {
    &pool[rng.gen_range(0..pool.len())]
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn builtin_lexicon_loads() {
        let lexicon = Lexicon::builtin().unwrap();
        assert!(!lexicon.first_names.is_empty());
        assert!(!lexicon.words.is_empty());
    }

    #[test]
    fn empty_pool_rejected() {
        let input = r#"(
            first_names: [], last_names: ["B"], cities: ["C"], countries: ["D"],
            street_names: ["E"], street_suffixes: ["F"], words: ["g"],
            company_suffixes: ["H"], occupations: ["I"], email_domains: ["j.test"],
        )"#;
        let err = Lexicon::parse_ron(input).unwrap_err();
        assert!(matches!(err, LexiconError::EmptyPool("first_names")));
    }

    #[test]
    fn dates_stay_in_range() {
        let lexicon = Lexicon::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let low = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let high = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        for _ in 0..500 {
            let date = lexicon.date(&mut rng);
            assert!(date >= low && date <= high, "{} out of range", date);
        }
    }

    #[test]
    fn date_bounds_are_exact() {
        assert_eq!(
            NaiveDate::from_num_days_from_ce_opt(DATE_EPOCH_CE),
            NaiveDate::from_ymd_opt(1970, 1, 1)
        );
        assert_eq!(
            NaiveDate::from_num_days_from_ce_opt(DATE_EPOCH_CE + DATE_SPAN_DAYS),
            NaiveDate::from_ymd_opt(2025, 12, 31)
        );
    }

    #[test]
    fn phone_fills_every_digit() {
        let lexicon = Lexicon::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let phone = lexicon.phone(&mut rng);
            assert!(!phone.contains('#'));
            assert!(phone.chars().filter(|c| c.is_ascii_digit()).count() >= 10);
        }
    }

    #[test]
    fn email_shape() {
        let lexicon = Lexicon::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let email = lexicon.email(&mut rng);
        let (handle, domain) = email.split_once('@').unwrap();
        assert!(!handle.is_empty());
        assert!(lexicon.email_domains.iter().any(|d| d == domain));
    }

    #[test]
    fn capitalize_word() {
        assert_eq!(capitalize("quartz"), "Quartz");
        assert_eq!(capitalize(""), "");
    }
}
