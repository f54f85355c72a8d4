use serde::{Deserialize, Serialize};

/// Pronoun set substituted for the masculine placeholders `{he}`, `{him}`,
/// `{his}` and `{himself}` in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pronouns {
    /// he/him/his/himself
    HeHim,
    /// she/her/her/herself
    SheHer,
    /// they/them/their/themself
    TheyThem,
}

impl Pronouns {
    /// Selection order for `seed % 3`.
    pub const ROTATION: [Pronouns; 3] = [Self::HeHim, Self::SheHer, Self::TheyThem];

    pub fn from_seed(seed: u64) -> Self {
        Self::ROTATION[(seed % 3) as usize]
    }

    /// Nominative/subject form: "he", "she", "they".
    pub fn subject(&self) -> &'static str {
        match self {
            Self::HeHim => "he",
            Self::SheHer => "she",
            Self::TheyThem => "they",
        }
    }

    /// Accusative/object form: "him", "her", "them".
    pub fn object(&self) -> &'static str {
        match self {
            Self::HeHim => "him",
            Self::SheHer => "her",
            Self::TheyThem => "them",
        }
    }

    /// Possessive determiner: "his", "her", "their".
    pub fn possessive(&self) -> &'static str {
        match self {
            Self::HeHim => "his",
            Self::SheHer => "her",
            Self::TheyThem => "their",
        }
    }

    /// Reflexive: "himself", "herself", "themself".
    pub fn reflexive(&self) -> &'static str {
        match self {
            Self::HeHim => "himself",
            Self::SheHer => "herself",
            Self::TheyThem => "themself",
        }
    }

    pub fn form(&self, form: PronounForm) -> &'static str {
        match form {
            PronounForm::Subject => self.subject(),
            PronounForm::Object => self.object(),
            PronounForm::Possessive => self.possessive(),
            PronounForm::Reflexive => self.reflexive(),
        }
    }
}

/// Grammatical role requested by a pronoun placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PronounForm {
    Subject,
    Object,
    Possessive,
    Reflexive,
}

impl PronounForm {
    /// Map a placeholder token (any casing) to the form it requests.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "he" => Some(Self::Subject),
            "him" => Some(Self::Object),
            "his" => Some(Self::Possessive),
            "himself" => Some(Self::Reflexive),
            _ => None,
        }
    }
}

/// Casing style of a placeholder token, reapplied to its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Lower,
    Title,
    Upper,
    Mixed,
}

impl CaseStyle {
    pub fn of(token: &str) -> Self {
        let mut chars = token.chars();
        let Some(first) = chars.next() else {
            return Self::Mixed;
        };
        let rest: Vec<char> = chars.collect();
        if first.is_lowercase() && rest.iter().all(|c| c.is_lowercase()) {
            Self::Lower
        } else if first.is_uppercase() && rest.iter().all(|c| c.is_uppercase()) {
            Self::Upper
        } else if first.is_uppercase() && rest.iter().all(|c| c.is_lowercase()) {
            Self::Title
        } else {
            Self::Mixed
        }
    }

    pub fn apply(&self, word: &str) -> String {
        match self {
            Self::Lower | Self::Mixed => word.to_lowercase(),
            Self::Upper => word.to_uppercase(),
            Self::Title => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_rotation() {
        assert_eq!(Pronouns::from_seed(3), Pronouns::HeHim);
        assert_eq!(Pronouns::from_seed(4), Pronouns::SheHer);
        assert_eq!(Pronouns::from_seed(5), Pronouns::TheyThem);
    }

    #[test]
    fn forms_per_set() {
        assert_eq!(Pronouns::SheHer.form(PronounForm::Object), "her");
        assert_eq!(Pronouns::SheHer.form(PronounForm::Possessive), "her");
        assert_eq!(Pronouns::TheyThem.form(PronounForm::Reflexive), "themself");
        assert_eq!(Pronouns::HeHim.form(PronounForm::Subject), "he");
    }

    #[test]
    fn token_to_form() {
        assert_eq!(PronounForm::from_token("HIMSELF"), Some(PronounForm::Reflexive));
        assert_eq!(PronounForm::from_token("His"), Some(PronounForm::Possessive));
        assert_eq!(PronounForm::from_token("her"), None);
    }

    #[test]
    fn case_styles() {
        assert_eq!(CaseStyle::of("him"), CaseStyle::Lower);
        assert_eq!(CaseStyle::of("Him"), CaseStyle::Title);
        assert_eq!(CaseStyle::of("HIM"), CaseStyle::Upper);
        assert_eq!(CaseStyle::of("hIm"), CaseStyle::Mixed);
        assert_eq!(CaseStyle::Title.apply("her"), "Her");
        assert_eq!(CaseStyle::Upper.apply("themself"), "THEMSELF");
        assert_eq!(CaseStyle::Mixed.apply("them"), "them");
    }
}
