//! The rendering pipeline: template index + seed → finished body fragment.
//!
//! Selects a section, generates the record for the template's type,
//! substitutes every placeholder and resolves pronouns.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::config::{ConfigError, EngineConfig};
use crate::core::format::format_value;
use crate::core::hierarchy::{Fragment, Hierarchy};
use crate::core::lexicon::{Lexicon, LexiconError};
use crate::core::page::{wrap_in_page, DEFAULT_TITLE};
use crate::core::record::{resolve_seed, RecordError, RecordGenerator};
use crate::core::selector::{select, SelectError};
use crate::core::template::{normalize_key, Template};
use crate::schema::catalog::TypeCatalog;
use crate::schema::pronoun::{CaseStyle, PronounForm, Pronouns};
use crate::schema::value::Record;

static PRONOUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{((?i:he|him|his|himself))\}").expect("pronoun pattern is valid")
});

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid template index {index}: must be between 1 and {total}")]
    InvalidTemplateIndex { index: u32, total: u32 },
    #[error("template index {template} maps to type {type_index}, but the catalog has {len} types")]
    TypeIndexOutOfRange {
        template: u32,
        type_index: usize,
        len: usize,
    },
    #[error("selection error: {0}")]
    Select(#[from] SelectError),
    #[error("record error: {0}")]
    Record(#[from] RecordError),
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// A rendered body plus the seed that produced it, so a caller that passed
/// 0 can persist the fresh seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub template: u32,
    pub seed: u64,
    pub title: String,
    pub body: Fragment,
}

impl RenderedDocument {
    /// The full HTML page around this body.
    pub fn to_page(&self, page_title: &str) -> String {
        wrap_in_page(self.body.as_str(), page_title)
    }
}

/// The document renderer. Built via `DocumentRenderer::builder()`.
///
/// Holds only read-only state, so one instance can serve concurrent
/// renders through `&self`.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    hierarchy: Arc<Hierarchy>,
    catalog: TypeCatalog,
    lexicon: Lexicon,
    config: EngineConfig,
}

/// Builder for constructing a `DocumentRenderer`.
#[derive(Debug, Default)]
pub struct DocumentRendererBuilder {
    hierarchy: Option<Arc<Hierarchy>>,
    catalog: Option<TypeCatalog>,
    lexicon: Option<Lexicon>,
    config: Option<EngineConfig>,
}

impl DocumentRenderer {
    pub fn builder() -> DocumentRendererBuilder {
        DocumentRendererBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Render template `template` (1-based) with `seed` (0 draws a fresh
    /// seed). Either the whole body is produced or nothing is.
    pub fn render(&self, template: u32, seed: u64) -> Result<RenderedDocument, RenderError> {
        let total = self.config.total_templates();
        if template < 1 || template > total {
            return Err(RenderError::InvalidTemplateIndex {
                index: template,
                total,
            });
        }

        let type_index = self.config.type_index(template);
        if type_index >= self.catalog.len() {
            return Err(RenderError::TypeIndexOutOfRange {
                template,
                type_index,
                len: self.catalog.len(),
            });
        }

        let seed = resolve_seed(seed);
        let record = RecordGenerator::new(&self.catalog, &self.lexicon).generate(type_index, seed)?;

        let selection = select(&self.hierarchy, template, self.config.templates_per_type)?;
        debug!(
            template,
            seed,
            section = %selection.title,
            subsection = selection.inner_title.as_deref().unwrap_or("-"),
            "rendering template"
        );

        let substituted = self.substitute(selection.body.as_str(), type_index, &record);
        let body = resolve_pronouns(&substituted, seed);

        Ok(RenderedDocument {
            template,
            seed,
            title: selection.title,
            body: Fragment::new(body),
        })
    }

    /// Render and wrap in the page shell.
    pub fn render_page(&self, template: u32, seed: u64) -> Result<String, RenderError> {
        Ok(self.render(template, seed)?.to_page(DEFAULT_TITLE))
    }

    fn substitute(&self, body: &str, type_index: usize, record: &Record) -> String {
        let Some(doc_type) = self.catalog.get(type_index) else {
            return body.to_string();
        };

        // A repeated field name keeps its first match position but resolves
        // to the value of its last declaration.
        let mut fields: Vec<(String, usize)> = Vec::with_capacity(doc_type.fields.len());
        for (i, field) in doc_type.fields.iter().enumerate() {
            let key = normalize_key(field);
            match fields.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = i,
                None => fields.push((key, i)),
            }
        }

        Template::parse(body).render(|raw| {
            let wanted = normalize_key(raw);
            let (_, index) = fields
                .iter()
                .find(|(key, _)| wanted == *key || wanted.starts_with(key.as_str()))?;
            record.get(*index).map(|value| format_value(value, raw))
        })
    }
}

/// Replace `{he}`, `{him}`, `{his}` and `{himself}` (any casing) with the
/// form from the seed's pronoun set, keeping the placeholder's casing.
pub fn resolve_pronouns(text: &str, seed: u64) -> String {
    let set = Pronouns::from_seed(seed);
    PRONOUN
        .replace_all(text, |caps: &Captures<'_>| {
            let token = &caps[1];
            match PronounForm::from_token(token) {
                Some(form) => CaseStyle::of(token).apply(set.form(form)),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

impl DocumentRendererBuilder {
    pub fn hierarchy(mut self, hierarchy: Hierarchy) -> Self {
        self.hierarchy = Some(Arc::new(hierarchy));
        self
    }

    pub fn shared_hierarchy(mut self, hierarchy: Arc<Hierarchy>) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    pub fn catalog(mut self, catalog: TypeCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<DocumentRenderer, RenderError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let catalog = self.catalog.unwrap_or_default();
        let lexicon = match self.lexicon {
            Some(lexicon) => lexicon,
            None => Lexicon::builtin()?,
        };
        let hierarchy = self.hierarchy.unwrap_or_default();

        for doc_type in catalog.iter() {
            if doc_type.fields.len() != config.fields_per_type {
                warn!(
                    doc_type = %doc_type.name,
                    fields = doc_type.fields.len(),
                    expected = config.fields_per_type,
                    "catalog type has an unexpected field count"
                );
            }
        }
        if hierarchy.is_empty() {
            warn!("master document has no sections; every render will fail");
        }

        Ok(DocumentRenderer {
            hierarchy,
            catalog,
            lexicon,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::catalog::DocType;

    fn renderer(doc: &str) -> DocumentRenderer {
        DocumentRenderer::builder()
            .hierarchy(Hierarchy::parse(doc))
            .build()
            .unwrap()
    }

    const COMPANIES: &str = "\
# Companies

## Origins

{name (first)} {name (last)} started in {location (city)} in {year}. \
{He} said {his} first hire came soon. Staff: {number + 5}, raw {number}.

## Bad math

{number ** 5} and {mystery}.
";

    #[test]
    fn renders_placeholders() {
        let r = renderer(COMPANIES);
        let doc = r.render(1, 99).unwrap();
        let body = doc.body.as_str();
        assert!(body.starts_with("# Companies\n\n## Origins\n\n"));
        assert!(!body.contains("{name"));
        assert!(!body.contains("{year}"));
        assert!(!body.contains("{He}"));
        assert_eq!(doc.seed, 99);
        assert_eq!(doc.title, "Companies");
    }

    #[test]
    fn arithmetic_placeholder_adds() {
        let r = renderer(COMPANIES);
        let record = RecordGenerator::new(r.catalog(), &Lexicon::builtin().unwrap())
            .generate(0, 99)
            .unwrap();
        let number = match record.values[4] {
            crate::schema::value::Value::Integer(n) => n,
            ref other => panic!("expected integer, got {:?}", other),
        };
        let body = r.render(1, 99).unwrap().body.into_string();
        assert!(body.contains(&format!("Staff: {}, raw {}.", number + 5, number)));

        let bad = r.render(2, 99).unwrap().body.into_string();
        assert!(bad.contains(&format!("{} and {{mystery}}.", number)));
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let r = renderer(COMPANIES);
        assert_eq!(r.render(1, 4321).unwrap(), r.render(1, 4321).unwrap());
    }

    #[test]
    fn zero_seed_reports_fresh_seed() {
        let r = renderer(COMPANIES);
        let doc = r.render(1, 0).unwrap();
        assert_ne!(doc.seed, 0);
        assert_eq!(r.render(1, doc.seed).unwrap().body, doc.body);
    }

    #[test]
    fn rejects_out_of_range_templates() {
        let r = renderer(COMPANIES);
        assert!(matches!(
            r.render(0, 1),
            Err(RenderError::InvalidTemplateIndex { index: 0, total: 15 })
        ));
        assert!(matches!(
            r.render(16, 1),
            Err(RenderError::InvalidTemplateIndex { index: 16, total: 15 })
        ));
    }

    #[test]
    fn type_index_beyond_catalog() {
        let r = DocumentRenderer::builder()
            .hierarchy(Hierarchy::parse(COMPANIES))
            .catalog(TypeCatalog::new(vec![DocType::new("Only", &["name"])]))
            .build()
            .unwrap();
        assert!(r.render(3, 1).is_ok());
        assert!(matches!(
            r.render(4, 1),
            Err(RenderError::TypeIndexOutOfRange { type_index: 1, len: 1, .. })
        ));
    }

    #[test]
    fn builder_rejects_overflowing_config() {
        let config = EngineConfig {
            num_types: 70_000,
            templates_per_type: 70_000,
            ..EngineConfig::default()
        };
        let result = DocumentRenderer::builder()
            .hierarchy(Hierarchy::parse(COMPANIES))
            .config(config)
            .build();
        assert!(matches!(result, Err(RenderError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn empty_hierarchy_aborts() {
        let r = renderer("");
        assert!(matches!(
            r.render(1, 1),
            Err(RenderError::Select(SelectError::EmptyHierarchy))
        ));
    }

    #[test]
    fn every_template_renders_on_small_document() {
        let r = renderer(COMPANIES);
        for template in 1..=r.config().total_templates() {
            assert!(r.render(template, 7).is_ok(), "template {} failed", template);
        }
    }

    #[test]
    fn pronoun_sets_follow_seed() {
        assert_eq!(resolve_pronouns("{him}", 3), "him");
        assert_eq!(resolve_pronouns("{him}", 4), "her");
        assert_eq!(resolve_pronouns("{him}", 5), "them");
        assert_eq!(resolve_pronouns("{Him}", 4), "Her");
        assert_eq!(resolve_pronouns("{HIS}", 5), "THEIR");
        assert_eq!(resolve_pronouns("{Himself} and {he}", 4), "Herself and she");
        assert_eq!(resolve_pronouns("{hIm}", 4), "her");
        assert_eq!(resolve_pronouns("{hers} {he said}", 4), "{hers} {he said}");
    }

    #[test]
    fn repeated_field_resolves_to_last_declaration() {
        let catalog = TypeCatalog::new(vec![DocType::new(
            "T",
            &["product", "price", "product"],
        )]);
        let r = DocumentRenderer::builder()
            .hierarchy(Hierarchy::parse("# T\n\n{product} | {product 1}\n"))
            .catalog(catalog.clone())
            .build()
            .unwrap();
        let record = RecordGenerator::new(&catalog, &Lexicon::builtin().unwrap())
            .generate(0, 21)
            .unwrap();
        let last = record.values[2].to_string();
        let body = r.render(1, 21).unwrap().body.into_string();
        assert!(body.ends_with(&format!("{} | {}\n", last, last)), "{}", body);
    }

    #[test]
    fn first_declared_field_wins_on_prefix() {
        let catalog = TypeCatalog::new(vec![DocType::new("T", &["price", "price number"])]);
        let r = DocumentRenderer::builder()
            .hierarchy(Hierarchy::parse("# T\n\n{price number}\n"))
            .catalog(catalog.clone())
            .build()
            .unwrap();
        let record = RecordGenerator::new(&catalog, &Lexicon::builtin().unwrap())
            .generate(0, 5)
            .unwrap();
        let body = r.render(1, 5).unwrap().body.into_string();
        assert!(body.contains(&record.values[0].to_string()));
    }
}
