//! End-to-end rendering against the fixture master document.

use decoy_pages::core::config::EngineConfig;
use decoy_pages::core::hierarchy::Hierarchy;
use decoy_pages::core::renderer::{DocumentRenderer, RenderError};
use decoy_pages::core::selector::SelectError;
use std::path::Path;

fn fixture_renderer() -> DocumentRenderer {
    let hierarchy = Hierarchy::load(Path::new("tests/fixtures/master.md")).unwrap();
    DocumentRenderer::builder()
        .hierarchy(hierarchy)
        .build()
        .unwrap()
}

#[test]
fn fixture_parses_into_five_by_three() {
    let renderer = fixture_renderer();
    let hierarchy = renderer.hierarchy();
    assert_eq!(hierarchy.len(), 5);
    let titles: Vec<&String> = hierarchy.iter().map(|(title, _)| title).collect();
    assert_eq!(
        titles,
        vec![
            "Company Profiles",
            "Artist Biographies",
            "Product Reviews",
            "Political Figures",
            "Research Portraits",
        ]
    );
}

#[test]
fn every_template_resolves_every_placeholder() {
    let renderer = fixture_renderer();
    for template in 1..=renderer.config().total_templates() {
        for seed in [1u64, 2, 3, 1_000_003, 2_147_483_647] {
            let doc = renderer.render(template, seed).unwrap();
            let body = doc.body.as_str();
            assert!(body.starts_with("# "), "template {} lacks a heading", template);
            assert!(
                !body.contains('{') && !body.contains('}'),
                "template {} seed {} left a placeholder:\n{}",
                template,
                seed,
                body
            );
        }
    }
}

#[test]
fn templates_map_to_sections_in_order() {
    let renderer = fixture_renderer();
    let doc = renderer.render(1, 10).unwrap();
    assert_eq!(doc.title, "Company Profiles");
    assert!(doc.body.as_str().contains("## Founding Story"));

    let doc = renderer.render(6, 10).unwrap();
    assert_eq!(doc.title, "Artist Biographies");
    assert!(doc.body.as_str().contains("## On Tour"));

    let doc = renderer.render(15, 10).unwrap();
    assert_eq!(doc.title, "Research Portraits");
    assert!(doc.body.as_str().contains("## Recognition"));
}

#[test]
fn same_pair_same_document() {
    let renderer = fixture_renderer();
    let a = renderer.render_page(8, 555_555).unwrap();
    let b = renderer.render_page(8, 555_555).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_change_the_document() {
    let renderer = fixture_renderer();
    let base = renderer.render(4, 1).unwrap().body;
    let changed = (2..30).any(|seed| renderer.render(4, seed).unwrap().body != base);
    assert!(changed);
}

#[test]
fn fresh_seeds_are_recorded_and_vary() {
    let renderer = fixture_renderer();
    let seeds: Vec<u64> = (0..5).map(|_| renderer.render(2, 0).unwrap().seed).collect();
    assert!(seeds.iter().all(|&s| s >= 1 && s <= (1 << 31) - 1));
    assert!(seeds.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn pronouns_follow_seed_modulo_three() {
    let renderer = fixture_renderer();
    // "Leadership": "{His} office ... {he} answers every letter {himself}."
    let he = renderer.render(3, 300).unwrap().body.into_string();
    let she = renderer.render(3, 301).unwrap().body.into_string();
    let they = renderer.render(3, 302).unwrap().body.into_string();
    assert!(he.contains("His office") && he.contains("letter himself"));
    assert!(she.contains("Her office") && she.contains("letter herself"));
    assert!(they.contains("Their office") && they.contains("letter themself"));
}

#[test]
fn page_wraps_rendered_html() {
    let renderer = fixture_renderer();
    let page = renderer.render_page(10, 77).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<h1>Political Figures</h1>"));
    assert!(page.contains("<h2>Biography</h2>"));
}

#[test]
fn smaller_document_wraps_around() {
    let doc = "# First\n\n## F1\n\nfirst {name}\n\n## F2\n\nsecond\n\n\
               # Second\n\n## S1\n\nthird\n\n## S2\n\nfourth\n";
    let renderer = DocumentRenderer::builder()
        .hierarchy(Hierarchy::parse(doc))
        .config(EngineConfig {
            num_types: 5,
            templates_per_type: 3,
            ..EngineConfig::default()
        })
        .build()
        .unwrap();

    let wrapped = renderer.render(7, 9).unwrap();
    assert_eq!(wrapped.title, "First");
    assert!(wrapped.body.as_str().contains("## F1"));

    for template in 1..=15 {
        assert!(renderer.render(template, 9).is_ok());
    }
}

#[test]
fn empty_document_cannot_be_served() {
    let renderer = DocumentRenderer::builder()
        .hierarchy(Hierarchy::parse("no headings here"))
        .build()
        .unwrap();
    assert!(matches!(
        renderer.render(1, 1),
        Err(RenderError::Select(SelectError::EmptyHierarchy))
    ));
}
