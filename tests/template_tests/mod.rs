mod condition_test;
mod history_test;
mod srai_test;
mod transform_test;

use pretty_assertions::assert_eq;

use crate::support::Harness;
use aiml_engine::{EngineConfig, MatchStars};

#[test]
fn test_random_picks_exactly_one_item() {
    let harness = Harness::plain();
    for _ in 0..50 {
        let output = harness.render("<random><li>A</li><li>B</li></random>");
        assert!(output == "A" || output == "B", "unexpected output {output:?}");
    }
}

#[test]
fn test_random_reaches_every_item() {
    let harness = Harness::plain();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(harness.render("<random><li>A</li><li>B</li><li>C</li></random>"));
    }
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_random_edge_cases() {
    let harness = Harness::plain();
    assert_eq!(harness.render("<random></random>"), "");
    assert_eq!(harness.render("<random> text <b>x</b> </random>"), "");
    assert_eq!(harness.render("<random><li>only</li></random>"), "only");
}

#[test]
fn test_seeded_random_is_reproducible() {
    let config = EngineConfig {
        random_seed: Some(42),
        ..EngineConfig::default()
    };
    let markup = "<random><li>1</li><li>2</li><li>3</li><li>4</li></random>\
                  <random><li>5</li><li>6</li><li>7</li><li>8</li></random>";
    let first = Harness::new(config.clone(), std::sync::Arc::new(crate::support::StubMatcher::default()));
    let second = Harness::new(config, std::sync::Arc::new(crate::support::StubMatcher::default()));
    assert_eq!(first.render(markup), second.render(markup));
}

#[test]
fn test_unknown_tag_passes_through() {
    let harness = Harness::plain();
    assert_eq!(
        harness.render(r#"<foo bar="1">X</foo>"#),
        r#"<foo bar="1">X</foo>"#
    );
    assert_eq!(
        harness.render(r#"<em><uppercase>loud</uppercase> <hr /></em>"#),
        r#"<em>LOUD <hr /></em>"#
    );
}

#[test]
fn test_set_get_and_think() {
    let harness = Harness::plain();
    assert_eq!(
        harness.render(r#"<think><set name="color">blue</set></think>Color is <get name="color"/>"#),
        "Color is blue"
    );
    assert_eq!(harness.get("color"), Some("blue".to_string()));
    assert_eq!(harness.render(r#"<set name="size"> large </set>"#), "large");
    assert_eq!(harness.render(r#"[<get name="unset"/>]"#), "[]");
}

#[test]
fn test_default_predicate_value() {
    let config = EngineConfig {
        default_predicate_value: "unknown".to_string(),
        ..EngineConfig::default()
    };
    let harness = Harness::new(config, std::sync::Arc::new(crate::support::StubMatcher::default()));
    assert_eq!(harness.render(r#"<get name="job"/>"#), "unknown");
}

#[test]
fn test_bot_properties() {
    let config = EngineConfig::default().with_bot_property("name", "Alice");
    let harness = Harness::new(config, std::sync::Arc::new(crate::support::StubMatcher::default()));
    assert_eq!(harness.render(r#"I am <bot name="name"/>."#), "I am Alice.");
    assert_eq!(harness.render(r#"<bot name="age"/>"#), "");
}

#[test]
fn test_star_indices() {
    let harness = Harness::plain();
    let stars = MatchStars {
        input: vec!["RED".to_string(), "BLUE".to_string()],
        that: vec!["TEA".to_string()],
        topic: vec!["SAILING".to_string()],
    };
    assert_eq!(
        harness.render_with_stars(
            r#"<star/>,<star index="2"/>,<star index="3"/>,<thatstar/>,<topicstar index="1"/>"#,
            stars
        ),
        "RED,BLUE,,TEA,SAILING"
    );
}

#[test]
fn test_meta_tags() {
    let harness = Harness::plain();
    assert_eq!(harness.render("<id/>"), "user-1");
    assert_eq!(harness.render("<version/>"), env!("CARGO_PKG_VERSION"));
    assert_eq!(harness.render("<size/>"), "0");
    assert_eq!(harness.render(r#"<date format="%Y"/>"#).len(), 4);
    assert!(!harness.render("<date/>").is_empty());
}

#[test]
fn test_literal_block_and_comment() {
    let harness = Harness::plain();
    assert_eq!(
        harness.render("<!-- note -->x <![CDATA[<srai>not a tag</srai>]]>"),
        "x <srai>not a tag</srai>"
    );
}
