use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::support::{Harness, StubMatcher};
use aiml_engine::{CategorySource, EngineConfig};

#[test]
fn test_srai_evaluates_matched_template() {
    let matcher = StubMatcher::default().with("HELLO", "HI THERE");
    let harness = Harness::new(EngineConfig::default(), Arc::new(matcher));
    assert_eq!(harness.render("<srai>HELLO</srai>"), "HI THERE");
    assert_eq!(harness.render("<srai> hello! </srai>"), "HI THERE");
}

#[test]
fn test_srai_without_match_is_empty() {
    let harness = Harness::plain();
    assert_eq!(harness.render("[<srai>NOBODY HOME</srai>]"), "[]");
}

#[test]
fn test_self_recursion_is_bounded() {
    for max_recursion_depth in [1, 2, 5, 16] {
        let config = EngineConfig {
            max_recursion_depth,
            recursion_fallback: "[too deep]".to_string(),
            ..EngineConfig::default()
        };
        let matcher = StubMatcher::default().with("LOOP", "<srai>LOOP</srai>");
        let harness = Harness::new(config, Arc::new(matcher));
        assert_eq!(harness.render("<srai>LOOP</srai>"), "[too deep]");
    }
}

#[test]
fn test_category_cycle_is_bounded() {
    let config = EngineConfig {
        max_recursion_depth: 4,
        ..EngineConfig::default()
    };
    let fallback = config.recursion_fallback.clone();
    let matcher = StubMatcher::default()
        .with("PING", "ping <srai>PONG</srai>")
        .with("PONG", "pong <srai>PING</srai>");
    let harness = Harness::new(config, Arc::new(matcher));
    assert_eq!(
        harness.render("<srai>PING</srai>"),
        format!("ping pong ping pong {}", fallback)
    );
}

#[test]
fn test_depth_counts_nesting_not_calls() {
    let config = EngineConfig {
        max_recursion_depth: 1,
        ..EngineConfig::default()
    };
    let matcher = StubMatcher::default().with("A", "a").with("B", "b");
    let harness = Harness::new(config, Arc::new(matcher));
    // siblings each go one level deep
    assert_eq!(harness.render("<srai>A</srai><srai>B</srai><srai>A</srai>"), "aba");
}

#[test]
fn test_srai_passes_wildcards_through_categories() {
    let harness = Harness::with_categories(
        EngineConfig::default(),
        vec![
            CategorySource::new(
                "MY NAME IS *",
                r#"<think><set name="name"><formal><star/></formal></set></think>Nice to meet you, <get name="name"/>."#,
            ),
            CategorySource::new("CALL ME *", "<srai>MY NAME IS <star/></srai>"),
        ],
    );
    let stars = aiml_engine::MatchStars::from_input(["JOHN SMITH"]);
    assert_eq!(
        harness.render_with_stars("<srai>call me <star/></srai>", stars),
        "Nice to meet you, John Smith."
    );
    assert_eq!(harness.get("name"), Some("John Smith".to_string()));
}
