use pretty_assertions::assert_eq;

use crate::support::Harness;
use aiml_engine::MatchStars;

#[test]
fn test_case_transforms() {
    let harness = Harness::plain();
    assert_eq!(harness.render("<uppercase>make me loud</uppercase>"), "MAKE ME LOUD");
    assert_eq!(harness.render("<lowercase>QUIET Please</lowercase>"), "quiet please");
    assert_eq!(harness.render("<formal>jOHN smith</formal>"), "John Smith");
    assert_eq!(
        harness.render("<sentence>hello there. how are you?</sentence>"),
        "Hello there. How are you?"
    );
}

#[test]
fn test_transforms_apply_to_evaluated_content() {
    let harness = Harness::plain();
    harness.set("city", "paris");
    assert_eq!(
        harness.render(r#"<uppercase>I love <get name="city"/></uppercase>"#),
        "I LOVE PARIS"
    );
}

#[test]
fn test_person_shifts() {
    let harness = Harness::plain();
    assert_eq!(harness.render("<person2>I think you are right</person2>"), "you think I am right");
    assert_eq!(harness.render("<person>he is my friend</person>"), "I am his or her friend");
    assert_eq!(harness.render("<gender>she gave him the book</gender>"), "he gave her the book");
}

#[test]
fn test_person_shorthand_uses_star() {
    let harness = Harness::plain();
    let stars = MatchStars::from_input(["I LOVE YOU"]);
    assert_eq!(harness.render_with_stars("<person2/>", stars), "you love me");
}

#[test]
fn test_custom_substitution_table() {
    let config: aiml_engine::EngineConfig = aiml_engine::config::from_str(
        r#"{ "substitutions": { "person2": [["ROBOT", "human"], ["HUMAN", "robot"]] } }"#,
    )
    .unwrap();
    let harness = Harness::new(
        config,
        std::sync::Arc::new(crate::support::StubMatcher::default()),
    );
    assert_eq!(
        harness.render("<person2>the robot met a human</person2>"),
        "the human met a robot"
    );
}
