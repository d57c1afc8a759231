use pretty_assertions::assert_eq;

use crate::support::Harness;

#[test]
fn test_block_condition() {
    let harness = Harness::plain();
    let markup = r#"<condition name="mood" value="happy">Glad to hear it</condition>"#;
    assert_eq!(harness.render(markup), "");
    harness.set("mood", "Happy!");
    assert_eq!(harness.render(markup), "Glad to hear it");
}

#[test]
fn test_single_predicate_list() {
    let harness = Harness::plain();
    let markup = r#"<condition name="weather">
        <li value="sunny">Go outside.</li>
        <li value="rain *">Take an umbrella.</li>
        <li>No idea.</li>
    </condition>"#;

    assert_eq!(harness.render(markup), "No idea.");
    harness.set("weather", "rain and wind");
    assert_eq!(harness.render(markup), "Take an umbrella.");
    harness.set("weather", "SUNNY");
    assert_eq!(harness.render(markup), "Go outside.");
}

#[test]
fn test_first_matching_item_wins() {
    let harness = Harness::plain();
    harness.set("n", "one");
    let markup = r#"<condition name="n"><li value="*">any</li><li value="one">exact</li></condition>"#;
    assert_eq!(harness.render(markup), "any");
}

#[test]
fn test_multi_predicate_list() {
    let harness = Harness::plain();
    let markup = r#"<condition>
        <li name="pet" value="cat">Meow.</li>
        <li name="pet" value="dog">Woof.</li>
        <li name="mood" value="sad">Cheer up.</li>
        <li value="orphan">skipped</li>
        <li>Hello.</li>
    </condition>"#;

    assert_eq!(harness.render(markup), "Hello.");
    harness.set("mood", "sad");
    assert_eq!(harness.render(markup), "Cheer up.");
    harness.set("pet", "dog");
    assert_eq!(harness.render(markup), "Woof.");
}

#[test]
fn test_no_match_and_no_default() {
    let harness = Harness::plain();
    harness.set("x", "b");
    assert_eq!(
        harness.render(r#"<condition name="x"><li value="a">A</li></condition>"#),
        ""
    );
}

#[test]
fn test_branch_side_effects_only_when_selected() {
    let harness = Harness::plain();
    harness.set("flag", "on");
    harness.render(
        r#"<condition name="flag">
            <li value="off"><set name="touched">off</set></li>
            <li value="on"><set name="touched">on</set></li>
        </condition>"#,
    );
    assert_eq!(harness.get("touched"), Some("on".to_string()));
}

#[test]
fn test_unmatchable_value_never_matches() {
    let harness = Harness::plain();
    harness.set("x", "anything");
    assert_eq!(
        harness.render(r#"<condition name="x"><li value="!!">never</li><li>fallback</li></condition>"#),
        "fallback"
    );
}

#[test]
fn test_punctuated_value_matches_same_predicate_text() {
    let harness = Harness::plain();
    harness.set("city", "New-York");
    assert_eq!(
        harness.render(r#"<condition name="city" value="New-York">yes</condition>"#),
        "yes"
    );

    harness.set("answer", "don't");
    assert_eq!(
        harness.render(r#"<condition name="answer"><li value="don't">negative</li><li>other</li></condition>"#),
        "negative"
    );
    assert_eq!(
        harness.render(r#"<condition name="answer"><li value="DON T">spaced</li><li>other</li></condition>"#),
        "spaced"
    );
}
