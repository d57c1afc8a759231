use pretty_assertions::assert_eq;

use crate::support::Harness;

#[test]
fn test_that_and_input_indices() {
    let harness = Harness::plain();
    harness.exchange("Hi there", "Hello! What is your name?");
    harness.exchange("Sam. And yours?", "I am Bot. Nice to meet you.");

    assert_eq!(harness.render("<that/>"), "Nice to meet you.");
    assert_eq!(harness.render(r#"<that index="1,2"/>"#), "I am Bot.");
    assert_eq!(harness.render(r#"<that index="2,1"/>"#), "What is your name?");
    assert_eq!(harness.render(r#"<input/>"#), "And yours?");
    assert_eq!(harness.render(r#"<input index="2"/>"#), "Hi there");
}

#[test]
fn test_out_of_range_history_is_empty() {
    let harness = Harness::plain();
    assert_eq!(harness.render("[<that/>]"), "[]");
    harness.exchange("one", "reply");
    assert_eq!(harness.render(r#"[<input index="2"/>]"#), "[]");
    assert_eq!(harness.render(r#"[<that index="1,3"/>]"#), "[]");
    assert_eq!(harness.render(r#"[<input index="0"/>]"#), "[]");
}
