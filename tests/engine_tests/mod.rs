use std::sync::Arc;

use pretty_assertions::assert_eq;

use aiml_engine::{
    matcher::CategoryField, session::MockSession, text::SubstitutionTable, CategoryMatcher,
    CategorySource, Engine, EngineConfig, HistorySlot, InMemorySession, Session, SessionError,
    SessionId,
};

fn greeting_categories() -> Vec<CategorySource> {
    vec![
        CategorySource::new("HELLO", "Hi there!"),
        CategorySource::new("HOW ARE YOU", "Fine, thanks. And you?"),
        CategorySource::new("FINE", "Glad to hear it.").with_that("AND YOU"),
        CategorySource::new("FINE", "Fine what?"),
        CategorySource::new(
            "LET US TALK ABOUT *",
            r#"<think><set name="topic"><star/></set></think>Sure, <lowercase><star/></lowercase>."#,
        ),
        CategorySource::new("WHAT IS GOOD", "Fresh pasta.").with_topic("COOKING"),
        CategorySource::new("WHAT IS GOOD", "Sleep."),
        CategorySource::new("ECHO *", "You said: <input/>"),
        CategorySource::new("WHAT WAS BEFORE", "Before: <justthat/>"),
        CategorySource::new("WHAT DID I SAY", r#"You said: <input index="2"/>"#),
    ]
}

fn engine_with(config: EngineConfig, categories: Vec<CategorySource>) -> (Engine, Arc<InMemorySession>) {
    let mut matcher = CategoryMatcher::new();
    let report = matcher.load_categories(categories);
    assert!(report.skipped.is_empty(), "{:?}", report.skipped);
    let session = Arc::new(InMemorySession::new(config.max_history));
    let engine = Engine::standard(
        config,
        Arc::clone(&session) as Arc<dyn Session>,
        Arc::new(matcher),
    )
    .unwrap();
    (engine, session)
}

#[test]
fn test_respond_to_single_sentence() {
    let (engine, _) = engine_with(EngineConfig::default(), greeting_categories());
    let id = SessionId::from("alice");
    assert_eq!(engine.respond("hello", &id), "Hi there!");
    assert_eq!(engine.respond("  Hello!!  ", &id), "Hi there!");
}

#[test]
fn test_respond_joins_sentence_replies() {
    let (engine, _) = engine_with(EngineConfig::default(), greeting_categories());
    let id = SessionId::from("alice");
    assert_eq!(
        engine.respond("Hello. How are you?", &id),
        "Hi there! Fine, thanks. And you?"
    );
}

#[test]
fn test_unmatched_input_uses_fallback_response() {
    let config = EngineConfig {
        fallback_response: "I have no answer for that.".to_string(),
        ..EngineConfig::default()
    };
    let (engine, _) = engine_with(config, greeting_categories());
    assert_eq!(
        engine.respond("what is the airspeed of a swallow", &SessionId::from("alice")),
        "I have no answer for that."
    );
}

#[test]
fn test_that_context_follows_previous_response() {
    let (engine, _) = engine_with(EngineConfig::default(), greeting_categories());
    let id = SessionId::from("alice");
    assert_eq!(engine.respond("fine", &id), "Fine what?");
    engine.respond("how are you", &id);
    assert_eq!(engine.respond("fine", &id), "Glad to hear it.");
}

#[test]
fn test_topic_set_by_template_selects_category() {
    let (engine, _) = engine_with(EngineConfig::default(), greeting_categories());
    let id = SessionId::from("alice");
    assert_eq!(engine.respond("what is good", &id), "Sleep.");
    assert_eq!(engine.respond("let us talk about cooking", &id), "Sure, cooking.");
    assert_eq!(engine.respond("what is good", &id), "Fresh pasta.");

    // other sessions keep their own topic
    assert_eq!(engine.respond("what is good", &SessionId::from("bob")), "Sleep.");
}

#[test]
fn test_input_history_includes_current_sentence() {
    let (engine, session) = engine_with(EngineConfig::default(), greeting_categories());
    let id = SessionId::from("alice");
    assert_eq!(engine.respond("echo banana", &id), "You said: echo banana");
    assert_eq!(engine.respond("apple", &id), "");
    assert_eq!(engine.respond("what was before", &id), "Before: apple");

    assert_eq!(
        session.get_history(HistorySlot::input(1), &id).unwrap(),
        Some("what was before".to_string())
    );
    assert_eq!(
        session.get_history(HistorySlot::that(1), &id).unwrap(),
        Some("Before: apple".to_string())
    );
    // the unmatched turn still recorded an empty reply
    assert_eq!(
        session.get_history(HistorySlot::that(2), &id).unwrap(),
        Some(String::new())
    );
}

#[test]
fn test_history_is_recorded_per_sentence() {
    let (engine, session) = engine_with(EngineConfig::default(), greeting_categories());
    let id = SessionId::from("alice");
    assert_eq!(
        engine.respond("Hello. What did I say?", &id),
        "Hi there! You said: Hello."
    );
    assert_eq!(
        session.get_history(HistorySlot::that(2), &id).unwrap(),
        Some("Hi there!".to_string())
    );
}

#[test]
fn test_input_substitutions_run_before_splitting() {
    let mut config = EngineConfig::default();
    config.substitutions.input = SubstitutionTable::from_pairs([("what's", "what is"), ("u.s.", "US")]);
    let (engine, _) = engine_with(
        config,
        vec![
            CategorySource::new("WHAT IS UP", "Not much."),
            CategorySource::new("I LIVE IN THE US", "Nice."),
        ],
    );
    let id = SessionId::from("alice");
    assert_eq!(engine.respond("What's up", &id), "Not much.");
    // without the table "U.S." would split into three sentences
    assert_eq!(engine.respond("I live in the U.S.", &id), "Nice.");
}

#[test]
fn test_literal_whitespace_survives_the_turn() {
    let (engine, _) = engine_with(
        EngineConfig::default(),
        vec![CategorySource::new("ART", "<![CDATA[/\\_   _/\\]]>")],
    );
    assert_eq!(engine.respond("art", &SessionId::from("alice")), "/\\_   _/\\");
}

#[test]
fn test_empty_replies_leave_no_gaps() {
    let (engine, _) = engine_with(EngineConfig::default(), greeting_categories());
    assert_eq!(
        engine.respond("hello. nothing matches this. hello", &SessionId::from("alice")),
        "Hi there! Hi there!"
    );
}

#[test]
fn test_budget_exhaustion_degrades_to_fallback() {
    let config = EngineConfig {
        max_steps: 3,
        fallback_response: "Too much.".to_string(),
        ..EngineConfig::default()
    };
    let (engine, _) = engine_with(
        config,
        vec![
            CategorySource::new("BIG", "<uppercase>a <lowercase>b <formal>c</formal></lowercase></uppercase>"),
            CategorySource::new("SMALL", "ok"),
        ],
    );
    let id = SessionId::from("alice");
    assert_eq!(engine.respond("big", &id), "Too much.");
    // every sentence gets a fresh budget
    assert_eq!(engine.respond("small. big. small", &id), "ok Too much. ok");
}

#[test]
fn test_record_failure_keeps_response() {
    let mut session = MockSession::new();
    session.expect_get_predicate().returning(|_, _| Ok(None));
    session.expect_get_history().returning(|_, _| Ok(None));
    session
        .expect_push_history()
        .times(2)
        .returning(|_, _, _| Err(SessionError::Storage("disk full".to_string())));

    let mut matcher = CategoryMatcher::new();
    matcher.load_categories(greeting_categories());
    let engine = Engine::standard(EngineConfig::default(), Arc::new(session), Arc::new(matcher)).unwrap();
    assert_eq!(engine.respond("hello", &SessionId::from("alice")), "Hi there!");
}

#[test]
fn test_predicate_failure_uses_fallback() {
    let mut session = MockSession::new();
    session
        .expect_get_predicate()
        .returning(|_, _| Err(SessionError::Unavailable("alice".to_string())));
    session.expect_get_history().returning(|_, _| Ok(None));
    session.expect_push_history().returning(|_, _, _| Ok(()));

    let mut matcher = CategoryMatcher::new();
    matcher.load_categories(greeting_categories());
    let config = EngineConfig {
        fallback_response: "Sorry.".to_string(),
        ..EngineConfig::default()
    };
    let engine = Engine::standard(config, Arc::new(session), Arc::new(matcher)).unwrap();
    assert_eq!(engine.respond("hello", &SessionId::from("alice")), "Sorry.");
}

#[test]
fn test_load_report_skips_bad_categories() {
    let mut matcher = CategoryMatcher::new();
    let report = matcher.load_categories(vec![
        CategorySource::new("HELLO", "Hi!"),
        CategorySource::new("hello there", "lowercase pattern"),
        CategorySource::new("BYE", "<b>unclosed"),
        CategorySource::new("BYE", "Bye!").with_that("***"),
        CategorySource::new("BYE", "Bye!"),
    ]);

    assert_eq!(report.loaded, 2);
    assert_eq!(matcher.len(), 2);
    let skipped: Vec<(usize, CategoryField)> =
        report.skipped.iter().map(|d| (d.index, d.field)).collect();
    assert_eq!(
        skipped,
        vec![
            (1, CategoryField::Pattern),
            (2, CategoryField::Template),
            (3, CategoryField::That),
        ]
    );
    assert_eq!(report.skipped[0].offending, "hello there");
    assert!(report.skipped[1].to_string().starts_with("category 2 (template \"<b>unclosed\")"));
}
