// Integration tests for ordered rule evaluation and first-match semantics

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{draft_article, published_article, TestEntity, TestRequest};
use reroute_core::{
    evaluate, evaluate_with_trace, EvalContext, ReaderRegistry, RedirectRule, Subject,
};
use serde_json::{json, Value};

fn post_save_rules() -> Vec<RedirectRule> {
    vec![
        RedirectRule::new(
            "request.data",
            "save_and_edit",
            json!({"controller": "Articles", "action": "edit", "0": ["entity.field", "id"]}),
        ),
        RedirectRule::new(
            "entity.field",
            "published",
            json!({"controller": "Articles", "action": "view", "0": ["entity.field", "slug"]}),
        ),
        RedirectRule::new(
            "subject.key",
            "success",
            json!({"controller": "Articles", "action": "index"}),
        ),
    ]
}

#[test]
fn test_ordered_rule_evaluation() {
    // Rules are evaluated in caller order; the first truthy guard wins
    let registry = ReaderRegistry::new();
    let request = TestRequest::new().with_data("save_and_edit", json!(true));
    let entity = published_article();
    let subject = Subject::new();
    let context = EvalContext::new(&request, &entity, &subject);

    let url = evaluate(&registry, &context, &post_save_rules()).unwrap();

    assert_eq!(
        url,
        Some(json!({"controller": "Articles", "action": "edit", "0": 42}))
    );
}

#[test]
fn test_first_match_never_invokes_later_readers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut registry = ReaderRegistry::new();
    registry.register(
        "probe.count",
        Arc::new(move |_context: &EvalContext<'_>, _key: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(json!(true))
        }),
    );

    let request = TestRequest::new();
    let entity = published_article();
    let subject = Subject::new();
    let context = EvalContext::new(&request, &entity, &subject);

    let rules = vec![
        RedirectRule::new("entity.field", "published", json!({"action": "view"})),
        RedirectRule::new("probe.count", "anything", json!({"action": "index"})),
        RedirectRule::new("probe.count", "anything", json!({"action": "home"})),
    ];

    let url = evaluate(&registry, &context, &rules).unwrap();

    assert_eq!(url, Some(json!({"action": "view"})));
    assert_eq!(
        calls.load(Ordering::SeqCst),
        0,
        "readers after the match must not be consulted"
    );
}

#[test]
fn test_catch_all_fallback() {
    // A subject-driven catch-all matches when earlier guards are falsy
    let registry = ReaderRegistry::new();
    let request = TestRequest::new().with_data("save_and_edit", json!(false));
    let entity = draft_article();
    let mut subject = Subject::new();
    subject.set("success", json!(true));
    let context = EvalContext::new(&request, &entity, &subject);

    let decision = evaluate_with_trace(&registry, &context, &post_save_rules()).unwrap();

    assert_eq!(
        decision.url,
        Some(json!({"controller": "Articles", "action": "index"}))
    );
    assert_eq!(decision.diagnostic.matched_position(), Some(2));
}

#[test]
fn test_no_match_when_every_guard_is_falsy() {
    let registry = ReaderRegistry::new();
    let request = TestRequest::new();
    let entity = draft_article();
    let subject = Subject::new();
    let context = EvalContext::new(&request, &entity, &subject);

    let url = evaluate(&registry, &context, &post_save_rules()).unwrap();

    assert_eq!(url, None);
}

#[test]
fn test_empty_rule_list_short_circuits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut registry = ReaderRegistry::empty();
    registry.register(
        "probe.count",
        Arc::new(move |_context: &EvalContext<'_>, _key: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(json!(true))
        }),
    );

    let request = TestRequest::new();
    let entity = TestEntity::new();
    let subject = Subject::new();
    let context = EvalContext::new(&request, &entity, &subject);

    let url = evaluate(&registry, &context, &[]).unwrap();

    assert_eq!(url, None);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_published_entity_redirects_to_view_by_slug() {
    let registry = ReaderRegistry::new();
    let request = TestRequest::new();
    let entity = published_article();
    let subject = Subject::new();
    let context = EvalContext::new(&request, &entity, &subject);

    let rules = vec![RedirectRule::new(
        "entity.field",
        "published",
        json!({"controller": "Articles", "action": "view", "0": ["entity.field", "slug"]}),
    )];

    let url = evaluate(&registry, &context, &rules).unwrap();

    assert_eq!(
        url,
        Some(json!({
            "controller": "Articles",
            "action": "view",
            "0": "hello-world",
        }))
    );
}

#[test]
fn test_invalid_reader_propagates_out_of_evaluate() {
    let registry = ReaderRegistry::new();
    let request = TestRequest::new();
    let entity = published_article();
    let subject = Subject::new();
    let context = EvalContext::new(&request, &entity, &subject);

    let rules = vec![RedirectRule::new(
        "session.read",
        "user_id",
        json!({"action": "view"}),
    )];

    let err = evaluate(&registry, &context, &rules).unwrap_err();
    assert_eq!(err.to_string(), "Invalid reader: session.read");

    // The same propagation applies to references inside a winning template
    let rules = vec![RedirectRule::new(
        "entity.field",
        "published",
        json!({"action": "view", "0": ["session.read", "user_id"]}),
    )];

    let err = evaluate(&registry, &context, &rules).unwrap_err();
    assert_eq!(err.to_string(), "Invalid reader: session.read");
}

#[test]
fn test_guard_value_only_gates_it_does_not_appear_in_url() {
    let registry = ReaderRegistry::new();
    let request = TestRequest::new().with_query("ref", json!("dashboard"));
    let entity = published_article();
    let subject = Subject::new();
    let context = EvalContext::new(&request, &entity, &subject);

    let rules = vec![RedirectRule::new(
        "entity.field",
        "published",
        json!({
            "action": "view",
            "?": {"ref": ["request.query", "ref"], "page": 1},
        }),
    )];

    let url = evaluate(&registry, &context, &rules).unwrap();

    assert_eq!(
        url,
        Some(json!({
            "action": "view",
            "?": {"ref": "dashboard", "page": 1},
        }))
    );
}

fn entity_with_value(value: Value) -> TestEntity {
    TestEntity::new().with_field("flag", value)
}

#[test]
fn test_falsy_guard_matrix() {
    let registry = ReaderRegistry::new();
    let request = TestRequest::new();
    let subject = Subject::new();
    let rules = vec![RedirectRule::new(
        "entity.field",
        "flag",
        json!({"action": "flagged"}),
    )];

    for falsy in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
        let entity = entity_with_value(falsy.clone());
        let context = EvalContext::new(&request, &entity, &subject);
        let url = evaluate(&registry, &context, &rules).unwrap();
        assert_eq!(url, None, "guard {falsy} should not match");
    }

    for truthy in [json!(true), json!(1), json!("0"), json!("yes"), json!([0])] {
        let entity = entity_with_value(truthy.clone());
        let context = EvalContext::new(&request, &entity, &subject);
        let url = evaluate(&registry, &context, &rules).unwrap();
        assert_eq!(
            url,
            Some(json!({"action": "flagged"})),
            "guard {truthy} should match"
        );
    }
}
