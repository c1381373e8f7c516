//! Unit tests for provider selection

use crate::sms::{select_weighted, EnvSmsProviderFactory, SmsSettings};
use mn_core::SmsProviderFactory;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn settings(pairs: &[(&str, &str)]) -> SmsSettings {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    SmsSettings::from_lookup(|key| map.get(key).cloned())
}

fn factory(pairs: &[(&str, &str)]) -> EnvSmsProviderFactory {
    EnvSmsProviderFactory::new().with_settings(settings(pairs))
}

fn weights(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

#[test]
fn test_missing_credential_falls_back_to_mock() {
    let provider = factory(&[("SMS_PROVIDER", "semaphore")]).get_provider();
    assert_eq!(provider.name(), "Mock");
}

#[test]
fn test_configured_provider_is_built() {
    let provider = factory(&[("SMS_PROVIDER", "Semaphore"), ("SEMAPHORE_API_KEY", "key")])
        .get_provider();
    assert_eq!(provider.name(), "Semaphore");

    let provider = factory(&[
        ("SMS_PROVIDER", "twilio"),
        ("TWILIO_ACCOUNT_SID", "AC1"),
        ("TWILIO_AUTH_TOKEN", "tok"),
        ("TWILIO_PHONE_NUMBER", "+15005550006"),
    ])
    .get_provider();
    assert_eq!(provider.name(), "Twilio");

    let provider = factory(&[
        ("SMS_PROVIDER", "ANDROID"),
        ("ANDROID_GATEWAY_URL", "http://192.168.1.20:8080/send"),
    ])
    .get_provider();
    assert_eq!(provider.name(), "AndroidGateway");
}

#[test]
fn test_unset_unknown_and_mock_names() {
    assert_eq!(factory(&[]).get_provider().name(), "Mock");
    assert_eq!(factory(&[("SMS_PROVIDER", "carrier-pigeon")]).get_provider().name(), "Mock");
    assert_eq!(factory(&[("SMS_PROVIDER", "mock")]).get_provider().name(), "Mock");
}

#[test]
fn test_single_weight_always_wins() {
    let factory = factory(&[
        ("SMS_PROVIDER", "random"),
        ("SMS_WEIGHTS", r#"{"semaphore":1.0}"#),
        ("SEMAPHORE_API_KEY", "key"),
    ]);
    let s = settings(&[("SMS_PROVIDER", "random"), ("SMS_WEIGHTS", r#"{"semaphore":1.0}"#)]);

    for draw in [0.0, 0.25, 0.5, 0.999] {
        let factory = factory.clone().with_draw(move || draw);
        assert_eq!(factory.select_provider_name(&s), "semaphore");
        assert_eq!(factory.get_provider().name(), "Semaphore");
    }
}

#[test]
fn test_draw_picks_by_cumulative_weight() {
    let s = settings(&[
        ("SMS_PROVIDER", "random"),
        ("SMS_WEIGHTS", r#"{"semaphore":0.5,"twilio":0.5}"#),
    ]);

    let low = EnvSmsProviderFactory::new().with_draw(|| 0.2);
    assert_eq!(low.select_provider_name(&s), "semaphore");

    let high = EnvSmsProviderFactory::new().with_draw(|| 0.7);
    assert_eq!(high.select_provider_name(&s), "twilio");
}

#[test]
fn test_selected_name_is_lowercased() {
    let s = settings(&[("SMS_PROVIDER", "RANDOM"), ("SMS_WEIGHTS", r#"{"Infobip":1}"#)]);
    let factory = EnvSmsProviderFactory::new().with_draw(|| 0.1);
    assert_eq!(factory.select_provider_name(&s), "infobip");
}

#[test]
fn test_malformed_weights_keep_random_and_yield_mock() {
    let pairs = [
        ("SMS_PROVIDER", "random"),
        ("SMS_WEIGHTS", "{semaphore: 1}"),
        ("SEMAPHORE_API_KEY", "key"),
    ];
    let factory = factory(&pairs).with_draw(|| 0.1);
    assert_eq!(factory.select_provider_name(&settings(&pairs)), "random");
    assert_eq!(factory.get_provider().name(), "Mock");

    // Valid JSON that is not an object is just as unusable
    let pairs = [("SMS_PROVIDER", "random"), ("SMS_WEIGHTS", "[1, 2]")];
    assert_eq!(
        EnvSmsProviderFactory::new().select_provider_name(&settings(&pairs)),
        "random"
    );
}

#[test]
fn test_draw_made_on_every_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let factory = factory(&[
        ("SMS_PROVIDER", "random"),
        ("SMS_WEIGHTS", r#"{"mock":1}"#),
    ])
    .with_draw(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        0.5
    });

    for _ in 0..3 {
        assert_eq!(factory.get_provider().name(), "Mock");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_select_weighted() {
    let map = weights(json!({"a": 0.2, "b": "heavy", "c": 0.3}));

    assert_eq!(select_weighted(&map, 0.0).as_deref(), Some("a"));
    assert_eq!(select_weighted(&map, 0.19).as_deref(), Some("a"));
    // "b" is not a number and can never be drawn
    assert_eq!(select_weighted(&map, 0.2).as_deref(), Some("c"));
    assert_eq!(select_weighted(&map, 0.49).as_deref(), Some("c"));
    // Weights sum to 0.5, so larger draws select nothing
    assert_eq!(select_weighted(&map, 0.5), None);
    assert_eq!(select_weighted(&Map::new(), 0.0), None);
}

#[test]
fn test_select_weighted_keeps_insertion_order() {
    let map: Map<String, Value> =
        serde_json::from_str(r#"{"zeta":0.5,"alpha":0.5}"#).unwrap();
    assert_eq!(select_weighted(&map, 0.1).as_deref(), Some("zeta"));
    assert_eq!(select_weighted(&map, 0.6).as_deref(), Some("alpha"));
}
