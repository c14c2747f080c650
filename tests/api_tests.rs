use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use medguide::clients::{LabelSource, ReasoningService};
use medguide::config::Config;
use medguide::db::Store;
use medguide::models::label::{LabelQuery, LabelRecord, OpenFdaMeta};
use medguide::state::SharedState;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Label source that answers from a fixed table and records every query.
#[derive(Default)]
struct FakeLabels {
    responses: Vec<(LabelQuery, Result<Vec<LabelRecord>, String>)>,
    calls: Mutex<Vec<LabelQuery>>,
}

impl FakeLabels {
    fn with(mut self, query: LabelQuery, response: Result<Vec<LabelRecord>, &str>) -> Self {
        self.responses
            .push((query, response.map_err(|e| e.to_string())));
        self
    }

    fn calls(&self) -> Vec<LabelQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LabelSource for FakeLabels {
    async fn search_labels(&self, query: &LabelQuery) -> anyhow::Result<Vec<LabelRecord>> {
        self.calls.lock().unwrap().push(query.clone());
        match self.responses.iter().find(|(q, _)| q == query) {
            Some((_, Ok(labels))) => Ok(labels.clone()),
            Some((_, Err(e))) => Err(anyhow::anyhow!("{e}")),
            None => Ok(Vec::new()),
        }
    }
}

type Reply = Box<dyn Fn(&str) -> anyhow::Result<Value> + Send + Sync>;

/// Reasoning service driven by a prompt-inspecting closure.
struct FakeReasoning {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl FakeReasoning {
    fn new(reply: impl Fn(&str) -> anyhow::Result<Value> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self::new(|_| Err(anyhow::anyhow!("service unavailable")))
    }

    fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ReasoningService for FakeReasoning {
    async fn complete_json(&self, prompt: &str) -> anyhow::Result<Value> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.reply)(prompt)
    }
}

struct TestApp {
    router: Router,
    store: Store,
    labels: Arc<FakeLabels>,
    reasoning: Arc<FakeReasoning>,
}

async fn spawn_app(labels: FakeLabels, reasoning: FakeReasoning) -> TestApp {
    let store = Store::in_memory().await.expect("Failed to open store");
    let labels = Arc::new(labels);
    let reasoning = Arc::new(reasoning);

    let shared = SharedState::with_clients(
        Config::default(),
        store.clone(),
        labels.clone(),
        reasoning.clone(),
    );
    let state = medguide::api::create_app_state(Arc::new(shared), None);

    TestApp {
        router: medguide::api::router(state),
        store,
        labels,
        reasoning,
    }
}

async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    owner: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        builder = builder.header("X-Cabinet-Owner", owner);
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, None).await
}

fn label(brands: &[&str], generics: &[&str]) -> LabelRecord {
    LabelRecord {
        openfda: OpenFdaMeta {
            brand_name: brands.iter().map(|s| (*s).to_string()).collect(),
            generic_name: generics.iter().map(|s| (*s).to_string()).collect(),
            pharm_class_epc: vec!["Analgesic [EPC]".to_string()],
        },
        purpose: vec!["Pain reliever/fever reducer".to_string()],
        warnings: vec!["Liver warning".to_string()],
        dosage_and_administration: vec!["Take 2 tablets every 6 hours".to_string()],
        ..LabelRecord::default()
    }
}

fn acetaminophen_summary() -> Value {
    json!({
        "standard_brand_name": "Acetaminophen",
        "standard_generic_name": "Acetaminophen",
        "common_brands": ["Tylenol", "Panadol"],
        "purpose": "Relieves mild to moderate pain and reduces fever.",
        "usage": ["Take with water", "Do not exceed 4 g per day"],
        "side_effects": ["Nausea", "Rash"],
        "warnings": ["Liver damage with alcohol"],
        "interactions": ["Warfarin"],
        "storage": "Store at room temperature."
    })
}

fn panadol_app_parts() -> (FakeLabels, FakeReasoning) {
    let labels = FakeLabels::default()
        .with(LabelQuery::ByName("panadol".into()), Ok(vec![]))
        .with(
            LabelQuery::ByGeneric("Acetaminophen".into()),
            Ok(vec![
                label(&["Tylenol Extra Strength"], &["ACETAMINOPHEN"]),
                label(&["Children's Tylenol"], &["ACETAMINOPHEN"]),
            ]),
        );
    let reasoning = FakeReasoning::new(|prompt| {
        if prompt.contains("generic name") {
            Ok(json!({"generic_name": "Acetaminophen"}))
        } else {
            Ok(acetaminophen_summary())
        }
    });
    (labels, reasoning)
}

#[tokio::test]
async fn test_blank_query_is_rejected_before_any_lookup() {
    let app = spawn_app(FakeLabels::default(), FakeReasoning::failing()).await;

    let (status, body) = get(&app, "/api/fda/search?query=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search term required");

    let (status, _) = get(&app, "/api/fda/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.labels.calls().is_empty());
    assert_eq!(app.reasoning.call_count(), 0);
}

#[tokio::test]
async fn test_brand_resolved_through_generic_name_and_cached() {
    let (labels, reasoning) = panadol_app_parts();
    let app = spawn_app(labels, reasoning).await;

    let (status, body) = get(&app, "/api/fda/search?query=Panadol").await;
    assert_eq!(status, StatusCode::OK);

    let summary = &body[0];
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(summary["source"], "US FDA (AI Enhanced)");
    assert_eq!(summary["brandName"], "Acetaminophen");
    assert_eq!(summary["brandNamesList"], json!(["Tylenol", "Panadol"]));
    assert_eq!(summary["pharmacologicClass"], "Analgesic [EPC]");
    assert_eq!(summary["dosage"][1], "Do not exceed 4 g per day");
    assert!(summary["rxcui"].is_null());

    assert_eq!(
        app.labels.calls(),
        vec![
            LabelQuery::ByName("panadol".into()),
            LabelQuery::ByGeneric("Acetaminophen".into()),
        ]
    );
    assert_eq!(app.reasoning.call_count(), 2);
    assert!(app.store.get_cached_summary("panadol").await.unwrap().is_some());

    let (status, cached) = get(&app, "/api/fda/search?query=%20PANADOL%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cached, body);
    assert_eq!(app.labels.calls().len(), 2);
    assert_eq!(app.reasoning.call_count(), 2);
}

#[tokio::test]
async fn test_direct_match_skips_name_resolution() {
    let labels = FakeLabels::default().with(
        LabelQuery::ByName("tylenol".into()),
        Ok(vec![
            label(&["Tylenol PM"], &["ACETAMINOPHEN AND DIPHENHYDRAMINE HYDROCHLORIDE"]),
            label(&["Tylenol"], &["ACETAMINOPHEN"]),
        ]),
    );
    let reasoning = FakeReasoning::new(|_| Ok(acetaminophen_summary()));
    let app = spawn_app(labels, reasoning).await;

    let (status, body) = get(&app, "/api/fda/search?query=tylenol").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["genericName"], "Acetaminophen");

    assert_eq!(app.labels.calls().len(), 1);
    assert_eq!(app.reasoning.call_count(), 1);
    let prompts = app.reasoning.prompts.lock().unwrap().clone();
    assert!(prompts[0].contains(r#""Acetaminophen""#));
}

#[tokio::test]
async fn test_summary_failure_falls_back_to_label_text() {
    let labels = FakeLabels::default().with(
        LabelQuery::ByName("advil".into()),
        Ok(vec![label(&["Advil"], &["IBUPROFEN"])]),
    );
    let app = spawn_app(labels, FakeReasoning::failing()).await;

    let (status, body) = get(&app, "/api/fda/search?query=Advil").await;
    assert_eq!(status, StatusCode::OK);

    let summary = &body[0];
    assert_eq!(summary["source"], "US FDA (Raw)");
    assert_eq!(summary["brandName"], "Ibuprofen");
    assert_eq!(summary["brandNamesList"], json!(["Advil"]));
    assert_eq!(summary["purpose"], "Pain reliever/fever reducer");
    assert_eq!(summary["sideEffects"], "Information not available.");
    assert!(summary.get("storage").is_none());

    assert!(app.store.get_cached_summary("advil").await.unwrap().is_some());
}

#[tokio::test]
async fn test_total_failure_is_not_found_without_cache_write() {
    let labels = FakeLabels::default().with(LabelQuery::ByName("curam".into()), Err("timeout"));
    let app = spawn_app(labels, FakeReasoning::failing()).await;

    let (status, body) = get(&app, "/api/fda/search?query=Curam").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No drugs found.");

    assert_eq!(app.labels.calls().len(), 1);
    assert_eq!(app.store.count_cached_summaries().await.unwrap(), 0);
}

#[tokio::test]
async fn test_single_word_generic_without_matches_is_not_found() {
    let reasoning = FakeReasoning::new(|_| Ok(json!({"generic_name": "Nothingamab"})));
    let app = spawn_app(FakeLabels::default(), reasoning).await;

    let (status, _) = get(&app, "/api/fda/search?query=unknownbrand").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(
        app.labels.calls(),
        vec![
            LabelQuery::ByName("unknownbrand".into()),
            LabelQuery::ByGeneric("Nothingamab".into()),
        ]
    );
    assert_eq!(app.store.count_cached_summaries().await.unwrap(), 0);
}

#[tokio::test]
async fn test_multi_word_generic_without_matches_retries_first_word() {
    let generic = "Amoxicillin and Clavulanate Potassium";
    let labels = FakeLabels::default()
        .with(LabelQuery::ByName("curam".into()), Ok(vec![]))
        .with(LabelQuery::ByGeneric(generic.into()), Ok(vec![]))
        .with(
            LabelQuery::ByGeneric("Amoxicillin".into()),
            Ok(vec![label(&["Amoxil"], &["AMOXICILLIN"])]),
        );
    let reasoning = FakeReasoning::new(move |prompt| {
        if prompt.contains("generic name") {
            Ok(json!({"generic_name": generic}))
        } else {
            Err(anyhow::anyhow!("busy"))
        }
    });
    let app = spawn_app(labels, reasoning).await;

    let (status, body) = get(&app, "/api/fda/search?query=Curam").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["brandNamesList"], json!(["Amoxil"]));

    assert_eq!(
        app.labels.calls(),
        vec![
            LabelQuery::ByName("curam".into()),
            LabelQuery::ByGeneric(generic.into()),
            LabelQuery::ByGeneric("Amoxicillin".into()),
        ]
    );
    assert!(app.store.get_cached_summary("curam").await.unwrap().is_some());
}

#[tokio::test]
async fn test_failed_generic_lookup_retries_first_word() {
    let generic = "Amoxicillin and Clavulanate Potassium";
    let labels = FakeLabels::default()
        .with(LabelQuery::ByGeneric(generic.into()), Err("connection reset"))
        .with(
            LabelQuery::ByGeneric("Amoxicillin".into()),
            Ok(vec![label(&["Amoxil"], &["AMOXICILLIN"])]),
        );
    let reasoning = FakeReasoning::new(move |prompt| {
        if prompt.contains("generic name") {
            Ok(json!({"generic_name": generic}))
        } else {
            Err(anyhow::anyhow!("busy"))
        }
    });
    let app = spawn_app(labels, reasoning).await;

    let (status, body) = get(&app, "/api/fda/search?query=curam").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["brandName"], "Amoxicillin And Clavulanate Potassium");

    let generic_calls: Vec<_> = app
        .labels
        .calls()
        .into_iter()
        .filter(|q| matches!(q, LabelQuery::ByGeneric(_)))
        .collect();
    assert_eq!(
        generic_calls,
        vec![
            LabelQuery::ByGeneric(generic.into()),
            LabelQuery::ByGeneric("Amoxicillin".into()),
        ]
    );
}

#[tokio::test]
async fn test_clear_cache_forces_fresh_lookup() {
    let (labels, reasoning) = panadol_app_parts();
    let app = spawn_app(labels, reasoning).await;

    let (status, _) = get(&app, "/api/fda/search?query=panadol").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/api/fda/clear-cache", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cache cleared.");
    assert_eq!(app.store.count_cached_summaries().await.unwrap(), 0);

    let (status, _) = get(&app, "/api/fda/search?query=panadol").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.labels.calls().len(), 4);
}

#[tokio::test]
async fn test_interaction_check_requires_two_drugs() {
    let app = spawn_app(FakeLabels::default(), FakeReasoning::failing()).await;

    for drugs in [json!([]), json!(["Aspirin"]), json!(["Aspirin", " aspirin ", ""])] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/safety/check",
            None,
            Some(json!({ "drugs": drugs })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("at least 2"));
    }

    let (status, _) = send(&app, "POST", "/api/safety/check", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.reasoning.call_count(), 0);
}

#[tokio::test]
async fn test_documented_interaction_is_answered_locally() {
    let app = spawn_app(FakeLabels::default(), FakeReasoning::failing()).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/safety/check",
        None,
        Some(json!({ "drugs": ["warfarin", "Aspirin"] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["safe"], false);
    assert_eq!(body["severity"], "Severe");
    assert_eq!(app.reasoning.call_count(), 0);
}

#[tokio::test]
async fn test_interaction_check_merges_documented_pairs() {
    let reasoning = FakeReasoning::new(|_| {
        Ok(json!({
            "safe": true,
            "severity": "Low",
            "summary": "Generally safe together.",
            "details": ["Take with food"]
        }))
    });
    let app = spawn_app(FakeLabels::default(), reasoning).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/safety/check",
        None,
        Some(json!({ "drugs": ["Ibuprofen", "Aspirin", "Zyrtec"] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["severity"], "Moderate");
    assert_eq!(body["safe"], false);
    assert_eq!(body["summary"], "Generally safe together.");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
    assert_eq!(app.reasoning.call_count(), 1);
}

#[tokio::test]
async fn test_interaction_check_reports_reasoning_failure() {
    let app = spawn_app(FakeLabels::default(), FakeReasoning::failing()).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/safety/check",
        None,
        Some(json!({ "drugs": ["Tylenol", "Zyrtec"] })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_cabinet_lifecycle() {
    let app = spawn_app(FakeLabels::default(), FakeReasoning::failing()).await;

    let (status, body) = get(&app, "/api/user/cabinet").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let entry = json!({
        "brandName": "Tylenol",
        "genericName": "Acetaminophen",
        "details": { "purpose": "Pain relief" }
    });
    let (status, body) = send(&app, "POST", "/api/user/add", None, Some(entry.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["brandName"], "Tylenol");
    assert_eq!(body[0]["details"]["purpose"], "Pain relief");
    let id = body[0]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "POST", "/api/user/add", None, Some(entry)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("Tylenol"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/user/add",
        None,
        Some(json!({ "brandName": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", "/api/user/cabinet/9999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", &format!("/api/user/cabinet/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_cabinets_are_isolated_by_owner() {
    let app = spawn_app(FakeLabels::default(), FakeReasoning::failing()).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/user/add",
        Some("alice"),
        Some(json!({ "brandName": "Zyrtec", "warnings": "Drowsiness" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body[0]["id"].as_i64().unwrap();

    let (_, body) = send(&app, "GET", "/api/user/cabinet", Some("bob"), None).await;
    assert_eq!(body, json!([]));

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/user/cabinet/{id}"),
        Some("bob"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/user/cabinet", Some("alice"), None).await;
    assert_eq!(body[0]["details"]["warnings"], "Drowsiness");
}

#[tokio::test]
async fn test_medicine_catalog_filter() {
    let app = spawn_app(FakeLabels::default(), FakeReasoning::failing()).await;

    let (status, body) = get(&app, "/api/medicines").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (status, body) = get(&app, "/api/medicines?letter=p").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Panadol");
    assert_eq!(body[0]["activeIngredient"], "Paracetamol");

    let (status, _) = get(&app, "/api/medicines?letter=12").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = spawn_app(FakeLabels::default(), FakeReasoning::failing()).await;

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}
