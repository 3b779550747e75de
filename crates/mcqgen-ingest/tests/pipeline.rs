//! End-to-end load-then-generate tests.
//!
//! The generation engine is the in-crate mock, and remote pages are served
//! by a throwaway axum server on localhost, so no external network is used.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{ConnectInfo, State};
use axum::http::{StatusCode, header};
use axum::response::Html;
use axum::routing::get;

use mcqgen_core::engine::mock::{MockEngine, MockResponse};
use mcqgen_core::{CoreError, Difficulty, GenerationOptions, QuestionCount, fingerprint};
use mcqgen_ingest::{
    GenerateError, IngestError, Source, generate_mcqs_from_data, generate_mcqs_with_client, load,
    loader_for, loader_with_client,
};
use mcqgen_ingest::SourceKind;

async fn spawn_site() -> String {
    let router = axum::Router::new()
        .route(
            "/article",
            get(|| async {
                Html(
                    "<html><head><script>track()</script></head>\
                     <body><h1>Geography</h1><p>Paris is the capital of France.</p></body></html>",
                )
            }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Html("<p>Page not found</p>")) }),
        )
        .route(
            "/latin1",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "text/html; charset=iso-8859-1")],
                    b"<p>Caf\xe9 cr\xe8me in S\xe8te.</p>".to_vec(),
                )
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn easy_one() -> GenerationOptions {
    GenerationOptions {
        num: QuestionCount::new(1).unwrap(),
        difficulty: Difficulty::Easy,
        ..Default::default()
    }
}

#[tokio::test]
async fn text_upload_yields_one_well_formed_question() {
    let engine = MockEngine::echo();
    let source = Source::Bytes {
        name: Some("paris.txt".into()),
        data: b"Paris is the capital of France.".to_vec(),
    };

    let set = generate_mcqs_from_data(&source, "text", &engine, &easy_one())
        .await
        .unwrap();

    assert_eq!(set.questions.len(), 1);
    let q = &set.questions[0];
    assert_eq!(q.options.len(), 4);
    assert!(q.options.contains(&q.correct_answer));

    let req = engine.last_request().unwrap();
    assert_eq!(req.topic, "Paris is the capital of France.");
    assert_eq!(req.num, 1);
    assert_eq!(req.difficulty_level, "Easy");
}

#[tokio::test]
async fn engine_questions_are_not_dropped_or_duplicated() {
    let canned = vec![mcqgen_core::Question {
        prompt: "What is the capital of France?".into(),
        options: vec!["Paris".into(), "Lyon".into(), "Nice".into(), "Lille".into()],
        correct_answer: "Paris".into(),
    }];
    let engine = MockEngine::new(MockResponse::Questions(canned.clone()));

    let set = generate_mcqs_from_data(
        &Source::bytes("Paris is the capital of France."),
        "text",
        &engine,
        &easy_one(),
    )
    .await
    .unwrap();

    assert_eq!(set.questions, canned);
    assert_eq!(engine.call_count(), 1);
}

#[tokio::test]
async fn unsupported_source_type_fails_before_loading() {
    let engine = MockEngine::echo();
    // A missing file would be an IO error if loading were attempted.
    let source = Source::File("/definitely/not/here.docx".into());

    let err = generate_mcqs_from_data(&source, "docx", &engine, &easy_one())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Core(CoreError::UnsupportedSourceType(ref s)) if s == "docx"
    ));
    assert!(err.is_config_error());
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn invalid_utf8_text_upload_fails() {
    let engine = MockEngine::echo();
    let err = generate_mcqs_from_data(&Source::bytes(vec![0xC3, 0x28]), "text", &engine, &easy_one())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::Ingest(IngestError::InvalidUtf8(_))));
    assert!(!err.is_config_error());
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn url_source_loads_visible_text() {
    let base = spawn_site().await;
    let loader = loader_for(SourceKind::Url);

    let doc = load(loader.as_ref(), &Source::Url(format!("{base}/article")))
        .await
        .unwrap();

    assert_eq!(doc.content, "Geography Paris is the capital of France.");
    assert_eq!(doc.id, fingerprint(&doc.content));
}

#[tokio::test]
async fn url_error_status_still_yields_body_text() {
    let base = spawn_site().await;
    let loader = loader_for(SourceKind::Url);

    let doc = load(loader.as_ref(), &Source::Url(format!("{base}/missing")))
        .await
        .unwrap();
    assert_eq!(doc.content, "Page not found");
}

#[tokio::test]
async fn url_pipeline_forwards_page_text_to_engine() {
    let base = spawn_site().await;
    let engine = MockEngine::echo();

    generate_mcqs_from_data(&Source::Url(format!("{base}/article")), "url", &engine, &easy_one())
        .await
        .unwrap();

    assert_eq!(
        engine.last_request().unwrap().topic,
        "Geography Paris is the capital of France."
    );
}

#[tokio::test]
async fn unreachable_url_is_http_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let engine = MockEngine::echo();
    let err = generate_mcqs_from_data(
        &Source::Url(format!("http://{addr}/")),
        "url",
        &engine,
        &easy_one(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, GenerateError::Ingest(IngestError::Http(_))));
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn text_file_on_disk_matches_upload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "Paris  is the capital\nof France.").unwrap();

    let loader = loader_for(SourceKind::Text);
    let from_file = load(loader.as_ref(), &Source::File(path)).await.unwrap();
    let from_upload = load(loader.as_ref(), &Source::bytes("Paris is the capital of France."))
        .await
        .unwrap();

    assert_eq!(from_file, from_upload);
}

#[tokio::test]
async fn url_body_is_decoded_with_declared_charset() {
    let base = spawn_site().await;
    let loader = loader_for(SourceKind::Url);

    let doc = load(loader.as_ref(), &Source::Url(format!("{base}/latin1")))
        .await
        .unwrap();
    assert_eq!(doc.content, "Café crème in Sète.");
}

/// Serves a page and records the client address of every request.
async fn spawn_peer_recorder() -> (String, Arc<Mutex<Vec<SocketAddr>>>) {
    let peers = Arc::new(Mutex::new(Vec::new()));
    let router = axum::Router::new()
        .route(
            "/",
            get(
                |State(peers): State<Arc<Mutex<Vec<SocketAddr>>>>,
                 ConnectInfo(peer): ConnectInfo<SocketAddr>| async move {
                    peers.lock().unwrap().push(peer);
                    Html("<p>Rust</p>")
                },
            ),
        )
        .with_state(Arc::clone(&peers));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    (format!("http://{addr}/"), peers)
}

#[tokio::test]
async fn shared_client_reuses_its_connection() {
    let (url, peers) = spawn_peer_recorder().await;
    let client = reqwest::Client::new();
    let engine = MockEngine::echo();

    for _ in 0..2 {
        generate_mcqs_with_client(&Source::Url(url.clone()), "url", &client, &engine, &easy_one())
            .await
            .unwrap();
    }
    let direct = loader_with_client(SourceKind::Url, &client);
    load(direct.as_ref(), &Source::Url(url.clone())).await.unwrap();

    let peers = peers.lock().unwrap();
    assert_eq!(peers.len(), 3);
    assert!(peers.iter().all(|p| *p == peers[0]), "connections: {peers:?}");
    assert_eq!(engine.call_count(), 2);
}
