use std::sync::Arc;

use adcraft_core::{AppConfig, BusinessProfile, Environment, LlmProviderKind};
use adcraft_generator::{GeminiProvider, GenerationError, GenerationGateway};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::generate::{exit_status, generate, user_facing};

const OWNER: &str = "6f1c2a9e-3b4d-4e5f-8a7b-1c2d3e4f5a6b";
const UNREACHABLE_DB: &str = "postgres://adcraft@127.0.0.1:1/adcraft";

fn config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        llm_provider: LlmProviderKind::Anthropic,
        gemini_api_key: None,
        anthropic_api_key: None,
        openai_api_key: None,
        llm_user_agent: "adcraft-test".to_string(),
        database_url: None,
        db_max_connections: 1,
        db_min_connections: 1,
        db_acquire_timeout_secs: 1,
    }
}

fn profile() -> BusinessProfile {
    BusinessProfile {
        business_name: "Kasi Kicks".to_string(),
        industry: "retail".to_string(),
        services: "Sneaker cleaning and resale".to_string(),
        target_audience: "Young people in the township".to_string(),
        brand_personality: "bold".to_string(),
        cultural_context: "township".to_string(),
        language: "english".to_string(),
    }
}

#[test]
fn parses_generate_command() {
    let cli = Cli::try_parse_from(["adcraft", "generate", "--profile", "kicks.yaml"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Generate { ref profile, save: false, .. } if profile.ends_with("kicks.yaml")
    ));
}

#[test]
fn save_without_owner_is_rejected_by_parser() {
    let parsed = Cli::try_parse_from(["adcraft", "generate", "--profile", "p.yaml", "--save"]);
    assert!(parsed.is_err());
}

#[test]
fn parses_invoice_create_with_ai_note() {
    let cli = Cli::try_parse_from([
        "adcraft", "invoice", "create", "--file", "inv.yaml", "--owner", OWNER, "--ai-note",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Invoice {
            command:
                InvoiceCommands::Create {
                    owner, ai_note, ..
                },
        } => {
            assert_eq!(owner.to_string(), OWNER);
            assert!(ai_note);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_posters_delete() {
    let id = "0b7e7c2e-0000-4000-8000-000000000001";
    let cli = Cli::try_parse_from(["adcraft", "posters", "delete", "--owner", OWNER, id])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Posters {
            command: PostersCommands::Delete { id: parsed, .. }
        } if parsed.to_string() == id
    ));
}

#[test]
fn posters_list_rejects_malformed_owner() {
    let parsed = Cli::try_parse_from(["adcraft", "posters", "list", "--owner", "not-a-uuid"]);
    assert!(parsed.is_err());
}

#[test]
fn missing_gateway_reports_configuration_error_on_use() {
    let ctx = AppContext::from_parts(config(), None, None);
    let err = ctx.generation_gateway().unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Configuration { ref provider, ref env_var }
            if provider == "anthropic" && env_var == "ANTHROPIC_API_KEY"
    ));
}

#[tokio::test]
async fn missing_pool_reports_missing_database_url() {
    let ctx = AppContext::from_parts(config(), None, None);
    assert!(matches!(
        ctx.pool().await,
        Err(adcraft_db::DbError::MissingDatabaseUrl)
    ));
}

#[test]
fn init_does_not_touch_the_database() {
    let mut cfg = config();
    cfg.database_url = Some(UNREACHABLE_DB.to_string());
    assert!(AppContext::init(cfg).is_ok());
}

#[test]
fn user_facing_error_leads_with_user_message() {
    let err = user_facing(GenerationError::InvalidInput("services is required".to_string()));
    assert_eq!(
        err.to_string(),
        "Please check your details: services is required."
    );
    assert!(err.downcast_ref::<GenerationError>().is_some());
}

#[test]
fn retryable_generation_failure_exits_with_tempfail() {
    let rate_limited = user_facing(GenerationError::RateLimited {
        provider: "gemini".to_string(),
        retry_after_secs: Some(20),
    });
    assert_eq!(exit_status(&rate_limited), 75);

    let bad_input = user_facing(GenerationError::InvalidInput("services is required".to_string()));
    assert_eq!(exit_status(&bad_input), 1);

    assert_eq!(exit_status(&anyhow::anyhow!("invoice not found")), 1);
}

#[test]
fn truncate_shortens_long_names() {
    assert_eq!(posters::truncate("Kasi Kicks", 24), "Kasi Kicks");
    assert_eq!(posters::truncate("abcdefgh", 5), "abcd~");
}

#[tokio::test]
async fn generate_without_key_fails_before_any_request() {
    let ctx = AppContext::from_parts(config(), None, None);
    let err = generate(&ctx, &profile()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "AI service configuration error - the API key is missing."
    );
}

/// Gateway backed by a wiremock Gemini endpoint that answers once.
async fn mocked_gateway(server: &MockServer) -> GenerationGateway {
    let answer = json!({
        "headline": "Fresh Kicks Daily",
        "subheading": "Clean sneakers, clean style",
        "description": "We restore your favourite pair. Drop off today.",
        "call_to_action": "Visit us",
        "visual_direction": {
            "primary_colors": ["#000000"],
            "secondary_colors": ["#ffffff"],
            "typography": "Graffiti headline",
            "mood": "Energetic",
            "cultural_elements": "Street murals",
            "layout_style": "Bold diagonal split"
        },
        "marketing_psychology": "Local pride"
    })
    .to_string();
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [ { "content": { "parts": [ { "text": answer } ] } } ]
        })))
        .expect(1)
        .mount(server)
        .await;

    let provider = GeminiProvider::with_base_url("test-key", "adcraft-test", &server.uri())
        .expect("provider construction should not fail");
    GenerationGateway::new(Arc::new(provider))
}

#[tokio::test]
async fn generate_runs_pipeline_through_context_gateway() {
    let server = MockServer::start().await;
    let ctx = AppContext::from_parts(config(), Some(mocked_gateway(&server).await), None);

    let content = generate(&ctx, &profile()).await.expect("generation should succeed");
    assert_eq!(content.visual_direction.primary_colors, ["#16537e", "#f39c12", "#e74c3c"]);
    assert!(content
        .visual_direction
        .cultural_elements
        .starts_with("Street murals "));
}

#[tokio::test]
async fn generate_succeeds_while_database_is_unreachable() {
    let server = MockServer::start().await;
    let mut cfg = config();
    cfg.database_url = Some(UNREACHABLE_DB.to_string());
    let ctx = AppContext::from_parts(cfg, Some(mocked_gateway(&server).await), None);

    let content = generate(&ctx, &profile()).await.expect("generation should succeed");
    assert_eq!(content.headline, "Fresh Kicks Daily");

    // Storage only fails once something asks for it.
    assert!(ctx.pool().await.is_err());
}
