//! HTTP coach service integration tests against a mock server

use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use interview_coach::application::ports::{AnswerOutcome, CoachService, ServiceError};
use interview_coach::domain::audio::AnswerAudio;
use interview_coach::domain::profile::{CandidateProfile, ExperienceLevel, InterviewDomain};
use interview_coach::domain::session::Question;
use interview_coach::infrastructure::HttpCoachService;

fn profile() -> CandidateProfile {
    CandidateProfile::new(
        "Alex",
        ExperienceLevel::Entry,
        InterviewDomain::SoftwareEngineering,
    )
    .unwrap()
}

#[tokio::test]
async fn start_interview_sends_profile_and_parses_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_interview"))
        .and(body_json(serde_json::json!({
            "name": "Alex",
            "experience_level": "entry",
            "domain": "software_engineering"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "interview_id": "abc123",
            "question": "Tell me about a recent project.",
            "total_questions": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpCoachService::new(server.uri());
    let start = service.start_interview(&profile()).await.unwrap();

    assert_eq!(start.interview_id, "abc123");
    assert_eq!(start.total_questions, 3);
    assert_eq!(
        start.first_question.prompt(),
        "Tell me about a recent project."
    );
}

#[tokio::test]
async fn submit_answer_maps_sentinel_to_completed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_answer/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "next_question": "Interview completed"
        })))
        .mount(&server)
        .await;

    let service = HttpCoachService::new(server.uri());
    let outcome = service
        .submit_answer("abc123", &Question::plain("Q3"), "my answer", None)
        .await
        .unwrap();

    assert_eq!(outcome, AnswerOutcome::Completed);
}

#[tokio::test]
async fn submit_answer_parses_structured_next_question() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_answer/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "next_question": {
                "question": "What is ownership in Rust?",
                "reference_answer": "A compile-time memory discipline"
            }
        })))
        .mount(&server)
        .await;

    let service = HttpCoachService::new(server.uri());
    let outcome = service
        .submit_answer("abc123", &Question::plain("Q1"), "answer", None)
        .await
        .unwrap();

    match outcome {
        AnswerOutcome::Next(question) => {
            assert_eq!(question.prompt(), "What is ownership in Rust?");
            assert_eq!(
                question.reference_answer(),
                Some("A compile-time memory discipline")
            );
        }
        other => panic!("expected Next, got {:?}", other),
    }
}

#[tokio::test]
async fn submit_answer_sends_multipart_fields_and_audio() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit_answer/"))
        .and(body_string_contains("name=\"interview_id\""))
        .and(body_string_contains("abc123"))
        .and(body_string_contains("name=\"question_id\""))
        .and(body_string_contains("Tell me about a recent project."))
        .and(body_string_contains("name=\"answer_text\""))
        .and(body_string_contains("I built a cache."))
        .and(body_string_contains("filename=\"recording.wav\""))
        .and(body_string_contains("audio/wav"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "next_question": "Next one"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpCoachService::new(server.uri());
    let audio = AnswerAudio::new(b"RIFFfakeWAVEdata".to_vec());

    let outcome = service
        .submit_answer(
            "abc123",
            &Question::plain("Tell me about a recent project."),
            "I built a cache.",
            Some(&audio),
        )
        .await
        .unwrap();

    assert!(matches!(outcome, AnswerOutcome::Next(_)));
}

#[tokio::test]
async fn non_success_status_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_interview"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let service = HttpCoachService::new(server.uri());
    let err = service.start_interview(&profile()).await.unwrap_err();

    match err {
        ServiceError::ApiError(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("internal error"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_interview"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let service = HttpCoachService::new(server.uri());
    let err = service.start_interview(&profile()).await.unwrap_err();

    assert!(matches!(err, ServiceError::ParseError(_)));
}

#[tokio::test]
async fn fetch_summary_maps_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/interview_summary/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_profile": {
                "name": "Alex",
                "experience_level": "entry",
                "domain": "software_engineering"
            },
            "responses": [
                {
                    "question": "Q1",
                    "answer": "A1",
                    "audio_transcription": "spoken version",
                    "feedback": {
                        "clarity_score": 80,
                        "relevance_score": 70,
                        "confidence_score": 60,
                        "improvement_tips": ["Give a concrete example"]
                    }
                },
                {
                    "question": "Q2",
                    "answer": "A2",
                    "audio_transcription": null,
                    "feedback": {
                        "clarity_score": 60,
                        "relevance_score": 90,
                        "confidence_score": 80
                    }
                }
            ]
        })))
        .mount(&server)
        .await;

    let service = HttpCoachService::new(server.uri());
    let summary = service.fetch_summary("abc123").await.unwrap();

    assert_eq!(summary.profile.name(), "Alex");
    assert_eq!(summary.responses.len(), 2);
    assert_eq!(
        summary.responses[0].audio_transcription.as_deref(),
        Some("spoken version")
    );
    assert!(summary.responses[1].audio_transcription.is_none());

    let averages = summary.averages().unwrap();
    assert_eq!(averages.clarity, 70.0);
    assert_eq!(averages.relevance, 80.0);
    assert_eq!(averages.confidence, 70.0);
}
