//! End-to-end session flow against a mock coach service
//!
//! Drives the launcher and the wizard controller through a full typed
//! three-question interview, question by question, down to the summary.

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use interview_coach::application::ports::{AudioCue, LiveTranscriber, SessionStart};
use interview_coach::application::{SessionController, StartSession, SubmitOutcome};
use interview_coach::domain::profile::{CandidateProfile, ExperienceLevel, InterviewDomain};
use interview_coach::domain::session::SessionPhase;
use interview_coach::infrastructure::{
    CpalRecorder, HttpCoachService, NoOpAudioCue, NoOpTranscriber,
};

const Q1: &str = "Tell me about a recent project.";
const Q2: &str = "Describe a conflict you resolved.";
const Q3: &str = "Where do you want to grow next?";

fn profile() -> CandidateProfile {
    CandidateProfile::new(
        "Alex",
        ExperienceLevel::Entry,
        InterviewDomain::SoftwareEngineering,
    )
    .unwrap()
}

async fn mount_interview(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/start_interview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "interview_id": "abc123",
            "question": Q1,
            "total_questions": 3
        })))
        .mount(server)
        .await;

    // Each submission is routed on the question it answers
    Mock::given(method("POST"))
        .and(path("/submit_answer/"))
        .and(body_string_contains(Q1))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "next_question": Q2
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/submit_answer/"))
        .and(body_string_contains(Q2))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "next_question": Q3
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/submit_answer/"))
        .and(body_string_contains(Q3))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "next_question": "Interview completed"
        })))
        .mount(server)
        .await;

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
                    "question": Q1,
                    "answer": "I built a cache.",
                    "audio_transcription": null,
                    "feedback": {
                        "clarity_score": 80,
                        "relevance_score": 70,
                        "confidence_score": 90,
                        "improvement_tips": ["Quantify the impact"]
                    }
                },
                {
                    "question": Q2,
                    "answer": "I talked it through.",
                    "audio_transcription": null,
                    "feedback": {
                        "clarity_score": 70,
                        "relevance_score": 80,
                        "confidence_score": 60
                    }
                },
                {
                    "question": Q3,
                    "answer": "Distributed systems.",
                    "audio_transcription": null,
                    "feedback": {
                        "clarity_score": 90,
                        "relevance_score": 90,
                        "confidence_score": 90
                    }
                }
            ]
        })))
        .mount(server)
        .await;
}

fn controller(
    service: HttpCoachService,
    start: SessionStart,
) -> SessionController<HttpCoachService, CpalRecorder, Box<dyn LiveTranscriber>, Box<dyn AudioCue>>
{
    SessionController::new(
        service,
        CpalRecorder::new(),
        Box::new(NoOpTranscriber) as Box<dyn LiveTranscriber>,
        Box::new(NoOpAudioCue) as Box<dyn AudioCue>,
        start,
    )
}

#[tokio::test]
async fn full_typed_interview_down_to_summary() {
    let server = MockServer::start().await;
    mount_interview(&server).await;

    let service = HttpCoachService::new(server.uri());
    let start = StartSession::new(service.clone())
        .execute(&profile())
        .await
        .unwrap();

    assert_eq!(start.interview_id, "abc123");

    let mut c = controller(service, start);
    assert_eq!(c.position(), (1, 3));
    assert_eq!(c.question().prompt(), Q1);
    assert!(!c.transcription_available());

    c.append_typed("I built a cache.");
    assert_eq!(c.submit().await.unwrap(), SubmitOutcome::NextQuestion);
    assert_eq!(c.position(), (2, 3));
    assert_eq!(c.question().prompt(), Q2);
    assert!(c.draft().is_empty());

    c.append_typed("I talked it through.");
    assert_eq!(c.submit().await.unwrap(), SubmitOutcome::NextQuestion);
    assert_eq!(c.position(), (3, 3));
    assert_eq!(c.question().prompt(), Q3);

    c.append_typed("Distributed systems.");
    assert_eq!(c.submit().await.unwrap(), SubmitOutcome::Completed);
    assert_eq!(c.phase(), SessionPhase::Completed);

    let summary = c.fetch_summary().await.unwrap();
    assert_eq!(summary.profile.name(), "Alex");
    assert_eq!(summary.responses.len(), 3);

    let averages = summary.averages().unwrap();
    assert_eq!(averages.clarity, 80.0);
    assert_eq!(averages.relevance, 80.0);
    assert_eq!(averages.confidence, 80.0);
}

#[tokio::test]
async fn failed_submission_keeps_question_and_draft() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_interview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "interview_id": "abc123",
            "question": Q1,
            "total_questions": 3
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/submit_answer/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let service = HttpCoachService::new(server.uri());
    let start = StartSession::new(service.clone())
        .execute(&profile())
        .await
        .unwrap();

    let mut c = controller(service, start);
    c.append_typed("my answer");

    assert!(c.submit().await.is_err());
    assert_eq!(c.phase(), SessionPhase::AwaitingAnswer);
    assert_eq!(c.position(), (1, 3));
    assert_eq!(c.draft().committed(), "my answer");
}

#[tokio::test]
async fn summary_fetch_is_rejected_before_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_interview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "interview_id": "abc123",
            "question": Q1,
            "total_questions": 3
        })))
        .mount(&server)
        .await;

    let service = HttpCoachService::new(server.uri());
    let start = StartSession::new(service.clone())
        .execute(&profile())
        .await
        .unwrap();

    let c = controller(service, start);
    assert!(c.fetch_summary().await.is_err());
}
