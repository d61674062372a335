//! Integration tests for the analyze → preferences → schedule flow
//!
//! A scripted LLM client stands in for the service so the whole agent runs
//! without network access.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use prepplanner::agent::{AgentError, ModelClient, ModelReply, SchedulingAgent};
use prepplanner::domain::{Priority, ProductiveTime, TimeConstraints, UserPreferences};
use prepplanner::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, StopReason, TokenUsage};

// =============================================================================
// Scripted client
// =============================================================================

struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, u16>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Result<&str, u16>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(|r| r.map(str::to_string)).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn prompt(&self, index: usize) -> String {
        self.requests.lock().unwrap()[index].prompt.clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(CompletionResponse {
                content: Some(text),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            }),
            Some(Err(status)) => Err(LlmError::ApiError {
                status,
                message: "scripted failure".to_string(),
            }),
            None => Err(LlmError::InvalidResponse("script exhausted".to_string())),
        }
    }
}

const INTERVIEW_ANALYSIS: &str = r#"{
  "goal_name": "Interview Prep",
  "preparation_activities": [
    {"name": "Mock Interviews", "description": "Practice with a friend", "estimated_hours": 5, "priority": "high"},
    {"name": "Company Research", "description": "Read about the company", "estimated_hours": 2, "priority": "medium"}
  ],
  "total_preparation_time": "10",
  "recommended_timeline": "1 week"
}"#;

const ONE_DAY_SCHEDULE: &str = r#"{
  "daily_schedules": [
    {"date": "2024-01-01", "activities": [
      {"activity_name": "Mock Interviews", "start_time": "9:00 AM", "end_time": "10:00 AM", "notes": ""}
    ]}
  ],
  "total_scheduled_hours": 1,
  "schedule_notes": ""
}"#;

fn alex() -> UserPreferences {
    UserPreferences {
        name: "Alex".to_string(),
        time_constraints: TimeConstraints {
            wake_time: "7:00 AM".to_string(),
            sleep_time: "11:00 PM".to_string(),
        },
        productive_time: ProductiveTime::Morning,
        session_length_minutes: 60,
        commitments: vec!["Work 9 AM - 5 PM Monday-Friday".to_string()],
    }
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

// =============================================================================
// Flow tests
// =============================================================================

#[tokio::test]
async fn test_interview_flow_end_to_end() {
    let client = ScriptedClient::new(vec![Ok(INTERVIEW_ANALYSIS), Ok(ONE_DAY_SCHEDULE)]);
    let mut agent = SchedulingAgent::new(client.clone());

    let analysis = agent.analyze_goal("job interview next week").await.unwrap();
    assert_eq!(analysis.goal_name, "Interview Prep");
    assert_eq!(analysis.activities()[0].priority, Some(Priority::High));
    assert!(client.prompt(0).contains("job interview next week"));

    agent.collect_user_preferences(alex());

    let result = agent
        .generate_schedule_from("Interview Prep", 1, monday())
        .await
        .unwrap();
    assert_eq!(result.daily_schedules.len(), 1);
    assert_eq!(result.total_scheduled_hours, Some(1.0));
    assert_eq!(agent.schedule(), result.daily_schedules.as_slice());
    assert_eq!(client.calls(), 2);

    let schedule_prompt = client.prompt(1);
    assert!(schedule_prompt.contains("Mock Interviews"));
    assert!(schedule_prompt.contains("Work 9 AM - 5 PM Monday-Friday"));
    assert!(schedule_prompt.contains("2024-01-01"));
}

#[tokio::test]
async fn test_stored_goal_matches_reply() {
    let client = ScriptedClient::new(vec![Ok(INTERVIEW_ANALYSIS), Ok(ONE_DAY_SCHEDULE)]);
    let mut agent = SchedulingAgent::new(client);

    agent.analyze_goal("job interview").await.unwrap();
    let stored = serde_json::to_value(agent.goal("Interview Prep").unwrap()).unwrap();
    let received: serde_json::Value = serde_json::from_str(INTERVIEW_ANALYSIS).unwrap();
    assert_eq!(stored, received);

    agent.collect_user_preferences(alex());
    let result = agent
        .generate_schedule_from("Interview Prep", 1, monday())
        .await
        .unwrap();
    let received: serde_json::Value = serde_json::from_str(ONE_DAY_SCHEDULE).unwrap();
    assert_eq!(serde_json::to_value(&result).unwrap(), received);
}

#[tokio::test]
async fn test_sparse_analysis_is_stored_as_received() {
    let sparse = r#"{"goal_name": "Recital", "preparation_activities": [{"name": "Scales"}]}"#;
    let client = ScriptedClient::new(vec![Ok(sparse)]);
    let mut agent = SchedulingAgent::new(client);

    let analysis = agent.analyze_goal("piano recital").await.unwrap();
    assert_eq!(analysis.total_preparation_time, None);
    assert_eq!(analysis.activities()[0].estimated_hours, None);
    assert_eq!(
        serde_json::to_value(agent.goal("Recital").unwrap()).unwrap(),
        serde_json::from_str::<serde_json::Value>(sparse).unwrap()
    );
}

#[tokio::test]
async fn test_unknown_goal_is_rejected_without_a_call() {
    let client = ScriptedClient::new(vec![Ok(ONE_DAY_SCHEDULE)]);
    let mut agent = SchedulingAgent::new(client.clone());

    let err = agent
        .generate_schedule_from("Bar Exam", 7, monday())
        .await
        .unwrap_err();
    assert_eq!(err, AgentError::GoalNotFound("Bar Exam".to_string()));
    assert_eq!(client.calls(), 0);
    assert!(agent.schedule().is_empty());
}

#[tokio::test]
async fn test_reply_without_goal_name_stores_nothing() {
    let client = ScriptedClient::new(vec![Ok(r#"{"preparation_activities": []}"#), Ok("not json")]);
    let mut agent = SchedulingAgent::new(client.clone());

    let err = agent.analyze_goal("something").await.unwrap_err();
    assert!(matches!(err, AgentError::SchemaMismatch { ref field, .. } if field == "goal_name"));

    let err = agent.analyze_goal("something").await.unwrap_err();
    assert_eq!(err.raw_text(), Some("not json"));
    assert!(agent.goals().is_empty());
}

#[tokio::test]
async fn test_reanalysis_overwrites_by_name() {
    let renamed = INTERVIEW_ANALYSIS.replace("\"10\"", "\"12\"");
    let client = ScriptedClient::new(vec![Ok(INTERVIEW_ANALYSIS), Ok(renamed.as_str())]);
    let mut agent = SchedulingAgent::new(client);

    agent.analyze_goal("job interview").await.unwrap();
    agent.analyze_goal("job interview again").await.unwrap();

    assert_eq!(agent.goals().len(), 1);
    assert_eq!(
        agent
            .goal("Interview Prep")
            .and_then(|g| g.total_preparation_time.as_deref()),
        Some("12")
    );
}

#[tokio::test]
async fn test_failed_generation_keeps_previous_schedule() {
    let client = ScriptedClient::new(vec![Ok(INTERVIEW_ANALYSIS), Ok(ONE_DAY_SCHEDULE), Err(500)]);
    let mut agent = SchedulingAgent::new(client);

    agent.analyze_goal("job interview").await.unwrap();
    agent.collect_user_preferences(alex());
    agent
        .generate_schedule_from("Interview Prep", 1, monday())
        .await
        .unwrap();

    let err = agent
        .generate_schedule_from("Interview Prep", 1, monday())
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Transport(_)));
    assert_eq!(agent.schedule().len(), 1);
}

#[tokio::test]
async fn test_preferences_replaced_wholesale() {
    let client = ScriptedClient::new(vec![]);
    let mut agent = SchedulingAgent::new(client);

    agent.collect_user_preferences(alex());
    agent.collect_user_preferences(UserPreferences {
        name: "Sam".to_string(),
        ..Default::default()
    });

    let prefs = agent.preferences().unwrap();
    assert_eq!(prefs.name, "Sam");
    assert!(prefs.commitments.is_empty());
}

// =============================================================================
// Model client
// =============================================================================

#[tokio::test]
async fn test_get_response_classifies_replies() {
    let client = ScriptedClient::new(vec![Ok(r#"{"a": 1}"#), Ok("not json"), Err(401)]);
    let model = ModelClient::new(client);

    assert!(matches!(
        model.get_default_response("p", "s").await,
        ModelReply::Structured(ref map) if map.contains_key("a")
    ));
    assert_eq!(
        model.get_default_response("p", "s").await,
        ModelReply::Text("not json".to_string())
    );
    assert!(matches!(
        model.get_default_response("p", "s").await,
        ModelReply::TransportError(ref message) if message.contains("check your OpenAI API key")
    ));
}
