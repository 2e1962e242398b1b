use super::*;
use crate::catalog::AgentDescriptor;
use crate::error::Error;
use crate::message::ConversationMessage;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Replies with the agent codename and the number of messages seen
struct Echo;

#[async_trait]
impl AgentHandler for Echo {
    async fn reply(&self, agent: &AgentDescriptor, request: &InboundRequest) -> HandlerResult<String> {
        Ok(format!("{}:{}", agent.codename, request.messages.len()))
    }
}

struct Failing;

#[async_trait]
impl AgentHandler for Failing {
    async fn reply(&self, _agent: &AgentDescriptor, _request: &InboundRequest) -> HandlerResult<String> {
        Err(HandlerFailure::Failed("upstream refused".to_string()))
    }
}

struct Slow(Duration);

#[async_trait]
impl AgentHandler for Slow {
    async fn reply(&self, agent: &AgentDescriptor, _request: &InboundRequest) -> HandlerResult<String> {
        tokio::time::sleep(self.0).await;
        Ok(format!("{} (slow)", agent.codename))
    }
}

struct Panicking;

#[async_trait]
impl AgentHandler for Panicking {
    async fn reply(&self, _agent: &AgentDescriptor, _request: &InboundRequest) -> HandlerResult<String> {
        panic!("handler bug");
    }
}

/// Records the request each call receives
#[derive(Default)]
struct Recorder(Mutex<Vec<InboundRequest>>);

#[async_trait]
impl AgentHandler for Recorder {
    async fn reply(&self, _agent: &AgentDescriptor, request: &InboundRequest) -> HandlerResult<String> {
        self.0.lock().unwrap().push(request.clone());
        Ok(String::new())
    }
}

fn h(handler: impl AgentHandler + 'static) -> Arc<dyn AgentHandler> {
    Arc::new(handler)
}

fn descriptor(id: &str, codename: &str) -> AgentDescriptor {
    AgentDescriptor::new(id, codename, 1, "Testing", "Test everything")
}

fn dispatcher(handlers: Vec<(&str, Arc<dyn AgentHandler>)>, config: DispatchConfig) -> Dispatcher {
    let mut builder = AgentCatalog::builder();
    for (i, (codename, handler)) in handlers.into_iter().enumerate() {
        builder
            .register(descriptor(&format!("{:02}", i + 1), codename), handler)
            .unwrap();
    }
    Dispatcher::new(Arc::new(builder.build().unwrap()), config)
}

fn codenames(results: &[AgentInvocationResult]) -> Vec<&str> {
    results.iter().map(|r| r.agent().codename.as_str()).collect()
}

#[tokio::test]
async fn test_dispatch_resolution_order() {
    let d = dispatcher(
        vec![
            ("APEX", h(Echo)),
            ("BRAVO", h(Echo)),
            ("CIPHER", h(Echo)),
        ],
        DispatchConfig::default(),
    );

    let request = InboundRequest::from_user_text("@CIPHER @apex @BRAVO @APEX go");
    let results = d.dispatch(&request).await.unwrap();

    assert_eq!(codenames(&results), vec!["CIPHER", "APEX", "BRAVO"]);
    assert!(results.iter().all(AgentInvocationResult::is_success));
}

#[tokio::test]
async fn test_dispatch_default_agent_when_no_mentions() {
    let d = dispatcher(
        vec![("APEX", h(Echo)), ("BRAVO", h(Echo))],
        DispatchConfig::default(),
    );

    let results = d
        .dispatch(&InboundRequest::from_user_text("@nobody what is up"))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(codenames(&results), vec!["APEX"]);
}

#[tokio::test]
async fn test_dispatch_malformed_request() {
    let d = dispatcher(vec![("APEX", h(Echo))], DispatchConfig::default());
    let request = InboundRequest {
        messages: vec![ConversationMessage::assistant("@APEX nobody asked")],
        ..Default::default()
    };

    let err = d.dispatch(&request).await.unwrap_err();
    assert!(matches!(err, Error::MalformedRequest(_)));
}

#[tokio::test]
async fn test_failure_is_isolated() {
    let d = dispatcher(
        vec![("APEX", h(Echo)), ("BROKEN", h(Failing))],
        DispatchConfig::default(),
    );

    let results = d
        .dispatch(&InboundRequest::from_user_text("@BROKEN @APEX go"))
        .await
        .unwrap();

    assert_eq!(codenames(&results), vec!["BROKEN", "APEX"]);
    assert_eq!(
        results[0],
        AgentInvocationResult::Failure {
            agent: Arc::new(descriptor("02", "BROKEN")),
            failure: HandlerFailure::Failed("upstream refused".to_string()),
        }
    );
    assert!(results[1].is_success());
}

#[tokio::test]
async fn test_panic_is_contained() {
    let d = dispatcher(
        vec![("APEX", h(Echo)), ("BUGGY", h(Panicking))],
        DispatchConfig::default(),
    );

    let results = d
        .dispatch(&InboundRequest::from_user_text("@APEX @BUGGY go"))
        .await
        .unwrap();

    assert!(results[0].is_success());
    assert!(matches!(
        &results[1],
        AgentInvocationResult::Failure { failure: HandlerFailure::Panicked, .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_only_fails_slow_agent() {
    let config = DispatchConfig {
        agent_timeout_secs: 1,
        ..DispatchConfig::default()
    };
    let d = dispatcher(
        vec![
            ("APEX", h(Echo)),
            ("SLOTH", h(Slow(Duration::from_secs(5)))),
        ],
        config,
    );

    let results = d
        .dispatch(&InboundRequest::from_user_text("@SLOTH @APEX go"))
        .await
        .unwrap();

    assert!(matches!(
        &results[0],
        AgentInvocationResult::Failure { failure: HandlerFailure::Timeout(limit), .. }
            if *limit == Duration::from_secs(1)
    ));
    assert!(results[1].is_success());
}

#[tokio::test(start_paused = true)]
async fn test_order_independent_of_completion() {
    let d = dispatcher(
        vec![
            ("APEX", h(Echo)),
            ("SLOTH", h(Slow(Duration::from_millis(200)))),
        ],
        DispatchConfig::default(),
    );

    let results = d
        .dispatch(&InboundRequest::from_user_text("@SLOTH @APEX go"))
        .await
        .unwrap();

    assert_eq!(codenames(&results), vec!["SLOTH", "APEX"]);
    assert!(results.iter().all(AgentInvocationResult::is_success));
}

#[tokio::test]
async fn test_cancelled_dispatcher() {
    let d = dispatcher(vec![("APEX", h(Echo))], DispatchConfig::default());
    d.cancel();

    let results = d
        .dispatch(&InboundRequest::from_user_text("@APEX go"))
        .await
        .unwrap();

    assert!(matches!(
        &results[0],
        AgentInvocationResult::Failure { failure: HandlerFailure::Cancelled, .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_flight() {
    let config = DispatchConfig {
        agent_timeout_secs: 0,
        ..DispatchConfig::default()
    };
    let d = dispatcher(
        vec![("SLOTH", h(Slow(Duration::from_secs(60))))],
        config,
    );
    let token = d.cancel_token();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        canceller.cancel();
    });

    let results = d
        .dispatch_with(&InboundRequest::from_user_text("@SLOTH go"), &token)
        .await
        .unwrap();

    assert!(matches!(
        &results[0],
        AgentInvocationResult::Failure { failure: HandlerFailure::Cancelled, .. }
    ));
}

#[tokio::test]
async fn test_every_handler_sees_identical_request() {
    let recorder = Arc::new(Recorder::default());
    let d = dispatcher(
        vec![
            ("APEX", recorder.clone() as Arc<dyn AgentHandler>),
            ("BRAVO", recorder.clone() as Arc<dyn AgentHandler>),
        ],
        DispatchConfig::default(),
    );
    let request = InboundRequest {
        messages: vec![
            ConversationMessage::system("rules"),
            ConversationMessage::user("@APEX @BRAVO compare"),
        ],
        stream: true,
        model: Some("whatever".to_string()),
    };

    d.dispatch(&request).await.unwrap();

    let seen = recorder.0.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|r| *r == request));
}

#[tokio::test]
async fn test_max_agents_cap() {
    let config = DispatchConfig {
        max_agents_per_request: 2,
        ..DispatchConfig::default()
    };
    let d = dispatcher(
        vec![
            ("APEX", h(Echo)),
            ("BRAVO", h(Echo)),
            ("CIPHER", h(Echo)),
        ],
        config,
    );

    let agents = d
        .resolve(&InboundRequest::from_user_text("@CIPHER @BRAVO @APEX"))
        .unwrap();
    let names: Vec<_> = agents.iter().map(Agent::codename).collect();
    assert_eq!(names, vec!["CIPHER", "BRAVO"]);
}

#[test]
fn test_dispatch_config_timeout() {
    assert_eq!(
        DispatchConfig::default().agent_timeout(),
        Some(Duration::from_secs(30))
    );

    let unlimited = DispatchConfig {
        agent_timeout_secs: 0,
        ..DispatchConfig::default()
    };
    assert!(unlimited.agent_timeout().is_none());
}

#[test]
fn test_failure_diagnostic() {
    let msg = HandlerFailure::Timeout(Duration::from_secs(30)).diagnostic("CIPHER");
    assert_eq!(msg, "[CIPHER] is unavailable: handler timed out after 30s");
}
