use super::*;
use crate::dispatch::HandlerResult;
use crate::message::InboundRequest;
use async_trait::async_trait;

struct Echo;

#[async_trait]
impl AgentHandler for Echo {
    async fn reply(
        &self,
        agent: &AgentDescriptor,
        _request: &InboundRequest,
    ) -> HandlerResult<String> {
        Ok(agent.codename.clone())
    }
}

fn descriptor(id: &str, codename: &str) -> AgentDescriptor {
    AgentDescriptor::new(id, codename, 1, "Testing", "Test everything")
}

#[test]
fn test_builtin_catalog() {
    let catalog = AgentCatalog::builtin().unwrap();

    assert_eq!(catalog.len(), builtin_roster().len());
    assert_eq!(catalog.default_agent().codename(), DEFAULT_CODENAME);
    assert!(catalog.resolve("cipher").is_some());
}

#[test]
fn test_resolve_case_insensitive() {
    let catalog = AgentCatalog::builtin().unwrap();

    for name in ["APEX", "apex", "Apex", "aPeX"] {
        assert_eq!(catalog.resolve(name).unwrap().codename(), "APEX");
    }
}

#[test]
fn test_resolve_unknown_is_none() {
    let catalog = AgentCatalog::builtin().unwrap();

    assert!(catalog.resolve("nobody").is_none());
    // exact match only, no prefixes
    assert!(catalog.resolve("ape").is_none());
    assert!(catalog.resolve("apexx").is_none());
}

#[test]
fn test_all_ordered_by_id() {
    let mut builder = AgentCatalog::builder();
    builder
        .register(descriptor("03-c", "GAMMA"), Arc::new(Echo))
        .unwrap()
        .register(descriptor("01-a", "ALPHA"), Arc::new(Echo))
        .unwrap()
        .register(descriptor("02-b", "BETA"), Arc::new(Echo))
        .unwrap();
    let catalog = builder.build().unwrap();

    let ids: Vec<_> = catalog.all().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["01-a", "02-b", "03-c"]);
    // no explicit default: first by id
    assert_eq!(catalog.default_agent().codename(), "ALPHA");
}

#[test]
fn test_duplicate_codename_rejected() {
    let mut builder = AgentCatalog::builder();
    builder
        .register(descriptor("01-a", "APEX"), Arc::new(Echo))
        .unwrap();

    let err = builder
        .register(descriptor("02-b", "apex"), Arc::new(Echo))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateAgent(name) if name == "apex"));
}

#[test]
fn test_duplicate_id_rejected() {
    let mut builder = AgentCatalog::builder();
    builder
        .register(descriptor("01-a", "APEX"), Arc::new(Echo))
        .unwrap();

    let err = builder
        .register(descriptor("01-a", "CIPHER"), Arc::new(Echo))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateAgent(id) if id == "01-a"));

    // the rejected codename stays free
    builder
        .register(descriptor("02-b", "CIPHER"), Arc::new(Echo))
        .unwrap();
    assert_eq!(builder.build().unwrap().len(), 2);
}

#[test]
fn test_from_descriptors_duplicate_is_fatal() {
    let result = AgentCatalog::from_descriptors(
        vec![descriptor("01-a", "APEX"), descriptor("02-b", "APEX")],
        None,
    );
    assert!(matches!(result, Err(Error::DuplicateAgent(_))));
}

#[test]
fn test_empty_catalog_rejected() {
    let result = AgentCatalog::builder().build();
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn test_unknown_default_rejected() {
    let result = AgentCatalog::from_descriptors(vec![descriptor("01-a", "APEX")], Some("GHOST"));
    assert!(matches!(result, Err(Error::Configuration(msg)) if msg.contains("GHOST")));
}

#[test]
fn test_explicit_default_any_case() {
    let catalog = AgentCatalog::from_descriptors(
        vec![descriptor("01-a", "APEX"), descriptor("02-b", "CIPHER")],
        Some("cipher"),
    )
    .unwrap();
    assert_eq!(catalog.default_agent().codename(), "CIPHER");
}

#[tokio::test]
async fn test_registered_handler_is_used() {
    let mut builder = AgentCatalog::builder();
    builder
        .register(descriptor("01-a", "APEX"), Arc::new(Echo))
        .unwrap();
    let catalog = builder.build().unwrap();

    let agent = catalog.resolve("APEX").unwrap();
    let reply = agent
        .handler()
        .reply(agent.descriptor(), &InboundRequest::from_user_text("hi"))
        .await
        .unwrap();
    assert_eq!(reply, "APEX");
}
