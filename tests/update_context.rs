//! NGSI10 context update flow against a mocked broker.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ngsi_agent::session::{AgentConfig, ContextBroker};
use ngsi_agent::update::AttributeValue;
use ngsi_agent::{Error, IotAgent};

fn agent_config(broker_url: &str) -> AgentConfig {
    AgentConfig {
        context_broker: ContextBroker {
            url: Some(broker_url.to_string()),
            host: None,
            port: None,
        },
        provider_url: "http://smartGondor.com".to_string(),
        device_registration_duration: "P1M".to_string(),
        service: "smartGondor".to_string(),
        subservice: "gardens".to_string(),
    }
}

async fn activated_agent(server: &MockServer) -> IotAgent {
    Mock::given(method("POST"))
        .and(path("/NGSI9/registerContext"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "registrationId": "abc123" })))
        .mount(server)
        .await;

    let agent = IotAgent::new();
    agent.activate(agent_config(&server.uri())).await.unwrap();
    agent
}

#[tokio::test]
async fn update_sends_a_single_entity_append() {
    let server = MockServer::start().await;
    let agent = activated_agent(&server).await;

    Mock::given(method("POST"))
        .and(path("/NGSI10/updateContext"))
        .and(header("fiware-service", "smartGondor"))
        .and(header("fiware-servicepath", "gardens"))
        .and(body_json(json!({
            "contextElements": [
                {
                    "type": "Light",
                    "isPattern": "false",
                    "id": "light1",
                    "attributes": [
                        { "name": "pressure", "type": "Hgmm", "value": 720 }
                    ]
                }
            ],
            "updateAction": "APPEND"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contextResponses": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = agent
        .update_value(
            "light1",
            "Light",
            vec![AttributeValue::new("pressure", "Hgmm", json!(720))],
        )
        .await
        .unwrap();

    assert_eq!(body, json!({ "contextResponses": [] }));
}

#[tokio::test]
async fn update_does_not_touch_the_registry() {
    let server = MockServer::start().await;
    let agent = activated_agent(&server).await;

    Mock::given(method("POST"))
        .and(path("/NGSI10/updateContext"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contextResponses": [] })))
        .mount(&server)
        .await;

    agent
        .update_value(
            "light1",
            "Light",
            vec![AttributeValue::new("pressure", "Hgmm", json!(720))],
        )
        .await
        .unwrap();

    // No device was ever registered; updates flow independently.
    assert!(agent.devices().await.is_empty());
}

#[tokio::test]
async fn broker_rejection_yields_unknown_response() {
    let server = MockServer::start().await;
    let agent = activated_agent(&server).await;

    Mock::given(method("POST"))
        .and(path("/NGSI10/updateContext"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "BROKER_DOWN" })))
        .mount(&server)
        .await;

    let err = agent
        .update_value("light1", "Light", vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownResponse(_)));
}

#[tokio::test]
async fn transport_failure_passes_through() {
    let agent = {
        // An exclusive (non-pooled) server is required: pooled servers
        // from `MockServer::start` keep listening after drop.
        let server = MockServer::builder().start().await;
        activated_agent(&server).await
        // Server shuts down here.
    };

    let err = agent
        .update_value("light1", "Light", vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
