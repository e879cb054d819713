//! HTTP smoke tests for the POS API.
//!
//! These tests require Docker for the `PostgreSQL` container.
//!
//! Run with: cargo test -p campus-coffee-acceptance --test pos_smoke -- --ignored

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use reqwest::StatusCode;
use uuid::Uuid;

use campus_coffee_acceptance::{HarnessError, TestEnvironment};
use campus_coffee_core::{CampusType, PosDto, PosId, PosType};

fn sample_pos(name: &str) -> PosDto {
    PosDto {
        id: None,
        created_at: None,
        updated_at: None,
        name: name.to_string(),
        description: "Smoke test POS".to_string(),
        pos_type: PosType::Cafe,
        campus: CampusType::Inf,
        street: "Im Neuenheimer Feld".to_string(),
        house_number: "205".to_string(),
        postal_code: 69120,
        city: "Heidelberg".to_string(),
    }
}

fn unique_name(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "Requires Docker"]
async fn test_pos_crud_round_trip() {
    let env = TestEnvironment::start()
        .await
        .expect("Failed to start test environment");
    let client = env.client().clone();

    // Create
    let name = unique_name("Smoke Café");
    let created = client
        .create(&sample_pos(&name))
        .await
        .expect("Failed to create POS");
    let id = created.id.expect("Created POS has no id");
    assert_eq!(created.name, name);
    assert!(created.created_at.is_some());

    // Read
    let fetched = client.get(id).await.expect("Failed to get POS");
    assert_eq!(fetched, created);

    let found = client
        .find_by_name(&name)
        .await
        .expect("Failed to find POS by name");
    assert_eq!(found.id, Some(id));

    // Update
    let renamed = unique_name("Smoke Bakery");
    let updated = client
        .update(&PosDto {
            id: Some(id),
            name: renamed.clone(),
            pos_type: PosType::Bakery,
            ..sample_pos(&name)
        })
        .await
        .expect("Failed to update POS");
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.name, renamed);
    assert_eq!(updated.pos_type, PosType::Bakery);
    assert_eq!(updated.created_at, created.created_at);

    // Delete
    client.delete(id).await.expect("Failed to delete POS");
    let err = client.get(id).await.expect_err("Deleted POS still exists");
    assert!(matches!(
        err,
        HarnessError::UnexpectedStatus { status, .. } if status == StatusCode::NOT_FOUND
    ));

    drop(client);
    env.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
#[ignore = "Requires Docker"]
async fn test_reset_and_error_statuses() {
    let env = TestEnvironment::start()
        .await
        .expect("Failed to start test environment");
    let client = env.client().clone();

    let first = unique_name("First");
    let second = unique_name("Second");
    let created = client
        .create_all(&[sample_pos(&first), sample_pos(&second)])
        .await
        .expect("Failed to create POS");
    assert_ne!(created[0].id, created[1].id);

    // Duplicate name
    assert_eq!(
        client.create_status(&sample_pos(&first)).await.unwrap(),
        StatusCode::CONFLICT
    );

    // Blank name
    assert_eq!(
        client.create_status(&sample_pos("   ")).await.unwrap(),
        StatusCode::BAD_REQUEST
    );

    // Unknown id and name
    assert!(matches!(
        client.get(PosId::new(i64::MAX)).await,
        Err(HarnessError::UnexpectedStatus { status, .. }) if status == StatusCode::NOT_FOUND
    ));
    assert!(matches!(
        client.find_by_name(&format!("  {first}  ")).await,
        Err(HarnessError::UnexpectedStatus { status, .. }) if status == StatusCode::NOT_FOUND
    ));

    // Unknown id on update and delete
    let ghost = PosDto {
        id: Some(PosId::new(i64::MAX)),
        ..sample_pos(&unique_name("Ghost"))
    };
    assert!(matches!(
        client.update(&ghost).await,
        Err(HarnessError::UnexpectedStatus { status, .. }) if status == StatusCode::NOT_FOUND
    ));
    assert!(matches!(
        client.delete(PosId::new(i64::MAX)).await,
        Err(HarnessError::UnexpectedStatus { status, .. }) if status == StatusCode::NOT_FOUND
    ));

    // Renaming onto an existing name
    let conflicting = PosDto {
        id: created[1].id,
        ..sample_pos(&first)
    };
    assert!(matches!(
        client.update(&conflicting).await,
        Err(HarnessError::UnexpectedStatus { status, .. }) if status == StatusCode::CONFLICT
    ));

    env.reset().await.expect("Failed to reset");
    assert!(client.list().await.unwrap().is_empty());

    drop(client);
    env.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
#[ignore = "Requires Docker"]
async fn test_teardown_of_shared_environment() {
    let env = Arc::new(
        TestEnvironment::start()
            .await
            .expect("Failed to start test environment"),
    );
    let client = env.client().clone();
    client
        .create(&sample_pos(&unique_name("Shared")))
        .await
        .expect("Failed to create POS");

    // Another handle is still alive: the store is reset, the service keeps running
    TestEnvironment::teardown(Arc::clone(&env))
        .await
        .expect("Failed to tear down shared handle");
    assert!(client.list().await.unwrap().is_empty());

    drop(client);
    TestEnvironment::teardown(env)
        .await
        .expect("Failed to shut down");
}
