use dotenv::dotenv;
use pretty_assertions::assert_eq;
use tasktrack::models::{Task, TaskInput, User};
use tasktrack::registry::{PgRegistry, RegistryError, TaskRegistry};
use uuid::Uuid;

/// Connects to `DATABASE_URL`, or returns `None` so the test is skipped.
async fn registry() -> Option<PgRegistry> {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    Some(
        PgRegistry::connect(&database_url)
            .await
            .expect("Failed to connect to test DB"),
    )
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

#[actix_rt::test]
async fn test_pg_duplicate_email_is_rejected_by_index() {
    let Some(registry) = registry().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let email = unique_email("dup");
    let first = User::new("First".into(), email.clone(), "hash".into());
    let second = User::new("Second".into(), email.clone(), "hash".into());

    registry.create_user(&first).await.unwrap();
    assert_eq!(registry.create_user(&second).await, Err(RegistryError::Duplicate));

    let stored = registry.find_user_by_email(&email).await.unwrap().unwrap();
    assert_eq!(stored.id, first.id);
    assert!(registry.email_exists(&email).await.unwrap());

    let by_id = registry.find_user_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, email);
    assert_eq!(by_id.password_hash, "hash");
    assert!(registry.find_user_by_id(second.id).await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_pg_tasks_are_owner_scoped() {
    let Some(registry) = registry().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let alice = User::new("Alice".into(), unique_email("alice"), "hash".into());
    let bob = User::new("Bob".into(), unique_email("bob"), "hash".into());
    registry.create_user(&alice).await.unwrap();
    registry.create_user(&bob).await.unwrap();

    let task = Task::new(
        TaskInput {
            name: "alice's".into(),
            description: "private".into(),
        },
        alice.id,
    );
    registry.create_task(&task).await.unwrap();

    assert!(registry.find_task(task.id, bob.id).await.unwrap().is_none());
    assert!(registry.list_tasks(bob.id).await.unwrap().is_empty());
    assert!(registry
        .update_task(task.id, bob.id, "stolen", "")
        .await
        .unwrap()
        .is_none());
    assert!(!registry.delete_task(task.id, bob.id).await.unwrap());

    let updated = registry
        .update_task(task.id, alice.id, "renamed", "still private")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.owner, alice.id);
    assert_eq!(updated.name, "renamed");
    assert_eq!(registry.list_tasks(alice.id).await.unwrap().len(), 1);
    assert!(registry.delete_task(task.id, alice.id).await.unwrap());
}
