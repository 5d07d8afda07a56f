mod helpers;

use chrono::{Duration, Local};
use helpers::setup::{spawn_app, TestApp};
use remindme_api_structs::{create_reminder, delete_reminder, get_reminder, get_reminders};

async fn create_reminder_with_title(
    app: &TestApp,
    title: &str,
    fire_in: Duration,
) -> reqwest::Response {
    let body = create_reminder::RequestBody {
        title: title.into(),
        description: None,
        fire_at: (Local::now() + fire_in).timestamp_millis(),
    };
    app.client
        .post(app.api_url("/reminders"))
        .json(&body)
        .send()
        .await
        .expect("Expected request to succeed")
}

#[tokio::test]
async fn test_status_ok() {
    let app = spawn_app().await;
    let res = app
        .client
        .get(app.api_url("/"))
        .send()
        .await
        .expect("Expected request to succeed");
    assert!(res.status().is_success());
}

#[tokio::test]
async fn test_create_and_get_reminder() {
    let app = spawn_app().await;

    let res = create_reminder_with_title(&app, "Buy milk", Duration::minutes(10)).await;
    assert_eq!(res.status().as_u16(), 201);
    let created: create_reminder::APIResponse =
        res.json().await.expect("Expected json response");
    assert!(created.reminder.id.inner() > 0);
    assert_eq!(created.reminder.title, "Buy milk");
    assert_eq!(created.reminder.description, "");

    let res = app
        .client
        .get(app.api_url(&format!("/reminders/{}", created.reminder.id)))
        .send()
        .await
        .expect("Expected request to succeed");
    assert!(res.status().is_success());
    let found: get_reminder::APIResponse = res.json().await.expect("Expected json response");
    assert_eq!(found.reminder.id, created.reminder.id);
    assert_eq!(found.reminder.title, "Buy milk");
}

#[tokio::test]
async fn test_blank_title_is_rejected() {
    let app = spawn_app().await;

    let res = create_reminder_with_title(&app, "  ", Duration::minutes(10)).await;
    assert_eq!(res.status().as_u16(), 400);

    let res = app
        .client
        .get(app.api_url("/reminders"))
        .send()
        .await
        .expect("Expected request to succeed");
    let listing: get_reminders::APIResponse = res.json().await.expect("Expected json response");
    assert!(listing.reminders.is_empty());
}

#[tokio::test]
async fn test_delete_reminder() {
    let app = spawn_app().await;

    let res = create_reminder_with_title(&app, "Call mom", Duration::minutes(10)).await;
    let created: create_reminder::APIResponse =
        res.json().await.expect("Expected json response");

    let res = app
        .client
        .delete(app.api_url(&format!("/reminders/{}", created.reminder.id)))
        .send()
        .await
        .expect("Expected request to succeed");
    assert!(res.status().is_success());
    let deleted: delete_reminder::APIResponse =
        res.json().await.expect("Expected json response");
    assert_eq!(deleted.reminder.id, created.reminder.id);

    let res = app
        .client
        .get(app.api_url("/reminders"))
        .send()
        .await
        .expect("Expected request to succeed");
    let listing: get_reminders::APIResponse = res.json().await.expect("Expected json response");
    assert!(listing.reminders.is_empty());

    // Deleting again is a 404, the id is gone for good
    let res = app
        .client
        .delete(app.api_url(&format!("/reminders/{}", created.reminder.id)))
        .send()
        .await
        .expect("Expected request to succeed");
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn test_unknown_reminder_is_not_found() {
    let app = spawn_app().await;
    let res = app
        .client
        .get(app.api_url("/reminders/999"))
        .send()
        .await
        .expect("Expected request to succeed");
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn test_due_reminder_is_delivered() {
    let app = spawn_app().await;

    let res = create_reminder_with_title(&app, "Water plants", Duration::milliseconds(200)).await;
    let created: create_reminder::APIResponse =
        res.json().await.expect("Expected json response");

    tokio::time::sleep(std::time::Duration::from_millis(800)).await;

    let displayed = app.notifier.displayed();
    assert_eq!(displayed.len(), 1);
    assert_eq!(displayed[0].id, created.reminder.id.inner());
    assert_eq!(displayed[0].title, "Water plants");
}

#[tokio::test]
async fn test_deleted_reminder_is_never_delivered() {
    let app = spawn_app().await;

    let res = create_reminder_with_title(&app, "Feed cat", Duration::milliseconds(500)).await;
    let created: create_reminder::APIResponse =
        res.json().await.expect("Expected json response");

    let res = app
        .client
        .delete(app.api_url(&format!("/reminders/{}", created.reminder.id)))
        .send()
        .await
        .expect("Expected request to succeed");
    assert!(res.status().is_success());

    tokio::time::sleep(std::time::Duration::from_millis(1000)).await;
    assert!(app.notifier.displayed().is_empty());
}
