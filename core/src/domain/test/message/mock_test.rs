use crate::{
    Service,
    domain::{
        common::{CoreError, GetPaginated},
        health::port::MockHealthRepository,
        message::{
            entities::{AuthorInput, InsertMessageInput, MessageId, NewMessage},
            ports::{MessageService, MockMessageRepository},
        },
        user::ports::{MockUserRepository, UserRepository},
    },
};
use uuid::Uuid;

type MockService = Service<MockMessageRepository, MockUserRepository, MockHealthRepository>;

fn seeded_service() -> (MockService, MockMessageRepository, MockUserRepository) {
    let message_mock_repo = MockMessageRepository::new();
    let user_mock_repo = MockUserRepository::with_user("Anonymous");
    let service = Service::new(
        message_mock_repo.clone(),
        user_mock_repo.clone(),
        MockHealthRepository::new(),
    );
    (service, message_mock_repo, user_mock_repo)
}

// == Find Message Tests ==

#[tokio::test]
async fn test_find_message_by_id_success() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _, _) = seeded_service();

    let saved = service
        .save_message(InsertMessageInput::with_username("hello", "bob"))
        .await?;

    let found = service
        .find_message_by_id(&saved.id)
        .await
        .expect("find_message_by_id returned an error");

    assert_eq!(found, saved, "Expected the saved message back");

    Ok(())
}

#[tokio::test]
async fn test_find_message_by_id_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _, _) = seeded_service();
    let missing_id = MessageId::from(Uuid::new_v4());

    let error = service
        .find_message_by_id(&missing_id)
        .await
        .expect_err("find_message_by_id should have returned an error");

    match &error {
        CoreError::MessageNotFound { id } => assert_eq!(*id, missing_id),
        other => panic!("Expected MessageNotFound, got {other:?}"),
    }
    assert!(
        error.to_string().contains(&missing_id.to_string()),
        "Expected the error message to mention the id"
    );

    Ok(())
}

// == Save Message Tests ==

#[tokio::test]
async fn test_save_message_without_author_uses_anonymous() -> Result<(), Box<dyn std::error::Error>>
{
    let (service, _, user_mock_repo) = seeded_service();

    let message = service
        .save_message(InsertMessageInput::new("no author", None))
        .await?;

    assert_eq!(message.author.username, "Anonymous");
    assert_eq!(user_mock_repo.count(), 1, "Expected no new user");

    Ok(())
}

#[tokio::test]
async fn test_save_message_with_blank_usernames_uses_anonymous()
-> Result<(), Box<dyn std::error::Error>> {
    let (service, _, user_mock_repo) = seeded_service();
    let anonymous = user_mock_repo
        .find_by_username("Anonymous")
        .await?
        .expect("seeded anonymous user");

    let inputs = vec![
        InsertMessageInput::with_username("empty", ""),
        InsertMessageInput::with_username("spaces", "   "),
        InsertMessageInput::with_username("tabs", "\t\n"),
        InsertMessageInput::new("no username", Some(AuthorInput::default())),
    ];

    for input in inputs {
        let message = service.save_message(input).await?;
        assert_eq!(message.author, anonymous, "Expected the sentinel author");
    }
    assert_eq!(user_mock_repo.count(), 1, "Expected no new user");

    Ok(())
}

#[tokio::test]
async fn test_save_message_fails_when_anonymous_missing() -> Result<(), Box<dyn std::error::Error>>
{
    let message_mock_repo = MockMessageRepository::new();
    let service = Service::new(
        message_mock_repo.clone(),
        MockUserRepository::new(),
        MockHealthRepository::new(),
    );

    let error = service
        .save_message(InsertMessageInput::new("orphan", None))
        .await
        .expect_err("save_message should have returned an error");

    assert!(matches!(
        error,
        CoreError::AnonymousUserMissing { ref username } if username == "Anonymous"
    ));
    assert_eq!(message_mock_repo.count(), 0, "Expected nothing persisted");

    Ok(())
}

#[tokio::test]
async fn test_save_message_uses_configured_anonymous_username()
-> Result<(), Box<dyn std::error::Error>> {
    let service = Service::new(
        MockMessageRepository::new(),
        MockUserRepository::with_user("guest"),
        MockHealthRepository::new(),
    )
    .with_anonymous_username("guest");

    let message = service
        .save_message(InsertMessageInput::with_username("hi", " "))
        .await?;

    assert_eq!(message.author.username, "guest");

    Ok(())
}

#[tokio::test]
async fn test_save_message_creates_new_user() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _, user_mock_repo) = seeded_service();

    let message = service
        .save_message(InsertMessageInput::with_username("first post", "alice"))
        .await?;

    let alice = user_mock_repo
        .find_by_username("alice")
        .await?
        .expect("alice should have been created");
    assert_eq!(message.author, alice);
    assert_eq!(message.content, "first post");
    assert_eq!(user_mock_repo.count(), 2);

    Ok(())
}

#[tokio::test]
async fn test_save_message_reuses_existing_user() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _, user_mock_repo) = seeded_service();
    user_mock_repo.push(crate::domain::user::entities::User {
        id: Uuid::new_v4().into(),
        username: "carol".to_string(),
        created_at: chrono::Utc::now(),
    });
    let carol = user_mock_repo
        .find_by_username("carol")
        .await?
        .expect("seeded carol");

    let message = service
        .save_message(InsertMessageInput::with_username("again", "carol"))
        .await?;

    assert_eq!(message.author.id, carol.id, "Expected the existing user");
    assert_eq!(user_mock_repo.count(), 2, "Expected no duplicate user");

    Ok(())
}

#[tokio::test]
async fn test_save_message_username_is_matched_exactly() -> Result<(), Box<dyn std::error::Error>>
{
    let (service, _, user_mock_repo) = seeded_service();

    let padded = service
        .save_message(InsertMessageInput::with_username("one", " dave "))
        .await?;
    let plain = service
        .save_message(InsertMessageInput::with_username("two", "dave"))
        .await?;

    assert_eq!(padded.author.username, " dave ");
    assert_ne!(padded.author.id, plain.author.id);
    assert_eq!(user_mock_repo.count(), 3);

    Ok(())
}

// == Scenario ==

#[tokio::test]
async fn test_author_resolution_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _, user_mock_repo) = seeded_service();

    let anonymous = service
        .save_message(InsertMessageInput::with_username("who am i", ""))
        .await?;
    assert_eq!(anonymous.author.username, "Anonymous");

    let first = service
        .save_message(InsertMessageInput::with_username("hello", "alice"))
        .await?;
    assert_eq!(first.author.username, "alice");

    let second = service
        .save_message(InsertMessageInput::with_username("hello again", "alice"))
        .await?;
    assert_eq!(second.author, first.author, "Expected the same alice");
    assert_eq!(user_mock_repo.count(), 2, "Expected exactly one new user");

    let by_alice = service.find_messages_by_author("alice").await?;
    let ids: Vec<MessageId> = by_alice.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let missing = service
        .find_message_by_id(&MessageId::from(Uuid::new_v4()))
        .await;
    assert!(matches!(missing, Err(CoreError::MessageNotFound { .. })));

    Ok(())
}

// == Listing Tests ==

#[tokio::test]
async fn test_get_messages_paginates() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _, _) = seeded_service();
    for i in 1..=5 {
        service
            .save_message(InsertMessageInput::with_username(format!("Message {i}"), "erin"))
            .await?;
    }

    let first_page = service.get_messages(&GetPaginated::new(0, 2)).await?;
    let contents: Vec<&str> = first_page.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Message 1", "Message 2"]);

    let last_page = service.get_messages(&GetPaginated::new(2, 2)).await?;
    assert_eq!(last_page.len(), 1);
    assert_eq!(last_page[0].content, "Message 5");

    let beyond = service.get_messages(&GetPaginated::new(10, 2)).await?;
    assert!(beyond.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_get_messages_rejects_zero_page_size() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _, _) = seeded_service();

    let error = service
        .get_messages(&GetPaginated::new(0, 0))
        .await
        .expect_err("get_messages should have returned an error");

    assert!(matches!(error, CoreError::InvalidPageSize));

    Ok(())
}

#[tokio::test]
async fn test_get_messages_rejects_offset_beyond_store_range()
-> Result<(), Box<dyn std::error::Error>> {
    let (service, _, _) = seeded_service();

    let error = service
        .get_messages(&GetPaginated::new(u32::MAX, u32::MAX))
        .await
        .expect_err("get_messages should have returned an error");

    assert!(matches!(
        error,
        CoreError::PageOutOfRange { page, size } if page == u32::MAX && size == u32::MAX
    ));

    // Largest page whose offset still fits is accepted (and simply empty).
    let last_page = service
        .get_messages(&GetPaginated::new(u32::MAX, 1))
        .await?;
    assert!(last_page.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_find_messages_by_author_unknown_is_empty() -> Result<(), Box<dyn std::error::Error>>
{
    let (service, _, _) = seeded_service();
    service
        .save_message(InsertMessageInput::with_username("hi", "frank"))
        .await?;

    let messages = service.find_messages_by_author("nobody").await?;

    assert!(messages.is_empty());

    Ok(())
}

// == Bulk Save Tests ==

#[tokio::test]
async fn test_save_all_persists_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let (service, message_mock_repo, user_mock_repo) = seeded_service();
    let anonymous = user_mock_repo
        .find_by_username("Anonymous")
        .await?
        .expect("seeded anonymous user");

    service
        .save_all(vec![
            NewMessage {
                content: "one".to_string(),
                author: anonymous.clone(),
            },
            NewMessage {
                content: "two".to_string(),
                author: anonymous.clone(),
            },
        ])
        .await?;

    assert_eq!(message_mock_repo.count(), 2);
    assert_eq!(user_mock_repo.count(), 1, "Expected no author resolution");
    let stored = service.find_messages_by_author("Anonymous").await?;
    assert!(stored.iter().all(|m| m.author == anonymous));

    Ok(())
}

// == Startup Check Tests ==

#[tokio::test]
async fn test_ensure_anonymous_user() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _, _) = seeded_service();
    service.ensure_anonymous_user().await?;

    let unseeded = Service::new(
        MockMessageRepository::new(),
        MockUserRepository::new(),
        MockHealthRepository::new(),
    );
    let error = unseeded
        .ensure_anonymous_user()
        .await
        .expect_err("ensure_anonymous_user should have returned an error");
    assert!(matches!(error, CoreError::AnonymousUserMissing { .. }));

    Ok(())
}
