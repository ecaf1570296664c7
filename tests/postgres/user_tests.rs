//! `PostgreSQL` integration tests for the user repository.

use crate::postgres::helpers::{BoxError, TestSchema, insert_user, schema};
use mockable::DefaultClock;
use rstest::rstest;
use taskmate::user::{
    domain::{AvatarExtension, AvatarRef, DisplayName, EmailAddress, ProfileChanges, UserId},
    ports::{UserRepository, UserRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_a_conflict(
    #[future] schema: Result<Option<TestSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(db) = schema.await? else {
        return Ok(());
    };
    let users = db.users();
    insert_user(&users, "Ada").await?;

    let duplicate = insert_user(&users, "ADA").await;

    let err = duplicate.err().ok_or("duplicate email was accepted")?;
    let repo_err = err
        .downcast_ref::<UserRepositoryError>()
        .ok_or("unexpected error type")?;
    assert!(matches!(repo_err, UserRepositoryError::DuplicateEmail(_)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn points_accumulate_and_unknown_users_are_reported(
    #[future] schema: Result<Option<TestSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(db) = schema.await? else {
        return Ok(());
    };
    let users = db.users();
    let ada = insert_user(&users, "Ada").await?;

    users.add_points(ada.id(), 10).await?;
    let balance = users.add_points(ada.id(), 10).await?;
    assert_eq!(balance, 20);

    let missing = users.add_points(UserId::new(), 10).await;
    assert!(matches!(missing, Err(UserRepositoryError::NotFound(_))));

    let found = users
        .find_by_email(&EmailAddress::new("ada@example.com")?)
        .await?
        .ok_or("user not found by email")?;
    assert_eq!(found.points(), 20);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_many_returns_only_requested_users(
    #[future] schema: Result<Option<TestSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(db) = schema.await? else {
        return Ok(());
    };
    let users = db.users();
    let ada = insert_user(&users, "Ada").await?;
    insert_user(&users, "Bob").await?;

    let found = users.find_many(&[ada.id(), UserId::new()]).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(users.list_all().await?.len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_writes_touch_only_supplied_columns(
    #[future] schema: Result<Option<TestSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(db) = schema.await? else {
        return Ok(());
    };
    let users = db.users();
    let ada = insert_user(&users, "Ada").await?;
    let avatar = AvatarRef::for_content(b"portrait", AvatarExtension::Png)?;

    users
        .update_profile(
            ada.id(),
            &ProfileChanges::new(&DefaultClock).with_name(DisplayName::new("Ada L.")?),
        )
        .await?;
    let updated = users
        .update_profile(
            ada.id(),
            &ProfileChanges::new(&DefaultClock).with_avatar(avatar.clone()),
        )
        .await?;

    assert_eq!(updated.name().as_str(), "Ada L.");
    assert_eq!(updated.email().as_str(), "ada@example.com");
    assert_eq!(updated.avatar_ref(), Some(&avatar));

    let missing = users
        .update_profile(
            UserId::new(),
            &ProfileChanges::new(&DefaultClock).with_name(DisplayName::new("Nobody")?),
        )
        .await;
    assert!(matches!(missing, Err(UserRepositoryError::NotFound(_))));
    Ok(())
}
