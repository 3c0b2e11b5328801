//! # User API Module
//!
//! Registration, login and profile management.

use crate::{
    api::{errors::DomainError, notification, upload},
    consts, metric, models,
    models::user_app::User,
    repo,
    rest::forms::user::{LoginForm, RegisterForm, UpdateProfileForm},
    security::TokenSigner,
    services, utils,
};
use anyhow::bail;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize, Debug)]
pub struct AuthSchema {
    pub token: String,
    pub user: User,
}

fn check_username_and_email(username: &str, email: &str) -> anyhow::Result<()> {
    if username.is_empty() || email.is_empty() {
        bail!(DomainError::validation("All fields are required"));
    }

    if username.chars().count() < consts::MIN_USERNAME_LEN {
        bail!(DomainError::validation(
            "Username should be at least 6 characters long"
        ));
    }

    if !email.contains('@') {
        bail!(DomainError::validation("Invalid email address"));
    }

    Ok(())
}

/// Creates the user with its welcome notification, schedules the
/// promotion and returns a fresh token.
pub async fn register(
    repo: &repo::ImplAppRepo,
    token_signer: &TokenSigner,
    form: RegisterForm,
    promotion_delay: Duration,
) -> anyhow::Result<AuthSchema> {
    let _span = logfire::span!("register").entered();

    let username = utils::clean_text(&form.username);
    let email = form.email.trim().to_lowercase();

    if form.password.is_empty() {
        bail!(DomainError::validation("All fields are required"));
    }
    check_username_and_email(&username, &email)?;

    if form.password.chars().count() < consts::MIN_PASSWORD_LEN {
        bail!(DomainError::validation(
            "Password should be at least 6 characters long"
        ));
    }

    if repo.get_user_app_by_email(&email).await?.is_some() {
        bail!(DomainError::validation("Email Address already used"));
    }

    if repo.get_user_app_by_username(&username).await?.is_some() {
        bail!(DomainError::validation("Username already used"));
    }

    let mut user = User::create_default(&username, &email, utils::hash_password(&form.password)?);
    user.id = repo
        .insert_user_app(&user, &notification::welcome(0, &username))
        .await?;

    metric::incr_user_action_statds("register");
    notification::schedule_promotion(repo.clone(), user.id, promotion_delay);

    Ok(AuthSchema {
        token: token_signer.issue(user.id)?,
        user,
    })
}

pub async fn login(
    repo: &repo::ImplAppRepo,
    token_signer: &TokenSigner,
    form: LoginForm,
) -> anyhow::Result<AuthSchema> {
    let _span = logfire::span!("login").entered();

    let email = form.email.trim().to_lowercase();
    if email.is_empty() || form.password.is_empty() {
        bail!(DomainError::validation("All fields are required"));
    }

    let user = repo
        .get_user_app_by_email(&email)
        .await?
        .filter(|user| utils::verify_password(&form.password, &user.password_hash));

    let Some(user) = user else {
        bail!(DomainError::validation("Invalid Credentials"));
    };

    metric::incr_user_action_statds("login");

    Ok(AuthSchema {
        token: token_signer.issue(user.id)?,
        user,
    })
}

pub async fn get_profile(repo: &repo::ImplAppRepo, user_id: i64) -> anyhow::Result<User> {
    match repo.get_user_app_by_id(user_id).await? {
        Some(user) => Ok(user),
        None => bail!(DomainError::not_found("User not found")),
    }
}

/// Changes username and/or email with the registration rules
pub async fn update_profile(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    form: UpdateProfileForm,
) -> anyhow::Result<User> {
    let user = get_profile(repo, user_id).await?;

    let username = form
        .username
        .map(|username| utils::clean_text(&username))
        .unwrap_or_else(|| user.username.clone());
    let email = form
        .email
        .map(|email| email.trim().to_lowercase())
        .unwrap_or_else(|| user.email.clone());

    check_username_and_email(&username, &email)?;

    let is_taken = |other: Option<User>| other.is_some_and(|other| other.id != user_id);

    if is_taken(repo.get_user_app_by_email(&email).await?) {
        bail!(DomainError::validation("Email Address already used"));
    }

    if is_taken(repo.get_user_app_by_username(&username).await?) {
        bail!(DomainError::validation("Username already used"));
    }

    repo.update_user_app_profile(user_id, &username, &email)
        .await?;

    get_profile(repo, user_id).await
}

/// Replaces the profile image, removing the previous upload
pub async fn upload_profile_image(
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
    user_id: i64,
    pic: Option<models::Pic>,
) -> anyhow::Result<User> {
    let Some(pic) = pic else {
        bail!(DomainError::validation("No image file provided"));
    };

    let user = get_profile(repo, user_id).await?;
    let path = upload::save_pic(storage_service, consts::PROFILE_PICS_DIR, pic).await?;

    if let Err(e) = repo
        .update_user_app_profile_image(user_id, &upload::public_url(&path))
        .await
    {
        upload::discard_pic(storage_service, &path).await;
        return Err(e);
    }

    upload::discard_pic_by_url(storage_service, &user.profile_image).await;

    get_profile(repo, user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::notification::NotificationType,
        repo::{MockAppRepo, sqlite::setup_in_memory_repo},
        services::MockStorageService,
    };
    use chrono::TimeDelta;
    use std::rc::Rc;

    fn signer() -> TokenSigner {
        TokenSigner::new([1u8; 32], TimeDelta::days(15))
    }

    fn register_form(username: &str, email: &str, password: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    async fn sqlite_repo() -> repo::ImplAppRepo {
        Rc::new(setup_in_memory_repo().await)
    }

    fn validation_msg(err: &anyhow::Error) -> String {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Validation(msg)) => msg.clone(),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[ntex::test]
    async fn test_register_persists_welcome_then_promotion() {
        let repo = sqlite_repo().await;
        let signer = signer();

        let auth = register(
            &repo,
            &signer,
            register_form("alice01", "a@x.com", "secret1"),
            Duration::from_millis(50),
        )
        .await
        .unwrap();

        assert_eq!(signer.verify(&auth.token).unwrap().sub, auth.user.id);
        assert_eq!(auth.user.username, "alice01");
        assert!(auth.user.profile_image.ends_with("alice01"));

        let notifications = repo
            .get_notifications_by_user_id(auth.user.id, 50)
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].notification_type, NotificationType::Welcome);
        assert!(notifications[0].title.contains("Welcome"));

        tokio::time::sleep(Duration::from_millis(300)).await;
        let notifications = repo
            .get_notifications_by_user_id(auth.user.id, 50)
            .await
            .unwrap();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].notification_type, NotificationType::Promotion);
    }

    #[ntex::test]
    async fn test_register_validations() {
        let repo = sqlite_repo().await;
        let signer = signer();
        let delay = Duration::from_secs(60);

        register(&repo, &signer, register_form("alice01", "a@x.com", "secret1"), delay)
            .await
            .unwrap();

        for (form, msg) in [
            (register_form("", "b@x.com", "secret1"), "All fields are required"),
            (register_form("bob01x", "b@x.com", ""), "All fields are required"),
            (
                register_form("bob", "b@x.com", "secret1"),
                "Username should be at least 6 characters long",
            ),
            (
                register_form("bob01x", "b@x.com", "abc"),
                "Password should be at least 6 characters long",
            ),
            (
                register_form("bob01x", "A@x.com", "secret1"),
                "Email Address already used",
            ),
            (
                register_form("alice01", "b@x.com", "secret1"),
                "Username already used",
            ),
        ] {
            let err = register(&repo, &signer, form, delay).await.unwrap_err();
            assert_eq!(validation_msg(&err), msg);
        }
    }

    #[ntex::test]
    async fn test_login() {
        let repo = sqlite_repo().await;
        let signer = signer();
        register(
            &repo,
            &signer,
            register_form("alice01", "a@x.com", "secret1"),
            Duration::from_secs(60),
        )
        .await
        .unwrap();

        let auth = login(
            &repo,
            &signer,
            LoginForm {
                email: "a@x.com".into(),
                password: "secret1".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(auth.user.email, "a@x.com");

        let err = login(
            &repo,
            &signer,
            LoginForm {
                email: "a@x.com".into(),
                password: "wrong11".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(validation_msg(&err), "Invalid Credentials");
    }

    #[ntex::test]
    async fn test_update_profile_rejects_taken_username() {
        let repo = sqlite_repo().await;
        let signer = signer();
        let delay = Duration::from_secs(60);
        let alice = register(&repo, &signer, register_form("alice01", "a@x.com", "secret1"), delay)
            .await
            .unwrap();
        register(&repo, &signer, register_form("bobby01", "b@x.com", "secret1"), delay)
            .await
            .unwrap();

        let err = update_profile(
            &repo,
            alice.user.id,
            UpdateProfileForm {
                username: Some("bobby01".into()),
                email: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(validation_msg(&err), "Username already used");

        let updated = update_profile(
            &repo,
            alice.user.id,
            UpdateProfileForm {
                username: Some("alice02".into()),
                email: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.username, "alice02");
        assert_eq!(updated.email, "a@x.com");
    }

    #[ntex::test]
    async fn test_upload_profile_image_discards_pic_when_db_fails() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_get_user_app_by_id().returning(|_| {
            Ok(Some(User::create_default("alice01", "a@x.com", "h".into())))
        });
        mock_repo
            .expect_update_user_app_profile_image()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("db down")));

        let mut mock_storage = MockStorageService::new();
        mock_storage.expect_save_pic().times(1).returning(|_, _| Ok(()));
        mock_storage
            .expect_delete_pic()
            .withf(|path| path.starts_with("profiles/") && path.ends_with(".png"))
            .times(1)
            .returning(|_| Ok(()));

        let repo: repo::ImplAppRepo = Rc::new(mock_repo);
        let storage: services::ImplStorageService = Rc::new(mock_storage);

        let result = upload_profile_image(
            &repo,
            &storage,
            1,
            Some(models::Pic {
                body: vec![1, 2, 3],
                filename_extension: "png".into(),
            }),
        )
        .await;
        assert!(result.is_err());
    }
}
