use super::*;
use crate::server::{
    middleware::session::AuthSession,
    model::{
        role::{ADMIN_ROLE, USER_ROLE},
        user::{RegisterParams, UpdateMeParams},
    },
    service::{admin::code::AdminCodeService, auth::AuthService, bootstrap::BootstrapService},
};

fn params(username: &str, admin_code: Option<String>) -> RegisterParams {
    RegisterParams {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "password123".to_string(),
        admin_code,
    }
}

/// Tests a regular registration.
///
/// Expected: user created with only the member role
#[tokio::test]
async fn registers_member() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    BootstrapService::new(db).seed().await?;

    let codes = AdminCodeService::new();
    let user = AuthService::new(db, &codes, 4)
        .register(params("shark", None))
        .await?;

    assert_eq!(user.username, "shark");
    assert!(user.is_active);
    let roles: Vec<&str> = user.roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(roles, vec![USER_ROLE]);

    Ok(())
}

/// Tests registration with the admin code.
///
/// Expected: Admin role granted and the code consumed
#[tokio::test]
async fn admin_code_grants_admin_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    BootstrapService::new(db).seed().await?;

    let codes = AdminCodeService::new();
    let code = codes.generate().await;
    let service = AuthService::new(db, &codes, 4);

    let admin = service.register(params("boss", Some(code.clone()))).await?;
    assert!(admin.roles.iter().any(|r| r.name == ADMIN_ROLE));
    assert!(!codes.has_valid_code().await);

    let result = service.register(params("copycat", Some(code))).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a registration that fails after the uniqueness checks.
///
/// Expected: the hashing error is returned, no account exists and the code stays valid
#[tokio::test]
async fn failed_registration_keeps_admin_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    BootstrapService::new(db).seed().await?;

    let codes = AdminCodeService::new();
    let code = codes.generate().await;

    // bcrypt rejects costs below 4
    let broken = AuthService::new(db, &codes, 3);
    let result = broken.register(params("boss", Some(code.clone()))).await;
    assert!(matches!(result, Err(AppError::BcryptErr(_))));
    assert!(codes.has_valid_code().await);
    assert!(crate::server::data::user::UserRepository::new(db)
        .find_by_username("boss")
        .await?
        .is_none());

    let admin = AuthService::new(db, &codes, 4)
        .register(params("boss", Some(code)))
        .await?;
    assert!(admin.roles.iter().any(|r| r.name == ADMIN_ROLE));

    Ok(())
}

/// Tests that a conflicting username does not burn the admin code.
///
/// Expected: Err(Conflict) and the code stays valid
#[tokio::test]
async fn duplicate_username_keeps_admin_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    BootstrapService::new(db).seed().await?;

    let codes = AdminCodeService::new();
    let code = codes.generate().await;
    let service = AuthService::new(db, &codes, 4);

    service.register(params("shark", None)).await?;

    let mut duplicate = params("shark", Some(code));
    duplicate.email = "other@example.com".to_string();
    let result = service.register(duplicate).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(codes.has_valid_code().await);

    Ok(())
}

/// Tests that a duplicate email is rejected.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    BootstrapService::new(db).seed().await?;

    let codes = AdminCodeService::new();
    let service = AuthService::new(db, &codes, 4);
    service.register(params("shark", None)).await?;

    let mut other = params("whale", None);
    other.email = "shark@example.com".to_string();

    assert!(matches!(
        service.register(other).await,
        Err(AppError::Conflict(_))
    ));

    Ok(())
}

/// Tests login by username and by email.
///
/// Expected: both succeed and store the user id in the session
#[tokio::test]
async fn logs_in_with_username_or_email() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .username("shark")
        .email("shark@example.com")
        .build()
        .await?;
    let codes = AdminCodeService::new();
    let service = AuthService::new(db, &codes, 4);

    service
        .login(session, "shark", "password123".to_string())
        .await?;
    assert_eq!(AuthSession::new(session).get_user_id().await?, Some(user.id));

    service.logout(session).await?;
    assert_eq!(AuthSession::new(session).get_user_id().await?, None);

    let logged_in = service
        .login(session, "Shark@Example.com", "password123".to_string())
        .await?;
    assert!(logged_in.last_login_at.is_some());

    Ok(())
}

/// Tests failed logins.
///
/// Expected: InvalidCredentials for a wrong password or unknown user, UserInactive for a
/// deactivated account with the right password
#[tokio::test]
async fn rejects_bad_logins() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::user::UserFactory::new(db)
        .username("shark")
        .build()
        .await?;
    let inactive = factory::user::UserFactory::new(db)
        .username("sleeper")
        .active(false)
        .build()
        .await?;

    let codes = AdminCodeService::new();
    let service = AuthService::new(db, &codes, 4);

    assert!(matches!(
        service.login(session, "shark", "wrong-password".to_string()).await,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        service.login(session, "nobody", "password123".to_string()).await,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        service.login(session, "sleeper", "password123".to_string()).await,
        Err(AppError::AuthErr(AuthError::UserInactive(id))) if id == inactive.id
    ));
    assert_eq!(AuthSession::new(session).get_user_id().await?, None);

    Ok(())
}

/// Tests changing the email to one owned by someone else.
///
/// Expected: Err(Conflict); changing to a fresh email succeeds
#[tokio::test]
async fn update_me_checks_email_uniqueness() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let codes = AdminCodeService::new();
    let service = AuthService::new(db, &codes, 4);

    let result = service
        .update_me(
            user.id,
            UpdateMeParams {
                email: Some(other.email.clone()),
                password: None,
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let updated = service
        .update_me(
            user.id,
            UpdateMeParams {
                email: Some("fresh@example.com".to_string()),
                password: None,
            },
        )
        .await?;
    assert_eq!(updated.email, "fresh@example.com");

    Ok(())
}
