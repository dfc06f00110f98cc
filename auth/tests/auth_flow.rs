mod common;

use chrono::Utc;
use common::TestAuth;
use common::SECRET;
use deadlight_auth::jwt;
use deadlight_auth::AuthenticationError;
use deadlight_auth::JwtConfig;
use deadlight_auth::JwtError;
use deadlight_auth::StoreError;

#[tokio::test]
async fn test_create_login_and_check_request() {
    let app = TestAuth::new();

    let alice = app
        .authenticator
        .create_user("alice", "secret123", "user")
        .await
        .expect("Failed to create user");

    let result = app
        .authenticator
        .login("alice", "secret123")
        .await
        .expect("Login failed");
    assert_eq!(result.user.id, alice.id);
    assert_eq!(result.user.role, "user");
    assert!(app.store.get(alice.id).unwrap().last_login.is_some());

    let cookie = format!("session={}", result.token);
    let identity = app
        .authenticator
        .check_request(&cookie)
        .expect("Request should authenticate");
    assert_eq!(identity.user_id, alice.id);
    assert_eq!(identity.username, "alice");

    let err = app
        .authenticator
        .login("alice", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthenticationError::InvalidCredentials));
    assert_eq!(err.to_string(), "Authentication failed");
}

#[tokio::test]
async fn test_unknown_and_inactive_users_get_same_error() {
    let app = TestAuth::new();
    let bob = app
        .authenticator
        .create_user("bob", "hunter22", "admin")
        .await
        .unwrap();
    app.store.deactivate(bob.id);

    let unknown = app.authenticator.login("nobody", "hunter22").await.unwrap_err();
    let inactive = app.authenticator.login("bob", "hunter22").await.unwrap_err();
    let wrong = app.authenticator.login("bob", "hunter23").await.unwrap_err();

    assert_eq!(unknown.to_string(), inactive.to_string());
    assert_eq!(inactive.to_string(), wrong.to_string());
}

#[tokio::test]
async fn test_duplicate_username_is_reported_by_store() {
    let app = TestAuth::new();
    app.authenticator
        .create_user("alice", "secret123", "user")
        .await
        .unwrap();

    let result = app
        .authenticator
        .create_user("alice", "another", "user")
        .await;
    assert!(matches!(
        result,
        Err(AuthenticationError::StoreError(
            StoreError::UsernameAlreadyExists(_)
        ))
    ));
}

#[tokio::test]
async fn test_change_password_then_login() {
    let app = TestAuth::new();
    let mut alice = app
        .authenticator
        .create_user("alice", "secret123", "user")
        .await
        .unwrap();

    app.authenticator
        .change_password(&mut alice, "secret123", "n3w-secret")
        .await
        .expect("Failed to change password");

    assert_eq!(
        app.store.get(alice.id).unwrap().password_hash,
        alice.password_hash
    );
    assert!(app.authenticator.login("alice", "secret123").await.is_err());
    assert!(app.authenticator.login("alice", "n3w-secret").await.is_ok());
}

#[tokio::test]
async fn test_logout_leaves_token_valid() {
    let app = TestAuth::new();
    app.authenticator
        .create_user("alice", "secret123", "user")
        .await
        .unwrap();
    let result = app.authenticator.login("alice", "secret123").await.unwrap();

    app.authenticator.logout(&result.token);

    assert!(app.authenticator.verify_token(&result.token).is_ok());
}

#[test]
fn test_token_from_another_issuer_is_rejected() {
    let app = TestAuth::new();
    let foreign = JwtConfig::new(SECRET, 3_600)
        .unwrap()
        .with_issuer("someone-else")
        .with_audience("web");
    let now = Utc::now().timestamp();
    let claims = jwt::Claims::for_user(9, "eve", "admin", now, 3_600)
        .with_issuer("someone-else")
        .with_audience("web");
    let token = jwt::create(&claims, &foreign).unwrap();

    assert!(matches!(
        app.authenticator.verify_token(&token),
        Err(AuthenticationError::JwtError(JwtError::InvalidIssuer))
    ));
}

#[test]
fn test_token_signed_with_another_secret_is_rejected() {
    let app = TestAuth::new();
    let forger = JwtConfig::new(b"a_completely_different_secret_key!".to_vec(), 3_600)
        .unwrap()
        .with_issuer("deadlight")
        .with_audience("web");
    let now = Utc::now().timestamp();
    let claims = jwt::Claims::for_user(9, "eve", "admin", now, 3_600)
        .with_issuer("deadlight")
        .with_audience("web");
    let token = jwt::create(&claims, &forger).unwrap();

    assert!(matches!(
        app.authenticator.check_request(&format!("session={}", token)),
        Err(AuthenticationError::JwtError(JwtError::InvalidSignature))
    ));
}
