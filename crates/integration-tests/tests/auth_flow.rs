//! Registration, login and logout against a mock backend.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use bazaar_core::Role;
use bazaar_integration_tests::TestContext;
use bazaar_storefront::views::login::LOGIN_FAILED;
use bazaar_storefront::views::{LoginView, Navbar, RegisterView, Route};

fn login_form(email: &str, password: &str) -> LoginView {
    let mut view = LoginView::new();
    view.email = email.to_owned();
    view.password = SecretString::from(password.to_owned());
    view
}

#[tokio::test]
async fn test_wrong_credentials_write_no_session() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials\n"))
        .mount(&ctx.server)
        .await;

    let state = ctx.state();
    let mut view = login_form("robin@shop.test", "wrong");

    assert_eq!(view.submit(&state.auth).await, None);
    assert_eq!(view.error(), Some(LOGIN_FAILED));
    assert!(state.sessions.load().is_none());
    assert!(ctx.state().sessions.token().is_none());
}

#[tokio::test]
async fn test_login_persists_session_across_restart() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(serde_json::json!({
            "email": "robin@shop.test",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "jwt-abc",
            "user": {"id": 7, "name": "Robin", "email": "robin@shop.test", "role": "customer"}
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let state = ctx.state();
    let mut view = login_form(" robin@shop.test ", "hunter2");
    assert_eq!(view.submit(&state.auth).await, Some(Route::Home));

    let restarted = ctx.state();
    let mut navbar = Navbar::new(&restarted);
    assert_eq!(navbar.user().unwrap().name, "Robin");

    assert_eq!(navbar.logout(&restarted), Route::Login);
    assert!(ctx.state().sessions.load().is_none());
}

#[tokio::test]
async fn test_register_then_login_as_seller() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "jwt-seller",
            "user": {"id": 8, "name": "Sam", "email": "sam@shop.test", "role": "seller"}
        })))
        .mount(&ctx.server)
        .await;

    let state = ctx.state();

    let mut register = RegisterView::new();
    register.name = "Sam".to_owned();
    register.email = "sam@shop.test".to_owned();
    register.password = SecretString::from("pw".to_owned());
    register.role = Role::Seller;
    assert_eq!(register.submit(&state.auth).await, Some(Route::Login));
    assert!(state.sessions.load().is_none());

    let mut login = login_form("sam@shop.test", "pw");
    assert_eq!(login.submit(&state.auth).await, Some(Route::Seller));
}

#[tokio::test]
async fn test_duplicate_registration_shows_backend_message() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("Could not register user (email might exist)\n"),
        )
        .mount(&ctx.server)
        .await;

    let state = ctx.state();
    let mut register = RegisterView::new();
    register.name = "Sam".to_owned();
    register.email = "sam@shop.test".to_owned();

    assert_eq!(register.submit(&state.auth).await, None);
    assert_eq!(
        register.notice().unwrap().message,
        "Could not register user (email might exist)"
    );
}
