//! End-to-end scenarios over a scripted driver
//!
//! These tests drive the public surface the way step definitions do:
//! scenario start, page interactions resolved through the locator source,
//! failure capture, teardown.

mod common;

use common::TestWorld;
use helmsman::driver::mock::MockElement;
use helmsman::locator::Strategy;
use helmsman::Error;

const LOGIN_PAGE: &str = r##"{
    "pageName": "LoginPage",
    "pageUrl": "/login",
    "locators": {
        "loginButton": { "type": "css", "value": "#login", "description": "Login button" },
        "username": { "type": "id", "value": "username" },
        "password": { "type": "id", "value": "password" },
        "errorToast": { "type": "css", "value": ".toast-error" }
    }
}"##;

#[tokio::test]
async fn test_click_resolves_selector_and_clicks() {
    let world = TestWorld::new();
    world.write_locators("LoginPage", LOGIN_PAGE);

    let strategy = Strategy::Css("#login".into());
    world.driver.register(strategy.clone(), MockElement::visible());

    world
        .harness
        .start_scenario("w1", "user can log in", true)
        .await
        .unwrap();

    let pages = world.harness.pages("w1");
    pages.click("LoginPage", "loginButton").await.unwrap();

    // The css selector from the locator record reached the handle, and the
    // clickability wait probed it before the click landed
    assert_eq!(world.driver.resolved_strategies(), vec![strategy.clone()]);
    assert_eq!(world.driver.element(&strategy).unwrap().click_count(), 1);

    world.harness.finish_scenario("w1", "user can log in", None).await;
}

#[tokio::test]
async fn test_click_without_session_fails_cleanly() {
    let world = TestWorld::new();
    world.write_locators("LoginPage", LOGIN_PAGE);

    // No start_scenario: the worker never got a session
    let pages = world.harness.pages("w1");
    let result = pages.click("LoginPage", "loginButton").await;

    assert!(matches!(result, Err(Error::NoActiveSession(w)) if w == "w1"));
    // No wait was attempted against any handle, and nothing was cached
    assert!(world.factory.created().is_empty());
    assert_eq!(world.harness.locators().cached_pages(), 0);
}

#[tokio::test]
async fn test_is_displayed_swallows_missing_locator() {
    let world = TestWorld::new();
    world.write_locators("LoginPage", LOGIN_PAGE);

    world
        .harness
        .start_scenario("w1", "probe visibility", true)
        .await
        .unwrap();

    let pages = world.harness.pages("w1");
    // Element name absent from the page's locator set: false, not an error
    assert!(!pages.is_displayed("LoginPage", "rememberMe").await);

    world.harness.finish_scenario("w1", "probe visibility", None).await;
}

#[tokio::test]
async fn test_full_login_flow_with_typed_credentials() {
    let world = TestWorld::new();
    world.write_locators("LoginPage", LOGIN_PAGE);

    let username = MockElement::visible();
    let password = MockElement::visible();
    let button = MockElement::visible();
    world
        .driver
        .register(Strategy::Id("username".into()), username.clone());
    world
        .driver
        .register(Strategy::Id("password".into()), password.clone());
    world
        .driver
        .register(Strategy::Css("#login".into()), button.clone());

    world
        .harness
        .start_scenario("w1", "login happy path", true)
        .await
        .unwrap();

    let pages = world.harness.pages("w1");
    pages.open("LoginPage").await.unwrap();
    pages.type_text("LoginPage", "username", "alice").await.unwrap();
    pages.type_text("LoginPage", "password", "hunter2").await.unwrap();
    pages.click("LoginPage", "loginButton").await.unwrap();

    assert_eq!(
        world.driver.navigations(),
        vec!["http://localhost:8080/login"]
    );
    assert_eq!(username.value(), "alice");
    assert_eq!(password.value(), "hunter2");
    assert_eq!(button.click_count(), 1);

    world
        .harness
        .finish_scenario("w1", "login happy path", None)
        .await;
    assert!(!world.harness.registry().has_session("w1"));
}

#[tokio::test]
async fn test_failed_scenario_leaves_screenshot_artifact() {
    let world = TestWorld::new();
    world.write_locators("LoginPage", LOGIN_PAGE);

    world
        .harness
        .start_scenario("w1", "login rejects bad password", true)
        .await
        .unwrap();

    let artifact = world
        .harness
        .finish_scenario(
            "w1",
            "login rejects bad password",
            Some("expected error toast"),
        )
        .await
        .expect("failure screenshot");

    let name = artifact.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("FAILED_login_rejects_bad_password_"));
    assert!(name.ends_with(".png"));
    assert!(artifact.exists());

    // Session is gone regardless of the failure
    assert!(!world.harness.registry().has_session("w1"));
}

#[tokio::test]
async fn test_reinitialize_between_scenarios_replaces_session() {
    let world = TestWorld::new();
    world.write_locators("LoginPage", LOGIN_PAGE);

    world
        .harness
        .start_scenario("w1", "first scenario", true)
        .await
        .unwrap();
    let first = world.factory.created()[0].clone();

    // A crashed scenario never reached finish_scenario; the next start
    // recovers by replacing the stale session
    world
        .harness
        .start_scenario("w1", "second scenario", true)
        .await
        .unwrap();

    assert_eq!(first.quit_count(), 1);
    assert_eq!(world.factory.created().len(), 2);
    assert!(world.harness.registry().has_session("w1"));

    world.harness.finish_scenario("w1", "second scenario", None).await;
}

#[tokio::test]
async fn test_locator_cache_reload_reflects_source_changes() {
    let world = TestWorld::new();
    world.write_locators("LoginPage", LOGIN_PAGE);

    let locators = world.harness.locators();
    assert_eq!(
        locators.strategy("LoginPage", "loginButton").unwrap(),
        Strategy::Css("#login".into())
    );

    // The selector changes on disk; the cache still serves the old one
    world.write_locators(
        "LoginPage",
        r##"{"pageName":"LoginPage","locators":{"loginButton":{"type":"css","value":"#sign-in"}}}"##,
    );
    assert_eq!(
        locators.strategy("LoginPage", "loginButton").unwrap(),
        Strategy::Css("#login".into())
    );

    locators.clear_cache().unwrap();
    assert_eq!(
        locators.strategy("LoginPage", "loginButton").unwrap(),
        Strategy::Css("#sign-in".into())
    );
}

#[tokio::test]
async fn test_parallel_workers_keep_sessions_isolated() {
    let world = TestWorld::new();
    world.write_locators("LoginPage", LOGIN_PAGE);

    let mut tasks = Vec::new();
    for i in 0..4 {
        let harness = world.harness.clone();
        tasks.push(tokio::spawn(async move {
            let worker = format!("worker-{}", i);
            harness
                .start_scenario(&worker, "parallel scenario", true)
                .await
                .unwrap();
            assert!(harness.registry().has_session(&worker));
            harness.finish_scenario(&worker, "parallel scenario", None).await;
            assert!(!harness.registry().has_session(&worker));
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(world.harness.registry().session_count(), 0);
    assert_eq!(world.factory.created().len(), 4);
}
