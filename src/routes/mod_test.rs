use super::*;

#[tokio::test]
async fn healthz_is_ok() {
    assert_eq!(healthz().await, StatusCode::OK);
}

#[test]
fn app_builds_with_missing_public_dir() {
    let dir = std::env::temp_dir().join("roomboard-no-such-public-dir");
    let _router: Router = app(AppState::default(), &dir);
}
