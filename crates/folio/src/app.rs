use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        dashboard::{
            create_project_submit, delete_project_submit, edit_project_page, edit_project_submit,
            new_project_page, projects_page,
        },
        health::{livez, readyz},
        login::{login_page, login_submit},
        projects::{create_project, delete_project, get_project, list_projects, update_project},
        root::root_redirect,
        upload::upload_image,
        uploads::serve_upload,
    },
    middleware::dashboard_gate,
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{slug}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/upload", post(upload_image))
        .layer(cors.clone());

    let dashboard_routes = Router::new()
        .route("/dashboard", get(root_redirect))
        .route("/dashboard/projects", get(projects_page))
        .route(
            "/dashboard/projects/new",
            get(new_project_page).post(create_project_submit),
        )
        .route(
            "/dashboard/projects/{slug}/edit",
            get(edit_project_page).post(edit_project_submit),
        )
        .route(
            "/dashboard/projects/{slug}/delete",
            post(delete_project_submit),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), dashboard_gate));

    let auth_routes = folio_auth::auth_routes()
        .layer(cors)
        .with_state(state.auth.clone());

    Router::new()
        .route("/", get(root_redirect))
        .route("/auth/login", get(login_page).post(login_submit))
        .route("/uploads/{*path}", get(serve_upload))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .merge(dashboard_routes)
        .merge(auth_routes)
        .layer(DefaultBodyLimit::max(state.config.body_limit()))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout(),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, response::Response};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        handlers::form::tests::{multipart_body, multipart_content_type},
        state::tests::{disk_test_state, test_state},
    };

    fn session_cookie(state: &AppState) -> String {
        format!("session={}", state.auth.issue_token(Utc::now()).unwrap())
    }

    async fn body_string(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, cookie: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, cookie)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const NEW_PROJECT: &str = r#"{
        "title": "Weather App",
        "slug": "weather-app",
        "short_description": "Forecasts",
        "description": "",
        "image_url": "https://example.com/weather.png",
        "screenshots": ["https://example.com/w1.png"]
    }"#;

    #[tokio::test]
    async fn test_health_probes() {
        let app = create_app(test_state().await);

        let response = app.clone().oneshot(get("/livez")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/readyz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["healthy"], true);
    }

    #[tokio::test]
    async fn test_root_redirects_to_dashboard() {
        let app = create_app(test_state().await);

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard/projects"
        );
    }

    #[tokio::test]
    async fn test_dashboard_requires_session() {
        let app = create_app(test_state().await);

        let response = app
            .clone()
            .oneshot(get("/dashboard/projects"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login"
        );

        let response = app
            .oneshot(get("/dashboard/projects/new"))
            .await
            .unwrap();
        let location = response.headers().get(header::LOCATION).unwrap();
        assert!(location.to_str().unwrap().starts_with("/auth/login?return_to="));
    }

    #[tokio::test]
    async fn test_list_projects_empty() {
        let app = create_app(test_state().await);

        let response = app.oneshot(get("/api/projects")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_mutations_require_session() {
        let app = create_app(test_state().await);

        let response = app
            .oneshot(json_request("POST", "/api/projects", "", NEW_PROJECT))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_project_lifecycle() {
        let state = test_state().await;
        let cookie = session_cookie(&state);
        let app = create_app(state);

        // Create
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/projects", &cookie, NEW_PROJECT))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["slug"], "weather-app");
        assert!(created["description"].is_null());

        // Duplicate slug
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/projects", &cookie, NEW_PROJECT))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["error"], "Slug already exists");

        // Partial update
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/projects/weather-app",
                &cookie,
                r#"{"title": "Weather Pro", "screenshots": []}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["title"], "Weather Pro");
        assert_eq!(updated["short_description"], "Forecasts");
        assert_eq!(updated["screenshots"], serde_json::json!([]));

        // Fetch
        let response = app
            .clone()
            .oneshot(get("/api/projects/weather-app"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["title"], "Weather Pro");

        // Delete
        let response = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                "/api/projects/weather-app",
                &cookie,
                "",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "Project deleted successfully"
        );

        let response = app
            .oneshot(get("/api/projects/weather-app"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Project not found");
    }

    #[tokio::test]
    async fn test_create_validation_errors() {
        let state = test_state().await;
        let cookie = session_cookie(&state);
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/projects",
                &cookie,
                r#"{"title": "No slug"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Missing required fields");

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/projects",
                &cookie,
                r#"{"title": "T", "slug": "t", "short_description": "S"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Main image is required");
    }

    #[tokio::test]
    async fn test_create_multipart_with_image() {
        let state = test_state().await;
        let cookie = session_cookie(&state);
        let app = create_app(state);

        let body = multipart_body(&[
            ("title", None, "Gallery"),
            ("slug", None, "gallery"),
            ("short_description", None, "Pictures"),
            ("image", Some(("main.png", "image/png")), "png-bytes"),
            ("screenshot_files", Some(("s.gif", "image/gif")), "gif-bytes"),
        ]);
        let request = Request::builder()
            .method("POST")
            .uri("/api/projects")
            .header(header::CONTENT_TYPE, multipart_content_type())
            .header(header::COOKIE, &cookie)
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let project = body_json(response).await;
        assert!(project["image_url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
        assert!(project["screenshots"][0]
            .as_str()
            .unwrap()
            .starts_with("data:image/gif;base64,"));
    }

    #[tokio::test]
    async fn test_upload_endpoint() {
        let state = test_state().await;
        let cookie = session_cookie(&state);
        let app = create_app(state);

        let upload = |parts: Vec<(&'static str, Option<(&'static str, &'static str)>, &'static str)>| {
            Request::builder()
                .method("POST")
                .uri("/api/upload")
                .header(header::CONTENT_TYPE, multipart_content_type())
                .header(header::COOKIE, &cookie)
                .body(Body::from(multipart_body(&parts)))
                .unwrap()
        };

        let response = app
            .clone()
            .oneshot(upload(vec![("other", None, "x")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No file uploaded");

        let response = app
            .clone()
            .oneshot(upload(vec![("file", Some(("a.txt", "text/plain")), "hi")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Only image files are allowed"
        );

        let response = app
            .oneshot(upload(vec![("file", Some(("a.png", "image/png")), "png")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(body_json(response).await["imageUrl"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_multipart_body_as_json() {
        let state = test_state().await;
        let cookie = session_cookie(&state);
        let app = create_app(state);

        let response = app
            .oneshot(json_request("POST", "/api/upload", &cookie, "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_login_form_sets_session() {
        let app = create_app(test_state().await);

        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=admin&password=password123"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard/projects"
        );
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().starts_with("session="));

        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=admin&password=wrong"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get(header::LOCATION).unwrap();
        assert!(location.to_str().unwrap().starts_with("/auth/login"));
        let flash = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(flash.to_str().unwrap().starts_with("flash_message="));
    }

    #[tokio::test]
    async fn test_login_page_renders() {
        let app = create_app(test_state().await);

        let response = app.oneshot(get("/auth/login")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Sign in"));
    }

    #[tokio::test]
    async fn test_dashboard_pages_with_session() {
        let state = test_state().await;
        let cookie = session_cookie(&state);
        let app = create_app(state);

        let request = Request::builder()
            .uri("/dashboard/projects")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("No projects yet"));

        let request = Request::builder()
            .method("POST")
            .uri("/dashboard/projects/new")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::COOKIE, &cookie)
            .body(Body::from("title=Half+filled"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_string(response).await;
        assert!(html.contains("Missing required fields"));
        assert!(html.contains("Half filled"));

        let request = Request::builder()
            .method("POST")
            .uri("/dashboard/projects/new")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::COOKIE, &cookie)
            .body(Body::from(
                "title=Blog&slug=blog&short_description=Posts&image_url=https%3A%2F%2Fexample.com%2Fb.png",
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let request = Request::builder()
            .uri("/dashboard/projects/missing/edit")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let request = Request::builder()
            .method("POST")
            .uri("/dashboard/projects/blog/delete")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard/projects"
        );
    }

    #[tokio::test]
    async fn test_uploads_are_served_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cat.png"), b"png").unwrap();
        let app = create_app(disk_test_state(dir.path()).await);

        let response = app.clone().oneshot(get("/uploads/cat.png")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=31536000, immutable"
        );

        let response = app.clone().oneshot(get("/uploads/dog.png")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(get("/uploads/..%2F..%2Fetc%2Fpasswd"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
