//! Crate-level tests for the auth module

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use crate::application::{
        AuthConfig, CheckTokenUseCase, ManageUsersUseCase, SignInInput, SignInUseCase,
        SignUpInput, SignUpUseCase, UpdateUserInput,
    };
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthError;
    use crate::infra::memory::MemoryAuthRepository;

    fn setup() -> (Arc<MemoryAuthRepository>, Arc<AuthConfig>) {
        (
            Arc::new(MemoryAuthRepository::new()),
            Arc::new(AuthConfig::development()),
        )
    }

    fn sign_up_input(name: &str, password: &str) -> SignUpInput {
        SignUpInput {
            user_name: name.to_string(),
            password: password.to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn test_stored_credential_is_never_plaintext() {
        let (repo, config) = setup();
        let user = SignUpUseCase::new(repo.clone(), config)
            .execute(sign_up_input("alice", "pw1"))
            .await
            .unwrap();

        let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash.as_str(), "pw1");
        assert!(stored.password_hash.as_str().starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_user_name_is_rejected() {
        let (repo, config) = setup();
        let use_case = SignUpUseCase::new(repo, config);
        use_case.execute(sign_up_input("alice", "pw1")).await.unwrap();

        let err = use_case
            .execute(sign_up_input("ALICE", "pw2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let (repo, config) = setup();
        let use_case = SignUpUseCase::new(repo, config);

        let err = use_case.execute(sign_up_input("", "pw1")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = use_case.execute(sign_up_input("bob", "")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_token_authenticates_as_same_user() {
        let (repo, config) = setup();
        let user = SignUpUseCase::new(repo.clone(), config.clone())
            .execute(sign_up_input("alice", "pw1"))
            .await
            .unwrap();

        let output = SignInUseCase::new(repo, config.clone())
            .execute(SignInInput {
                user_name: "alice".to_string(),
                password: "pw1".to_string(),
            })
            .await
            .unwrap();

        let principal = CheckTokenUseCase::new(config)
            .execute(&output.token.token)
            .unwrap();
        assert_eq!(principal.user_id, user.user_id);
        assert_eq!(principal.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_login_failures_are_invalid_credentials() {
        let (repo, config) = setup();
        SignUpUseCase::new(repo.clone(), config.clone())
            .execute(sign_up_input("alice", "pw1"))
            .await
            .unwrap();

        let use_case = SignInUseCase::new(repo, config);
        for (name, password) in [("alice", "wrong"), ("nobody", "pw1"), ("", "pw1")] {
            let result = use_case
                .execute(SignInInput {
                    user_name: name.to_string(),
                    password: password.to_string(),
                })
                .await;
            assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn test_update_keeps_password_when_empty() {
        let (repo, config) = setup();
        let manage = ManageUsersUseCase::new(repo.clone(), config.clone());
        let user = manage.create(sign_up_input("alice", "pw1")).await.unwrap();

        let updated = manage
            .update(
                &user.user_id,
                UpdateUserInput {
                    user_name: "alice2".to_string(),
                    role: UserRole::Admin,
                    password: Some(String::new()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.user_name.original(), "alice2");
        assert_eq!(updated.user_role, UserRole::Admin);
        assert_eq!(updated.password_hash, user.password_hash);

        let sign_in = SignInUseCase::new(repo, config);
        let output = sign_in
            .execute(SignInInput {
                user_name: "alice2".to_string(),
                password: "pw1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(output.user.user_role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_update_rehashes_new_password() {
        let (repo, config) = setup();
        let manage = ManageUsersUseCase::new(repo.clone(), config.clone());
        let user = manage.create(sign_up_input("alice", "pw1")).await.unwrap();

        manage
            .update(
                &user.user_id,
                UpdateUserInput {
                    user_name: "alice".to_string(),
                    role: UserRole::User,
                    password: Some("pw2".to_string()),
                },
            )
            .await
            .unwrap();

        let sign_in = SignInUseCase::new(repo, config);
        let old = sign_in
            .execute(SignInInput {
                user_name: "alice".to_string(),
                password: "pw1".to_string(),
            })
            .await;
        assert!(matches!(old, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_rejects_taken_name() {
        let (repo, config) = setup();
        let manage = ManageUsersUseCase::new(repo, config);
        manage.create(sign_up_input("alice", "pw1")).await.unwrap();
        let bob = manage.create(sign_up_input("bob", "pw1")).await.unwrap();

        let err = manage
            .update(
                &bob.user_id,
                UpdateUserInput {
                    user_name: "Alice".to_string(),
                    role: UserRole::User,
                    password: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_user_and_frees_name() {
        let (repo, config) = setup();
        let manage = ManageUsersUseCase::new(repo.clone(), config);
        let user = manage.create(sign_up_input("alice", "pw1")).await.unwrap();

        manage.delete(&user.user_id).await.unwrap();

        assert!(matches!(
            manage.get(&user.user_id).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(manage.list().await.unwrap().is_empty());
        assert!(repo.find_any(&user.user_id).unwrap().unwrap().is_deleted());

        // Name is reusable once the old account is deleted
        manage.create(sign_up_input("alice", "pw1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let (repo, config) = setup();
        let manage = ManageUsersUseCase::new(repo, config);

        assert!(manage.ensure_admin("root", "secret").await.unwrap());
        assert!(!manage.ensure_admin("root", "secret").await.unwrap());

        let users = manage.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_role, UserRole::Admin);
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::{AuthConfig, ManageUsersUseCase};
    use crate::infra::memory::MemoryAuthRepository;
    use crate::presentation::router::auth_router_generic;

    async fn app() -> Router {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = Arc::new(AuthConfig::development());
        ManageUsersUseCase::new(repo.clone(), config.clone())
            .ensure_admin("root", "rootpw")
            .await
            .unwrap();
        auth_router_generic(repo, config)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login(app: &Router, username: &str, password: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": username, "password": password})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let app = app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "alice", "password": "pw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice");
        assert_eq!(body["role"], "user");
        assert!(body.get("password").is_none());

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.get("token").is_none());
        assert_eq!(body["status"], 401);

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "pw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tokenType"], "Bearer");
        assert!(body["expiresAtMs"].as_i64().unwrap() > 0);

        let token = body["token"].as_str().unwrap();
        let (status, me) = send(&app, "GET", "/api/auth/me", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["id"], body["user"]["id"]);
    }

    #[tokio::test]
    async fn test_register_missing_field_is_bad_request() {
        let app = app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "alice"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_protected_routes_need_token() {
        let app = app().await;

        let (status, _) = send(&app, "GET", "/api/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "GET", "/api/users/", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_user_management_requires_admin() {
        let app = app().await;
        send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "alice", "password": "pw1"})),
        )
        .await;
        let token = login(&app, "alice", "pw1").await;
        let some_id = uuid::Uuid::new_v4();

        let cases = [
            ("GET", "/api/users/".to_string(), None),
            (
                "POST",
                "/api/users/".to_string(),
                Some(json!({"username": "x", "password": "y"})),
            ),
            ("GET", format!("/api/users/{some_id}"), None),
            (
                "PUT",
                format!("/api/users/{some_id}"),
                Some(json!({"username": "x", "role": "admin"})),
            ),
            ("DELETE", format!("/api/users/{some_id}"), None),
            // Forbidden wins over a malformed body
            ("POST", "/api/users".to_string(), Some(json!({}))),
        ];

        for (method, uri, body) in cases {
            let (status, _) = send(&app, method, &uri, Some(&token), body).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn test_admin_user_crud() {
        let app = app().await;
        let token = login(&app, "root", "rootpw").await;

        let (status, created) = send(
            &app,
            "POST",
            "/api/users/",
            Some(&token),
            Some(json!({"username": "bob", "password": "pw1", "role": "admin"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["role"], "admin");
        let id = created["id"].as_str().unwrap().to_string();

        let (status, list) = send(&app, "GET", "/api/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 2);
        assert_eq!(list[0]["username"], "bob");

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/users/{id}"),
            Some(&token),
            Some(json!({"username": "bobby", "role": "user"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["username"], "bobby");
        assert_eq!(updated["role"], "user");

        let (status, body) =
            send(&app, "DELETE", &format!("/api/users/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User deleted successfully");

        let (status, _) = send(&app, "GET", &format!("/api/users/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_ids_and_roles_are_bad_request() {
        let app = app().await;
        let token = login(&app, "root", "rootpw").await;

        let (status, _) = send(&app, "GET", "/api/users/not-a-uuid", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/api/users/",
            Some(&token),
            Some(json!({"username": "carol", "password": "pw1", "role": "owner"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
