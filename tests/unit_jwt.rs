use dzskills::dzskills_auth::{UserRole, create_access_token, verify_token};
use dzskills::dzskills_config::JwtConfig;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();

    let result = create_access_token(
        Uuid::new_v4(),
        "amina",
        "amina@dzskills.dz",
        UserRole::Student,
        &jwt_config,
    );

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_verify_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(
        user_id,
        "yacine",
        "yacine@dzskills.dz",
        UserRole::Teacher,
        &jwt_config,
    )
    .unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.username, "yacine");
    assert_eq!(claims.email, "yacine@dzskills.dz");
}

#[test]
fn test_token_contains_role() {
    let jwt_config = get_test_jwt_config();

    for role in [UserRole::Teacher, UserRole::Student] {
        let token =
            create_access_token(Uuid::new_v4(), "u", "u@dzskills.dz", role, &jwt_config).unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();
        assert_eq!(claims.role, role);
    }
}

#[test]
fn test_token_expiry_is_set() {
    let jwt_config = get_test_jwt_config();
    let before = chrono::Utc::now().timestamp() as usize;

    let token =
        create_access_token(Uuid::new_v4(), "u", "u@dzskills.dz", UserRole::Student, &jwt_config)
            .unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert!(claims.iat >= before);
    assert_eq!(claims.exp, claims.iat + 3600);
}

#[test]
fn test_verify_token_wrong_secret() {
    let token = create_access_token(
        Uuid::new_v4(),
        "u",
        "u@dzskills.dz",
        UserRole::Student,
        &get_test_jwt_config(),
    )
    .unwrap();

    let other = JwtConfig {
        secret: "another_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    };

    let err = verify_token(&token, &other).unwrap_err();
    assert_eq!(err.status.as_u16(), 401);
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();

    for token in ["", "invalid.token", "a.b.c", "not-a-jwt-at-all"] {
        assert!(verify_token(token, &jwt_config).is_err());
    }
}

#[test]
fn test_create_token_different_users_different_tokens() {
    let jwt_config = get_test_jwt_config();

    let a = create_access_token(Uuid::new_v4(), "a", "a@dzskills.dz", UserRole::Student, &jwt_config)
        .unwrap();
    let b = create_access_token(Uuid::new_v4(), "b", "b@dzskills.dz", UserRole::Student, &jwt_config)
        .unwrap();

    assert_ne!(a, b);
}
