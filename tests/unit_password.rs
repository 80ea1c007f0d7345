use dzskills::dzskills_core::{hash_password, verify_password};

#[test]
fn test_hash_password_success() {
    let password = "testpassword123";
    let hash = hash_password(password).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
}

#[test]
fn test_verify_password_correct() {
    let hash = hash_password("correctpassword").unwrap();
    assert!(verify_password("correctpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password("correctpassword").unwrap();
    assert!(!verify_password("wrongpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    let err = verify_password("password", "not-a-bcrypt-hash").unwrap_err();
    assert_eq!(err.status.as_u16(), 500);
}

#[test]
fn test_hash_generates_unique_hashes() {
    let a = hash_password("samepassword").unwrap();
    let b = hash_password("samepassword").unwrap();

    assert_ne!(a, b);
    assert!(verify_password("samepassword", &a).unwrap());
    assert!(verify_password("samepassword", &b).unwrap());
}

#[test]
fn test_hash_unicode_characters() {
    let password = "كلمة_السر_123";
    let hash = hash_password(password).unwrap();
    assert!(verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_case_sensitive() {
    let hash = hash_password("Password123").unwrap();
    assert!(!verify_password("password123", &hash).unwrap());
}
