use super::*;

fn error_body(message: &str) -> String {
    serde_json::json!({"error": {"code": 400, "message": message, "errors": []}}).to_string()
}

#[test]
fn parse_error_maps_known_codes() {
    assert_eq!(parse_error(400, &error_body("EMAIL_EXISTS")), AuthError::EmailExists);
    assert_eq!(parse_error(400, &error_body("EMAIL_NOT_FOUND")), AuthError::EmailNotFound);
    assert_eq!(parse_error(400, &error_body("INVALID_PASSWORD")), AuthError::InvalidCredentials);
    assert_eq!(
        parse_error(400, &error_body("INVALID_LOGIN_CREDENTIALS")),
        AuthError::InvalidCredentials
    );
    assert_eq!(parse_error(400, &error_body("INVALID_EMAIL")), AuthError::InvalidEmail);
}

#[test]
fn parse_error_strips_detail_suffix() {
    let body = error_body("WEAK_PASSWORD : Password should be at least 6 characters");
    assert_eq!(parse_error(400, &body), AuthError::WeakPassword);
}

#[test]
fn parse_error_keeps_unknown_codes() {
    let err = parse_error(400, &error_body("TOO_MANY_ATTEMPTS_TRY_LATER"));
    assert_eq!(
        err,
        AuthError::Provider { status: 400, message: "TOO_MANY_ATTEMPTS_TRY_LATER".to_owned() }
    );
}

#[test]
fn parse_error_handles_non_json_body() {
    let err = parse_error(503, "Service Unavailable");
    assert_eq!(err, AuthError::Provider { status: 503, message: "Service Unavailable".to_owned() });
}

#[test]
fn parse_account_reads_local_id_and_email() {
    let body = r#"{"kind":"identitytoolkit#SignupNewUserResponse","idToken":"t","email":"a@b.com","refreshToken":"r","expiresIn":"3600","localId":"uid-42"}"#;
    let account = parse_account(body).unwrap();
    assert_eq!(account, Account { id: "uid-42".to_owned(), email: "a@b.com".to_owned() });
}

#[test]
fn parse_account_rejects_missing_fields() {
    assert!(matches!(parse_account(r#"{"email":"a@b.com"}"#), Err(AuthError::Request(_))));
}

#[test]
fn endpoint_uses_accounts_prefix() {
    let client = FirebaseAccounts::new("k".to_owned(), HttpTimeouts::default()).unwrap();
    assert_eq!(
        client.endpoint("signUp"),
        "https://identitytoolkit.googleapis.com/v1/accounts:signUp"
    );
}
