use super::*;

fn account() -> Account {
    Account { id: "u1".to_owned(), email: "a@b.com".to_owned() }
}

#[test]
fn pending_is_loading_without_account() {
    let state = AuthState::pending();
    assert!(state.loading);
    assert_eq!(state.account, None);
}

#[test]
fn resolved_clears_loading() {
    let state = AuthState::resolved(Some(account()));
    assert!(!state.loading);
    assert_eq!(state.email(), Some("a@b.com"));
}

#[test]
fn resolved_signed_out_has_no_email() {
    assert_eq!(AuthState::resolved(None).email(), None);
}
