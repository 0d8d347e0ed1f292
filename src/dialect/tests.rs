//! Tests for dialect module

use super::*;
use crate::pagination::CursorSource;

// ============================================================================
// Dialect Tests
// ============================================================================

#[test]
fn test_dialect_conventions() {
    assert_eq!(Dialect::Old.cursor_source(), CursorSource::LinkHeader);
    assert_eq!(Dialect::New.cursor_source(), CursorSource::Body);

    assert_eq!(Dialect::Old.cursor_param(), "cursor");
    assert_eq!(Dialect::New.cursor_param(), "page_cursor");
    assert_eq!(Dialect::Old.page_size_param(), "per_page");
    assert_eq!(Dialect::New.page_size_param(), "limit");
}

#[test]
fn test_dialect_default_is_new() {
    assert_eq!(Dialect::default(), Dialect::New);
}

#[test]
fn test_dialect_parse_and_display() {
    assert_eq!("old".parse::<Dialect>().unwrap(), Dialect::Old);
    assert_eq!(" NEW ".parse::<Dialect>().unwrap(), Dialect::New);
    assert_eq!(Dialect::Old.to_string(), "old");

    let err = "v3".parse::<Dialect>().unwrap_err();
    assert!(err.to_string().contains("got 'v3'"));
}

#[test]
fn test_dialect_serde() {
    let dialect: Dialect = serde_json::from_str("\"old\"").unwrap();
    assert_eq!(dialect, Dialect::Old);
    assert_eq!(serde_json::to_string(&Dialect::New).unwrap(), "\"new\"");
}

// ============================================================================
// ActiveDialect Tests
// ============================================================================

#[test]
fn test_active_dialect_clones_share_state() {
    let active = ActiveDialect::new(Dialect::Old);
    let other = active.clone();

    other.set(Dialect::New);
    assert_eq!(active.get(), Dialect::New);
}

// ============================================================================
// DialectGuard Tests
// ============================================================================

#[test]
fn test_guard_switches_and_restores_on_drop() {
    let active = ActiveDialect::new(Dialect::New);

    {
        let guard = active.enter(Dialect::Old);
        assert!(guard.switched());
        assert_eq!(guard.original(), Dialect::New);
        assert_eq!(guard.target(), Dialect::Old);
        assert_eq!(active.get(), Dialect::Old);
    }

    assert_eq!(active.get(), Dialect::New);
}

#[test]
fn test_guard_same_dialect_is_noop() {
    let active = ActiveDialect::new(Dialect::Old);
    let mut guard = active.enter(Dialect::Old);
    assert!(!guard.switched());

    // Someone else changes the dialect while the guard is open; a no-op
    // guard must not clobber it on the way out.
    active.set(Dialect::New);
    guard.restore();
    assert_eq!(active.get(), Dialect::New);
}

#[test]
fn test_guard_restore_is_idempotent() {
    let active = ActiveDialect::new(Dialect::New);
    let mut guard = active.enter(Dialect::Old);

    guard.restore();
    assert!(guard.is_restored());
    assert_eq!(active.get(), Dialect::New);

    active.set(Dialect::Old);
    guard.restore();
    drop(guard);
    assert_eq!(active.get(), Dialect::Old);
}

#[test]
fn test_nested_guards_restore_intermediate_dialect() {
    let active = ActiveDialect::new(Dialect::New);

    let outer = active.enter(Dialect::Old);
    assert_eq!(active.get(), Dialect::Old);

    let inner = active.enter(Dialect::New);
    assert_eq!(active.get(), Dialect::New);

    drop(inner);
    assert_eq!(active.get(), Dialect::Old);

    drop(outer);
    assert_eq!(active.get(), Dialect::New);
}

#[test]
fn test_guard_restores_on_error_path() {
    fn guarded(active: &ActiveDialect) -> Result<(), String> {
        let _guard = active.enter(Dialect::Old);
        Err::<(), _>("boom".to_string())?;
        Ok(())
    }

    let active = ActiveDialect::new(Dialect::New);
    assert_eq!(guarded(&active), Err("boom".to_string()));
    assert_eq!(active.get(), Dialect::New);
}

#[test]
fn test_guard_restores_on_panic() {
    let active = ActiveDialect::new(Dialect::New);
    let cell = active.clone();

    let result = std::panic::catch_unwind(move || {
        let _guard = cell.enter(Dialect::Old);
        panic!("guarded body panicked");
    });

    assert!(result.is_err());
    assert_eq!(active.get(), Dialect::New);
}
