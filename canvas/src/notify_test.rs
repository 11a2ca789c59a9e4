use super::*;

#[test]
fn nothing_visible_initially() {
    let notifier = Notifier::new(3000.0);
    assert!(notifier.visible(0.0).is_none());
}

#[test]
fn visible_until_ttl_elapses() {
    let mut notifier = Notifier::new(3000.0);
    notifier.show("Board saved successfully!", Severity::Success, 1000.0);
    assert_eq!(notifier.visible(1000.0).unwrap().message, "Board saved successfully!");
    assert!(notifier.visible(3999.0).is_some());
    assert!(notifier.visible(4000.0).is_none());
}

#[test]
fn newer_notification_replaces_current() {
    let mut notifier = Notifier::new(3000.0);
    notifier.show("first", Severity::Info, 0.0);
    notifier.show("second", Severity::Error, 2500.0);
    let shown = notifier.visible(4000.0).unwrap();
    assert_eq!(shown.message, "second");
    assert_eq!(shown.severity, Severity::Error);
}

#[test]
fn expire_clears_only_after_ttl() {
    let mut notifier = Notifier::new(3000.0);
    assert!(!notifier.expire(0.0));
    notifier.show("x", Severity::Info, 0.0);
    assert!(!notifier.expire(100.0));
    assert!(notifier.expire(3000.0));
    assert!(!notifier.expire(3001.0));
}

#[test]
fn dismiss_hides_immediately() {
    let mut notifier = Notifier::new(3000.0);
    notifier.show("x", Severity::Success, 0.0);
    notifier.dismiss();
    assert!(notifier.visible(1.0).is_none());
}

#[test]
fn severities_have_distinct_colors() {
    assert_ne!(Severity::Success.color(), Severity::Error.color());
    assert_ne!(Severity::Error.color(), Severity::Info.color());
}
