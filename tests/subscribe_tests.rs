// Host-side tests for the waitlist email capture.

use katharos_core::{is_valid_email, SubmitOutcome, SubscriberList};

#[test]
fn email_pattern_accepts_plain_addresses() {
    assert!(is_valid_email("seeker@temple.gr"));
    assert!(is_valid_email("a.b+c@d.co.uk"));
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("no-at-sign.com"));
    assert!(!is_valid_email("two@@signs.com"));
    assert!(!is_valid_email("missing@tld"));
    assert!(!is_valid_email("spa ce@temple.gr"));
}

#[test]
fn submit_reports_each_outcome_with_its_message() {
    let mut list = SubscriberList::new();
    let bad = list.submit("nope");
    assert_eq!(bad, SubmitOutcome::Invalid);
    assert!(!bad.success());
    assert_eq!(bad.message(), "Please enter a valid email address");

    let ok = list.submit("seeker@temple.gr");
    assert_eq!(ok, SubmitOutcome::Subscribed);
    assert!(ok.success());
    assert_eq!(
        ok.message(),
        "Welcome to the temple. Check your inbox for the path forward."
    );

    let dup = list.submit("seeker@temple.gr");
    assert_eq!(dup, SubmitOutcome::AlreadySubscribed);
    assert_eq!(dup.message(), "You are already on the list");
    assert_eq!(list.len(), 1);
}

#[test]
fn duplicates_ignore_case_and_surrounding_whitespace() {
    let mut list = SubscriberList::new();
    assert_eq!(list.submit("Seeker@Temple.GR"), SubmitOutcome::Subscribed);
    assert_eq!(
        list.submit("  seeker@temple.gr \n"),
        SubmitOutcome::AlreadySubscribed
    );
    assert_eq!(list.len(), 1);
}
