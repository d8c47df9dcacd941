use regex::Regex;
use std::sync::OnceLock;

pub const MSG_INVALID: &str = "Please enter a valid email address";
pub const MSG_DUPLICATE: &str = "You are already on the list";
pub const MSG_WELCOME: &str = "Welcome to the temple. Check your inbox for the path forward.";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid,
    AlreadySubscribed,
    Subscribed,
}

impl SubmitOutcome {
    pub fn success(&self) -> bool {
        !matches!(self, SubmitOutcome::Invalid)
    }

    pub fn message(&self) -> &'static str {
        match self {
            SubmitOutcome::Invalid => MSG_INVALID,
            SubmitOutcome::AlreadySubscribed => MSG_DUPLICATE,
            SubmitOutcome::Subscribed => MSG_WELCOME,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubscriberList {
    emails: Vec<String>,
}

impl SubscriberList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, email: &str) -> SubmitOutcome {
        let email = email.trim();
        if !is_valid_email(email) {
            return SubmitOutcome::Invalid;
        }
        let normalized = email.to_lowercase();
        if self.emails.contains(&normalized) {
            return SubmitOutcome::AlreadySubscribed;
        }
        self.emails.push(normalized);
        log::info!("[subscribe] new subscriber (total {})", self.emails.len());
        SubmitOutcome::Subscribed
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}
