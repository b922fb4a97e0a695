use crate::model::ids::UserId;

/// Username of the shared account used for anonymous practice sessions.
pub const DEMO_USERNAME: &str = "demo_user";
pub const DEMO_EMAIL: &str = "demo@example.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    email: Option<String>,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email,
        }
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Who a request acts on behalf of.
///
/// Resolved once by the front end and passed down explicitly; services never
/// look up a fallback user on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// An anonymous session, backed by the shared demo account.
    Anonymous(UserId),
    /// A known user.
    User(UserId),
}

impl Identity {
    #[must_use]
    pub fn anonymous(demo_user: &User) -> Self {
        Self::Anonymous(demo_user.id())
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        match self {
            Identity::Anonymous(id) | Identity::User(id) => *id,
        }
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous(_))
    }
}
