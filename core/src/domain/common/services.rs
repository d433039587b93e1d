use crate::domain::{
    health::port::HealthRepository, message::ports::MessageRepository,
    user::ports::UserRepository,
};

pub const DEFAULT_ANONYMOUS_USERNAME: &str = "Anonymous";

#[derive(Clone)]
pub struct Service<M, U, H>
where
    M: MessageRepository,
    U: UserRepository,
    H: HealthRepository,
{
    pub(crate) message_repository: M,
    pub(crate) user_repository: U,
    pub(crate) health_repository: H,
    pub(crate) anonymous_username: String,
}

impl<M, U, H> Service<M, U, H>
where
    M: MessageRepository,
    U: UserRepository,
    H: HealthRepository,
{
    pub fn new(message_repository: M, user_repository: U, health_repository: H) -> Self {
        Self {
            message_repository,
            user_repository,
            health_repository,
            anonymous_username: DEFAULT_ANONYMOUS_USERNAME.to_string(),
        }
    }

    /// Overrides the username of the sentinel author used for anonymous messages.
    pub fn with_anonymous_username(mut self, username: impl Into<String>) -> Self {
        self.anonymous_username = username.into();
        self
    }
}
