use crate::domain::{
    common::{CoreError, services::Service},
    health::{
        entities::IsHealthy,
        port::{HealthRepository, HealthService},
    },
    message::ports::MessageRepository,
    user::ports::UserRepository,
};

impl<M, U, H> HealthService for Service<M, U, H>
where
    M: MessageRepository,
    U: UserRepository,
    H: HealthRepository,
{
    async fn check_health(&self) -> Result<IsHealthy, CoreError> {
        self.health_repository.ping().await.to_result()
    }
}
