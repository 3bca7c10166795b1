use async_trait::async_trait;
use mockall::mock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::StoreError;
use crate::user::ports::UserRepository;

mock! {
    pub TestUserRepository {}

    #[async_trait]
    impl UserRepository for TestUserRepository {
        async fn create(&self, user: NewUser) -> Result<User, StoreError>;
        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;
        async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError>;
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
        async fn list(&self, filter: UserFilter) -> Result<Vec<User>, StoreError>;
        async fn update(&self, user: User) -> Result<User, StoreError>;
        async fn update_password(&self, id: &UserId, password_hash: String) -> Result<User, StoreError>;
    }
}
