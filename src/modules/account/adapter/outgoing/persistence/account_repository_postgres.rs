use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::account::application::domain::entities::{Account, NewAccount, Role};
use crate::modules::account::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError,
};

use super::sea_orm_entity::accounts::{
    ActiveModel as AccountActiveModel, Entity as AccountEntity, Model as AccountModel,
};

#[derive(Clone, Debug)]
pub struct AccountRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub(super) fn map_to_account(model: AccountModel) -> Account {
        Account {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            password_hash: model.password_hash,
            // Unknown role values can only come from manual DB edits; treat
            // them as unprivileged rather than failing the whole row.
            role: Role::from_i16(model.role).unwrap_or(Role::Normal),
            is_verified: model.is_verified,
            is_banned: model.is_banned,
            is_deleted: model.is_deleted,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }

    async fn load(&self, account_id: Uuid) -> Result<AccountModel, AccountRepositoryError> {
        AccountEntity::find_by_id(account_id)
            .one(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(AccountRepositoryError::NotFound)
    }

    async fn save(
        &self,
        active: AccountActiveModel,
    ) -> Result<AccountModel, AccountRepositoryError> {
        active
            .update(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryPostgres {
    async fn create_account(&self, data: NewAccount) -> Result<Account, AccountRepositoryError> {
        let active = AccountActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            role: Set(Role::Normal.as_i16()),
            is_verified: Set(false),
            is_banned: Set(false),
            is_deleted: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505")
                || err_str.contains("duplicate key")
                || err_str.contains("unique constraint")
            {
                return AccountRepositoryError::AlreadyExists;
            }
            AccountRepositoryError::DatabaseError(e.to_string())
        })?;

        Ok(Self::map_to_account(inserted))
    }

    async fn update_password(
        &self,
        account_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), AccountRepositoryError> {
        let account = self.load(account_id).await?;

        let mut active: AccountActiveModel = account.into();
        active.password_hash = Set(new_password_hash);

        self.save(active).await?;
        Ok(())
    }

    async fn update_names(
        &self,
        account_id: Uuid,
        first_name: String,
        last_name: String,
    ) -> Result<Account, AccountRepositoryError> {
        let account = self.load(account_id).await?;

        let mut active: AccountActiveModel = account.into();
        active.first_name = Set(first_name);
        active.last_name = Set(last_name);

        Ok(Self::map_to_account(self.save(active).await?))
    }

    async fn set_verified(&self, account_id: Uuid) -> Result<Account, AccountRepositoryError> {
        let account = self.load(account_id).await?;

        let mut active: AccountActiveModel = account.into();
        active.is_verified = Set(true);

        Ok(Self::map_to_account(self.save(active).await?))
    }

    async fn set_deleted(
        &self,
        account_id: Uuid,
        deleted: bool,
    ) -> Result<Account, AccountRepositoryError> {
        let account = self.load(account_id).await?;

        let mut active: AccountActiveModel = account.into();
        active.is_deleted = Set(deleted);

        Ok(Self::map_to_account(self.save(active).await?))
    }

    async fn set_banned(
        &self,
        account_id: Uuid,
        banned: bool,
    ) -> Result<Account, AccountRepositoryError> {
        let account = self.load(account_id).await?;

        let mut active: AccountActiveModel = account.into();
        active.is_banned = Set(banned);

        Ok(Self::map_to_account(self.save(active).await?))
    }

    async fn set_role(
        &self,
        account_id: Uuid,
        role: Role,
    ) -> Result<Account, AccountRepositoryError> {
        let account = self.load(account_id).await?;

        let mut active: AccountActiveModel = account.into();
        active.role = Set(role.as_i16());

        Ok(Self::map_to_account(self.save(active).await?))
    }

    async fn delete_account(&self, account_id: Uuid) -> Result<(), AccountRepositoryError> {
        let account = self.load(account_id).await?;

        account
            .delete(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
