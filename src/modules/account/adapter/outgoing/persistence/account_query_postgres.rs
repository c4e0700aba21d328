use super::account_repository_postgres::AccountRepositoryPostgres;
use super::sea_orm_entity::accounts::{
    Column as AccountColumn, Entity as AccountEntity, Model as AccountModel,
};
use crate::modules::account::application::domain::entities::Account;
use crate::modules::account::application::ports::outgoing::{AccountQuery, AccountQueryError};
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct AccountQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AccountQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map(model: AccountModel) -> Account {
        AccountRepositoryPostgres::map_to_account(model)
    }
}

#[async_trait]
impl AccountQuery for AccountQueryPostgres {
    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<Account>, AccountQueryError> {
        let account = AccountEntity::find_by_id(account_id)
            .one(&*self.db)
            .await
            .map_err(|e| AccountQueryError::DatabaseError(e.to_string()))?;

        Ok(account.map(Self::map))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountQueryError> {
        let account = AccountEntity::find()
            .filter(AccountColumn::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(|e| AccountQueryError::DatabaseError(e.to_string()))?;

        Ok(account.map(Self::map))
    }

    async fn find_all(&self) -> Result<Vec<Account>, AccountQueryError> {
        let accounts = AccountEntity::find()
            .order_by_desc(AccountColumn::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| AccountQueryError::DatabaseError(e.to_string()))?;

        Ok(accounts.into_iter().map(Self::map).collect())
    }
}
