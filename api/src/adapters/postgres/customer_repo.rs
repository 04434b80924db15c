//! PostgreSQL adapter for CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
    TransactionTrait,
};

use crate::domain::entities::{Customer, CustomerId, NewCustomer, TaxId};
use crate::domain::ports::CustomerRepository;
use crate::entity::customers;
use crate::error::DomainError;

/// PostgreSQL implementation of CustomerRepository
pub struct PostgresCustomerRepository {
    db: DatabaseConnection,
}

impl PostgresCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Customer::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find()
            .filter(customers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Customer::try_from).transpose()
    }

    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find()
            .filter(customers::Column::TaxId.eq(tax_id.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Customer::try_from).transpose()
    }

    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, DomainError> {
        let model = customers::ActiveModel {
            id: NotSet,
            name: Set(customer.name.clone()),
            email: Set(customer.email.clone()),
            tax_id: Set(customer.tax_id.as_str().to_string()),
            birth_date: Set(customer.birth_date),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let inserted = match model.insert(&txn).await {
            Ok(inserted) => inserted,
            Err(e) => {
                // Unique index violations from a racing writer land here too
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback after failed insert failed");
                }
                return Err(DomainError::Database(e.to_string()));
            }
        };

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        tracing::debug!(customer_id = inserted.id, "Customer row committed");

        Customer::try_from(inserted)
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<customers::Model> for Customer {
    type Error = DomainError;

    fn try_from(model: customers::Model) -> Result<Self, Self::Error> {
        let tax_id = model.tax_id.parse::<TaxId>().map_err(|e| {
            DomainError::Database(format!("customer {} has a corrupt tax_id: {}", model.id, e))
        })?;

        Ok(Customer {
            id: CustomerId(model.id),
            name: model.name,
            email: model.email,
            tax_id,
            birth_date: model.birth_date,
        })
    }
}
