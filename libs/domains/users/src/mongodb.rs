//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use database::mongodb::serde_timestamp;
use mongodb::{
    bson::{doc, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{normalize_email, User};
use crate::repository::UserRepository;

const DUPLICATE_KEY: i32 = 11000;

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }

    /// Create the unique email index
    pub async fn init_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_email_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    /// `$addToSet` the ids into `productsBought` and clear `cart`
    fn purchases_update(product_ids: &[Uuid]) -> Document {
        let ids: Vec<String> = product_ids.iter().map(Uuid::to_string).collect();
        doc! {
            "$addToSet": { "productsBought": { "$each": ids } },
            "$set": {
                "cart": [],
                "updatedAt": serde_timestamp::format(&Utc::now()),
            },
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        match self.collection.insert_one(&user).await {
            Ok(_) => {
                tracing::info!(user_id = %user.id, "Created user");
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => Err(UserError::DuplicateEmail(user.email)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(Self::id_filter(id)).await?)
    }

    #[instrument(skip(self, email))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let filter = doc! { "email": normalize_email(email) };
        Ok(self.collection.find_one(filter).await?)
    }

    #[instrument(skip(self, product_ids), fields(count = product_ids.len()))]
    async fn add_purchases(&self, user_id: Uuid, product_ids: &[Uuid]) -> UserResult<bool> {
        let result = self
            .collection
            .update_one(Self::id_filter(user_id), Self::purchases_update(product_ids))
            .await?;

        Ok(result.matched_count > 0)
    }
}
