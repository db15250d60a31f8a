use std::collections::HashMap;
use std::sync::Arc;

use domain_products::{Product, ProductRepository};
use domain_users::UserRepository;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{dedupe_ids, parse_ids, CheckoutResponse, PurchasedProduct};

/// Checkout and purchase history over the user and product stores
pub struct OrderService<U: UserRepository, P: ProductRepository> {
    users: Arc<U>,
    products: Arc<P>,
}

impl<U: UserRepository, P: ProductRepository> OrderService<U, P> {
    pub fn new(users: U, products: P) -> Self {
        Self {
            users: Arc::new(users),
            products: Arc::new(products),
        }
    }

    /// Record a purchase of `product_ids` for the user and empty their cart.
    ///
    /// Every id must name a stored product; otherwise nothing is written.
    #[instrument(skip(self, product_ids), fields(count = product_ids.len()))]
    pub async fn checkout(
        &self,
        user_id: Uuid,
        product_ids: Vec<String>,
    ) -> OrderResult<CheckoutResponse> {
        if product_ids.is_empty() {
            return Err(OrderError::Validation(
                "No products provided for checkout".to_string(),
            ));
        }

        if self.users.get_by_id(user_id).await?.is_none() {
            return Err(OrderError::UserNotFound(user_id));
        }

        let ids = parse_ids(&product_ids)
            .map(dedupe_ids)
            .ok_or_else(products_not_found)?;
        let found = self.products.find_by_ids(&ids).await?;
        let by_id: HashMap<Uuid, &Product> = found.iter().map(|p| (p.id, p)).collect();
        if ids.iter().any(|id| !by_id.contains_key(id)) {
            return Err(products_not_found());
        }

        if !self.users.add_purchases(user_id, &ids).await? {
            return Err(OrderError::UserNotFound(user_id));
        }

        let purchased: Vec<PurchasedProduct> = ids
            .iter()
            .filter_map(|id| by_id.get(id).map(|p| PurchasedProduct::from(*p)))
            .collect();

        tracing::info!(user_id = %user_id, count = purchased.len(), "Checkout completed");
        Ok(CheckoutResponse::new(purchased))
    }

    /// Products the user has bought, in purchase order. Ids whose product
    /// has since been deleted are skipped.
    #[instrument(skip(self))]
    pub async fn purchased(&self, user_id: Uuid) -> OrderResult<Vec<Product>> {
        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(OrderError::UserNotFound(user_id))?;

        let mut found: HashMap<Uuid, Product> = self
            .products
            .find_by_ids(&user.products_bought)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(user
            .products_bought
            .iter()
            .filter_map(|id| found.remove(id))
            .collect())
    }
}

fn products_not_found() -> OrderError {
    OrderError::Validation("One or more products not found".to_string())
}

impl<U: UserRepository, P: ProductRepository> Clone for OrderService<U, P> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            products: Arc::clone(&self.products),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_products::{CreateProduct, InMemoryProductRepository};
    use domain_users::{InMemoryUserRepository, User};

    struct Fixture {
        service: OrderService<InMemoryUserRepository, InMemoryProductRepository>,
        users: InMemoryUserRepository,
        products: InMemoryProductRepository,
        user_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let users = InMemoryUserRepository::new();
        let products = InMemoryProductRepository::new();
        let user = users
            .create(User::new(
                "Jane".into(),
                "Doe".into(),
                "jane@example.com".into(),
                "hash".into(),
            ))
            .await
            .unwrap();

        Fixture {
            service: OrderService::new(users.clone(), products.clone()),
            users,
            products,
            user_id: user.id,
        }
    }

    fn ids(ids: &[Uuid]) -> Vec<String> {
        ids.iter().map(Uuid::to_string).collect()
    }

    async fn add_product(products: &InMemoryProductRepository, name: &str) -> Product {
        products
            .create(CreateProduct {
                name: name.to_string(),
                product_type: "tea".to_string(),
                description: "Herbal".to_string(),
                effects: vec!["calm".to_string()],
                ingredients: vec!["chamomile".to_string()],
                price: 5.0,
                sales_data: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_checkout_records_purchases() {
        let f = fixture().await;
        let a = add_product(&f.products, "A").await;
        let b = add_product(&f.products, "B").await;

        let response = f
            .service
            .checkout(f.user_id, ids(&[b.id, a.id, b.id]))
            .await
            .unwrap();

        assert!(response.success);
        let names: Vec<&str> = response
            .purchased_products
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);

        let user = f.users.get_by_id(f.user_id).await.unwrap().unwrap();
        assert_eq!(user.products_bought, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_checkout_twice_does_not_duplicate() {
        let f = fixture().await;
        let a = add_product(&f.products, "A").await;

        f.service.checkout(f.user_id, ids(&[a.id])).await.unwrap();
        f.service.checkout(f.user_id, ids(&[a.id])).await.unwrap();

        let user = f.users.get_by_id(f.user_id).await.unwrap().unwrap();
        assert_eq!(user.products_bought, vec![a.id]);
    }

    #[tokio::test]
    async fn test_checkout_empty_list() {
        let f = fixture().await;
        let result = f.service.checkout(f.user_id, vec![]).await;
        assert!(
            matches!(result, Err(OrderError::Validation(msg)) if msg == "No products provided for checkout")
        );
    }

    #[tokio::test]
    async fn test_checkout_unknown_product_writes_nothing() {
        let f = fixture().await;
        let a = add_product(&f.products, "A").await;

        let result = f
            .service
            .checkout(f.user_id, ids(&[a.id, Uuid::now_v7()]))
            .await;
        assert!(
            matches!(result, Err(OrderError::Validation(msg)) if msg == "One or more products not found")
        );

        let user = f.users.get_by_id(f.user_id).await.unwrap().unwrap();
        assert!(user.products_bought.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_malformed_id_is_unknown_product() {
        let f = fixture().await;
        let a = add_product(&f.products, "A").await;

        let result = f
            .service
            .checkout(f.user_id, vec![a.id.to_string(), "abc123".to_string()])
            .await;
        assert!(
            matches!(result, Err(OrderError::Validation(msg)) if msg == "One or more products not found")
        );

        let user = f.users.get_by_id(f.user_id).await.unwrap().unwrap();
        assert!(user.products_bought.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_unknown_user() {
        let f = fixture().await;
        let a = add_product(&f.products, "A").await;

        let result = f.service.checkout(Uuid::now_v7(), ids(&[a.id])).await;
        assert!(matches!(result, Err(OrderError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_purchased_in_purchase_order_skipping_deleted() {
        let f = fixture().await;
        let a = add_product(&f.products, "A").await;
        let b = add_product(&f.products, "B").await;
        let c = add_product(&f.products, "C").await;
        f.service
            .checkout(f.user_id, ids(&[c.id, a.id, b.id]))
            .await
            .unwrap();
        f.products.delete(a.id).await.unwrap();

        let products = f.service.purchased(f.user_id).await.unwrap();

        let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![c.id, b.id]);
    }

    #[tokio::test]
    async fn test_purchased_unknown_user() {
        let f = fixture().await;
        let result = f.service.purchased(Uuid::now_v7()).await;
        assert!(matches!(result, Err(OrderError::UserNotFound(_))));
    }
}
