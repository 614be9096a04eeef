//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::UserUuid,
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartItem, CartItemUuid, WishlistItem, WishlistItemUuid},
            repositories::{PgCartItemsRepository, PgWishlistRepository},
        },
        catalog::models::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
    wishlist_repository: PgWishlistRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
            wishlist_repository: PgWishlistRepository::new(),
        }
    }

    async fn load_cart(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user: UserUuid,
    ) -> Result<Cart, CartsServiceError> {
        let items: Vec<CartItem> = self.items_repository.get_cart_items(tx, user).await?;

        Ok(Cart::from_items(items))
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_to_cart(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.items_repository
            .upsert_item(&mut tx, CartItemUuid::new(), user, product, quantity)
            .await?;

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_cart_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .items_repository
            .update_item_quantity(&mut tx, item, user, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_from_cart(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.items_repository.delete_item(&mut tx, item, user).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.items_repository.clear(&mut tx, user).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn get_wishlist(&self, user: UserUuid) -> Result<Vec<WishlistItem>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self
            .wishlist_repository
            .get_wishlist_items(&mut tx, user)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn add_to_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.wishlist_repository
            .add_item(&mut tx, WishlistItemUuid::new(), user, product)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn remove_from_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .wishlist_repository
            .delete_item(&mut tx, user, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with live product data and subtotal.
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Add a product to the cart. Adding a product already in the cart
    /// increases the quantity of the existing line.
    async fn add_to_cart(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Set the quantity of one of the user's cart lines.
    async fn update_cart_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove one of the user's cart lines.
    async fn remove_from_cart(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove every line from the user's cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;

    /// Retrieve the user's wishlist.
    async fn get_wishlist(&self, user: UserUuid) -> Result<Vec<WishlistItem>, CartsServiceError>;

    /// Save a product to the wishlist. Saving an already saved product is a
    /// no-op.
    async fn add_to_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;

    /// Remove a product from the wishlist.
    async fn remove_from_wishlist(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;
}
