//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewCategory, NewProduct, Page, ProductFilter, ProductSort},
        errors::CatalogServiceError,
        models::{Category, Product, ProductDetails},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Category, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn list_products(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        page: Page,
    ) -> Result<Vec<Product>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products(&mut tx, &filter, sort, page)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<ProductDetails, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product_by_slug(&mut tx, slug).await?;

        let category = match product.category_uuid {
            Some(category_uuid) => Some(self.repository.get_category(&mut tx, category_uuid).await?),
            None => None,
        };

        tx.commit().await?;

        Ok(ProductDetails { product, category })
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, &category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve all categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError>;

    /// Retrieve a single category by its slug.
    async fn get_category_by_slug(&self, slug: &str) -> Result<Category, CatalogServiceError>;

    /// Retrieve products matching the filter, ordered and paged.
    async fn list_products(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        page: Page,
    ) -> Result<Vec<Product>, CatalogServiceError>;

    /// Retrieve a single product by its slug, joined with its category.
    async fn get_product_by_slug(&self, slug: &str)
    -> Result<ProductDetails, CatalogServiceError>;

    /// Create a new category.
    async fn create_category(&self, category: NewCategory)
    -> Result<Category, CatalogServiceError>;

    /// Create a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::product_fixture};

    use super::*;

    #[tokio::test]
    async fn create_product_and_get_by_slug() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .catalog
            .create_product(product_fixture("aurora-ring", "Aurora Ring", "1250.00"))
            .await?;

        let details = ctx.catalog.get_product_by_slug("aurora-ring").await?;

        assert_eq!(details.product.uuid, created.uuid);
        assert_eq!(details.product.name, "Aurora Ring");
        assert_eq!(details.product.price, "1250.00".parse()?);
        assert!(details.category.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_slug_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_product_by_slug("no-such-piece").await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.catalog
            .create_product(product_fixture("signet", "Signet A", "300.00"))
            .await?;

        let result = ctx
            .catalog
            .create_product(product_fixture("signet", "Signet B", "400.00"))
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_unknown_category_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let mut product = product_fixture("orphan", "Orphan", "100.00");
        product.category_uuid = Some(crate::domain::catalog::models::CategoryUuid::new());

        let result = ctx.catalog.create_product(product).await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn price_filter_bounds_are_inclusive() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.catalog
            .create_product(product_fixture("low", "Low", "100.00"))
            .await?;
        ctx.catalog
            .create_product(product_fixture("mid", "Mid", "175.00"))
            .await?;
        ctx.catalog
            .create_product(product_fixture("high", "High", "250.00"))
            .await?;
        ctx.catalog
            .create_product(product_fixture("above", "Above", "250.01"))
            .await?;

        let products = ctx
            .catalog
            .list_products(
                ProductFilter {
                    min_price: Some("100.00".parse()?),
                    max_price: Some("250.00".parse()?),
                    ..ProductFilter::default()
                },
                ProductSort::PriceAsc,
                Page::default(),
            )
            .await?;

        let slugs: Vec<&str> = products.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(
            slugs,
            ["low", "mid", "high"],
            "products priced exactly at either bound must be included"
        );

        Ok(())
    }

    #[tokio::test]
    async fn category_filter_limits_results() -> TestResult {
        let ctx = TestContext::new().await;

        let rings = ctx.create_category("rings", "Rings").await;

        let mut ring = product_fixture("eternity-band", "Eternity Band", "900.00");
        ring.category_uuid = Some(rings.uuid);
        ctx.catalog.create_product(ring).await?;

        ctx.catalog
            .create_product(product_fixture("chain", "Chain", "500.00"))
            .await?;

        let products = ctx
            .catalog
            .list_products(
                ProductFilter {
                    category_slug: Some("rings".to_string()),
                    ..ProductFilter::default()
                },
                ProductSort::default(),
                Page::default(),
            )
            .await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.slug.as_str()), Some("eternity-band"));

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_case_insensitive_substring() -> TestResult {
        let ctx = TestContext::new().await;

        let mut sapphire = product_fixture("halo-pendant", "Halo Pendant", "760.00");
        sapphire.gemstone = Some("Sapphire".to_string());
        ctx.catalog.create_product(sapphire).await?;

        ctx.catalog
            .create_product(product_fixture("plain-band", "Plain Band", "200.00"))
            .await?;

        let by_name = ctx
            .catalog
            .list_products(
                ProductFilter {
                    search: Some("halo".to_string()),
                    ..ProductFilter::default()
                },
                ProductSort::default(),
                Page::default(),
            )
            .await?;

        assert_eq!(by_name.len(), 1, "search should match names case-insensitively");

        let by_gemstone = ctx
            .catalog
            .list_products(
                ProductFilter {
                    search: Some("SAPPH".to_string()),
                    ..ProductFilter::default()
                },
                ProductSort::default(),
                Page::default(),
            )
            .await?;

        assert_eq!(by_gemstone.len(), 1, "search should cover the gemstone field");

        Ok(())
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.catalog
            .create_product(product_fixture("recycled", "100% Recycled Gold Band", "350.00"))
            .await?;
        ctx.catalog
            .create_product(product_fixture("other", "Torque Bangle", "420.00"))
            .await?;

        let products = ctx
            .catalog
            .list_products(
                ProductFilter {
                    search: Some("100%".to_string()),
                    ..ProductFilter::default()
                },
                ProductSort::default(),
                Page::default(),
            )
            .await?;

        assert_eq!(
            products.len(),
            1,
            "a percent sign in the term must not act as a wildcard"
        );

        Ok(())
    }

    #[tokio::test]
    async fn sort_by_price_ascending() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.catalog
            .create_product(product_fixture("b", "B", "300.00"))
            .await?;
        ctx.catalog
            .create_product(product_fixture("a", "A", "100.00"))
            .await?;
        ctx.catalog
            .create_product(product_fixture("c", "C", "200.00"))
            .await?;

        let products = ctx
            .catalog
            .list_products(ProductFilter::default(), ProductSort::PriceAsc, Page::default())
            .await?;

        let slugs: Vec<&str> = products.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, ["a", "c", "b"]);

        Ok(())
    }

    #[tokio::test]
    async fn pagination_returns_requested_window() -> TestResult {
        let ctx = TestContext::new().await;

        for (slug, price) in [("p1", "10.00"), ("p2", "20.00"), ("p3", "30.00"), ("p4", "40.00")] {
            ctx.catalog
                .create_product(product_fixture(slug, slug, price))
                .await?;
        }

        let window = ctx
            .catalog
            .list_products(
                ProductFilter::default(),
                ProductSort::PriceAsc,
                Page { limit: 2, offset: 1 },
            )
            .await?;

        let slugs: Vec<&str> = window.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, ["p2", "p3"]);

        Ok(())
    }

    #[tokio::test]
    async fn featured_filter_returns_only_featured() -> TestResult {
        let ctx = TestContext::new().await;

        let mut featured = product_fixture("showpiece", "Showpiece", "5000.00");
        featured.is_featured = true;
        ctx.catalog.create_product(featured).await?;

        ctx.catalog
            .create_product(product_fixture("ordinary", "Ordinary", "80.00"))
            .await?;

        let products = ctx
            .catalog
            .list_products(
                ProductFilter {
                    is_featured: Some(true),
                    ..ProductFilter::default()
                },
                ProductSort::default(),
                Page::default(),
            )
            .await?;

        assert_eq!(products.len(), 1);
        assert!(products.iter().all(|p| p.is_featured));

        Ok(())
    }

    #[tokio::test]
    async fn list_categories_sorted_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_category("necklaces", "Necklaces").await;
        ctx.create_category("bracelets", "Bracelets").await;

        let categories = ctx.catalog.list_categories().await?;

        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, ["Bracelets", "Necklaces"]);

        Ok(())
    }

    #[tokio::test]
    async fn product_details_include_category() -> TestResult {
        let ctx = TestContext::new().await;

        let earrings = ctx.create_category("earrings", "Earrings").await;

        let mut product = product_fixture("pearl-drops", "Pearl Drops", "640.00");
        product.category_uuid = Some(earrings.uuid);
        ctx.catalog.create_product(product).await?;

        let details = ctx.catalog.get_product_by_slug("pearl-drops").await?;

        assert_eq!(
            details.category.as_ref().map(|c| c.slug.as_str()),
            Some("earrings")
        );

        Ok(())
    }
}
