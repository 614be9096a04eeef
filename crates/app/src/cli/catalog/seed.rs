use std::path::PathBuf;

use clap::Args;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use vermeil_app::{
    database::{self, Db},
    domain::catalog::{
        CatalogService, CatalogServiceError, PgCatalogService,
        data::{NewCategory, NewProduct},
        models::{CategoryUuid, ProductUuid},
    },
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// Path to a JSON seed file
    #[arg(long)]
    file: PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    categories: Vec<SeedCategory>,

    #[serde(default)]
    products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
struct SeedCategory {
    slug: String,
    name: String,
    description: String,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedProduct {
    slug: String,
    name: String,
    description: String,
    price: Decimal,
    compare_at_price: Option<Decimal>,
    category_slug: Option<String>,

    #[serde(default)]
    images: Vec<String>,

    material: String,
    gemstone: Option<String>,
    weight_grams: Option<Decimal>,
    dimensions: Option<String>,

    #[serde(default = "default_in_stock")]
    in_stock: bool,

    #[serde(default)]
    stock_quantity: u32,

    #[serde(default)]
    is_featured: bool,

    #[serde(default)]
    is_new_arrival: bool,
}

fn default_in_stock() -> bool {
    true
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let contents = std::fs::read_to_string(&args.file)
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let seed: SeedFile = serde_json::from_str(&contents)
        .map_err(|error| format!("failed to parse {}: {error}", args.file.display()))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCatalogService::new(Db::new(pool));

    let mut category_uuids: FxHashMap<String, CategoryUuid> = FxHashMap::default();
    let mut created_categories = 0_u32;
    let mut skipped_categories = 0_u32;

    for category in seed.categories {
        let slug = category.slug.clone();

        let result = service
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                slug: category.slug,
                name: category.name,
                description: category.description,
                image_url: category.image_url,
            })
            .await;

        let uuid = match result {
            Ok(created) => {
                created_categories += 1;
                created.uuid
            }
            // Re-running the seed against a populated catalog is expected;
            // keep the existing row and reuse its uuid for product links.
            Err(CatalogServiceError::AlreadyExists) => {
                skipped_categories += 1;

                service
                    .get_category_by_slug(&slug)
                    .await
                    .map_err(|error| format!("failed to load category `{slug}`: {error}"))?
                    .uuid
            }
            Err(error) => return Err(format!("failed to create category `{slug}`: {error}")),
        };

        category_uuids.insert(slug, uuid);
    }

    let mut created_products = 0_u32;
    let mut skipped_products = 0_u32;

    for product in seed.products {
        let slug = product.slug.clone();

        let category_uuid = match product.category_slug {
            Some(category_slug) => match category_uuids.get(&category_slug) {
                Some(uuid) => Some(*uuid),
                None => Some(
                    service
                        .get_category_by_slug(&category_slug)
                        .await
                        .map_err(|error| {
                            format!(
                                "product `{slug}` references unknown category \
                                 `{category_slug}`: {error}"
                            )
                        })?
                        .uuid,
                ),
            },
            None => None,
        };

        let result = service
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                slug: product.slug,
                name: product.name,
                description: product.description,
                price: product.price,
                compare_at_price: product.compare_at_price,
                category_uuid,
                images: product.images,
                material: product.material,
                gemstone: product.gemstone,
                weight_grams: product.weight_grams,
                dimensions: product.dimensions,
                in_stock: product.in_stock,
                stock_quantity: product.stock_quantity,
                is_featured: product.is_featured,
                is_new_arrival: product.is_new_arrival,
            })
            .await;

        match result {
            Ok(_) => created_products += 1,
            Err(CatalogServiceError::AlreadyExists) => {
                skipped_products += 1;
                println!("skipping existing product: {slug}");
            }
            Err(error) => return Err(format!("failed to create product `{slug}`: {error}")),
        }
    }

    println!("categories: {created_categories} created, {skipped_categories} already present");
    println!("products: {created_products} created, {skipped_products} already present");

    Ok(())
}
