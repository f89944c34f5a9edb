use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use storefront_api::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, run_migrations},
    entity::{categories, products},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    for (name, description) in [
        ("Dresses", "Day and evening dresses"),
        ("Tops", "Shirts, blouses and tees"),
        ("Accessories", "Bags, scarves and jewellery"),
    ] {
        ensure_category(&orm, name, description).await?;
    }
    seed_products(&orm).await?;

    println!("Seed completed.");
    Ok(())
}

async fn ensure_category(orm: &OrmConn, name: &str, description: &str) -> anyhow::Result<()> {
    let existing = categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .one(orm)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        image_url: Set(String::new()),
        description: Set(Some(description.to_string())),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;
    println!("Ensured category {name}");
    Ok(())
}

async fn seed_products(orm: &OrmConn) -> anyhow::Result<()> {
    // (name, category, mrp, price, featured)
    let samples = [
        ("Linen Wrap Dress", "Dresses", 3499, 2799, true),
        ("Silk Slip Dress", "Dresses", 5999, 5999, false),
        ("Cotton Poplin Shirt", "Tops", 1999, 1499, true),
        ("Ribbed Knit Top", "Tops", 1299, 999, false),
        ("Leather Tote", "Accessories", 4999, 3999, true),
        ("Printed Silk Scarf", "Accessories", 1499, 1199, false),
    ];

    for (name, category, mrp, price, featured) in samples {
        let existing = products::Entity::find()
            .filter(products::Column::Name.eq(name))
            .one(orm)
            .await?;
        if existing.is_some() {
            continue;
        }

        products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            mrp: Set(mrp),
            price: Set(price),
            category: Set(category.to_string()),
            description: Set(format!("{name} from the {category} collection.")),
            image_url: Set(String::new()),
            images: Set(serde_json::json!([])),
            in_stock: Set(true),
            is_featured: Set(featured),
            created_at: NotSet,
        }
        .insert(orm)
        .await?;
        println!("Seeded product {name}");
    }

    Ok(())
}
