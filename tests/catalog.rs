use chrono::{Duration, Utc};
use storefront_api::{
    error::AppError,
    models::Product,
    pricing::calculate_discount,
    routes::params::{Pagination, ProductQuery, ProductSortBy, SortOrder},
    services::{
        category_service::ensure_unused,
        product_service::{filter_products, required_text, sort_products, validate_prices},
    },
};
use uuid::Uuid;

fn product(name: &str, category: &str, mrp: i64, price: i64, age_days: i64) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        mrp,
        price,
        category: category.to_string(),
        description: String::new(),
        image_url: String::new(),
        images: Vec::new(),
        in_stock: true,
        is_featured: false,
        discount: calculate_discount(mrp, price),
        created_at: Utc::now() - Duration::days(age_days),
    }
}

fn catalog() -> Vec<Product> {
    let mut featured = product("Silk Saree", "Sarees", 5000, 4000, 3);
    featured.is_featured = true;
    let mut sold_out = product("Linen Kurta", "Kurtas", 1200, 1200, 1);
    sold_out.in_stock = false;
    vec![
        featured,
        sold_out,
        product("Cotton Kurta", "Kurtas", 2000, 1500, 2),
        product("Leather Tote", "Accessories", 999, 999, 5),
    ]
}

#[test]
fn discount_is_rounded_percentage() {
    assert_eq!(calculate_discount(2000, 1500), 25);
    assert_eq!(calculate_discount(999, 999), 0);
    assert_eq!(calculate_discount(500, 600), 0);
    assert_eq!(calculate_discount(3, 1), 67);
}

#[test]
fn filters_by_category_search_and_flags() {
    let query = ProductQuery {
        category: Some("Kurtas".into()),
        ..Default::default()
    };
    let names: Vec<_> = filter_products(catalog(), &query)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Linen Kurta", "Cotton Kurta"]);

    let query = ProductQuery {
        q: Some("  KURTA ".into()),
        in_stock: Some(true),
        ..Default::default()
    };
    let names: Vec<_> = filter_products(catalog(), &query)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Cotton Kurta"]);

    let query = ProductQuery {
        featured: Some(true),
        ..Default::default()
    };
    assert_eq!(filter_products(catalog(), &query).len(), 1);

    // search also matches the category name
    let query = ProductQuery {
        q: Some("access".into()),
        ..Default::default()
    };
    assert_eq!(filter_products(catalog(), &query)[0].name, "Leather Tote");
}

#[test]
fn empty_filters_keep_everything() {
    let query = ProductQuery {
        category: Some(String::new()),
        q: Some("   ".into()),
        ..Default::default()
    };
    assert_eq!(filter_products(catalog(), &query).len(), 4);
}

#[test]
fn sorts_by_each_key() {
    let mut products = catalog();

    sort_products(&mut products, ProductSortBy::Price, SortOrder::Asc);
    let prices: Vec<_> = products.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![999, 1200, 1500, 4000]);

    sort_products(&mut products, ProductSortBy::Discount, SortOrder::Desc);
    assert_eq!(products[0].name, "Cotton Kurta");
    assert_eq!(products[1].name, "Silk Saree");

    sort_products(&mut products, ProductSortBy::Name, SortOrder::Asc);
    assert_eq!(products[0].name, "Cotton Kurta");

    sort_products(&mut products, ProductSortBy::CreatedAt, SortOrder::Desc);
    assert_eq!(products[0].name, "Linen Kurta");
    assert_eq!(products[3].name, "Leather Tote");
}

#[test]
fn pagination_slices_and_clamps() {
    let pagination = Pagination {
        page: Some(2),
        per_page: Some(3),
    };
    let (items, page, per_page) = pagination.apply((1..=7).collect::<Vec<_>>());
    assert_eq!(items, vec![4, 5, 6]);
    assert_eq!((page, per_page), (2, 3));

    let pagination = Pagination {
        page: Some(0),
        per_page: Some(1000),
    };
    assert_eq!(pagination.normalize(), (1, 100, 0));
}

#[test]
fn huge_page_numbers_yield_an_empty_page() {
    let pagination = Pagination {
        page: Some(i64::MAX),
        per_page: Some(100),
    };
    assert_eq!(pagination.normalize(), (i64::MAX, 100, i64::MAX));

    let (items, page, per_page) = pagination.apply(vec![1, 2, 3]);
    assert!(items.is_empty());
    assert_eq!((page, per_page), (i64::MAX, 100));
}

#[test]
fn price_validation() {
    assert!(validate_prices(2000, 1500).is_ok());
    assert!(validate_prices(999, 999).is_ok());
    assert!(matches!(
        validate_prices(1000, 1200),
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        validate_prices(-1, -5),
        Err(AppError::BadRequest(_))
    ));
}

#[test]
fn product_text_fields_are_trimmed_and_required() {
    assert_eq!(required_text("name", "  Cotton Kurta ").unwrap(), "Cotton Kurta");
    match required_text("category", "   ") {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "category is required"),
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[test]
fn category_in_use_cannot_be_deleted() {
    assert!(ensure_unused("Kurtas", 0).is_ok());

    match ensure_unused("Kurtas", 3) {
        Err(AppError::BadRequest(msg)) => {
            assert_eq!(
                msg,
                "Cannot delete category \"Kurtas\". It is being used by 3 product(s)."
            );
        }
        other => panic!("expected bad request, got {other:?}"),
    }
}
