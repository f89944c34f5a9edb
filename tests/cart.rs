use chrono::Utc;
use storefront_api::{
    models::Product,
    services::cart_service::{Cart, summarize},
};
use uuid::Uuid;

fn product(name: &str, mrp: i64, price: i64) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        mrp,
        price,
        category: "Kurtas".to_string(),
        description: String::new(),
        image_url: format!("https://img.example/{name}.jpg"),
        images: Vec::new(),
        in_stock: true,
        is_featured: false,
        discount: 0,
        created_at: Utc::now(),
    }
}

#[test]
fn adding_the_same_product_increments_quantity() {
    let kurta = product("kurta", 2000, 1500);
    let mut cart = Cart::new();

    cart.add(kurta.clone(), 1);
    cart.add(kurta.clone(), 2);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(cart.total(), 4500);
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn quantity_never_drops_below_one() {
    let kurta = product("kurta", 2000, 1500);
    let mut cart = Cart::new();
    cart.add(kurta.clone(), 0);
    assert_eq!(cart.items()[0].quantity, 1);

    cart.update_quantity(kurta.id, 5);
    assert_eq!(cart.items()[0].quantity, 5);

    cart.update_quantity(kurta.id, 0);
    assert_eq!(cart.items()[0].quantity, 1);

    // unknown product is ignored
    cart.update_quantity(Uuid::new_v4(), 9);
    assert_eq!(cart.item_count(), 1);
}

#[test]
fn remove_and_clear() {
    let kurta = product("kurta", 2000, 1500);
    let scarf = product("scarf", 200, 200);
    let mut cart = Cart::new();
    cart.add(kurta.clone(), 2);
    cart.add(scarf.clone(), 1);
    assert_eq!(cart.total(), 3200);

    cart.remove(kurta.id);
    assert_eq!(cart.total(), 200);
    assert_eq!(cart.items()[0].product.id, scarf.id);

    cart.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.total(), 0);
}

#[test]
fn snapshot_freezes_product_data() {
    let mut kurta = product("kurta", 2000, 1500);
    kurta.description = "Hand-block printed cotton".into();
    kurta.images = vec!["https://img.example/kurta-back.jpg".into()];
    kurta.is_featured = true;
    let mut cart = Cart::new();
    cart.add(kurta.clone(), 2);

    let snapshot = cart.snapshot();
    assert_eq!(snapshot.len(), 1);
    let line = &snapshot[0];
    assert_eq!(line.product_id, kurta.id);
    assert_eq!(line.name, "kurta");
    assert_eq!(line.mrp, 2000);
    assert_eq!(line.price, 1500);
    assert_eq!(line.category, "Kurtas");
    assert_eq!(line.description, "Hand-block printed cotton");
    assert_eq!(line.image_url, kurta.image_url);
    assert_eq!(line.images, kurta.images);
    assert!(line.in_stock);
    assert!(line.is_featured);
    assert_eq!(line.line_total(), 3000);

    cart.clear();
    assert_eq!(snapshot[0].quantity, 2);
}

#[test]
fn summary_reports_lines_and_totals() {
    let mut cart = Cart::new();
    cart.add(product("kurta", 2000, 1500), 2);
    cart.add(product("scarf", 200, 200), 1);

    let summary = summarize(&cart);
    assert_eq!(summary.items.len(), 2);
    assert_eq!(summary.items[0].line_total, 3000);
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.total, 3200);
}

#[test]
fn carts_with_the_same_lines_are_equal() {
    let kurta = product("kurta", 2000, 1500);
    let scarf = product("scarf", 200, 200);

    let mut built_up = Cart::new();
    built_up.add(kurta.clone(), 1);
    built_up.add(scarf.clone(), 1);
    built_up.add(kurta.clone(), 1);

    let mut direct = Cart::new();
    direct.add(kurta.clone(), 2);
    direct.add(scarf.clone(), 1);
    assert_eq!(built_up, direct);

    direct.update_quantity(scarf.id, 4);
    assert_ne!(built_up, direct);
}
