use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        auth::RegisterRequest,
        cart::CartLineRequest,
        categories::CreateCategoryRequest,
        orders::{CheckoutRequest, UpdateOrderStatusRequest, UpdatePaymentStatusRequest},
        products::{CreateProductRequest, UpdateProductRequest},
    },
    error::AppError,
    middleware::auth::{AdminUser, AuthUser},
    models::{OrderStatus, PaymentStatus},
    services::{
        auth_service, category_service, order_number::next_order_number, order_service,
        product_service,
    },
    state::AppState,
};
use sea_orm::{ConnectionTrait, Statement};
use uuid::Uuid;

// Both flows share one test so migrations never run concurrently.
#[tokio::test]
async fn storefront_flows() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    checkout_tracking_and_admin_flow(&state).await?;
    admin_mirror_record_grants_access(&state).await?;
    concurrent_checkouts_get_distinct_numbers(&state).await?;
    Ok(())
}

// Admin stocks the catalog -> customers check out -> admin moves the order
// through its statuses; categories in use cannot be deleted.
async fn checkout_tracking_and_admin_flow(state: &AppState) -> anyhow::Result<()> {
    let admin = AdminUser(AuthUser {
        user_id: Uuid::new_v4(),
        email: "admin@example.com".into(),
        admin: true,
    });

    category_service::create_category(
        state,
        &admin,
        CreateCategoryRequest {
            name: "Kurtas".into(),
            image_url: String::new(),
            description: None,
        },
    )
    .await?;

    let kurta = create_product(state, &admin, "Cotton Kurta", 2000, 1500).await?;
    let scarf = create_product(state, &admin, "Silk Scarf", 200, 200).await?;

    // Updates trim text fields and reject blanks like creation does
    let blank = product_service::update_product(
        state,
        &admin,
        scarf,
        UpdateProductRequest {
            name: Some("   ".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(blank, Err(AppError::BadRequest(_))));

    let renamed = product_service::update_product(
        state,
        &admin,
        scarf,
        UpdateProductRequest {
            name: Some("  Silk Scarf ".into()),
            category: Some(" Kurtas ".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("product");
    assert_eq!(renamed.name, "Silk Scarf");
    assert_eq!(renamed.category, "Kurtas");

    // Checkout
    let order = order_service::checkout(
        state,
        checkout_request(vec![
            CartLineRequest {
                product_id: kurta,
                quantity: 2,
            },
            CartLineRequest {
                product_id: scarf,
                quantity: 1,
            },
        ]),
    )
    .await?
    .data
    .expect("order");
    assert_eq!(order.order_number, 1001);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Unpaid);
    assert_eq!(order.total_amount, 3200);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.phone, "+919876543210");
    assert_eq!(order.address, "12 MG Road, Bengaluru, 560001");

    // Empty cart is rejected and does not consume a number
    let empty = order_service::checkout(state, checkout_request(Vec::new())).await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    let second = order_service::checkout(
        state,
        checkout_request(vec![CartLineRequest {
            product_id: scarf,
            quantity: 3,
        }]),
    )
    .await?
    .data
    .expect("order");
    assert_eq!(second.order_number, 1002);
    assert_eq!(second.total_amount, 600);

    // Statuses are free overwrites, including going backwards
    let shipped = order_service::set_order_status(
        state,
        &admin,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Shipped,
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(shipped.status, OrderStatus::Shipped);

    let back = order_service::set_order_status(
        state,
        &admin,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Pending,
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(back.status, OrderStatus::Pending);

    let paid = order_service::set_payment_status(
        state,
        &admin,
        order.id,
        UpdatePaymentStatusRequest {
            payment_status: PaymentStatus::Paid,
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(paid.status, OrderStatus::Pending);

    // Tracking by order number and by record id
    let tracked = order_service::track_order(state, "#1001").await?.data.expect("order");
    assert_eq!(tracked.id, order.id);
    let tracked = order_service::track_order(state, &second.id.to_string())
        .await?
        .data
        .expect("order");
    assert_eq!(tracked.order_number, 1002);
    assert!(matches!(
        order_service::track_order(state, "999999").await,
        Err(AppError::NotFound)
    ));

    // Category in use cannot be deleted
    let categories = category_service::list_categories(state)
        .await?
        .data
        .expect("categories");
    let kurtas = categories
        .items
        .iter()
        .find(|c| c.name == "Kurtas")
        .expect("Kurtas category")
        .id;
    let blocked = category_service::delete_category(state, &admin, kurtas).await;
    assert!(matches!(blocked, Err(AppError::BadRequest(_))));

    product_service::delete_product(state, &admin, kurta).await?;
    product_service::delete_product(state, &admin, scarf).await?;
    category_service::delete_category(state, &admin, kurtas).await?;

    // Orders keep their snapshot after the products are gone
    let kept = order_service::track_order(state, "1001").await?.data.expect("order");
    assert_eq!(kept.items[0].name, "Cotton Kurta");

    Ok(())
}

async fn admin_mirror_record_grants_access(state: &AppState) -> anyhow::Result<()> {
    let email = format!("owner-{}@example.com", Uuid::new_v4().simple());

    let user = auth_service::register_user(
        &state.orm,
        RegisterRequest {
            email: email.clone(),
            password: "secret123".into(),
        },
    )
    .await?
    .data
    .expect("user");
    assert!(!auth_service::mirror_grants_admin(&state.orm, user.id).await?);

    auth_service::set_admin(&state.orm, &email, true).await?;
    assert!(auth_service::mirror_grants_admin(&state.orm, user.id).await?);

    // A token issued before the grant has no claim, the mirror still admits it
    let stale = AuthUser {
        user_id: user.id,
        email: email.clone(),
        admin: false,
    };
    let status = auth_service::admin_status(&state.orm, &stale)
        .await?
        .data
        .expect("status");
    assert!(!status.claim);
    assert!(status.mirror);
    assert!(status.is_admin);

    auth_service::set_admin(&state.orm, &email, false).await?;
    assert!(!auth_service::mirror_grants_admin(&state.orm, user.id).await?);

    Ok(())
}

// The counter row lock must serialise simultaneous checkouts.
async fn concurrent_checkouts_get_distinct_numbers(state: &AppState) -> anyhow::Result<()> {
    const CHECKOUTS: i64 = 40;

    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(backend, "DELETE FROM counters"))
        .await?;

    let handles: Vec<_> = (0..CHECKOUTS)
        .map(|_| {
            let orm = state.orm.clone();
            tokio::spawn(async move { next_order_number(&orm).await })
        })
        .collect();

    let mut numbers = Vec::with_capacity(handles.len());
    for handle in handles {
        numbers.push(handle.await?);
    }
    numbers.sort_unstable();

    let expected: Vec<i64> = (1001..1001 + CHECKOUTS).collect();
    assert_eq!(numbers, expected);
    Ok(())
}

fn checkout_request(items: Vec<CartLineRequest>) -> CheckoutRequest {
    CheckoutRequest {
        customer_name: "Asha Rao".into(),
        email: "asha@example.com".into(),
        country_code: None,
        phone: "9876543210".into(),
        address: "12 MG Road".into(),
        city: "Bengaluru".into(),
        zip: "560001".into(),
        items,
    }
}

async fn create_product(
    state: &AppState,
    admin: &AdminUser,
    name: &str,
    mrp: i64,
    price: i64,
) -> anyhow::Result<Uuid> {
    let product = product_service::create_product(
        state,
        admin,
        CreateProductRequest {
            name: name.into(),
            mrp,
            price,
            category: "Kurtas".into(),
            description: String::new(),
            image_url: String::new(),
            images: Vec::new(),
            in_stock: true,
            is_featured: false,
        },
    )
    .await?
    .data
    .expect("product");
    assert_eq!(product.discount, storefront_api::pricing::calculate_discount(mrp, price));
    Ok(product.id)
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        public_store_url: "http://localhost:5173".into(),
        default_country_code: "+91".into(),
        max_body_bytes: 1024 * 1024,
    };
    let state = AppState::new(orm, config);

    // Clean tables between runs
    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "TRUNCATE TABLE orders, counters, products, categories RESTART IDENTITY CASCADE",
        ))
        .await?;

    Ok(state)
}
