use chrono::Utc;
use storefront_api::{
    dto::notifications::WhatsappTemplates,
    error::AppError,
    models::{ContactMessage, ContactStatus, Order, OrderLineItem, OrderStatus, PaymentStatus},
    pricing::format_inr,
    services::notification_service::{
        render_contact_message, render_order_message, tracking_link, whatsapp_link,
    },
};
use uuid::Uuid;

const STORE: &str = "https://shop.example.com";

fn order(status: OrderStatus) -> Order {
    let line = |name: &str, price: i64, quantity: u32| OrderLineItem {
        product_id: Uuid::new_v4(),
        name: name.to_string(),
        mrp: price,
        price,
        category: "Kurtas".to_string(),
        description: String::new(),
        image_url: String::new(),
        images: Vec::new(),
        in_stock: true,
        is_featured: false,
        quantity,
    };
    Order {
        id: Uuid::new_v4(),
        order_number: 1001,
        customer_name: "Asha".into(),
        email: "asha@example.com".into(),
        phone: "+91 98765-43210".into(),
        address: "12 MG Road, Bengaluru, 560001".into(),
        items: vec![line("Cotton Kurta", 1500, 2), line("Scarf", 200, 1)],
        total_amount: 3200,
        status,
        payment_status: PaymentStatus::Unpaid,
        estimated_delivery_date: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn inr_uses_indian_grouping() {
    assert_eq!(format_inr(0), "₹0");
    assert_eq!(format_inr(999), "₹999");
    assert_eq!(format_inr(3200), "₹3,200");
    assert_eq!(format_inr(123456), "₹1,23,456");
    assert_eq!(format_inr(12345678), "₹1,23,45,678");
    assert_eq!(format_inr(-1500), "-₹1,500");
}

#[test]
fn renders_every_placeholder_occurrence() {
    let template = "{customerName}: #{orderId} ({status}) {totalAmount} [{items}] {trackingLink} #{orderId}";
    let message = render_order_message(template, &order(OrderStatus::Processing), STORE);
    assert_eq!(
        message,
        "Asha: #1001 (Processing) ₹3,200 [2x Cotton Kurta, 1x Scarf] \
         https://shop.example.com/track-order?id=1001 #1001"
    );
    assert_eq!(tracking_link(STORE, 1001), "https://shop.example.com/track-order?id=1001");
}

#[test]
fn template_follows_order_status() {
    let templates = WhatsappTemplates::default();
    assert_eq!(
        templates.for_order(OrderStatus::Shipped),
        templates.order_shipped
    );
    assert_eq!(
        templates.for_order(OrderStatus::Delivered),
        templates.order_delivered
    );
    assert_eq!(
        templates.for_order(OrderStatus::Pending),
        templates.order_confirmation
    );
    assert_eq!(
        templates.for_order(OrderStatus::Cancelled),
        templates.order_confirmation
    );

    let message = render_order_message(
        templates.for_order(OrderStatus::Shipped),
        &order(OrderStatus::Shipped),
        STORE,
    );
    assert!(message.starts_with("Hello Asha!"));
    assert!(message.contains("*Items:* 2x Cotton Kurta, 1x Scarf"));
    assert!(!message.contains('{'));
}

#[test]
fn contact_reply_uses_name_and_subject() {
    let contact = ContactMessage {
        id: Uuid::new_v4(),
        name: "Ravi".into(),
        email: "ravi@example.com".into(),
        phone: Some("+91 90000 00000".into()),
        subject: "Sizing".into(),
        message: "Do you have XL?".into(),
        status: ContactStatus::New,
        created_at: Utc::now(),
    };
    let message = render_contact_message("Hi {name}, re: {subject}. {name}", &contact);
    assert_eq!(message, "Hi Ravi, re: Sizing. Ravi");
}

#[test]
fn link_strips_phone_and_encodes_message() {
    let link = whatsapp_link("+91 98765-43210", "Hi there!\nOrder #1001 & more".into())
        .expect("valid link");
    assert_eq!(link.phone, "919876543210");
    assert_eq!(
        link.url,
        "https://wa.me/919876543210?text=Hi%20there!%0AOrder%20%231001%20%26%20more"
    );
    assert_eq!(link.message, "Hi there!\nOrder #1001 & more");
}

#[test]
fn link_requires_phone_digits() {
    assert!(matches!(
        whatsapp_link("n/a", "hello".into()),
        Err(AppError::BadRequest(_))
    ));
}
