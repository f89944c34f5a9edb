use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AdminStatus, LoginRequest, LoginResponse, RegisterRequest},
        cart::{CartLineDto, CartLineRequest, CartQuoteRequest, CartSummary},
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        contacts::{ContactList, CreateContactRequest, UpdateContactStatusRequest},
        notifications::{WhatsappLink, WhatsappTemplates},
        orders::{
            CheckoutRequest, OrderList, UpdateDeliveryDateRequest, UpdateOrderStatusRequest,
            UpdatePaymentStatusRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
    },
    models::{
        Category, ContactMessage, ContactStatus, Order, OrderLineItem, OrderStatus, PaymentStatus,
        Product, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, cart, categories, contacts, health, orders, params, products, settings,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::admin_status,
        products::list_products,
        products::featured_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        cart::quote_cart,
        orders::checkout,
        orders::track_order,
        contacts::submit_contact,
        settings::get_settings,
        admin::list_orders,
        admin::get_order,
        admin::update_order_status,
        admin::update_payment_status,
        admin::update_delivery_date,
        admin::order_whatsapp_link,
        admin::list_contacts,
        admin::update_contact_status,
        admin::delete_contact,
        admin::contact_whatsapp_link,
        admin::get_whatsapp_templates,
        admin::save_whatsapp_templates,
        admin::update_settings
    ),
    components(
        schemas(
            User,
            Product,
            Category,
            Order,
            OrderLineItem,
            OrderStatus,
            PaymentStatus,
            ContactMessage,
            ContactStatus,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            AdminStatus,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CategoryList,
            CartLineRequest,
            CartQuoteRequest,
            CartLineDto,
            CartSummary,
            CheckoutRequest,
            UpdateOrderStatusRequest,
            UpdatePaymentStatusRequest,
            UpdateDeliveryDateRequest,
            OrderList,
            CreateContactRequest,
            UpdateContactStatusRequest,
            ContactList,
            WhatsappTemplates,
            WhatsappLink,
            params::ProductQuery,
            params::OrderListQuery,
            params::ContactListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<CartSummary>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and admin status"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Cart", description = "Cart pricing"),
        (name = "Orders", description = "Checkout and order tracking"),
        (name = "Contacts", description = "Contact form"),
        (name = "Settings", description = "Website settings"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
