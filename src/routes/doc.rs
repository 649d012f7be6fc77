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
    domain::{
        CustomerType, DeliveryStatus, ReportPeriod,
        report::{InventorySummary, SalesSummary},
    },
    dto::{
        auth::{
            ForgotPasswordRequest, ForgotPasswordResponse, ResetPasswordRequest, SigninRequest,
            SigninResponse, SignupRequest,
        },
        customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
        inventory::{AddInventoryRequest, InventoryHistory, InventoryStatus, UpdateInventoryRequest},
        orders::{CreateOrderRequest, OrderList, UpdateOrderRequest, UpdateOrderStatusRequest},
        reports::{InventoryReport, SalesReport},
    },
    models::{Customer, InventoryRecord, Order, User, UserSummary},
    response::{ApiResponse, Meta},
    routes::{auth, customers, health, inventory, orders, params, reports},
    services::system_service::{HealthData, InitDbData, PingData, ServiceInfo},
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
                    .description(Some(
                        "User id in user-id mode, a signed JWT in jwt mode (AUTH_TOKEN_MODE)",
                    ))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::ping,
        health::health_check,
        health::init_db,
        auth::signup,
        auth::signin,
        auth::forgot_password,
        auth::reset_password,
        inventory::get_inventory,
        inventory::add_inventory,
        inventory::inventory_history,
        inventory::update_inventory,
        customers::list_customers,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        orders::list_orders,
        orders::create_order,
        orders::update_order,
        orders::update_order_status,
        reports::sales_report,
        reports::inventory_report
    ),
    components(
        schemas(
            User,
            UserSummary,
            Customer,
            InventoryRecord,
            Order,
            CustomerType,
            DeliveryStatus,
            ReportPeriod,
            SalesSummary,
            InventorySummary,
            SignupRequest,
            SigninRequest,
            SigninResponse,
            ForgotPasswordRequest,
            ForgotPasswordResponse,
            ResetPasswordRequest,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CustomerList,
            AddInventoryRequest,
            UpdateInventoryRequest,
            InventoryStatus,
            InventoryHistory,
            CreateOrderRequest,
            UpdateOrderRequest,
            UpdateOrderStatusRequest,
            OrderList,
            SalesReport,
            InventoryReport,
            params::ReportScope,
            PingData,
            HealthData,
            ServiceInfo,
            InitDbData,
            Meta,
            ApiResponse<User>,
            ApiResponse<Customer>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<SalesReport>,
            ApiResponse<InventoryReport>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness, health and schema reset"),
        (name = "Auth", description = "Signup, signin and password reset"),
        (name = "Inventory", description = "Rice stock in 60kg bags"),
        (name = "Customers", description = "Restaurant and individual customers"),
        (name = "Orders", description = "Orders and delivery status"),
        (name = "Reports", description = "Sales and inventory reports"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
