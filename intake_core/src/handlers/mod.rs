pub mod admin;
pub mod routes;

pub use admin::create_admin_routes;
pub use routes::create_routes;
