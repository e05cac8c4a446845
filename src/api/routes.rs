use actix_web::web;

use super::handlers;
use super::state::ApiState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health and monitoring
        .route("/health", web::get().to(handlers::health))
        .route("/metrics", web::get().to(handlers::metrics_endpoint))

        // Field reference for template authors
        .route("/template-schema", web::get().to(handlers::template_schema))
        .route("/ewaybill-schema", web::get().to(handlers::ewaybill_schema))

        // Document generation
        .route("/generate-invoice", web::post().to(handlers::generate_invoice))
        .route("/generate-ewaybill", web::post().to(handlers::generate_ewaybill));
}

/// Shared state, body and query error handling, and routes, for both `main` and tests.
pub fn configure_app(state: web::Data<ApiState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let json_config = web::JsonConfig::default()
            .limit(state.config.max_payload_bytes)
            .error_handler(handlers::json_error_handler);
        let query_config = web::QueryConfig::default().error_handler(handlers::query_error_handler);

        cfg.app_data(state)
            .app_data(json_config)
            .app_data(query_config)
            .configure(configure_routes);
    }
}
