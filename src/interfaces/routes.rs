use actix_web::{http::Method, web};

use crate::handlers::{contact, home::home, json_error::json_body_error, system::health_check};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_body_error));

    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .service(health_check)
            .service(
                web::resource("/contact")
                    .route(web::post().to(contact::submit_contact))
                    .route(web::route().method(Method::OPTIONS).to(contact::preflight))
                    .default_service(web::route().to(contact::method_not_allowed)),
            ),
    );
}
