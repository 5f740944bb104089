use crate::{
    api::{admin_users, department, document, employee, payroll, timeoff},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public auth routes
    cfg.service(
        web::scope("/api/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            )
            .service(
                web::resource("/check")
                    .wrap(protected_limiter.clone())
                    .route(web::get().to(handlers::check)),
            ),
    );

    // Everything below requires a valid session; only /api/admin/users is
    // additionally role-gated (inside the handlers).
    cfg.service(
        web::scope("/api")
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/employees")
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    .service(
                        web::resource("")
                            .route(web::get().to(payroll::list_payrolls))
                            .route(web::post().to(payroll::create_payroll)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(payroll::get_payroll))
                            .route(web::put().to(payroll::update_payroll)),
                    ),
            )
            .service(
                web::scope("/timeoff")
                    .service(
                        web::resource("")
                            .route(web::get().to(timeoff::list_timeoff))
                            .route(web::post().to(timeoff::create_timeoff)),
                    )
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(timeoff::list_employee_timeoff)),
                    )
                    .service(
                        web::resource("/{id}/status")
                            .route(web::patch().to(timeoff::update_timeoff_status)),
                    )
                    .service(
                        web::resource("/{id}").route(web::delete().to(timeoff::delete_timeoff)),
                    ),
            )
            .service(
                web::scope("/departments")
                    .service(
                        web::resource("")
                            .route(web::get().to(department::list_departments))
                            .route(web::post().to(department::create_department)),
                    )
                    .service(
                        web::resource("/{id}/employees")
                            .route(web::get().to(department::department_employees)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(department::get_department))
                            .route(web::put().to(department::update_department)),
                    ),
            )
            .service(
                web::scope("/documents")
                    .service(
                        web::resource("")
                            .route(web::get().to(document::list_documents))
                            .route(web::post().to(document::create_document)),
                    )
                    .service(
                        web::resource("/{id}").route(web::delete().to(document::delete_document)),
                    ),
            )
            .service(
                web::scope("/admin/users")
                    .service(
                        web::resource("")
                            .route(web::get().to(admin_users::list_users))
                            .route(web::post().to(admin_users::create_user)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(admin_users::update_user))
                            .route(web::delete().to(admin_users::delete_user)),
                    ),
            ),
    );
}
