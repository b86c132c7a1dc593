pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

/// Mounts everything under `/api`: the open identity endpoints under `/user`
/// and the token-protected task endpoints at the scope root.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(users::register)
            .service(users::login),
    )
    .service(tasks::create_task)
    .service(tasks::get_tasks)
    .service(tasks::get_task)
    .service(tasks::update_task)
    .service(tasks::delete_task);
}
