use actix_web::web::{self};

pub mod routes {
    pub mod campaign;
    pub mod gateway;
    pub mod sms_campaign;
    pub mod smtp;
}

mod services {
    pub(crate) mod campaign;
    pub(crate) mod sms_campaign;
}

mod dtos {
    pub(crate) mod campaign;
    pub(crate) mod gateway;
    pub(crate) mod sms_campaign;
    pub(crate) mod smtp;
}

pub fn mount_smtp() -> actix_web::Scope {
    web::scope("/smtp")
        .service(routes::smtp::post_create_smtp)
        .service(routes::smtp::get_my_smtps)
        .service(routes::smtp::put_update_smtp)
        .service(routes::smtp::delete_smtp)
}

pub fn mount_gateways() -> actix_web::Scope {
    web::scope("/sms_gateway_config")
        .service(routes::gateway::post_create_gateway)
        .service(routes::gateway::get_my_gateways)
        .service(routes::gateway::post_probe_status)
        .service(routes::gateway::put_update_gateway)
        .service(routes::gateway::delete_gateway)
}

pub fn mount_campaigns() -> actix_web::Scope {
    web::scope("/campaign")
        .service(routes::campaign::post_send_campaign)
        .service(routes::campaign::get_my_campaigns)
        .service(routes::campaign::get_campaign)
        .service(routes::campaign::delete_campaign)
}

pub fn mount_sms_campaigns() -> actix_web::Scope {
    web::scope("/sms_campaign")
        .service(routes::sms_campaign::post_send_sms_campaign)
        .service(routes::sms_campaign::get_my_sms_campaigns)
        .service(routes::sms_campaign::get_sms_campaign)
        .service(routes::sms_campaign::put_update_sms_campaign)
        .service(routes::sms_campaign::delete_sms_campaign)
}
