use actix_web::web::{self};

pub mod routes {
    pub mod pay;
    pub mod plan;
}

pub mod services {
    pub mod pay;
    pub mod seed;
    pub mod sub;
}

mod dtos {
    pub(crate) mod pay;
}

mod misc {
    pub(crate) mod razorpay;
}

pub fn mount_payment() -> actix_web::Scope {
    web::scope("/payment")
        .service(routes::plan::get_plans)
        .service(routes::pay::post_create_order)
        .service(routes::pay::post_verify_payment)
        .service(routes::pay::get_subscription)
        .service(routes::pay::get_history)
}
