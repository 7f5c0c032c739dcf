pub mod api;
pub mod currency;
pub mod health;
pub mod metrics;
pub mod response;
pub mod status;
