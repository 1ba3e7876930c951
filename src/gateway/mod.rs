//! Edge gateway.
//!
//! Routes `/api/<resource>` paths to the backing service that owns them and
//! answers its own `/health` and aggregated `/ready`.

pub mod health;
pub mod proxy;
pub mod router;

pub use health::{GATEWAY_SERVICE_NAME, HealthAggregator};
pub use proxy::{forward, proxy_client};
pub use router::init_gateway_router;
