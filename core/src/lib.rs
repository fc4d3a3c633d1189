pub mod archive;
pub mod boost;
pub mod error;
pub mod model;
pub mod ports;
pub mod router;
pub mod tenant_index;
pub mod urn;

pub use error::{CoreError, PublishError};
pub use model::{OddsChangeMessage, RouteParameters};
pub use router::Router;
