pub mod error;
pub mod feature_flags;

// Court records domain
pub mod appeal;
pub mod audit;
pub mod bail;
pub mod case;
pub mod common;
pub mod court;
pub mod decision;
pub mod document;
pub mod evidence;
pub mod hearing;
pub mod payment;
pub mod profile;
pub mod role;
pub mod user;
pub mod witness;

pub use error::*;
pub use feature_flags::*;

pub use appeal::*;
pub use audit::*;
pub use bail::*;
pub use case::*;
pub use common::*;
pub use court::*;
pub use decision::*;
pub use document::*;
pub use evidence::*;
pub use hearing::*;
pub use payment::*;
pub use profile::*;
pub use role::*;
pub use user::*;
pub use witness::*;
