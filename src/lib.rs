pub mod v1;

pub mod prelude {
    pub use crate::v1::aws::{dynamodb::*, ses::*, *};
    pub use crate::v1::config::*;
    pub use crate::v1::datastore::*;
    pub use crate::v1::handler::*;
    pub use crate::v1::notify::*;
    pub use crate::v1::record::*;
    pub use crate::v1::runtime::*;
    pub use crate::v1::storage::memory::*;
}
