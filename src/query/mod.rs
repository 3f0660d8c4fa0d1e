pub mod dispatcher;
pub mod kind;
pub mod payload;
pub mod result;

pub use dispatcher::QueryDispatcher;
pub use kind::QueryKind;
pub use result::{ProcessRecord, QueryEcho, QueryResult};
