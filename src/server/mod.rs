pub mod consulta;
pub mod server;
