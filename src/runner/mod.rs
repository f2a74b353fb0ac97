pub mod ds;
pub mod mock;
