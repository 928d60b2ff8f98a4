// Adapter modules / 适配器模块

#[cfg(feature = "rusqlite")]
pub mod rusqlite;
