pub mod handlers;
pub mod machine;
