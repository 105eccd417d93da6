// Dashboard data: history aggregates and search. Rendering and charts live in the client.

pub mod handlers;
pub mod summary;
