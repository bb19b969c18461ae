//! HTTP surface: request and response types, handlers, middleware and the
//! two route groups mounted under `/api`.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
