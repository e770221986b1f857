/*
 * Responsibility
 * - Router-level middleware (each module exposes `apply(router, ..)`)
 * - Order of application is decided in app.rs
 */
pub mod cors;
pub mod http;
pub mod security_headers;
