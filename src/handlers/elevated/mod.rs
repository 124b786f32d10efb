// handlers/elevated/mod.rs - Elevated handlers (admin role required)
//
// Security Level: valid token with role "admin"
// Routes: /admin/*
// Middleware: jwt_auth_middleware, then require_admin

pub mod admin;
