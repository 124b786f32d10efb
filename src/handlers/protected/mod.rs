// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Security Level: valid token, any role
// Routes: /user/*
// Middleware: jwt_auth_middleware

pub mod data;
