// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no auth) → Protected (JWT auth) → Elevated (admin JWT auth)
pub mod public; // Tier 1: /register, /login, /health
pub mod protected; // Tier 2: /user/*
pub mod elevated; // Tier 3: /admin/*

pub(crate) mod validation;
