//! # vibematch API
//!
//! REST transport for the matching engine (actix-web).
//!
//! | Method | Path | |
//! |---|---|---|
//! | `PUT` | `/profiles/{user_id}` | store a transcribed profile, embedding it if needed |
//! | `GET` | `/profiles/{user_id}` | fetch a stored profile |
//! | `GET` | `/match_user/{user_id}?looking_for_gender=F` | best match, or 404 |
//! | `GET` | `/healthz` | liveness |

pub mod rest;

pub use rest::{AppState, RestApi};
