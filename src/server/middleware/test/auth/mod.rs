use axum::http::{HeaderMap, HeaderValue};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{
            AuthGuard, Permission, Principal, PrincipalGuard, CLIENT_ID_HEADER,
            CLIENT_SECRET_HEADER,
        },
        session::AuthSession,
    },
};

mod owner_or;
mod principal;
mod require;
