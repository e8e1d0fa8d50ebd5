// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validating extractors.
//!
//! Rejections are [`ApiError`]s carrying [`KennelError::Validation`], so a
//! malformed request is answered with 400 before the handler (and the
//! store) runs.

use axum::extract::{Form, FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use kennel_core::{DogId, KennelError, NewDog};
use serde::Deserialize;

use crate::error::ApiError;

/// A positive integer id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct DogIdPath(pub DogId);

impl<S> FromRequestParts<S> for DogIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| KennelError::validation("id", e.body_text()))?;
        Ok(Self(raw.parse::<DogId>()?))
    }
}

/// Wire shape of the create/update form. Extra fields are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDogForm {
    name: Option<String>,
    breed: Option<String>,
}

/// A urlencoded `name` + `breed` body, both present and non-empty.
#[derive(Debug, Clone)]
pub struct DogForm(pub NewDog);

impl<S> FromRequest<S> for DogForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(raw) = Form::<RawDogForm>::from_request(req, state)
            .await
            .map_err(|e| KennelError::validation("body", e.body_text()))?;
        let name = raw
            .name
            .ok_or_else(|| KennelError::validation("name", "is required"))?;
        let breed = raw
            .breed
            .ok_or_else(|| KennelError::validation("breed", "is required"))?;
        Ok(Self(NewDog::new(name, breed)?))
    }
}
