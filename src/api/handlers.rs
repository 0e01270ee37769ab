//! HTTP handlers
//!
//! Thin translation between wire bodies and the identity/engine
//! operations. Authorization lives in the engine; handlers only parse,
//! validate shapes, and convert results.

use super::AppState;
use super::auth::CurrentUser;
use super::schemas::{
    AdminUpdateRequest, CreateTicketRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, TicketDetailResponse, TicketSummaryResponse, UserSummary,
};
use crate::core::TicketId;
use crate::error::{Result, SmartTicketError};
use crate::identity::require_admin;
use axum::Json;
use axum::extract::{Path, State};

/// `GET /` service banner
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Smart Ticketing API running"))
}

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>> {
    payload.validate(&state.config)?;
    state
        .identity
        .register(
            &payload.name,
            &payload.email,
            &payload.password,
            &payload.company,
        )
        .await?;
    Ok(Json(MessageResponse::new("User registered successfully")))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (token, user) = state.identity.login(&payload.email, &payload.password).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: UserSummary::from(&user),
    }))
}

/// `POST /tickets`
pub async fn create_ticket(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateTicketRequest>,
) -> Result<Json<TicketDetailResponse>> {
    payload.validate()?;
    let ticket = state.engine.create_ticket(&user, payload.into_draft()).await?;
    Ok(Json(ticket.into()))
}

/// `GET /tickets/me`
pub async fn list_my_tickets(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<TicketSummaryResponse>>> {
    let summaries = state.engine.list_for_owner(&user).await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// `GET /tickets` (admin)
pub async fn list_all_tickets(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<TicketSummaryResponse>>> {
    let summaries = state.engine.list_all(&user).await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// `GET /tickets/:id`
pub async fn get_ticket(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(ticket_id): Path<String>,
) -> Result<Json<TicketDetailResponse>> {
    let id = parse_ticket_id(&ticket_id)?;
    let ticket = state.engine.ticket_detail(&user, &id).await?;
    Ok(Json(ticket.into()))
}

/// `PATCH /tickets/:id/admin-update`
pub async fn admin_update_ticket(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(ticket_id): Path<String>,
    Json(payload): Json<AdminUpdateRequest>,
) -> Result<Json<TicketDetailResponse>> {
    // role gate first, so non-admins never learn whether an id exists
    require_admin(&user)?;
    let id = parse_ticket_id(&ticket_id)?;
    let updated = state.engine.admin_update(&user, &id, payload.into()).await?;
    Ok(Json(updated.into()))
}

/// An id that does not parse can never name a stored ticket
fn parse_ticket_id(raw: &str) -> Result<TicketId> {
    TicketId::parse_str(raw).map_err(|_| SmartTicketError::TicketNotFound {
        id: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_id_reads_as_not_found() {
        let err = parse_ticket_id("definitely-not-a-uuid").unwrap_err();
        assert!(matches!(err, SmartTicketError::TicketNotFound { .. }));

        let id = TicketId::new();
        assert_eq!(parse_ticket_id(&id.to_string()).unwrap(), id);
    }
}
