//! HTTP surface of the booking service
//!
//! Every handler forwards to one of the [`DomainLogic`] services and renders the result with
//! [`views`]. Expected failures, like an unknown email or a rejected purchase, are rendered as
//! regular pages with a 200 status.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

use crate::{
    commands::{
        book::{BookRequest, BookResponse},
        points_board::PointsBoardRequest,
        purchase_places::{PurchasePlacesRequest, PurchasePlacesResponse},
        show_summary::ShowSummaryRequest,
        DomainLogic, Error,
    },
    ports::{clock::ClockPort, database::DatabasePort},
};

pub mod views;

const GENERIC_ERROR: &str = "Something went wrong-please try again";
const INVALID_PLACES: &str = "Please enter a valid number of places.";

pub fn router<D, C>(logic: DomainLogic<D, C>) -> Router
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/show-summary", post(show_summary::<D, C>))
        .route("/book/:competition/:club", get(book::<D, C>))
        .route("/purchase-places", post(purchase_places::<D, C>))
        .route("/points-board", get(points_board::<D, C>))
        .route("/logout", get(logout))
        .layer(TraceLayer::new_for_http())
        .with_state(logic)
}

#[derive(Deserialize)]
struct LoginForm {
    email: String,
}

#[derive(Deserialize)]
struct PurchaseForm {
    competition: String,
    club: String,
    places: String,
}

async fn index() -> Html<String> {
    views::index(&[])
}

async fn logout() -> Redirect {
    Redirect::to("/")
}

async fn show_summary<D, C>(
    State(logic): State<DomainLogic<D, C>>,
    Form(form): Form<LoginForm>,
) -> Response
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    match logic.oneshot(ShowSummaryRequest { email: form.email }).await {
        Ok(summary) => views::welcome(&summary, &[]).into_response(),
        Err(Error::ClubEmailNotFound(email)) => {
            tracing::info!(%email, "login with an unknown email");
            views::email_not_found().into_response()
        }
        Err(err) => internal_error(err),
    }
}

async fn book<D, C>(
    State(logic): State<DomainLogic<D, C>>,
    Path((competition_name, club_name)): Path<(String, String)>,
) -> Response
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    let req = BookRequest {
        competition_name,
        club_name,
    };
    match logic.oneshot(req).await {
        Ok(BookResponse::Booking { club, competition }) => {
            views::booking(&club, &competition).into_response()
        }
        Ok(BookResponse::CompetitionNotFound(summary)) => {
            views::welcome(&summary, &[GENERIC_ERROR]).into_response()
        }
        Err(Error::ClubNotFound(club)) => {
            tracing::warn!(%club, "booking requested for an unknown club");
            views::index(&[GENERIC_ERROR]).into_response()
        }
        Err(err) => internal_error(err),
    }
}

async fn purchase_places<D, C>(
    State(logic): State<DomainLogic<D, C>>,
    Form(form): Form<PurchaseForm>,
) -> Response
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    let req = PurchasePlacesRequest {
        competition_name: form.competition,
        club_name: form.club,
        places: form.places,
    };
    match logic.oneshot(req).await {
        Ok(PurchasePlacesResponse::Processed { outcome, summary }) => {
            let message = outcome.message();
            views::welcome(&summary, &[message.as_ref()]).into_response()
        }
        Ok(PurchasePlacesResponse::InvalidPlaces(summary)) => {
            views::welcome(&summary, &[INVALID_PLACES]).into_response()
        }
        Ok(PurchasePlacesResponse::CompetitionNotFound(summary)) => {
            views::welcome(&summary, &[GENERIC_ERROR]).into_response()
        }
        Err(Error::ClubNotFound(club)) => {
            tracing::warn!(%club, "purchase requested for an unknown club");
            views::index(&[GENERIC_ERROR]).into_response()
        }
        Err(err) => internal_error(err),
    }
}

async fn points_board<D, C>(State(logic): State<DomainLogic<D, C>>) -> Response
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    match logic.oneshot(PointsBoardRequest).await {
        Ok(board) => views::points_board(&board.clubs).into_response(),
        Err(err) => internal_error(err),
    }
}

fn internal_error(err: Error) -> Response {
    tracing::error!(error = %err, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, views::server_error()).into_response()
}
