use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;

use super::{DomainLogic, Error, Summary};
use crate::{
    domain::{validate_purchase, PurchaseOutcome, Rejection, Shortfall},
    ports::{
        clock::ClockPort,
        database::{DatabasePort, Error as DatabaseError},
    },
};

/// Spend a club's points on places in a competition
pub struct PurchasePlacesRequest {
    pub competition_name: String,
    pub club_name: String,
    /// Number of places as typed in the booking form
    pub places: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PurchasePlacesResponse {
    /// The purchase went through the booking rules
    ///
    /// The summary reflects the state after the purchase, which is unchanged if it was rejected.
    Processed {
        outcome: PurchaseOutcome,
        summary: Summary,
    },
    /// The club exists but the competition doesn't
    CompetitionNotFound(Summary),
    /// The number of places is not a positive integer
    InvalidPlaces(Summary),
}

/// Parse the number of places from the booking form
///
/// Only positive integers are accepted.
fn parse_places(places: &str) -> Option<u32> {
    places.trim().parse::<u32>().ok().filter(|places| *places > 0)
}

impl<D, C> Service<PurchasePlacesRequest> for DomainLogic<D, C>
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    type Response = PurchasePlacesResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: PurchasePlacesRequest) -> Self::Future {
        let database = self.database.clone();
        let clock = self.clock.clone();
        Box::pin(async move {
            // Fetch necessary data
            let club = database
                .find_club_by_name(&req.club_name)
                .await?
                .ok_or(Error::ClubNotFound(req.club_name))?;
            let Some(competition) = database
                .find_competition_by_name(&req.competition_name)
                .await?
            else {
                return Ok(PurchasePlacesResponse::CompetitionNotFound(
                    Summary::fetch(database.as_ref(), club).await?,
                ));
            };
            let Some(places) = parse_places(&req.places) else {
                tracing::info!(club = %club.name, places = %req.places, "invalid number of places");
                return Ok(PurchasePlacesResponse::InvalidPlaces(
                    Summary::fetch(database.as_ref(), club).await?,
                ));
            };

            // Check the booking rules against the current state
            let outcome = validate_purchase(&club, &competition, places, clock.now());
            let (outcome, club) = match outcome {
                PurchaseOutcome::Approved => {
                    match database
                        .register_purchase(&club.name, &competition.name, places)
                        .await
                    {
                        Ok((club, _)) => (PurchaseOutcome::Approved, club),
                        // Another purchase spent the balance since it was read
                        Err(DatabaseError::Shortfall(shortfall)) => {
                            let current = database.find_club_by_name(&club.name).await?;
                            (
                                PurchaseOutcome::Rejected(rejection_for(&shortfall)),
                                current.unwrap_or(club),
                            )
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
                rejected => (rejected, club),
            };

            match outcome {
                PurchaseOutcome::Approved => tracing::info!(
                    club = %club.name,
                    competition = %competition.name,
                    places,
                    points_left = club.points,
                    "places purchased"
                ),
                PurchaseOutcome::Rejected(rejection) => tracing::info!(
                    club = %club.name,
                    competition = %competition.name,
                    places,
                    ?rejection,
                    "purchase rejected"
                ),
            }

            Ok(PurchasePlacesResponse::Processed {
                outcome,
                summary: Summary::fetch(database.as_ref(), club).await?,
            })
        })
    }
}

fn rejection_for(shortfall: &Shortfall) -> Rejection {
    match shortfall {
        Shortfall::Points { .. } => Rejection::InsufficientPoints,
        Shortfall::Places { .. } => Rejection::ExceedsCapacity,
    }
}
