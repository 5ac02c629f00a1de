use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;

use super::{DomainLogic, Error, Summary};
use crate::ports::{clock::ClockPort, database::DatabasePort};

/// Log a club in with its email address
pub struct ShowSummaryRequest {
    pub email: String,
}

impl<D, C> Service<ShowSummaryRequest> for DomainLogic<D, C>
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    type Response = Summary;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ShowSummaryRequest) -> Self::Future {
        let database = self.database.clone();
        Box::pin(async move {
            let club = database
                .find_club_by_email(&req.email)
                .await?
                .ok_or(Error::ClubEmailNotFound(req.email))?;

            tracing::info!(club = %club.name, "club logged in");
            Summary::fetch(database.as_ref(), club).await
        })
    }
}
