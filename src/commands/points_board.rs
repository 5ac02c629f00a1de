use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;

use super::{DomainLogic, Error};
use crate::{
    domain::Club,
    ports::{clock::ClockPort, database::DatabasePort},
};

/// Public listing of every club's balance
pub struct PointsBoardRequest;

#[derive(Debug, PartialEq, Eq)]
pub struct PointsBoardResponse {
    pub clubs: Vec<Club>,
}

impl<D, C> Service<PointsBoardRequest> for DomainLogic<D, C>
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    type Response = PointsBoardResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: PointsBoardRequest) -> Self::Future {
        let database = self.database.clone();
        Box::pin(async move {
            Ok(PointsBoardResponse {
                clubs: database.list_clubs().await?,
            })
        })
    }
}
